pub mod config;
pub mod error;
pub mod handlers;
pub mod image_gen;
pub mod routes;
pub mod state;
pub mod storage;
pub mod translate;

pub use config::Config;
pub use routes::build_app;
pub use state::AppState;
