pub mod interface;
pub mod clipdrop;

pub use interface::{GeneratedImage, ImageGenError, ImageGenerator};
pub use clipdrop::ClipdropClient;
