pub mod interface;
pub mod google;
pub mod passthrough;
pub mod factory;

pub use interface::{TranslateRequest, TranslateResponse, Translator};
pub use google::GoogleTranslator;
pub use passthrough::PassthroughTranslator;
pub use factory::TranslatorFactory;
