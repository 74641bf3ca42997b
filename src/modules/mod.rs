pub mod config;
pub mod logger;
pub mod oauth;

pub use config::load_settings;
pub use logger::init_logger;
