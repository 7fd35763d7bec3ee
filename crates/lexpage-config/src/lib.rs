pub mod config;
pub mod error;
pub mod render;
pub mod smileys;

pub use config::Config;
pub use error::ConfigError;
