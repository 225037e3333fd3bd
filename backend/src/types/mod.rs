mod config;
mod environment;
mod error;
mod extractors;

pub use config::{AwsSettings, Config, ConfigError, StaticCredentials};
pub use environment::Environment;
pub use error::AppError;
pub use extractors::FormOrJson;
