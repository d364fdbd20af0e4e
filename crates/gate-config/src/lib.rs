mod auth_config;
mod config;
mod environment;
mod error;
mod log_level;
mod logging_config;
mod server_config;

pub use auth_config::{AuthConfig, JwtConfig};
pub use config::Config;
pub use environment::Environment;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use server_config::ServerConfig;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_JWT_EXPIRY_MINUTES: u32 = 60;
const DEFAULT_REFRESH_TOKEN_LIFETIME_DAYS: u32 = 7;
const DEFAULT_CLOCK_SKEW_SECS: u64 = 0;
const MIN_JWT_SECRET_LENGTH: usize = 32;
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_DIRECTORY: &str = "log";

#[cfg(test)]
mod tests;
