use crate::{AuthConfig, ConfigError, ConfigErrorResult, LoggingConfig, LogLevel, ServerConfig};

use std::path::PathBuf;
use std::str::FromStr;

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config with full production error handling.
    ///
    /// Loading order:
    /// 1. Check for GATE_CONFIG_DIR env var, else use ./.gate/
    /// 2. Auto-create the config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply GATE_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &PathBuf) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.clone(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: GATE_CONFIG_DIR env var > ./.gate/ (relative to cwd)
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        if let Ok(dir) = std::env::var("GATE_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(".gate"))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("GATE_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("GATE_SERVER_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(environment) = std::env::var("GATE_ENVIRONMENT") {
            // FromStr never fails; unknown modes behave as production
            self.server.environment = environment.parse().unwrap();
        }
        if let Ok(secret) = std::env::var("GATE_AUTH_JWT_SECRET") {
            self.auth.jwt.secret = Some(secret);
        }
        if let Ok(issuer) = std::env::var("GATE_AUTH_JWT_ISSUER") {
            self.auth.jwt.issuer = Some(issuer);
        }
        if let Ok(audience) = std::env::var("GATE_AUTH_JWT_AUDIENCE") {
            self.auth.jwt.audience = Some(audience);
        }
        if let Ok(minutes) = std::env::var("GATE_AUTH_JWT_EXPIRY_MINUTES") {
            if let Ok(minutes) = minutes.parse() {
                self.auth.jwt.expiry_in_minutes = minutes;
            }
        }
        if let Ok(level) = std::env::var("GATE_LOG_LEVEL") {
            self.logging.level = LogLevel::from_str(&level).unwrap();
        }
        if let Ok(colored) = std::env::var("GATE_LOG_COLORED") {
            if let Ok(colored) = colored.parse() {
                self.logging.colored = colored;
            }
        }
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.auth.validate()?;

        Ok(())
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);
        info!("  environment: {}", self.server.environment);
        info!(
            "  rate limiting: {}",
            if self.server.environment.rate_limit_exempt() {
                "disabled (development/test mode)"
            } else {
                "enabled"
            }
        );
        info!(
            "  auth: HS256, issuer={}, audience={}, expiry={}m, skew={}s",
            self.auth.jwt.issuer.as_deref().unwrap_or("<unset>"),
            self.auth.jwt.audience.as_deref().unwrap_or("<unset>"),
            self.auth.jwt.expiry_in_minutes,
            self.auth.jwt.clock_skew_secs
        );
    }
}
