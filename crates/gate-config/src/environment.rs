use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Operating mode of the serving process.
///
/// Development and Test disable the global rate limiter entirely; the switch
/// is evaluated once at startup, never per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl Environment {
    /// Whether global rate limiting is disabled in this mode
    pub fn rate_limit_exempt(&self) -> bool {
        matches!(self, Environment::Development | Environment::Test)
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "production" => Ok(Environment::Production),
            // Unknown modes get production behavior (rate limiting on)
            _ => Ok(Environment::Production),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        };
        write!(f, "{name}")
    }
}
