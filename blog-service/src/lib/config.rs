use std::collections::HashMap;
use std::env;

use auth::Visibility;
use auth::WorkFactor;
use chrono::Duration;
use chrono::Utc;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
    /// Route name to visibility overrides, e.g. `getUserById = "protected"`
    #[serde(default)]
    pub access: HashMap<String, Visibility>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
}

impl JwtConfig {
    /// Lifetime of tokens issued at login.
    ///
    /// # Errors
    /// * `ConfigError::Message` - `expiration_hours` is not positive, or so large
    ///   that expiry timestamps overflow
    pub fn token_ttl(&self) -> Result<Duration, ConfigError> {
        if self.expiration_hours <= 0 {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_hours must be positive, got {}",
                self.expiration_hours
            )));
        }

        Duration::try_hours(self.expiration_hours)
            .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
            .ok_or_else(|| {
                ConfigError::Message(format!(
                    "jwt.expiration_hours is out of range: {}",
                    self.expiration_hours
                ))
            })
    }
}

/// Argon2id work factor.
#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        let work_factor = WorkFactor::default();
        Self {
            memory_kib: work_factor.memory_kib,
            iterations: work_factor.iterations,
            parallelism: work_factor.parallelism,
        }
    }
}

impl From<&PasswordConfig> for WorkFactor {
    fn from(config: &PasswordConfig) -> Self {
        Self {
            memory_kib: config.memory_kib,
            iterations: config.iterations,
            parallelism: config.parallelism,
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Self = configuration.try_deserialize()?;
        config.jwt.token_ttl()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt(expiration_hours: i64) -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            expiration_hours,
        }
    }

    #[test]
    fn test_token_ttl() {
        assert_eq!(jwt(24).token_ttl().unwrap(), Duration::hours(24));
    }

    #[test]
    fn test_token_ttl_rejects_non_positive_hours() {
        assert!(matches!(jwt(0).token_ttl(), Err(ConfigError::Message(_))));
        assert!(matches!(jwt(-5).token_ttl(), Err(ConfigError::Message(_))));
    }

    #[test]
    fn test_token_ttl_rejects_overflowing_hours() {
        assert!(matches!(
            jwt(i64::MAX).token_ttl(),
            Err(ConfigError::Message(_))
        ));
        assert!(matches!(
            jwt(1_000_000_000_000).token_ttl(),
            Err(ConfigError::Message(_))
        ));
    }
}
