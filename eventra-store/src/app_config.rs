use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub booking: BookingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Origin the `/api/...` paths are resolved against.
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// JSON file holding `access_token`, `refresh_token` and `role`.
    pub token_path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingConfig {
    /// Pause between a successful seat lock and the confirmation call.
    pub payment_delay_ms: u64,
}

impl BookingConfig {
    pub fn payment_delay(&self) -> Duration {
        Duration::from_millis(self.payment_delay_ms)
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::builder(&run_mode)?.build()?.try_deserialize()
    }

    fn builder(run_mode: &str) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        Ok(config::Config::builder()
            .set_default("api.base_url", "http://127.0.0.1:5000")?
            .set_default("api.timeout_seconds", 30)?
            .set_default("storage.token_path", ".eventra/session.json")?
            .set_default("booking.payment_delay_ms", 1500)?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in.
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `EVENTRA__API__BASE_URL=https://tickets.example.com`
            .add_source(config::Environment::with_prefix("EVENTRA").separator("__")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_files() {
        let config: Config = Config::builder("test-defaults")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.booking.payment_delay(), Duration::from_millis(1500));
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
        assert!(config.storage.token_path.ends_with("session.json"));
    }
}
