use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    pub provider: ProviderConfig,
    pub notification: NotificationConfig,
    #[serde(default)]
    pub sessions: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    #[serde(default = "default_bookings_file")]
    pub bookings_file: String,
    #[serde(default = "default_users_file")]
    pub users_file: String,
    #[serde(default = "default_history_file")]
    pub history_file: String,
}

fn default_bookings_file() -> String { "bookings.jsonl".to_string() }
fn default_users_file() -> String { "users.json".to_string() }
fn default_history_file() -> String { "history.json".to_string() }

impl StorageConfig {
    pub fn bookings_path(&self) -> PathBuf {
        self.data_dir.join(&self.bookings_file)
    }

    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(&self.users_file)
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(&self.history_file)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Offline offers file in the provider's `{data, dictionaries}` shape.
    pub fixture_path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NotificationConfig {
    pub sender: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Seat selections not booked within this window are dropped.
    pub ttl_seconds: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { ttl_seconds: 900 }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // optional per-environment overrides
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `AERODESK_SERVER__PORT=9000`
            .add_source(config::Environment::with_prefix("AERODESK").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
