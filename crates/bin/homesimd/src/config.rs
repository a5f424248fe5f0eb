//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `homesim.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;

use homesim_app::tasks::Periods;
use homesim_domain::alert::AlertThresholds;
use homesim_domain::schedule::ScheduleRule;

/// Top-level configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Randomness and feedback of the simulated hardware.
    pub simulation: SimulationConfig,
    /// Periods of the background tasks.
    pub scheduler: SchedulerConfig,
    /// Alert limits applied on every status refresh.
    pub alerts: AlertThresholds,
    /// Fixed time-of-day rules, `[[schedule]]` tables.
    pub schedule: Vec<ScheduleRule>,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for reproducible sensor and log readings. Fresh entropy when unset.
    pub seed: Option<u64>,
    /// Ring the terminal bell on device changes.
    pub feedback: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub status_refresh_secs: u64,
    pub auto_light_secs: u64,
    pub schedule_check_secs: u64,
}

impl Config {
    /// Load configuration from `homesim.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// result fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("homesim.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("HOMESIM_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("HOMESIM_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("HOMESIM_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Ok(val) = std::env::var("HOMESIM_DATABASE_URL") {
            self.database.url = val;
        }
        if let Ok(val) = std::env::var("HOMESIM_SEED") {
            if let Ok(seed) = val.parse() {
                self.simulation.seed = Some(seed);
            }
        }
        if let Ok(val) = std::env::var("HOMESIM_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        let periods = [
            ("status_refresh_secs", self.scheduler.status_refresh_secs),
            ("auto_light_secs", self.scheduler.auto_light_secs),
            ("schedule_check_secs", self.scheduler.schedule_check_secs),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, secs)| *secs == 0) {
            return Err(ConfigError::Validation(format!(
                "scheduler.{name} must be non-zero"
            )));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// Task periods as durations.
    #[must_use]
    pub fn periods(&self) -> Periods {
        Periods {
            status_refresh: Duration::from_secs(self.scheduler.status_refresh_secs),
            auto_light_check: Duration::from_secs(self.scheduler.auto_light_secs),
            fixed_schedule_check: Duration::from_secs(self.scheduler.schedule_check_secs),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            logging: LoggingConfig::default(),
            simulation: SimulationConfig::default(),
            scheduler: SchedulerConfig::default(),
            alerts: AlertThresholds::default(),
            schedule: ScheduleRule::defaults(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:smart_home.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "homesimd=info,homesim_app=info,homesim_adapter_storage_sqlite_sqlx=info,tower_http=debug"
                .to_string(),
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        let periods = Periods::default();
        Self {
            status_refresh_secs: periods.status_refresh.as_secs(),
            auto_light_secs: periods.auto_light_check.as_secs(),
            schedule_check_secs: periods.fixed_schedule_check.as_secs(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure, including malformed schedule rules.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
