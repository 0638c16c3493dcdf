use std::{env, path::PathBuf};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://cronometer.com";
pub const DEFAULT_CACHE_PATH: &str = "cronometer_cache.json";
const DEFAULT_FETCH_DAYS: i64 = 90;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("CRONOMETER_USER is not set; export it together with CRONOMETER_PASS, or point CALORIE_CSV at an exported file")]
    MissingUser,
    #[error("CRONOMETER_PASS is not set")]
    MissingPassword,
}

/// Login credentials for the nutrition service. Read from the environment,
/// held in memory only.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Where the daily rows come from: a pre-exported CSV file, or the remote
/// service through the same-day cache.
#[derive(Debug, Clone)]
pub enum SourceConfig {
    Csv {
        path: PathBuf,
    },
    Cronometer {
        base_url: String,
        credentials: Credentials,
        cache_path: PathBuf,
        fetch_days: i64,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub port: u16,
}

impl AppConfig {
    /// Reads the full configuration from the environment. `CALORIE_CSV`
    /// selects the file-based variant; otherwise both credential variables
    /// are required.
    pub fn from_env() -> Result<Self, ConfigError> {
        let source = if let Ok(path) = env::var("CALORIE_CSV") {
            SourceConfig::Csv {
                path: PathBuf::from(path),
            }
        } else {
            let username = env::var("CRONOMETER_USER").map_err(|_| ConfigError::MissingUser)?;
            let password = env::var("CRONOMETER_PASS").map_err(|_| ConfigError::MissingPassword)?;
            SourceConfig::Cronometer {
                base_url: env::var("CRONOMETER_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
                credentials: Credentials { username, password },
                cache_path: env::var("CRONOMETER_CACHE_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(DEFAULT_CACHE_PATH)),
                fetch_days: env::var("CALORIE_FETCH_DAYS")
                    .ok()
                    .and_then(|value| value.parse::<i64>().ok())
                    .filter(|days| *days > 0)
                    .unwrap_or(DEFAULT_FETCH_DAYS),
            }
        };

        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8080);

        Ok(Self { source, port })
    }
}
