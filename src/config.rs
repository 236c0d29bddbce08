use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::infrastructure::seed::SeedData;
use crate::validation::IdMatchPolicy;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a valid port number, got `{value}`")]
    InvalidPort { name: &'static str, value: String },

    #[error("{name} must be true or false, got `{value}`")]
    InvalidFlag { name: &'static str, value: String },

    #[error("Failed to read seed data from {}: {source}", .path.display())]
    SeedRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse seed data from {}: {source}", .path.display())]
    SeedParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid {kind} `{id}` in seed data: {message}")]
    SeedInvalid {
        kind: &'static str,
        id: String,
        message: String,
    },
}

/// Runtime settings, read from the environment (and `.env` via dotenvy in `main`).
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// `ENFORCE_ORDER_ID_MATCH`: whether an order update or delete whose body id
    /// disagrees with the route id is rejected (default) or only logged.
    pub order_id_match: IdMatchPolicy,
    pub seed_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            order_id_match: IdMatchPolicy::Enforce,
            seed_path: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Settings::default();

        let host = lookup("HOST").unwrap_or(defaults.host);

        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { name: "PORT", value })?,
            None => defaults.port,
        };

        let order_id_match = match lookup("ENFORCE_ORDER_ID_MATCH") {
            Some(value) => {
                if parse_flag("ENFORCE_ORDER_ID_MATCH", value)? {
                    IdMatchPolicy::Enforce
                } else {
                    IdMatchPolicy::Lenient
                }
            }
            None => defaults.order_id_match,
        };

        let seed_path = lookup("SEED_DATA_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Settings {
            host,
            port,
            order_id_match,
            seed_path,
        })
    }

    /// Seed records from `SEED_DATA_PATH`, or empty stores when it is unset.
    pub fn load_seed(&self) -> Result<SeedData, ConfigError> {
        match &self.seed_path {
            Some(path) => SeedData::from_path(path),
            None => Ok(SeedData::default()),
        }
    }
}

fn parse_flag(name: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidFlag { name, value }),
    }
}
