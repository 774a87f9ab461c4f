//! Server configuration read from the environment.

use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_API_KEY: &str = "12345ABCDEF";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Directory holding students.json, careers.json and categories.json
    pub data_dir: PathBuf,
    /// Shared secret expected in `Authorization: Bearer <key>`
    pub api_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_dir: PathBuf::from("."),
            api_key: DEFAULT_API_KEY.to_string(),
        }
    }
}

impl Config {
    /// Read `HOST`, `PORT`, `RECORDS_DATA_DIR` and `RECORDS_API_KEY`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; unset or unparsable values keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("Ignoring invalid PORT {:?}, using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => defaults.port,
        };

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            data_dir: lookup("RECORDS_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            api_key: lookup("RECORDS_API_KEY")
                .filter(|key| !key.is_empty())
                .unwrap_or(defaults.api_key),
        }
    }
}
