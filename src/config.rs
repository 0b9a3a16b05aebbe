use clap::Parser;
use serde::Deserialize;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::dashboard::controller::DEFAULT_CITY;

pub const DEFAULT_PROVIDER_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_API_KEY: &str = "demo";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    #[arg(short, long, env = "KEY_FILE_PATH")]
    pub key_file_path: Option<String>,

    #[arg(short, long, env = "CERT_FILE_PATH")]
    pub cert_file_path: Option<String>,

    /// Toml file with the default city and weather provider settings.
    #[arg(long, env = "DASHBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Seed for the fake weather, for reproducible pages.
    #[arg(long, env = "WEATHER_SEED")]
    pub seed: Option<u64>,

    #[arg(long, env = "ASSETS_PATH", default_value = "assets")]
    pub assets_path: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub default_city: String,
    pub provider: ProviderSettings,
}

// Not called yet, the dashboard only serves fake weather.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ProviderSettings {
    pub base_url: String,
    pub api_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            default_city: DEFAULT_CITY.to_string(),
            provider: ProviderSettings::default(),
        }
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        ProviderSettings {
            base_url: DEFAULT_PROVIDER_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read from '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse toml from '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

pub fn read_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    let contents = read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let settings = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Read settings from {}", path.display());
    Ok(settings)
}
