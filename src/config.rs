//! Application configuration loaded from the environment.
//!
//! All knobs are read once at startup into an immutable [`AppConfig`]
//! that gets passed into the template loader and the router — no
//! module-level globals. A `.env` file is honored when present
//! (loaded by the binary before [`AppConfig::from_env`] runs).

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

const DEFAULT_PORT: u16 = 7000;
const DEFAULT_MONGODB_URI: &str = "mongodb://127.0.0.1:27017";
const DEFAULT_MONGODB_DATABASE: &str = "scrawl";
const DEFAULT_TEMPLATES_DIR: &str = "templates";
const DEFAULT_LAYOUT: &str = "layout";
const DEFAULT_EXT: &str = ".html";
const DEFAULT_PUBLIC_DIR: &str = "public";

/// Operating mode for the render adapter.
///
/// `Debug` recompiles templates from disk on every request so that
/// edits show up without a restart. `Release` serves the artifacts
/// compiled at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    Debug,
    #[default]
    Release,
}

impl FromStr for RunMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debug" => Ok(RunMode::Debug),
            "release" => Ok(RunMode::Release),
            other => Err(ConfigError::InvalidMode(other.to_string())),
        }
    }
}

/// Where templates live and how they are named.
#[derive(Debug, Clone)]
pub struct TemplateConfig {
    /// Root directory holding the layout and all page templates.
    pub root: PathBuf,
    /// Logical name of the layout template (no extension).
    pub layout: String,
    /// File extension shared by all templates, including the dot.
    pub ext: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_TEMPLATES_DIR),
            layout: DEFAULT_LAYOUT.to_string(),
            ext: DEFAULT_EXT.to_string(),
        }
    }
}

/// Immutable application configuration, constructed once in `main`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub run_mode: RunMode,
    pub mongodb_uri: String,
    pub mongodb_database: String,
    pub templates: TemplateConfig,
    pub public_dir: PathBuf,
}

impl AppConfig {
    /// Build the configuration from environment variables, falling back
    /// to defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            Err(_) => DEFAULT_PORT,
        };

        let run_mode = match env::var("APP_MODE") {
            Ok(raw) => raw.parse()?,
            Err(_) => RunMode::default(),
        };

        let templates = TemplateConfig {
            root: PathBuf::from(var_or("TEMPLATES_DIR", DEFAULT_TEMPLATES_DIR)),
            layout: var_or("TEMPLATE_LAYOUT", DEFAULT_LAYOUT),
            ext: var_or("TEMPLATE_EXT", DEFAULT_EXT),
        };

        Ok(Self {
            port,
            run_mode,
            mongodb_uri: var_or("MONGODB_URI", DEFAULT_MONGODB_URI),
            mongodb_database: var_or("MONGODB_DATABASE", DEFAULT_MONGODB_DATABASE),
            templates,
            public_dir: PathBuf::from(var_or("PUBLIC_DIR", DEFAULT_PUBLIC_DIR)),
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a number between 1 and 65535, got {0:?}")]
    InvalidPort(String),

    #[error("APP_MODE must be \"debug\" or \"release\", got {0:?}")]
    InvalidMode(String),
}
