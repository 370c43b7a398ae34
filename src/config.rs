use anyhow::Context;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
const ENV_PREFIX: &str = "POSTBRIEF";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub api_url: String,
    pub log_level: String,
    pub log_file: Option<String>,
}

/// Values given on the command line. They win over every other source.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub config_file: Option<PathBuf>,
    pub api_url: Option<String>,
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

impl Settings {
    pub fn new(overrides: &Overrides) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // 1. Built-in defaults.
            .set_default("api_url", DEFAULT_API_URL)?
            .set_default("log_level", "info")?
            .set_default("log_file", default_log_file())?;

        builder = match &overrides.config_file {
            // An explicit file replaces the user and local files and must exist.
            Some(path) => builder.add_source(File::from(path.as_path()).required(true)),
            None => builder
                // 2. User's global config.
                .add_source(File::from(get_user_config_path()).required(false))
                // 3. Local postbrief.toml from CWD.
                .add_source(File::with_name("postbrief.toml").required(false)),
        };

        let s = builder
            // 4. POSTBRIEF_API_URL and friends.
            .add_source(Environment::with_prefix(ENV_PREFIX))
            // 5. Command line.
            .set_override_option("api_url", overrides.api_url.clone())?
            .set_override_option("log_level", overrides.log_level.clone())?
            .set_override_option("log_file", overrides.log_file.clone())?
            .build()?;

        let mut settings: Settings = s.try_deserialize()?;
        settings.api_url = normalize_api_url(&settings.api_url);
        Ok(settings)
    }

    /// The log file with `~` and `$VARS` expanded.
    pub fn log_path(&self) -> anyhow::Result<Option<PathBuf>> {
        match self.log_file.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => {
                let expanded = shellexpand::full(raw)
                    .with_context(|| format!("cannot expand log file path {}", raw))?;
                Ok(Some(PathBuf::from(expanded.as_ref())))
            }
        }
    }
}

pub fn get_user_config_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("postbrief");
    path.push("postbrief.toml");
    path
}

fn default_log_file() -> Option<String> {
    let base = dirs::data_local_dir().or_else(dirs::home_dir)?;
    Some(log_file_under(&base).to_string_lossy().into_owned())
}

fn log_file_under(base: &Path) -> PathBuf {
    base.join("postbrief").join("postbrief.log")
}

fn normalize_api_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_URL.to_string()
    } else {
        trimmed.to_string()
    }
}
