use serde::{Deserialize, Serialize};
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    errors::IntakeError,
    utils::paths::{app_data_dir, config_file_in, ensure_dir},
};

const TMP_SUFFIX: &str = "tmp";

/// Environment variable overriding the configured API base URL.
pub const API_URL_ENV: &str = "PLACEMENT_INTAKE_API_URL";

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Applies environment overrides on top of the persisted values.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = env::var(API_URL_ENV) {
            let trimmed = url.trim();
            if !trimmed.is_empty() {
                self.api_base_url = trimmed.to_string();
            }
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Updates a single setting by key, as used by `config set`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), IntakeError> {
        let value = value.trim();
        match key {
            "api_base_url" | "api-url" => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(IntakeError::Config(format!(
                        "API base URL must start with http:// or https:// (got `{value}`)"
                    )));
                }
                self.api_base_url = value.trim_end_matches('/').to_string();
            }
            "request_timeout_secs" | "timeout" => {
                let secs = value.parse::<u64>().map_err(|_| {
                    IntakeError::Config(format!("timeout must be a whole number of seconds (got `{value}`)"))
                })?;
                if secs == 0 {
                    return Err(IntakeError::Config("timeout must be at least 1 second".into()));
                }
                self.request_timeout_secs = secs;
            }
            other => {
                return Err(IntakeError::Config(format!(
                    "unknown setting `{other}` (expected api_base_url or request_timeout_secs)"
                )))
            }
        }
        Ok(())
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, IntakeError> {
        Self::from_base(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, IntakeError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, IntakeError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config, IntakeError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), IntakeError> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), IntakeError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_returns_defaults_when_missing() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn save_then_load_keeps_settings() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.set("api_base_url", "https://placements.example.edu/").unwrap();
        config.set("timeout", "5").unwrap();
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.api_base_url, "https://placements.example.edu");
        assert_eq!(loaded.request_timeout_secs, 5);
        assert!(!tmp_path(manager.path()).exists());
    }

    #[test]
    fn set_rejects_unknown_keys_and_bad_values() {
        let mut config = Config::default();
        assert!(matches!(config.set("colour", "red"), Err(IntakeError::Config(_))));
        assert!(matches!(config.set("api_base_url", "ftp://x"), Err(IntakeError::Config(_))));
        assert!(matches!(config.set("timeout", "0"), Err(IntakeError::Config(_))));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_files_fill_missing_fields_with_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{ "api_base_url": "http://localhost:8080" }"#).unwrap();
        let loaded = manager.load().unwrap();
        assert_eq!(loaded.api_base_url, "http://localhost:8080");
        assert_eq!(loaded.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
