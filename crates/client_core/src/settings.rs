use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use shared::protocol::{DEFAULT_API_BASE_URL, PREDICT_PATH};
use thiserror::Error;
use url::Url;

pub const SETTINGS_FILE: &str = "predictor.toml";
pub const SETTINGS_PATH_ENV: &str = "PREDICTOR_CONFIG";
/// Checked in order; a later variable overrides an earlier one.
pub const API_URL_ENV_VARS: [&str; 2] = ["PREDICTOR_API_URL", "APP__API_BASE_URL"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_base_url: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileSettings {
    api_base_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid API base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("API base URL '{0}' must use http or https")]
    UnsupportedScheme(String),
}

impl ClientSettings {
    /// Replaces the base URL when `api_base_url` is a non-empty override.
    pub fn with_api_base_url(mut self, api_base_url: Option<String>) -> Result<Self, SettingsError> {
        if let Some(url) = api_base_url.filter(|url| !url.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
            self.predict_endpoint()?;
        }
        Ok(self)
    }

    pub fn predict_endpoint(&self) -> Result<Url, SettingsError> {
        let raw = self.api_base_url.trim();
        let mut base = Url::parse(raw).map_err(|source| SettingsError::InvalidBaseUrl {
            url: raw.to_string(),
            source,
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(SettingsError::UnsupportedScheme(raw.to_string()));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(PREDICT_PATH)
            .map_err(|source| SettingsError::InvalidBaseUrl {
                url: raw.to_string(),
                source,
            })
    }
}

/// Defaults, then `predictor.toml` (or `$PREDICTOR_CONFIG`), then env overrides.
pub fn load_settings() -> Result<ClientSettings, SettingsError> {
    let explicit_path = std::env::var(SETTINGS_PATH_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from);
    let path = explicit_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE));

    let raw = match fs::read_to_string(&path) {
        Ok(raw) => Some(raw),
        Err(err) if err.kind() == io::ErrorKind::NotFound && explicit_path.is_none() => None,
        Err(source) => return Err(SettingsError::Read { path, source }),
    };

    resolve_settings(raw.as_deref().map(|raw| (path.as_path(), raw)), |name| {
        std::env::var(name).ok()
    })
}

pub fn resolve_settings(
    file: Option<(&Path, &str)>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ClientSettings, SettingsError> {
    let mut settings = ClientSettings::default();

    if let Some((path, raw)) = file {
        let file_cfg: FileSettings = toml::from_str(raw).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(v) = file_cfg.api_base_url {
            settings.api_base_url = v;
        }
    }

    for name in API_URL_ENV_VARS {
        if let Some(v) = env(name).filter(|v| !v.trim().is_empty()) {
            settings.api_base_url = v;
        }
    }

    settings.api_base_url = settings.api_base_url.trim().to_string();
    settings.predict_endpoint()?;
    Ok(settings)
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
