use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use covercraft_engine::{AtomicFileWriter, GenerationSettings, PersistError, UploadSettings};
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

pub const DEFAULT_SETTINGS_FILE: &str = "covercraft.ron";

/// Contents of `covercraft.ron`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub api_base_url: String,
    pub output_dir: PathBuf,
    pub log_destination: LogDestination,
    pub upload_step_percent: u8,
    pub upload_interval_ms: u64,
    pub connect_timeout_secs: u64,
    /// No limit when unset.
    pub request_timeout_secs: Option<u64>,
}

impl Default for AppSettings {
    fn default() -> Self {
        let generation = GenerationSettings::default();
        let upload = UploadSettings::default();
        Self {
            api_base_url: generation.base_url,
            output_dir: PathBuf::from("output"),
            log_destination: LogDestination::default(),
            upload_step_percent: upload.step_percent,
            upload_interval_ms: upload.interval.as_millis() as u64,
            connect_timeout_secs: generation.connect_timeout.as_secs(),
            request_timeout_secs: None,
        }
    }
}

impl AppSettings {
    pub fn generation(&self) -> GenerationSettings {
        GenerationSettings {
            base_url: self.api_base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            ..GenerationSettings::default()
        }
    }

    pub fn upload(&self) -> UploadSettings {
        UploadSettings {
            step_percent: self.upload_step_percent.clamp(1, 100),
            interval: Duration::from_millis(self.upload_interval_ms),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] ron::Error),
    #[error("failed to write settings: {0}")]
    Write(#[from] PersistError),
}

/// Reads settings from `path`. A missing file is not an error and yields `None`.
pub fn load_settings(path: &Path) -> Result<Option<AppSettings>, SettingsError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    ron::from_str(&content)
        .map(Some)
        .map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Writes `settings` to `path` as pretty RON, replacing any existing file.
pub fn save_settings(path: &Path, settings: &AppSettings) -> Result<PathBuf, SettingsError> {
    let pretty = ron::ser::PrettyConfig::new();
    let content = ron::ser::to_string_pretty(settings, pretty)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_SETTINGS_FILE.to_string());
    let writer = AtomicFileWriter::new(dir);
    Ok(writer.write(&filename, content.as_bytes())?)
}

#[cfg(test)]
mod tests {
    use super::{load_settings, save_settings, AppSettings, SettingsError};
    use crate::platform::logging::LogDestination;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn missing_file_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_settings(&dir.path().join("covercraft.ron")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("covercraft.ron");
        std::fs::write(
            &path,
            r#"(api_base_url: "https://letters.example.com", log_destination: both)"#,
        )
        .unwrap();

        let settings = load_settings(&path).unwrap().unwrap();
        assert_eq!(settings.api_base_url, "https://letters.example.com");
        assert_eq!(settings.log_destination, LogDestination::Both);
        assert_eq!(settings.output_dir, PathBuf::from("output"));
        assert_eq!(settings.upload().interval, Duration::from_millis(50));
        assert_eq!(settings.generation().request_timeout, None);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("covercraft.ron");
        std::fs::write(&path, "(api_base_url: ").unwrap();
        let err = load_settings(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
    }

    #[test]
    fn saved_settings_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("covercraft.ron");
        let settings = AppSettings {
            request_timeout_secs: Some(120),
            upload_step_percent: 25,
            ..AppSettings::default()
        };

        save_settings(&path, &settings).unwrap();
        let loaded = load_settings(&path).unwrap().unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(
            loaded.generation().request_timeout,
            Some(Duration::from_secs(120))
        );
    }
}
