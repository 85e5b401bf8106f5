//! TOML-based configuration for the course manager.
//!
//! Reads and writes `AppConfig` to the platform-appropriate config file:
//! - Windows:  `%APPDATA%\CourseManager\config.toml`
//! - Linux:    `~/.config/course-manager/config.toml`
//! - macOS:    `~/Library/Application Support/CourseManager/config.toml`
//!
//! ```toml
//! [data]
//! course_file = "course_records.txt"
//! student_file = "student_records.txt"
//! faculty_file = "faculty_records.txt"
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Every field has a `#[serde(default = ...)]` so a partial file, or no file
//! at all, yields a working configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level application configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Locations of the three record files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataConfig {
    /// Course records, `name,credits,capacity` per line.
    #[serde(default = "default_course_file")]
    pub course_file: PathBuf,
    /// Student records.
    #[serde(default = "default_student_file")]
    pub student_file: PathBuf,
    /// Faculty records.
    #[serde(default = "default_faculty_file")]
    pub faculty_file: PathBuf,
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_course_file() -> PathBuf {
    PathBuf::from("course_records.txt")
}
fn default_student_file() -> PathBuf {
    PathBuf::from("student_records.txt")
}
fn default_faculty_file() -> PathBuf {
    PathBuf::from("faculty_records.txt")
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            course_file: default_course_file(),
            student_file: default_student_file(),
            faculty_file: default_faculty_file(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads `AppConfig` from the platform config file.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the file
/// does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Persists `config` to the platform config file.
///
/// # Errors
///
/// See [`save_config_to`].
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    save_config_to(&config_file_path()?, config)
}

/// Persists `config` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config_to(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves the platform config base directory including the application
/// subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("CourseManager"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("course-manager"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("CourseManager")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_config_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("course_manager_cfg_{}", Uuid::new_v4()))
            .join("config.toml")
    }

    // ── defaults ──────────────────────────────────────────────────────────────

    #[test]
    fn test_app_config_default_has_expected_record_files() {
        // Arrange / Act
        let cfg = AppConfig::default();

        // Assert
        assert_eq!(cfg.data.course_file, PathBuf::from("course_records.txt"));
        assert_eq!(cfg.data.student_file, PathBuf::from("student_records.txt"));
        assert_eq!(cfg.data.faculty_file, PathBuf::from("faculty_records.txt"));
    }

    #[test]
    fn test_logging_config_default_level_is_info() {
        assert_eq!(LoggingConfig::default().level, "info");
    }

    // ── TOML parsing ──────────────────────────────────────────────────────────

    #[test]
    fn test_deserialize_empty_toml_uses_defaults() {
        let cfg: AppConfig = toml::from_str("").expect("deserialize empty");
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_deserialize_partial_data_overrides_defaults() {
        // Arrange
        let toml_str = r#"
[data]
course_file = "/srv/records/courses.txt"
"#;

        // Act
        let cfg: AppConfig = toml::from_str(toml_str).expect("deserialize partial");

        // Assert
        assert_eq!(cfg.data.course_file, PathBuf::from("/srv/records/courses.txt"));
        // Unspecified fields keep their defaults
        assert_eq!(cfg.data.student_file, PathBuf::from("student_records.txt"));
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn test_deserialize_invalid_toml_returns_parse_error() {
        let result: Result<AppConfig, toml::de::Error> = toml::from_str("[[[ not valid toml");
        assert!(result.is_err());
    }

    // ── load / save against a temp directory ──────────────────────────────────

    #[test]
    fn test_load_config_from_missing_file_returns_default() {
        let path = temp_config_path();
        let cfg = load_config_from(&path).expect("missing file is not an error");
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        // Arrange
        let path = temp_config_path();
        let mut cfg = AppConfig::default();
        cfg.data.faculty_file = PathBuf::from("staff.txt");
        cfg.logging.level = "debug".to_string();

        // Act
        save_config_to(&path, &cfg).expect("save");
        let restored = load_config_from(&path).expect("load");

        // Assert
        assert_eq!(restored, cfg);
        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_load_config_from_malformed_file_is_parse_error() {
        let path = temp_config_path();
        save_config_to(&path, &AppConfig::default()).expect("save");
        std::fs::write(&path, "[data\ncourse_file = ").expect("overwrite");

        let result = load_config_from(&path);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }
}
