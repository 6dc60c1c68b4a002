//! Timeline configuration.
//!
//! Resolved through a chain, first hit wins:
//!
//! 1. `--config <path>`: explicit per-invocation file
//! 2. `TIMELINE_CONFIG` env var: path to a file
//! 3. `~/.timeline/config.toml`: optional global default
//!
//! An explicitly named file must exist. The global default may be absent,
//! in which case built-in defaults apply.

use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::{Deserialize, Serialize};

/// Fields of the draft when nothing else is configured.
pub const DEFAULT_FIELDS: [&str; 3] = ["title", "description", "tags"];

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid config at {}: {reason}", .path.display())]
    Invalid { path: PathBuf, reason: String },
}

pub type Result<T> = core::result::Result<T, ConfigError>;

/// Timeline configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Fields of the draft. Each starts empty and returns to empty on clear.
    pub fields: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fields: DEFAULT_FIELDS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl Config {
    /// Resolve and load configuration through the chain described above.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        Self::resolve_from(
            explicit,
            env::var("TIMELINE_CONFIG").ok().as_deref(),
            Self::default_path().as_deref(),
        )
    }

    /// The resolution chain over already-read inputs: the `--config` flag,
    /// the `TIMELINE_CONFIG` value, and the global default path.
    fn resolve_from(
        explicit: Option<&Path>,
        env_path: Option<&str>,
        default_path: Option<&Path>,
    ) -> Result<Self> {
        // 1. Explicit --config flag.
        if let Some(path) = explicit {
            return Self::load(path);
        }

        // 2. TIMELINE_CONFIG environment variable.
        if let Some(path) = env_path
            && !path.is_empty()
        {
            return Self::load(Path::new(path));
        }

        // 3. ~/.timeline/config.toml, if present.
        match default_path {
            Some(path) if path.exists() => Self::load(path),
            _ => {
                tracing::debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load config from a specific file.
    /// Returns an error if the file is missing or invalid.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate().map_err(|reason| ConfigError::Invalid {
            path: path.to_path_buf(),
            reason,
        })?;

        tracing::debug!(path = %path.display(), fields = ?config.fields, "loaded config");
        Ok(config)
    }

    /// The default config file path: `~/.timeline/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".timeline").join("config.toml"))
    }

    fn validate(&self) -> core::result::Result<(), String> {
        if self.fields.iter().any(|f| f.trim().is_empty()) {
            return Err("field names must not be empty".to_string());
        }
        for (i, field) in self.fields.iter().enumerate() {
            if self.fields[..i].contains(field) {
                return Err(format!("field '{field}' is listed more than once"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn default_has_blog_post_fields() {
        let config = Config::default();
        assert_eq!(config.fields, vec!["title", "description", "tags"]);
    }

    #[test]
    fn explicit_path_wins() {
        // Explicit paths never consult the env or home directory.
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "fields = [\"name\", \"bio\"]\n");

        let config = Config::resolve(Some(path.as_path())).unwrap();
        assert_eq!(config.fields, vec!["name", "bio"]);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "");

        let config = Config::load(&path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn missing_explicit_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(&dir.path().join("absent.toml")).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn malformed_toml_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "fields = [\"title\"");

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn empty_field_name_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "fields = [\"title\", \" \"]\n");

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn duplicate_field_name_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "fields = [\"tags\", \"tags\"]\n");

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn resolve_from_uses_env_path() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "fields = [\"headline\"]\n");
        let home = dir.path().join("home.toml");
        fs::write(&home, "fields = [\"ignored\"]\n").unwrap();

        let env_path = path.display().to_string();
        let config =
            Config::resolve_from(None, Some(env_path.as_str()), Some(home.as_path())).unwrap();
        assert_eq!(config.fields, vec!["headline"]);
    }

    #[test]
    fn resolve_from_missing_env_file_fails() {
        let dir = TempDir::new().unwrap();
        let env_path = dir.path().join("absent.toml").display().to_string();

        let err = Config::resolve_from(None, Some(env_path.as_str()), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn resolve_from_ignores_empty_env_value() {
        let dir = TempDir::new().unwrap();
        let home = write_config(&dir, "fields = [\"name\"]\n");

        let config = Config::resolve_from(None, Some(""), Some(home.as_path())).unwrap();
        assert_eq!(config.fields, vec!["name"]);
    }

    #[test]
    fn resolve_from_defaults_when_home_file_absent() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join(".timeline").join("config.toml");

        let config = Config::resolve_from(None, None, Some(home.as_path())).unwrap();
        assert_eq!(config, Config::default());

        let config = Config::resolve_from(None, None, None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn resolve_from_explicit_beats_env() {
        let dir = TempDir::new().unwrap();
        let explicit = write_config(&dir, "fields = [\"bio\"]\n");
        let env_path = dir.path().join("absent.toml").display().to_string();

        let config =
            Config::resolve_from(Some(explicit.as_path()), Some(env_path.as_str()), None).unwrap();
        assert_eq!(config.fields, vec!["bio"]);
    }
}
