mod model;
mod raw;

use std::path::{Path, PathBuf};

pub use model::{
    Configuration, PartialConfiguration, DATA_DIR_VAR, DEFAULT_DATA_DIR, DEFAULT_PASSWORD,
    DEFAULT_USERNAME, PASSWORD_VAR, USERNAME_VAR,
};

/// Name of the configuration file inside the state directory.
pub const CONFIG_FILE: &str = "config.json";

/// Error type for configuration handling.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse a configuration from JSON text, falling back to `defaults` for absent keys.
///
/// # Errors
///
/// Returns a `ConfigError` if the text is not a valid configuration object.
pub fn parse_json(text: &str, defaults: &Configuration) -> Result<Configuration, ConfigError> {
    let raw = serde_json::from_str::<raw::RawConfiguration>(text)?;
    Ok(raw.resolve(defaults))
}

/// Reads and writes `config.json` in a single directory.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    defaults: Configuration,
}

impl ConfigStore {
    /// Store in `dir` with defaults read from the environment.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self::with_defaults(dir, Configuration::from_env())
    }

    #[must_use]
    pub fn with_defaults(dir: impl AsRef<Path>, defaults: Configuration) -> Self {
        Self {
            path: dir.as_ref().join(CONFIG_FILE),
            defaults,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the configuration. A missing or unreadable file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file exists but is not valid JSON.
    pub fn load(&self) -> Result<Configuration, ConfigError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => parse_json(&text, &self.defaults),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(self.defaults.clone()),
            Err(err) => {
                tracing::warn!("Cannot read {}: {err}, using defaults", self.path.display());
                Ok(self.defaults.clone())
            }
        }
    }

    /// Merge `partial` into the stored configuration and write it back.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the current file cannot be parsed or the
    /// merged record cannot be written.
    pub fn save(&self, partial: PartialConfiguration) -> Result<Configuration, ConfigError> {
        let mut config = self.load()?;
        config.merge(partial);

        let text = serde_json::to_string_pretty(&config)?;
        std::fs::write(&self.path, text)?;
        tracing::debug!("Wrote {}", self.path.display());

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &tempfile::TempDir) -> ConfigStore {
        ConfigStore::with_defaults(dir.path(), Configuration::default())
    }

    #[test]
    fn load_without_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = store(&dir).load().unwrap();
        assert_eq!(config.data_dir, "./data");
        assert_eq!(config.username, "root");
        assert_eq!(config.password, "root");
        assert!(!dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn save_updates_only_given_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        store
            .save(PartialConfiguration {
                data_dir: Some("./my-data".to_owned()),
                password: Some("secret".to_owned()),
                ..Default::default()
            })
            .unwrap();
        store
            .save(PartialConfiguration {
                username: Some("alice".to_owned()),
                ..Default::default()
            })
            .unwrap();

        let config = store.load().unwrap();
        assert_eq!(config.data_dir, "./my-data");
        assert_eq!(config.username, "alice");
        assert_eq!(config.password, "secret");
    }

    #[test]
    fn save_writes_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        store(&dir)
            .save(PartialConfiguration {
                username: Some("alice".to_owned()),
                ..Default::default()
            })
            .unwrap();

        let text = std::fs::read_to_string(dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(
            text,
            "{\n  \"dataDir\": \"./data\",\n  \"username\": \"alice\",\n  \"password\": \"root\"\n}"
        );
    }

    #[test]
    fn save_keeps_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{"dataDir": "./db", "username": "u", "password": "p", "bind": "0.0.0.0:8000"}"#,
        )
        .unwrap();

        let store = store(&dir);
        store
            .save(PartialConfiguration {
                password: Some("q".to_owned()),
                ..Default::default()
            })
            .unwrap();

        let config = store.load().unwrap();
        assert_eq!(config.password, "q");
        assert_eq!(config.extra["bind"], "0.0.0.0:8000");
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let defaults = Configuration::from_lookup(|key| {
            (key == USERNAME_VAR).then(|| "envuser".to_owned())
        });
        let config = parse_json(r#"{"dataDir": "./db"}"#, &defaults).unwrap();
        assert_eq!(config.data_dir, "./db");
        assert_eq!(config.username, "envuser");
        assert_eq!(config.password, "root");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{ not json").unwrap();

        let store = store(&dir);
        assert!(matches!(store.load(), Err(ConfigError::Json(_))));
        assert!(matches!(
            store.save(PartialConfiguration::default()),
            Err(ConfigError::Json(_))
        ));
        assert_eq!(
            std::fs::read_to_string(dir.path().join(CONFIG_FILE)).unwrap(),
            "{ not json"
        );
    }
}
