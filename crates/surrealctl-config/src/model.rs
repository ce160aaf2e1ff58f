use serde::Serialize;
use serde_json::{Map, Value};

/// Environment variable holding the default data directory.
pub const DATA_DIR_VAR: &str = "SURREAL_PATH";
/// Environment variable holding the default username.
pub const USERNAME_VAR: &str = "SURREAL_USER";
/// Environment variable holding the default password.
pub const PASSWORD_VAR: &str = "SURREAL_PASS";

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_USERNAME: &str = "root";
pub const DEFAULT_PASSWORD: &str = "root";

/// Connection settings handed to the database server on startup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub data_dir: String,
    pub username: String,
    pub password: String,
    /// Keys this tool does not know about, written back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_owned(),
            username: DEFAULT_USERNAME.to_owned(),
            password: DEFAULT_PASSWORD.to_owned(),
            extra: Map::new(),
        }
    }
}

impl Configuration {
    /// Defaults taken from the process environment, with literal fallbacks.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults taken from an arbitrary variable lookup, with literal fallbacks.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let fallback = Self::default();
        Self {
            data_dir: lookup(DATA_DIR_VAR).unwrap_or(fallback.data_dir),
            username: lookup(USERNAME_VAR).unwrap_or(fallback.username),
            password: lookup(PASSWORD_VAR).unwrap_or(fallback.password),
            extra: fallback.extra,
        }
    }

    /// Overwrite the fields set in `partial`. Empty values are ignored.
    pub fn merge(&mut self, partial: PartialConfiguration) {
        let PartialConfiguration {
            data_dir,
            username,
            password,
        } = partial;

        for (slot, value) in [
            (&mut self.data_dir, data_dir),
            (&mut self.username, username),
            (&mut self.password, password),
        ] {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                *slot = value;
            }
        }
    }
}

/// A subset of [`Configuration`] fields to update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialConfiguration {
    pub data_dir: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}
