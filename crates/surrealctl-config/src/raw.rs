use serde::Deserialize;
use serde_json::{Map, Value};

use crate::model::Configuration;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawConfiguration {
    pub data_dir: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawConfiguration {
    /// Fill the keys absent from the file with `defaults`.
    pub(crate) fn resolve(self, defaults: &Configuration) -> Configuration {
        Configuration {
            data_dir: self.data_dir.unwrap_or_else(|| defaults.data_dir.clone()),
            username: self.username.unwrap_or_else(|| defaults.username.clone()),
            password: self.password.unwrap_or_else(|| defaults.password.clone()),
            extra: self.extra,
        }
    }
}
