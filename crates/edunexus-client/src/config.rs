use std::path::PathBuf;

use edunexus_types::DEFAULT_NAMESPACE;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_DATA_PATH: &str = "edunexus.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL; endpoints are appended to it.
    pub api_url: String,
    /// SQLite file backing the local store.
    pub data_path: PathBuf,
    /// Prefix of local storage keys.
    pub namespace: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            data_path: DEFAULT_DATA_PATH.into(),
            namespace: DEFAULT_NAMESPACE.into(),
        }
    }
}

impl ClientConfig {
    /// Read `EDUNEXUS_*` variables, loading `.env` first if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            api_url: lookup("EDUNEXUS_API_URL").unwrap_or(defaults.api_url),
            data_path: lookup("EDUNEXUS_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            namespace: lookup("EDUNEXUS_NAMESPACE").unwrap_or(defaults.namespace),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variables_fall_back_to_defaults() {
        let config = ClientConfig::from_lookup(|_| None);
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_url, "http://localhost:5000/api");
    }

    #[test]
    fn variables_override_defaults() {
        let config = ClientConfig::from_lookup(|name| match name {
            "EDUNEXUS_API_URL" => Some("http://backend:8080/api".into()),
            "EDUNEXUS_NAMESPACE" => Some("classroom".into()),
            _ => None,
        });
        assert_eq!(config.api_url, "http://backend:8080/api");
        assert_eq!(config.namespace, "classroom");
        assert_eq!(config.data_path, PathBuf::from("edunexus.db"));
    }
}
