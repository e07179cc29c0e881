use std::env;
use std::path::PathBuf;

pub const DEFAULT_VERSION: &str = "20230501";
pub const DEFAULT_BASE_URL: &str = "https://db.panlex.org";

/// Runtime settings resolved from the environment.
///
/// - `PANLEX_DIR`: directory of an extracted CSV dump (default `./panlex-{version}-csv`)
/// - `PANLEX_VERSION`: dump version as `YYYYMMDD` (default `20230501`)
/// - `PANLEX_BASE_URL`: host serving the dump archives (default `https://db.panlex.org`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub version: String,
    pub base_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let version = get("PANLEX_VERSION").unwrap_or_else(|| DEFAULT_VERSION.to_string());
        let data_dir = get("PANLEX_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(format!("panlex-{version}-csv")));
        let base_url = get("PANLEX_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            data_dir,
            version,
            base_url,
        }
    }
}
