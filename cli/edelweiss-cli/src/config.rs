//! CLI configuration
//!
//! Precedence: CLI args > env vars > config file > defaults. clap merges
//! the first two (env attributes on the args); this module layers the
//! optional TOML file and the built-in production default underneath.

use std::path::Path;

use common::{Error, Result};
use serde::Deserialize;

/// Production Edelweiss endpoint, used when nothing else sets a URL.
pub const DEFAULT_URL: &str = "https://api.edelweissdata.com";

const DEFAULT_CONFIG_FILE: &str = "edelweiss.toml";

/// Effective configuration for one CLI invocation.
#[derive(Debug)]
pub struct Config {
    pub url: String,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    url: Option<String>,
}

impl Config {
    /// Resolve the effective configuration.
    ///
    /// `url_override` is the merged CLI/env value. An explicitly named
    /// config file must exist and parse; the default `edelweiss.toml` is
    /// skipped silently when absent.
    pub fn resolve(url_override: Option<&str>, config_path: Option<&Path>) -> Result<Self> {
        let file = match config_path {
            Some(path) => Some(Self::load_file(path)?),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Some(Self::load_file(default)?)
                } else {
                    None
                }
            }
        };

        let url = url_override
            .map(str::to_owned)
            .or_else(|| file.and_then(|f| f.url))
            .unwrap_or_else(|| DEFAULT_URL.to_string());

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(Error::Config(format!(
                "url must start with http:// or https://, got: {url}"
            )));
        }

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
        })
    }

    fn load_file(path: &Path) -> Result<ConfigFile> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        Ok(toml::from_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_url_applies_without_overrides() {
        let config = Config::resolve(None, None).unwrap();
        assert_eq!(config.url, DEFAULT_URL);
    }

    #[test]
    fn cli_override_wins_over_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edelweiss.toml");
        std::fs::write(&path, r#"url = "https://file.edelweissdata.com""#).unwrap();

        let config =
            Config::resolve(Some("https://cli.edelweissdata.com"), Some(&path)).unwrap();
        assert_eq!(config.url, "https://cli.edelweissdata.com");
    }

    #[test]
    fn config_file_wins_over_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edelweiss.toml");
        std::fs::write(&path, r#"url = "https://file.edelweissdata.com""#).unwrap();

        let config = Config::resolve(None, Some(&path)).unwrap();
        assert_eq!(config.url, "https://file.edelweissdata.com");
    }

    #[test]
    fn empty_config_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edelweiss.toml");
        std::fs::write(&path, "").unwrap();

        let config = Config::resolve(None, Some(&path)).unwrap();
        assert_eq!(config.url, DEFAULT_URL);
    }

    #[test]
    fn explicit_missing_config_file_is_an_error() {
        let result = Config::resolve(None, Some(Path::new("/nonexistent/edelweiss.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edelweiss.toml");
        std::fs::write(&path, "not valid {{{{ toml").unwrap();

        assert!(Config::resolve(None, Some(&path)).is_err());
    }

    #[test]
    fn url_without_scheme_is_rejected() {
        let result = Config::resolve(Some("api.edelweissdata.com"), None);
        assert!(result.is_err(), "URL without scheme must be rejected");
        let err = result.unwrap_err().to_string();
        assert!(
            err.contains("must start with http"),
            "error message should explain the issue, got: {err}"
        );
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = Config::resolve(Some("https://api.edelweissdata.com/"), None).unwrap();
        assert_eq!(config.url, "https://api.edelweissdata.com");
    }
}
