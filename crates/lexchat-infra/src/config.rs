//! Configuration loader for Lex.
//!
//! Resolution order, later layers winning:
//!
//! 1. Built-in defaults ([`LexConfig::default`])
//! 2. `lexchat.toml` in the working directory, or the file given with `--config`
//! 3. `LEXCHAT_HOST`, `LEXCHAT_PORT`, `LEXCHAT_MODEL`, `LEXCHAT_SECRET_KEY`
//!
//! An implicit `lexchat.toml` that is missing or malformed falls back to
//! defaults with a warning. A file named explicitly must load.
//!
//! A `.env` file is read into the process environment before any of this
//! (see [`load_env_file`]), so `GEMINI_API_KEY` and the `LEXCHAT_*`
//! variables may live there. Variables already set are never overwritten.

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use lexchat_types::config::LexConfig;

use crate::crypto::generate_secret_key;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "lexchat.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Load configuration from file and process environment.
pub async fn load_config(explicit: Option<&Path>) -> Result<LexConfig, ConfigError> {
    let config = match explicit {
        Some(path) => read_config_file(path).await?,
        None => load_implicit(Path::new(DEFAULT_CONFIG_FILE)).await,
    };
    apply_overrides(config, |var| std::env::var(var).ok())
}

async fn read_config_file(path: &Path) -> Result<LexConfig, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

async fn load_implicit(path: &Path) -> LexConfig {
    match read_config_file(path).await {
        Ok(config) => config,
        Err(ConfigError::Read { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No {} found, using defaults", path.display());
            LexConfig::default()
        }
        Err(err) => {
            tracing::warn!("{err}, using defaults");
            LexConfig::default()
        }
    }
}

/// Apply `LEXCHAT_*` overrides using `lookup` to read variables.
pub fn apply_overrides(
    mut config: LexConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<LexConfig, ConfigError> {
    if let Some(host) = lookup("LEXCHAT_HOST") {
        config.host = host;
    }
    if let Some(port) = lookup("LEXCHAT_PORT") {
        config.port = port.trim().parse().map_err(|_| ConfigError::InvalidEnv {
            var: "LEXCHAT_PORT",
            value: port,
        })?;
    }
    if let Some(model) = lookup("LEXCHAT_MODEL") {
        config.model = model;
    }
    if let Some(secret) = lookup("LEXCHAT_SECRET_KEY") {
        config.secret_key = Some(secret);
    }
    Ok(config)
}

/// Load `KEY=VALUE` pairs from a `.env` file into the process environment.
///
/// `None` searches the working directory and its parents for `.env`.
/// Returns the file that was loaded, or `Ok(None)` when there is none.
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>, dotenvy::Error> {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };
    match loaded {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Read the Gemini API key from the variable named by `api_key_env`.
///
/// Empty values count as absent.
pub fn resolve_api_key(config: &LexConfig) -> Option<SecretString> {
    resolve_api_key_with(config, |var| std::env::var(var).ok())
}

fn resolve_api_key_with(
    config: &LexConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<SecretString> {
    lookup(&config.api_key_env)
        .filter(|key| !key.trim().is_empty())
        .map(SecretString::from)
}

/// The configured cookie-signing key, or a random one for this process.
///
/// A generated key invalidates existing session cookies on restart, which
/// matches the in-memory store losing its sessions anyway.
pub fn resolve_secret_key(config: &LexConfig) -> String {
    match config.secret_key.as_deref() {
        Some(key) if !key.is_empty() => key.to_string(),
        _ => {
            tracing::info!("No secret key configured, generated an ephemeral one");
            generate_secret_key()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[tokio::test]
    async fn explicit_file_is_parsed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("lex.toml");
        tokio::fs::write(&path, "port = 8080\nmodel = \"gemini-2.5-flash\"\n")
            .await
            .unwrap();

        let config = read_config_file(&path).await.unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.host, "0.0.0.0");
    }

    #[tokio::test]
    async fn explicit_missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_config(Some(&tmp.path().join("nope.toml")))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[tokio::test]
    async fn explicit_malformed_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        tokio::fs::write(&path, "port = \"not a number").await.unwrap();
        let err = read_config_file(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[tokio::test]
    async fn implicit_missing_or_malformed_falls_back() {
        let tmp = TempDir::new().unwrap();
        let missing = load_implicit(&tmp.path().join("lexchat.toml")).await;
        assert_eq!(missing, LexConfig::default());

        let path = tmp.path().join("broken.toml");
        tokio::fs::write(&path, "[[[").await.unwrap();
        assert_eq!(load_implicit(&path).await, LexConfig::default());
    }

    #[test]
    fn env_file_supplies_api_key() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".env");
        std::fs::write(&path, "LEXCHAT_TEST_DOTENV_KEY=from-dotenv\n").unwrap();

        let loaded = load_env_file(Some(&path)).unwrap();
        assert_eq!(loaded.as_deref(), Some(path.as_path()));

        let config = LexConfig {
            api_key_env: "LEXCHAT_TEST_DOTENV_KEY".to_string(),
            ..LexConfig::default()
        };
        let key = resolve_api_key(&config).unwrap();
        assert_eq!(key.expose_secret(), "from-dotenv");
    }

    #[test]
    fn missing_env_file_is_not_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(load_env_file(Some(&tmp.path().join(".env"))).unwrap().is_none());
    }

    #[test]
    fn env_overrides_win() {
        let config = apply_overrides(
            LexConfig::default(),
            env(&[
                ("LEXCHAT_HOST", "127.0.0.1"),
                ("LEXCHAT_PORT", "9000"),
                ("LEXCHAT_MODEL", "gemini-2.5-flash"),
                ("LEXCHAT_SECRET_KEY", "s3cret"),
            ]),
        )
        .unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.secret_key.as_deref(), Some("s3cret"));
    }

    #[test]
    fn invalid_port_override_is_rejected() {
        let err = apply_overrides(LexConfig::default(), env(&[("LEXCHAT_PORT", "http")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid value for LEXCHAT_PORT: \"http\"");
    }

    #[test]
    fn api_key_comes_from_named_variable() {
        let mut config = LexConfig::default();
        config.api_key_env = "MY_KEY".to_string();

        let key = resolve_api_key_with(&config, env(&[("MY_KEY", "abc")])).unwrap();
        assert_eq!(key.expose_secret(), "abc");

        assert!(resolve_api_key_with(&config, env(&[("GEMINI_API_KEY", "abc")])).is_none());
        assert!(resolve_api_key_with(&config, env(&[("MY_KEY", "  ")])).is_none());
    }

    #[test]
    fn secret_key_is_kept_or_generated() {
        let mut config = LexConfig::default();
        config.secret_key = Some("fixed".to_string());
        assert_eq!(resolve_secret_key(&config), "fixed");

        config.secret_key = None;
        let generated = resolve_secret_key(&config);
        assert_eq!(generated.len(), 64);
        assert_ne!(generated, resolve_secret_key(&config));
    }
}
