//! Configuration types and loading
//!
//! Config precedence: CLI args > env vars > config file > built-in defaults.
//! The service must run with zero external configuration, so a missing
//! config file falls back to built-in defaults (the sample credentials).
//! The client secret can be overridden via CALC_CLIENT_SECRET so it never
//! has to live in the TOML.

use calc_auth::ClientCredentials;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root configuration
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
}

/// HTTP listener settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
}

/// Credential pair and token lifetime
#[derive(Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub client_id: String,
    client_secret: String,
    pub token_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".parse().expect("valid default addr"),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        // Sample pair; real deployments override via config file or
        // CALC_CLIENT_SECRET
        Self {
            client_id: "sampleClientId".into(),
            client_secret: "sampleClientSecret".into(),
            token_ttl_secs: 600,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .finish()
    }
}

impl AuthConfig {
    /// Build the credential pair handed to the token endpoint.
    pub fn credentials(&self) -> ClientCredentials {
        ClientCredentials::new(self.client_id.clone(), self.client_secret.clone())
    }

    /// Token lifetime as a Duration.
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }
}

impl Config {
    /// Load configuration from a TOML file, then overlay environment variables.
    pub fn load(path: &Path) -> common::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&contents)?;
        config.overlay_env();
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise start from built-in defaults.
    pub fn load_or_default(path: &Path) -> common::Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            let mut config = Config::default();
            config.overlay_env();
            config.validate()?;
            Ok(config)
        }
    }

    fn overlay_env(&mut self) {
        if let Ok(secret) = std::env::var("CALC_CLIENT_SECRET")
            && !secret.is_empty()
        {
            self.auth.client_secret = secret;
        }
    }

    fn validate(&self) -> common::Result<()> {
        if self.auth.client_id.is_empty() {
            return Err(common::Error::Config("client_id must not be empty".into()));
        }
        if self.auth.token_ttl_secs == 0 {
            return Err(common::Error::Config(
                "token_ttl_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Resolve config file path from CLI arg or CONFIG_PATH env var.
    pub fn resolve_path(cli_path: Option<&str>) -> PathBuf {
        if let Some(p) = cli_path {
            return PathBuf::from(p);
        }
        if let Ok(p) = std::env::var("CONFIG_PATH") {
            return PathBuf::from(p);
        }
        PathBuf::from("calculator-api.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mutex to serialize tests that mutate environment variables, preventing
    /// data races when tests run in parallel.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// SAFETY: Callers must hold ENV_MUTEX to prevent concurrent env mutation.
    unsafe fn set_env(key: &str, val: &str) {
        unsafe { std::env::set_var(key, val) };
    }

    unsafe fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) };
    }

    fn valid_toml() -> &'static str {
        r#"
[server]
listen_addr = "127.0.0.1:9090"

[auth]
client_id = "acmeClient"
client_secret = "acmeSecret"
token_ttl_secs = 300
"#
    }

    #[test]
    fn load_valid_config() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe { remove_env("CALC_CLIENT_SECRET") };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, valid_toml()).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.server.listen_addr, "127.0.0.1:9090".parse().unwrap());
        assert_eq!(config.auth.client_id, "acmeClient");
        assert_eq!(config.auth.token_ttl_secs, 300);
        assert!(config.auth.credentials().matches("acmeClient", "acmeSecret"));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe { remove_env("CALC_CLIENT_SECRET") };

        let config = Config::load_or_default(Path::new("/nonexistent/calc.toml")).unwrap();
        assert_eq!(config.server.listen_addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.auth.token_ttl_secs, 600);
        assert!(
            config
                .auth
                .credentials()
                .matches("sampleClientId", "sampleClientSecret")
        );
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let result = Config::load(Path::new("/nonexistent/calc.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn invalid_toml_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "not valid {{{{ toml").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn partial_config_fills_defaults() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe { remove_env("CALC_CLIENT_SECRET") };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nlisten_addr = \"0.0.0.0:3000\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.server.listen_addr, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.auth.client_id, "sampleClientId");
        assert_eq!(config.auth.token_ttl_secs, 600);
    }

    #[test]
    fn env_var_overrides_file_secret() {
        let _lock = ENV_MUTEX.lock().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, valid_toml()).unwrap();

        unsafe { set_env("CALC_CLIENT_SECRET", "envSecret") };
        let config = Config::load(&path).unwrap();
        unsafe { remove_env("CALC_CLIENT_SECRET") };

        assert!(config.auth.credentials().matches("acmeClient", "envSecret"));
        assert!(!config.auth.credentials().matches("acmeClient", "acmeSecret"));
    }

    #[test]
    fn zero_ttl_is_rejected() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe { remove_env("CALC_CLIENT_SECRET") };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[auth]\ntoken_ttl_secs = 0\n").unwrap();

        let result = Config::load(&path);
        assert!(result.is_err(), "token_ttl_secs = 0 must be rejected");
    }

    #[test]
    fn empty_client_id_is_rejected() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe { remove_env("CALC_CLIENT_SECRET") };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[auth]\nclient_id = \"\"\n").unwrap();

        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn resolve_path_cli_overrides_env() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe { set_env("CONFIG_PATH", "/env/should-lose.toml") };
        let path = Config::resolve_path(Some("/cli/wins.toml"));
        unsafe { remove_env("CONFIG_PATH") };
        assert_eq!(path, PathBuf::from("/cli/wins.toml"));
    }

    #[test]
    fn resolve_path_env_var() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe { set_env("CONFIG_PATH", "/env/path.toml") };
        let path = Config::resolve_path(None);
        unsafe { remove_env("CONFIG_PATH") };
        assert_eq!(path, PathBuf::from("/env/path.toml"));
    }

    #[test]
    fn resolve_path_default() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe { remove_env("CONFIG_PATH") };
        let path = Config::resolve_path(None);
        assert_eq!(path, PathBuf::from("calculator-api.toml"));
    }

    #[test]
    fn debug_redacts_client_secret() {
        let config = Config::default();
        let debug = format!("{config:?}");
        assert!(!debug.contains("sampleClientSecret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
