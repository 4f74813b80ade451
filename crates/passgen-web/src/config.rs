use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use passgen_core::{GeneratorLimits, LimiterConfig};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    #[serde(default)]
    pub rate_limit: LimiterConfig,
    #[serde(default)]
    pub generator: GeneratorLimits,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub proxy: ProxyConfig,
    #[serde(default)]
    pub tls: TlsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// Shared secret that lifts a caller to the trusted tier. Unset disables
    /// the trusted tier.
    #[serde(default)]
    pub trusted_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProxyConfig {
    /// Take the client identity from `X-Forwarded-For` / `X-Real-IP`.
    /// Only enable behind a reverse proxy that overwrites these headers.
    #[serde(default)]
    pub trust_forwarded_for: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TlsConfig {
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            rate_limit: LimiterConfig::default(),
            generator: GeneratorLimits::default(),
            auth: AuthConfig::default(),
            proxy: ProxyConfig::default(),
            tls: TlsConfig::default(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 5000))
}

const WEAK_TOKENS: &[&str] = &[
    "CHANGE_ME_API_KEY",
    "change-me",
    "changeme",
    "secret",
    "api-key",
    "api_key",
];

impl ServerConfig {
    pub fn trusted_token(&self) -> Option<&str> {
        self.auth.trusted_token.as_deref()
    }

    pub fn tls_enabled(&self) -> bool {
        self.tls.cert_path.is_some() && self.tls.key_path.is_some()
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = std::env::var("PASSGEN_CONFIG").map(PathBuf::from).ok();

        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => ServerConfig::default(),
        };

        if let Ok(addr) = std::env::var("PASSGEN_BIND_ADDR") {
            config.bind_addr = addr.parse()?;
        }
        if let Ok(token) = std::env::var("PASSGEN_TRUSTED_TOKEN") {
            config.auth.trusted_token = Some(token);
        }
        if let Ok(val) = std::env::var("PASSGEN_TRUST_FORWARDED_FOR") {
            config.proxy.trust_forwarded_for = matches!(val.as_str(), "1" | "true" | "yes");
        }
        if let Ok(cert) = std::env::var("PASSGEN_TLS_CERT") {
            config.tls.cert_path = Some(cert);
        }
        if let Ok(key) = std::env::var("PASSGEN_TLS_KEY") {
            config.tls.key_path = Some(key);
        }

        config.finalize()
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config {}: {e}", path.display()))?;
        Ok(toml::from_str(&contents)?)
    }

    /// Normalises and validates a loaded config.
    pub fn finalize(mut self) -> anyhow::Result<Self> {
        self.rate_limit.validate()?;
        self.generator.validate()?;

        if self
            .auth
            .trusted_token
            .as_deref()
            .is_some_and(|t| t.trim().is_empty())
        {
            self.auth.trusted_token = None;
        }

        match self.auth.trusted_token.as_deref() {
            Some(token) => {
                if WEAK_TOKENS.iter().any(|w| token.eq_ignore_ascii_case(w)) {
                    anyhow::bail!(
                        "Trusted token matches a known placeholder value. \
                         Set a strong random token via PASSGEN_TRUSTED_TOKEN \
                         (see the gen_token binary)."
                    );
                }
                if token.len() < 24 {
                    tracing::warn!(
                        "Trusted token is shorter than 24 characters. \
                         Consider generating one with the gen_token binary."
                    );
                }
            }
            None => tracing::info!("No trusted token configured; all callers use the standard tier"),
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = ServerConfig::default().finalize().unwrap();

        assert_eq!(config.bind_addr.port(), 5000);
        assert_eq!(config.rate_limit.window_seconds, 60);
        assert_eq!(config.rate_limit.standard_limit, 60);
        assert_eq!(config.rate_limit.trusted_limit, 300);
        assert_eq!(config.generator.max_count, 100);
        assert!(config.trusted_token().is_none());
        assert!(!config.proxy.trust_forwarded_for);
        assert!(!config.tls_enabled());
    }

    #[test]
    fn load_full_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("passgen.toml");
        fs::write(
            &path,
            r#"
bind_addr = "127.0.0.1:8088"

[rate_limit]
window_seconds = 30
standard_limit = 10
trusted_limit = 100

[generator]
max_count = 20

[auth]
trusted_token = "k3Qz9vTn2LwX8pRb5YcM7hJd"

[proxy]
trust_forwarded_for = true
"#,
        )
        .unwrap();

        let config = ServerConfig::from_file(&path).unwrap().finalize().unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:8088".parse().unwrap());
        assert_eq!(config.rate_limit.window_seconds, 30);
        assert_eq!(config.rate_limit.standard_limit, 10);
        assert_eq!(config.rate_limit.trusted_limit, 100);
        assert_eq!(config.rate_limit.sweep_interval_seconds, 60);
        assert_eq!(config.generator.max_count, 20);
        assert_eq!(config.generator.max_length, 128);
        assert_eq!(config.trusted_token(), Some("k3Qz9vTn2LwX8pRb5YcM7hJd"));
        assert!(config.proxy.trust_forwarded_for);
    }

    #[test]
    fn missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(ServerConfig::from_file(&tmp.path().join("nope.toml")).is_err());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "[rate_limit\nwindow_seconds = ").unwrap();
        assert!(ServerConfig::from_file(&path).is_err());
    }

    #[test]
    fn placeholder_token_is_rejected() {
        let mut config = ServerConfig::default();
        config.auth.trusted_token = Some("CHANGE_ME_API_KEY".to_string());
        assert!(config.finalize().is_err());
    }

    #[test]
    fn blank_token_disables_trusted_tier() {
        let mut config = ServerConfig::default();
        config.auth.trusted_token = Some("   ".to_string());
        let config = config.finalize().unwrap();
        assert!(config.trusted_token().is_none());
    }

    #[test]
    fn invalid_limits_are_rejected() {
        let mut config = ServerConfig::default();
        config.rate_limit.window_seconds = 0;
        assert!(config.finalize().is_err());

        let mut config = ServerConfig::default();
        config.generator.min_length = 200;
        assert!(config.finalize().is_err());
    }
}
