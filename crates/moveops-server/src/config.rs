use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Absolute base URL of the back-office API. When unset, resolution falls
    /// back to `API_INTERNAL_URL`, then `MOVEOPS_PUBLIC_API_URL`, then the
    /// local dev default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            upstream: UpstreamConfig::default(),
            logging: LoggingConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let config = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::from_str(&contents)?
        } else {
            // Default to YAML
            serde_yaml::from_str(&contents)?
        };

        Ok(config)
    }

    /// Merge environment variables into config (env vars take precedence)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("MOVEOPS_HOST") {
            self.host = val;
        }

        if let Ok(val) = std::env::var("MOVEOPS_PORT") {
            match val.parse::<u16>() {
                Ok(port) => self.port = port,
                Err(_) => eprintln!("Warning: Invalid MOVEOPS_PORT '{}', using default", val),
            }
        }

        if let Ok(val) = std::env::var("MOVEOPS_LOG_LEVEL") {
            self.logging.level = val;
        }

        if let Ok(val) = std::env::var("MOVEOPS_MAX_BODY_BYTES")
            && let Ok(bytes) = val.parse::<usize>()
        {
            self.limits.max_body_bytes = bytes;
        }

        if let Ok(val) = std::env::var("MOVEOPS_UPSTREAM_URL") {
            self.upstream.base_url = Some(val);
        }
    }

    /// Resolve the upstream base, layering env fallbacks under the explicit
    /// config value.
    pub fn resolve_upstream(&self) -> Result<String, moveops_proxy::ProxyError> {
        let internal = std::env::var("API_INTERNAL_URL").ok();
        let public = std::env::var("MOVEOPS_PUBLIC_API_URL").ok();
        let is_production = std::env::var("MOVEOPS_ENV")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        moveops_proxy::resolve_upstream_base(
            self.upstream.base_url.as_deref(),
            internal.as_deref(),
            public.as_deref(),
            is_production,
        )
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_body_bytes() -> usize {
    10 * 1024 * 1024
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.limits.max_body_bytes, 10 * 1024 * 1024);
        assert!(config.upstream.base_url.is_none());
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::with_suffix(".yaml").unwrap();
        writeln!(
            file,
            "port: 8090\nupstream:\n  base_url: http://api.internal:8080/api\n"
        )
        .unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.port, 8090);
        assert_eq!(
            config.upstream.base_url.as_deref(),
            Some("http://api.internal:8080/api")
        );
        // unspecified fields keep defaults
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, "host = \"0.0.0.0\"\n\n[logging]\nlevel = \"debug\"\n").unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    #[serial]
    fn test_merge_env_overrides() {
        unsafe {
            std::env::set_var("MOVEOPS_PORT", "9001");
            std::env::set_var("MOVEOPS_LOG_LEVEL", "trace");
        }

        let mut config = ServerConfig::default();
        config.merge_env();

        assert_eq!(config.port, 9001);
        assert_eq!(config.logging.level, "trace");

        unsafe {
            std::env::remove_var("MOVEOPS_PORT");
            std::env::remove_var("MOVEOPS_LOG_LEVEL");
        }
    }

    #[test]
    #[serial]
    fn test_resolve_upstream_prefers_explicit_config() {
        unsafe {
            std::env::set_var("API_INTERNAL_URL", "http://internal:8080/api");
        }

        let mut config = ServerConfig::default();
        config.upstream.base_url = Some("http://explicit:8080/api".to_string());
        assert_eq!(config.resolve_upstream().unwrap(), "http://explicit:8080/api");

        config.upstream.base_url = None;
        assert_eq!(config.resolve_upstream().unwrap(), "http://internal:8080/api");

        unsafe {
            std::env::remove_var("API_INTERNAL_URL");
        }
    }
}
