use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Server address (e.g., "0.0.0.0:8080")
    #[serde(default = "default_addr")]
    pub addr: String,
    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
    /// Remote organization service
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Default organization tree fetch parameters
    #[serde(default)]
    pub tree: TreeConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Base URL of the organization RPC service
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TreeConfig {
    /// Restrict the tree to one corporation
    #[serde(default)]
    pub corp_id: Option<String>,
    #[serde(default = "default_true")]
    pub include_departments: bool,
    #[serde(default)]
    pub include_employee_count: bool,
    /// Maximum depth; unlimited when absent
    #[serde(default)]
    pub depth: Option<u32>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            corp_id: None,
            include_departments: true,
            include_employee_count: false,
            depth: None,
        }
    }
}

// Default value functions
fn default_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "http://127.0.0.1:9090".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            log: LogConfig::default(),
            upstream: UpstreamConfig::default(),
            tree: TreeConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;

        if !config.upstream.base_url.starts_with("http://")
            && !config.upstream.base_url.starts_with("https://")
        {
            anyhow::bail!("upstream.base_url must be an http(s) URL: {}", config.upstream.base_url);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.addr, "0.0.0.0:8080");
        assert_eq!(config.upstream.timeout_secs, 10);
        assert!(config.tree.include_departments);
        assert!(!config.tree.include_employee_count);
    }

    #[test]
    fn test_toml_parse() {
        let toml_str = r#"
            addr = "127.0.0.1:9000"

            [upstream]
            base_url = "https://org.internal"

            [tree]
            include_employee_count = true
            depth = 3
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.addr, "127.0.0.1:9000");
        assert_eq!(config.upstream.base_url, "https://org.internal");
        assert_eq!(config.upstream.timeout_secs, 10);
        assert!(config.tree.include_departments);
        assert!(config.tree.include_employee_count);
        assert_eq!(config.tree.depth, Some(3));
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_load_rejects_non_http_upstream() {
        let path = std::env::temp_dir().join(format!("orgdesk-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[upstream]\nbase_url = \"ftp://org\"\n").unwrap();
        let result = Config::load(path.to_str().unwrap());
        let _ = std::fs::remove_file(&path);
        assert!(result.is_err());
    }
}
