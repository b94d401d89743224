use log::{info, warn};
use url::Url;

use crate::error::{AggregatorError, Result};
use crate::utils::string::split_list;

pub const ENV_SOURCE_URLS: &str = "PROXY_SOURCE_URLS";
pub const ENV_SOURCE_NUM: &str = "PROXY_SOURCE_NUM";
pub const ENV_APPLY_GROUPS: &str = "PROXY_APPLY_GROUPS";
pub const ENV_TYPE_FILTER: &str = "PROXY_TYPE_FILTER";
pub const ENV_NAME_EXCLUDE_FILTER: &str = "PROXY_NAME_EXCLUDE_FILTER";
pub const ENV_NAME_FILTER: &str = "PROXY_NAME_FILTER";

const DEFAULT_SOURCE_URLS: &str = "https://github.com/aiboboxx/clashfree/raw/main/clash.yml";
const DEFAULT_APPLY_GROUPS: &str = "自动选择,节点选择";
const DEFAULT_TYPE_FILTER: &str = "vmess,vless,trojan";
const DEFAULT_NAME_EXCLUDE_FILTER: &str = ".*AD,.*机场";
const DEFAULT_NAME_FILTER: &str = ".*";

// Default value functions
pub fn default_source_num() -> usize {
    200
}

pub fn default_listen_address() -> String {
    "0.0.0.0".to_string()
}

pub fn default_listen_port() -> u16 {
    8000
}

pub fn default_template_path() -> String {
    "template.yaml".to_string()
}

pub fn default_output_path() -> String {
    "config.yaml".to_string()
}

/// Refresh interval in seconds
pub fn default_refresh_interval() -> u64 {
    3600
}

/// Immutable runtime configuration, built once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    // Sources
    pub source_urls: Vec<String>,
    pub source_num: usize,

    // Filters
    pub type_filter: Vec<String>,
    pub name_exclude_filter: Vec<String>,
    pub name_filter: Vec<String>,

    // Template merge
    pub apply_groups: Vec<String>,
    pub template_path: String,
    pub output_path: String,

    // Server
    pub listen_address: String,
    pub listen_port: u16,
    pub refresh_interval: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            source_urls: split_list(DEFAULT_SOURCE_URLS),
            source_num: default_source_num(),
            type_filter: split_list(DEFAULT_TYPE_FILTER),
            name_exclude_filter: split_list(DEFAULT_NAME_EXCLUDE_FILTER),
            name_filter: split_list(DEFAULT_NAME_FILTER),
            apply_groups: split_list(DEFAULT_APPLY_GROUPS),
            template_path: default_template_path(),
            output_path: default_output_path(),
            listen_address: default_listen_address(),
            listen_port: default_listen_port(),
            refresh_interval: default_refresh_interval(),
        }
    }
}

impl Settings {
    /// Build settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup
    ///
    /// Unset or empty keys fall back to their defaults. The only hard error is
    /// ending up without a single usable source URL.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| -> Vec<String> {
            match lookup(key) {
                Some(value) if !value.is_empty() => split_list(&value),
                _ => split_list(default),
            }
        };

        let source_urls = get(ENV_SOURCE_URLS, DEFAULT_SOURCE_URLS)
            .into_iter()
            .filter(|url| match Url::parse(url) {
                Ok(_) => true,
                Err(e) => {
                    warn!("Ignoring invalid source URL '{}': {}", url, e);
                    false
                }
            })
            .collect::<Vec<_>>();
        if source_urls.is_empty() {
            return Err(AggregatorError::Config(format!(
                "{} contains no valid URL",
                ENV_SOURCE_URLS
            )));
        }

        let source_num = match lookup(ENV_SOURCE_NUM) {
            Some(value) if !value.is_empty() => match value.trim().parse::<usize>() {
                Ok(num) => num,
                Err(e) => {
                    warn!(
                        "Invalid {} '{}': {}, using {}",
                        ENV_SOURCE_NUM,
                        value,
                        e,
                        default_source_num()
                    );
                    default_source_num()
                }
            },
            _ => default_source_num(),
        };

        Ok(Settings {
            source_urls,
            source_num,
            type_filter: get(ENV_TYPE_FILTER, DEFAULT_TYPE_FILTER),
            name_exclude_filter: get(ENV_NAME_EXCLUDE_FILTER, DEFAULT_NAME_EXCLUDE_FILTER),
            name_filter: get(ENV_NAME_FILTER, DEFAULT_NAME_FILTER),
            apply_groups: get(ENV_APPLY_GROUPS, DEFAULT_APPLY_GROUPS),
            ..Default::default()
        })
    }

    /// The `address:port` pair the HTTP server binds to
    pub fn bind_address(&self) -> String {
        if self.listen_address.contains(':') {
            self.listen_address.clone()
        } else {
            format!("{}:{}", self.listen_address, self.listen_port)
        }
    }

    /// Log the effective configuration
    pub fn log_summary(&self) {
        info!("{}: {:?}", ENV_SOURCE_URLS, self.source_urls);
        info!("{}: {}", ENV_SOURCE_NUM, self.source_num);
        info!("{}: {:?}", ENV_APPLY_GROUPS, self.apply_groups);
        info!("{}: {:?}", ENV_TYPE_FILTER, self.type_filter);
        info!("{}: {:?}", ENV_NAME_EXCLUDE_FILTER, self.name_exclude_filter);
        info!("{}: {:?}", ENV_NAME_FILTER, self.name_filter);
        info!(
            "Template: {}, output: {}, refresh every {}s",
            self.template_path, self.output_path, self.refresh_interval
        );
    }
}
