use bedrock_core::{BROWSER_USER_AGENT, DOWNLOAD_LINKS_URL, FetchOptions};
use bedrock_platform::AppPaths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerSettings {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_ledger_path")]
    pub ledger_path: PathBuf,

    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default)]
    pub debug_logging: bool,

    #[serde(default = "default_max_log_size_bytes")]
    pub max_log_size_bytes: u64,
}

fn default_api_url() -> String {
    DOWNLOAD_LINKS_URL.to_string()
}

fn default_user_agent() -> String {
    BROWSER_USER_AGENT.to_string()
}

fn default_ledger_path() -> PathBuf {
    PathBuf::from("bedrock-server-downloads.json")
}

fn default_http_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_max_log_size_bytes() -> u64 {
    5 * 1024 * 1024
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            user_agent: default_user_agent(),
            ledger_path: default_ledger_path(),
            http_timeout_secs: default_http_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            debug_logging: false,
            max_log_size_bytes: default_max_log_size_bytes(),
        }
    }
}

impl TrackerSettings {
    /// Settings from `path`, or from the platform settings file when no path is
    /// given. Anything missing or unreadable falls back to defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let settings_path = match path {
            Some(path) => path.to_path_buf(),
            None => match AppPaths::new() {
                Ok(paths) => paths.settings_file(),
                Err(_) => return Self::default(),
            },
        };

        Self::load_from_path(&settings_path)
    }

    fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            url: self.api_url.clone(),
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_secs(self.http_timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }
}
