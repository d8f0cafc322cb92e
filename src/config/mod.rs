use crate::core::path::{config_file, ensure_dir};
use crate::core::{ArchiveFormat, RepofetchError, RepofetchResult};
use crate::di::ConfigProvider;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Host serving `/{org}/{repo}/archive/{branch}.{ext}`
    #[serde(default = "default_github_url")]
    pub github_url: String,

    /// GitHub REST API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Branch used when a download does not name one
    ///
    /// Older repositories still use `master`; pass the branch explicitly
    /// (or change this) when the remote default differs.
    #[serde(default = "default_branch")]
    pub default_branch: String,

    /// Archive flavour: `tar.gz` (default) or `zip`
    #[serde(default)]
    pub archive_format: ArchiveFormat,

    /// `User-Agent` header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum number of redirects followed for archive downloads
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Connect/read timeout in seconds (no timeout when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Default token, used when GITHUB_TOKEN is not set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn default_github_url() -> String {
    "https://github.com".to_string()
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_user_agent() -> String {
    "repofetch".to_string()
}

fn default_max_redirects() -> usize {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_url: default_github_url(),
            api_url: default_api_url(),
            default_branch: default_branch(),
            archive_format: ArchiveFormat::default(),
            user_agent: default_user_agent(),
            max_redirects: default_max_redirects(),
            timeout_secs: None,
            token: None,
        }
    }
}

impl Config {
    /// Load config from the repofetch home directory, creating default if it doesn't exist
    ///
    /// Config locations (unless REPOFETCH_HOME is set):
    /// - Windows: %APPDATA%\repofetch\config.yaml
    /// - Linux: ~/.config/repofetch/config.yaml
    /// - macOS: ~/Library/Application Support/repofetch/config.yaml
    pub fn load() -> RepofetchResult<Self> {
        let config_path = config_file()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        Self::load_from(&config_path)
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> RepofetchResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| RepofetchError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the repofetch home directory
    pub fn save(&self) -> RepofetchResult<()> {
        self.save_to(&config_file()?)
    }

    /// Save config to an explicit path
    pub fn save_to(&self, path: &Path) -> RepofetchResult<()> {
        let config_dir = path
            .parent()
            .ok_or_else(|| RepofetchError::Path("Invalid config path".to_string()))?;
        ensure_dir(config_dir)?;

        let content = serde_yaml::to_string(self)
            .map_err(|e| RepofetchError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> RepofetchResult<()> {
        if self.default_branch.trim().is_empty() {
            return Err(RepofetchError::Config(
                "default_branch must not be empty".to_string(),
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(RepofetchError::Config(
                "user_agent must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl ConfigProvider for Config {
    fn github_url(&self) -> &str {
        &self.github_url
    }

    fn api_url(&self) -> &str {
        &self.api_url
    }

    fn default_branch(&self) -> &str {
        &self.default_branch
    }

    fn archive_format(&self) -> ArchiveFormat {
        self.archive_format
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn max_redirects(&self) -> usize {
        self.max_redirects
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}
