// src/config.rs
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::filesystem::{VideoExtensionSet, DEFAULT_VIDEO_EXTENSIONS};
use crate::mount::ShareLocator;
use crate::player::{default_players, PlayerCandidate};

pub const APP_NAME: &str = "nasplay";
pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Mount point to browse. Wins over GVFS discovery.
    pub root: Option<PathBuf>,
    pub server_ip: Option<String>,
    pub share_name: Option<String>,
    pub video_extensions: Vec<String>,
    pub players: Vec<PlayerCandidate>,
    pub show_hidden: bool,
    pub hidden_prefixes: Vec<String>,
    pub mount_command: String,
    pub mount_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            root: None,
            server_ip: None,
            share_name: None,
            video_extensions: DEFAULT_VIDEO_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            players: default_players(),
            show_hidden: false,
            hidden_prefixes: vec![".".to_string(), "@".to_string()],
            mount_command: "gio".to_string(),
            mount_timeout_secs: 10,
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_NAME).join(CONFIG_FILE_NAME))
    }

    /// An explicit path must exist; a missing default file just means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Config::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let config = serde_json::from_str(&content)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Applies `SERVER_IP` / `SHARE_NAME` from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| std::env::var(key).ok());
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(ip) = var("SERVER_IP").filter(|v| !v.trim().is_empty()) {
            self.server_ip = Some(ip);
        }
        if let Some(share) = var("SHARE_NAME").filter(|v| !v.trim().is_empty()) {
            self.share_name = Some(share);
        }
    }

    pub fn locator(&self) -> Option<ShareLocator> {
        match (&self.server_ip, &self.share_name) {
            (Some(server), Some(share)) => Some(ShareLocator::new(server.clone(), share.clone())),
            _ => None,
        }
    }

    pub fn video_set(&self) -> VideoExtensionSet {
        VideoExtensionSet::new(&self.video_extensions)
    }
}
