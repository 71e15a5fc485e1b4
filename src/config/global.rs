use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::paths;
use crate::error::ForgeError;

pub const API_URL_ENV: &str = "WORLD_FORGE_API_URL";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GlobalConfig {
    pub organization_id: Option<String>,
    pub project_id: Option<String>,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub credential: Credential,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Credential {
    pub token: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
}

fn default_api_url() -> String {
    "https://forge.world.dev".to_string()
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            organization_id: None,
            project_id: None,
            api_url: default_api_url(),
            credential: Credential::default(),
        }
    }
}

impl GlobalConfig {
    /// Load from `path`, or from the first default location that exists.
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ForgeError> {
        let found = match path {
            Some(path) => Some(path.to_path_buf()).filter(|p| p.exists()),
            None => paths::default_config_paths()
                .into_iter()
                .find(|p| p.exists()),
        };
        let mut config = match found {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                let content = std::fs::read_to_string(&path)?;
                Self::parse(&path, &content)?
            }
            None => {
                tracing::debug!("No config file found, using defaults");
                GlobalConfig::default()
            }
        };
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.is_empty() {
                config.api_url = url.trim_end_matches('/').to_string();
            }
        }
        Ok(config)
    }

    /// `.toml` files are read as TOML, anything else as World CLI JSON.
    pub fn parse(path: &Path, content: &str) -> Result<Self, ForgeError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(content),
            _ => Self::from_json(content),
        }
    }

    pub fn from_json(content: &str) -> Result<Self, ForgeError> {
        let config: GlobalConfig =
            serde_json::from_str(content).map_err(|e| ForgeError::Config(e.to_string()))?;
        Ok(config.normalized())
    }

    pub fn from_toml(content: &str) -> Result<Self, ForgeError> {
        let config: GlobalConfig = toml::from_str(content)?;
        Ok(config.normalized())
    }

    fn normalized(mut self) -> Self {
        self.organization_id = self.organization_id.filter(|s| !s.is_empty());
        self.project_id = self.project_id.filter(|s| !s.is_empty());
        self.api_url = self.api_url.trim_end_matches('/').to_string();
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.credential.token.as_deref().filter(|t| !t.is_empty())
    }
}
