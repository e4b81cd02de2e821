//! Configuration management for ferry
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (GITEA_URL, OWNER, REPO)
//! 3. Config file (~/.config/ferry/config.toml)
//! 4. Default values (empty, rejected by `validate`)

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, Result};

/// Gitea instance and repository coordinates
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GiteaConfig {
    /// Base URL of the Gitea instance, without a trailing slash
    pub url: String,

    /// Repository owner (user or organization)
    pub owner: String,

    /// Repository name
    pub repo: String,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Gitea connection settings
    pub gitea: GiteaConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/ferry/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ferry").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - GITEA_URL: base URL of the Gitea instance
    /// - OWNER: repository owner
    /// - REPO: repository name
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("GITEA_URL") {
            self.gitea.url = url;
        }

        if let Ok(owner) = std::env::var("OWNER") {
            self.gitea.owner = owner;
        }

        if let Ok(repo) = std::env::var("REPO") {
            self.gitea.repo = repo;
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(
        mut self,
        url: Option<String>,
        owner: Option<String>,
        repo: Option<String>,
    ) -> Self {
        if let Some(url) = url {
            self.gitea.url = url;
        }

        if let Some(owner) = owner {
            self.gitea.owner = owner;
        }

        if let Some(repo) = repo {
            self.gitea.repo = repo;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(
        url: Option<String>,
        owner: Option<String>,
        repo: Option<String>,
    ) -> Result<Self> {
        Ok(Self::load()?
            .with_env_overrides()
            .with_cli_overrides(url, owner, repo))
    }

    /// Check that the configuration is complete enough to talk to a Gitea
    /// instance, normalizing the base URL
    pub fn validate(mut self) -> Result<Self> {
        if self.gitea.url.is_empty() {
            return Err(Error::Config(
                "Gitea URL not set. Use --url, GITEA_URL, or the config file".to_string(),
            ));
        }

        Url::parse(&self.gitea.url)
            .map_err(|e| Error::Config(format!("Invalid Gitea URL '{}': {}", self.gitea.url, e)))?;

        if self.gitea.owner.is_empty() {
            return Err(Error::Config(
                "Repository owner not set. Use --owner, OWNER, or the config file".to_string(),
            ));
        }

        if self.gitea.repo.is_empty() {
            return Err(Error::Config(
                "Repository name not set. Use --repo, REPO, or the config file".to_string(),
            ));
        }

        // Trailing slashes would produce double slashes in request paths
        while self.gitea.url.ends_with('/') {
            self.gitea.url.pop();
        }

        Ok(self)
    }
}
