//! Secrets management for ferry
//!
//! The API token is stored separately from configuration to avoid accidental
//! sharing. The secrets file is located at `~/.config/ferry/secrets.toml` and
//! must have restrictive permissions (0600 on Unix).
//!
//! Loading priority:
//! 1. Environment variable (TOKEN)
//! 2. Secrets file (~/.config/ferry/secrets.toml)

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Error, Result};

/// Secrets structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Secrets {
    /// Gitea credentials
    pub gitea: GiteaSecrets,
}

/// Gitea-related secrets
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GiteaSecrets {
    /// Gitea access token
    pub token: Option<String>,
}

impl Secrets {
    /// Load secrets from the default location
    ///
    /// Returns default (empty) secrets if file doesn't exist
    pub fn load() -> Result<Self> {
        let secrets_path = Self::default_secrets_path();

        if let Some(path) = secrets_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load secrets from a specific file with permission checking
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        // Check file permissions on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let metadata = std::fs::metadata(path).map_err(Error::Io)?;
            let mode = metadata.permissions().mode();

            // Check if file is readable by group or others (mode & 0o077)
            if mode & 0o077 != 0 {
                return Err(Error::Config(format!(
                    "Secrets file {} has insecure permissions {:o}. \
                     Please run: chmod 600 {}",
                    path.display(),
                    mode & 0o777,
                    path.display()
                )));
            }

            debug!(path = %path.display(), mode = format!("{:o}", mode & 0o777), "Secrets file permissions OK");
        }

        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        let mut secrets: Secrets = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse secrets: {}", e)))?;

        // Trim whitespace from token
        if let Some(ref mut token) = secrets.gitea.token {
            *token = token.trim().to_string();
        }

        Ok(secrets)
    }

    /// Get the default secrets file path
    ///
    /// Returns `~/.config/ferry/secrets.toml` on Unix
    pub fn default_secrets_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ferry").join("secrets.toml"))
    }

    /// Get the Gitea token with environment variable override
    ///
    /// Priority: TOKEN env var > secrets file
    pub fn gitea_token(&self) -> Option<String> {
        // Check environment variable first
        if let Ok(token) = std::env::var("TOKEN") {
            let token = token.trim().to_string();
            if !token.is_empty() {
                debug!("Using Gitea token from TOKEN environment variable");
                return Some(token);
            }
        }

        // Fall back to secrets file
        if let Some(ref token) = self.gitea.token {
            if !token.is_empty() {
                debug!("Using Gitea token from secrets file");
                return Some(token.clone());
            }
        }

        None
    }

    /// Create a template secrets file at the default location
    ///
    /// Creates parent directories if needed and sets secure permissions
    pub fn create_template() -> Result<PathBuf> {
        let path = Self::default_secrets_path()
            .ok_or_else(|| Error::Config("Could not determine secrets path".to_string()))?;

        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(Error::Io)?;
        }

        // Don't overwrite existing file
        if path.exists() {
            return Err(Error::Config(format!(
                "Secrets file already exists at {}",
                path.display()
            )));
        }

        let template = r#"# Ferry Secrets
# This file contains sensitive credentials - do not share or commit to version control
#
# IMPORTANT: This file must have restrictive permissions (chmod 600)

[gitea]
# Gitea access token
# Create one under Settings -> Applications on your Gitea instance
# Required scopes: read/write access to issues
token = ""
"#;

        std::fs::write(&path, template).map_err(Error::Io)?;

        // Set restrictive permissions on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&path, perms).map_err(Error::Io)?;
        }

        warn!(path = %path.display(), "Created secrets template - please edit and add your token");

        Ok(path)
    }
}
