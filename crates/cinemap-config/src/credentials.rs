use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that takes precedence over the stored token
pub const ACCESS_TOKEN_ENV: &str = "TMDB_ACCESS_TOKEN";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredToken {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tmdb_access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tmdb_token_saved_at: Option<DateTime<Utc>>,
}

/// The TMDb read access token, kept in its own TOML file next to the config
pub struct CredentialStore {
    path: PathBuf,
    stored: StoredToken,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            stored: StoredToken::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file if there is one; a missing file leaves the store empty
    pub fn load(&mut self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        self.stored = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(&self.stored)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get_tmdb_access_token(&self) -> Option<&str> {
        self.stored.tmdb_access_token.as_deref()
    }

    /// Store the token and remember when it was saved
    pub fn set_tmdb_access_token(&mut self, token: String) {
        self.stored.tmdb_access_token = Some(token);
        self.stored.tmdb_token_saved_at = Some(Utc::now());
    }

    pub fn get_tmdb_token_saved_at(&self) -> Option<DateTime<Utc>> {
        self.stored.tmdb_token_saved_at
    }

    /// Token to authenticate with: `TMDB_ACCESS_TOKEN` first, then the store
    pub fn resolve_access_token(&self) -> Option<String> {
        std::env::var(ACCESS_TOKEN_ENV)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| self.get_tmdb_access_token().map(str::to_string))
            .filter(|t| !t.trim().is_empty())
    }
}

/// Show only the first and last four characters of a secret
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", head, tail)
}
