use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_max_memos")]
    pub max_memos: usize,
    #[serde(default = "default_min_recording_secs")]
    pub min_recording_secs: f32,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_max_memos() -> usize {
    500
}

fn default_min_recording_secs() -> f32 {
    0.0 // Disabled: every stopped recording becomes a memo
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            max_memos: default_max_memos(),
            min_recording_secs: default_min_recording_secs(),
        }
    }
}

impl SessionConfig {
    /// Validates config values after loading. Clamps out-of-range values
    /// and rejects clearly invalid inputs.
    pub fn validate(&mut self) -> Result<()> {
        // Language codes are plain identifiers, never paths
        if self.language.contains('/')
            || self.language.contains('\\')
            || self.language.contains(char::is_whitespace)
        {
            bail!("invalid language code: {}", self.language);
        }
        if self.language.is_empty() {
            self.language = default_language();
        }

        // Clamp numeric fields to sane ranges
        self.max_memos = self.max_memos.clamp(1, 10_000);
        self.min_recording_secs = self.min_recording_secs.clamp(0.0, 60.0);

        Ok(())
    }
}

pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("voice-memos")
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

pub fn load_config() -> Result<SessionConfig> {
    let path = config_path();

    if !path.exists() {
        return Ok(SessionConfig::default());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;

    let mut config: SessionConfig =
        toml::from_str(&content).with_context(|| "failed to parse config")?;
    config.validate()?;
    Ok(config)
}

/// Set restrictive file permissions (owner-only read/write) on Unix systems.
#[cfg(unix)]
pub fn set_owner_only_permissions(path: &std::path::Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
        .with_context(|| format!("failed to set permissions: {}", path.display()))
}

#[cfg(not(unix))]
pub fn set_owner_only_permissions(_path: &std::path::Path) -> Result<()> {
    Ok(())
}

pub fn save_config(config: &SessionConfig) -> Result<()> {
    let dir = config_dir();
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create directory: {}", dir.display()))?;

    let path = config_path();
    let content = toml::to_string_pretty(config).context("failed to serialize config")?;

    fs::write(&path, &content)
        .with_context(|| format!("failed to write config: {}", path.display()))?;

    set_owner_only_permissions(&path)?;

    Ok(())
}

// === Trait Implementation ===

use crate::domain::traits::ConfigProvider;

impl ConfigProvider for SessionConfig {
    fn language(&self) -> String {
        self.language.clone()
    }

    fn max_memos(&self) -> usize {
        self.max_memos
    }

    fn min_recording_secs(&self) -> f32 {
        self.min_recording_secs
    }
}
