use std::{fs, path::Path, path::PathBuf};

use anyhow::{Context, Result};
use dirs::home_dir;
use serde::{Deserialize, Serialize};

const APP_DIR_NAME: &str = ".toula_cli";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Backend used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the chatbot backend
    pub base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let value: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid config TOML at {}", path.display()))?;
        Ok(value)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir).with_context(|| {
                    format!("Failed to create config directory at {}", dir.display())
                })?;
            }
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config at {}", path.display()))?;
        Ok(())
    }

    pub fn init(force: bool) -> Result<PathBuf> {
        let path = config_file_path()?;
        if path.exists() && !force {
            anyhow::bail!(
                "Config already exists at {} (use --force to overwrite)",
                path.display()
            );
        }
        Self::default().save_to(&path)?;
        Ok(path)
    }

    /// Resolves the backend base URL: command-line flag first, then the
    /// TOULA_BASE_URL environment variable, then the configured value.
    pub fn resolve_base_url(&self, flag: Option<&str>) -> String {
        flag.map(str::to_owned)
            .or_else(|| {
                std::env::var("TOULA_BASE_URL")
                    .ok()
                    .filter(|v| !v.trim().is_empty())
            })
            .unwrap_or_else(|| self.base_url.clone())
    }
}

fn config_dir_path() -> Result<PathBuf> {
    let home = home_dir().context("Cannot resolve home directory")?;
    Ok(home.join(APP_DIR_NAME))
}

fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir_path()?.join(CONFIG_FILE_NAME))
}
