use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::loader::{Loader, Source, DEFAULT_TIMEOUT_SECS};
use crate::render::{RenderSettings, DEFAULT_EMPTY_MESSAGE, DEFAULT_PLACEHOLDER, DEFAULT_UNTITLED};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub source: SourceConfig,
    pub render: RenderConfig,
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub location: String,
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: "activities.json".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub empty_message: String,
    pub placeholder: String,
    pub untitled: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            untitled: DEFAULT_UNTITLED.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub out_dir: PathBuf,
    pub page_title: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("public"),
            page_title: "Activities".to_string(),
        }
    }
}

impl DirectoryConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: DirectoryConfig =
            toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Load `path` when given, otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn source(&self) -> Source {
        Source::parse(&self.source.location)
    }

    pub fn loader(&self) -> Loader {
        Loader::new(Duration::from_secs(self.source.timeout_secs))
    }

    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            empty_message: self.render.empty_message.clone(),
            placeholder: self.render.placeholder.clone(),
            untitled: self.render.untitled.clone(),
        }
    }
}
