use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use crate::{Error, Result};

const MAX_STAGGER_MS: u64 = 60_000;

#[derive(Debug, Default, Deserialize)]
pub struct SourcesConfig {
    pub projects: Option<String>,
    pub games: Option<String>,
    pub updates: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sources: SourcesConfig,
    pub output_dir: Option<PathBuf>,
    pub templates_dir: Option<PathBuf>,
    pub loglevel: Option<String>,
    pub stagger_ms: Option<u64>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.timeout_secs == Some(0) {
            return Err(Error::InvalidData("timeout_secs must be greater than zero".to_string()));
        }
        if let Some(stagger) = self.stagger_ms.filter(|ms| *ms > MAX_STAGGER_MS) {
            return Err(Error::InvalidData(format!(
                "stagger_ms is {}, at most {} is allowed",
                stagger, MAX_STAGGER_MS
            )));
        }
        Ok(())
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("public"))
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.templates_dir.clone().unwrap_or_else(|| PathBuf::from("templates"))
    }

    pub fn loglevel(&self) -> &str {
        self.loglevel.as_deref().unwrap_or("info")
    }

    pub fn stagger_ms(&self) -> u64 {
        self.stagger_ms.unwrap_or(150)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(30))
    }
}
