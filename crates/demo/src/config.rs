// File: crates/demo/src/config.rs
// Summary: Demo configuration: chart options plus output settings, loaded from TOML.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use area_chart::{ChartOptions, Color};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DemoConfig {
    #[serde(default)]
    pub chart: ChartOptions,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_out_dir")]
    pub dir: PathBuf,

    /// Simulated container width in pixels.
    #[serde(default = "default_width")]
    pub width: f64,

    /// PNG background, `#rrggbb`.
    #[serde(default = "default_background")]
    pub background: String,
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("target/out")
}

fn default_width() -> f64 {
    800.0
}

fn default_background() -> String {
    "#ffffff".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { dir: default_out_dir(), width: default_width(), background: default_background() }
    }
}

impl OutputConfig {
    pub fn background_color(&self) -> Result<Color> {
        self.background
            .parse()
            .with_context(|| format!("invalid background color '{}'", self.background))
    }
}

impl DemoConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: DemoConfig = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }
}
