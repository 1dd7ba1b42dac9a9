use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::aurora::AuroraLayer;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuroraConfig {
    pub star_seed: u64,
    pub star_count: usize,
    pub star_band: f64,
    pub star_radius: [f64; 2],
    pub twinkle_rate: f64,
    pub frame_interval_ms: u64,
    pub layers: Vec<AuroraLayer>,
}

impl Default for AuroraConfig {
    fn default() -> Self {
        Self {
            star_seed: 42,
            star_count: 220,
            star_band: 0.9,
            star_radius: [0.3, 1.8],
            twinkle_rate: 0.8,
            frame_interval_ms: 33,
            layers: vec![
                AuroraLayer::default(),
                AuroraLayer {
                    amplitude: 120.0,
                    speed: 0.22,
                    frequency: 0.0042,
                    blur: 30.0,
                    vertical_offset: -20.0,
                    colors: [[0.2, 0.8, 0.3, 0.9], [0.0, 0.4, 1.0, 0.7]],
                },
                AuroraLayer {
                    amplitude: 90.0,
                    speed: 0.28,
                    frequency: 0.0050,
                    blur: 22.0,
                    vertical_offset: 60.0,
                    colors: [[1.0, 0.85, 0.0, 0.85], [0.2, 0.8, 0.3, 0.55]],
                },
            ],
        }
    }
}

impl AuroraConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw).context("parse aurora config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config = Self::from_toml_str(&raw)
            .with_context(|| format!("load config {}", path.display()))?;
        tracing::info!(path = %path.display(), layers = config.layers.len(), "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.layers.is_empty() {
            bail!("at least one aurora layer is required");
        }
        if self.frame_interval_ms == 0 {
            bail!("frame_interval_ms must be > 0");
        }
        let [lo, hi] = self.star_radius;
        if !(lo <= hi) {
            bail!("star_radius must be ordered, got [{lo}, {hi}]");
        }
        if !(self.star_band > 0.0 && self.star_band <= 1.0) {
            bail!("star_band must be in (0, 1], got {}", self.star_band);
        }
        Ok(())
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("serialize aurora config")
    }
}
