//! Run configuration, loaded from an optional YAML file.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Ticks per second for the pacing loop
    #[serde(default = "default_tick_rate")]
    pub tick_rate_hz: u32,

    /// Start in sensor-only rendering
    pub blind_mode: bool,

    /// Stop after this many ticks
    pub max_ticks: Option<u64>,

    /// Run seed for randomized controllers
    pub seed: u64,

    /// Longest hold, in ticks, for the wander controller
    #[serde(default = "default_max_hold")]
    pub wander_max_hold: u32,

    #[serde(default)]
    pub viewport: ViewportConfig,
}

/// ASCII window centred on the agent, in cells.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ViewportConfig {
    #[serde(default = "default_view_width")]
    pub width: u32,
    #[serde(default = "default_view_height")]
    pub height: u32,
}

/// Largest viewport side, in cells.
pub const MAX_VIEWPORT: u32 = 1024;

fn default_tick_rate() -> u32 {
    60
}
fn default_max_hold() -> u32 {
    8
}
fn default_view_width() -> u32 {
    64
}
fn default_view_height() -> u32 {
    32
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_view_width(),
            height: default_view_height(),
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: default_tick_rate(),
            blind_mode: false,
            max_ticks: None,
            seed: 0,
            wander_max_hold: default_max_hold(),
            viewport: ViewportConfig::default(),
        }
    }
}

impl SimConfig {
    /// Load from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: SimConfig = serde_yaml::from_str(content)?;
        anyhow::ensure!(config.tick_rate_hz > 0, "tick_rate_hz must be > 0");
        anyhow::ensure!(
            config.viewport.width > 0 && config.viewport.height > 0,
            "viewport must be non-empty"
        );
        anyhow::ensure!(
            config.viewport.width <= MAX_VIEWPORT && config.viewport.height <= MAX_VIEWPORT,
            "viewport must be at most {0}x{0}",
            MAX_VIEWPORT
        );
        Ok(config)
    }
}
