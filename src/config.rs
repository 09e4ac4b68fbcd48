use std::{fs, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{cli::PresetArg, display::layout::PanelLayout};

/// Largest edge accepted so pixel coordinates always fit the 16.16 range.
pub const MAX_EDGE: u16 = 4096;
/// Largest particle pool a config may ask for.
pub const MAX_PARTICLES: usize = 1 << 20;

/// Geometry and tuning constants. Fixed for the lifetime of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixConfig {
    pub width: u16,
    pub height: u16,
    pub max_particles: usize,
    pub max_snow_depth: u16,
    pub spawn_wind_adjust: u8,
    pub melt_interval: u16,
    pub layout: PanelLayout,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("{field} of {value} exceeds the limit of {}", MAX_EDGE)]
    TooLarge { field: &'static str, value: u16 },
    #[error("max_particles of {0} exceeds the limit of {max}", max = MAX_PARTICLES)]
    TooManyParticles(usize),
    #[error("snow depth {depth} does not fit a screen {height} rows tall")]
    DepthExceedsHeight { depth: u16, height: u16 },
    #[error("folded panel layout needs an even screen height, got {0}")]
    OddFoldedHeight(u16),
}

/// Fields a JSON config file may override on top of the chosen preset.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub max_particles: Option<usize>,
    pub max_snow_depth: Option<u16>,
    pub spawn_wind_adjust: Option<u8>,
    pub melt_interval: Option<u16>,
    pub layout: Option<PanelLayout>,
}

impl MatrixConfig {
    #[must_use]
    pub fn preset(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Single => Self {
                width: 32,
                height: 32,
                max_particles: 400,
                max_snow_depth: 4,
                spawn_wind_adjust: 2,
                melt_interval: 16,
                layout: PanelLayout::Direct,
            },
            PresetArg::Wide => Self {
                width: 64,
                height: 32,
                max_particles: 800,
                max_snow_depth: 4,
                spawn_wind_adjust: 2,
                melt_interval: 16,
                layout: PanelLayout::Direct,
            },
            PresetArg::Quad => Self {
                width: 64,
                height: 64,
                max_particles: 1600,
                max_snow_depth: 6,
                spawn_wind_adjust: 8,
                melt_interval: 12,
                layout: PanelLayout::Folded,
            },
        }
    }

    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(width) = overrides.width {
            self.width = width;
        }
        if let Some(height) = overrides.height {
            self.height = height;
        }
        if let Some(max_particles) = overrides.max_particles {
            self.max_particles = max_particles;
        }
        if let Some(depth) = overrides.max_snow_depth {
            self.max_snow_depth = depth;
        }
        if let Some(adjust) = overrides.spawn_wind_adjust {
            self.spawn_wind_adjust = adjust;
        }
        if let Some(interval) = overrides.melt_interval {
            self.melt_interval = interval;
        }
        if let Some(layout) = overrides.layout {
            self.layout = layout;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 {
                return Err(ConfigError::Zero(field));
            }
            if value > MAX_EDGE {
                return Err(ConfigError::TooLarge { field, value });
            }
        }
        if self.max_particles == 0 {
            return Err(ConfigError::Zero("max_particles"));
        }
        if self.max_particles > MAX_PARTICLES {
            return Err(ConfigError::TooManyParticles(self.max_particles));
        }
        if self.max_snow_depth == 0 {
            return Err(ConfigError::Zero("max_snow_depth"));
        }
        if self.melt_interval == 0 {
            return Err(ConfigError::Zero("melt_interval"));
        }
        if self.max_snow_depth > self.height {
            return Err(ConfigError::DepthExceedsHeight {
                depth: self.max_snow_depth,
                height: self.height,
            });
        }
        if self.layout == PanelLayout::Folded && self.height % 2 != 0 {
            return Err(ConfigError::OddFoldedHeight(self.height));
        }
        Ok(())
    }

    /// How far the spawn countdown drops per tick. Grows with screen area so
    /// larger panels fill at the same density.
    #[must_use]
    pub fn spawn_step(&self) -> i32 {
        let area = u32::from(self.width) * u32::from(self.height);
        i32::try_from(area / (32 * 32)).unwrap_or(i32::MAX).max(1)
    }
}

pub fn load_config(preset: PresetArg, path: Option<&Path>) -> anyhow::Result<MatrixConfig> {
    let mut config = MatrixConfig::preset(preset);
    if let Some(path) = path {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config file {} failed", path.display()))?;
        let overrides: ConfigOverrides = serde_json::from_str(&content)
            .with_context(|| format!("parsing config file {} failed", path.display()))?;
        config.apply(&overrides);
    }
    config.validate().context("invalid matrix configuration")?;
    Ok(config)
}
