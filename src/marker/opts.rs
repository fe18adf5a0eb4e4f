use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::atlas::config::{AnimationConfig, DEFAULT_NUM_WAVES};
use crate::foundation::color::Color;
use crate::foundation::error::{SatmarkError, SatmarkResult};

/// Appearance options of a satellite marker, fully resolved.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SatelliteOpts {
    /// Staggered outward pulses per cycle.
    pub num_waves: u32,
    /// Pulse wedge color.
    pub wave_color: Color,
    /// Core ring color.
    pub core_color: Color,
    /// Shield arc color.
    pub shield_color: Color,
    /// Mesh scale factor; the plane side is `150 * size`.
    pub size: f64,
}

impl Default for SatelliteOpts {
    fn default() -> Self {
        Self {
            num_waves: DEFAULT_NUM_WAVES,
            wave_color: Color::WHITE,
            core_color: Color::RED,
            shield_color: Color::WHITE,
            size: 1.0,
        }
    }
}

impl SatelliteOpts {
    /// Animation config for these options on the default 50-frame profile.
    pub fn to_animation_config(&self) -> AnimationConfig {
        AnimationConfig {
            num_waves: self.num_waves,
            wave_color: self.wave_color,
            core_color: self.core_color,
            shield_color: self.shield_color,
            scale: self.size,
            ..AnimationConfig::default()
        }
    }
}

/// Partial [`SatelliteOpts`]: only the fields that are set override.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SatelliteOptsPatch {
    /// Override for [`SatelliteOpts::num_waves`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_waves: Option<u32>,
    /// Override for [`SatelliteOpts::wave_color`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wave_color: Option<Color>,
    /// Override for [`SatelliteOpts::core_color`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub core_color: Option<Color>,
    /// Override for [`SatelliteOpts::shield_color`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shield_color: Option<Color>,
    /// Override for [`SatelliteOpts::size`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

impl SatelliteOptsPatch {
    /// Parse a patch from JSON.
    pub fn from_reader<R: std::io::Read>(r: R) -> SatmarkResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| SatmarkError::serde(format!("parse satellite options JSON: {e}")))
    }

    /// Parse a patch from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SatmarkResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SatmarkError::serde(format!(
                "open satellite options JSON '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Apply the set fields on top of `base`.
    pub fn apply(&self, base: &SatelliteOpts) -> SatelliteOpts {
        SatelliteOpts {
            num_waves: self.num_waves.unwrap_or(base.num_waves),
            wave_color: self.wave_color.unwrap_or(base.wave_color),
            core_color: self.core_color.unwrap_or(base.core_color),
            shield_color: self.shield_color.unwrap_or(base.shield_color),
            size: self.size.unwrap_or(base.size),
        }
    }

    /// Combine two patches; fields set in `other` win.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            num_waves: other.num_waves.or(self.num_waves),
            wave_color: other.wave_color.or(self.wave_color),
            core_color: other.core_color.or(self.core_color),
            shield_color: other.shield_color.or(self.shield_color),
            size: other.size.or(self.size),
        }
    }

    /// Resolve against the defaults.
    pub fn resolve(&self) -> SatelliteOpts {
        self.apply(&SatelliteOpts::default())
    }
}

/// Requested appearance change for a live marker. Unset fields keep their current value.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppearanceChange {
    /// New pulse count.
    pub num_waves: Option<u32>,
    /// New pulse color.
    pub wave_color: Option<Color>,
    /// New core ring color.
    pub core_color: Option<Color>,
    /// New shield color.
    pub shield_color: Option<Color>,
}

impl From<AppearanceChange> for SatelliteOptsPatch {
    fn from(c: AppearanceChange) -> Self {
        Self {
            num_waves: c.num_waves,
            wave_color: c.wave_color,
            core_color: c.core_color,
            shield_color: c.shield_color,
            size: None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/marker/opts.rs"]
mod tests;
