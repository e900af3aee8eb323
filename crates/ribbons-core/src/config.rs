//! Serializable trail and engine configuration.

use std::f64::consts::TAU;
use std::path::Path;

use glam::DVec2;
use ribbons_platform::AppearanceId;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::mesh::LayerPair;

/// Canvas the demo scene was laid out for.
pub const DEFAULT_CANVAS: DVec2 = DVec2::new(1920.0, 1080.0);

fn default_disk_appearance() -> LayerPair<AppearanceId> {
    LayerPair::new(AppearanceId(0), AppearanceId(1))
}

fn default_strip_appearance() -> LayerPair<AppearanceId> {
    LayerPair::new(AppearanceId(2), AppearanceId(3))
}

/// One ribbon trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RibbonConfig {
    pub num_nodes: usize,
    pub position: DVec2,
    pub angle: f64,
    pub speed: f64,
    pub speed_accel: f64,
    pub angle_speed: f64,
    pub width: f32,
    pub border_width: f32,
    /// End caps.
    pub cap_appearance: LayerPair<AppearanceId>,
    /// Strip body.
    pub body_appearance: LayerPair<AppearanceId>,
}

impl Default for RibbonConfig {
    fn default() -> Self {
        Self {
            num_nodes: 32,
            position: DEFAULT_CANVAS / 2.0,
            angle: 0.0,
            speed: 6.0,
            speed_accel: 0.0,
            angle_speed: 0.02,
            width: 16.0,
            border_width: 1.0,
            cap_appearance: default_disk_appearance(),
            body_appearance: default_strip_appearance(),
        }
    }
}

/// One point-chain trail: `length` disks following the head.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    pub length: usize,
    pub position: DVec2,
    pub angle: f64,
    pub speed: f64,
    pub speed_accel: f64,
    pub angle_speed: f64,
    /// Outer disk radius.
    pub radius: f32,
    /// Border thickness; the inner disk radius is `radius - line_width`.
    pub line_width: f32,
    pub appearance: LayerPair<AppearanceId>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            length: 16,
            position: DEFAULT_CANVAS / 2.0,
            angle: 0.0,
            speed: 2.0,
            speed_accel: 0.01,
            angle_speed: 0.03,
            radius: 8.0,
            line_width: 1.0,
            appearance: default_disk_appearance(),
        }
    }
}

/// Ribbons fanned out evenly from one point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstPreset {
    pub name: String,
    pub count: u32,
    pub center: DVec2,
    pub num_nodes: usize,
    pub speed: f64,
    pub angle_speed: f64,
    pub width: f32,
    pub border_width: f32,
    /// Adds a twin turning the other way for every heading.
    pub mirrored: bool,
    pub cap_appearance: LayerPair<AppearanceId>,
    pub body_appearance: LayerPair<AppearanceId>,
}

impl Default for BurstPreset {
    fn default() -> Self {
        Self {
            name: "Default".into(),
            count: 64,
            center: DEFAULT_CANVAS / 2.0,
            num_nodes: 32,
            speed: 6.0,
            angle_speed: 0.02,
            width: 16.0,
            border_width: 1.0,
            mirrored: true,
            cap_appearance: default_disk_appearance(),
            body_appearance: default_strip_appearance(),
        }
    }
}

impl BurstPreset {
    /// Heading `i` is `TAU / count * i`. Mirrored twins directly follow their
    /// original.
    pub fn ribbon_configs(&self) -> impl Iterator<Item = RibbonConfig> + '_ {
        let step = TAU / f64::from(self.count.max(1));
        let turns: &[f64] = if self.mirrored {
            &[1.0, -1.0]
        } else {
            &[1.0]
        };
        (0..self.count).flat_map(move |i| {
            turns.iter().map(move |&sign| RibbonConfig {
                num_nodes: self.num_nodes,
                position: self.center,
                angle: step * f64::from(i),
                speed: self.speed,
                speed_accel: 0.0,
                angle_speed: self.angle_speed * sign,
                width: self.width,
                border_width: self.border_width,
                cap_appearance: self.cap_appearance,
                body_appearance: self.body_appearance,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub bursts: Vec<BurstPreset>,
    pub ribbons: Vec<RibbonConfig>,
    pub chains: Vec<ChainConfig>,
    /// Frames between throughput reports; `None` disables them.
    pub throughput_interval: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bursts: vec![BurstPreset::default()],
            ribbons: Vec::new(),
            chains: Vec::new(),
            throughput_interval: Some(60),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&source)
    }
}
