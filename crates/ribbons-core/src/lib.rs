//! Ribbons core engine: platform-agnostic trail geometry.
//!
//! A [`RibbonTrail`] keeps the last `N` head positions and rebuilds a
//! two-layer strip mesh from them every frame; a [`PointChainTrail`] just drags
//! disks behind its head. Both hand their state to a renderer through
//! [`ribbons_platform::RenderSink`].

pub mod caps;
pub mod chain;
pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod kinematics;
pub mod mesh;
pub mod meter;
pub mod ribbon;
pub mod tangent;

pub use crate::caps::{CapSet, Disk};
pub use crate::chain::PointChainTrail;
pub use crate::config::{BurstPreset, ChainConfig, EngineConfig, RibbonConfig};
pub use crate::engine::TrailEngine;
pub use crate::error::{ConfigError, Result, TrailError};
pub use crate::history::NodeHistory;
pub use crate::kinematics::{Kinematics, StepOrder};
pub use crate::mesh::{EdgePair, Layer, LayerPair, RibbonMesh, RibbonShape};
pub use crate::meter::{FrameStats, ThroughputMeter};
pub use crate::ribbon::{RibbonBinding, RibbonTrail};
