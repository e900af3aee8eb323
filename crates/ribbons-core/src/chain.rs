use glam::DVec2;
use ribbons_platform::{DiskId, RenderSink};
use tracing::debug;

use crate::config::ChainConfig;
use crate::error::{Result, TrailError};
use crate::history::NodeHistory;
use crate::kinematics::{Kinematics, StepOrder};
use crate::mesh::{Layer, LayerPair};
use crate::ribbon::draw_layer;

/// Disks dragged behind a head; each point takes its predecessor's place
/// every frame. No geometry is synthesized.
#[derive(Debug, Clone)]
pub struct PointChainTrail {
    config: ChainConfig,
    kinematics: Kinematics,
    points: NodeHistory,
    radii: LayerPair<f32>,
}

impl PointChainTrail {
    pub fn new(config: ChainConfig) -> Result<Self> {
        if config.length == 0 {
            return Err(TrailError::InvalidLength(config.length));
        }
        if !config.radius.is_finite() || config.radius <= 0.0 {
            return Err(TrailError::InvalidWidth(config.radius));
        }
        if !config.line_width.is_finite()
            || config.line_width < 0.0
            || config.line_width >= config.radius
        {
            return Err(TrailError::InvalidBorderWidth {
                width: config.radius,
                border: config.line_width,
            });
        }

        let points = NodeHistory::new(config.length, config.position)?;
        let kinematics = Kinematics::new(config.position, config.angle, config.speed)
            .with_angle_speed(config.angle_speed)
            .with_speed_accel(config.speed_accel);
        let radii = LayerPair::new(config.radius, config.radius - config.line_width);
        debug!(
            "chain: {} points at ({}, {}), radius {}/{}",
            config.length, config.position.x, config.position.y, radii.outer, radii.inner
        );
        Ok(Self {
            config,
            kinematics,
            points,
            radii,
        })
    }

    pub fn advance(&mut self) {
        let head = self.kinematics.step(StepOrder::PositionFirst);
        self.points.advance(head);
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub fn kinematics(&self) -> &Kinematics {
        &self.kinematics
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, i: usize) -> DVec2 {
        self.points.node(i)
    }

    /// Newest first.
    pub fn points(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.points.iter()
    }

    pub fn radius(&self, layer: Layer) -> f32 {
        *self.radii.get(layer)
    }

    /// One disk per point and layer, in point order. A sink that fails partway
    /// may keep the disks created before the error; discard it.
    pub fn attach(
        &self,
        sink: &mut dyn RenderSink,
    ) -> ribbons_platform::Result<Vec<LayerPair<DiskId>>> {
        let mut disks = Vec::with_capacity(self.len());
        for point in self.points() {
            let mut create = |layer: Layer| {
                sink.create_disk(
                    draw_layer(layer),
                    *self.config.appearance.get(layer),
                    point.as_vec2().to_array(),
                    self.radius(layer),
                )
            };
            let outer = create(Layer::Outer)?;
            let inner = create(Layer::Inner)?;
            disks.push(LayerPair::new(outer, inner));
        }
        debug!("chain attached: {} disk pairs", disks.len());
        Ok(disks)
    }

    pub fn present(&self, disks: &[LayerPair<DiskId>], sink: &mut dyn RenderSink) {
        for (ids, point) in disks.iter().zip(self.points()) {
            for layer in Layer::ALL {
                let center = point.as_vec2().to_array();
                sink.place_disk(*ids.get(layer), center, self.radius(layer));
            }
        }
    }
}
