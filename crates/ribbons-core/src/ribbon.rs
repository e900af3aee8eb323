use glam::DVec2;
use ribbons_platform::{DiskId, DrawLayer, MeshId, RenderSink};
use tracing::debug;

use crate::caps::{CapSet, Disk};
use crate::config::RibbonConfig;
use crate::error::Result;
use crate::history::NodeHistory;
use crate::kinematics::{Kinematics, StepOrder};
use crate::mesh::{Layer, LayerPair, RibbonMesh, RibbonShape};
use crate::tangent::tangent_angle;

/// Where each layer goes in the compositor: borders behind fills.
pub fn draw_layer(layer: Layer) -> DrawLayer {
    match layer {
        Layer::Outer => DrawLayer::Back,
        Layer::Inner => DrawLayer::Front,
    }
}

/// A tapered two-layer ribbon following a turning head.
#[derive(Debug, Clone)]
pub struct RibbonTrail {
    config: RibbonConfig,
    kinematics: Kinematics,
    history: NodeHistory,
    mesh: RibbonMesh,
    caps: CapSet,
}

/// Sink-side handles created by [`RibbonTrail::attach`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RibbonBinding {
    pub meshes: LayerPair<MeshId>,
    pub head_caps: LayerPair<DiskId>,
    pub tail_caps: LayerPair<DiskId>,
}

impl RibbonTrail {
    pub fn new(config: RibbonConfig) -> Result<Self> {
        let shape = RibbonShape::new(config.width, config.border_width)?;
        let mesh = RibbonMesh::new(config.num_nodes, config.position, &shape)?;
        let history = NodeHistory::new(config.num_nodes, config.position)?;
        let kinematics = Kinematics::new(config.position, config.angle, config.speed)
            .with_angle_speed(config.angle_speed)
            .with_speed_accel(config.speed_accel);
        let caps = CapSet::new(config.position, &shape);
        debug!(
            "ribbon: {} nodes at ({}, {}), heading {:.3}, width {}/{}",
            config.num_nodes,
            config.position.x,
            config.position.y,
            config.angle,
            config.width,
            shape.inner_width()
        );
        Ok(Self {
            config,
            kinematics,
            history,
            mesh,
            caps,
        })
    }

    /// One frame: move the head, shift the history, rebuild both layers and
    /// recenter the caps.
    pub fn advance(&mut self) {
        let head = self.kinematics.step(StepOrder::HeadingFirst);
        self.history.advance(head);
        self.mesh.rebuild(&self.history);
        self.caps.recenter(self.history.head(), self.history.tail());
    }

    pub fn config(&self) -> &RibbonConfig {
        &self.config
    }

    pub fn kinematics(&self) -> &Kinematics {
        &self.kinematics
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn node(&self, i: usize) -> DVec2 {
        self.history.node(i)
    }

    /// Newest first.
    pub fn nodes(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.history.iter()
    }

    pub fn tangent_angle(&self, i: usize) -> f64 {
        tangent_angle(&self.history, i)
    }

    pub fn mesh(&self) -> &RibbonMesh {
        &self.mesh
    }

    pub fn caps(&self) -> &CapSet {
        &self.caps
    }

    /// Registers the strip meshes and cap disks with `sink`.
    ///
    /// The trail itself is already valid here, so only the sink can fail. A
    /// sink that fails partway may keep the visuals it created before the
    /// error; discard it rather than retrying on it.
    pub fn attach(&self, sink: &mut dyn RenderSink) -> ribbons_platform::Result<RibbonBinding> {
        let mut meshes = Vec::with_capacity(2);
        for layer in Layer::ALL {
            meshes.push(sink.create_strip_mesh(
                draw_layer(layer),
                *self.config.body_appearance.get(layer),
                self.mesh.vertices(layer),
                self.mesh.uvs(),
                self.mesh.indices(),
            )?);
        }
        let binding = RibbonBinding {
            meshes: LayerPair::new(meshes[0], meshes[1]),
            head_caps: self.create_caps(sink, &self.caps.head)?,
            tail_caps: self.create_caps(sink, &self.caps.tail)?,
        };
        debug!("ribbon attached: {:?}", binding);
        Ok(binding)
    }

    fn create_caps(
        &self,
        sink: &mut dyn RenderSink,
        disks: &LayerPair<Disk>,
    ) -> ribbons_platform::Result<LayerPair<DiskId>> {
        let mut create = |layer: Layer| {
            let disk = disks.get(layer);
            sink.create_disk(
                draw_layer(layer),
                *self.config.cap_appearance.get(layer),
                disk.center.to_array(),
                disk.radius,
            )
        };
        let outer = create(Layer::Outer)?;
        let inner = create(Layer::Inner)?;
        Ok(LayerPair::new(outer, inner))
    }

    /// Hands the current frame to `sink`. Call between `advance`s.
    pub fn present(&self, binding: &RibbonBinding, sink: &mut dyn RenderSink) {
        for layer in Layer::ALL {
            sink.vertices_changed(*binding.meshes.get(layer), self.mesh.vertices(layer));
            for (ids, disks) in [
                (&binding.head_caps, &self.caps.head),
                (&binding.tail_caps, &self.caps.tail),
            ] {
                let disk = disks.get(layer);
                sink.place_disk(*ids.get(layer), disk.center.to_array(), disk.radius);
            }
        }
    }
}
