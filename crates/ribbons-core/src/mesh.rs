//! Flat strip buffers for the two ribbon layers.
//!
//! Per node `i` each layer holds `[minus.x, minus.y, plus.x, plus.y]` at
//! `i * 4`, where `minus`/`plus` sit half a layer width from the node at the
//! tangent angle minus/plus a quarter turn. UVs and indices are written once; only
//! the vertex floats change afterwards.

use std::f64::consts::FRAC_PI_2;

use bytemuck::{Pod, Zeroable};
use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrailError};
use crate::history::NodeHistory;
use crate::tangent::tangent_angle;

pub const FLOATS_PER_NODE: usize = 4;

/// The two vertices a layer places at one node.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct EdgePair {
    pub minus: [f32; 2],
    pub plus: [f32; 2],
}

/// Index buffers are `u16`, which caps a strip at `u16::MAX + 1` vertices.
pub const MAX_STRIP_NODES: usize = (u16::MAX as usize + 1) / 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    /// Border, drawn behind.
    Outer,
    /// Fill, drawn in front.
    Inner,
}

impl Layer {
    pub const ALL: [Layer; 2] = [Layer::Outer, Layer::Inner];
}

/// A value per layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayerPair<T> {
    pub outer: T,
    pub inner: T,
}

impl<T> LayerPair<T> {
    pub fn new(outer: T, inner: T) -> Self {
        Self { outer, inner }
    }

    pub fn get(&self, layer: Layer) -> &T {
        match layer {
            Layer::Outer => &self.outer,
            Layer::Inner => &self.inner,
        }
    }

    pub fn get_mut(&mut self, layer: Layer) -> &mut T {
        match layer {
            Layer::Outer => &mut self.outer,
            Layer::Inner => &mut self.inner,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(Layer, &T) -> U) -> LayerPair<U> {
        LayerPair {
            outer: f(Layer::Outer, &self.outer),
            inner: f(Layer::Inner, &self.inner),
        }
    }
}

/// Half-widths of the two layers, derived once from the ribbon's total width
/// and border width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RibbonShape {
    pub width: f32,
    pub border_width: f32,
}

impl RibbonShape {
    pub fn new(width: f32, border_width: f32) -> Result<Self> {
        if !width.is_finite() || width <= 0.0 {
            return Err(TrailError::InvalidWidth(width));
        }
        if !border_width.is_finite() || border_width < 0.0 || border_width * 2.0 >= width {
            return Err(TrailError::InvalidBorderWidth {
                width,
                border: border_width,
            });
        }
        Ok(Self {
            width,
            border_width,
        })
    }

    pub fn inner_width(&self) -> f32 {
        self.width - self.border_width * 2.0
    }

    pub fn half_widths(&self) -> LayerPair<f32> {
        LayerPair::new(self.width / 2.0, self.inner_width() / 2.0)
    }
}

#[derive(Debug, Clone)]
pub struct RibbonMesh {
    vertices: LayerPair<Vec<f32>>,
    uvs: Vec<f32>,
    indices: Vec<u16>,
    half_widths: LayerPair<f64>,
}

impl RibbonMesh {
    /// Allocates every buffer for `nodes` nodes and collapses all vertices onto
    /// `start`.
    pub fn new(nodes: usize, start: DVec2, shape: &RibbonShape) -> Result<Self> {
        if !(2..=MAX_STRIP_NODES).contains(&nodes) {
            return Err(TrailError::InvalidNodeCount {
                got: nodes,
                min: 2,
                max: MAX_STRIP_NODES,
            });
        }

        let start = start.as_vec2();
        let collapsed: Vec<f32> = std::iter::repeat([start.x, start.y, start.x, start.y])
            .take(nodes)
            .flatten()
            .collect();

        let segment_length = 1.0 / (nodes - 1) as f32;
        let mut uvs = Vec::with_capacity(nodes * FLOATS_PER_NODE);
        let mut indices = Vec::with_capacity(nodes * 2);
        for i in 0..nodes {
            let u = segment_length * i as f32;
            uvs.extend_from_slice(&[u, 0.0, u, 1.0]);
            // Fits: nodes <= MAX_STRIP_NODES.
            let first = (i * 2) as u16;
            indices.extend_from_slice(&[first, first + 1]);
        }

        Ok(Self {
            vertices: LayerPair::new(collapsed.clone(), collapsed),
            uvs,
            indices,
            half_widths: shape.half_widths().map(|_, &half| f64::from(half)),
        })
    }

    pub fn node_count(&self) -> usize {
        self.indices.len() / 2
    }

    pub fn vertices(&self, layer: Layer) -> &[f32] {
        self.vertices.get(layer)
    }

    pub fn uvs(&self) -> &[f32] {
        &self.uvs
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Vertex pair for every node of a layer.
    pub fn edge_pairs(&self, layer: Layer) -> &[EdgePair] {
        bytemuck::cast_slice(self.vertices.get(layer))
    }

    /// Raw bytes of a layer's vertex buffer, for upload.
    pub fn vertex_bytes(&self, layer: Layer) -> &[u8] {
        bytemuck::cast_slice(self.vertices.get(layer))
    }

    /// Recomputes every vertex of both layers from `history`. Does not allocate.
    /// Geometry is computed in `f64` and narrowed when stored.
    pub fn rebuild(&mut self, history: &NodeHistory) {
        debug_assert_eq!(history.len(), self.node_count());
        for i in 0..history.len() {
            let node = history.node(i);
            let angle = tangent_angle(history, i);
            self.write_node(i, node, angle);
        }
    }

    fn write_node(&mut self, i: usize, node: DVec2, angle: f64) {
        let minus = DVec2::from_angle(angle - FRAC_PI_2);
        let plus = DVec2::from_angle(angle + FRAC_PI_2);
        for layer in Layer::ALL {
            let half = *self.half_widths.get(layer);
            let a = (node + half * minus).as_vec2();
            let b = (node + half * plus).as_vec2();
            let offset = i * FLOATS_PER_NODE;
            self.vertices.get_mut(layer)[offset..offset + FLOATS_PER_NODE]
                .copy_from_slice(&[a.x, a.y, b.x, b.y]);
        }
    }
}
