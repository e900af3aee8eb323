use glam::{DVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::mesh::{LayerPair, RibbonShape};

/// A round visual, positioned by its center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Disk {
    pub center: Vec2,
    pub radius: f32,
}

/// Head and tail caps of a ribbon, one disk per layer at each end. The radii
/// match the layer half-widths so the caps close the strip flush.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapSet {
    pub head: LayerPair<Disk>,
    pub tail: LayerPair<Disk>,
}

impl CapSet {
    pub fn new(start: DVec2, shape: &RibbonShape) -> Self {
        let start = start.as_vec2();
        let disks = shape.half_widths().map(|_, &radius| Disk {
            center: start,
            radius,
        });
        Self {
            head: disks,
            tail: disks,
        }
    }

    pub fn recenter(&mut self, head: DVec2, tail: DVec2) {
        let (head, tail) = (head.as_vec2(), tail.as_vec2());
        self.head.outer.center = head;
        self.head.inner.center = head;
        self.tail.outer.center = tail;
        self.tail.inner.center = tail;
    }
}
