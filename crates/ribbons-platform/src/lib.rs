//! Renderer abstraction traits so `ribbons-core` stays backend-agnostic.

use serde::{Deserialize, Serialize};

mod headless;

pub use crate::headless::{DiskRecord, HeadlessSink, MeshRecord};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Opaque handle to a texture/material owned by the host renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppearanceId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeshId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiskId(pub u32);

/// Compositing group. Everything on `Back` is drawn before anything on `Front`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawLayer {
    Back,
    Front,
}

/// Receives trail geometry from the core.
///
/// Creation calls happen once per visual and may fail. The per-frame calls
/// (`vertices_changed`, `place_disk`) are infallible: the caller guarantees the
/// id came from this sink and that the buffer length matches the one it was
/// created with. The sink must only read the buffers during the call.
pub trait RenderSink {
    fn create_strip_mesh(
        &mut self,
        layer: DrawLayer,
        appearance: AppearanceId,
        vertices: &[f32],
        uvs: &[f32],
        indices: &[u16],
    ) -> Result<MeshId>;

    fn create_disk(
        &mut self,
        layer: DrawLayer,
        appearance: AppearanceId,
        center: [f32; 2],
        radius: f32,
    ) -> Result<DiskId>;

    fn vertices_changed(&mut self, mesh: MeshId, vertices: &[f32]);

    fn place_disk(&mut self, disk: DiskId, center: [f32; 2], radius: f32);
}
