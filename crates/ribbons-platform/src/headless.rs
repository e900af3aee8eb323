use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::{AppearanceId, DiskId, DrawLayer, MeshId, RenderSink, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshRecord {
    pub layer: DrawLayer,
    pub appearance: AppearanceId,
    pub vertices: Vec<f32>,
    pub uvs: Vec<f32>,
    pub indices: Vec<u16>,
    /// Bumped on every `vertices_changed`.
    pub revision: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DiskRecord {
    pub layer: DrawLayer,
    pub appearance: AppearanceId,
    pub center: [f32; 2],
    pub radius: f32,
}

/// In-memory sink: keeps the latest state of every visual it was handed.
/// Used by the demo driver and by tests in place of a GPU backend.
#[derive(Debug, Default)]
pub struct HeadlessSink {
    meshes: Vec<MeshRecord>,
    disks: Vec<DiskRecord>,
}

impl HeadlessSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn meshes(&self) -> &[MeshRecord] {
        &self.meshes
    }

    pub fn disks(&self) -> &[DiskRecord] {
        &self.disks
    }

    pub fn mesh(&self, id: MeshId) -> Option<&MeshRecord> {
        self.meshes.get(id.0 as usize)
    }

    pub fn disk(&self, id: DiskId) -> Option<&DiskRecord> {
        self.disks.get(id.0 as usize)
    }

    /// Total number of vertex floats across all meshes.
    pub fn vertex_float_count(&self) -> usize {
        self.meshes.iter().map(|m| m.vertices.len()).sum()
    }
}

fn next_id(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| "headless sink id space exhausted".into())
}

impl RenderSink for HeadlessSink {
    fn create_strip_mesh(
        &mut self,
        layer: DrawLayer,
        appearance: AppearanceId,
        vertices: &[f32],
        uvs: &[f32],
        indices: &[u16],
    ) -> Result<MeshId> {
        if vertices.len() != uvs.len() {
            return Err(format!(
                "vertex/uv length mismatch: {} vs {}",
                vertices.len(),
                uvs.len()
            )
            .into());
        }
        let id = MeshId(next_id(self.meshes.len())?);
        debug!(
            "headless: mesh {:?} on {:?} ({} vertices, {} indices)",
            id,
            layer,
            vertices.len() / 2,
            indices.len()
        );
        self.meshes.push(MeshRecord {
            layer,
            appearance,
            vertices: vertices.to_vec(),
            uvs: uvs.to_vec(),
            indices: indices.to_vec(),
            revision: 0,
        });
        Ok(id)
    }

    fn create_disk(
        &mut self,
        layer: DrawLayer,
        appearance: AppearanceId,
        center: [f32; 2],
        radius: f32,
    ) -> Result<DiskId> {
        let id = DiskId(next_id(self.disks.len())?);
        self.disks.push(DiskRecord {
            layer,
            appearance,
            center,
            radius,
        });
        Ok(id)
    }

    fn vertices_changed(&mut self, mesh: MeshId, vertices: &[f32]) {
        match self.meshes.get_mut(mesh.0 as usize) {
            Some(record) if record.vertices.len() == vertices.len() => {
                record.vertices.copy_from_slice(vertices);
                record.revision += 1;
                trace!("headless: mesh {:?} revision {}", mesh, record.revision);
            }
            Some(record) => warn!(
                "headless: mesh {:?} got {} floats, expected {}",
                mesh,
                vertices.len(),
                record.vertices.len()
            ),
            None => warn!("headless: unknown mesh {:?}", mesh),
        }
    }

    fn place_disk(&mut self, disk: DiskId, center: [f32; 2], radius: f32) {
        match self.disks.get_mut(disk.0 as usize) {
            Some(record) => {
                record.center = center;
                record.radius = radius;
            }
            None => warn!("headless: unknown disk {:?}", disk),
        }
    }
}
