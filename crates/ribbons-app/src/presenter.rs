//! Renderer-side thread fed with frame snapshots.
//!
//! The simulation owns the live buffers and mutates them every frame, so the
//! presenter never sees them directly. Each frame the loop copies the sink's
//! state into a spare [`FrameSnapshot`] and sends it over; the presenter sends
//! it back once a newer one arrives. A new snapshot is only allocated when
//! none has come back yet, so after warm-up a handful of them circulate and
//! their buffers keep their capacity.

use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use ribbons_platform::{DiskRecord, HeadlessSink};
use serde::Serialize;
use tracing::{debug, info};

use crate::settings::AppError;

#[derive(Debug, Clone, Default, Serialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    /// Vertex floats of every mesh, concatenated in creation order.
    pub vertices: Vec<f32>,
    /// Float count of each mesh within `vertices`.
    pub mesh_lengths: Vec<usize>,
    pub disks: Vec<DiskRecord>,
}

impl FrameSnapshot {
    pub fn capture(&mut self, frame: u64, sink: &HeadlessSink) {
        self.frame = frame;
        self.vertices.clear();
        self.mesh_lengths.clear();
        for mesh in sink.meshes() {
            self.vertices.extend_from_slice(&mesh.vertices);
            self.mesh_lengths.push(mesh.vertices.len());
        }
        self.disks.clear();
        self.disks.extend_from_slice(sink.disks());
    }

    /// Axis-aligned bounds of every vertex and disk center.
    pub fn bounds(&self) -> Option<([f32; 2], [f32; 2])> {
        let points = self
            .vertices
            .chunks_exact(2)
            .map(|p| [p[0], p[1]])
            .chain(self.disks.iter().map(|d| d.center));
        points.fold(None, |acc, [x, y]| {
            Some(match acc {
                None => ([x, y], [x, y]),
                Some((min, max)) => (
                    [min[0].min(x), min[1].min(y)],
                    [max[0].max(x), max[1].max(y)],
                ),
            })
        })
    }
}

pub struct Presenter {
    full: Sender<FrameSnapshot>,
    empty: Receiver<FrameSnapshot>,
    spare: Option<FrameSnapshot>,
    handle: JoinHandle<Option<FrameSnapshot>>,
}

impl Presenter {
    pub fn spawn(log_interval: u64) -> Self {
        let (full, full_rx) = crossbeam_channel::bounded::<FrameSnapshot>(1);
        let (empty_tx, empty) = crossbeam_channel::unbounded::<FrameSnapshot>();

        let handle = std::thread::spawn(move || present_loop(full_rx, empty_tx, log_interval));

        Self {
            full,
            empty,
            spare: Some(FrameSnapshot::default()),
            handle,
        }
    }

    /// Copies the sink into a free snapshot and queues it. Blocks while the
    /// presenter is a frame behind.
    pub fn submit(&mut self, frame: u64, sink: &HeadlessSink) -> Result<(), AppError> {
        let mut snapshot = match self.spare.take() {
            Some(snapshot) => snapshot,
            None => match self.empty.try_recv() {
                Ok(snapshot) => snapshot,
                Err(TryRecvError::Empty) => FrameSnapshot::default(),
                Err(TryRecvError::Disconnected) => return Err(AppError::PresenterGone),
            },
        };
        snapshot.capture(frame, sink);
        self.full
            .send(snapshot)
            .map_err(|_| AppError::PresenterGone)
    }

    /// Closes the channel and returns the last snapshot the presenter saw.
    pub fn finish(self) -> Result<Option<FrameSnapshot>, AppError> {
        let Presenter { full, handle, .. } = self;
        drop(full);
        handle.join().map_err(|_| AppError::PresenterGone)
    }
}

fn present_loop(
    full: Receiver<FrameSnapshot>,
    empty: Sender<FrameSnapshot>,
    log_interval: u64,
) -> Option<FrameSnapshot> {
    info!("presenter: started");
    let mut last: Option<FrameSnapshot> = None;
    while let Ok(snapshot) = full.recv() {
        if log_interval > 0 && snapshot.frame % log_interval == 0 {
            match snapshot.bounds() {
                Some((min, max)) => info!(
                    "presenter: frame {} spans ({:.1}, {:.1})..({:.1}, {:.1})",
                    snapshot.frame, min[0], min[1], max[0], max[1]
                ),
                None => info!("presenter: frame {} is empty", snapshot.frame),
            }
        }
        if let Some(previous) = last.replace(snapshot) {
            if empty.send(previous).is_err() {
                debug!("presenter: recycle channel closed");
            }
        }
    }
    info!("presenter: stopped");
    last
}
