use glam::DVec2;

use crate::error::{Result, TrailError};

/// The last `len` head positions, newest first.
///
/// Stored as a ring: `advance` overwrites the oldest slot and moves the base,
/// so a frame costs O(1) regardless of length. `node(i)` always reads the
/// i-th most recent position.
#[derive(Debug, Clone)]
pub struct NodeHistory {
    slots: Vec<DVec2>,
    /// Slot holding node 0.
    head: usize,
}

impl NodeHistory {
    /// Every slot starts at `start`, so a trail grows out of a single point
    /// over its first `len - 1` frames.
    pub fn new(len: usize, start: DVec2) -> Result<Self> {
        if len == 0 {
            return Err(TrailError::InvalidLength(len));
        }
        Ok(Self {
            slots: vec![start; len],
            head: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false; a history holds at least one node.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drops the oldest node and makes `new_head` node 0.
    pub fn advance(&mut self, new_head: DVec2) {
        let len = self.slots.len();
        self.head = (self.head + len - 1) % len;
        self.slots[self.head] = new_head;
    }

    /// The i-th most recent position. Panics if `i >= len()`.
    #[inline]
    pub fn node(&self, i: usize) -> DVec2 {
        let len = self.slots.len();
        assert!(i < len, "node {i} out of range for history of {len}");
        self.slots[(self.head + i) % len]
    }

    pub fn head(&self) -> DVec2 {
        self.slots[self.head]
    }

    pub fn tail(&self) -> DVec2 {
        self.node(self.slots.len() - 1)
    }

    /// Newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = DVec2> + '_ {
        let (older, newer) = self.slots.split_at(self.head);
        newer.iter().chain(older.iter()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xs(history: &NodeHistory) -> Vec<f64> {
        history.iter().map(|p| p.x).collect()
    }

    #[test]
    fn starts_collapsed() {
        let history = NodeHistory::new(4, DVec2::new(3.0, 4.0)).unwrap();
        assert_eq!(history.len(), 4);
        assert!(history.iter().all(|p| p == DVec2::new(3.0, 4.0)));
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(
            NodeHistory::new(0, DVec2::ZERO).unwrap_err(),
            TrailError::InvalidLength(0)
        );
    }

    #[test]
    fn advance_shifts_toward_tail() {
        let mut history = NodeHistory::new(3, DVec2::ZERO).unwrap();
        history.advance(DVec2::new(1.0, 0.0));
        assert_eq!(xs(&history), vec![1.0, 0.0, 0.0]);
        history.advance(DVec2::new(2.0, 0.0));
        assert_eq!(xs(&history), vec![2.0, 1.0, 0.0]);
        history.advance(DVec2::new(3.0, 0.0));
        assert_eq!(xs(&history), vec![3.0, 2.0, 1.0]);
        assert_eq!(history.head(), DVec2::new(3.0, 0.0));
        assert_eq!(history.tail(), DVec2::new(1.0, 0.0));
    }

    #[test]
    fn index_reads_match_iteration_after_wrapping() {
        let mut history = NodeHistory::new(5, DVec2::ZERO).unwrap();
        for step in 1..=13 {
            history.advance(DVec2::splat(step as f64));
        }
        let by_index: Vec<DVec2> = (0..history.len()).map(|i| history.node(i)).collect();
        let by_iter: Vec<DVec2> = history.iter().collect();
        assert_eq!(by_index, by_iter);
        assert_eq!(xs(&history), vec![13.0, 12.0, 11.0, 10.0, 9.0]);
    }

    #[test]
    fn single_slot_history_keeps_latest() {
        let mut history = NodeHistory::new(1, DVec2::ZERO).unwrap();
        history.advance(DVec2::ONE);
        assert_eq!(history.head(), DVec2::ONE);
        assert_eq!(history.tail(), DVec2::ONE);
    }

    #[test]
    #[should_panic]
    fn out_of_range_read_panics() {
        let history = NodeHistory::new(2, DVec2::ZERO).unwrap();
        history.node(2);
    }
}
