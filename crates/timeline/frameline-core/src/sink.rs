//! Rendering collaborator fed with resolved snapshots.

use crate::frame::Frame;

/// Receives the snapshot for the current tick. Implementations own every write
/// to the rendering surface; the resolver never touches it.
pub trait SnapshotSink {
    fn apply_snapshot(&mut self, frame: &Frame);
}

/// Keeps every applied snapshot; handy for hosts that batch writes.
impl SnapshotSink for Vec<Frame> {
    fn apply_snapshot(&mut self, frame: &Frame) {
        self.push(frame.clone());
    }
}
