//! One-shot frame requests, advanced by the event loop.
//!
//! A request fires once, on the next [`FrameQueue::take_due`]. Anything that
//! wants to keep animating must request again while handling its frame.

use std::collections::BTreeMap;

/// Handle to a pending frame request, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameRequest(u64);

/// Pending frame requests, each carrying a target to run.
#[derive(Debug)]
pub struct FrameQueue<T> {
    next_id: u64,
    pending: BTreeMap<FrameRequest, T>,
    frames: u64,
}

impl<T> Default for FrameQueue<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            pending: BTreeMap::new(),
            frames: 0,
        }
    }
}

impl<T> FrameQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `target` on the next frame.
    pub fn request(&mut self, target: T) -> FrameRequest {
        let request = FrameRequest(self.next_id);
        self.next_id += 1;
        self.pending.insert(request, target);
        request
    }

    /// Drop a pending request. Returns whether it was still pending.
    pub fn cancel(&mut self, request: FrameRequest) -> bool {
        self.pending.remove(&request).is_some()
    }

    pub fn is_pending(&self, request: FrameRequest) -> bool {
        self.pending.contains_key(&request)
    }

    /// Start a frame: hand out every request made before this call, in
    /// request order. Requests made while handling them wait for the next one.
    pub fn take_due(&mut self) -> Vec<(FrameRequest, T)> {
        self.frames += 1;
        std::mem::take(&mut self.pending).into_iter().collect()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Frames started so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
