//! One-way visibility flags driven by intersection events.

use std::collections::HashMap;

use plexus_core::normalize_threshold;
use tracing::{debug, trace, warn};

use crate::error::RevealError;

/// Identifies one registered region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VisibilityHandle(u64);

impl VisibilityHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// A single intersection notification for an observed handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEvent {
    pub handle: VisibilityHandle,
    /// Fraction of the region's area inside the viewport.
    pub ratio: f32,
}

/// Host capability that watches regions and reports intersection ratios.
pub trait IntersectionSource {
    /// Host-specific description of a watched region.
    type Region;

    /// Start observing `region` on behalf of `handle`.
    fn observe(&mut self, handle: VisibilityHandle, region: Self::Region)
    -> Result<(), RevealError>;

    /// Stop observing `handle`. Unknown handles are ignored.
    fn unobserve(&mut self, handle: VisibilityHandle);

    /// Drain notifications produced since the last call.
    fn take_events(&mut self) -> Vec<IntersectionEvent>;
}

#[derive(Debug, Clone, Copy)]
struct VisibilityState {
    threshold: f32,
    visible: bool,
    observing: bool,
}

impl VisibilityState {
    fn qualifies(&self, ratio: f32) -> bool {
        if !ratio.is_finite() {
            return false;
        }
        if self.threshold == 0.0 {
            ratio > 0.0
        } else {
            ratio >= self.threshold
        }
    }
}

/// Tracks registered regions and flips each one to visible exactly once.
#[derive(Debug)]
pub struct VisibilityDetector<S> {
    source: Option<S>,
    states: HashMap<VisibilityHandle, VisibilityState>,
    next_id: u64,
}

impl<S: IntersectionSource> VisibilityDetector<S> {
    /// Detector backed by `source`.
    pub fn new(source: S) -> Self {
        Self {
            source: Some(source),
            states: HashMap::new(),
            next_id: 0,
        }
    }

    /// Detector for a host without intersection observation. Every region
    /// it registers is visible immediately.
    pub fn unavailable() -> Self {
        Self {
            source: None,
            states: HashMap::new(),
            next_id: 0,
        }
    }

    /// Start watching `region`. It becomes visible once an intersection
    /// ratio reaching `threshold` is reported.
    pub fn register(&mut self, region: S::Region, threshold: f32) -> VisibilityHandle {
        let threshold = normalize_threshold(threshold);
        let handle = VisibilityHandle(self.next_id);
        self.next_id += 1;

        let observing = match self.source.as_mut() {
            Some(source) => match source.observe(handle, region) {
                Ok(()) => true,
                Err(err) => {
                    warn!(%err, ?handle, "observation refused, revealing immediately");
                    false
                }
            },
            None => {
                debug!(?handle, "no intersection source, revealing immediately");
                false
            }
        };

        self.states.insert(
            handle,
            VisibilityState {
                threshold,
                visible: !observing,
                observing,
            },
        );
        handle
    }

    /// Whether the region has been revealed. Unknown handles are not visible.
    pub fn is_visible(&self, handle: VisibilityHandle) -> bool {
        self.states.get(&handle).is_some_and(|s| s.visible)
    }

    /// Stop tracking `handle` and release its observation.
    pub fn unregister(&mut self, handle: VisibilityHandle) {
        if let Some(state) = self.states.remove(&handle)
            && state.observing
            && let Some(source) = self.source.as_mut()
        {
            source.unobserve(handle);
        }
    }

    /// Apply one intersection event. Returns `true` only for the event that
    /// reveals the handle.
    pub fn notify(&mut self, event: IntersectionEvent) -> bool {
        let Some(state) = self.states.get_mut(&event.handle) else {
            return false;
        };
        if state.visible {
            return false;
        }
        trace!(handle = ?event.handle, ratio = event.ratio, "intersection");
        if !state.qualifies(event.ratio) {
            return false;
        }

        state.visible = true;
        state.observing = false;
        debug!(handle = ?event.handle, ratio = event.ratio, "region revealed");
        if let Some(source) = self.source.as_mut() {
            source.unobserve(event.handle);
        }
        true
    }

    /// Drain the source and apply its events, returning newly revealed handles.
    pub fn pump(&mut self) -> Vec<VisibilityHandle> {
        let events = match self.source.as_mut() {
            Some(source) => source.take_events(),
            None => return Vec::new(),
        };
        events
            .into_iter()
            .filter(|event| self.notify(*event))
            .map(|event| event.handle)
            .collect()
    }

    pub fn source(&self) -> Option<&S> {
        self.source.as_ref()
    }

    pub fn source_mut(&mut self) -> Option<&mut S> {
        self.source.as_mut()
    }

    /// Number of registered handles.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
