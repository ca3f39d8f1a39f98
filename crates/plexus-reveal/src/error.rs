use thiserror::Error;

use crate::detector::VisibilityHandle;

/// Reasons an intersection source refuses to observe a region.
///
/// The detector never surfaces these to callers; a refused observation
/// reveals the region immediately.
#[derive(Debug, Error, PartialEq)]
pub enum RevealError {
    /// The host has no way to observe intersections.
    #[error("intersection observation unavailable: {0}")]
    Unavailable(String),

    /// The handle is already being observed by this source.
    #[error("{0:?} is already observed")]
    AlreadyObserved(VisibilityHandle),
}
