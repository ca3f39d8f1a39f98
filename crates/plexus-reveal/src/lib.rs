//! Scroll-triggered reveals.
//!
//! A [`VisibilityDetector`] reports a one-way "became visible" flag per
//! registered region. Observation itself is delegated to an
//! [`IntersectionSource`], so the terminal page plugs in a
//! [`ScrollViewport`] while tests feed events by hand. The presentation side
//! turns the flag into timed transitions ([`Reveal`], [`Typewriter`]).

mod detector;
mod error;
mod transition;
mod typewriter;
mod viewport;

pub use detector::{IntersectionEvent, IntersectionSource, VisibilityDetector, VisibilityHandle};
pub use error::RevealError;
pub use transition::{Reveal, RevealTransition, ease_out};
pub use typewriter::Typewriter;
pub use viewport::{Region, ScrollViewport, Viewport};
