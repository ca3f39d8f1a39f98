//! Particle field rendering for the plexus landing page.
//!
//! A [`ParticleField`] is a fixed set of drifting particles connected by
//! faint lines when close together. Fields draw onto any [`Surface`]; the
//! terminal uses a [`CellSurface`]. A [`Stage`] owns the fields of a page,
//! runs their frame loops and tears them down.

mod cells;
mod chars;
mod field;
mod particle;
mod scheduler;
mod stage;
mod surface;

pub use cells::{CELL_HEIGHT, CELL_WIDTH, CellSurface, logical_size};
pub use field::{ParticleField, connection_opacity};
pub use particle::Particle;
pub use scheduler::{FrameQueue, FrameRequest};
pub use stage::{FieldHandle, MAX_POINTS, Stage};
pub use surface::Surface;
