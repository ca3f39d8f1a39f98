//! Drawing capability consumed by particle fields.

use plexus_core::{Rgba, SurfaceSize, Vec2};

/// A persistent 2D drawing target measured in logical pixels.
///
/// Nothing is cleared between frames; fields fade previous content with a
/// translucent [`Surface::fade`] instead.
pub trait Surface {
    /// Current logical drawable size.
    fn size(&self) -> SurfaceSize;

    /// Change the logical drawable size.
    fn set_size(&mut self, size: SurfaceSize);

    /// Cover the whole surface with `color` at `color.a` opacity.
    fn fade(&mut self, color: Rgba);

    /// Fill a circle. `glow` is the blur radius of a halo around it.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba, glow: f32);

    /// Stroke a thin line.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba);
}
