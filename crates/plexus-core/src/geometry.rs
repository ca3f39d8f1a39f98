//! Points, vectors and surface dimensions in logical pixels.

use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

/// A 2D point or displacement in logical pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Vec2) -> f32 {
        (self - other).length()
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Logical drawable dimensions of a surface.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A surface with no drawable area (or a non-finite extent).
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    /// Whether `point` lies inside `[0, width] x [0, height]`.
    pub fn contains(&self, point: Vec2) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
    }

    #[test]
    fn test_vector_ops() {
        let mut p = Vec2::new(1.0, 2.0);
        p += Vec2::new(0.5, -1.0);
        assert_eq!(p, Vec2::new(1.5, 1.0));
        p -= Vec2::new(1.5, 1.0) * 2.0;
        assert_eq!(p, Vec2::new(-1.5, -1.0));
    }

    #[test]
    fn test_empty_surface() {
        assert!(SurfaceSize::new(0.0, 10.0).is_empty());
        assert!(SurfaceSize::new(10.0, -1.0).is_empty());
        assert!(SurfaceSize::new(f32::NAN, 10.0).is_empty());
        assert!(!SurfaceSize::new(400.0, 300.0).is_empty());
    }

    #[test]
    fn test_contains() {
        let size = SurfaceSize::new(400.0, 300.0);
        assert!(size.contains(Vec2::new(0.0, 300.0)));
        assert!(!size.contains(Vec2::new(-0.1, 10.0)));
        assert!(!size.contains(Vec2::new(10.0, 300.5)));
    }
}
