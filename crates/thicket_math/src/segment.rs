//! Line segments and capsules
//!
//! A projectile's path over one tick is a [`Segment`] from where it was to
//! where it is; sweeping the projectile radius along it gives a [`Capsule`].

use crate::bounds::AABB;
use crate::vector::Vec3;

/// Finite line segment between two points
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub start: Vec3,
    pub end: Vec3,
}

impl Segment {
    #[inline]
    pub const fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }

    /// Zero-length segment at a point
    #[inline]
    pub const fn point(at: Vec3) -> Self {
        Self::new(at, at)
    }

    /// Unnormalized direction (end - start)
    #[inline]
    pub fn delta(&self) -> Vec3 {
        self.end - self.start
    }

    /// Point at parameter `t` in `[0, 1]`
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.start + self.delta() * t
    }

    /// Closest point on the segment to a given point
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        let delta = self.delta();
        let len_sq = delta.length_squared();
        if len_sq <= f32::EPSILON {
            return self.start;
        }
        let t = ((point - self.start).dot(delta) / len_sq).clamp(0.0, 1.0);
        self.at(t)
    }

    pub fn distance_squared_to_point(&self, point: Vec3) -> f32 {
        (point - self.closest_point(point)).length_squared()
    }
}

/// A segment swept by a radius
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Capsule {
    pub segment: Segment,
    pub radius: f32,
}

impl Capsule {
    #[inline]
    pub const fn new(start: Vec3, end: Vec3, radius: f32) -> Self {
        Self {
            segment: Segment::new(start, end),
            radius,
        }
    }

    #[inline]
    pub const fn from_segment(segment: Segment, radius: f32) -> Self {
        Self { segment, radius }
    }

    /// Box enclosing the whole capsule
    pub fn bounding_aabb(&self) -> AABB {
        AABB::new(
            self.segment.start.min(self.segment.end),
            self.segment.start.max(self.segment.end),
        )
        .expand(self.radius)
    }
}
