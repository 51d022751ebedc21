//! # thicket_math - Geometry for the Thicket simulation
//!
//! Pure value types and predicates used by motion, AI and collision:
//! vectors, axis-aligned boxes, line segments and capsules.

pub mod bounds;
pub mod intersect;
pub mod segment;
pub mod vector;

pub use bounds::*;
pub use intersect::*;
pub use segment::*;
pub use vector::*;

pub mod prelude {
    pub use crate::bounds::AABB;
    pub use crate::intersect::{aabb_intersects, capsule_vs_aabb_overlap, segment_aabb};
    pub use crate::segment::{Capsule, Segment};
    pub use crate::vector::Vec3;
}
