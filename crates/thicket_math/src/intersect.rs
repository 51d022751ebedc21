//! Overlap tests used by the collision pass
//!
//! - AABB vs AABB (player and enemy contact)
//! - Segment vs AABB (slab method)
//! - Capsule vs AABB, broad-phase approximation (projectile hits)

use crate::bounds::AABB;
use crate::segment::{Capsule, Segment};

/// Per-axis overlap test with inclusive bounds. Symmetric in its arguments.
#[inline]
pub fn aabb_intersects(a: &AABB, b: &AABB) -> bool {
    a.intersects(b)
}

/// Segment-AABB intersection using the slab method
///
/// Returns the segment parameter in `[0, 1]` at which the segment first lies
/// inside the box (0 when it starts inside), or None if it never does.
pub fn segment_aabb(segment: &Segment, aabb: &AABB) -> Option<f32> {
    let origin = segment.start.to_array();
    let delta = segment.delta().to_array();
    let min = aabb.min.to_array();
    let max = aabb.max.to_array();

    let mut t_enter = 0.0_f32;
    let mut t_exit = 1.0_f32;

    for axis in 0..3 {
        if delta[axis].abs() < f32::EPSILON {
            // Parallel to this slab: must already be between its planes
            if origin[axis] < min[axis] || origin[axis] > max[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / delta[axis];
        let t1 = (min[axis] - origin[axis]) * inv;
        let t2 = (max[axis] - origin[axis]) * inv;

        t_enter = t_enter.max(t1.min(t2));
        t_exit = t_exit.min(t1.max(t2));

        if t_enter > t_exit {
            return None;
        }
    }

    Some(t_enter)
}

/// Approximate capsule-AABB overlap.
///
/// Reports a hit when the capsule's core segment passes through the box, or
/// when the segment comes within `radius` of the box center. The radius is
/// never applied against the faces, edges or corners of the box, so a capsule
/// whose core misses the box but whose skin grazes a corner or clips an edge
/// at a shallow angle is reported as a miss. Projectile radii are tiny next to
/// enemy boxes, which is what makes the shortcut acceptable.
///
/// Both tests imply the capsule's bounding box touches `aabb`, so that check
/// runs first and rejects distant boxes cheaply.
pub fn capsule_vs_aabb_overlap(capsule: &Capsule, aabb: &AABB) -> bool {
    if !capsule.bounding_aabb().intersects(aabb) {
        return false;
    }
    if segment_aabb(&capsule.segment, aabb).is_some() {
        return true;
    }
    let r = capsule.radius;
    capsule.segment.distance_squared_to_point(aabb.center()) <= r * r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vec3;
    use approx::assert_relative_eq;

    fn unit_box_at(center: Vec3) -> AABB {
        AABB::from_center_half_extents(center, Vec3::splat(0.5))
    }

    #[test]
    fn test_aabb_intersects_symmetric() {
        let boxes = [
            AABB::new(Vec3::ZERO, Vec3::ONE),
            AABB::new(Vec3::splat(0.5), Vec3::splat(1.5)),
            AABB::new(Vec3::splat(1.0), Vec3::splat(2.0)),
            AABB::new(Vec3::new(3.0, 0.0, 0.0), Vec3::new(4.0, 1.0, 1.0)),
            AABB::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(5.0, 0.0, 5.0)),
        ];
        for a in &boxes {
            for b in &boxes {
                assert_eq!(aabb_intersects(a, b), aabb_intersects(b, a), "{:?} vs {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_segment_aabb_hit() {
        let aabb = unit_box_at(Vec3::new(0.0, 0.0, 5.0));
        let seg = Segment::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0));

        let t = segment_aabb(&seg, &aabb).unwrap();
        assert_relative_eq!(t, 0.45, epsilon = 1e-5);
    }

    #[test]
    fn test_segment_aabb_miss() {
        let aabb = unit_box_at(Vec3::new(0.0, 3.0, 5.0));
        let seg = Segment::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0));
        assert!(segment_aabb(&seg, &aabb).is_none());
    }

    #[test]
    fn test_segment_aabb_stops_short() {
        let aabb = unit_box_at(Vec3::new(0.0, 0.0, 5.0));
        let seg = Segment::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 4.0));
        assert!(segment_aabb(&seg, &aabb).is_none());
    }

    #[test]
    fn test_segment_aabb_inside() {
        let aabb = unit_box_at(Vec3::ZERO);
        let seg = Segment::new(Vec3::new(-0.1, 0.0, 0.0), Vec3::new(0.1, 0.0, 0.0));
        assert_eq!(segment_aabb(&seg, &aabb), Some(0.0));
    }

    #[test]
    fn test_capsule_swept_through_box() {
        let aabb = unit_box_at(Vec3::new(0.0, 0.0, 5.0));
        let capsule = Capsule::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0), 0.03);
        assert!(capsule_vs_aabb_overlap(&capsule, &aabb));
    }

    #[test]
    fn test_capsule_within_radius_of_center() {
        // Degenerate segment sitting beside the box, close enough to its center
        let aabb = AABB::from_center_half_extents(Vec3::ZERO, Vec3::splat(0.1));
        let capsule = Capsule::new(Vec3::new(0.3, 0.0, 0.0), Vec3::new(0.3, 0.0, 0.0), 0.35);
        assert!(capsule_vs_aabb_overlap(&capsule, &aabb));
    }

    #[test]
    fn test_capsule_grazing_edge_is_missed() {
        // The skin overlaps the top face but the core and the center test do not
        let aabb = unit_box_at(Vec3::splat(0.5));
        let capsule = Capsule::new(Vec3::new(-1.0, 1.02, 0.5), Vec3::new(2.0, 1.02, 0.5), 0.05);

        assert!(capsule.bounding_aabb().intersects(&aabb));
        assert!(!capsule_vs_aabb_overlap(&capsule, &aabb));
    }

    #[test]
    fn test_capsule_far_away() {
        let aabb = unit_box_at(Vec3::new(50.0, 0.0, 0.0));
        let capsule = Capsule::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0), 0.03);
        assert!(!capsule_vs_aabb_overlap(&capsule, &aabb));
    }
}
