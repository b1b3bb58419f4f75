//! Axis-aligned bounding box for real-valued 3D regions.

use glam::{DAffine3, DVec3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box with `f64` coordinates.
///
/// Uses inclusive bounds: a point `p` is inside if
/// `min <= p <= max` on every axis. A box with `min > max` on any axis is empty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb3 {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb3 {
    #[inline]
    pub const fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Box spanning `[0, size]` on each axis, e.g. the extent of an image volume.
    #[inline]
    pub fn from_size(size: DVec3) -> Self {
        Self::new(DVec3::ZERO, size)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    #[inline]
    pub fn size(&self) -> DVec3 {
        (self.max - self.min).max(DVec3::ZERO)
    }

    /// Volume of the box, zero for empty or flat boxes.
    #[inline]
    pub fn volume(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let size = self.size();
        size.x * size.y * size.z
    }

    #[inline]
    pub fn contains(&self, point: DVec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Overlap of two boxes, `None` if they are disjoint.
    pub fn intersection(&self, other: &Aabb3) -> Option<Aabb3> {
        let result = Aabb3::new(self.min.max(other.min), self.max.min(other.max));
        if result.is_empty() { None } else { Some(result) }
    }

    /// Bounding box of the eight corners after applying `transform`.
    pub fn transformed(&self, transform: &DAffine3) -> Aabb3 {
        let mut min = DVec3::splat(f64::INFINITY);
        let mut max = DVec3::splat(f64::NEG_INFINITY);
        for i in 0..8 {
            let corner = DVec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
            let p = transform.transform_point3(corner);
            min = min.min(p);
            max = max.max(p);
        }
        Aabb3::new(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_and_size() {
        let b = Aabb3::new(DVec3::new(1.0, 2.0, 3.0), DVec3::new(3.0, 5.0, 7.0));
        assert_eq!(b.size(), DVec3::new(2.0, 3.0, 4.0));
        assert!((b.volume() - 24.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_box_has_zero_volume() {
        let b = Aabb3::new(DVec3::new(1.0, 0.0, 0.0), DVec3::new(0.0, 1.0, 1.0));
        assert!(b.is_empty());
        assert_eq!(b.volume(), 0.0);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let b = Aabb3::from_size(DVec3::splat(10.0));
        assert!(b.contains(DVec3::ZERO));
        assert!(b.contains(DVec3::splat(10.0)));
        assert!(!b.contains(DVec3::new(10.1, 5.0, 5.0)));
    }

    #[test]
    fn test_intersection_overlapping() {
        let a = Aabb3::from_size(DVec3::splat(10.0));
        let b = Aabb3::new(DVec3::splat(5.0), DVec3::splat(15.0));
        let i = a.intersection(&b).unwrap();
        assert_eq!(i.min, DVec3::splat(5.0));
        assert_eq!(i.max, DVec3::splat(10.0));
        assert!((i.volume() - 125.0).abs() < 1e-12);
    }

    #[test]
    fn test_intersection_disjoint() {
        let a = Aabb3::from_size(DVec3::splat(10.0));
        let b = Aabb3::new(DVec3::new(20.0, 0.0, 0.0), DVec3::new(30.0, 10.0, 10.0));
        assert!(a.intersection(&b).is_none());
    }

    #[test]
    fn test_transformed_translation() {
        let a = Aabb3::from_size(DVec3::splat(2.0));
        let t = DAffine3::from_translation(DVec3::new(5.0, -1.0, 0.5));
        let moved = a.transformed(&t);
        assert_eq!(moved.min, DVec3::new(5.0, -1.0, 0.5));
        assert_eq!(moved.max, DVec3::new(7.0, 1.0, 2.5));
    }

    #[test]
    fn test_transformed_rotation_grows_box() {
        let a = Aabb3::new(DVec3::splat(-1.0), DVec3::splat(1.0));
        let t = DAffine3::from_rotation_z(std::f64::consts::FRAC_PI_4);
        let rotated = a.transformed(&t);
        let half_diag = 2.0_f64.sqrt();
        assert!((rotated.max.x - half_diag).abs() < 1e-12);
        assert!((rotated.min.y + half_diag).abs() < 1e-12);
        assert!((rotated.max.z - 1.0).abs() < 1e-12);
    }
}
