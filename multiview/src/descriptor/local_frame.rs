use glam::DVec3;

use crate::error::DescriptorError;

use super::{PointDescriptor, sealed};

/// Spatial dimensionality the descriptor is defined for.
const POINT_DIM: usize = 3;

/// Translation-invariant descriptor built from a basis point and two neighbors.
///
/// The features are the coordinates of both neighbors in a frame centered on
/// the basis point: `(ax, ay, az, bx, by, bz)`. The centering is done by the
/// matching framework before construction; this type stores the neighbor
/// coordinates as given and only checks that all points are 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFrameDescriptor {
    a: DVec3,
    b: DVec3,
}

impl LocalFrameDescriptor {
    /// Build from points of arbitrary dimensionality.
    ///
    /// `neighbor1` and `neighbor2` must already be relative to `basis`.
    /// Fails with [`DescriptorError::UnsupportedDimension`] unless every point
    /// has exactly three coordinates.
    pub fn new(
        basis: &[f64],
        neighbor1: &[f64],
        neighbor2: &[f64],
    ) -> Result<Self, DescriptorError> {
        for point in [basis, neighbor1, neighbor2] {
            if point.len() != POINT_DIM {
                return Err(DescriptorError::UnsupportedDimension {
                    dimension: point.len(),
                });
            }
        }

        Ok(Self {
            a: DVec3::from_slice(neighbor1),
            b: DVec3::from_slice(neighbor2),
        })
    }

    /// Build from typed 3D points. The basis point only fixes the frame origin,
    /// which the neighbors are already relative to.
    #[inline]
    pub fn from_points(_basis: DVec3, neighbor1: DVec3, neighbor2: DVec3) -> Self {
        Self {
            a: neighbor1,
            b: neighbor2,
        }
    }

    /// Rebuild from an exported feature vector.
    #[inline]
    pub fn from_features(features: [f64; 6]) -> Self {
        Self {
            a: DVec3::new(features[0], features[1], features[2]),
            b: DVec3::new(features[3], features[4], features[5]),
        }
    }

    /// First neighbor in the local frame.
    #[inline]
    pub fn a(&self) -> DVec3 {
        self.a
    }

    /// Second neighbor in the local frame.
    #[inline]
    pub fn b(&self) -> DVec3 {
        self.b
    }

    /// Feature `d` in `(ax, ay, az, bx, by, bz)` order.
    ///
    /// # Panics
    /// If `d >= 6`.
    #[inline]
    pub fn feature(&self, d: usize) -> f64 {
        match d {
            0..3 => self.a[d],
            3..6 => self.b[d - 3],
            _ => panic!("Feature index {} out of range for 6 features", d),
        }
    }

    #[inline]
    pub fn to_array(&self) -> [f64; 6] {
        [self.a.x, self.a.y, self.a.z, self.b.x, self.b.y, self.b.z]
    }
}

impl sealed::Sealed for LocalFrameDescriptor {}

impl PointDescriptor for LocalFrameDescriptor {
    const DIMENSIONS: usize = 6;
    const NEIGHBORS: usize = 2;

    fn build(basis: &[f64], neighbors: &[&[f64]]) -> Result<Self, DescriptorError> {
        match neighbors {
            [n1, n2] => Self::new(basis, n1, n2),
            _ => Err(DescriptorError::NeighborCount {
                expected: Self::NEIGHBORS,
                actual: neighbors.len(),
            }),
        }
    }

    fn from_exported(features: &[f64]) -> Result<Self, DescriptorError> {
        let features: [f64; 6] = features
            .try_into()
            .map_err(|_| DescriptorError::FeatureCount {
                expected: Self::DIMENSIONS,
                actual: features.len(),
            })?;
        Ok(Self::from_features(features))
    }

    #[inline]
    fn distance(&self, other: &Self) -> f64 {
        // Summed in feature order so the k-d tree reproduces it bit for bit.
        self.to_array()
            .iter()
            .zip(other.to_array())
            .map(|(x, y)| (x - y) * (x - y))
            .sum()
    }

    fn export_f64(&self, out: &mut [f64]) {
        out[..Self::DIMENSIONS].copy_from_slice(&self.to_array());
    }

    fn export_f32(&self, out: &mut [f32]) {
        for (dst, src) in out[..Self::DIMENSIONS].iter_mut().zip(self.to_array()) {
            *dst = src as f32;
        }
    }

    #[inline]
    fn resets_coordinates_after_match(&self) -> bool {
        true
    }

    #[inline]
    fn uses_world_coordinates(&self) -> bool {
        false
    }
}
