//! Local point descriptors for correspondence search between views.
//!
//! A descriptor summarizes the neighborhood of a basis point as a fixed-length
//! feature vector. Two descriptors are compared by [`PointDescriptor::distance`];
//! the outer matching framework ranks candidate pairs by that distance.
//!
//! # Variants
//!
//! Descriptor shapes form a closed set behind [`PointDescriptor`] (the trait is
//! sealed). Currently the only member is [`LocalFrameDescriptor`]: one basis
//! point, two neighbors, three dimensions, six features.
//!
//! # Matching framework hooks
//!
//! Each descriptor tells the framework how to feed it:
//! - [`PointDescriptor::resets_coordinates_after_match`]: restore the original
//!   point coordinates after a match attempt, since several neighbor orderings
//!   may be tried.
//! - [`PointDescriptor::uses_world_coordinates`]: `false` means the framework
//!   must hand over neighbors already expressed relative to the basis point.

mod local_frame;

pub use local_frame::LocalFrameDescriptor;

use crate::error::DescriptorError;

mod sealed {
    pub trait Sealed {}
}

/// Common capability of all descriptor variants.
pub trait PointDescriptor: sealed::Sealed + Sized + Send + Sync {
    /// Number of features in the exported vector.
    const DIMENSIONS: usize;

    /// Number of neighbors consumed by [`Self::build`].
    const NEIGHBORS: usize;

    /// Build from a basis point and exactly [`Self::NEIGHBORS`] neighbors.
    ///
    /// Whether the neighbors must be relative to `basis` is reported by
    /// [`Self::uses_world_coordinates`].
    fn build(basis: &[f64], neighbors: &[&[f64]]) -> Result<Self, DescriptorError>;

    /// Rebuild from a vector written by [`Self::export_f64`].
    fn from_exported(features: &[f64]) -> Result<Self, DescriptorError>;

    /// Sum of squared feature differences. Symmetric and non-negative for
    /// finite input; `NaN` means the pair is incomparable.
    fn distance(&self, other: &Self) -> f64;

    /// Write the features into `out[..DIMENSIONS]`.
    ///
    /// # Panics
    /// If `out` is shorter than `DIMENSIONS`.
    fn export_f64(&self, out: &mut [f64]);

    /// Single-precision variant of [`Self::export_f64`].
    fn export_f32(&self, out: &mut [f32]);

    fn resets_coordinates_after_match(&self) -> bool;

    fn uses_world_coordinates(&self) -> bool;

    #[inline]
    fn dimension_count(&self) -> usize {
        Self::DIMENSIONS
    }
}
