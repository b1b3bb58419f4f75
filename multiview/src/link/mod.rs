//! Typed edges between nodes of the correspondence graph.
//!
//! A [`Link`] connects two nodes (typically views) and records how much the
//! correspondence is trusted: [`LinkStrength::Strong`] for accepted matches,
//! [`LinkStrength::Weak`] for tentative ones such as metadata overlaps.
//! Links optionally carry the overlap region and a transform estimate.

#[cfg(test)]
mod tests;

use std::fmt;
use std::hash::Hash;

use glam::DAffine3;
use serde::{Deserialize, Serialize};

use crate::math::Aabb3;

/// Confidence classification of a link.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumIter,
)]
pub enum LinkStrength {
    Weak,
    Strong,
}

/// Node identity usable as a link endpoint.
///
/// `is_nil` marks an absent endpoint; the partitioner rejects such links.
pub trait LinkNode: Eq + Hash + Clone + fmt::Debug {
    #[inline]
    fn is_nil(&self) -> bool {
        false
    }
}

macro_rules! impl_link_node {
    ($($t:ty),*) => {
        $(impl LinkNode for $t {})*
    };
}

impl_link_node!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl LinkNode for String {
    #[inline]
    fn is_nil(&self) -> bool {
        self.is_empty()
    }
}

impl LinkNode for &str {
    #[inline]
    fn is_nil(&self) -> bool {
        self.is_empty()
    }
}

impl<T: LinkNode> LinkNode for Option<T> {
    #[inline]
    fn is_nil(&self) -> bool {
        self.as_ref().is_none_or(LinkNode::is_nil)
    }
}

/// Immutable edge between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Link<T> {
    first: T,
    second: T,
    strength: LinkStrength,
    bounding_box: Option<Aabb3>,
    transform: Option<DAffine3>,
}

impl<T> Link<T> {
    /// Link of the given strength without geometry attached.
    pub fn new(first: T, second: T, strength: LinkStrength) -> Self {
        Self {
            first,
            second,
            strength,
            bounding_box: None,
            transform: None,
        }
    }

    /// Link backed by point correspondences.
    pub fn strong(first: T, second: T) -> Self {
        Self::new(first, second, LinkStrength::Strong)
    }

    /// Link backed by metadata only.
    pub fn weak(first: T, second: T) -> Self {
        Self::new(first, second, LinkStrength::Weak)
    }

    /// Attach the region the link applies to.
    pub fn with_bounding_box(mut self, bounding_box: Aabb3) -> Self {
        self.bounding_box = Some(bounding_box);
        self
    }

    /// Attach the transform mapping `second` coordinates into `first`.
    pub fn with_transform(mut self, transform: DAffine3) -> Self {
        self.transform = Some(transform);
        self
    }

    #[inline]
    pub fn first(&self) -> &T {
        &self.first
    }

    #[inline]
    pub fn second(&self) -> &T {
        &self.second
    }

    #[inline]
    pub fn endpoints(&self) -> (&T, &T) {
        (&self.first, &self.second)
    }

    #[inline]
    pub fn strength(&self) -> LinkStrength {
        self.strength
    }

    #[inline]
    pub fn bounding_box(&self) -> Option<&Aabb3> {
        self.bounding_box.as_ref()
    }

    /// Transform estimate mapping `second` coordinates into `first`.
    #[inline]
    pub fn transform(&self) -> Option<&DAffine3> {
        self.transform.as_ref()
    }
}

impl<T: PartialEq> Link<T> {
    #[inline]
    pub fn touches(&self, node: &T) -> bool {
        self.first == *node || self.second == *node
    }
}

impl<T: fmt::Display> fmt::Display for Link<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}
