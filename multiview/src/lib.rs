//! Multiview - correspondence descriptors and link-graph partitioning for
//! multi-view registration of 3D point sets (e.g. microscopy tiles).
//!
//! This library provides:
//! - A translation-invariant local descriptor built from a basis point and two
//!   neighbors, compared by squared feature distance
//! - A k-d tree over exported descriptor vectors and ratio-test matching
//! - Typed weak/strong links between views
//! - Partitioning of the link graph into connected components per strength
//! - Weak links derived from stored view registrations
//!
//! # Quick Start
//!
//! ```rust
//! use multiview::{Link, LinkStrength, connected_components};
//!
//! let links = vec![
//!     Link::strong(1, 2),
//!     Link::strong(3, 2),
//!     Link::weak(7, 8),
//!     Link::weak(8, 3),
//! ];
//!
//! let groups = connected_components(&links, LinkStrength::Weak)?;
//! assert_eq!(groups.len(), 3); // {1}, {2}, {3, 7, 8}
//! # Ok::<(), multiview::PartitionError>(())
//! ```

pub mod config;
pub mod descriptor;
pub mod error;
pub mod link;
pub mod matching;
pub mod math;
pub mod partition;
pub mod spatial;
pub mod weak_links;

// ============================================================================
// Descriptors and matching
// ============================================================================

pub use descriptor::{LocalFrameDescriptor, PointDescriptor};
pub use matching::{DescriptorMatch, match_descriptors};
pub use spatial::{KdTree, Neighbor};

// ============================================================================
// Link graph
// ============================================================================

pub use link::{Link, LinkNode, LinkStrength};
pub use partition::{Component, connected_components, link_groups};
pub use weak_links::{MetadataWeakLinks, ViewId, ViewRegistrations};

// ============================================================================
// Configuration, errors and geometry
// ============================================================================

pub use config::{MatchConfig, WeakLinkConfig};
pub use error::{ConfigError, DescriptorError, PartitionError};
pub use math::Aabb3;
