//! Error types for descriptor construction, partitioning and configuration.

use thiserror::Error;

/// Errors raised while building a point descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("Local frame descriptor requires 3D points, got dimension {dimension}")]
    UnsupportedDimension { dimension: usize },

    #[error("Descriptor needs {expected} neighbors, got {actual}")]
    NeighborCount { expected: usize, actual: usize },

    #[error("Descriptor has {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },
}

/// Errors raised by the link-graph partitioner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PartitionError {
    /// A link has an absent (nil) endpoint.
    #[error("Link {index} has an absent endpoint")]
    InvalidLink { index: usize },

    /// A link of the target strength joins two different components.
    #[error("Link {index} spans two different components")]
    InconsistentLink { index: usize },
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse YAML configuration")]
    Yaml(#[from] serde_yml::Error),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
