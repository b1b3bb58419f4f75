//! Nearest-descriptor matching with a distance ratio test.
//!
//! Reference descriptors are indexed in a [`KdTree`]; every target descriptor
//! queries its two nearest references and keeps the best one only if it is
//! clearly better than the runner-up:
//!
//! ```text
//! accept  iff  best * ratio_of_distance < second_best
//! ```
//!
//! Enumerating basis/neighbor triples and RANSAC filtering of the accepted
//! candidates belong to the caller.


use rayon::prelude::*;

use crate::config::MatchConfig;
use crate::descriptor::PointDescriptor;
use crate::spatial::KdTree;

/// An accepted correspondence between a target and a reference descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescriptorMatch {
    pub reference: usize,
    pub target: usize,
    /// Descriptor distance of the pair.
    pub distance: f64,
}

/// Match `target` descriptors against `reference` descriptors.
///
/// Returns matches ordered by target index. Needs at least two reference
/// descriptors for the ratio test; fewer yields no matches.
pub fn match_descriptors<P: PointDescriptor>(
    reference: &[P],
    target: &[P],
    config: &MatchConfig,
) -> Vec<DescriptorMatch> {
    if reference.len() < 2 || target.is_empty() {
        tracing::debug!(
            reference = reference.len(),
            target = target.len(),
            "Not enough descriptors to match"
        );
        return Vec::new();
    }

    let Some(tree) = KdTree::from_descriptors(reference) else {
        return Vec::new();
    };

    let query = |(target_idx, descriptor): (usize, &P)| {
        let mut buf = vec![0.0; P::DIMENSIONS];
        descriptor.export_f64(&mut buf);
        best_match(&tree, &buf, config).map(|(reference, distance)| DescriptorMatch {
            reference,
            target: target_idx,
            distance,
        })
    };

    let matches: Vec<DescriptorMatch> = if config.parallel {
        target.par_iter().enumerate().filter_map(query).collect()
    } else {
        target.iter().enumerate().filter_map(query).collect()
    };

    tracing::debug!(
        reference = reference.len(),
        target = target.len(),
        accepted = matches.len(),
        "Descriptor matching finished"
    );

    matches
}

/// Ratio test over the two nearest references of `query`.
fn best_match(tree: &KdTree, query: &[f64], config: &MatchConfig) -> Option<(usize, f64)> {
    let neighbors = tree.k_nearest(query, 2);
    let [best, second] = neighbors.as_slice() else {
        return None;
    };

    if !best.dist_sq.is_finite() || !second.dist_sq.is_finite() {
        return None;
    }
    if let Some(max) = config.max_distance
        && best.dist_sq > max
    {
        return None;
    }
    if best.dist_sq * config.ratio_of_distance < second.dist_sq {
        Some((best.index, best.dist_sq))
    } else {
        None
    }
}
