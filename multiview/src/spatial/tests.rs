//! Tests for the spatial module (k-d tree).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::descriptor::LocalFrameDescriptor;

fn flatten(points: &[[f64; 3]]) -> Vec<f64> {
    points.iter().flatten().copied().collect()
}

fn brute_force_k_nearest(points: &[f64], dim: usize, query: &[f64], k: usize) -> Vec<usize> {
    let mut all: Vec<(usize, f64)> = points
        .chunks_exact(dim)
        .enumerate()
        .map(|(i, p)| (i, distance_squared(query, p)))
        .collect();
    all.sort_by(|a, b| a.1.total_cmp(&b.1));
    all.into_iter().take(k).map(|(i, _)| i).collect()
}

#[test]
fn test_kdtree_build_empty() {
    assert!(KdTree::build(&[], 3).is_none());
}

#[test]
fn test_kdtree_build_zero_dimension() {
    assert!(KdTree::build(&[1.0, 2.0], 0).is_none());
}

#[test]
#[should_panic(expected = "not a multiple")]
fn test_kdtree_build_ragged_data_panics() {
    KdTree::build(&[1.0, 2.0, 3.0, 4.0], 3);
}

#[test]
fn test_kdtree_build_multiple_points() {
    let points = flatten(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
    let tree = KdTree::build(&points, 3).unwrap();
    assert_eq!(tree.len(), 4);
    assert_eq!(tree.dim(), 3);
    assert_eq!(tree.point(2), &[0.0, 1.0, 0.0]);
}

#[test]
fn test_kdtree_k_nearest_order() {
    let points = flatten(&[
        [0.0, 0.0, 0.0],  // index 0, dist_sq = 0
        [1.0, 0.0, 0.0],  // index 1, dist_sq = 1
        [0.0, 2.0, 0.0],  // index 2, dist_sq = 4
        [0.0, 0.0, 3.0],  // index 3, dist_sq = 9
        [10.0, 0.0, 0.0], // index 4, dist_sq = 100
    ]);
    let tree = KdTree::build(&points, 3).unwrap();

    let neighbors = tree.k_nearest(&[0.0, 0.0, 0.0], 3);
    assert_eq!(neighbors.len(), 3);
    assert_eq!(neighbors[0].index, 0);
    assert_eq!(neighbors[1].index, 1);
    assert!((neighbors[1].dist_sq - 1.0).abs() < 1e-10);
    assert_eq!(neighbors[2].index, 2);
    assert!((neighbors[2].dist_sq - 4.0).abs() < 1e-10);
}

#[test]
fn test_kdtree_k_nearest_more_than_available() {
    let points = flatten(&[[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]);
    let tree = KdTree::build(&points, 3).unwrap();
    assert_eq!(tree.k_nearest(&[0.0, 0.0, 0.0], 10).len(), 2);
    assert!(tree.k_nearest(&[0.0, 0.0, 0.0], 0).is_empty());
}

#[test]
fn test_kdtree_k_nearest_matches_brute_force_6d() {
    let mut rng = StdRng::seed_from_u64(1234);
    let points: Vec<f64> = (0..300 * 6).map(|_| rng.random_range(-10.0..10.0)).collect();
    let tree = KdTree::build(&points, 6).unwrap();

    for _ in 0..50 {
        let query: Vec<f64> = (0..6).map(|_| rng.random_range(-12.0..12.0)).collect();
        let found: Vec<usize> = tree.k_nearest(&query, 5).iter().map(|n| n.index).collect();
        let expected = brute_force_k_nearest(&points, 6, &query, 5);
        assert_eq!(found, expected);
    }
}

#[test]
#[should_panic(expected = "Query dimension mismatch")]
fn test_kdtree_query_dimension_mismatch_panics() {
    let tree = KdTree::build(&[0.0, 0.0, 0.0], 3).unwrap();
    tree.k_nearest(&[0.0, 0.0], 1);
}

#[test]
fn test_kdtree_from_descriptors_distance_matches_descriptor_distance() {
    let descriptors = vec![
        LocalFrameDescriptor::from_features([1.0, 0.0, 0.0, 0.0, 1.0, 0.0]),
        LocalFrameDescriptor::from_features([0.5, 0.5, 0.0, 0.0, 0.0, 1.0]),
        LocalFrameDescriptor::from_features([3.0, 1.0, -2.0, 4.0, 0.0, 1.0]),
    ];
    let tree = KdTree::from_descriptors(&descriptors).unwrap();
    assert_eq!(tree.dim(), 6);
    assert_eq!(tree.len(), 3);

    let query = LocalFrameDescriptor::from_features([0.9, 0.1, 0.0, 0.0, 0.8, 0.1]);
    let neighbors = tree.k_nearest(&query.to_array(), 3);

    assert_eq!(neighbors[0].index, 0);
    for n in &neighbors {
        assert_eq!(n.dist_sq, descriptors[n.index].distance(&query));
    }
}

#[test]
fn test_kdtree_nan_points_are_not_neighbors() {
    let points = flatten(&[[f64::NAN, 0.0, 0.0], [1.0, 1.0, 1.0], [2.0, 2.0, 2.0]]);
    let tree = KdTree::build(&points, 3).unwrap();

    let neighbors = tree.k_nearest(&[0.0, 0.0, 0.0], 3);
    assert_eq!(neighbors.len(), 2);
    assert!(neighbors.iter().all(|n| n.index != 0));
}

#[test]
fn test_kdtree_nan_split_value_does_not_hide_finite_points() {
    // Point 1 becomes the split node of the left subtree with a NaN split value,
    // and point 0 sits below it.
    let points = [0.0, 0.0, 1.0, f64::NAN, 2.0, 2.0, 5.0, 5.0, 6.0, 6.0];
    let tree = KdTree::build(&points, 2).unwrap();

    let neighbors = tree.k_nearest(&[0.0, 0.0], 1);
    assert_eq!(neighbors.len(), 1);
    assert_eq!(neighbors[0].index, 0);
    assert_eq!(neighbors[0].dist_sq, 0.0);
}

#[test]
fn test_kdtree_k_nearest_with_nan_features_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(99);
    let points: Vec<f64> = (0..200 * 3)
        .map(|_| {
            if rng.random_bool(0.2) {
                f64::NAN
            } else {
                rng.random_range(-10.0..10.0)
            }
        })
        .collect();
    let tree = KdTree::build(&points, 3).unwrap();

    for _ in 0..50 {
        let query: Vec<f64> = (0..3).map(|_| rng.random_range(-10.0..10.0)).collect();
        let found: Vec<usize> = tree.k_nearest(&query, 4).iter().map(|n| n.index).collect();

        let mut finite: Vec<(usize, f64)> = points
            .chunks_exact(3)
            .enumerate()
            .map(|(i, p)| (i, distance_squared(&query, p)))
            .filter(|(_, d)| !d.is_nan())
            .collect();
        finite.sort_by(|a, b| a.1.total_cmp(&b.1));
        let expected: Vec<usize> = finite.into_iter().take(4).map(|(i, _)| i).collect();

        assert_eq!(found, expected);
    }
}
