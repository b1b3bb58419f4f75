//! Spatial index over exported descriptor vectors.
//!
//! This module provides a k-d tree over points of a fixed dimension, used for
//! nearest-descriptor queries. Distances are squared Euclidean, so for
//! descriptor vectors they coincide with [`PointDescriptor::distance`].
//!
//! [`PointDescriptor::distance`]: crate::descriptor::PointDescriptor::distance

#[cfg(test)]
mod tests;

use crate::descriptor::PointDescriptor;

/// A neighbor returned by a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Index of the point in the slice the tree was built from.
    pub index: usize,
    pub dist_sq: f64,
}

/// A k-d tree over points of dimension `dim`.
///
/// Built once and queried many times:
/// - points are stored flat, `dim` values per point
/// - median split on `depth % dim`
/// - k-nearest queries
#[derive(Debug)]
pub struct KdTree {
    nodes: Vec<KdNode>,
    points: Vec<f64>,
    dim: usize,
}

#[derive(Debug, Clone)]
struct KdNode {
    /// Index into the points array
    point_idx: usize,
    left: Option<usize>,
    right: Option<usize>,
    split_dim: usize,
}

impl KdTree {
    /// Build a k-d tree from flat point data.
    ///
    /// `points.len()` must be a multiple of `dim`. Returns `None` if there are
    /// no points or `dim` is zero.
    pub fn build(points: &[f64], dim: usize) -> Option<Self> {
        if dim == 0 || points.is_empty() {
            return None;
        }
        assert!(
            points.len() % dim == 0,
            "Point data length {} is not a multiple of dimension {}",
            points.len(),
            dim
        );

        let count = points.len() / dim;
        let mut indices: Vec<usize> = (0..count).collect();
        let mut nodes = Vec::with_capacity(count);

        Self::build_recursive(points, dim, &mut indices, 0, &mut nodes);

        Some(Self {
            nodes,
            points: points.to_vec(),
            dim,
        })
    }

    /// Build a tree over the exported feature vectors of `descriptors`.
    pub fn from_descriptors<P: PointDescriptor>(descriptors: &[P]) -> Option<Self> {
        let mut points = vec![0.0; descriptors.len() * P::DIMENSIONS];
        for (d, chunk) in descriptors
            .iter()
            .zip(points.chunks_exact_mut(P::DIMENSIONS))
        {
            d.export_f64(chunk);
        }
        Self::build(&points, P::DIMENSIONS)
    }

    fn build_recursive(
        points: &[f64],
        dim: usize,
        indices: &mut [usize],
        depth: usize,
        nodes: &mut Vec<KdNode>,
    ) -> Option<usize> {
        if indices.is_empty() {
            return None;
        }

        let split_dim = depth % dim;

        // total_cmp keeps the sort well-defined when NaN features slip through
        indices.sort_by(|&a, &b| {
            points[a * dim + split_dim].total_cmp(&points[b * dim + split_dim])
        });

        let median = indices.len() / 2;
        let point_idx = indices[median];

        let node_idx = nodes.len();
        nodes.push(KdNode {
            point_idx,
            left: None,
            right: None,
            split_dim,
        });

        let (left_indices, right_part) = indices.split_at_mut(median);
        let right_indices = &mut right_part[1..];

        let left = Self::build_recursive(points, dim, left_indices, depth + 1, nodes);
        let right = Self::build_recursive(points, dim, right_indices, depth + 1, nodes);

        nodes[node_idx].left = left;
        nodes[node_idx].right = right;

        Some(node_idx)
    }

    /// Find the k nearest neighbors to `query`, sorted by distance.
    ///
    /// # Panics
    /// If `query.len()` differs from the tree dimension.
    pub fn k_nearest(&self, query: &[f64], k: usize) -> Vec<Neighbor> {
        assert_eq!(query.len(), self.dim, "Query dimension mismatch");
        if self.nodes.is_empty() || k == 0 {
            return Vec::new();
        }

        let mut heap = BoundedMaxHeap::new(k);
        self.k_nearest_recursive(0, query, &mut heap);

        let mut result = heap.into_vec();
        result.sort_by(|a, b| a.dist_sq.total_cmp(&b.dist_sq));
        result
    }

    fn k_nearest_recursive(&self, node_idx: usize, query: &[f64], heap: &mut BoundedMaxHeap) {
        let node = &self.nodes[node_idx];
        let point = self.point(node.point_idx);

        let dist_sq = distance_squared(query, point);
        // NaN distances never rank as neighbors
        if !dist_sq.is_nan() {
            heap.push(node.point_idx, dist_sq);
        }

        let diff = query[node.split_dim] - point[node.split_dim];

        let (first, second) = if diff < 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        if let Some(first_idx) = first {
            self.k_nearest_recursive(first_idx, query, heap);
        }

        // Only search the other side if it could contain closer points.
        // A NaN split value gives no bound, so both sides are searched.
        let diff_sq = diff * diff;
        if let Some(second_idx) = second
            && (!heap.is_full() || diff.is_nan() || diff_sq < heap.max_distance())
        {
            self.k_nearest_recursive(second_idx, query, heap);
        }
    }

    pub fn len(&self) -> usize {
        self.points.len() / self.dim
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Coordinates of point `idx`.
    pub fn point(&self, idx: usize) -> &[f64] {
        &self.points[idx * self.dim..(idx + 1) * self.dim]
    }
}

#[inline]
fn distance_squared(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// A bounded max-heap keeping the k smallest distances seen so far.
#[derive(Debug)]
struct BoundedMaxHeap {
    capacity: usize,
    items: Vec<Neighbor>,
}

impl BoundedMaxHeap {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::with_capacity(capacity + 1),
        }
    }

    fn push(&mut self, index: usize, dist_sq: f64) {
        if self.items.len() < self.capacity {
            self.items.push(Neighbor { index, dist_sq });
            self.sift_up(self.items.len() - 1);
        } else if dist_sq < self.items[0].dist_sq {
            // Replace the maximum (root) with new item
            self.items[0] = Neighbor { index, dist_sq };
            self.sift_down(0);
        }
    }

    fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    fn max_distance(&self) -> f64 {
        self.items.first().map_or(f64::INFINITY, |n| n.dist_sq)
    }

    fn into_vec(self) -> Vec<Neighbor> {
        self.items
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.items[idx].dist_sq > self.items[parent].dist_sq {
                self.items.swap(idx, parent);
                idx = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        loop {
            let left = 2 * idx + 1;
            let right = 2 * idx + 2;
            let mut largest = idx;

            if left < self.items.len() && self.items[left].dist_sq > self.items[largest].dist_sq {
                largest = left;
            }
            if right < self.items.len() && self.items[right].dist_sq > self.items[largest].dist_sq
            {
                largest = right;
            }

            if largest != idx {
                self.items.swap(idx, largest);
                idx = largest;
            } else {
                break;
            }
        }
    }
}
