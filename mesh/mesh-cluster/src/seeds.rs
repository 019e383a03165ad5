//! Farthest-point seeding with geodesic (edge path) distances.
//!
//! Each new seed runs a Dijkstra that only relaxes vertices it brings
//! closer, so once all seeds are placed the distance field and owner labels
//! are exactly those of a multi-source Dijkstra from every seed.

// Mesh indices don't overflow in practice
#![allow(clippy::cast_possible_truncation)]

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::graph::SurfaceGraph;

/// State for the priority queue in Dijkstra's algorithm.
#[derive(Debug, Clone, Copy)]
struct State {
    vertex: u32,
    distance: f64,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

/// Seeds and the Voronoi partition they induce on the edge graph.
#[derive(Debug, Clone)]
pub struct Seeding {
    /// Seed vertices, in the order they were picked.
    pub seeds: Vec<u32>,
    /// Cluster of each vertex; `None` for vertices outside every face.
    pub labels: Vec<Option<u32>>,
}

/// Pick `count` seeds by farthest-point sampling and label every vertex
/// with its geodesically nearest seed.
///
/// The first seed is the vertex farthest from the area-weighted centroid.
/// Disconnected parts are reached because their distance stays infinite
/// until one of their vertices is picked. `count` is clamped to the number
/// of referenced vertices.
#[must_use]
pub fn farthest_point_seeds(graph: &SurfaceGraph, count: usize) -> Seeding {
    let count = count.min(graph.referenced_count());
    let mut distances = vec![f64::INFINITY; graph.len()];
    let mut labels: Vec<Option<u32>> = vec![None; graph.len()];
    let mut seeds = Vec::with_capacity(count);

    let total: f64 = graph.weights.iter().sum();
    let centroid = graph
        .positions
        .iter()
        .zip(&graph.weights)
        .fold(mesh_types::Vector3::zeros(), |acc, (p, w)| acc + p.coords * *w)
        / total.max(f64::MIN_POSITIVE);

    let mut next = farthest(graph, |v| (graph.positions[v].coords - centroid).norm())
        .or_else(|| (0..graph.len()).find(|&v| graph.is_referenced(v)));
    let mut heap = BinaryHeap::new();

    while seeds.len() < count {
        let Some(seed) = next else {
            break;
        };
        let label = seeds.len() as u32;
        seeds.push(seed as u32);
        distances[seed] = 0.0;
        labels[seed] = Some(label);
        heap.push(State {
            vertex: seed as u32,
            distance: 0.0,
        });

        while let Some(State { vertex, distance }) = heap.pop() {
            if distance > distances[vertex as usize] {
                continue;
            }
            for &(neighbor, length) in &graph.neighbors[vertex as usize] {
                let candidate = distance + length;
                if candidate < distances[neighbor as usize] {
                    distances[neighbor as usize] = candidate;
                    labels[neighbor as usize] = Some(label);
                    heap.push(State {
                        vertex: neighbor,
                        distance: candidate,
                    });
                }
            }
        }

        next = farthest(graph, |v| distances[v]);
    }

    Seeding { seeds, labels }
}

/// Referenced vertex with the largest positive key, lowest index on ties.
fn farthest(graph: &SurfaceGraph, key: impl Fn(usize) -> f64) -> Option<usize> {
    (0..graph.len())
        .filter(|&v| graph.is_referenced(v))
        .map(|v| (v, key(v)))
        .filter(|&(_, k)| k > 0.0)
        .max_by(|a, b| a.1.total_cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
        .map(|(v, _)| v)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use mesh_types::{unit_cube, IndexedMesh};

    #[test]
    fn every_vertex_is_labelled() {
        let sphere = IndexedMesh::icosphere(1.0, 3);
        let graph = SurfaceGraph::new(&sphere).unwrap();
        let seeding = farthest_point_seeds(&graph, 40);

        assert_eq!(seeding.seeds.len(), 40);
        assert!(seeding.labels.iter().all(Option::is_some));
        for (i, &seed) in seeding.seeds.iter().enumerate() {
            assert_eq!(seeding.labels[seed as usize], Some(i as u32));
        }
    }

    #[test]
    fn seeds_are_distinct_and_clamped() {
        let graph = SurfaceGraph::new(&unit_cube()).unwrap();
        let seeding = farthest_point_seeds(&graph, 20);
        assert_eq!(seeding.seeds.len(), 8);
        let mut sorted = seeding.seeds.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 8);
    }

    #[test]
    fn second_seed_is_opposite_the_first() {
        let sphere = IndexedMesh::icosphere(1.0, 2);
        let graph = SurfaceGraph::new(&sphere).unwrap();
        let seeding = farthest_point_seeds(&graph, 2);
        let a = graph.positions[seeding.seeds[0] as usize];
        let b = graph.positions[seeding.seeds[1] as usize];
        assert!((a - b).norm() > 1.9);
    }

    #[test]
    fn disconnected_parts_get_seeds() {
        let mut two = IndexedMesh::icosphere(1.0, 1);
        let mut far = IndexedMesh::icosphere(1.0, 1);
        far.translate(mesh_types::Vector3::new(10.0, 0.0, 0.0));
        let offset = two.vertices.len() as u32;
        two.vertices.extend(far.vertices);
        two.faces
            .extend(far.faces.iter().map(|f| f.map(|v| v + offset)));

        let graph = SurfaceGraph::new(&two).unwrap();
        let seeding = farthest_point_seeds(&graph, 2);
        assert!(seeding.labels.iter().all(Option::is_some));
        let first = seeding.labels[0];
        let second = seeding.labels[offset as usize];
        assert_ne!(first, second);
    }
}
