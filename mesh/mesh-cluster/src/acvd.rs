//! Approximated centroidal Voronoi clustering (Valette & Chassery).
//!
//! Vertices carry one third of their incident triangle area. A cluster's
//! energy is `|Σ w_i x_i|² / Σ w_i`; maximising the total energy drives
//! clusters toward compact regions of equal area. Starting from a
//! farthest-point Voronoi partition, boundary vertices move to a
//! neighbouring cluster whenever that raises the total.

// Mesh indices and counts don't overflow in practice
#![allow(clippy::cast_possible_truncation)]

use kiddo::float::kdtree::KdTree;
use kiddo::SquaredEuclidean;
use mesh_types::{IndexedMesh, Point3, PointSet, Vector3};
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::error::{ClusterError, ClusterResult};
use crate::graph::SurfaceGraph;
use crate::params::ClusterParams;
use crate::result::Clustering;
use crate::seeds::farthest_point_seeds;
use crate::shell::dual_shell;

/// Vertex lookup tree. Subdivided meshes put many vertices on one
/// coordinate plane, so buckets are larger than kiddo's default.
type VertexTree = KdTree<f64, u64, 3, 256, u32>;

/// Running sums of one cluster.
#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    sum: Vector3<f64>,
    weight: f64,
    /// Member vertices with positive weight.
    count: usize,
}

impl Accumulator {
    fn energy(&self) -> f64 {
        energy(&self.sum, self.weight)
    }
}

fn energy(sum: &Vector3<f64>, weight: f64) -> f64 {
    if weight > 0.0 {
        sum.norm_squared() / weight
    } else {
        0.0
    }
}

/// Partition the surface into `params.clusters` regions of near-equal area
/// and return one point per region.
///
/// Each representative is the area-weighted centroid of its cluster,
/// snapped to the nearest vertex of `mesh`. When the mesh has fewer
/// vertices than requested clusters, every vertex becomes a cluster.
///
/// # Errors
///
/// Returns an error if zero clusters are requested, the mesh has no
/// vertices or faces, or a face index is out of range.
///
/// # Example
///
/// ```
/// use mesh_types::IndexedMesh;
/// use mesh_cluster::{cluster_mesh, ClusterParams};
///
/// let sphere = IndexedMesh::icosphere(10.0, 4);
/// let clustering = cluster_mesh(&sphere, &ClusterParams::new(50))?;
///
/// assert_eq!(clustering.points.len(), 50);
/// for p in &clustering.points {
///     assert!((p.coords.norm() - 10.0).abs() < 1e-9);
/// }
/// # Ok::<(), mesh_cluster::ClusterError>(())
/// ```
pub fn cluster_mesh(mesh: &IndexedMesh, params: &ClusterParams) -> ClusterResult<Clustering> {
    if params.clusters == 0 {
        return Err(ClusterError::ZeroClusters);
    }
    let graph = SurfaceGraph::new(mesh)?;

    let available = graph.referenced_count();
    if params.clusters > available {
        warn!(
            requested = params.clusters,
            available, "Fewer vertices than clusters; using one cluster per vertex"
        );
    }

    let seeding = farthest_point_seeds(&graph, params.clusters);
    let mut labels = seeding.labels;
    let cluster_count = seeding.seeds.len();
    debug!(clusters = cluster_count, "Seeded clusters");

    let mut clusters = vec![Accumulator::default(); cluster_count];
    for (v, label) in labels.iter().enumerate() {
        if let Some(c) = label {
            let w = graph.weights[v];
            let acc = &mut clusters[*c as usize];
            acc.sum += graph.positions[v].coords * w;
            acc.weight += w;
            acc.count += usize::from(w > 0.0);
        }
    }

    let (sweeps, moves) = relax(&graph, &mut labels, &mut clusters, params);
    let total_energy: f64 = clusters.iter().map(Accumulator::energy).sum();

    let representatives = snap_to_vertices(&graph, &clusters, &seeding.seeds);
    let shell = dual_shell(mesh, &labels, &representatives);

    let clustering = Clustering {
        points: PointSet::from(representatives),
        shell,
        labels,
        sweeps,
        moves,
        energy: total_energy,
    };
    info!(
        clusters = clustering.cluster_count(),
        sweeps,
        moves,
        shell_faces = clustering.shell.faces.len(),
        "Clustering complete"
    );
    Ok(clustering)
}

/// Move boundary vertices between clusters while the energy increases.
///
/// Returns the number of sweeps and of moves.
fn relax(
    graph: &SurfaceGraph,
    labels: &mut [Option<u32>],
    clusters: &mut [Accumulator],
    params: &ClusterParams,
) -> (u32, usize) {
    let scale: f64 = clusters.iter().map(Accumulator::energy).sum();
    let threshold = params.tolerance * scale.abs().max(f64::MIN_POSITIVE);
    let mut total_moves = 0;
    let mut sweeps = 0;

    while sweeps < params.max_sweeps {
        sweeps += 1;
        let mut moves = 0;

        for v in 0..graph.len() {
            let Some(from) = labels[v] else {
                continue;
            };
            let w = graph.weights[v];
            let source = clusters[from as usize];
            // Never empty a cluster
            if w <= 0.0 || source.count <= 1 {
                continue;
            }

            let mut targets: SmallVec<[u32; 4]> = SmallVec::new();
            for &(n, _) in &graph.neighbors[v] {
                if let Some(to) = labels[n as usize] {
                    if to != from && !targets.contains(&to) {
                        targets.push(to);
                    }
                }
            }
            if targets.is_empty() {
                continue;
            }

            let wx = graph.positions[v].coords * w;
            let source_loss = energy(&(source.sum - wx), source.weight - w) - source.energy();

            let best = targets
                .iter()
                .map(|&to| {
                    let target = clusters[to as usize];
                    let gain = energy(&(target.sum + wx), target.weight + w) - target.energy();
                    (to, gain + source_loss)
                })
                .max_by(|a, b| a.1.total_cmp(&b.1));

            if let Some((to, delta)) = best {
                if delta > threshold {
                    let source = &mut clusters[from as usize];
                    source.sum -= wx;
                    source.weight -= w;
                    source.count -= 1;
                    let target = &mut clusters[to as usize];
                    target.sum += wx;
                    target.weight += w;
                    target.count += 1;
                    labels[v] = Some(to);
                    moves += 1;
                }
            }
        }

        debug!(sweep = sweeps, moves, "Reassignment sweep");
        total_moves += moves;
        if moves == 0 {
            break;
        }
    }

    (sweeps, total_moves)
}

/// Weighted centroid of each cluster, moved to the nearest mesh vertex.
fn snap_to_vertices(
    graph: &SurfaceGraph,
    clusters: &[Accumulator],
    seeds: &[u32],
) -> Vec<Point3<f64>> {
    let mut tree: VertexTree = VertexTree::new();
    for (i, p) in graph.positions.iter().enumerate() {
        if graph.is_referenced(i) {
            tree.add(&[p.x, p.y, p.z], i as u64);
        }
    }

    clusters
        .iter()
        .zip(seeds)
        .map(|(acc, &seed)| {
            if acc.weight <= 0.0 {
                return graph.positions[seed as usize];
            }
            let c = acc.sum / acc.weight;
            let nearest = tree.nearest_one::<SquaredEuclidean>(&[c.x, c.y, c.z]);
            graph.positions[nearest.item as usize]
        })
        .collect()
}
