//! Density sparseness, density separation and DBCV aggregation.
//!
//! Backend-agnostic: everything here consumes the host reachability matrix
//! produced by a [`DensityBackend`].

use crate::validity::mst::ClusterTree;
use crate::validity::partition::Partition;
use crate::validity::traits::backend::{DensityBackend, MutualReachability};
use crate::validity::traits::dbcv::{ClusterValidity, DbcvReport};
use crate::validity::validation::validate_label_count;
use numr::error::Result;
use tracing::{debug, trace};

/// Density sparseness of a cluster (DSC).
///
/// Largest weight among edges joining two internal nodes (degree > 1). Trees
/// with no such edge, stars and short paths, fall back to the largest weight
/// over all edges. Trees without edges have DSC 0.
pub fn density_sparseness(tree: &ClusterTree) -> f64 {
    let internal = tree
        .edges()
        .iter()
        .filter(|e| tree.degree_of(e.from) > 1 && tree.degree_of(e.to) > 1)
        .map(|e| e.weight)
        .reduce(f64::max);

    internal
        .or_else(|| tree.edges().iter().map(|e| e.weight).reduce(f64::max))
        .unwrap_or(0.0)
}

/// Density separation of a pair of clusters (DSPC).
///
/// Smallest reachability between an internal node of `a` and an internal
/// node of `b`. Infinite if either side has no internal node.
pub fn pair_separation(mreach: &MutualReachability, a: &[usize], b: &[usize]) -> f64 {
    a.iter()
        .flat_map(|&i| b.iter().map(move |&j| mreach.get(i, j)))
        .fold(f64::INFINITY, f64::min)
}

/// DSPC of each cluster against its closest other cluster.
///
/// `internals[c]` lists the internal nodes of cluster `c`. A lone cluster has
/// separation 0.
pub fn density_separation(mreach: &MutualReachability, internals: &[Vec<usize>]) -> Vec<f64> {
    let k = internals.len();
    if k == 1 {
        return vec![0.0];
    }

    let mut dspc = vec![f64::INFINITY; k];
    for ci in 0..k {
        for cj in (ci + 1)..k {
            let sep = pair_separation(mreach, &internals[ci], &internals[cj]);
            dspc[ci] = dspc[ci].min(sep);
            dspc[cj] = dspc[cj].min(sep);
        }
    }
    dspc
}

/// Validity of one cluster in [-1, 1]; 0 when both terms are equal.
pub fn cluster_validity(dspc: f64, dsc: f64) -> f64 {
    if dspc == dsc {
        return 0.0;
    }
    let denom = dspc.max(dsc);
    (dspc - dsc) / denom
}

/// Run the full DBCV pipeline on `backend` for `labels`.
///
/// Clusters with fewer than two members are excluded before any backend
/// stage runs; clusters whose tree has no internal node are dropped from the
/// sum. Fewer than two usable clusters yields the sentinel report.
pub fn score_partition<B: DensityBackend>(backend: &mut B, labels: &[i64]) -> Result<DbcvReport> {
    let n = backend.n_objects();
    validate_label_count(labels.len(), n, "dbcv")?;

    let partition = Partition::new(labels);
    if partition.n_excluded_clusters() > 0 {
        debug!(
            excluded = partition.n_excluded_clusters(),
            "excluding single-member clusters"
        );
    }
    if partition.clusters().len() < 2 {
        debug!(
            clusters = partition.clusters().len(),
            "fewer than two clusters with two or more members"
        );
        return Ok(DbcvReport::trivial(n));
    }

    trace!(n, d = backend.n_attributes(), "computing distance matrix");
    backend.compute_distance_matrix()?;
    trace!("computing core distances");
    backend.compute_core_distances(partition.compact_labels())?;
    trace!("computing mutual reachability");
    let mreach = backend.compute_mutual_reachability()?;

    let mut kept = Vec::with_capacity(partition.clusters().len());
    for cluster in partition.clusters() {
        let tree = ClusterTree::build(mreach, &cluster.members);
        if tree.has_internal_node() {
            kept.push((cluster, tree));
        } else {
            debug!(label = cluster.label, size = cluster.len(), "dropping cluster with no internal node");
        }
    }
    if kept.len() < 2 {
        debug!(clusters = kept.len(), "fewer than two clusters with internal nodes");
        return Ok(DbcvReport::trivial(n));
    }

    let internals: Vec<Vec<usize>> = kept.iter().map(|(_, tree)| tree.internal_nodes()).collect();
    let dspc = density_separation(mreach, &internals);

    let mut index = 0.0;
    let mut clusters = Vec::with_capacity(kept.len());
    for ((cluster, tree), dspc) in kept.iter().zip(dspc) {
        let dsc = density_sparseness(tree);
        let validity = cluster_validity(dspc, dsc);
        debug!(label = cluster.label, size = cluster.len(), dsc, dspc, validity, "cluster validity");

        index += (cluster.len() as f64 / n as f64) * validity;
        clusters.push(ClusterValidity {
            label: cluster.label,
            size: cluster.len(),
            dsc,
            dspc,
            validity,
        });
    }

    Ok(DbcvReport {
        index,
        n_objects: n,
        clusters,
    })
}
