//! Grouping of a label vector into clusters usable by DBCV.

use std::collections::BTreeMap;

/// Compact label carried by objects whose cluster has fewer than two members.
pub const EXCLUDED: i64 = -1;

/// One cluster with at least two members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterMembers {
    /// Cluster id as given by the caller.
    pub label: i64,
    /// Object indices in ascending order.
    pub members: Vec<usize>,
}

impl ClusterMembers {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// A label vector split into usable clusters and excluded objects.
#[derive(Debug, Clone)]
pub struct Partition {
    n_objects: usize,
    clusters: Vec<ClusterMembers>,
    compact: Vec<i64>,
    n_excluded_clusters: usize,
}

impl Partition {
    /// Group `labels` by id; clusters of size < 2 are excluded.
    pub fn new(labels: &[i64]) -> Self {
        let mut groups: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
        for (i, &label) in labels.iter().enumerate() {
            groups.entry(label).or_default().push(i);
        }

        let n_excluded_clusters = groups.values().filter(|m| m.len() < 2).count();
        let clusters: Vec<ClusterMembers> = groups
            .into_iter()
            .filter(|(_, members)| members.len() >= 2)
            .map(|(label, members)| ClusterMembers { label, members })
            .collect();

        let mut compact = vec![EXCLUDED; labels.len()];
        for (index, cluster) in clusters.iter().enumerate() {
            for &m in &cluster.members {
                compact[m] = index as i64;
            }
        }

        Self {
            n_objects: labels.len(),
            clusters,
            compact,
            n_excluded_clusters,
        }
    }

    pub fn n_objects(&self) -> usize {
        self.n_objects
    }

    /// Clusters with at least two members, ordered by label.
    pub fn clusters(&self) -> &[ClusterMembers] {
        &self.clusters
    }

    /// Per-object dense cluster index, or [`EXCLUDED`].
    pub fn compact_labels(&self) -> &[i64] {
        &self.compact
    }

    /// Number of clusters dropped for having a single member.
    pub fn n_excluded_clusters(&self) -> usize {
        self.n_excluded_clusters
    }
}
