//! Density-Based Clustering Validation (DBCV) trait.

use crate::validity::launch::LaunchLimits;
use numr::error::Result;
use numr::runtime::Runtime;
use numr::tensor::Tensor;

/// Index returned for partitions with fewer than two usable clusters.
pub const TRIVIAL_PARTITION_INDEX: f64 = -1.0;

/// Which implementation runs the distance, core-distance and reachability stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DbcvBackend {
    /// Tensor kernels on the client's device over a dataset uploaded once (default).
    #[default]
    Device,
    /// Single-threaded loops over a host copy of the data.
    Sequential,
}

/// Options for DBCV.
#[derive(Debug, Clone, Default)]
pub struct DbcvOptions {
    /// Stage implementation.
    pub backend: DbcvBackend,
    /// Worker-group limits for the device backend.
    pub launch: LaunchLimits,
}

/// Validity breakdown of one cluster that entered aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterValidity {
    /// Cluster id as given by the caller.
    pub label: i64,
    /// Number of members.
    pub size: usize,
    /// Density sparseness (DSC).
    pub dsc: f64,
    /// Density separation (DSPC) to the closest other cluster.
    pub dspc: f64,
    /// Per-cluster validity in [-1, 1].
    pub validity: f64,
}

/// Result of a DBCV evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct DbcvReport {
    /// Final index in [-1, 1]; [`TRIVIAL_PARTITION_INDEX`] for degenerate partitions.
    pub index: f64,
    /// Number of objects in the dataset.
    pub n_objects: usize,
    /// Clusters that contributed to the index, ordered by label.
    pub clusters: Vec<ClusterValidity>,
}

impl DbcvReport {
    /// Report for a partition with fewer than two usable clusters.
    pub fn trivial(n_objects: usize) -> Self {
        Self {
            index: TRIVIAL_PARTITION_INDEX,
            n_objects,
            clusters: Vec::new(),
        }
    }

    /// Whether the index is the degenerate-partition sentinel.
    pub fn is_trivial(&self) -> bool {
        self.clusters.len() < 2
    }
}

/// Density-based cluster validation.
pub trait DbcvAlgorithms<R: Runtime> {
    /// DBCV index (scalar) of `labels` [n] I64 over `data` [n, d].
    fn dbcv(
        &self,
        data: &Tensor<R>,
        labels: &Tensor<R>,
        options: &DbcvOptions,
    ) -> Result<Tensor<R>>;

    /// DBCV index with per-cluster sparseness, separation and validity.
    fn dbcv_report(
        &self,
        data: &Tensor<R>,
        labels: &Tensor<R>,
        options: &DbcvOptions,
    ) -> Result<DbcvReport>;
}
