//! Cluster validity measures.
//!
//! Density-Based Clustering Validation (DBCV) scores a partition by comparing
//! the density sparseness inside each cluster with the density separation
//! between clusters, evaluated on mutual reachability distances. The density
//! stages run behind [`DensityBackend`]: [`DeviceBackend`] on any numr client
//! (CPU, CUDA, WebGPU) or [`SequentialBackend`] on host memory. Minimum
//! spanning trees and scoring always run on the host.
//!
//! The simplified silhouette is provided alongside as a medoid-based measure.

mod cpu;
mod helpers;
pub mod impl_generic;
pub mod traits;
mod validation;

pub mod device;
pub mod launch;
pub mod mst;
pub mod partition;
pub mod scoring;
pub mod sequential;

#[cfg(feature = "cuda")]
mod cuda;
#[cfg(feature = "wgpu")]
mod wgpu;

pub use device::DeviceBackend;
pub use launch::{LaunchGeometry, LaunchLimits, MAX_GROUP_SIZE, MIN_GROUP_SIZE};
pub use mst::{ClusterTree, TreeEdge};
pub use partition::{ClusterMembers, EXCLUDED, Partition};
pub use scoring::score_partition;
pub use sequential::SequentialBackend;
pub use traits::backend::{
    DensityBackend, DistanceMatrix, MutualReachability, PipelineStage, SATURATED_DISTANCE,
    SquareMatrix,
};
pub use traits::dbcv::{
    ClusterValidity, DbcvAlgorithms, DbcvBackend, DbcvOptions, DbcvReport,
    TRIVIAL_PARTITION_INDEX,
};
pub use traits::silhouette::SimplifiedSilhouetteAlgorithms;
pub use validation::*;
