//! Generic implementations of validity measures.

mod core_distance;
mod dbcv;
mod distance;
mod mutual_reachability;
mod silhouette;
mod workspace;

pub use core_distance::core_distances_impl;
pub use dbcv::{dbcv_impl, dbcv_report_impl};
pub use distance::squared_distance_matrix_impl;
pub use mutual_reachability::mutual_reachability_impl;
pub use silhouette::{medoid_partition_impl, simplified_silhouette_impl};
pub use workspace::StageWorkspace;
