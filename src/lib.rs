//! dbcv - Density-Based Clustering Validation on numr
//!
//! DBCV rates a clustering of a point set by comparing, for every cluster, the
//! sparsest region inside it with the densest region separating it from the
//! other clusters. Both are measured on mutual reachability distances derived
//! from an all-points core distance, so arbitrarily shaped clusters are scored
//! fairly. The index lies in [-1, 1]; -1 is also returned for partitions with
//! fewer than two usable clusters.
//!
//! # Architecture
//!
//! ```text
//! labels ──► Partition ──► DensityBackend ──────────────► ClusterTree ──► DbcvReport
//!            (drop <2)     distances → core → mreach       (Prim, host)    (DSC, DSPC, VC)
//!                          device or sequential
//! ```
//!
//! # Backend Support
//!
//! The tensor API is generic over numr's `Runtime` trait:
//! - CPU
//! - CUDA (feature `cuda`)
//! - WebGPU (feature `wgpu`, F32 only)
//!
//! Callers without tensors can drive [`validity::SequentialBackend`] through
//! [`validity::score_partition`] directly.
//!
//! # Example
//!
//! ```ignore
//! use dbcv::validity::{DbcvAlgorithms, DbcvOptions};
//! use numr::runtime::cpu::{CpuClient, CpuDevice};
//! use numr::tensor::Tensor;
//!
//! let device = CpuDevice::new();
//! let client = CpuClient::new(device.clone());
//!
//! let data = Tensor::from_slice(&[0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 9.0, 9.0, 10.0, 9.0, 9.0, 10.0], &[6, 2], &device);
//! let labels = Tensor::from_slice(&[0i64, 0, 0, 1, 1, 1], &[6], &device);
//!
//! let report = client.dbcv_report(&data, &labels, &DbcvOptions::default()).unwrap();
//! println!("DBCV = {}", report.index);
//! ```

pub mod validity;

pub use validity::{
    DbcvAlgorithms, DbcvBackend, DbcvOptions, DbcvReport, DensityBackend, SequentialBackend,
    SimplifiedSilhouetteAlgorithms, score_partition,
};

// Re-export numr types that users will commonly need
pub use numr::dtype::DType;
pub use numr::error::{Error, Result};
pub use numr::runtime::{Runtime, RuntimeClient};
pub use numr::tensor::Tensor;
