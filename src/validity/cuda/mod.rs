//! CUDA implementations of validity measures.

mod dbcv;
mod silhouette;
