//! WebGPU implementations of validity measures.

mod dbcv;
mod silhouette;
