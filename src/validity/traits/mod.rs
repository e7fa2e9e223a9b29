//! Validity measure traits.

pub mod backend;
pub mod dbcv;
pub mod silhouette;
