//! Simplified silhouette trait.

use numr::error::Result;
use numr::runtime::Runtime;
use numr::tensor::Tensor;

/// Medoid-based silhouette evaluation.
pub trait SimplifiedSilhouetteAlgorithms<R: Runtime> {
    /// Simplified Silhouette Width Criterion (scalar) of `data` [n, d].
    ///
    /// `medoids` [n] is non-zero for objects acting as cluster prototypes.
    /// Every object is scored against its nearest and second-nearest medoid;
    /// fewer than two medoids yields -1.
    fn simplified_silhouette(&self, data: &Tensor<R>, medoids: &Tensor<R>) -> Result<Tensor<R>>;

    /// Assign every object of `data` [n, d] to its nearest medoid.
    ///
    /// Returns I64 labels [n] holding the object index of that medoid, ready
    /// to be scored with DBCV. Requires at least one medoid.
    fn medoid_partition(&self, data: &Tensor<R>, medoids: &Tensor<R>) -> Result<Tensor<R>>;
}
