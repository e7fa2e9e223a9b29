//! Generic simplified silhouette and nearest-medoid partition.

use crate::validity::helpers::to_host_f64;
use crate::validity::traits::dbcv::TRIVIAL_PARTITION_INDEX;
use crate::validity::validation::{validate_data_2d, validate_medoids, validate_validity_dtype};
use numr::error::{Error, Result};
use numr::ops::{
    CompareOps, ConditionalOps, DistanceMetric, DistanceOps, IndexingOps, ReduceOps, SortingOps,
    TensorOps,
};
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

/// Medoid object indices (as I64) from a non-zero indicator vector.
fn medoid_indices<R: Runtime>(medoids: &Tensor<R>, op: &'static str) -> Result<Vec<i64>> {
    let indicators = to_host_f64(medoids, op)?;
    Ok(indicators
        .iter()
        .enumerate()
        .filter(|(_, &v)| v != 0.0)
        .map(|(i, _)| i as i64)
        .collect())
}

/// Euclidean distances [n, k] from every object to each medoid.
fn medoid_distances<R, C>(client: &C, data: &Tensor<R>, idx: &Tensor<R>) -> Result<Tensor<R>>
where
    R: Runtime,
    C: DistanceOps<R> + IndexingOps<R> + RuntimeClient<R>,
{
    let centers = client.index_select(data, 0, idx)?; // [k, d]
    client.cdist(data, &centers, DistanceMetric::Euclidean)
}

/// Label [n] I64 of every object: the object index of its nearest medoid.
pub fn medoid_partition_impl<R, C>(
    client: &C,
    data: &Tensor<R>,
    medoids: &Tensor<R>,
) -> Result<Tensor<R>>
where
    R: Runtime,
    C: DistanceOps<R> + TensorOps<R> + IndexingOps<R> + RuntimeClient<R>,
{
    validate_validity_dtype(data.dtype(), "medoid_partition")?;
    validate_data_2d(data.shape(), "medoid_partition")?;
    let n = data.shape()[0];
    validate_medoids(medoids.shape(), n, "medoid_partition")?;

    let medoid_idx = medoid_indices(medoids, "medoid_partition")?;
    if medoid_idx.is_empty() {
        return Err(Error::InvalidArgument {
            arg: "medoids",
            reason: "medoid_partition requires at least 1 medoid".to_string(),
        });
    }

    let idx = Tensor::<R>::from_slice(&medoid_idx, &[medoid_idx.len()], data.device());
    let dists = medoid_distances(client, data, &idx)?; // [n, k]
    let nearest = client.argmin(&dists, 1, false)?; // [n] I64, position among medoids
    client.index_select(&idx, 0, &nearest)
}

/// Simplified Silhouette Width Criterion.
pub fn simplified_silhouette_impl<R, C>(
    client: &C,
    data: &Tensor<R>,
    medoids: &Tensor<R>,
) -> Result<Tensor<R>>
where
    R: Runtime,
    C: DistanceOps<R>
        + ReduceOps<R>
        + TensorOps<R>
        + CompareOps<R>
        + ConditionalOps<R>
        + IndexingOps<R>
        + SortingOps<R>
        + RuntimeClient<R>,
{
    validate_validity_dtype(data.dtype(), "simplified_silhouette")?;
    validate_data_2d(data.shape(), "simplified_silhouette")?;
    let n = data.shape()[0];
    validate_medoids(medoids.shape(), n, "simplified_silhouette")?;

    let dtype = data.dtype();
    let device = data.device();

    let medoid_idx = medoid_indices(medoids, "simplified_silhouette")?;
    let k = medoid_idx.len();
    if k < 2 {
        return Ok(Tensor::<R>::full_scalar(
            &[],
            dtype,
            TRIVIAL_PARTITION_INDEX,
            device,
        ));
    }

    // Distances to every medoid, ascending per object
    let idx = Tensor::<R>::from_slice(&medoid_idx, &[k], device);
    let dists = medoid_distances(client, data, &idx)?; // [n, k]
    let sorted = client.sort(&dists, 1, false)?;

    let a = sorted.narrow(1, 0, 1)?.contiguous().reshape(&[n])?; // nearest
    let b = sorted.narrow(1, 1, 1)?.contiguous().reshape(&[n])?; // second nearest

    // s = (b - a) / max(a, b), 0 where max(a, b) == 0
    let zeros = Tensor::<R>::zeros(&[n], dtype, device);
    let ones = Tensor::<R>::ones(&[n], dtype, device);
    let denom = client.maximum(&a, &b)?;
    let nonzero = client.gt(&denom, &zeros)?;
    let safe_denom = client.where_cond(&nonzero, &denom, &ones)?;
    let s = client.div(&client.sub(&b, &a)?, &safe_denom)?;
    let s = client.where_cond(&nonzero, &s, &zeros)?;

    client.mean(&s, &[0], false)
}
