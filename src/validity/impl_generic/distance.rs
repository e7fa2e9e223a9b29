//! Generic pairwise squared-distance matrix.
//!
//! Computed as explicit broadcast differences rather than through a Gram
//! matrix, so coincident points give exactly zero and the result is exactly
//! symmetric. Rows are processed in stripes of `group_size` objects to bound
//! the `[rows, n, d]` intermediate.

use crate::validity::impl_generic::workspace::StageWorkspace;
use crate::validity::launch::LaunchGeometry;
use crate::validity::validation::{validate_data_2d, validate_validity_dtype};
use numr::error::Result;
use numr::ops::{ReduceOps, TensorOps};
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

/// Squared Euclidean distance matrix [n, n] of `data` [n, d].
///
/// Entries that overflow the dtype saturate to `SATURATED_DISTANCE`.
pub fn squared_distance_matrix_impl<R, C>(
    client: &C,
    data: &Tensor<R>,
    workspace: &StageWorkspace<R>,
    geometry: &LaunchGeometry,
) -> Result<Tensor<R>>
where
    R: Runtime,
    C: ReduceOps<R> + TensorOps<R> + RuntimeClient<R>,
{
    validate_validity_dtype(data.dtype(), "squared_distance_matrix")?;
    validate_data_2d(data.shape(), "squared_distance_matrix")?;
    workspace.check_objects(data.shape(), "squared_distance_matrix")?;

    let n = data.shape()[0];
    let data = data.contiguous();
    let all = data.unsqueeze(0)?; // [1, n, d]

    let mut stripes = Vec::with_capacity(geometry.n_groups);
    for (start, len) in geometry.row_tiles(n) {
        let rows = data.narrow(0, start, len)?.contiguous().unsqueeze(1)?; // [len, 1, d]
        let diff = client.sub(&rows, &all)?; // [len, n, d]
        let sq = client.mul(&diff, &diff)?;
        let dist = client.sum(&sq, &[2], false)?; // [len, n]
        stripes.push(client.minimum(&dist, &workspace.saturated_block(len)?)?);
    }

    if stripes.len() == 1 {
        return Ok(stripes.remove(0));
    }
    let refs: Vec<&Tensor<R>> = stripes.iter().collect();
    client.cat(&refs, 0)
}
