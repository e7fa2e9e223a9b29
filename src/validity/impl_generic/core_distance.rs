//! Generic per-object core distances.

use crate::validity::impl_generic::workspace::StageWorkspace;
use crate::validity::launch::LaunchGeometry;
use numr::error::{Error, Result};
use numr::ops::{CompareOps, ConditionalOps, ReduceOps, ScalarOps, TensorOps};
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

/// Core distance of every object from `dists` [n, n] and compact `labels` [n].
///
/// `labels` holds dense cluster indices in the distance dtype, negative for
/// excluded objects. For object i with same-cluster neighbours N(i):
///
/// ```text
/// core(i) = ( Σ_{j∈N(i), dist>0} (1/dist(i,j))^d / |N(i)| )^(-1/d)
/// ```
///
/// evaluated relative to the nearest positive neighbour distance. Objects with
/// no positive neighbour distance, and excluded objects, saturate to
/// `SATURATED_DISTANCE`. Rows are processed one worker-group stripe at a time.
pub fn core_distances_impl<R, C>(
    client: &C,
    dists: &Tensor<R>,
    labels: &Tensor<R>,
    n_attributes: usize,
    workspace: &StageWorkspace<R>,
    geometry: &LaunchGeometry,
) -> Result<Tensor<R>>
where
    R: Runtime,
    C: ReduceOps<R>
        + ScalarOps<R>
        + TensorOps<R>
        + CompareOps<R>
        + ConditionalOps<R>
        + RuntimeClient<R>,
{
    if n_attributes == 0 {
        return Err(Error::InvalidArgument {
            arg: "n_attributes",
            reason: "core_distances requires at least 1 attribute".to_string(),
        });
    }
    workspace.check_objects(dists.shape(), "core_distances")?;
    workspace.check_objects(labels.shape(), "core_distances")?;

    let n = dists.shape()[0];
    let d = n_attributes as f64;
    let labels_col = labels.unsqueeze(0)?; // [1, n]

    let mut stripes = Vec::with_capacity(geometry.n_groups);
    for (start, len) in geometry.row_tiles(n) {
        let rows = dists.narrow(0, start, len)?.contiguous(); // [len, n]
        let row_labels = labels.narrow(0, start, len)?.contiguous(); // [len]
        let zeros = workspace.zeros(len)?;
        let ones = workspace.ones(len)?;
        let saturated = workspace.saturated(len)?;

        // same[i,j] = labels[i] == labels[j] and labels[i] is not excluded
        let same = client.eq(&row_labels.unsqueeze(1)?, &labels_col)?; // [len, n] 0/1
        let included = client.ge(&row_labels, &zeros)?; // [len] 0/1
        let included_rows = included.unsqueeze(1)?.broadcast_to(&[len, n])?;
        let same = client.mul(&same, &included_rows)?;

        // |N(i)|: same-cluster count minus self
        let n_neighbours = client.sub_scalar(&client.sum(&same, &[1], false)?, 1.0)?; // [len]

        // Contributing neighbours: same cluster, positive distance (drops self and duplicates)
        let positive = client.gt(&rows, &workspace.zeros_block(len)?)?;
        let contributes = client.mul(&same, &positive)?; // [len, n] 0/1

        // Nearest positive neighbour distance m(i) [len, 1]
        let masked = client.where_cond(&contributes, &rows, &workspace.infinite_block(len)?)?;
        let nearest = client.min(&masked, &[1], true)?;

        // Σ (m / dist)^d over contributing neighbours
        let safe_rows = client.where_cond(&contributes, &rows, &workspace.ones_block(len)?)?;
        let ratio = client.div(&nearest.broadcast_to(&[len, n])?, &safe_rows)?;
        let terms = client.pow_scalar(&ratio, d)?;
        let terms = client.where_cond(&contributes, &terms, &workspace.zeros_block(len)?)?;
        let sum = client.sum(&terms, &[1], false)?; // [len]

        // core = m * (sum / |N|)^(-1/d)
        let divisor = client.maximum(&n_neighbours, &ones)?;
        let mean = client.div(&sum, &divisor)?;
        let has_density = client.gt(&sum, &zeros)?;
        let safe_mean = client.where_cond(&has_density, &mean, &ones)?;
        let scale = client.pow_scalar(&safe_mean, -1.0 / d)?;
        let nearest = nearest.reshape(&[len])?;
        let safe_nearest = client.where_cond(&has_density, &nearest, &ones)?;
        let core = client.mul(&safe_nearest, &scale)?;
        let core = client.minimum(&core, &saturated)?;

        // Excluded objects and objects whose neighbours all coincide saturate
        let valid = client.mul(&has_density, &included)?;
        stripes.push(client.where_cond(&valid, &core, &saturated)?);
    }

    if stripes.len() == 1 {
        return Ok(stripes.remove(0));
    }
    let refs: Vec<&Tensor<R>> = stripes.iter().collect();
    client.cat(&refs, 0)
}
