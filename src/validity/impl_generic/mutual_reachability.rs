//! Generic mutual reachability matrix.

use crate::validity::impl_generic::workspace::StageWorkspace;
use crate::validity::launch::LaunchGeometry;
use numr::error::Result;
use numr::ops::{CompareOps, ConditionalOps, TensorOps};
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

/// Mutual reachability [n, n]: `max(dist[i,j], core[i], core[j])`, zero diagonal.
pub fn mutual_reachability_impl<R, C>(
    client: &C,
    dists: &Tensor<R>,
    core: &Tensor<R>,
    workspace: &StageWorkspace<R>,
    geometry: &LaunchGeometry,
) -> Result<Tensor<R>>
where
    R: Runtime,
    C: TensorOps<R> + CompareOps<R> + ConditionalOps<R> + RuntimeClient<R>,
{
    workspace.check_objects(dists.shape(), "mutual_reachability")?;
    workspace.check_objects(core.shape(), "mutual_reachability")?;

    let n = dists.shape()[0];
    let core_col = core.unsqueeze(0)?; // [1, n]
    let index_col = workspace.index().unsqueeze(0)?; // [1, n]

    let mut stripes = Vec::with_capacity(geometry.n_groups);
    for (start, len) in geometry.row_tiles(n) {
        let rows = dists.narrow(0, start, len)?.contiguous(); // [len, n]
        let core_rows = core.narrow(0, start, len)?.contiguous().unsqueeze(1)?; // [len, 1]
        let mr = client.maximum(&rows, &core_rows.broadcast_to(&[len, n])?)?;
        let mr = client.maximum(&mr, &core_col.broadcast_to(&[len, n])?)?;

        // Zero diagonal
        let index_rows = workspace.index().narrow(0, start, len)?.contiguous();
        let diag = client.eq(&index_rows.unsqueeze(1)?, &index_col)?; // [len, n]
        stripes.push(client.where_cond(&diag, &workspace.zeros_block(len)?, &mr)?);
    }

    if stripes.len() == 1 {
        return Ok(stripes.remove(0));
    }
    let refs: Vec<&Tensor<R>> = stripes.iter().collect();
    client.cat(&refs, 0)
}
