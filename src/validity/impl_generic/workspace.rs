//! Device-resident constants shared by the density stage kernels.
//!
//! Built once per dataset from `(n, dtype)`. Stage kernels slice or broadcast
//! these vectors to the shape of each worker-group stripe instead of
//! allocating fresh constants per call.

use crate::validity::traits::backend::SATURATED_DISTANCE;
use numr::dtype::DType;
use numr::error::{Error, Result};
use numr::ops::UtilityOps;
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

/// Per-object constant vectors of length `n` in the data dtype.
pub struct StageWorkspace<R: Runtime> {
    n_objects: usize,
    zeros: Tensor<R>,
    ones: Tensor<R>,
    infinite: Tensor<R>,
    saturated: Tensor<R>,
    index: Tensor<R>,
}

impl<R: Runtime> StageWorkspace<R> {
    /// Workspace for `n_objects` objects on `device`.
    pub fn new<C>(client: &C, n_objects: usize, dtype: DType, device: &R::Device) -> Result<Self>
    where
        C: UtilityOps<R> + RuntimeClient<R>,
    {
        Ok(Self {
            n_objects,
            zeros: Tensor::<R>::zeros(&[n_objects], dtype, device),
            ones: Tensor::<R>::ones(&[n_objects], dtype, device),
            infinite: Tensor::<R>::full_scalar(&[n_objects], dtype, f64::INFINITY, device),
            saturated: Tensor::<R>::full_scalar(&[n_objects], dtype, SATURATED_DISTANCE, device),
            index: client.arange(0.0, n_objects as f64, 1.0, dtype)?,
        })
    }

    /// Object indices `0..n` as floats.
    pub fn index(&self) -> &Tensor<R> {
        &self.index
    }

    pub(crate) fn zeros(&self, len: usize) -> Result<Tensor<R>> {
        head(&self.zeros, len)
    }

    pub(crate) fn ones(&self, len: usize) -> Result<Tensor<R>> {
        head(&self.ones, len)
    }

    pub(crate) fn saturated(&self, len: usize) -> Result<Tensor<R>> {
        head(&self.saturated, len)
    }

    /// `[rows, n]` block of zeros.
    pub(crate) fn zeros_block(&self, rows: usize) -> Result<Tensor<R>> {
        self.block(&self.zeros, rows)
    }

    /// `[rows, n]` block of ones.
    pub(crate) fn ones_block(&self, rows: usize) -> Result<Tensor<R>> {
        self.block(&self.ones, rows)
    }

    /// `[rows, n]` block of `+inf`.
    pub(crate) fn infinite_block(&self, rows: usize) -> Result<Tensor<R>> {
        self.block(&self.infinite, rows)
    }

    /// `[rows, n]` block of [`SATURATED_DISTANCE`].
    pub(crate) fn saturated_block(&self, rows: usize) -> Result<Tensor<R>> {
        self.block(&self.saturated, rows)
    }

    /// Error unless `shape` leads with this workspace's object count.
    pub(crate) fn check_objects(&self, shape: &[usize], op: &'static str) -> Result<()> {
        if shape.first() != Some(&self.n_objects) {
            return Err(Error::InvalidArgument {
                arg: "workspace",
                reason: format!(
                    "{op}: workspace sized for {} objects, got shape {shape:?}",
                    self.n_objects
                ),
            });
        }
        Ok(())
    }

    fn block(&self, row: &Tensor<R>, rows: usize) -> Result<Tensor<R>> {
        Ok(row
            .unsqueeze(0)?
            .broadcast_to(&[rows, self.n_objects])?
            .contiguous())
    }
}

fn head<R: Runtime>(t: &Tensor<R>, len: usize) -> Result<Tensor<R>> {
    Ok(t.narrow(0, 0, len)?.contiguous())
}
