//! Tensor backend running the density stages on a numr client.
//!
//! The dataset and a [`StageWorkspace`] of per-object constants are uploaded
//! once at construction. Each stage walks the worker-group stripes of the
//! launch geometry, produces its `[n, n]` or `[n]` device tensor and reads it
//! back into the matching host buffer; that readback is the barrier the next
//! stage depends on. Host buffers are sized at construction and overwritten in
//! full on every call.

use crate::validity::helpers::to_host_f64;
use crate::validity::impl_generic::{
    core_distances_impl, mutual_reachability_impl, squared_distance_matrix_impl, StageWorkspace,
};
use crate::validity::launch::{LaunchGeometry, LaunchLimits};
use crate::validity::traits::backend::{
    DensityBackend, DistanceMatrix, MutualReachability, PipelineStage, SquareMatrix,
};
use crate::validity::validation::{
    validate_compact_labels, validate_data_2d, validate_validity_dtype,
};
use numr::dtype::DType;
use numr::error::{Error, Result};
use numr::ops::{CompareOps, ConditionalOps, ReduceOps, ScalarOps, TensorOps, UtilityOps};
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

/// Density stages on the device of `client`.
pub struct DeviceBackend<'a, R: Runtime, C> {
    client: &'a C,
    data: Tensor<R>,
    workspace: StageWorkspace<R>,
    geometry: LaunchGeometry,
    n_objects: usize,
    n_attributes: usize,
    dtype: DType,
    // Device outputs of the last distance and core stages, inputs to the next
    dm_device: Option<Tensor<R>>,
    core_device: Option<Tensor<R>>,
    dm: DistanceMatrix,
    core: Vec<f64>,
    mreach: MutualReachability,
    stage: PipelineStage,
}

impl<'a, R, C> DeviceBackend<'a, R, C>
where
    R: Runtime,
    C: UtilityOps<R> + RuntimeClient<R>,
{
    /// Backend over `data` [n, d], with worker groups sized from `limits`.
    pub fn new(client: &'a C, data: &Tensor<R>, limits: &LaunchLimits) -> Result<Self> {
        validate_validity_dtype(data.dtype(), "DeviceBackend::new")?;
        validate_data_2d(data.shape(), "DeviceBackend::new")?;

        let n = data.shape()[0];
        let d = data.shape()[1];
        let dtype = data.dtype();
        let geometry = LaunchGeometry::for_objects(n, limits)?;
        let workspace = StageWorkspace::new(client, n, dtype, data.device())?;

        Ok(Self {
            client,
            data: data.contiguous(),
            workspace,
            geometry,
            n_objects: n,
            n_attributes: d,
            dtype,
            dm_device: None,
            core_device: None,
            dm: SquareMatrix::zeros(n),
            core: vec![0.0; n],
            mreach: SquareMatrix::zeros(n),
            stage: PipelineStage::Empty,
        })
    }

    /// Launch layout chosen for this dataset.
    pub fn geometry(&self) -> &LaunchGeometry {
        &self.geometry
    }

    fn upload_labels(&self, labels: &[i64]) -> Tensor<R> {
        let device = self.data.device();
        match self.dtype {
            DType::F32 => {
                let values: Vec<f32> = labels.iter().map(|&l| l as f32).collect();
                Tensor::<R>::from_slice(&values, &[labels.len()], device)
            }
            _ => {
                let values: Vec<f64> = labels.iter().map(|&l| l as f64).collect();
                Tensor::<R>::from_slice(&values, &[labels.len()], device)
            }
        }
    }
}

fn stage_output<'t, R: Runtime>(t: &'t Option<Tensor<R>>, op: &'static str) -> Result<&'t Tensor<R>> {
    t.as_ref().ok_or_else(|| Error::InvalidArgument {
        arg: "stage",
        reason: format!("{op}: previous stage has no device output"),
    })
}

impl<R, C> DensityBackend for DeviceBackend<'_, R, C>
where
    R: Runtime,
    C: ReduceOps<R>
        + ScalarOps<R>
        + TensorOps<R>
        + CompareOps<R>
        + ConditionalOps<R>
        + UtilityOps<R>
        + RuntimeClient<R>,
{
    fn n_objects(&self) -> usize {
        self.n_objects
    }

    fn n_attributes(&self) -> usize {
        self.n_attributes
    }

    fn compute_distance_matrix(&mut self) -> Result<&DistanceMatrix> {
        let dm = squared_distance_matrix_impl(
            self.client,
            &self.data,
            &self.workspace,
            &self.geometry,
        )?;
        let host = to_host_f64(&dm, "compute_distance_matrix")?;
        self.dm.overwrite(&host)?;
        self.dm_device = Some(dm);
        self.core_device = None;
        self.stage = PipelineStage::Distances;
        Ok(&self.dm)
    }

    fn compute_core_distances(&mut self, labels: &[i64]) -> Result<&[f64]> {
        self.stage
            .require(PipelineStage::Distances, "compute_core_distances")?;
        validate_compact_labels(labels, self.n_objects, "compute_core_distances")?;

        let labels_device = self.upload_labels(labels);
        let dm = stage_output(&self.dm_device, "compute_core_distances")?;
        let core = core_distances_impl(
            self.client,
            dm,
            &labels_device,
            self.n_attributes,
            &self.workspace,
            &self.geometry,
        )?;
        let host = to_host_f64(&core, "compute_core_distances")?;
        if host.len() != self.core.len() {
            return Err(Error::InvalidArgument {
                arg: "core",
                reason: format!(
                    "readback of {} core distances for {} objects",
                    host.len(),
                    self.n_objects
                ),
            });
        }
        self.core.copy_from_slice(&host);
        self.core_device = Some(core);

        self.stage = PipelineStage::CoreDistances;
        Ok(&self.core)
    }

    fn compute_mutual_reachability(&mut self) -> Result<&MutualReachability> {
        self.stage
            .require(PipelineStage::CoreDistances, "compute_mutual_reachability")?;

        let dm = stage_output(&self.dm_device, "compute_mutual_reachability")?;
        let core = stage_output(&self.core_device, "compute_mutual_reachability")?;
        let mreach =
            mutual_reachability_impl(self.client, dm, core, &self.workspace, &self.geometry)?;
        let host = to_host_f64(&mreach, "compute_mutual_reachability")?;
        self.mreach.overwrite(&host)?;

        self.stage = PipelineStage::Reachability;
        Ok(&self.mreach)
    }
}
