//! WebGPU implementation of the simplified silhouette.

use crate::validity::impl_generic::{medoid_partition_impl, simplified_silhouette_impl};
use crate::validity::traits::silhouette::SimplifiedSilhouetteAlgorithms;
use numr::error::Result;
use numr::runtime::wgpu::{WgpuClient, WgpuRuntime};
use numr::tensor::Tensor;

impl SimplifiedSilhouetteAlgorithms<WgpuRuntime> for WgpuClient {
    fn simplified_silhouette(
        &self,
        data: &Tensor<WgpuRuntime>,
        medoids: &Tensor<WgpuRuntime>,
    ) -> Result<Tensor<WgpuRuntime>> {
        simplified_silhouette_impl(self, data, medoids)
    }

    fn medoid_partition(
        &self,
        data: &Tensor<WgpuRuntime>,
        medoids: &Tensor<WgpuRuntime>,
    ) -> Result<Tensor<WgpuRuntime>> {
        medoid_partition_impl(self, data, medoids)
    }
}
