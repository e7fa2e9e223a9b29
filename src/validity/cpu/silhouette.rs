//! CPU implementation of the simplified silhouette.

use crate::validity::impl_generic::{medoid_partition_impl, simplified_silhouette_impl};
use crate::validity::traits::silhouette::SimplifiedSilhouetteAlgorithms;
use numr::error::Result;
use numr::runtime::cpu::{CpuClient, CpuRuntime};
use numr::tensor::Tensor;

impl SimplifiedSilhouetteAlgorithms<CpuRuntime> for CpuClient {
    fn simplified_silhouette(
        &self,
        data: &Tensor<CpuRuntime>,
        medoids: &Tensor<CpuRuntime>,
    ) -> Result<Tensor<CpuRuntime>> {
        simplified_silhouette_impl(self, data, medoids)
    }

    fn medoid_partition(
        &self,
        data: &Tensor<CpuRuntime>,
        medoids: &Tensor<CpuRuntime>,
    ) -> Result<Tensor<CpuRuntime>> {
        medoid_partition_impl(self, data, medoids)
    }
}
