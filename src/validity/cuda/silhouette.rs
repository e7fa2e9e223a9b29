//! CUDA implementation of the simplified silhouette.

use crate::validity::impl_generic::{medoid_partition_impl, simplified_silhouette_impl};
use crate::validity::traits::silhouette::SimplifiedSilhouetteAlgorithms;
use numr::error::Result;
use numr::runtime::cuda::{CudaClient, CudaRuntime};
use numr::tensor::Tensor;

impl SimplifiedSilhouetteAlgorithms<CudaRuntime> for CudaClient {
    fn simplified_silhouette(
        &self,
        data: &Tensor<CudaRuntime>,
        medoids: &Tensor<CudaRuntime>,
    ) -> Result<Tensor<CudaRuntime>> {
        simplified_silhouette_impl(self, data, medoids)
    }

    fn medoid_partition(
        &self,
        data: &Tensor<CudaRuntime>,
        medoids: &Tensor<CudaRuntime>,
    ) -> Result<Tensor<CudaRuntime>> {
        medoid_partition_impl(self, data, medoids)
    }
}
