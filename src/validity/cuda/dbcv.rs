//! CUDA implementation of DBCV.

use crate::validity::impl_generic::{dbcv_impl, dbcv_report_impl};
use crate::validity::traits::dbcv::{DbcvAlgorithms, DbcvOptions, DbcvReport};
use numr::error::Result;
use numr::runtime::cuda::{CudaClient, CudaRuntime};
use numr::tensor::Tensor;

impl DbcvAlgorithms<CudaRuntime> for CudaClient {
    fn dbcv(
        &self,
        data: &Tensor<CudaRuntime>,
        labels: &Tensor<CudaRuntime>,
        options: &DbcvOptions,
    ) -> Result<Tensor<CudaRuntime>> {
        dbcv_impl(self, data, labels, options)
    }

    fn dbcv_report(
        &self,
        data: &Tensor<CudaRuntime>,
        labels: &Tensor<CudaRuntime>,
        options: &DbcvOptions,
    ) -> Result<DbcvReport> {
        dbcv_report_impl(self, data, labels, options)
    }
}
