//! WebGPU implementation of DBCV.

use crate::validity::impl_generic::{dbcv_impl, dbcv_report_impl};
use crate::validity::traits::dbcv::{DbcvAlgorithms, DbcvOptions, DbcvReport};
use numr::error::Result;
use numr::runtime::wgpu::{WgpuClient, WgpuRuntime};
use numr::tensor::Tensor;

impl DbcvAlgorithms<WgpuRuntime> for WgpuClient {
    fn dbcv(
        &self,
        data: &Tensor<WgpuRuntime>,
        labels: &Tensor<WgpuRuntime>,
        options: &DbcvOptions,
    ) -> Result<Tensor<WgpuRuntime>> {
        dbcv_impl(self, data, labels, options)
    }

    fn dbcv_report(
        &self,
        data: &Tensor<WgpuRuntime>,
        labels: &Tensor<WgpuRuntime>,
        options: &DbcvOptions,
    ) -> Result<DbcvReport> {
        dbcv_report_impl(self, data, labels, options)
    }
}
