//! Host readback helpers shared by the device paths.

use numr::dtype::DType;
use numr::error::{Error, Result};
use numr::runtime::Runtime;
use numr::tensor::Tensor;

/// Copy a float or I64 tensor to a host `Vec<f64>` in row-major order.
pub fn to_host_f64<R: Runtime>(t: &Tensor<R>, op: &'static str) -> Result<Vec<f64>> {
    let t = t.contiguous();
    match t.dtype() {
        DType::F32 => {
            let data: Vec<f32> = t.to_vec();
            Ok(data.into_iter().map(f64::from).collect())
        }
        DType::F64 => Ok(t.to_vec()),
        DType::I64 => {
            let data: Vec<i64> = t.to_vec();
            Ok(data.into_iter().map(|v| v as f64).collect())
        }
        dtype => Err(Error::UnsupportedDType { dtype, op }),
    }
}

/// Copy an I64 tensor to a host `Vec<i64>`.
pub fn to_host_i64<R: Runtime>(t: &Tensor<R>, op: &'static str) -> Result<Vec<i64>> {
    let t = t.contiguous();
    match t.dtype() {
        DType::I64 => Ok(t.to_vec()),
        dtype => Err(Error::UnsupportedDType { dtype, op }),
    }
}
