//! Generic DBCV entry points.

use crate::validity::device::DeviceBackend;
use crate::validity::helpers::{to_host_f64, to_host_i64};
use crate::validity::scoring::score_partition;
use crate::validity::sequential::SequentialBackend;
use crate::validity::traits::dbcv::{DbcvBackend, DbcvOptions, DbcvReport};
use crate::validity::validation::{
    validate_data_2d, validate_label_count, validate_labels, validate_validity_dtype,
};
use numr::error::Result;
use numr::ops::{CompareOps, ConditionalOps, ReduceOps, ScalarOps, TensorOps, UtilityOps};
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

/// DBCV report of `labels` [n] I64 over `data` [n, d].
pub fn dbcv_report_impl<R, C>(
    client: &C,
    data: &Tensor<R>,
    labels: &Tensor<R>,
    options: &DbcvOptions,
) -> Result<DbcvReport>
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
    validate_validity_dtype(data.dtype(), "dbcv")?;
    validate_data_2d(data.shape(), "dbcv")?;
    validate_labels(labels.shape(), labels.dtype(), "dbcv")?;

    let n = data.shape()[0];
    let d = data.shape()[1];
    validate_label_count(labels.shape()[0], n, "dbcv")?;
    let host_labels = to_host_i64(labels, "dbcv")?;

    match options.backend {
        DbcvBackend::Device => {
            let mut backend = DeviceBackend::new(client, data, &options.launch)?;
            score_partition(&mut backend, &host_labels)
        }
        DbcvBackend::Sequential => {
            let host_data = to_host_f64(data, "dbcv")?;
            let mut backend = SequentialBackend::new(&host_data, n, d)?;
            score_partition(&mut backend, &host_labels)
        }
    }
}

/// DBCV index (scalar tensor in the data dtype).
pub fn dbcv_impl<R, C>(
    client: &C,
    data: &Tensor<R>,
    labels: &Tensor<R>,
    options: &DbcvOptions,
) -> Result<Tensor<R>>
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
    let report = dbcv_report_impl(client, data, labels, options)?;
    Ok(Tensor::<R>::full_scalar(
        &[],
        data.dtype(),
        report.index,
        data.device(),
    ))
}
