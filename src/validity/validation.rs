//! Validation helpers for validity measures.

use numr::dtype::DType;
use numr::error::{Error, Result};

/// Validate point set dtype (must be F32 or F64).
pub fn validate_validity_dtype(dtype: DType, op: &'static str) -> Result<()> {
    match dtype {
        DType::F32 | DType::F64 => Ok(()),
        _ => Err(Error::UnsupportedDType { dtype, op }),
    }
}

/// Validate that data is 2D [n, d] with at least one point and one attribute.
pub fn validate_data_2d(shape: &[usize], op: &'static str) -> Result<()> {
    if shape.len() != 2 {
        return Err(Error::InvalidArgument {
            arg: "data",
            reason: format!("{op} requires 2D data [n, d], got {}-D", shape.len()),
        });
    }
    validate_dimensions(shape[0], shape[1], op)
}

/// Validate explicit `(n_objects, n_attributes)` dimensions.
pub fn validate_dimensions(n_objects: usize, n_attributes: usize, op: &'static str) -> Result<()> {
    if n_objects == 0 {
        return Err(Error::InvalidArgument {
            arg: "data",
            reason: format!("{op} requires at least 1 data point"),
        });
    }
    if n_attributes == 0 {
        return Err(Error::InvalidArgument {
            arg: "data",
            reason: format!("{op} requires at least 1 attribute"),
        });
    }
    Ok(())
}

/// Validate a row-major host buffer against its declared dimensions.
pub fn validate_host_data(
    len: usize,
    n_objects: usize,
    n_attributes: usize,
    op: &'static str,
) -> Result<()> {
    validate_dimensions(n_objects, n_attributes, op)?;
    if len != n_objects * n_attributes {
        return Err(Error::InvalidArgument {
            arg: "data",
            reason: format!(
                "{op}: buffer holds {len} values, expected {n_objects} x {n_attributes}"
            ),
        });
    }
    Ok(())
}

/// Validate labels tensor is 1D I64.
pub fn validate_labels(shape: &[usize], dtype: DType, op: &'static str) -> Result<()> {
    if shape.len() != 1 {
        return Err(Error::InvalidArgument {
            arg: "labels",
            reason: format!("{op} requires 1D labels, got {}-D", shape.len()),
        });
    }
    if dtype != DType::I64 {
        return Err(Error::InvalidArgument {
            arg: "labels",
            reason: format!("{op} requires I64 labels, got {dtype:?}"),
        });
    }
    Ok(())
}

/// Validate that there is exactly one label per object.
pub fn validate_label_count(n_labels: usize, n_objects: usize, op: &'static str) -> Result<()> {
    if n_labels != n_objects {
        return Err(Error::InvalidArgument {
            arg: "labels",
            reason: format!("{op}: got {n_labels} labels for {n_objects} objects"),
        });
    }
    Ok(())
}

/// Validate compact labels handed to a core-distance stage.
///
/// Every non-negative label must be below `n_objects` and shared by at least
/// two objects; negative entries mark excluded objects.
pub fn validate_compact_labels(labels: &[i64], n_objects: usize, op: &'static str) -> Result<()> {
    validate_label_count(labels.len(), n_objects, op)?;

    if let Some(&label) = labels.iter().find(|&&l| l >= n_objects as i64) {
        return Err(Error::InvalidArgument {
            arg: "labels",
            reason: format!("{op}: compact label {label} out of range for {n_objects} objects"),
        });
    }

    let mut sizes = vec![0usize; n_objects];
    for &label in labels.iter().filter(|&&l| l >= 0) {
        sizes[label as usize] += 1;
    }
    if let Some(cluster) = sizes.iter().position(|&s| s == 1) {
        return Err(Error::InvalidArgument {
            arg: "labels",
            reason: format!(
                "{op}: cluster {cluster} has a single member; singleton clusters must be excluded"
            ),
        });
    }
    Ok(())
}

/// Validate medoid indicator tensor is 1D with one entry per object.
pub fn validate_medoids(shape: &[usize], n_objects: usize, op: &'static str) -> Result<()> {
    if shape.len() != 1 {
        return Err(Error::InvalidArgument {
            arg: "medoids",
            reason: format!("{op} requires 1D medoid indicators, got {}-D", shape.len()),
        });
    }
    if shape[0] != n_objects {
        return Err(Error::InvalidArgument {
            arg: "medoids",
            reason: format!("{op}: got {} indicators for {n_objects} objects", shape[0]),
        });
    }
    Ok(())
}
