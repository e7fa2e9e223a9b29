//! Density backend contract and the host-side matrices it produces.

use numr::error::{Error, Result};

/// Finite stand-in for an infinite core distance.
///
/// `f32::MAX` is representable in both F32 and F64 device buffers, so both
/// backends saturate to the same value.
pub const SATURATED_DISTANCE: f64 = f32::MAX as f64;

/// Dense row-major `n × n` matrix in host memory.
#[derive(Debug, Clone, PartialEq)]
pub struct SquareMatrix {
    n: usize,
    values: Vec<f64>,
}

/// Squared Euclidean distances between every pair of objects.
pub type DistanceMatrix = SquareMatrix;

/// Mutual reachability distances between every pair of objects.
pub type MutualReachability = SquareMatrix;

impl SquareMatrix {
    /// Zero-filled matrix of order `n`.
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            values: vec![0.0; n * n],
        }
    }

    /// Matrix order.
    pub fn n(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.n + j]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.values[i * self.n + j] = value;
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.n..(i + 1) * self.n]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Overwrite every entry from `values`, which must hold `n * n` entries.
    pub(crate) fn overwrite(&mut self, values: &[f64]) -> Result<()> {
        if values.len() != self.values.len() {
            return Err(Error::InvalidArgument {
                arg: "values",
                reason: format!(
                    "readback of {} values does not fit a {n}x{n} buffer",
                    values.len(),
                    n = self.n
                ),
            });
        }
        self.values.copy_from_slice(values);
        Ok(())
    }

    /// Whether `m[i][j] == m[j][i]` for every pair, within `tol`.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        (0..self.n).all(|i| (0..i).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= tol))
    }

    /// Whether every diagonal entry is exactly zero.
    pub fn has_zero_diagonal(&self) -> bool {
        (0..self.n).all(|i| self.get(i, i) == 0.0)
    }
}

/// Last pipeline stage whose host buffer is current.
///
/// Recomputing a stage invalidates every later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum PipelineStage {
    #[default]
    Empty,
    Distances,
    CoreDistances,
    Reachability,
}

impl PipelineStage {
    /// Error unless `self` has reached `required`.
    pub fn require(self, required: PipelineStage, op: &'static str) -> Result<()> {
        if self < required {
            return Err(Error::InvalidArgument {
                arg: "stage",
                reason: format!("{op} requires {required:?} to be computed first (current: {self:?})"),
            });
        }
        Ok(())
    }
}

/// The three density stages every backend must supply.
///
/// Outputs are host buffers owned by the backend; each call overwrites its
/// buffer completely. Stages must run in order within one invocation:
/// distances, then core distances, then mutual reachability.
pub trait DensityBackend {
    /// Number of objects the backend was sized for.
    fn n_objects(&self) -> usize;

    /// Number of attributes per object.
    fn n_attributes(&self) -> usize;

    /// Pairwise squared Euclidean distances.
    fn compute_distance_matrix(&mut self) -> Result<&DistanceMatrix>;

    /// Per-object core distances for compact `labels`.
    ///
    /// Labels are dense cluster indices; `-1` marks an excluded object, which
    /// receives [`SATURATED_DISTANCE`]. No non-negative label may occur once.
    fn compute_core_distances(&mut self, labels: &[i64]) -> Result<&[f64]>;

    /// Mutual reachability matrix from the current distances and core distances.
    fn compute_mutual_reachability(&mut self) -> Result<&MutualReachability>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_matrix_access() {
        let mut m = SquareMatrix::zeros(3);
        m.set(0, 2, 4.0);
        m.set(2, 0, 4.0);
        assert_eq!(m.get(0, 2), 4.0);
        assert_eq!(m.row(2), &[4.0, 0.0, 0.0]);
        assert!(m.is_symmetric(0.0));
        assert!(m.has_zero_diagonal());

        m.set(1, 1, 1.0);
        assert!(!m.has_zero_diagonal());
    }

    #[test]
    fn test_square_matrix_overwrite_rejects_wrong_len() {
        let mut m = SquareMatrix::zeros(2);
        assert!(m.overwrite(&[1.0; 3]).is_err());
        assert!(m.overwrite(&[0.0, 2.0, 2.0, 0.0]).is_ok());
        assert_eq!(m.get(1, 0), 2.0);
    }

    #[test]
    fn test_stage_ordering() {
        assert!(PipelineStage::Distances.require(PipelineStage::Distances, "t").is_ok());
        assert!(PipelineStage::Reachability.require(PipelineStage::CoreDistances, "t").is_ok());
        assert!(PipelineStage::Empty.require(PipelineStage::Distances, "t").is_err());
        assert!(PipelineStage::Distances.require(PipelineStage::CoreDistances, "t").is_err());
    }
}
