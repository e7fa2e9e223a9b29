//! Single-threaded host backend.
//!
//! Dense loops over row-major host buffers. Buffers are sized once from
//! `(n, d)` and overwritten in full by every stage.

use crate::validity::traits::backend::{
    DensityBackend, DistanceMatrix, MutualReachability, PipelineStage, SquareMatrix,
    SATURATED_DISTANCE,
};
use crate::validity::validation::{validate_compact_labels, validate_host_data};
use numr::error::Result;

/// Host-memory implementation of the density stages.
#[derive(Debug, Clone)]
pub struct SequentialBackend {
    data: Vec<f64>,
    n_objects: usize,
    n_attributes: usize,
    dm: DistanceMatrix,
    core: Vec<f64>,
    mreach: MutualReachability,
    stage: PipelineStage,
}

impl SequentialBackend {
    /// Backend over `data`, a row-major `n_objects × n_attributes` buffer.
    pub fn new(data: &[f64], n_objects: usize, n_attributes: usize) -> Result<Self> {
        validate_host_data(data.len(), n_objects, n_attributes, "SequentialBackend::new")?;
        Ok(Self {
            data: data.to_vec(),
            n_objects,
            n_attributes,
            dm: SquareMatrix::zeros(n_objects),
            core: vec![0.0; n_objects],
            mreach: SquareMatrix::zeros(n_objects),
            stage: PipelineStage::Empty,
        })
    }
}

/// Squared Euclidean distance between two points, saturated at [`SATURATED_DISTANCE`].
fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    let dist: f64 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
    dist.min(SATURATED_DISTANCE)
}

/// Core distance of one object from its same-cluster distances.
///
/// `neighbour_dists` holds one entry per other member, coincident ones
/// included; only positive entries contribute to the sum, but all of them
/// count towards the average. Evaluated relative to the smallest positive
/// distance so `(1/x)^d` cannot overflow.
pub(crate) fn core_distance(neighbour_dists: &[f64], n_attributes: usize) -> f64 {
    let d = n_attributes as f64;
    let nearest = neighbour_dists
        .iter()
        .copied()
        .filter(|&x| x > 0.0)
        .fold(f64::INFINITY, f64::min);
    if !nearest.is_finite() {
        return SATURATED_DISTANCE;
    }

    let sum: f64 = neighbour_dists
        .iter()
        .filter(|&&x| x > 0.0)
        .map(|&x| (nearest / x).powf(d))
        .sum();
    let mean = sum / neighbour_dists.len() as f64;
    (nearest * mean.powf(-1.0 / d)).min(SATURATED_DISTANCE)
}

impl DensityBackend for SequentialBackend {
    fn n_objects(&self) -> usize {
        self.n_objects
    }

    fn n_attributes(&self) -> usize {
        self.n_attributes
    }

    fn compute_distance_matrix(&mut self) -> Result<&DistanceMatrix> {
        let n = self.n_objects;
        let d = self.n_attributes;
        let data = &self.data;
        let dm = &mut self.dm;
        for i in 0..n {
            dm.set(i, i, 0.0);
            let xi = &data[i * d..(i + 1) * d];
            for j in 0..i {
                let dist = squared_euclidean(xi, &data[j * d..(j + 1) * d]);
                dm.set(i, j, dist);
                dm.set(j, i, dist);
            }
        }
        self.stage = PipelineStage::Distances;
        Ok(&self.dm)
    }

    fn compute_core_distances(&mut self, labels: &[i64]) -> Result<&[f64]> {
        self.stage
            .require(PipelineStage::Distances, "compute_core_distances")?;
        validate_compact_labels(labels, self.n_objects, "compute_core_distances")?;

        let n = self.n_objects;
        let mut neighbours = Vec::with_capacity(n);
        for i in 0..n {
            if labels[i] < 0 {
                self.core[i] = SATURATED_DISTANCE;
                continue;
            }
            neighbours.clear();
            let row = self.dm.row(i);
            neighbours.extend(
                (0..n)
                    .filter(|&j| j != i && labels[j] == labels[i])
                    .map(|j| row[j]),
            );
            self.core[i] = core_distance(&neighbours, self.n_attributes);
        }

        self.stage = PipelineStage::CoreDistances;
        Ok(&self.core)
    }

    fn compute_mutual_reachability(&mut self) -> Result<&MutualReachability> {
        self.stage
            .require(PipelineStage::CoreDistances, "compute_mutual_reachability")?;

        let n = self.n_objects;
        for i in 0..n {
            self.mreach.set(i, i, 0.0);
            for j in 0..i {
                let value = self.dm.get(i, j).max(self.core[i]).max(self.core[j]);
                self.mreach.set(i, j, value);
                self.mreach.set(j, i, value);
            }
        }

        self.stage = PipelineStage::Reachability;
        Ok(&self.mreach)
    }
}
