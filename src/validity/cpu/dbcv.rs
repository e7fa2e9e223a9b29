//! CPU implementation of DBCV.

use crate::validity::impl_generic::{dbcv_impl, dbcv_report_impl};
use crate::validity::traits::dbcv::{DbcvAlgorithms, DbcvOptions, DbcvReport};
use numr::error::Result;
use numr::runtime::cpu::{CpuClient, CpuRuntime};
use numr::tensor::Tensor;

impl DbcvAlgorithms<CpuRuntime> for CpuClient {
    fn dbcv(
        &self,
        data: &Tensor<CpuRuntime>,
        labels: &Tensor<CpuRuntime>,
        options: &DbcvOptions,
    ) -> Result<Tensor<CpuRuntime>> {
        dbcv_impl(self, data, labels, options)
    }

    fn dbcv_report(
        &self,
        data: &Tensor<CpuRuntime>,
        labels: &Tensor<CpuRuntime>,
        options: &DbcvOptions,
    ) -> Result<DbcvReport> {
        dbcv_report_impl(self, data, labels, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validity::device::DeviceBackend;
    use crate::validity::launch::LaunchLimits;
    use crate::validity::scoring::score_partition;
    use crate::validity::sequential::SequentialBackend;
    use crate::validity::traits::backend::{DensityBackend, SATURATED_DISTANCE};
    use crate::validity::traits::dbcv::DbcvBackend;
    use numr::runtime::cpu::CpuDevice;

    fn setup() -> (CpuClient, CpuDevice) {
        let device = CpuDevice::new();
        let client = CpuClient::new(device.clone());
        (client, device)
    }

    #[rustfmt::skip]
    const TWO_TRIANGLES: [f64; 12] = [
        0.0, 0.0,
        1.0, 0.0,
        0.0, 1.0,
        10.0, 10.0,
        11.0, 10.0,
        10.0, 11.0,
    ];

    #[rustfmt::skip]
    const BLOBS: [f64; 24] = [
        0.0, 0.0,
        0.4, 0.1,
        0.1, 0.5,
        0.6, 0.6,
        0.3, 0.2,
        5.0, 5.0,
        5.3, 5.4,
        4.8, 5.5,
        5.6, 4.9,
        9.0, 0.0,
        9.5, 0.3,
        9.2, 0.8,
    ];
    const BLOB_LABELS: [i64; 12] = [0, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2];

    fn sequential() -> DbcvOptions {
        DbcvOptions {
            backend: DbcvBackend::Sequential,
            ..Default::default()
        }
    }

    #[test]
    fn test_dbcv_two_triangles() {
        let (client, device) = setup();
        let data = Tensor::<CpuRuntime>::from_slice(&TWO_TRIANGLES, &[6, 2], &device);
        let labels = Tensor::<CpuRuntime>::from_slice(&[0i64, 0, 0, 1, 1, 1], &[6], &device);

        let score = client
            .dbcv(&data, &labels, &DbcvOptions::default())
            .unwrap();
        assert_eq!(score.shape(), &[] as &[usize]);
        let val: f64 = score.item().unwrap();
        let c = 0.625f64.powf(-0.5);
        assert!(
            (val - (200.0 - c) / 200.0).abs() < 1e-9,
            "Expected DBCV close to 1, got {}",
            val
        );
    }

    #[test]
    fn test_dbcv_label_permutation_invariant() {
        let (client, device) = setup();
        let data = Tensor::<CpuRuntime>::from_slice(&TWO_TRIANGLES, &[6, 2], &device);
        let a = Tensor::<CpuRuntime>::from_slice(&[0i64, 0, 0, 1, 1, 1], &[6], &device);
        let b = Tensor::<CpuRuntime>::from_slice(&[7i64, 7, 7, -3, -3, -3], &[6], &device);

        let opts = DbcvOptions::default();
        let va: f64 = client.dbcv(&data, &a, &opts).unwrap().item().unwrap();
        let vb: f64 = client.dbcv(&data, &b, &opts).unwrap().item().unwrap();
        assert!((va - vb).abs() < 1e-12);
    }

    #[test]
    fn test_sequential_matches_device() {
        let (client, device) = setup();
        let data = Tensor::<CpuRuntime>::from_slice(&BLOBS, &[12, 2], &device);
        let labels = Tensor::<CpuRuntime>::from_slice(&BLOB_LABELS, &[12], &device);

        let on_device = client
            .dbcv_report(&data, &labels, &DbcvOptions::default())
            .unwrap();
        let on_host = client.dbcv_report(&data, &labels, &sequential()).unwrap();

        assert_eq!(on_device.clusters.len(), 3);
        assert_eq!(on_host.clusters.len(), 3);
        assert!((on_device.index - on_host.index).abs() < 1e-4);
        for (d, h) in on_device.clusters.iter().zip(&on_host.clusters) {
            assert_eq!(d.label, h.label);
            assert!((d.dsc - h.dsc).abs() < 1e-4);
            assert!((d.dspc - h.dspc).abs() < 1e-4);
        }
        assert!(on_device.index > 0.0 && on_device.index <= 1.0);
    }

    #[test]
    fn test_device_matrices_symmetric() {
        let (client, device) = setup();
        let data = Tensor::<CpuRuntime>::from_slice(&BLOBS, &[12, 2], &device);
        let mut backend = DeviceBackend::new(&client, &data, &LaunchLimits::default()).unwrap();

        let dm = backend.compute_distance_matrix().unwrap();
        assert!(dm.is_symmetric(0.0));
        assert!(dm.has_zero_diagonal());
        assert!(dm.as_slice().iter().all(|&v| v >= 0.0));

        let compact = [0i64, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2];
        backend.compute_core_distances(&compact).unwrap();
        let mr = backend.compute_mutual_reachability().unwrap();
        assert!(mr.is_symmetric(0.0));
        assert!(mr.has_zero_diagonal());
    }

    #[test]
    fn test_device_stages_match_sequential() {
        let (client, device) = setup();
        let data = Tensor::<CpuRuntime>::from_slice(&BLOBS, &[12, 2], &device);
        let compact = [0i64, 0, 0, 0, 0, 1, 1, -1, 1, 2, 2, 2];

        let mut dev = DeviceBackend::new(&client, &data, &LaunchLimits::default()).unwrap();
        let mut seq = SequentialBackend::new(&BLOBS, 12, 2).unwrap();

        let dm_dev = dev.compute_distance_matrix().unwrap().clone();
        let dm_seq = seq.compute_distance_matrix().unwrap().clone();
        for (a, b) in dm_dev.as_slice().iter().zip(dm_seq.as_slice()) {
            assert!((a - b).abs() < 1e-9);
        }

        let core_dev = dev.compute_core_distances(&compact).unwrap().to_vec();
        let core_seq = seq.compute_core_distances(&compact).unwrap().to_vec();
        assert_eq!(core_dev[7], SATURATED_DISTANCE);
        for (a, b) in core_dev.iter().zip(&core_seq) {
            assert!((a - b).abs() <= 1e-9 * b.abs().max(1.0), "{} vs {}", a, b);
        }

        let mr_dev = dev.compute_mutual_reachability().unwrap().clone();
        let mr_seq = seq.compute_mutual_reachability().unwrap().clone();
        for (a, b) in mr_dev.as_slice().iter().zip(mr_seq.as_slice()) {
            assert!((a - b).abs() <= 1e-9 * b.abs().max(1.0));
        }
    }

    #[test]
    fn test_device_idempotent_on_same_instance() {
        let (client, device) = setup();
        let data = Tensor::<CpuRuntime>::from_slice(&BLOBS, &[12, 2], &device);
        let mut backend = DeviceBackend::new(&client, &data, &LaunchLimits::default()).unwrap();

        let first = score_partition(&mut backend, &BLOB_LABELS).unwrap();
        let shuffled = [0i64, 1, 2, 0, 1, 2, 0, 1, 2, 0, 1, 2];
        let other = score_partition(&mut backend, &shuffled).unwrap();
        let second = score_partition(&mut backend, &BLOB_LABELS).unwrap();

        assert_eq!(first, second);
        assert!(other.index < first.index);
    }

    #[test]
    fn test_single_label_sentinel() {
        let (client, device) = setup();
        let data = Tensor::<CpuRuntime>::from_slice(&TWO_TRIANGLES, &[6, 2], &device);
        let labels = Tensor::<CpuRuntime>::from_slice(&[1i64; 6], &[6], &device);

        let report = client
            .dbcv_report(&data, &labels, &DbcvOptions::default())
            .unwrap();
        assert_eq!(report.index, -1.0);
        assert!(report.clusters.is_empty());
    }

    #[test]
    fn test_one_valid_cluster_sentinel() {
        let (client, device) = setup();
        let data = Tensor::<CpuRuntime>::from_slice(&TWO_TRIANGLES, &[6, 2], &device);
        let labels = Tensor::<CpuRuntime>::from_slice(&[0i64, 0, 0, 0, 0, 1], &[6], &device);

        let val: f64 = client
            .dbcv(&data, &labels, &DbcvOptions::default())
            .unwrap()
            .item()
            .unwrap();
        assert_eq!(val, -1.0);
    }

    #[test]
    fn test_singleton_cluster_excluded() {
        let (client, device) = setup();
        #[rustfmt::skip]
        let data = Tensor::<CpuRuntime>::from_slice(
            &[
                0.0, 0.0,
                1.0, 0.0,
                0.0, 1.0,
                10.0, 10.0,
                11.0, 10.0,
                10.0, 11.0,
                50.0, 50.0,
            ],
            &[7, 2],
            &device,
        );
        let labels =
            Tensor::<CpuRuntime>::from_slice(&[0i64, 0, 0, 1, 1, 1, 2], &[7], &device);

        let report = client
            .dbcv_report(&data, &labels, &DbcvOptions::default())
            .unwrap();
        assert_eq!(report.clusters.len(), 2);
        let c = 0.625f64.powf(-0.5);
        let expected = (200.0 - c) / 200.0 * 6.0 / 7.0;
        assert!((report.index - expected).abs() < 1e-9);
    }

    #[test]
    fn test_coincident_points_saturate() {
        let (client, device) = setup();
        #[rustfmt::skip]
        let data = Tensor::<CpuRuntime>::from_slice(
            &[
                0.0, 0.0,
                0.0, 0.0,
                0.0, 0.0,
                5.0, 5.0,
                6.0, 5.0,
                5.0, 6.0,
            ],
            &[6, 2],
            &device,
        );
        let mut backend = DeviceBackend::new(&client, &data, &LaunchLimits::default()).unwrap();
        backend.compute_distance_matrix().unwrap();
        let core = backend.compute_core_distances(&[0, 0, 0, 1, 1, 1]).unwrap();
        assert!(core[..3].iter().all(|&v| v == SATURATED_DISTANCE));
        assert!(core[3..].iter().all(|v| v.is_finite() && *v < 10.0));

        let labels = Tensor::<CpuRuntime>::from_slice(&[0i64, 0, 0, 1, 1, 1], &[6], &device);
        let report = client
            .dbcv_report(&data, &labels, &DbcvOptions::default())
            .unwrap();
        assert!(report.index.is_finite());
        assert!((-1.0..=1.0).contains(&report.index));
    }

    #[test]
    fn test_clamped_launch_geometry() {
        let (client, device) = setup();
        let data = Tensor::<CpuRuntime>::from_slice(&BLOBS, &[12, 2], &device);
        let labels = Tensor::<CpuRuntime>::from_slice(&BLOB_LABELS, &[12], &device);
        let limits = LaunchLimits {
            min_group_size: 2,
            max_group_size: 4,
        };

        let backend = DeviceBackend::new(&client, &data, &limits).unwrap();
        assert_eq!(backend.geometry().group_size, 4);
        assert_eq!(backend.geometry().n_groups, 3);

        // Striped distances give the same index as a single stripe
        let striped = DbcvOptions {
            launch: limits,
            ..Default::default()
        };
        let a = client.dbcv_report(&data, &labels, &striped).unwrap();
        let b = client
            .dbcv_report(&data, &labels, &DbcvOptions::default())
            .unwrap();
        assert!((a.index - b.index).abs() < 1e-12);
    }

    #[test]
    fn test_f32_data() {
        let (client, device) = setup();
        let values: Vec<f32> = TWO_TRIANGLES.iter().map(|&v| v as f32).collect();
        let data = Tensor::<CpuRuntime>::from_slice(&values, &[6, 2], &device);
        let labels = Tensor::<CpuRuntime>::from_slice(&[0i64, 0, 0, 1, 1, 1], &[6], &device);

        let score = client
            .dbcv(&data, &labels, &DbcvOptions::default())
            .unwrap();
        let val: f32 = score.item().unwrap();
        let c = 0.625f32.powf(-0.5);
        assert!((val - (200.0 - c) / 200.0).abs() < 1e-4);
    }

    #[test]
    fn test_f32_overflowing_separation() {
        let (client, device) = setup();
        // Within-cluster squared distances fit in f32; between clusters they overflow
        #[rustfmt::skip]
        let values: [f32; 12] = [
            0.0, 0.0,
            1e18, 0.0,
            0.0, 1e18,
            1e20, 1e20,
            1.01e20, 1e20,
            1e20, 1.01e20,
        ];
        let data = Tensor::<CpuRuntime>::from_slice(&values, &[6, 2], &device);
        let labels = Tensor::<CpuRuntime>::from_slice(&[0i64, 0, 0, 1, 1, 1], &[6], &device);

        let mut backend = DeviceBackend::new(&client, &data, &LaunchLimits::default()).unwrap();
        let dm = backend.compute_distance_matrix().unwrap();
        assert_eq!(dm.get(0, 3), SATURATED_DISTANCE);
        assert!(dm.get(0, 1) < SATURATED_DISTANCE);

        let on_device = client
            .dbcv_report(&data, &labels, &DbcvOptions::default())
            .unwrap();
        let on_host = client.dbcv_report(&data, &labels, &sequential()).unwrap();
        assert!(on_device.index.is_finite());
        assert!(on_device.index > 0.9 && on_device.index <= 1.0);
        assert!((on_device.index - on_host.index).abs() < 1e-4);
        for cluster in &on_device.clusters {
            assert_eq!(cluster.dspc, SATURATED_DISTANCE);
            assert!(cluster.validity.is_finite());
        }
    }

    #[test]
    fn test_f32_fully_saturated_scores_zero() {
        let (client, device) = setup();
        #[rustfmt::skip]
        let values: [f32; 12] = [
            0.0, 0.0,
            1e20, 0.0,
            0.0, 1e20,
            5e20, 5e20,
            6e20, 5e20,
            5e20, 6e20,
        ];
        let data = Tensor::<CpuRuntime>::from_slice(&values, &[6, 2], &device);
        let labels = Tensor::<CpuRuntime>::from_slice(&[0i64, 0, 0, 1, 1, 1], &[6], &device);

        let on_device = client
            .dbcv_report(&data, &labels, &DbcvOptions::default())
            .unwrap();
        let on_host = client.dbcv_report(&data, &labels, &sequential()).unwrap();
        assert_eq!(on_device.index, 0.0);
        assert_eq!(on_host.index, 0.0);
    }

    #[test]
    fn test_dbcv_rejects_bad_inputs() {
        let (client, device) = setup();
        let data = Tensor::<CpuRuntime>::from_slice(&TWO_TRIANGLES, &[6, 2], &device);
        let short = Tensor::<CpuRuntime>::from_slice(&[0i64, 0, 1, 1], &[4], &device);
        let float_labels =
            Tensor::<CpuRuntime>::from_slice(&[0.0f64, 0.0, 0.0, 1.0, 1.0, 1.0], &[6], &device);
        let opts = DbcvOptions::default();

        assert!(client.dbcv(&data, &short, &opts).is_err());
        assert!(client.dbcv(&data, &float_labels, &opts).is_err());

        let flat = Tensor::<CpuRuntime>::from_slice(&TWO_TRIANGLES, &[12], &device);
        let labels = Tensor::<CpuRuntime>::from_slice(&[0i64; 12], &[12], &device);
        assert!(client.dbcv(&flat, &labels, &opts).is_err());
    }
}
