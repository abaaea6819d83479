/// Integration tests for device-count rounding and parallelism layout.
use clusterfit_core::planner::{plan, practical_count, MAX_DEVICES, USABLE_MEMORY_FRACTION};
use clusterfit_core::workload::{Architecture, WorkloadClass, WorkloadSpec};
use clusterfit_core::{AcceleratorSpec, Vendor};

fn device(memory_gb: f64, domain: u32, min_devices: Option<u32>) -> AcceleratorSpec {
    AcceleratorSpec {
        name: format!("Test {}GB", memory_gb),
        vendor: Vendor::Nvidia,
        memory_gb,
        bandwidth_gb_s: 3000.0,
        dense_tflops: 1000.0,
        low_precision_tflops: 2000.0,
        tdp_watts: 700,
        interconnect_gb_s: 900.0,
        interconnect_domain: domain,
        min_devices,
        hourly_usd_low: 2.0,
        hourly_usd_typical: 3.0,
        legacy: false,
    }
}

#[test]
fn test_training_granularity_table() {
    let cases = [
        (1, Some(1)),
        (2, Some(8)),
        (5, Some(8)),
        (8, Some(8)),
        (9, Some(16)),
        (24, Some(24)),
        (100, Some(104)),
        (MAX_DEVICES, Some(MAX_DEVICES)),
        (MAX_DEVICES + 1, None),
    ];
    for (input, expected) in cases {
        assert_eq!(
            practical_count(input, WorkloadClass::Pretrain),
            expected,
            "input {}",
            input
        );
        assert_eq!(practical_count(input, WorkloadClass::Posttrain), expected);
    }
}

#[test]
fn test_serving_granularity_table() {
    let cases = [
        (1, Some(1)),
        (2, Some(2)),
        (3, Some(4)),
        (7, Some(8)),
        (10, Some(10)),
        (4095, Some(MAX_DEVICES)),
    ];
    for (input, expected) in cases {
        assert_eq!(
            practical_count(input, WorkloadClass::Inference),
            expected,
            "input {}",
            input
        );
        assert_eq!(practical_count(input, WorkloadClass::Batch), expected);
    }
}

#[test]
fn test_memory_reserve_drives_count() {
    let accel = device(100.0, 8, None);
    let workload = WorkloadSpec::new(WorkloadClass::Inference, 7.0);
    // 85 GB usable per device: 170 GB needs exactly two.
    let p = plan(100.0 * USABLE_MEMORY_FRACTION * 2.0, &accel, &workload).unwrap();
    assert_eq!(p.devices, 2);
    // A hair more tips to three, rounded to four.
    let p = plan(100.0 * USABLE_MEMORY_FRACTION * 2.0 + 0.1, &accel, &workload).unwrap();
    assert_eq!(p.devices, 4);
}

#[test]
fn test_pipeline_only_beyond_domain() {
    let accel = device(80.0, 8, None);
    let workload = WorkloadSpec::new(WorkloadClass::Pretrain, 7.0);
    let usable = 80.0 * USABLE_MEMORY_FRACTION;

    let inside = plan(usable * 8.0, &accel, &workload).unwrap();
    assert_eq!((inside.tensor, inside.pipeline), (8, 1));

    let outside = plan(usable * 9.0, &accel, &workload).unwrap();
    assert_eq!(outside.tensor, 8);
    assert!(outside.pipeline > 1);
}

#[test]
fn test_rack_scale_domain_widens_tensor() {
    let rack = device(192.0, 72, Some(36));
    let workload = WorkloadSpec::new(WorkloadClass::Inference, 70.0);
    let p = plan(500.0, &rack, &workload).unwrap();
    // The 36-device floor dominates the memory need; everything stays in
    // one 72-wide domain as pure tensor parallelism.
    assert_eq!(p.devices, 36);
    assert_eq!(p.tensor, 36);
    assert_eq!(p.pipeline, 1);
}

#[test]
fn test_moe_training_layout() {
    let accel = device(80.0, 8, None);
    let mut workload = WorkloadSpec::new(WorkloadClass::Pretrain, 671.0);
    workload.architecture = Architecture::MixtureOfExperts {
        active_params_b: 37.0,
    };
    let usable = 80.0 * USABLE_MEMORY_FRACTION;

    // Small cluster: pipeline spreads over the node.
    let p = plan(usable * 7.5, &accel, &workload).unwrap();
    assert_eq!(p.tensor, 1);
    assert!(p.expert_parallel);
    assert_eq!(p.pipeline, 8);

    // Large cluster: pipeline caps at 16, data parallelism absorbs the rest.
    let p = plan(usable * 200.0, &accel, &workload).unwrap();
    assert_eq!(p.tensor, 1);
    assert_eq!(p.pipeline, 16);
    assert!(p.data > 1);
    assert_eq!(p.devices, p.tensor * p.pipeline * p.data);
}

#[test]
fn test_rounding_drift_is_reported_not_corrected() {
    // A raw minimum of 33 devices rounds to 40 for training; the split
    // (TP=8, PP=5, DP=1) then lands back on exactly 40, while a raw
    // minimum of 129 rounds to 136 and floors down to 128 via DP.
    let accel = device(80.0, 8, None);
    let workload = WorkloadSpec::new(WorkloadClass::Pretrain, 7.0);
    let usable = 80.0 * USABLE_MEMORY_FRACTION;

    let p = plan(usable * 32.5, &accel, &workload).unwrap();
    assert_eq!(p.devices, 40);

    let p = plan(usable * 128.5, &accel, &workload).unwrap();
    assert_eq!((p.tensor, p.pipeline, p.data), (8, 16, 1));
    assert_eq!(p.devices, 128);
}

#[test]
fn test_min_devices_floor() {
    let rack = device(192.0, 72, Some(36));
    let workload = WorkloadSpec::new(WorkloadClass::Inference, 7.0);
    let p = plan(20.0, &rack, &workload).unwrap();
    assert_eq!(p.devices, 36);
}

#[test]
fn test_infeasible_returns_none() {
    let accel = device(80.0, 8, None);
    let workload = WorkloadSpec::new(WorkloadClass::Pretrain, 7.0);
    assert!(plan(1.0e9, &accel, &workload).is_none());
}
