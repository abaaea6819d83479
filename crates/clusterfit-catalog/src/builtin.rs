//! Built-in accelerator catalog.
//!
//! Specs reflect vendor datasheets and typical cloud pricing as of early
//! 2026. The catalog intentionally includes TPU and Gaudi parts that the
//! planner never ranks — fleet tooling reads the same table.

use crate::spec::{AcceleratorSpec, Vendor};

/// Catalog version tag for the built-in table.
pub const BUILTIN_VERSION: &str = "2026.1";

fn entry(
    name: &str,
    vendor: Vendor,
    memory_gb: f64,
    bandwidth_gb_s: f64,
    dense_tflops: f64,
    low_precision_tflops: f64,
    tdp_watts: u32,
    interconnect_gb_s: f64,
    hourly_usd_low: f64,
    hourly_usd_typical: f64,
) -> AcceleratorSpec {
    AcceleratorSpec {
        name: name.to_string(),
        vendor,
        memory_gb,
        bandwidth_gb_s,
        dense_tflops,
        low_precision_tflops,
        tdp_watts,
        interconnect_gb_s,
        interconnect_domain: 8,
        min_devices: None,
        hourly_usd_low,
        hourly_usd_typical,
        legacy: false,
    }
}

/// A rack-scale NVL72 variant: 72-device interconnect domain, sold in
/// half-rack increments of 36.
fn nvl72(base: AcceleratorSpec) -> AcceleratorSpec {
    AcceleratorSpec {
        interconnect_domain: 72,
        min_devices: Some(36),
        ..base
    }
}

/// All built-in accelerator specs.
pub fn accelerators() -> Vec<AcceleratorSpec> {
    use Vendor::*;
    vec![
        AcceleratorSpec {
            legacy: true,
            ..entry("A100 40GB SXM", Nvidia, 40.0, 2039.0, 312.0, 0.0, 400, 600.0, 1.10, 1.80)
        },
        entry("A100 80GB SXM", Nvidia, 80.0, 2039.0, 312.0, 0.0, 400, 600.0, 1.79, 2.50),
        entry("H100 SXM", Nvidia, 80.0, 3350.0, 1979.0, 3958.0, 700, 900.0, 2.49, 3.50),
        entry("H100 PCIe", Nvidia, 80.0, 2039.0, 756.0, 1513.0, 350, 600.0, 2.00, 2.85),
        entry("H200 SXM", Nvidia, 141.0, 4800.0, 1979.0, 3958.0, 700, 900.0, 3.50, 5.00),
        entry("B200", Nvidia, 192.0, 8000.0, 2250.0, 4500.0, 1000, 1800.0, 5.29, 8.60),
        nvl72(entry("GB200 NVL72", Nvidia, 192.0, 8000.0, 2500.0, 5000.0, 1200, 1800.0, 10.58, 12.00)),
        nvl72(entry("GB300 NVL72", Nvidia, 288.0, 8000.0, 5000.0, 10000.0, 1200, 1800.0, 14.00, 18.00)),
        entry("MI250X", Amd, 128.0, 3277.0, 383.0, 0.0, 560, 800.0, 1.50, 2.20),
        entry("MI300X", Amd, 192.0, 5300.0, 1307.0, 2614.0, 750, 896.0, 1.49, 2.50),
        entry("MI300A", Amd, 128.0, 5300.0, 981.0, 1963.0, 760, 896.0, 2.00, 3.00),
        entry("MI325X", Amd, 256.0, 6000.0, 1307.0, 2614.0, 750, 896.0, 3.50, 5.00),
        entry("MI350X", Amd, 288.0, 8000.0, 4600.0, 9200.0, 750, 896.0, 5.00, 7.50),
        entry("Gaudi 2", Intel, 96.0, 2460.0, 432.0, 865.0, 600, 0.0, 1.95, 3.80),
        entry("Gaudi 3", Intel, 128.0, 3700.0, 1835.0, 1835.0, 900, 0.0, 3.70, 5.00),
        entry("TPU v5e", Google, 16.0, 820.0, 197.0, 394.0, 150, 0.0, 0.32, 1.20),
        entry("TPU v5p", Google, 95.0, 2765.0, 459.0, 918.0, 250, 0.0, 2.20, 3.22),
        entry("TPU v6e", Google, 32.0, 1640.0, 918.0, 918.0, 200, 0.0, 0.39, 2.70),
    ]
}
