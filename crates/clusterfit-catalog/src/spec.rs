//! Accelerator specification records.
//!
//! An [`AcceleratorSpec`] captures everything the sizing advisor needs to
//! know about one accelerator product: memory capacity and bandwidth,
//! compute throughput at dense and low precision, interconnect topology,
//! and cloud pricing. Specs are plain data — catalogs of them are built
//! in [`crate::builtin`] or loaded from TOML via [`crate::load`].

use serde::{Deserialize, Serialize};

/// Accelerator vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    Nvidia,
    Amd,
    Intel,
    Google,
}

impl Vendor {
    /// Vendors whose parts the planner can lay out. TPU and Gaudi parts are
    /// carried in the catalog for fleet inventory but use execution models
    /// the TP/PP/DP planner does not describe.
    pub fn plannable(&self) -> bool {
        matches!(self, Vendor::Nvidia | Vendor::Amd)
    }
}

impl std::fmt::Display for Vendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Vendor::Nvidia => write!(f, "NVIDIA"),
            Vendor::Amd => write!(f, "AMD"),
            Vendor::Intel => write!(f, "Intel"),
            Vendor::Google => write!(f, "Google"),
        }
    }
}

/// One accelerator product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcceleratorSpec {
    /// Product name, e.g. "H100 SXM".
    pub name: String,
    pub vendor: Vendor,
    /// On-device memory capacity in GB.
    pub memory_gb: f64,
    /// Memory bandwidth in GB/s.
    pub bandwidth_gb_s: f64,
    /// Dense (16-bit) compute throughput in TFLOPS.
    pub dense_tflops: f64,
    /// FP8/INT8 compute throughput in TFLOPS. Zero for parts with no
    /// native low-precision path (Ampere, CDNA 2).
    pub low_precision_tflops: f64,
    /// Thermal design power in watts.
    pub tdp_watts: u32,
    /// Intra-node interconnect bandwidth in GB/s (0 for parts without a
    /// dedicated scale-up fabric).
    #[serde(default)]
    pub interconnect_gb_s: f64,
    /// Number of devices sharing one low-latency interconnect domain.
    /// 8 for a typical server; 72 for rack-scale NVL systems.
    #[serde(default = "default_interconnect_domain")]
    pub interconnect_domain: u32,
    /// Minimum deployable unit, for products sold only as fixed-size racks.
    #[serde(default)]
    pub min_devices: Option<u32>,
    /// Lowest observed cloud price per device-hour in USD.
    pub hourly_usd_low: f64,
    /// Typical cloud price per device-hour in USD.
    pub hourly_usd_typical: f64,
    /// Retired or partial-capacity variant kept for fleet records only.
    #[serde(default)]
    pub legacy: bool,
}

fn default_interconnect_domain() -> u32 {
    8
}

impl AcceleratorSpec {
    /// Whether the advisor considers this part when ranking candidates.
    pub fn rankable(&self) -> bool {
        self.vendor.plannable() && !self.legacy
    }

    /// Compute throughput used for scoring at the given precision class.
    ///
    /// When `low_precision` is requested this returns the low-precision
    /// column even if it is zero — a part without a native FP8 path scores
    /// accordingly rather than being silently promoted to its dense rate.
    pub fn scoring_tflops(&self, low_precision: bool) -> f64 {
        if low_precision {
            self.low_precision_tflops
        } else {
            self.dense_tflops
        }
    }

    /// True for rack-scale parts whose interconnect domain spans more than
    /// a single server.
    pub fn rack_scale(&self) -> bool {
        self.interconnect_domain > 8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AcceleratorSpec {
        AcceleratorSpec {
            name: "Test 80GB".to_string(),
            vendor: Vendor::Nvidia,
            memory_gb: 80.0,
            bandwidth_gb_s: 3350.0,
            dense_tflops: 1979.0,
            low_precision_tflops: 3958.0,
            tdp_watts: 700,
            interconnect_gb_s: 900.0,
            interconnect_domain: 8,
            min_devices: None,
            hourly_usd_low: 2.49,
            hourly_usd_typical: 3.50,
            legacy: false,
        }
    }

    #[test]
    fn test_scoring_tflops_selects_column() {
        let spec = sample();
        assert_eq!(spec.scoring_tflops(false), 1979.0);
        assert_eq!(spec.scoring_tflops(true), 3958.0);
    }

    #[test]
    fn test_scoring_tflops_zero_low_precision_stays_zero() {
        let spec = AcceleratorSpec {
            low_precision_tflops: 0.0,
            ..sample()
        };
        assert_eq!(spec.scoring_tflops(true), 0.0);
    }

    #[test]
    fn test_rankable() {
        let spec = sample();
        assert!(spec.rankable());

        let legacy = AcceleratorSpec {
            legacy: true,
            ..sample()
        };
        assert!(!legacy.rankable());

        let tpu = AcceleratorSpec {
            vendor: Vendor::Google,
            ..sample()
        };
        assert!(!tpu.rankable());
    }

    #[test]
    fn test_rack_scale() {
        assert!(!sample().rack_scale());
        let rack = AcceleratorSpec {
            interconnect_domain: 72,
            ..sample()
        };
        assert!(rack.rack_scale());
    }
}
