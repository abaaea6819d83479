//! Rule-based warnings attached to a recommendation.
//!
//! Each rule is independent and non-blocking: warnings annotate the
//! result, they never veto a candidate. Thresholds track the capacity
//! tiers of shipping parts (80 GB, 141 GB, 192 GB class devices).

use crate::memory::MemoryBreakdown;
use crate::scorer::Candidate;
use crate::workload::{Precision, WorkloadClass, WorkloadSpec};

/// Generate warnings for a sizing result.
pub fn diagnose(
    workload: &WorkloadSpec,
    memory: &MemoryBreakdown,
    primary: Option<&Candidate>,
) -> Vec<String> {
    let mut warnings = Vec::new();
    let total = memory.total_gb;

    if total > 80.0 && total < 142.0 {
        warnings.push(format!(
            "{}B {} requires ~{:.0} GB — a tight fit on a single 80 GB device. \
             Consider a 141 GB-class part or multi-device tensor parallelism.",
            workload.params_b, workload.precision, total
        ));
    }
    if total > 192.0 && total < 260.0 {
        warnings.push(format!(
            "Memory requirement of {:.0} GB exceeds the largest single device. \
             Multi-device tensor parallelism is required.",
            total
        ));
    }
    if workload.class == WorkloadClass::Pretrain && workload.params_b > 100.0 {
        warnings.push(
            "Pre-training above 100B parameters needs a deliberate checkpoint strategy. \
             The estimate does not include activation recomputation savings."
                .to_string(),
        );
    }
    if workload.architecture.is_moe() {
        warnings.push(
            "MoE models keep every expert resident: the memory estimate uses total \
             parameters, not the active count."
                .to_string(),
        );
        if workload.class.is_training() {
            warnings.push(
                "MoE training: use expert parallelism instead of tensor parallelism — \
                 tokens route to distributed experts via all-to-all, replacing TP \
                 all-reduces."
                    .to_string(),
            );
        }
    }
    if workload.precision.is_four_bit() {
        warnings.push(format!(
            "{} quantization can degrade model quality. Validate with perplexity \
             benchmarks before production deployment.",
            workload.precision
        ));
    }
    if workload.precision == Precision::Fp8 {
        match primary {
            Some(c) if c.accelerator.low_precision_tflops == 0.0 => warnings.push(format!(
                "{} has no native FP8 path — it will run at INT8-equivalent rates and \
                 its compute scores here reflect that.",
                c.accelerator.name
            )),
            _ => warnings.push(
                "FP8 needs a Hopper-or-newer generation part. Older generations fall \
                 back to INT8-equivalent performance."
                    .to_string(),
            ),
        }
    }

    warnings
}
