//! Parallelism planning.
//!
//! Given a memory requirement and one accelerator spec, derive how many
//! devices are needed and how the model splits across them. The split
//! honors one physical rule: tensor parallelism needs frequent low-latency
//! all-reduce and must never cross an interconnect domain boundary, while
//! pipeline and data parallelism tolerate inter-node latency.

use crate::workload::{WorkloadClass, WorkloadSpec};
use clusterfit_catalog::AcceleratorSpec;
use serde::{Deserialize, Serialize};

/// Fraction of device memory the planner treats as usable; the rest is
/// reserved for the runtime and allocator fragmentation.
pub const USABLE_MEMORY_FRACTION: f64 = 0.85;
/// Hard sanity ceiling on cluster size.
pub const MAX_DEVICES: u32 = 4096;
/// Pipeline stages beyond this add bubble overhead faster than they add
/// capacity.
const MAX_PIPELINE_STAGES: u32 = 16;

/// A concrete device layout for one accelerator type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelismPlan {
    /// Actual device count: always `tensor * pipeline * data`. May exceed
    /// the memory-derived minimum because counts round to practical
    /// multiples before the split is derived.
    pub devices: u32,
    pub tensor: u32,
    pub pipeline: u32,
    pub data: u32,
    /// Mixture-of-experts training: experts are distributed instead of
    /// splitting tensors, so `tensor` is forced to 1.
    pub expert_parallel: bool,
    /// Interconnect domain size of the chosen accelerator.
    pub domain: u32,
    /// Human-readable strategy summary for reports.
    pub rationale: String,
}

/// Round a raw device count to deployable granularity.
///
/// Training clusters come in node-sized units: anything between a single
/// device and one full node becomes a node of 8, and larger counts round
/// up to whole nodes. Serving tolerates finer slicing but still avoids odd
/// device counts. Returns `None` above [`MAX_DEVICES`].
pub fn practical_count(min_devices: u32, class: WorkloadClass) -> Option<u32> {
    let rounded = if class.is_training() {
        if min_devices > 1 && min_devices < 8 {
            8
        } else if min_devices > 8 && min_devices % 8 != 0 {
            min_devices.div_ceil(8) * 8
        } else {
            min_devices
        }
    } else if min_devices > 2 && min_devices % 2 != 0 {
        min_devices.div_ceil(2) * 2
    } else {
        min_devices
    };
    (rounded <= MAX_DEVICES).then_some(rounded)
}

/// Plan a device layout, or `None` when the accelerator cannot host the
/// workload within the sanity ceiling.
pub fn plan(
    memory_required_gb: f64,
    accelerator: &AcceleratorSpec,
    workload: &WorkloadSpec,
) -> Option<ParallelismPlan> {
    let usable_gb = accelerator.memory_gb * USABLE_MEMORY_FRACTION;
    let mut min_devices = (memory_required_gb / usable_gb).ceil().max(1.0) as u32;
    if let Some(unit) = accelerator.min_devices {
        min_devices = min_devices.max(unit);
    }
    let count = practical_count(min_devices, workload.class)?;

    let domain = accelerator.interconnect_domain;
    let expert_parallel = workload.architecture.is_moe() && workload.class.is_training();

    let (tensor, pipeline) = if expert_parallel {
        // Each device holds a disjoint expert subset; splitting tensors on
        // top of that buys nothing and doubles the all-to-all traffic.
        let pipeline = if count > 16 {
            count.div_ceil(8).min(MAX_PIPELINE_STAGES)
        } else if count > 1 {
            count.min(8)
        } else {
            1
        };
        (1, pipeline)
    } else {
        let tensor = count.min(domain);
        let pipeline = if count > domain {
            count.div_ceil(domain).min(MAX_PIPELINE_STAGES)
        } else {
            1
        };
        (tensor, pipeline)
    };
    let data = (count / (tensor * pipeline)).max(1);
    let devices = tensor * pipeline * data;

    let rationale = describe(tensor, pipeline, data, devices, domain, expert_parallel);
    Some(ParallelismPlan {
        devices,
        tensor,
        pipeline,
        data,
        expert_parallel,
        domain,
        rationale,
    })
}

fn describe(
    tensor: u32,
    pipeline: u32,
    data: u32,
    devices: u32,
    domain: u32,
    expert_parallel: bool,
) -> String {
    let dp_note = if data > 1 {
        format!(", DP={}", data)
    } else {
        String::new()
    };
    if expert_parallel {
        format!(
            "MoE: expert parallelism replaces tensor parallelism (TP=1). PP={}{}. \
             Interconnect domain: {} devices.",
            pipeline, dp_note, domain
        )
    } else if tensor > 8 {
        format!(
            "Rack-scale interconnect domain ({} devices). TP={} within the rack, PP={}{}. \
             No cross-node tensor parallelism required.",
            domain, tensor, pipeline, dp_note
        )
    } else {
        let span = if devices <= domain {
            "Single-domain deployment.".to_string()
        } else {
            format!("Spans {} interconnect domains.", devices.div_ceil(domain))
        };
        format!(
            "TP={} within the interconnect domain (max {}), PP={}{}. {}",
            tensor, domain, pipeline, dp_note, span
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workload::{Architecture, WorkloadSpec};
    use clusterfit_catalog::accelerator_by_name;

    fn inference_70b() -> WorkloadSpec {
        WorkloadSpec::new(WorkloadClass::Inference, 70.0)
    }

    fn pretrain_70b() -> WorkloadSpec {
        WorkloadSpec::new(WorkloadClass::Pretrain, 70.0)
    }

    #[test]
    fn test_practical_count_training() {
        let c = WorkloadClass::Pretrain;
        assert_eq!(practical_count(1, c), Some(1));
        assert_eq!(practical_count(2, c), Some(8));
        assert_eq!(practical_count(7, c), Some(8));
        assert_eq!(practical_count(8, c), Some(8));
        assert_eq!(practical_count(9, c), Some(16));
        assert_eq!(practical_count(17, c), Some(24));
        assert_eq!(practical_count(4096, c), Some(4096));
        assert_eq!(practical_count(4097, c), None);
    }

    #[test]
    fn test_practical_count_serving() {
        let c = WorkloadClass::Inference;
        assert_eq!(practical_count(1, c), Some(1));
        assert_eq!(practical_count(2, c), Some(2));
        assert_eq!(practical_count(3, c), Some(4));
        assert_eq!(practical_count(4, c), Some(4));
        assert_eq!(practical_count(5, c), Some(6));
        assert_eq!(practical_count(4095, c), Some(4096));
    }

    #[test]
    fn test_single_device_fit() {
        let h200 = accelerator_by_name("H200 SXM").unwrap();
        // 100 GB fits one 141 GB part at 85% usable.
        let plan = plan(100.0, &h200, &inference_70b()).unwrap();
        assert_eq!(plan.devices, 1);
        assert_eq!((plan.tensor, plan.pipeline, plan.data), (1, 1, 1));
    }

    #[test]
    fn test_device_product_invariant() {
        let workloads = [inference_70b(), pretrain_70b()];
        for accel in clusterfit_catalog::builtin::accelerators() {
            for workload in &workloads {
                for mem in [8.0, 140.0, 450.0, 1500.0, 14000.0] {
                    if let Some(p) = plan(mem, &accel, workload) {
                        assert_eq!(
                            p.devices,
                            p.tensor * p.pipeline * p.data,
                            "{} at {} GB",
                            accel.name,
                            mem
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_tensor_within_domain() {
        for accel in clusterfit_catalog::builtin::accelerators() {
            for mem in [140.0, 450.0, 1500.0, 14000.0] {
                if let Some(p) = plan(mem, &accel, &pretrain_70b()) {
                    assert!(
                        p.tensor <= accel.interconnect_domain,
                        "{}: TP={} exceeds domain {}",
                        accel.name,
                        p.tensor,
                        accel.interconnect_domain
                    );
                }
            }
        }
    }

    #[test]
    fn test_moe_training_forces_tp_one() {
        let mut moe = pretrain_70b();
        moe.params_b = 671.0;
        moe.architecture = Architecture::MixtureOfExperts {
            active_params_b: 37.0,
        };
        let h100 = accelerator_by_name("H100 SXM").unwrap();
        let p = plan(13957.0, &h100, &moe).unwrap();
        assert!(p.expert_parallel);
        assert_eq!(p.tensor, 1);
        assert!(p.pipeline <= 16);
    }

    #[test]
    fn test_moe_serving_keeps_tensor_parallelism() {
        let mut moe = inference_70b();
        moe.architecture = Architecture::MixtureOfExperts {
            active_params_b: 37.0,
        };
        let h100 = accelerator_by_name("H100 SXM").unwrap();
        let p = plan(450.0, &h100, &moe).unwrap();
        assert!(!p.expert_parallel);
        assert!(p.tensor > 1);
    }

    #[test]
    fn test_actual_count_may_exceed_minimum() {
        // 17 devices round to 24 for training; TP=8, PP=3, DP=1 keeps the
        // product at 24. The drift between the raw minimum and the final
        // product is reported, not corrected.
        let h100 = accelerator_by_name("H100 SXM").unwrap();
        let usable = h100.memory_gb * USABLE_MEMORY_FRACTION;
        let p = plan(usable * 16.5, &h100, &pretrain_70b()).unwrap();
        assert!(p.devices >= 17);
        assert_eq!(p.devices, p.tensor * p.pipeline * p.data);
    }

    #[test]
    fn test_min_devices_floor_respected() {
        let gb200 = accelerator_by_name("GB200 NVL72").unwrap();
        // Tiny requirement still deploys at the rack half-unit.
        let p = plan(10.0, &gb200, &inference_70b()).unwrap();
        assert!(p.devices >= 36);
        // Training rounds the 36-unit up to a whole node multiple.
        let p = plan(10.0, &gb200, &pretrain_70b()).unwrap();
        assert_eq!(p.devices % 8, 0);
        assert!(p.devices >= 36);
    }

    #[test]
    fn test_rack_scale_tensor_spans_rack() {
        let gb200 = accelerator_by_name("GB200 NVL72").unwrap();
        let p = plan(10.0, &gb200, &inference_70b()).unwrap();
        // 36 devices sit inside one 72-wide domain: all tensor, no pipeline.
        assert_eq!(p.tensor, 36);
        assert_eq!(p.pipeline, 1);
    }

    #[test]
    fn test_infeasible_above_ceiling() {
        let h100 = accelerator_by_name("H100 SXM").unwrap();
        // 50T-parameter pretraining scale.
        assert!(plan(1_040_000.0, &h100, &pretrain_70b()).is_none());
    }

    #[test]
    fn test_pipeline_spans_domains() {
        let h100 = accelerator_by_name("H100 SXM").unwrap();
        let usable = h100.memory_gb * USABLE_MEMORY_FRACTION;
        let p = plan(usable * 30.0, &h100, &pretrain_70b()).unwrap();
        assert_eq!(p.tensor, 8);
        assert!(p.pipeline > 1);
        assert!(p.rationale.contains("PP="));
    }
}
