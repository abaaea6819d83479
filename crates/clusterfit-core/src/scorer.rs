//! Cost and performance scoring for planned configurations.
//!
//! Every feasible (accelerator, plan) pair becomes a [`Candidate`] with an
//! hourly cost, a total cost over the planning horizon, and five
//! comparable scores. Serving metrics weight memory bandwidth heavily —
//! decode is bandwidth-bound, so a bandwidth-rich part beats a
//! compute-rich one at equal cost — while training metrics weight raw
//! compute and interconnect.

use crate::planner::ParallelismPlan;
use crate::workload::{format_days, WorkloadSpec};
use clusterfit_catalog::AcceleratorSpec;
use serde::{Deserialize, Serialize};

/// Hours in the monthly serving horizon (730 = 24/7 for one month).
const SERVING_HORIZON_HOURS: f64 = 730.0;

/// The five ranking scores. All are higher-is-better; the cost-sensitive
/// ones divide by total spend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSet {
    /// Per-device blend of bandwidth and compute; favors bandwidth-rich,
    /// low-count configs.
    pub latency: f64,
    /// Aggregate compute, bandwidth, and scale-up interconnect.
    pub throughput: f64,
    /// Serving value per dollar over the horizon.
    pub cost_per_token: f64,
    /// Raw training horsepower: compute plus interconnect.
    pub training: f64,
    /// Training horsepower per dollar over the horizon.
    pub perf_per_dollar: f64,
}

/// A scored, feasible configuration for one accelerator type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub accelerator: AcceleratorSpec,
    pub plan: ParallelismPlan,
    pub cost_per_hour: f64,
    /// Spend over the planning horizon: a month of 24/7 serving, or the
    /// requested training duration.
    pub total_cost: f64,
    /// Human-readable horizon ("24/7 serving", "2.0w", ...).
    pub est_duration: String,
    pub scores: ScoreSet,
    pub memory_required_gb: f64,
    /// Raw capacity across all devices (before the runtime reserve).
    pub memory_available_gb: f64,
}

impl Candidate {
    /// Free memory fraction across the deployment, as a percentage.
    pub fn headroom_pct(&self) -> f64 {
        if self.memory_available_gb <= 0.0 {
            return 0.0;
        }
        (self.memory_available_gb - self.memory_required_gb) / self.memory_available_gb * 100.0
    }
}

/// Score one planned configuration. Pure; never fails.
pub fn score(
    accelerator: &AcceleratorSpec,
    plan: ParallelismPlan,
    workload: &WorkloadSpec,
    memory_required_gb: f64,
) -> Candidate {
    let devices = plan.devices as f64;
    let cost_per_hour = accelerator.hourly_usd_typical * devices;
    let (total_cost, est_duration) = if workload.class.is_serving() {
        (cost_per_hour * SERVING_HORIZON_HOURS, "24/7 serving".to_string())
    } else {
        let days = workload.horizon_days();
        (cost_per_hour * days as f64 * 24.0, format_days(days))
    };

    let tflops =
        accelerator.scoring_tflops(workload.precision.uses_low_precision_math()) * devices;
    let bandwidth = accelerator.bandwidth_gb_s * devices;
    let interconnect = accelerator.interconnect_gb_s * devices;

    let latency = (bandwidth * 0.6 + tflops * 0.4) / devices.max(1.0);
    let throughput = tflops * 0.5 + bandwidth * 0.3 + interconnect * 0.2;
    let cost_per_token = (bandwidth * 0.5 + tflops * 0.5) / total_cost.max(1.0);
    let training = tflops + interconnect * 0.5;
    let perf_per_dollar = training / total_cost.max(1.0);

    Candidate {
        accelerator: accelerator.clone(),
        cost_per_hour,
        total_cost,
        est_duration,
        scores: ScoreSet {
            latency,
            throughput,
            cost_per_token,
            training,
            perf_per_dollar,
        },
        memory_required_gb,
        memory_available_gb: accelerator.memory_gb * devices,
        plan,
    }
}
