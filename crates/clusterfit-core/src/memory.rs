//! Workload memory estimation.
//!
//! Produces a [`MemoryBreakdown`] in GB for any workload. Serving
//! workloads are dominated by resident weights plus KV cache; training
//! workloads by the mixed-precision optimizer stack. The estimate is a
//! pure function of the workload spec and never fails.

use crate::workload::{FineTuneMethod, WorkloadClass, WorkloadSpec};
use serde::{Deserialize, Serialize};

/// Memory requirement split by component, all in GB.
///
/// `total_gb` always equals the sum of the components, so callers can
/// render the breakdown as a stacked bar without reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryBreakdown {
    /// Resident model weights. For training this term folds in gradients
    /// and optimizer state (16 bytes per parameter, Adam-style mixed
    /// precision).
    pub weights_gb: f64,
    /// KV cache for serving workloads; zero for training.
    pub kv_cache_gb: f64,
    /// Optimizer state reported separately; currently folded into
    /// `weights_gb` by the mixed-precision estimate, so zero.
    pub optimizer_gb: f64,
    /// Activation working set. For serving this is the 10% buffer held
    /// for activations and allocator fragmentation.
    pub activations_gb: f64,
    pub total_gb: f64,
}

impl MemoryBreakdown {
    fn from_components(weights_gb: f64, kv_cache_gb: f64, activations_gb: f64) -> Self {
        Self {
            weights_gb,
            kv_cache_gb,
            optimizer_gb: 0.0,
            activations_gb,
            total_gb: weights_gb + kv_cache_gb + activations_gb,
        }
    }
}

/// Attention head width assumed for KV sizing.
const HEAD_DIM: f64 = 128.0;
/// KV cache element width in bytes (16-bit cache).
const KV_BYTES: f64 = 2.0;
/// Weights + gradients + Adam moments per parameter in mixed precision.
const TRAINING_BYTES_PER_PARAM: f64 = 16.0;
/// Serving-side buffer for activations and fragmentation.
const SERVING_OVERHEAD: f64 = 0.10;
/// Trainable adapter fraction for LoRA-family methods.
const LORA_PARAM_FRACTION: f64 = 0.01;
/// Per-model footprint for preference-tuning stacks (weights, optimizer,
/// and rollout buffers).
const RLHF_BYTES_PER_MODEL: f64 = 18.0;

/// Layer count inferred from model scale.
fn layer_count(params: f64) -> f64 {
    if params > 500e9 {
        96.0
    } else if params > 100e9 {
        80.0
    } else if params > 30e9 {
        64.0
    } else if params > 10e9 {
        40.0
    } else if params > 3e9 {
        32.0
    } else {
        16.0
    }
}

/// KV head count inferred from model scale.
fn kv_head_count(params: f64) -> f64 {
    if params > 100e9 {
        64.0
    } else if params > 30e9 {
        32.0
    } else if params > 10e9 {
        16.0
    } else {
        8.0
    }
}

/// Estimate the memory requirement for a workload.
///
/// Mixture-of-experts models are sized by their **total** parameter count:
/// every expert must be resident even though only the active subset
/// executes per token.
pub fn estimate(workload: &WorkloadSpec) -> MemoryBreakdown {
    let params = workload.params_b * 1e9;
    match workload.class {
        WorkloadClass::Inference | WorkloadClass::Batch => estimate_serving(workload, params),
        WorkloadClass::Pretrain => estimate_pretrain(workload, params),
        WorkloadClass::Posttrain => estimate_posttrain(workload, params),
    }
}

fn estimate_serving(workload: &WorkloadSpec, params: f64) -> MemoryBreakdown {
    let weights_gb = params * workload.precision.bytes_per_param() / 1e9;
    let kv_per_token = 2.0 * kv_head_count(params) * HEAD_DIM * layer_count(params) * KV_BYTES;
    let kv_cache_gb = kv_per_token * workload.context_length as f64 * workload.batch_size as f64
        / 1e9;
    let overhead_gb = (weights_gb + kv_cache_gb) * SERVING_OVERHEAD;
    MemoryBreakdown::from_components(weights_gb, kv_cache_gb, overhead_gb)
}

fn estimate_pretrain(workload: &WorkloadSpec, params: f64) -> MemoryBreakdown {
    let weights_gb = params * TRAINING_BYTES_PER_PARAM / 1e9;
    let context = workload.context_length.min(4096) as f64;
    let activations_gb = (params * 2.0 * context / 1e9).min(weights_gb * 0.3);
    MemoryBreakdown::from_components(weights_gb, 0.0, activations_gb)
}

fn estimate_posttrain(workload: &WorkloadSpec, params: f64) -> MemoryBreakdown {
    let (weights_gb, activation_fraction) = match workload.method {
        // Full fine-tuning carries the same optimizer stack as pretraining.
        FineTuneMethod::Full => (params * TRAINING_BYTES_PER_PARAM / 1e9, 0.15),
        // Frozen 16-bit base plus a small adapter trained at full
        // optimizer precision.
        FineTuneMethod::Lora => (
            (params * 2.0 + params * LORA_PARAM_FRACTION * TRAINING_BYTES_PER_PARAM) / 1e9,
            0.15,
        ),
        // 4-bit quantized base, same adapter stack.
        FineTuneMethod::QLora => (
            (params * 0.5 + params * LORA_PARAM_FRACTION * TRAINING_BYTES_PER_PARAM) / 1e9,
            0.15,
        ),
        // Policy and reward stacks resident simultaneously, each with
        // optimizer state and rollout buffers.
        FineTuneMethod::Rlhf => (params * RLHF_BYTES_PER_MODEL * 2.0 / 1e9, 0.10),
        // Policy plus frozen reference; lighter than RLHF.
        FineTuneMethod::Dpo => (params * RLHF_BYTES_PER_MODEL / 1e9, 0.10),
    };
    MemoryBreakdown::from_components(weights_gb, 0.0, weights_gb * activation_fraction)
}
