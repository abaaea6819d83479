//! Workload model for sizing requests.
//!
//! A [`WorkloadSpec`] describes one ML workload — class, model size and
//! architecture, precision, context, and the knobs specific to serving or
//! training — and is validated once at the boundary before any estimation
//! runs. All downstream stages operate on a validated spec and cannot fail.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkloadError {
    #[error("Invalid workload: {0}")]
    Validation(String),
}

/// Broad class of workload, which selects the memory model and the cost
/// horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkloadClass {
    /// Training a model from scratch.
    Pretrain,
    /// Fine-tuning an existing model (SFT, LoRA, RLHF, ...).
    Posttrain,
    /// Online serving.
    Inference,
    /// Offline batch processing (embeddings, scoring, evaluation).
    Batch,
}

impl WorkloadClass {
    /// Training-style workloads hold optimizer state and round device
    /// counts to node-sized multiples.
    pub fn is_training(&self) -> bool {
        matches!(self, WorkloadClass::Pretrain | WorkloadClass::Posttrain)
    }

    /// Serving-style workloads hold a KV cache and are costed monthly.
    pub fn is_serving(&self) -> bool {
        !self.is_training()
    }
}

impl std::str::FromStr for WorkloadClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretrain" | "pretraining" => Ok(WorkloadClass::Pretrain),
            "posttrain" | "posttraining" | "finetune" => Ok(WorkloadClass::Posttrain),
            "inference" | "serving" => Ok(WorkloadClass::Inference),
            "batch" => Ok(WorkloadClass::Batch),
            other => Err(format!("unknown workload class: {}", other)),
        }
    }
}

/// Model architecture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Architecture {
    Dense,
    /// Mixture-of-experts. `active_params_b` is the per-token active
    /// parameter count in billions; memory sizing always uses the total
    /// count because every expert must be resident.
    MixtureOfExperts { active_params_b: f64 },
}

impl Architecture {
    pub fn is_moe(&self) -> bool {
        matches!(self, Architecture::MixtureOfExperts { .. })
    }
}

/// Numeric precision of weights and activations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Precision {
    Fp32,
    Bf16,
    Fp16,
    Fp8,
    Int8,
    Int4,
    Fp4,
}

impl Precision {
    /// Bytes per stored parameter.
    pub fn bytes_per_param(&self) -> f64 {
        match self {
            Precision::Fp32 => 4.0,
            Precision::Bf16 | Precision::Fp16 => 2.0,
            Precision::Fp8 | Precision::Int8 => 1.0,
            Precision::Int4 | Precision::Fp4 => 0.5,
        }
    }

    /// Whether throughput scoring uses the accelerator's low-precision
    /// compute column. FP4 deliberately scores against the dense column:
    /// only one shipping part advertises a dedicated FP4 rate and the
    /// catalog does not carry it.
    pub fn uses_low_precision_math(&self) -> bool {
        matches!(self, Precision::Fp8 | Precision::Int8 | Precision::Int4)
    }

    /// Four-bit formats need accuracy validation before production use.
    pub fn is_four_bit(&self) -> bool {
        matches!(self, Precision::Int4 | Precision::Fp4)
    }
}

impl std::str::FromStr for Precision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "FP32" => Ok(Precision::Fp32),
            "BF16" => Ok(Precision::Bf16),
            "FP16" => Ok(Precision::Fp16),
            "FP8" => Ok(Precision::Fp8),
            "INT8" => Ok(Precision::Int8),
            "INT4" => Ok(Precision::Int4),
            "FP4" => Ok(Precision::Fp4),
            other => Err(format!("unknown precision: {}", other)),
        }
    }
}

impl std::fmt::Display for Precision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Precision::Fp32 => "FP32",
            Precision::Bf16 => "BF16",
            Precision::Fp16 => "FP16",
            Precision::Fp8 => "FP8",
            Precision::Int8 => "INT8",
            Precision::Int4 => "INT4",
            Precision::Fp4 => "FP4",
        };
        write!(f, "{}", s)
    }
}

/// Fine-tuning method for post-training workloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FineTuneMethod {
    Full,
    Lora,
    QLora,
    Rlhf,
    Dpo,
}

impl std::str::FromStr for FineTuneMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "full" | "sft" => Ok(FineTuneMethod::Full),
            "lora" => Ok(FineTuneMethod::Lora),
            "qlora" => Ok(FineTuneMethod::QLora),
            "rlhf" | "ppo" => Ok(FineTuneMethod::Rlhf),
            "dpo" => Ok(FineTuneMethod::Dpo),
            other => Err(format!("unknown fine-tuning method: {}", other)),
        }
    }
}

/// What the caller wants the ranking to optimize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Lowest per-request latency (serving).
    Latency,
    /// Highest aggregate token throughput (serving).
    Throughput,
    /// Cheapest per token served (serving).
    CostPerToken,
    /// Fastest time-to-train regardless of cost.
    Performance,
    /// Best training performance per dollar.
    PerfPerDollar,
    /// Cheapest total spend over the horizon.
    Budget,
}

impl Priority {
    /// Ranking default when the caller does not pick one: inference ranks
    /// by cost per token, everything else by performance per dollar.
    pub fn default_for(class: WorkloadClass) -> Self {
        match class {
            WorkloadClass::Inference => Priority::CostPerToken,
            _ => Priority::PerfPerDollar,
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "latency" => Ok(Priority::Latency),
            "throughput" => Ok(Priority::Throughput),
            "cost_per_token" => Ok(Priority::CostPerToken),
            "perf" | "performance" => Ok(Priority::Performance),
            "perf_per_dollar" => Ok(Priority::PerfPerDollar),
            "budget" => Ok(Priority::Budget),
            other => Err(format!("unknown priority: {}", other)),
        }
    }
}

/// One sizing request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadSpec {
    pub class: WorkloadClass,
    /// Total model parameters in billions.
    pub params_b: f64,
    pub architecture: Architecture,
    pub precision: Precision,
    /// Context window in tokens.
    pub context_length: u32,
    /// Fine-tuning method; consulted for post-training only.
    pub method: FineTuneMethod,
    /// Concurrent sequences held in memory; consulted for serving only.
    pub batch_size: u32,
    /// Target training duration, e.g. "1 week". Defaults to one week.
    pub target_time: Option<String>,
    /// Expected concurrent users; feeds serving-stack notes only.
    pub concurrent_users: Option<u32>,
    /// Ranking priority; defaults per workload class.
    pub priority: Option<Priority>,
}

impl WorkloadSpec {
    /// A spec with class-appropriate defaults: dense, BF16, 8K context,
    /// batch 32, full fine-tune.
    pub fn new(class: WorkloadClass, params_b: f64) -> Self {
        Self {
            class,
            params_b,
            architecture: Architecture::Dense,
            precision: Precision::Bf16,
            context_length: DEFAULT_CONTEXT_LENGTH,
            method: FineTuneMethod::Full,
            batch_size: DEFAULT_BATCH_SIZE,
            target_time: None,
            concurrent_users: None,
            priority: None,
        }
    }

    /// Validate required fields. Runs once at the request boundary; every
    /// later stage assumes a valid spec.
    pub fn validate(&self) -> Result<(), WorkloadError> {
        if !self.params_b.is_finite() || self.params_b <= 0.0 {
            return Err(WorkloadError::Validation(format!(
                "parameter count must be positive, got {}",
                self.params_b
            )));
        }
        if let Architecture::MixtureOfExperts { active_params_b } = self.architecture {
            if !active_params_b.is_finite() || active_params_b <= 0.0 {
                return Err(WorkloadError::Validation(format!(
                    "active parameter count must be positive, got {}",
                    active_params_b
                )));
            }
            if active_params_b > self.params_b {
                return Err(WorkloadError::Validation(format!(
                    "active parameters ({}B) exceed total parameters ({}B)",
                    active_params_b, self.params_b
                )));
            }
        }
        if self.context_length == 0 {
            return Err(WorkloadError::Validation(
                "context_length must be >= 1".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(WorkloadError::Validation(
                "batch_size must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Training horizon in days, parsed from `target_time`.
    pub fn horizon_days(&self) -> u32 {
        self.target_time
            .as_deref()
            .map(parse_target_days)
            .unwrap_or(DEFAULT_HORIZON_DAYS)
    }
}

pub const DEFAULT_CONTEXT_LENGTH: u32 = 8_000;
pub const DEFAULT_BATCH_SIZE: u32 = 32;
pub const DEFAULT_HORIZON_DAYS: u32 = 7;

/// Parse a context length written as "8K", "128K", "1M", or a bare token
/// count. K and M are decimal multipliers.
pub fn parse_context_length(s: &str) -> Option<u32> {
    let trimmed = s.trim();
    let upper = trimmed.to_ascii_uppercase();
    if let Some(stem) = upper.strip_suffix('M') {
        let n: f64 = stem.parse().ok()?;
        return Some((n * 1e6) as u32);
    }
    if let Some(stem) = upper.strip_suffix('K') {
        let n: f64 = stem.parse().ok()?;
        return Some((n * 1e3) as u32);
    }
    trimmed.parse().ok()
}

/// Parse a training horizon like "1 day", "2 weeks", "3 months" into days.
/// Unrecognized input falls back to one week.
pub fn parse_target_days(s: &str) -> u32 {
    let n = leading_int(s).unwrap_or(1).max(1);
    let lower = s.to_ascii_lowercase();
    if lower.contains("day") {
        n
    } else if lower.contains("week") {
        n * 7
    } else if lower.contains("month") {
        n * 30
    } else {
        DEFAULT_HORIZON_DAYS
    }
}

fn leading_int(s: &str) -> Option<u32> {
    let digits: String = s
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Render a day count the way operators talk about runs: days below a
/// week, weeks below a month, months after that.
pub fn format_days(days: u32) -> String {
    if days < 7 {
        format!("{}d", days)
    } else if days < 30 {
        format!("{:.1}w", days as f64 / 7.0)
    } else {
        format!("{:.1}mo", days as f64 / 30.0)
    }
}
