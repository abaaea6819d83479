//! TOML recommendation request files.
//!
//! A request file captures one sizing question so it can be versioned and
//! re-run:
//!
//! ```toml
//! [model]
//! params_b = 70
//! architecture = "dense"
//! precision = "BF16"
//! context = "8K"
//!
//! [workload]
//! class = "inference"
//! batch_size = 32
//!
//! [requirements]
//! priority = "cost_per_token"
//! concurrent_users = 100
//! ```
//!
//! Sections hold plain strings and numbers; [`RequestConfig::to_workload`]
//! converts them into the typed [`WorkloadSpec`], where validation runs.

use crate::workload::{
    parse_context_length, Architecture, FineTuneMethod, Precision, Priority, WorkloadClass,
    WorkloadError, WorkloadSpec, DEFAULT_BATCH_SIZE,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Failed to read request file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid request: {0}")]
    Field(String),
    #[error(transparent)]
    Workload(#[from] WorkloadError),
}

/// Top-level request file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    pub model: ModelSection,
    pub workload: WorkloadSection,
    #[serde(default)]
    pub requirements: RequirementsSection,
}

/// What is being run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSection {
    /// Total parameters in billions.
    pub params_b: f64,
    /// "dense" or "moe".
    #[serde(default = "default_architecture")]
    pub architecture: String,
    /// Active parameters in billions; required when architecture = "moe".
    pub active_params_b: Option<f64>,
    /// "FP32" | "BF16" | "FP16" | "FP8" | "INT8" | "INT4" | "FP4".
    #[serde(default = "default_precision")]
    pub precision: String,
    /// Context window: "8K", "128K", "1M", or a bare token count.
    #[serde(default = "default_context")]
    pub context: String,
}

fn default_architecture() -> String {
    "dense".to_string()
}
fn default_precision() -> String {
    "BF16".to_string()
}
fn default_context() -> String {
    "8K".to_string()
}

/// How it runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadSection {
    /// "pretrain" | "posttrain" | "inference" | "batch".
    pub class: String,
    /// Fine-tuning method for posttrain: "full" | "lora" | "qlora" |
    /// "rlhf" | "dpo".
    #[serde(default = "default_method")]
    pub method: String,
    /// Concurrent sequences in memory (serving).
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,
}

fn default_method() -> String {
    "full".to_string()
}
fn default_batch_size() -> u32 {
    DEFAULT_BATCH_SIZE
}

/// What to optimize for.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequirementsSection {
    /// Ranking priority; defaults per workload class.
    pub priority: Option<String>,
    /// Training horizon, e.g. "1 week".
    pub target_time: Option<String>,
    /// Expected concurrent users (serving).
    pub concurrent_users: Option<u32>,
}

impl RequestConfig {
    /// Load a request from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, RequestError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a request from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, RequestError> {
        Ok(toml::from_str(s)?)
    }

    /// Convert into a validated [`WorkloadSpec`].
    pub fn to_workload(&self) -> Result<WorkloadSpec, RequestError> {
        let class: WorkloadClass = self
            .workload
            .class
            .parse()
            .map_err(RequestError::Field)?;
        let precision: Precision = self
            .model
            .precision
            .parse()
            .map_err(RequestError::Field)?;
        let method: FineTuneMethod = self
            .workload
            .method
            .parse()
            .map_err(RequestError::Field)?;
        let architecture = match self.model.architecture.to_ascii_lowercase().as_str() {
            "dense" => Architecture::Dense,
            "moe" => {
                let active_params_b = self.model.active_params_b.ok_or_else(|| {
                    RequestError::Field(
                        "active_params_b is required when architecture = \"moe\"".to_string(),
                    )
                })?;
                Architecture::MixtureOfExperts { active_params_b }
            }
            other => {
                return Err(RequestError::Field(format!(
                    "unknown architecture: {}",
                    other
                )))
            }
        };
        let context_length = parse_context_length(&self.model.context).ok_or_else(|| {
            RequestError::Field(format!("unparseable context: {}", self.model.context))
        })?;
        let priority = self
            .requirements
            .priority
            .as_deref()
            .map(|s| s.parse::<Priority>())
            .transpose()
            .map_err(RequestError::Field)?;

        let spec = WorkloadSpec {
            class,
            params_b: self.model.params_b,
            architecture,
            precision,
            context_length,
            method,
            batch_size: self.workload.batch_size,
            target_time: self.requirements.target_time.clone(),
            concurrent_users: self.requirements.concurrent_users,
            priority,
        };
        spec.validate()?;
        Ok(spec)
    }
}
