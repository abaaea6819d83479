//! ClusterFit — GPU cluster sizing advisor.
//!
//! Given a workload description (class, model size, precision, context,
//! serving or training knobs), the advisor estimates the memory footprint,
//! plans a feasible device layout for every accelerator in a hardware
//! catalog, scores each configuration on cost and performance, and returns
//! a ranked recommendation.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐     ┌───────────┐     ┌─────────────────┐
//! │ Workload │────▶│  Memory   │────▶│     Ranker      │──▶ primary
//! │   Spec   │     │ Estimator │     │ (per catalog    │    + alternatives
//! └──────────┘     └───────────┘     │  accelerator)   │    + warnings
//!                                    └────────┬────────┘
//!                                             │
//!                                 ┌───────────┴───────────┐
//!                                 ▼                       ▼
//!                           ┌───────────┐           ┌──────────┐
//!                           │  Planner  │           │  Scorer  │
//!                           │ TP·PP·DP  │           │ 5 scores │
//!                           └───────────┘           └──────────┘
//! ```
//!
//! The whole pipeline is a pure synchronous function over an immutable
//! [`Catalog`]: no I/O, no shared state, identical inputs give identical
//! output. The only failure mode is workload validation at the boundary;
//! "no feasible configuration" is a normal result with `primary: None`.

pub mod config;
pub mod diagnostics;
pub mod frameworks;
pub mod insights;
pub mod memory;
pub mod planner;
pub mod recommend;
pub mod report;
pub mod scorer;
pub mod workload;

// Re-export key types for convenience.
pub use clusterfit_catalog::{AcceleratorSpec, Catalog, Vendor};
pub use config::{RequestConfig, RequestError};
pub use memory::{estimate, MemoryBreakdown};
pub use planner::{plan, ParallelismPlan};
pub use recommend::{recommend, Recommendation};
pub use scorer::{Candidate, ScoreSet};
pub use workload::{
    Architecture, FineTuneMethod, Precision, Priority, WorkloadClass, WorkloadError, WorkloadSpec,
};
