//! Candidate ranking.
//!
//! Runs the memory estimator once, then plans and scores a configuration
//! for every rankable accelerator in the catalog, and orders the feasible
//! ones by the workload's optimization priority. An empty catalog or an
//! impossible requirement produces `primary: None` — a normal outcome the
//! caller must handle, not an error.

use crate::diagnostics::diagnose;
use crate::frameworks::{recommend_frameworks, FrameworkRec};
use crate::insights::collect_insights;
use crate::memory::{estimate, MemoryBreakdown};
use crate::planner::plan;
use crate::scorer::{score, Candidate};
use crate::workload::{Priority, WorkloadError, WorkloadSpec};
use clusterfit_catalog::Catalog;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// How many runner-up configurations a recommendation carries.
const MAX_ALTERNATIVES: usize = 3;

/// A complete sizing recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Best-ranked feasible configuration, or `None` when no catalog part
    /// can host the workload.
    pub primary: Option<Candidate>,
    /// Up to three runners-up, in rank order.
    pub alternatives: Vec<Candidate>,
    pub warnings: Vec<String>,
    pub memory: MemoryBreakdown,
    pub frameworks: Vec<FrameworkRec>,
    pub insights: Vec<String>,
}

impl Recommendation {
    /// All ranked candidates, primary first.
    pub fn candidates(&self) -> impl Iterator<Item = &Candidate> {
        self.primary.iter().chain(self.alternatives.iter())
    }
}

/// Produce a recommendation for a workload against a catalog.
///
/// Validation runs first; everything after it is pure and infallible.
/// Identical inputs always produce identical output.
pub fn recommend(
    catalog: &Catalog,
    workload: &WorkloadSpec,
) -> Result<Recommendation, WorkloadError> {
    workload.validate()?;
    let memory = estimate(workload);

    let mut candidates: Vec<Candidate> = catalog
        .rankable()
        .filter_map(|accel| {
            plan(memory.total_gb, accel, workload)
                .map(|p| score(accel, p, workload, memory.total_gb))
        })
        .collect();

    let priority = workload
        .priority
        .unwrap_or_else(|| Priority::default_for(workload.class));
    // Stable sort: equal scores keep catalog order.
    candidates.sort_by(|a, b| rank_order(priority, a, b));

    let mut ranked = candidates.into_iter();
    let primary = ranked.next();
    let alternatives: Vec<Candidate> = ranked.take(MAX_ALTERNATIVES).collect();

    let warnings = diagnose(workload, &memory, primary.as_ref());
    let frameworks = recommend_frameworks(workload);
    let insights = collect_insights(workload);

    Ok(Recommendation {
        primary,
        alternatives,
        warnings,
        memory,
        frameworks,
        insights,
    })
}

/// Comparator for one priority. Score-driven priorities sort descending;
/// `Budget` sorts ascending on total spend.
fn rank_order(priority: Priority, a: &Candidate, b: &Candidate) -> Ordering {
    match priority {
        Priority::Latency => descending(a.scores.latency, b.scores.latency),
        Priority::Throughput => descending(a.scores.throughput, b.scores.throughput),
        Priority::CostPerToken => descending(a.scores.cost_per_token, b.scores.cost_per_token),
        Priority::Performance => descending(a.scores.training, b.scores.training),
        Priority::PerfPerDollar => {
            descending(a.scores.perf_per_dollar, b.scores.perf_per_dollar)
        }
        Priority::Budget => a
            .total_cost
            .partial_cmp(&b.total_cost)
            .unwrap_or(Ordering::Equal),
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
