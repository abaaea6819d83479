//! Plain-text rendering of recommendations for the CLI.
//!
//! The engine itself never prints; these formatters turn a
//! [`Recommendation`] into the tables operators read in a terminal.

use crate::recommend::Recommendation;
use crate::scorer::Candidate;
use crate::workload::{WorkloadClass, WorkloadSpec};
use clusterfit_catalog::Catalog;

fn fmt_currency(usd: f64) -> String {
    if usd >= 1e6 {
        format!("${:.1}M", usd / 1e6)
    } else if usd >= 1e3 {
        format!("${:.1}K", usd / 1e3)
    } else {
        format!("${:.0}", usd)
    }
}

fn workload_line(workload: &WorkloadSpec) -> String {
    let class = match workload.class {
        WorkloadClass::Pretrain => "pretrain",
        WorkloadClass::Posttrain => "posttrain",
        WorkloadClass::Inference => "inference",
        WorkloadClass::Batch => "batch",
    };
    let arch = if workload.architecture.is_moe() {
        "MoE"
    } else {
        "dense"
    };
    format!(
        "{} | {}B {} | {} | {} ctx",
        class, workload.params_b, arch, workload.precision, workload.context_length
    )
}

fn candidate_row(label: &str, c: &Candidate) -> String {
    format!(
        "  {:<10} {:>5}x {:<14} TP={:<3} PP={:<3} DP={:<4} {:>10}/hr {:>9} {:>7.0} GB {:>5.0}%\n",
        label,
        c.plan.devices,
        c.accelerator.name,
        c.plan.tensor,
        c.plan.pipeline,
        c.plan.data,
        format!("${:.2}", c.cost_per_hour),
        fmt_currency(c.total_cost),
        c.memory_available_gb,
        c.headroom_pct(),
    )
}

/// Format a full recommendation as a terminal table.
pub fn format_recommendation(workload: &WorkloadSpec, rec: &Recommendation) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{:=<78}\n", "  ClusterFit Recommendation  "));
    out.push_str(&format!("  Workload: {}\n", workload_line(workload)));

    out.push_str(&format!("{:-<78}\n", "  Memory  "));
    out.push_str(&format!(
        "  Weights {:.1} GB | KV cache {:.1} GB | Activations {:.1} GB | Total {:.1} GB\n",
        rec.memory.weights_gb,
        rec.memory.kv_cache_gb,
        rec.memory.activations_gb,
        rec.memory.total_gb,
    ));

    let Some(primary) = &rec.primary else {
        out.push_str(&format!("{:-<78}\n", ""));
        out.push_str("  No feasible configuration found for these requirements.\n");
        out.push_str(&format!("{:=<78}\n", ""));
        return out;
    };

    out.push_str(&format!("{:-<78}\n", "  Primary  "));
    out.push_str(&format!(
        "  {}x {} — {} ({})\n",
        primary.plan.devices, primary.accelerator.name, fmt_currency(primary.total_cost),
        primary.est_duration,
    ));
    out.push_str(&format!("  Strategy: {}\n", primary.plan.rationale));

    out.push_str(&format!("{:-<78}\n", "  Configurations  "));
    out.push_str(
        "  Rank       Count Device          TP    PP    DP         $/hr     Total      VRAM  Free\n",
    );
    out.push_str(&candidate_row("★ primary", primary));
    for (i, alt) in rec.alternatives.iter().enumerate() {
        out.push_str(&candidate_row(&format!("option {}", i + 2), alt));
    }

    if !rec.warnings.is_empty() {
        out.push_str(&format!("{:-<78}\n", "  Warnings  "));
        for w in &rec.warnings {
            out.push_str(&format!("  ! {}\n", w));
        }
    }
    if !rec.frameworks.is_empty() {
        out.push_str(&format!("{:-<78}\n", "  Frameworks  "));
        for f in &rec.frameworks {
            out.push_str(&format!("  {:<22} {}\n", f.name, f.notes));
        }
    }
    if !rec.insights.is_empty() {
        out.push_str(&format!("{:-<78}\n", "  Notes  "));
        for n in &rec.insights {
            out.push_str(&format!("  - {}\n", n));
        }
    }
    out.push_str(&format!("{:=<78}\n", ""));
    out
}

/// Format a parameter sweep as a comparison table.
pub fn format_sweep_table(rows: &[(f64, Recommendation)]) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{:=<78}\n", "  Parameter Sweep  "));
    out.push_str(&format!(
        "{:<10} {:>10} {:>7} {:<16} {:>10} {:>10} {:>6}\n",
        "Params", "Mem (GB)", "Count", "Device", "$/hr", "Total", "Free"
    ));
    out.push_str(&format!("{:-<78}\n", ""));
    for (params_b, rec) in rows {
        match &rec.primary {
            Some(c) => out.push_str(&format!(
                "{:<10} {:>10.0} {:>7} {:<16} {:>10} {:>10} {:>5.0}%\n",
                format!("{}B", params_b),
                rec.memory.total_gb,
                c.plan.devices,
                c.accelerator.name,
                format!("${:.2}", c.cost_per_hour),
                fmt_currency(c.total_cost),
                c.headroom_pct(),
            )),
            None => out.push_str(&format!(
                "{:<10} {:>10.0} {:>7} {}\n",
                format!("{}B", params_b),
                rec.memory.total_gb,
                "-",
                "no feasible configuration",
            )),
        }
    }
    out.push_str(&format!("{:=<78}\n", ""));
    out
}

/// Format a catalog listing.
pub fn format_catalog_table(catalog: &Catalog) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\n{:=<88}\n",
        format!("  Accelerator Catalog {}  ", catalog.version)
    ));
    out.push_str(&format!(
        "{:<16} {:<8} {:>8} {:>10} {:>8} {:>8} {:>8} {:>8} {:>7}\n",
        "Device", "Vendor", "Mem GB", "BW GB/s", "Dense", "Low-p", "Domain", "$/hr", "Ranked"
    ));
    out.push_str(&format!("{:-<88}\n", ""));
    for spec in &catalog.accelerators {
        out.push_str(&format!(
            "{:<16} {:<8} {:>8.0} {:>10.0} {:>8.0} {:>8.0} {:>8} {:>8.2} {:>7}\n",
            spec.name,
            spec.vendor.to_string(),
            spec.memory_gb,
            spec.bandwidth_gb_s,
            spec.dense_tflops,
            spec.low_precision_tflops,
            spec.interconnect_domain,
            spec.hourly_usd_typical,
            if spec.rankable() { "yes" } else { "no" },
        ));
    }
    out.push_str(&format!("{:=<88}\n", ""));
    out
}
