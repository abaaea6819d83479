//! ClusterFit CLI — size GPU clusters without buying GPUs.

use clap::{Parser, Subcommand};
use clusterfit_core::config::RequestConfig;
use clusterfit_core::report;
use clusterfit_core::workload::{
    parse_context_length, Architecture, WorkloadSpec, DEFAULT_BATCH_SIZE,
};
use clusterfit_core::Catalog;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "clusterfit",
    about = "Size GPU clusters without buying GPUs",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Produce a sizing recommendation for one workload.
    Recommend {
        /// Path to a TOML request file (overrides the workload flags).
        #[arg(short, long)]
        request: Option<PathBuf>,
        /// Workload class: pretrain, posttrain, inference, batch.
        #[arg(short, long, default_value = "inference")]
        workload: String,
        /// Total model parameters in billions.
        #[arg(short, long, default_value = "70")]
        params: f64,
        /// Model is mixture-of-experts.
        #[arg(long)]
        moe: bool,
        /// Active parameters in billions (MoE only).
        #[arg(long)]
        active_params: Option<f64>,
        /// Precision: FP32, BF16, FP16, FP8, INT8, INT4, FP4.
        #[arg(long, default_value = "BF16")]
        precision: String,
        /// Context window: "8K", "128K", "1M", or a token count.
        #[arg(long, default_value = "8K")]
        context: String,
        /// Concurrent sequences in memory (serving).
        #[arg(long)]
        batch_size: Option<u32>,
        /// Fine-tuning method for posttrain: full, lora, qlora, rlhf, dpo.
        #[arg(long, default_value = "full")]
        method: String,
        /// Ranking priority: latency, throughput, cost_per_token, perf,
        /// perf_per_dollar, budget.
        #[arg(long)]
        priority: Option<String>,
        /// Training horizon, e.g. "1 week".
        #[arg(long)]
        target_time: Option<String>,
        /// Expected concurrent users (serving).
        #[arg(long)]
        users: Option<u32>,
        /// Custom catalog TOML file (defaults to the built-in catalog).
        #[arg(short, long)]
        catalog: Option<PathBuf>,
        /// Write the full recommendation to a JSON file.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run one recommendation per parameter count and compare.
    Sweep {
        /// Comma-separated parameter counts in billions.
        #[arg(short, long, value_delimiter = ',', default_value = "7,13,70,180,405,671")]
        params: Vec<f64>,
        /// Workload class: pretrain, posttrain, inference, batch.
        #[arg(short, long, default_value = "inference")]
        workload: String,
        /// Precision: FP32, BF16, FP16, FP8, INT8, INT4, FP4.
        #[arg(long, default_value = "BF16")]
        precision: String,
        /// Custom catalog TOML file.
        #[arg(short, long)]
        catalog: Option<PathBuf>,
        /// Write sweep results to a JSON file.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the accelerator catalog.
    Catalog {
        /// Custom catalog TOML file.
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Recommend {
            request,
            workload,
            params,
            moe,
            active_params,
            precision,
            context,
            batch_size,
            method,
            priority,
            target_time,
            users,
            catalog,
            output,
        } => {
            let catalog = load_catalog(catalog.as_deref());
            let spec = match request {
                Some(path) => RequestConfig::from_file(&path)
                    .and_then(|r| r.to_workload())
                    .unwrap_or_else(|e| {
                        eprintln!("Error loading request: {}", e);
                        std::process::exit(1);
                    }),
                None => build_workload(
                    &workload,
                    params,
                    moe,
                    active_params,
                    &precision,
                    &context,
                    batch_size,
                    &method,
                    priority.as_deref(),
                    target_time,
                    users,
                ),
            };

            let rec = clusterfit_core::recommend(&catalog, &spec).unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });
            println!("{}", report::format_recommendation(&spec, &rec));

            if let Some(output_path) = output {
                let json = serde_json::to_string_pretty(&rec).unwrap();
                std::fs::write(&output_path, json).unwrap_or_else(|e| {
                    eprintln!("Error writing output: {}", e);
                    std::process::exit(1);
                });
                println!("Recommendation written to {}", output_path.display());
            }
        }
        Commands::Sweep {
            params,
            workload,
            precision,
            catalog,
            output,
        } => {
            let catalog = load_catalog(catalog.as_deref());
            let rows: Vec<_> = params
                .iter()
                .map(|&p| {
                    let spec = build_workload(
                        &workload, p, false, None, &precision, "8K", None, "full", None, None,
                        None,
                    );
                    let rec = clusterfit_core::recommend(&catalog, &spec).unwrap_or_else(|e| {
                        eprintln!("Error: {}", e);
                        std::process::exit(1);
                    });
                    (p, rec)
                })
                .collect();
            println!("{}", report::format_sweep_table(&rows));

            if let Some(output_path) = output {
                let json = serde_json::to_string_pretty(&rows).unwrap();
                std::fs::write(&output_path, json).unwrap_or_else(|e| {
                    eprintln!("Error writing output: {}", e);
                    std::process::exit(1);
                });
                println!("Sweep results written to {}", output_path.display());
            }
        }
        Commands::Catalog { file } => {
            let catalog = load_catalog(file.as_deref());
            println!("{}", report::format_catalog_table(&catalog));
        }
    }
}

fn load_catalog(path: Option<&std::path::Path>) -> Catalog {
    match path {
        Some(p) => Catalog::from_file(p).unwrap_or_else(|e| {
            eprintln!("Error loading catalog: {}", e);
            std::process::exit(1);
        }),
        None => Catalog::builtin(),
    }
}

#[allow(clippy::too_many_arguments)]
fn build_workload(
    class: &str,
    params_b: f64,
    moe: bool,
    active_params: Option<f64>,
    precision: &str,
    context: &str,
    batch_size: Option<u32>,
    method: &str,
    priority: Option<&str>,
    target_time: Option<String>,
    users: Option<u32>,
) -> WorkloadSpec {
    let class = class.parse().unwrap_or_else(|e: String| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    let precision = precision.parse().unwrap_or_else(|e: String| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    let method = method.parse().unwrap_or_else(|e: String| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    let priority = priority.map(|s| {
        s.parse().unwrap_or_else(|e: String| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        })
    });
    let context_length = parse_context_length(context).unwrap_or_else(|| {
        eprintln!("Error: unparseable context: {}", context);
        std::process::exit(1);
    });
    let architecture = if moe {
        Architecture::MixtureOfExperts {
            // Matches common frontier MoE ratios when unspecified.
            active_params_b: active_params.unwrap_or(params_b * 0.055),
        }
    } else {
        Architecture::Dense
    };

    let spec = WorkloadSpec {
        class,
        params_b,
        architecture,
        precision,
        context_length,
        method,
        batch_size: batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
        target_time,
        concurrent_users: users,
        priority,
    };
    if let Err(e) = spec.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    spec
}
