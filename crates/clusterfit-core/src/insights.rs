//! Sizing notes derived from published benchmarks and deployment practice.
//!
//! Like the warning rules these are independent and advisory, but where
//! warnings flag risks, insights explain *why* the numbers come out the
//! way they do (bandwidth-bound decode, pipeline bubbles, adapter memory
//! savings) so operators can sanity-check the recommendation.

use crate::workload::{FineTuneMethod, Precision, WorkloadClass, WorkloadSpec};

/// Collect the notes relevant to a workload.
pub fn collect_insights(workload: &WorkloadSpec) -> Vec<String> {
    let mut notes = Vec::new();
    let params = workload.params_b;

    if workload.class.is_serving() {
        notes.push(
            "LLM decode is memory-bandwidth-bound, not compute-bound: every token \
             re-reads the full weights from device memory, so bandwidth is the \
             dominant serving performance driver."
                .to_string(),
        );
        if params >= 70.0 {
            notes.push(format!(
                "For {}B-scale decode-dominant serving, a 141 GB / 4.8 TB/s part \
                 delivers roughly 1.9x the tokens/s of an 80 GB / 3.35 TB/s part with \
                 the same compute die — one high-memory device can replace two.",
                params
            ));
        }
        notes.push(
            "Prefill is compute-bound (drives time-to-first-token); decode is \
             bandwidth-bound (drives tokens/s). A part can win one phase and lose \
             the other."
                .to_string(),
        );
        notes.push(
            "Keep tensor parallelism inside one interconnect domain; crossing it \
             over the network hurts latency badly. For throughput, prefer data \
             parallel replicas over wider TP."
                .to_string(),
        );
        match workload.concurrent_users {
            Some(users) if users >= 100 => notes.push(
                "At 100+ concurrent users, continuous batching with paged KV \
                 (vLLM-style) reaches the highest aggregate throughput."
                    .to_string(),
            ),
            Some(users) if users < 20 => notes.push(
                "At low concurrency (<20 users), a compiled engine (TensorRT-LLM) \
                 gives the lowest per-token latency."
                    .to_string(),
            ),
            _ => {}
        }
    }

    if workload.class == WorkloadClass::Pretrain {
        notes.push(
            "Expect 35-45% MFU on well-run large clusters; tuned stacks reach \
             51-52%. Software alone has moved MFU by double digits within a \
             hardware generation."
                .to_string(),
        );
        if params > 100.0 {
            let suggested_pp = (params / 175.0 * 4.0).ceil().max(1.0) as u32;
            notes.push(format!(
                "Never span tensor parallelism across nodes — network latency makes \
                 cross-node TP inefficient. For {}B-scale: TP=8 within the domain, \
                 PP={} across nodes, DP for the remainder.",
                params, suggested_pp
            ));
        }
        if params > 200.0 {
            notes.push(
                "Deep pipeline parallelism introduces bubbles: a 1F1B schedule idles \
                 (PP-1)/PP of the pipeline during ramp-up. Use interleaved or virtual \
                 stages to bring bubble overhead under 5%."
                    .to_string(),
            );
        }
        notes.push(
            "BF16 MFU is stable from tens to thousands of devices; FP8 shows ~10% \
             more degradation at scale from collective-communication sensitivity. \
             Prefer BF16 when reliability matters more than peak rate."
                .to_string(),
        );
        if params >= 70.0 {
            notes.push(
                "At 70B+ a 3D-parallel trainer (Megatron-style TP+PP+DP) consistently \
                 out-utilizes simpler sharding."
                    .to_string(),
            );
        }
    }

    if workload.class == WorkloadClass::Posttrain {
        match workload.method {
            FineTuneMethod::Lora => notes.push(format!(
                "LoRA trains ~1% of parameters: a {}B model needs roughly {:.0} GB \
                 versus {:.0} GB for a full fine-tune, with matching quality on most \
                 tasks.",
                params,
                params * 2.1,
                params * 16.0
            )),
            FineTuneMethod::QLora => notes.push(format!(
                "QLoRA 4-bit-quantizes the frozen base while keeping adapters in \
                 BF16: a {}B model needs roughly {:.0} GB versus {:.0} GB for a full \
                 fine-tune — about a {:.0}x reduction.",
                params,
                params * 0.6,
                params * 16.0,
                16.0 / 0.6
            )),
            FineTuneMethod::Rlhf => {
                notes.push(format!(
                    "PPO-style RLHF keeps four models resident (policy, critic, \
                     reward, reference): budget ~{:.0} GB for a {}B base. Colocating \
                     actor and reference recovers ~30% of that.",
                    params * 36.0,
                    params
                ));
                notes.push(
                    "Rollout generation dominates PPO wall-clock (~80%); serving the \
                     actor through an inference engine for rollouts is the single \
                     biggest step-time win."
                        .to_string(),
                );
            }
            FineTuneMethod::Dpo => notes.push(
                "DPO needs only policy + reference — half the memory of PPO, no \
                 rollout phase, and more stable training."
                    .to_string(),
            ),
            FineTuneMethod::Full => {}
        }
    }

    if workload.architecture.is_moe() {
        notes.push(
            "MoE swaps tensor parallelism for expert parallelism: each device holds \
             a disjoint expert subset and tokens route via all-to-all. All expert \
             weights stay resident regardless of the active count."
                .to_string(),
        );
        if workload.class.is_serving() {
            notes.push(
                "For MoE serving, a 192 GB-class part that fits the whole model on \
                 one device eliminates routing communication entirely."
                    .to_string(),
            );
        }
    }

    match workload.precision {
        Precision::Fp8 => notes.push(
            "FP8 needs Hopper, Ada, or Blackwell silicon and delivers ~1.5-2x \
             throughput over BF16 with >99.9% accuracy retention on most models."
                .to_string(),
        ),
        Precision::Int4 => notes.push(
            "INT4 (GPTQ/AWQ) gives ~2.5x throughput over BF16 at ~98% accuracy \
             retention; AWQ is the safer production default."
                .to_string(),
        ),
        Precision::Fp4 => notes.push(
            "FP4 is Blackwell-only and quarters the BF16 memory footprint; validate \
             accuracy carefully, degradation varies by model family."
                .to_string(),
        ),
        _ => {}
    }

    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workload::Architecture;

    #[test]
    fn test_serving_always_notes_bandwidth() {
        let notes = collect_insights(&WorkloadSpec::new(WorkloadClass::Inference, 7.0));
        assert!(notes.iter().any(|n| n.contains("bandwidth-bound")));
    }

    #[test]
    fn test_concurrency_notes() {
        let mut spec = WorkloadSpec::new(WorkloadClass::Inference, 70.0);
        spec.concurrent_users = Some(500);
        assert!(collect_insights(&spec)
            .iter()
            .any(|n| n.contains("100+ concurrent")));

        spec.concurrent_users = Some(5);
        assert!(collect_insights(&spec)
            .iter()
            .any(|n| n.contains("low concurrency")));

        spec.concurrent_users = None;
        let notes = collect_insights(&spec);
        assert!(!notes.iter().any(|n| n.contains("concurren")
            && (n.contains("100+") || n.contains("low"))));
    }

    #[test]
    fn test_pretrain_scale_notes() {
        let small = collect_insights(&WorkloadSpec::new(WorkloadClass::Pretrain, 13.0));
        assert!(!small.iter().any(|n| n.contains("Never span")));

        let large = collect_insights(&WorkloadSpec::new(WorkloadClass::Pretrain, 405.0));
        assert!(large.iter().any(|n| n.contains("Never span")));
        assert!(large.iter().any(|n| n.contains("bubbles")));
    }

    #[test]
    fn test_posttrain_method_notes() {
        let note_for = |method: FineTuneMethod| {
            let mut s = WorkloadSpec::new(WorkloadClass::Posttrain, 70.0);
            s.method = method;
            collect_insights(&s)
        };
        assert!(note_for(FineTuneMethod::Lora)
            .iter()
            .any(|n| n.contains("LoRA trains")));
        assert!(note_for(FineTuneMethod::QLora)
            .iter()
            .any(|n| n.contains("QLoRA")));
        assert_eq!(
            note_for(FineTuneMethod::Rlhf)
                .iter()
                .filter(|n| n.contains("PPO") || n.contains("rollout"))
                .count(),
            2
        );
        assert!(note_for(FineTuneMethod::Dpo)
            .iter()
            .any(|n| n.contains("DPO")));
    }

    #[test]
    fn test_moe_notes() {
        let mut spec = WorkloadSpec::new(WorkloadClass::Inference, 671.0);
        spec.architecture = Architecture::MixtureOfExperts {
            active_params_b: 37.0,
        };
        let notes = collect_insights(&spec);
        assert!(notes.iter().any(|n| n.contains("expert parallelism")));
        assert!(notes.iter().any(|n| n.contains("192 GB-class")));
    }

    #[test]
    fn test_precision_notes() {
        let mut spec = WorkloadSpec::new(WorkloadClass::Inference, 70.0);
        spec.precision = Precision::Fp8;
        assert!(collect_insights(&spec).iter().any(|n| n.contains("FP8")));
        spec.precision = Precision::Fp4;
        assert!(collect_insights(&spec)
            .iter()
            .any(|n| n.contains("Blackwell-only")));
    }
}
