//! Software stack suggestions per workload class.
//!
//! The advisor sizes hardware; these entries point at the serving or
//! training frameworks operators actually deploy on that hardware. Static
//! tables, no scoring.

use crate::workload::{WorkloadClass, WorkloadSpec};
use serde::{Deserialize, Serialize};

/// One framework suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameworkRec {
    pub name: String,
    pub notes: String,
}

fn rec(name: &str, notes: &str) -> FrameworkRec {
    FrameworkRec {
        name: name.to_string(),
        notes: notes.to_string(),
    }
}

/// Framework suggestions for a workload.
pub fn recommend_frameworks(workload: &WorkloadSpec) -> Vec<FrameworkRec> {
    match workload.class {
        WorkloadClass::Inference => vec![
            rec(
                "vLLM",
                "Best for high-concurrency APIs. PagedAttention cuts KV cache waste \
                 to under 4%, roughly doubling throughput at 100+ concurrent users.",
            ),
            rec(
                "SGLang",
                "Best for structured output and multi-turn traffic. RadixAttention \
                 prefix caching saves 10-20% compute on shared-prefix workloads \
                 (RAG, agents).",
            ),
            rec(
                "TensorRT-LLM",
                "Lowest per-token latency below ~10 concurrent requests; tuned for \
                 Hopper and Blackwell. Pick for latency-critical, low-concurrency \
                 serving.",
            ),
        ],
        WorkloadClass::Pretrain => vec![
            rec(
                "Megatron-LM",
                "The standard for 70B+ with full 3D parallelism (TP+PP+DP); highest \
                 MFU at scale but requires adapting model code.",
            ),
            rec(
                "PyTorch FSDP",
                "Best for 7B-70B. Native PyTorch, easy HuggingFace integration, \
                 ZeRO-3-style sharding without extra dependencies.",
            ),
            rec(
                "DeepSpeed ZeRO-3",
                "Memory-efficient sharding with CPU/NVMe offload; trains very large \
                 models on modest device counts.",
            ),
        ],
        WorkloadClass::Posttrain => vec![
            rec(
                "HuggingFace TRL + PEFT",
                "Easiest LoRA/QLoRA/DPO integration. QLoRA fine-tunes a 70B model on \
                 a single 80 GB device via 4-bit base quantization.",
            ),
            rec(
                "DeepSpeed ZeRO",
                "Handles RLHF's multi-model memory footprint by sharding actor, \
                 critic, reward, and reference models.",
            ),
            rec(
                "Axolotl",
                "Turnkey fine-tuning covering LoRA, QLoRA, full fine-tune, DPO, and \
                 RLHF with minimal configuration.",
            ),
        ],
        WorkloadClass::Batch => vec![
            rec(
                "vLLM",
                "Continuous batching keeps devices near peak bandwidth utilization; \
                 best for large offline embedding and scoring jobs.",
            ),
            rec(
                "SGLang",
                "RadixAttention is particularly efficient when batch items share a \
                 common system prompt or document prefix.",
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_class_has_recommendations() {
        for class in [
            WorkloadClass::Pretrain,
            WorkloadClass::Posttrain,
            WorkloadClass::Inference,
            WorkloadClass::Batch,
        ] {
            let recs = recommend_frameworks(&WorkloadSpec::new(class, 70.0));
            assert!(!recs.is_empty());
            assert!(recs.iter().all(|r| !r.name.is_empty() && !r.notes.is_empty()));
        }
    }

    #[test]
    fn test_inference_leads_with_vllm() {
        let recs = recommend_frameworks(&WorkloadSpec::new(WorkloadClass::Inference, 70.0));
        assert_eq!(recs[0].name, "vLLM");
        assert_eq!(recs.len(), 3);
    }
}
