use criterion::{black_box, criterion_group, criterion_main, Criterion};
use clusterfit_core::workload::{Architecture, WorkloadClass, WorkloadSpec};
use clusterfit_core::Catalog;

fn bench_recommend_inference(c: &mut Criterion) {
    let catalog = Catalog::builtin();
    let workload = WorkloadSpec::new(WorkloadClass::Inference, 70.0);

    c.bench_function("recommend_70b_inference", |b| {
        b.iter(|| clusterfit_core::recommend(black_box(&catalog), black_box(&workload)))
    });
}

fn bench_recommend_moe_pretrain(c: &mut Criterion) {
    let catalog = Catalog::builtin();
    let mut workload = WorkloadSpec::new(WorkloadClass::Pretrain, 671.0);
    workload.architecture = Architecture::MixtureOfExperts {
        active_params_b: 37.0,
    };

    c.bench_function("recommend_671b_moe_pretrain", |b| {
        b.iter(|| clusterfit_core::recommend(black_box(&catalog), black_box(&workload)))
    });
}

criterion_group!(benches, bench_recommend_inference, bench_recommend_moe_pretrain);
criterion_main!(benches);
