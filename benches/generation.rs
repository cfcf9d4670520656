use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use serde_json::json;

use codebuilder_worker::domain::GenerationConfiguration;
use codebuilder_worker::service::{
    CodeGeneratorManager, GenerationRequest, GeneratorRegistry, RawOptions, ValidatorRegistry,
};

fn manager() -> CodeGeneratorManager {
    CodeGeneratorManager::with_registries(
        Arc::new(GeneratorRegistry::with_defaults()),
        Arc::new(ValidatorRegistry::with_defaults()),
    )
}

fn options(value: serde_json::Value) -> RawOptions {
    value.as_object().cloned().unwrap_or_default()
}

fn bench_generators(c: &mut Criterion) {
    let manager = manager();
    let mut group = c.benchmark_group("generators");

    for generator in ["random", "sequential"] {
        group.bench_with_input(
            BenchmarkId::from_parameter(generator),
            &generator,
            |b, generator| {
                b.iter(|| {
                    let request =
                        GenerationRequest::new(black_box(1000)).with_generator(*generator);
                    manager.generate(request).unwrap()
                });
            },
        );
    }

    group.finish();
}

fn bench_validator_chain(c: &mut Criterion) {
    let manager = manager();
    let mut group = c.benchmark_group("validator_chain");

    group.bench_function("none", |b| {
        b.iter(|| manager.generate(GenerationRequest::new(black_box(1000))).unwrap());
    });

    group.bench_function("all_builtin", |b| {
        b.iter(|| {
            let request = GenerationRequest::new(black_box(1000))
                .with_validator("composition", options(json!({"min_letters": 2, "min_digits": 2})))
                .with_validator("repetition", options(json!({"max_consecutive": 1})))
                .with_validator("denylist", options(json!({"words": ["FOO", "BAR"]})));
            manager.generate(request).unwrap()
        });
    });

    group.finish();
}

fn bench_dense_space(c: &mut Criterion) {
    let manager = manager();

    // 900 of 1000 possible codes, dominated by duplicate draws
    c.bench_function("dense_pattern_space", |b| {
        b.iter(|| {
            let configuration = GenerationConfiguration {
                pattern: Some("{DIGIT:3}".to_string()),
                ..Default::default()
            };
            let request =
                GenerationRequest::new(black_box(900)).with_configuration(configuration);
            manager.generate(request).unwrap()
        });
    });
}

criterion_group!(
    benches,
    bench_generators,
    bench_validator_chain,
    bench_dense_space
);
criterion_main!(benches);
