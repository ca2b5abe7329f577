use std::hint::black_box;

use criterion::{
    BenchmarkGroup, BenchmarkId, Criterion, criterion_group, criterion_main, measurement::WallTime,
};

pub(crate) mod utils;
use coverhue::{
    prelude::{LuminanceTransform, SobelTransform, TextureTransform},
    sampler::{FocusSampling, Sampler, SamplingStrategy, edge_map},
};

fn bench_strategy(
    group: &mut BenchmarkGroup<'_, WallTime>,
    strategy: SamplingStrategy,
    name: &str,
    sizes: &[u32],
) {
    for size in sizes {
        let canvas = utils::canvas(*size);
        let sampler = Sampler::new(*size, strategy);
        group.bench_with_input(BenchmarkId::new(name, size), size, |b, _| {
            b.iter(|| black_box(sampler.sample_texture(&canvas)));
        });
    }
}

fn sampling_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling");
    let sizes = [100u32, 150, 200];

    bench_strategy(&mut group, SamplingStrategy::Exhaustive, "exhaustive", &sizes);
    bench_strategy(
        &mut group,
        SamplingStrategy::FocusWeighted(FocusSampling {
            seed: Some(utils::BENCH_SEED),
            ..FocusSampling::default()
        }),
        "focus",
        &sizes,
    );

    group.finish();
}

fn edge_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("edges");

    for size in [150u32, 300, 600] {
        let canvas = utils::canvas(size);

        group.bench_with_input(BenchmarkId::new("luminance-seq", size), &size, |b, _| {
            b.iter(|| black_box(LuminanceTransform::Seq.run(&canvas)));
        });
        group.bench_with_input(BenchmarkId::new("luminance-par", size), &size, |b, _| {
            b.iter(|| black_box(LuminanceTransform::Par.run(&canvas)));
        });
        let luminance = LuminanceTransform::Seq.run(&canvas);
        group.bench_with_input(BenchmarkId::new("sobel-seq", size), &size, |b, _| {
            b.iter(|| black_box(SobelTransform::Seq.run(&luminance)));
        });
        group.bench_with_input(BenchmarkId::new("sobel-par", size), &size, |b, _| {
            b.iter(|| black_box(SobelTransform::Par.run(&luminance)));
        });
        group.bench_with_input(BenchmarkId::new("edge-map", size), &size, |b, _| {
            b.iter(|| black_box(edge_map(&canvas)));
        });
    }

    group.finish();
}

criterion_group!(sampling, sampling_benchmark, edge_benchmark);
criterion_main!(sampling);
