use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use teximage_float::filter::{BoxFilter, Filter, KaiserFilter, MitchellFilter, TriangleFilter};
use teximage_float::{FloatImage, WrapMode};

#[cfg(all(
    any(target_os = "linux", target_os = "macos"),
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
))]
use pprof::criterion::{Output, PProfProfiler};

fn noise(width: u32, height: u32) -> FloatImage {
    let mut image = FloatImage::new(width, height);
    let mut state = 0x1234_5678u32;
    for c in 0..4 {
        for v in image.channel_mut(c) {
            // xorshift
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            *v = (state >> 8) as f32 / (1 << 24) as f32;
        }
    }
    image
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Resample 1024x1024 RGBA32F");
    let image = noise(1024, 1024);
    group.throughput(criterion::Throughput::Elements(image.pixel_count() as u64));

    let kaiser = KaiserFilter::default();
    let mitchell = MitchellFilter::default();
    let filters: [(&str, &dyn Filter); 4] = [
        ("box", &BoxFilter),
        ("triangle", &TriangleFilter),
        ("kaiser", &kaiser),
        ("mitchell", &mitchell),
    ];

    for (name, filter) in filters {
        group.bench_with_input(BenchmarkId::new("downsample", name), &image, |b, image| {
            b.iter(|| image.downsample(filter, WrapMode::Mirror, None))
        });
        group.bench_with_input(
            BenchmarkId::new("downsample_alpha_weighted", name),
            &image,
            |b, image| b.iter(|| image.downsample(filter, WrapMode::Mirror, Some(3))),
        );
    }

    group.bench_with_input(BenchmarkId::new("fast_downsample", "box"), &image, |b, image| {
        b.iter(|| image.fast_downsample())
    });

    group.finish();
}

#[cfg(all(
    any(target_os = "linux", target_os = "macos"),
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
))]
criterion_group! {
    name = benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = criterion_benchmark
}

#[cfg(not(all(
    any(target_os = "linux", target_os = "macos"),
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
)))]
criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = criterion_benchmark
}

criterion_main!(benches);
