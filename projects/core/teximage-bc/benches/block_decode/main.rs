use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use teximage_bc::{decode_block, BlockFormat, Decoder};
use teximage_common::decoded_4x4_block::Decoded4x4Block;

#[cfg(all(
    any(target_os = "linux", target_os = "macos"),
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
))]
use pprof::criterion::{Output, PProfProfiler};

/// Fills `size` bytes with blocks whose endpoints and indices vary per block.
fn make_blocks(format: BlockFormat, size: usize) -> Vec<u8> {
    let block_size = format.block_size();
    let mut data = vec![0u8; size];
    for (block_idx, block) in data.chunks_exact_mut(block_size).enumerate() {
        for (i, byte) in block.iter_mut().enumerate() {
            *byte = ((block_idx * (i + 1)) % 255) as u8;
        }
    }
    data
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Decode Blocks (BCn -> RGBA8888)");

    // 8MB of blocks per format
    let size = 8388608;
    group.throughput(criterion::Throughput::Bytes(size as u64));

    for format in BlockFormat::all_values() {
        let input = make_blocks(*format, size);
        let blocks_count = size / format.block_size();
        let mut output = vec![Decoded4x4Block::new(Default::default()); blocks_count];

        for decoder in Decoder::all_values() {
            group.bench_with_input(
                BenchmarkId::new(format!("{format:?}"), format!("{decoder:?}")),
                &input,
                |b, input| {
                    b.iter(|| {
                        for (block, out) in input
                            .chunks_exact(format.block_size())
                            .zip(output.iter_mut())
                        {
                            if let Some(decoded) = decode_block(*format, *decoder, block) {
                                *out = decoded;
                            }
                        }
                    })
                },
            );
        }

        group.bench_function(format!("{format:?}/has_identical_pixels"), |b| {
            b.iter(|| {
                output
                    .iter()
                    .filter(|block| block.has_identical_pixels())
                    .count()
            })
        });
    }

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
