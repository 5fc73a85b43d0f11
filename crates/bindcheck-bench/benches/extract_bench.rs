//! Header extraction benchmarks.

use bindcheck_core::HeaderIndex;
use bindcheck_core::comments::strip_c_comments;
use bindcheck_core::header::{DEFAULT_EXPORT_MARKER, extract_functions, extract_structures};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

fn synthetic_header(entries: usize) -> String {
    let mut text = String::from("#include <stdint.h>\n\n");
    for i in 0..entries {
        text.push_str(&format!(
            "/** Descriptor {i}. */\ntypedef struct WGPUThing{i}Descriptor {{\n    \
             WGPUChainedStruct const * nextInChain;\n    char const * label; // nullable\n    \
             uint64_t size;\n    uint32_t count[4];\n}} WGPUThing{i}Descriptor;\n\n"
        ));
        text.push_str(&format!(
            "WGPU_EXPORT WGPUThing wgpuDeviceCreateThing{i}(WGPUDevice device, \
             WGPUThing{i}Descriptor const * descriptor, uint32_t flags);\n"
        ));
    }
    text
}

fn bench_strip_comments(c: &mut Criterion) {
    let sizes: &[usize] = &[16, 128, 1024];
    let mut group = c.benchmark_group("strip_c_comments");

    for &size in sizes {
        let text = synthetic_header(size);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| black_box(strip_c_comments(text)));
        });
    }
    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let sizes: &[usize] = &[16, 128, 1024];
    let mut group = c.benchmark_group("extract");

    for &size in sizes {
        let code = strip_c_comments(&synthetic_header(size));
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("functions", size), &code, |b, code| {
            b.iter(|| black_box(extract_functions(code, DEFAULT_EXPORT_MARKER)));
        });
        group.bench_with_input(BenchmarkId::new("structures", size), &code, |b, code| {
            b.iter(|| black_box(extract_structures(code)));
        });
    }
    group.finish();
}

fn bench_index(c: &mut Criterion) {
    let text = synthetic_header(512);
    c.bench_function("header_index/512", |b| {
        b.iter(|| black_box(HeaderIndex::from_text(&text, DEFAULT_EXPORT_MARKER)));
    });
}

criterion_group!(benches, bench_strip_comments, bench_extract, bench_index);
criterion_main!(benches);
