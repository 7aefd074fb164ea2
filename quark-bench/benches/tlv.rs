//! TLV serialize/deserialize benchmarks.

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use quark_bench::workload::{encode_values, mixed_values};
use quark_core::{BufferInput, BufferOutput, GrowableOutput};
use quark_tlv::{
    ValueIter, deserialize_int32, deserialize_string, serialize_all, serialize_int32,
    serialize_string,
};
use std::hint::black_box;

fn benchmark_int32(c: &mut Criterion) {
    let mut buf = [0u8; 5];

    c.bench_function("tlv_int32_encode", |b| {
        b.iter(|| {
            let mut output = BufferOutput::new(&mut buf);
            serialize_int32(&mut output, black_box(-42)).unwrap();
        })
    });

    let data = [0x01, 0xD6, 0xFF, 0xFF, 0xFF];
    c.bench_function("tlv_int32_decode", |b| {
        b.iter(|| {
            let mut input = BufferInput::new(black_box(&data));
            deserialize_int32(&mut input).unwrap()
        })
    });
}

fn benchmark_string(c: &mut Criterion) {
    let text = "x".repeat(256);
    let mut group = c.benchmark_group("tlv_string");
    group.throughput(Throughput::Bytes(text.len() as u64));

    let mut buf = vec![0u8; 512];
    group.bench_function("encode", |b| {
        b.iter(|| {
            let mut output = BufferOutput::new(&mut buf);
            serialize_string(&mut output, black_box(&text)).unwrap();
        })
    });

    let mut output = GrowableOutput::new();
    serialize_string(&mut output, &text).unwrap();
    let data = output.into_bytes();
    group.bench_function("decode_borrowed", |b| {
        b.iter(|| {
            let mut input = BufferInput::new(black_box(&data));
            deserialize_string(&mut input).unwrap().len()
        })
    });

    group.finish();
}

fn benchmark_mixed_sequence(c: &mut Criterion) {
    let values = mixed_values(1000, 64);
    let data = encode_values(&values).unwrap();

    let mut group = c.benchmark_group("tlv_mixed_1000");
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("encode", |b| {
        b.iter(|| {
            let mut output = GrowableOutput::with_block_size(data.len());
            serialize_all(&mut output, black_box(&values)).unwrap();
            output.len()
        })
    });

    group.bench_function("decode", |b| {
        b.iter(|| {
            ValueIter::new(BufferInput::new(black_box(&data)))
                .map(|value| value.unwrap().tag())
                .count()
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_int32,
    benchmark_string,
    benchmark_mixed_sequence,
);
criterion_main!(benches);
