use std::hint::black_box;

use bencher::feature_list;
use bump_http::arena::Arena;
use bump_http::json::{JsonWriter, from_json, parse, to_json_array};
use bump_web::entity::Feature;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

const SIZES: [usize; 3] = [1, 100, 1000];

const ARENA_CAPACITY: usize = 32 * 1024 * 1024;

fn benchmark_parse(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("json_parse");

    for size in SIZES {
        let input = feature_list(size);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            let mut arena = Arena::new(ARENA_CAPACITY);
            b.iter(|| {
                arena.reset();
                let value = parse(&arena, black_box(input)).expect("input should be valid json");
                black_box(value.as_array().map(<[_]>::len));
            });
        });
    }

    group.finish();
}

fn benchmark_decode_records(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("json_decode_records");

    for size in SIZES {
        let input = feature_list(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            let mut arena = Arena::new(ARENA_CAPACITY);
            b.iter(|| {
                arena.reset();
                let value = parse(&arena, input).expect("input should be valid json");
                let features: Vec<Feature> = value
                    .as_array()
                    .unwrap_or_default()
                    .iter()
                    .filter_map(|element| element.as_object())
                    .map(|object| from_json::<Feature>(object).expect("every element should be a feature"))
                    .collect();
                black_box(features)
            });
        });
    }

    group.finish();
}

fn benchmark_write(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("json_write");

    for size in SIZES {
        let input = feature_list(size);
        let parsed = Arena::new(ARENA_CAPACITY);
        let value = parse(&parsed, &input).expect("input should be valid json");
        let features: Vec<Feature> = value
            .as_array()
            .unwrap_or_default()
            .iter()
            .filter_map(|element| element.as_object())
            .map(|object| from_json::<Feature>(object).expect("every element should be a feature"))
            .collect();

        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &features, |b, features| {
            let mut arena = Arena::new(input.len() * 2 + 4096);
            b.iter(|| {
                arena.reset();
                let mut writer = JsonWriter::begin(&arena).expect("arena should hold the writer");
                to_json_array(features, &mut writer).expect("arena should hold the output");
                black_box(writer.end().len());
            });
        });
    }

    group.finish();
}

criterion_group!(json, benchmark_parse, benchmark_decode_records, benchmark_write);
criterion_main!(json);
