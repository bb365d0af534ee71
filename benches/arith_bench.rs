use arithcode::{decode, encode, ArithmeticEncoder, FrequencyModel};
use criterion::{criterion_group, criterion_main, Criterion};

fn sample_text(len: usize) -> String {
    // Skewed alphabet so straddle renormalization shows up in the profile.
    let pattern = "aaaaaaaabbbbccd aaab\n";
    pattern.chars().cycle().take(len).collect()
}

fn bench_model(c: &mut Criterion) {
    let mut group = c.benchmark_group("model");
    let input = sample_text(10000);

    group.bench_function("build", |b| {
        b.iter(|| FrequencyModel::build(&input).unwrap())
    });
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    let input = sample_text(10000);
    let model = FrequencyModel::build(&input).unwrap();

    group.bench_function("text", |b| b.iter(|| encode(&model, &input).unwrap()));

    group.bench_function("push", |b| {
        b.iter(|| {
            let mut encoder = ArithmeticEncoder::new(&model);
            for symbol in input.chars() {
                encoder.encode(symbol).unwrap();
            }
            encoder.finish()
        })
    });
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    let input = sample_text(10000);
    let model = FrequencyModel::build(&input).unwrap();
    let bits = encode(&model, &input).unwrap();

    group.bench_function("text", |b| b.iter(|| decode(&model, &bits).unwrap()));
}

criterion_group!(benches, bench_model, bench_encode, bench_decode);
criterion_main!(benches);
