use criterion::{Criterion, black_box, criterion_group, criterion_main};
use cura_directive::{Lexer, parse, serialize_objects};

fn sample_directive(objects: usize) -> String {
    (0..objects)
        .map(|i| {
            format!(
                "FILE 'part_{i}.stl' AS part_{i} SETTINGS\n    infill_sparse_density = {i},\n    \
                 support_enable = True,\n    layer_height = 0.2,\n    pattern = 'grid'"
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn lexer_benchmark(c: &mut Criterion) {
    let src = sample_directive(50);
    c.bench_function("lexer::tokenize (50 objects)", |b| {
        b.iter(|| Lexer::new(black_box(&src)).count())
    });
}

fn parser_benchmark(c: &mut Criterion) {
    let src = sample_directive(50);
    c.bench_function("parser::parse (50 objects)", |b| {
        b.iter(|| parse(black_box(&src)).unwrap())
    });
}

fn serializer_benchmark(c: &mut Criterion) {
    let doc = parse(&sample_directive(50)).unwrap();
    c.bench_function("serializer::serialize_objects (50 objects)", |b| {
        b.iter(|| serialize_objects(black_box(&doc).iter()).unwrap())
    });
}

criterion_group!(benches, lexer_benchmark, parser_benchmark, serializer_benchmark);
criterion_main!(benches);
