use criterion::{Criterion, black_box, criterion_group, criterion_main};
use cura_blocks::{Rewrite, scan};

fn sample_file(blocks: usize) -> String {
    (0..blocks)
        .map(|i| {
            format!(
                "module part_{i}() {{ cube({i}); }}\npart_{i}();\n\
                 /*cura-export\n  'part_{i}();' AS part_{i} SETTINGS\n    wall_line_count = {i}\n*/\n"
            )
        })
        .collect()
}

fn scan_benchmark(c: &mut Criterion) {
    let src = sample_file(200);
    c.bench_function("scanner::scan (200 blocks)", |b| {
        b.iter(|| scan(black_box(&src)).blocks().len())
    });
}

fn render_benchmark(c: &mut Criterion) {
    let src = sample_file(200);
    let doc = scan(&src);
    c.bench_function("writer::render neutralize (200 blocks)", |b| {
        b.iter(|| black_box(&doc).render(|_, _| Rewrite::Neutralize))
    });
}

criterion_group!(benches, scan_benchmark, render_benchmark);
criterion_main!(benches);
