//! Flow benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gravure_flow::{
    AlignItems, BackgroundClipPaths, BoxStyle, BoxTree, Dimension, PaintOptions, RuledFont,
    StyledRun, TextFlow, TextStyle, WordBreak,
};

const PARAGRAPH: &str = "The quick brown fox jumps over the lazy dog while the \
    typesetter measures every word, wraps the long lines and trims whatever \
    refuses to fit inside the column.";

fn style() -> TextStyle {
    TextStyle { font_size: 16.0, ..TextStyle::default() }
}

fn benchmark_segment(c: &mut Criterion) {
    let runs = [StyledRun::new(PARAGRAPH)];

    c.bench_function("segment_paragraph", |b| {
        b.iter(|| gravure_flow::segment_runs(black_box(&runs), WordBreak::Normal));
    });

    c.bench_function("segment_break_all", |b| {
        b.iter(|| gravure_flow::segment_runs(black_box(&runs), WordBreak::BreakAll));
    });
}

fn benchmark_measure(c: &mut Criterion) {
    let mut tree = BoxTree::new();
    let root = tree
        .new_box(&BoxStyle {
            width: Dimension::Points(480.0),
            align_items: AlignItems::Start,
            ..BoxStyle::default()
        })
        .unwrap();
    let mut flow = TextFlow::prepare(
        &[StyledRun::new(PARAGRAPH)],
        style(),
        Box::new(RuledFont::new(16.0)),
    )
    .resume(None);
    flow.attach(&mut tree, root, 0).unwrap();
    tree.set_root(root);

    c.bench_function("measure_reflow", |b| {
        let mut widths = [200.0f32, 320.0, 480.0].iter().cycle();
        b.iter(|| {
            let width = *widths.next().unwrap();
            tree.compute(black_box(width), 600.0).unwrap();
        });
    });
}

fn benchmark_pipeline(c: &mut Criterion) {
    c.bench_function("pipeline_full", |b| {
        b.iter(|| {
            let mut tree = BoxTree::new();
            let root = tree
                .new_box(&BoxStyle {
                    width: Dimension::Points(320.0),
                    align_items: AlignItems::Start,
                    ..BoxStyle::default()
                })
                .unwrap();
            let mut flow = TextFlow::prepare(
                &[StyledRun::new(black_box(PARAGRAPH))],
                style(),
                Box::new(RuledFont::new(16.0)),
            )
            .resume(None);
            flow.attach(&mut tree, root, 0).unwrap();
            tree.set_root(root);
            tree.compute(320.0, 600.0).unwrap();

            let mut clips = BackgroundClipPaths::new();
            let fragment = flow.paint(&tree, 0.0, 0.0, &PaintOptions::default(), &mut clips);
            black_box(fragment);
        });
    });
}

criterion_group!(benches, benchmark_segment, benchmark_measure, benchmark_pipeline);
criterion_main!(benches);
