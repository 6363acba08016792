use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use prompter::{segmenter, InMemorySource, ParagraphIndex};

/// Build a synthetic narration document with a mix of boundary shapes.
fn build_document(sentences: usize) -> String {
    let mut text = String::with_capacity(sentences * 28);
    for i in 0..sentences {
        match i % 4 {
            0 => text.push_str("The narrator pauses right here. "),
            1 => text.push_str("\"A line of dialog ends now!\" "),
            2 => text.push_str("Could another thought follow? "),
            _ => text.push_str("Then the chapter moves along. "),
        }
    }
    text
}

fn bench_boundary_scan(c: &mut Criterion) {
    let text = build_document(4_000);
    let source = InMemorySource::new(&text);

    let mut group = c.benchmark_group("boundary_scan");
    group.throughput(Throughput::Bytes(text.len() as u64));

    group.bench_function("count_sentences", |b| {
        b.iter(|| black_box(segmenter::count_sentences(&source)));
    });

    group.bench_function("count_paragraph_boundaries", |b| {
        b.iter(|| {
            let mut pos = 0;
            let mut count = 0;
            while let Some(end) = segmenter::next_paragraph_boundary(&source, pos, 4) {
                pos = end;
                count += 1;
            }
            black_box(count)
        });
    });

    group.finish();
}

fn bench_index_access(c: &mut Criterion) {
    let text = build_document(4_000);

    let mut group = c.benchmark_group("index_access");
    group.throughput(Throughput::Bytes(text.len() as u64));

    group.bench_function("sequential_discovery", |b| {
        b.iter(|| {
            let mut index = ParagraphIndex::new(InMemorySource::new(&text), 4);
            let total = index.total_paragraph_count();
            for i in 0..total {
                black_box(index.paragraph(i).expect("paragraph should exist"));
            }
        });
    });

    group.bench_function("cached_reread", |b| {
        let mut index = ParagraphIndex::new(InMemorySource::new(&text), 4);
        let total = index.total_paragraph_count();
        for i in 0..total {
            index.paragraph(i).expect("paragraph should exist");
        }
        b.iter(|| {
            for i in 0..total {
                black_box(index.paragraph(i).expect("paragraph should exist"));
            }
        });
    });

    group.bench_function("recompute_after_eviction", |b| {
        let mut index = ParagraphIndex::new(InMemorySource::new(&text), 4);
        let total = index.total_paragraph_count();
        for i in 0..total {
            index.paragraph(i).expect("paragraph should exist");
        }
        b.iter(|| {
            index.evict_cached_text();
            for i in 0..total {
                black_box(index.paragraph(i).expect("paragraph should exist"));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_boundary_scan, bench_index_access);
criterion_main!(benches);
