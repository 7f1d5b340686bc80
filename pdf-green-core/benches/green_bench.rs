//! Green tree construction benchmarks
//!
//! Measures the node cache hit path, list building across representations
//! and object-to-tree conversion.
//!
//! Run with: `cargo bench green_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pdf_green::objects::{Dictionary, Object, ObjectId};
use pdf_green::syntax::GreenSyntax;
use pdf_green::writer::{SyntaxWriter, XRefRecord};
use pdf_green::{GreenNode, ListBuilder, SyntaxFactory, SyntaxKind, SyntaxOptions};

fn benchmark_cache_hit_path(c: &mut Criterion) {
    let factory = SyntaxFactory::default();
    let token = factory.keyword(SyntaxKind::NullKeyword, None, None).unwrap();
    // Warm the cache
    let _ = factory.literal(token.clone()).unwrap();

    c.bench_function("cached_literal_expression", |b| {
        b.iter(|| black_box(factory.literal(black_box(token.clone())).unwrap()))
    });

    let uncached = SyntaxFactory::uncached();
    c.bench_function("uncached_literal_expression", |b| {
        b.iter(|| black_box(uncached.literal(black_box(token.clone())).unwrap()))
    });
}

fn benchmark_list_building(c: &mut Criterion) {
    let factory = SyntaxFactory::default();
    let mut group = c.benchmark_group("list_building");

    for count in [2usize, 3, 8, 64, 1024].iter() {
        let elements: Vec<GreenNode> = (0..*count)
            .map(|i| {
                let leading = (i > 0).then(|| factory.whitespace(" "));
                let literal = factory
                    .literal(factory.integer(i as i64, leading, None).unwrap())
                    .unwrap();
                factory.array_element(literal).unwrap().into_green()
            })
            .collect();

        group.bench_with_input(BenchmarkId::new("elements", count), &elements, |b, elements| {
            b.iter(|| {
                let builder: ListBuilder = elements.iter().cloned().collect();
                black_box(builder.to_list_node())
            })
        });
    }

    group.finish();
}

fn benchmark_slot_offset(c: &mut Criterion) {
    let mut group = c.benchmark_group("slot_offset");

    for threshold in [4usize, 10, 100_000].iter() {
        let factory = SyntaxFactory::with_options(
            SyntaxOptions::default().with_lots_of_children_threshold(*threshold),
        );
        let mut builder = factory.list_builder();
        for i in 0..512 {
            builder.add(factory.xref_entry_from_values(i * 20, 0, true).unwrap().into_green());
        }
        let list = builder.to_list_node().unwrap();

        group.bench_with_input(BenchmarkId::new("threshold", threshold), &list, |b, list| {
            b.iter(|| black_box(list.slot_offset(black_box(400))))
        });
    }

    group.finish();
}

fn benchmark_syntax_writer(c: &mut Criterion) {
    let writer = SyntaxWriter::default();

    let mut page = Dictionary::new();
    page.set("Type", Object::name("Page"));
    page.set("Parent", ObjectId::new(2, 0));
    page.set(
        "MediaBox",
        Object::from(vec![
            Object::from(0),
            Object::from(0),
            Object::from(612),
            Object::from(792),
        ]),
    );
    page.set("Contents", ObjectId::new(4, 0));
    let page = Object::from(page);

    c.bench_function("indirect_object_tree", |b| {
        b.iter(|| black_box(writer.indirect_object(ObjectId::new(3, 0), &page).unwrap()))
    });

    let records: Vec<XRefRecord> = (1..=200)
        .map(|n| XRefRecord::new(ObjectId::new(n, 0), u64::from(n) * 97))
        .collect();
    c.bench_function("xref_section_tree", |b| {
        b.iter(|| black_box(writer.xref_section(black_box(&records)).unwrap()))
    });
}

criterion_group!(
    benches,
    benchmark_cache_hit_path,
    benchmark_list_building,
    benchmark_slot_offset,
    benchmark_syntax_writer
);
criterion_main!(benches);
