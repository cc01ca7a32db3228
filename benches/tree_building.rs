//! Benchmarks for property tree operations.
//!
//! These benchmarks measure building trees from declarations of increasing
//! width and depth, and the cost of filtering and merging the results.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use propdoc::ast::{FieldDecl, TypeDecl, TypeExpr};
use propdoc::builder::PropertyBuilder;
use propdoc::naming::LowerFirst;

const ARCH_VARIANT: &str = r#"`android:"arch_variant"`"#;

/// A record of `width` fields, every other one tagged, nested `depth` levels.
fn nested_record(width: usize, depth: usize) -> TypeExpr {
    let fields = (0..width)
        .map(|i| {
            let ty = if depth > 0 && i % 4 == 0 {
                nested_record(width, depth - 1)
            } else if i % 3 == 0 {
                TypeExpr::array(TypeExpr::ident("string"))
            } else {
                TypeExpr::pointer(TypeExpr::ident("bool"))
            };
            let field = FieldDecl::named(format!("Field{}", i), ty)
                .with_doc("Documentation for the field.\n  with an example\n");
            if i % 2 == 0 {
                field.with_tag(ARCH_VARIANT)
            } else {
                field
            }
        })
        .collect();
    TypeExpr::record(fields)
}

fn declaration(width: usize, depth: usize) -> TypeDecl {
    TypeDecl {
        name: "Generated".to_string(),
        doc: "Generated properties.".to_string(),
        ty: nested_record(width, depth),
    }
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    let builder = PropertyBuilder::new(&LowerFirst);

    for (width, depth) in [(8, 0), (8, 2), (16, 3)] {
        let decl = declaration(width, depth);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", width, depth)),
            &decl,
            |b, decl| b.iter(|| builder.build(black_box(decl)).unwrap()),
        );
    }

    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let tree = PropertyBuilder::new(&LowerFirst)
        .build(&declaration(16, 3))
        .unwrap();

    c.bench_function("include_by_tag", |b| {
        b.iter(|| {
            let mut filtered = tree.clone();
            filtered.include_by_tag(black_box("android"), black_box("arch_variant"));
            filtered
        })
    });
}

fn bench_nest(c: &mut Criterion) {
    let builder = PropertyBuilder::new(&LowerFirst);
    let base = builder.build(&declaration(16, 1)).unwrap();
    let addition = builder.build(&declaration(8, 1)).unwrap();

    c.bench_function("nest", |b| {
        b.iter(|| {
            let mut merged = base.clone();
            merged.nest(black_box(&addition));
            merged
        })
    });
}

criterion_group!(benches, bench_build, bench_filter, bench_nest);
criterion_main!(benches);
