//! Benchmarks for normal forms and local completion.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use ncalg::prelude::*;

/// Sklyanin relations with generic-looking parameters.
fn sklyanin_ideal() -> TwoSidedIdeal<Q> {
    let a = FreeAlgebra::<Q>::new(&["x", "y", "z"]).unwrap();
    let relations = sklyanin_relations(&a, &Q::new(2, 3), &Q::new(-1, 5), &Q::from_integer(1)).unwrap();
    TwoSidedIdeal::new(&a, relations).unwrap()
}

/// A dense element of degree `d` in three generators.
fn dense_element(a: &FreeAlgebra<Q>, d: usize) -> NcPoly<Q> {
    let names = ["x", "y", "z"];
    let mut f = a.zero();
    for i in 0..3usize.pow(d as u32) {
        let mut word = Vec::with_capacity(d);
        let mut k = i;
        for _ in 0..d {
            word.push(names[k % 3]);
            k /= 3;
        }
        let term = format!("{}*{}", (i % 7) as i64 - 3, word.join("*"));
        f = f.add(&a.parse(&term).unwrap());
    }
    f
}

fn bench_normal_form(c: &mut Criterion) {
    let mut group = c.benchmark_group("normal_form");
    let ideal = sklyanin_ideal();
    let basis = ideal.groebner_basis(&LocalCompletion::default(), Some(7)).unwrap();

    for degree in [3, 4, 5, 6] {
        let f = dense_element(basis.algebra(), degree);
        group.bench_with_input(BenchmarkId::new("sklyanin", degree), &degree, |b, _| {
            b.iter(|| black_box(normal_form(&f, basis)))
        });
    }

    group.finish();
}

fn bench_completion(c: &mut Criterion) {
    let mut group = c.benchmark_group("completion");
    group.sample_size(10);

    for limit in [4, 5, 6] {
        group.bench_with_input(BenchmarkId::new("sklyanin", limit), &limit, |b, &limit| {
            b.iter(|| {
                let ideal = sklyanin_ideal();
                black_box(
                    LocalCompletion::default()
                        .complete(ideal.algebra(), ideal.generators(), Some(limit))
                        .unwrap(),
                )
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normal_form, bench_completion);
criterion_main!(benches);
