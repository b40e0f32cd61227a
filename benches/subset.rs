use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use finite_automata::prelude::*;

/// Accepts words over `a` and `b` whose `k`-th symbol from the end is a `b`. The subset
/// construction discovers all `2^k` sets of states that contain the initial state.
fn kth_from_last(k: usize) -> NFA<char> {
    let mut builder = NFA::builder()
        .with_states(k + 1)
        .with_alphabet(['a', 'b'])
        .with_initial(0)
        .with_accepting([k])
        .with_edges([(0, 'a', 0), (0, 'b', 0), (0, 'b', 1)]);
    for i in 1..k {
        builder.add_edge(i, 'a', i + 1).add_edge(i, 'b', i + 1);
    }
    builder.into_nfa().unwrap()
}

fn chain(n: usize) -> NFA<char> {
    let mut builder = NFA::builder()
        .with_states(n)
        .with_alphabet(['a'])
        .with_initial(0)
        .with_accepting([n - 1]);
    for i in 0..n - 1 {
        builder.add_edge(i, 'a', i + 1);
    }
    builder.into_nfa().unwrap()
}

fn silent_chain(n: usize) -> ENFA<char> {
    let mut builder = ENFA::builder()
        .with_states(n)
        .with_alphabet(['a'])
        .with_epsilon('_')
        .with_initial(0)
        .with_accepting([n - 1]);
    for i in 0..n - 1 {
        builder.add_edge(i, '_', i + 1);
    }
    builder.into_enfa().unwrap()
}

pub fn criterion_benchmark_subset(c: &mut Criterion) {
    let mut group = c.benchmark_group("kth from last");
    for k in [4, 8, 12] {
        let nfa = kth_from_last(k);
        group.bench_with_input(BenchmarkId::from_parameter(k), &nfa, |bencher, nfa| {
            bencher.iter(|| black_box(nfa.subset_construction().unwrap().size()))
        });
    }
    group.finish();

    let nfa = chain(10_000);
    c.bench_function("chain 10000", |bencher| {
        bencher.iter(|| black_box(nfa.subset_construction().unwrap().size()))
    });
}

pub fn criterion_benchmark_closures(c: &mut Criterion) {
    let enfa = silent_chain(1_000);
    c.bench_function("closures 1000", |bencher| {
        bencher.iter(|| black_box(enfa.compute_closures().len()))
    });
}

criterion_group!(
    benches,
    criterion_benchmark_subset,
    criterion_benchmark_closures,
);
criterion_main!(benches);
