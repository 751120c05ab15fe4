//! Benchmarks for plan execution.
//!
//! Catalog setup happens outside the measured closure; each iteration
//! measures bind plus execution of the full pipeline.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tern_core::schema::TableBuilder;
use tern_core::{DataType, Row, Value};
use tern_query::ast::{
    AggregateCall, AggregateFunc, Expr, JoinKind, PlanNode, SortKey, WindowCall, WindowFunc,
};
use tern_query::PlanRunner;
use tern_storage::Catalog;

/// Simple LCG for reproducible pseudo-random values.
fn lcg_values(count: usize, seed: u64) -> Vec<i64> {
    let mut s = seed;
    (0..count)
        .map(|_| {
            s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
            (s >> 33) as i64 % 1000
        })
        .collect()
}

fn setup_catalog(row_count: usize) -> Catalog {
    let mut catalog = Catalog::new();
    catalog
        .create_table(
            TableBuilder::new("events")
                .unwrap()
                .add_column("id", DataType::Integer)
                .unwrap()
                .add_column("user_id", DataType::Integer)
                .unwrap()
                .add_column("amount", DataType::Integer)
                .unwrap()
                .build()
                .unwrap(),
        )
        .unwrap();
    catalog
        .create_table(
            TableBuilder::new("users")
                .unwrap()
                .add_column("id", DataType::Integer)
                .unwrap()
                .add_column("segment", DataType::Integer)
                .unwrap()
                .build()
                .unwrap(),
        )
        .unwrap();

    let amounts = lcg_values(row_count, 12345);
    catalog
        .insert_rows(
            "events",
            (0..row_count)
                .map(|i| {
                    Row::new(vec![
                        Value::Integer(i as i64),
                        Value::Integer((i % 100) as i64),
                        Value::Integer(amounts[i]),
                    ])
                })
                .collect(),
        )
        .unwrap();
    catalog
        .insert_rows(
            "users",
            (0..100)
                .map(|i| {
                    Row::new(vec![
                        Value::Integer(i as i64),
                        Value::Integer((i % 5) as i64),
                    ])
                })
                .collect(),
        )
        .unwrap();
    catalog
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    for size in [1_000, 10_000] {
        let catalog = setup_catalog(size);
        let plan = PlanNode::scan("events").filter(Expr::col("amount").ge(Expr::lit(500i64)));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let runner = PlanRunner::new(&catalog);
                black_box(runner.execute(&plan).unwrap())
            })
        });
    }
    group.finish();
}

fn bench_hash_join(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_join");
    for size in [1_000, 10_000] {
        let catalog = setup_catalog(size);
        let plan = PlanNode::scan("events").join(
            PlanNode::scan("users"),
            JoinKind::Inner,
            Some(Expr::col("events.user_id").eq(Expr::col("users.id"))),
        );
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let runner = PlanRunner::new(&catalog);
                black_box(runner.execute(&plan).unwrap())
            })
        });
    }
    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    for size in [1_000, 10_000] {
        let catalog = setup_catalog(size);
        let plan = PlanNode::scan("events").aggregate(
            vec![(Expr::col("user_id"), "user_id")],
            vec![
                AggregateCall::count_star("n"),
                AggregateCall::new(AggregateFunc::Sum, Expr::col("amount"), "total"),
            ],
        );
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let runner = PlanRunner::new(&catalog);
                black_box(runner.execute(&plan).unwrap())
            })
        });
    }
    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");
    for size in [1_000, 10_000] {
        let catalog = setup_catalog(size);
        let plan = PlanNode::scan("events").sort(vec![SortKey::desc(Expr::col("amount"))]);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let runner = PlanRunner::new(&catalog);
                black_box(runner.execute(&plan).unwrap())
            })
        });
    }
    group.finish();
}

fn bench_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("window");
    for size in [1_000, 10_000] {
        let catalog = setup_catalog(size);
        let plan = PlanNode::scan("events").window(vec![WindowCall::new(
            WindowFunc::RowNumber,
            "rn",
        )
        .partition_by(vec![Expr::col("user_id")])
        .order_by(vec![SortKey::desc(Expr::col("amount"))])]);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let runner = PlanRunner::new(&catalog);
                black_box(runner.execute(&plan).unwrap())
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_filter,
    bench_hash_join,
    bench_aggregate,
    bench_sort,
    bench_window
);
criterion_main!(benches);
