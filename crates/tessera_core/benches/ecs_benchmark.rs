//! # ECS Performance Benchmark
//!
//! Measures id churn and full-capacity query scans.
//!
//! Run with: `cargo bench --package tessera_core`

// Benchmarks don't need docs
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tessera_core::{declare_world, EcsWorld, Entity, Query, DEFAULT_MAX_ENTITIES};

#[derive(Clone, Copy, Debug, Default)]
struct Position {
    x: i32,
    y: i32,
}

#[derive(Clone, Copy, Debug, Default)]
struct Velocity {
    dx: i32,
    dy: i32,
}

declare_world! {
    struct BenchWorld {
        components {
            position: Position,
            velocity: Velocity,
            tag: (),
        }
    }
    presence mod has;
}

/// Builds a world where every other entity moves and every third is tagged.
fn populated(capacity: usize) -> BenchWorld {
    let mut world = BenchWorld::new(capacity);
    for i in 0..capacity {
        let Ok(e) = world.create_entity() else { break };
        let _ = world.position.set(e, Position { x: i as i32, y: 0 });
        if i % 2 == 0 {
            let _ = world.velocity.set(e, Velocity { dx: 1, dy: 1 });
        }
        if i % 3 == 0 {
            let _ = world.tag.set(e, ());
        }
    }
    world
}

/// Benchmark: create every id, destroy them all, create again (recycled).
fn bench_entity_churn(c: &mut Criterion) {
    c.bench_function("entity_churn_1024", |b| {
        let mut world = BenchWorld::new(DEFAULT_MAX_ENTITIES);
        b.iter(|| {
            world.entities.reset();
            for _ in 0..DEFAULT_MAX_ENTITIES {
                black_box(world.create_entity().ok());
            }
            for id in 0..DEFAULT_MAX_ENTITIES as u32 {
                black_box(world.destroy_entity(Entity::new(id)).ok());
            }
        });
    });
}

/// Benchmark: movement system over 1-3 term queries.
fn bench_query_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_scan");

    for capacity in [256, DEFAULT_MAX_ENTITIES, 16 * DEFAULT_MAX_ENTITIES] {
        let mut world = populated(capacity);

        group.bench_with_input(BenchmarkId::new("one", capacity), &capacity, |b, _| {
            let query = Query::one(has::position);
            b.iter(|| black_box(query.count(&world)));
        });

        group.bench_with_input(BenchmarkId::new("three", capacity), &capacity, |b, _| {
            let query = Query::three(has::position, has::velocity, has::tag);
            b.iter(|| black_box(query.count(&world)));
        });

        group.bench_with_input(BenchmarkId::new("move", capacity), &capacity, |b, _| {
            let query = Query::two(has::position, has::velocity);
            b.iter(|| {
                query.for_each(&mut world, |w, e| {
                    if let (Some(&v), Some(p)) = (w.velocity.get(e), w.position.get_mut(e)) {
                        p.x += v.dx;
                        p.y += v.dy;
                    }
                });
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_entity_churn, bench_query_scan);
criterion_main!(benches);
