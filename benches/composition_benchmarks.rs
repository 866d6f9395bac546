// Copyright 2025 Cowboy AI, LLC.

use std::sync::Arc;

use chrono::Utc;
use cim_composer::{
    CaseSignificance, Comment, Composer, ConceptAssembler, FullyQualifiedName,
    InMemoryEntityStore, Language, PublicId, StampCoordinate, Status, UsDialect,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn open(composer: &mut Composer) -> cim_composer::Session {
    composer.open_now(
        Status::Active,
        PublicId::from_name("bench author"),
        PublicId::from_name("bench module"),
        PublicId::from_name("bench path"),
    )
}

fn benchmark_compose_and_commit(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose_and_commit");

    for concepts in [1usize, 10, 100] {
        group.bench_with_input(
            BenchmarkId::from_parameter(concepts),
            &concepts,
            |b, &concepts| {
                b.iter(|| {
                    let mut composer = Composer::new(Arc::new(InMemoryEntityStore::new()));
                    let session = open(&mut composer);
                    for i in 0..concepts {
                        let concept = session.compose(ConceptAssembler::new()).unwrap();
                        concept
                            .attach(FullyQualifiedName::new(
                                Language::English,
                                format!("concept {i}"),
                                CaseSignificance::NotCaseSensitive,
                            ))
                            .unwrap()
                            .attach(UsDialect::preferred())
                            .unwrap();
                    }
                    composer.close_session(&session).unwrap();
                    black_box(session.components_in_session_count())
                });
            },
        );
    }

    group.finish();
}

fn benchmark_deep_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("deep_attach_chain");

    for depth in [10usize, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut composer = Composer::new(Arc::new(InMemoryEntityStore::new()));
                let session = open(&mut composer);
                let mut node = session.compose(ConceptAssembler::new()).unwrap();
                for i in 0..depth {
                    node = node.attach(Comment::new(format!("level {i}"))).unwrap();
                }
                composer.cancel_session(&session).unwrap();
                black_box(node.public_id().clone())
            });
        });
    }

    group.finish();
}

fn benchmark_stamp_key(c: &mut Criterion) {
    let stamp = StampCoordinate::new(
        Status::Active,
        Utc::now(),
        PublicId::from_name("author"),
        PublicId::from_name("module"),
        PublicId::from_name("path"),
    );

    c.bench_function("stamp_key", |b| b.iter(|| black_box(stamp.key())));
}

criterion_group!(
    benches,
    benchmark_compose_and_commit,
    benchmark_deep_chain,
    benchmark_stamp_key
);
criterion_main!(benches);
