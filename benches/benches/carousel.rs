// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Point;
use understory_carousel::{AutoplayConfig, Carousel, CarouselConfig, Channel, ChannelSet};

fn autoplay_config() -> CarouselConfig {
    CarouselConfig {
        autoplay: AutoplayConfig {
            interval_ms: 5_000,
            ..AutoplayConfig::default()
        },
        ..CarouselConfig::default()
    }
}

fn bench_step_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("carousel/step_cycle");

    // One full before/start/end cycle, with and without subscribers listening.
    for subscribers in [0usize, 4, 16] {
        group.bench_with_input(
            BenchmarkId::new("subscribers", subscribers),
            &subscribers,
            |b, &subscribers| {
                let mut carousel = Carousel::new(12, autoplay_config(), 0);
                for _ in 0..subscribers {
                    carousel.subscribe(ChannelSet::ALL, |n| {
                        black_box(n.snapshot.current);
                    });
                }
                let mut now = 0_u64;
                b.iter(|| {
                    now += 300;
                    carousel.step_forward(now);
                    carousel.transition_finished(now + 250);
                });
            },
        );
    }

    group.finish();
}

fn bench_goto_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("carousel/goto");

    for len in [8usize, 64, 512] {
        group.bench_with_input(BenchmarkId::new("walk_to_end", len), &len, |b, &len| {
            b.iter_batched(
                || Carousel::new(len, CarouselConfig::default(), 0),
                |mut carousel| {
                    carousel.goto(len - 1, 0);
                    let mut now = 0;
                    while carousel.is_moving() {
                        now += 60;
                        carousel.transition_finished(now);
                    }
                    black_box(carousel.current());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_drag(c: &mut Criterion) {
    c.bench_function("carousel/drag_commit", |b| {
        b.iter_batched(
            || {
                let mut carousel = Carousel::new(5, CarouselConfig::default(), 0);
                carousel.set_track_width(800.0);
                carousel.subscribe(Channel::Offset, |n| {
                    black_box(n.snapshot.offset);
                });
                carousel
            },
            |mut carousel| {
                carousel.pointer_down(Point::new(700.0, 0.0), 0);
                for step in 1..=30_u32 {
                    let x = 700.0 - f64::from(step) * 10.0;
                    carousel.pointer_move(Point::new(x, 0.0), u64::from(step) * 8);
                }
                black_box(carousel.pointer_up(Point::new(400.0, 0.0), 240));
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_step_cycle, bench_goto_walk, bench_drag);
criterion_main!(benches);
