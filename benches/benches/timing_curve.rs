// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use understory_carousel::TimingCurve;
use understory_timing::TimerSlot;

fn bench_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("timing_curve/sample");

    for (name, curve) in [
        ("linear", TimingCurve::Linear),
        ("ease_in_out", TimingCurve::EaseInOut),
        (
            "cubic_bezier",
            TimingCurve::CubicBezier {
                x1: 0.68,
                y1: -0.55,
                x2: 0.27,
                y2: 1.55,
            },
        ),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut acc = 0.0;
                for i in 0..=60_u32 {
                    acc += curve.sample(black_box(f64::from(i) / 60.0));
                }
                black_box(acc)
            });
        });
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("timing_curve/parse", |b| {
        b.iter(|| {
            black_box("ease-in-out".parse::<TimingCurve>().ok());
            black_box("cubic-bezier(0.25, 0.1, 0.25, 1)".parse::<TimingCurve>().ok());
        });
    });
}

fn bench_timer_rearm(c: &mut Criterion) {
    c.bench_function("timer_slot/rearm_and_poll", |b| {
        let mut timer = TimerSlot::new();
        let mut now = 0_u64;
        b.iter(|| {
            now += 1;
            timer.arm(now, 5_000);
            black_box(timer.poll(black_box(now + 4_999)));
        });
    });
}

criterion_group!(benches, bench_sample, bench_parse, bench_timer_rearm);
criterion_main!(benches);
