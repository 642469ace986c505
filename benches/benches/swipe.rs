// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_swipe::{
    DismissConfig, DismissController, RevealConfig, RevealController, SettleStatus, SwipeLayout,
    SwipeMode, TouchEvent, clamp_reveal,
};

const ROW: Rect = Rect::new(0.0, 0.0, 360.0, 64.0);

fn reveal(mode: SwipeMode) -> RevealController {
    let mut controller = RevealController::new(RevealConfig::new().with_mode(mode))
        .expect("default thresholds are valid");
    controller.layout(&SwipeLayout::new(ROW, ROW));
    controller
}

/// A leftward drag of `moves` samples, 4 px and 8 ms apart, starting at the
/// right end of the row.
fn drag_events(moves: u64) -> Vec<TouchEvent> {
    let mut events = Vec::with_capacity(moves as usize + 2);
    let mut x = 340.0;
    events.push(TouchEvent::down(0, Point::new(x, 32.0), 0));
    for i in 1..=moves {
        x -= 4.0;
        // Small vertical wobble, as from a real finger.
        let y = if i % 2 == 0 { 33.0 } else { 31.0 };
        events.push(TouchEvent::moved(0, Point::new(x, y), i * 8));
    }
    events.push(TouchEvent::up(0, Point::new(x, 32.0), (moves + 1) * 8));
    events
}

fn bench_swipe(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_swipe");

    for moves in [16_u64, 64, 256] {
        let events = drag_events(moves);

        group.bench_function(format!("reveal_drag_and_settle(moves={moves})"), |b| {
            b.iter_batched(
                || reveal(SwipeMode::BothEdges),
                |mut controller| {
                    for event in &events {
                        controller.should_intercept(event);
                        controller.on_touch(event);
                    }
                    while controller.tick(16.0) == SettleStatus::StillSettling {}
                    black_box(controller.surface_rect());
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("dismiss_drag_and_settle(moves={moves})"), |b| {
            b.iter_batched(
                || {
                    let mut controller = DismissController::<u64>::new(DismissConfig::default())
                        .expect("default thresholds are valid");
                    controller.layout(&SwipeLayout::new(ROW, ROW));
                    controller
                },
                |mut controller| {
                    for event in &events {
                        controller.on_touch(event);
                    }
                    while controller.tick(16.0) == SettleStatus::StillSettling {}
                    black_box(controller.state());
                },
                BatchSize::SmallInput,
            );
        });
    }

    let rects = *reveal(SwipeMode::BothEdges)
        .rects()
        .expect("row has a surface");
    group.bench_function("clamp_reveal_sweep(n=1024)", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for i in 0..1024 {
                let proposed = f64::from(i) - 512.0;
                for mode in [
                    SwipeMode::RightEdgeOnly,
                    SwipeMode::LeftEdgeOnly,
                    SwipeMode::BothEdges,
                ] {
                    sum += clamp_reveal(black_box(proposed), &rects, mode, false);
                }
            }
            black_box(sum);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_swipe);
criterion_main!(benches);
