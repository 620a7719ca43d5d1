// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end tests for the `understory_carousel` crate.
//!
//! These drive a [`Carousel`] the way a host would: commands, pointer input,
//! finished signals, frames, and timer ticks, all with explicit timestamps.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Point;
use understory_carousel::{
    AutoplayConfig, Carousel, CarouselConfig, Channel, ChannelSet, ConfigPatch, Direction,
    GestureOutcome, Notification, Ring, SnapDivisor, Snapshot, TimingCurve,
};

type Log = Rc<RefCell<Vec<Notification>>>;

fn record(carousel: &mut Carousel, channels: impl Into<ChannelSet>) -> Log {
    let log: Log = Rc::default();
    let sink = Rc::clone(&log);
    carousel.subscribe(channels, move |n: &Notification| sink.borrow_mut().push(*n));
    log
}

fn drain(log: &Log) -> Vec<Channel> {
    log.borrow_mut().drain(..).map(|n| n.channel).collect()
}

fn autoplay(interval_ms: u32) -> CarouselConfig {
    CarouselConfig {
        autoplay: AutoplayConfig {
            interval_ms,
            ..AutoplayConfig::default()
        },
        ..CarouselConfig::default()
    }
}

fn at(x: f64) -> Point {
    Point::new(x, 0.0)
}

#[test]
fn stepping_around_the_ring_returns_home() {
    for len in 1..8 {
        let mut carousel = Carousel::new(len, CarouselConfig::default(), 0);
        for _ in 0..len {
            carousel.step_forward(0);
            carousel.transition_finished(0);
            while carousel.needs_frame() {
                carousel.frame(0);
            }
        }
        assert_eq!(carousel.current(), 0, "forward around {len} slides");

        for _ in 0..len {
            carousel.step_backward(0);
            carousel.transition_finished(0);
            while carousel.needs_frame() {
                carousel.frame(0);
            }
        }
        assert_eq!(carousel.current(), 0, "backward around {len} slides");
    }
}

#[test]
fn neighbors_stay_adjacent_after_every_step() {
    let mut carousel = Carousel::new(5, CarouselConfig::default(), 0);
    let ring = Ring::new(5);
    for direction in [
        Direction::Forward,
        Direction::Forward,
        Direction::Backward,
        Direction::Backward,
        Direction::Backward,
    ] {
        match direction {
            Direction::Forward => carousel.step_forward(0),
            Direction::Backward => carousel.step_backward(0),
        };
        let Snapshot {
            previous,
            current,
            next,
            direction: dir,
            ..
        } = carousel.snapshot();
        assert_eq!(dir, direction);
        assert_eq!(previous, ring.step(current, dir.reversed()));
        assert_eq!(next, ring.step(current, dir));
        carousel.transition_finished(0);
    }
    assert_eq!(carousel.current(), 4);
}

#[test]
fn only_one_transition_at_a_time() {
    let mut carousel = Carousel::new(5, CarouselConfig::default(), 0);
    let log = record(&mut carousel, Channel::Before);

    assert!(carousel.step_forward(0));
    assert!(!carousel.step_forward(10));
    assert!(!carousel.step_backward(20));
    assert!(!carousel.goto(4, 30));
    assert!(!carousel.pointer_down(at(0.0), 40));
    assert_eq!(carousel.current(), 1);
    assert_eq!(drain(&log), [Channel::Before]);

    assert!(carousel.transition_finished(250));
    assert!(!carousel.transition_finished(260), "stray finished signal");
    assert!(carousel.step_forward(300));
}

#[test]
fn goto_walks_one_slide_per_cycle() {
    let mut carousel = Carousel::new(6, CarouselConfig::default(), 0);
    let log = record(&mut carousel, ChannelSet::LIFECYCLE);

    assert!(carousel.goto(3, 0));
    let mut now = 0;
    while carousel.is_moving() {
        assert!(!carousel.step_backward(now), "walk cannot be interrupted");
        now += 50;
        carousel.transition_finished(now);
    }
    assert_eq!(carousel.current(), 3);

    let log = log.borrow();
    let starts: Vec<_> = log
        .iter()
        .filter(|n| n.channel == Channel::Start)
        .map(|n| {
            (
                n.snapshot.current,
                n.snapshot.duration_ms,
                n.snapshot.timing_curve,
            )
        })
        .collect();
    assert_eq!(
        starts,
        [
            (1, 60, TimingCurve::Linear),
            (2, 60, TimingCurve::Linear),
            (3, 250, TimingCurve::EaseOut),
        ]
    );
    let ends = log.iter().filter(|n| n.channel == Channel::End).count();
    assert_eq!(ends, 3);

    let engine = carousel.engine();
    assert_eq!(engine.duration_ms(), 250);
    assert_eq!(engine.timing_curve(), TimingCurve::EaseInOut);
}

#[test]
fn goto_to_current_or_out_of_range_is_a_noop() {
    let mut carousel = Carousel::new(4, CarouselConfig::default(), 0);
    let log = record(&mut carousel, ChannelSet::ALL);
    assert!(!carousel.goto(0, 0));
    assert!(!carousel.goto(4, 0));
    assert!(log.borrow().is_empty());
}

#[test]
fn five_slides_with_five_second_interval() {
    let mut carousel = Carousel::new(5, autoplay(5_000), 0);
    let log = record(&mut carousel, ChannelSet::LIFECYCLE);
    assert_eq!(carousel.deadline(), Some(5_000));

    assert!(carousel.step_forward(0));
    assert_eq!(drain(&log), [Channel::Before, Channel::Start]);
    assert_eq!(carousel.deadline(), None);

    assert!(carousel.transition_finished(250));
    assert_eq!(drain(&log), [Channel::End]);
    assert_eq!(carousel.deadline(), Some(5_250));

    assert!(!carousel.tick(5_249));
    assert!(carousel.tick(5_250));
    assert_eq!(drain(&log), [Channel::Before, Channel::Start]);
    assert_eq!(carousel.current(), 2);
    assert_eq!(carousel.engine().duration_ms(), 1_000);
    assert_eq!(carousel.deadline(), None);

    assert!(carousel.transition_finished(6_250));
    assert_eq!(carousel.engine().duration_ms(), 250);
    assert_eq!(carousel.deadline(), Some(11_250));
}

#[test]
fn pause_and_resume_twice_fires_once() {
    let mut carousel = Carousel::new(4, autoplay(1_000), 0);
    carousel.set_attribute("auto-pause", Some(""), 100);
    assert_eq!(carousel.deadline(), None);

    carousel.set_attribute("auto-pause", None, 200);
    carousel.set_config(
        ConfigPatch {
            paused: Some(false),
            ..ConfigPatch::default()
        },
        300,
    );

    let fired = (0..=3_000).filter(|now| carousel.tick(*now)).count();
    assert_eq!(fired, 1);
    assert_eq!(carousel.current(), 1);
}

#[test]
fn hover_suspends_auto_advance() {
    let mut carousel = Carousel::new(4, autoplay(1_000), 0);
    carousel.pointer_enter(500);
    assert!(!carousel.tick(1_000));
    carousel.pointer_leave(1_500);
    assert_eq!(carousel.deadline(), Some(2_500));

    carousel.set_attribute("auto-on-hover", Some("true"), 1_600);
    carousel.pointer_enter(1_700);
    assert!(carousel.tick(2_500));
}

#[test]
fn auto_direction_backward() {
    let mut carousel = Carousel::new(4, autoplay(100), 0);
    carousel.set_attribute("data-auto-dir", Some("back"), 0);
    assert!(carousel.tick(100));
    assert_eq!(carousel.current(), 3);
    assert_eq!(carousel.snapshot().direction, Direction::Backward);
}

#[test]
fn drag_past_threshold_commits_with_velocity() {
    let config = CarouselConfig {
        snap: SnapDivisor::new(4),
        ..CarouselConfig::default()
    };
    let mut carousel = Carousel::new(5, config, 0);
    carousel.set_track_width(800.0);
    let offsets = record(&mut carousel, Channel::Offset);

    assert!(carousel.pointer_down(at(600.0), 1_000));
    assert!(!carousel.engine().transition_enabled());
    carousel.pointer_move(at(500.0), 1_050);
    carousel.pointer_move(at(400.0), 1_100);
    assert_eq!(carousel.engine().offset(), -200.0);

    // 200px in 100ms leaves 600px at 2px/ms.
    assert_eq!(carousel.pointer_up(at(400.0), 1_100), GestureOutcome::Committed);
    assert_eq!(carousel.current(), 1);
    assert_eq!(carousel.engine().duration_ms(), 300);
    assert_eq!(carousel.engine().timing_curve(), TimingCurve::EaseOut);
    assert_eq!(carousel.engine().offset(), 0.0);
    assert!(carousel.engine().transition_enabled());

    let pixels: Vec<_> = offsets.borrow().iter().map(|n| n.snapshot.offset).collect();
    assert_eq!(pixels, [-100.0, -200.0, 0.0]);

    carousel.transition_finished(1_400);
    assert_eq!(carousel.engine().duration_ms(), 250);
}

#[test]
fn drag_below_threshold_bounces_through_the_lifecycle() {
    let config = CarouselConfig {
        snap: SnapDivisor::new(4),
        ..CarouselConfig::default()
    };
    let mut carousel = Carousel::new(5, config, 0);
    carousel.set_track_width(800.0);
    let log = record(&mut carousel, ChannelSet::LIFECYCLE);

    carousel.pointer_down(at(600.0), 0);
    carousel.pointer_move(at(401.0), 50);
    assert_eq!(carousel.pointer_up(at(401.0), 100), GestureOutcome::Bounced);
    assert_eq!(carousel.current(), 0);
    assert_eq!(drain(&log), [Channel::Before, Channel::Start]);

    carousel.transition_finished(350);
    assert_eq!(drain(&log), [Channel::End]);
    assert_eq!(carousel.current(), 0);
}

#[test]
fn press_and_release_in_place_runs_no_lifecycle() {
    let mut carousel = Carousel::new(3, CarouselConfig::default(), 0);
    let log = record(&mut carousel, ChannelSet::LIFECYCLE);
    carousel.pointer_down(at(10.0), 0);
    assert_eq!(carousel.pointer_up(at(10.0), 30), GestureOutcome::NoChange);
    assert!(log.borrow().is_empty());
    assert!(!carousel.is_moving());
}

#[test]
fn pointer_leave_releases_the_drag() {
    let mut carousel = Carousel::new(3, CarouselConfig::default(), 0);
    carousel.set_track_width(300.0);
    let log = record(&mut carousel, Channel::PointerLeave);

    carousel.pointer_down(at(0.0), 0);
    carousel.pointer_move(at(120.0), 40);
    assert_eq!(carousel.pointer_leave(80), GestureOutcome::Committed);
    assert_eq!(carousel.current(), 2);
    assert!(!carousel.gesture().is_dragging());
    assert_eq!(drain(&log), [Channel::PointerLeave]);
}

#[test]
fn navigation_waits_for_the_drag_to_end() {
    let mut carousel = Carousel::new(4, CarouselConfig::default(), 0);
    carousel.set_track_width(480.0);
    let log = record(&mut carousel, ChannelSet::LIFECYCLE);

    assert!(carousel.pointer_down(at(200.0), 0));
    carousel.set_config(
        ConfigPatch {
            current_index: Some(1),
            ..ConfigPatch::default()
        },
        10,
    );
    assert!(!carousel.goto(2, 20));
    assert!(!carousel.is_moving());
    assert_eq!(carousel.current(), 0);

    carousel.pointer_move(at(120.0), 30);
    assert_eq!(carousel.engine().offset(), -80.0);
    assert!(log.borrow().is_empty());

    assert_eq!(carousel.pointer_up(at(120.0), 40), GestureOutcome::Committed);
    assert_eq!(carousel.current(), 1);
    assert_eq!(carousel.engine().offset(), 0.0);
    assert!(carousel.engine().transition_enabled());
    assert_eq!(drain(&log), [Channel::Before, Channel::Start]);
}

#[test]
fn release_without_moves_bounces_toward_the_drag() {
    let config = CarouselConfig {
        snap: SnapDivisor::new(4),
        ..CarouselConfig::default()
    };
    let mut carousel = Carousel::new(5, config, 0);
    carousel.set_track_width(400.0);

    assert!(carousel.pointer_down(at(200.0), 0));
    assert_eq!(carousel.pointer_up(at(230.0), 50), GestureOutcome::Bounced);
    let snapshot = carousel.snapshot();
    assert_eq!(
        (snapshot.previous, snapshot.current, snapshot.next),
        (4, 0, 1)
    );
    assert_eq!(snapshot.direction, Direction::Forward);
}

#[test]
fn two_slide_drag_flips_the_shared_neighbor() {
    let mut carousel = Carousel::new(2, CarouselConfig::default(), 0);
    assert!(carousel.pointer_down(at(200.0), 0));

    carousel.pointer_move(at(260.0), 10);
    let engine = carousel.engine();
    assert_eq!(engine.direction(), Direction::Backward);
    assert_eq!((engine.previous(), engine.next()), (1, 1));
    assert_eq!(engine.slot_offsets().next.percent, -100.0);
    assert_eq!(engine.slot_offsets().previous.percent, 100.0);

    carousel.pointer_move(at(140.0), 20);
    let engine = carousel.engine();
    assert_eq!(engine.direction(), Direction::Forward);
    assert_eq!((engine.previous(), engine.next()), (1, 1));
    assert_eq!(engine.slot_offsets().next.percent, 100.0);
    assert_eq!(engine.offset(), -60.0);
}

#[test]
fn two_slides_settle_over_two_frames() {
    let mut carousel = Carousel::new(2, CarouselConfig::default(), 0);
    let log = record(&mut carousel, ChannelSet::LIFECYCLE);

    assert!(carousel.step_forward(0));
    let snapshot = carousel.snapshot();
    assert_eq!((snapshot.previous, snapshot.current, snapshot.next), (0, 1, 0));

    assert!(carousel.transition_finished(250));
    assert!(carousel.is_moving());
    assert!(!carousel.engine().transition_enabled());
    assert!(!carousel.step_backward(250));

    assert!(carousel.frame(266));
    assert!(carousel.frame(283));
    assert!(!carousel.is_moving());
    assert!(carousel.engine().transition_enabled());
    assert_eq!(drain(&log), [Channel::Before, Channel::Start, Channel::End]);

    assert!(carousel.goto(0, 300));
    assert_eq!(carousel.snapshot().duration_ms, 250);
    assert_eq!(carousel.snapshot().timing_curve, TimingCurve::EaseOut);
}

#[test]
fn attributes_update_defaults_and_navigate() {
    let mut carousel = Carousel::new(5, CarouselConfig::default(), 0);

    carousel.set_attribute("data-duration", Some("400"), 0);
    carousel.set_attribute("timing-function", Some("linear"), 0);
    assert_eq!(carousel.engine().duration_ms(), 400);
    assert_eq!(carousel.engine().timing_curve(), TimingCurve::Linear);

    carousel.set_attribute("duration", Some("soon"), 0);
    assert_eq!(carousel.engine().default_duration_ms(), 250);

    carousel.set_attribute("current", Some("banana"), 0);
    assert!(!carousel.is_moving());
    carousel.set_attribute("current", Some("1"), 0);
    assert!(carousel.is_moving());
    assert_eq!(carousel.current(), 1);
}

#[test]
fn interval_attribute_starts_and_stops_auto_advance() {
    let mut carousel = Carousel::new(3, CarouselConfig::default(), 0);
    assert_eq!(carousel.deadline(), None);

    carousel.set_attribute("auto-interval", Some("2000"), 100);
    assert_eq!(carousel.deadline(), Some(2_100));

    carousel.set_attribute("auto-interval", None, 200);
    assert_eq!(carousel.deadline(), None);

    carousel.set_attribute("auto-interval", Some("-5"), 300);
    assert_eq!(carousel.deadline(), None);
}

#[test]
fn visible_window_gates_auto_advance() {
    let config = CarouselConfig {
        visible: 3,
        ..autoplay(1_000)
    };
    let mut carousel = Carousel::new(3, config, 0);
    assert_eq!(carousel.deadline(), None);

    carousel.set_attribute("visible", Some("2"), 50);
    assert_eq!(carousel.deadline(), Some(1_050));
}

#[test]
fn unsubscribed_listeners_stop_hearing() {
    let mut carousel = Carousel::new(3, CarouselConfig::default(), 0);
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    let id = carousel.subscribe(Channel::End, move |_: &Notification| {
        *sink.borrow_mut() += 1;
    });

    carousel.step_forward(0);
    carousel.transition_finished(250);
    assert!(carousel.unsubscribe(id));
    carousel.step_forward(300);
    carousel.transition_finished(550);
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn reinitialize_resets_and_reconciles() {
    let mut carousel = Carousel::new(1, autoplay(1_000), 0);
    assert_eq!(carousel.deadline(), None);
    assert!(carousel.reinitialize(4, 100));
    assert_eq!(carousel.deadline(), Some(1_100));
    assert_eq!(carousel.engine().slide_count(), 4);
}
