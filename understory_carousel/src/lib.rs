// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_carousel --heading-base-level=0

//! Understory Carousel: a headless slide carousel engine.
//!
//! A carousel shows one slide out of a circular sequence and moves between
//! slides on explicit commands, timed auto-advance, or pointer drags. This
//! crate holds all of the state and timing logic for that and none of the
//! rendering. A presentation layer reads the state, animates, and reports back.
//!
//! The pieces, bottom-up:
//!
//! - [`Ring`]: circular index arithmetic and [`Direction`].
//! - [`CarouselEngine`]: indices, navigation commands, and the transition
//!   lifecycle (`before` → `start` → `end`, plus `change` and `offset`).
//! - [`GestureController`]: turns pointer drags into committed steps or bounces.
//! - [`AutoAdvance`]: an idle timer that steps the carousel, built on
//!   [`understory_timing::TimerSlot`].
//! - [`Carousel`]: composes the above, routes notifications, and fans them out
//!   to subscribers on named [`Channel`]s.
//!
//! ## Driving a carousel
//!
//! The host supplies time. Every entry point takes a timestamp in
//! milliseconds; the crate never reads a clock.
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use understory_carousel::{AutoplayConfig, Carousel, CarouselConfig, Channel, ChannelSet};
//!
//! let config = CarouselConfig {
//!     autoplay: AutoplayConfig { interval_ms: 5_000, ..AutoplayConfig::default() },
//!     ..CarouselConfig::default()
//! };
//! let mut carousel = Carousel::new(5, config, 0);
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&log);
//! carousel.subscribe(ChannelSet::LIFECYCLE, move |n| {
//!     sink.borrow_mut().push((n.channel, n.snapshot.current));
//! });
//!
//! // A button press at t = 0.
//! assert!(carousel.step_forward(0));
//! // The renderer reports the 250ms animation done.
//! assert!(carousel.transition_finished(250));
//! // Auto-advance re-armed when the transition ended.
//! assert_eq!(carousel.deadline(), Some(5_250));
//!
//! assert!(carousel.tick(5_250));
//! assert_eq!(carousel.current(), 2);
//! assert_eq!(
//!     log.borrow()[..3],
//!     [(Channel::Before, 0), (Channel::Start, 1), (Channel::End, 1)]
//! );
//! ```
//!
//! ## Two-slide rings
//!
//! With two slides the previous and next slots hold the same slide. After the
//! finished signal the engine disables animation and waits for two
//! [`Carousel::frame`] calls before it emits `end`; check
//! [`Carousel::needs_frame`] to know when to schedule them.
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std`.
//! - `libm`: forwards to `kurbo/libm` for `no_std` targets.
//! - `serde`: `Serialize`/`Deserialize` for configuration, snapshots and
//!   notification kinds.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod autoplay;
mod carousel;
mod config;
mod easing;
mod engine;
mod gesture;
mod lifecycle;
mod notify;
mod ring;

pub use autoplay::AutoAdvance;
pub use carousel::Carousel;
pub use config::{
    Attribute, AutoplayConfig, CarouselConfig, ConfigError, ConfigPatch, DEFAULT_AUTO_DURATION_MS,
    DEFAULT_DURATION_MS, SnapDivisor,
};
pub use easing::{ParseTimingCurveError, TimingCurve};
pub use engine::{CarouselEngine, FAST_STEP_DURATION_MS, Slot, SlotOffset, SlotOffsets};
pub use gesture::{
    GestureController, GestureOutcome, GestureSession, MAX_COMMIT_DURATION_MS,
    MIN_COMMIT_DURATION_MS, remaining_duration,
};
pub use lifecycle::{Lifecycle, Phase, SettleStep};
pub use notify::{Channel, ChannelSet, Notification, Notifier, Snapshot, SubscriptionId};
pub use ring::{Direction, Ring};
