// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Auto-advance: an idle timer that steps the carousel when nobody interacts with it.
//!
//! [`AutoAdvance`] owns a single [`TimerSlot`], so at most one deadline is ever
//! pending. It listens to lifecycle notifications: `before` cancels the
//! deadline and `end` arms a fresh one. Hover and pause signals cancel and
//! resume it in between.
//!
//! The host drives time. Ask [`AutoAdvance::deadline`] when to wake up and
//! call [`AutoAdvance::tick`] at or after that moment.
//!
//! ```
//! use understory_carousel::{AutoAdvance, AutoplayConfig, CarouselEngine};
//!
//! let mut engine = CarouselEngine::new(5);
//! let config = AutoplayConfig { interval_ms: 5_000, ..AutoplayConfig::default() };
//! let mut auto = AutoAdvance::new(config, true);
//!
//! auto.start(0);
//! assert_eq!(auto.deadline(), Some(5_000));
//!
//! assert!(!auto.tick(&mut engine, 4_999));
//! assert!(auto.tick(&mut engine, 5_000));
//! assert_eq!(engine.current(), 1);
//! assert_eq!(engine.duration_ms(), 1_000);
//! ```

use log::{debug, trace};
use understory_timing::TimerSlot;

use crate::config::AutoplayConfig;
use crate::engine::CarouselEngine;
use crate::notify::{Channel, Notification};

/// Auto-advance scheduler state.
#[derive(Clone, Debug)]
pub struct AutoAdvance {
    config: AutoplayConfig,
    timer: TimerSlot,
    hovering: bool,
    eligible: bool,
}

impl AutoAdvance {
    /// Creates an unarmed scheduler.
    ///
    /// `eligible` says whether the ring holds more slides than the visible
    /// window; see [`AutoAdvance::is_eligible_for`].
    #[must_use]
    pub fn new(config: AutoplayConfig, eligible: bool) -> Self {
        Self {
            config,
            timer: TimerSlot::new(),
            hovering: false,
            eligible,
        }
    }

    /// Returns `true` if a ring of `slide_count` slides is worth auto-advancing
    /// with `visible` slides on screen.
    #[must_use]
    pub const fn is_eligible_for(slide_count: usize, visible: usize) -> bool {
        slide_count > visible
    }

    /// Current auto-advance options.
    #[must_use]
    pub fn config(&self) -> &AutoplayConfig {
        &self.config
    }

    /// Returns `true` while the pointer hovers the carousel.
    #[must_use]
    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// Returns `true` while a deadline is pending.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.timer.is_armed()
    }

    /// The pending deadline in the host's timebase.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.timer.deadline()
    }

    /// Returns `true` if an interval is set, the scheduler is not paused, and the ring is eligible.
    #[must_use]
    pub fn can_run(&self) -> bool {
        self.config.is_enabled() && !self.config.paused && self.eligible
    }

    fn hover_blocks(&self) -> bool {
        self.hovering && !self.config.advance_on_hover
    }

    /// Arms the timer one interval after `now_ms`, replacing any pending deadline.
    ///
    /// Cancels instead when the scheduler cannot run.
    pub fn start(&mut self, now_ms: u64) {
        if !self.can_run() {
            self.stop();
            return;
        }
        self.timer.arm(now_ms, u64::from(self.config.interval_ms));
        debug!(
            "carousel-auto: armed at {now_ms}, due at {:?}",
            self.timer.deadline()
        );
    }

    /// Cancels the pending deadline.
    pub fn stop(&mut self) {
        if let Some(id) = self.timer.cancel() {
            trace!("carousel-auto: cancelled {id:?}");
        }
    }

    /// Arms the timer unless hovering blocks it or the engine is mid-transition.
    ///
    /// A transition in flight re-arms the timer when it ends.
    pub fn resume(&mut self, engine: &CarouselEngine, now_ms: u64) {
        if !self.hover_blocks() && !engine.is_moving() {
            self.start(now_ms);
        }
    }

    /// Reacts to a lifecycle notification from `engine`.
    pub fn observe(&mut self, notification: &Notification, engine: &CarouselEngine, now_ms: u64) {
        match notification.channel {
            Channel::Before => self.stop(),
            Channel::End => self.resume(engine, now_ms),
            _ => {}
        }
    }

    /// The pointer entered the carousel.
    pub fn pointer_enter(&mut self) {
        self.hovering = true;
        if !self.config.advance_on_hover {
            self.stop();
        }
    }

    /// The pointer left the carousel.
    pub fn pointer_leave(&mut self, engine: &CarouselEngine, now_ms: u64) {
        self.hovering = false;
        if !self.config.advance_on_hover {
            self.resume(engine, now_ms);
        }
    }

    /// Adopts new options and eligibility, stopping or starting right away.
    ///
    /// A pending deadline survives unless the interval changed, so repeated
    /// updates never queue more than one firing.
    pub fn reconcile(
        &mut self,
        config: AutoplayConfig,
        eligible: bool,
        engine: &CarouselEngine,
        now_ms: u64,
    ) {
        let interval_changed = config.interval_ms != self.config.interval_ms;
        self.config = config;
        self.eligible = eligible;
        if !self.can_run() {
            self.stop();
        } else if interval_changed || !self.timer.is_armed() {
            self.resume(engine, now_ms);
        }
    }

    /// Fires the timer if it is due, stepping `engine` with the auto-advance overrides.
    ///
    /// Returns `true` if a step started. The overridden duration and timing
    /// curve revert to the engine defaults when the step ends.
    pub fn tick(&mut self, engine: &mut CarouselEngine, now_ms: u64) -> bool {
        let Some(id) = self.timer.poll(now_ms) else {
            return false;
        };
        if !self.can_run() || !engine.accepts_navigation() {
            trace!("carousel-auto: {id:?} fired but the carousel is busy");
            return false;
        }
        debug!("carousel-auto: {id:?} fired at {now_ms}");
        engine.set_duration(self.config.duration_ms);
        engine.set_timing_curve(self.config.timing_curve);
        engine.step(self.config.direction)
    }
}
