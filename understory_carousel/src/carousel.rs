// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Carousel`] facade: engine, drag gestures, auto-advance, and subscribers in one place.
//!
//! Every entry point takes the host's current time in milliseconds. After
//! each call the facade drains the engine's queued notifications, shows them
//! to the auto-advance scheduler first, and then hands them to subscribers.

use kurbo::Point;
use log::{debug, trace};

use crate::autoplay::AutoAdvance;
use crate::config::{CarouselConfig, ConfigPatch};
use crate::engine::CarouselEngine;
use crate::gesture::{GestureController, GestureOutcome};
use crate::notify::{Channel, ChannelSet, Notification, Notifier, Snapshot, SubscriptionId};

/// A headless carousel.
#[derive(Debug)]
pub struct Carousel {
    engine: CarouselEngine,
    gesture: GestureController,
    autoplay: AutoAdvance,
    notifier: Notifier,
    config: CarouselConfig,
}

impl Carousel {
    /// Creates a carousel over `slide_count` slides and arms auto-advance if configured.
    #[must_use]
    pub fn new(slide_count: usize, config: CarouselConfig, now_ms: u64) -> Self {
        let config = config.sanitized();
        let engine = CarouselEngine::from_config(slide_count, &config);
        let eligible = AutoAdvance::is_eligible_for(engine.slide_count(), config.visible);
        let mut autoplay = AutoAdvance::new(config.autoplay, eligible);
        autoplay.start(now_ms);
        Self {
            engine,
            gesture: GestureController::new(config.snap),
            autoplay,
            notifier: Notifier::new(),
            config,
        }
    }

    /// The underlying engine.
    #[must_use]
    pub fn engine(&self) -> &CarouselEngine {
        &self.engine
    }

    /// The drag gesture controller.
    #[must_use]
    pub fn gesture(&self) -> &GestureController {
        &self.gesture
    }

    /// The auto-advance scheduler.
    #[must_use]
    pub fn autoplay(&self) -> &AutoAdvance {
        &self.autoplay
    }

    /// The effective configuration.
    #[must_use]
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Snapshot of the observable state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.engine.snapshot()
    }

    /// Index of the active slide.
    #[must_use]
    pub fn current(&self) -> usize {
        self.engine.current()
    }

    /// Returns `true` from `before` until `end`.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.engine.is_moving()
    }

    /// Returns `true` while the host should call [`Carousel::frame`] on the next animation frame.
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.engine.needs_frame()
    }

    /// When the host should next call [`Carousel::tick`], if ever.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.autoplay.deadline()
    }

    /// Subscribes `callback` to `channels`.
    pub fn subscribe(
        &mut self,
        channels: impl Into<ChannelSet>,
        callback: impl FnMut(&Notification) + 'static,
    ) -> SubscriptionId {
        self.notifier.subscribe(channels, callback)
    }

    /// Removes a subscription.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Moves one slide forward. Rejected while a drag is active.
    pub fn step_forward(&mut self, now_ms: u64) -> bool {
        if self.rejects_command("step_forward") {
            return false;
        }
        let stepped = self.engine.step_forward();
        self.route(now_ms);
        stepped
    }

    /// Moves one slide backward. Rejected while a drag is active.
    pub fn step_backward(&mut self, now_ms: u64) -> bool {
        if self.rejects_command("step_backward") {
            return false;
        }
        let stepped = self.engine.step_backward();
        self.route(now_ms);
        stepped
    }

    /// Walks to slide `target`; see [`CarouselEngine::goto`].
    ///
    /// Rejected while a drag is active.
    pub fn goto(&mut self, target: usize, now_ms: u64) -> bool {
        if self.rejects_command("goto") {
            return false;
        }
        let started = self.engine.goto(target);
        self.route(now_ms);
        started
    }

    /// The presentation layer finished animating the current slide.
    pub fn transition_finished(&mut self, now_ms: u64) -> bool {
        let handled = self.engine.transition_finished();
        self.route(now_ms);
        handled
    }

    /// An animation frame elapsed.
    pub fn frame(&mut self, now_ms: u64) -> bool {
        let handled = self.engine.frame();
        self.route(now_ms);
        handled
    }

    /// Fires auto-advance if its deadline has passed. Returns `true` if a step started.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.gesture.is_dragging() {
            // Dragging holds the slides; try again one interval later.
            if self.autoplay.deadline().is_some_and(|due| now_ms >= due) {
                self.autoplay.start(now_ms);
            }
            return false;
        }
        let stepped = self.autoplay.tick(&mut self.engine, now_ms);
        self.route(now_ms);
        stepped
    }

    /// Sets the track width in pixels used for drag thresholds and durations.
    pub fn set_track_width(&mut self, width: f64) {
        self.gesture.set_track_width(width);
    }

    /// A pointer went down on the track.
    pub fn pointer_down(&mut self, position: Point, now_ms: u64) -> bool {
        let accepted = self.gesture.pointer_down(&mut self.engine, position, now_ms);
        if accepted {
            self.autoplay.stop();
        }
        self.route(now_ms);
        accepted
    }

    /// The pointer moved.
    pub fn pointer_move(&mut self, position: Point, now_ms: u64) {
        self.gesture.pointer_move(&mut self.engine, position);
        self.route(now_ms);
    }

    /// The pointer was released.
    pub fn pointer_up(&mut self, position: Point, now_ms: u64) -> GestureOutcome {
        let outcome = self.gesture.pointer_up(&mut self.engine, position, now_ms);
        self.after_release(outcome, now_ms);
        outcome
    }

    /// The pointer entered the carousel.
    pub fn pointer_enter(&mut self, now_ms: u64) {
        self.autoplay.pointer_enter();
        self.route(now_ms);
        self.broadcast(Channel::PointerEnter);
    }

    /// The pointer left the carousel. An active drag is released at its last position.
    pub fn pointer_leave(&mut self, now_ms: u64) -> GestureOutcome {
        let outcome = self.gesture.pointer_leave(&mut self.engine, now_ms);
        self.after_release(outcome, now_ms);
        self.autoplay.pointer_leave(&self.engine, now_ms);
        self.broadcast(Channel::PointerLeave);
        outcome
    }

    fn after_release(&mut self, outcome: GestureOutcome, now_ms: u64) {
        self.route(now_ms);
        if outcome == GestureOutcome::NoChange {
            self.autoplay.resume(&self.engine, now_ms);
        }
    }

    /// Applies a partial configuration update.
    ///
    /// Auto-advance reconciles immediately. A `current_index` is a navigation
    /// command and follows the same rules as [`Carousel::goto`].
    pub fn set_config(&mut self, patch: ConfigPatch, now_ms: u64) {
        if patch.is_empty() {
            return;
        }
        let previous = self.config;
        patch.apply_to(&mut self.config);
        debug!("carousel: configuration updated to {:?}", self.config);

        if self.config.duration_ms != previous.duration_ms {
            self.engine.set_default_duration(self.config.duration_ms);
        }
        if self.config.timing_curve != previous.timing_curve {
            self.engine.set_default_timing_curve(self.config.timing_curve);
        }
        self.gesture.set_snap(self.config.snap);
        let eligible = AutoAdvance::is_eligible_for(self.engine.slide_count(), self.config.visible);
        self.autoplay
            .reconcile(self.config.autoplay, eligible, &self.engine, now_ms);
        if let Some(target) = patch.current_index
            && !self.rejects_command("current_index")
        {
            self.engine.goto(target);
        }
        self.route(now_ms);
    }

    /// Applies a string attribute write; `None` means the attribute was removed.
    ///
    /// Malformed values fall back to the option's default.
    pub fn set_attribute(&mut self, name: &str, value: Option<&str>, now_ms: u64) {
        self.set_config(ConfigPatch::from_attribute(name, value), now_ms);
    }

    /// Replaces the slides, resetting to the first one. Rejected while moving.
    pub fn reinitialize(&mut self, slide_count: usize, now_ms: u64) -> bool {
        if !self.engine.reinitialize(slide_count) {
            return false;
        }
        let eligible = AutoAdvance::is_eligible_for(self.engine.slide_count(), self.config.visible);
        self.autoplay
            .reconcile(self.config.autoplay, eligible, &self.engine, now_ms);
        self.route(now_ms);
        true
    }

    fn rejects_command(&self, command: &str) -> bool {
        let dragging = self.gesture.is_dragging();
        if dragging {
            trace!("carousel: {command} rejected during drag");
        }
        dragging
    }

    fn broadcast(&mut self, channel: Channel) {
        self.notifier
            .dispatch(&Notification::new(channel, self.engine.snapshot()));
    }

    fn route(&mut self, now_ms: u64) {
        for notification in self.engine.take_notifications() {
            self.autoplay.observe(&notification, &self.engine, now_ms);
            self.notifier.dispatch(&notification);
        }
    }
}
