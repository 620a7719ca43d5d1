// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The carousel engine: index state, navigation commands, and the transition lifecycle.
//!
//! [`CarouselEngine`] owns every piece of carousel state. Other components
//! (the gesture controller, the auto-advance scheduler, embedders) borrow it
//! for the duration of a call and change it only through the methods below.
//!
//! Each accepted command runs one transition:
//!
//! 1. `before` is queued and the engine starts moving.
//! 2. New indices are committed and `start` is queued.
//! 3. The host animates and calls [`CarouselEngine::transition_finished`].
//! 4. Duration and timing curve return to their defaults and `end` is queued.
//!
//! Notifications are queued rather than delivered; drain them with
//! [`CarouselEngine::take_notifications`]. The [`Carousel`](crate::Carousel)
//! facade does this for you.
//!
//! ```
//! use understory_carousel::{CarouselEngine, Channel};
//!
//! let mut engine = CarouselEngine::new(5);
//! assert!(engine.step_forward());
//! assert_eq!(engine.current(), 1);
//!
//! // Rejected while the first transition is still animating.
//! assert!(!engine.step_forward());
//!
//! assert!(engine.transition_finished());
//! let channels: Vec<_> = engine
//!     .take_notifications()
//!     .into_iter()
//!     .map(|n| n.channel)
//!     .filter(|c| *c != Channel::Change)
//!     .collect();
//! assert_eq!(channels, [Channel::Before, Channel::Start, Channel::End]);
//! ```

use alloc::vec::Vec;

use log::{debug, trace};

use crate::config::{CarouselConfig, DEFAULT_DURATION_MS};
use crate::easing::TimingCurve;
use crate::lifecycle::{Finish, Lifecycle, Phase, SettleStep};
use crate::notify::{Channel, Notification, Snapshot};
use crate::ring::{Direction, Ring};

/// Duration of the intermediate steps of a multi-slide [`CarouselEngine::goto`].
pub const FAST_STEP_DURATION_MS: u32 = 60;

/// Visual slot a slide occupies relative to the active one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Trailing the direction of travel.
    Previous,
    /// The active slide.
    Current,
    /// Leading the direction of travel.
    Next,
}

/// Offset of one slot: a fraction of the track width plus a pixel amount.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SlotOffset {
    /// Offset in percent of the track width.
    pub percent: f64,
    /// Additional offset in pixels.
    pub pixels: f64,
}

impl SlotOffset {
    /// Resolves the offset to pixels for a track of `track_width` pixels.
    #[must_use]
    pub fn resolve(self, track_width: f64) -> f64 {
        self.percent / 100.0 * track_width + self.pixels
    }
}

/// Offsets of the previous, current, and next slots.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SlotOffsets {
    /// Offset of the previous slot.
    pub previous: SlotOffset,
    /// Offset of the current slot.
    pub current: SlotOffset,
    /// Offset of the next slot.
    pub next: SlotOffset,
}

/// Carousel state plus the operations that change it.
#[derive(Clone, Debug)]
pub struct CarouselEngine {
    ring: Ring,
    previous: usize,
    current: usize,
    next: usize,
    direction: Direction,
    offset: f64,
    duration_ms: u32,
    timing_curve: TimingCurve,
    transition_enabled: bool,
    default_duration_ms: u32,
    default_timing_curve: TimingCurve,
    lifecycle: Lifecycle,
    goto_target: Option<usize>,
    // Two-slide rings only: the slide that just left still holds the previous slot.
    previous_marker: bool,
    pending: Vec<Notification>,
}

impl CarouselEngine {
    /// Creates an engine over `slide_count` slides with default timing.
    ///
    /// A count of zero is treated as one.
    #[must_use]
    pub fn new(slide_count: usize) -> Self {
        Self::with_timing(slide_count, DEFAULT_DURATION_MS, TimingCurve::EaseInOut)
    }

    /// Creates an engine using the duration and timing curve from `config`.
    #[must_use]
    pub fn from_config(slide_count: usize, config: &CarouselConfig) -> Self {
        let config = config.sanitized();
        Self::with_timing(slide_count, config.duration_ms, config.timing_curve)
    }

    fn with_timing(slide_count: usize, duration_ms: u32, timing_curve: TimingCurve) -> Self {
        let ring = Ring::new(slide_count);
        let (previous, next) = ring.neighbors(0, Direction::Forward);
        Self {
            ring,
            previous,
            current: 0,
            next,
            direction: Direction::Forward,
            offset: 0.0,
            duration_ms,
            timing_curve,
            transition_enabled: true,
            default_duration_ms: duration_ms,
            default_timing_curve: timing_curve,
            lifecycle: Lifecycle::default(),
            goto_target: None,
            previous_marker: false,
            pending: Vec::new(),
        }
    }

    /// Returns the slide ring.
    #[must_use]
    pub fn ring(&self) -> Ring {
        self.ring
    }

    /// Returns the number of slides. Never zero.
    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.ring.slide_count()
    }

    /// Index of the slide in the previous slot.
    #[must_use]
    pub fn previous(&self) -> usize {
        self.previous
    }

    /// Index of the active slide.
    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    /// Index of the slide in the next slot.
    #[must_use]
    pub fn next(&self) -> usize {
        self.next
    }

    /// Direction of the last or ongoing move.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Live drag offset in pixels.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Duration the presentation layer should use for the current transition.
    #[must_use]
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Timing curve the presentation layer should use for the current transition.
    #[must_use]
    pub fn timing_curve(&self) -> TimingCurve {
        self.timing_curve
    }

    /// Whether the presentation layer should animate changes.
    #[must_use]
    pub fn transition_enabled(&self) -> bool {
        self.transition_enabled
    }

    /// Configured default duration, restored after every transition.
    #[must_use]
    pub fn default_duration_ms(&self) -> u32 {
        self.default_duration_ms
    }

    /// Configured default timing curve, restored after every transition.
    #[must_use]
    pub fn default_timing_curve(&self) -> TimingCurve {
        self.default_timing_curve
    }

    /// Returns `true` from `before` until `end`.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.lifecycle.is_moving()
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.lifecycle.phase()
    }

    /// Returns `true` while the engine waits for [`CarouselEngine::frame`] calls.
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.lifecycle.needs_frame()
    }

    /// Target of an in-flight multi-step [`CarouselEngine::goto`], if any.
    #[must_use]
    pub fn goto_target(&self) -> Option<usize> {
        self.goto_target
    }

    /// Returns an immutable snapshot of the observable state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            previous: self.previous,
            current: self.current,
            next: self.next,
            direction: self.direction,
            offset: self.offset,
            duration_ms: self.duration_ms,
            timing_curve: self.timing_curve,
            transition_enabled: self.transition_enabled,
        }
    }

    /// Removes and returns the queued notifications in emission order.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        core::mem::take(&mut self.pending)
    }

    fn emit(&mut self, channel: Channel) {
        let notification = Notification::new(channel, self.snapshot());
        self.pending.push(notification);
    }

    /// Sets the transition duration and queues `change`.
    pub fn set_duration(&mut self, duration_ms: u32) {
        self.duration_ms = duration_ms;
        self.emit(Channel::Change);
    }

    /// Sets the timing curve and queues `change`.
    pub fn set_timing_curve(&mut self, curve: TimingCurve) {
        self.timing_curve = curve;
        self.emit(Channel::Change);
    }

    /// Enables or disables animation and queues `change`.
    pub fn set_transition_enabled(&mut self, enabled: bool) {
        self.transition_enabled = enabled;
        self.emit(Channel::Change);
    }

    /// Sets the live drag offset in pixels and queues `offset`.
    pub fn set_offset(&mut self, pixels: f64) {
        self.offset = pixels;
        self.emit(Channel::Offset);
    }

    /// Sets the direction and reassigns the previous and next slots.
    ///
    /// Rejected while moving.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.is_moving() {
            trace!("carousel: direction change rejected while moving");
            return false;
        }
        self.direction = direction;
        self.reassign_neighbors();
        true
    }

    /// Replaces the default duration; the live duration follows while idle.
    pub fn set_default_duration(&mut self, duration_ms: u32) {
        let duration_ms = if duration_ms == 0 {
            DEFAULT_DURATION_MS
        } else {
            duration_ms
        };
        self.default_duration_ms = duration_ms;
        if !self.is_moving() {
            self.set_duration(duration_ms);
        }
    }

    /// Replaces the default timing curve; the live curve follows while idle.
    pub fn set_default_timing_curve(&mut self, curve: TimingCurve) {
        self.default_timing_curve = curve;
        if !self.is_moving() {
            self.set_timing_curve(curve);
        }
    }

    /// Returns `true` if a navigation command would be accepted now.
    #[must_use]
    pub fn accepts_navigation(&self) -> bool {
        !self.is_moving() && self.ring.can_navigate()
    }

    /// Moves one slide forward.
    pub fn step_forward(&mut self) -> bool {
        self.step(Direction::Forward)
    }

    /// Moves one slide backward.
    pub fn step_backward(&mut self) -> bool {
        self.step(Direction::Backward)
    }

    /// Moves one slide in `direction` using the live duration and timing curve.
    ///
    /// Returns `false` (and changes nothing) while moving or when the ring has
    /// a single slide.
    pub fn step(&mut self, direction: Direction) -> bool {
        if !self.accepts_navigation() {
            trace!("carousel: step {direction:?} rejected");
            return false;
        }
        self.direction = direction;
        self.run_transition(true);
        true
    }

    /// Walks to slide `target` one position at a time.
    ///
    /// The direction follows a linear comparison of `target` and the current
    /// index. Intermediate steps use [`FAST_STEP_DURATION_MS`] with a linear
    /// curve; the final step uses the default duration with
    /// [`TimingCurve::EaseOut`]. Each step starts only after the previous one
    /// finished, and the engine keeps moving for the whole walk.
    ///
    /// Returns `false` while moving, for a single-slide ring, for an
    /// out-of-range target, or when `target` is already current.
    pub fn goto(&mut self, target: usize) -> bool {
        if !self.accepts_navigation() || !self.ring.contains(target) {
            trace!("carousel: goto {target} rejected");
            return false;
        }
        let Some(direction) = Ring::linear_direction(self.current, target) else {
            return false;
        };
        debug!("carousel: goto {} -> {target} ({direction:?})", self.current);
        self.direction = direction;
        self.goto_target = Some(target);
        self.chain_step();
        true
    }

    fn chain_step(&mut self) {
        let Some(target) = self.goto_target else {
            return;
        };
        let upcoming = self.ring.step(self.current, self.direction);
        if upcoming == target {
            self.goto_target = None;
            self.set_timing_curve(TimingCurve::EaseOut);
            self.set_duration(self.default_duration_ms);
        } else {
            self.set_duration(FAST_STEP_DURATION_MS);
            self.set_timing_curve(TimingCurve::Linear);
        }
        self.run_transition(true);
    }

    /// Runs a full transition that keeps the current slide.
    ///
    /// The direction is inverted so the previous and next slots swap back,
    /// which lets an abandoned drag animate home with the usual
    /// `before`/`start`/`end` sequence.
    pub fn bounce(&mut self) -> bool {
        if !self.accepts_navigation() {
            trace!("carousel: bounce rejected");
            return false;
        }
        self.enter_before();
        self.direction = self.direction.reversed();
        self.reassign_neighbors();
        self.enter_animating();
        true
    }

    fn run_transition(&mut self, advance: bool) {
        self.enter_before();
        if advance {
            self.current = self.ring.step(self.current, self.direction);
            if self.ring.is_pair() {
                self.previous_marker = true;
            }
        }
        self.reassign_neighbors();
        self.enter_animating();
    }

    fn enter_before(&mut self) {
        let began = self.lifecycle.begin();
        debug_assert!(began, "transition started while moving");
        self.emit(Channel::Before);
    }

    fn enter_animating(&mut self) {
        self.lifecycle.commit();
        debug!(
            "carousel: start prev={} cur={} next={} dir={:?} {}ms {}",
            self.previous,
            self.current,
            self.next,
            self.direction,
            self.duration_ms,
            self.timing_curve
        );
        self.emit(Channel::Start);
    }

    fn reassign_neighbors(&mut self) {
        (self.previous, self.next) = self.ring.neighbors(self.current, self.direction);
    }

    /// Signals that the presentation layer finished animating the current slide.
    ///
    /// Returns `false` if nothing was waiting for the signal. On a two-slide
    /// ring this disables animation and starts the settle choreography; the
    /// transition ends after two [`CarouselEngine::frame`] calls.
    pub fn transition_finished(&mut self) -> bool {
        match self.lifecycle.finish(self.ring.is_pair()) {
            Finish::Ignored => {
                trace!("carousel: stray transition-finished signal");
                false
            }
            Finish::Settling => {
                self.set_transition_enabled(false);
                true
            }
            Finish::Done => {
                self.complete();
                true
            }
        }
    }

    /// Signals an animation frame. Only meaningful while [`CarouselEngine::needs_frame`].
    pub fn frame(&mut self) -> bool {
        match self.lifecycle.advance_frame() {
            None => false,
            Some(SettleStep::DetachMarker) => {
                self.previous_marker = false;
                self.emit(Channel::Change);
                true
            }
            Some(SettleStep::Restore) => {
                self.set_transition_enabled(true);
                self.complete();
                true
            }
        }
    }

    fn complete(&mut self) {
        self.set_duration(self.default_duration_ms);
        self.set_timing_curve(self.default_timing_curve);
        debug!("carousel: end cur={}", self.current);
        self.emit(Channel::End);
        self.chain_step();
    }

    /// Replaces the ring with `slide_count` slides and resets to the first slide.
    ///
    /// Rejected while moving.
    pub fn reinitialize(&mut self, slide_count: usize) -> bool {
        if self.is_moving() {
            return false;
        }
        self.ring = Ring::new(slide_count);
        self.current = 0;
        self.direction = Direction::Forward;
        self.offset = 0.0;
        self.goto_target = None;
        self.previous_marker = false;
        self.reassign_neighbors();
        self.emit(Channel::Change);
        true
    }

    /// Returns the visual slot `index` occupies, if any.
    ///
    /// On a two-slide ring the other slide sits in the previous slot right
    /// after a transition and moves to the next slot once settled.
    #[must_use]
    pub fn slot_of(&self, index: usize) -> Option<Slot> {
        if !self.ring.contains(index) {
            return None;
        }
        if index == self.current {
            Some(Slot::Current)
        } else if self.ring.is_pair() {
            Some(if self.previous_marker {
                Slot::Previous
            } else {
                Slot::Next
            })
        } else if index == self.previous {
            Some(Slot::Previous)
        } else if index == self.next {
            Some(Slot::Next)
        } else {
            None
        }
    }

    /// Offsets of the three slots for the current direction and drag offset.
    ///
    /// The current slide follows the drag directly; the neighbors sit one
    /// full track width away on either side.
    #[must_use]
    pub fn slot_offsets(&self) -> SlotOffsets {
        let sign = f64::from(self.direction.sign());
        SlotOffsets {
            previous: SlotOffset {
                percent: -sign * 100.0,
                pixels: self.offset,
            },
            current: SlotOffset {
                percent: 0.0,
                pixels: self.offset,
            },
            next: SlotOffset {
                percent: sign * 100.0,
                pixels: self.offset,
            },
        }
    }
}
