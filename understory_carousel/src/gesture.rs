// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag gestures: turn pointer samples into a live offset, then commit or bounce.
//!
//! ## Usage
//!
//! 1) Tell the controller how wide the track is with [`GestureController::set_track_width`].
//! 2) Forward pointer presses, moves, and releases with their timestamps.
//! 3) On release the controller either steps the engine in the drag direction
//!    with a velocity-derived duration, or runs a bounce back to the current slide.
//!
//! Only the horizontal component of each [`Point`] is used.
//!
//! ```
//! use kurbo::Point;
//! use understory_carousel::{CarouselEngine, GestureController, GestureOutcome, SnapDivisor};
//!
//! let mut engine = CarouselEngine::new(4);
//! let mut drag = GestureController::new(SnapDivisor::new(4));
//! drag.set_track_width(400.0);
//!
//! assert!(drag.pointer_down(&mut engine, Point::new(300.0, 0.0), 0));
//! drag.pointer_move(&mut engine, Point::new(150.0, 0.0));
//! assert_eq!(engine.offset(), -150.0);
//!
//! // 150px is past the 100px threshold: commit forward.
//! let outcome = drag.pointer_up(&mut engine, Point::new(150.0, 0.0), 300);
//! assert_eq!(outcome, GestureOutcome::Committed);
//! assert_eq!(engine.current(), 1);
//! assert_eq!(engine.duration_ms(), 500);
//! ```

use kurbo::Point;
use log::debug;

use crate::config::SnapDivisor;
use crate::easing::TimingCurve;
use crate::engine::CarouselEngine;
use crate::ring::Direction;

/// Shortest commit duration: one frame at 60 Hz.
pub const MIN_COMMIT_DURATION_MS: f64 = 1000.0 / 60.0;

/// Longest commit duration.
pub const MAX_COMMIT_DURATION_MS: f64 = 1000.0;

/// What a release did to the engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GestureOutcome {
    /// No drag was active.
    Ignored,
    /// The pointer never moved; no transition ran.
    NoChange,
    /// The drag passed the threshold and the engine stepped.
    Committed,
    /// The drag fell short and the engine bounced back.
    Bounced,
}

/// The transient state of one pointer drag.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GestureSession {
    /// Where the pointer went down.
    pub start: Point,
    /// When the pointer went down.
    pub start_ms: u64,
    /// Most recent pointer position.
    pub last: Point,
}

impl GestureSession {
    /// Horizontal distance from the press to `position`.
    #[must_use]
    pub fn delta(&self, position: Point) -> f64 {
        (position - self.start).x
    }
}

/// Converts pointer drags into committed steps or bounces.
#[derive(Clone, Debug, Default)]
pub struct GestureController {
    session: Option<GestureSession>,
    snap: SnapDivisor,
    track_width: f64,
}

impl GestureController {
    /// Creates a controller with the given snap divisor and a zero track width.
    #[must_use]
    pub fn new(snap: SnapDivisor) -> Self {
        Self {
            session: None,
            snap,
            track_width: 0.0,
        }
    }

    /// Returns the active session, if a drag is in progress.
    #[must_use]
    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    /// Returns `true` while a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Returns the snap divisor.
    #[must_use]
    pub fn snap(&self) -> SnapDivisor {
        self.snap
    }

    /// Replaces the snap divisor.
    pub fn set_snap(&mut self, snap: SnapDivisor) {
        self.snap = snap;
    }

    /// Returns the track width in pixels.
    #[must_use]
    pub fn track_width(&self) -> f64 {
        self.track_width
    }

    /// Sets the track width in pixels. Negative or non-finite widths become zero.
    pub fn set_track_width(&mut self, width: f64) {
        self.track_width = if width.is_finite() { width.max(0.0) } else { 0.0 };
    }

    /// Minimum drag distance that commits a step at the current track width.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.snap.threshold(self.track_width)
    }

    /// Starts a drag. Rejected while the engine is moving or has a single slide.
    ///
    /// Animation is disabled so the dragged slide tracks the pointer without easing.
    pub fn pointer_down(
        &mut self,
        engine: &mut CarouselEngine,
        position: Point,
        now_ms: u64,
    ) -> bool {
        if !engine.accepts_navigation() {
            return false;
        }
        engine.set_transition_enabled(false);
        self.session = Some(GestureSession {
            start: position,
            start_ms: now_ms,
            last: position,
        });
        true
    }

    /// Updates the live offset and the provisional direction.
    ///
    /// Ignored while the engine is moving.
    pub fn pointer_move(&mut self, engine: &mut CarouselEngine, position: Point) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if engine.is_moving() {
            return;
        }
        session.last = position;
        let delta = session.delta(position);
        if let Some(direction) = Direction::from_drag_delta(delta) {
            if direction != engine.direction() {
                engine.set_direction(direction);
            }
            engine.set_offset(delta);
        }
    }

    /// Ends the drag at `position`.
    ///
    /// Animation is re-enabled and the live offset cleared before the engine
    /// is asked to commit or bounce.
    pub fn pointer_up(
        &mut self,
        engine: &mut CarouselEngine,
        position: Point,
        now_ms: u64,
    ) -> GestureOutcome {
        let Some(session) = self.session.take() else {
            return GestureOutcome::Ignored;
        };
        engine.set_transition_enabled(true);
        engine.set_offset(0.0);

        let delta = session.delta(position);
        let Some(direction) = Direction::from_drag_delta(delta) else {
            return GestureOutcome::NoChange;
        };
        if !engine.accepts_navigation() {
            return GestureOutcome::NoChange;
        }
        // A release without move samples never set the provisional direction.
        if direction != engine.direction() {
            engine.set_direction(direction);
        }
        let distance = delta.abs();
        let threshold = self.threshold();
        if distance >= threshold {
            let elapsed = now_ms.saturating_sub(session.start_ms);
            let duration = remaining_duration(distance, elapsed, self.track_width);
            debug!(
                "carousel-drag: commit {direction:?} after {distance}px in {elapsed}ms, {duration}ms left"
            );
            engine.set_duration(duration);
            engine.set_timing_curve(TimingCurve::EaseOut);
            engine.step(direction);
            GestureOutcome::Committed
        } else {
            debug!("carousel-drag: {distance}px below {threshold}px, bouncing");
            engine.bounce();
            GestureOutcome::Bounced
        }
    }

    /// The pointer left the track; an active drag is released where it was last seen.
    pub fn pointer_leave(&mut self, engine: &mut CarouselEngine, now_ms: u64) -> GestureOutcome {
        match self.session {
            Some(session) => self.pointer_up(engine, session.last, now_ms),
            None => GestureOutcome::Ignored,
        }
    }
}

/// Duration for the rest of a committed drag, keeping the release velocity.
///
/// The remaining `track_width - distance` pixels are covered at the average
/// drag speed, clamped to between one frame and one second and rounded to
/// whole milliseconds.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    reason = "the duration is clamped to [17, 1000] before the cast"
)]
pub fn remaining_duration(distance: f64, elapsed_ms: u64, track_width: f64) -> u32 {
    let speed = distance / elapsed_ms as f64;
    let raw = (track_width - distance) / speed;
    let clamped = if raw.is_nan() {
        MIN_COMMIT_DURATION_MS
    } else {
        raw.clamp(MIN_COMMIT_DURATION_MS, MAX_COMMIT_DURATION_MS)
    };
    libm::round(clamped) as u32
}
