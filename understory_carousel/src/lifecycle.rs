// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition lifecycle: `Idle → Before → Animating → Idle`.
//!
//! [`Lifecycle`] only tracks the phase; the engine decides what to emit at
//! each edge. The two-slide settle choreography is a sub-step of
//! [`Phase::Animating`]: after the finished signal the lifecycle waits for
//! two animation frames before it is allowed to return to idle.

/// Phase of the current transition.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// No transition in progress.
    #[default]
    Idle,
    /// A command was accepted; indices are not committed yet.
    Before,
    /// Indices are committed and the presentation layer is animating.
    Animating {
        /// Pending settle step for two-slide rings, if the finished signal arrived.
        settle: Option<SettleStep>,
    },
}

/// Frame-by-frame steps that end a transition on a two-slide ring.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SettleStep {
    /// Next frame: detach the stale previous-slot marker.
    DetachMarker,
    /// Next frame: re-enable animation and finish.
    Restore,
}

/// What the finished signal resolved to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Finish {
    /// The transition is complete.
    Done,
    /// Settling started; frames are needed before completion.
    Settling,
    /// Nothing was animating or settling already started.
    Ignored,
}

/// Tracks the phase of at most one transition at a time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Lifecycle {
    phase: Phase,
}

impl Lifecycle {
    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns `true` from [`Phase::Before`] until the transition returns to idle.
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    /// Returns `true` while the lifecycle waits for animation frames.
    #[must_use]
    pub const fn needs_frame(&self) -> bool {
        matches!(self.phase, Phase::Animating { settle: Some(_) })
    }

    /// `Idle → Before`. Returns `false` if a transition is already running.
    pub(crate) fn begin(&mut self) -> bool {
        if self.is_moving() {
            return false;
        }
        self.phase = Phase::Before;
        true
    }

    /// `Before → Animating`.
    pub(crate) fn commit(&mut self) {
        debug_assert_eq!(self.phase, Phase::Before, "commit outside of Before");
        self.phase = Phase::Animating { settle: None };
    }

    /// Handles the presentation layer's finished signal.
    pub(crate) fn finish(&mut self, pair: bool) -> Finish {
        match self.phase {
            Phase::Animating { settle: None } if pair => {
                self.phase = Phase::Animating {
                    settle: Some(SettleStep::DetachMarker),
                };
                Finish::Settling
            }
            Phase::Animating { settle: None } => {
                self.phase = Phase::Idle;
                Finish::Done
            }
            _ => Finish::Ignored,
        }
    }

    /// Advances the settle choreography by one frame, returning the step to perform.
    ///
    /// After [`SettleStep::Restore`] the lifecycle is idle again.
    pub(crate) fn advance_frame(&mut self) -> Option<SettleStep> {
        let Phase::Animating {
            settle: Some(step),
        } = self.phase
        else {
            return None;
        };
        self.phase = match step {
            SettleStep::DetachMarker => Phase::Animating {
                settle: Some(SettleStep::Restore),
            },
            SettleStep::Restore => Phase::Idle,
        };
        Some(step)
    }
}
