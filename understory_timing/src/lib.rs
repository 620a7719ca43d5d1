// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timing --heading-base-level=0

//! Understory Timing: host-agnostic timer primitives for UI runtimes.
//!
//! UI kernels often need "call me back in N milliseconds" behavior without
//! owning a clock or an event loop. This crate provides the bookkeeping for
//! that: the host supplies timestamps (milliseconds in a monotonic timebase of
//! its choosing), asks when the next deadline is, and polls the timer when it
//! wakes up.
//!
//! The core type is [`TimerSlot`], a timer that holds **at most one** pending
//! deadline:
//!
//! - [`TimerSlot::arm`] always replaces the pending deadline, so re-arming in
//!   quick succession never stacks up duplicate firings.
//! - Every arm hands out a fresh [`TimerId`], which lets callers tell a stale
//!   wake-up apart from the current one.
//! - [`TimerSlot::poll`] fires the deadline once and clears it.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_timing::TimerSlot;
//!
//! let mut timer = TimerSlot::new();
//!
//! // Arm a 5 second timer at t = 250ms.
//! let id = timer.arm(250, 5_000);
//! assert_eq!(timer.deadline(), Some(5_250));
//!
//! // Too early: nothing fires.
//! assert_eq!(timer.poll(1_000), None);
//!
//! // At or after the deadline the timer fires exactly once.
//! assert_eq!(timer.poll(5_250), Some(id));
//! assert_eq!(timer.poll(6_000), None);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

use log::trace;

/// Handle identifying one arming of a [`TimerSlot`].
///
/// Handles are unique per slot: each call to [`TimerSlot::arm`] produces a new
/// one, even when it replaces a deadline that never fired.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Returns the raw generation number of this handle.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Pending {
    id: TimerId,
    deadline: u64,
}

/// A single-slot timer driven by host-supplied timestamps.
///
/// At most one deadline is outstanding at any time. Arming cancels the
/// previous deadline before installing the new one.
#[derive(Clone, Debug, Default)]
pub struct TimerSlot {
    pending: Option<Pending>,
    generation: u64,
}

impl TimerSlot {
    /// Creates an idle timer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: None,
            generation: 0,
        }
    }

    /// Arms the timer to fire `delay_ms` after `now_ms`, replacing any pending deadline.
    pub fn arm(&mut self, now_ms: u64, delay_ms: u64) -> TimerId {
        if let Some(previous) = self.pending.take() {
            trace!("timer: replacing {:?} due at {}", previous.id, previous.deadline);
        }
        self.generation = self.generation.wrapping_add(1);
        let id = TimerId(self.generation);
        let deadline = now_ms.saturating_add(delay_ms);
        self.pending = Some(Pending { id, deadline });
        id
    }

    /// Cancels the pending deadline, returning its handle if there was one.
    pub fn cancel(&mut self) -> Option<TimerId> {
        self.pending.take().map(|pending| pending.id)
    }

    /// Returns `true` while a deadline is pending.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the handle of the pending deadline.
    #[must_use]
    pub fn pending(&self) -> Option<TimerId> {
        self.pending.map(|pending| pending.id)
    }

    /// Returns the pending deadline in the host's timebase.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.pending.map(|pending| pending.deadline)
    }

    /// Returns how long until the pending deadline, saturating at zero.
    #[must_use]
    pub fn remaining(&self, now_ms: u64) -> Option<u64> {
        self.deadline()
            .map(|deadline| deadline.saturating_sub(now_ms))
    }

    /// Fires the pending deadline if it has elapsed at `now_ms`.
    ///
    /// Returns the fired handle and clears the slot. Returns `None` when the
    /// slot is idle or the deadline lies in the future.
    pub fn poll(&mut self, now_ms: u64) -> Option<TimerId> {
        match self.pending {
            Some(pending) if now_ms >= pending.deadline => {
                self.pending = None;
                Some(pending.id)
            }
            _ => None,
        }
    }
}
