// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Circular index arithmetic over a fixed slide count.

/// Direction of travel around the ring.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    /// Towards higher indices (`+1`).
    #[default]
    Forward,
    /// Towards lower indices (`-1`).
    Backward,
}

impl Direction {
    /// Returns `+1` for [`Direction::Forward`] and `-1` for [`Direction::Backward`].
    #[must_use]
    pub const fn sign(self) -> i8 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }

    /// Returns the opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }

    /// Infers the travel direction from a horizontal drag delta.
    ///
    /// Dragging to the right (positive delta) pulls the previous slide into
    /// view, so it maps to [`Direction::Backward`]. Returns `None` for a zero
    /// (or NaN) delta.
    #[must_use]
    pub fn from_drag_delta(delta: f64) -> Option<Self> {
        if delta > 0.0 {
            Some(Self::Backward)
        } else if delta < 0.0 {
            Some(Self::Forward)
        } else {
            None
        }
    }
}

/// A fixed-size circular sequence of slide indices `0..len`.
///
/// The ring never holds fewer than one slide.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ring {
    len: usize,
}

impl Ring {
    /// Creates a ring of `len` slides. A length of zero is clamped to one.
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self {
            len: if len == 0 { 1 } else { len },
        }
    }

    /// Returns the number of slides. Never zero.
    #[must_use]
    pub const fn slide_count(&self) -> usize {
        self.len
    }

    /// Returns `true` if `index` lies in `0..len`.
    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        index < self.len
    }

    /// Returns `true` if there is a distinct slide to navigate to.
    #[must_use]
    pub const fn can_navigate(&self) -> bool {
        self.len > 1
    }

    /// Returns `true` for a two-slide ring, where previous and next alias the same slide.
    #[must_use]
    pub const fn is_pair(&self) -> bool {
        self.len == 2
    }

    /// Moves one position from `index` in `direction`, wrapping at both ends.
    ///
    /// `index` is expected to lie inside the ring; out-of-range input is
    /// reduced modulo the ring length first.
    #[must_use]
    pub const fn step(&self, index: usize, direction: Direction) -> usize {
        let index = index % self.len;
        match direction {
            Direction::Forward => (index + 1) % self.len,
            Direction::Backward => (index + self.len - 1) % self.len,
        }
    }

    /// Returns `(previous, next)` around `current` for travel in `direction`.
    ///
    /// `previous` trails behind the direction of travel and `next` leads it,
    /// so flipping the direction swaps the two.
    #[must_use]
    pub const fn neighbors(&self, current: usize, direction: Direction) -> (usize, usize) {
        (
            self.step(current, direction.reversed()),
            self.step(current, direction),
        )
    }

    /// Direction to travel from `from` to `to` without wrapping.
    ///
    /// Returns `None` when both indices are equal.
    #[must_use]
    pub const fn linear_direction(from: usize, to: usize) -> Option<Direction> {
        if to > from {
            Some(Direction::Forward)
        } else if to < from {
            Some(Direction::Backward)
        } else {
            None
        }
    }
}
