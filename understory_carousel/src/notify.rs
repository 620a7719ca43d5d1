// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle notifications and the channels collaborators subscribe to.
//!
//! Every notification carries an immutable [`Snapshot`] of the carousel state
//! at the moment it was emitted. Collaborators (control highlights, media
//! players, analytics) subscribe to a [`ChannelSet`] on a [`Notifier`] and only
//! receive the kinds they asked for.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use understory_carousel::{Channel, ChannelSet, Notification, Notifier, Snapshot};
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let mut notifier = Notifier::new();
//! let sink = Rc::clone(&seen);
//! notifier.subscribe(Channel::End.into_set(), move |n: &Notification| {
//!     sink.borrow_mut().push(n.snapshot.current);
//! });
//!
//! notifier.dispatch(&Notification::new(Channel::Start, Snapshot::default()));
//! notifier.dispatch(&Notification::new(Channel::End, Snapshot::default()));
//! assert_eq!(*seen.borrow(), vec![0]);
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::ops::{BitOr, BitOrAssign};

use crate::easing::TimingCurve;
use crate::ring::Direction;

/// Read-only view of the carousel state carried by every notification.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// Index of the slide in the previous slot.
    pub previous: usize,
    /// Index of the active slide.
    pub current: usize,
    /// Index of the slide in the next slot.
    pub next: usize,
    /// Direction of the last or ongoing move.
    pub direction: Direction,
    /// Live drag offset in pixels.
    pub offset: f64,
    /// Transition duration in milliseconds.
    pub duration_ms: u32,
    /// Transition timing curve.
    pub timing_curve: TimingCurve,
    /// Whether the presentation layer should animate changes.
    pub transition_enabled: bool,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            previous: 0,
            current: 0,
            next: 0,
            direction: Direction::Forward,
            offset: 0.0,
            duration_ms: crate::config::DEFAULT_DURATION_MS,
            timing_curve: TimingCurve::EaseInOut,
            transition_enabled: true,
        }
    }
}

/// A named notification channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Channel {
    /// A navigation command was accepted; the carousel is now moving.
    Before,
    /// New indices are committed; the presentation layer should animate.
    Start,
    /// The transition finished and defaults are restored.
    End,
    /// Duration, timing curve, transition flag, or slot markers changed.
    Change,
    /// The live drag offset changed.
    Offset,
    /// The pointer entered the interactive surface.
    PointerEnter,
    /// The pointer left the interactive surface.
    PointerLeave,
}

impl Channel {
    const ALL: [Self; 7] = [
        Self::Before,
        Self::Start,
        Self::End,
        Self::Change,
        Self::Offset,
        Self::PointerEnter,
        Self::PointerLeave,
    ];

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Converts this channel into a single-element [`ChannelSet`].
    #[must_use]
    pub const fn into_set(self) -> ChannelSet {
        ChannelSet(self.bit())
    }

    /// Returns the conventional event name of this channel.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::Start => "start",
            Self::End => "end",
            Self::Change => "change",
            Self::Offset => "offset",
            Self::PointerEnter => "pointer-enter",
            Self::PointerLeave => "pointer-leave",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A compact set of [`Channel`]s.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct ChannelSet(u8);

impl ChannelSet {
    /// No channels.
    pub const EMPTY: Self = Self(0);

    /// The transition lifecycle channels: before, start, end.
    pub const LIFECYCLE: Self =
        Self(Channel::Before.bit() | Channel::Start.bit() | Channel::End.bit());

    /// Every channel.
    pub const ALL: Self = Self(
        Self::LIFECYCLE.0
            | Channel::Change.bit()
            | Channel::Offset.bit()
            | Channel::PointerEnter.bit()
            | Channel::PointerLeave.bit(),
    );

    /// Returns `true` if the set contains `channel`.
    #[must_use]
    pub const fn contains(self, channel: Channel) -> bool {
        self.0 & channel.bit() != 0
    }

    /// Adds `channel` to the set.
    pub fn insert(&mut self, channel: Channel) {
        self.0 |= channel.bit();
    }

    /// Removes `channel` from the set.
    pub fn remove(&mut self, channel: Channel) {
        self.0 &= !channel.bit();
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates the channels in this set.
    pub fn iter(self) -> impl Iterator<Item = Channel> {
        Channel::ALL
            .into_iter()
            .filter(move |channel| self.contains(*channel))
    }
}

impl fmt::Debug for ChannelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl BitOr for ChannelSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOr<Channel> for ChannelSet {
    type Output = Self;

    fn bitor(self, rhs: Channel) -> Self {
        Self(self.0 | rhs.bit())
    }
}

impl BitOr for Channel {
    type Output = ChannelSet;

    fn bitor(self, rhs: Self) -> ChannelSet {
        ChannelSet(self.bit() | rhs.bit())
    }
}

impl BitOrAssign<Channel> for ChannelSet {
    fn bitor_assign(&mut self, rhs: Channel) {
        self.insert(rhs);
    }
}

impl From<Channel> for ChannelSet {
    fn from(channel: Channel) -> Self {
        channel.into_set()
    }
}

/// A notification emitted on one channel.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Notification {
    /// Channel the notification belongs to.
    pub channel: Channel,
    /// State at the time of emission.
    pub snapshot: Snapshot,
}

impl Notification {
    /// Creates a notification.
    #[must_use]
    pub const fn new(channel: Channel, snapshot: Snapshot) -> Self {
        Self { channel, snapshot }
    }
}

/// Handle returned by [`Notifier::subscribe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

struct Subscriber {
    id: SubscriptionId,
    channels: ChannelSet,
    callback: Box<dyn FnMut(&Notification)>,
}

/// Fans notifications out to subscribers by channel.
///
/// Subscribers are called in subscription order.
#[derive(Default)]
pub struct Notifier {
    subscribers: Vec<Subscriber>,
    next_id: u32,
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("subscribers", &self.subscribers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl Notifier {
    /// Creates a notifier without subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for every channel in `channels`.
    pub fn subscribe(
        &mut self,
        channels: impl Into<ChannelSet>,
        callback: impl FnMut(&Notification) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.subscribers.push(Subscriber {
            id,
            channels: channels.into(),
            callback: Box::new(callback),
        });
        id
    }

    /// Removes a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|subscriber| subscriber.id != id);
        self.subscribers.len() != before
    }

    /// Returns the number of live subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Returns `true` if nobody is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Delivers `notification` to every subscriber of its channel.
    pub fn dispatch(&mut self, notification: &Notification) {
        for subscriber in &mut self.subscribers {
            if subscriber.channels.contains(notification.channel) {
                (subscriber.callback)(notification);
            }
        }
    }
}
