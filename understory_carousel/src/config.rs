// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carousel configuration, partial updates, and string attribute parsing.
//!
//! [`CarouselConfig`] is the full set of options recognized at construction.
//! [`ConfigPatch`] carries a partial update applied later through
//! [`Carousel::set_config`](crate::Carousel::set_config).
//!
//! Embedders that keep configuration as string attributes (for example HTML
//! `data-*` attributes) can turn each attribute write into a patch with
//! [`ConfigPatch::from_attribute`]. Malformed values never fail: they are
//! replaced by the documented default for that option.
//!
//! ```
//! use understory_carousel::{ConfigPatch, TimingCurve};
//!
//! let patch = ConfigPatch::from_attribute("data-timing-function", Some("linear"));
//! assert_eq!(patch.timing_curve, Some(TimingCurve::Linear));
//!
//! // Garbage falls back to the default duration instead of failing.
//! let patch = ConfigPatch::from_attribute("duration", Some("fast"));
//! assert_eq!(patch.duration_ms, Some(250));
//!
//! // Removing the interval attribute disables auto-advance.
//! let patch = ConfigPatch::from_attribute("auto-interval", None);
//! assert_eq!(patch.auto_interval_ms, Some(0));
//! ```

use alloc::string::{String, ToString};

use log::debug;

use crate::easing::{ParseTimingCurveError, TimingCurve};
use crate::ring::Direction;

/// Default transition duration in milliseconds.
pub const DEFAULT_DURATION_MS: u32 = 250;

/// Default transition duration for auto-advance steps in milliseconds.
pub const DEFAULT_AUTO_DURATION_MS: u32 = 1_000;

/// Snap divisor controlling how far a drag must travel to commit a step.
///
/// The commit threshold is `track_width / divisor`. A divisor of zero disables
/// snapping so any non-zero drag commits; other values are clamped to
/// [`SnapDivisor::MIN`]`..=`[`SnapDivisor::MAX`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "i64", into = "u8"))]
pub struct SnapDivisor(u8);

impl SnapDivisor {
    /// Snapping disabled.
    pub const DISABLED: Self = Self(0);
    /// Smallest enabled divisor (half the track width).
    pub const MIN: u8 = 2;
    /// Largest divisor (a tenth of the track width).
    pub const MAX: u8 = 10;

    /// Creates a divisor, mapping zero to [`SnapDivisor::DISABLED`] and clamping the rest.
    #[must_use]
    pub fn new(divisor: i64) -> Self {
        if divisor == 0 {
            return Self::DISABLED;
        }
        let clamped = divisor.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        Self(u8::try_from(clamped).unwrap_or(Self::MAX))
    }

    /// Returns the raw divisor (`0` when disabled).
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns `true` if snapping is disabled.
    #[must_use]
    pub const fn is_disabled(self) -> bool {
        self.0 == 0
    }

    /// Returns the minimum absolute drag distance that commits a step.
    #[must_use]
    pub fn threshold(self, track_width: f64) -> f64 {
        if self.is_disabled() || track_width.is_nan() || track_width <= 0.0 {
            0.0
        } else {
            track_width / f64::from(self.0)
        }
    }
}

impl Default for SnapDivisor {
    fn default() -> Self {
        Self(6)
    }
}

impl From<i64> for SnapDivisor {
    fn from(divisor: i64) -> Self {
        Self::new(divisor)
    }
}

impl From<SnapDivisor> for u8 {
    fn from(divisor: SnapDivisor) -> Self {
        divisor.0
    }
}

/// Auto-advance options.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AutoplayConfig {
    /// Idle interval between automatic steps; `0` disables auto-advance.
    pub interval_ms: u32,
    /// Transition duration used for automatic steps.
    pub duration_ms: u32,
    /// Timing curve used for automatic steps.
    pub timing_curve: TimingCurve,
    /// Direction of automatic steps.
    pub direction: Direction,
    /// Keep advancing while the pointer hovers the carousel.
    pub advance_on_hover: bool,
    /// Explicitly paused.
    pub paused: bool,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            interval_ms: 0,
            duration_ms: DEFAULT_AUTO_DURATION_MS,
            timing_curve: TimingCurve::EaseInOut,
            direction: Direction::Forward,
            advance_on_hover: false,
            paused: false,
        }
    }
}

impl AutoplayConfig {
    /// Returns `true` if an interval is configured.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.interval_ms > 0
    }
}

/// Options recognized when a carousel is created.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CarouselConfig {
    /// Default transition duration in milliseconds.
    pub duration_ms: u32,
    /// Default timing curve.
    pub timing_curve: TimingCurve,
    /// Drag distance divisor for committing a step.
    pub snap: SnapDivisor,
    /// Number of slides visible at once; auto-advance needs more slides than this.
    pub visible: usize,
    /// Auto-advance options.
    pub autoplay: AutoplayConfig,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            timing_curve: TimingCurve::EaseInOut,
            snap: SnapDivisor::default(),
            visible: 1,
            autoplay: AutoplayConfig::default(),
        }
    }
}

impl CarouselConfig {
    /// Returns a copy with out-of-range values replaced by their defaults.
    ///
    /// Zero durations would never produce a completion signal, so they fall
    /// back to the defaults; a zero visible window becomes one.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if self.duration_ms == 0 {
            debug!("carousel-config: zero duration, using {DEFAULT_DURATION_MS}ms");
            self.duration_ms = DEFAULT_DURATION_MS;
        }
        if self.autoplay.duration_ms == 0 {
            debug!("carousel-config: zero auto duration, using {DEFAULT_AUTO_DURATION_MS}ms");
            self.autoplay.duration_ms = DEFAULT_AUTO_DURATION_MS;
        }
        self.visible = self.visible.max(1);
        self
    }
}

/// A partial configuration update. `None` fields are left unchanged.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConfigPatch {
    /// New default transition duration.
    pub duration_ms: Option<u32>,
    /// New default timing curve.
    pub timing_curve: Option<TimingCurve>,
    /// Navigate to this slide.
    pub current_index: Option<usize>,
    /// New snap divisor.
    pub snap: Option<SnapDivisor>,
    /// New visible window size.
    pub visible: Option<usize>,
    /// New auto-advance interval (`0` disables).
    pub auto_interval_ms: Option<u32>,
    /// New auto-advance transition duration.
    pub auto_duration_ms: Option<u32>,
    /// New auto-advance timing curve.
    pub auto_timing_curve: Option<TimingCurve>,
    /// New auto-advance direction.
    pub auto_direction: Option<Direction>,
    /// New advance-on-hover flag.
    pub advance_on_hover: Option<bool>,
    /// New pause flag.
    pub paused: Option<bool>,
}

impl ConfigPatch {
    /// Returns `true` if the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merges this patch into `config`, sanitizing the result.
    ///
    /// `current_index` is a command rather than a stored option and is ignored here.
    pub fn apply_to(&self, config: &mut CarouselConfig) {
        if let Some(duration) = self.duration_ms {
            config.duration_ms = duration;
        }
        if let Some(curve) = self.timing_curve {
            config.timing_curve = curve;
        }
        if let Some(snap) = self.snap {
            config.snap = snap;
        }
        if let Some(visible) = self.visible {
            config.visible = visible;
        }
        let auto = &mut config.autoplay;
        if let Some(interval) = self.auto_interval_ms {
            auto.interval_ms = interval;
        }
        if let Some(duration) = self.auto_duration_ms {
            auto.duration_ms = duration;
        }
        if let Some(curve) = self.auto_timing_curve {
            auto.timing_curve = curve;
        }
        if let Some(direction) = self.auto_direction {
            auto.direction = direction;
        }
        if let Some(on_hover) = self.advance_on_hover {
            auto.advance_on_hover = on_hover;
        }
        if let Some(paused) = self.paused {
            auto.paused = paused;
        }
        *config = config.sanitized();
    }

    /// Builds a patch from a string attribute write, substituting defaults for bad values.
    ///
    /// `value` is `None` when the attribute was removed, which resets the
    /// option to its default. Unknown attributes produce an empty patch.
    #[must_use]
    pub fn from_attribute(name: &str, value: Option<&str>) -> Self {
        match Self::parse_attribute(name, value) {
            Ok(patch) => patch,
            Err(err) => {
                debug!("carousel-config: {err}; substituting default");
                match Attribute::from_name(name) {
                    Some(attribute) => attribute.default_patch(),
                    None => Self::default(),
                }
            }
        }
    }

    /// Strictly parses a string attribute write.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the attribute is unknown or its value is malformed.
    pub fn parse_attribute(name: &str, value: Option<&str>) -> Result<Self, ConfigError> {
        let attribute = Attribute::from_name(name)
            .ok_or_else(|| ConfigError::UnknownAttribute(name.to_string()))?;
        let Some(value) = value else {
            return Ok(attribute.default_patch());
        };
        let mut patch = Self::default();
        match attribute {
            Attribute::Duration => {
                patch.duration_ms = Some(parse_positive_ms(attribute, value)?);
            }
            Attribute::TimingFunction => {
                patch.timing_curve = Some(parse_curve(attribute, value)?);
            }
            Attribute::Current => {
                let index = parse_integer(attribute, value)?;
                let index = usize::try_from(index).map_err(|_| ConfigError::OutOfRange {
                    attribute: attribute.name(),
                    value: index,
                })?;
                patch.current_index = Some(index);
            }
            Attribute::Snap => {
                patch.snap = Some(SnapDivisor::new(parse_integer(attribute, value)?));
            }
            Attribute::Visible => {
                let visible = parse_integer(attribute, value)?;
                patch.visible = Some(
                    usize::try_from(visible)
                        .ok()
                        .filter(|v| *v > 0)
                        .ok_or(ConfigError::OutOfRange {
                            attribute: attribute.name(),
                            value: visible,
                        })?,
                );
            }
            Attribute::AutoInterval => {
                // Non-positive intervals disable auto-advance rather than failing.
                let interval = parse_integer(attribute, value)?;
                patch.auto_interval_ms =
                    Some(u32::try_from(interval.max(0)).unwrap_or(u32::MAX));
            }
            Attribute::AutoDuration => {
                patch.auto_duration_ms = Some(parse_positive_ms(attribute, value)?);
            }
            Attribute::AutoTimingFunction => {
                patch.auto_timing_curve = Some(parse_curve(attribute, value)?);
            }
            Attribute::AutoDirection => {
                patch.auto_direction = Some(parse_direction(attribute, value)?);
            }
            Attribute::AutoOnHover => {
                patch.advance_on_hover = Some(parse_flag(value));
            }
            Attribute::AutoPause => {
                patch.paused = Some(parse_flag(value));
            }
        }
        Ok(patch)
    }
}

/// String attributes understood by [`ConfigPatch::from_attribute`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// `duration`: default transition duration in ms.
    Duration,
    /// `timing-function`: default timing curve.
    TimingFunction,
    /// `current`: navigate to an index.
    Current,
    /// `snap`: snap divisor.
    Snap,
    /// `visible`: visible window size.
    Visible,
    /// `auto-interval`: auto-advance interval in ms.
    AutoInterval,
    /// `auto-duration`: auto-advance transition duration in ms.
    AutoDuration,
    /// `auto-timing-function`: auto-advance timing curve.
    AutoTimingFunction,
    /// `auto-dir`: auto-advance direction.
    AutoDirection,
    /// `auto-on-hover`: keep advancing while hovered.
    AutoOnHover,
    /// `auto-pause`: pause auto-advance.
    AutoPause,
}

impl Attribute {
    const ALL: [Self; 11] = [
        Self::Duration,
        Self::TimingFunction,
        Self::Current,
        Self::Snap,
        Self::Visible,
        Self::AutoInterval,
        Self::AutoDuration,
        Self::AutoTimingFunction,
        Self::AutoDirection,
        Self::AutoOnHover,
        Self::AutoPause,
    ];

    /// Looks up an attribute by name. A leading `data-` prefix is ignored.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        let name = name.strip_prefix("data-").unwrap_or(name);
        Self::ALL
            .into_iter()
            .find(|attribute| attribute.name().eq_ignore_ascii_case(name))
    }

    /// Returns the attribute name without the `data-` prefix.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Duration => "duration",
            Self::TimingFunction => "timing-function",
            Self::Current => "current",
            Self::Snap => "snap",
            Self::Visible => "visible",
            Self::AutoInterval => "auto-interval",
            Self::AutoDuration => "auto-duration",
            Self::AutoTimingFunction => "auto-timing-function",
            Self::AutoDirection => "auto-dir",
            Self::AutoOnHover => "auto-on-hover",
            Self::AutoPause => "auto-pause",
        }
    }

    /// The patch that resets this option to its default.
    #[must_use]
    pub fn default_patch(self) -> ConfigPatch {
        let defaults = CarouselConfig::default();
        let mut patch = ConfigPatch::default();
        match self {
            Self::Duration => patch.duration_ms = Some(defaults.duration_ms),
            Self::TimingFunction => patch.timing_curve = Some(defaults.timing_curve),
            Self::Current => {}
            Self::Snap => patch.snap = Some(defaults.snap),
            Self::Visible => patch.visible = Some(defaults.visible),
            Self::AutoInterval => patch.auto_interval_ms = Some(defaults.autoplay.interval_ms),
            Self::AutoDuration => patch.auto_duration_ms = Some(defaults.autoplay.duration_ms),
            Self::AutoTimingFunction => {
                patch.auto_timing_curve = Some(defaults.autoplay.timing_curve);
            }
            Self::AutoDirection => patch.auto_direction = Some(defaults.autoplay.direction),
            Self::AutoOnHover => patch.advance_on_hover = Some(false),
            Self::AutoPause => patch.paused = Some(false),
        }
        patch
    }
}

/// Error produced by strict attribute parsing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The attribute name is not recognized.
    #[error("unknown attribute `{0}`")]
    UnknownAttribute(String),
    /// The value is not an integer.
    #[error("`{attribute}` expects an integer, got `{value}`")]
    NotANumber {
        /// Attribute name.
        attribute: &'static str,
        /// Offending value.
        value: String,
    },
    /// The value is numeric but outside the accepted range.
    #[error("`{attribute}` is out of range: {value}")]
    OutOfRange {
        /// Attribute name.
        attribute: &'static str,
        /// Offending value.
        value: i64,
    },
    /// The value is not a known timing curve.
    #[error("`{attribute}`: {source}")]
    TimingCurve {
        /// Attribute name.
        attribute: &'static str,
        /// Parse failure.
        #[source]
        source: ParseTimingCurveError,
    },
    /// The value is not a direction.
    #[error("`{attribute}` expects `forward` or `back`, got `{value}`")]
    Direction {
        /// Attribute name.
        attribute: &'static str,
        /// Offending value.
        value: String,
    },
}

fn parse_integer(attribute: Attribute, value: &str) -> Result<i64, ConfigError> {
    let trimmed = value.trim();
    let digits = trimmed.strip_suffix("ms").unwrap_or(trimmed).trim_end();
    digits.parse::<i64>().map_err(|_| ConfigError::NotANumber {
        attribute: attribute.name(),
        value: value.to_string(),
    })
}

fn parse_positive_ms(attribute: Attribute, value: &str) -> Result<u32, ConfigError> {
    let ms = parse_integer(attribute, value)?;
    u32::try_from(ms)
        .ok()
        .filter(|ms| *ms > 0)
        .ok_or(ConfigError::OutOfRange {
            attribute: attribute.name(),
            value: ms,
        })
}

fn parse_curve(attribute: Attribute, value: &str) -> Result<TimingCurve, ConfigError> {
    value
        .parse()
        .map_err(|source| ConfigError::TimingCurve {
            attribute: attribute.name(),
            source,
        })
}

fn parse_direction(attribute: Attribute, value: &str) -> Result<Direction, ConfigError> {
    let value = value.trim();
    if ["back", "backward", "backwards"]
        .iter()
        .any(|name| name.eq_ignore_ascii_case(value))
    {
        Ok(Direction::Backward)
    } else if ["fwd", "forward", "forwards"]
        .iter()
        .any(|name| name.eq_ignore_ascii_case(value))
    {
        Ok(Direction::Forward)
    } else {
        Err(ConfigError::Direction {
            attribute: attribute.name(),
            value: value.to_string(),
        })
    }
}

/// Boolean attributes are "on" by presence; only explicit negatives turn them off.
fn parse_flag(value: &str) -> bool {
    let value = value.trim();
    !["false", "0", "no", "off"]
        .iter()
        .any(|name| name.eq_ignore_ascii_case(value))
}
