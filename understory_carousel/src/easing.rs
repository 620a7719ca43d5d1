// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named timing curves for slide transitions.
//!
//! A [`TimingCurve`] names the easing a presentation layer should apply to a
//! transition. The identifiers follow the CSS `transition-timing-function`
//! keywords so that web renderers can forward them verbatim, while
//! [`TimingCurve::sample`] lets other renderers evaluate the curve directly.
//!
//! ```
//! use understory_carousel::TimingCurve;
//!
//! let curve: TimingCurve = "ease-out".parse().unwrap();
//! assert_eq!(curve, TimingCurve::EaseOut);
//! assert_eq!(curve.to_string(), "ease-out");
//!
//! let custom: TimingCurve = "cubic-bezier(0.1, 0.7, 1.0, 0.1)".parse().unwrap();
//! assert!((custom.sample(1.0) - 1.0).abs() < 1e-9);
//! ```

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use kurbo::{CubicBez, ParamCurve};

/// Easing applied by the presentation layer to a slide transition.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "String", try_from = "String"))]
pub enum TimingCurve {
    /// CSS `ease`.
    Ease,
    /// Constant speed.
    Linear,
    /// CSS `ease-in`.
    EaseIn,
    /// CSS `ease-out`.
    EaseOut,
    /// CSS `ease-in-out`.
    #[default]
    EaseInOut,
    /// Jumps to the end value immediately.
    StepStart,
    /// Holds the start value until the end.
    StepEnd,
    /// A custom cubic Bézier through `(0, 0)`, `(x1, y1)`, `(x2, y2)`, `(1, 1)`.
    CubicBezier {
        /// First control point, x.
        x1: f64,
        /// First control point, y.
        y1: f64,
        /// Second control point, x.
        x2: f64,
        /// Second control point, y.
        y2: f64,
    },
}

impl TimingCurve {
    /// Returns the Bézier control points of this curve, if it is one.
    #[must_use]
    pub fn control_points(self) -> Option<[f64; 4]> {
        match self {
            Self::Ease => Some([0.25, 0.1, 0.25, 1.0]),
            Self::EaseIn => Some([0.42, 0.0, 1.0, 1.0]),
            Self::EaseOut => Some([0.0, 0.0, 0.58, 1.0]),
            Self::EaseInOut => Some([0.42, 0.0, 0.58, 1.0]),
            Self::CubicBezier { x1, y1, x2, y2 } => Some([x1, y1, x2, y2]),
            Self::Linear | Self::StepStart | Self::StepEnd => None,
        }
    }

    /// Evaluates the eased progress for linear progress `t` in `[0, 1]`.
    ///
    /// Input outside `[0, 1]` is clamped. Custom curves may overshoot the
    /// unit range in their output.
    #[must_use]
    pub fn sample(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::StepStart => 1.0,
            Self::StepEnd => {
                if t >= 1.0 {
                    1.0
                } else {
                    0.0
                }
            }
            _ => match self.control_points() {
                Some([x1, y1, x2, y2]) => sample_bezier(x1, y1, x2, y2, t),
                None => t,
            },
        }
    }
}

fn sample_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let curve = CubicBez::new((0.0, 0.0), (x1, y1), (x2, y2), (1.0, 1.0));
    // x(u) is monotonic because both x control coordinates lie in [0, 1].
    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    for _ in 0..48 {
        let mid = 0.5 * (lo + hi);
        if curve.eval(mid).x < x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    curve.eval(0.5 * (lo + hi)).y
}

impl fmt::Display for TimingCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ease => f.write_str("ease"),
            Self::Linear => f.write_str("linear"),
            Self::EaseIn => f.write_str("ease-in"),
            Self::EaseOut => f.write_str("ease-out"),
            Self::EaseInOut => f.write_str("ease-in-out"),
            Self::StepStart => f.write_str("step-start"),
            Self::StepEnd => f.write_str("step-end"),
            Self::CubicBezier { x1, y1, x2, y2 } => {
                write!(f, "cubic-bezier({x1}, {y1}, {x2}, {y2})")
            }
        }
    }
}

/// Error returned when a timing curve identifier cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseTimingCurveError {
    /// The identifier is not a known curve name.
    #[error("unknown timing curve `{0}`")]
    Unknown(String),
    /// `cubic-bezier(...)` did not contain exactly four numbers.
    #[error("cubic-bezier expects four numeric arguments")]
    MalformedBezier,
    /// A `cubic-bezier` x coordinate lies outside `[0, 1]`.
    #[error("cubic-bezier x coordinates must lie in [0, 1]")]
    BezierOutOfRange,
}

impl FromStr for TimingCurve {
    type Err = ParseTimingCurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let named = [
            ("ease", Self::Ease),
            ("linear", Self::Linear),
            ("ease-in", Self::EaseIn),
            ("ease-out", Self::EaseOut),
            ("ease-in-out", Self::EaseInOut),
            ("step-start", Self::StepStart),
            ("step-end", Self::StepEnd),
        ];
        if let Some((_, curve)) = named
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
        {
            return Ok(*curve);
        }

        let Some(args) = strip_function(s, "cubic-bezier") else {
            return Err(ParseTimingCurveError::Unknown(s.to_string()));
        };
        let mut values = [0.0_f64; 4];
        let mut parts = args.split(',');
        for value in &mut values {
            *value = parts
                .next()
                .and_then(|part| part.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite())
                .ok_or(ParseTimingCurveError::MalformedBezier)?;
        }
        if parts.next().is_some() {
            return Err(ParseTimingCurveError::MalformedBezier);
        }
        let [x1, y1, x2, y2] = values;
        if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
            return Err(ParseTimingCurveError::BezierOutOfRange);
        }
        Ok(Self::CubicBezier { x1, y1, x2, y2 })
    }
}

fn strip_function<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    let head = s.get(..name.len())?;
    if !head.eq_ignore_ascii_case(name) {
        return None;
    }
    s[name.len()..]
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

impl From<TimingCurve> for String {
    fn from(curve: TimingCurve) -> Self {
        curve.to_string()
    }
}

impl TryFrom<String> for TimingCurve {
    type Error = ParseTimingCurveError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
