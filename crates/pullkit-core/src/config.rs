#![forbid(unsafe_code)]

//! Controller configuration.
//!
//! [`PullConfig`] gathers every tunable of the gesture controller: which
//! edges exist ([`Mode`]), the recognition slop, the finger-to-overlay
//! friction, the settle animation and the two runtime switches.
//!
//! # Invariants
//!
//! 1. A config accepted by [`PullConfig::validate`] has a finite,
//!    non-negative slop, a finite friction `>= 1.0` and a non-zero settle
//!    duration.
//! 2. [`PullConfig::sanitized`] always produces a config that validates.
//!
//! # Failure Modes
//!
//! - Invalid values are reported by [`PullConfig::validate`] as a
//!   [`ConfigError`]; nothing in the crate panics on a bad config.

use std::fmt;
use std::time::Duration;

use crate::animation::Easing;
use crate::geometry::Edge;

/// Default recognition slop in logical pixels.
pub const DEFAULT_TOUCH_SLOP: f32 = 8.0;

/// Default finger-to-overlay ratio: the overlay moves half as far as the finger.
pub const DEFAULT_FRICTION: f32 = 2.0;

/// Default duration of every settle animation.
pub const DEFAULT_SETTLE_DURATION: Duration = Duration::from_millis(400);

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Which pull gestures an overlay supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Mode {
    /// Header only: pull down at the top edge to refresh.
    #[default]
    PullDownOnly,
    /// Footer only: pull up at the bottom edge to load more.
    PullUpOnly,
    /// Header and footer.
    Both,
}

impl Mode {
    /// Whether this mode reserves a header.
    #[inline]
    #[must_use]
    pub const fn has_header(self) -> bool {
        matches!(self, Self::PullDownOnly | Self::Both)
    }

    /// Whether this mode reserves a footer.
    #[inline]
    #[must_use]
    pub const fn has_footer(self) -> bool {
        matches!(self, Self::PullUpOnly | Self::Both)
    }

    /// Whether this mode reserves the given edge.
    #[inline]
    #[must_use]
    pub const fn includes(self, edge: Edge) -> bool {
        match edge {
            Edge::Header => self.has_header(),
            Edge::Footer => self.has_footer(),
        }
    }
}

// ---------------------------------------------------------------------------
// PullConfig
// ---------------------------------------------------------------------------

/// Thresholds, ratios and switches for the gesture controller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PullConfig {
    /// Which edges exist (default: [`Mode::PullDownOnly`]).
    pub mode: Mode,
    /// Vertical travel (px) before a pull is recognised (default: 8.0).
    pub touch_slop: f32,
    /// Finger distance divided by overlay distance (default: 2.0).
    pub friction: f32,
    /// Duration of every settle animation (default: 400ms).
    #[cfg_attr(feature = "serde", serde(with = "duration_ms"))]
    pub settle_duration: Duration,
    /// Settle curve (default: [`Easing::ViscousFluid`]).
    pub easing: Easing,
    /// Master switch for pull gestures (default: true).
    pub pull_enabled: bool,
    /// Swallow all input while an indicator is busy (default: false).
    pub disable_scrolling_while_busy: bool,
}

impl Default for PullConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            touch_slop: DEFAULT_TOUCH_SLOP,
            friction: DEFAULT_FRICTION,
            settle_duration: DEFAULT_SETTLE_DURATION,
            easing: Easing::default(),
            pull_enabled: true,
            disable_scrolling_while_busy: false,
        }
    }
}

impl PullConfig {
    /// Config for the given mode with every other field at its default.
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Set the mode (builder pattern).
    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the recognition slop (builder pattern).
    #[must_use]
    pub fn with_touch_slop(mut self, slop: f32) -> Self {
        self.touch_slop = slop;
        self
    }

    /// Set the friction ratio (builder pattern).
    #[must_use]
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    /// Set the settle duration (builder pattern).
    #[must_use]
    pub fn with_settle_duration(mut self, duration: Duration) -> Self {
        self.settle_duration = duration;
        self
    }

    /// Set the settle curve (builder pattern).
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Enable or disable pull gestures (builder pattern).
    #[must_use]
    pub fn with_pull_enabled(mut self, enabled: bool) -> Self {
        self.pull_enabled = enabled;
        self
    }

    /// Swallow input while busy (builder pattern).
    #[must_use]
    pub fn with_disable_scrolling_while_busy(mut self, disable: bool) -> Self {
        self.disable_scrolling_while_busy = disable;
        self
    }

    /// Check every numeric field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.touch_slop.is_finite() {
            return Err(ConfigError::NonFiniteSlop);
        }
        if self.touch_slop < 0.0 {
            return Err(ConfigError::NegativeSlop {
                slop: self.touch_slop,
            });
        }
        if !self.friction.is_finite() || self.friction < 1.0 {
            return Err(ConfigError::InvalidFriction {
                friction: self.friction,
            });
        }
        if self.settle_duration.is_zero() {
            return Err(ConfigError::ZeroSettleDuration);
        }
        Ok(())
    }

    /// Replace every invalid field with its default.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if !self.touch_slop.is_finite() || self.touch_slop < 0.0 {
            self.touch_slop = DEFAULT_TOUCH_SLOP;
        }
        if !self.friction.is_finite() || self.friction < 1.0 {
            self.friction = DEFAULT_FRICTION;
        }
        if self.settle_duration.is_zero() {
            self.settle_duration = DEFAULT_SETTLE_DURATION;
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A rejected [`PullConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Slop is NaN or infinite.
    NonFiniteSlop,
    /// Slop is below zero.
    NegativeSlop { slop: f32 },
    /// Friction is not finite or below 1.0.
    InvalidFriction { friction: f32 },
    /// Settle duration is zero.
    ZeroSettleDuration,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteSlop => write!(f, "touch slop must be finite"),
            Self::NegativeSlop { slop } => {
                write!(f, "touch slop must be non-negative (got {slop})")
            }
            Self::InvalidFriction { friction } => {
                write!(f, "friction must be finite and at least 1.0 (got {friction})")
            }
            Self::ZeroSettleDuration => write!(f, "settle duration must be non-zero"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(feature = "serde")]
mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis().min(u64::MAX as u128) as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
