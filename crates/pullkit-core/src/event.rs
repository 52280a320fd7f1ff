#![forbid(unsafe_code)]

//! Pointer input and dispatch results.

/// One pointer sample, in the overlay's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Finger (or button) went down.
    Down { x: f32, y: f32 },
    /// Finger moved.
    Move { x: f32, y: f32 },
    /// Finger lifted.
    Up,
    /// The platform took the pointer away.
    Cancel,
}

impl PointerEvent {
    /// Stable lowercase name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Down { .. } => "down",
            Self::Move { .. } => "move",
            Self::Up => "up",
            Self::Cancel => "cancel",
        }
    }
}

/// How the controller handled an event, and whether the content may also
/// see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Disposition {
    /// Not handled; deliver to the content.
    #[default]
    Ignored,
    /// A session is open but no drag is recognised yet; deliver to the
    /// content as well.
    Tracking,
    /// The controller owns the gesture; the content must not see it.
    Claimed,
    /// A busy indicator blocks scrolling; swallow the event.
    Blocked,
}

impl Disposition {
    /// True only when a pull gesture owns the event.
    #[inline]
    #[must_use]
    pub const fn is_claimed(self) -> bool {
        matches!(self, Self::Claimed)
    }

    /// True when the content must not receive the event.
    #[inline]
    #[must_use]
    pub const fn consumes(self) -> bool {
        matches!(self, Self::Claimed | Self::Blocked)
    }
}

/// How a pointer sequence ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// Finger lifted; a pull past the threshold commits.
    Up,
    /// Sequence cancelled; never commits.
    Cancel,
}

impl Release {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Cancel => "cancel",
        }
    }
}
