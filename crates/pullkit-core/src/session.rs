#![forbid(unsafe_code)]

//! Per-touch gesture session and the drag mode it settles on.

use crate::geometry::Edge;

/// What a recognised drag is doing. Fixed for the rest of the session once
/// chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragMode {
    /// No drag recognised (yet).
    #[default]
    None,
    /// Header pull at the top edge.
    PullDownToRefresh,
    /// Footer pull at the bottom edge.
    PullUpToLoadMore,
    /// Dragging an indicator that is already revealed because it is busy.
    FollowSettledIndicator { edge: Edge },
}

impl DragMode {
    /// Whether a drag has been recognised.
    #[inline]
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Edge whose indicator this drag moves.
    #[must_use]
    pub const fn edge(self) -> Option<Edge> {
        match self {
            Self::None => None,
            Self::PullDownToRefresh => Some(Edge::Header),
            Self::PullUpToLoadMore => Some(Edge::Footer),
            Self::FollowSettledIndicator { edge } => Some(edge),
        }
    }

    /// Stable lowercase name for logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::PullDownToRefresh => "pull_down_to_refresh",
            Self::PullUpToLoadMore => "pull_up_to_load_more",
            Self::FollowSettledIndicator { .. } => "follow_settled_indicator",
        }
    }
}

/// State of one pointer sequence, from down to up/cancel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    /// Y of the down event; pull distance is measured from here.
    pub initial_y: f32,
    /// X of the down event.
    pub initial_x: f32,
    /// Y of the last sample that mattered (the down, then the claiming move).
    pub last_y: f32,
    /// X of the down event; recognition compares horizontal travel to it.
    pub last_x: f32,
    /// Recognised drag, if any.
    pub drag_mode: DragMode,
    /// Whether the controller owns this sequence.
    pub is_dragging: bool,
}

impl GestureSession {
    /// Open a session at the down position.
    #[must_use]
    pub fn begin(x: f32, y: f32) -> Self {
        Self {
            initial_y: y,
            initial_x: x,
            last_y: y,
            last_x: x,
            drag_mode: DragMode::None,
            is_dragging: false,
        }
    }

    /// Signed vertical travel since the last recorded sample (positive = down).
    #[inline]
    #[must_use]
    pub fn dy(&self, y: f32) -> f32 {
        y - self.last_y
    }

    /// Absolute horizontal travel since the last recorded sample.
    #[inline]
    #[must_use]
    pub fn x_diff(&self, x: f32) -> f32 {
        (x - self.last_x).abs()
    }

    /// Fix the drag mode and take ownership of the sequence.
    pub fn claim(&mut self, mode: DragMode, y: f32) {
        self.drag_mode = mode;
        self.is_dragging = true;
        self.last_y = y;
    }

    /// Raw finger displacement for the pull: `initial_y - y`.
    #[inline]
    #[must_use]
    pub fn pull_distance(&self, y: f32) -> f32 {
        self.initial_y - y
    }
}
