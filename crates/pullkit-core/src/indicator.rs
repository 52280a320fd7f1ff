#![forbid(unsafe_code)]

//! Per-edge indicator state machine.
//!
//! Each edge (header, footer) owns an [`IndicatorState`]: the display phase,
//! the measured indicator height, the one-shot "continued pull while busy"
//! marker, the last-action timestamp and the attached [`Indicator`] view.
//!
//! # State Machine
//!
//! ```text
//! Idle ──(|offset| > height)──▶ ReleaseToAct ──(|offset| <= height)──▶ Idle
//! ReleaseToAct ──(release)──▶ Acting ──(complete)──▶ Idle
//! Idle ──(manual trigger)──▶ ManuallyActing ──(complete)──▶ Idle
//! ```
//!
//! # Invariants
//!
//! 1. Every phase change is mirrored to the attached view exactly once.
//! 2. Threshold updates are edge-triggered: a magnitude that stays on one
//!    side of the height produces no further view calls.
//! 3. A height of 0 never enters `ReleaseToAct`.
//! 4. `Acting` and `ManuallyActing` never transition into each other.

use crate::geometry::Edge;
use web_time::SystemTime;

/// Display phase of one indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndicatorPhase {
    /// At rest, or pulled less than the indicator height.
    #[default]
    Idle,
    /// Pulled past the indicator height; releasing commits.
    ReleaseToAct,
    /// Committed by a released gesture.
    Acting,
    /// Triggered programmatically.
    ManuallyActing,
}

impl IndicatorPhase {
    /// Whether this phase is one of the two busy phases.
    #[inline]
    #[must_use]
    pub const fn is_busy(self) -> bool {
        matches!(self, Self::Acting | Self::ManuallyActing)
    }

    /// Stable lowercase name for logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::ReleaseToAct => "release_to_act",
            Self::Acting => "acting",
            Self::ManuallyActing => "manually_acting",
        }
    }
}

/// Rendering side of an indicator. Implemented by the presentation layer.
///
/// Calls are fire-and-forget; the controller never reads anything back
/// except the height measured on attach.
pub trait Indicator {
    /// Show the resting / "pull to ..." state.
    fn show_idle(&mut self);

    /// Show the "release to ..." state.
    fn show_release_to_act(&mut self);

    /// Show the busy state (spinner, "Refreshing..." and so on).
    fn show_acting(&mut self);

    /// Record the time of the last completed action. Only the header
    /// indicator receives this.
    fn set_last_action_time(&mut self, _time: SystemTime) {}

    /// Height of the indicator in logical pixels, measured once on attach.
    fn measured_height(&self) -> i32;
}

/// Text an indicator shows in each phase.
///
/// Opaque to the controller; carried so hosts can configure an indicator
/// at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorLabels {
    /// Shown while `Idle`.
    pub pull: String,
    /// Shown while `ReleaseToAct`.
    pub release: String,
    /// Shown while busy.
    pub acting: String,
}

impl IndicatorLabels {
    /// Build a label set.
    pub fn new(
        pull: impl Into<String>,
        release: impl Into<String>,
        acting: impl Into<String>,
    ) -> Self {
        Self {
            pull: pull.into(),
            release: release.into(),
            acting: acting.into(),
        }
    }

    /// Default English labels for an edge.
    #[must_use]
    pub fn for_edge(edge: Edge) -> Self {
        match edge {
            Edge::Header => Self::new("Pull to refresh", "Release to refresh", "Refreshing..."),
            Edge::Footer => Self::new(
                "Pull up to load more",
                "Release to load more",
                "Loading...",
            ),
        }
    }

    /// Label for a phase.
    #[must_use]
    pub fn label(&self, phase: IndicatorPhase) -> &str {
        match phase {
            IndicatorPhase::Idle => &self.pull,
            IndicatorPhase::ReleaseToAct => &self.release,
            IndicatorPhase::Acting | IndicatorPhase::ManuallyActing => &self.acting,
        }
    }
}

impl Default for IndicatorLabels {
    fn default() -> Self {
        Self::for_edge(Edge::Header)
    }
}

/// Phase, height and view of one edge.
pub struct IndicatorState {
    edge: Edge,
    phase: IndicatorPhase,
    height: i32,
    busy_pull_spent: bool,
    last_action_time: Option<SystemTime>,
    view: Option<Box<dyn Indicator>>,
}

impl std::fmt::Debug for IndicatorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndicatorState")
            .field("edge", &self.edge)
            .field("phase", &self.phase)
            .field("height", &self.height)
            .field("busy_pull_spent", &self.busy_pull_spent)
            .field("last_action_time", &self.last_action_time)
            .field("has_view", &self.view.is_some())
            .finish()
    }
}

impl IndicatorState {
    /// An idle edge with no view and zero height.
    #[must_use]
    pub fn new(edge: Edge) -> Self {
        Self {
            edge,
            phase: IndicatorPhase::Idle,
            height: 0,
            busy_pull_spent: false,
            last_action_time: None,
            view: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn edge(&self) -> Edge {
        self.edge
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> IndicatorPhase {
        self.phase
    }

    #[inline]
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.phase.is_busy()
    }

    /// Measured height of the attached view (0 when detached).
    #[inline]
    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether a view is attached.
    #[inline]
    #[must_use]
    pub fn has_view(&self) -> bool {
        self.view.is_some()
    }

    /// Attach or replace the view, measure it and bring it up to date.
    ///
    /// Returns the new height. Negative measurements clamp to 0.
    pub fn attach(&mut self, mut view: Box<dyn Indicator>) -> i32 {
        self.height = view.measured_height().max(0);
        match self.phase {
            IndicatorPhase::Idle => view.show_idle(),
            IndicatorPhase::ReleaseToAct => view.show_release_to_act(),
            IndicatorPhase::Acting | IndicatorPhase::ManuallyActing => view.show_acting(),
        }
        if let Some(time) = self.last_action_time {
            view.set_last_action_time(time);
        }
        self.view = Some(view);
        self.height
    }

    /// Remove the view. The height drops to 0.
    pub fn detach(&mut self) -> Option<Box<dyn Indicator>> {
        self.height = 0;
        self.view.take()
    }

    /// Edge-triggered threshold check for a pull of `magnitude` pixels.
    ///
    /// Only moves between `Idle` and `ReleaseToAct`; busy phases are left
    /// alone. Returns the new phase when a crossing happened.
    pub fn update_threshold(&mut self, magnitude: i32) -> Option<IndicatorPhase> {
        let magnitude = magnitude.saturating_abs();
        match self.phase {
            IndicatorPhase::Idle if self.height > 0 && magnitude > self.height => {
                self.phase = IndicatorPhase::ReleaseToAct;
                if let Some(view) = self.view.as_mut() {
                    view.show_release_to_act();
                }
                Some(self.phase)
            }
            IndicatorPhase::ReleaseToAct if magnitude <= self.height => {
                self.phase = IndicatorPhase::Idle;
                if let Some(view) = self.view.as_mut() {
                    view.show_idle();
                }
                Some(self.phase)
            }
            _ => None,
        }
    }

    /// Commit a released gesture: `ReleaseToAct` becomes `Acting`.
    ///
    /// Returns false (and changes nothing) from any other phase.
    pub fn begin_acting(&mut self) -> bool {
        if self.phase != IndicatorPhase::ReleaseToAct {
            return false;
        }
        self.enter_busy(IndicatorPhase::Acting);
        true
    }

    /// Programmatic trigger. No-op when already busy.
    pub fn begin_manual(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        self.enter_busy(IndicatorPhase::ManuallyActing);
        true
    }

    fn enter_busy(&mut self, phase: IndicatorPhase) {
        self.phase = phase;
        self.busy_pull_spent = false;
        if let Some(view) = self.view.as_mut() {
            view.show_acting();
        }
    }

    /// Return to `Idle` from any other phase.
    ///
    /// Returns whether the phase changed. The view is only told when it did.
    pub fn reset(&mut self) -> bool {
        if self.phase == IndicatorPhase::Idle {
            return false;
        }
        self.phase = IndicatorPhase::Idle;
        if let Some(view) = self.view.as_mut() {
            view.show_idle();
        }
        true
    }

    /// Busy, and no full drag cycle has been released since entering the
    /// busy phase. Pulls in this state forward overshoot into the content.
    #[inline]
    #[must_use]
    pub fn busy_pull_pending(&self) -> bool {
        self.is_busy() && !self.busy_pull_spent
    }

    /// Record that one drag cycle was released while busy.
    pub fn spend_busy_pull(&mut self) {
        if self.is_busy() {
            self.busy_pull_spent = true;
        }
    }

    /// Clear the busy-pull marker (on completion).
    pub fn clear_busy_pull(&mut self) {
        self.busy_pull_spent = false;
    }

    /// Store the last-action time and forward it to the view.
    pub fn set_last_action_time(&mut self, time: SystemTime) {
        self.last_action_time = Some(time);
        if let Some(view) = self.view.as_mut() {
            view.set_last_action_time(time);
        }
    }

    #[inline]
    #[must_use]
    pub fn last_action_time(&self) -> Option<SystemTime> {
        self.last_action_time
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
