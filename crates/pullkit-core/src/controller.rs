#![forbid(unsafe_code)]

//! Pull-to-refresh / pull-to-load-more gesture controller.
//!
//! [`GestureController`] turns a stream of pointer samples into overlay
//! offsets, indicator phase changes and lifecycle callbacks. It owns the
//! per-touch [`GestureSession`], both [`IndicatorState`]s, the live overlay
//! offset and the settle [`ScrollAnimator`]. The host feeds it pointer
//! events and frame timestamps and renders [`offset`](GestureController::offset).
//!
//! # Offsets
//!
//! The overlay offset is signed: negative reveals the header, positive the
//! footer. During a pull the offset is the finger travel since the down
//! event divided by the friction (2 by default), rounded half up:
//! `round((initial_y - y) / friction)`.
//!
//! # Recognition
//!
//! A down event opens a session when the content sits at an edge the mode
//! allows pulling from. The session is claimed on the first move whose
//! vertical travel exceeds both the slop and the horizontal travel and
//! points away from that edge, provided the overlay is at rest. While an
//! indicator is busy and visible, any mostly-vertical move claims a
//! [`DragMode::FollowSettledIndicator`] drag instead, without slop.
//!
//! # Invariants
//!
//! 1. No session is opened while a settle animation is in flight.
//! 2. The drag mode is fixed for the rest of a session once chosen.
//! 3. A header pull never produces a positive offset, a footer pull never a
//!    negative one.
//! 4. Lifecycle callbacks fire once per committed gesture and never for a
//!    programmatic trigger or a cancelled sequence.
//! 5. Completion with an idle indicator changes nothing but the
//!    continued-pull marker.
//!
//! # Failure Modes
//!
//! - Moves or releases without a preceding down are ignored and logged at
//!   `debug`.
//! - Non-finite pointer coordinates are ignored.
//! - Without a content collaborator both edges count as eligible.
//! - Without a lifecycle callback a pull past the threshold does not commit.

use std::fmt;

use web_time::{Instant, SystemTime};

use crate::animation::{Easing, ScrollAnimator, round_half_up};
use crate::config::{ConfigError, Mode, PullConfig};
use crate::edge::{self, ScrollContent};
use crate::event::{Disposition, PointerEvent, Release};
use crate::geometry::{Edge, OverlayLayout};
use crate::indicator::{Indicator, IndicatorPhase, IndicatorState};
use crate::listener::{DragObserver, LifecycleCallback};
use crate::session::{DragMode, GestureSession};

#[cfg(feature = "tracing")]
use crate::logging::{debug, debug_span, trace, warn};
#[cfg(not(feature = "tracing"))]
use crate::{debug, debug_span, trace, warn};

/// Map raw finger displacement to overlay displacement.
///
/// `delta` is `initial_y - y`: negative when the finger moved down. Header
/// pulls keep only the negative part, footer pulls only the positive part;
/// other modes pass the delta through. The result is divided by `friction`
/// and rounded half up.
#[must_use]
pub fn offset_for_delta(mode: DragMode, delta: f32, friction: f32) -> i32 {
    let delta = match mode {
        DragMode::PullDownToRefresh => delta.min(0.0),
        DragMode::PullUpToLoadMore => delta.max(0.0),
        DragMode::None | DragMode::FollowSettledIndicator { .. } => delta,
    };
    round_half_up(delta / friction)
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Gesture state machine for one scrollable region.
pub struct GestureController {
    config: PullConfig,
    header_enabled: bool,
    footer_enabled: bool,
    header: IndicatorState,
    footer: IndicatorState,
    layout: OverlayLayout,
    offset: i32,
    session: Option<GestureSession>,
    animator: ScrollAnimator,
    animation_start: Option<Instant>,
    content: Option<Box<dyn ScrollContent>>,
    observer: Option<Box<dyn DragObserver>>,
    on_refresh: Option<LifecycleCallback>,
    on_load_more: Option<LifecycleCallback>,
}

impl fmt::Debug for GestureController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureController")
            .field("config", &self.config)
            .field("header_enabled", &self.header_enabled)
            .field("footer_enabled", &self.footer_enabled)
            .field("header", &self.header)
            .field("footer", &self.footer)
            .field("layout", &self.layout)
            .field("offset", &self.offset)
            .field("session", &self.session)
            .field("animator", &self.animator)
            .field("has_content", &self.content.is_some())
            .field("has_observer", &self.observer.is_some())
            .field("has_on_refresh", &self.on_refresh.is_some())
            .field("has_on_load_more", &self.on_load_more.is_some())
            .finish()
    }
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new(PullConfig::default())
    }
}

impl GestureController {
    /// Create a controller. Invalid config values fall back to defaults.
    #[must_use]
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn new(config: PullConfig) -> Self {
        if let Err(err) = config.validate() {
            warn!(error = %err, "invalid pull config, using defaults for bad fields");
        }
        Self::build(config.sanitized())
    }

    /// Create a controller, rejecting an invalid config.
    pub fn try_new(config: PullConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: PullConfig) -> Self {
        let mode = config.mode;
        let animator = ScrollAnimator::new().with_easing(config.easing);
        let mut controller = Self {
            config,
            header_enabled: true,
            footer_enabled: true,
            header: IndicatorState::new(Edge::Header),
            footer: IndicatorState::new(Edge::Footer),
            layout: OverlayLayout::default(),
            offset: 0,
            session: None,
            animator,
            animation_start: None,
            content: None,
            observer: None,
            on_refresh: None,
            on_load_more: None,
        };
        controller.configure(mode, true, true);
        controller
    }

    // --- Configuration ----------------------------------------------------

    /// Set the mode and which of its edges accept pulls.
    ///
    /// An edge is pullable when the mode includes it and its flag is set.
    /// Edges the mode no longer includes drop back to `Idle`. The layout is
    /// re-derived.
    pub fn configure(&mut self, mode: Mode, header_enabled: bool, footer_enabled: bool) {
        self.config.mode = mode;
        self.header_enabled = header_enabled;
        self.footer_enabled = footer_enabled;
        for edge in Edge::ALL {
            if !mode.includes(edge) {
                let state = self.indicator_mut(edge);
                state.reset();
                state.clear_busy_pull();
            }
        }
        self.relayout();
        debug!(
            mode = ?mode,
            header_enabled,
            footer_enabled,
            "pull mode configured"
        );
    }

    /// Change the mode, keeping the per-edge enable flags.
    pub fn set_mode(&mut self, mode: Mode) {
        self.configure(mode, self.header_enabled, self.footer_enabled);
    }

    #[inline]
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &PullConfig {
        &self.config
    }

    /// Master switch for pull gestures.
    pub fn set_pull_enabled(&mut self, enabled: bool) {
        self.config.pull_enabled = enabled;
    }

    #[inline]
    #[must_use]
    pub fn is_pull_enabled(&self) -> bool {
        self.config.pull_enabled
    }

    /// Swallow all input while either indicator is busy.
    pub fn set_disable_scrolling_while_busy(&mut self, disable: bool) {
        self.config.disable_scrolling_while_busy = disable;
    }

    #[inline]
    #[must_use]
    pub fn is_scrolling_disabled_while_busy(&self) -> bool {
        self.config.disable_scrolling_while_busy
    }

    /// Change the settle curve. Takes effect from the next frame.
    pub fn set_easing(&mut self, easing: Easing) {
        self.config.easing = easing;
        self.animator.set_easing(easing);
    }

    /// Whether pulls are accepted at `edge`.
    #[must_use]
    pub fn is_edge_enabled(&self, edge: Edge) -> bool {
        let flag = match edge {
            Edge::Header => self.header_enabled,
            Edge::Footer => self.footer_enabled,
        };
        flag && self.config.mode.includes(edge)
    }

    // --- Collaborators ----------------------------------------------------

    /// Attach or replace the header view. Re-measures and re-derives the layout.
    pub fn set_header_indicator(&mut self, view: Box<dyn Indicator>) {
        self.header.attach(view);
        self.relayout();
    }

    /// Attach or replace the footer view. Re-measures and re-derives the layout.
    pub fn set_footer_indicator(&mut self, view: Box<dyn Indicator>) {
        self.footer.attach(view);
        self.relayout();
    }

    /// Detach the view of `edge`. Its height drops to 0 and the layout is
    /// re-derived; the indicator phase is kept.
    pub fn take_indicator(&mut self, edge: Edge) -> Option<Box<dyn Indicator>> {
        let view = self.indicator_mut(edge).detach();
        self.relayout();
        view
    }

    /// Attach or replace the scrollable content.
    pub fn set_content(&mut self, content: Box<dyn ScrollContent>) {
        self.content = Some(content);
    }

    /// Detach the content; both edges become eligible.
    pub fn take_content(&mut self) -> Option<Box<dyn ScrollContent>> {
        self.content.take()
    }

    #[must_use]
    pub fn content(&self) -> Option<&dyn ScrollContent> {
        self.content.as_deref()
    }

    pub fn content_mut(&mut self) -> Option<&mut (dyn ScrollContent + 'static)> {
        self.content.as_deref_mut()
    }

    /// Install the drag-progress observer.
    pub fn set_observer(&mut self, observer: Box<dyn DragObserver>) {
        self.observer = Some(observer);
    }

    /// Callback for a committed header pull.
    pub fn set_on_refresh(&mut self, callback: impl FnMut() + 'static) {
        self.on_refresh = Some(Box::new(callback));
    }

    /// Callback for a committed footer pull.
    pub fn set_on_load_more(&mut self, callback: impl FnMut() + 'static) {
        self.on_load_more = Some(Box::new(callback));
    }

    /// Remove both lifecycle callbacks. Pulls no longer commit.
    pub fn clear_lifecycle_callbacks(&mut self) {
        self.on_refresh = None;
        self.on_load_more = None;
    }

    // --- Last refresh time ------------------------------------------------

    /// Store the last refresh time and show it on the header.
    pub fn set_last_refresh_time(&mut self, time: SystemTime) {
        self.header.set_last_action_time(time);
    }

    /// Store the current time as the last refresh time.
    pub fn set_last_refresh_time_to_now(&mut self) {
        self.set_last_refresh_time(SystemTime::now());
    }

    #[must_use]
    pub fn last_refresh_time(&self) -> Option<SystemTime> {
        self.header.last_action_time()
    }

    // --- Queries ----------------------------------------------------------

    /// Live overlay offset. Negative reveals the header, positive the footer.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> i32 {
        self.offset
    }

    #[inline]
    #[must_use]
    pub fn layout(&self) -> OverlayLayout {
        self.layout
    }

    /// Effective header height (0 when the mode has no header).
    #[inline]
    #[must_use]
    pub fn header_height(&self) -> i32 {
        self.layout.height(Edge::Header)
    }

    /// Effective footer height (0 when the mode has no footer).
    #[inline]
    #[must_use]
    pub fn footer_height(&self) -> i32 {
        self.layout.height(Edge::Footer)
    }

    #[must_use]
    pub fn indicator(&self, edge: Edge) -> &IndicatorState {
        match edge {
            Edge::Header => &self.header,
            Edge::Footer => &self.footer,
        }
    }

    fn indicator_mut(&mut self, edge: Edge) -> &mut IndicatorState {
        match edge {
            Edge::Header => &mut self.header,
            Edge::Footer => &mut self.footer,
        }
    }

    #[inline]
    #[must_use]
    pub fn header_phase(&self) -> IndicatorPhase {
        self.header.phase()
    }

    #[inline]
    #[must_use]
    pub fn footer_phase(&self) -> IndicatorPhase {
        self.footer.phase()
    }

    /// Header is `Acting` or `ManuallyActing`.
    #[inline]
    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.header.is_busy()
    }

    /// Footer is `Acting` or `ManuallyActing`.
    #[inline]
    #[must_use]
    pub fn is_loading_more(&self) -> bool {
        self.footer.is_busy()
    }

    fn any_busy(&self) -> bool {
        self.header.is_busy() || self.footer.is_busy()
    }

    /// Whether the current session is a recognised drag.
    #[must_use]
    pub fn is_being_dragged(&self) -> bool {
        self.session.is_some_and(|s| s.is_dragging)
    }

    /// Drag mode of the current session ([`DragMode::None`] when idle).
    #[must_use]
    pub fn drag_mode(&self) -> DragMode {
        self.session.map_or(DragMode::None, |s| s.drag_mode)
    }

    /// Whether a settle animation is in flight.
    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.animator.is_finished()
    }

    fn ready_for_pull_down(&self) -> bool {
        self.is_edge_enabled(Edge::Header) && edge::is_at_top_edge(self.content.as_deref())
    }

    fn ready_for_pull_up(&self) -> bool {
        self.is_edge_enabled(Edge::Footer) && edge::is_at_bottom_edge(self.content.as_deref())
    }

    /// Whether the content sits at an edge the mode allows pulling from.
    #[must_use]
    pub fn is_ready_for_pull(&self) -> bool {
        self.ready_for_pull_down() || self.ready_for_pull_up()
    }

    // --- Pointer input ----------------------------------------------------

    /// Single entry point for pointer input.
    pub fn handle_event(&mut self, event: &PointerEvent) -> Disposition {
        match *event {
            PointerEvent::Down { x, y } => self.on_pointer_down(x, y),
            PointerEvent::Move { x, y } => self.on_pointer_move(x, y),
            PointerEvent::Up => self.on_pointer_up_or_cancel(Release::Up),
            PointerEvent::Cancel => self.on_pointer_up_or_cancel(Release::Cancel),
        }
    }

    /// Pointer went down.
    ///
    /// Opens a session when no settle animation is running, pulls are
    /// enabled, nothing blocks input and the content is at a pullable edge.
    pub fn on_pointer_down(&mut self, x: f32, y: f32) -> Disposition {
        if !x.is_finite() || !y.is_finite() {
            debug!(x, y, "down ignored: non-finite position");
            return Disposition::Ignored;
        }
        if self.is_being_dragged() {
            debug!("down while dragging: cancelling previous sequence");
            self.release(Release::Cancel);
        }
        self.session = None;

        if self.is_animating() {
            return Disposition::Ignored;
        }
        if !self.config.pull_enabled {
            return Disposition::Ignored;
        }
        if self.any_busy() && self.config.disable_scrolling_while_busy {
            return Disposition::Blocked;
        }

        if let Some(observer) = self.observer.as_mut() {
            observer.on_pull_touch();
        }

        if self.is_ready_for_pull() {
            self.session = Some(GestureSession::begin(x, y));
            Disposition::Tracking
        } else {
            Disposition::Ignored
        }
    }

    /// Pointer moved.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) -> Disposition {
        if !x.is_finite() || !y.is_finite() {
            debug!(x, y, "move ignored: non-finite position");
            return Disposition::Ignored;
        }
        if self.any_busy() && self.config.disable_scrolling_while_busy {
            return Disposition::Blocked;
        }
        let Some(mut session) = self.session else {
            debug!("move ignored: no preceding down");
            return Disposition::Ignored;
        };

        if session.is_dragging {
            self.pull(y);
            return Disposition::Claimed;
        }
        if !self.config.pull_enabled || self.is_animating() {
            return Disposition::Tracking;
        }

        let Some(mode) = self.recognize(&session, x, y) else {
            return Disposition::Tracking;
        };
        session.claim(mode, y);
        self.session = Some(session);
        debug!(drag_mode = mode.name(), offset = self.offset, "drag claimed");
        self.pull(y);
        Disposition::Claimed
    }

    fn recognize(&self, session: &GestureSession, x: f32, y: f32) -> Option<DragMode> {
        let dy = session.dy(y);
        let y_diff = dy.abs();
        if y_diff <= session.x_diff(x) {
            return None;
        }
        let past_slop = y_diff > self.config.touch_slop;
        if past_slop && self.offset == 0 {
            if dy > 0.0 && self.ready_for_pull_down() {
                return Some(DragMode::PullDownToRefresh);
            }
            if dy < 0.0 && self.ready_for_pull_up() {
                return Some(DragMode::PullUpToLoadMore);
            }
        }
        if self.header.is_busy() && self.offset < 0 {
            return Some(DragMode::FollowSettledIndicator { edge: Edge::Header });
        }
        if self.footer.is_busy() && self.offset > 0 {
            return Some(DragMode::FollowSettledIndicator { edge: Edge::Footer });
        }
        None
    }

    fn pull(&mut self, y: f32) {
        let Some(session) = self.session else {
            return;
        };
        let mode = session.drag_mode;
        let new_offset = offset_for_delta(mode, session.pull_distance(y), self.config.friction);

        if let Some(observer) = self.observer.as_mut() {
            match mode {
                DragMode::PullDownToRefresh => observer.on_pull_down(new_offset),
                DragMode::PullUpToLoadMore => observer.on_pull_up(new_offset),
                DragMode::FollowSettledIndicator { edge: Edge::Footer } if self.offset > 0 => {
                    observer.on_pull_up(new_offset);
                }
                DragMode::FollowSettledIndicator { edge: Edge::Header } if self.offset < 0 => {
                    observer.on_pull_down(new_offset);
                }
                _ => {}
            }
        }

        self.apply_pull(new_offset);

        if new_offset != 0 {
            let edge = match mode {
                DragMode::PullDownToRefresh => Edge::Header,
                DragMode::PullUpToLoadMore => Edge::Footer,
                _ => return,
            };
            if self.indicator_mut(edge).update_threshold(new_offset).is_some() {
                trace!(
                    edge = edge.name(),
                    phase = self.indicator(edge).phase().name(),
                    offset = new_offset,
                    "threshold crossed"
                );
            }
        }
    }

    /// Set the overlay offset for a pull of `new_offset`.
    ///
    /// While an indicator is busy and no drag has been released since it
    /// became busy, the offset continues from the revealed indicator
    /// position; once that track is used up, the overshoot scrolls the
    /// content instead. Otherwise the offset is set directly.
    pub fn apply_pull(&mut self, new_offset: i32) {
        let drag_edge = self.drag_mode().edge();
        if self.header.busy_pull_pending() && drag_edge != Some(Edge::Footer) {
            let height = self.layout.height(Edge::Header);
            let shifted = new_offset.saturating_sub(height);
            if shifted < 0 {
                self.set_offset(shifted);
            } else {
                self.set_offset(0);
                self.forward_to_content(|_| shifted);
            }
        } else if self.footer.busy_pull_pending() && drag_edge != Some(Edge::Header) {
            let height = self.layout.height(Edge::Footer);
            let shifted = new_offset.saturating_add(height);
            if shifted > 0 {
                self.set_offset(shifted);
            } else {
                self.set_offset(0);
                self.forward_to_content(|max| max.saturating_add(shifted));
            }
        } else {
            self.set_offset(new_offset);
        }
    }

    fn forward_to_content(&mut self, target: impl FnOnce(i32) -> i32) {
        let Some(content) = self.content.as_mut() else {
            return;
        };
        if !content.overflows() {
            return;
        }
        let max = content.max_scroll_offset();
        let scroll = target(max).clamp(0, max);
        trace!(scroll, "pull forwarded to content");
        content.set_scroll_offset(scroll);
    }

    fn set_offset(&mut self, offset: i32) {
        if self.offset != offset {
            trace!(from = self.offset, to = offset, "offset changed");
            self.offset = offset;
        }
    }

    /// Pointer lifted or cancelled.
    ///
    /// Ends the session. A recognised drag settles: a header or footer pull
    /// in `ReleaseToAct` commits on [`Release::Up`] (when a callback is
    /// registered), anything else returns to rest.
    pub fn on_pointer_up_or_cancel(&mut self, release: Release) -> Disposition {
        if self.is_being_dragged() {
            return self.release(release);
        }
        let had_session = self.session.take().is_some();
        if self.any_busy() && self.config.disable_scrolling_while_busy {
            return Disposition::Blocked;
        }
        if !had_session {
            debug!(release = release.name(), "release ignored: no active session");
        }
        Disposition::Ignored
    }

    /// Shorthand for `on_pointer_up_or_cancel(Release::Up)`.
    pub fn on_pointer_up(&mut self) -> Disposition {
        self.on_pointer_up_or_cancel(Release::Up)
    }

    /// Shorthand for `on_pointer_up_or_cancel(Release::Cancel)`.
    pub fn on_pointer_cancel(&mut self) -> Disposition {
        self.on_pointer_up_or_cancel(Release::Cancel)
    }

    fn release(&mut self, release: Release) -> Disposition {
        let Some(session) = self.session.take() else {
            return Disposition::Ignored;
        };
        let mode = session.drag_mode;
        let span = debug_span!(
            "pullkit.release",
            drag_mode = mode.name(),
            offset = self.offset,
            committed = tracing::field::Empty
        )
        .entered();

        self.header.spend_busy_pull();
        self.footer.spend_busy_pull();

        let committed = match mode {
            DragMode::PullDownToRefresh => self.settle_pull(Edge::Header, release),
            DragMode::PullUpToLoadMore => self.settle_pull(Edge::Footer, release),
            DragMode::FollowSettledIndicator { .. } | DragMode::None => {
                self.settle_to(0);
                false
            }
        };
        span.record("committed", committed);

        if let Some(observer) = self.observer.as_mut() {
            observer.on_pull_release();
        }
        Disposition::Claimed
    }

    fn settle_pull(&mut self, edge: Edge, release: Release) -> bool {
        let has_callback = match edge {
            Edge::Header => self.on_refresh.is_some(),
            Edge::Footer => self.on_load_more.is_some(),
        };
        let state = self.indicator_mut(edge);
        let commit = release == Release::Up
            && has_callback
            && state.phase() == IndicatorPhase::ReleaseToAct;

        if !commit {
            if state.phase() == IndicatorPhase::ReleaseToAct {
                state.reset();
            }
            self.settle_to(0);
            return false;
        }

        state.begin_acting();
        self.settle_to(self.layout.settle_target(edge));
        debug!(edge = edge.name(), offset = self.offset, "pull committed");
        let callback = match edge {
            Edge::Header => self.on_refresh.as_mut(),
            Edge::Footer => self.on_load_more.as_mut(),
        };
        if let Some(callback) = callback {
            callback();
        }
        true
    }

    // --- Completion and manual triggers -----------------------------------

    /// The refresh started by a header pull (or `set_refreshing`) finished.
    ///
    /// A header drag in progress ends; a footer drag is left running.
    pub fn complete_refresh(&mut self) {
        self.complete(Edge::Header);
    }

    /// The load started by a footer pull (or `set_loading_more`) finished.
    ///
    /// A footer drag in progress ends; a header drag is left running.
    pub fn complete_load_more(&mut self) {
        self.complete(Edge::Footer);
    }

    fn complete(&mut self, edge: Edge) {
        let state = self.indicator_mut(edge);
        let changed = state.reset();
        state.clear_busy_pull();
        if !changed {
            debug!(edge = edge.name(), "completion ignored: indicator idle");
            return;
        }
        if self.drag_mode().edge().is_some_and(|dragged| dragged != edge) {
            // The other edge's drag owns the offset until it is released.
            debug!(edge = edge.name(), "action completed during other edge's drag");
            return;
        }
        if self.is_being_dragged() {
            self.session = None;
        }
        self.settle_to(0);
        debug!(edge = edge.name(), "action completed");
    }

    /// Show the header as refreshing without a gesture.
    ///
    /// No-op when already refreshing or when the mode has no header.
    /// `on_refresh` is not invoked.
    pub fn set_refreshing(&mut self, animate: bool) {
        self.trigger(Edge::Header, animate);
    }

    /// Show the footer as loading without a gesture.
    ///
    /// No-op when already loading or when the mode has no footer.
    /// `on_load_more` is not invoked.
    pub fn set_loading_more(&mut self, animate: bool) {
        self.trigger(Edge::Footer, animate);
    }

    fn trigger(&mut self, edge: Edge, animate: bool) {
        if !self.config.mode.includes(edge) {
            debug!(edge = edge.name(), "manual trigger ignored: edge not in mode");
            return;
        }
        if !self.indicator_mut(edge).begin_manual() {
            debug!(edge = edge.name(), "manual trigger ignored: already busy");
            return;
        }
        if animate {
            self.settle_to(self.layout.settle_target(edge));
        }
        debug!(edge = edge.name(), animate, "manual trigger");
    }

    // --- Animation --------------------------------------------------------

    fn settle_to(&mut self, target: i32) {
        self.animation_start = None;
        if target == self.offset {
            self.animator.abort();
            return;
        }
        self.animator
            .start_scroll(self.offset, target, self.config.settle_duration);
    }

    /// Advance the settle animation to `now`.
    ///
    /// The first frame after a settle starts latches the start time. Returns
    /// the new offset, or `None` when nothing is animating.
    pub fn on_frame(&mut self, now: Instant) -> Option<i32> {
        if self.animator.is_finished() {
            return None;
        }
        let start = *self.animation_start.get_or_insert(now);
        let elapsed = now.saturating_duration_since(start);
        let value = self.animator.tick(elapsed);
        self.set_offset(value);
        if let Some(observer) = self.observer.as_mut() {
            observer.on_pull_back(value);
        }
        if self.animator.is_finished() {
            self.animation_start = None;
        }
        Some(value)
    }

    fn relayout(&mut self) {
        self.layout =
            OverlayLayout::for_mode(self.config.mode, self.header.height(), self.footer.height());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::{ContentGeometry, ScrollGeometry};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    const MS_400: Duration = Duration::from_millis(400);

    type Log = Rc<RefCell<Vec<&'static str>>>;

    struct Recorder {
        height: i32,
        log: Log,
    }

    impl Indicator for Recorder {
        fn show_idle(&mut self) {
            self.log.borrow_mut().push("idle");
        }
        fn show_release_to_act(&mut self) {
            self.log.borrow_mut().push("release");
        }
        fn show_acting(&mut self) {
            self.log.borrow_mut().push("acting");
        }
        fn measured_height(&self) -> i32 {
            self.height
        }
    }

    struct Scroll {
        offset: i32,
        viewport: i32,
        content: i32,
    }

    impl ScrollContent for Scroll {
        fn geometry(&self) -> ContentGeometry {
            ContentGeometry::Scroll(ScrollGeometry {
                scroll_offset: self.offset,
                viewport_extent: self.viewport,
                content_extent: self.content,
            })
        }
        fn scroll_offset(&self) -> i32 {
            self.offset
        }
        fn set_scroll_offset(&mut self, offset: i32) {
            self.offset = offset;
        }
    }

    struct Fixture {
        ctl: GestureController,
        header_log: Log,
        footer_log: Log,
        refreshes: Rc<Cell<u32>>,
        loads: Rc<Cell<u32>>,
    }

    fn fixture(mode: Mode) -> Fixture {
        let mut ctl = GestureController::new(PullConfig::new(mode));
        let header_log: Log = Rc::default();
        let footer_log: Log = Rc::default();
        ctl.set_header_indicator(Box::new(Recorder {
            height: 60,
            log: Rc::clone(&header_log),
        }));
        ctl.set_footer_indicator(Box::new(Recorder {
            height: 40,
            log: Rc::clone(&footer_log),
        }));
        header_log.borrow_mut().clear();
        footer_log.borrow_mut().clear();

        let refreshes = Rc::new(Cell::new(0));
        let loads = Rc::new(Cell::new(0));
        let r = Rc::clone(&refreshes);
        ctl.set_on_refresh(move || r.set(r.get() + 1));
        let l = Rc::clone(&loads);
        ctl.set_on_load_more(move || l.set(l.get() + 1));
        Fixture {
            ctl,
            header_log,
            footer_log,
            refreshes,
            loads,
        }
    }

    /// Run frames until the settle animation finishes.
    fn settle(ctl: &mut GestureController) {
        let t = Instant::now();
        ctl.on_frame(t);
        ctl.on_frame(t + MS_400);
        assert!(!ctl.is_animating());
    }

    fn drag(ctl: &mut GestureController, from: f32, to: &[f32]) {
        ctl.on_pointer_down(0.0, from);
        for &y in to {
            ctl.on_pointer_move(0.0, y);
        }
    }

    // --- offset_for_delta ---

    #[test]
    fn friction_halves_and_clamps() {
        assert_eq!(offset_for_delta(DragMode::PullDownToRefresh, -70.0, 2.0), -35);
        assert_eq!(offset_for_delta(DragMode::PullDownToRefresh, 30.0, 2.0), 0);
        assert_eq!(offset_for_delta(DragMode::PullUpToLoadMore, 50.0, 2.0), 25);
        assert_eq!(offset_for_delta(DragMode::PullUpToLoadMore, -50.0, 2.0), 0);
        assert_eq!(
            offset_for_delta(DragMode::FollowSettledIndicator { edge: Edge::Header }, 50.0, 2.0),
            25
        );
    }

    #[test]
    fn friction_rounds_half_up() {
        assert_eq!(offset_for_delta(DragMode::PullDownToRefresh, -65.0, 2.0), -32);
        assert_eq!(offset_for_delta(DragMode::PullUpToLoadMore, 65.0, 2.0), 33);
    }

    // --- construction ---

    #[test]
    fn try_new_rejects_invalid_config() {
        let config = PullConfig::default().with_friction(0.0);
        assert!(matches!(
            GestureController::try_new(config),
            Err(ConfigError::InvalidFriction { .. })
        ));
    }

    #[test]
    fn new_sanitizes_invalid_config() {
        let ctl = GestureController::new(PullConfig::default().with_touch_slop(-3.0));
        assert_eq!(ctl.config().touch_slop, crate::config::DEFAULT_TOUCH_SLOP);
    }

    #[test]
    fn layout_follows_mode_and_indicators() {
        let f = fixture(Mode::PullDownOnly);
        assert_eq!(f.ctl.header_height(), 60);
        assert_eq!(f.ctl.footer_height(), 0);
        let mut ctl = f.ctl;
        ctl.set_mode(Mode::Both);
        assert_eq!(ctl.footer_height(), 40);
        assert_eq!(ctl.layout().content_margin.vertical_sum(), 100);
    }

    // --- pull-down scenario ---

    #[test]
    fn pull_down_commits_past_threshold() {
        let mut f = fixture(Mode::PullDownOnly);
        assert_eq!(f.ctl.on_pointer_down(0.0, 100.0), Disposition::Tracking);
        assert_eq!(f.ctl.on_pointer_move(0.0, 170.0), Disposition::Claimed);
        assert_eq!(f.ctl.offset(), -35);
        assert_eq!(f.ctl.header_phase(), IndicatorPhase::Idle);

        f.ctl.on_pointer_move(0.0, 200.0);
        assert_eq!(f.ctl.offset(), -50);
        assert_eq!(f.ctl.header_phase(), IndicatorPhase::Idle);

        f.ctl.on_pointer_move(0.0, 230.0);
        assert_eq!(f.ctl.offset(), -65);
        assert_eq!(f.ctl.header_phase(), IndicatorPhase::ReleaseToAct);

        assert_eq!(f.ctl.on_pointer_up(), Disposition::Claimed);
        assert_eq!(f.refreshes.get(), 1);
        assert_eq!(f.ctl.header_phase(), IndicatorPhase::Acting);
        assert!(f.ctl.is_refreshing());
        settle(&mut f.ctl);
        assert_eq!(f.ctl.offset(), -60);
        assert_eq!(*f.header_log.borrow(), vec!["release", "acting"]);
    }

    #[test]
    fn pull_down_below_threshold_settles_to_zero() {
        let mut f = fixture(Mode::PullDownOnly);
        drag(&mut f.ctl, 100.0, &[180.0]);
        assert_eq!(f.ctl.offset(), -40);
        f.ctl.on_pointer_up();
        assert_eq!(f.refreshes.get(), 0);
        assert_eq!(f.ctl.header_phase(), IndicatorPhase::Idle);
        settle(&mut f.ctl);
        assert_eq!(f.ctl.offset(), 0);
        assert!(f.header_log.borrow().is_empty());
    }

    #[test]
    fn crossing_back_returns_to_idle() {
        let mut f = fixture(Mode::PullDownOnly);
        drag(&mut f.ctl, 100.0, &[230.0, 240.0, 180.0, 170.0]);
        assert_eq!(f.ctl.header_phase(), IndicatorPhase::Idle);
        assert_eq!(*f.header_log.borrow(), vec!["release", "idle"]);
        f.ctl.on_pointer_up();
        assert_eq!(f.refreshes.get(), 0);
    }

    #[test]
    fn upward_motion_never_claims_pull_down() {
        let mut f = fixture(Mode::PullDownOnly);
        drag(&mut f.ctl, 100.0, &[50.0]);
        assert!(!f.ctl.is_being_dragged());
        assert_eq!(f.ctl.offset(), 0);
    }

    #[test]
    fn pull_down_reversal_clamps_at_zero() {
        let mut f = fixture(Mode::PullDownOnly);
        drag(&mut f.ctl, 100.0, &[150.0, 40.0]);
        assert!(f.ctl.is_being_dragged());
        assert_eq!(f.ctl.offset(), 0);
    }

    #[test]
    fn slop_and_horizontal_travel_gate_claim() {
        let mut f = fixture(Mode::PullDownOnly);
        f.ctl.on_pointer_down(0.0, 100.0);
        assert_eq!(f.ctl.on_pointer_move(0.0, 108.0), Disposition::Tracking);
        assert_eq!(f.ctl.on_pointer_move(50.0, 130.0), Disposition::Tracking);
        assert_eq!(f.ctl.on_pointer_move(0.0, 130.0), Disposition::Claimed);
        assert_eq!(f.ctl.offset(), -15);
    }

    #[test]
    fn cancel_never_commits() {
        let mut f = fixture(Mode::PullDownOnly);
        drag(&mut f.ctl, 100.0, &[300.0]);
        assert_eq!(f.ctl.header_phase(), IndicatorPhase::ReleaseToAct);
        assert_eq!(f.ctl.on_pointer_cancel(), Disposition::Claimed);
        assert_eq!(f.refreshes.get(), 0);
        assert_eq!(f.ctl.header_phase(), IndicatorPhase::Idle);
        settle(&mut f.ctl);
        assert_eq!(f.ctl.offset(), 0);
    }

    #[test]
    fn no_callback_means_no_commit() {
        let mut f = fixture(Mode::PullDownOnly);
        f.ctl.clear_lifecycle_callbacks();
        drag(&mut f.ctl, 100.0, &[300.0]);
        f.ctl.on_pointer_up();
        assert_eq!(f.ctl.header_phase(), IndicatorPhase::Idle);
        assert!(!f.ctl.is_refreshing());
    }

    // --- pull-up ---

    #[test]
    fn pull_up_commits_load_more() {
        let mut f = fixture(Mode::PullUpOnly);
        drag(&mut f.ctl, 300.0, &[250.0, 200.0]);
        assert_eq!(f.ctl.drag_mode(), DragMode::PullUpToLoadMore);
        assert_eq!(f.ctl.offset(), 50);
        assert_eq!(f.ctl.footer_phase(), IndicatorPhase::ReleaseToAct);
        f.ctl.on_pointer_up();
        assert_eq!(f.loads.get(), 1);
        assert_eq!(f.refreshes.get(), 0);
        settle(&mut f.ctl);
        assert_eq!(f.ctl.offset(), 40);
        assert_eq!(*f.footer_log.borrow(), vec!["release", "acting"]);
    }

    #[test]
    fn both_mode_picks_direction() {
        let mut f = fixture(Mode::Both);
        drag(&mut f.ctl, 100.0, &[120.0]);
        assert_eq!(f.ctl.drag_mode(), DragMode::PullDownToRefresh);
        f.ctl.on_pointer_cancel();
        settle(&mut f.ctl);

        drag(&mut f.ctl, 100.0, &[80.0]);
        assert_eq!(f.ctl.drag_mode(), DragMode::PullUpToLoadMore);
    }

    #[test]
    fn disabled_edge_is_not_pullable() {
        let mut f = fixture(Mode::Both);
        f.ctl.configure(Mode::Both, true, false);
        drag(&mut f.ctl, 100.0, &[60.0]);
        assert!(!f.ctl.is_being_dragged());
    }

    // --- eligibility ---

    #[test]
    fn content_away_from_edge_is_not_claimed() {
        let mut f = fixture(Mode::PullDownOnly);
        f.ctl.set_content(Box::new(Scroll {
            offset: 10,
            viewport: 400,
            content: 1000,
        }));
        assert_eq!(f.ctl.on_pointer_down(0.0, 100.0), Disposition::Ignored);
        assert_eq!(f.ctl.on_pointer_move(0.0, 200.0), Disposition::Ignored);
        assert_eq!(f.ctl.offset(), 0);
    }

    #[test]
    fn out_of_order_events_are_ignored() {
        let mut f = fixture(Mode::PullDownOnly);
        assert_eq!(f.ctl.on_pointer_move(0.0, 200.0), Disposition::Ignored);
        assert_eq!(f.ctl.on_pointer_up(), Disposition::Ignored);
        assert_eq!(f.ctl.offset(), 0);
    }

    #[test]
    fn non_finite_positions_are_ignored() {
        let mut f = fixture(Mode::PullDownOnly);
        assert_eq!(f.ctl.on_pointer_down(f32::NAN, 100.0), Disposition::Ignored);
        f.ctl.on_pointer_down(0.0, 100.0);
        assert_eq!(
            f.ctl.on_pointer_move(0.0, f32::INFINITY),
            Disposition::Ignored
        );
    }

    #[test]
    fn pull_disabled_claims_nothing() {
        let mut f = fixture(Mode::PullDownOnly);
        f.ctl.set_pull_enabled(false);
        assert_eq!(f.ctl.on_pointer_down(0.0, 100.0), Disposition::Ignored);
        assert_eq!(f.ctl.on_pointer_move(0.0, 300.0), Disposition::Ignored);
    }

    #[test]
    fn no_session_while_animating() {
        let mut f = fixture(Mode::PullDownOnly);
        drag(&mut f.ctl, 100.0, &[180.0]);
        f.ctl.on_pointer_up();
        assert!(f.ctl.is_animating());
        assert_eq!(f.ctl.on_pointer_down(0.0, 100.0), Disposition::Ignored);
        settle(&mut f.ctl);
        assert_eq!(f.ctl.on_pointer_down(0.0, 100.0), Disposition::Tracking);
    }

    // --- busy state ---

    #[test]
    fn disable_scrolling_while_busy_blocks() {
        let mut f = fixture(Mode::PullDownOnly);
        f.ctl.set_disable_scrolling_while_busy(true);
        f.ctl.set_refreshing(true);
        settle(&mut f.ctl);
        assert_eq!(f.ctl.offset(), -60);
        assert_eq!(f.ctl.on_pointer_down(0.0, 100.0), Disposition::Blocked);
        assert_eq!(f.ctl.on_pointer_move(0.0, 300.0), Disposition::Blocked);
        assert_eq!(f.ctl.on_pointer_up(), Disposition::Blocked);
        assert_eq!(f.ctl.offset(), -60);
        assert!(f.ctl.is_refreshing());
    }

    #[test]
    fn manual_trigger_does_not_call_back_and_is_not_reentrant() {
        let mut f = fixture(Mode::PullDownOnly);
        f.ctl.set_refreshing(true);
        f.ctl.set_refreshing(true);
        assert_eq!(f.refreshes.get(), 0);
        assert_eq!(f.ctl.header_phase(), IndicatorPhase::ManuallyActing);
        assert_eq!(*f.header_log.borrow(), vec!["acting"]);
    }

    #[test]
    fn manual_round_trip() {
        let mut f = fixture(Mode::PullDownOnly);
        f.ctl.set_refreshing(true);
        settle(&mut f.ctl);
        assert_eq!(f.ctl.offset(), -60);
        f.ctl.complete_refresh();
        assert_eq!(f.ctl.header_phase(), IndicatorPhase::Idle);
        settle(&mut f.ctl);
        assert_eq!(f.ctl.offset(), 0);
    }

    #[test]
    fn manual_trigger_without_animation_keeps_offset() {
        let mut f = fixture(Mode::PullUpOnly);
        f.ctl.set_loading_more(false);
        assert!(f.ctl.is_loading_more());
        assert!(!f.ctl.is_animating());
        assert_eq!(f.ctl.offset(), 0);
    }

    #[test]
    fn manual_trigger_for_missing_edge_is_ignored() {
        let mut f = fixture(Mode::PullDownOnly);
        f.ctl.set_loading_more(true);
        assert!(!f.ctl.is_loading_more());
    }

    #[test]
    fn completion_while_idle_is_noop() {
        let mut f = fixture(Mode::PullDownOnly);
        f.ctl.complete_refresh();
        assert!(!f.ctl.is_animating());
        assert!(f.header_log.borrow().is_empty());
        assert_eq!(f.refreshes.get(), 0);
    }

    #[test]
    fn follow_drag_forwards_overshoot_to_content() {
        let mut f = fixture(Mode::PullDownOnly);
        f.ctl.set_content(Box::new(Scroll {
            offset: 0,
            viewport: 400,
            content: 1000,
        }));
        f.ctl.set_refreshing(true);
        settle(&mut f.ctl);

        f.ctl.on_pointer_down(0.0, 300.0);
        assert_eq!(f.ctl.on_pointer_move(0.0, 250.0), Disposition::Claimed);
        assert_eq!(
            f.ctl.drag_mode(),
            DragMode::FollowSettledIndicator { edge: Edge::Header }
        );
        assert_eq!(f.ctl.offset(), -35);

        f.ctl.on_pointer_move(0.0, 100.0);
        assert_eq!(f.ctl.offset(), 0);
        assert_eq!(f.ctl.content().map(|c| c.scroll_offset()), Some(40));

        f.ctl.on_pointer_up();
        assert!(!f.ctl.is_animating());
        assert!(f.ctl.is_refreshing());
        assert_eq!(f.refreshes.get(), 0);
    }

    #[test]
    fn follow_drag_claims_without_slop() {
        let mut f = fixture(Mode::PullDownOnly);
        f.ctl.set_refreshing(true);
        settle(&mut f.ctl);
        f.ctl.on_pointer_down(0.0, 300.0);
        assert_eq!(f.ctl.on_pointer_move(0.0, 302.0), Disposition::Claimed);
        assert_eq!(f.ctl.offset(), -61);
    }

    #[test]
    fn second_busy_cycle_is_plain_drag() {
        let mut f = fixture(Mode::PullDownOnly);
        f.ctl.set_refreshing(true);
        settle(&mut f.ctl);

        // First cycle follows the revealed header, then hides it.
        drag(&mut f.ctl, 300.0, &[310.0]);
        assert_eq!(f.ctl.offset(), -65);
        f.ctl.on_pointer_up();
        settle(&mut f.ctl);
        assert_eq!(f.ctl.offset(), 0);

        // Second cycle: offset starts from zero and no threshold applies.
        drag(&mut f.ctl, 100.0, &[300.0]);
        assert_eq!(f.ctl.drag_mode(), DragMode::PullDownToRefresh);
        assert_eq!(f.ctl.offset(), -100);
        assert_eq!(f.ctl.header_phase(), IndicatorPhase::ManuallyActing);
        f.ctl.on_pointer_up();
        settle(&mut f.ctl);
        assert_eq!(f.ctl.offset(), 0);
        assert_eq!(f.refreshes.get(), 0);
    }

    #[test]
    fn completion_during_drag_ends_it() {
        let mut f = fixture(Mode::PullDownOnly);
        drag(&mut f.ctl, 100.0, &[300.0]);
        f.ctl.complete_refresh();
        assert!(!f.ctl.is_being_dragged());
        assert_eq!(f.ctl.header_phase(), IndicatorPhase::Idle);
        assert_eq!(f.ctl.on_pointer_up(), Disposition::Ignored);
        assert_eq!(f.refreshes.get(), 0);
    }

    #[test]
    fn completion_leaves_other_edge_drag_alone() {
        let mut f = fixture(Mode::Both);
        f.ctl.set_refreshing(false);
        drag(&mut f.ctl, 500.0, &[300.0]);
        assert_eq!(f.ctl.drag_mode(), DragMode::PullUpToLoadMore);
        assert_eq!(f.ctl.footer_phase(), IndicatorPhase::ReleaseToAct);

        f.ctl.complete_refresh();
        assert_eq!(f.ctl.header_phase(), IndicatorPhase::Idle);
        assert!(f.ctl.is_being_dragged());
        assert!(!f.ctl.is_animating());
        assert_eq!(f.ctl.offset(), 100);

        assert_eq!(f.ctl.on_pointer_up(), Disposition::Claimed);
        assert_eq!(f.loads.get(), 1);
        assert_eq!(f.ctl.footer_phase(), IndicatorPhase::Acting);
        settle(&mut f.ctl);
        assert_eq!(f.ctl.offset(), 40);
    }

    #[test]
    fn footer_follow_drag_forwards_overshoot_to_content() {
        let mut f = fixture(Mode::PullUpOnly);
        f.ctl.set_content(Box::new(Scroll {
            offset: 600,
            viewport: 400,
            content: 1000,
        }));
        f.ctl.set_loading_more(true);
        settle(&mut f.ctl);
        assert_eq!(f.ctl.offset(), 40);

        f.ctl.on_pointer_down(0.0, 300.0);
        assert_eq!(f.ctl.on_pointer_move(0.0, 350.0), Disposition::Claimed);
        assert_eq!(
            f.ctl.drag_mode(),
            DragMode::FollowSettledIndicator { edge: Edge::Footer }
        );
        assert_eq!(f.ctl.offset(), 15);

        // 100 px of overlay travel: 40 hide the footer, 60 scroll the content.
        f.ctl.on_pointer_move(0.0, 500.0);
        assert_eq!(f.ctl.offset(), 0);
        assert_eq!(f.ctl.content().map(|c| c.scroll_offset()), Some(540));

        f.ctl.on_pointer_up();
        assert!(!f.ctl.is_animating());
        assert!(f.ctl.is_loading_more());

        // Second cycle from the bottom edge is a plain pull.
        if let Some(content) = f.ctl.content_mut() {
            content.set_scroll_offset(600);
        }
        drag(&mut f.ctl, 300.0, &[100.0]);
        assert_eq!(f.ctl.drag_mode(), DragMode::PullUpToLoadMore);
        assert_eq!(f.ctl.offset(), 100);
        assert_eq!(f.ctl.content().map(|c| c.scroll_offset()), Some(600));
        assert_eq!(f.ctl.footer_phase(), IndicatorPhase::ManuallyActing);
        f.ctl.on_pointer_up();
        settle(&mut f.ctl);
        assert_eq!(f.ctl.offset(), 0);
        assert_eq!(f.loads.get(), 0);
    }

    #[test]
    fn take_indicator_drops_height_and_keeps_phase() {
        let mut f = fixture(Mode::PullDownOnly);
        f.ctl.set_refreshing(false);
        assert!(f.ctl.take_indicator(Edge::Header).is_some());
        assert_eq!(f.ctl.header_height(), 0);
        assert_eq!(f.ctl.layout().content_margin.vertical_sum(), 0);
        assert_eq!(f.ctl.header_phase(), IndicatorPhase::ManuallyActing);

        f.ctl.complete_refresh();
        assert_eq!(*f.header_log.borrow(), vec!["acting"]);
        assert!(f.ctl.take_indicator(Edge::Header).is_none());
    }

    #[test]
    fn set_easing_applies_to_settle() {
        let mut f = fixture(Mode::PullDownOnly);
        f.ctl.set_easing(Easing::Linear);
        assert_eq!(f.ctl.config().easing, Easing::Linear);
        f.ctl.set_refreshing(true);
        let t = Instant::now();
        assert_eq!(f.ctl.on_frame(t), Some(0));
        assert_eq!(f.ctl.on_frame(t + Duration::from_millis(200)), Some(-30));
    }

    #[test]
    fn configure_resets_removed_edge() {
        let mut f = fixture(Mode::Both);
        f.ctl.set_loading_more(false);
        f.ctl.set_mode(Mode::PullDownOnly);
        assert_eq!(f.ctl.footer_phase(), IndicatorPhase::Idle);
        assert_eq!(f.ctl.footer_height(), 0);
    }

    // --- frames ---

    #[test]
    fn frames_latch_start_and_finish() {
        let mut f = fixture(Mode::PullDownOnly);
        assert_eq!(f.ctl.on_frame(Instant::now()), None);
        f.ctl.set_refreshing(true);
        let t = Instant::now();
        assert_eq!(f.ctl.on_frame(t + MS_400), Some(0));
        let mid = f.ctl.on_frame(t + MS_400 + Duration::from_millis(100));
        assert!(matches!(mid, Some(v) if v < 0 && v > -60), "{mid:?}");
        assert_eq!(f.ctl.on_frame(t + MS_400 + MS_400), Some(-60));
        assert_eq!(f.ctl.on_frame(t + MS_400 + MS_400), None);
    }

    #[test]
    fn last_refresh_time_round_trips() {
        let mut f = fixture(Mode::PullDownOnly);
        assert_eq!(f.ctl.last_refresh_time(), None);
        f.ctl.set_last_refresh_time(SystemTime::UNIX_EPOCH);
        assert_eq!(f.ctl.last_refresh_time(), Some(SystemTime::UNIX_EPOCH));
        f.ctl.set_last_refresh_time_to_now();
        assert!(f.ctl.last_refresh_time() > Some(SystemTime::UNIX_EPOCH));
    }

    #[test]
    fn handle_event_dispatches() {
        let mut f = fixture(Mode::PullDownOnly);
        let events = [
            PointerEvent::Down { x: 0.0, y: 100.0 },
            PointerEvent::Move { x: 0.0, y: 250.0 },
            PointerEvent::Up,
        ];
        let dispositions: Vec<_> = events.iter().map(|e| f.ctl.handle_event(e)).collect();
        assert_eq!(
            dispositions,
            vec![
                Disposition::Tracking,
                Disposition::Claimed,
                Disposition::Claimed
            ]
        );
        assert_eq!(f.refreshes.get(), 1);
    }
}
