#![forbid(unsafe_code)]

//! Reference collaborators: recording indicators and observers, and
//! in-memory scroll and list content.
//!
//! Every fixture is split into the part handed to the controller (boxed)
//! and a cheap shared handle the test keeps for inspection.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pullkit_core::edge::{ContentGeometry, ListGeometry, ScrollContent, ScrollGeometry};
use pullkit_core::geometry::Edge;
use pullkit_core::indicator::{Indicator, IndicatorLabels};
use pullkit_core::listener::DragObserver;
use web_time::SystemTime;

// ============================================================================
// Shared call log
// ============================================================================

/// Append-only log shared between a fixture and the test.
#[derive(Debug)]
pub struct CallLog<T> {
    entries: Rc<RefCell<Vec<T>>>,
}

impl<T> Clone for CallLog<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Rc::clone(&self.entries),
        }
    }
}

impl<T> Default for CallLog<T> {
    fn default() -> Self {
        Self {
            entries: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<T: Clone> CallLog<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: T) {
        self.entries.borrow_mut().push(entry);
    }

    /// Copy of every entry so far.
    pub fn snapshot(&self) -> Vec<T> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    /// Number of entries matching `pred`.
    pub fn count(&self, pred: impl Fn(&T) -> bool) -> usize {
        self.entries.borrow().iter().filter(|e| pred(e)).count()
    }
}

// ============================================================================
// Indicator
// ============================================================================

/// One call received by a [`RecordingIndicator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorCall {
    Idle,
    ReleaseToAct,
    Acting,
    LastActionTime(SystemTime),
}

/// Indicator that records every call and tracks the label it would show.
#[derive(Debug)]
pub struct RecordingIndicator {
    height: i32,
    labels: IndicatorLabels,
    calls: CallLog<IndicatorCall>,
    text: Rc<RefCell<String>>,
}

/// Test-side view of a [`RecordingIndicator`].
#[derive(Debug, Clone)]
pub struct IndicatorHandle {
    calls: CallLog<IndicatorCall>,
    text: Rc<RefCell<String>>,
}

impl IndicatorHandle {
    pub fn calls(&self) -> Vec<IndicatorCall> {
        self.calls.snapshot()
    }

    /// Calls excluding timestamp updates.
    pub fn phase_calls(&self) -> Vec<IndicatorCall> {
        self.calls
            .snapshot()
            .into_iter()
            .filter(|c| !matches!(c, IndicatorCall::LastActionTime(_)))
            .collect()
    }

    pub fn count(&self, call: IndicatorCall) -> usize {
        self.calls.count(|c| *c == call)
    }

    /// Label currently shown.
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn clear(&self) {
        self.calls.clear();
    }
}

impl RecordingIndicator {
    /// Indicator of `height` px using the default labels for `edge`.
    pub fn new(edge: Edge, height: i32) -> (Self, IndicatorHandle) {
        Self::with_labels(IndicatorLabels::for_edge(edge), height)
    }

    pub fn with_labels(labels: IndicatorLabels, height: i32) -> (Self, IndicatorHandle) {
        let calls = CallLog::new();
        let text = Rc::new(RefCell::new(String::new()));
        let handle = IndicatorHandle {
            calls: calls.clone(),
            text: Rc::clone(&text),
        };
        (
            Self {
                height,
                labels,
                calls,
                text,
            },
            handle,
        )
    }

    fn show(&mut self, call: IndicatorCall, label: String) {
        self.calls.push(call);
        *self.text.borrow_mut() = label;
    }
}

impl Indicator for RecordingIndicator {
    fn show_idle(&mut self) {
        let label = self.labels.pull.clone();
        self.show(IndicatorCall::Idle, label);
    }

    fn show_release_to_act(&mut self) {
        let label = self.labels.release.clone();
        self.show(IndicatorCall::ReleaseToAct, label);
    }

    fn show_acting(&mut self) {
        let label = self.labels.acting.clone();
        self.show(IndicatorCall::Acting, label);
    }

    fn set_last_action_time(&mut self, time: SystemTime) {
        self.calls.push(IndicatorCall::LastActionTime(time));
    }

    fn measured_height(&self) -> i32 {
        self.height
    }
}

// ============================================================================
// Observer
// ============================================================================

/// One notification received by a [`RecordingObserver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverCall {
    Touch,
    PullDown(i32),
    PullUp(i32),
    Release,
    PullBack(i32),
}

/// Drag observer that records every notification.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    calls: CallLog<ObserverCall>,
}

impl RecordingObserver {
    pub fn new() -> (Self, CallLog<ObserverCall>) {
        let calls = CallLog::new();
        (
            Self {
                calls: calls.clone(),
            },
            calls,
        )
    }
}

impl DragObserver for RecordingObserver {
    fn on_pull_touch(&mut self) {
        self.calls.push(ObserverCall::Touch);
    }

    fn on_pull_down(&mut self, offset: i32) {
        self.calls.push(ObserverCall::PullDown(offset));
    }

    fn on_pull_up(&mut self, offset: i32) {
        self.calls.push(ObserverCall::PullUp(offset));
    }

    fn on_pull_release(&mut self) {
        self.calls.push(ObserverCall::Release);
    }

    fn on_pull_back(&mut self, offset: i32) {
        self.calls.push(ObserverCall::PullBack(offset));
    }
}

// ============================================================================
// Lifecycle counter
// ============================================================================

/// Counts lifecycle callback invocations.
#[derive(Debug, Clone, Default)]
pub struct CallCounter(Rc<Cell<u32>>);

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callback that increments this counter.
    pub fn callback(&self) -> impl FnMut() + 'static {
        let count = Rc::clone(&self.0);
        move || count.set(count.get() + 1)
    }

    pub fn get(&self) -> u32 {
        self.0.get()
    }
}

// ============================================================================
// Content
// ============================================================================

/// Plain scroll container backed by shared state.
///
/// Clone it: hand one copy to the controller and keep the other to scroll
/// or inspect.
#[derive(Debug, Clone)]
pub struct SharedScrollView {
    state: Rc<RefCell<ScrollGeometry>>,
}

impl SharedScrollView {
    /// Scroll view at offset 0.
    pub fn new(viewport_extent: i32, content_extent: i32) -> Self {
        Self {
            state: Rc::new(RefCell::new(ScrollGeometry {
                scroll_offset: 0,
                viewport_extent,
                content_extent,
            })),
        }
    }

    /// Scroll to `offset`, clamped to the legal range.
    pub fn scroll_to(&self, offset: i32) {
        let mut state = self.state.borrow_mut();
        state.scroll_offset = offset.clamp(0, state.max_scroll_offset());
    }

    /// Scroll to the last legal offset.
    pub fn scroll_to_end(&self) {
        let max = self.state.borrow().max_scroll_offset();
        self.scroll_to(max);
    }

    pub fn offset(&self) -> i32 {
        self.state.borrow().scroll_offset
    }

    /// Boxed copy for [`GestureController::set_content`](pullkit_core::GestureController::set_content).
    pub fn boxed(&self) -> Box<dyn ScrollContent> {
        Box::new(self.clone())
    }
}

impl ScrollContent for SharedScrollView {
    fn geometry(&self) -> ContentGeometry {
        ContentGeometry::Scroll(*self.state.borrow())
    }

    fn scroll_offset(&self) -> i32 {
        self.offset()
    }

    fn set_scroll_offset(&mut self, offset: i32) {
        self.scroll_to(offset);
    }
}

#[derive(Debug, Clone, Copy)]
struct ListState {
    item_count: usize,
    item_extent: i32,
    viewport_extent: i32,
    first_visible: usize,
}

impl ListState {
    fn visible_rows(&self) -> usize {
        if self.item_extent <= 0 {
            return self.item_count;
        }
        let rows = (self.viewport_extent + self.item_extent - 1) / self.item_extent;
        usize::try_from(rows.max(1)).unwrap_or(1)
    }

    fn max_first(&self) -> usize {
        let total = self.item_count as i64 * i64::from(self.item_extent);
        if total <= i64::from(self.viewport_extent) || self.item_extent <= 0 {
            return 0;
        }
        let overflow = total - i64::from(self.viewport_extent);
        let rows = (overflow + i64::from(self.item_extent) - 1) / i64::from(self.item_extent);
        usize::try_from(rows).unwrap_or(0)
    }

    fn geometry(&self) -> ListGeometry {
        if self.item_count == 0 {
            return ListGeometry::default();
        }
        let last_visible = (self.first_visible + self.visible_rows() - 1).min(self.item_count - 1);
        let shown = (last_visible - self.first_visible + 1) as i32;
        ListGeometry {
            item_count: self.item_count,
            first_visible: self.first_visible,
            last_visible,
            first_item_top: 0,
            last_item_bottom: shown * self.item_extent,
            viewport_top: 0,
            viewport_bottom: self.viewport_extent,
        }
    }
}

/// Uniform-row list backed by shared state. Scrolls one row at a time.
#[derive(Debug, Clone)]
pub struct SharedListView {
    state: Rc<RefCell<ListState>>,
}

impl SharedListView {
    /// List of `item_count` rows of `item_extent` px, scrolled to the top.
    pub fn new(item_count: usize, item_extent: i32, viewport_extent: i32) -> Self {
        Self {
            state: Rc::new(RefCell::new(ListState {
                item_count,
                item_extent,
                viewport_extent,
                first_visible: 0,
            })),
        }
    }

    /// Empty list.
    pub fn empty(viewport_extent: i32) -> Self {
        Self::new(0, 40, viewport_extent)
    }

    /// Make `first` the first visible row (clamped).
    pub fn scroll_to_row(&self, first: usize) {
        let mut state = self.state.borrow_mut();
        state.first_visible = first.min(state.max_first());
    }

    pub fn scroll_to_end(&self) {
        let max = self.state.borrow().max_first();
        self.scroll_to_row(max);
    }

    pub fn first_visible(&self) -> usize {
        self.state.borrow().first_visible
    }

    pub fn boxed(&self) -> Box<dyn ScrollContent> {
        Box::new(self.clone())
    }
}

impl ScrollContent for SharedListView {
    fn geometry(&self) -> ContentGeometry {
        ContentGeometry::List(self.state.borrow().geometry())
    }

    fn scroll_offset(&self) -> i32 {
        let state = self.state.borrow();
        state.first_visible as i32 * state.item_extent
    }

    fn set_scroll_offset(&mut self, offset: i32) {
        let extent = self.state.borrow().item_extent.max(1);
        let row = usize::try_from(offset.max(0) / extent).unwrap_or(0);
        self.scroll_to_row(row);
    }

    fn max_scroll_offset(&self) -> i32 {
        let state = self.state.borrow();
        state.max_first() as i32 * state.item_extent
    }
}
