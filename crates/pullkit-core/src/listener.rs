#![forbid(unsafe_code)]

//! Host-facing callbacks.
//!
//! Two kinds of listener exist:
//!
//! - Lifecycle callbacks ([`LifecycleCallback`]): `on_refresh` and
//!   `on_load_more`. Invoked exactly once per committed gesture, never for
//!   manual triggers. Without one, a gesture cannot commit.
//! - A [`DragObserver`]: purely observational progress notifications. Every
//!   method has a no-op default so hosts implement only what they need.

/// Boxed lifecycle callback (`on_refresh`, `on_load_more`).
pub type LifecycleCallback = Box<dyn FnMut()>;

/// Observer for drag progress. All methods default to no-ops.
pub trait DragObserver {
    /// A pointer went down on the overlay, whether or not a pull follows.
    fn on_pull_touch(&mut self) {}

    /// The header is being pulled; `offset` is the new overlay offset (<= 0).
    fn on_pull_down(&mut self, _offset: i32) {}

    /// The footer is being pulled; `offset` is the new overlay offset (>= 0).
    fn on_pull_up(&mut self, _offset: i32) {}

    /// A drag ended (committed or not).
    fn on_pull_release(&mut self) {}

    /// A settle animation moved the overlay to `offset`.
    fn on_pull_back(&mut self, _offset: i32) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl DragObserver for NoopObserver {}
