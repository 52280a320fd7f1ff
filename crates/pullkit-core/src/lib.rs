#![forbid(unsafe_code)]

//! Core: pull-to-refresh and pull-to-load-more gesture handling.
//!
//! # Role in pullkit
//! `pullkit-core` is the gesture layer placed over a scrollable region. It
//! turns pointer samples into an overlay offset, per-edge indicator phases
//! and lifecycle callbacks. Rendering the indicators and the content is left
//! to the host through the [`Indicator`] and [`ScrollContent`] traits.
//!
//! # Primary responsibilities
//! - **GestureController**: session tracking, drag recognition, friction,
//!   commit/cancel decisions and settle animation.
//! - **IndicatorState**: the Idle / ReleaseToAct / Acting / ManuallyActing
//!   machine for each edge.
//! - **Edge eligibility**: whether list or scroll content sits at its top or
//!   bottom edge.
//! - **ScrollAnimator**: fixed-duration settle tween sampled by the host's
//!   frame loop.
//!
//! # How it fits in the system
//! The host forwards pointer events to [`GestureController::handle_event`],
//! routes them to the content unless the returned [`Disposition`] consumes
//! them, calls [`GestureController::on_frame`] while
//! [`GestureController::is_animating`], and draws the overlay at
//! [`GestureController::offset`]. `pullkit-harness` provides deterministic
//! fixtures for all of these collaborators.

pub mod animation;
pub mod config;
pub mod controller;
pub mod edge;
pub mod event;
pub mod geometry;
pub mod indicator;
pub mod listener;
pub mod logging;
pub mod session;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, warn};

pub use animation::{Easing, ScrollAnimator};
pub use config::{ConfigError, Mode, PullConfig};
pub use controller::{GestureController, offset_for_delta};
pub use edge::{ContentGeometry, ListGeometry, ScrollContent, ScrollGeometry};
pub use event::{Disposition, PointerEvent, Release};
pub use geometry::{Edge, OverlayLayout, Sides};
pub use indicator::{Indicator, IndicatorLabels, IndicatorPhase, IndicatorState};
pub use listener::{DragObserver, LifecycleCallback, NoopObserver};
pub use session::{DragMode, GestureSession};
