#![forbid(unsafe_code)]

//! Deterministic test harness and reference fixtures for pullkit.
//!
//! # Role in pullkit
//! `pullkit-harness` drives a [`GestureController`](pullkit_core::GestureController)
//! without a real UI. Recording fixtures stand in for the indicator views,
//! the drag observer and the scrollable content; scripts replay pointer
//! sequences on a virtual 60 Hz frame clock; transcripts capture the
//! controller state after every step as JSONL with a `blake3` checksum.
//!
//! # Determinism
//! Given the same configuration, fixtures and script, two runs produce the
//! same transcript checksum. Seeded storms ([`GestureScript::storm`]) extend
//! this to randomized input.

pub mod fixtures;
pub mod script;
pub mod transcript;

pub use fixtures::{
    CallCounter, CallLog, IndicatorCall, IndicatorHandle, ObserverCall, RecordingIndicator,
    RecordingObserver, SharedListView, SharedScrollView,
};
pub use script::{FRAME_INTERVAL, GestureDriver, GestureScript, MAX_SETTLE_FRAMES, Step};
pub use transcript::{StepRecord, Transcript, disposition_name};
