#![forbid(unsafe_code)]

//! Scripted gestures and a frame-stepping driver.
//!
//! A [`GestureScript`] is an ordered list of [`Step`]s: pointer samples,
//! frame ticks and host calls (completion, manual triggers). The
//! [`GestureDriver`] replays it against a controller on a virtual clock that
//! advances by [`FRAME_INTERVAL`] per frame, recording every step into a
//! [`Transcript`].
//!
//! [`GestureScript::storm`] generates a seeded random script for fault
//! injection. The same seed always yields the same script.

use std::time::Duration;

use pullkit_core::controller::GestureController;
use pullkit_core::event::{Disposition, PointerEvent};
use web_time::Instant;

use crate::transcript::{StepRecord, Transcript};

/// Virtual time between two frames (60 Hz).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Upper bound on frames spent by [`Step::Settle`].
pub const MAX_SETTLE_FRAMES: u32 = 1_000;

// ============================================================================
// Steps
// ============================================================================

/// One scripted action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Pointer(PointerEvent),
    /// Advance `n` frames.
    Frames(u32),
    /// Advance frames until no animation is running.
    Settle,
    CompleteRefresh,
    CompleteLoadMore,
    SetRefreshing { animate: bool },
    SetLoadingMore { animate: bool },
}

impl Step {
    /// Stable name for transcripts.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pointer(event) => event.name(),
            Self::Frames(_) => "frames",
            Self::Settle => "settle",
            Self::CompleteRefresh => "complete_refresh",
            Self::CompleteLoadMore => "complete_load_more",
            Self::SetRefreshing { .. } => "set_refreshing",
            Self::SetLoadingMore { .. } => "set_loading_more",
        }
    }
}

/// Ordered list of steps, built fluently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GestureScript {
    steps: Vec<Step>,
}

impl GestureScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn push(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn down(self, x: f32, y: f32) -> Self {
        self.push(Step::Pointer(PointerEvent::Down { x, y }))
    }

    pub fn move_to(self, x: f32, y: f32) -> Self {
        self.push(Step::Pointer(PointerEvent::Move { x, y }))
    }

    /// `count` evenly spaced vertical moves from `from_y` (exclusive) to
    /// `to_y` (inclusive) at `x`.
    pub fn drag_y(mut self, x: f32, from_y: f32, to_y: f32, count: u32) -> Self {
        let count = count.max(1);
        for i in 1..=count {
            let t = i as f32 / count as f32;
            self = self.move_to(x, from_y + (to_y - from_y) * t);
        }
        self
    }

    pub fn up(self) -> Self {
        self.push(Step::Pointer(PointerEvent::Up))
    }

    pub fn cancel(self) -> Self {
        self.push(Step::Pointer(PointerEvent::Cancel))
    }

    pub fn frames(self, n: u32) -> Self {
        self.push(Step::Frames(n))
    }

    pub fn settle(self) -> Self {
        self.push(Step::Settle)
    }

    pub fn complete_refresh(self) -> Self {
        self.push(Step::CompleteRefresh)
    }

    pub fn complete_load_more(self) -> Self {
        self.push(Step::CompleteLoadMore)
    }

    pub fn set_refreshing(self, animate: bool) -> Self {
        self.push(Step::SetRefreshing { animate })
    }

    pub fn set_loading_more(self, animate: bool) -> Self {
        self.push(Step::SetLoadingMore { animate })
    }

    /// Seeded random script of `gestures` pointer sequences, interleaved
    /// with frames and the occasional completion call, including in the
    /// middle of a drag.
    pub fn storm(seed: u64, gestures: usize) -> Self {
        let mut rng = Rng::new(seed);
        let mut script = Self::new();
        for _ in 0..gestures {
            let x = rng.next_range(0, 320) as f32;
            let y = rng.next_range(100, 700) as f32;
            script = script.down(x, y);
            let moves = rng.next_range(1, 12);
            let (mut cx, mut cy) = (x, y);
            for _ in 0..moves {
                cx += rng.next_range(0, 21) as f32 - 10.0;
                cy += rng.next_range(0, 121) as f32 - 60.0;
                script = script.move_to(cx, cy);
                script = match rng.next_range(0, 24) {
                    0 => script.complete_refresh(),
                    1 => script.complete_load_more(),
                    _ => script,
                };
            }
            script = match rng.next_range(0, 10) {
                0 => script.cancel(),
                _ => script.up(),
            };
            script = script.frames(rng.next_range(0, 30) as u32);
            script = match rng.next_range(0, 8) {
                0 => script.complete_refresh(),
                1 => script.complete_load_more(),
                2 => script.set_refreshing(rng.next_range(0, 2) == 1),
                _ => script,
            };
        }
        script.settle()
    }
}

/// Deterministic xorshift64 PRNG.
struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform-ish value in `[lo, hi)`.
    fn next_range(&mut self, lo: u64, hi: u64) -> u64 {
        if hi <= lo {
            return lo;
        }
        lo + self.next() % (hi - lo)
    }
}

// ============================================================================
// Driver
// ============================================================================

/// Replays scripts on a virtual frame clock.
#[derive(Debug)]
pub struct GestureDriver {
    base: Instant,
    frame: u64,
    transcript: Transcript,
}

impl Default for GestureDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureDriver {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            frame: 0,
            transcript: Transcript::new(),
        }
    }

    /// Virtual time of the current frame.
    pub fn now(&self) -> Instant {
        self.base + FRAME_INTERVAL * u32::try_from(self.frame).unwrap_or(u32::MAX)
    }

    /// Frames elapsed so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn into_transcript(self) -> Transcript {
        self.transcript
    }

    /// Advance one frame and feed it to the controller.
    pub fn tick(&mut self, ctl: &mut GestureController) -> Option<i32> {
        self.frame += 1;
        ctl.on_frame(self.now())
    }

    /// Advance until the settle animation is done. Returns frames spent.
    pub fn settle(&mut self, ctl: &mut GestureController) -> u32 {
        let mut frames = 0;
        while ctl.is_animating() && frames < MAX_SETTLE_FRAMES {
            self.tick(ctl);
            frames += 1;
        }
        frames
    }

    /// Run one step. Pointer steps return their disposition.
    pub fn step(&mut self, ctl: &mut GestureController, step: &Step) -> Option<Disposition> {
        let disposition = match *step {
            Step::Pointer(event) => Some(ctl.handle_event(&event)),
            Step::Frames(n) => {
                for _ in 0..n {
                    self.tick(ctl);
                }
                None
            }
            Step::Settle => {
                self.settle(ctl);
                None
            }
            Step::CompleteRefresh => {
                ctl.complete_refresh();
                None
            }
            Step::CompleteLoadMore => {
                ctl.complete_load_more();
                None
            }
            Step::SetRefreshing { animate } => {
                ctl.set_refreshing(animate);
                None
            }
            Step::SetLoadingMore { animate } => {
                ctl.set_loading_more(animate);
                None
            }
        };
        self.transcript
            .push(StepRecord::capture(self.frame, step, disposition, ctl));
        disposition
    }

    /// Run every step of `script`.
    pub fn run(
        &mut self,
        ctl: &mut GestureController,
        script: &GestureScript,
    ) -> Vec<Option<Disposition>> {
        script.steps().iter().map(|s| self.step(ctl, s)).collect()
    }
}
