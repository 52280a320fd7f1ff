#![forbid(unsafe_code)]

//! Step-by-step record of a scripted run, exportable as JSONL and hashable.
//!
//! # JSONL Schema
//!
//! ```json
//! {"frame":0,"step":"down","disposition":"tracking","offset":0,"drag_mode":"none","header":"idle","footer":"idle","animating":false}
//! {"frame":0,"step":"move","disposition":"claimed","offset":-35,"drag_mode":"pull_down_to_refresh","header":"idle","footer":"idle","animating":false}
//! ```
//!
//! Two runs of the same script against identically configured controllers
//! produce byte-identical JSONL, so [`Transcript::checksum`] doubles as a
//! determinism check.

use pullkit_core::controller::GestureController;
use pullkit_core::event::Disposition;
use pullkit_core::indicator::IndicatorPhase;
use pullkit_core::session::DragMode;

use crate::script::Step;

/// Controller state observed right after one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRecord {
    pub frame: u64,
    pub step: &'static str,
    pub disposition: Option<Disposition>,
    pub offset: i32,
    pub drag_mode: DragMode,
    pub header: IndicatorPhase,
    pub footer: IndicatorPhase,
    pub animating: bool,
}

impl StepRecord {
    pub fn capture(
        frame: u64,
        step: &Step,
        disposition: Option<Disposition>,
        ctl: &GestureController,
    ) -> Self {
        Self {
            frame,
            step: step.name(),
            disposition,
            offset: ctl.offset(),
            drag_mode: ctl.drag_mode(),
            header: ctl.header_phase(),
            footer: ctl.footer_phase(),
            animating: ctl.is_animating(),
        }
    }

    /// One JSON object on a single line.
    pub fn to_jsonl(&self) -> String {
        let disposition = self.disposition.map(disposition_name);
        serde_json::json!({
            "frame": self.frame,
            "step": self.step,
            "disposition": disposition,
            "offset": self.offset,
            "drag_mode": self.drag_mode.name(),
            "header": self.header.name(),
            "footer": self.footer.name(),
            "animating": self.animating,
        })
        .to_string()
    }
}

/// Stable lowercase name of a disposition.
pub fn disposition_name(disposition: Disposition) -> &'static str {
    match disposition {
        Disposition::Ignored => "ignored",
        Disposition::Tracking => "tracking",
        Disposition::Claimed => "claimed",
        Disposition::Blocked => "blocked",
    }
}

/// Ordered step records of one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    records: Vec<StepRecord>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: StepRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, one JSON object per line.
    pub fn to_jsonl(&self) -> String {
        let mut out = String::new();
        for record in &self.records {
            out.push_str(&record.to_jsonl());
            out.push('\n');
        }
        out
    }

    /// `blake3:<hex>` over the JSONL form.
    pub fn checksum(&self) -> String {
        let hash = blake3::hash(self.to_jsonl().as_bytes());
        format!("blake3:{}", hash.to_hex())
    }
}
