#![forbid(unsafe_code)]

//! Pull-to-refresh walkthrough.
//!
//! Replays one refresh cycle and one load-more cycle against a 50-row list
//! with a 60 px header and a 40 px footer, then prints the transcript as
//! JSONL followed by its checksum.
//!
//! # Running
//!
//! ```sh
//! cargo run -p pullkit-harness
//! RUST_LOG=pullkit_core=trace cargo run -p pullkit-harness
//! ```

use pullkit_core::config::{Mode, PullConfig};
use pullkit_core::controller::GestureController;
use pullkit_core::geometry::Edge;
use pullkit_harness::{
    CallCounter, GestureDriver, GestureScript, RecordingIndicator, SharedListView,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let list = SharedListView::new(50, 40, 400);
    let refreshes = CallCounter::new();
    let loads = CallCounter::new();

    let mut ctl = GestureController::new(PullConfig::new(Mode::Both));
    let (header, _) = RecordingIndicator::new(Edge::Header, 60);
    let (footer, _) = RecordingIndicator::new(Edge::Footer, 40);
    ctl.set_header_indicator(Box::new(header));
    ctl.set_footer_indicator(Box::new(footer));
    ctl.set_content(list.boxed());
    ctl.set_on_refresh(refreshes.callback());
    ctl.set_on_load_more(loads.callback());

    let mut driver = GestureDriver::new();

    let refresh = GestureScript::new()
        .down(160.0, 100.0)
        .drag_y(160.0, 100.0, 240.0, 7)
        .up()
        .settle()
        .complete_refresh()
        .settle();
    driver.run(&mut ctl, &refresh);

    list.scroll_to_end();
    let load_more = GestureScript::new()
        .down(160.0, 500.0)
        .drag_y(160.0, 500.0, 380.0, 6)
        .up()
        .settle()
        .complete_load_more()
        .settle();
    driver.run(&mut ctl, &load_more);

    tracing::info!(
        refreshes = refreshes.get(),
        loads = loads.get(),
        frames = driver.frame(),
        "walkthrough finished"
    );

    let transcript = driver.into_transcript();
    print!("{}", transcript.to_jsonl());
    println!("{}", transcript.checksum());
}
