//! Live pipeline demo: a synthetic touch source feeding the console sink.
//!
//! Run with `cargo run --example pipeline`. Set `RUST_LOG=debug` to watch
//! the driver's lifecycle logging.

use std::time::Duration;
use tapstream::{now_ms, ConsoleSink, Pipeline, PipelineConfig, TouchEvent};

fn main() {
    env_logger::init();

    // Deterministic stand-in for a touchscreen: alternates taps and swipes,
    // walking the coordinates so every swipe direction shows up.
    let mut tick: i32 = 0;
    let source = move || {
        tick += 1;
        let x = (tick * 37) % 100;
        let y = (tick * 61) % 100;
        let event = if tick % 2 == 0 {
            TouchEvent::tap(x, y, now_ms())
        } else {
            let x2 = (x + tick * 13) % 100;
            let y2 = (y + tick * 29) % 100;
            TouchEvent::swipe(x, y, x2, y2, now_ms())
        };
        Some(event)
    };

    let config = PipelineConfig {
        capacity: None,
        source_interval_ms: 1000,
        poll_interval_ms: 100,
    };

    let mut pipeline = Pipeline::new(config);
    pipeline
        .start(source, ConsoleSink::new())
        .expect("start pipeline");

    std::thread::sleep(Duration::from_secs(10));
    pipeline.stop();
}
