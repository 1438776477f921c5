//! Scripted pipeline demo: a fixed event sequence emitted as JSON lines.
//!
//! Run with `cargo run --example scripted`. Shows a bounded queue profile
//! loaded from TOML and the `JsonLinesSink` storage-shaped output.

use std::time::Duration;
use tapstream::{JsonLinesSink, Pipeline, PipelineConfig, ScriptSource, TouchEvent};

fn main() {
    env_logger::init();

    let config = PipelineConfig::from_toml(
        "capacity = 8\nsource_interval_ms = 100\npoll_interval_ms = 50\n",
    )
    .expect("parse config");

    let script = ScriptSource::new([
        TouchEvent::tap(10, 20, 1),
        TouchEvent::swipe(0, 0, 10, 2, 2),
        TouchEvent::swipe(0, 0, 2, 10, 3),
        TouchEvent::swipe(0, 0, -10, 1, 4),
        TouchEvent::swipe(0, 0, 0, -5, 5),
        TouchEvent::swipe(0, 0, 5, 5, 6),
    ]);

    let mut pipeline = Pipeline::new(config);
    pipeline
        .start(script, JsonLinesSink::new(std::io::stdout()))
        .expect("start pipeline");

    std::thread::sleep(Duration::from_secs(2));
    pipeline.stop();
}
