//! Performance tests for Starpick.
//!
//! These tests verify that the system meets its responsiveness targets:
//! - 60 FPS TUI rendering (frame time < 16.67ms)
//! - Model snapshots cheap enough to send on every keypress
//! - Picks stay fast with large pools
//!
//! Use `cargo test --test integration performance -- --nocapture` to see metrics.

use std::time::Instant;

use ratatui::{backend::TestBackend, Terminal};

use starpick::config::Config;
use starpick::render::RenderState;
use starpick::tea::{Mode, Model};
use starpick::ui;

use crate::fixtures::SEED;

/// Performance thresholds
const MAX_FRAME_TIME_MS: u128 = 17; // 60 FPS = 16.67ms per frame, allow slight margin
const MAX_PICK_TIME_MS: u128 = 500;

fn large_model(task_count: usize) -> Model {
    let config = Config {
        seed: Some(SEED),
        ..Config::default()
    };
    let mut model = Model::new(config);
    for i in 0..task_count {
        let id = model
            .pool
            .add_task(&format!("Task number {} with some descriptive text", i))
            .unwrap()
            .id;
        model.pool.set_importance(id, (i % 3 + 1) as u8).unwrap();
        if i % 4 == 0 {
            model.pool.complete_task(id).unwrap();
        }
    }
    model.mode = Mode::Rating;
    model.cursor = task_count / 2;
    model.pool.pick_task();
    model
}

fn average_frame_ms(state: &RenderState, frames: u32) -> f64 {
    let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
    let start = Instant::now();
    for _ in 0..frames {
        terminal.draw(|f| ui::draw(f, state)).unwrap();
    }
    start.elapsed().as_secs_f64() * 1000.0 / frames as f64
}

#[test]
fn test_render_frame_time_small_list() {
    let state = large_model(10).snapshot();
    let avg = average_frame_ms(&state, 100);
    println!("10 tasks: {:.3}ms per frame", avg);
    assert!(
        avg < MAX_FRAME_TIME_MS as f64,
        "Frame time {:.3}ms exceeds {}ms",
        avg,
        MAX_FRAME_TIME_MS
    );
}

#[test]
fn test_render_frame_time_large_list() {
    let state = large_model(500).snapshot();
    let avg = average_frame_ms(&state, 50);
    println!("500 tasks: {:.3}ms per frame", avg);
    assert!(
        avg < MAX_FRAME_TIME_MS as f64,
        "Frame time {:.3}ms exceeds {}ms",
        avg,
        MAX_FRAME_TIME_MS
    );
}

#[test]
fn test_render_collecting_mode_with_draft() {
    let mut model = large_model(200);
    model.mode = Mode::Collecting;
    model.cursor = model.pool.len();
    model.draft = "A task being typed".to_string();
    let avg = average_frame_ms(&model.snapshot(), 50);
    assert!(avg < MAX_FRAME_TIME_MS as f64, "Frame time {:.3}ms", avg);
}

#[test]
fn test_pick_time_large_pool() {
    let mut model = large_model(2_000);
    let start = Instant::now();
    for _ in 0..100 {
        assert!(model.pool.pick_task().is_some());
    }
    let elapsed = start.elapsed().as_millis();
    println!("100 picks over 2k tasks: {}ms", elapsed);
    assert!(
        elapsed < MAX_PICK_TIME_MS,
        "100 picks took {}ms",
        elapsed
    );
}
