//! Integration tests for the frame-to-tick input handoff.

use climbnet_input::{InputSampler, KeyboardFrame, Keys};
use climbnet_protocol::{Buttons, InputRecord, Vec2};

const EPS: f32 = 1e-4;

// =========================================================================
// Helpers
// =========================================================================

fn captured_sampler() -> InputSampler {
    let mut s = InputSampler::new();
    s.on_local_join();
    s
}

fn frame() -> KeyboardFrame {
    KeyboardFrame::new()
}

fn assert_dir(actual: Vec2, x: f32, y: f32) {
    assert!(
        (actual.x - x).abs() < EPS && (actual.y - y).abs() < EPS,
        "expected ({x}, {y}), got ({}, {})",
        actual.x,
        actual.y
    );
}

// =========================================================================
// Accumulation
// =========================================================================

#[test]
fn test_up_then_right_across_frames_flushes_normalized_diagonal() {
    let mut s = captured_sampler();

    s.sample_frame(Some(&frame().hold(Keys::W)));
    s.sample_frame(Some(&frame().hold(Keys::D)));
    let record = s.flush();

    assert_dir(record.direction, 0.7071, 0.7071);
}

#[test]
fn test_repeated_direction_normalizes_to_unit() {
    let mut s = captured_sampler();

    for _ in 0..4 {
        s.sample_frame(Some(&frame().hold(Keys::A)));
    }

    assert_dir(s.flush().direction, -1.0, 0.0);
}

#[test]
fn test_no_input_flushes_zero() {
    let mut s = captured_sampler();
    s.sample_frame(Some(&frame()));

    assert_eq!(s.flush(), InputRecord::default());
}

#[test]
fn test_jump_tap_in_any_frame_survives_to_tick() {
    let mut s = captured_sampler();

    s.sample_frame(Some(&frame().press(Keys::SPACE)));
    s.sample_frame(Some(&frame()));
    s.sample_frame(Some(&frame().hold(Keys::W)));
    let record = s.flush();

    assert!(record.buttons.contains(Buttons::JUMP));
    assert_dir(record.direction, 0.0, 1.0);
}

// =========================================================================
// Flush / reset handoff
// =========================================================================

#[test]
fn test_next_window_starts_empty_after_flush() {
    let mut s = captured_sampler();
    s.sample_frame(Some(&frame().hold(Keys::W).hold(Keys::SPACE)));
    s.flush();

    s.sample_frame(Some(&frame()));
    let second = s.flush();

    assert_eq!(second, InputRecord::default());
}

#[test]
fn test_two_ticks_in_one_frame_both_see_the_frame_input() {
    let mut s = captured_sampler();
    s.sample_frame(Some(&frame().hold(Keys::S)));

    let first = s.flush();
    let second = s.flush();

    assert_eq!(first, second);
    assert_dir(second.direction, 0.0, -1.0);
}

#[test]
fn test_input_after_flush_lands_in_next_window_only() {
    let mut s = captured_sampler();
    s.sample_frame(Some(&frame().hold(Keys::W)));
    let first = s.flush();

    s.sample_frame(Some(&frame().hold(Keys::D)));
    let second = s.flush();

    assert_dir(first.direction, 0.0, 1.0);
    assert_dir(second.direction, 1.0, 0.0);
}

#[test]
fn test_toggle_out_of_capture_mid_window_keeps_earlier_frames() {
    let mut s = captured_sampler();
    s.sample_frame(Some(&frame().hold(Keys::W)));
    s.sample_frame(Some(&frame().press(Keys::ESCAPE).hold(Keys::D)));

    let record = s.flush();

    // The frame that released capture contributes nothing.
    assert_dir(record.direction, 0.0, 1.0);
    assert!(!s.is_captured());
}

// =========================================================================
// Local join
// =========================================================================

#[test]
fn test_on_local_join_drops_input_captured_before_join() {
    let mut s = InputSampler::new();
    s.sample_frame(Some(&frame().press(Keys::ENTER)));
    assert!(s.is_captured());
    for _ in 0..500 {
        s.sample_frame(Some(&frame().hold(Keys::D).hold(Keys::SPACE)));
    }

    s.on_local_join();
    s.sample_frame(Some(&frame()));

    assert_eq!(s.flush(), InputRecord::default());
}

#[test]
fn test_on_local_join_keeps_frames_sampled_after_it() {
    let mut s = InputSampler::new();
    s.sample_frame(Some(&frame().press(Keys::ENTER).hold(Keys::A)));

    s.on_local_join();
    s.sample_frame(Some(&frame().hold(Keys::W)));

    assert_dir(s.flush().direction, 0.0, 1.0);
}
