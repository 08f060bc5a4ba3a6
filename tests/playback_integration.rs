// SPDX-License-Identifier: MPL-2.0
//! Integration tests for the playback pipeline with a real video file.
//!
//! These tests need `tests/data/sample.mp4` (any short H.264/MP4 clip works)
//! and skip silently when it is absent, so the suite stays green on machines
//! without fixtures.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use framepump::{OpenError, PlaybackState, Player};

const SAMPLE: &str = "tests/data/sample.mp4";

fn sample_exists() -> bool {
    std::path::Path::new(SAMPLE).exists()
}

/// Player wired to counters for emitted frames and state changes.
fn instrumented_player() -> (Player, Rc<RefCell<usize>>, Rc<RefCell<Vec<(PlaybackState, i64, i64)>>>) {
    let mut player = Player::new();

    let frames = Rc::new(RefCell::new(0usize));
    let frame_counter = Rc::clone(&frames);
    player.set_on_frame(Box::new(move |image, _time_ms| {
        assert!(image.width() > 0);
        assert!(image.height() > 0);
        assert!(image.stride() >= image.width() as usize * 4);
        *frame_counter.borrow_mut() += 1;
    }));

    let states = Rc::new(RefCell::new(Vec::new()));
    let state_log = Rc::clone(&states);
    player.set_on_state_changed(Box::new(move |state, dur, time| {
        state_log.borrow_mut().push((state, dur, time));
    }));

    (player, frames, states)
}

#[test]
fn open_probes_metadata_and_autostarts() {
    if !sample_exists() {
        return;
    }

    let (mut player, _frames, _states) = instrumented_player();
    let info = player.open(SAMPLE).expect("sample should open");

    assert!(info.duration_ms > 0, "duration should be known");
    assert!(info.native_width > 0);
    assert!(info.native_height > 0);
    assert_eq!(player.duration_ms(), info.duration_ms);
    assert!(player.is_playing(), "open should auto-start playback");
}

#[test]
fn first_tick_emits_a_frame_near_zero() {
    if !sample_exists() {
        return;
    }

    let (mut player, frames, _states) = instrumented_player();
    player.open(SAMPLE).unwrap();
    assert_eq!(*frames.borrow(), 0, "open itself must not emit frames");

    player.tick();
    assert_eq!(*frames.borrow(), 1, "first tick should emit one frame");
    // Within one frame interval of the start.
    assert!(player.current_time_ms() < 100, "first frame pts should be near 0");
}

#[test]
fn tick_emits_at_most_one_frame() {
    if !sample_exists() {
        return;
    }

    let (mut player, frames, _states) = instrumented_player();
    player.open(SAMPLE).unwrap();

    for expected in 1..=5usize {
        player.tick();
        assert_eq!(*frames.borrow(), expected);
    }
}

#[test]
fn every_playing_tick_presents_a_frame() {
    if !sample_exists() {
        return;
    }

    let (mut player, frames, _states) = instrumented_player();
    player.open(SAMPLE).unwrap();

    let mut ticks = 0usize;
    while player.is_playing() && ticks < 10_000 {
        player.tick();
        ticks += 1;
    }
    assert!(player.state().is_stopped(), "clip should play through");

    // No tick may come up empty: frames buffered in the decoder are drained
    // one per tick before new packets are submitted, so nothing is dropped.
    // The final tick contributes the rewound first frame from the stop.
    assert_eq!(*frames.borrow(), ticks);
}

#[test]
fn pause_suspends_ticks_and_retains_position() {
    if !sample_exists() {
        return;
    }

    let (mut player, frames, _states) = instrumented_player();
    player.open(SAMPLE).unwrap();
    player.tick();
    player.tick();
    let position = player.current_time_ms();

    player.pause().unwrap();
    assert!(player.state().is_paused());

    let frames_before = *frames.borrow();
    player.tick();
    player.tick();
    assert_eq!(*frames.borrow(), frames_before, "paused ticks are no-ops");
    assert_eq!(player.current_time_ms(), position, "pause retains position");

    player.play().unwrap();
    player.tick();
    assert_eq!(*frames.borrow(), frames_before + 1);
    assert!(player.current_time_ms() >= position);
}

#[test]
fn stop_rewinds_and_displays_first_frame() {
    if !sample_exists() {
        return;
    }

    let (mut player, frames, states) = instrumented_player();
    player.open(SAMPLE).unwrap();
    for _ in 0..5 {
        player.tick();
    }
    assert!(player.current_time_ms() >= 0);

    let frames_before = *frames.borrow();
    player.stop().unwrap();

    assert_eq!(player.current_time_ms(), 0);
    assert!(player.state().is_stopped());
    assert_eq!(
        *frames.borrow(),
        frames_before + 1,
        "stop should pump one frame for the stopped display"
    );

    let last = *states.borrow().last().unwrap();
    assert!(last.0.is_stopped());
    assert_eq!(last.2, 0);

    // Ticks while stopped are no-ops.
    player.tick();
    assert_eq!(*frames.borrow(), frames_before + 1);
}

#[test]
fn seek_lands_at_or_before_target_and_emits_synchronously() {
    if !sample_exists() {
        return;
    }

    let (mut player, frames, _states) = instrumented_player();
    let info = player.open(SAMPLE).unwrap();
    let target = info.duration_ms / 2;

    let frames_before = *frames.borrow();
    player.seek(target).unwrap();

    assert_eq!(
        *frames.borrow(),
        frames_before + 1,
        "seek must emit exactly one frame itself"
    );
    // Keyframe-bounded: the displayed frame sits at or before the target.
    assert!(player.current_time_ms() <= target);
    assert!(player.is_playing(), "seek does not change the playback state");
}

#[test]
fn seek_clamps_to_duration() {
    if !sample_exists() {
        return;
    }

    let (mut player, _frames, _states) = instrumented_player();
    let info = player.open(SAMPLE).unwrap();

    player.seek(info.duration_ms + 60_000).unwrap();
    assert!(player.current_time_ms() <= info.duration_ms);

    player.seek(-5_000).unwrap();
    assert!(player.current_time_ms() >= 0);
}

#[test]
fn speed_changes_cadence_but_not_content() {
    if !sample_exists() {
        return;
    }

    let (mut player, _frames, _states) = instrumented_player();
    player.open(SAMPLE).unwrap();

    let normal = player.tick_interval();
    player.set_speed(2.0);
    let double = player.tick_interval();
    assert!(double < normal);
    let ratio = normal.as_secs_f64() / double.as_secs_f64();
    assert!((ratio - 2.0).abs() < 1e-6);

    // Content is unaffected: the next tick still advances monotonically.
    let before = player.current_time_ms();
    player.tick();
    assert!(player.current_time_ms() >= before);
}

#[test]
fn end_of_stream_stops_exactly_once() {
    if !sample_exists() {
        return;
    }

    let (mut player, frames, states) = instrumented_player();
    let info = player.open(SAMPLE).unwrap();

    // Jump near the end, then tick through the remaining frames.
    player.seek(info.duration_ms.saturating_sub(500)).unwrap();
    let mut guard = 0;
    while player.is_playing() && guard < 10_000 {
        player.tick();
        guard += 1;
    }

    assert!(player.state().is_stopped(), "EOS should transition to Stopped");
    assert_eq!(player.current_time_ms(), 0, "EOS stop rewinds to the start");

    // Session resets report duration 0; only the EOS stop carries the real
    // duration.
    let stop_transitions = states
        .borrow()
        .iter()
        .filter(|(state, dur, _)| state.is_stopped() && *dur > 0)
        .count();
    assert_eq!(stop_transitions, 1, "exactly one Stopped transition");

    // Further ticks while stopped change nothing.
    let frames_before = *frames.borrow();
    player.tick();
    player.tick();
    assert_eq!(*frames.borrow(), frames_before);
}

#[test]
fn reopening_replaces_the_session() {
    if !sample_exists() {
        return;
    }

    let (mut player, _frames, states) = instrumented_player();
    player.open(SAMPLE).unwrap();
    for _ in 0..3 {
        player.tick();
    }

    let info = player.open(SAMPLE).unwrap();
    assert_eq!(player.current_time_ms(), 0);
    assert_eq!(player.duration_ms(), info.duration_ms);
    assert!(player.is_playing());

    // Both opens reported a teardown reset before their session.
    let resets = states
        .borrow()
        .iter()
        .filter(|&&(state, dur, time)| state.is_stopped() && dur == 0 && time == 0)
        .count();
    assert!(resets >= 2);
}

#[test]
fn open_rejects_non_video_bytes() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"not_a_video").unwrap();
    file.flush().unwrap();

    let mut player = Player::new();
    let result = player.open(file.path());
    assert!(matches!(
        result,
        Err(OpenError::ContainerUnreadable(_)) | Err(OpenError::NoVideoStream)
    ));
    assert!(!player.is_playing(), "no partial session may remain");
    assert_eq!(player.duration_ms(), 0);
}
