use std::time::Duration;

use bolt_shooter::clock::{Clock, ManualClock, SystemClock};
use bolt_shooter::input::{Action, InputState, KeysDown, NoInput};

// ── Clock ─────────────────────────────────────────────────────────────────────

#[test]
fn manual_clock_reports_elapsed_seconds() {
    let mut clock = ManualClock::new();
    clock.advance(Duration::from_millis(50));
    assert!((clock.delta(0.1) - 0.05).abs() < 1e-6);
    // Nothing happened since the last frame
    assert_eq!(clock.delta(0.1), 0.0);
}

#[test]
fn long_pause_is_clamped() {
    let mut clock = ManualClock::new();
    clock.advance(Duration::from_secs(5));
    assert_eq!(clock.delta(0.1), 0.1);
}

#[test]
fn system_clock_never_exceeds_cap() {
    let mut clock = SystemClock::new();
    std::thread::sleep(Duration::from_millis(5));
    let dt = clock.delta(0.001);
    assert!(dt > 0.0 && dt <= 0.001);
}

// ── Input ─────────────────────────────────────────────────────────────────────

#[test]
fn keys_start_released() {
    let keys = KeysDown::new();
    for action in Action::ALL {
        assert!(!keys.is_down(action));
        assert!(!NoInput.is_down(action));
    }
}

#[test]
fn last_notification_wins() {
    let mut keys = KeysDown::new();
    keys.press(Action::FireLeft);
    keys.release(Action::FireLeft);
    keys.press(Action::FireLeft);
    assert!(keys.is_down(Action::FireLeft));

    keys.release(Action::FireLeft);
    keys.release(Action::FireLeft);
    assert!(!keys.is_down(Action::FireLeft));
}

#[test]
fn actions_are_independent() {
    let mut keys = KeysDown::new();
    keys.press(Action::AimUp);
    keys.press(Action::AimDown);
    assert!(keys.is_down(Action::AimUp));
    assert!(keys.is_down(Action::AimDown));
    assert!(!keys.is_down(Action::Jump));
}
