//! Tests for the rotation animator and its easing curve.

use fortune_wheel::{RotationAnimator, WheelEvent, angle_at, ease_out_cubic};
use tokio::sync::mpsc;
use tokio::time::Duration;

const EPS: f64 = 1e-9;

#[test]
fn test_ease_out_cubic_reference_points() {
    assert!((ease_out_cubic(0.0)).abs() < EPS);
    assert!((ease_out_cubic(0.5) - 0.875).abs() < EPS);
    assert!((ease_out_cubic(1.0) - 1.0).abs() < EPS);
}

#[test]
fn test_interpolation_over_ten_turns() {
    // A 3600 degree sweep: 0 at start, 3600 * 0.875 at the midpoint, 3600 at the end.
    assert!((angle_at(0.0, 3600.0, 0.0)).abs() < EPS);
    assert!((angle_at(0.0, 3600.0, 0.5) - 3150.0).abs() < EPS);
    assert!((angle_at(0.0, 3600.0, 1.0) - 3600.0).abs() < EPS);
}

#[test]
fn test_interpolation_clamps_progress() {
    assert!((angle_at(0.0, 720.0, -0.5)).abs() < EPS);
    assert!((angle_at(0.0, 720.0, 1.5) - 720.0).abs() < EPS);
}

#[test]
fn test_target_lands_on_division_boundary() {
    let animator = RotationAnimator::new(Duration::from_millis(16), 4, 7);
    for start in [0.0, 15.0, 123.4, 359.9] {
        for _ in 0..50 {
            let target = animator.target_angle(12, start);
            let travel = target - start;
            assert!(
                (4.0 * 360.0..8.0 * 360.0).contains(&travel),
                "Travel {} outside the configured full-turn range",
                travel
            );
            let resting = (start.rem_euclid(360.0) + travel).rem_euclid(360.0);
            let off_boundary = resting.rem_euclid(30.0);
            assert!(
                off_boundary < 1e-6 || off_boundary > 30.0 - 1e-6,
                "Resting angle {} misses every 30 degree boundary",
                resting
            );
        }
    }
}

#[tokio::test]
async fn test_run_emits_monotonic_frames_ending_at_target() {
    let animator = RotationAnimator::new(Duration::from_millis(2), 4, 7);
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut handle = animator.run(0.0, 720.0, Duration::from_millis(40), tx);
    handle.wait().await;

    let mut angles = Vec::new();
    while let Ok(event) = rx.try_recv() {
        match event {
            WheelEvent::AngleUpdated(angle) => angles.push(angle),
            other => panic!("Unexpected event: {:?}", other),
        }
    }

    assert!(angles.len() >= 2, "Expected several frames, got {}", angles.len());
    for pair in angles.windows(2) {
        assert!(pair[1] >= pair[0], "Angle went backwards: {:?}", pair);
    }
    let last = angles.last().copied().expect("No frames recorded");
    assert!((last - 720.0).abs() < EPS, "Final frame must carry the target");
}

#[tokio::test]
async fn test_zero_duration_jumps_straight_to_target() {
    let animator = RotationAnimator::new(Duration::from_millis(2), 4, 7);
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut handle = animator.run(90.0, 450.0, Duration::ZERO, tx);
    handle.wait().await;

    let mut angles = Vec::new();
    while let Ok(WheelEvent::AngleUpdated(angle)) = rx.try_recv() {
        angles.push(angle);
    }
    assert_eq!(angles.len(), 1);
    assert!((angles[0] - 450.0).abs() < EPS);
}

#[tokio::test]
async fn test_cancel_stops_frames() {
    let animator = RotationAnimator::new(Duration::from_millis(2), 4, 7);
    let (tx, mut rx) = mpsc::unbounded_channel();

    let handle = animator.run(0.0, 720.0, Duration::from_secs(30), tx);
    tokio::time::sleep(Duration::from_millis(20)).await;
    handle.cancel();
    tokio::time::sleep(Duration::from_millis(20)).await;

    // Drain whatever was emitted before the abort landed.
    while rx.try_recv().is_ok() {}
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(
        rx.try_recv().is_err(),
        "No frames may arrive after cancellation"
    );
}
