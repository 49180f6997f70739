//! End-to-end spin lifecycle tests.

use fortune_wheel::{
    CandidatePool, SpinOrchestrator, SpinState, WheelCommand, WheelEvent, WheelSettings,
};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::time::Duration;

/// Settings tuned so a full lifecycle completes in tens of milliseconds.
fn fast_settings() -> WheelSettings {
    WheelSettings::default()
        .with_spin_duration(Duration::from_millis(40))
        .with_frame_delay(Duration::from_millis(2))
        .with_cycle_start(Duration::from_millis(2))
        .with_cycle_cap(Duration::from_millis(8))
}

fn shared_pool(labels: &[&str]) -> Arc<Mutex<CandidatePool>> {
    let mut pool = CandidatePool::new();
    pool.add(labels.iter().copied());
    Arc::new(Mutex::new(pool))
}

#[tokio::test]
async fn test_spin_selects_and_eliminates_winner() {
    let pool = shared_pool(&["Alice", "Bob", "Carol"]);
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let mut wheel = SpinOrchestrator::new(Arc::clone(&pool), fast_settings(), event_tx);

    let winner = wheel
        .spin()
        .await
        .expect("Spin failed")
        .expect("Spin was rejected");

    assert!(["Alice", "Bob", "Carol"].contains(&winner.value()));
    assert_eq!(wheel.state(), SpinState::Idle);
    assert_eq!(wheel.last_winner().map(|p| p.index()), Some(winner.index()));

    {
        let pool = pool.lock().unwrap();
        assert_eq!(pool.available().len(), 2);
        assert!(pool.is_eliminated(winner.index()));
    }

    // Event stream: angle frames, readout ticks, exactly one completion,
    // and the winner reveal as the final label change.
    let mut completions = 0;
    let mut saw_angle = false;
    let mut last_label = None;
    while let Ok(event) = event_rx.try_recv() {
        match event {
            WheelEvent::AngleUpdated(_) => saw_angle = true,
            WheelEvent::DisplayLabelChanged(label) => last_label = Some(label),
            WheelEvent::SpinCompleted { winner: pick } => {
                completions += 1;
                assert_eq!(pick.value(), winner.value());
                assert_eq!(pick.index(), winner.index());
            }
        }
    }
    assert!(saw_angle, "Expected angle frames");
    assert_eq!(completions, 1);
    assert_eq!(last_label.as_deref(), Some(winner.value()));
}

#[tokio::test]
async fn test_angle_normalized_after_spin() {
    let pool = shared_pool(&["Alice", "Bob"]);
    let (event_tx, _event_rx) = mpsc::unbounded_channel();
    let mut wheel = SpinOrchestrator::new(pool, fast_settings(), event_tx);

    wheel.spin().await.expect("Spin failed");
    assert!((0.0..360.0).contains(&wheel.angle()));
}

#[tokio::test]
async fn test_forced_winner_wins_then_is_consumed() {
    let pool = shared_pool(&["Alice", "Bob", "Carol"]);
    let (event_tx, _event_rx) = mpsc::unbounded_channel();
    let mut wheel = SpinOrchestrator::new(Arc::clone(&pool), fast_settings(), event_tx);

    wheel.set_forced_winner(Some("Bob".to_string()));
    let winner = wheel
        .spin()
        .await
        .expect("Spin failed")
        .expect("Spin was rejected");

    assert_eq!(winner.value(), "Bob");
    assert_eq!(winner.index(), 1);
    assert!(wheel.forced_winner().is_none(), "Force is single-use");
    assert!(pool.lock().unwrap().is_eliminated(1));

    let second = wheel
        .spin()
        .await
        .expect("Spin failed")
        .expect("Spin was rejected");
    assert_ne!(second.value(), "Bob");
}

#[tokio::test]
async fn test_unavailable_forced_winner_carries_over() {
    let pool = shared_pool(&["Alice", "Bob"]);
    let (event_tx, _event_rx) = mpsc::unbounded_channel();
    let mut wheel = SpinOrchestrator::new(pool, fast_settings(), event_tx);

    wheel.set_forced_winner(Some("Zed".to_string()));
    let winner = wheel
        .spin()
        .await
        .expect("Spin failed")
        .expect("Spin was rejected");

    assert_ne!(winner.value(), "Zed");
    assert_eq!(wheel.forced_winner(), Some("Zed"));
}

#[tokio::test]
async fn test_forced_duplicate_resolves_to_available_occurrence() {
    let pool = shared_pool(&["A", "B", "A"]);
    pool.lock().unwrap().eliminate("A");
    let (event_tx, _event_rx) = mpsc::unbounded_channel();
    let mut wheel = SpinOrchestrator::new(pool, fast_settings(), event_tx);

    wheel.set_forced_winner(Some("A".to_string()));
    let winner = wheel
        .spin()
        .await
        .expect("Spin failed")
        .expect("Spin was rejected");

    assert_eq!(winner.value(), "A");
    assert_eq!(winner.index(), 2);
}

#[tokio::test]
async fn test_empty_pool_spin_is_a_noop() {
    let pool = shared_pool(&[]);
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let mut wheel = SpinOrchestrator::new(pool, fast_settings(), event_tx);

    let winner = wheel.spin().await.expect("Spin failed");
    assert!(winner.is_none());
    assert_eq!(wheel.state(), SpinState::Idle);
    assert!(event_rx.try_recv().is_err(), "A rejected spin emits nothing");
}

#[tokio::test]
async fn test_rapid_spin_commands_yield_one_completion() {
    let pool = shared_pool(&["Alice", "Bob", "Carol"]);
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let mut wheel = SpinOrchestrator::new(Arc::clone(&pool), fast_settings(), event_tx);

    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(async move { wheel.run(command_rx).await });

    // The second request lands while the first spin is in flight and must
    // be dropped, not queued.
    command_tx.send(WheelCommand::Spin).expect("Send failed");
    command_tx.send(WheelCommand::Spin).expect("Send failed");

    tokio::time::sleep(Duration::from_millis(200)).await;
    drop(command_tx);
    task.await.expect("Join failed").expect("Run failed");

    let mut completions = 0;
    while let Ok(event) = event_rx.try_recv() {
        if matches!(event, WheelEvent::SpinCompleted { .. }) {
            completions += 1;
        }
    }
    assert_eq!(completions, 1, "Exactly one spin may complete");
    assert_eq!(pool.lock().unwrap().available().len(), 2);
}

#[tokio::test]
async fn test_command_loop_edits_pool_and_spins() {
    let pool = shared_pool(&["Alice"]);
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let mut wheel = SpinOrchestrator::new(Arc::clone(&pool), fast_settings(), event_tx);

    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(async move { wheel.run(command_rx).await });

    command_tx
        .send(WheelCommand::AddCandidates(vec![
            "Bob".to_string(),
            "Carol".to_string(),
        ]))
        .expect("Send failed");
    command_tx
        .send(WheelCommand::RemoveCandidate(0))
        .expect("Send failed");
    command_tx
        .send(WheelCommand::SetForcedWinner(Some("Carol".to_string())))
        .expect("Send failed");
    command_tx.send(WheelCommand::Spin).expect("Send failed");

    tokio::time::sleep(Duration::from_millis(200)).await;
    drop(command_tx);
    task.await.expect("Join failed").expect("Run failed");

    let mut winner = None;
    while let Ok(event) = event_rx.try_recv() {
        if let WheelEvent::SpinCompleted { winner: pick } = event {
            winner = Some(pick);
        }
    }
    let winner = winner.expect("Spin never completed");
    assert_eq!(winner.value(), "Carol");

    let pool = pool.lock().unwrap();
    assert_eq!(pool.len(), 2, "Alice was removed");
    assert!(pool.is_eliminated(winner.index()));
}

#[tokio::test]
async fn test_pool_exhaustion_then_restore() {
    let pool = shared_pool(&["Alice", "Bob", "Carol"]);
    let (event_tx, _event_rx) = mpsc::unbounded_channel();
    let mut wheel = SpinOrchestrator::new(Arc::clone(&pool), fast_settings(), event_tx);

    for _ in 0..3 {
        assert!(wheel.spin().await.expect("Spin failed").is_some());
    }
    assert!(pool.lock().unwrap().available().is_empty());
    assert!(
        wheel.spin().await.expect("Spin failed").is_none(),
        "Exhausted pool rejects further spins"
    );

    wheel.restore_all();
    let labels: Vec<String> = pool
        .lock()
        .unwrap()
        .available()
        .iter()
        .map(|c| c.label().to_string())
        .collect();
    assert_eq!(labels, ["Alice", "Bob", "Carol"]);

    assert!(wheel.spin().await.expect("Spin failed").is_some());
}
