use std::time::Duration;

use jamsearch::debounce::Debouncer;
use tokio::time::{advance, sleep};

const DELAY: Duration = Duration::from_millis(300);

async fn settle() {
    // Let spawned timer tasks observe the advanced clock.
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn test_emits_after_quiet_period() {
    let (mut debouncer, mut rx) = Debouncer::new(DELAY);

    debouncer.push("piano");
    settle().await;
    advance(Duration::from_millis(299)).await;
    settle().await;
    assert!(rx.try_recv().is_err());

    advance(Duration::from_millis(1)).await;
    settle().await;
    assert_eq!(rx.try_recv().ok(), Some("piano"));
}

#[tokio::test(start_paused = true)]
async fn test_burst_emits_only_last_value() {
    let (mut debouncer, mut rx) = Debouncer::new(DELAY);

    for text in ["p", "pi", "pia", "pian", "piano"] {
        debouncer.push(text.to_string());
        sleep(Duration::from_millis(100)).await;
    }

    assert_eq!(rx.recv().await.as_deref(), Some("piano"));
    settle().await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_spaced_values_all_emit() {
    let (mut debouncer, mut rx) = Debouncer::new(DELAY);

    debouncer.push(1);
    sleep(Duration::from_millis(400)).await;
    debouncer.push(2);

    assert_eq!(rx.recv().await, Some(1));
    assert_eq!(rx.recv().await, Some(2));
}

#[tokio::test(start_paused = true)]
async fn test_cancel_drops_pending_value() {
    let (mut debouncer, mut rx) = Debouncer::new(DELAY);

    debouncer.push("piano");
    debouncer.cancel();
    sleep(DELAY * 2).await;
    assert!(rx.try_recv().is_err());

    debouncer.push("drums");
    assert_eq!(rx.recv().await, Some("drums"));
    assert_eq!(debouncer.delay(), DELAY);
}

#[tokio::test(start_paused = true)]
async fn test_drop_cancels_timer() {
    let (mut debouncer, mut rx) = Debouncer::new(DELAY);

    debouncer.push("piano");
    drop(debouncer);

    // The channel closes without delivering the pending value
    assert_eq!(rx.recv().await, None);
}
