/*!
 * Tests for the global pacing gate
 */

use std::sync::Arc;
use std::time::{Duration, Instant};

use srdsync::translation::Throttle;

#[tokio::test]
async fn test_throttle_pace_withConsecutiveCalls_shouldEnforceMinimumInterval() {
    let throttle = Throttle::new(50);
    let calls = 4;

    let started = Instant::now();
    for _ in 0..calls {
        throttle.pace().await;
    }

    // N calls are separated by at least (N-1) intervals.
    let floor = Duration::from_millis(50 * (calls - 1));
    assert!(
        started.elapsed() >= floor,
        "elapsed {:?} under floor {:?}",
        started.elapsed(),
        floor
    );
}

#[tokio::test]
async fn test_throttle_pace_withConcurrentCallers_shouldSerializeDispatches() {
    let throttle = Arc::new(Throttle::new(30));

    let started = Instant::now();
    let mut handles = Vec::new();
    for _ in 0..3 {
        let throttle = throttle.clone();
        handles.push(tokio::spawn(async move {
            throttle.pace().await;
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert!(started.elapsed() >= Duration::from_millis(60));
}

#[tokio::test]
async fn test_throttle_pace_withZeroInterval_shouldNotSleep() {
    let throttle = Throttle::new(0);

    let started = Instant::now();
    for _ in 0..100 {
        throttle.pace().await;
    }

    assert!(started.elapsed() < Duration::from_millis(50));
    assert_eq!(throttle.min_interval(), Duration::ZERO);
}

#[tokio::test]
async fn test_throttle_pace_withFirstCall_shouldNotWait() {
    let throttle = Throttle::new(200);

    let started = Instant::now();
    throttle.pace().await;

    assert!(started.elapsed() < Duration::from_millis(100));
}
