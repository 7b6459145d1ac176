/*!
 * Tests for the bounded-concurrency pool
 */

use rand::Rng;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use srdsync::pool::bounded_map;

#[tokio::test]
async fn test_bounded_map_withVariableDelays_shouldPreserveInputOrder() {
    // Later items finish first, so completion order is the reverse of
    // input order.
    let items: Vec<u64> = (0..16).collect();

    let results = bounded_map(items.clone(), 5, |n| async move {
        let jitter = rand::rng().random_range(0..5u64);
        tokio::time::sleep(Duration::from_millis((16 - n) * 3 + jitter)).await;
        n * 10
    })
    .await;

    let expected: Vec<u64> = items.iter().map(|n| n * 10).collect();
    assert_eq!(results, expected);
}

#[tokio::test]
async fn test_bounded_map_withLimit_shouldNeverExceedLimitInFlight() {
    let in_flight = Arc::new(AtomicUsize::new(0));
    let max_seen = Arc::new(AtomicUsize::new(0));

    let items: Vec<usize> = (0..30).collect();
    let limit = 4;

    bounded_map(items, limit, |_| {
        let in_flight = in_flight.clone();
        let max_seen = max_seen.clone();
        async move {
            let current = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            max_seen.fetch_max(current, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            in_flight.fetch_sub(1, Ordering::SeqCst);
        }
    })
    .await;

    assert!(max_seen.load(Ordering::SeqCst) <= limit);
    assert!(max_seen.load(Ordering::SeqCst) >= 2);
}

#[tokio::test]
async fn test_bounded_map_withEmptyInput_shouldReturnEmptyWithoutWork() {
    let invoked = Arc::new(AtomicUsize::new(0));

    let results = bounded_map(Vec::<u32>::new(), 8, |_| {
        let invoked = invoked.clone();
        async move {
            invoked.fetch_add(1, Ordering::SeqCst);
        }
    })
    .await;

    assert!(results.is_empty());
    assert_eq!(invoked.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_bounded_map_withFailingItem_shouldNotCancelSiblings() {
    let items: Vec<u32> = (0..8).collect();

    let results = bounded_map(items, 3, |n| async move {
        if n == 4 {
            Err(format!("item {} failed", n))
        } else {
            Ok(n)
        }
    })
    .await;

    assert_eq!(results.len(), 8);
    assert_eq!(results.iter().filter(|r| r.is_err()).count(), 1);
    assert_eq!(results[4], Err("item 4 failed".to_string()));
    assert_eq!(results[7], Ok(7));
}

#[tokio::test]
async fn test_bounded_map_withLimitLargerThanInput_shouldStillComplete() {
    let results = bounded_map(vec![1, 2, 3], 100, |n| async move { n + 1 }).await;
    assert_eq!(results, vec![2, 3, 4]);
}
