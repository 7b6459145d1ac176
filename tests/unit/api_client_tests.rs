/*!
 * Tests for retry behavior and URL resolution
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use srdsync::api_client::{ApiClient, with_retry};
use srdsync::errors::FetchError;

#[tokio::test]
async fn test_with_retry_withAlwaysFailingOp_shouldAttemptExactlyThreeTimes() {
    let attempts = Arc::new(AtomicUsize::new(0));

    let result: Result<(), FetchError> =
        with_retry("https://example.invalid/spells", 3, 1, || {
            let attempts = attempts.clone();
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err::<(), &str>("connection refused")
            }
        })
        .await;

    assert_eq!(attempts.load(Ordering::SeqCst), 3);

    match result {
        Err(FetchError::RetriesExhausted {
            url,
            attempts,
            last_error,
        }) => {
            assert_eq!(url, "https://example.invalid/spells");
            assert_eq!(attempts, 3);
            assert_eq!(last_error, "connection refused");
        }
        other => panic!("expected RetriesExhausted, got {:?}", other),
    }
}

#[tokio::test]
async fn test_with_retry_withFailureMessage_shouldNameTargetAndLastError() {
    let result: Result<(), FetchError> = with_retry("https://example.invalid/features", 3, 1, || {
        async move { Err::<(), &str>("HTTP status 503") }
    })
    .await;

    let message = result.unwrap_err().to_string();
    assert!(message.contains("https://example.invalid/features"));
    assert!(message.contains("HTTP status 503"));
    assert!(message.contains("3 attempts"));
}

#[tokio::test]
async fn test_with_retry_withSecondAttemptSuccess_shouldStopRetrying() {
    let attempts = Arc::new(AtomicUsize::new(0));

    let result = with_retry("https://example.invalid/classes", 3, 1, || {
        let attempts = attempts.clone();
        async move {
            if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                Err("transient")
            } else {
                Ok(42)
            }
        }
    })
    .await;

    assert_eq!(result.unwrap(), 42);
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[test]
fn test_resolve_url_withEveryPathShape_shouldResolveAgainstRightBase() {
    let client = ApiClient::with_base("https://host.test", "https://host.test/api/2014");

    assert_eq!(
        client.resolve_url("https://elsewhere.test/x"),
        "https://elsewhere.test/x"
    );
    assert_eq!(
        client.resolve_url("/api/2014/spells/fireball"),
        "https://host.test/api/2014/spells/fireball"
    );
    assert_eq!(
        client.resolve_url("classes/wizard/levels"),
        "https://host.test/api/2014/classes/wizard/levels"
    );
}
