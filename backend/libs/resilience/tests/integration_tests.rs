/// Integration tests for the resilience library public API
use resilience::retry::{retry_classified, RetryConfig, RetryError};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, PartialEq)]
enum FakeError {
    Overloaded,
    Invalid,
}

impl std::fmt::Display for FakeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FakeError::Overloaded => write!(f, "model is overloaded"),
            FakeError::Invalid => write!(f, "invalid request"),
        }
    }
}

fn retry_on_overload(e: &FakeError) -> bool {
    matches!(e, FakeError::Overloaded)
}

#[tokio::test(start_paused = true)]
async fn recovers_after_transient_overload() {
    let config = RetryConfig {
        max_attempts: 3,
        delay: Duration::from_millis(2000),
    };
    let calls = Arc::new(AtomicU32::new(0));
    let calls_clone = calls.clone();

    let result = retry_classified(
        config,
        move || {
            let n = calls_clone.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    Err(FakeError::Overloaded)
                } else {
                    Ok("generated content")
                }
            }
        },
        retry_on_overload,
    )
    .await;

    assert_eq!(result.unwrap(), "generated content");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn sustained_overload_exhausts_the_budget() {
    let config = RetryConfig {
        max_attempts: 3,
        delay: Duration::from_millis(2000),
    };
    let calls = Arc::new(AtomicU32::new(0));
    let calls_clone = calls.clone();
    let started = tokio::time::Instant::now();

    let result: Result<(), _> = retry_classified(
        config,
        move || {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            async { Err(FakeError::Overloaded) }
        },
        retry_on_overload,
    )
    .await;

    let err = result.expect_err("should exhaust");
    match &err {
        RetryError::Exhausted { attempts, last } => {
            assert_eq!(*attempts, 3);
            assert_eq!(*last, FakeError::Overloaded);
        }
        other => panic!("expected Exhausted, got {:?}", other),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    // Two inter-attempt delays, no delay after the final failure
    assert_eq!(started.elapsed(), Duration::from_millis(4000));
    assert_eq!(err.into_inner(), FakeError::Overloaded);
}

#[tokio::test]
async fn non_retryable_failure_is_terminal() {
    let calls = Arc::new(AtomicU32::new(0));
    let calls_clone = calls.clone();

    let result: Result<(), _> = retry_classified(
        RetryConfig::default(),
        move || {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            async { Err(FakeError::Invalid) }
        },
        retry_on_overload,
    )
    .await;

    assert!(matches!(result, Err(RetryError::Terminal(FakeError::Invalid))));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
