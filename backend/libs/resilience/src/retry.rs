/// Retry policy with failure classification and a fixed inter-attempt delay
///
/// The loop is a small state machine:
/// `Attempting(n) -> { Success | Terminal | Retryable -> Attempting(n+1) } -> Exhausted`.
/// A terminal classification returns early without sleeping; only retryable
/// failures consume the retry budget.
use std::future::Future;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total number of attempts, including the first one
    pub max_attempts: u32,
    /// Fixed delay between attempts
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(2000),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RetryError<E> {
    /// Every attempt failed with a retryable error
    #[error("All {attempts} attempts failed: {last}")]
    Exhausted { attempts: u32, last: E },
    /// A non-retryable failure aborted the loop
    #[error("Operation failed: {0}")]
    Terminal(E),
}

impl<E> RetryError<E> {
    /// The underlying failure, regardless of how the loop ended
    pub fn into_inner(self) -> E {
        match self {
            RetryError::Exhausted { last, .. } => last,
            RetryError::Terminal(e) => e,
        }
    }
}

/// Execute a future with classified retry
///
/// `is_retryable` inspects each failure; `true` means wait `config.delay`
/// and try again (until `config.max_attempts` is reached), `false` means
/// return the failure immediately as [`RetryError::Terminal`].
pub async fn retry_classified<F, Fut, T, E, C>(
    config: RetryConfig,
    mut f: F,
    is_retryable: C,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    C: Fn(&E) -> bool,
{
    let max_attempts = config.max_attempts.max(1);

    for attempt in 1..=max_attempts {
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) if !is_retryable(&e) => {
                return Err(RetryError::Terminal(e));
            }
            Err(e) => {
                if attempt == max_attempts {
                    warn!("Attempt {}/{} failed, giving up: {}", attempt, max_attempts, e);
                    return Err(RetryError::Exhausted {
                        attempts: max_attempts,
                        last: e,
                    });
                }

                warn!(
                    "Attempt {}/{} failed, retrying in {:?}: {}",
                    attempt, max_attempts, config.delay, e
                );
                tokio::time::sleep(config.delay).await;
            }
        }
    }

    unreachable!("retry loop returns from within");
}
