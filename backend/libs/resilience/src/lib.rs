/// Resilience patterns for outbound calls
///
/// Currently a single pattern: **classified retry**. A call is retried only
/// when its failure is classified as transient (for example a backend
/// reporting overload); every other failure aborts immediately. The delay
/// between attempts is fixed, not exponential, matching the behavior of the
/// generation backend this was built for.
///
/// # Example
///
/// ```rust,no_run
/// use resilience::{retry_classified, RetryConfig, RetryError};
///
/// #[tokio::main]
/// async fn main() {
///     let result: Result<(), RetryError<String>> =
///         retry_classified(RetryConfig::default(), || async {
///             // Your outbound call here
///             Ok::<_, String>(())
///         }, |e| e.contains("overloaded"))
///         .await;
/// }
/// ```
pub mod retry;

pub use retry::{retry_classified, RetryConfig, RetryError};
