use std::time::Duration;

use tokio_retry::strategy::{ExponentialBackoff, jitter};

use memo_config::RetryRules;

use crate::Result;

/// Runs `operation` until it succeeds, fails permanently, or the retry budget
/// is spent. Only transient failures are retried; the final error is returned
/// exactly as the last attempt produced it.
pub async fn with_retries<F, Fut, T>(rules: &RetryRules, call: &str, operation: F) -> Result<T>
where
	F: Fn() -> Fut,
	Fut: std::future::Future<Output = Result<T>>,
{
	let mut backoff = ExponentialBackoff::from_millis(rules.backoff_base_ms)
		.map(|delay| jitter(delay.min(Duration::from_millis(rules.backoff_cap_ms))));
	let mut attempt = 0u32;

	loop {
		attempt += 1;

		let err = match operation().await {
			Ok(value) => return Ok(value),
			Err(err) => err,
		};

		if !err.is_transient() || attempt > rules.max_retries {
			return Err(err);
		}

		tracing::warn!(error = %err, call, attempt, "Retrying transient provider failure.");

		let Some(delay) = backoff.next() else {
			return Err(err);
		};

		tokio::time::sleep(delay).await;
	}
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::{AtomicUsize, Ordering};

	use super::*;
	use crate::Error;

	fn rules(max_retries: u32) -> RetryRules {
		RetryRules { max_retries, backoff_base_ms: 1, backoff_cap_ms: 2 }
	}

	#[tokio::test]
	async fn recovers_within_the_retry_budget() {
		let calls = AtomicUsize::new(0);
		let result = with_retries(&rules(2), "test", || {
			let attempt = calls.fetch_add(1, Ordering::SeqCst);

			async move { if attempt < 2 { Err(Error::Timeout) } else { Ok(attempt) } }
		})
		.await;

		assert_eq!(result.expect("retry failed"), 2);
		assert_eq!(calls.load(Ordering::SeqCst), 3);
	}

	#[tokio::test]
	async fn stops_after_the_retry_budget() {
		let calls = AtomicUsize::new(0);
		let result: Result<()> = with_retries(&rules(2), "test", || {
			calls.fetch_add(1, Ordering::SeqCst);

			async { Err(Error::Timeout) }
		})
		.await;

		assert!(matches!(result, Err(Error::Timeout)));
		assert_eq!(calls.load(Ordering::SeqCst), 3);
	}

	#[tokio::test]
	async fn permanent_failures_are_not_retried() {
		let calls = AtomicUsize::new(0);
		let result: Result<()> = with_retries(&rules(2), "test", || {
			calls.fetch_add(1, Ordering::SeqCst);

			async { Err(Error::InvalidResponse { message: "bad shape".to_string() }) }
		})
		.await;

		assert!(matches!(result, Err(Error::InvalidResponse { .. })));
		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}
}
