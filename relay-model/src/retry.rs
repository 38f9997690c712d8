use relay_core::{Llm, LlmReply, LlmRequest, RelayError, Result};
use std::time::Duration;
use tracing::warn;

/// Fixed-interval retry policy for throttled model invocations.
///
/// One retry, no backoff escalation: a throttled invocation waits
/// `delay` and is attempted a second time; the second failure (and any
/// non-throttle failure) propagates to the caller.
#[derive(Clone, Debug)]
pub struct ThrottleRetry {
    pub delay: Duration,
}

impl Default for ThrottleRetry {
    fn default() -> Self {
        Self { delay: Duration::from_secs(2) }
    }
}

impl ThrottleRetry {
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[must_use]
pub fn is_throttling_message(message: &str) -> bool {
    let normalized = message.to_ascii_uppercase();
    normalized.contains("THROTTL")
        || normalized.contains("429")
        || normalized.contains("TOO MANY REQUESTS")
        || normalized.contains("RATE LIMIT")
        || normalized.contains("SERVICE QUOTA")
}

#[must_use]
pub fn is_throttling_error(error: &RelayError) -> bool {
    match error {
        RelayError::Model(message) => is_throttling_message(message),
        _ => false,
    }
}

/// Invoke the model, retrying exactly once after a fixed delay when the
/// failure classifies as throttling.
pub async fn converse_with_retry(
    llm: &dyn Llm,
    request: LlmRequest,
    retry: &ThrottleRetry,
) -> Result<LlmReply> {
    match llm.converse(request.clone()).await {
        Ok(reply) => Ok(reply),
        Err(error) if is_throttling_error(&error) => {
            warn!(
                delay_ms = retry.delay.as_millis() as u64,
                error = %error,
                "model invocation throttled; retrying once"
            );
            tokio::time::sleep(retry.delay).await;
            llm.converse(request).await
        }
        Err(error) => Err(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use relay_core::{StopReason, Turn};
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FlakyLlm {
        attempts: AtomicU32,
        failures: u32,
        error_message: &'static str,
    }

    impl FlakyLlm {
        fn new(failures: u32, error_message: &'static str) -> Self {
            Self { attempts: AtomicU32::new(0), failures, error_message }
        }
    }

    #[async_trait]
    impl Llm for FlakyLlm {
        fn name(&self) -> &str {
            "flaky"
        }

        async fn converse(&self, _request: LlmRequest) -> Result<LlmReply> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
            if attempt < self.failures {
                return Err(RelayError::Model(self.error_message.to_string()));
            }
            Ok(LlmReply::new(Turn::assistant().with_text("ok"), StopReason::EndTurn))
        }
    }

    fn immediate() -> ThrottleRetry {
        ThrottleRetry::default().with_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn retries_once_on_throttle() {
        let llm = FlakyLlm::new(1, "ThrottlingException: rate exceeded");
        let reply = converse_with_retry(&llm, LlmRequest::new("m", vec![]), &immediate())
            .await
            .expect("second attempt should succeed");
        assert_eq!(reply.message.joined_text(), "ok");
        assert_eq!(llm.attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn second_throttle_propagates_without_third_attempt() {
        let llm = FlakyLlm::new(5, "HTTP 429 too many requests");
        let error = converse_with_retry(&llm, LlmRequest::new("m", vec![]), &immediate())
            .await
            .expect_err("both attempts throttled");
        assert!(is_throttling_error(&error));
        assert_eq!(llm.attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn non_throttle_error_is_not_retried() {
        let llm = FlakyLlm::new(5, "HTTP 400 bad request");
        let error = converse_with_retry(&llm, LlmRequest::new("m", vec![]), &immediate())
            .await
            .expect_err("validation errors are fatal");
        assert!(matches!(error, RelayError::Model(_)));
        assert_eq!(llm.attempts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn throttling_classification() {
        assert!(is_throttling_message("ThrottlingException"));
        assert!(is_throttling_message("http 429"));
        assert!(is_throttling_message("Rate limit reached"));
        assert!(!is_throttling_message("HTTP 400 bad request"));
        assert!(!is_throttling_error(&RelayError::Tool("429".to_string())));
    }
}
