use async_trait::async_trait;
use relay_core::{Llm, LlmReply, LlmRequest, RelayError, Result};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Scripted model for tests.
///
/// Replies (or errors) are served in the order they were queued, and
/// every incoming request is recorded so tests can assert on invocation
/// counts and transcript contents. Running past the end of the script
/// is a `Model` error.
pub struct MockLlm {
    name: String,
    script: Mutex<VecDeque<Result<LlmReply>>>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlm {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_reply(self, reply: LlmReply) -> Self {
        self.script.lock().unwrap().push_back(Ok(reply));
        self
    }

    pub fn with_error(self, error: RelayError) -> Self {
        self.script.lock().unwrap().push_back(Err(error));
        self
    }

    /// Number of `converse` invocations seen so far.
    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// All recorded requests, in invocation order.
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Llm for MockLlm {
    fn name(&self) -> &str {
        &self.name
    }

    async fn converse(&self, request: LlmRequest) -> Result<LlmReply> {
        self.requests.lock().unwrap().push(request);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RelayError::Model("mock script exhausted".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_core::{StopReason, Turn};

    #[tokio::test]
    async fn serves_replies_in_order_and_records_requests() {
        let mock = MockLlm::new("test")
            .with_reply(LlmReply::new(Turn::assistant().with_text("first"), StopReason::EndTurn))
            .with_reply(LlmReply::new(Turn::assistant().with_text("second"), StopReason::EndTurn));

        let r1 = mock.converse(LlmRequest::new("m", vec![Turn::user().with_text("a")])).await;
        let r2 = mock.converse(LlmRequest::new("m", vec![])).await;

        assert_eq!(r1.unwrap().message.joined_text(), "first");
        assert_eq!(r2.unwrap().message.joined_text(), "second");
        assert_eq!(mock.calls(), 2);
        assert_eq!(mock.requests()[0].transcript.len(), 1);
    }

    #[tokio::test]
    async fn exhausted_script_is_an_error() {
        let mock = MockLlm::new("test");
        let err = mock.converse(LlmRequest::new("m", vec![])).await.unwrap_err();
        assert!(matches!(err, RelayError::Model(_)));
    }
}
