//! # relay-model
//!
//! Model integrations for Relay agents.
//!
//! The [`bedrock`] module provides an Amazon Bedrock client backed by
//! the AWS SDK Converse API (enabled by the default `bedrock` feature).
//! [`mock`] provides a scripted model for driving the orchestration
//! loop in tests, and [`retry`] the fixed-delay throttle-retry policy
//! applied around every model invocation.

#[cfg(feature = "bedrock")]
pub mod bedrock;
pub mod mock;
pub mod retry;

pub use mock::MockLlm;
pub use retry::{ThrottleRetry, converse_with_retry, is_throttling_error, is_throttling_message};
