//! # Message Sinks
//!
//! Destinations for human-readable signal alerts. A run formats one
//! [`Message`] per emitted signal and hands the batch to a [`MessageSink`].
//!
//! Delivery is best effort: callers log a failed send and carry on, so no
//! sink error ever changes what a run computes or persists.
//!
//! ## Sinks
//!
//! - [`TelegramSink`]: Bot API `sendMessage` with HTML parse mode; a no-op
//!   when credentials are absent
//! - [`CollectorSink`](test_utils::CollectorSink): in-memory capture for tests

pub mod batch;
pub mod error;
pub mod message;
pub mod metadata;
pub mod sinks;
pub mod test_utils;

use async_trait::async_trait;
use std::fmt::Debug;

pub use batch::BatchResult;
pub use error::{SendContext, SinkError};
pub use message::{escape_html, AlertLabels, Message};
pub use metadata::SinkMetadata;
pub use sinks::TelegramSink;

/// A destination for alert messages
#[async_trait]
pub trait MessageSink: Send + Sync + Debug {
    /// Send a single message
    async fn send(&self, message: Message) -> Result<(), SinkError>;

    /// Send messages in order, returning partial results
    async fn send_batch(&self, messages: Vec<Message>) -> BatchResult {
        let mut result = BatchResult::new(messages.len());

        for (index, message) in messages.into_iter().enumerate() {
            match self.send(message).await {
                Ok(()) => result.record_success(),
                Err(e) => result.record_failure(index, e),
            }
        }

        result
    }

    /// Sink information for logging
    fn metadata(&self) -> SinkMetadata;
}
