use crate::{Message, MessageSink, SendContext, SinkError, SinkMetadata};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// A sink that just collects messages for testing with bounded storage
#[derive(Debug)]
pub struct CollectorSink {
    /// Bounded message queue
    messages: Arc<Mutex<VecDeque<Message>>>,
    /// Maximum number of messages to store
    max_messages: usize,
    fail_on_send: AtomicBool,
    fail_all_sends: AtomicBool,
    messages_sent: AtomicU64,
    messages_failed: AtomicU64,
    name: String,
}

impl CollectorSink {
    /// Create a new collector sink with default capacity
    pub fn new() -> Self {
        Self::with_capacity(1000)
    }

    pub fn with_capacity(max_messages: usize) -> Self {
        Self {
            messages: Arc::new(Mutex::new(VecDeque::with_capacity(max_messages))),
            max_messages,
            fail_on_send: AtomicBool::new(false),
            fail_all_sends: AtomicBool::new(false),
            messages_sent: AtomicU64::new(0),
            messages_failed: AtomicU64::new(0),
            name: "test-collector".to_string(),
        }
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        let mut sink = Self::new();
        sink.name = name.into();
        sink
    }

    /// Get all received messages
    pub fn received_messages(&self) -> Vec<Message> {
        self.messages.lock().unwrap().iter().cloned().collect()
    }

    pub fn message_count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    pub fn clear_messages(&self) {
        self.messages.lock().unwrap().clear();
    }

    /// Configure to fail on next send
    pub fn fail_next_send(&self) {
        self.fail_on_send.store(true, Ordering::Relaxed);
    }

    /// Configure every send to fail until reset
    pub fn fail_all_sends(&self, fail: bool) {
        self.fail_all_sends.store(fail, Ordering::Relaxed);
    }
}

impl Default for CollectorSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageSink for CollectorSink {
    async fn send(&self, message: Message) -> Result<(), SinkError> {
        if self.fail_on_send.swap(false, Ordering::Relaxed)
            || self.fail_all_sends.load(Ordering::Relaxed)
        {
            self.messages_failed.fetch_add(1, Ordering::Relaxed);
            let context = SendContext::new(message.size()).with_correlation_id(
                message
                    .correlation_id
                    .unwrap_or_else(|| "test".to_string()),
            );
            return Err(SinkError::send_failed_with_context(
                "Simulated failure",
                context,
            ));
        }

        // Drop oldest if at limit
        {
            let mut messages = self.messages.lock().unwrap();
            if messages.len() >= self.max_messages {
                messages.pop_front();
            }
            messages.push_back(message);
        }

        self.messages_sent.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn metadata(&self) -> SinkMetadata {
        SinkMetadata::new(self.name.clone(), "collector")
            .with_endpoint("memory://test")
            .with_counts(
                self.messages_sent.load(Ordering::Relaxed),
                self.messages_failed.load(Ordering::Relaxed),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_collector_records_and_fails_on_demand() {
        let sink = CollectorSink::with_name("alerts");
        sink.send(Message::new("one")).await.unwrap();

        sink.fail_next_send();
        assert!(sink.send(Message::new("two")).await.is_err());

        sink.send(Message::new("three")).await.unwrap();

        let texts: Vec<String> = sink
            .received_messages()
            .into_iter()
            .map(|m| m.text)
            .collect();
        assert_eq!(texts, vec!["one", "three"]);

        let metadata = sink.metadata();
        assert_eq!(metadata.name, "alerts");
        assert_eq!(metadata.messages_sent, 2);
        assert_eq!(metadata.messages_failed, 1);
    }

    #[tokio::test]
    async fn test_collector_bounded_capacity() {
        let sink = CollectorSink::with_capacity(2);
        for text in ["a", "b", "c"] {
            sink.send(Message::new(text)).await.unwrap();
        }
        assert_eq!(sink.message_count(), 2);
        assert_eq!(sink.received_messages()[0].text, "b");
    }
}
