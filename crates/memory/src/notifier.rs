use std::sync::Mutex;

use async_trait::async_trait;

use dropgate_coordinator::{BackendError, Notifier, PublishReceipt};

use crate::failure::FailureSwitch;

/// A message captured by [`MemoryNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMessage {
    pub message_id: String,
    pub topic: String,
    pub message: String,
}

/// In-memory [`Notifier`] that records every published message.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    published: Mutex<Vec<PublishedMessage>>,
    failure: FailureSwitch,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent publish and health check fail with `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        self.failure.set(Some(message.into()));
    }

    pub fn recover(&self) {
        self.failure.set(None);
    }

    /// Messages published so far, oldest first.
    pub fn published(&self) -> Vec<PublishedMessage> {
        self.published
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Messages published to `topic`.
    pub fn messages_for(&self, topic: &str) -> Vec<String> {
        self.published()
            .into_iter()
            .filter(|m| m.topic == topic)
            .map(|m| m.message)
            .collect()
    }
}

#[async_trait]
impl Notifier for MemoryNotifier {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "memory"
    }

    async fn publish(&self, topic: &str, message: &str) -> Result<PublishReceipt, BackendError> {
        self.failure.check()?;

        let mut published = self
            .published
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let message_id = format!("msg-{}", published.len() + 1);
        published.push(PublishedMessage {
            message_id: message_id.clone(),
            topic: topic.to_owned(),
            message: message.to_owned(),
        });
        Ok(PublishReceipt::new(message_id))
    }

    async fn health_check(&self) -> Result<(), BackendError> {
        self.failure.check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_assigns_sequential_ids() {
        let notifier = MemoryNotifier::new();
        let first = notifier.publish("topic", "one").await.unwrap();
        let second = notifier.publish("topic", "two").await.unwrap();

        assert_eq!(first.message_id, "msg-1");
        assert_eq!(second.message_id, "msg-2");
        assert_eq!(notifier.messages_for("topic"), vec!["one", "two"]);
        assert!(notifier.messages_for("elsewhere").is_empty());
    }

    #[tokio::test]
    async fn failing_notifier_publishes_nothing() {
        let notifier = MemoryNotifier::new();
        notifier.fail_with("topic does not exist");
        assert!(notifier.publish("topic", "one").await.is_err());
        assert!(notifier.published().is_empty());
        assert!(notifier.health_check().await.is_err());
    }
}
