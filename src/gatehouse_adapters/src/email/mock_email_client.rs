use std::sync::Arc;

use gatehouse_core::{Email, EmailClient};
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub recipient: String,
    pub subject: String,
    pub content: String,
}

impl SentEmail {
    /// The token carried by a verification or reset message (its last line).
    pub fn token(&self) -> Option<&str> {
        self.content.lines().rev().find(|line| !line.trim().is_empty())
    }
}

/// Keeps sent messages in memory instead of delivering them.
#[derive(Debug, Clone, Default)]
pub struct MockEmailClient {
    sent: Arc<RwLock<Vec<SentEmail>>>,
}

impl MockEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.read().await.clone()
    }

    /// The most recent message sent to `recipient`.
    pub async fn last_sent_to(&self, recipient: &str) -> Option<SentEmail> {
        self.sent
            .read()
            .await
            .iter()
            .rev()
            .find(|email| email.recipient == recipient)
            .cloned()
    }
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    #[tracing::instrument(name = "Recording email", skip(self, content))]
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        self.sent.write().await.push(SentEmail {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            content: content.to_string(),
        });
        Ok(())
    }
}
