//! Telegram Bot API sink
//!
//! Posts each alert to `sendMessage` with HTML parse mode and link previews
//! disabled. Without a bot token and chat id the sink is inert: sends succeed
//! without leaving the process, so a deployment without credentials still
//! completes its run.

use crate::{Message, MessageSink, SendContext, SinkError, SinkMetadata};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

#[derive(Clone)]
struct Credentials {
    bot_token: String,
    chat_id: String,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
    disable_web_page_preview: bool,
}

pub struct TelegramSink {
    client: reqwest::Client,
    api_base_url: String,
    credentials: Option<Credentials>,
    messages_sent: AtomicU64,
    messages_failed: AtomicU64,
}

impl std::fmt::Debug for TelegramSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramSink")
            .field("api_base_url", &self.api_base_url)
            .field("configured", &self.credentials.is_some())
            .finish()
    }
}

impl TelegramSink {
    /// Create a sink; either credential missing or blank makes it inert
    pub fn new(
        api_base_url: impl Into<String>,
        bot_token: Option<String>,
        chat_id: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SinkError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SinkError::InvalidConfig(format!("HTTP client: {}", e)))?;

        let credentials = match (bot_token, chat_id) {
            (Some(bot_token), Some(chat_id))
                if !bot_token.trim().is_empty() && !chat_id.trim().is_empty() =>
            {
                Some(Credentials { bot_token, chat_id })
            }
            _ => None,
        };

        Ok(Self {
            client,
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            credentials,
            messages_sent: AtomicU64::new(0),
            messages_failed: AtomicU64::new(0),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    fn send_message_url(&self, credentials: &Credentials) -> String {
        format!("{}/bot{}/sendMessage", self.api_base_url, credentials.bot_token)
    }
}

#[async_trait]
impl MessageSink for TelegramSink {
    async fn send(&self, message: Message) -> Result<(), SinkError> {
        let Some(credentials) = &self.credentials else {
            debug!(
                pair = message.correlation_id.as_deref().unwrap_or("-"),
                "Telegram credentials not set, skipping alert"
            );
            return Ok(());
        };

        let body = SendMessageRequest {
            chat_id: &credentials.chat_id,
            text: &message.text,
            parse_mode: "HTML",
            disable_web_page_preview: true,
        };

        let context = || {
            let context = SendContext::new(message.size()).with_target("telegram");
            match &message.correlation_id {
                Some(id) => context.with_correlation_id(id.clone()),
                None => context,
            }
        };

        let response = match self
            .client
            .post(self.send_message_url(credentials))
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                self.messages_failed.fetch_add(1, Ordering::Relaxed);
                return Err(SinkError::send_failed_with_context(
                    e.without_url().to_string(),
                    context(),
                ));
            }
        };

        let status = response.status();
        if !status.is_success() {
            self.messages_failed.fetch_add(1, Ordering::Relaxed);
            let body = response.text().await.unwrap_or_default();
            return Err(SinkError::Rejected {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        self.messages_sent.fetch_add(1, Ordering::Relaxed);
        debug!(
            pair = message.correlation_id.as_deref().unwrap_or("-"),
            "Alert delivered to Telegram"
        );
        Ok(())
    }

    fn metadata(&self) -> SinkMetadata {
        SinkMetadata::new("telegram", "telegram")
            .with_endpoint(self.api_base_url.clone())
            .with_delivers(self.is_configured())
            .with_counts(
                self.messages_sent.load(Ordering::Relaxed),
                self.messages_failed.load(Ordering::Relaxed),
            )
    }
}
