//! Chat delivery over the Slack `chat.postMessage` API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::NotificationConfig;
use crate::notify::{Notifier, NotifyError, RunEvent};

/// Wire body for `chat.postMessage`.
#[derive(Debug, Serialize)]
pub struct SlackMessage<'a> {
    pub channel: &'a str,
    pub text: String,
}

#[derive(Debug, Deserialize)]
struct SlackReply {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Posts every event as a message to one fixed channel.
pub struct SlackNotifier {
    client: reqwest::Client,
    api_url: String,
    token: String,
    channel: String,
}

impl SlackNotifier {
    pub fn new(client: reqwest::Client, config: &NotificationConfig) -> Self {
        Self {
            client,
            api_url: config.api_url.clone(),
            token: config.token.clone(),
            channel: config.channel.clone(),
        }
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    async fn send(&self, event: &RunEvent) -> Result<(), NotifyError> {
        let message = SlackMessage {
            channel: &self.channel,
            text: event.to_string(),
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.token)
            .json(&message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status(status.as_u16()));
        }

        // Slack answers 200 with `"ok": false` for most failures.
        match response.json::<SlackReply>().await {
            Ok(reply) if !reply.ok => Err(NotifyError::Rejected(
                reply.error.unwrap_or_else(|| "unknown".to_string()),
            )),
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::debug!(error = %e, "Notification reply was not JSON");
                Ok(())
            }
        }
    }
}
