use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::services::notifier::{Notifier, NotifyError};

/// Identity returned by `/users/@me` for the bot token
#[derive(Debug, Clone, Deserialize)]
pub struct BotUser {
    pub id: String,
    pub username: String,
}

#[derive(Serialize)]
struct CreateMessage<'a> {
    content: &'a str,
}

/// Discord client with an explicit session lifecycle.
///
/// `connect` validates the token and must succeed before any message is
/// sent; `disconnect` closes the session.
pub struct DiscordNotifier {
    base_url: String,
    token: String,
    client: reqwest::Client,
    session: RwLock<Option<BotUser>>,
}

impl DiscordNotifier {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(base_url, token, reqwest::Client::new())
    }

    pub fn with_client(
        base_url: impl Into<String>,
        token: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            client,
            session: RwLock::new(None),
        }
    }

    fn auth_header(&self) -> String {
        format!("Bot {}", self.token)
    }

    /// Authenticate the bot token and open a session
    pub async fn connect(&self) -> Result<BotUser, NotifyError> {
        let response = self
            .client
            .get(format!("{}/users/@me", self.base_url))
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(NotifyError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let user: BotUser = response.json().await?;
        info!(user = %user.username, id = %user.id, "Logged in as {}", user.username);

        *self.session.write().await = Some(user.clone());
        Ok(user)
    }

    /// Close the session; further sends fail until `connect` is called again
    pub async fn disconnect(&self) {
        if let Some(user) = self.session.write().await.take() {
            info!(user = %user.username, "Discord session closed");
        }
    }

    pub async fn is_connected(&self) -> bool {
        self.session.read().await.is_some()
    }
}

#[async_trait::async_trait]
impl Notifier for DiscordNotifier {
    async fn send_message(&self, channel_id: u64, text: &str) -> Result<(), NotifyError> {
        if !self.is_connected().await {
            return Err(NotifyError::NotConnected);
        }

        let response = self
            .client
            .post(format!("{}/channels/{}/messages", self.base_url, channel_id))
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .json(&CreateMessage { content: text })
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(NotifyError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!(channel_id = channel_id, "message delivered");
        Ok(())
    }
}
