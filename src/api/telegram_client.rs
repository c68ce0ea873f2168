use anyhow::{anyhow, Context, Result};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;
use url::Url;

use super::ReportNotifier;
use crate::models::Config;

/// Bot API reply; only the status fields are needed
#[derive(Debug, Deserialize)]
struct BotResponse {
    ok: bool,
    description: Option<String>,
}

/// Telegram bot client that uploads report files to one chat
pub struct TelegramClient {
    client: Client,
    api_url: Url,
    token: String,
    chat_id: String,
}

impl TelegramClient {
    pub fn new(config: &Config) -> Result<Self> {
        let (token, chat_id) = config.telegram_credentials()?;

        Ok(Self {
            client: Client::builder().user_agent("stock-screener/1.0").build()?,
            api_url: config.telegram_api_url.clone(),
            token: token.to_string(),
            chat_id: chat_id.to_string(),
        })
    }

    fn method_url(&self, method: &str) -> Result<Url> {
        // Leading "./" keeps the token's colon from parsing as a URL scheme
        Ok(self.api_url.join(&format!("./bot{}/{}", self.token, method))?)
    }

    /// Upload `path` as multipart field `field` through the bot API `method`
    async fn upload(&self, method: &str, field: &str, path: &Path) -> Result<()> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("read {}", path.display()))?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(field)
            .to_string();

        let form = Form::new()
            .text("chat_id", self.chat_id.clone())
            .part(field.to_string(), Part::bytes(bytes).file_name(file_name));

        // The URL embeds the bot token, keep it out of the logs
        debug!("Calling Telegram {} with {}", method, path.display());
        let response = self
            .client
            .post(self.method_url(method)?)
            .multipart(form)
            .send()
            .await
            .map_err(|e| anyhow!("Telegram {} request failed: {}", method, e.without_url()))?;

        let status = response.status();
        let reply: BotResponse = response
            .json()
            .await
            .with_context(|| format!("parse Telegram {} response ({})", method, status))?;

        if !reply.ok {
            return Err(anyhow!(
                "Telegram {} failed with status {}: {}",
                method,
                status,
                reply.description.unwrap_or_default()
            ));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ReportNotifier for TelegramClient {
    async fn send_document(&self, path: &Path) -> Result<()> {
        self.upload("sendDocument", "document", path).await
    }

    async fn send_photo(&self, path: &Path) -> Result<()> {
        self.upload("sendPhoto", "photo", path).await
    }
}
