use super::types::{FeishuMessage, FeishuResponse};
use crate::config::Config;
use crate::errors::DeliveryError;
use crate::security::signature;
use crate::tasks::relay::Notifier;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use std::time::Duration;

pub const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts messages to a Feishu/Lark custom-bot webhook.
pub struct FeishuClient {
    client: Client,
    webhook_url: Option<String>,
    secret: Option<String>,
}

impl FeishuClient {
    pub fn new(config: &Config) -> Result<Self, DeliveryError> {
        let client = Client::builder().timeout(WEBHOOK_TIMEOUT).build()?;

        Ok(Self {
            client,
            webhook_url: config.webhook_url.clone(),
            secret: config.webhook_secret.clone(),
        })
    }

    pub async fn send_message(&self, message: &FeishuMessage) -> Result<(), DeliveryError> {
        self.send_message_at(message, signature::current_timestamp())
            .await
    }

    /// Send `message`, signing it for `timestamp` when a secret is configured.
    pub async fn send_message_at(
        &self,
        message: &FeishuMessage,
        timestamp: i64,
    ) -> Result<(), DeliveryError> {
        let url = self
            .webhook_url
            .as_deref()
            .ok_or(DeliveryError::NotConfigured)?;

        let headers = self.headers(timestamp)?;
        if let Ok(payload) = serde_json::to_string_pretty(message) {
            tracing::debug!("Sending: {payload}");
        }

        let response = self
            .client
            .post(url)
            .headers(headers)
            .json(message)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!("Response: {} - {}", status.as_u16(), body);

        check_response(status, &body)
    }

    fn headers(&self, timestamp: i64) -> Result<HeaderMap, DeliveryError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(sign) = signature::sign(self.secret.as_deref(), timestamp) {
            let value = signature::signature_header(timestamp, &sign);
            tracing::debug!("Signature: {value}");
            // from_static only accepts the lowercase spelling of SIGNATURE_HEADER
            headers.insert(
                HeaderName::from_static("x-lark-signature"),
                HeaderValue::from_str(&value)?,
            );
        }

        Ok(headers)
    }
}

/// Success is HTTP 200 with a JSON body whose `code` is 0.
pub fn check_response(status: StatusCode, body: &str) -> Result<(), DeliveryError> {
    if status != StatusCode::OK {
        return Err(DeliveryError::HttpStatus {
            status: status.as_u16(),
            body: body.to_string(),
        });
    }

    let parsed: FeishuResponse =
        serde_json::from_str(body).map_err(|source| DeliveryError::InvalidResponse {
            body: body.to_string(),
            source,
        })?;

    if parsed.is_ok() {
        Ok(())
    } else {
        Err(DeliveryError::Api {
            code: parsed.code,
            body: body.to_string(),
        })
    }
}

impl Notifier for FeishuClient {
    async fn deliver(&self, title: &str, link: &str, published: &str) -> Result<(), DeliveryError> {
        let message = FeishuMessage::status_update(title, link, published);

        match self.send_message(&message).await {
            Ok(()) => {
                tracing::info!("✅ Feishu message sent: {title}");
                Ok(())
            }
            Err(e) => {
                tracing::error!("❌ {e}");
                Err(e)
            }
        }
    }
}
