use crate::domain::models::notification::NotificationChannel;
use crate::domain::ports::SmsGateway;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::error;

pub struct HttpSmsService {
    client: Client,
    api_url: String,
    api_key: String,
}

impl HttpSmsService {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
        }
    }
}

#[derive(Serialize)]
struct MessagePayload {
    to: String,
    channel: NotificationChannel,
    body: String,
}

#[async_trait]
impl SmsGateway for HttpSmsService {
    async fn send(&self, recipient: &str, channel: NotificationChannel, message: &str) -> Result<(), AppError> {
        let payload = MessagePayload {
            to: recipient.to_string(),
            channel,
            body: message.to_string(),
        };

        let res = self.client.post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                let msg = format!("SMS gateway connection error: {}", e);
                error!("{}", msg);
                AppError::InternalWithMsg(msg)
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            let msg = format!("SMS gateway failed. Status: {}, Body: {}", status, text);
            error!("{}", msg);
            return Err(AppError::InternalWithMsg(msg));
        }

        Ok(())
    }
}
