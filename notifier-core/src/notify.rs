use std::fmt::Debug;

use async_trait::async_trait;
use log::info;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::{NotifyError, Result},
    http::{REQUEST_TIMEOUT, truncate_body},
    model::OutboundMessage,
};

const PUSHOVER_MESSAGES_URL: &str = "https://api.pushover.net/1/messages.json";

/// Push delivery capability.
#[async_trait]
pub trait Notifier: Send + Sync + Debug {
    async fn send(&self, message: &OutboundMessage) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct PushoverNotifier {
    token: String,
    recipient: String,
    http: Client,
}

impl PushoverNotifier {
    pub fn new(token: String, recipient: String) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| NotifyError::Delivery(format!("could not build HTTP client: {e}")))?;
        Ok(Self { token, recipient, http })
    }
}

#[derive(Debug, Deserialize)]
struct PushoverResponse {
    status: i64,
    #[serde(default)]
    request: String,
    #[serde(default)]
    errors: Vec<String>,
}

#[async_trait]
impl Notifier for PushoverNotifier {
    async fn send(&self, message: &OutboundMessage) -> Result<()> {
        let res = self
            .http
            .post(PUSHOVER_MESSAGES_URL)
            .form(&[
                ("token", self.token.as_str()),
                ("user", self.recipient.as_str()),
                ("title", message.title.as_str()),
                ("message", message.body.as_str()),
            ])
            .send()
            .await
            .map_err(|e| NotifyError::Delivery(format!("request to Pushover failed: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| NotifyError::Delivery(format!("could not read Pushover response: {e}")))?;

        let parsed = check_response(status.is_success(), &body).map_err(|reason| {
            NotifyError::Delivery(format!("Pushover rejected the message ({status}): {reason}"))
        })?;

        info!("Delivered '{}' (request {})", message.title, parsed.request);
        Ok(())
    }
}

fn check_response(success: bool, body: &str) -> std::result::Result<PushoverResponse, String> {
    let parsed: PushoverResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(_) => return Err(truncate_body(body)),
    };

    if !success || parsed.status != 1 {
        if parsed.errors.is_empty() {
            return Err(truncate_body(body));
        }
        return Err(parsed.errors.join("; "));
    }

    Ok(parsed)
}
