//! In-memory collaborators for exercising pipelines without a network.

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
    error::{NotifyError, Result},
    http::{FetchRequest, Fetcher},
    model::OutboundMessage,
    notify::Notifier,
};

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Serves canned bodies by URL and records every request it sees.
#[derive(Debug, Default)]
pub struct StubFetcher {
    bodies: HashMap<String, Option<Vec<u8>>>,
    requests: Mutex<Vec<FetchRequest>>,
}

impl StubFetcher {
    pub fn respond(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.bodies.insert(url.to_string(), Some(body.into()));
        self
    }

    /// Make requests to `url` fail at the transport level.
    pub fn fail(mut self, url: &str) -> Self {
        self.bodies.insert(url.to_string(), None);
        self
    }

    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<Vec<u8>> {
        self.requests.lock().expect("requests lock").push(request.clone());

        match self.bodies.get(&request.url) {
            Some(Some(body)) => Ok(body.clone()),
            Some(None) => Err(NotifyError::transport(&request.url, "connection refused")),
            None => Err(NotifyError::transport(&request.url, "no stubbed response")),
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<OutboundMessage>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().expect("sent lock").clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, message: &OutboundMessage) -> Result<()> {
        if self.fail {
            return Err(NotifyError::Delivery("application token is invalid".to_string()));
        }
        self.sent.lock().expect("sent lock").push(message.clone());
        Ok(())
    }
}
