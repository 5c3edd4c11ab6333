use std::fmt;

use crate::error::{NotifyError, Result};
use crate::pipeline::PipelineId;

pub const PUSHOVER_TOKEN_VAR: &str = "PUSHOVER_TOKEN";
pub const APILAYER_KEY_VAR: &str = "APILAYER_KEY";

/// Everything a pipeline run needs from its environment, read once at start.
#[derive(Clone)]
pub struct Config {
    pub pipeline: PipelineId,
    /// Pushover user or group key receiving the notification.
    pub recipient: String,
    pub pushover_token: String,
    /// Only present (and required) for the exchange-rate pipeline.
    pub apilayer_key: Option<String>,
}

impl Config {
    /// Load configuration for `pipeline` from the process environment.
    pub fn load(pipeline: PipelineId, recipient: Option<String>) -> Result<Self> {
        Self::from_lookup(pipeline, recipient, |name| std::env::var(name).ok())
    }

    /// Build configuration using `lookup` to resolve environment variables.
    ///
    /// Values are trimmed; a blank value counts as missing.
    pub fn from_lookup<F>(pipeline: PipelineId, recipient: Option<String>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let recipient = non_blank(recipient).ok_or_else(|| {
            NotifyError::Config(
                "Target user/group key was not supplied.\n\
                 Hint: pass the Pushover recipient key as the only argument."
                    .to_string(),
            )
        })?;

        let var = |name: &str| {
            non_blank(lookup(name)).ok_or_else(|| {
                NotifyError::Config(format!("Environment variable {name} was not set"))
            })
        };

        let pushover_token = var(PUSHOVER_TOKEN_VAR)?;
        let apilayer_key = if pipeline.required_env().contains(&APILAYER_KEY_VAR) {
            Some(var(APILAYER_KEY_VAR)?)
        } else {
            None
        };

        Ok(Self { pipeline, recipient, pushover_token, apilayer_key })
    }

    /// API key for the currency data service.
    pub fn apilayer_key(&self) -> Result<&str> {
        self.apilayer_key.as_deref().ok_or_else(|| {
            NotifyError::Config(format!("Environment variable {APILAYER_KEY_VAR} was not set"))
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("pipeline", &self.pipeline)
            .field("recipient", &self.recipient)
            .field("pushover_token", &"<redacted>")
            .field("apilayer_key", &self.apilayer_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
