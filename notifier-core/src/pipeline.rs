use crate::{
    Config,
    error::{NotifyError, Result},
    http::Fetcher,
    model::OutboundMessage,
    notify::Notifier,
    pipeline::{
        map_forecast::MapForecastPipeline, pill_forecast::PillForecastPipeline, rate::RatePipeline,
    },
};
use async_trait::async_trait;
use chrono::NaiveDate;
use log::{info, warn};
use serde::de::DeserializeOwned;
use std::fmt::Debug;

pub mod map_forecast;
pub mod pill_forecast;
pub mod rate;

#[cfg(test)]
pub(crate) mod testing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineId {
    Rate,
    MapForecast,
    PillForecast,
}

impl PipelineId {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineId::Rate => "rate",
            PipelineId::MapForecast => "map-forecast",
            PipelineId::PillForecast => "pill-forecast",
        }
    }

    pub const fn all() -> &'static [PipelineId] {
        &[PipelineId::Rate, PipelineId::MapForecast, PipelineId::PillForecast]
    }

    /// Environment variables that must be set before the pipeline may run.
    pub fn required_env(&self) -> &'static [&'static str] {
        use crate::config::{APILAYER_KEY_VAR, PUSHOVER_TOKEN_VAR};

        match self {
            PipelineId::Rate => &[APILAYER_KEY_VAR, PUSHOVER_TOKEN_VAR],
            PipelineId::MapForecast | PipelineId::PillForecast => &[PUSHOVER_TOKEN_VAR],
        }
    }
}

impl std::fmt::Display for PipelineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One notifier: discovers its data source, fetches and decodes it and turns
/// it into a message.
#[async_trait]
pub trait Pipeline: Send + Sync + Debug {
    fn id(&self) -> PipelineId;

    /// Returns `None` when upstream answered with an empty body.
    async fn compose(
        &self,
        fetcher: &dyn Fetcher,
        today: NaiveDate,
    ) -> Result<Option<OutboundMessage>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Delivered(OutboundMessage),
    NothingToReport,
}

/// Compose the pipeline's message and hand it to `notifier`.
///
/// The notifier is called at most once, and only after a message was
/// composed in full.
pub async fn run(
    pipeline: &dyn Pipeline,
    fetcher: &dyn Fetcher,
    notifier: &dyn Notifier,
    today: NaiveDate,
) -> Result<RunOutcome> {
    info!("Running {} pipeline for {today}", pipeline.id());

    let Some(message) = pipeline.compose(fetcher, today).await? else {
        warn!("{}: upstream returned no data, nothing to report", pipeline.id());
        return Ok(RunOutcome::NothingToReport);
    };

    info!("{}: {}", message.title, message.body);
    notifier.send(&message).await?;

    Ok(RunOutcome::Delivered(message))
}

/// Construct the pipeline selected in `config`.
pub fn pipeline_from_config(config: &Config) -> Result<Box<dyn Pipeline>> {
    let boxed: Box<dyn Pipeline> = match config.pipeline {
        PipelineId::Rate => Box::new(RatePipeline::new(config.apilayer_key()?.to_owned())),
        PipelineId::MapForecast => Box::new(MapForecastPipeline::default()),
        PipelineId::PillForecast => Box::new(PillForecastPipeline::default()),
    };

    Ok(boxed)
}

/// Whether a primary response carries nothing worth decoding.
pub(crate) fn is_empty_body(body: &[u8]) -> bool {
    body.iter().all(u8::is_ascii_whitespace)
}

pub(crate) fn decode<T: DeserializeOwned>(body: &[u8], what: &str) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| NotifyError::schema(what, e))
}
