use async_trait::async_trait;
use chrono::NaiveDate;
use log::info;

use crate::{
    discovery::{WEATHER_PILL_VERSIONS, weather_pill_url},
    error::{NotifyError, Result},
    format::forecast_message,
    http::{FetchRequest, Fetcher},
    model::{CompactForecast, OutboundMessage},
    pipeline::{Pipeline, PipelineId, decode, is_empty_body},
    weather_code,
};

/// Zürich, postal code 8001.
pub const ZURICH_RESOURCE_ID: &str = "800100";

/// Today's forecast from the compact MeteoSwiss "weather pill" product.
#[derive(Debug, Clone)]
pub struct PillForecastPipeline {
    resource_id: String,
}

impl PillForecastPipeline {
    pub fn new(resource_id: impl Into<String>) -> Self {
        Self { resource_id: resource_id.into() }
    }
}

impl Default for PillForecastPipeline {
    fn default() -> Self {
        Self::new(ZURICH_RESOURCE_ID)
    }
}

/// Resolve the forecast's weather symbol to its phrase.
pub fn describe_forecast(forecast: &CompactForecast) -> Result<&'static str> {
    let raw = forecast.weather_symbol_id.trim();
    let code: i64 = raw.parse().map_err(|_| NotifyError::Format {
        field: "weather_symbol_id",
        value: forecast.weather_symbol_id.clone(),
    })?;

    Ok(weather_code::describe(code))
}

pub fn pill_message(forecast: &CompactForecast) -> Result<OutboundMessage> {
    let description = describe_forecast(forecast)?;
    Ok(forecast_message(
        forecast.temp_low.trim(),
        forecast.temp_high.trim(),
        description,
    ))
}

#[async_trait]
impl Pipeline for PillForecastPipeline {
    fn id(&self) -> PipelineId {
        PipelineId::PillForecast
    }

    async fn compose(
        &self,
        fetcher: &dyn Fetcher,
        _today: NaiveDate,
    ) -> Result<Option<OutboundMessage>> {
        let pointer = fetcher.fetch(&FetchRequest::get(WEATHER_PILL_VERSIONS)).await?;
        let url = weather_pill_url(&pointer, &self.resource_id)?;
        info!("Discovered weather pill {url}");

        let body = fetcher.fetch(&FetchRequest::get(url)).await?;
        if is_empty_body(&body) {
            return Ok(None);
        }

        let forecast: CompactForecast = decode(&body, "weather pill forecast")?;
        pill_message(&forecast).map(Some)
    }
}
