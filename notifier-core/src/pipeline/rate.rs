use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use log::{info, warn};
use reqwest::Url;
use serde::Deserialize;

use crate::{
    error::{NotifyError, Result},
    format::rate_message,
    http::{FetchRequest, Fetcher},
    model::{OutboundMessage, RateRecord},
    pipeline::{Pipeline, PipelineId, decode, is_empty_body},
};

pub const CURRENCY_CHANGE_URL: &str = "https://api.apilayer.com/currency_data/change";

/// Day-over-day change of one currency pair from the apilayer currency data API.
#[derive(Debug, Clone)]
pub struct RatePipeline {
    api_key: String,
    source: String,
    target: String,
}

impl RatePipeline {
    /// CHF to AUD.
    pub fn new(api_key: String) -> Self {
        Self::with_currencies(api_key, "CHF", "AUD")
    }

    pub fn with_currencies(api_key: String, source: &str, target: &str) -> Self {
        Self {
            api_key,
            source: source.to_uppercase(),
            target: target.to_uppercase(),
        }
    }

    /// Change endpoint for the range yesterday..=today.
    pub fn rate_url(&self, today: NaiveDate) -> Result<String> {
        let yesterday = today
            .checked_sub_days(Days::new(1))
            .ok_or_else(|| NotifyError::Config(format!("no calendar day before {today}")))?;

        let url = Url::parse_with_params(
            CURRENCY_CHANGE_URL,
            &[
                ("start_date", yesterday.format("%Y-%m-%d").to_string()),
                ("end_date", today.format("%Y-%m-%d").to_string()),
                ("currencies", self.target.clone()),
                ("source", self.source.clone()),
            ],
        )
        .map_err(|e| NotifyError::Config(format!("invalid currency change URL: {e}")))?;

        Ok(url.into())
    }
}

#[derive(Debug, Deserialize)]
struct ChangeResponse {
    success: Option<bool>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    quotes: Option<HashMap<String, QuoteChange>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: Option<i64>,
    info: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QuoteChange {
    #[serde(default)]
    start_rate: f64,
    end_rate: f64,
    #[serde(default)]
    change: f64,
    change_pct: f64,
}

/// Decode a change response and pick the `source`→`target` quote.
pub fn decode_rate(body: &[u8], source: &str, target: &str) -> Result<RateRecord> {
    let parsed: ChangeResponse = decode(body, "currency change response")?;

    if parsed.success == Some(false) {
        let (code, info) = parsed
            .error
            .map(|e| (e.code.unwrap_or_default(), e.info.unwrap_or_default()))
            .unwrap_or_default();
        return Err(NotifyError::Schema(format!(
            "currency change request unsuccessful (code {code}): {info}"
        )));
    }

    let pair = format!("{source}{target}");
    let quote = parsed
        .quotes
        .and_then(|mut quotes| quotes.remove(&pair))
        .ok_or_else(|| NotifyError::Schema(format!("quotes.{pair} missing from response")))?;

    if let (Some(start), Some(end)) = (parsed.start_date, parsed.end_date) {
        if start.checked_add_days(Days::new(1)) != Some(end) {
            warn!("{pair} change spans {start}..{end}, expected consecutive days");
        }
    }

    Ok(RateRecord {
        source: source.to_string(),
        target: target.to_string(),
        start_date: parsed.start_date,
        end_date: parsed.end_date,
        start_rate: quote.start_rate,
        end_rate: quote.end_rate,
        change_absolute: quote.change,
        change_percent: quote.change_pct,
    })
}

#[async_trait]
impl Pipeline for RatePipeline {
    fn id(&self) -> PipelineId {
        PipelineId::Rate
    }

    async fn compose(
        &self,
        fetcher: &dyn Fetcher,
        today: NaiveDate,
    ) -> Result<Option<OutboundMessage>> {
        let url = self.rate_url(today)?;
        info!("Fetching {}→{} change for {today}", self.source, self.target);

        let request = FetchRequest::get(url).header("apikey", self.api_key.as_str());
        let body = fetcher.fetch(&request).await?;
        if is_empty_body(&body) {
            return Ok(None);
        }

        let rate = decode_rate(&body, &self.source, &self.target)?;
        Ok(Some(rate_message(&rate)))
    }
}
