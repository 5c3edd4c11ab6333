use chrono::NaiveDate;
use serde::Deserialize;

/// One currency-pair change observation between two consecutive days.
#[derive(Debug, Clone, PartialEq)]
pub struct RateRecord {
    pub source: String,
    pub target: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_rate: f64,
    pub end_rate: f64,
    pub change_absolute: f64,
    /// Taken verbatim from upstream.
    pub change_percent: f64,
}

/// A single day of a location forecast, as served by the forecast map.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DailyForecast {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub weekday: String,
    pub weather_description: String,
    pub temp_high: i32,
    pub temp_low: i32,
    #[serde(default)]
    pub weather_symbol_id: i32,
}

/// One entry of the forecast map's location list. Days are chronological,
/// the first one being today.
///
/// The list also carries entries that are not cities (peaks, regions); those
/// decode with an empty name and no days.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocationForecast {
    #[serde(default)]
    pub city_name: String,
    #[serde(default)]
    pub location_name: String,
    #[serde(default)]
    pub forecasts: Vec<DailyForecast>,
}

/// Single-location forecast whose fields arrive as text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CompactForecast {
    pub temp_high: String,
    pub temp_low: String,
    pub weather_symbol_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub title: String,
    pub body: String,
}

impl OutboundMessage {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self { title: title.into(), body: body.into() }
    }
}
