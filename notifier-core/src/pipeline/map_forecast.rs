use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, info};

use crate::{
    discovery::{FORECAST_MAP_PAGE, FORECAST_MAP_REFERER, forecast_map_url},
    error::{NotifyError, Result},
    format::{capitalize_first, forecast_message},
    http::{FetchRequest, Fetcher},
    model::{DailyForecast, LocationForecast, OutboundMessage},
    pipeline::{Pipeline, PipelineId, decode, is_empty_body},
};

pub const DEFAULT_CITY: &str = "Zürich";

/// Today's forecast for one city, taken from the MeteoSwiss forecast map.
#[derive(Debug, Clone)]
pub struct MapForecastPipeline {
    city: String,
}

impl MapForecastPipeline {
    pub fn new(city: impl Into<String>) -> Self {
        Self { city: city.into() }
    }
}

impl Default for MapForecastPipeline {
    fn default() -> Self {
        Self::new(DEFAULT_CITY)
    }
}

/// First forecast day of the first location named exactly `city`.
pub fn select_today<'a>(locations: &'a [LocationForecast], city: &str) -> Result<&'a DailyForecast> {
    let location = locations
        .iter()
        .find(|loc| loc.city_name == city)
        .ok_or_else(|| NotifyError::Schema(format!("no forecast location named '{city}'")))?;

    location
        .forecasts
        .first()
        .ok_or_else(|| NotifyError::Schema(format!("forecast for '{city}' has no days")))
}

#[async_trait]
impl Pipeline for MapForecastPipeline {
    fn id(&self) -> PipelineId {
        PipelineId::MapForecast
    }

    async fn compose(
        &self,
        fetcher: &dyn Fetcher,
        today: NaiveDate,
    ) -> Result<Option<OutboundMessage>> {
        let page = fetcher.fetch(&FetchRequest::get(FORECAST_MAP_PAGE)).await?;
        let url = forecast_map_url(&String::from_utf8_lossy(&page), today)?;
        info!("Discovered forecast map {url}");

        let request = FetchRequest::post(url).header("Referer", FORECAST_MAP_REFERER);
        let body = fetcher.fetch(&request).await?;
        if is_empty_body(&body) {
            return Ok(None);
        }

        let locations: Vec<LocationForecast> = decode(&body, "forecast map location list")?;
        debug!("Forecast map lists {} locations", locations.len());

        let day = select_today(&locations, &self.city)?;
        let description = capitalize_first(&day.weather_description);

        Ok(Some(forecast_message(day.temp_low, day.temp_high, &description)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::testing::{StubFetcher, day};

    const HOME_PAGE: &str = r#"<html><head>
        <script src="/product/output/forecast-map/version__20240101_0830/en/bundle.js"></script>
        </head><body></body></html>"#;

    const MAP_URL: &str = "https://www.meteoswiss.admin.ch/product/output/forecast-map/version__20240102_0830/en/chmap_20240102.json";

    fn location(city: &str, high: i32, low: i32, description: &str) -> LocationForecast {
        LocationForecast {
            city_name: city.to_string(),
            location_name: city.to_string(),
            forecasts: vec![
                DailyForecast {
                    date: "2024-01-02".into(),
                    weekday: "Tue".into(),
                    weather_description: description.to_string(),
                    temp_high: high,
                    temp_low: low,
                    weather_symbol_id: 1,
                },
                DailyForecast {
                    date: "2024-01-03".into(),
                    weekday: "Wed".into(),
                    weather_description: "later".into(),
                    temp_high: 0,
                    temp_low: 0,
                    weather_symbol_id: 4,
                },
            ],
        }
    }

    #[test]
    fn city_selection_is_exact() {
        let locations = vec![location("Zurich", 1, 0, "ascii"), location("Zürich", 18, 9, "diacritic")];

        let today = select_today(&locations, "Zürich").unwrap();
        assert_eq!(today.weather_description, "diacritic");

        assert!(select_today(&locations, "zürich").is_err());
    }

    #[test]
    fn first_match_wins_and_takes_first_day() {
        let locations = vec![location("Zürich", 18, 9, "first"), location("Zürich", 20, 10, "second")];
        let today = select_today(&locations, "Zürich").unwrap();
        assert_eq!(today.weather_description, "first");
        assert_eq!(today.date, "2024-01-02");
    }

    #[test]
    fn missing_city_is_schema_error() {
        let locations = vec![location("Bern", 18, 9, "sunny")];
        let err = select_today(&locations, "Zürich").unwrap_err();
        assert!(matches!(err, NotifyError::Schema(_)));
    }

    #[test]
    fn city_without_days_is_schema_error() {
        let mut loc = location("Zürich", 18, 9, "sunny");
        loc.forecasts.clear();
        assert!(select_today(&[loc], "Zürich").is_err());
    }

    #[tokio::test]
    async fn compose_scrapes_then_posts_with_referer() {
        let body = r#"[
            {"city_name": "Bern", "altitude": 540, "forecasts": [
                {"weather_description": "fog", "temp_high": 5, "temp_low": 1}]},
            {"city_name": "Zürich", "coord_x": "683144", "min_zoom": 3, "forecasts": [
                {"date": "2024-01-02", "weekday": "Tue", "weather_description": "sunny, some clouds",
                 "temp_high": 18, "temp_low": 9, "weather_symbol_id": 2}]}
        ]"#;
        let fetcher = StubFetcher::default()
            .respond(FORECAST_MAP_PAGE, HOME_PAGE)
            .respond(MAP_URL, body);

        let msg = MapForecastPipeline::default()
            .compose(&fetcher, day(2024, 1, 2))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(msg.title, "Weather forecast");
        assert_eq!(msg.body, "9° - 18° Sunny, some clouds");

        let requests = fetcher.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, reqwest::Method::GET);
        assert_eq!(requests[1].method, reqwest::Method::POST);
        assert_eq!(
            requests[1].headers,
            vec![("Referer".to_string(), FORECAST_MAP_REFERER.to_string())]
        );
    }

    #[tokio::test]
    async fn compose_skips_entries_that_are_not_cities() {
        let body = r#"[
            {"name": "Säntis", "location_type": "peak"},
            {"city_name": "Zürich", "forecasts": [
                {"weather_description": "fog", "temp_high": 4, "temp_low": -1}]}
        ]"#;
        let fetcher = StubFetcher::default()
            .respond(FORECAST_MAP_PAGE, HOME_PAGE)
            .respond(MAP_URL, body);

        let msg = MapForecastPipeline::default()
            .compose(&fetcher, day(2024, 1, 2))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(msg.body, "-1° - 4° Fog");
    }

    #[tokio::test]
    async fn compose_stops_when_version_missing() {
        let fetcher = StubFetcher::default().respond(FORECAST_MAP_PAGE, "<html></html>");

        let err = MapForecastPipeline::default()
            .compose(&fetcher, day(2024, 1, 2))
            .await
            .unwrap_err();

        assert!(matches!(err, NotifyError::Discovery(_)));
        assert_eq!(fetcher.requests().len(), 1);
    }

    #[tokio::test]
    async fn compose_reports_nothing_on_empty_map() {
        let fetcher = StubFetcher::default()
            .respond(FORECAST_MAP_PAGE, HOME_PAGE)
            .respond(MAP_URL, Vec::new());

        let msg = MapForecastPipeline::default().compose(&fetcher, day(2024, 1, 2)).await.unwrap();
        assert!(msg.is_none());
    }

    #[tokio::test]
    async fn compose_rejects_non_list_envelope() {
        let fetcher = StubFetcher::default()
            .respond(FORECAST_MAP_PAGE, HOME_PAGE)
            .respond(MAP_URL, r#"{"city_name": "Zürich"}"#);

        let err = MapForecastPipeline::default()
            .compose(&fetcher, day(2024, 1, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, NotifyError::Schema(_)));
    }
}
