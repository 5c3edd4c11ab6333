//! Derivation of versioned MeteoSwiss resource URLs.
//!
//! Upstream publishes its forecast products under directories that change
//! several times a day. Two entry points expose the current version: the
//! home page embeds it in script paths, and the weather pill product serves a
//! small JSON pointer. Both derivations here are pure functions of the
//! fetched bytes so they can be exercised without a network.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Deserialize;

use crate::error::{NotifyError, Result};

pub const METEOSWISS_BASE: &str = "https://www.meteoswiss.admin.ch";
pub const FORECAST_MAP_PAGE: &str = "https://www.meteoswiss.admin.ch/home.html";
pub const FORECAST_MAP_REFERER: &str = "https://www.meteoswiss.admin.ch/home.html?tab=overview";
pub const WEATHER_PILL_VERSIONS: &str =
    "https://www.meteoswiss.admin.ch/product/output/weather-pill/versions.json";

/// Matches e.g. `product/output/forecast-map/version__20220907_2014`,
/// capturing the time token `2014`.
static FORECAST_MAP_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"product/output/forecast-map/version__\d{8}_(\d{4})")
        .expect("forecast map version pattern is valid")
});

/// Extract the 4-digit time token of the forecast map version. The page must
/// reference the version exactly once.
pub fn forecast_map_time_token(content: &str) -> Result<&str> {
    let mut tokens = FORECAST_MAP_VERSION
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()));

    match (tokens.next(), tokens.next()) {
        (Some(token), None) => Ok(token),
        (None, _) => Err(NotifyError::Discovery(
            "forecast map version not referenced in page".to_string(),
        )),
        (Some(_), Some(_)) => {
            let count = 2 + tokens.count();
            Err(NotifyError::Discovery(format!(
                "forecast map version referenced {count} times, expected exactly once"
            )))
        }
    }
}

/// Build the dated forecast map URL from the scraped page.
///
/// `today` must be the calendar day upstream uses for its directory names.
pub fn forecast_map_url(content: &str, today: NaiveDate) -> Result<String> {
    let token = forecast_map_time_token(content)?;
    let day = today.format("%Y%m%d");

    Ok(format!(
        "{METEOSWISS_BASE}/product/output/forecast-map/version__{day}_{token}/en/chmap_{day}.json"
    ))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VersionPointer {
    current_version_directory: Option<String>,
}

/// Read the current version directory out of the weather pill pointer.
pub fn weather_pill_version(pointer: &[u8]) -> Result<String> {
    let parsed: VersionPointer = serde_json::from_slice(pointer).map_err(|e| {
        NotifyError::Discovery(format!("weather pill versions pointer is not valid JSON: {e}"))
    })?;

    parsed
        .current_version_directory
        .map(|dir| dir.trim().trim_matches('/').to_string())
        .filter(|dir| !dir.is_empty())
        .ok_or_else(|| {
            NotifyError::Discovery(
                "weather pill versions pointer has no currentVersionDirectory".to_string(),
            )
        })
}

/// Build the weather pill resource URL for `resource_id` (postal code plus
/// two-digit suffix, e.g. `800100`).
pub fn weather_pill_url(pointer: &[u8], resource_id: &str) -> Result<String> {
    let dir = weather_pill_version(pointer)?;

    Ok(format!(
        "{METEOSWISS_BASE}/product/output/weather-pill/{dir}/en/{resource_id}.json"
    ))
}
