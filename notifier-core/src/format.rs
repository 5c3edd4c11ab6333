use crate::model::{OutboundMessage, RateRecord};

pub const RATE_TITLE: &str = "Exchange rate";
pub const FORECAST_TITLE: &str = "Weather forecast";

pub fn rate_message(rate: &RateRecord) -> OutboundMessage {
    let body = format!(
        "{} to {} is {:.3} ({:.3}% change)",
        rate.source, rate.target, rate.end_rate, rate.change_percent
    );
    OutboundMessage::new(RATE_TITLE, body)
}

/// Temperatures are rendered as given, so both integer and text
/// temperatures can be passed through.
pub fn forecast_message(
    low: impl std::fmt::Display,
    high: impl std::fmt::Display,
    description: &str,
) -> OutboundMessage {
    OutboundMessage::new(FORECAST_TITLE, format!("{low}° - {high}° {description}"))
}

/// Upper-case the first character (ASCII only), leaving the rest untouched.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(text.len());
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}
