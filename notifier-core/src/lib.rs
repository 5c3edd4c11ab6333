//! Core library for the `notifier` CLI.
//!
//! This crate defines:
//! - Environment-based configuration
//! - Discovery of versioned upstream resource URLs
//! - Decoding of exchange-rate and forecast payloads into shared models
//! - The weather-symbol lookup table
//! - Transport and push-delivery abstractions, and the pipelines tying them together
//!
//! It is used by `notifier-cli`, but can also be driven by other binaries or services.

pub mod config;
pub mod discovery;
pub mod error;
pub mod format;
pub mod http;
pub mod model;
pub mod notify;
pub mod pipeline;
pub mod weather_code;

pub use config::Config;
pub use error::{NotifyError, Result};
pub use http::{FetchRequest, Fetcher, HttpFetcher};
pub use model::{CompactForecast, DailyForecast, LocationForecast, OutboundMessage, RateRecord};
pub use notify::{Notifier, PushoverNotifier};
pub use pipeline::{Pipeline, PipelineId, RunOutcome};
