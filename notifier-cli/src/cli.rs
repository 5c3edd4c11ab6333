use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use log::info;
use notifier_core::{
    Config, HttpFetcher, PipelineId, PushoverNotifier, RunOutcome,
    pipeline::{pipeline_from_config, run},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "notifier",
    version,
    about = "Push exchange-rate and weather notifications via Pushover",
    after_help = "Environment: PUSHOVER_TOKEN (all), APILAYER_KEY (rate)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Notify the day-over-day CHF to AUD exchange-rate change.
    Rate {
        /// Pushover user or group key.
        recipient: Option<String>,
    },

    /// Notify today's Zürich forecast from the MeteoSwiss forecast map.
    MapForecast {
        /// Pushover user or group key.
        recipient: Option<String>,
    },

    /// Notify today's Zürich forecast from the MeteoSwiss weather pill.
    PillForecast {
        /// Pushover user or group key.
        recipient: Option<String>,
    },
}

impl Command {
    fn into_parts(self) -> (PipelineId, Option<String>) {
        match self {
            Command::Rate { recipient } => (PipelineId::Rate, recipient),
            Command::MapForecast { recipient } => (PipelineId::MapForecast, recipient),
            Command::PillForecast { recipient } => (PipelineId::PillForecast, recipient),
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let (id, recipient) = self.command.into_parts();

        // Nothing touches the network before configuration is complete.
        let config = Config::load(id, recipient)?;
        let pipeline = pipeline_from_config(&config)?;

        let fetcher = HttpFetcher::new()?;
        let notifier = PushoverNotifier::new(config.pushover_token.clone(), config.recipient.clone())?;

        let today = Local::now().date_naive();
        let outcome = run(pipeline.as_ref(), &fetcher, &notifier, today)
            .await
            .with_context(|| format!("{id} notification failed"))?;

        match outcome {
            RunOutcome::Delivered(message) => info!("Sent: {}", message.body),
            RunOutcome::NothingToReport => info!("No data available, nothing sent"),
        }

        Ok(())
    }
}
