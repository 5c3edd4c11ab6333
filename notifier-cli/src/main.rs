//! Binary crate for the `notifier` command-line tool.
//!
//! Each subcommand is one short-lived notifier:
//! - Parsing the recipient argument
//! - Logging setup
//! - Wiring the HTTP transport and Pushover delivery into a pipeline run

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::init_from_env(env);

    let cmd = cli::Cli::parse();
    cmd.run().await
}
