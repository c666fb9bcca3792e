// SPDX-License-Identifier: GPL-3.0-only

use anywho::{Error, anywho};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::{app::PokeQuiz, config::Config, flags::Flags};

mod app;
mod config;
mod core;
mod entities;
mod flags;
mod i18n;
mod quiz;
mod shiritori;
mod utils;
mod weakness;

pub const APP_ID: &str = "dev.mariinkys.PokeQuiz";

#[tokio::main]
async fn main() -> Result<(), Error> {
    let flags = Flags::parse();

    init_logging(flags.verbose);

    // Get the system's preferred languages.
    let requested_languages = i18n_embed::DesktopLanguageRequester::requested_languages();

    // Enable localizations to be applied.
    i18n::init(&requested_languages);

    let mut config = Config::load_or_init().await;
    if let Some(language) = flags.language {
        config.language = language;
    }

    let mut app = PokeQuiz::init(config)
        .await
        .map_err(|err| anywho!("{err}"))?;

    app.run(flags.command.unwrap_or_default())
        .await
        .map_err(|err| anywho!("{err}"))
}

/// Logs go to stderr so they never mix with the game's output.
/// `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={default_level}", env!("CARGO_CRATE_NAME"))));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
