use anyhow::Context;
use clap::{Parser, Subcommand};
use skywatch_core::{Config, Controller};

use crate::display;

const CHOICE_SEARCH: &str = "Search by city";
const CHOICE_LOCATE: &str = "Use current location";
const CHOICE_QUIT: &str = "Quit";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skywatch", version, about = "Weather dashboard for the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store an OpenWeatherMap API key in the config file.
    Configure,

    /// Run the interactive dashboard (the default when no subcommand is given).
    Dashboard,

    /// Look up a city once and print its weather card.
    Show {
        /// City name, e.g. "London".
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Dashboard) {
            Command::Configure => configure(),
            Command::Dashboard => dashboard().await,
            Command::Show { city } => show(&city).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Text::new("OpenWeatherMap API key:")
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn dashboard() -> anyhow::Result<()> {
    let config = Config::load()?;
    let controller = Controller::from_config(&config);

    // Mirror every state transition onto the terminal as it happens,
    // including the delayed error dismissal.
    let mut updates = controller.subscribe();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            display::render(&state);
        }
    });

    display::render(&controller.state());

    loop {
        let choice = inquire::Select::new(
            "What would you like to do?",
            vec![CHOICE_SEARCH, CHOICE_LOCATE, CHOICE_QUIT],
        )
        .prompt()
        .context("Failed to read menu choice")?;

        match choice {
            CHOICE_SEARCH => {
                // Submits on Enter; the controller handles empty input itself.
                let city = inquire::Text::new("City:")
                    .prompt()
                    .context("Failed to read city name")?;
                controller.search_by_city(&city).await;
            }
            CHOICE_LOCATE => controller.search_by_current_location().await,
            _ => break,
        }
    }

    Ok(())
}

async fn show(city: &str) -> anyhow::Result<()> {
    let config = Config::load()?;
    let controller = Controller::from_config(&config);

    controller.search_by_city(city).await;
    display::render(&controller.state());

    Ok(())
}
