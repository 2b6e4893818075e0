use anyhow::Result;
use clap::{Parser, Subcommand};
use inquire::{Confirm, CustomType, Select, Text};
use std::sync::Arc;
use weather_core::{
    Config, ConfiguredLocator, Dashboard, DirectConfig, EndpointMode, FileLastCityStore,
    LocationConfig, ProxyClientConfig, Severity, client_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather dashboard CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the endpoint mode, credentials, and default city.
    Configure,

    /// Show current conditions for a location.
    Show {
        /// City, postal code, or "lat,lon". Defaults to the last search.
        query: Option<String>,
    },

    /// Show current conditions for the configured position.
    Locate,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { query } => show(query).await,
            Command::Locate => locate().await,
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let mode_names: Vec<&str> = EndpointMode::all().iter().map(EndpointMode::as_str).collect();
    let chosen = Select::new("Endpoint mode:", mode_names).prompt()?;
    let mode = EndpointMode::try_from(chosen)?;

    match mode {
        EndpointMode::Direct => {
            let api_key = Text::new("Weatherstack API key:").prompt()?;
            config.direct = Some(match config.direct.take() {
                Some(mut direct) => {
                    direct.api_key = api_key;
                    direct
                }
                None => DirectConfig::new(api_key),
            });
        }
        EndpointMode::Proxy => {
            let url = Text::new("Proxy endpoint URL:")
                .with_default("http://127.0.0.1:8787/api/weather")
                .prompt()?;
            config.proxy = Some(ProxyClientConfig { url });
        }
    }

    config.set_mode(mode);

    let default_city = Text::new("Default city:").with_default(config.default_city()).prompt()?;
    config.default_city = Some(default_city);

    let set_location = Confirm::new("Set a fixed position for `weather locate`?")
        .with_default(config.location.is_some())
        .prompt()?;
    if set_location {
        let latitude = CustomType::<f64>::new("Latitude:").prompt()?;
        let longitude = CustomType::<f64>::new("Longitude:").prompt()?;
        config.location = Some(LocationConfig { latitude, longitude });
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

fn build_dashboard(config: &Config) -> Result<Dashboard> {
    let client = client_from_config(config)?;
    let store = FileLastCityStore::new()?;

    Ok(Dashboard::new(Arc::new(client), Box::new(store), config.default_city()))
}

fn report(dashboard: &Dashboard) {
    for toast in dashboard.toasts() {
        let tag = match toast.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        eprintln!("[{tag}] {}", toast.message);
    }

    if let Some(payload) = dashboard.payload() {
        render::print_payload(payload);
    }
}

async fn show(query: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let mut dashboard = build_dashboard(&config)?;

    match query {
        Some(query) => dashboard.search(&query).await,
        None => dashboard.startup().await,
    }

    report(&dashboard);
    Ok(())
}

async fn locate() -> Result<()> {
    let config = Config::load()?;
    let mut dashboard = build_dashboard(&config)?;
    let locator = ConfiguredLocator::from_config(&config);

    dashboard.locate(&locator).await;

    report(&dashboard);
    Ok(())
}
