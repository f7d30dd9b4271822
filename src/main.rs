mod app;
mod board;
mod config;
mod layout;
mod util;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{RosterEntry, Settings};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON array of names or {"name", "portrait_size"} objects.
    #[arg(long, conflicts_with = "names")]
    roster: Option<PathBuf>,
    /// Comma separated character names.
    #[arg(long)]
    names: Option<String>,
    /// Your own character; its name is drawn highlighted.
    #[arg(long)]
    me: Option<String>,
    /// JSON file with portrait size and layout constants.
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Seed for respawn placement.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = 1280.0)]
    width: f32,
    #[arg(long, default_value_t = 720.0)]
    height: f32,
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wolfboard=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_roster(args: &Args, settings: &Settings) -> Result<Vec<RosterEntry>> {
    if let Some(path) = &args.roster {
        return config::load_roster(path, settings.portrait_size);
    }
    if let Some(names) = &args.names {
        return config::roster_from_names(names, settings.portrait_size)
            .context("invalid --names value");
    }
    Ok(config::demo_roster(settings.portrait_size))
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => config::load_settings(path)?,
        None => Settings::default(),
    };
    let roster = load_roster(&args, &settings)?;
    if let Some(me) = &args.me
        && !roster.iter().any(|entry| &entry.name == me)
    {
        return Err(anyhow!("--me {me} is not in the roster"));
    }
    info!(characters = roster.len(), "roster loaded");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([args.width, args.height]),
        ..Default::default()
    };

    let me = args.me.clone();
    let seed = args.seed;
    eframe::run_native(
        "wolfboard",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::BoardApp::new(
                cc, roster, settings, me, seed,
            )))
        }),
    )
    .map_err(|error| anyhow!("failed to run the board window: {error}"))
}
