/// Cue Console - play a remote track catalogue from the terminal
mod commands;
mod config;
mod presenter;
mod simulator;
mod store;

use anyhow::Context;
use clap::Parser;
use commands::{Command, HELP};
use config::ConsoleConfig;
use cue_catalogue::CatalogueClient;
use cue_playback::{Controller, PreferenceStore, Synchronizer};
use presenter::TerminalPresenter;
use simulator::Simulator;
use std::{path::PathBuf, time::Duration};
use store::JsonFilePreferences;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type ConsoleController = Controller<CatalogueClient, TerminalPresenter<std::io::Stdout>>;

#[derive(Parser)]
#[command(name = "cue-console")]
#[command(about = "Play a paginated track catalogue from the terminal", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Catalogue server URL
    #[arg(long, env = "CUE_BASE_URL")]
    base_url: Option<String>,

    /// Rows per page (0 = all)
    #[arg(long)]
    page_size: Option<u32>,

    /// Restrict the catalogue to one playlist
    #[arg(long)]
    playlist: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the table
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cue_console=info,cue_playback=info,cue_catalogue=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = ConsoleConfig::load(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config.catalogue.base_url = base_url;
    }
    if let Some(page_size) = cli.page_size {
        config.console.page_size = page_size;
    }
    if cli.playlist.is_some() {
        config.console.playlist = cli.playlist;
    }

    tracing::info!("Starting Cue Console");
    tracing::info!("Catalogue: {}", config.catalogue.base_url);

    let client =
        CatalogueClient::new(config.catalogue.clone()).context("Invalid catalogue settings")?;
    let store = JsonFilePreferences::new(config.console.preferences_path.clone());
    let (simulator, mut surface_events) =
        Simulator::new(Duration::from_secs(config.console.simulated_duration_secs));

    let sync =
        Synchronizer::with_preferences(config.playback.clone(), store.load(), simulator.factory());
    let mut controller = Controller::new(sync, client.clone(), TerminalPresenter::stdout())
        .with_preferences(Box::new(store));

    if let Err(e) = controller.open(config.initial_query()).await {
        tracing::warn!(error = %e, "Initial catalogue load failed");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(config.playback.progress_interval());
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };
                if !handle_line(&mut controller, &client, &line).await {
                    break;
                }
            }
            Some((slot, event)) = surface_events.recv() => {
                if let Err(e) = controller.surface_event(slot, event).await {
                    tracing::warn!(%slot, error = %e, "Surface event failed");
                }
            }
            _ = ticker.tick() => {
                simulator.poll_ended();
                controller.tick();
            }
        }
    }

    println!();
    tracing::info!("Bye");
    Ok(())
}

/// Run one input line; `false` means quit
async fn handle_line(controller: &mut ConsoleController, client: &CatalogueClient, line: &str) -> bool {
    let sync = controller.synchronizer();
    let command = match commands::parse(line, &sync.session(), sync.query()) {
        Ok(command) => command,
        Err(e) => {
            println!("\n{e}");
            return true;
        }
    };

    match command {
        Command::Intent(intent) => {
            if let Err(e) = controller.dispatch(intent).await {
                tracing::warn!(error = %e, "Command failed");
            }
        }
        Command::ListPlaylists => match client.playlists().list_playlists().await {
            Ok(playlists) if playlists.is_empty() => println!("\nno playlists"),
            Ok(playlists) => {
                println!();
                for playlist in playlists {
                    println!("{:>6}  {}", playlist.id, playlist.name);
                }
            }
            Err(e) => println!("\nplaylists unavailable: {e}"),
        },
        Command::AddToPlaylist { playlist, track } => {
            match client.playlists().add_track(playlist, track).await {
                Ok(()) => println!("\nadded {track} to playlist {playlist}"),
                Err(e) => println!("\ncould not add {track}: {e}"),
            }
        }
        Command::RemoveFromPlaylist { playlist, track } => {
            match client.playlists().remove_track(playlist, track).await {
                Ok(()) => println!("\nremoved {track} from playlist {playlist}"),
                Err(e) => println!("\ncould not remove {track}: {e}"),
            }
        }
        Command::Status => match serde_json::to_string_pretty(&controller.synchronizer().session()) {
            Ok(json) => println!("\n{json}"),
            Err(e) => tracing::warn!(error = %e, "Failed to encode session"),
        },
        Command::Help => println!("\n{HELP}"),
        Command::Quit => return false,
        Command::Nothing => {}
    }
    true
}
