use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Select};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use vidcast_client::{HttpCatalog, LoggingSink, PlaybackSession, read_upload};
use vidcast_core::catalog::{CatalogAction, CatalogController, CatalogRows, CatalogView, RowTarget};
use vidcast_core::{CatalogError, ClientConfig, VideoName};

#[derive(Parser)]
#[command(name = "vidcast")]
#[command(about = "Browse, upload and play videos from a vidcast media server")]
struct Cli {
    /// Base URL of the media server (overrides VIDCAST_SERVER_URL)
    #[arg(long, global = true)]
    server: Option<String>,

    /// Signalling WebSocket URL (overrides VIDCAST_SIGNALING_URL)
    #[arg(long, global = true)]
    signaling: Option<String>,

    /// STUN/TURN URL, repeatable (overrides VIDCAST_ICE_SERVERS)
    #[arg(long = "ice-server", global = true)]
    ice_servers: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the video catalog
    List,

    /// Delete a video from the server
    Delete {
        name: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Upload a video file
    Upload { path: PathBuf },

    /// Publish a video and follow its tracks until Ctrl-C
    Play {
        /// Video to play; prompts with the catalog when omitted
        name: Option<String>,
    },
}

impl Cli {
    fn config(&self) -> ClientConfig {
        let mut config = ClientConfig::from_env();

        if let Some(server) = &self.server {
            let derived = ClientConfig::for_server(server);
            config.server_url = derived.server_url;
            config.signaling_url = derived.signaling_url;
        }
        if let Some(signaling) = &self.signaling {
            config.signaling_url = signaling.clone();
        }
        if !self.ice_servers.is_empty() {
            config.ice_servers = self.ice_servers.clone();
        }
        config
    }
}

/// Prints the catalog as a numbered list.
struct TerminalView;

impl CatalogView for TerminalView {
    fn render(&self, rows: &CatalogRows) {
        if rows.is_empty() {
            println!("{}", "No videos on the server.".yellow());
            return;
        }
        println!("{}", "Videos:".cyan().bold());
        for (i, name) in rows.names().iter().enumerate() {
            println!("  {:>3}. {}", i + 1, name);
        }
    }

    fn reset_upload_input(&self) {}
}

type Catalog = CatalogController<HttpCatalog, TerminalView>;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = cli.config();
    let catalog = CatalogController::new(HttpCatalog::new(&config.server_url), TerminalView);

    match cli.command {
        Commands::List => {
            catalog
                .list_videos()
                .await
                .context("Error fetching video list")?;
        }

        Commands::Delete { name, yes } => {
            let name = VideoName::from(name);
            if !yes && !confirm_delete(&name)? {
                return Ok(());
            }
            match catalog.delete_video(&name).await {
                Ok(_) => {}
                Err(CatalogError::Refresh(e)) => warn!("Error fetching video list: {}", e),
                Err(e) => {
                    return Err(e).with_context(|| format!("Failed to delete video: {name}"));
                }
            }
            println!("{} {}", "Deleted".green().bold(), name);
        }

        Commands::Upload { path } => {
            let file = read_upload(&path).await?;
            let file_name = file.file_name.clone();
            match catalog.upload_video(Some(file)).await {
                Ok(_) => {}
                Err(CatalogError::Refresh(e)) => warn!("Error fetching video list: {}", e),
                Err(e) => return Err(e).with_context(|| format!("Failed to upload {file_name}")),
            }
            println!("{} {}", "Uploaded".green().bold(), file_name);
        }

        Commands::Play { name } => {
            let name = match name {
                Some(name) => VideoName::from(name),
                None => pick_video(&catalog).await?,
            };
            play(&config, name).await?;
        }
    }

    Ok(())
}

fn confirm_delete(name: &VideoName) -> Result<bool> {
    Confirm::new()
        .with_prompt(format!("Delete {name}?"))
        .default(false)
        .interact()
        .context("Confirmation prompt failed")
}

async fn pick_video(catalog: &Catalog) -> Result<VideoName> {
    let rows = catalog
        .list_videos()
        .await
        .context("Error fetching video list")?;
    if rows.is_empty() {
        anyhow::bail!("Nothing to play");
    }

    let items: Vec<String> = rows.names().iter().map(|n| n.to_string()).collect();
    let index = Select::new()
        .with_prompt("Pick a video")
        .items(&items)
        .default(0)
        .interact()
        .context("Selection prompt failed")?;

    match rows.on_click(index, RowTarget::Row) {
        Some(CatalogAction::Play(name)) => Ok(name),
        _ => anyhow::bail!("No video at position {}", index + 1),
    }
}

async fn play(config: &ClientConfig, name: VideoName) -> Result<()> {
    let sink = Arc::new(LoggingSink::new());
    let mut session = PlaybackSession::init(config, sink.clone())
        .await
        .context("Failed to open playback session")?;

    println!("{} {}", "▶ Publishing".green().bold(), name);
    session.start_video_stream(name).await?;

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            println!("{}", "Stopping playback...".cyan());
            for id in sink.attached_ids() {
                if let Err(e) = session.remove_video_by_track_id(id).await {
                    warn!("Failed to remove track: {}", e);
                }
            }
        }
        _ = session.wait_closed() => {
            println!("{}", "WebSocket has closed".red().bold());
        }
    }

    session.dispose().await;
    Ok(())
}
