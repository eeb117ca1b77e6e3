mod config;
mod monitoring;
mod registry;
mod session;
mod storage;
mod tui;
mod validation;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::time::MissedTickBehavior;

use crate::config::Config;
use crate::monitoring::{
    HttpTransport, LineSink, Prober, SlotTable, StatusSink, TracingSink, sweep,
};
use crate::registry::HostRegistry;
use crate::session::MonitorSession;
use crate::storage::{FileStore, KeyValueStore};

#[derive(Parser, Debug)]
#[command(name = "uppe-monitor", version, about = "Poll registered servers and show whether they respond")]
struct Cli {
    /// Config file (defaults to $XDG_CONFIG_HOME/uppe/monitor.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Watch registered servers (default)
    Watch {
        /// Log results instead of drawing the terminal UI
        #[arg(long)]
        headless: bool,
    },
    /// Probe every server once and print the results
    Check,
    /// Register a server
    Add { name: String, host: String },
    /// Remove a registered server
    Remove { name: String },
    /// List registered servers
    List,
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Watch { headless: false });

    let config = Config::from_config(cli.config.as_deref()).context("Failed to load config")?;

    match &command {
        Command::Watch { headless: false } => logger::init_tracing_to_file(config.logging.file.as_deref())
            .context("Failed to open log file")?,
        _ => logger::init_tracing(),
    }

    let file_store = FileStore::new(config.store_path()?);
    tracing::debug!(path = %file_store.path().display(), "Using store");
    let store: Arc<dyn KeyValueStore> = Arc::new(file_store);

    match command {
        Command::Watch { headless } => watch(&config, store, headless).await,
        Command::Check => check(&config, store).await,
        Command::Add { name, host } => {
            let mut registry = HostRegistry::load(store.as_ref()).await?;
            let record = registry.register(store.as_ref(), &name, &host).await?;
            println!("Added #{} {} {}", registry.len(), record.name, record.host);
            Ok(())
        }
        Command::Remove { name } => {
            let mut registry = HostRegistry::load(store.as_ref()).await?;
            let record = registry.remove(store.as_ref(), &name).await?;
            println!("Removed {} {}", record.name, record.host);
            Ok(())
        }
        Command::List => {
            let registry = HostRegistry::load(store.as_ref()).await?;
            if registry.is_empty() {
                println!("No servers registered");
            }
            for (i, server) in registry.servers().iter().enumerate() {
                println!("#{} {} {}", i + 1, server.name, server.host);
            }
            Ok(())
        }
        Command::Config => {
            println!("{config}");
            Ok(())
        }
    }
}

fn build_prober(config: &Config) -> Result<Arc<Prober>> {
    let transport =
        HttpTransport::new(Duration::from_millis(config.monitor.request_ceiling_ms))?;
    Ok(Arc::new(Prober::new(
        Arc::new(transport),
        Duration::from_millis(config.monitor.timeout_ms),
        config.monitor.scheme.clone(),
    )))
}

async fn watch(config: &Config, store: Arc<dyn KeyValueStore>, headless: bool) -> Result<()> {
    let prober = build_prober(config)?;

    if headless {
        let prober_timeout_ms = prober.timeout().as_millis() as u64;
        let sink: Arc<dyn StatusSink> = Arc::new(TracingSink);
        let mut session = MonitorSession::from_settings(store, prober, sink, &config.monitor).await?;
        session.enter_initial_mode().await;
        tracing::info!(
            interval_ms = config.monitor.interval_ms,
            timeout_ms = prober_timeout_ms,
            "Monitoring started"
        );
        if session.servers().await.is_empty() {
            tracing::warn!(
                "No servers registered yet; waiting for `uppe-monitor add <name> <host>`"
            );
        }

        // Pick up `add`/`remove` run from another shell
        let mut reload = tokio::time::interval(Duration::from_millis(config.monitor.interval_ms));
        reload.set_missed_tick_behavior(MissedTickBehavior::Delay);
        reload.tick().await;

        loop {
            tokio::select! {
                signal = tokio::signal::ctrl_c() => {
                    signal.context("Failed to listen for Ctrl-C")?;
                    break;
                }
                _ = reload.tick() => {
                    if let Err(e) = session.reload().await {
                        tracing::warn!(error = %e, "Failed to reload registry");
                    }
                }
            }
        }

        tracing::info!("Stopping monitor");
        session.stop();
        return Ok(());
    }

    let slots = SlotTable::new();
    let session =
        MonitorSession::from_settings(store, prober, Arc::new(slots.clone()), &config.monitor)
            .await?;
    tui::run_tui(session, slots).await
}

async fn check(config: &Config, store: Arc<dyn KeyValueStore>) -> Result<()> {
    let prober = build_prober(config)?;
    let registry = HostRegistry::load(store.as_ref()).await?;
    if registry.is_empty() {
        println!("No servers registered");
        return Ok(());
    }

    let sink = LineSink::stdout();
    let report = sweep(&prober, registry.servers(), &sink).await;
    tracing::info!(probed = report.probed, reachable = report.reachable, "Check finished");
    Ok(())
}
