use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{DisplayState, HealthProbe, HttpInvoker, RemoteInvoker, Summarizer};
use tokio::{io::BufReader, sync::mpsc};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod session;
mod view;

use config::{load_settings, timeout_from_secs};

#[derive(Parser, Debug)]
#[command(about = "Trigger health probes and video summaries against the summarise service")]
struct Cli {
    /// Overrides the configured service base URL.
    #[arg(long)]
    server_url: Option<String>,
    /// Per-request transport timeout in seconds; 0 disables it.
    #[arg(long)]
    timeout_secs: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Probe the service root once.
    Health,
    /// Summarise each URL, issuing all requests back to back.
    Summarise {
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Read URLs from stdin; `health` probes, `quit` exits.
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings()?;
    if let Some(server_url) = cli.server_url {
        settings.server_url = server_url;
    }
    if let Some(secs) = cli.timeout_secs {
        settings.request_timeout = timeout_from_secs(secs);
    }
    info!(
        server_url = %settings.server_url,
        timeout = ?settings.request_timeout,
        "using summarise service"
    );

    let invoker: Arc<dyn RemoteInvoker> = Arc::new(
        HttpInvoker::new(&settings.server_url, settings.request_timeout)
            .with_context(|| format!("invalid server url '{}'", settings.server_url))?,
    );

    let final_state = match cli.command {
        Command::Health => {
            let probe = HealthProbe::new(invoker);
            let handle = probe.trigger();
            println!("{}", view::render(&probe.state()));
            handle.outcome().await?;
            probe.state()
        }
        Command::Summarise { urls } => {
            let summarizer = Summarizer::new(invoker);
            let handles: Vec<_> = urls.into_iter().map(|url| summarizer.trigger(url)).collect();
            println!("{}", view::render(&summarizer.state()));
            for handle in handles {
                handle.outcome().await?;
            }
            summarizer.state()
        }
        Command::Interactive => {
            let (output, mut rendered) = mpsc::unbounded_channel::<String>();
            let printer = tokio::spawn(async move {
                while let Some(line) = rendered.recv().await {
                    println!("{line}");
                }
            });
            let summary = session::run_session(
                BufReader::new(tokio::io::stdin()),
                HealthProbe::new(Arc::clone(&invoker)),
                Summarizer::new(invoker),
                output,
            )
            .await?;
            printer.await?;
            if summary.failed() {
                bail!("request failed");
            }
            return Ok(());
        }
    };

    println!("{}", view::render(&final_state));
    if final_state == DisplayState::Failed {
        bail!("request failed");
    }
    Ok(())
}
