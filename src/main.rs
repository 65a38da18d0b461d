use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hacknhost_voice::config::FeedbackKind;
use hacknhost_voice::{
    command_table, create_router, resolve, AppState, Config, ControllerHandle,
    EngineProviderFactory, Feedback, LogFeedback, NatsClient, NatsFeedback,
    RecognitionController,
};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hacknhost-voice", version, about = "Voice command navigation for HackNHost")]
struct Cli {
    /// Config file path (extension optional)
    #[arg(short, long, default_value = "config/hacknhost-voice")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the recognition controller with the HTTP control surface
    Serve,
    /// Run the recognition controller until Ctrl-C
    Listen,
    /// Show which action a transcript resolves to
    Match {
        /// Transcript text
        transcript: Vec<String>,
    },
    /// Print the command table
    Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Match { transcript } => {
            let transcript = transcript.join(" ");
            match resolve(&transcript) {
                Some(action) => println!("{} -> {}", action.name(), action.route()),
                None => println!("no match"),
            }
            Ok(())
        }
        Command::Commands => {
            for entry in command_table() {
                println!("{:<18} {:<20} {}", entry.name, entry.route, entry.phrases.join(", "));
            }
            Ok(())
        }
        Command::Listen => {
            let cfg = Config::load(&cli.config)?;
            let (controller, task) = mount_controller(&cfg).await?;

            info!("Listening for voice commands, press Ctrl-C to quit");
            tokio::signal::ctrl_c()
                .await
                .context("Failed to listen for Ctrl-C")?;

            shutdown(controller, task).await;
            Ok(())
        }
        Command::Serve => {
            let cfg = Config::load(&cli.config)?;
            info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));

            let (controller, task) = mount_controller(&cfg).await?;
            let app = create_router(AppState::new(controller.clone()));

            let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            info!("HTTP server listening on {}", addr);

            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = tokio::signal::ctrl_c().await;
                })
                .await
                .context("HTTP server failed")?;

            shutdown(controller, task).await;
            Ok(())
        }
    }
}

async fn mount_controller(cfg: &Config) -> Result<(ControllerHandle, JoinHandle<()>)> {
    let nats = if cfg.needs_nats() {
        Some(NatsClient::connect(&cfg.nats.url, cfg.nats.session_id.clone()).await?)
    } else {
        None
    };

    let provider = EngineProviderFactory::create(cfg, nats.as_ref())?;

    let feedback: Arc<dyn Feedback> = match (cfg.voice.feedback, nats) {
        (FeedbackKind::Nats, Some(client)) => Arc::new(NatsFeedback::new(client)),
        _ => Arc::new(LogFeedback),
    };

    Ok(RecognitionController::spawn(
        provider,
        feedback,
        cfg.session_config(),
    ))
}

async fn shutdown(controller: ControllerHandle, task: JoinHandle<()>) {
    info!("Shutting down");
    if let Err(e) = controller.dispose().await {
        warn!("Controller already stopped: {}", e);
    }
    if let Err(e) = task.await {
        warn!("Controller task panicked: {}", e);
    }
}
