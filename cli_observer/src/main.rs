use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use nation_client::{HttpSimulationApi, Synchronizer};
use tokio::sync::mpsc::unbounded_channel;
use tracing::info;

mod app;
mod ui;

use app::{ObserverApp, ObserverCommand};

#[derive(Clone)]
struct ChannelWriter {
    sender: Sender<String>,
}

impl std::io::Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Ok(text) = String::from_utf8(buf.to_vec()) {
            let _ = self.sender.send(text);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Live terminal observer for the nation simulation", long_about = None)]
struct Cli {
    /// Base URL of the simulation service.
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    endpoint: String,
    /// Poll interval in milliseconds for state/history refresh.
    #[arg(long, default_value_t = 1000)]
    poll_interval_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let (log_tx, log_rx) = mpsc::channel::<String>();
    let log_writer_tx = log_tx.clone();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .with_writer(move || ChannelWriter {
            sender: log_writer_tx.clone(),
        })
        .init();

    let cli = Cli::parse();
    info!("Observing simulation at {}", cli.endpoint);

    let (event_tx, event_rx) = unbounded_channel();
    let (command_tx, mut command_rx) = unbounded_channel::<ObserverCommand>();
    let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

    let api = HttpSimulationApi::new(cli.endpoint.clone());

    // Manual advances run outside the poll cadence; both feed the same
    // event channel, so whichever response lands last wins.
    let advancer = Synchronizer::new(api.clone(), event_tx.clone());
    tokio::spawn(async move {
        while let Some(command) = command_rx.recv().await {
            match command {
                ObserverCommand::Advance => {
                    if !advancer.advance_once().await {
                        break;
                    }
                }
            }
        }
    });

    let poller = Synchronizer::new(api, event_tx)
        .with_poll_interval(Duration::from_millis(cli.poll_interval_ms));
    tokio::spawn(poller.run());

    let _ui_handle = std::thread::spawn(move || -> color_eyre::Result<()> {
        let app = ObserverApp::new(event_rx, command_tx, shutdown_tx, log_rx)?;
        app.run()
    });

    loop {
        if session_ended(&shutdown_rx) {
            info!("Observer requested shutdown");
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    Ok(())
}

/// The session is over once the UI thread asks for shutdown, or once
/// it is gone entirely: a UI thread that failed during setup drops the
/// sender without ever sending, and waiting on it would spin forever.
fn session_ended(shutdown_rx: &Receiver<()>) -> bool {
    match shutdown_rx.try_recv() {
        Ok(()) | Err(TryRecvError::Disconnected) => true,
        Err(TryRecvError::Empty) => false,
    }
}
