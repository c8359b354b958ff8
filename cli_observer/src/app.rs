use std::sync::mpsc::{Receiver, Sender};
use std::time::{Duration, Instant};

use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode};
use nation_client::{SyncEvent, ViewStore};
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{error, info};

use crate::ui::{draw_ui, UiState};

/// Commands the observer can send to the simulation service.
#[derive(Debug, Clone)]
pub enum ObserverCommand {
    Advance,
}

pub struct ObserverApp {
    terminal: Terminal<CrosstermBackend<std::io::Stdout>>,
    store: ViewStore,
    ui_state: UiState,
    receiver: UnboundedReceiver<SyncEvent>,
    command_sender: UnboundedSender<ObserverCommand>,
    shutdown_sender: Sender<()>,
    log_receiver: Receiver<String>,
}

impl ObserverApp {
    pub fn new(
        receiver: UnboundedReceiver<SyncEvent>,
        command_sender: UnboundedSender<ObserverCommand>,
        shutdown_sender: Sender<()>,
        log_receiver: Receiver<String>,
    ) -> Result<Self> {
        let stdout = std::io::stdout();
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        crossterm::terminal::enable_raw_mode()?;
        terminal.clear()?;
        terminal.hide_cursor()?;
        Ok(Self {
            terminal,
            store: ViewStore::new(),
            ui_state: UiState::default(),
            receiver,
            command_sender,
            shutdown_sender,
            log_receiver,
        })
    }

    pub fn run(mut self) -> Result<()> {
        let mut last_draw = Instant::now();

        loop {
            // Apply sync events in arrival order; the store is only
            // ever touched from this thread.
            while let Ok(sync_event) = self.receiver.try_recv() {
                self.store.apply(sync_event);
            }

            while let Ok(line) = self.log_receiver.try_recv() {
                self.ui_state.push_log(line);
            }

            if last_draw.elapsed() >= Duration::from_millis(100) {
                self.terminal
                    .draw(|frame| draw_ui(frame, &self.store, &self.ui_state))?;
                last_draw = Instant::now();
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Char('.') => {
                            if let Err(err) = self.command_sender.send(ObserverCommand::Advance) {
                                error!("Failed to request manual advance: {}", err);
                            } else {
                                info!("Requested manual advance");
                            }
                        }
                        _ => {}
                    }
                }
            }
        }

        self.terminal.show_cursor()?;
        crossterm::terminal::disable_raw_mode()?;
        // Dropping self.receiver after this is what cancels the poll
        // loop: its next send fails and it stops.
        let _ = self.shutdown_sender.send(());
        Ok(())
    }
}
