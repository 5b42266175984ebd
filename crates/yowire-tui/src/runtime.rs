//! Async runtime
//!
//! Event loop that drives terminal I/O and coordinates between the App state
//! machine and the live session. Uses tokio::select! to handle terminal
//! events, session notices, and periodic ticks concurrently.
//!
//! Supports two modes:
//! - Simulation mode: in-process broadcast server on a loopback port
//! - Remote mode: connect to an existing Yo server

use std::io::{self, stdout};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;
use tokio::sync::mpsc;
use yowire_app::{App, AppAction, AppEvent, KeyInput};
use yowire_client::{Session, SessionNotice};
use yowire_proto::Intent;
use yowire_server::{Server, ServerError};

use crate::ui;

/// Tick interval for periodic maintenance.
const TICK_INTERVAL: std::time::Duration = std::time::Duration::from_millis(100);

/// Runtime errors.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// In-process server failure (simulation mode).
    #[error("server error: {0}")]
    Server(#[from] ServerError),
}

/// Async runtime for the TUI.
///
/// Manages terminal setup/teardown, the main event loop, and execution of
/// the [`AppAction`]s produced by the [`App`] state machine. The session's
/// notice channel is the single consumer path through which console and
/// statistics state get mutated.
pub struct Runtime {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    app: App,
    server_addr: String,
    session: Option<Session>,
    notices: Option<mpsc::Receiver<SessionNotice>>,
}

impl Runtime {
    /// Runtime in simulation mode: spawns an in-process server first.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot bind or the terminal cannot be
    /// initialized.
    pub async fn simulated() -> Result<Self, RuntimeError> {
        let server = Server::bind("127.0.0.1:0").await?;
        let addr = server.local_addr()?.to_string();

        tokio::spawn(async move {
            if let Err(e) = server.run().await {
                tracing::error!(error = %e, "in-process server stopped");
            }
        });

        Self::create(addr)
    }

    /// Runtime connecting to an existing server.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized.
    pub fn with_server(server_addr: String) -> Result<Self, RuntimeError> {
        Self::create(server_addr)
    }

    fn create(server_addr: String) -> Result<Self, RuntimeError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let app = App::new(server_addr.clone());

        Ok(Self { terminal, app, server_addr, session: None, notices: None })
    }

    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal I/O fails. Session errors never abort
    /// the loop; they surface on the console instead.
    pub async fn run(mut self) -> Result<(), RuntimeError> {
        self.render()?;
        self.connect().await?;

        let mut event_stream = EventStream::new();
        let mut tick_interval = tokio::time::interval(TICK_INTERVAL);

        loop {
            let should_quit = if let Some(notices) = self.notices.as_mut() {
                tokio::select! {
                    maybe_event = event_stream.next() => match maybe_event {
                        Some(Ok(event)) => self.handle_terminal_event(event).await?,
                        Some(Err(e)) => return Err(RuntimeError::Io(e)),
                        None => true,
                    },

                    maybe_notice = notices.recv() => match maybe_notice {
                        Some(notice) => self.handle_notice(notice).await?,
                        None => {
                            // Receive loop is gone; drop the dead session.
                            self.session = None;
                            self.notices = None;
                            false
                        },
                    },

                    _ = tick_interval.tick() => {
                        let actions = self.app.handle(AppEvent::Tick);
                        self.process_actions(actions).await?
                    },
                }
            } else {
                tokio::select! {
                    maybe_event = event_stream.next() => match maybe_event {
                        Some(Ok(event)) => self.handle_terminal_event(event).await?,
                        Some(Err(e)) => return Err(RuntimeError::Io(e)),
                        None => true,
                    },

                    _ = tick_interval.tick() => {
                        let actions = self.app.handle(AppEvent::Tick);
                        self.process_actions(actions).await?
                    },
                }
            };

            if should_quit {
                break;
            }
        }

        self.disconnect().await;
        Ok(())
    }

    /// Handle a terminal event and return whether to quit.
    async fn handle_terminal_event(&mut self, event: Event) -> Result<bool, RuntimeError> {
        let app_event = match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                match convert_key(key.code) {
                    Some(key_input) => AppEvent::Key(key_input),
                    None => return Ok(false),
                }
            },
            Event::Resize(cols, rows) => AppEvent::Resize(cols, rows),
            _ => return Ok(false),
        };

        let actions = self.app.handle(app_event);
        self.process_actions(actions).await
    }

    /// Route a session notice into the app. Returns true if should quit.
    async fn handle_notice(&mut self, notice: SessionNotice) -> Result<bool, RuntimeError> {
        if matches!(notice, SessionNotice::Closed(_)) {
            // The receive loop is done; release the handle.
            self.session = None;
            self.notices = None;
        }

        let actions = self.app.handle(AppEvent::Session(notice));
        self.process_actions(actions).await
    }

    /// Process actions returned by the app. Returns true if should quit.
    async fn process_actions(&mut self, actions: Vec<AppAction>) -> Result<bool, RuntimeError> {
        for action in actions {
            match action {
                AppAction::Render => self.render()?,
                AppAction::Quit => return Ok(true),
                AppAction::Connect => self.connect().await?,
                AppAction::SendIntent(intent) => self.send_intent(intent).await,
                AppAction::Disconnect => self.disconnect().await,
            }
        }
        Ok(false)
    }

    /// Process actions synchronously (render-only contexts).
    fn process_actions_sync(&mut self, actions: Vec<AppAction>) {
        for action in actions {
            match action {
                AppAction::Render => {
                    if let Err(e) = self.render() {
                        tracing::warn!(error = %e, "render failed");
                    }
                },
                AppAction::Quit => {},
                action @ (AppAction::Connect
                | AppAction::SendIntent(_)
                | AppAction::Disconnect) => {
                    tracing::warn!(?action, "unexpected action in sync context");
                },
            }
        }
    }

    /// Establish a new session and start consuming its notices.
    async fn connect(&mut self) -> Result<(), RuntimeError> {
        let actions = self.app.handle(AppEvent::Connecting);
        self.process_actions_sync(actions);

        match Session::connect(&self.server_addr).await {
            Ok((session, notices)) => {
                self.session = Some(session);
                self.notices = Some(notices);

                let actions = self.app.handle(AppEvent::Connected);
                self.process_actions_sync(actions);
            },
            Err(e) => {
                let actions = self.app.handle(AppEvent::ConnectFailed { cause: e.to_string() });
                self.process_actions_sync(actions);
            },
        }

        Ok(())
    }

    /// Send one intent over the live session.
    async fn send_intent(&mut self, intent: Intent) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if let Err(e) = session.send_intent(intent).await {
            let actions = self.app.handle(AppEvent::SendFailed { cause: e.to_string() });
            self.process_actions_sync(actions);
        }
    }

    /// Close the live session.
    async fn disconnect(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.disconnect().await;
        }
        self.notices = None;
    }

    /// Render the UI.
    fn render(&mut self) -> Result<(), RuntimeError> {
        self.terminal.draw(|frame| {
            ui::render(frame, &self.app);
        })?;
        Ok(())
    }
}

/// Convert a crossterm `KeyCode` to the app's `KeyInput`.
fn convert_key(code: KeyCode) -> Option<KeyInput> {
    match code {
        KeyCode::Char(c) => Some(KeyInput::Char(c)),
        KeyCode::Esc => Some(KeyInput::Esc),
        _ => None,
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}
