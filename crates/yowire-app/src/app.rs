//! Application state machine.
//!
//! Consumes [`AppEvent`]s, produces [`AppAction`]s, and owns the console and
//! statistics engine. Pure state machine: no I/O, fully testable.
//!
//! # Responsibilities
//!
//! - Gates user intents on the connection state.
//! - Renders session notices into console lines and feeds classified events
//!   to the statistics engine.
//! - Distinguishes local disconnects (reported once, with a final summary)
//!   from remote closes (reported with their cause, no summary).

use yowire_client::{CloseReason, SessionNotice};
use yowire_proto::{Intent, MessageEvent};

use crate::{
    AppAction, AppEvent, ConnectionState, KeyInput,
    console::Console,
    stats::{RandomPicker, ReminderPicker, Stats},
};

/// Application state machine.
#[derive(Debug)]
pub struct App<P = RandomPicker> {
    /// Connection state as shown to the user.
    state: ConnectionState,
    /// Server address (host:port).
    server_addr: String,
    /// Display console.
    console: Console,
    /// Statistics engine.
    stats: Stats<P>,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
}

impl App<RandomPicker> {
    /// App with the production reminder picker.
    #[must_use]
    pub fn new(server_addr: String) -> Self {
        Self::with_stats(server_addr, Stats::new())
    }
}

impl<P: ReminderPicker> App<P> {
    /// App with an injected statistics engine (deterministic reminders).
    pub fn with_stats(server_addr: String, stats: Stats<P>) -> Self {
        Self {
            state: ConnectionState::Disconnected,
            server_addr,
            console: Console::new(),
            stats,
            terminal_size: (80, 24),
        }
    }

    /// Process an event and return actions for the runtime.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Tick => vec![],
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::Connecting => {
                self.state = ConnectionState::Connecting;
                self.console.append("Connecting to Yo server ...");
                vec![AppAction::Render]
            },
            AppEvent::Connected => {
                self.state = ConnectionState::Connected;
                self.console.append("Connected to Yo server");
                vec![AppAction::Render]
            },
            AppEvent::ConnectFailed { cause } => {
                self.state = ConnectionState::Disconnected;
                self.console.append(format!("-- Could not connect to server: {cause}"));
                vec![AppAction::Render]
            },
            AppEvent::SendFailed { cause } => {
                self.console.append(format!("-- On send data attempt: {cause}"));
                vec![AppAction::Render]
            },
            AppEvent::Session(notice) => self.handle_notice(notice),
        }
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Char('y') => self.send_yo(),
            KeyInput::Char('h') => self.send_howdy(),
            KeyInput::Char('c') => self.connect(),
            KeyInput::Char('d') => self.disconnect(),
            KeyInput::Char('q') | KeyInput::Esc => self.quit(),
            KeyInput::Char(_) => vec![],
        }
    }

    fn handle_notice(&mut self, notice: SessionNotice) -> Vec<AppAction> {
        match notice {
            SessionNotice::Event(event) => {
                self.console.append(event_line(event));
                self.stats.on_event(event, &mut self.console);
                vec![AppAction::Render]
            },
            SessionNotice::InvalidCode(code) => {
                self.console.append(format!("-- Invalid message code received: {}", code as char));
                vec![AppAction::Render]
            },
            SessionNotice::Closed(CloseReason::Local) => {
                // The disconnect entry point already reported this.
                tracing::debug!("receive loop confirmed local close");
                self.state = ConnectionState::Disconnected;
                vec![AppAction::Render]
            },
            SessionNotice::Closed(CloseReason::Remote(cause)) => {
                self.state = ConnectionState::Disconnected;
                let cause = cause.unwrap_or_else(|| "got booted".to_string());
                self.console.append(format!("Disconnected from Yo server: {cause}"));
                vec![AppAction::Render]
            },
        }
    }

    /// Send a Yo. Valid only while connected.
    pub fn send_yo(&mut self) -> Vec<AppAction> {
        self.send_intent(Intent::Yo)
    }

    /// Send a Howdy. Valid only while connected.
    pub fn send_howdy(&mut self) -> Vec<AppAction> {
        self.send_intent(Intent::Howdy)
    }

    fn send_intent(&mut self, intent: Intent) -> Vec<AppAction> {
        if self.state != ConnectionState::Connected {
            return vec![];
        }
        vec![AppAction::SendIntent(intent)]
    }

    /// Initiate a connection. Ignored unless disconnected.
    pub fn connect(&mut self) -> Vec<AppAction> {
        if self.state != ConnectionState::Disconnected {
            return vec![];
        }
        vec![AppAction::Connect]
    }

    /// Close the session: report the disconnect, then summarize the run.
    pub fn disconnect(&mut self) -> Vec<AppAction> {
        if self.state != ConnectionState::Connected {
            return vec![];
        }
        self.state = ConnectionState::Disconnected;
        self.console.append("Disconnected from Yo server");
        self.stats.final_stats(&mut self.console);
        vec![AppAction::Disconnect, AppAction::Render]
    }

    /// Quit the application.
    pub fn quit(&self) -> Vec<AppAction> {
        vec![AppAction::Quit]
    }

    /// Current connection state.
    #[must_use]
    pub fn connection_state(&self) -> ConnectionState {
        self.state
    }

    /// Server address (host:port).
    #[must_use]
    pub fn server_addr(&self) -> &str {
        &self.server_addr
    }

    /// Display console.
    #[must_use]
    pub fn console(&self) -> &Console {
        &self.console
    }

    /// Statistics engine.
    #[must_use]
    pub fn stats(&self) -> &Stats<P> {
        &self.stats
    }

    /// Terminal dimensions (columns, rows).
    #[must_use]
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }
}

/// Console line for a classified message event.
fn event_line(event: MessageEvent) -> &'static str {
    match event {
        MessageEvent::SentYo => "I said: Yo!",
        MessageEvent::RecvYo => "Someone else said: Yo!",
        MessageEvent::SentHowdy => "I said: Howdy!",
        MessageEvent::RecvHowdy => "Someone else said: Howdy!",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FirstPicker;

    impl ReminderPicker for FirstPicker {
        fn pick(&mut self, _len: usize) -> usize {
            0
        }
    }

    fn test_app() -> App<FirstPicker> {
        App::with_stats("localhost:2336".into(), Stats::with_picker(FirstPicker))
    }

    fn connected_app() -> App<FirstPicker> {
        let mut app = test_app();
        let _ = app.handle(AppEvent::Connecting);
        let _ = app.handle(AppEvent::Connected);
        app
    }

    #[test]
    fn connect_flow_reports_progress() {
        let app = connected_app();

        let lines: Vec<_> = app.console().lines().collect();
        assert_eq!(lines, ["Connecting to Yo server ...", "Connected to Yo server"]);
        assert_eq!(app.connection_state(), ConnectionState::Connected);
    }

    #[test]
    fn connect_failure_returns_to_disconnected() {
        let mut app = test_app();
        let _ = app.handle(AppEvent::Connecting);
        let _ = app.handle(AppEvent::ConnectFailed { cause: "connection refused".into() });

        assert_eq!(app.connection_state(), ConnectionState::Disconnected);
        assert_eq!(
            app.console().lines().last(),
            Some("-- Could not connect to server: connection refused")
        );
    }

    #[test]
    fn intents_are_gated_on_connection_state() {
        let mut app = test_app();
        assert!(app.send_yo().is_empty());
        assert!(app.send_howdy().is_empty());
        assert!(app.disconnect().is_empty());

        let mut app = connected_app();
        assert_eq!(app.send_yo(), [AppAction::SendIntent(Intent::Yo)]);
        assert_eq!(app.send_howdy(), [AppAction::SendIntent(Intent::Howdy)]);
        assert!(app.connect().is_empty());
    }

    #[test]
    fn keys_map_to_intents() {
        let mut app = connected_app();

        assert_eq!(app.handle(AppEvent::Key(KeyInput::Char('y'))), [AppAction::SendIntent(
            Intent::Yo
        )]);
        assert_eq!(app.handle(AppEvent::Key(KeyInput::Char('h'))), [AppAction::SendIntent(
            Intent::Howdy
        )]);
        assert_eq!(app.handle(AppEvent::Key(KeyInput::Char('q'))), [AppAction::Quit]);
        assert_eq!(app.handle(AppEvent::Key(KeyInput::Esc)), [AppAction::Quit]);
        assert!(app.handle(AppEvent::Key(KeyInput::Char('x'))).is_empty());
    }
}
