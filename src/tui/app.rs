//! Main TUI application.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use tracing::{debug, info, trace};

use super::event::{Event, EventSource};
use super::input::{Command, map_key};
use super::render::render;
use super::state::AppState;
use crate::signal::SignalDispatcher;

/// Main TUI application.
pub struct App {
    state: AppState,
    signals: Box<dyn SignalDispatcher>,
    quit: Arc<AtomicBool>,
}

impl App {
    /// `quit` is shared with the signal handler; setting it ends the loop
    /// after the current tick.
    pub fn new(state: AppState, signals: Box<dyn SignalDispatcher>, quit: Arc<AtomicBool>) -> Self {
        Self {
            state,
            signals,
            quit,
        }
    }

    /// Runs the TUI application until quit.
    pub fn run(mut self, interval: Duration) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal, interval);

        // Restore terminal even if the loop failed
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        interval: Duration,
    ) -> io::Result<()> {
        let mut events = EventSource::new(interval);
        info!(interval_ms = interval.as_millis() as u64, "monitor started");

        self.state.refresh_active();
        while !self.quit.load(Ordering::SeqCst) {
            terminal.draw(|frame| render(frame, &mut self.state))?;
            let event = events.next()?;
            self.handle(event);
        }

        info!("monitor stopped");
        Ok(())
    }

    /// Handles one wakeup: applies the command, if any, then ticks the
    /// selected tab. A tab that just became selected is refreshed here.
    fn handle(&mut self, event: Event) {
        trace!(?event, "wakeup");
        match event {
            Event::Key(key) => match map_key(key) {
                Some(Command::Quit) => {
                    self.quit.store(true, Ordering::SeqCst);
                    return;
                }
                Some(command) => {
                    if let Some(highlight) = self.state.apply(command, self.signals.as_mut()) {
                        debug!(selected = highlight.selected, "tab selected");
                    }
                }
                None => {}
            },
            // The next draw re-fits the table to the new geometry.
            Event::Resize(width, height) => debug!(width, height, "terminal resized"),
            Event::Tick => {}
        }
        self.state.refresh_active();
    }
}
