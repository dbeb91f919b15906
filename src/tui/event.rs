//! Event handling for TUI.
//!
//! Polls the terminal on the UI thread. A wakeup is a key, a resize, or the
//! refresh deadline passing, whichever comes first.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// Refresh interval elapsed.
    Tick,
    /// Keyboard input.
    Key(KeyEvent),
    /// Terminal resize (width, height).
    Resize(u16, u16),
}

/// Fixed-interval deadline; the next tick is due one interval after the
/// previous one fired.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    interval: Duration,
    due: Instant,
}

impl Deadline {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            due: now + interval,
        }
    }

    /// Time left until the tick, or `None` if it is due.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.due.checked_duration_since(now).filter(|d| !d.is_zero())
    }

    /// Starts the next interval.
    pub fn reset(&mut self, now: Instant) {
        self.due = now + self.interval;
    }
}

/// Blocking event source for the poll loop.
pub struct EventSource {
    deadline: Deadline,
}

impl EventSource {
    /// Creates an event source with the specified refresh interval.
    pub fn new(interval: Duration) -> Self {
        Self {
            deadline: Deadline::new(interval, Instant::now()),
        }
    }

    /// Blocks until the next event.
    pub fn next(&mut self) -> io::Result<Event> {
        loop {
            let now = Instant::now();
            let Some(remaining) = self.deadline.remaining(now) else {
                self.deadline.reset(now);
                return Ok(Event::Tick);
            };
            if event::poll(remaining)? {
                match event::read()? {
                    CrosstermEvent::Key(key) => return Ok(Event::Key(key)),
                    CrosstermEvent::Resize(w, h) => return Ok(Event::Resize(w, h)),
                    _ => continue,
                }
            }
        }
    }
}
