//! Terminal user interface.
//!
//! Tabs share one table/cursor engine ([`table`]) and are selected through
//! the [`navbar`]. The app loop is single-threaded: each wakeup (key, resize
//! or refresh deadline) applies at most one command and then refreshes the
//! selected tab.

mod app;
mod event;
mod input;
pub mod models;
pub mod navbar;
mod render;
pub mod state;
mod style;
pub mod table;
mod widgets;

pub use app::App;
pub use input::{Command, map_key};
pub use state::{AppState, TabKind};
