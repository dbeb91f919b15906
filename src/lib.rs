//! glimpse - live terminal monitor for processes, GPU clients, connections
//! and devices on Linux.
//!
//! The library holds everything the `glimpse` binary runs:
//! - `collector` - procfs/sysfs readers behind a mockable filesystem
//! - `provider` - the listing and counter traits the tabs consume
//! - `reconcile`, `rates` - entity tracking and counter deltas
//! - `tui` - tabs, cursor, navigation and rendering

pub mod collector;
pub mod fmt;
pub mod provider;
pub mod rates;
pub mod reconcile;
pub mod signal;
pub mod tui;
