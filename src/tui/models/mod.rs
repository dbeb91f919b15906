//! Row payloads of the tab tables.

mod net_row;
mod process_row;

pub use net_row::*;
pub use process_row::*;

use std::cmp::Ordering;

use crate::tui::table::TableRow;

/// A process-table row that is created from a listing and fed counters
/// every tick.
pub trait MetricRow: TableRow {
    /// Per-entity data returned by the listing.
    type Raw;
    /// Counters returned by a sample.
    type Counters;

    fn create(pid: u32, raw: Self::Raw) -> Self;

    /// Replaces listing data that can change while the entity lives.
    fn refresh_identity(&mut self, raw: Self::Raw);

    /// Feeds one counter sample taken at `timestamp` (ms since boot).
    fn record(&mut self, counters: Self::Counters, timestamp: u64);

    /// Tab ordering; `Less` sorts first.
    fn compare(a: &Self, b: &Self) -> Ordering;
}
