//! TUI widgets.

mod footer;
mod header;
mod info;
mod table;

pub use footer::render_footer;
pub use header::render_header;
pub use info::{info_height, render_info};
pub use table::{TableSink, render_table, visible_rows_for};
