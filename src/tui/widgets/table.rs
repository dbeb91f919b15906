//! Tab table widget.
//!
//! The tab emits its visible window into a [`TableSink`], which is then
//! turned into a ratatui table whose rows are exactly that window.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::widgets::{Block, Borders, Row, Table, TableState};

use crate::fmt::truncate;
use crate::tui::state::AppState;
use crate::tui::style::Styles;
use crate::tui::table::RenderSink;

/// Upper bound for any column except the last, which takes what is left.
const MAX_COLUMN_WIDTH: usize = 24;

/// Collects one emission.
#[derive(Debug, Default)]
pub struct TableSink {
    rows: Vec<Option<Vec<String>>>,
    highlight: Option<usize>,
}

impl TableSink {
    fn slot(&mut self, index: usize) -> &mut Option<Vec<String>> {
        if self.rows.len() <= index {
            self.rows.resize(index + 1, None);
        }
        &mut self.rows[index]
    }

    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    /// Drawn rows in window order; cleared rows are `None`.
    pub fn rows(&self) -> &[Option<Vec<String>>] {
        &self.rows
    }

    /// Column widths fitted to headers and drawn cells.
    fn widths(&self, headers: &[&str]) -> Vec<Constraint> {
        let last = headers.len().saturating_sub(1);
        headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                if i == last {
                    return Constraint::Fill(1);
                }
                let widest = self
                    .rows
                    .iter()
                    .flatten()
                    .filter_map(|cells| cells.get(i))
                    .map(|c| c.chars().count())
                    .chain(std::iter::once(header.len()))
                    .max()
                    .unwrap_or(0)
                    .min(MAX_COLUMN_WIDTH);
                Constraint::Length(widest as u16)
            })
            .collect()
    }
}

impl RenderSink for TableSink {
    fn draw_row(&mut self, index: usize, columns: &[String]) {
        *self.slot(index) = Some(columns.to_vec());
    }

    fn clear_row(&mut self, index: usize) {
        *self.slot(index) = None;
    }

    fn highlight_row(&mut self, index: usize) {
        self.highlight = Some(index);
    }
}

/// Window rows that fit in `area`: borders and the header row take three
/// lines, and the window holds `visible_rows + 1` rows.
pub fn visible_rows_for(area: Rect) -> usize {
    usize::from(area.height.saturating_sub(4))
}

/// Renders the active tab's table.
pub fn render_table(frame: &mut Frame, area: Rect, state: &mut AppState) {
    state.resize_active(visible_rows_for(area));

    let Some(view) = state.active_view() else {
        return;
    };
    let headers = view.headers();
    let mut sink = TableSink::default();
    view.emit(&mut sink);

    let rows: Vec<Row> = sink
        .rows()
        .iter()
        .map(|row| match row {
            Some(cells) => Row::new(
                cells
                    .iter()
                    .enumerate()
                    .map(|(i, c)| {
                        if i + 1 == cells.len() {
                            c.clone()
                        } else {
                            truncate(c, MAX_COLUMN_WIDTH)
                        }
                    })
                    .collect::<Vec<_>>(),
            ),
            None => Row::default(),
        })
        .collect();

    let title = if state.sort_locked {
        format!(" {} rows [LOCKED] ", view.len())
    } else {
        format!(" {} rows ", view.len())
    };
    let table = Table::new(rows, sink.widths(headers))
        .header(Row::new(headers.iter().copied()).style(Styles::table_header()))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .style(Styles::default()),
        )
        .column_spacing(1)
        .row_highlight_style(Styles::selected());

    let mut table_state = TableState::default().with_selected(sink.highlight());
    frame.render_stateful_widget(table, area, &mut table_state);
}
