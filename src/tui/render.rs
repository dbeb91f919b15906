//! Main rendering logic for TUI.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use super::state::AppState;
use super::widgets::{info_height, render_footer, render_header, render_info, render_table};

/// Main render function. Only the selected tab is drawn.
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();
    let (title, lines, has_table) = match state.active_view() {
        Some(view) => (
            state
                .active()
                .map(|t| t.kind().name())
                .unwrap_or_default(),
            view.info_lines(),
            !view.headers().is_empty(),
        ),
        None => ("", Vec::new(), false),
    };

    if !has_table {
        // Header, info, footer
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);
        render_header(frame, chunks[0], state);
        render_info(frame, chunks[1], title, &lines);
        render_footer(frame, chunks[2], state);
        return;
    }

    // Info never takes more than half the screen
    let info = info_height(&lines).min(area.height / 2);
    let chunks = Layout::vertical([
        Constraint::Length(1),    // Header
        Constraint::Length(info), // Info panel
        Constraint::Min(4),       // Table
        Constraint::Length(1),    // Footer
    ])
    .split(area);

    render_header(frame, chunks[0], state);
    render_info(frame, chunks[1], title, &lines);
    render_table(frame, chunks[2], state);
    render_footer(frame, chunks[3], state);
}
