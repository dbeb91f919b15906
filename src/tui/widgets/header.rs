//! Header widget showing the clock and the tab bar.

use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::fmt::format_clock;
use crate::tui::state::AppState;
use crate::tui::style::Styles;

/// Renders the header bar.
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::horizontal([
        Constraint::Length(21), // Time
        Constraint::Min(20),    // Tabs
    ])
    .split(area);

    let time = Paragraph::new(format!(" {}", format_clock(Local::now()))).style(Styles::header());
    frame.render_widget(time, chunks[0]);

    let selected = state.nav().selected();
    let tabs: Vec<Span> = state
        .tab_kinds()
        .iter()
        .enumerate()
        .flat_map(|(i, tab)| {
            let style = if i == selected {
                Styles::tab_active()
            } else {
                Styles::tab_inactive()
            };
            vec![Span::raw(" "), Span::styled(format!(" {} ", tab.name()), style)]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(tabs)).style(Styles::header()), chunks[1]);
}
