//! Status bar widget for displaying status messages and help

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::preferences::ThemeStore;

use super::{AppState, Screen, Theme};

/// Global bindings shown on every screen.
const GLOBAL_HINTS: &[(&str, &str)] = &[("t", "Theme"), ("q", "Quit")];

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar with the current message and contextual help
    pub fn render(
        f: &mut Frame,
        area: Rect,
        state: &AppState,
        theme_store: &ThemeStore,
        theme: &Theme,
    ) {
        let message_line = if state.status_message.is_empty() {
            Line::from("")
        } else if let Some(color) = state.status_color_override {
            Line::from(Span::styled(
                state.status_message.as_str(),
                Style::default().fg(color),
            ))
        } else {
            Line::from(Span::styled(
                state.status_message.as_str(),
                Style::default().fg(theme.text),
            ))
        };

        let mode_label = if theme_store.is_transitioning() {
            format!(" {} (switching) ", theme_store.mode())
        } else {
            format!(" {} ", theme_store.mode())
        };

        let status = Paragraph::new(vec![message_line, Self::help_line(state, theme)])
            .style(Style::default().bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Status ")
                    .title_bottom(Line::from(mode_label).right_aligned())
                    .style(Style::default().fg(theme.primary).bg(theme.background)),
            );

        f.render_widget(status, area);
    }

    /// Key hints for the active screen, then the global ones
    fn help_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let screen_hints = Self::screen_hints(state);
        // Typed characters go to the search box, not to shortcuts
        let global_hints = if state.current_screen().is_capturing_text() {
            &[][..]
        } else {
            GLOBAL_HINTS
        };

        let mut spans: Vec<Span<'static>> = Vec::new();
        for (i, (key, action)) in screen_hints.iter().chain(global_hints).enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(
                *key,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(*action, Style::default().fg(theme.text_muted)));
        }
        Line::from(spans)
    }

    fn screen_hints(state: &AppState) -> &'static [(&'static str, &'static str)] {
        match state.current_screen() {
            Screen::Branches(list) if list.searching => &[("Enter/Esc", "Done")],
            Screen::Branches(_) => &[("Up/Down", "Move"), ("Enter", "Open"), ("/", "Search")],
            Screen::Branch(_) => &[
                ("Up/Down", "Move"),
                ("Enter", "Roadmap"),
                ("Tab", "Level"),
                ("Esc", "Back"),
            ],
            Screen::Roadmap(_) => &[
                ("Up/Down", "Step"),
                ("Space", "Done"),
                ("Enter", "Expand"),
                ("Esc", "Back"),
            ],
        }
    }
}
