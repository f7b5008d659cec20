//! Roadmap screen: steps, resources and session progress.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::content::{ContentStore, Roadmap};
use crate::progress::ProgressTracker;

use super::component::{ContextualComponent, ScreenEvent};
use super::Theme;

/// Roadmap view state. Progress is dropped when the view is closed.
#[derive(Debug, Clone)]
pub struct RoadmapView {
    /// Role key as requested; unknown keys show the default roadmap
    pub role_key: String,
    /// Completion and expansion per step
    pub tracker: ProgressTracker,
    /// Step under the cursor
    pub selected: usize,
}

impl RoadmapView {
    /// Opens the roadmap for `role_key` with nothing completed.
    #[must_use]
    pub fn new(role_key: impl Into<String>, content: &ContentStore) -> Self {
        let role_key = role_key.into();
        let total = content.resolve_roadmap(Some(role_key.as_str())).step_count();
        Self {
            role_key,
            tracker: ProgressTracker::new(total),
            selected: 0,
        }
    }

    /// The roadmap on display.
    #[must_use]
    pub fn roadmap<'a>(&self, content: &'a ContentStore) -> &'a Roadmap {
        content.resolve_roadmap(Some(self.role_key.as_str()))
    }
}

impl ContextualComponent for RoadmapView {
    type Context = ContentStore;
    type Event = ScreenEvent;

    fn handle_input(&mut self, key: KeyEvent, _content: &ContentStore) -> Option<ScreenEvent> {
        let total = self.tracker.total_steps();
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => Some(ScreenEvent::Back),
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < total {
                    self.selected += 1;
                }
                None
            }
            KeyCode::Enter => {
                self.tracker.toggle_expanded(self.selected);
                None
            }
            KeyCode::Char(' ' | 'x') => {
                let done = self.tracker.toggle_step(self.selected).len();
                Some(ScreenEvent::Status(format!(
                    "Progress: {}% ({done}/{total} steps)",
                    self.tracker.percentage()
                )))
            }
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, content: &ContentStore) {
        let roadmap = self.roadmap(content);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Overview
                Constraint::Length(3), // Progress gauge
                Constraint::Min(5),    // Steps
            ])
            .split(area);

        let overview = Paragraph::new(vec![
            Line::from(Span::styled(
                roadmap.description.as_str(),
                Style::default().fg(theme.text),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Duration ", Style::default().fg(theme.text_muted)),
                Span::styled(roadmap.duration.as_str(), Style::default().fg(theme.text)),
                Span::styled("   Difficulty ", Style::default().fg(theme.text_muted)),
                Span::styled(
                    roadmap.difficulty.label(),
                    Style::default().fg(theme.level_color(roadmap.difficulty)),
                ),
            ]),
        ])
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(format!(" {} Roadmap ", roadmap.role))
                .borders(Borders::ALL)
                .style(Style::default().fg(theme.primary).bg(theme.background)),
        );
        f.render_widget(overview, chunks[0]);

        let percent = self.tracker.percentage();
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title(" Progress ")
                    .borders(Borders::ALL)
                    .style(Style::default().fg(theme.primary).bg(theme.background)),
            )
            .gauge_style(Style::default().fg(theme.success).bg(theme.surface))
            .label(format!(
                "{percent}% ({}/{})",
                self.tracker.completed_count(),
                self.tracker.total_steps()
            ))
            .percent(u16::from(percent));
        f.render_widget(gauge, chunks[1]);

        let (lines, selected_line) = self.step_lines(roadmap, theme);
        let visible_rows = usize::from(chunks[2].height.saturating_sub(2));
        // Keep the selected step header inside the viewport
        let scroll = (selected_line + 2).saturating_sub(visible_rows);
        let steps = Paragraph::new(lines)
            .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0))
            .block(
                Block::default()
                    .title(" Steps ")
                    .borders(Borders::ALL)
                    .style(Style::default().fg(theme.primary).bg(theme.background)),
            );
        f.render_widget(steps, chunks[2]);
    }
}

impl RoadmapView {
    /// Step, project and certification lines plus the line index of the
    /// selected step's header.
    fn step_lines<'a>(&self, roadmap: &'a Roadmap, theme: &Theme) -> (Vec<Line<'a>>, usize) {
        let mut lines = Vec::new();
        let mut selected_line = 0;

        for (index, step) in roadmap.steps.iter().enumerate() {
            let is_selected = index == self.selected;
            if is_selected {
                selected_line = lines.len();
            }

            let (mark, mark_color) = if self.tracker.is_completed(index) {
                ("[x]", theme.success)
            } else {
                ("[ ]", theme.text_muted)
            };
            let mut title_style = Style::default().fg(theme.text).add_modifier(Modifier::BOLD);
            if is_selected {
                title_style = title_style.fg(theme.accent).bg(theme.surface);
            }
            let fold = if self.tracker.is_expanded(index) { "v" } else { ">" };

            lines.push(Line::from(vec![
                Span::styled(format!("{fold} "), Style::default().fg(theme.text_muted)),
                Span::styled(format!("{mark} "), Style::default().fg(mark_color)),
                Span::styled(step.title.as_str(), title_style),
                Span::styled(
                    format!("  {}", step.duration),
                    Style::default().fg(theme.text_secondary),
                ),
            ]));

            if self.tracker.is_expanded(index) {
                for item in &step.items {
                    lines.push(Line::from(vec![
                        Span::raw("      - "),
                        Span::styled(item.name.as_str(), Style::default().fg(theme.text)),
                    ]));
                    for resource in &item.resources {
                        lines.push(Line::from(vec![
                            Span::raw("          "),
                            Span::styled(
                                resource.title.as_str(),
                                Style::default().fg(theme.text_secondary),
                            ),
                            Span::raw(" "),
                            Span::styled(
                                resource.url.as_str(),
                                Style::default()
                                    .fg(theme.primary)
                                    .add_modifier(Modifier::UNDERLINED),
                            ),
                        ]));
                    }
                }
            }
        }

        for (heading, entries) in [
            ("Projects", &roadmap.projects),
            ("Certifications", &roadmap.certifications),
        ] {
            if entries.is_empty() {
                continue;
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                heading,
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            )));
            for entry in entries {
                lines.push(Line::from(vec![
                    Span::raw("  - "),
                    Span::styled(entry.as_str(), Style::default().fg(theme.text)),
                ]));
            }
        }

        (lines, selected_line)
    }
}
