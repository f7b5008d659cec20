//! Role list for one branch, filterable by level.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::content::{Branch, BranchRole, ContentStore, LevelFilter};

use super::component::{ContextualComponent, ScreenEvent};
use super::Theme;

/// Branch detail state
#[derive(Debug, Clone)]
pub struct BranchDetail {
    /// Resolved branch id (always present in the content store)
    pub branch_id: String,
    /// Active level filter
    pub filter: LevelFilter,
    /// Index into the filtered roles
    pub selected: usize,
}

impl BranchDetail {
    /// Shows all roles of `branch`.
    #[must_use]
    pub fn new(branch: &Branch) -> Self {
        Self {
            branch_id: branch.id.clone(),
            filter: LevelFilter::All,
            selected: 0,
        }
    }

    fn branch<'a>(&self, content: &'a ContentStore) -> &'a Branch {
        content.resolve_branch(Some(self.branch_id.as_str()))
    }

    /// Roles passing the current filter.
    #[must_use]
    pub fn visible_roles<'a>(&self, content: &'a ContentStore) -> Vec<&'a BranchRole> {
        self.branch(content).roles_at(self.filter)
    }
}

impl ContextualComponent for BranchDetail {
    type Context = ContentStore;
    type Event = ScreenEvent;

    fn handle_input(&mut self, key: KeyEvent, content: &ContentStore) -> Option<ScreenEvent> {
        let roles = self.visible_roles(content);
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => Some(ScreenEvent::Back),
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < roles.len() {
                    self.selected += 1;
                }
                None
            }
            KeyCode::Tab | KeyCode::Char('f') => {
                self.filter = self.filter.next();
                self.selected = 0;
                let shown = self.visible_roles(content).len();
                Some(ScreenEvent::Status(format!(
                    "Level: {} ({shown} roles)",
                    self.filter
                )))
            }
            KeyCode::Enter => roles
                .get(self.selected)
                .map(|role| ScreenEvent::OpenRoadmap(role.roadmap_key())),
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, content: &ContentStore) {
        let branch = self.branch(content);
        let roles = self.visible_roles(content);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(5)])
            .split(area);

        let stats = Paragraph::new(Line::from(vec![
            Span::styled("Salary ", Style::default().fg(theme.text_muted)),
            Span::styled(&branch.stats.avg_salary, Style::default().fg(theme.text)),
            Span::styled("   Growth ", Style::default().fg(theme.text_muted)),
            Span::styled(&branch.stats.job_growth, Style::default().fg(theme.success)),
            Span::styled("   Roles ", Style::default().fg(theme.text_muted)),
            Span::styled(
                branch.stats.total_roles.to_string(),
                Style::default().fg(theme.text),
            ),
            Span::styled("   Level ", Style::default().fg(theme.text_muted)),
            Span::styled(self.filter.to_string(), Style::default().fg(theme.accent)),
        ]))
        .block(
            Block::default()
                .title(format!(" {} ", branch.name))
                .borders(Borders::ALL)
                .style(Style::default().fg(theme.primary).bg(theme.background)),
        );
        f.render_widget(stats, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[1]);

        let items: Vec<ListItem> = roles
            .iter()
            .map(|role| {
                ListItem::new(Line::from(vec![
                    Span::styled("● ", Style::default().fg(theme.role_color(&role.color))),
                    Span::styled(role.title.as_str(), Style::default().fg(theme.text)),
                    Span::styled(
                        format!("  {}", role.level),
                        Style::default().fg(theme.level_color(role.level)),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(format!(" Roles ({}) ", roles.len()))
                    .borders(Borders::ALL)
                    .style(Style::default().fg(theme.primary).bg(theme.background)),
            )
            .highlight_style(
                Style::default()
                    .bg(theme.surface)
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");

        let mut list_state = ListState::default();
        if !roles.is_empty() {
            list_state.select(Some(self.selected.min(roles.len() - 1)));
        }
        f.render_stateful_widget(list, body[0], &mut list_state);

        let detail_lines = roles
            .get(self.selected)
            .map_or_else(|| vec![Line::from("No roles at this level")], |role| {
                role_lines(role, theme)
            });
        let detail = Paragraph::new(detail_lines)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(" Details ")
                    .borders(Borders::ALL)
                    .style(Style::default().fg(theme.primary).bg(theme.background)),
            );
        f.render_widget(detail, body[1]);
    }
}

fn role_lines<'a>(role: &'a BranchRole, theme: &Theme) -> Vec<Line<'a>> {
    let label = |text: &'static str| Span::styled(text, Style::default().fg(theme.text_muted));
    vec![
        Line::from(Span::styled(
            role.title.as_str(),
            Style::default()
                .fg(theme.role_color(&role.color))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            role.description.as_str(),
            Style::default().fg(theme.text),
        )),
        Line::from(""),
        Line::from(vec![
            label("Level:   "),
            Span::styled(
                role.level.label(),
                Style::default().fg(theme.level_color(role.level)),
            ),
        ]),
        Line::from(vec![
            label("Salary:  "),
            Span::styled(role.avg_salary.as_str(), Style::default().fg(theme.text)),
        ]),
        Line::from(vec![
            label("Demand:  "),
            Span::styled(role.demand.as_str(), Style::default().fg(theme.text)),
        ]),
        Line::from(vec![
            label("Learn:   "),
            Span::styled(role.time_to_learn.as_str(), Style::default().fg(theme.text)),
        ]),
        Line::from(vec![
            label("Skills:  "),
            Span::styled(role.skills.join(", "), Style::default().fg(theme.accent)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Enter: view roadmap",
            Style::default().fg(theme.text_muted),
        )),
    ]
}
