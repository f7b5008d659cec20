//! Branch catalog screen with incremental search.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::content::{BranchSummary, ContentStore};

use super::component::{ContextualComponent, ScreenEvent};
use super::Theme;

/// Branch list state
#[derive(Debug, Clone, Default)]
pub struct BranchList {
    /// Current search text
    pub query: String,
    /// Whether keystrokes go to the search box
    pub searching: bool,
    /// Index into the filtered list
    pub selected: usize,
}

impl BranchList {
    /// Creates an unfiltered list with the first branch selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn visible<'a>(&self, content: &'a ContentStore) -> Vec<&'a BranchSummary> {
        content.search_branches(&self.query)
    }

    fn clamp_selection(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

impl ContextualComponent for BranchList {
    type Context = ContentStore;
    type Event = ScreenEvent;

    fn handle_input(&mut self, key: KeyEvent, content: &ContentStore) -> Option<ScreenEvent> {
        if self.searching {
            match key.code {
                KeyCode::Char(c) => self.query.push(c),
                KeyCode::Backspace => {
                    self.query.pop();
                }
                KeyCode::Enter | KeyCode::Esc => self.searching = false,
                _ => {}
            }
            self.clamp_selection(self.visible(content).len());
            return None;
        }

        let visible = self.visible(content);
        match key.code {
            KeyCode::Char('/') => {
                self.searching = true;
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < visible.len() {
                    self.selected += 1;
                }
                None
            }
            KeyCode::Esc if !self.query.is_empty() => {
                self.query.clear();
                self.selected = 0;
                None
            }
            KeyCode::Enter => visible
                .get(self.selected)
                .map(|summary| ScreenEvent::OpenBranch(summary.id.clone())),
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, content: &ContentStore) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(3)])
            .split(area);

        let search_style = if self.searching {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.text_muted)
        };
        let search_text = if self.query.is_empty() && !self.searching {
            "Press / to search".to_string()
        } else {
            format!("{}{}", self.query, if self.searching { "_" } else { "" })
        };
        let search = Paragraph::new(search_text).style(search_style).block(
            Block::default()
                .title(" Search ")
                .borders(Borders::ALL)
                .style(Style::default().bg(theme.background)),
        );
        f.render_widget(search, chunks[0]);

        let visible = self.visible(content);
        let items: Vec<ListItem> = visible
            .iter()
            .map(|summary| {
                let detail = if content.get_branch(&summary.id).is_some() {
                    Span::styled("  roles available", Style::default().fg(theme.success))
                } else {
                    Span::raw("")
                };
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(
                            summary.name.as_str(),
                            Style::default()
                                .fg(theme.text)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(
                            format!("  {} roles", summary.role_count),
                            Style::default().fg(theme.text_secondary),
                        ),
                        detail,
                    ]),
                    Line::from(Span::styled(
                        format!("  {}", summary.description),
                        Style::default().fg(theme.text_muted),
                    )),
                ])
            })
            .collect();

        let title = format!(" Engineering Branches ({}) ", visible.len());
        let list = List::new(items)
            .block(
                Block::default()
                    .title(title)
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
        if !visible.is_empty() {
            list_state.select(Some(self.selected.min(visible.len() - 1)));
        }
        f.render_stateful_widget(list, chunks[1], &mut list_state);
    }

    fn is_capturing_text(&self) -> bool {
        self.searching
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(list: &mut BranchList, text: &str, content: &ContentStore) {
        for c in text.chars() {
            list.handle_input(key(KeyCode::Char(c)), content);
        }
    }

    #[test]
    fn test_enter_opens_selected_branch() {
        let content = ContentStore::load().unwrap();
        let mut list = BranchList::new();
        let first = content.catalog()[0].id.clone();
        assert_eq!(
            list.handle_input(key(KeyCode::Enter), &content),
            Some(ScreenEvent::OpenBranch(first))
        );
    }

    #[test]
    fn test_search_filters_and_clamps() {
        let content = ContentStore::load().unwrap();
        let mut list = BranchList::new();
        list.selected = 7;

        list.handle_input(key(KeyCode::Char('/')), &content);
        assert!(list.is_capturing_text());
        type_text(&mut list, "aero", &content);
        assert_eq!(list.selected, 0);
        list.handle_input(key(KeyCode::Enter), &content);
        assert!(!list.is_capturing_text());

        assert_eq!(
            list.handle_input(key(KeyCode::Enter), &content),
            Some(ScreenEvent::OpenBranch("ae".to_string()))
        );

        // Esc clears a finished search
        list.handle_input(key(KeyCode::Esc), &content);
        assert!(list.query.is_empty());
    }

    #[test]
    fn test_no_match_enter_does_nothing() {
        let content = ContentStore::load().unwrap();
        let mut list = BranchList::new();
        list.handle_input(key(KeyCode::Char('/')), &content);
        type_text(&mut list, "zzzz", &content);
        list.handle_input(key(KeyCode::Esc), &content);
        assert_eq!(list.handle_input(key(KeyCode::Enter), &content), None);
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let content = ContentStore::load().unwrap();
        let mut list = BranchList::new();
        list.handle_input(key(KeyCode::Up), &content);
        assert_eq!(list.selected, 0);
        for _ in 0..20 {
            list.handle_input(key(KeyCode::Down), &content);
        }
        assert_eq!(list.selected, content.catalog().len() - 1);
    }
}
