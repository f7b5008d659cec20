//! Terminal user interface components and state management.
//!
//! This module contains the main TUI loop, `AppState`, event handling,
//! and the screen stack (branch catalog, branch roles, roadmap).

// Input handlers use Result<bool> for consistency even when they never fail
#![allow(clippy::unnecessary_wraps)]

pub mod branch_detail;
pub mod branch_list;
pub mod component;
pub mod roadmap_view;
pub mod status_bar;
pub mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;
use tracing::debug;

use crate::constants::APP_NAME;
use crate::context::AppContext;
use crate::preferences::ToggleOutcome;

// Re-export TUI components
pub use branch_detail::BranchDetail;
pub use branch_list::BranchList;
pub use component::{ContextualComponent, ScreenEvent};
pub use roadmap_view::RoadmapView;
pub use status_bar::StatusBar;
pub use theme::Theme;

/// One entry of the navigation stack.
#[derive(Debug, Clone)]
pub enum Screen {
    /// Catalog of engineering branches
    Branches(BranchList),
    /// Roles of one branch
    Branch(BranchDetail),
    /// A role's roadmap with session progress
    Roadmap(RoadmapView),
}

impl Screen {
    /// Title shown in the title bar.
    fn title(&self, ctx: &AppContext) -> String {
        match self {
            Self::Branches(_) => "Branches".to_string(),
            Self::Branch(detail) => ctx
                .content
                .resolve_branch(Some(detail.branch_id.as_str()))
                .name
                .clone(),
            Self::Roadmap(view) => format!("{} Roadmap", view.roadmap(&ctx.content).role),
        }
    }

    /// Returns true while the screen takes raw text input.
    #[must_use]
    pub fn is_capturing_text(&self) -> bool {
        match self {
            Self::Branches(list) => list.is_capturing_text(),
            Self::Branch(detail) => detail.is_capturing_text(),
            Self::Roadmap(view) => view.is_capturing_text(),
        }
    }

    fn handle_input(&mut self, key: KeyEvent, ctx: &AppContext) -> Option<ScreenEvent> {
        match self {
            Self::Branches(list) => list.handle_input(key, &ctx.content),
            Self::Branch(detail) => detail.handle_input(key, &ctx.content),
            Self::Roadmap(view) => view.handle_input(key, &ctx.content),
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, ctx: &AppContext) {
        match self {
            Self::Branches(list) => list.render(f, area, theme, &ctx.content),
            Self::Branch(detail) => detail.render(f, area, theme, &ctx.content),
            Self::Roadmap(view) => view.render(f, area, theme, &ctx.content),
        }
    }
}

/// Application state - single source of truth for the UI
#[derive(Debug, Clone)]
pub struct AppState {
    /// Bottom of the navigation stack, never popped
    root: Screen,
    /// Screens opened on top of the root
    stack: Vec<Screen>,
    /// Status bar message
    pub status_message: String,
    /// Color override for the status message (warnings)
    pub status_color_override: Option<Color>,
    /// Active palette, following the theme store
    pub theme: Theme,
    /// Set when the user asked to quit
    pub should_quit: bool,
}

impl AppState {
    /// Starts on the branch catalog with the persisted theme.
    #[must_use]
    pub fn new(ctx: &AppContext) -> Self {
        Self {
            root: Screen::Branches(BranchList::new()),
            stack: Vec::new(),
            status_message: String::new(),
            status_color_override: None,
            theme: Theme::from_mode(ctx.theme.mode()),
            should_quit: false,
        }
    }

    /// Screen currently receiving input.
    #[must_use]
    pub fn current_screen(&self) -> &Screen {
        self.stack.last().unwrap_or(&self.root)
    }

    fn current_screen_mut(&mut self) -> &mut Screen {
        match self.stack.last_mut() {
            Some(screen) => screen,
            None => &mut self.root,
        }
    }

    /// Number of screens above the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_color_override = None;
    }

    /// Set a warning status message
    pub fn set_warning(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_color_override = Some(self.theme.warning);
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message.clear();
        self.status_color_override = None;
    }

    /// Applies a navigation event from the active screen.
    pub fn apply_event(&mut self, event: ScreenEvent, ctx: &AppContext) {
        match event {
            ScreenEvent::OpenBranch(id) => {
                let branch = ctx.content.resolve_branch(Some(id.as_str()));
                self.stack.push(Screen::Branch(BranchDetail::new(branch)));
                if branch.id == id {
                    self.clear_status();
                } else {
                    let requested = ctx
                        .content
                        .catalog()
                        .iter()
                        .find(|summary| summary.id == id)
                        .map_or(id.as_str(), |summary| summary.name.as_str());
                    self.set_warning(format!(
                        "No role details for {requested} yet, showing {}",
                        branch.name
                    ));
                }
            }
            ScreenEvent::OpenRoadmap(key) => {
                if ctx.content.get_roadmap(&key).is_some() {
                    self.clear_status();
                } else {
                    self.set_warning("No dedicated roadmap for this role, showing the general one");
                }
                self.stack
                    .push(Screen::Roadmap(RoadmapView::new(key, &ctx.content)));
            }
            ScreenEvent::Back => {
                self.stack.pop();
                self.clear_status();
            }
            ScreenEvent::Status(message) => self.set_status(message),
        }
    }

    /// Switches dark/light through the theme store.
    pub fn toggle_theme(&mut self, ctx: &mut AppContext) {
        let outcome = ctx.theme.toggle();
        self.theme = Theme::from_mode(ctx.theme.mode());
        match outcome {
            ToggleOutcome::Applied {
                mode,
                persisted: true,
            } => self.set_status(format!("Switched to {mode} theme")),
            ToggleOutcome::Applied {
                mode,
                persisted: false,
            } => self.set_warning(format!("Switched to {mode} theme (preference not saved)")),
            ToggleOutcome::Busy => self.set_warning("Theme switch already in progress"),
        }
    }
}

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui<B: Backend>(ctx: &mut AppContext, terminal: &mut Terminal<B>) -> Result<()> {
    let mut state = AppState::new(ctx);
    debug!("TUI started");

    loop {
        // The palette follows the store, which may have been toggled
        state.theme = Theme::from_mode(ctx.theme.mode());

        terminal.draw(|f| render(f, &state, ctx))?;

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key_event(&mut state, ctx, key)? {
                        break;
                    }
                }
                // Resize and everything else re-renders on the next loop
                _ => {}
            }
        }

        if state.should_quit {
            break;
        }
    }

    debug!("TUI exited");
    Ok(())
}

/// Render the UI from current state
fn render(f: &mut Frame, state: &AppState, ctx: &AppContext) {
    // Fill entire screen with theme background color first
    let full_bg = Block::default().style(Style::default().bg(state.theme.background));
    f.render_widget(full_bg, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Screen
            Constraint::Length(4), // Status bar
        ])
        .split(f.area());

    render_title_bar(f, chunks[0], state, ctx);
    state
        .current_screen()
        .render(f, chunks[1], &state.theme, ctx);
    StatusBar::render(f, chunks[2], state, &ctx.theme, &state.theme);
}

fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState, ctx: &AppContext) {
    let title = format!(" {APP_NAME} | {}", state.current_screen().title(ctx));

    let title_widget = Paragraph::new(title)
        .style(
            Style::default()
                .fg(state.theme.primary)
                .bg(state.theme.background)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().bg(state.theme.background)),
        );

    f.render_widget(title_widget, area);
}

/// Handle keyboard input events. Returns true when the app should exit.
fn handle_key_event(state: &mut AppState, ctx: &mut AppContext, key: KeyEvent) -> Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    if !state.current_screen().is_capturing_text() {
        match key.code {
            KeyCode::Char('q') => {
                state.should_quit = true;
                return Ok(true);
            }
            KeyCode::Char('t') => {
                state.toggle_theme(ctx);
                return Ok(false);
            }
            _ => {}
        }
    }

    if let Some(event) = state.current_screen_mut().handle_input(key, ctx) {
        state.apply_event(event, ctx);
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ThemeMode};
    use crate::content::ContentStore;
    use crate::preferences::MemoryPreferences;
    use ratatui::backend::TestBackend;

    fn context() -> AppContext {
        AppContext::new(
            Config::new(),
            ContentStore::load().unwrap(),
            Box::new(MemoryPreferences::new()),
        )
    }

    fn press(state: &mut AppState, ctx: &mut AppContext, code: KeyCode) -> bool {
        handle_key_event(state, ctx, KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_navigate_to_roadmap_and_back() {
        let mut ctx = context();
        let mut state = AppState::new(&ctx);

        press(&mut state, &mut ctx, KeyCode::Enter);
        assert!(matches!(state.current_screen(), Screen::Branch(_)));

        press(&mut state, &mut ctx, KeyCode::Enter);
        match state.current_screen() {
            Screen::Roadmap(view) => assert_eq!(view.roadmap(&ctx.content).role, "Full Stack Developer"),
            other => panic!("expected roadmap screen, got {other:?}"),
        }
        assert_eq!(state.depth(), 2);

        press(&mut state, &mut ctx, KeyCode::Esc);
        press(&mut state, &mut ctx, KeyCode::Esc);
        assert_eq!(state.depth(), 0);

        // Esc on the root does nothing
        press(&mut state, &mut ctx, KeyCode::Esc);
        assert!(matches!(state.current_screen(), Screen::Branches(_)));
    }

    #[test]
    fn test_branch_without_details_falls_back() {
        let mut ctx = context();
        let mut state = AppState::new(&ctx);

        // Second catalog entry has no role details
        press(&mut state, &mut ctx, KeyCode::Down);
        press(&mut state, &mut ctx, KeyCode::Enter);

        match state.current_screen() {
            Screen::Branch(detail) => assert_eq!(detail.branch_id, "cse"),
            other => panic!("expected branch screen, got {other:?}"),
        }
        assert!(state.status_message.contains("Information Technology"));
        assert_eq!(state.status_color_override, Some(state.theme.warning));
    }

    #[test]
    fn test_role_without_roadmap_warns() {
        let mut ctx = context();
        let mut state = AppState::new(&ctx);
        state.apply_event(ScreenEvent::OpenRoadmap("3".to_string()), &ctx);

        match state.current_screen() {
            Screen::Roadmap(view) => {
                assert_eq!(view.roadmap(&ctx.content).role, "Tech Professional");
            }
            other => panic!("expected roadmap screen, got {other:?}"),
        }
        assert!(state.status_message.contains("general"));
        assert!(!press(&mut state, &mut ctx, KeyCode::Down));
    }

    #[test]
    fn test_theme_toggle_is_locked_during_transition() {
        let mut ctx = context();
        let mut state = AppState::new(&ctx);
        assert_eq!(state.theme, Theme::dark());

        press(&mut state, &mut ctx, KeyCode::Char('t'));
        assert_eq!(ctx.theme.mode(), ThemeMode::Light);
        assert_eq!(state.theme, Theme::light());
        assert_eq!(state.status_message, "Switched to light theme");

        press(&mut state, &mut ctx, KeyCode::Char('t'));
        assert_eq!(ctx.theme.mode(), ThemeMode::Light);
        assert_eq!(state.status_message, "Theme switch already in progress");
    }

    #[test]
    fn test_search_captures_shortcuts() {
        let mut ctx = context();
        let mut state = AppState::new(&ctx);

        press(&mut state, &mut ctx, KeyCode::Char('/'));
        // 't' and 'q' are typed, not handled as shortcuts
        assert!(!press(&mut state, &mut ctx, KeyCode::Char('t')));
        assert!(!press(&mut state, &mut ctx, KeyCode::Char('q')));
        assert_eq!(ctx.theme.mode(), ThemeMode::Dark);
        match state.current_screen() {
            Screen::Branches(list) => assert_eq!(list.query, "tq"),
            other => panic!("expected branch list, got {other:?}"),
        }

        press(&mut state, &mut ctx, KeyCode::Esc);
        assert!(press(&mut state, &mut ctx, KeyCode::Char('q')));
        assert!(state.should_quit);
    }

    #[test]
    fn test_render_each_screen() {
        let mut ctx = context();
        let mut state = AppState::new(&ctx);
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();

        terminal.draw(|f| render(f, &state, &ctx)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Engineering Branches (8)"));
        assert!(text.contains("Computer Science & Engineering"));

        press(&mut state, &mut ctx, KeyCode::Enter);
        terminal.draw(|f| render(f, &state, &ctx)).unwrap();
        assert!(screen_text(&terminal).contains("Roles (45)"));

        press(&mut state, &mut ctx, KeyCode::Enter);
        press(&mut state, &mut ctx, KeyCode::Char(' '));
        terminal.draw(|f| render(f, &state, &ctx)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Full Stack Developer Roadmap"));
        assert!(text.contains("20% (1/5)"));
    }
}
