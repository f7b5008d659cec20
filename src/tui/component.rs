//! Component trait pattern for TUI screens.
//!
//! Each screen owns its own selection state, handles keyboard input against
//! the shared content tables, and reports navigation back to `AppState`
//! through [`ScreenEvent`]s.

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::tui::Theme;

/// A screen that needs read access to shared context while handling input
/// and rendering.
pub trait ContextualComponent {
    /// The type of context this component needs
    type Context;

    /// Event type this component can emit
    type Event;

    /// Handle keyboard input with access to shared context.
    ///
    /// Returns `Some(Event)` if the parent has to act; `None` if the input
    /// was handled internally or ignored.
    fn handle_input(&mut self, key: KeyEvent, context: &Self::Context) -> Option<Self::Event>;

    /// Render the component within `area`.
    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, context: &Self::Context);

    /// Returns true while the component is capturing text input, so global
    /// shortcuts must not fire.
    fn is_capturing_text(&self) -> bool {
        false
    }
}

/// Navigation requests emitted by screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenEvent {
    /// Open the role list of a branch (key as listed in the catalog)
    OpenBranch(String),
    /// Open the roadmap for a role key
    OpenRoadmap(String),
    /// Return to the previous screen
    Back,
    /// Show a message in the status bar
    Status(String),
}
