//! Application state for the browser TUI

use std::collections::VecDeque;
use std::io;

use crossterm::event::KeyEvent;
use tracing::{error, info, warn};
use volodex_core::{NavAction, Navigator};

use super::keymap::{command_for, KeyCommand};

/// Entries kept in the activity pane.
const ACTIVITY_CAPACITY: usize = 200;

/// Opens a card reference URL outside the terminal.
pub type Opener = Box<dyn FnMut(&str) -> io::Result<()>>;

pub struct App {
    /// Cleared by the quit key
    pub running: bool,
    pub navigator: Navigator,
    /// Shown in the header next to the title
    pub subtitle: String,
    /// Most recent first
    pub activity: VecDeque<String>,
    pub show_help: bool,
    opener: Opener,
}

impl App {
    pub fn new(navigator: Navigator, subtitle: impl Into<String>) -> Self {
        Self::with_opener(navigator, subtitle, Box::new(|url: &str| open::that(url)))
    }

    pub fn with_opener(navigator: Navigator, subtitle: impl Into<String>, opener: Opener) -> Self {
        let mut app = Self {
            running: true,
            navigator,
            subtitle: subtitle.into(),
            activity: VecDeque::new(),
            show_help: false,
            opener,
        };

        let banned: Vec<&str> = app.navigator.banned().iter().collect();
        app.log_activity(format!("Banned types: {}", banned.join(", ")));
        app.log_activity(format!(
            "{} of {} creatures allowed",
            app.navigator.filtered().len(),
            app.navigator.catalog().len()
        ));
        app
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let Some(command) = command_for(key) else {
            return;
        };

        if self.show_help && !matches!(command, KeyCommand::ToggleHelp | KeyCommand::Quit) {
            self.show_help = false;
            return;
        }

        match command {
            KeyCommand::Quit => self.running = false,
            KeyCommand::ToggleHelp => self.show_help = !self.show_help,
            KeyCommand::OpenReference => self.open_reference(),
            KeyCommand::Navigate(action) => self.navigate(action),
        }
    }

    pub fn tick(&mut self) {}

    fn navigate(&mut self, action: NavAction) {
        let before = self.navigator.state().clone();
        let before_row = self.navigator.selected_creature_index();
        if let Err(err) = self.navigator.dispatch(action.clone()) {
            error!(error = %err, ?action, "navigation failed");
            self.log_activity(format!("Navigation failed: {}", err));
            return;
        }

        let row_changed = self.navigator.selected_creature_index() != before_row;
        let state = self.navigator.state();
        let message = match action {
            NavAction::ToggleAlnumSort => {
                Some(format!("Type order: {}", state.type_order.label()))
            }
            NavAction::ToggleManaValueSort => {
                Some(format!("Creature order: {}", state.creature_order.label()))
            }
            NavAction::ToggleFocus => None,
            NavAction::SelectSubtype(_)
            | NavAction::SelectCreature(_)
            | NavAction::SelectNext
            | NavAction::SelectPrevious => {
                if state.selected_subtype != before.selected_subtype {
                    state
                        .selected_subtype
                        .as_ref()
                        .map(|subtype| format!("Type: {}", subtype))
                } else if state.selected_card != before.selected_card || row_changed {
                    state
                        .selected_card
                        .as_ref()
                        .map(|card| format!("Creature: {}", card))
                } else {
                    None
                }
            }
        };

        if let Some(message) = message {
            self.log_activity(message);
        }
    }

    fn open_reference(&mut self) {
        let Some(url) = self.navigator.lookup_url() else {
            self.log_activity("No creature selected");
            return;
        };

        match (self.opener)(url.as_str()) {
            Ok(()) => {
                info!(%url, "opened card reference");
                self.log_activity(format!("Opened {}", url));
            }
            Err(err) => {
                warn!(%url, error = %err, "failed to open card reference");
                self.log_activity(format!("Could not open browser: {}", err));
            }
        }
    }

    pub fn log_activity(&mut self, message: impl Into<String>) {
        self.activity.push_front(message.into());
        self.activity.truncate(ACTIVITY_CAPACITY);
    }
}
