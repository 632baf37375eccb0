//! Terminal User Interface for Volodex
//!
//! Two lists (creature types, creatures of the selected type) beside a card
//! detail pane, with an activity log underneath.

pub mod app;
pub mod event;
pub mod keymap;
pub mod layout;
pub mod ui;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, prelude::*, Terminal};
use std::io::stdout;
use std::time::Duration;
use volodex_core::Navigator;

use crate::cli::tui::app::App;
use crate::cli::tui::event::{Event, EventHandler};

/// Run the browser until the user quits
pub fn run(navigator: Navigator, subtitle: String, notices: Vec<String>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(navigator, subtitle);
    for notice in notices {
        app.log_activity(notice);
    }
    let events = EventHandler::new(Duration::from_millis(250));

    let result = run_app(&mut terminal, &mut app, &events);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Run the application loop
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    while app.running {
        terminal.draw(|frame| ui::draw(frame, app))?;

        match events.next()? {
            Event::Key(key) => app.handle_key(key),
            Event::Tick => app.tick(),
            Event::Resize(_, _) => {} // Ratatui handles resize
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::tui::app::tests::sample_navigator;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_app_starts_running_with_first_type() {
        let app = App::new(sample_navigator(), "deck.txt");
        assert!(app.running);
        assert_eq!(app.navigator.state().selected_subtype.as_deref(), Some("Elf"));
        assert!(!app.activity.is_empty());
    }

    #[test]
    fn test_app_renders_without_panic() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        let app = App::new(sample_navigator(), "deck.txt");

        terminal.draw(|frame| ui::draw(frame, &app)).unwrap();

        let buffer = terminal.backend().buffer();
        assert_eq!(buffer.area.width, 80);
        assert_eq!(buffer.area.height, 24);
    }
}
