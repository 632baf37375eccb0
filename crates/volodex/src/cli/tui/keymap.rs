//! Key bindings and footer hints.

use std::borrow::Cow;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use volodex_core::{Focus, NavAction};

/// What a key press asks the app to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyCommand {
    Quit,
    ToggleHelp,
    OpenReference,
    Navigate(NavAction),
}

pub fn command_for(key: KeyEvent) -> Option<KeyCommand> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(KeyCommand::Quit),
            _ => None,
        };
    }

    let command = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => KeyCommand::Quit,
        KeyCode::Char('?') => KeyCommand::ToggleHelp,
        KeyCode::Char('v') => KeyCommand::OpenReference,
        KeyCode::Char('a') => KeyCommand::Navigate(NavAction::ToggleAlnumSort),
        KeyCode::Char('c') => KeyCommand::Navigate(NavAction::ToggleManaValueSort),
        KeyCode::Tab | KeyCode::BackTab => KeyCommand::Navigate(NavAction::ToggleFocus),
        KeyCode::Down | KeyCode::Char('j') => KeyCommand::Navigate(NavAction::SelectNext),
        KeyCode::Up | KeyCode::Char('k') => KeyCommand::Navigate(NavAction::SelectPrevious),
        _ => return None,
    };
    Some(command)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionHint {
    pub key: Cow<'static, str>,
    pub label: Cow<'static, str>,
    pub priority: u8,
}

impl ActionHint {
    pub fn new(
        key: impl Into<Cow<'static, str>>,
        label: impl Into<Cow<'static, str>>,
        priority: u8,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            priority,
        }
    }

    pub fn width(&self) -> usize {
        // "[key] label"
        self.key.chars().count() + 3 + self.label.chars().count()
    }
}

fn ordered_hints(items: &[(&'static str, &'static str)]) -> Vec<ActionHint> {
    let mut hints = Vec::with_capacity(items.len());
    let mut priority: i16 = 100;
    for (key, label) in items {
        let prio = priority.max(1) as u8;
        hints.push(ActionHint::new(*key, *label, prio));
        priority -= 5;
    }
    hints
}

/// Footer hints for the current focus, highest priority first.
pub fn action_hints(focus: Focus) -> Vec<ActionHint> {
    let movement = match focus {
        Focus::TypeList => ("j/k", "Types"),
        Focus::CreatureList => ("j/k", "Creatures"),
    };
    ordered_hints(&[
        movement,
        ("Tab", "Focus"),
        ("a", "Type sort"),
        ("c", "Mana sort"),
        ("v", "View card"),
        ("q", "Quit"),
        ("?", "Help"),
    ])
}

/// Keep the highest priority hints that fit in `width` columns.
pub fn fit_hints(hints: &[ActionHint], width: usize) -> Vec<&ActionHint> {
    const GAP: usize = 2;

    let mut by_priority: Vec<(usize, &ActionHint)> = hints.iter().enumerate().collect();
    by_priority.sort_by_key(|(idx, hint)| (std::cmp::Reverse(hint.priority), *idx));

    let mut used = 0;
    let mut kept = Vec::new();
    for (idx, hint) in by_priority {
        let gap = if kept.is_empty() { 0 } else { GAP };
        if used + gap + hint.width() > width {
            continue;
        }
        used += gap + hint.width();
        kept.push((idx, hint));
    }
    kept.sort_by_key(|(idx, _)| *idx);
    kept.into_iter().map(|(_, hint)| hint).collect()
}

/// Lines of the help overlay.
pub fn help_lines() -> Vec<String> {
    let bindings = [
        ("Up/Down, j/k", "Move in the focused list"),
        ("Tab", "Switch between type and creature lists"),
        ("a", "Toggle type order: count / alphabetical"),
        ("c", "Toggle creature order: EDHREC rank / mana value"),
        ("v", "Open the selected card in the browser"),
        ("?", "Show or hide this help"),
        ("q, Esc, Ctrl+C", "Quit"),
    ];
    let key_width = bindings
        .iter()
        .map(|(key, _)| key.chars().count())
        .max()
        .unwrap_or(0);
    bindings
        .iter()
        .map(|(key, label)| format!("  {:<width$}  {}", key, label, width = key_width))
        .collect()
}
