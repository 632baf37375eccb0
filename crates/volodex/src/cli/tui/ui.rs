//! UI rendering for the TUI

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use volodex_core::{Focus, ListRow};

use super::app::App;
use super::keymap::{action_hints, fit_hints, help_lines};
use super::layout::viewport_class;
use crate::cli::output::format_number;

/// Draw the entire UI
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let viewport = viewport_class(area);

    let activity_height = if viewport.shows_activity() { 7 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),               // Title bar
            Constraint::Min(0),                  // Lists + detail
            Constraint::Length(activity_height), // Activity log
            Constraint::Length(2),               // Footer
        ])
        .split(area);

    draw_header(frame, app, chunks[0]);
    draw_browser(frame, app, chunks[1], viewport.stacks_detail());
    if viewport.shows_activity() {
        draw_activity(frame, app, chunks[2]);
    }
    draw_footer(frame, app, chunks[3]);

    if app.show_help {
        draw_help(frame, area);
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let nav = &app.navigator;
    let title = Line::from(vec![
        Span::styled(
            " Volodex ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} ", app.subtitle),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            format!(
                " {} creatures, {} types ",
                format_number(nav.filtered().len()),
                format_number(nav.type_index().len())
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(title).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn draw_browser(frame: &mut Frame, app: &App, area: Rect, stacked: bool) {
    let (lists_area, detail_area) = if stacked {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        (rows[0], rows[1])
    } else {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        (cols[0], cols[1])
    };

    let lists = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(lists_area);

    let nav = &app.navigator;
    let state = nav.state();

    let type_title = format!(" Types ({}) ", state.type_order.label());
    draw_row_list(
        frame,
        lists[0],
        &type_title,
        &nav.type_rows(),
        nav.selected_type_index(),
        state.focus == Focus::TypeList,
    );

    let creature_title = format!(" Creatures ({}) ", state.creature_order.label());
    draw_row_list(
        frame,
        lists[1],
        &creature_title,
        &nav.creature_rows(),
        nav.selected_creature_index(),
        state.focus == Focus::CreatureList,
    );

    draw_detail(frame, app, detail_area);
}

fn draw_row_list(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    rows: &[ListRow<'_>],
    selected: Option<usize>,
    focused: bool,
) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title.to_string());

    if rows.is_empty() {
        let empty = Paragraph::new("  Nothing to show")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = rows.iter().map(|row| ListItem::new(row_line(row))).collect();
    let highlight = if focused {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let list = List::new(items)
        .block(block)
        .highlight_style(highlight)
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(selected);
    frame.render_stateful_widget(list, area, &mut state);
}

fn row_line(row: &ListRow<'_>) -> Line<'static> {
    match *row {
        ListRow::TypeRow { name, count } => Line::from(vec![
            Span::raw(name.to_string()),
            Span::styled(format!(" ({})", count), Style::default().fg(Color::DarkGray)),
        ]),
        ListRow::CardRow { card } => Line::from(vec![
            Span::raw(card.name.clone()),
            Span::styled(
                format!(" {}", card.mana_cost),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    }
}

fn draw_detail(frame: &mut Frame, app: &App, area: Rect) {
    let title = match app.navigator.selected_card() {
        Some(card) => format!(" {} ", card.full_name),
        None => " Card ".to_string(),
    };
    let detail = Paragraph::new(app.navigator.detail_text())
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(detail, area);
}

fn draw_activity(frame: &mut Frame, app: &App, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = app
        .activity
        .iter()
        .take(visible)
        .map(|entry| Line::from(entry.as_str()))
        .collect();

    let log = Paragraph::new(lines)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL).title(" Activity "));
    frame.render_widget(log, area);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::TOP);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let hints = action_hints(app.navigator.state().focus);
    let mut spans = Vec::new();
    for (i, hint) in fit_hints(&hints, inner.width as usize).into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            format!("[{}]", hint.key),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {}", hint.label)));
    }

    let footer = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(footer, inner);
}

fn draw_help(frame: &mut Frame, area: Rect) {
    let lines = help_lines();
    let width = lines
        .iter()
        .map(|l| l.chars().count() as u16 + 4)
        .max()
        .unwrap_or(20)
        .min(area.width);
    let height = (lines.len() as u16 + 2).min(area.height);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    let help = Paragraph::new(lines.join("\n")).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Keys ")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(Clear, popup);
    frame.render_widget(help, popup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::tui::app::tests::sample_navigator;
    use ratatui::backend::TestBackend;
    use volodex_core::{Catalog, DeckListNames, NavAction, Navigator, SubtypeReselect};

    fn render(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_renders_lists_and_detail() {
        let app = App::new(sample_navigator(), "elves.txt");
        let screen = render(&app, 120, 30);

        assert!(screen.contains("Volodex"));
        assert!(screen.contains("elves.txt"));
        assert!(screen.contains("Elf (2)"));
        assert!(screen.contains("Llanowar Elves"));
        assert!(screen.contains("Llanowar Elves — {G}"));
        assert!(screen.contains("Activity"));
    }

    #[test]
    fn test_detail_title_is_full_card_name() {
        let document = serde_json::json!([{
            "name": "Budoka Gardener", "fullName": "Budoka Gardener // Dokai, Weaver of Life",
            "colorIdentity": "G", "manaCost": "{1}{G}", "manaValue": 2,
            "type": "Creature — Human Monk", "subtypes": ["Human", "Monk"],
            "edhrecRank": 4000, "text": "", "power": "2", "toughness": "1"
        }]);
        let catalog = Catalog::from_json(document).unwrap();
        let navigator =
            Navigator::new(catalog, &DeckListNames::new(), SubtypeReselect::default()).unwrap();
        let mut app = App::new(navigator, "");

        assert!(render(&app, 120, 30).contains("Budoka Gardener // Dokai, Weaver of Life"));

        app.navigator.dispatch(NavAction::ToggleFocus).unwrap();
        app.navigator.dispatch(NavAction::SelectNext).unwrap();
        assert_eq!(
            app.navigator.selected_card().map(|c| c.name.as_str()),
            Some("Budoka Gardener")
        );
    }

    #[test]
    fn test_short_terminal_hides_activity() {
        let app = App::new(sample_navigator(), "elves.txt");
        let screen = render(&app, 120, 16);
        assert!(!screen.contains("Activity"));
        assert!(screen.contains("Types"));
    }

    #[test]
    fn test_help_overlay() {
        let mut app = App::new(sample_navigator(), "");
        app.show_help = true;
        let screen = render(&app, 100, 30);
        assert!(screen.contains("Keys"));
        assert!(screen.contains("Toggle type order"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let app = App::new(sample_navigator(), "");
        render(&app, 10, 4);
    }
}
