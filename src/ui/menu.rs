use crate::session::WorksheetSession;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn draw_menu(f: &mut Frame, session: &WorksheetSession) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let catalog = &session.catalog;
    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            catalog.title.as_str(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(catalog.subtitle.as_str()),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let intro = Paragraph::new(catalog.intro.as_str())
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL).title("Clinical Anatomy Worksheet"));
    f.render_widget(intro, chunks[1]);

    let items: Vec<ListItem> = catalog
        .sections
        .iter()
        .enumerate()
        .map(|(i, section)| {
            let selected = i == session.menu_index;
            let style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let mut lines = vec![Line::from(Span::styled(
                format!(
                    "{}. {} ({} items)",
                    section.number, section.title, section.item_count
                ),
                style,
            ))];
            if selected {
                lines.push(Line::from(Span::styled(
                    format!("   {}", section.subtitle),
                    Style::default().fg(Color::Gray),
                )));
                lines.push(Line::from(Span::styled(
                    format!("   Clinical focus: {}", section.focus),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title("Sections"),
    );
    f.render_widget(list, chunks[2]);

    let mut help_spans = vec![
        Span::styled(
            "↑/↓",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Navigate  "),
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Open Section  "),
    ];
    if session.result.is_some() {
        help_spans.extend([
            Span::styled(
                "s",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::from(" Results  "),
        ]);
    }
    help_spans.extend([
        Span::styled(
            "q",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Quit"),
    ]);
    let help = Paragraph::new(Line::from(help_spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_menu_lists_sections() {
        let mut session =
            WorksheetSession::new(catalog::load_embedded().unwrap(), StdRng::seed_from_u64(1));
        session.menu_index = 3;
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw_menu(f, &session)).unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(screen.contains("Clavicle Fractures"));
        assert!(screen.contains("Acromioclavicular (AC) Joint"));
        assert!(screen.contains("Clinical focus"));
        assert!(!screen.contains(" Results "));
    }
}
