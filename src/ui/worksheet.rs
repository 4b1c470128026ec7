use crate::catalog::ItemContent;
use crate::grading::{grade_item, Verdict};
use crate::session::{ItemState, WorksheetSession};
use crate::ui::layout::calculate_worksheet_chunks;
use crate::utils::calculate_wrapped_cursor_position;
use crate::widgets::{PositionStatus, SlotStatus};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

fn key_span(label: &str) -> Span<'_> {
    Span::styled(
        label,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

fn heading(text: &str) -> Line<'_> {
    Line::from(Span::styled(
        text,
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

fn verdict_line(verdict: Verdict) -> Line<'static> {
    let (label, color) = match verdict {
        Verdict::Correct => ("Correct", Color::Green),
        Verdict::Incorrect => ("Incorrect", Color::Red),
        Verdict::Unanswered => ("Not answered", Color::Yellow),
        Verdict::NotGraded => ("Practice only", Color::DarkGray),
    };
    Line::from(Span::styled(
        label,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

fn marker(focused: bool) -> &'static str {
    if focused { "> " } else { "  " }
}

pub fn draw_worksheet(f: &mut Frame, session: &mut WorksheetSession) {
    let layout = calculate_worksheet_chunks(f.area());
    let revealed = session.is_revealed();

    let (Some(item), Some(state)) = (
        session.catalog.item(session.current_index),
        session.states.get(session.current_index),
    ) else {
        return;
    };

    let section = session
        .catalog
        .section_of(session.current_index)
        .map(|s| format!("Section {}: {}", s.number, s.title))
        .unwrap_or_default();
    let mut header_text = format!(
        "{} - Item {} / {} - {}",
        section,
        session.current_index + 1,
        session.catalog.len(),
        item.content.kind_label()
    );
    if revealed {
        header_text.push_str(" [answers shown]");
    }
    let header = Paragraph::new(header_text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let verdict = grade_item(&item.content, state, &session.answers).0;
    let prompt_area = match &item.content {
        ItemContent::Hotspots(set) => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(3)])
                .split(layout.prompt_area);
            if let ItemState::Hotspots(found) = state {
                let gauge = Gauge::default()
                    .block(Block::default().borders(Borders::ALL).title("Explored"))
                    .gauge_style(Style::default().fg(Color::Green))
                    .percent(found.percent(set).min(100));
                f.render_widget(gauge, chunks[1]);
            }
            chunks[0]
        }
        _ => layout.prompt_area,
    };

    let prompt = Paragraph::new(prompt_text(&item.content, state))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(item.content.kind_label()),
        );
    f.render_widget(prompt, prompt_area);

    let help = Paragraph::new(help_text(&item.content, revealed))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);

    if matches!(item.content, ItemContent::Scenario(_)) && !revealed {
        draw_answer_input(f, session, layout.response_area);
        return;
    }

    let response = match (&item.content, state) {
        (ItemContent::Scenario(scenario), _) => {
            let mut text = Text::default();
            text.push_line(heading("Your Answer:"));
            text.push_line(Line::from(
                session.answers.get(&scenario.id).unwrap_or("(no answer)"),
            ));
            text.push_line(Line::from(""));
            text.push_line(verdict_line(verdict));
            text.push_line(Line::from(""));
            text.push_line(Line::from(Span::styled(
                "Model Answer:",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
            text.push_line(Line::from(scenario.answer.as_str()));
            if let Some(explanation) = &scenario.explanation {
                text.push_line(Line::from(""));
                text.push_line(heading("Why it matters:"));
                text.push_line(Line::from(explanation.as_str()));
            }
            text
        }
        (ItemContent::RecallCard(card), ItemState::RecallCard(flip)) => {
            if flip.flipped {
                Text::from(vec![
                    Line::from(Span::styled(
                        "Answer:",
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(card.answer.as_str()),
                ])
            } else {
                Text::from(Line::from(Span::styled(
                    "Recall the answer, then press Enter to flip the card.",
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )))
            }
        }
        (ItemContent::Choice(question), ItemState::Choice(choice)) => {
            let mut text = Text::default();
            for (i, option) in question.options().iter().enumerate() {
                let chosen = choice.selected() == Some(option.id.as_str());
                let style = match (revealed, option.is_correct, chosen) {
                    (true, true, _) => Style::default().fg(Color::Green),
                    (true, false, true) => Style::default().fg(Color::Red),
                    (false, _, true) => Style::default().fg(Color::Yellow),
                    _ => Style::default(),
                };
                text.push_line(Line::from(Span::styled(
                    format!(
                        "{}{} {}",
                        marker(i == choice.cursor()),
                        if chosen { "(*)" } else { "( )" },
                        option.text
                    ),
                    style,
                )));
                if revealed
                    && (chosen || option.is_correct)
                    && let Some(description) = &option.description
                {
                    text.push_line(Line::from(format!("      {}", description)));
                }
            }
            if revealed {
                text.push_line(Line::from(""));
                text.push_line(verdict_line(verdict));
            }
            text
        }
        (ItemContent::DecisionTree(tree), ItemState::DecisionTree(walker)) => {
            let mut text = Text::default();
            if let Some(node) = walker.current_node(tree) {
                for (i, option) in node.options.iter().enumerate() {
                    let selected = walker.selected() == Some(i);
                    let style = if selected {
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    text.push_line(Line::from(Span::styled(
                        format!("{}{}", marker(selected), option.text),
                        style,
                    )));
                }
            }
            if let Some(feedback) = walker.pending_feedback(tree) {
                text.push_line(Line::from(""));
                text.push_line(Line::from(Span::styled(
                    feedback,
                    Style::default().fg(Color::Blue),
                )));
            }
            if let Some(outcome) = walker.outcome(tree) {
                text.push_line(Line::from(""));
                text.push_line(verdict_line(if outcome.is_correct {
                    Verdict::Correct
                } else {
                    Verdict::Incorrect
                }));
                if let Some(feedback) = outcome.feedback {
                    text.push_line(Line::from(feedback));
                }
            }
            text.push_line(Line::from(""));
            text.push_line(Line::from(Span::styled(
                format!("Path: {}", walker.path().join(" -> ")),
                Style::default().fg(Color::DarkGray),
            )));
            text
        }
        (ItemContent::Sequence(_), ItemState::Sequence(order)) => {
            let mut text = Text::default();
            for (position, step) in order.steps().iter().enumerate() {
                let focused = position == order.cursor();
                let style = match order.position_status(position, revealed) {
                    PositionStatus::Correct => Style::default().fg(Color::Green),
                    PositionStatus::Incorrect => Style::default().fg(Color::Red),
                    PositionStatus::Unrevealed if focused && order.is_grabbed() => Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED),
                    PositionStatus::Unrevealed if focused => Style::default().fg(Color::Yellow),
                    PositionStatus::Unrevealed => Style::default(),
                };
                text.push_line(Line::from(Span::styled(
                    format!("{}{}. {}", marker(focused), position + 1, step.text),
                    style,
                )));
            }
            if revealed {
                text.push_line(Line::from(""));
                text.push_line(verdict_line(verdict));
            }
            text
        }
        (ItemContent::Placement(board), ItemState::Placement(slots)) => {
            let mut text = Text::default();
            for (i, slot) in board.slots().iter().enumerate() {
                let placed = slots
                    .placed_in(&slot.id)
                    .and_then(|id| board.item(id))
                    .map(|item| item.text.as_str())
                    .unwrap_or("________");
                let status = slots.slot_status(board, &slot.id, revealed);
                let style = match status {
                    SlotStatus::Correct => Style::default().fg(Color::Green),
                    SlotStatus::Incorrect | SlotStatus::Empty => Style::default().fg(Color::Red),
                    SlotStatus::Unrevealed if i == slots.slot_cursor() => {
                        Style::default().fg(Color::Yellow)
                    }
                    SlotStatus::Unrevealed => Style::default(),
                };
                text.push_line(Line::from(Span::styled(
                    format!("{}{}: {}", marker(i == slots.slot_cursor()), slot.name, placed),
                    style,
                )));
                if matches!(status, SlotStatus::Incorrect | SlotStatus::Empty) {
                    text.push_line(Line::from(format!("      should be: {}", slot.answer)));
                }
            }
            text.push_line(Line::from(""));
            text.push_line(heading("Tray:"));
            let tray: Vec<Span> = slots
                .tray(board)
                .into_iter()
                .enumerate()
                .map(|(i, item)| {
                    let mut style = if slots.is_placed(&item.id) {
                        Style::default().fg(Color::DarkGray)
                    } else {
                        Style::default()
                    };
                    if i == slots.item_cursor() {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    Span::styled(format!(" {} ", item.text), style)
                })
                .collect();
            text.push_line(Line::from(tray));
            if revealed {
                text.push_line(Line::from(""));
                text.push_line(verdict_line(verdict));
            }
            text
        }
        (ItemContent::Hotspots(set), ItemState::Hotspots(found)) => {
            let mut text = Text::default();
            for (i, region) in set.regions().iter().enumerate() {
                let line = if found.is_discovered(&region.id) {
                    Span::styled(
                        format!("{}{}", marker(i == found.cursor()), region.label),
                        Style::default().fg(Color::Green),
                    )
                } else {
                    Span::from(format!("{}? {}", marker(i == found.cursor()), region.region))
                };
                text.push_line(Line::from(line));
            }
            if let Some(region) = found.selected(set) {
                text.push_line(Line::from(""));
                text.push_line(heading(&region.label));
                text.push_line(Line::from(region.info.as_str()));
            }
            if found.is_complete(set) {
                text.push_line(Line::from(""));
                text.push_line(Line::from(Span::styled(
                    "All landmarks explored.",
                    Style::default().fg(Color::Green),
                )));
            }
            text
        }
        _ => Text::default(),
    };

    let response = Paragraph::new(response)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Your Work"));
    f.render_widget(response, layout.response_area);
}

fn prompt_text<'a>(content: &'a ItemContent, state: &'a ItemState) -> Text<'a> {
    let mut text = Text::default();
    match (content, state) {
        (ItemContent::Scenario(scenario), _) => {
            text.push_line(Line::from(scenario.scenario.as_str()));
            text.push_line(Line::from(""));
            text.push_line(heading(&scenario.question));
        }
        (ItemContent::RecallCard(card), _) => {
            text.push_line(heading(&card.question));
            if let Some(hint) = &card.hint {
                text.push_line(Line::from(""));
                text.push_line(Line::from(Span::styled(
                    format!("Hint: {}", hint),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
        (ItemContent::Choice(question), _) => {
            if let Some(title) = &question.title {
                text.push_line(heading(title));
                text.push_line(Line::from(""));
            }
            text.push_line(Line::from(question.prompt.as_str()));
        }
        (ItemContent::DecisionTree(tree), ItemState::DecisionTree(walker)) => {
            text.push_line(heading(&tree.title));
            text.push_line(Line::from(tree.scenario.as_str()));
            if let Some(node) = walker.current_node(tree) {
                text.push_line(Line::from(""));
                text.push_line(Line::from(Span::styled(
                    node.prompt.as_str(),
                    Style::default().fg(Color::Yellow),
                )));
            }
        }
        (ItemContent::Sequence(sequence), _) => {
            text.push_line(heading(&sequence.title));
        }
        (ItemContent::Placement(board), _) => {
            text.push_line(heading(&board.title));
            if let Some(diagram) = &board.diagram {
                text.push_line(Line::from(format!("Diagram: {}", diagram)));
            }
        }
        (ItemContent::Hotspots(set), _) => {
            text.push_line(heading(&set.instructions));
            text.push_line(Line::from(format!("Diagram: {}", set.diagram)));
        }
        _ => {}
    }
    text
}

fn draw_answer_input(f: &mut Frame, session: &mut WorksheetSession, area: Rect) {
    let visible_height = area.height.saturating_sub(2) as usize;
    let text_width = area.width.saturating_sub(2).max(1) as usize;
    let (cursor_line, cursor_col) =
        calculate_wrapped_cursor_position(&session.input_buffer, session.cursor_position, text_width);

    // Keep the cursor inside the visible window.
    let mut scroll = session.input_scroll_y as usize;
    if cursor_line < scroll {
        scroll = cursor_line;
    } else if visible_height > 0 && cursor_line >= scroll + visible_height {
        scroll = cursor_line + 1 - visible_height;
    }
    session.input_scroll_y = scroll as u16;

    let content = if session.input_buffer.is_empty() {
        Text::from(Span::styled(
            "[Type your answer here...]",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Text::from(session.input_buffer.as_str())
    };
    let input = Paragraph::new(content)
        .wrap(Wrap { trim: true })
        .scroll((session.input_scroll_y, 0))
        .block(Block::default().borders(Borders::ALL).title("Your Answer"));
    f.render_widget(input, area);

    let cursor_x = area.x + 1 + cursor_col as u16;
    let cursor_y = area.y + 1 + (cursor_line as u16).saturating_sub(session.input_scroll_y);
    f.set_cursor_position((cursor_x, cursor_y));
}

fn help_text(content: &ItemContent, revealed: bool) -> Vec<Line<'static>> {
    let mut item_spans = match content {
        ItemContent::Scenario(_) if !revealed => vec![
            Span::from("Type your answer  "),
            key_span("←/→"),
            Span::from(" Move cursor  "),
            key_span("Enter"),
            Span::from(" Next  "),
        ],
        ItemContent::Scenario(_) => vec![Span::from("Answers are locked  ")],
        ItemContent::RecallCard(_) => vec![key_span("Enter/Space"), Span::from(" Flip card  ")],
        ItemContent::Choice(_) => vec![
            key_span("↑/↓"),
            Span::from(" Move  "),
            key_span("Enter"),
            Span::from(" Choose  "),
        ],
        ItemContent::DecisionTree(_) => vec![
            key_span("↑/↓"),
            Span::from(" Select  "),
            key_span("Enter"),
            Span::from(" Confirm  "),
            key_span("r"),
            Span::from(" Restart  "),
        ],
        ItemContent::Sequence(_) => vec![
            key_span("↑/↓"),
            Span::from(" Move  "),
            key_span("Space"),
            Span::from(" Pick up / drop  "),
        ],
        ItemContent::Placement(_) => {
            let mut spans = vec![
                key_span("↑/↓"),
                Span::from(" Slot  "),
                key_span("←/→"),
                Span::from(" Item  "),
                key_span("Enter"),
                Span::from(" Place  "),
                key_span("Del"),
                Span::from(" Clear  "),
            ];
            if !revealed {
                spans.extend([key_span("r"), Span::from(" Reset  ")]);
            }
            spans
        }
        ItemContent::Hotspots(_) => vec![
            key_span("↑/↓"),
            Span::from(" Move  "),
            key_span("Enter"),
            Span::from(" Explore  "),
        ],
    };
    item_spans.extend([key_span("Tab/Shift+Tab"), Span::from(" Next/Prev")]);

    let check = if revealed {
        vec![key_span("Ctrl+S"), Span::from(" Results  ")]
    } else {
        vec![key_span("Ctrl+S"), Span::from(" Check My Answers  ")]
    };
    let mut global_spans = check;
    global_spans.extend([
        key_span("Ctrl+R"),
        Span::from(" Practice Again  "),
        key_span("Esc"),
        Span::from(" Quit  "),
        key_span("Ctrl+C"),
        Span::from(" Exit App"),
    ]);

    vec![Line::from(item_spans), Line::from(global_spans)]
}

pub fn draw_quit_confirmation(f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(5)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Quit Worksheet")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let message = Paragraph::new("Quit? Answers from this session are not kept.")
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, chunks[1]);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Yes, quit  "),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(" No, keep going"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    fn session() -> WorksheetSession {
        WorksheetSession::new(catalog::load_embedded().unwrap(), StdRng::seed_from_u64(3))
    }

    #[test]
    fn test_draws_every_item_kind() {
        let mut session = session();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        for index in 0..session.catalog.len() {
            session.go_to(index);
            terminal.draw(|f| draw_worksheet(f, &mut session)).unwrap();
        }
        session.submit();
        for index in 0..session.catalog.len() {
            session.go_to(index);
            terminal.draw(|f| draw_worksheet(f, &mut session)).unwrap();
        }
    }

    #[test]
    fn test_header_shows_position() {
        let mut session = session();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw_worksheet(f, &mut session)).unwrap();
        let screen = buffer_text(&terminal);
        assert!(screen.contains("Item 1 / "));
        assert!(screen.contains("Clinical Scenario"));
        assert!(screen.contains("[Type your answer here...]"));
    }

    #[test]
    fn test_revealed_scenario_shows_model_answer() {
        let mut session = session();
        session.submit();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw_worksheet(f, &mut session)).unwrap();
        let screen = buffer_text(&terminal);
        assert!(screen.contains("Model Answer:"));
        assert!(screen.contains("Not answered"));
    }

    #[test]
    fn test_input_scroll_follows_cursor() {
        let mut session = session();
        session.input_buffer = "line\n".repeat(40);
        session.cursor_position = session.input_buffer.len();
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| draw_worksheet(f, &mut session)).unwrap();
        assert!(session.input_scroll_y > 0);
    }

    #[test]
    fn test_quit_confirmation_renders() {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(draw_quit_confirmation).unwrap();
        assert!(buffer_text(&terminal).contains("Quit Worksheet"));
    }
}
