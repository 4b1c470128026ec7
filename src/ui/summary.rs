use crate::grading::Verdict;
use crate::session::WorksheetSession;
use crate::ui::layout::calculate_summary_chunks;
use crate::utils::truncate_string;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

pub fn draw_summary(f: &mut Frame, session: &WorksheetSession) {
    let layout = calculate_summary_chunks(f.area());

    let title = Paragraph::new(format!("Results - {}", session.catalog.title))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let mut results_text = Text::default();
    if let Some(result) = &session.result {
        let label = format!(
            "{}/{} correct, {} incorrect, {} not answered",
            result.correct(),
            result.graded(),
            result.incorrect(),
            result.unanswered()
        );
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title("Score"))
            .gauge_style(Style::default().fg(Color::Green))
            .percent(result.percent().min(100))
            .label(label);
        f.render_widget(gauge, layout.score_area);

        let mut current_section = None;
        for item in &result.items {
            let section = session.catalog.section_of(item.index);
            if let Some(section) = section
                && current_section != Some(section.number)
            {
                current_section = Some(section.number);
                if item.index > 0 {
                    results_text.push_line(Line::from(""));
                }
                results_text.push_line(Line::from(Span::styled(
                    format!("Section {}: {}", section.number, section.title),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )));
            }

            let (mark, color) = match item.verdict {
                Verdict::Correct => ("[✓]", Color::Green),
                Verdict::Incorrect => ("[✗]", Color::Red),
                Verdict::Unanswered => ("[ ]", Color::Yellow),
                Verdict::NotGraded => ("[-]", Color::DarkGray),
            };
            results_text.push_line(Line::from(vec![
                Span::styled(mark, Style::default().fg(color)),
                Span::from(format!(
                    " {}. {}: {}",
                    item.index + 1,
                    item.kind,
                    truncate_string(&item.title, 60)
                )),
            ]));
            if let Some(detail) = &item.detail {
                results_text.push_line(Line::from(Span::styled(
                    format!("    {}", truncate_string(detail, 80)),
                    Style::default().fg(Color::Gray),
                )));
            }
        }
    } else {
        results_text.push_line(Line::from("Answers have not been checked yet."));
    }

    let results = Paragraph::new(results_text)
        .wrap(Wrap { trim: true })
        .scroll((session.summary_scroll, 0))
        .block(Block::default().borders(Borders::ALL).title("Your Results"));
    f.render_widget(results, layout.results_area);

    let mut notes = Text::default();
    notes.push_line(Line::from(Span::styled(
        "Key Clinical Takeaways",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for takeaway in &session.catalog.takeaways {
        notes.push_line(Line::from(vec![
            Span::styled(
                format!("{}: ", takeaway.topic),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::from(takeaway.text.as_str()),
        ]));
    }
    if !session.catalog.study_tips.is_empty() {
        notes.push_line(Line::from(""));
        notes.push_line(Line::from(Span::styled(
            "How to Use This Worksheet",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for (i, tip) in session.catalog.study_tips.iter().enumerate() {
            notes.push_line(Line::from(format!("{}. {}", i + 1, tip)));
        }
    }
    let notes = Paragraph::new(notes)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(notes, layout.notes_area);

    let key = |label: &'static str| {
        Span::styled(
            label,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    };
    let help_text = vec![Line::from(vec![
        key("↑/↓"),
        Span::from(" Scroll  "),
        key("w"),
        Span::from(" Review Worksheet  "),
        key("r"),
        Span::from(" Practice Again  "),
        key("m"),
        Span::from(" Main Menu  "),
        key("Esc"),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(session: &WorksheetSession) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 60)).unwrap();
        terminal.draw(|f| draw_summary(f, session)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_summary_before_checking() {
        let session =
            WorksheetSession::new(catalog::load_embedded().unwrap(), StdRng::seed_from_u64(1));
        let text = screen(&session);
        assert!(text.contains("Answers have not been checked yet."));
        assert!(text.contains("Key Clinical Takeaways"));
    }

    #[test]
    fn test_summary_lists_results() {
        let mut session =
            WorksheetSession::new(catalog::load_embedded().unwrap(), StdRng::seed_from_u64(1));
        session.answers.set("q1", "sternal angle");
        session.submit();
        let text = screen(&session);
        assert!(text.contains("Section 1: The Sternal Angle"));
        assert!(text.contains("[✓]"));
        assert!(text.contains("Score"));
    }
}
