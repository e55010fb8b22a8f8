//! Tab content rendering
//!
//! One render function per tab. Each region falls back to
//! `render_placeholder` until its data is ready.

use super::cards::StudentCard;
use super::components::render_placeholder;
use super::styling;
use crate::state::AppState;
use crate::types::{OperationLog, Statistics};
use crate::utils::format_optional;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Render the students list with the selected card highlighted
pub fn render_students_tab(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    spinner_index: usize,
    list_state: &mut ListState,
) {
    let title = match state.students.ready() {
        Some(students) => format!(" Students ({}) ", students.len()),
        None => " Students ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(styling::focused_border()))
        .title(title);

    if render_placeholder(frame, area, block.clone(), &state.students, "", spinner_index) {
        return;
    }
    let Some(students) = state.students.ready() else {
        return;
    };

    let items: Vec<ListItem> = students
        .iter()
        .map(|student| {
            let mut lines = StudentCard::from(student).lines();
            lines.push(Line::from(""));
            ListItem::new(Text::from(lines))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Rgb(45, 45, 60)))
        .highlight_symbol("▌ ");

    list_state.select(Some(state.selected_student));
    frame.render_stateful_widget(list, area, list_state);
}

/// Render the results of the last search
pub fn render_search_tab(frame: &mut Frame, area: Rect, state: &AppState, spinner_index: usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Search Results ");

    let idle = "Press [i] to find a student by ID or [/] to search by name";
    if render_placeholder(frame, area, block.clone(), &state.search, idle, spinner_index) {
        return;
    }
    let Some(results) = state.search.ready() else {
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    if let Some(heading) = &results.heading {
        lines.push(Line::from(Span::styled(
            heading.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }
    for student in &results.students {
        lines.extend(StudentCard::from(student).lines());
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Render the undo stack and the operation queue side by side
pub fn render_data_structures_tab(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    spinner_index: usize,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let panels = [
        (" Undo Stack [z: undo] ", &state.stack, "Stack Size"),
        (" Operation Queue [p: process] ", &state.queue, "Queue Size"),
    ];

    for ((title, view, size_label), chunk) in panels.into_iter().zip(chunks.iter()) {
        let block = Block::default().borders(Borders::ALL).title(title);
        if render_placeholder(frame, *chunk, block.clone(), view, "", spinner_index) {
            continue;
        }
        if let Some(log) = view.ready() {
            let paragraph = Paragraph::new(operation_log_lines(log, size_label)).block(block);
            frame.render_widget(paragraph, *chunk);
        }
    }
}

/// Render the six statistics cards in a 3x2 grid
pub fn render_statistics_tab(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    spinner_index: usize,
) {
    let block = Block::default().borders(Borders::ALL).title(" Statistics ");
    if render_placeholder(frame, area, block.clone(), &state.statistics, "", spinner_index) {
        return;
    }
    let Some(stats) = state.statistics.ready() else {
        return;
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Length(5), Constraint::Min(0)])
        .split(inner);

    let cards = statistic_cards(stats);
    for (row, pair) in rows.iter().take(2).zip(cards.chunks(3)) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(*row);

        for ((label, value), column) in pair.iter().zip(columns.iter()) {
            let card = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    value.clone(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )),
            ])
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(*label));
            frame.render_widget(card, *column);
        }
    }
}

/// Label/value pairs in display order
pub fn statistic_cards(stats: &Statistics) -> [(&'static str, String); 6] {
    [
        ("Total Students", stats.total_students.to_string()),
        ("Undo Stack Size", stats.undo_stack_size.to_string()),
        ("Queue Size", stats.queue_size.to_string()),
        ("Highest Average", format_optional(stats.highest_average)),
        ("Lowest Average", format_optional(stats.lowest_average)),
        ("Overall Average", format_optional(stats.overall_average)),
    ]
}

/// Lines for a stack or queue, numbered from 1
pub fn operation_log_lines(log: &OperationLog, size_label: &str) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{size_label}: {}", log.size),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (index, record) in log.records.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("#{} ", index + 1),
                Style::default().fg(styling::muted()),
            ),
            Span::styled(
                record.operation_type.clone(),
                Style::default()
                    .fg(styling::get_operation_color(&record.operation_type))
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::raw("   "),
            Span::styled(
                record.student_name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" (ID: {})", record.student_id)),
        ]));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OperationRecord;

    #[test]
    fn test_operation_log_lines_numbered_from_one() {
        let log = OperationLog {
            records: vec![
                OperationRecord {
                    operation_type: "delete".to_string(),
                    student_id: "1".to_string(),
                    student_name: "Ada".to_string(),
                },
                OperationRecord {
                    operation_type: "delete".to_string(),
                    student_id: "2".to_string(),
                    student_name: "Bo".to_string(),
                },
            ],
            size: 2,
        };

        let text: Vec<String> = operation_log_lines(&log, "Stack Size")
            .iter()
            .map(|l| l.to_string())
            .collect();

        assert_eq!(text[0], "Stack Size: 2");
        assert_eq!(text[2], "#1 delete");
        assert_eq!(text[3], "   Ada (ID: 1)");
        assert_eq!(text[4], "#2 delete");
    }

    #[test]
    fn test_statistic_cards() {
        let stats = Statistics {
            total_students: 3,
            undo_stack_size: 1,
            queue_size: 0,
            highest_average: Some(92.5),
            lowest_average: Some(70.0),
            overall_average: None,
        };

        let cards = statistic_cards(&stats);
        assert_eq!(cards[0], ("Total Students", "3".to_string()));
        assert_eq!(cards[3], ("Highest Average", "92.5".to_string()));
        assert_eq!(cards[4], ("Lowest Average", "70".to_string()));
        assert_eq!(cards[5], ("Overall Average", "N/A".to_string()));
    }
}
