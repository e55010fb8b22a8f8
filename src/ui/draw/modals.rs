//! Modal dialog rendering
//!
//! This module contains rendering functions for modal dialogs:
//! - Input forms (add student, grades, searches)
//! - Confirmation prompt
//! - Server URL modal

use super::components::centered_rect;
use super::styling;
use crate::state::AppState;
use crate::types::{FormState, PendingConfirm};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render an input form with one labelled line per field
pub fn render_form_modal(frame: &mut Frame, form: &FormState) {
    let labels = form.kind.labels();
    // border + label/value per field + blank + help
    let height = 2 + labels.len() as u16 * 2 + 2;
    let modal_area = centered_rect(60, height, frame.area());

    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(form.kind.title())
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(styling::focused_border())
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(styling::MODAL_BG).fg(Color::White));

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let mut constraints: Vec<Constraint> = labels
        .iter()
        .flat_map(|_| [Constraint::Length(1), Constraint::Length(1)])
        .collect();
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, label) in labels.iter().enumerate() {
        let is_active = i == form.active_field;

        let label_style = if is_active {
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        frame.render_widget(
            Paragraph::new(format!("{label}:")).style(label_style),
            chunks[i * 2],
        );

        // Show cursor on the active field
        let value = if is_active {
            format!("{}_", form.field(i))
        } else {
            form.field(i).to_string()
        };
        let value_style = if is_active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        frame.render_widget(Paragraph::new(value).style(value_style), chunks[i * 2 + 1]);
    }

    let help = Paragraph::new("Tab: Next field  |  Enter: Submit  |  Ctrl+L: Clear  |  Esc: Cancel")
        .style(Style::default().fg(Color::Rgb(150, 150, 150)))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[labels.len() * 2 + 1]);
}

/// Render a yes/no prompt for a destructive action
pub fn render_confirm_modal(frame: &mut Frame, pending: &PendingConfirm) {
    let modal_area = centered_rect(50, 7, frame.area());

    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(" Confirm ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(styling::MODAL_BG).fg(Color::White));

    let text = vec![
        Line::from(pending.prompt()),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(": Yes   "),
            Span::styled("n/Esc", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(": No"),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, modal_area);
}

/// Render the server URL modal
pub fn render_url_input_modal(frame: &mut Frame, state: &AppState) {
    let modal_area = centered_rect(70, 8, frame.area());

    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(" Configure Server ")
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(styling::focused_border())
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(styling::MODAL_BG).fg(Color::White));

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let label = Paragraph::new("Server URL:").style(Style::default().fg(Color::LightCyan));
    frame.render_widget(label, chunks[0]);

    let input = Paragraph::new(format!("{}_", state.url_input)).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(input, chunks[1]);

    let hint = Paragraph::new("e.g. http://localhost:5000 (requests go to /api)")
        .style(Style::default().fg(styling::muted()));
    frame.render_widget(hint, chunks[2]);

    let help = Paragraph::new("Enter: Save  |  Ctrl+L: Clear  |  Esc: Cancel")
        .style(Style::default().fg(Color::Rgb(150, 150, 150)))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);
}
