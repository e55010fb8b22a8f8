//! Reusable UI components
//!
//! This module contains shared UI components used throughout the application:
//! - Header (title, server, tab bar)
//! - Footer (command help)
//! - Toast notifications
//! - Placeholders for regions that are idle, loading, empty or failed

use super::styling;
use crate::types::{LoadingState, Tab, Toast, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

/// Render the application header with server info and the tab bar
pub fn render_header(
    frame: &mut Frame,
    area: Rect,
    base_url: &str,
    active_tab: Tab,
    loading_state: &LoadingState,
    spinner_index: usize,
) {
    let status = match loading_state {
        LoadingState::Idle => String::new(),
        LoadingState::Fetching => format!(" {}", styling::SPINNER[spinner_index]),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" lazy grades tui - {base_url}{status} "))
        .title_style(Style::default().fg(Color::Cyan));

    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .block(block)
        .select(active_tab.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

/// Render the footer with command help for the active tab
pub fn render_footer(frame: &mut Frame, area: Rect, active_tab: Tab) {
    let tab_keys = match active_tab {
        Tab::Students => "j/k:Select d:Delete y:Copy ID",
        Tab::Search => "i:Find by ID /:Search by name",
        Tab::DataStructures => "z:Undo p:Process queue",
        Tab::Statistics => "",
    };

    let footer_text = format!(
        "{tab_keys} | n:New student g:Add grade u:Update grade \
         | Tab:Next Ctrl+R:Reload ,:URL q:Quit"
    );

    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title("Commands"));

    frame.render_widget(footer, area);
}

/// Render the toast in the top-right corner
pub fn render_toast(frame: &mut Frame, toast: &Toast) {
    let area = frame.area();
    let width = (toast.message.chars().count() as u16 + 4)
        .min(area.width.saturating_sub(2))
        .max(20.min(area.width));
    let toast_area = Rect {
        x: area.width.saturating_sub(width + 1),
        y: 1,
        width,
        height: 3.min(area.height),
    };

    let color = styling::get_toast_color(toast.kind);

    frame.render_widget(Clear, toast_area);
    let paragraph = Paragraph::new(toast.message.as_str())
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .style(Style::default().bg(styling::MODAL_BG)),
        );
    frame.render_widget(paragraph, toast_area);
}

/// Render the non-ready states of a region.
/// Returns `false` when the region is ready and the caller should draw it.
pub fn render_placeholder<T>(
    frame: &mut Frame,
    area: Rect,
    block: Block,
    view: &View<T>,
    idle_text: &str,
    spinner_index: usize,
) -> bool {
    let (text, style) = match view {
        View::Ready(_) => return false,
        View::Idle => (idle_text.to_string(), Style::default().fg(styling::muted())),
        View::Loading => (
            format!("{} Loading...", styling::SPINNER[spinner_index]),
            Style::default().fg(Color::Yellow),
        ),
        View::Empty(message) => (message.clone(), Style::default().fg(styling::muted())),
        View::Failed(message) => (message.clone(), Style::default().fg(Color::Red)),
    };

    let paragraph = Paragraph::new(text)
        .style(style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(paragraph, area);
    true
}

/// Rect centered in `area`, sized as a percentage of it
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
