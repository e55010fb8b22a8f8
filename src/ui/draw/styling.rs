//! Styling utilities and color schemes
//!
//! This module contains color helpers and style constants used throughout the UI.

use crate::types::ToastKind;
use ratatui::style::Color;

/// Get the color for an operation record tag
pub fn get_operation_color(operation_type: &str) -> Color {
    match operation_type {
        "delete" => Color::Red,
        "enqueued" => Color::Blue,
        "add" | "added" => Color::Green,
        "update" | "updated" => Color::Yellow,
        _ => Color::Magenta,
    }
}

pub fn get_toast_color(kind: ToastKind) -> Color {
    match kind {
        ToastKind::Success => Color::Green,
        ToastKind::Error => Color::Red,
    }
}

pub fn focused_border() -> Color {
    Color::Cyan
}

pub fn muted() -> Color {
    Color::DarkGray
}

/// Spinner frames for regions that are loading
pub const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];

/// Background of modal dialogs
pub const MODAL_BG: Color = Color::Rgb(30, 30, 30);
