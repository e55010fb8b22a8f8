//! Modal dialog handlers
//!
//! This module handles user input for modal dialogs:
//! - Input forms (student, grades, searches)
//! - Confirmation prompts
//! - Server URL configuration

use super::helpers::{apply, apply_many, read};
use crate::actions::AppAction;
use crate::config;
use crate::refresh::{Command, SharedState};
use crate::types::{
    Confirmation, FormKind, FormState, InputMode, PendingConfirm, Tab, ToastKind,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle a key while a form is open. Returns the command to run on submit.
pub fn handle_form_input(key: KeyEvent, state: &SharedState) -> Option<Command> {
    match key.code {
        KeyCode::Esc => {
            apply(state, AppAction::CloseForm);
            tracing::debug!("form cancelled");
        }
        KeyCode::Enter => {
            let form = match &read(state).input_mode {
                InputMode::EditingForm(form) => form.clone(),
                _ => return None,
            };
            let command = form_command(&form);
            tracing::debug!(?command, "form submitted");
            return Some(command);
        }
        KeyCode::Tab | KeyCode::Down => apply(state, AppAction::FocusNextField),
        KeyCode::BackTab | KeyCode::Up => apply(state, AppAction::FocusPreviousField),
        KeyCode::Backspace => apply(state, AppAction::BackspaceForm),
        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            apply(state, AppAction::ClearFormField);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            handle_form_text(state, c.to_string());
        }
        _ => {}
    }
    None
}

pub fn handle_form_text(state: &SharedState, text: String) {
    apply(state, AppAction::AppendToForm(text));
}

/// Turn the typed fields into a command. Validation happens when it runs.
fn form_command(form: &FormState) -> Command {
    let field = |i: usize| form.field(i).to_string();
    match form.kind {
        FormKind::AddStudent => Command::CreateStudent {
            student_id: field(0),
            name: field(1),
        },
        FormKind::AddGrade => Command::AddGrade {
            student_id: field(0),
            subject: field(1),
            grade: field(2),
        },
        FormKind::UpdateGrade => Command::UpdateGrade {
            student_id: field(0),
            subject: field(1),
            grade: field(2),
        },
        FormKind::SearchById => Command::FindStudent(field(0)),
        FormKind::SearchByName => Command::SearchByName(field(0)),
    }
}

/// Handle y/n on a confirmation prompt
pub fn handle_confirmation(key: KeyEvent, state: &SharedState) -> Option<Command> {
    let confirmation = match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => Confirmation::Granted,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Confirmation::Declined,
        _ => return None,
    };

    let pending = match &read(state).input_mode {
        InputMode::Confirming(pending) => pending.clone(),
        _ => return None,
    };
    apply(state, AppAction::CloseConfirmation);

    Some(match pending {
        PendingConfirm::DeleteStudent(student_id) => Command::DeleteStudent {
            student_id,
            confirmation,
        },
        PendingConfirm::ProcessQueue => Command::ProcessQueue(confirmation),
    })
}

/// Handle URL input modal. Returns the URL once a valid one is submitted.
pub fn handle_url_input(key: KeyEvent, state: &SharedState) -> Option<String> {
    match key.code {
        KeyCode::Enter => {
            let url = read(state).url_input.trim().to_string();
            match config::validate_url(&url) {
                Ok(()) => {
                    apply(state, AppAction::ExitUrlInputMode);
                    tracing::info!(%url, "server url submitted");
                    return Some(url);
                }
                Err(message) => {
                    tracing::debug!(%url, %message, "invalid server url");
                    apply(state, AppAction::Notify(message, ToastKind::Error));
                }
            }
        }
        KeyCode::Esc => {
            apply(state, AppAction::ExitUrlInputMode);
            tracing::debug!("url input cancelled");
        }
        KeyCode::Backspace => apply(state, AppAction::BackspaceUrlInput),
        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            apply(state, AppAction::ClearUrlInput);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            handle_url_text(state, c.to_string());
        }
        _ => {}
    }
    None
}

pub fn handle_url_text(state: &SharedState, text: String) {
    apply(state, AppAction::AppendToUrlInput(text));
}

/// Open the URL modal prefilled with the current server
pub fn handle_url_dialog(state: &SharedState, base_url: Option<String>) {
    apply(state, AppAction::EnterUrlInputMode { base_url });
    tracing::debug!("entering url input mode");
}

/// Ask before deleting the selected student
pub fn handle_delete_request(state: &SharedState) {
    let student_id = read(state)
        .selected_student()
        .map(|student| student.student_id.clone());

    match student_id {
        Some(id) => apply(
            state,
            AppAction::AskConfirmation(PendingConfirm::DeleteStudent(id)),
        ),
        None => tracing::debug!("no student selected to delete"),
    }
}

/// Open a search form on the search tab
pub fn handle_search_dialog(state: &SharedState, kind: FormKind) {
    apply_many(
        state,
        vec![
            AppAction::ShowTab(Tab::Search),
            AppAction::OpenForm(kind),
        ],
    );
}
