use crate::state::AppState;
use crate::types::{FormKind, FormState, InputMode, PendingConfirm, Tab, ToastKind};

/// Represents all local state-changing actions in the application.
/// Network work goes through `refresh::Command`; these never touch the API.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    // Tabs
    ShowTab(Tab),

    // Students list
    SelectNextStudent,
    SelectPreviousStudent,

    // Forms
    OpenForm(FormKind),
    CloseForm,
    AppendToForm(String),
    BackspaceForm,
    ClearFormField,
    FocusNextField,
    FocusPreviousField,

    // Confirmation prompts
    AskConfirmation(PendingConfirm),
    CloseConfirmation,

    // Server URL modal
    EnterUrlInputMode { base_url: Option<String> },
    ExitUrlInputMode,
    AppendToUrlInput(String),
    BackspaceUrlInput,
    ClearUrlInput,

    Notify(String, ToastKind),
}

/// Apply an action to the application state
/// All local state mutations go through this function
pub fn apply_action(action: AppAction, state: &mut AppState) {
    match action {
        AppAction::ShowTab(tab) => {
            state.active_tab = tab;
        }

        AppAction::SelectNextStudent => {
            let len = state.students.ready().map_or(0, Vec::len);
            if state.selected_student + 1 < len {
                state.selected_student += 1;
            }
        }
        AppAction::SelectPreviousStudent => {
            state.selected_student = state.selected_student.saturating_sub(1);
        }

        AppAction::OpenForm(kind) => {
            let mut form = FormState::new(kind);
            // Grade forms start from the student the user is looking at
            if matches!(kind, FormKind::AddGrade | FormKind::UpdateGrade)
                && state.active_tab == Tab::Students
            {
                if let Some(student) = state.selected_student() {
                    form.fields[0] = student.student_id.clone();
                    form.active_field = 1;
                }
            }
            state.input_mode = InputMode::EditingForm(form);
        }
        AppAction::CloseForm => {
            if matches!(state.input_mode, InputMode::EditingForm(_)) {
                state.input_mode = InputMode::Normal;
            }
        }
        AppAction::AppendToForm(text) => {
            if let InputMode::EditingForm(form) = &mut state.input_mode {
                if let Some(field) = form.active_mut() {
                    field.push_str(&text);
                }
            }
        }
        AppAction::BackspaceForm => {
            if let InputMode::EditingForm(form) = &mut state.input_mode {
                if let Some(field) = form.active_mut() {
                    field.pop();
                }
            }
        }
        AppAction::ClearFormField => {
            if let InputMode::EditingForm(form) = &mut state.input_mode {
                if let Some(field) = form.active_mut() {
                    field.clear();
                }
            }
        }
        AppAction::FocusNextField => {
            if let InputMode::EditingForm(form) = &mut state.input_mode {
                form.focus_next();
            }
        }
        AppAction::FocusPreviousField => {
            if let InputMode::EditingForm(form) = &mut state.input_mode {
                form.focus_previous();
            }
        }

        AppAction::AskConfirmation(pending) => {
            state.input_mode = InputMode::Confirming(pending);
        }
        AppAction::CloseConfirmation => {
            if matches!(state.input_mode, InputMode::Confirming(_)) {
                state.input_mode = InputMode::Normal;
            }
        }

        AppAction::EnterUrlInputMode { base_url } => {
            state.input_mode = InputMode::EnteringUrl;
            state.url_input = base_url.unwrap_or_default();
        }
        AppAction::ExitUrlInputMode => {
            state.input_mode = InputMode::Normal;
            state.url_input.clear();
        }
        AppAction::AppendToUrlInput(text) => {
            state.url_input.push_str(&text);
        }
        AppAction::BackspaceUrlInput => {
            state.url_input.pop();
        }
        AppAction::ClearUrlInput => {
            state.url_input.clear();
        }

        AppAction::Notify(message, kind) => {
            state.notify(message, kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::student;
    use crate::types::View;

    #[test]
    fn test_show_tab() {
        let mut state = AppState::default();
        apply_action(AppAction::ShowTab(Tab::Statistics), &mut state);
        assert_eq!(state.active_tab, Tab::Statistics);
    }

    #[test]
    fn test_student_selection_stays_in_bounds() {
        let mut state = AppState::default();
        state.set_students(View::Ready(vec![student("1", "A"), student("2", "B")]));

        apply_action(AppAction::SelectPreviousStudent, &mut state);
        assert_eq!(state.selected_student, 0);

        apply_action(AppAction::SelectNextStudent, &mut state);
        apply_action(AppAction::SelectNextStudent, &mut state);
        assert_eq!(state.selected_student, 1);
    }

    #[test]
    fn test_form_typing_goes_to_active_field() {
        let mut state = AppState::default();
        apply_action(AppAction::OpenForm(FormKind::AddStudent), &mut state);
        apply_action(AppAction::AppendToForm("s1".to_string()), &mut state);
        apply_action(AppAction::FocusNextField, &mut state);
        apply_action(AppAction::AppendToForm("Adax".to_string()), &mut state);
        apply_action(AppAction::BackspaceForm, &mut state);

        let InputMode::EditingForm(form) = &state.input_mode else {
            panic!("form should be open");
        };
        assert_eq!(form.fields, vec!["s1".to_string(), "Ada".to_string()]);
    }

    #[test]
    fn test_clear_form_field() {
        let mut state = AppState::default();
        apply_action(AppAction::OpenForm(FormKind::SearchByName), &mut state);
        apply_action(AppAction::AppendToForm("Ada".to_string()), &mut state);
        apply_action(AppAction::ClearFormField, &mut state);

        let InputMode::EditingForm(form) = &state.input_mode else {
            panic!("form should be open");
        };
        assert_eq!(form.field(0), "");
    }

    #[test]
    fn test_grade_form_prefills_selected_student() {
        let mut state = AppState::default();
        state.set_students(View::Ready(vec![student("s9", "Ada")]));
        apply_action(AppAction::OpenForm(FormKind::AddGrade), &mut state);

        let InputMode::EditingForm(form) = &state.input_mode else {
            panic!("form should be open");
        };
        assert_eq!(form.field(0), "s9");
        assert_eq!(form.active_field, 1);
    }

    #[test]
    fn test_close_confirmation_only_when_confirming() {
        let mut state = AppState::default();
        apply_action(AppAction::OpenForm(FormKind::AddStudent), &mut state);
        apply_action(AppAction::CloseConfirmation, &mut state);
        assert!(matches!(state.input_mode, InputMode::EditingForm(_)));

        apply_action(AppAction::AskConfirmation(PendingConfirm::ProcessQueue), &mut state);
        apply_action(AppAction::CloseConfirmation, &mut state);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_url_input_prefilled() {
        let mut state = AppState::default();
        apply_action(
            AppAction::EnterUrlInputMode {
                base_url: Some("http://localhost:5000".to_string()),
            },
            &mut state,
        );
        apply_action(AppAction::BackspaceUrlInput, &mut state);
        assert_eq!(state.url_input, "http://localhost:500");
        apply_action(AppAction::ExitUrlInputMode, &mut state);
        assert!(state.url_input.is_empty());
        assert_eq!(state.input_mode, InputMode::Normal);
    }
}
