//! Yank (copy) handlers
//!
//! Copies the selected student's ID to the system clipboard.

use super::helpers::{apply, read};
use crate::actions::AppAction;
use crate::refresh::SharedState;
use crate::types::{Tab, ToastKind};
use arboard::Clipboard;

/// Yank the selected student ID and report the result as a toast
pub fn handle_yank_student_id(state: &SharedState) {
    let Some(student_id) = selected_student_id(state) else {
        tracing::debug!("nothing selected to yank");
        return;
    };

    let result = Clipboard::new().and_then(|mut clipboard| clipboard.set_text(student_id.clone()));

    let action = match result {
        Ok(()) => {
            tracing::debug!(%student_id, "yanked student id");
            AppAction::Notify(format!("Copied ID {student_id}"), ToastKind::Success)
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to copy to clipboard");
            AppAction::Notify("Could not access clipboard".to_string(), ToastKind::Error)
        }
    };
    apply(state, action);
}

fn selected_student_id(state: &SharedState) -> Option<String> {
    let s = read(state);
    if s.active_tab != Tab::Students {
        return None;
    }
    s.selected_student().map(|student| student.student_id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use crate::testing::student;
    use crate::types::View;
    use std::sync::{Arc, RwLock};

    #[test]
    fn test_selected_student_id_only_on_students_tab() {
        let mut app_state = AppState::default();
        app_state.set_students(View::Ready(vec![student("s1", "Ada"), student("s2", "Bo")]));
        app_state.selected_student = 1;
        let state = Arc::new(RwLock::new(app_state));

        assert_eq!(selected_student_id(&state).as_deref(), Some("s2"));

        state.write().unwrap().active_tab = Tab::Statistics;
        assert_eq!(selected_student_id(&state), None);
    }
}
