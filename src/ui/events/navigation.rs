//! Navigation handlers
//!
//! Tab switching and movement through the students list.

use super::helpers::{apply, read};
use crate::actions::AppAction;
use crate::refresh::{Command, SharedState};
use crate::types::Tab;

/// Switch to `tab` and return the loads for every region it displays
pub fn show_tab(state: &SharedState, tab: Tab) -> Vec<Command> {
    apply(state, AppAction::ShowTab(tab));
    tracing::debug!(tab = tab.title(), "tab shown");
    load_tab(tab)
}

pub fn next_tab(state: &SharedState) -> Vec<Command> {
    let tab = read(state).active_tab.next();
    show_tab(state, tab)
}

pub fn previous_tab(state: &SharedState) -> Vec<Command> {
    let tab = read(state).active_tab.previous();
    show_tab(state, tab)
}

/// Reload whatever the active tab shows
pub fn reload(state: &SharedState) -> Vec<Command> {
    load_tab(read(state).active_tab)
}

fn load_tab(tab: Tab) -> Vec<Command> {
    tab.regions().iter().copied().map(Command::Load).collect()
}

/// Move the selection down in the students list
pub fn handle_down(state: &SharedState) {
    if read(state).active_tab == Tab::Students {
        apply(state, AppAction::SelectNextStudent);
    }
}

/// Move the selection up in the students list
pub fn handle_up(state: &SharedState) {
    if read(state).active_tab == Tab::Students {
        apply(state, AppAction::SelectPreviousStudent);
    }
}
