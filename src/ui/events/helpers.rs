//! Helper functions for event handling
//!
//! - State locking helpers (apply actions, snapshot reads)
//! - Paste batching

use crate::actions::{apply_action, AppAction};
use crate::refresh::SharedState;
use crate::state::AppState;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use std::sync::{PoisonError, RwLockReadGuard, RwLockWriteGuard};

/// Read the state, recovering the guard if a writer panicked
pub fn read(state: &SharedState) -> RwLockReadGuard<'_, AppState> {
    state.read().unwrap_or_else(PoisonError::into_inner)
}

pub fn write(state: &SharedState) -> RwLockWriteGuard<'_, AppState> {
    state.write().unwrap_or_else(PoisonError::into_inner)
}

/// Apply a single action to state
pub fn apply(state: &SharedState, action: AppAction) {
    apply_action(action, &mut write(state));
}

/// Apply multiple actions under one lock
pub fn apply_many(state: &SharedState, actions: Vec<AppAction>) {
    let mut s = write(state);
    for action in actions {
        apply_action(action, &mut s);
    }
}

/// Collect a batch of characters for paste support
///
/// When a character is typed, this drains any immediately available
/// character events so a terminal paste lands as one edit.
pub fn collect_paste_batch(initial_char: char) -> String {
    let mut batch = String::from(initial_char);

    while let Ok(true) = event::poll(std::time::Duration::from_millis(0)) {
        match event::read() {
            Ok(Event::Key(next_key)) => match next_key.code {
                KeyCode::Char(c) if !next_key.modifiers.contains(KeyModifiers::CONTROL) => {
                    batch.push(c);
                }
                // Non-character or control key, stop batching
                _ => break,
            },
            _ => break,
        }
    }

    batch
}
