//! Event handling system for lazy-grades-tui
//!
//! This module processes user input and translates it into state-changing
//! actions and background commands. It handles multiple input modes:
//! - Normal: Tab switching, list navigation and global commands
//! - EditingForm: Typing into a student, grade or search form
//! - Confirming: y/n prompt before a destructive action
//! - EnteringUrl: Modal for configuring the server URL
//!
//! # Architecture
//!
//! Local changes go through `AppAction`s applied by `apply_action`. Anything
//! that needs the server is returned as a `Command` for the app to spawn, so
//! key handling itself never waits on the network.
//!
//! # Lock Management
//!
//! Handlers take short read or write locks on the shared state and never hold
//! one across a call that locks again.

mod helpers;
mod modals;
mod navigation;
mod yank;

use crate::actions::AppAction;
use crate::refresh::{Command, SharedState};
use crate::types::{FormKind, InputMode, PendingConfirm, Tab};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use helpers::{apply, collect_paste_batch, read};

/// What the app has to do after a batch of input
#[derive(Debug, Default, PartialEq)]
pub struct EventOutcome {
    pub commands: Vec<Command>,
    pub url_submitted: Option<String>,
}

/// Event handler for managing user input and state updates
#[derive(Debug, Default)]
pub struct EventHandler {
    pub should_quit: bool,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Poll for one terminal event and dispatch it on the current input mode
    pub fn handle_events(
        &mut self,
        state: &SharedState,
        base_url: Option<String>,
    ) -> Result<EventOutcome> {
        if !event::poll(std::time::Duration::from_millis(50))? {
            return Ok(EventOutcome::default());
        }

        let Event::Key(key) = event::read()? else {
            return Ok(EventOutcome::default());
        };
        if key.kind != KeyEventKind::Press {
            return Ok(EventOutcome::default());
        }

        // Batch pasted text in text-entry modes
        if let KeyCode::Char(c) = key.code {
            if !key.modifiers.contains(KeyModifiers::CONTROL) {
                let mode = read(state).input_mode.clone();
                match mode {
                    InputMode::EditingForm(_) => {
                        modals::handle_form_text(state, collect_paste_batch(c));
                        return Ok(EventOutcome::default());
                    }
                    InputMode::EnteringUrl => {
                        modals::handle_url_text(state, collect_paste_batch(c));
                        return Ok(EventOutcome::default());
                    }
                    _ => {}
                }
            }
        }

        Ok(self.handle_key(key, state, base_url))
    }

    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        state: &SharedState,
        base_url: Option<String>,
    ) -> EventOutcome {
        let mut outcome = EventOutcome::default();
        let input_mode = read(state).input_mode.clone();

        match input_mode {
            InputMode::EnteringUrl => {
                outcome.url_submitted = modals::handle_url_input(key, state);
            }

            InputMode::EditingForm(_) => {
                outcome.commands.extend(modals::handle_form_input(key, state));
            }

            InputMode::Confirming(_) => {
                outcome.commands.extend(modals::handle_confirmation(key, state));
            }

            InputMode::Normal => {
                outcome.commands = self.handle_normal_key(key, state, base_url);
            }
        }

        outcome
    }

    fn handle_normal_key(
        &mut self,
        key: KeyEvent,
        state: &SharedState,
        base_url: Option<String>,
    ) -> Vec<Command> {
        let active_tab = read(state).active_tab;

        match key.code {
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return navigation::reload(state);
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') => self.should_quit = true,

            // Tabs
            KeyCode::Tab => return navigation::next_tab(state),
            KeyCode::BackTab => return navigation::previous_tab(state),
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                if let Some(tab) = Tab::from_index(index) {
                    return navigation::show_tab(state, tab);
                }
            }

            // Students list
            KeyCode::Char('j') | KeyCode::Down => navigation::handle_down(state),
            KeyCode::Char('k') | KeyCode::Up => navigation::handle_up(state),
            KeyCode::Char('d') if active_tab == Tab::Students => {
                modals::handle_delete_request(state);
            }
            KeyCode::Char('y') if active_tab == Tab::Students => {
                yank::handle_yank_student_id(state);
            }

            // Forms
            KeyCode::Char('n') => apply(state, AppAction::OpenForm(FormKind::AddStudent)),
            KeyCode::Char('g') => apply(state, AppAction::OpenForm(FormKind::AddGrade)),
            KeyCode::Char('u') => apply(state, AppAction::OpenForm(FormKind::UpdateGrade)),
            KeyCode::Char('i') => modals::handle_search_dialog(state, FormKind::SearchById),
            KeyCode::Char('/') => modals::handle_search_dialog(state, FormKind::SearchByName),

            // Data structures
            KeyCode::Char('z') => return vec![Command::Undo],
            KeyCode::Char('p') => apply(
                state,
                AppAction::AskConfirmation(PendingConfirm::ProcessQueue),
            ),

            KeyCode::Char(',') => modals::handle_url_dialog(state, base_url),

            _ => {}
        }

        Vec::new()
    }
}
