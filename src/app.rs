use crate::api::{HttpTransport, StudentApi, Transport};
use crate::refresh::{Command, Refresher, SharedState};
use crate::types::{InputMode, Region, Tab, ToastKind};
use crate::ui;
use crate::ui::draw;
use crate::{config::Config, state::AppState};
use color_eyre::Result;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    widgets::ListState,
    DefaultTerminal, Frame,
};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;

const NO_SERVER: &str = "No server configured. Press , to set one";

#[derive(Debug)]
pub struct App {
    state: SharedState,
    list_state: ListState,
    base_url: Option<String>,
    refresher: Option<Refresher<HttpTransport>>,
    spinner_index: usize,
    last_tick: Instant,
    event_handler: ui::EventHandler,
    config: Config,
}

impl App {
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        let base_url = config.server.base_url.clone();

        // Show URL modal if no config
        let initial_input_mode = if base_url.is_none() {
            InputMode::EnteringUrl
        } else {
            InputMode::Normal
        };

        let state: SharedState = Arc::new(RwLock::new(AppState {
            input_mode: initial_input_mode,
            ..Default::default()
        }));

        let refresher = base_url
            .as_deref()
            .map(|url| connect(url, Arc::clone(&state)));

        Ok(Self {
            state,
            list_state: ListState::default(),
            base_url,
            refresher,
            spinner_index: 0,
            last_tick: Instant::now(),
            event_handler: ui::EventHandler::new(),
            config,
        })
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        // Students is the first tab shown; without a server the URL modal is open instead
        if self.refresher.is_some() {
            self.spawn_all(vec![Command::Load(Region::Students)]);
        }

        while !self.event_handler.should_quit {
            // Update spinner animation
            if self.last_tick.elapsed().as_millis() > 100 {
                self.spinner_index = (self.spinner_index + 1) % draw::SPINNER.len();
                self.last_tick = Instant::now();
            }

            self.state
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .expire_toast(Instant::now());

            terminal.draw(|frame| self.draw(frame))?;

            let outcome = self
                .event_handler
                .handle_events(&self.state, self.base_url.clone())?;

            // New server: save it, reconnect and reload what is on screen
            if let Some(url) = outcome.url_submitted {
                self.config.set_base_url(&url)?;
                self.base_url = self.config.server.base_url.clone();
                self.refresher = self
                    .base_url
                    .as_deref()
                    .map(|url| connect(url, Arc::clone(&self.state)));

                let tab = self.active_tab();
                self.spawn_all(tab.regions().iter().copied().map(Command::Load).collect());
            }

            self.spawn_all(outcome.commands);
        }

        Ok(())
    }

    fn spawn_all(&self, commands: Vec<Command>) {
        dispatch(self.refresher.as_ref(), &self.state, commands);
    }

    fn active_tab(&self) -> Tab {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .active_tab
    }

    fn draw(&mut self, frame: &mut Frame) {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);

        // Create main layout: Header, Body, Footer
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Body
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let display_url = self.base_url.as_deref().unwrap_or("No server configured");

        draw::render_header(
            frame,
            main_chunks[0],
            display_url,
            state.active_tab,
            &state.loading_state(),
            self.spinner_index,
        );

        match state.active_tab {
            Tab::Students => draw::render_students_tab(
                frame,
                main_chunks[1],
                &state,
                self.spinner_index,
                &mut self.list_state,
            ),
            Tab::Search => {
                draw::render_search_tab(frame, main_chunks[1], &state, self.spinner_index)
            }
            Tab::DataStructures => {
                draw::render_data_structures_tab(frame, main_chunks[1], &state, self.spinner_index)
            }
            Tab::Statistics => {
                draw::render_statistics_tab(frame, main_chunks[1], &state, self.spinner_index)
            }
        }

        draw::render_footer(frame, main_chunks[2], state.active_tab);

        // Render modals LAST - after everything else
        match &state.input_mode {
            InputMode::EnteringUrl => draw::render_url_input_modal(frame, &state),
            InputMode::EditingForm(form) => draw::render_form_modal(frame, form),
            InputMode::Confirming(pending) => draw::render_confirm_modal(frame, pending),
            InputMode::Normal => {}
        }

        if let Some(toast) = &state.toast {
            draw::render_toast(frame, toast);
        }
    }
}

/// Spawn commands, or tell the user there is no server to send them to
fn dispatch<T: Transport + 'static>(
    refresher: Option<&Refresher<T>>,
    state: &SharedState,
    commands: Vec<Command>,
) {
    if commands.is_empty() {
        return;
    }
    let Some(refresher) = refresher else {
        tracing::debug!(count = commands.len(), "no server configured, dropping commands");
        state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .notify(NO_SERVER, ToastKind::Error);
        return;
    };
    for command in commands {
        refresher.spawn(command);
    }
}

fn connect(base_url: &str, state: SharedState) -> Refresher<HttpTransport> {
    let transport = HttpTransport::new(base_url);
    tracing::info!(api_root = transport.api_root(), "connected to server");
    Refresher::new(StudentApi::new(transport), state)
}
