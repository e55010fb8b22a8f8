use crate::types::{
    InputMode, LoadingState, OperationLog, Region, SearchResults, Statistics, Student, Tab,
    Toast, ToastKind, View,
};
use std::time::Instant;

/// Everything the UI draws. Each region is replaced wholesale when its
/// request completes.
#[derive(Debug, Clone)]
pub struct AppState {
    pub active_tab: Tab,
    pub input_mode: InputMode,

    pub students: View<Vec<Student>>,
    pub search: View<SearchResults>,
    pub stack: View<OperationLog>,
    pub queue: View<OperationLog>,
    pub statistics: View<Statistics>,

    /// Selected card in the students list
    pub selected_student: usize,

    pub toast: Option<Toast>,

    /// Buffer for the server URL modal
    pub url_input: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            active_tab: Tab::Students,
            input_mode: InputMode::Normal,
            students: View::Idle,
            search: View::Idle,
            stack: View::Idle,
            queue: View::Idle,
            statistics: View::Idle,
            selected_student: 0,
            toast: None,
            url_input: String::new(),
        }
    }
}

impl AppState {
    pub fn notify(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.toast = Some(Toast::new(message, kind));
    }

    /// Drop the toast once it has been visible long enough
    pub fn expire_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
            self.toast = None;
        }
    }

    pub fn mark_loading(&mut self, region: Region) {
        match region {
            Region::Students => self.students = View::Loading,
            Region::Stack => self.stack = View::Loading,
            Region::Queue => self.queue = View::Loading,
            Region::Statistics => self.statistics = View::Loading,
        }
    }

    pub fn set_students(&mut self, view: View<Vec<Student>>) {
        self.students = view;
        let len = self.students.ready().map_or(0, Vec::len);
        self.selected_student = self.selected_student.min(len.saturating_sub(1));
    }

    pub fn selected_student(&self) -> Option<&Student> {
        self.students
            .ready()
            .and_then(|students| students.get(self.selected_student))
    }

    /// Summary shown in the header while anything is in flight
    pub fn loading_state(&self) -> LoadingState {
        let busy = self.students.is_loading()
            || self.search.is_loading()
            || self.stack.is_loading()
            || self.queue.is_loading()
            || self.statistics.is_loading();
        if busy {
            LoadingState::Fetching
        } else {
            LoadingState::Idle
        }
    }
}
