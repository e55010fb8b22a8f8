use serde::Deserialize;
use std::time::{Duration, Instant};

/// A student as returned by the server
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Student {
    pub student_id: String,
    pub name: String,

    #[serde(default)]
    pub subjects: Vec<String>,

    /// Index-aligned with `subjects`
    #[serde(default)]
    pub grades: Vec<f64>,

    /// Server-computed average over `grades`; `null` when there are none
    #[serde(default)]
    pub average: Option<f64>,
}

impl Student {
    /// Subject/grade pairs in server order. A missing grade yields `None`.
    pub fn grade_rows(&self) -> impl Iterator<Item = (&str, Option<f64>)> {
        self.subjects
            .iter()
            .enumerate()
            .map(|(i, subject)| (subject.as_str(), self.grades.get(i).copied()))
    }

    pub fn has_grades(&self) -> bool {
        !self.subjects.is_empty()
    }
}

/// One entry of the server-held undo stack or operation queue
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OperationRecord {
    pub operation_type: String,
    pub student_id: String,
    pub student_name: String,
}

/// Stack or queue contents together with the size the server reported
#[derive(Debug, Clone, PartialEq)]
pub struct OperationLog {
    pub records: Vec<OperationRecord>,
    pub size: usize,
}

/// Aggregate counters computed server-side over all students
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Statistics {
    #[serde(default)]
    pub total_students: u64,
    #[serde(default)]
    pub undo_stack_size: u64,
    #[serde(default)]
    pub queue_size: u64,
    #[serde(default)]
    pub highest_average: Option<f64>,
    #[serde(default)]
    pub lowest_average: Option<f64>,
    #[serde(default)]
    pub overall_average: Option<f64>,
}

/// Content of the search results region
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
    /// Heading shown above the cards, e.g. "Found 2 student(s):"
    pub heading: Option<String>,
    pub students: Vec<Student>,
}

/// Render state of one independently refreshed region
#[derive(Debug, Clone, PartialEq)]
pub enum View<T> {
    /// Never loaded
    Idle,
    Loading,
    Ready(T),
    Empty(String),
    Failed(String),
}

impl<T> Default for View<T> {
    fn default() -> Self {
        View::Idle
    }
}

impl<T> View<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, View::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            View::Ready(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadingState {
    Idle,
    Fetching,
}

/// Regions of the view state that can be re-fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Students,
    Stack,
    Queue,
    Statistics,
}

/// Top-level tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Students,
    Search,
    DataStructures,
    Statistics,
}

impl Tab {
    pub const ALL: [Tab; 4] = [
        Tab::Students,
        Tab::Search,
        Tab::DataStructures,
        Tab::Statistics,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Students => "Students",
            Tab::Search => "Search",
            Tab::DataStructures => "Data Structures",
            Tab::Statistics => "Statistics",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Tab> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Tab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Regions loaded when this tab becomes visible
    pub fn regions(self) -> &'static [Region] {
        match self {
            Tab::Students => &[Region::Students],
            Tab::Search => &[],
            Tab::DataStructures => &[Region::Stack, Region::Queue],
            Tab::Statistics => &[Region::Statistics],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Transient notification shown over the UI
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub shown_at: Instant,
}

impl Toast {
    pub const LIFETIME: Duration = Duration::from_secs(3);

    pub fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            message: message.into(),
            kind,
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= Self::LIFETIME
    }
}

/// Input forms the user can open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    AddStudent,
    AddGrade,
    UpdateGrade,
    SearchById,
    SearchByName,
}

impl FormKind {
    pub fn title(self) -> &'static str {
        match self {
            FormKind::AddStudent => " Add Student ",
            FormKind::AddGrade => " Add Grade ",
            FormKind::UpdateGrade => " Update Grade ",
            FormKind::SearchById => " Search by ID ",
            FormKind::SearchByName => " Search by Name ",
        }
    }

    pub fn labels(self) -> &'static [&'static str] {
        match self {
            FormKind::AddStudent => &["Student ID", "Name"],
            FormKind::AddGrade | FormKind::UpdateGrade => &["Student ID", "Subject", "Grade"],
            FormKind::SearchById => &["Student ID"],
            FormKind::SearchByName => &["Name"],
        }
    }
}

/// An open form and the text typed into each field
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub kind: FormKind,
    pub fields: Vec<String>,
    pub active_field: usize,
}

impl FormState {
    pub fn new(kind: FormKind) -> Self {
        Self {
            kind,
            fields: vec![String::new(); kind.labels().len()],
            active_field: 0,
        }
    }

    pub fn field(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn active_mut(&mut self) -> Option<&mut String> {
        self.fields.get_mut(self.active_field)
    }

    pub fn focus_next(&mut self) {
        self.active_field = (self.active_field + 1) % self.fields.len().max(1);
    }

    pub fn focus_previous(&mut self) {
        let len = self.fields.len().max(1);
        self.active_field = (self.active_field + len - 1) % len;
    }
}

/// Answer to a confirmation prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Granted,
    Declined,
}

/// Destructive action waiting for the user to confirm
#[derive(Debug, Clone, PartialEq)]
pub enum PendingConfirm {
    DeleteStudent(String),
    ProcessQueue,
}

impl PendingConfirm {
    pub fn prompt(&self) -> String {
        match self {
            PendingConfirm::DeleteStudent(id) => {
                format!("Are you sure you want to delete student {id}?")
            }
            PendingConfirm::ProcessQueue => {
                "Are you sure you want to process all operations in the queue?".to_string()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    EditingForm(FormState),
    Confirming(PendingConfirm),
    EnteringUrl,
}
