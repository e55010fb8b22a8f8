//! View refresher
//!
//! Runs one user-level operation end to end: local validation, the HTTP call,
//! envelope branching, the toast, and the re-fetch of every region whose data
//! the operation could have changed. Failures never escape: they end up as a
//! toast plus a placeholder in the affected region.
//!
//! Refreshes after a mutation run concurrently with no ordering between them,
//! and nothing is cancelled. If a later action finishes first, the slower
//! response still overwrites its region when it lands.

use crate::api::{Ack, ApiError, Outcome, StudentApi, Transport};
use crate::state::AppState;
use crate::types::{
    Confirmation, FormKind, InputMode, OperationLog, Region, SearchResults, ToastKind, View,
};
use crate::validate;
use std::sync::{Arc, RwLock};
use tokio::task::JoinSet;

pub type SharedState = Arc<RwLock<AppState>>;

const NO_STUDENTS: &str = "No students found. Add your first student!";
const CONNECTION_ERROR: &str = "Error connecting to server";

/// A unit of work triggered by the user
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Load(Region),
    FindStudent(String),
    SearchByName(String),
    CreateStudent {
        student_id: String,
        name: String,
    },
    DeleteStudent {
        student_id: String,
        confirmation: Confirmation,
    },
    AddGrade {
        student_id: String,
        subject: String,
        grade: String,
    },
    UpdateGrade {
        student_id: String,
        subject: String,
        grade: String,
    },
    Undo,
    ProcessQueue(Confirmation),
}

/// Executes commands against the API and writes the results into the view state
#[derive(Debug)]
pub struct Refresher<T> {
    api: Arc<StudentApi<T>>,
    state: SharedState,
}

impl<T> Clone for Refresher<T> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Transport + 'static> Refresher<T> {
    pub fn new(api: StudentApi<T>, state: SharedState) -> Self {
        Self {
            api: Arc::new(api),
            state,
        }
    }

    /// Run a command in the background
    pub fn spawn(&self, command: Command) {
        let this = self.clone();
        tokio::spawn(async move {
            this.execute(command).await;
        });
    }

    pub async fn execute(&self, command: Command) {
        match command {
            Command::Load(region) => self.load(region).await,
            Command::FindStudent(id) => self.get_student(&id).await,
            Command::SearchByName(name) => self.search_by_name(&name).await,
            Command::CreateStudent { student_id, name } => {
                self.create_student(&student_id, &name).await
            }
            Command::DeleteStudent {
                student_id,
                confirmation,
            } => self.delete_student(&student_id, confirmation).await,
            Command::AddGrade {
                student_id,
                subject,
                grade,
            } => self.add_grade(&student_id, &subject, &grade).await,
            Command::UpdateGrade {
                student_id,
                subject,
                grade,
            } => self.update_grade(&student_id, &subject, &grade).await,
            Command::Undo => self.undo().await,
            Command::ProcessQueue(confirmation) => self.process_queue(confirmation).await,
        }
    }

    /// Re-fetch several regions concurrently and wait for all of them
    pub async fn refresh(&self, regions: &[Region]) {
        let mut tasks = JoinSet::new();
        for &region in regions {
            let this = self.clone();
            tasks.spawn(async move { this.load(region).await });
        }
        while let Some(joined) = tasks.join_next().await {
            if let Err(err) = joined {
                tracing::error!(error = %err, "refresh task aborted");
            }
        }
    }

    pub async fn load(&self, region: Region) {
        match region {
            Region::Students => self.list_students().await,
            Region::Stack => self.get_stack().await,
            Region::Queue => self.get_queue().await,
            Region::Statistics => self.get_statistics().await,
        }
    }

    pub async fn list_students(&self) {
        self.update(|s| s.mark_loading(Region::Students));

        match self.api.list_students().await {
            Ok(Outcome::Success { payload, .. }) => self.update(|s| {
                if payload.is_empty() {
                    s.set_students(View::Empty(NO_STUDENTS.to_string()));
                } else {
                    s.set_students(View::Ready(payload));
                }
            }),
            Ok(Outcome::Failure { message }) => {
                self.rejected("list_students", message, "Error loading students", |s| {
                    s.set_students(View::Failed("Error loading students".to_string()))
                })
            }
            Err(err) => self.unreachable("list_students", err, CONNECTION_ERROR, |s| {
                s.set_students(View::Failed(CONNECTION_ERROR.to_string()))
            }),
        }
    }

    pub async fn get_student(&self, input: &str) {
        let id = match validate::student_id(input) {
            Ok(id) => id,
            Err(err) => return self.invalid(err),
        };

        self.update(|s| {
            s.search = View::Loading;
            close_form(s, FormKind::SearchById);
        });

        match self.api.get_student(&id).await {
            Ok(Outcome::Success { payload, .. }) => self.update(|s| {
                s.search = View::Ready(SearchResults {
                    heading: None,
                    students: vec![payload],
                });
                s.notify("Student found!", ToastKind::Success);
            }),
            Ok(Outcome::Failure { message }) => {
                self.rejected("get_student", message, "Student not found", |s| {
                    s.search = View::Empty("Student not found".to_string())
                })
            }
            Err(err) => self.unreachable("get_student", err, "Error searching for student", |s| {
                s.search = View::Failed("Error searching for student".to_string())
            }),
        }
    }

    pub async fn search_by_name(&self, input: &str) {
        let name = match validate::student_name(input) {
            Ok(name) => name,
            Err(err) => return self.invalid(err),
        };

        self.update(|s| {
            s.search = View::Loading;
            close_form(s, FormKind::SearchByName);
        });

        match self.api.search_by_name(&name).await {
            Ok(Outcome::Success { payload, .. }) => self.update(|s| {
                if payload.is_empty() {
                    s.search = View::Empty("No students found".to_string());
                    return;
                }
                let found = format!("Found {} student(s)", payload.len());
                s.search = View::Ready(SearchResults {
                    heading: Some(format!("{found}:")),
                    students: payload,
                });
                s.notify(found, ToastKind::Success);
            }),
            Ok(Outcome::Failure { message }) => {
                self.rejected("search_by_name", message, "Error searching for students", |s| {
                    s.search = View::Empty("No students found".to_string())
                })
            }
            Err(err) => {
                self.unreachable("search_by_name", err, "Error searching for students", |s| {
                    s.search = View::Failed("Error searching for students".to_string())
                })
            }
        }
    }

    pub async fn create_student(&self, student_id: &str, name: &str) {
        let student = match validate::new_student(student_id, name) {
            Ok(student) => student,
            Err(err) => return self.invalid(err),
        };

        let outcome = self
            .api
            .create_student(&student.student_id, &student.name)
            .await;
        self.finish_mutation(
            "create_student",
            outcome,
            "Error adding student",
            Some(FormKind::AddStudent),
            &[Region::Students, Region::Statistics],
        )
        .await;
    }

    pub async fn delete_student(&self, student_id: &str, confirmation: Confirmation) {
        if confirmation == Confirmation::Declined {
            tracing::debug!(student_id, "delete cancelled");
            return;
        }

        let outcome = self.api.delete_student(student_id).await;
        self.finish_mutation(
            "delete_student",
            outcome,
            "Error deleting student",
            None,
            &[Region::Students, Region::Stack, Region::Statistics],
        )
        .await;
    }

    pub async fn add_grade(&self, student_id: &str, subject: &str, grade: &str) {
        let entry = match validate::grade_entry(student_id, subject, grade) {
            Ok(entry) => entry,
            Err(err) => return self.invalid(err),
        };

        let outcome = self
            .api
            .add_grade(&entry.student_id, &entry.subject, entry.grade)
            .await;
        self.finish_mutation(
            "add_grade",
            outcome,
            "Error adding grade",
            Some(FormKind::AddGrade),
            &[Region::Students, Region::Statistics],
        )
        .await;
    }

    pub async fn update_grade(&self, student_id: &str, subject: &str, grade: &str) {
        let entry = match validate::grade_entry(student_id, subject, grade) {
            Ok(entry) => entry,
            Err(err) => return self.invalid(err),
        };

        let outcome = self
            .api
            .update_grade(&entry.student_id, &entry.subject, entry.grade)
            .await;
        self.finish_mutation(
            "update_grade",
            outcome,
            "Error updating grade",
            Some(FormKind::UpdateGrade),
            &[Region::Students, Region::Statistics],
        )
        .await;
    }

    pub async fn undo(&self) {
        let outcome = self.api.undo().await;
        self.finish_mutation(
            "undo",
            outcome,
            "Error undoing delete",
            None,
            &[Region::Stack, Region::Students, Region::Statistics],
        )
        .await;
    }

    pub async fn process_queue(&self, confirmation: Confirmation) {
        if confirmation == Confirmation::Declined {
            tracing::debug!("queue processing cancelled");
            return;
        }

        let outcome = self.api.process_queue().await;
        self.finish_mutation(
            "process_queue",
            outcome,
            "Error processing queue",
            None,
            &[Region::Queue, Region::Students, Region::Statistics],
        )
        .await;
    }

    pub async fn get_stack(&self) {
        self.update(|s| s.mark_loading(Region::Stack));
        let outcome = self.api.get_stack().await;
        self.finish_operation_log(
            "get_stack",
            outcome,
            "Stack is empty",
            "Error loading stack",
            |s, view| s.stack = view,
        );
    }

    pub async fn get_queue(&self) {
        self.update(|s| s.mark_loading(Region::Queue));
        let outcome = self.api.get_queue().await;
        self.finish_operation_log(
            "get_queue",
            outcome,
            "Queue is empty",
            "Error loading queue",
            |s, view| s.queue = view,
        );
    }

    pub async fn get_statistics(&self) {
        self.update(|s| s.mark_loading(Region::Statistics));

        match self.api.get_statistics().await {
            Ok(Outcome::Success { payload, .. }) => {
                self.update(|s| s.statistics = View::Ready(payload))
            }
            Ok(Outcome::Failure { message }) => {
                self.rejected("get_statistics", message, "Error loading statistics", |s| {
                    s.statistics = View::Failed("Error loading statistics".to_string())
                })
            }
            Err(err) => self.unreachable("get_statistics", err, CONNECTION_ERROR, |s| {
                s.statistics = View::Failed(CONNECTION_ERROR.to_string())
            }),
        }
    }

    async fn finish_mutation(
        &self,
        operation: &'static str,
        outcome: Result<Outcome<Ack>, ApiError>,
        error_toast: &str,
        form: Option<FormKind>,
        affected: &[Region],
    ) {
        match outcome {
            Ok(Outcome::Success { message, .. }) => {
                tracing::info!(operation, "request succeeded");
                self.update(|s| {
                    if let Some(message) = message {
                        s.notify(message, ToastKind::Success);
                    }
                    if let Some(kind) = form {
                        close_form(s, kind);
                    }
                });
                self.refresh(affected).await;
            }
            Ok(Outcome::Failure { message }) => {
                self.rejected(operation, message, error_toast, |_| {})
            }
            Err(err) => self.unreachable(operation, err, error_toast, |_| {}),
        }
    }

    fn finish_operation_log(
        &self,
        operation: &'static str,
        outcome: Result<Outcome<OperationLog>, ApiError>,
        empty: &str,
        error: &str,
        set: impl FnOnce(&mut AppState, View<OperationLog>),
    ) {
        match outcome {
            Ok(Outcome::Success { payload, .. }) => self.update(|s| {
                let view = if payload.records.is_empty() {
                    View::Empty(empty.to_string())
                } else {
                    View::Ready(payload)
                };
                set(s, view);
            }),
            Ok(Outcome::Failure { message }) => self.rejected(operation, message, error, |s| {
                set(s, View::Failed(error.to_string()))
            }),
            Err(err) => self.unreachable(operation, err, error, |s| {
                set(s, View::Failed(error.to_string()))
            }),
        }
    }

    /// Server answered `success: false`
    fn rejected(
        &self,
        operation: &'static str,
        message: Option<String>,
        fallback: &str,
        apply: impl FnOnce(&mut AppState),
    ) {
        let message = message.unwrap_or_else(|| fallback.to_string());
        tracing::info!(operation, %message, "request rejected by server");
        self.update(|s| {
            apply(s);
            s.notify(message, ToastKind::Error);
        });
    }

    /// Request never produced a usable envelope
    fn unreachable(
        &self,
        operation: &'static str,
        err: ApiError,
        toast: &str,
        apply: impl FnOnce(&mut AppState),
    ) {
        tracing::warn!(operation, error = %err, "request failed");
        self.update(|s| {
            apply(s);
            s.notify(toast, ToastKind::Error);
        });
    }

    fn invalid(&self, err: validate::ValidationError) {
        tracing::debug!(error = %err, "input rejected locally");
        self.update(|s| s.notify(err.to_string(), ToastKind::Error));
    }

    fn update(&self, f: impl FnOnce(&mut AppState)) {
        match self.state.write() {
            Ok(mut s) => f(&mut *s),
            Err(_) => tracing::error!("view state lock poisoned"),
        }
    }
}

fn close_form(state: &mut AppState, kind: FormKind) {
    if matches!(&state.input_mode, InputMode::EditingForm(form) if form.kind == kind) {
        state.input_mode = InputMode::Normal;
    }
}
