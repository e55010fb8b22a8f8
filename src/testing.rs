//! In-memory stand-in for the student service used by unit tests

use crate::api::{ApiError, ApiRequest, Transport};
use crate::types::Student;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct Inner {
    students: Vec<Student>,
    /// Deleted students, most recent last
    undo_stack: Vec<Student>,
    queue: Vec<(String, String)>,
    requests: Vec<ApiRequest>,
    canned: HashMap<(Method, String), String>,
    offline: bool,
}

/// Records every request and answers like a small student service would
#[derive(Debug, Clone, Default)]
pub struct FakeServer {
    inner: Arc<Mutex<Inner>>,
}

impl FakeServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_students(students: &[(&str, &str)]) -> Self {
        let server = Self::new();
        {
            let mut inner = server.inner.lock().unwrap();
            for (id, name) in students {
                inner.students.push(student(id, name));
            }
        }
        server
    }

    pub fn with_queued(self, id: &str, name: &str) -> Self {
        self.inner
            .lock()
            .unwrap()
            .queue
            .push((id.to_string(), name.to_string()));
        self
    }

    /// Answer `method path` with a fixed body instead of simulating it
    pub fn respond_with(&self, method: Method, path: &str, body: &str) {
        self.inner
            .lock()
            .unwrap()
            .canned
            .insert((method, path.to_string()), body.to_string());
    }

    /// Every later request fails at the transport level
    pub fn go_offline(&self) {
        self.inner.lock().unwrap().offline = true;
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.inner.lock().unwrap().requests.last().cloned()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .requests
            .iter()
            .filter(|r| r.method == method && r.path() == path)
            .count()
    }

    pub fn clear_requests(&self) {
        self.inner.lock().unwrap().requests.clear();
    }
}

#[async_trait]
impl Transport for FakeServer {
    async fn send(&self, request: &ApiRequest) -> Result<String, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.requests.push(request.clone());

        if inner.offline {
            return Err(ApiError::Network("connection refused".to_string()));
        }

        if let Some(body) = inner.canned.get(&(request.method.clone(), request.path())) {
            return Ok(body.clone());
        }

        Ok(inner.route(request).to_string())
    }
}

impl Inner {
    fn route(&mut self, request: &ApiRequest) -> Value {
        let segments: Vec<&str> = request.segments.iter().map(String::as_str).collect();

        match (request.method.as_str(), segments.as_slice()) {
            ("GET", ["students"]) => {
                let students: Vec<Value> = self.students.iter().map(to_json).collect();
                json!({ "success": true, "students": students })
            }
            ("GET", ["students", "search"]) => {
                let needle = request
                    .query
                    .iter()
                    .find(|(k, _)| k == "name")
                    .map(|(_, v)| v.to_lowercase())
                    .unwrap_or_default();
                let found: Vec<Value> = self
                    .students
                    .iter()
                    .filter(|s| s.name.to_lowercase().contains(&needle))
                    .map(to_json)
                    .collect();
                json!({ "success": true, "students": found })
            }
            ("GET", ["students", id]) => match self.find(id) {
                Some(s) => json!({ "success": true, "student": to_json(s) }),
                None => json!({ "success": false, "message": "Student not found" }),
            },
            ("POST", ["students"]) => {
                let body = request.body.clone().unwrap_or_default();
                let id = body["student_id"].as_str().unwrap_or_default().to_string();
                let name = body["name"].as_str().unwrap_or_default().to_string();
                if self.find(&id).is_some() {
                    json!({ "success": false, "message": format!("Student {id} already exists") })
                } else {
                    self.students.push(student(&id, &name));
                    let message = format!("Student {name} added successfully");
                    json!({ "success": true, "message": message })
                }
            }
            ("DELETE", ["students", id]) => {
                match self.students.iter().position(|s| s.student_id == *id) {
                    Some(index) => {
                        let removed = self.students.remove(index);
                        self.undo_stack.push(removed);
                        json!({ "success": true, "message": format!("Student {id} deleted") })
                    }
                    None => json!({ "success": false, "message": "Student not found" }),
                }
            }
            (method @ ("POST" | "PUT"), ["students", id, "grades"]) => {
                let body = request.body.clone().unwrap_or_default();
                let subject = body["subject"].as_str().unwrap_or_default().to_string();
                let grade = body["grade"].as_f64().unwrap_or_default();
                let Some(s) = self.students.iter_mut().find(|s| s.student_id == *id) else {
                    return json!({ "success": false, "message": "Student not found" });
                };
                match (method, s.subjects.iter().position(|x| *x == subject)) {
                    ("POST", None) => {
                        s.subjects.push(subject);
                        s.grades.push(grade);
                    }
                    ("PUT", Some(i)) => s.grades[i] = grade,
                    ("POST", Some(_)) => {
                        return json!({ "success": false, "message": "Grade already exists" })
                    }
                    _ => return json!({ "success": false, "message": "Subject not found" }),
                }
                s.average = Some(s.grades.iter().sum::<f64>() / s.grades.len() as f64);
                json!({ "success": true, "message": "Grade saved" })
            }
            ("POST", ["undo"]) => match self.undo_stack.pop() {
                Some(s) => {
                    let message = format!("Restored student {}", s.student_id);
                    self.students.push(s);
                    json!({ "success": true, "message": message })
                }
                None => json!({ "success": false, "message": "Nothing to undo" }),
            },
            ("GET", ["stack"]) => {
                let records: Vec<Value> = self
                    .undo_stack
                    .iter()
                    .rev()
                    .map(|s| record("delete", &s.student_id, &s.name))
                    .collect();
                json!({ "success": true, "stack": records, "size": records.len() })
            }
            ("GET", ["queue"]) => {
                let records: Vec<Value> = self
                    .queue
                    .iter()
                    .map(|(id, name)| record("enqueued", id, name))
                    .collect();
                json!({ "success": true, "queue": records, "size": records.len() })
            }
            ("POST", ["queue", "process"]) => {
                let processed = self.queue.len();
                self.queue.clear();
                json!({ "success": true, "message": format!("Processed {processed} operations") })
            }
            ("GET", ["statistics"]) => {
                let averages: Vec<f64> = self
                    .students
                    .iter()
                    .filter(|s| s.has_grades())
                    .filter_map(|s| s.average)
                    .collect();
                let overall = (!averages.is_empty())
                    .then(|| averages.iter().sum::<f64>() / averages.len() as f64);
                json!({ "success": true, "statistics": {
                    "total_students": self.students.len(),
                    "undo_stack_size": self.undo_stack.len(),
                    "queue_size": self.queue.len(),
                    "highest_average": averages.iter().cloned().reduce(f64::max),
                    "lowest_average": averages.iter().cloned().reduce(f64::min),
                    "overall_average": overall,
                }})
            }
            _ => json!({ "success": false, "message": "Not found" }),
        }
    }

    fn find(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.student_id == id)
    }
}

pub fn student(id: &str, name: &str) -> Student {
    Student {
        student_id: id.to_string(),
        name: name.to_string(),
        subjects: Vec::new(),
        grades: Vec::new(),
        average: None,
    }
}

fn to_json(s: &Student) -> Value {
    json!({
        "student_id": s.student_id,
        "name": s.name,
        "subjects": s.subjects,
        "grades": s.grades,
        "average": s.average,
    })
}

fn record(operation_type: &str, id: &str, name: &str) -> Value {
    json!({ "operation_type": operation_type, "student_id": id, "student_name": name })
}
