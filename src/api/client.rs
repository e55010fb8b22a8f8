use super::envelope::{
    decode, Ack, OperationLogPayload, Outcome, StatisticsPayload, StudentPayload,
    StudentsPayload,
};
use super::error::ApiError;
use super::transport::{ApiRequest, Transport};
use crate::types::{OperationLog, Statistics, Student};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::json;

/// Typed access to the student service, one method per endpoint
#[derive(Debug, Clone)]
pub struct StudentApi<T> {
    transport: T,
}

impl<T: Transport> StudentApi<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    async fn call<P: DeserializeOwned>(&self, request: ApiRequest) -> Result<Outcome<P>, ApiError> {
        let body = self.transport.send(&request).await?;
        decode(&body)
    }

    /// GET /students
    pub async fn list_students(&self) -> Result<Outcome<Vec<Student>>, ApiError> {
        let outcome: Outcome<StudentsPayload> = self.call(ApiRequest::get(["students"])).await?;
        Ok(map_payload(outcome, |p| p.students))
    }

    /// GET /students/{id}
    pub async fn get_student(&self, id: &str) -> Result<Outcome<Student>, ApiError> {
        let outcome: Outcome<StudentPayload> =
            self.call(ApiRequest::get(["students", id])).await?;
        Ok(map_payload(outcome, |p| p.student))
    }

    /// GET /students/search?name=
    pub async fn search_by_name(&self, name: &str) -> Result<Outcome<Vec<Student>>, ApiError> {
        let request = ApiRequest::get(["students", "search"]).with_query("name", name);
        let outcome: Outcome<StudentsPayload> = self.call(request).await?;
        Ok(map_payload(outcome, |p| p.students))
    }

    /// POST /students
    pub async fn create_student(&self, id: &str, name: &str) -> Result<Outcome<Ack>, ApiError> {
        let request = ApiRequest::new(Method::POST, ["students"])
            .with_body(json!({ "student_id": id, "name": name }));
        self.call(request).await
    }

    /// DELETE /students/{id}
    pub async fn delete_student(&self, id: &str) -> Result<Outcome<Ack>, ApiError> {
        self.call(ApiRequest::new(Method::DELETE, ["students", id]))
            .await
    }

    /// POST /students/{id}/grades
    pub async fn add_grade(
        &self,
        id: &str,
        subject: &str,
        grade: f64,
    ) -> Result<Outcome<Ack>, ApiError> {
        self.call(grade_request(Method::POST, id, subject, grade))
            .await
    }

    /// PUT /students/{id}/grades
    pub async fn update_grade(
        &self,
        id: &str,
        subject: &str,
        grade: f64,
    ) -> Result<Outcome<Ack>, ApiError> {
        self.call(grade_request(Method::PUT, id, subject, grade))
            .await
    }

    /// POST /undo
    pub async fn undo(&self) -> Result<Outcome<Ack>, ApiError> {
        self.call(ApiRequest::new(Method::POST, ["undo"])).await
    }

    /// POST /queue/process
    pub async fn process_queue(&self) -> Result<Outcome<Ack>, ApiError> {
        self.call(ApiRequest::new(Method::POST, ["queue", "process"]))
            .await
    }

    /// GET /stack
    pub async fn get_stack(&self) -> Result<Outcome<OperationLog>, ApiError> {
        let outcome: Outcome<OperationLogPayload> = self.call(ApiRequest::get(["stack"])).await?;
        Ok(map_payload(outcome, |p| p.0))
    }

    /// GET /queue
    pub async fn get_queue(&self) -> Result<Outcome<OperationLog>, ApiError> {
        let outcome: Outcome<OperationLogPayload> = self.call(ApiRequest::get(["queue"])).await?;
        Ok(map_payload(outcome, |p| p.0))
    }

    /// GET /statistics
    pub async fn get_statistics(&self) -> Result<Outcome<Statistics>, ApiError> {
        let outcome: Outcome<StatisticsPayload> =
            self.call(ApiRequest::get(["statistics"])).await?;
        Ok(map_payload(outcome, |p| p.statistics))
    }
}

fn grade_request(method: Method, id: &str, subject: &str, grade: f64) -> ApiRequest {
    ApiRequest::new(method, ["students", id, "grades"])
        .with_body(json!({ "subject": subject, "grade": grade }))
}

fn map_payload<P, U>(outcome: Outcome<P>, f: impl FnOnce(P) -> U) -> Outcome<U> {
    match outcome {
        Outcome::Success { message, payload } => Outcome::Success {
            message,
            payload: f(payload),
        },
        Outcome::Failure { message } => Outcome::Failure { message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeServer;

    #[tokio::test]
    async fn test_search_sends_name_as_query() {
        let server = FakeServer::new();
        let api = StudentApi::new(server.clone());

        let outcome = api.search_by_name("Ada").await.unwrap();

        assert!(outcome.is_success());
        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::GET);
        assert_eq!(requests[0].path(), "/students/search");
        assert_eq!(
            requests[0].query,
            vec![("name".to_string(), "Ada".to_string())]
        );
    }

    #[tokio::test]
    async fn test_update_grade_uses_put_with_json_body() {
        let server = FakeServer::with_students(&[("s1", "Ada")]);
        let api = StudentApi::new(server.clone());

        api.update_grade("s1", "Math", 88.5).await.unwrap();

        let request = server.last_request().unwrap();
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.path(), "/students/s1/grades");
        assert_eq!(
            request.body,
            Some(json!({ "subject": "Math", "grade": 88.5 }))
        );
    }

    #[tokio::test]
    async fn test_get_student_not_found_is_failure_outcome() {
        let server = FakeServer::new();
        let api = StudentApi::new(server);

        let outcome = api.get_student("missing").await.unwrap();

        assert_eq!(outcome.message(), Some("Student not found"));
        assert!(!outcome.is_success());
    }

    #[tokio::test]
    async fn test_transport_failure_is_error() {
        let server = FakeServer::new();
        server.go_offline();
        let api = StudentApi::new(server);

        let result = api.list_students().await;

        assert!(matches!(result, Err(ApiError::Network(_))));
    }
}
