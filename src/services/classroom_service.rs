// ============================================================================
// CLASSROOM SERVICE - Classroom and roster endpoints (teacher only)
// ============================================================================

use serde_json::Value;

use crate::models::{
    ApiEnvelope, ClassCodeRequest, ClassDetail, ClassSummary, CreateClassRequest,
    CreateStudentsReply, CreatedClass, StudentBatchRequest, StudentCreationResult, StudentRecord,
    UpdateClassRequest,
};
use crate::services::api_client::{ApiClient, Auth};
use crate::services::http::HttpTransport;
use crate::services::ApiError;

pub struct ClassroomService<T> {
    client: ApiClient<T>,
}

impl<T> Clone for ClassroomService<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<T: HttpTransport> ClassroomService<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn create_class(&self, title: &str) -> Result<ApiEnvelope<CreatedClass>, ApiError> {
        log::info!("🏫 [CLASSROOM] Creating class '{}'", title);
        let body = CreateClassRequest {
            title: title.to_string(),
        };
        let path = &self.client.config().endpoints.classroom_create;
        self.client.post(path, &body, Auth::Required).await
    }

    pub async fn class_details(&self, code: &str) -> Result<ApiEnvelope<ClassDetail>, ApiError> {
        let body = ClassCodeRequest {
            class_code: code.to_string(),
        };
        let path = &self.client.config().endpoints.classroom_details;
        self.client.post(path, &body, Auth::Required).await
    }

    pub async fn update_title(&self, code: &str, title: &str) -> Result<ApiEnvelope<Value>, ApiError> {
        let body = UpdateClassRequest {
            class_code: code.to_string(),
            title: title.to_string(),
        };
        let path = &self.client.config().endpoints.classroom_update;
        self.client.post(path, &body, Auth::Required).await
    }

    pub async fn list_classes(&self) -> Result<ApiEnvelope<Vec<ClassSummary>>, ApiError> {
        let path = &self.client.config().endpoints.classroom_list;
        self.client.get(path, Auth::Required).await
    }

    pub async fn list_students(&self, code: &str) -> Result<ApiEnvelope<Vec<StudentRecord>>, ApiError> {
        let body = ClassCodeRequest {
            class_code: code.to_string(),
        };
        let path = &self.client.config().endpoints.students_list;
        self.client.post(path, &body, Auth::Required).await
    }

    /// Batch account creation. The reply carries `class_name` and `file_url`
    /// beside `data`, so it is folded into one result here.
    pub async fn create_students(
        &self,
        request: &StudentBatchRequest,
    ) -> Result<ApiEnvelope<StudentCreationResult>, ApiError> {
        log::info!(
            "👥 [CLASSROOM] Creating {} students in {}",
            request.students.len(),
            request.class_code
        );
        let path = &self.client.config().endpoints.students_create;
        let (reply, status): (CreateStudentsReply, u16) =
            self.client.post_raw(path, request, Auth::Required).await?;

        let success = reply.success;
        let message = reply.message.clone();
        let mut envelope = ApiEnvelope::new(success, Some(StudentCreationResult::from(reply)));
        envelope.message = message;
        envelope.status = status;
        Ok(envelope)
    }

    pub async fn remove_students(&self, request: &StudentBatchRequest) -> Result<ApiEnvelope<Value>, ApiError> {
        log::info!(
            "➖ [CLASSROOM] Removing {} students from {}",
            request.students.len(),
            request.class_code
        );
        let path = &self.client.config().endpoints.students_remove;
        self.client.post(path, request, Auth::Required).await
    }

    /// `request.class_code` is the destination class
    pub async fn add_students(&self, request: &StudentBatchRequest) -> Result<ApiEnvelope<Value>, ApiError> {
        log::info!(
            "➕ [CLASSROOM] Adding {} students to {}",
            request.students.len(),
            request.class_code
        );
        let path = &self.client.config().endpoints.students_add;
        self.client.post(path, request, Auth::Required).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::services::http::mock::MockTransport;
    use crate::services::http::HttpMethod;
    use crate::stores::SessionStore;
    use crate::utils::storage::MemoryStorage;
    use serde_json::json;
    use std::rc::Rc;

    fn service() -> (ClassroomService<MockTransport>, Rc<MockTransport>) {
        let transport = Rc::new(MockTransport::new());
        let session = SessionStore::new(Rc::new(MemoryStorage::new()));
        let client = ApiClient::new(transport.clone(), session, AppConfig::default());
        (ClassroomService::new(client), transport)
    }

    #[tokio::test]
    async fn class_list_is_a_get() {
        let (service, transport) = service();
        transport.push_json(
            200,
            json!({
                "success": true,
                "data": [{ "classroom_code": "ABC123", "classroom_title": "Mathematics", "student_count": 25 }]
            }),
        );

        let envelope = service.list_classes().await.unwrap();
        let classes = envelope.data.unwrap();
        assert_eq!(classes[0].code, "ABC123");
        assert_eq!(transport.last_request().unwrap().method, HttpMethod::Get);
    }

    #[tokio::test]
    async fn create_students_folds_reply_extras() {
        let (service, transport) = service();
        transport.push_json(
            201,
            json!({
                "success": true,
                "message": "Students added",
                "data": {
                    "students": [{ "full_name": "Bob", "username": "bob42", "password": "p4ss" }],
                    "count": 1
                },
                "class_name": "Grade 3",
                "file_url": "/media/created_students.csv"
            }),
        );

        let envelope = service
            .create_students(&StudentBatchRequest {
                class_code: "ABC123".to_string(),
                students: vec!["Bob".to_string()],
            })
            .await
            .unwrap();

        assert!(envelope.success);
        assert_eq!(envelope.status, 201);
        assert_eq!(envelope.message.as_deref(), Some("Students added"));
        let result = envelope.data.unwrap();
        assert_eq!(result.class_title.as_deref(), Some("Grade 3"));
        assert_eq!(result.file_url.as_deref(), Some("/media/created_students.csv"));
        assert_eq!(
            transport.last_request().unwrap().body,
            Some(json!({ "class_code": "ABC123", "students": ["Bob"] }))
        );
    }
}
