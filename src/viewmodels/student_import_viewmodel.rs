// ============================================================================
// STUDENT IMPORT VIEWMODEL - Create-student screen and its "done" screen
// ============================================================================

use crate::app::Route;
use crate::config::AppConfig;
use crate::models::{StudentBatchRequest, StudentCreationResult};
use crate::services::{ClassroomService, HttpTransport};
use crate::state::{ReactiveState, RequestHandle};
use crate::stores::CreationResultStore;
use crate::viewmodels::student_staging::StudentStaging;

pub struct StudentImportViewModel<T> {
    service: ClassroomService<T>,
    results: CreationResultStore,
    config: AppConfig,
    class_code: ReactiveState<Option<String>>,
    pub staging: ReactiveState<StudentStaging>,
    /// Local precondition failures (empty batch, row cap)
    pub local_error: ReactiveState<Option<String>>,
    pub create: RequestHandle<StudentCreationResult>,
    /// What the "done" screen shows; read once from the result store
    pub created: ReactiveState<Option<StudentCreationResult>>,
}

impl<T> Clone for StudentImportViewModel<T> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            results: self.results.clone(),
            config: self.config.clone(),
            class_code: self.class_code.clone(),
            staging: self.staging.clone(),
            local_error: self.local_error.clone(),
            create: self.create.clone(),
            created: self.created.clone(),
        }
    }
}

impl<T: HttpTransport> StudentImportViewModel<T> {
    pub fn new(service: ClassroomService<T>, results: CreationResultStore, config: AppConfig) -> Self {
        let staging = StudentStaging::new(&config.import_config);
        Self {
            service,
            results,
            config,
            class_code: ReactiveState::new(None),
            staging: ReactiveState::new(staging),
            local_error: ReactiveState::new(None),
            create: RequestHandle::new("create_students"),
            created: ReactiveState::new(None),
        }
    }

    pub fn enter(&self, code: &str) {
        self.leave();
        self.class_code.set(Some(code.to_string()));
    }

    pub fn leave(&self) {
        self.create.reset();
        self.staging.update(StudentStaging::reset);
        self.local_error.set(None);
        self.class_code.set(None);
    }

    pub fn add_row(&self) {
        let result = self.staging.update(StudentStaging::add_row);
        self.local_error.set(result.err().map(|e| e.to_string()));
    }

    pub fn add_bulk_rows(&self) -> usize {
        self.local_error.set(None);
        self.staging.update(StudentStaging::add_bulk_rows)
    }

    /// Text of the uploaded file; returns how many names were staged
    pub fn import_csv(&self, text: &str) -> usize {
        let added = self.staging.update(|s| s.import_csv(text));
        log::info!("📄 [IMPORT] {} names staged from CSV", added);
        self.local_error.set(None);
        added
    }

    pub fn set_name(&self, index: usize, name: &str) {
        self.staging.update(|s| s.set_name(index, name));
    }

    pub fn remove_row(&self, index: usize) {
        self.staging.update(|s| s.remove_row(index));
    }

    /// Blank names are dropped; an all-blank list never leaves the client.
    /// Success stores the one-shot result and moves to the "done" screen.
    pub async fn submit(&self) -> Option<Route> {
        let code = self.class_code.snapshot()?;
        if self.create.is_loading() {
            return None;
        }
        let names = match self.staging.with(StudentStaging::submission_batch) {
            Ok(names) => names,
            Err(e) => {
                log::warn!("⚠️ [IMPORT] {}", e);
                self.local_error.set(Some(e.to_string()));
                return None;
            }
        };
        self.local_error.set(None);

        let request = StudentBatchRequest {
            class_code: code.clone(),
            students: names,
        };
        let outcome = self.create.run(self.service.create_students(&request)).await?;
        match outcome {
            Ok(envelope) if envelope.success => {
                let result = envelope.data?;
                log::info!("✅ [IMPORT] {} students created", result.students_count());
                if let Err(e) = self.results.save(&result) {
                    log::error!("❌ [IMPORT] Could not keep creation result: {}", e);
                }
                self.staging.update(StudentStaging::reset);
                Some(Route::CreateStudentsDone { code })
            }
            _ => None,
        }
    }

    /// "Done" screen. Without a stored result there is nothing to show, so
    /// the teacher is sent to the class.
    pub fn enter_done(&self, code: &str) -> Option<Route> {
        match self.results.take() {
            Some(result) => {
                self.created.set(Some(result));
                None
            }
            None => {
                self.created.set(None);
                Some(Route::ClassView {
                    code: code.to_string(),
                })
            }
        }
    }

    /// Absolute link for the credentials CSV
    pub fn download_url(&self) -> Option<String> {
        self.created.with(|created| {
            created
                .as_ref()
                .and_then(|r| r.file_url.as_deref())
                .map(|file| self.config.download_url(file))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AuthData;
    use crate::services::http::mock::MockTransport;
    use crate::services::ApiClient;
    use crate::stores::SessionStore;
    use crate::utils::constants::EMPTY_BATCH_MESSAGE;
    use crate::utils::storage::MemoryStorage;
    use crate::utils::KeyValueStorage;
    use serde_json::json;
    use std::rc::Rc;

    fn import_vm() -> (StudentImportViewModel<MockTransport>, Rc<MockTransport>, Rc<MemoryStorage>) {
        let storage = Rc::new(MemoryStorage::new());
        let transport = Rc::new(MockTransport::new());
        let session = SessionStore::new(storage.clone());
        session.sign_in(
            &AuthData {
                access_token: "tok".to_string(),
                full_name: "Alice".to_string(),
                user_type: vec!["teacher".to_string()],
            },
            None,
        );
        let config = AppConfig::default();
        let client = ApiClient::new(transport.clone(), session, config.clone());
        let vm = StudentImportViewModel::new(
            ClassroomService::new(client),
            CreationResultStore::new(storage.clone()),
            config,
        );
        (vm, transport, storage)
    }

    fn push_created(transport: &MockTransport) {
        transport.push_json(
            201,
            json!({
                "success": true,
                "data": {
                    "students": [
                        { "full_name": "Bob", "username": "bob1", "password": "p1" },
                        { "full_name": "Carol", "username": "carol1", "password": "p2" }
                    ],
                    "count": 2
                },
                "class_name": "Grade 3",
                "file_url": "/media/created_students.csv"
            }),
        );
    }

    #[tokio::test]
    async fn blank_names_are_dropped_before_sending() {
        let (vm, transport, _) = import_vm();
        vm.enter("ABC123");
        for (i, name) in ["Bob", "", "  ", "Carol"].iter().enumerate() {
            if i > 0 {
                vm.add_row();
            }
            vm.set_name(i, name);
        }
        push_created(&transport);

        let next = vm.submit().await;

        assert_eq!(
            next,
            Some(Route::CreateStudentsDone {
                code: "ABC123".to_string()
            })
        );
        assert_eq!(
            transport.last_request().unwrap().body,
            Some(json!({ "class_code": "ABC123", "students": ["Bob", "Carol"] }))
        );
    }

    #[tokio::test]
    async fn all_blank_batch_makes_no_request() {
        let (vm, transport, _) = import_vm();
        vm.enter("ABC123");
        vm.add_bulk_rows();
        vm.set_name(2, "   ");

        assert_eq!(vm.submit().await, None);
        assert_eq!(transport.request_count(), 0);
        assert_eq!(vm.local_error.snapshot().as_deref(), Some(EMPTY_BATCH_MESSAGE));
    }

    #[tokio::test]
    async fn done_screen_reads_result_once() {
        let (vm, transport, storage) = import_vm();
        vm.enter("ABC123");
        vm.set_name(0, "Bob");
        push_created(&transport);
        vm.submit().await;
        assert!(storage.get("studentCreationResponse").is_some());

        assert_eq!(vm.enter_done("ABC123"), None);
        let created = vm.created.snapshot().unwrap();
        assert_eq!(created.students_count(), 2);
        assert_eq!(created.class_title.as_deref(), Some("Grade 3"));
        assert_eq!(
            vm.download_url().as_deref(),
            Some("http://localhost:8000/media/created_students.csv")
        );
        assert!(storage.get("studentCreationResponse").is_none());

        assert_eq!(
            vm.enter_done("ABC123"),
            Some(Route::ClassView {
                code: "ABC123".to_string()
            })
        );
    }

    #[tokio::test]
    async fn failed_creation_keeps_the_draft() {
        let (vm, transport, _) = import_vm();
        vm.enter("ABC123");
        vm.set_name(0, "Bob");
        transport.push_json(400, json!({ "message": "Invalid class code" }));

        assert_eq!(vm.submit().await, None);
        assert_eq!(
            vm.create.snapshot().error.as_deref(),
            Some("Invalid class code")
        );
        assert_eq!(vm.staging.with(|s| s.rows()[0].name.clone()), "Bob");
    }

    #[test]
    fn row_cap_is_reported() {
        let (vm, _, _) = import_vm();
        vm.enter("ABC123");
        vm.import_csv(&"x\n".repeat(150));
        assert_eq!(vm.staging.with(StudentStaging::len), 100);

        vm.add_row();
        assert!(vm.local_error.snapshot().is_some());
        assert_eq!(vm.add_bulk_rows(), 0);
    }
}
