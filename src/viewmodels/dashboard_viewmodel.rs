// ============================================================================
// DASHBOARD VIEWMODEL - Create class and the teacher's class list
// ============================================================================

use crate::app::Route;
use crate::models::{ClassSummary, CreatedClass};
use crate::services::{ClassroomService, HttpTransport};
use crate::state::{ReactiveState, RequestHandle};
use crate::stores::SessionStore;
use crate::viewmodels::forms::{ClassTitleForm, FormState};

pub struct DashboardViewModel<T> {
    service: ClassroomService<T>,
    session: SessionStore,
    pub create_form: ReactiveState<FormState<ClassTitleForm>>,
    pub create_class: RequestHandle<CreatedClass>,
    pub classes: RequestHandle<Vec<ClassSummary>>,
}

impl<T> Clone for DashboardViewModel<T> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            session: self.session.clone(),
            create_form: self.create_form.clone(),
            create_class: self.create_class.clone(),
            classes: self.classes.clone(),
        }
    }
}

impl<T: HttpTransport> DashboardViewModel<T> {
    pub fn new(service: ClassroomService<T>, session: SessionStore) -> Self {
        Self {
            service,
            session,
            create_form: ReactiveState::new(FormState::new()),
            create_class: RequestHandle::new("create_class"),
            classes: RequestHandle::new("list_classes"),
        }
    }

    pub fn display_name(&self) -> Option<String> {
        self.session.display_name()
    }

    pub fn can_create_class(&self) -> bool {
        self.session.is_teacher()
    }

    /// Teacher-only screen; everyone else lands back on the dashboard
    pub fn enter_create_class(&self) -> Option<Route> {
        if !self.can_create_class() {
            log::warn!("⛔ [DASHBOARD] Create class needs a teacher account");
            return Some(Route::Dashboard);
        }
        self.create_class.reset();
        self.create_form.update(|form| form.reset());
        None
    }

    /// On success continues to the student screen of the new class
    pub async fn submit_create_class(&self) -> Option<Route> {
        let title = self.create_form.update(|form| {
            form.begin_submit()
                .then(|| form.values.title.trim().to_string())
        })?;

        let outcome = self
            .create_class
            .run(self.service.create_class(&title))
            .await?;
        let (next, status) = match outcome {
            Ok(envelope) if envelope.success => match envelope.data {
                Some(created) => {
                    log::info!("✅ [DASHBOARD] Class {} created", created.class_code);
                    (
                        Some(Route::CreateStudents {
                            code: created.class_code,
                        }),
                        None,
                    )
                }
                None => (None, envelope.message),
            },
            Ok(envelope) => (None, envelope.message),
            Err(error) => (None, Some(error.message())),
        };
        self.create_form.update(|form| form.finish_submit(status));
        next
    }

    /// Fills `classes`
    pub async fn load_classes(&self) -> Option<Route> {
        if let Some(Ok(envelope)) = self.classes.run(self.service.list_classes()).await {
            log::info!(
                "📚 [DASHBOARD] {} classes",
                envelope.data.as_ref().map_or(0, Vec::len)
            );
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::models::AuthData;
    use crate::services::http::mock::MockTransport;
    use crate::services::ApiClient;
    use crate::utils::storage::MemoryStorage;
    use crate::utils::validation::FormField;
    use serde_json::json;
    use std::rc::Rc;

    fn dashboard(teacher: bool) -> (DashboardViewModel<MockTransport>, Rc<MockTransport>) {
        let transport = Rc::new(MockTransport::new());
        let session = SessionStore::new(Rc::new(MemoryStorage::new()));
        session.sign_in(
            &AuthData {
                access_token: "tok".to_string(),
                full_name: "Alice".to_string(),
                user_type: if teacher { vec!["teacher".to_string()] } else { vec![] },
            },
            None,
        );
        let client = ApiClient::new(transport.clone(), session.clone(), AppConfig::default());
        (
            DashboardViewModel::new(ClassroomService::new(client), session),
            transport,
        )
    }

    #[test]
    fn create_class_is_teacher_only() {
        let (learner, _) = dashboard(false);
        assert_eq!(learner.enter_create_class(), Some(Route::Dashboard));

        let (teacher, _) = dashboard(true);
        assert_eq!(teacher.enter_create_class(), None);
    }

    #[tokio::test]
    async fn created_class_leads_to_student_screen() {
        let (vm, transport) = dashboard(true);
        transport.push_json(
            201,
            json!({
                "success": true,
                "data": { "title": "Grade 3", "class_code": "ABC123", "teacher": "Alice" }
            }),
        );
        vm.create_form
            .update(|form| form.change(FormField::ClassTitle, "  Grade 3 "));

        let next = vm.submit_create_class().await;

        assert_eq!(
            next,
            Some(Route::CreateStudents {
                code: "ABC123".to_string()
            })
        );
        assert_eq!(
            transport.last_request().unwrap().body,
            Some(json!({ "title": "Grade 3" }))
        );
    }

    #[tokio::test]
    async fn restricted_title_is_not_sent() {
        let (vm, transport) = dashboard(true);
        vm.create_form
            .update(|form| form.change(FormField::ClassTitle, "Grade <3>"));
        assert_eq!(vm.submit_create_class().await, None);
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn class_list_fills_container() {
        let (vm, transport) = dashboard(true);
        transport.push_json(
            200,
            json!({
                "success": true,
                "data": [
                    { "classroom_code": "ABC123", "classroom_title": "Mathematics", "student_count": 25 },
                    { "classroom_code": "XYZ999", "classroom_title": "Science", "student_count": 0 }
                ]
            }),
        );

        vm.load_classes().await;
        let classes = vm.classes.data().unwrap();
        assert_eq!(classes.len(), 2);
        assert_eq!(classes[1].title, "Science");
    }
}
