// ============================================================================
// APP STATE - Global application state
// ============================================================================
// Owns the stores, the navigator and one view model per screen family.
// Opening a route runs the guards, leaves the previous screen and enters the
// new one, following redirects the screens ask for.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;

use crate::app::{Navigator, Route};
use crate::config::AppConfig;
use crate::services::{ApiClient, AuthService, ClassroomService, HttpTransport};
use crate::stores::{CreationResultStore, PreferencesStore, SessionStore};
use crate::utils::storage::KeyValueStorage;
use crate::state::RequestHandle;
use crate::viewmodels::forms::FormHandle;
use crate::viewmodels::{AuthViewModel, ClassViewModel, DashboardViewModel, StudentImportViewModel};

/// A screen may bounce to another on entry; more hops than this is a loop
const MAX_REDIRECTS: usize = 4;

pub struct AppState<T> {
    pub config: AppConfig,
    pub session: SessionStore,
    pub preferences: PreferencesStore,
    pub navigator: Navigator,
    pub auth: AuthViewModel<T>,
    pub dashboard: DashboardViewModel<T>,
    pub class_view: ClassViewModel<T>,
    pub student_import: StudentImportViewModel<T>,
}

impl<T: HttpTransport + 'static> AppState<T> {
    pub fn new(transport: Rc<T>, storage: Rc<dyn KeyValueStorage>, config: AppConfig) -> Self {
        let session = SessionStore::new(storage.clone());
        let preferences = PreferencesStore::new(storage.clone(), &config.ui_config);
        let navigator = Navigator::new(session.clone());

        let client = ApiClient::new(transport, session.clone(), config.clone());
        let classrooms = ClassroomService::new(client.clone());

        let state = Self {
            auth: AuthViewModel::new(AuthService::new(client), session.clone()),
            dashboard: DashboardViewModel::new(classrooms.clone(), session.clone()),
            class_view: ClassViewModel::new(classrooms.clone()),
            student_import: StudentImportViewModel::new(
                classrooms,
                CreationResultStore::new(storage),
                config.clone(),
            ),
            config,
            session,
            preferences,
            navigator,
        };
        state.watch_screen_changes();
        log::info!("🚀 [APP] State ready ({})", state.config.environment);
        state
    }

    /// Leaving a screen drops its in-flight requests and drafts, whichever
    /// path triggered the navigation (user action or session loss).
    fn watch_screen_changes(&self) {
        let last = Rc::new(RefCell::new(self.navigator.current()));
        let navigator = self.navigator.clone();
        let class_view = self.class_view.clone();
        let student_import = self.student_import.clone();
        self.navigator.subscribe(move || {
            let current = navigator.current();
            let previous = last.replace(current.clone());
            if previous == current {
                return;
            }
            match previous {
                Route::ClassView { .. } => class_view.leave(),
                Route::CreateStudents { .. } => student_import.leave(),
                _ => {}
            }
        });
    }

    pub fn current_route(&self) -> Route {
        self.navigator.current()
    }

    /// Guarded navigation without entering the screen
    pub fn navigate(&self, route: Route) -> Route {
        self.navigator.navigate(route)
    }

    /// Navigates to `route` and runs the screen's entry logic
    pub async fn open(&self, route: Route) -> Route {
        let mut pending = Some(route);
        let mut hops = 0;
        while let Some(route) = pending.take() {
            if hops > MAX_REDIRECTS {
                log::error!("❌ [APP] Redirect loop at {}", route.path());
                break;
            }
            hops += 1;
            let landed = self.navigator.navigate(route);
            pending = self.enter(&landed).await;
        }
        self.navigator.current()
    }

    /// Applies the outcome of a view-model action
    pub async fn follow(&self, next: Option<Route>) -> Route {
        match next {
            Some(route) => self.open(route).await,
            None => self.navigator.current(),
        }
    }

    pub async fn back(&self) -> Option<Route> {
        let route = self.navigator.back()?;
        if let Some(next) = self.enter(&route).await {
            return Some(self.open(next).await);
        }
        Some(route)
    }

    /// Reset-password submit with the username and token of the open link
    pub async fn submit_reset_password(&self) -> Route {
        let next = match self.navigator.current() {
            Route::ResetPassword { username, token } => {
                self.auth.submit_reset_password(&username, &token).await
            }
            other => {
                log::warn!("⚠️ [APP] Reset password submitted from {}", other.path());
                None
            }
        };
        self.follow(next).await
    }

    /// Form by the name the host page uses
    pub fn form(&self, name: &str) -> Option<&dyn FormHandle> {
        let form: &dyn FormHandle = match name {
            "login" => &self.auth.login_form,
            "signup" => &self.auth.signup_form,
            "forgot_password" => &self.auth.forgot_form,
            "resend_confirmation" => &self.auth.resend_form,
            "reset_password" => &self.auth.reset_form,
            "create_class" => &self.dashboard.create_form,
            "class_title" => &self.class_view.title_form,
            _ => return None,
        };
        Some(form)
    }

    /// Snapshot of one request container as JSON
    pub fn request_state(&self, name: &str) -> Option<Value> {
        fn json<R: Clone + Serialize + 'static>(handle: &RequestHandle<R>) -> Option<Value> {
            serde_json::to_value(handle.snapshot()).ok()
        }
        match name {
            "login" => json(&self.auth.login),
            "signup" => json(&self.auth.signup),
            "forgot_password" => json(&self.auth.forgot_password),
            "resend_confirmation" => json(&self.auth.resend_confirmation),
            "reset_password" => json(&self.auth.reset_password),
            "confirm_email" => json(&self.auth.email_confirmation),
            "verify_email" => json(&self.auth.verify_email),
            "logout" => json(&self.auth.logout_request),
            "create_class" => json(&self.dashboard.create_class),
            "classes" => json(&self.dashboard.classes),
            "class_detail" => json(&self.class_view.detail),
            "students" => json(&self.class_view.students),
            "update_title" => json(&self.class_view.update_title),
            "remove_students" => json(&self.class_view.remove),
            "add_students" => json(&self.class_view.transfer),
            "class_options" => json(&self.class_view.class_options),
            "create_students" => json(&self.student_import.create),
            _ => None,
        }
    }

    async fn enter(&self, route: &Route) -> Option<Route> {
        match route {
            Route::Login => self.auth.enter_login(),
            Route::ResetPassword { .. } => {
                self.auth.enter_reset_password();
                None
            }
            Route::ConfirmEmail { token, .. } => self.auth.confirm_email(token).await,
            Route::CreateClass => self.dashboard.enter_create_class(),
            Route::ClassList => self.dashboard.load_classes().await,
            Route::CreateStudents { code } => {
                self.student_import.enter(code);
                None
            }
            Route::CreateStudentsDone { code } => self.student_import.enter_done(code),
            Route::ClassView { code } => self.class_view.enter(code).await,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::http::mock::MockTransport;
    use crate::utils::storage::MemoryStorage;
    use crate::utils::validation::FormField;
    use serde_json::json;

    fn app() -> (AppState<MockTransport>, Rc<MockTransport>, Rc<MemoryStorage>) {
        let storage = Rc::new(MemoryStorage::new());
        let transport = Rc::new(MockTransport::new());
        let state = AppState::new(transport.clone(), storage.clone(), AppConfig::default());
        (state, transport, storage)
    }

    async fn log_in_teacher(app: &AppState<MockTransport>, transport: &MockTransport) {
        transport.push_json(
            200,
            json!({
                "success": true,
                "data": { "access_token": "tok123", "full_name": "Alice", "user_type": ["teacher"] }
            }),
        );
        app.open(Route::Login).await;
        app.auth.login_form.update(|form| {
            form.change(FormField::Username, "alice");
            form.change(FormField::Password, "Secret1");
        });
        let next = app.auth.submit_login().await;
        app.follow(next).await;
    }

    #[tokio::test]
    async fn protected_route_without_session_lands_on_login() {
        let (app, transport, _) = app();
        let landed = app.open(Route::ClassView { code: "ABC123".to_string() }).await;
        assert_eq!(landed, Route::Login);
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn login_then_create_class_flow() {
        let (app, transport, _) = app();
        log_in_teacher(&app, &transport).await;
        assert_eq!(app.current_route(), Route::Dashboard);

        assert_eq!(app.open(Route::CreateClass).await, Route::CreateClass);
        transport.push_json(
            201,
            json!({ "success": true, "data": { "title": "Grade 3", "class_code": "G3X", "teacher": "Alice" } }),
        );
        app.dashboard
            .create_form
            .update(|form| form.change(FormField::ClassTitle, "Grade 3"));
        let next = app.dashboard.submit_create_class().await;

        assert_eq!(
            app.follow(next).await,
            Route::CreateStudents {
                code: "G3X".to_string()
            }
        );
        assert_eq!(app.student_import.staging.with(|s| s.len()), 1);
    }

    #[tokio::test]
    async fn unauthorized_response_ends_on_login() {
        let (app, transport, storage) = app();
        log_in_teacher(&app, &transport).await;
        transport.push_json(401, json!({ "detail": "Token expired" }));

        let landed = app.open(Route::ClassView { code: "ABC123".to_string() }).await;

        assert_eq!(landed, Route::Login);
        assert!(!app.session.is_authenticated());
        assert!(app.session.display_name().is_none());
        assert!(!app.session.is_teacher());
        assert!(crate::utils::KeyValueStorage::get(storage.as_ref(), "user-auth").is_none());
        // Leaving the class screen reset its containers
        assert!(app.class_view.code().is_none());
    }

    #[tokio::test]
    async fn done_screen_without_result_goes_to_class() {
        let (app, transport, _) = app();
        log_in_teacher(&app, &transport).await;
        let landed = app
            .open(Route::CreateStudentsDone {
                code: "G3X".to_string(),
            })
            .await;
        assert_eq!(
            landed,
            Route::ClassView {
                code: "G3X".to_string()
            }
        );
    }

    #[tokio::test]
    async fn forms_and_requests_are_reachable_by_name() {
        let (app, transport, _) = app();
        log_in_teacher(&app, &transport).await;

        let login = app.request_state("login").unwrap();
        assert_eq!(login["status"], 200);
        assert_eq!(login["success"], true);
        assert_eq!(login["data"]["full_name"], "Alice");
        assert_eq!(login["loading"], false);
        assert!(app.request_state("nope").is_none());

        let form = app.form("create_class").unwrap();
        form.change(FormField::ClassTitle, "Grade<3");
        let view = form.view();
        assert_eq!(view.values["class_title"], "Grade<3");
        assert!(view.errors.contains_key("class_title"));
        assert!(app.form("nope").is_none());
    }

    #[tokio::test]
    async fn reset_password_uses_the_link_parameters() {
        let (app, transport, _) = app();
        app.open(Route::ResetPassword {
            username: "alice".to_string(),
            token: "t-1".to_string(),
        })
        .await;
        let form = app.form("reset_password").unwrap();
        form.change(FormField::Password, "Secret2");
        form.change(FormField::ConfirmPassword, "Secret2");
        transport.push_json(200, json!({ "success": true, "message": "Password reset" }));

        assert_eq!(app.submit_reset_password().await, Route::Login);
        let body = transport.last_request().unwrap().body.unwrap();
        assert_eq!(body["username"], "alice");
        assert_eq!(body["token"], "t-1");
    }

    #[tokio::test]
    async fn logout_returns_to_login() {
        let (app, transport, _) = app();
        log_in_teacher(&app, &transport).await;
        transport.push_json(200, json!({ "success": true }));

        let next = app.auth.logout().await;
        assert_eq!(app.follow(next).await, Route::Login);
        assert!(!app.session.is_authenticated());
    }
}
