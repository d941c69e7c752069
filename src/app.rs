// ============================================================================
// APP - Routes and the navigation controller
// ============================================================================
// Screens are addressed by `Route`. The navigator applies the guards
// (signed-in, teacher-only, guest-only) and follows the session: when the
// session is cleared on a protected screen it falls back to the login screen.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::state::ReactiveState;
use crate::stores::SessionStore;

/// Oldest entries fall off past this
const MAX_HISTORY: usize = 50;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Login,
    TeacherSignup,
    ForgotPassword,
    ForgotPasswordDone,
    ResetPassword { username: String, token: String },
    ConfirmEmail { username: String, token: String },
    ResendConfirmation,
    ResendConfirmationDone,
    Dashboard,
    CreateClass,
    ClassList,
    CreateStudents { code: String },
    CreateStudentsDone { code: String },
    ClassView { code: String },
    NotFound,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/account/login".to_string(),
            Route::TeacherSignup => "/account/choose-role/teacher/signup".to_string(),
            Route::ForgotPassword => "/account/forgot-password".to_string(),
            Route::ForgotPasswordDone => "/account/forgot-password/done".to_string(),
            Route::ResetPassword { username, token } => {
                format!("/account/reset-password/{}/{}", username, token)
            }
            Route::ConfirmEmail { username, token } => {
                format!("/account/confirm-email/{}/{}", username, token)
            }
            Route::ResendConfirmation => "/account/resend-email-confirmation".to_string(),
            Route::ResendConfirmationDone => "/account/resend-email-confirmation/done".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::CreateClass => "/dashboard/class".to_string(),
            Route::ClassList => "/dashboard/classes".to_string(),
            Route::CreateStudents { code } => format!("/dashboard/class/{}/create-student", code),
            Route::CreateStudentsDone { code } => {
                format!("/dashboard/class/{}/create-student/done", code)
            }
            Route::ClassView { code } => format!("/dashboard/class/{}/classview", code),
            Route::NotFound => "/404".to_string(),
        }
    }

    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] | ["account"] | ["account", "login"] => Route::Login,
            ["account", "choose-role", "teacher", "signup"] => Route::TeacherSignup,
            ["account", "forgot-password"] => Route::ForgotPassword,
            ["account", "forgot-password", "done"] => Route::ForgotPasswordDone,
            ["account", "reset-password", username, token] => Route::ResetPassword {
                username: username.to_string(),
                token: token.to_string(),
            },
            ["account", "confirm-email", username, token] => Route::ConfirmEmail {
                username: username.to_string(),
                token: token.to_string(),
            },
            ["account", "resend-email-confirmation"] => Route::ResendConfirmation,
            ["account", "resend-email-confirmation", "done"] => Route::ResendConfirmationDone,
            ["dashboard"] => Route::Dashboard,
            ["dashboard", "class"] => Route::CreateClass,
            ["dashboard", "classes"] => Route::ClassList,
            ["dashboard", "class", code, "create-student"] => Route::CreateStudents { code: code.to_string() },
            ["dashboard", "class", code, "create-student", "done"] => {
                Route::CreateStudentsDone { code: code.to_string() }
            }
            ["dashboard", "class", code, "classview"] => Route::ClassView { code: code.to_string() },
            _ => Route::NotFound,
        }
    }

    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Route::Dashboard
                | Route::CreateClass
                | Route::ClassList
                | Route::CreateStudents { .. }
                | Route::CreateStudentsDone { .. }
                | Route::ClassView { .. }
        )
    }

    pub fn requires_teacher(&self) -> bool {
        matches!(self, Route::CreateClass)
    }

    /// Screens that a signed-in user skips
    pub fn guest_only(&self) -> bool {
        matches!(self, Route::Login)
    }
}

#[derive(Clone)]
pub struct Navigator {
    current: ReactiveState<Route>,
    history: Rc<RefCell<Vec<Route>>>,
    session: SessionStore,
}

impl Navigator {
    pub fn new(session: SessionStore) -> Self {
        let navigator = Self {
            current: ReactiveState::new(Route::Login),
            history: Rc::new(RefCell::new(Vec::new())),
            session: session.clone(),
        };

        let watcher = navigator.clone();
        session.subscribe(move || {
            let current = watcher.current();
            if current.requires_auth() && !watcher.session.is_authenticated() {
                log::info!("🔒 [NAV] Session ended on {}, back to login", current.path());
                watcher.navigate(Route::Login);
            }
        });

        navigator
    }

    pub fn current(&self) -> Route {
        self.current.snapshot()
    }

    /// Where `route` actually lands once the guards have run
    pub fn resolve(&self, route: Route) -> Route {
        if route.requires_auth() && !self.session.is_authenticated() {
            return Route::Login;
        }
        if route.requires_teacher() && !self.session.is_teacher() {
            return Route::Dashboard;
        }
        if route.guest_only() && self.session.is_authenticated() {
            return Route::Dashboard;
        }
        route
    }

    pub fn navigate(&self, route: Route) -> Route {
        let target = self.resolve(route.clone());
        if target != route {
            log::info!("↪️ [NAV] {} redirected to {}", route.path(), target.path());
        }
        let previous = self.current();
        if previous != target {
            let mut history = self.history.borrow_mut();
            history.push(previous);
            if history.len() > MAX_HISTORY {
                history.remove(0);
            }
        }
        log::debug!("🧭 [NAV] {}", target.path());
        self.current.set(target.clone());
        target
    }

    /// Previous screen, re-checked against the guards
    pub fn back(&self) -> Option<Route> {
        let previous = self.history.borrow_mut().pop()?;
        let target = self.resolve(previous);
        self.current.set(target.clone());
        Some(target)
    }

    pub fn history_len(&self) -> usize {
        self.history.borrow().len()
    }

    pub fn subscribe<F: Fn() + 'static>(&self, callback: F) {
        self.current.subscribe(callback);
    }
}
