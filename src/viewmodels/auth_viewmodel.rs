// ============================================================================
// AUTH VIEWMODEL - Login, signup, password and email flows
// ============================================================================
// Each action validates its form, dispatches through its request handle and
// returns the screen to go to next (None = stay).
// ============================================================================

use serde_json::Value;

use crate::app::Route;
use crate::models::{
    ApiEnvelope, AuthData, ConfirmEmailRequest, EmailRequest, LoginRequest, ResetPasswordRequest,
    TeacherSignupRequest,
};
use crate::services::{ApiError, AuthService, HttpTransport};
use crate::state::{ReactiveState, RequestHandle};
use crate::stores::SessionStore;
use crate::utils::constants::{INVALID_CREDENTIALS_MESSAGE, INVALID_EMAIL_MESSAGE};
use crate::utils::validation::FormField;
use crate::viewmodels::forms::{EmailForm, FormState, LoginForm, ResetPasswordForm, SignupForm};

pub struct AuthViewModel<T> {
    service: AuthService<T>,
    session: SessionStore,
    pub login_form: ReactiveState<FormState<LoginForm>>,
    pub remember_me: ReactiveState<bool>,
    pub signup_form: ReactiveState<FormState<SignupForm>>,
    pub forgot_form: ReactiveState<FormState<EmailForm>>,
    pub resend_form: ReactiveState<FormState<EmailForm>>,
    pub reset_form: ReactiveState<FormState<ResetPasswordForm>>,
    pub login: RequestHandle<AuthData>,
    pub signup: RequestHandle<AuthData>,
    pub forgot_password: RequestHandle<Value>,
    pub resend_confirmation: RequestHandle<Value>,
    pub reset_password: RequestHandle<Value>,
    pub email_confirmation: RequestHandle<Value>,
    pub verify_email: RequestHandle<Value>,
    pub logout_request: RequestHandle<Value>,
}

impl<T> Clone for AuthViewModel<T> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            session: self.session.clone(),
            login_form: self.login_form.clone(),
            remember_me: self.remember_me.clone(),
            signup_form: self.signup_form.clone(),
            forgot_form: self.forgot_form.clone(),
            resend_form: self.resend_form.clone(),
            reset_form: self.reset_form.clone(),
            login: self.login.clone(),
            signup: self.signup.clone(),
            forgot_password: self.forgot_password.clone(),
            resend_confirmation: self.resend_confirmation.clone(),
            reset_password: self.reset_password.clone(),
            email_confirmation: self.email_confirmation.clone(),
            verify_email: self.verify_email.clone(),
            logout_request: self.logout_request.clone(),
        }
    }
}

impl<T: HttpTransport> AuthViewModel<T> {
    pub fn new(service: AuthService<T>, session: SessionStore) -> Self {
        Self {
            service,
            session,
            login_form: ReactiveState::new(FormState::new()),
            remember_me: ReactiveState::new(false),
            signup_form: ReactiveState::new(FormState::new()),
            forgot_form: ReactiveState::new(FormState::new()),
            resend_form: ReactiveState::new(FormState::new()),
            reset_form: ReactiveState::new(FormState::new()),
            login: RequestHandle::new("login"),
            signup: RequestHandle::new("teacher_signup"),
            forgot_password: RequestHandle::new("forgot_password"),
            resend_confirmation: RequestHandle::new("resend_confirmation"),
            reset_password: RequestHandle::new("reset_password"),
            email_confirmation: RequestHandle::new("confirm_email"),
            verify_email: RequestHandle::new("verify_email"),
            logout_request: RequestHandle::new("logout"),
        }
    }

    // ------------------------------------------------------------------
    // Login
    // ------------------------------------------------------------------

    /// Signed-in users skip the login screen; otherwise remembered
    /// credentials are prefilled.
    pub fn enter_login(&self) -> Option<Route> {
        if self.session.is_authenticated() {
            return Some(Route::Dashboard);
        }
        self.login.reset();
        let remembered = self.session.remembered_credentials();
        self.login_form.update(|form| {
            form.reset();
            if let Some((username, password)) = &remembered {
                form.prefill(FormField::Username, username);
                form.prefill(FormField::Password, password);
            }
        });
        self.remember_me.set(remembered.is_some());
        None
    }

    pub fn toggle_remember_me(&self) {
        self.remember_me.update(|r| *r = !*r);
    }

    pub async fn submit_login(&self) -> Option<Route> {
        let request = self.login_form.update(|form| {
            form.begin_submit().then(|| LoginRequest {
                username_or_email: form.values.username_or_email.clone(),
                password: form.values.password.clone(),
            })
        })?;

        let outcome = self.login.run(self.service.login(&request)).await?;
        match outcome {
            Ok(envelope) if envelope.success => match envelope.data {
                Some(auth) => {
                    let remember = self.remember_me.snapshot();
                    let credentials = remember
                        .then_some((request.username_or_email.as_str(), request.password.as_str()));
                    self.session.sign_in(&auth, credentials);
                    self.login_form.update(|form| form.finish_submit(None));
                    Some(Route::Dashboard)
                }
                None => self.fail_login(None),
            },
            Ok(envelope) => self.fail_login(envelope.message),
            Err(error) => self.fail_login(Some(login_error_message(&error))),
        }
    }

    fn fail_login(&self, message: Option<String>) -> Option<Route> {
        let message = message.unwrap_or_else(|| INVALID_CREDENTIALS_MESSAGE.to_string());
        log::warn!("❌ [AUTH] Login failed: {}", message);
        self.login_form.update(|form| form.finish_submit(Some(message)));
        None
    }

    // ------------------------------------------------------------------
    // Teacher signup
    // ------------------------------------------------------------------

    pub async fn submit_signup(&self) -> Option<Route> {
        let request = self.signup_form.update(|form| {
            form.begin_submit().then(|| TeacherSignupRequest {
                full_name: form.values.full_name.trim().to_string(),
                email: form.values.email.clone(),
                password: form.values.password.clone(),
                confirm_password: form.values.confirm_password.clone(),
            })
        })?;

        let outcome = self.signup.run(self.service.teacher_signup(&request)).await?;
        let (next, status) = match outcome {
            Ok(envelope) if envelope.success => match envelope.data {
                Some(auth) => {
                    self.session.sign_in(&auth, None);
                    (Some(Route::Dashboard), None)
                }
                None => (None, envelope.message),
            },
            Ok(envelope) => (None, envelope.message),
            Err(error) => (None, Some(error.message())),
        };
        self.signup_form.update(|form| form.finish_submit(status));
        next
    }

    // ------------------------------------------------------------------
    // Forgot password / resend confirmation
    // ------------------------------------------------------------------

    pub async fn submit_forgot_password(&self) -> Option<Route> {
        let request = email_request(&self.forgot_form)?;
        let outcome = self
            .forgot_password
            .run(self.service.forgot_password(&request))
            .await?;
        finish_email_flow(&self.forgot_form, outcome, Route::ForgotPasswordDone)
    }

    pub async fn submit_resend_confirmation(&self) -> Option<Route> {
        let request = email_request(&self.resend_form)?;
        let outcome = self
            .resend_confirmation
            .run(self.service.resend_email_confirmation(&request))
            .await?;
        finish_email_flow(&self.resend_form, outcome, Route::ResendConfirmationDone)
    }

    /// Dashboard banner for unverified accounts. The outcome is read from
    /// `verify_email`.
    pub async fn request_email_verification(&self) -> Option<Route> {
        if self.verify_email.is_loading() {
            return None;
        }
        self.verify_email
            .run(self.service.request_email_verification())
            .await?;
        None
    }

    // ------------------------------------------------------------------
    // Reset password / confirm email (link targets)
    // ------------------------------------------------------------------

    pub fn enter_reset_password(&self) {
        self.reset_password.reset();
        self.reset_form.update(|form| form.reset());
    }

    pub async fn submit_reset_password(&self, username: &str, token: &str) -> Option<Route> {
        let request = self.reset_form.update(|form| {
            form.begin_submit().then(|| ResetPasswordRequest {
                username: username.to_string(),
                token: token.to_string(),
                password: form.values.password.clone(),
                confirm_password: form.values.confirm_password.clone(),
            })
        })?;

        let outcome = self
            .reset_password
            .run(self.service.reset_password(&request))
            .await?;
        let (next, status) = match outcome {
            Ok(envelope) if envelope.success => (Some(Route::Login), envelope.message),
            Ok(envelope) => (None, envelope.message),
            Err(error) => (None, Some(error.message())),
        };
        self.reset_form.update(|form| form.finish_submit(status));
        next
    }

    /// Runs on opening the link; the screen renders `email_confirmation`
    pub async fn confirm_email(&self, token: &str) -> Option<Route> {
        let request = ConfirmEmailRequest {
            token: token.to_string(),
        };
        self.email_confirmation.reset();
        self.email_confirmation
            .run(self.service.confirm_email(&request))
            .await?;
        None
    }

    // ------------------------------------------------------------------
    // Logout
    // ------------------------------------------------------------------

    /// Tells the backend, then forgets the session whatever it answered
    pub async fn logout(&self) -> Option<Route> {
        if let Some(Err(error)) = self.logout_request.run(self.service.logout()).await {
            log::warn!("⚠️ [AUTH] Logout call failed, clearing locally: {}", error);
        }
        if self.session.is_authenticated() {
            self.session.clear();
        }
        Some(Route::Login)
    }
}

fn login_error_message(error: &ApiError) -> String {
    if error.is_client_error() {
        INVALID_CREDENTIALS_MESSAGE.to_string()
    } else {
        error.message()
    }
}

fn email_request(form: &ReactiveState<FormState<EmailForm>>) -> Option<EmailRequest> {
    form.update(|form| {
        form.begin_submit().then(|| EmailRequest {
            email: form.values.email.trim().to_string(),
        })
    })
}

fn finish_email_flow(
    form: &ReactiveState<FormState<EmailForm>>,
    outcome: Result<ApiEnvelope<Value>, ApiError>,
    done: Route,
) -> Option<Route> {
    let (next, status) = match outcome {
        Ok(envelope) if envelope.success => (Some(done), envelope.message),
        Ok(envelope) => (None, envelope.message),
        Err(error) if error.is_client_error() => (None, Some(INVALID_EMAIL_MESSAGE.to_string())),
        Err(error) => (None, Some(error.message())),
    };
    form.update(|form| form.finish_submit(status));
    next
}
