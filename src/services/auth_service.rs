// ============================================================================
// AUTH SERVICE - Account endpoints
// ============================================================================

use serde_json::{json, Value};

use crate::models::{
    ApiEnvelope, AuthData, ConfirmEmailRequest, EmailRequest, LoginRequest, ResetPasswordRequest,
    TeacherSignupRequest,
};
use crate::services::api_client::{ApiClient, Auth};
use crate::services::http::HttpTransport;
use crate::services::ApiError;

pub struct AuthService<T> {
    client: ApiClient<T>,
}

impl<T> Clone for AuthService<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<T: HttpTransport> AuthService<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<ApiEnvelope<AuthData>, ApiError> {
        log::info!("🔐 [AUTH] Logging in {}", request.username_or_email);
        let path = &self.client.config().endpoints.login;
        self.client.post(path, request, Auth::Anonymous).await
    }

    pub async fn teacher_signup(
        &self,
        request: &TeacherSignupRequest,
    ) -> Result<ApiEnvelope<AuthData>, ApiError> {
        log::info!("📝 [AUTH] Teacher signup for {}", request.email);
        let path = &self.client.config().endpoints.teacher_signup;
        self.client.post(path, request, Auth::Anonymous).await
    }

    pub async fn logout(&self) -> Result<ApiEnvelope<Value>, ApiError> {
        let path = &self.client.config().endpoints.logout;
        self.client.post(path, &json!({}), Auth::Required).await
    }

    pub async fn forgot_password(&self, request: &EmailRequest) -> Result<ApiEnvelope<Value>, ApiError> {
        let path = &self.client.config().endpoints.forgot_password;
        self.client.post(path, request, Auth::Anonymous).await
    }

    pub async fn resend_email_confirmation(
        &self,
        request: &EmailRequest,
    ) -> Result<ApiEnvelope<Value>, ApiError> {
        let path = &self.client.config().endpoints.resend_email_confirmation;
        self.client.post(path, request, Auth::Anonymous).await
    }

    /// Dashboard "verify email": same endpoint, signed-in user, empty body
    pub async fn request_email_verification(&self) -> Result<ApiEnvelope<Value>, ApiError> {
        let path = &self.client.config().endpoints.resend_email_confirmation;
        self.client.post(path, &json!({}), Auth::Required).await
    }

    pub async fn reset_password(
        &self,
        request: &ResetPasswordRequest,
    ) -> Result<ApiEnvelope<Value>, ApiError> {
        let path = &self.client.config().endpoints.reset_password;
        self.client.post(path, request, Auth::Anonymous).await
    }

    pub async fn confirm_email(&self, request: &ConfirmEmailRequest) -> Result<ApiEnvelope<Value>, ApiError> {
        let path = &self.client.config().endpoints.confirm_email;
        self.client.post(path, request, Auth::Required).await
    }
}
