use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub username_or_email: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct TeacherSignupRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Forgot-password and resend-confirmation body
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct EmailRequest {
    pub email: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ResetPasswordRequest {
    pub username: String,
    pub token: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ConfirmEmailRequest {
    pub token: String,
}

/// `data` of a successful login or signup
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct AuthData {
    pub access_token: String,
    pub full_name: String,
    #[serde(default)]
    pub user_type: Vec<String>,
}

impl AuthData {
    pub fn is_teacher(&self) -> bool {
        self.user_type.iter().any(|t| t == "teacher")
    }
}
