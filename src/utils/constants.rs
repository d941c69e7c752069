// ============================================================================
// CONSTANTS - Storage keys, limits and shared user-facing messages
// ============================================================================

/// Bearer token issued at login/signup
pub const STORAGE_KEY_AUTH_TOKEN: &str = "user-auth";
/// Display name of the signed-in user
pub const STORAGE_KEY_DISPLAY_NAME: &str = "user";
/// "true" / "false"
pub const STORAGE_KEY_IS_TEACHER: &str = "isTeacher";
pub const STORAGE_KEY_REMEMBERED_USERNAME: &str = "uname";
pub const STORAGE_KEY_REMEMBERED_PASSWORD: &str = "upass";
/// Non-empty when "remember me" was ticked on the last login
pub const STORAGE_KEY_REMEMBER_ME: &str = "rememberme";
pub const REMEMBER_ME_MARKER: &str = "remembered";
pub const STORAGE_KEY_THEME: &str = "theme";
pub const STORAGE_KEY_LOCALE: &str = "locale";
/// One-shot blob read by the "students created" screen
pub const STORAGE_KEY_STUDENT_CREATION: &str = "studentCreationResponse";

/// Upper bound of the student draft list
pub const MAX_DRAFT_ROWS: usize = 100;
/// Rows appended by the "+5 rows" action
pub const BULK_DRAFT_ROWS: usize = 5;

pub const GENERIC_ERROR_MESSAGE: &str = "Encountered an error! Please try again later.";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials, please try again.";
pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email, please try again.";
pub const EMPTY_BATCH_MESSAGE: &str = "Please add at least one student name.";

pub const BACKEND_URL_DEVELOPMENT: &str = "http://localhost:8000";
pub const BACKEND_URL_PRODUCTION: &str = "https://api.seepalaya.org.np";
pub const API_PREFIX: &str = "/api/v1";
