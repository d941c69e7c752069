use serde::{Deserialize, Serialize};

use crate::context::Locale;
use crate::stores::Theme;
use crate::utils::constants::{
    API_PREFIX, BACKEND_URL_DEVELOPMENT, BACKEND_URL_PRODUCTION, BULK_DRAFT_ROWS, MAX_DRAFT_ROWS,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url_development: String,
    pub backend_url_production: String,
    pub environment: String,
    pub enable_logging: bool,
    pub api_prefix: String,
    pub endpoints: ApiEndpoints,
    pub import_config: ImportConfig,
    pub ui_config: UIConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url_development: BACKEND_URL_DEVELOPMENT.to_string(),
            backend_url_production: BACKEND_URL_PRODUCTION.to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            api_prefix: API_PREFIX.to_string(),
            endpoints: ApiEndpoints::default(),
            import_config: ImportConfig::default(),
            ui_config: UIConfig::default(),
        }
    }
}

/// Backend routes, relative to `api_prefix`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEndpoints {
    pub teacher_signup: String,
    pub login: String,
    pub logout: String,
    pub forgot_password: String,
    pub reset_password: String,
    pub resend_email_confirmation: String,
    pub confirm_email: String,
    pub classroom_create: String,
    pub classroom_details: String,
    pub classroom_update: String,
    pub classroom_list: String,
    pub students_create: String,
    pub students_list: String,
    pub students_add: String,
    pub students_remove: String,
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self {
            teacher_signup: "/teacher/signup/".to_string(),
            login: "/account/login/".to_string(),
            logout: "/account/logout/".to_string(),
            forgot_password: "/account/forgot-password/".to_string(),
            reset_password: "/account/reset-password/".to_string(),
            resend_email_confirmation: "/account/resend-email-confirmation/".to_string(),
            confirm_email: "/account/confirm-email/".to_string(),
            classroom_create: "/classroom/create/".to_string(),
            classroom_details: "/classroom/details/".to_string(),
            classroom_update: "/classroom/update/".to_string(),
            classroom_list: "/teacher/classroom/list/".to_string(),
            students_create: "/classroom/student/create/".to_string(),
            students_list: "/classroom/students/".to_string(),
            students_add: "/classroom/students/add/".to_string(),
            students_remove: "/classroom/students/remove/".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportConfig {
    pub max_rows: usize,
    pub bulk_rows: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_rows: MAX_DRAFT_ROWS,
            bulk_rows: BULK_DRAFT_ROWS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UIConfig {
    pub default_locale: Locale,
    pub default_theme: Theme,
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            default_locale: Locale::English,
            default_theme: Theme::Light,
        }
    }
}

impl AppConfig {
    /// Loads configuration from compile-time environment variables (see build.rs)
    pub fn from_env() -> Self {
        Self {
            backend_url_development: option_env!("SEEPALAYA_BACKEND_URL_DEVELOPMENT")
                .unwrap_or(BACKEND_URL_DEVELOPMENT)
                .to_string(),
            backend_url_production: option_env!("SEEPALAYA_BACKEND_URL_PRODUCTION")
                .unwrap_or(BACKEND_URL_PRODUCTION)
                .to_string(),
            environment: option_env!("SEEPALAYA_ENVIRONMENT")
                .unwrap_or("development")
                .to_string(),
            enable_logging: option_env!("SEEPALAYA_ENABLE_LOGGING")
                .unwrap_or("true")
                .parse()
                .unwrap_or(true),
            api_prefix: option_env!("SEEPALAYA_API_PREFIX")
                .unwrap_or(API_PREFIX)
                .to_string(),
            endpoints: ApiEndpoints::default(),
            import_config: ImportConfig {
                max_rows: option_env!("SEEPALAYA_MAX_STUDENT_ROWS")
                    .unwrap_or("100")
                    .parse()
                    .unwrap_or(MAX_DRAFT_ROWS),
                bulk_rows: option_env!("SEEPALAYA_BULK_STUDENT_ROWS")
                    .unwrap_or("5")
                    .parse()
                    .unwrap_or(BULK_DRAFT_ROWS),
            },
            ui_config: UIConfig {
                default_locale: Locale::from_code(
                    option_env!("SEEPALAYA_DEFAULT_LOCALE").unwrap_or("eng"),
                ),
                default_theme: Theme::from_name(
                    option_env!("SEEPALAYA_DEFAULT_THEME").unwrap_or("light"),
                ),
            },
        }
    }

    /// Backend base URL for the current environment
    pub fn backend_url(&self) -> &str {
        match self.environment.as_str() {
            "production" => &self.backend_url_production,
            _ => &self.backend_url_development,
        }
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }

    /// Absolute URL of an API route
    pub fn endpoint_url(&self, path: &str) -> String {
        let mut url = self.backend_url().trim_end_matches('/').to_string();
        for segment in [self.api_prefix.trim_matches('/'), path.trim_start_matches('/')] {
            if !segment.is_empty() {
                url.push('/');
                url.push_str(segment);
            }
        }
        url
    }

    /// Download link for a server-side file reference (e.g. `/media/x.csv`)
    pub fn download_url(&self, file_url: &str) -> String {
        if file_url.starts_with("http://") || file_url.starts_with("https://") {
            return file_url.to_string();
        }
        format!(
            "{}/{}",
            self.backend_url().trim_end_matches('/'),
            file_url.trim_start_matches('/')
        )
    }
}

lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_url_follows_environment() {
        let mut config = AppConfig::default();
        assert_eq!(config.backend_url(), BACKEND_URL_DEVELOPMENT);
        config.environment = "production".to_string();
        assert_eq!(config.backend_url(), BACKEND_URL_PRODUCTION);
    }

    #[test]
    fn endpoint_url_joins_without_double_slashes() {
        let mut config = AppConfig::default();
        config.backend_url_development = "http://localhost:8000/".to_string();
        assert_eq!(
            config.endpoint_url(&config.endpoints.login.clone()),
            "http://localhost:8000/api/v1/account/login/"
        );

        config.api_prefix = String::new();
        assert_eq!(
            config.endpoint_url("/classroom/details/"),
            "http://localhost:8000/classroom/details/"
        );
    }

    #[test]
    fn download_url_resolves_relative_file_references() {
        let config = AppConfig::default();
        assert_eq!(
            config.download_url("/media/created_students_t1.csv"),
            format!("{}/media/created_students_t1.csv", BACKEND_URL_DEVELOPMENT)
        );
        assert_eq!(
            config.download_url("https://cdn.example.org/a.csv"),
            "https://cdn.example.org/a.csv"
        );
    }

    #[test]
    fn defaults_cap_student_import() {
        let config = AppConfig::default();
        assert_eq!(config.import_config.max_rows, 100);
        assert_eq!(config.import_config.bulk_rows, 5);
    }
}
