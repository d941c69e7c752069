use thiserror::Error;

use crate::utils::constants::GENERIC_ERROR_MESSAGE;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Parse error: {0}")]
    Parse(String),
    /// 401; the session has already been cleared when this surfaces
    #[error("HTTP 401: {message}")]
    Unauthorized { message: String },
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
}

impl ApiError {
    /// HTTP status, 0 when the call never got one
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Unauthorized { .. } => 401,
            ApiError::Status { status, .. } => *status,
            _ => 0,
        }
    }

    /// User-facing text
    pub fn message(&self) -> String {
        match self {
            ApiError::Unauthorized { message } | ApiError::Status { message, .. } => {
                message.clone()
            }
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// The backend answered with a 4xx
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_failures_use_generic_message() {
        let err = ApiError::Network("offline".to_string());
        assert_eq!(err.status(), 0);
        assert_eq!(err.message(), GENERIC_ERROR_MESSAGE);
        assert!(!err.is_client_error());
    }

    #[test]
    fn http_failures_keep_server_message() {
        let err = ApiError::Status {
            status: 400,
            message: "Classroom not found.".to_string(),
        };
        assert_eq!(err.status(), 400);
        assert_eq!(err.message(), "Classroom not found.");
        assert!(err.is_client_error());

        let unauthorized = ApiError::Unauthorized {
            message: "Token expired".to_string(),
        };
        assert!(unauthorized.is_unauthorized());
        assert_eq!(unauthorized.status(), 401);
    }
}
