// ============================================================================
// API CLIENT - HTTP only (stateless apart from the session it reads)
// ============================================================================
// Builds URLs, attaches the bearer token, maps HTTP failures to ApiError.
// A 401 clears the session before the error is returned.
// ============================================================================

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::AppConfig;
use crate::models::{ApiEnvelope, ErrorBody};
use crate::services::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::services::ApiError;
use crate::stores::SessionStore;
use crate::utils::constants::GENERIC_ERROR_MESSAGE;

/// Whether the stored token goes out with the call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Auth {
    Required,
    Anonymous,
}

pub struct ApiClient<T> {
    transport: Rc<T>,
    session: SessionStore,
    config: AppConfig,
}

impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            session: self.session.clone(),
            config: self.config.clone(),
        }
    }
}

impl<T: HttpTransport> ApiClient<T> {
    pub fn new(transport: Rc<T>, session: SessionStore, config: AppConfig) -> Self {
        Self {
            transport,
            session,
            config,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub async fn post<B, R>(&self, path: &str, body: &B, auth: Auth) -> Result<ApiEnvelope<R>, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        let response = self.execute(HttpMethod::Post, path, Some(body), auth).await?;
        decode_envelope(&response)
    }

    pub async fn get<R>(&self, path: &str, auth: Auth) -> Result<ApiEnvelope<R>, ApiError>
    where
        R: DeserializeOwned,
    {
        let response = self.execute(HttpMethod::Get, path, None, auth).await?;
        decode_envelope(&response)
    }

    /// POST whose reply does not follow the `{success, message, data}` shape.
    /// Returns the decoded body and the HTTP status.
    pub async fn post_raw<B, R>(&self, path: &str, body: &B, auth: Auth) -> Result<(R, u16), ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        let response = self.execute(HttpMethod::Post, path, Some(body), auth).await?;
        let decoded = serde_json::from_str::<R>(&response.body)
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok((decoded, response.status))
    }

    async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        auth: Auth,
    ) -> Result<HttpResponse, ApiError> {
        let url = self.config.endpoint_url(path);
        let bearer = match auth {
            Auth::Required => self.session.token(),
            Auth::Anonymous => None,
        };
        log::debug!("🌐 [API] {:?} {}", method, url);

        let response = self
            .transport
            .send(HttpRequest {
                method,
                url: url.clone(),
                bearer,
                body,
            })
            .await
            .map_err(|e| {
                log::error!("❌ [API] {} failed: {}", url, e);
                ApiError::Network(e)
            })?;

        if response.status == 401 {
            log::warn!("🔒 [API] 401 from {}, clearing session", url);
            self.session.clear();
            return Err(ApiError::Unauthorized {
                message: error_message(&response.body),
            });
        }

        if !response.ok() {
            log::warn!("⚠️ [API] HTTP {} from {}", response.status, url);
            return Err(ApiError::Status {
                status: response.status,
                message: error_message(&response.body),
            });
        }

        Ok(response)
    }
}

fn decode_envelope<R: DeserializeOwned>(response: &HttpResponse) -> Result<ApiEnvelope<R>, ApiError> {
    // 204s and empty 200s count as a bare success
    if response.body.trim().is_empty() {
        let mut envelope = ApiEnvelope::new(true, None);
        envelope.status = response.status;
        return Ok(envelope);
    }
    let mut envelope: ApiEnvelope<R> =
        serde_json::from_str(&response.body).map_err(|e| ApiError::Parse(e.to_string()))?;
    envelope.status = response.status;
    Ok(envelope)
}

/// `detail`, else `message`, else the generic fallback
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error_message())
        .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string())
}
