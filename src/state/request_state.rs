// ============================================================================
// REQUEST STATE - One container shape for every backend call
// ============================================================================
// pending (loading) -> fulfilled | rejected
// ============================================================================

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use serde::Serialize;

use crate::models::ApiEnvelope;
use crate::services::ApiError;
use crate::state::ReactiveState;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RequestState<T> {
    pub loading: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub status: u16,
    pub success: bool,
    pub message: Option<String>,
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        Self {
            loading: false,
            data: None,
            error: None,
            status: 0,
            success: false,
            message: None,
        }
    }
}

impl<T> RequestState<T> {
    pub fn is_idle(&self) -> bool {
        !self.loading && self.status == 0 && self.error.is_none()
    }

    pub fn is_fulfilled(&self) -> bool {
        !self.loading && self.status != 0 && self.error.is_none()
    }

    pub fn is_rejected(&self) -> bool {
        !self.loading && self.error.is_some()
    }

    /// Message to show under the form: the error, or the server's message
    pub fn status_message(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}

/// Owned by one screen. Every dispatch goes through [`RequestHandle::run`].
pub struct RequestHandle<T> {
    name: &'static str,
    state: ReactiveState<RequestState<T>>,
    epoch: Rc<Cell<u64>>,
}

impl<T> Clone for RequestHandle<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            state: self.state.clone(),
            epoch: self.epoch.clone(),
        }
    }
}

impl<T: Clone + 'static> RequestHandle<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: ReactiveState::new(RequestState::default()),
            epoch: Rc::new(Cell::new(0)),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn snapshot(&self) -> RequestState<T> {
        self.state.snapshot()
    }

    pub fn is_loading(&self) -> bool {
        self.state.with(|s| s.loading)
    }

    pub fn data(&self) -> Option<T> {
        self.state.with(|s| s.data.clone())
    }

    pub fn subscribe<F: Fn() + 'static>(&self, callback: F) {
        self.state.subscribe(callback);
    }

    /// Back to idle. Anything still in flight resolves into the void.
    pub fn reset(&self) {
        self.epoch.set(self.epoch.get().wrapping_add(1));
        self.state.set(RequestState::default());
    }

    /// Drives one call through pending -> terminal.
    ///
    /// Returns `None` when the handle was reset while the call was in flight;
    /// the late result is dropped without touching the state.
    pub async fn run<F>(&self, call: F) -> Option<Result<ApiEnvelope<T>, ApiError>>
    where
        F: Future<Output = Result<ApiEnvelope<T>, ApiError>>,
    {
        let epoch = self.epoch.get();
        self.state.update(|s| {
            s.loading = true;
            s.error = None;
            s.success = false;
            s.message = None;
        });
        log::debug!("⏳ [REQUEST] {} pending", self.name);

        let result = call.await;

        if self.epoch.get() != epoch {
            log::debug!("🗑️ [REQUEST] {} resolved after reset, dropping result", self.name);
            return None;
        }

        match &result {
            Ok(envelope) => {
                log::debug!(
                    "✅ [REQUEST] {} fulfilled (status {}, success {})",
                    self.name,
                    envelope.status,
                    envelope.success
                );
                self.state.set(RequestState {
                    loading: false,
                    data: envelope.data.clone(),
                    error: None,
                    status: envelope.status,
                    success: envelope.success,
                    message: envelope.message.clone(),
                });
            }
            Err(error) => {
                log::warn!("❌ [REQUEST] {} rejected: {}", self.name, error);
                self.state.set(RequestState {
                    loading: false,
                    data: None,
                    error: Some(error.message()),
                    status: error.status(),
                    success: false,
                    message: None,
                });
            }
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[tokio::test]
    async fn fulfilled_call_populates_data() {
        let handle: RequestHandle<u32> = RequestHandle::new("count");
        assert!(handle.snapshot().is_idle());

        let mut envelope = ApiEnvelope::new(true, Some(7));
        envelope.message = Some("ok".to_string());
        let result = handle.run(async move { Ok(envelope) }).await;

        assert!(matches!(result, Some(Ok(_))));
        let state = handle.snapshot();
        assert!(state.is_fulfilled());
        assert!(!state.loading);
        assert_eq!(state.data, Some(7));
        assert_eq!(state.status, 200);
        assert!(state.success);
        assert_eq!(state.message.as_deref(), Some("ok"));
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn rejected_call_keeps_only_the_error() {
        let handle: RequestHandle<u32> = RequestHandle::new("count");
        handle.run(async { Ok(ApiEnvelope::new(true, Some(1))) }).await;

        handle
            .run(async {
                Err(ApiError::Status {
                    status: 400,
                    message: "Invalid class code".to_string(),
                })
            })
            .await;

        let state = handle.snapshot();
        assert!(state.is_rejected());
        assert_eq!(state.data, None);
        assert_eq!(state.error.as_deref(), Some("Invalid class code"));
        assert_eq!(state.status, 400);
        assert!(!state.success);
    }

    #[tokio::test]
    async fn loading_is_visible_only_while_pending() {
        let handle: RequestHandle<u32> = RequestHandle::new("count");
        let observed = Rc::new(RefCell::new(Vec::new()));
        let observed_clone = observed.clone();
        let reader = handle.clone();
        handle.subscribe(move || observed_clone.borrow_mut().push(reader.is_loading()));

        handle.run(async { Ok(ApiEnvelope::new(true, Some(1))) }).await;

        assert_eq!(*observed.borrow(), vec![true, false]);
    }

    #[tokio::test]
    async fn reset_during_flight_drops_late_result() {
        let handle: RequestHandle<u32> = RequestHandle::new("detail");
        let resetter = handle.clone();

        let result = handle
            .run(async move {
                resetter.reset();
                Ok(ApiEnvelope::new(true, Some(9)))
            })
            .await;

        assert!(result.is_none());
        let state = handle.snapshot();
        assert!(state.is_idle());
        assert_eq!(state.data, None);
    }
}
