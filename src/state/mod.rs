// ============================================================================
// STATE MODULE - Rc<RefCell> state containers + notifications
// ============================================================================

pub mod app_state;
pub mod reactivity;
pub mod request_state;

pub use app_state::AppState;
pub use reactivity::ReactiveState;
pub use request_state::{RequestHandle, RequestState};
