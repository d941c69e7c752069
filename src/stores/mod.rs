pub mod creation_result_store;
pub mod preferences_store;
pub mod session_store;

pub use creation_result_store::CreationResultStore;
pub use preferences_store::{PreferencesStore, Theme};
pub use session_store::{Session, SessionStore};
