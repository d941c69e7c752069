// ============================================================================
// SEEPALAYA WEB - Client core of the Seepalaya learning platform (MVVM)
// ============================================================================
// - ViewModels: screen state + UI logic
// - Services: HTTP only
// - State: Rc<RefCell> containers with subscribers
// - Stores: session, preferences, one-shot hand-offs (localStorage)
// - Models: structures shared with the backend
// ============================================================================

pub mod app;
pub mod config;
pub mod context;
pub mod models;
pub mod services;
pub mod state;
pub mod stores;
pub mod utils;
pub mod viewmodels;

pub use app::{Navigator, Route};
pub use config::{AppConfig, CONFIG};
pub use state::AppState;

#[cfg(target_arch = "wasm32")]
mod web;
