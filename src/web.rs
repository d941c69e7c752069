// ============================================================================
// WEB - Browser entry point and the functions the host page calls
// ============================================================================
// The page renders; Rust owns the state. Async actions resolve to the path
// of the screen the app ended on. Reads return JSON strings.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::Route;
use crate::config::CONFIG;
use crate::context::Locale;
use crate::services::GlooTransport;
use crate::state::AppState;
use crate::utils::storage::BrowserStorage;
use crate::utils::validation::FormField;
use crate::viewmodels::SortDirection;

type WebApp = AppState<GlooTransport>;

thread_local! {
    static APP: RefCell<Option<Rc<WebApp>>> = const { RefCell::new(None) };
}

fn app() -> Option<Rc<WebApp>> {
    let app = APP.with(|cell| cell.borrow().clone());
    if app.is_none() {
        log::error!("❌ [MAIN] App is not initialised");
    }
    app
}

fn current_location() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::error!("❌ [MAIN] Could not serialise state: {}", e);
        "null".to_string()
    })
}

/// Keeps the address bar in step with the navigator
fn push_history(path: &str) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    if current_location() != path {
        if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(path)) {
            log::warn!("⚠️ [MAIN] history.pushState failed: {:?}", e);
        }
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if CONFIG.is_logging_enabled() {
        wasm_logger::init(wasm_logger::Config::default());
    }
    log::info!("🚀 [MAIN] Seepalaya web ({})", CONFIG.environment);

    let state = Rc::new(AppState::new(
        Rc::new(GlooTransport),
        Rc::new(BrowserStorage),
        CONFIG.clone(),
    ));
    let navigator = state.navigator.clone();
    state
        .navigator
        .subscribe(move || push_history(&navigator.current().path()));

    APP.with(|cell| *cell.borrow_mut() = Some(state.clone()));

    let start = Route::parse(&current_location());
    spawn_local(async move {
        let landed = state.open(start).await;
        log::info!("🧭 [MAIN] Landed on {}", landed.path());
    });
    Ok(())
}

/// Runs a view-model action, follows the screen it asks for and resolves to
/// the path the app ended on
macro_rules! route_action {
    ($(#[$doc:meta])* $name:ident, |$state:ident| $action:expr) => {
        $(#[$doc])*
        #[wasm_bindgen]
        pub async fn $name() -> String {
            let Some($state) = app() else {
                return current_location();
            };
            let next = $action;
            $state.follow(next).await.path()
        }
    };
}

// ----------------------------------------------------------------------------
// Navigation and preferences
// ----------------------------------------------------------------------------

/// Link clicks and popstate
#[wasm_bindgen]
pub async fn open_route(path: String) -> String {
    let Some(state) = app() else {
        return current_location();
    };
    state.open(Route::parse(&path)).await.path()
}

#[wasm_bindgen]
pub async fn go_back() -> String {
    let Some(state) = app() else {
        return current_location();
    };
    match state.back().await {
        Some(route) => route.path(),
        None => state.current_route().path(),
    }
}

#[wasm_bindgen]
pub fn current_path() -> String {
    app()
        .map(|state| state.current_route().path())
        .unwrap_or_else(current_location)
}

/// Called with no arguments whenever the screen changes
#[wasm_bindgen]
pub fn on_route_change(callback: js_sys::Function) {
    let Some(state) = app() else {
        return;
    };
    state.navigator.subscribe(move || {
        if let Err(e) = callback.call0(&JsValue::NULL) {
            log::warn!("⚠️ [MAIN] Route listener failed: {:?}", e);
        }
    });
}

#[wasm_bindgen]
pub fn toggle_theme() -> String {
    app()
        .map(|state| state.preferences.toggle_theme().as_str().to_string())
        .unwrap_or_default()
}

#[wasm_bindgen]
pub fn set_locale(code: &str) {
    if let Some(state) = app() {
        state.preferences.set_locale(Locale::from_code(code));
    }
}

#[wasm_bindgen]
pub fn translate(key: &str) -> String {
    app()
        .map(|state| state.preferences.t(key))
        .unwrap_or_else(|| key.to_string())
}

#[wasm_bindgen]
pub fn display_name() -> Option<String> {
    app()?.session.display_name()
}

#[wasm_bindgen]
pub fn is_teacher() -> bool {
    app().is_some_and(|state| state.session.is_teacher())
}

// ----------------------------------------------------------------------------
// Forms and request state
// ----------------------------------------------------------------------------

/// Input event. Unknown forms or fields are ignored.
#[wasm_bindgen]
pub fn form_change(form: &str, field: &str, value: &str) {
    let Some(state) = app() else {
        return;
    };
    match (state.form(form), FormField::from_name(field)) {
        (Some(handle), Some(field)) => handle.change(field, value),
        _ => log::warn!("⚠️ [MAIN] Unknown input {}.{}", form, field),
    }
}

#[wasm_bindgen]
pub fn form_blur(form: &str, field: &str) {
    let Some(state) = app() else {
        return;
    };
    match (state.form(form), FormField::from_name(field)) {
        (Some(handle), Some(field)) => handle.blur(field),
        _ => log::warn!("⚠️ [MAIN] Unknown input {}.{}", form, field),
    }
}

/// `{values, errors, status, submitting, can_submit}`
#[wasm_bindgen]
pub fn form_view(form: &str) -> Option<String> {
    let view = app()?.form(form)?.view();
    Some(to_json(&view))
}

/// `{loading, data, error, status, success, message}`
#[wasm_bindgen]
pub fn request_state(name: &str) -> Option<String> {
    app()?.request_state(name).map(|value| to_json(&value))
}

// ----------------------------------------------------------------------------
// Account
// ----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn toggle_remember_me() {
    if let Some(state) = app() {
        state.auth.toggle_remember_me();
    }
}

route_action!(submit_login, |state| state.auth.submit_login().await);
route_action!(submit_signup, |state| state.auth.submit_signup().await);
route_action!(submit_forgot_password, |state| state
    .auth
    .submit_forgot_password()
    .await);
route_action!(submit_resend_confirmation, |state| state
    .auth
    .submit_resend_confirmation()
    .await);
route_action!(
    /// Dashboard banner; read the outcome from `request_state("verify_email")`
    request_email_verification,
    |state| state.auth.request_email_verification().await
);
route_action!(logout, |state| state.auth.logout().await);

/// Uses the username and token of the open reset link
#[wasm_bindgen]
pub async fn submit_reset_password() -> String {
    let Some(state) = app() else {
        return current_location();
    };
    state.submit_reset_password().await.path()
}

// ----------------------------------------------------------------------------
// Dashboard
// ----------------------------------------------------------------------------

route_action!(submit_create_class, |state| state
    .dashboard
    .submit_create_class()
    .await);

// ----------------------------------------------------------------------------
// Student import
// ----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn staging_add_row() {
    if let Some(state) = app() {
        state.student_import.add_row();
    }
}

/// Returns how many rows were added
#[wasm_bindgen]
pub fn staging_add_bulk_rows() -> usize {
    app().map_or(0, |state| state.student_import.add_bulk_rows())
}

/// Text of the uploaded CSV; returns how many names were staged
#[wasm_bindgen]
pub fn staging_import_csv(text: &str) -> usize {
    app().map_or(0, |state| state.student_import.import_csv(text))
}

#[wasm_bindgen]
pub fn staging_set_name(index: usize, name: &str) {
    if let Some(state) = app() {
        state.student_import.set_name(index, name);
    }
}

#[wasm_bindgen]
pub fn staging_remove_row(index: usize) {
    if let Some(state) = app() {
        state.student_import.remove_row(index);
    }
}

/// `[{name}]`
#[wasm_bindgen]
pub fn staging_rows() -> String {
    app()
        .map(|state| state.student_import.staging.with(|s| to_json(&s.rows())))
        .unwrap_or_else(|| "[]".to_string())
}

#[wasm_bindgen]
pub fn staging_error() -> Option<String> {
    app()?.student_import.local_error.snapshot()
}

route_action!(submit_students, |state| state.student_import.submit().await);

/// Result shown on the "done" screen: `{class_title, students, file_url}`
#[wasm_bindgen]
pub fn created_students() -> Option<String> {
    let created = app()?.student_import.created.snapshot()?;
    Some(to_json(&created))
}

#[wasm_bindgen]
pub fn download_url() -> Option<String> {
    app()?.student_import.download_url()
}

// ----------------------------------------------------------------------------
// Class view
// ----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn roster_set_search(term: &str) {
    if let Some(state) = app() {
        state.class_view.roster.update(|r| r.set_search(term));
    }
}

/// `true` for ascending
#[wasm_bindgen]
pub fn roster_set_ascending(ascending: bool) {
    let direction = if ascending {
        SortDirection::Ascending
    } else {
        SortDirection::Descending
    };
    if let Some(state) = app() {
        state.class_view.roster.update(|r| r.set_direction(direction));
    }
}

#[wasm_bindgen]
pub fn roster_toggle_selected(username: &str) {
    if let Some(state) = app() {
        state.class_view.roster.update(|r| r.toggle_selected(username));
    }
}

/// Filtered and sorted `[{full_name, username}]`
#[wasm_bindgen]
pub fn roster_visible() -> String {
    app()
        .map(|state| state.class_view.roster.with(|r| to_json(&r.visible())))
        .unwrap_or_else(|| "[]".to_string())
}

/// Selected usernames in the order they were ticked
#[wasm_bindgen]
pub fn roster_selected() -> String {
    app()
        .map(|state| state.class_view.roster.with(|r| to_json(&r.selected())))
        .unwrap_or_else(|| "[]".to_string())
}

route_action!(refresh_class, |state| state.class_view.refresh().await);
route_action!(remove_selected_students, |state| state
    .class_view
    .remove_selected()
    .await);

#[wasm_bindgen]
pub fn start_edit_title() {
    if let Some(state) = app() {
        state.class_view.start_edit_title();
    }
}

#[wasm_bindgen]
pub fn cancel_edit_title() {
    if let Some(state) = app() {
        state.class_view.cancel_edit_title();
    }
}

#[wasm_bindgen]
pub fn is_editing_title() -> bool {
    app().is_some_and(|state| state.class_view.editing_title.snapshot())
}

route_action!(submit_class_title, |state| state.class_view.submit_title().await);

// ----------------------------------------------------------------------------
// Add to another class
// ----------------------------------------------------------------------------

route_action!(open_transfer, |state| state.class_view.open_transfer().await);

/// Classes the selection can go to: `[{code, title, student_count}]`
#[wasm_bindgen]
pub fn transfer_options() -> String {
    app()
        .map(|state| to_json(&state.class_view.transfer_options()))
        .unwrap_or_else(|| "[]".to_string())
}

#[wasm_bindgen]
pub fn choose_transfer_target(code: &str) {
    if let Some(state) = app() {
        state.class_view.choose_transfer_target(code);
    }
}

/// `{source_code, usernames, target_code}` or nothing when no transfer is open
#[wasm_bindgen]
pub fn transfer_draft() -> Option<String> {
    let draft = app()?.class_view.transfer_draft.snapshot()?;
    Some(to_json(&draft))
}

route_action!(confirm_transfer, |state| state.class_view.confirm_transfer().await);

#[wasm_bindgen]
pub fn cancel_transfer() {
    if let Some(state) = app() {
        state.class_view.cancel_transfer();
    }
}
