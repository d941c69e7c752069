// ============================================================================
// SESSION STORE - Auth token, display name, teacher flag, remembered login
// ============================================================================
// Backed by the key/value storage so a reload keeps the user signed in.
// ============================================================================

use std::rc::Rc;

use crate::models::AuthData;
use crate::state::ReactiveState;
use crate::utils::constants::{
    REMEMBER_ME_MARKER, STORAGE_KEY_AUTH_TOKEN, STORAGE_KEY_DISPLAY_NAME, STORAGE_KEY_IS_TEACHER,
    STORAGE_KEY_REMEMBERED_PASSWORD, STORAGE_KEY_REMEMBERED_USERNAME, STORAGE_KEY_REMEMBER_ME,
    STORAGE_KEY_STUDENT_CREATION,
};
use crate::utils::storage::KeyValueStorage;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub auth_token: Option<String>,
    pub display_name: Option<String>,
    pub is_teacher: bool,
    pub remembered_username: Option<String>,
    pub remembered_password: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.auth_token.is_some()
    }
}

#[derive(Clone)]
pub struct SessionStore {
    storage: Rc<dyn KeyValueStorage>,
    state: ReactiveState<Session>,
}

impl SessionStore {
    /// Loads whatever a previous visit left in storage
    pub fn new(storage: Rc<dyn KeyValueStorage>) -> Self {
        let session = read_session(storage.as_ref());
        if session.is_authenticated() {
            log::info!("🔑 [SESSION] Restored session (teacher: {})", session.is_teacher);
        }
        Self {
            storage,
            state: ReactiveState::new(session),
        }
    }

    pub fn snapshot(&self) -> Session {
        self.state.snapshot()
    }

    pub fn token(&self) -> Option<String> {
        self.state.with(|s| s.auth_token.clone())
    }

    pub fn display_name(&self) -> Option<String> {
        self.state.with(|s| s.display_name.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(Session::is_authenticated)
    }

    pub fn is_teacher(&self) -> bool {
        self.state.with(|s| s.is_teacher)
    }

    /// Stores the login/signup result. With `remember` the credentials are
    /// kept for prefill; without it any previously remembered pair is blanked.
    pub fn sign_in(&self, auth: &AuthData, remember: Option<(&str, &str)>) {
        let is_teacher = auth.is_teacher();
        let (username, password, marker) = match remember {
            Some((u, p)) => (u, p, REMEMBER_ME_MARKER),
            None => ("", "", ""),
        };

        let writes = [
            (STORAGE_KEY_AUTH_TOKEN, auth.access_token.as_str()),
            (STORAGE_KEY_DISPLAY_NAME, auth.full_name.as_str()),
            (STORAGE_KEY_IS_TEACHER, if is_teacher { "true" } else { "false" }),
            (STORAGE_KEY_REMEMBERED_USERNAME, username),
            (STORAGE_KEY_REMEMBERED_PASSWORD, password),
            (STORAGE_KEY_REMEMBER_ME, marker),
        ];
        for (key, value) in writes {
            if let Err(e) = self.storage.set(key, value) {
                log::error!("❌ [SESSION] {}", e);
            }
        }

        log::info!("✅ [SESSION] Signed in as {} (teacher: {})", auth.full_name, is_teacher);
        self.state.set(Session {
            auth_token: Some(auth.access_token.clone()),
            display_name: Some(auth.full_name.clone()),
            is_teacher,
            remembered_username: non_empty(username),
            remembered_password: non_empty(password),
        });
    }

    /// Logout / 401. Remembered credentials survive.
    pub fn clear(&self) {
        for key in [
            STORAGE_KEY_AUTH_TOKEN,
            STORAGE_KEY_STUDENT_CREATION,
            STORAGE_KEY_IS_TEACHER,
            STORAGE_KEY_DISPLAY_NAME,
        ] {
            if let Err(e) = self.storage.remove(key) {
                log::error!("❌ [SESSION] {}", e);
            }
        }
        log::info!("🚪 [SESSION] Session cleared");
        self.state.update(|s| {
            s.auth_token = None;
            s.display_name = None;
            s.is_teacher = false;
        });
    }

    /// Username/password to prefill the login form, if "remember me" was set
    pub fn remembered_credentials(&self) -> Option<(String, String)> {
        self.state.with(|s| match (&s.remembered_username, &s.remembered_password) {
            (Some(u), Some(p)) => Some((u.clone(), p.clone())),
            _ => None,
        })
    }

    pub fn subscribe<F: Fn() + 'static>(&self, callback: F) {
        self.state.subscribe(callback);
    }
}

fn read_session(storage: &dyn KeyValueStorage) -> Session {
    let remembered = storage.get(STORAGE_KEY_REMEMBER_ME).as_deref() == Some(REMEMBER_ME_MARKER);
    let read = |key: &str| storage.get(key).and_then(|v| non_empty(&v));
    Session {
        auth_token: read(STORAGE_KEY_AUTH_TOKEN),
        display_name: read(STORAGE_KEY_DISPLAY_NAME),
        is_teacher: storage.get(STORAGE_KEY_IS_TEACHER).as_deref() == Some("true"),
        remembered_username: read(STORAGE_KEY_REMEMBERED_USERNAME).filter(|_| remembered),
        remembered_password: read(STORAGE_KEY_REMEMBERED_PASSWORD).filter(|_| remembered),
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
