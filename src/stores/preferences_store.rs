// ============================================================================
// PREFERENCES STORE - Theme and locale, persisted across visits
// ============================================================================

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::config::UIConfig;
use crate::context::Locale;
use crate::state::ReactiveState;
use crate::utils::constants::{STORAGE_KEY_LOCALE, STORAGE_KEY_THEME};
use crate::utils::i18n;
use crate::utils::storage::KeyValueStorage;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Anything but "dark" is light
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("dark") {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Clone)]
pub struct PreferencesStore {
    storage: Rc<dyn KeyValueStorage>,
    theme: ReactiveState<Theme>,
    locale: ReactiveState<Locale>,
}

impl PreferencesStore {
    pub fn new(storage: Rc<dyn KeyValueStorage>, defaults: &UIConfig) -> Self {
        let theme = storage
            .get(STORAGE_KEY_THEME)
            .map(|name| Theme::from_name(&name))
            .unwrap_or(defaults.default_theme);
        let locale = storage
            .get(STORAGE_KEY_LOCALE)
            .map(|code| Locale::from_code(&code))
            .unwrap_or(defaults.default_locale);
        Self {
            storage,
            theme: ReactiveState::new(theme),
            locale: ReactiveState::new(locale),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme.snapshot()
    }

    pub fn toggle_theme(&self) -> Theme {
        let next = self.theme().toggled();
        self.set_theme(next);
        next
    }

    pub fn set_theme(&self, theme: Theme) {
        if let Err(e) = self.storage.set(STORAGE_KEY_THEME, theme.as_str()) {
            log::warn!("⚠️ [PREFS] Theme not persisted: {}", e);
        }
        log::info!("🎨 [PREFS] Theme: {}", theme.as_str());
        self.theme.set(theme);
    }

    pub fn locale(&self) -> Locale {
        self.locale.snapshot()
    }

    pub fn set_locale(&self, locale: Locale) {
        if let Err(e) = self.storage.set(STORAGE_KEY_LOCALE, locale.as_str()) {
            log::warn!("⚠️ [PREFS] Locale not persisted: {}", e);
        }
        log::info!("🌐 [PREFS] Locale: {}", locale.as_str());
        self.locale.set(locale);
    }

    /// Translated string in the active locale
    pub fn t(&self, key: &str) -> String {
        i18n::t(key, self.locale())
    }

    pub fn subscribe<F: Fn() + 'static>(&self, callback: F) {
        let callback = Rc::new(callback);
        let on_theme = callback.clone();
        self.theme.subscribe(move || on_theme());
        self.locale.subscribe(move || callback());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MemoryStorage;

    #[test]
    fn theme_toggle_is_persisted() {
        let storage = Rc::new(MemoryStorage::new());
        let prefs = PreferencesStore::new(storage.clone(), &UIConfig::default());
        assert_eq!(prefs.theme(), Theme::Light);

        assert_eq!(prefs.toggle_theme(), Theme::Dark);
        assert_eq!(storage.get("theme").as_deref(), Some("dark"));
        assert_eq!(prefs.toggle_theme(), Theme::Light);

        prefs.toggle_theme();
        let reloaded = PreferencesStore::new(storage, &UIConfig::default());
        assert_eq!(reloaded.theme(), Theme::Dark);
    }

    #[test]
    fn locale_switch_changes_translations() {
        let storage = Rc::new(MemoryStorage::new());
        let prefs = PreferencesStore::new(storage.clone(), &UIConfig::default());
        let english = prefs.t("log_in");

        prefs.set_locale(Locale::Nepali);
        assert_eq!(prefs.locale(), Locale::Nepali);
        assert_ne!(prefs.t("log_in"), english);
        assert_eq!(storage.get("locale").as_deref(), Some("nep"));
        assert_eq!(prefs.t("no_such_key"), "no_such_key");
    }

    #[test]
    fn unknown_theme_names_fall_back_to_light() {
        assert_eq!(Theme::from_name("DARK"), Theme::Dark);
        assert_eq!(Theme::from_name("sepia"), Theme::Light);
    }
}
