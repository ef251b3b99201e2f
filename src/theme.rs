//! Dark mode preference and toggle.
//!
//! The preference is read once at startup from a [`PreferenceStore`] and
//! written back on every toggle. Subscribers registered with
//! [`ThemeToggle::subscribe`] are called after each change; the ambient
//! effects hook in there instead of watching the body's class attribute.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::collections::HashMap;

use crate::consts::THEME_STORAGE_KEY;

/// Light or dark presentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Interpret a stored value. Anything other than `"dark"` is light.
    #[must_use]
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

/// Key/value persistence for the theme preference.
pub trait PreferenceStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, value: &str);
}

/// In-memory store, used where no browser storage exists.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.save(key, value);
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
    }
}

type Subscriber = Box<dyn FnMut(Theme)>;

/// Current theme plus the callbacks interested in changes to it.
pub struct ThemeToggle {
    theme: Theme,
    subscribers: Vec<Subscriber>,
}

impl ThemeToggle {
    /// Read the persisted preference. Absent or unreadable means light.
    #[must_use]
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let stored = store.load(THEME_STORAGE_KEY);
        Self::with_theme(Theme::from_stored(stored.as_deref()))
    }

    #[must_use]
    pub fn with_theme(theme: Theme) -> Self {
        Self { theme, subscribers: Vec::new() }
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Register a callback run after every toggle, in registration order.
    pub fn subscribe(&mut self, subscriber: impl FnMut(Theme) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Invert the theme, persist it, and notify subscribers.
    pub fn toggle(&mut self, store: &mut dyn PreferenceStore) -> Theme {
        self.theme = self.theme.flipped();
        store.save(THEME_STORAGE_KEY, self.theme.as_str());
        log::debug!("theme toggled to {}", self.theme.as_str());
        for subscriber in &mut self.subscribers {
            subscriber(self.theme);
        }
        self.theme
    }
}

impl std::fmt::Debug for ThemeToggle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeToggle")
            .field("theme", &self.theme)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// `window.localStorage`, degrading to a no-op when storage is blocked.
#[cfg(feature = "hydrate")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

#[cfg(feature = "hydrate")]
impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        match web_sys::window()?.local_storage() {
            Ok(storage) => storage,
            Err(err) => {
                log::debug!("localStorage unavailable: {err:?}");
                None
            }
        }
    }
}

#[cfg(feature = "hydrate")]
impl PreferenceStore for LocalStorage {
    fn load(&self, key: &str) -> Option<String> {
        match Self::storage()?.get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::debug!("localStorage read failed: {err:?}");
                None
            }
        }
    }

    fn save(&mut self, key: &str, value: &str) {
        let Some(storage) = Self::storage() else {
            return;
        };
        if let Err(err) = storage.set_item(key, value) {
            log::warn!("localStorage write failed: {err:?}");
        }
    }
}

/// Reflect `theme` on the `<body>` class list.
#[cfg(feature = "hydrate")]
pub fn apply(theme: Theme) -> crate::error::FxResult<()> {
    use crate::consts::DARK_MODE_CLASS;
    use crate::error::FxError;

    let body = crate::dom::body()?;
    let classes = body.class_list();
    let result = if theme.is_dark() {
        classes.add_1(DARK_MODE_CLASS)
    } else {
        classes.remove_1(DARK_MODE_CLASS)
    };
    result.map_err(|err| FxError::from_js("apply theme class", &err))
}

/// Apply the stored theme and wire the toggle control.
///
/// Returns the shared toggle so other components can subscribe. Without a
/// toggle control the theme is still applied; nothing else happens.
#[cfg(feature = "hydrate")]
pub fn bind() -> crate::error::FxResult<std::rc::Rc<std::cell::RefCell<ThemeToggle>>> {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;

    use crate::consts::THEME_TOGGLE_ID;
    use crate::dom;

    let mut toggle = ThemeToggle::load(&LocalStorage);
    apply(toggle.theme())?;
    toggle.subscribe(|theme| {
        if let Err(err) = apply(theme) {
            log::warn!("theme: {err}");
        }
    });
    let toggle = Rc::new(RefCell::new(toggle));

    let Some(control) = dom::document()?.get_element_by_id(THEME_TOGGLE_ID) else {
        log::debug!("theme: no #{THEME_TOGGLE_ID} control");
        return Ok(toggle);
    };
    let shared = Rc::clone(&toggle);
    let on_click = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
        let mut store = LocalStorage;
        shared.borrow_mut().toggle(&mut store);
    });
    dom::listen(&control, "click", on_click)?;
    Ok(toggle)
}
