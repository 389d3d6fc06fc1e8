//! Preference persistence for the embed shell.
//!
//! Storage is reached through [`PrefStore`] so the bootstrap logic can run
//! against an in-memory store in tests. Typed accessors own the defaulting
//! policy: a missing or malformed value always yields the documented default,
//! never an error.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::fastest::FastestTimes;

pub const LEVEL_KEY: &str = "openchat_minesweeper_level";
pub const INSTRUCTIONS_KEY: &str = "openchat_minesweeper_instructions";
pub const FASTEST_KEY: &str = "openchat_minesweeper_fastest";

pub const DEFAULT_LEVEL: u32 = 1;

/// String key-value persistence, last write wins. Writes are best-effort;
/// a store that cannot persist drops the write rather than failing the shell.
pub trait PrefStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// Store backed by `window.localStorage`. Degrades to an empty, write-dropping
/// store when the browser denies storage access.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

#[cfg(target_arch = "wasm32")]
impl PrefStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(store) = storage() {
            let _ = store.set_item(key, value);
        }
    }
}

/// In-memory store for tests and headless use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrefStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
    }
}

pub fn level(store: &dyn PrefStore) -> u32 {
    store
        .get(LEVEL_KEY)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(DEFAULT_LEVEL)
}

pub fn set_level(store: &dyn PrefStore, level: u32) {
    store.set(LEVEL_KEY, &level.to_string());
}

/// Whether onboarding instructions should be shown. Only the exact stored
/// string `"false"` disables them.
pub fn instructions(store: &dyn PrefStore) -> bool {
    store.get(INSTRUCTIONS_KEY).as_deref() != Some("false")
}

pub fn set_instructions(store: &dyn PrefStore, show: bool) {
    store.set(INSTRUCTIONS_KEY, if show { "true" } else { "false" });
}

/// Fastest-times record. Corrupt stored JSON falls back to the empty record
/// instead of propagating a parse failure.
pub fn fastest_times(store: &dyn PrefStore) -> FastestTimes {
    store
        .get(FASTEST_KEY)
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

pub fn set_fastest(store: &dyn PrefStore, times: &FastestTimes) {
    if let Ok(raw) = serde_json::to_string(times) {
        store.set(FASTEST_KEY, &raw);
    }
}
