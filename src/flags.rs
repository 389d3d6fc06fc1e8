use serde::Serialize;

use crate::fastest::FastestTimes;
use crate::prefs::{self, PrefStore};

/// Username used when the page runs top-level or the host never reports one.
pub const DEFAULT_USERNAME: &str = "User";

/// One-time configuration record handed to the embedded application at mount.
///
/// The wire schema is additive: new fields only ever extend the record, and
/// the application treats each of them as optional. The shell always fills
/// every field, applying the stored-preference defaults centrally.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Flags {
    pub username: String,
    pub level: u32,
    pub instructions: bool,
    pub fastest_times: FastestTimes,
    pub touch: bool,
}

impl Flags {
    /// Assembles the mount record from the preference store.
    pub fn gather(store: &dyn PrefStore, username: String, touch: bool) -> Self {
        Self {
            username,
            level: prefs::level(store),
            instructions: prefs::instructions(store),
            fastest_times: prefs::fastest_times(store),
            touch,
        }
    }

    /// Bridges the record into the JS object the embedded application
    /// receives at init.
    #[cfg(target_arch = "wasm32")]
    pub fn to_js(&self) -> Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue> {
        let raw = serde_json::to_string(self)
            .map_err(|error| wasm_bindgen::JsValue::from_str(&error.to_string()))?;
        js_sys::JSON::parse(&raw)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::difficulty::Difficulty;
    use crate::prefs::{MemoryStore, FASTEST_KEY, LEVEL_KEY};

    #[test]
    fn empty_store_gathers_defaults() {
        let store = MemoryStore::new();

        let flags = Flags::gather(&store, DEFAULT_USERNAME.to_string(), false);

        assert_eq!(
            flags,
            Flags {
                username: "User".to_string(),
                level: 1,
                instructions: true,
                fastest_times: FastestTimes::default(),
                touch: false,
            }
        );
    }

    #[test]
    fn stored_level_alone_leaves_other_fields_defaulted() {
        let store = MemoryStore::new();
        store.set(LEVEL_KEY, "3");

        let flags = Flags::gather(&store, "alice".to_string(), true);

        assert_eq!(flags.level, 3);
        assert!(flags.instructions);
        assert_eq!(flags.fastest_times, FastestTimes::default());
        assert_eq!(flags.username, "alice");
        assert!(flags.touch);
    }

    #[test]
    fn gather_picks_up_persisted_fastest_times() {
        let store = MemoryStore::new();
        store.set(FASTEST_KEY, r#"{"normal":77}"#);

        let flags = Flags::gather(&store, DEFAULT_USERNAME.to_string(), false);

        assert_eq!(flags.fastest_times.get(Difficulty::Normal), Some(77));
    }

    #[test]
    fn wire_encoding_uses_camel_case() {
        let mut fastest_times = FastestTimes::default();
        fastest_times.set(Difficulty::Easy, 42);
        let flags = Flags {
            username: "alice".to_string(),
            level: 2,
            instructions: false,
            fastest_times,
            touch: true,
        };

        let encoded = serde_json::to_value(&flags).expect("flags should serialize");

        assert_eq!(encoded["username"], "alice");
        assert_eq!(encoded["level"], 2);
        assert_eq!(encoded["instructions"], false);
        assert_eq!(encoded["fastestTimes"]["easy"], 42);
        assert_eq!(encoded["touch"], true);
    }
}
