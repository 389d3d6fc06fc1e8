//! Message channels between the shell and the embedded application.

use crate::fastest::FastestTimes;
use crate::prefs::{self, PrefStore};

/// Outbound channel names exposed by the embedded application.
pub const UPDATE_LEVEL: &str = "updateLevel";
pub const INSTRUCTIONS: &str = "instructions";
pub const UPDATE_FASTEST: &str = "updateFastest";

/// Inbound channel the shell notifies on window resize.
pub const RESIZE: &str = "resize";

/// State change announced by the embedded application, to be persisted.
#[derive(Clone, Debug, PartialEq)]
pub enum PortMessage {
    UpdateLevel(u32),
    Instructions(bool),
    UpdateFastest(FastestTimes),
}

/// Persists one announced state change. Writes are independent per key;
/// the last write for a key wins.
pub fn apply(store: &dyn PrefStore, message: PortMessage) {
    match message {
        PortMessage::UpdateLevel(level) => prefs::set_level(store, level),
        PortMessage::Instructions(show) => prefs::set_instructions(store, show),
        PortMessage::UpdateFastest(times) => prefs::set_fastest(store, &times),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::Difficulty;
    use crate::prefs::{MemoryStore, FASTEST_KEY, INSTRUCTIONS_KEY, LEVEL_KEY};

    #[test]
    fn update_level_persists_as_decimal_string() {
        let store = MemoryStore::new();

        apply(&store, PortMessage::UpdateLevel(4));

        assert_eq!(store.get(LEVEL_KEY).as_deref(), Some("4"));
    }

    #[test]
    fn instructions_persist_as_boolean_string() {
        let store = MemoryStore::new();

        apply(&store, PortMessage::Instructions(false));
        assert_eq!(store.get(INSTRUCTIONS_KEY).as_deref(), Some("false"));

        apply(&store, PortMessage::Instructions(true));
        assert_eq!(store.get(INSTRUCTIONS_KEY).as_deref(), Some("true"));
    }

    #[test]
    fn update_fastest_persists_compact_json() {
        let store = MemoryStore::new();
        let mut times = FastestTimes::default();
        times.set(Difficulty::Easy, 42);

        apply(&store, PortMessage::UpdateFastest(times));

        assert_eq!(store.get(FASTEST_KEY).as_deref(), Some(r#"{"easy":42}"#));
    }

    #[test]
    fn later_writes_win() {
        let store = MemoryStore::new();

        apply(&store, PortMessage::UpdateLevel(2));
        apply(&store, PortMessage::UpdateLevel(3));

        assert_eq!(prefs::level(&store), 3);
    }
}
