use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;

/// Best completion time in seconds per difficulty. An absent entry means the
/// difficulty has never been completed; absent entries stay off the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FastestTimes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub easy: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hard: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardcore: Option<u64>,
}

impl FastestTimes {
    pub fn get(&self, difficulty: Difficulty) -> Option<u64> {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Normal => self.normal,
            Difficulty::Hard => self.hard,
            Difficulty::Hardcore => self.hardcore,
        }
    }

    pub fn set(&mut self, difficulty: Difficulty, seconds: u64) {
        let slot = match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Normal => &mut self.normal,
            Difficulty::Hard => &mut self.hard,
            Difficulty::Hardcore => &mut self.hardcore,
        };
        *slot = Some(seconds);
    }

    /// A new time only beats a smaller existing entry; an absent entry always
    /// loses.
    pub fn improves(&self, difficulty: Difficulty, seconds: u64) -> bool {
        self.get(difficulty).map(|best| seconds < best).unwrap_or(true)
    }

    pub fn is_empty(&self) -> bool {
        Difficulty::ALL.iter().all(|d| self.get(*d).is_none())
    }
}
