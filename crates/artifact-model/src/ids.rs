//! Identity and composite keys.
//!
//! The dataset document joins its composite keys with a pipe character
//! (`set|slot|mainStat`, `slot|mainStat`). Internally the keys are structured
//! and only rendered back to the pipe form at the loading boundary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Separator used by every composite key in the dataset document.
pub const KEY_SEPARATOR: char = '|';

/// A character paired with a build role; the unit of "who wants this".
///
/// Equality is exact on both fields. The same character under two roles is
/// two independent identities.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CharacterRole {
    pub character: String,
    pub role: String,
}

impl CharacterRole {
    pub fn new(character: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            character: character.into(),
            role: role.into(),
        }
    }

    pub fn matches(&self, character: &str, role: &str) -> bool {
        self.character == character && self.role == role
    }
}

impl fmt::Display for CharacterRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{KEY_SEPARATOR}{}", self.character, self.role)
    }
}

/// Exact Set × Slot × MainStat triple identifying one artifact combination.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ArtifactKey {
    pub set: String,
    pub slot: String,
    pub main_stat: String,
}

impl ArtifactKey {
    pub fn new(
        set: impl Into<String>,
        slot: impl Into<String>,
        main_stat: impl Into<String>,
    ) -> Self {
        Self {
            set: set.into(),
            slot: slot.into(),
            main_stat: main_stat.into(),
        }
    }

    /// Renders the wire form used by the `byArtifact` index.
    pub fn to_wire(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{KEY_SEPARATOR}{}{KEY_SEPARATOR}{}",
            self.set, self.slot, self.main_stat
        )
    }
}

impl FromStr for ArtifactKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(KEY_SEPARATOR).collect();
        match parts.as_slice() {
            [set, slot, main_stat]
                if !set.is_empty() && !slot.is_empty() && !main_stat.is_empty() =>
            {
                Ok(Self::new(*set, *slot, *main_stat))
            }
            _ => Err(ModelError::InvalidArtifactKey(s.to_string())),
        }
    }
}

/// Slot × MainStat pair, independent of any set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    pub slot: String,
    pub main_stat: String,
}

impl SlotKey {
    pub fn new(slot: impl Into<String>, main_stat: impl Into<String>) -> Self {
        Self {
            slot: slot.into(),
            main_stat: main_stat.into(),
        }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{KEY_SEPARATOR}{}", self.slot, self.main_stat)
    }
}

impl FromStr for SlotKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(KEY_SEPARATOR) {
            Some((slot, main_stat))
                if !slot.is_empty()
                    && !main_stat.is_empty()
                    && !main_stat.contains(KEY_SEPARATOR) =>
            {
                Ok(Self::new(slot, main_stat))
            }
            _ => Err(ModelError::InvalidSlotKey(s.to_string())),
        }
    }
}
