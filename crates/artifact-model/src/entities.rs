//! Dataset entities.
//!
//! These types mirror the dataset document field-for-field (camelCase on the
//! wire) and are immutable once a [`crate::Dataset`] owns them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::CharacterRole;

/// One character+role's desire for a set/slot/main-stat combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterWant {
    pub character: String,
    pub role: String,
    /// Lower is more important.
    pub set_rank: u32,
    pub preferred: bool,
}

impl CharacterWant {
    pub fn key(&self) -> CharacterRole {
        CharacterRole::new(&self.character, &self.role)
    }

    pub fn is(&self, key: &CharacterRole) -> bool {
        key.matches(&self.character, &self.role)
    }
}

/// A priority tier of a substat and the character+role pairs valuing it there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubstatWant {
    pub substat: String,
    pub rank: u32,
    #[serde(default)]
    pub character_roles: Vec<CharacterRole>,
}

impl SubstatWant {
    pub fn is_wanted_by(&self, key: &CharacterRole) -> bool {
        self.character_roles.iter().any(|cr| cr == key)
    }
}

/// Characters and substats for exactly one Set × Slot × MainStat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactCombo {
    #[serde(default)]
    pub characters: Vec<CharacterWant>,
    #[serde(default)]
    pub substats: Vec<SubstatWant>,
}

impl ArtifactCombo {
    pub fn find_substat(&self, substat: &str, rank: u32) -> Option<&SubstatWant> {
        self.substats
            .iter()
            .find(|s| s.substat == substat && s.rank == rank)
    }
}

/// Main stat name → combination data, for one slot of one set.
pub type MainStatBreakdown = BTreeMap<String, ArtifactCombo>;

/// Flower and Feather pieces, whose main stats are fixed, aggregated per set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedSlot {
    pub slot: String,
    pub main_stat_label: String,
    #[serde(flatten)]
    pub combo: ArtifactCombo,
}

/// One artifact set as seen by the Browse view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetEntry {
    /// Union of the set's characters across all of its combinations.
    #[serde(default)]
    pub characters: Vec<CharacterWant>,
    /// Slot → main stat → combination data.
    #[serde(default)]
    pub slots: BTreeMap<String, MainStatBreakdown>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_slots: Option<FixedSlot>,
}

impl SetEntry {
    /// Finds the combination for `slot`/`main_stat`, including the fixed slot.
    pub fn combo(&self, slot: &str, main_stat: &str) -> Option<&ArtifactCombo> {
        if let Some(combo) = self.slots.get(slot).and_then(|by_main| by_main.get(main_stat)) {
            return Some(combo);
        }
        self.fixed_slots
            .as_ref()
            .filter(|fixed| fixed.slot == slot && fixed.main_stat_label == main_stat)
            .map(|fixed| &fixed.combo)
    }
}

/// Global lists describing the dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub sets: Vec<String>,
    pub slots: Vec<String>,
    pub main_stats_by_slot: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub characters: Vec<String>,
    #[serde(default)]
    pub substats: Vec<String>,
}
