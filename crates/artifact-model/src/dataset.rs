//! The loaded, validated dataset.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entities::{ArtifactCombo, CharacterWant, Meta, SetEntry, SubstatWant};
use crate::error::{ModelError, Result};
use crate::ids::{ArtifactKey, SlotKey};

/// The dataset document exactly as it appears on the wire.
///
/// Composite keys are still pipe-joined strings here; [`Dataset::from_wire`]
/// parses them into structured keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireDataset {
    pub meta: Meta,
    pub by_set: BTreeMap<String, SetEntry>,
    pub by_artifact: BTreeMap<String, ArtifactCombo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_main_stat: Option<BTreeMap<String, ArtifactCombo>>,
}

/// Immutable relational dataset, indexed by set and by exact combination.
#[derive(Debug, Clone)]
pub struct Dataset {
    meta: Meta,
    by_set: BTreeMap<String, SetEntry>,
    by_artifact: BTreeMap<ArtifactKey, ArtifactCombo>,
    by_main_stat: BTreeMap<SlotKey, ArtifactCombo>,
}

impl Dataset {
    /// Validates a wire document and builds the structured indexes.
    ///
    /// # Errors
    ///
    /// Returns the first schema violation found: a composite key that does
    /// not parse, a rank below 1, an empty name, or a `mainStatsBySlot` entry
    /// for a slot missing from `meta.slots`.
    pub fn from_wire(wire: WireDataset) -> Result<Self> {
        validate_meta(&wire.meta)?;

        for (set_name, entry) in &wire.by_set {
            non_empty("set name", set_name, "bySet")?;
            validate_characters(&entry.characters, &format!("bySet[{set_name}]"))?;
            for (slot, by_main) in &entry.slots {
                for (main_stat, combo) in by_main {
                    validate_combo(combo, &format!("bySet[{set_name}].slots[{slot}][{main_stat}]"))?;
                }
            }
            if let Some(fixed) = &entry.fixed_slots {
                validate_combo(&fixed.combo, &format!("bySet[{set_name}].fixedSlots"))?;
            }
        }

        let mut by_artifact = BTreeMap::new();
        for (raw_key, combo) in wire.by_artifact {
            let key: ArtifactKey = raw_key.parse()?;
            validate_combo(&combo, &format!("byArtifact[{raw_key}]"))?;
            by_artifact.insert(key, combo);
        }

        let mut by_main_stat = BTreeMap::new();
        for (raw_key, combo) in wire.by_main_stat.unwrap_or_default() {
            let key: SlotKey = raw_key.parse()?;
            validate_combo(&combo, &format!("byMainStat[{raw_key}]"))?;
            by_main_stat.insert(key, combo);
        }

        debug!(
            sets = wire.by_set.len(),
            combos = by_artifact.len(),
            main_stat_combos = by_main_stat.len(),
            "dataset validated"
        );

        Ok(Self {
            meta: wire.meta,
            by_set: wire.by_set,
            by_artifact,
            by_main_stat,
        })
    }

    /// Renders the dataset back to its wire form.
    pub fn to_wire(&self) -> WireDataset {
        WireDataset {
            meta: self.meta.clone(),
            by_set: self.by_set.clone(),
            by_artifact: self
                .by_artifact
                .iter()
                .map(|(key, combo)| (key.to_wire(), combo.clone()))
                .collect(),
            by_main_stat: if self.by_main_stat.is_empty() {
                None
            } else {
                Some(
                    self.by_main_stat
                        .iter()
                        .map(|(key, combo)| (key.to_string(), combo.clone()))
                        .collect(),
                )
            },
        }
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    pub fn set_names(&self) -> &[String] {
        &self.meta.sets
    }

    pub fn slot_names(&self) -> &[String] {
        &self.meta.slots
    }

    /// Main stats available for `slot`; empty for an unknown slot.
    pub fn main_stats_for(&self, slot: &str) -> &[String] {
        self.meta
            .main_stats_by_slot
            .get(slot)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn set(&self, name: &str) -> Option<&SetEntry> {
        self.by_set.get(name)
    }

    pub fn sets(&self) -> impl Iterator<Item = (&str, &SetEntry)> {
        self.by_set.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn combo(&self, key: &ArtifactKey) -> Option<&ArtifactCombo> {
        self.by_artifact.get(key)
    }

    pub fn combos(&self) -> impl Iterator<Item = (&ArtifactKey, &ArtifactCombo)> {
        self.by_artifact.iter()
    }

    /// Looks up the `byArtifact` index by its pipe-joined wire key.
    ///
    /// A key that does not parse is treated like a missing one.
    pub fn combo_by_wire_key(&self, raw_key: &str) -> Option<&ArtifactCombo> {
        raw_key
            .parse::<ArtifactKey>()
            .ok()
            .and_then(|key| self.by_artifact.get(&key))
    }

    pub fn combo_by_main_stat(&self, key: &SlotKey) -> Option<&ArtifactCombo> {
        self.by_main_stat.get(key)
    }

    pub fn main_stat_combos(&self) -> impl Iterator<Item = (&SlotKey, &ArtifactCombo)> {
        self.by_main_stat.iter()
    }

    pub fn has_main_stat_index(&self) -> bool {
        !self.by_main_stat.is_empty()
    }
}

fn validate_meta(meta: &Meta) -> Result<()> {
    for set in &meta.sets {
        non_empty("set name", set, "meta.sets")?;
    }
    for slot in &meta.slots {
        non_empty("slot name", slot, "meta.slots")?;
    }
    for (slot, main_stats) in &meta.main_stats_by_slot {
        if !meta.slots.iter().any(|known| known == slot) {
            return Err(ModelError::UnknownSlot(slot.clone()));
        }
        for main_stat in main_stats {
            non_empty("main stat", main_stat, &format!("meta.mainStatsBySlot[{slot}]"))?;
        }
    }
    Ok(())
}

fn validate_combo(combo: &ArtifactCombo, context: &str) -> Result<()> {
    validate_characters(&combo.characters, context)?;
    validate_substats(&combo.substats, context)
}

fn validate_characters(characters: &[CharacterWant], context: &str) -> Result<()> {
    for want in characters {
        non_empty("character", &want.character, context)?;
        non_empty("role", &want.role, context)?;
        if want.set_rank == 0 {
            return Err(ModelError::InvalidRank {
                context: format!("{context} setRank of {}", want.key()),
                rank: want.set_rank,
            });
        }
    }
    Ok(())
}

fn validate_substats(substats: &[SubstatWant], context: &str) -> Result<()> {
    for want in substats {
        non_empty("substat", &want.substat, context)?;
        if want.rank == 0 {
            return Err(ModelError::InvalidRank {
                context: format!("{context} substat {}", want.substat),
                rank: want.rank,
            });
        }
    }
    Ok(())
}

fn non_empty(field: &'static str, value: &str, context: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ModelError::EmptyField {
            field,
            context: context.to_string(),
        });
    }
    Ok(())
}
