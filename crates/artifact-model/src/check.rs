//! Dataset integrity checks.
//!
//! Within a combination, every wanted character+role should be attributed to
//! at least one substat, and every substat attribution should point at a
//! character listed by that same combination.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::Dataset;
use crate::entities::ArtifactCombo;
use crate::ids::CharacterRole;

/// Values used by this many combinations or fewer are reported as suspicious.
pub const LOW_FREQUENCY_THRESHOLD: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrityIssueKind {
    /// A wanted character+role appears in no substat of its combination.
    CharacterWithoutSubstats,
    /// A substat names a character+role its combination does not list.
    DanglingSubstatReference,
}

impl IntegrityIssueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CharacterWithoutSubstats => "character_without_substats",
            Self::DanglingSubstatReference => "dangling_substat_reference",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrityIssue {
    pub kind: IntegrityIssueKind,
    /// Where the combination lives, e.g. `byArtifact[set|slot|main]`.
    pub location: String,
    pub character_role: CharacterRole,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetCounts {
    pub sets: usize,
    pub slots: usize,
    pub combos: usize,
    pub character_roles: usize,
    pub substats: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
    pub counts: DatasetCounts,
    pub issues: Vec<IntegrityIssue>,
    /// Substat names used by few combinations (possible typos).
    pub rare_substats: BTreeMap<String, usize>,
    /// Main stat names used by few combinations (possible typos).
    pub rare_main_stats: BTreeMap<String, usize>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issue_count(&self, kind: IntegrityIssueKind) -> usize {
        self.issues.iter().filter(|issue| issue.kind == kind).count()
    }
}

impl Dataset {
    /// Checks the combination-level invariants across both indexes.
    pub fn check(&self) -> IntegrityReport {
        let mut report = IntegrityReport::default();
        let mut character_roles = BTreeSet::new();
        let mut substat_names = BTreeSet::new();
        let mut substat_usage: BTreeMap<String, usize> = BTreeMap::new();
        let mut main_stat_usage: BTreeMap<String, usize> = BTreeMap::new();

        for (key, combo) in self.combos() {
            check_combo(combo, &format!("byArtifact[{key}]"), &mut report.issues);
            *main_stat_usage.entry(key.main_stat.clone()).or_default() += 1;
            for want in &combo.characters {
                character_roles.insert(want.key());
            }
            let distinct: BTreeSet<&str> =
                combo.substats.iter().map(|s| s.substat.as_str()).collect();
            for substat in distinct {
                substat_names.insert(substat.to_string());
                *substat_usage.entry(substat.to_string()).or_default() += 1;
            }
        }

        for (set_name, entry) in self.sets() {
            for (slot, by_main) in &entry.slots {
                for (main_stat, combo) in by_main {
                    check_combo(
                        combo,
                        &format!("bySet[{set_name}].slots[{slot}][{main_stat}]"),
                        &mut report.issues,
                    );
                }
            }
        }

        report.counts = DatasetCounts {
            sets: self.set_names().len(),
            slots: self.slot_names().len(),
            combos: self.combos().count(),
            character_roles: character_roles.len(),
            substats: substat_names.len(),
        };
        report.rare_substats = rare(substat_usage);
        report.rare_main_stats = rare(main_stat_usage);
        report
    }
}

fn check_combo(combo: &ArtifactCombo, location: &str, issues: &mut Vec<IntegrityIssue>) {
    let attributed: BTreeSet<&CharacterRole> = combo
        .substats
        .iter()
        .flat_map(|s| s.character_roles.iter())
        .collect();

    for want in &combo.characters {
        let key = want.key();
        if !attributed.contains(&key) {
            issues.push(IntegrityIssue {
                kind: IntegrityIssueKind::CharacterWithoutSubstats,
                location: location.to_string(),
                character_role: key,
            });
        }
    }

    for key in attributed {
        if !combo.characters.iter().any(|want| want.is(key)) {
            issues.push(IntegrityIssue {
                kind: IntegrityIssueKind::DanglingSubstatReference,
                location: location.to_string(),
                character_role: key.clone(),
            });
        }
    }
}

fn rare(usage: BTreeMap<String, usize>) -> BTreeMap<String, usize> {
    usage
        .into_iter()
        .filter(|(_, count)| *count <= LOW_FREQUENCY_THRESHOLD)
        .collect()
}
