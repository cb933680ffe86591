//! Cross-highlighting between substats and character+role pairs.
//!
//! A single three-way rule, [`classify_row`], decides how every character
//! row, substat tag and substat row is highlighted. The resolvers here only
//! compute the inputs to that rule; none of them touch the dataset.

use std::collections::BTreeSet;

use artifact_model::{CharacterRole, SetEntry, SubstatWant};
use serde::{Deserialize, Serialize};

/// Identity keys relying on the focused entity.
pub type HighlightSet = BTreeSet<CharacterRole>;

/// A substat tag in the Browse breakdown: one substat at one rank under one
/// slot and main stat.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubstatFocus {
    pub slot: String,
    pub main_stat: String,
    pub substat: String,
    pub rank: u32,
}

impl SubstatFocus {
    pub fn new(
        slot: impl Into<String>,
        main_stat: impl Into<String>,
        substat: impl Into<String>,
        rank: u32,
    ) -> Self {
        Self {
            slot: slot.into(),
            main_stat: main_stat.into(),
            substat: substat.into(),
            rank,
        }
    }

    /// Exact match on all four fields.
    pub fn is_tag(&self, slot: &str, main_stat: &str, substat: &SubstatWant) -> bool {
        self.slot == slot
            && self.main_stat == main_stat
            && self.substat == substat.substat
            && self.rank == substat.rank
    }
}

/// How a row, tag or chip is drawn relative to the active focus.
///
/// Ordered so that the strongest state of a group wins with `max`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum HighlightState {
    /// No focus is active.
    #[default]
    Neutral,
    /// A focus is active and this entity is unrelated to it.
    Dimmed,
    /// A focus is active and this entity is related to it.
    Highlighted,
}

/// Character+role pairs attributed to the focused substat within `set`.
///
/// A descriptor that no longer matches anything (stale slot, main stat,
/// substat or rank) resolves to an empty set.
pub fn resolve_char_roles_for_substat(set: &SetEntry, focus: &SubstatFocus) -> HighlightSet {
    set.combo(&focus.slot, &focus.main_stat)
        .and_then(|combo| combo.find_substat(&focus.substat, focus.rank))
        .map(|want| want.character_roles.iter().cloned().collect())
        .unwrap_or_default()
}

/// The single highlighting rule, for an entity whose relation to the focus
/// is already known.
pub fn classify_membership(is_related: bool, has_active_focus: bool) -> HighlightState {
    match (has_active_focus, is_related) {
        (false, _) => HighlightState::Neutral,
        (true, true) => HighlightState::Highlighted,
        (true, false) => HighlightState::Dimmed,
    }
}

/// Classifies a row identified by `key` against the highlight set.
pub fn classify_row(
    key: &CharacterRole,
    highlight: &HighlightSet,
    has_active_focus: bool,
) -> HighlightState {
    classify_membership(highlight.contains(key), has_active_focus)
}

/// Classifies an entity standing for several identity keys, such as a
/// substat tag: highlighted when any of its keys is.
pub fn classify_group<'a, I>(
    keys: I,
    highlight: &HighlightSet,
    has_active_focus: bool,
) -> HighlightState
where
    I: IntoIterator<Item = &'a CharacterRole>,
{
    if !has_active_focus {
        return HighlightState::Neutral;
    }
    keys.into_iter()
        .map(|key| classify_row(key, highlight, has_active_focus))
        .max()
        .unwrap_or(HighlightState::Dimmed)
}

/// Whether `substat` is valued by the focused character+role.
pub fn substat_wants_char_role(substat: &SubstatWant, focused: &CharacterRole) -> bool {
    substat.is_wanted_by(focused)
}

/// Highlight set for a focused character+role: just that pair.
pub fn highlight_for_char_role(focused: Option<&CharacterRole>) -> HighlightSet {
    focused.into_iter().cloned().collect()
}
