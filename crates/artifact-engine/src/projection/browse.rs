use std::cmp::Reverse;

use artifact_model::{ArtifactCombo, Dataset, MainStatBreakdown, SetEntry, SubstatWant};
use serde::Serialize;
use tracing::debug;

use crate::filter::{filter_characters, filter_substats};
use crate::focus::{
    HighlightSet, HighlightState, SubstatFocus, classify_group, classify_row,
    resolve_char_roles_for_substat,
};
use crate::state::SelectionState;

use super::{CharacterRow, pluralize, rank_tier};

/// Slots shown first in the breakdown, in this order.
pub const BREAKDOWN_SLOT_ORDER: [&str; 3] = ["Sands", "Goblet", "Circlet"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum BrowseView {
    /// No set selected yet.
    NoSet,
    Ready(BrowseProjection),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrowseProjection {
    pub set: String,
    pub count: usize,
    pub count_label: &'static str,
    pub characters: Vec<CharacterRow>,
    pub breakdown: Vec<SlotCard>,
    pub fixed_slot: Option<FixedSlotCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotCard {
    pub slot: String,
    pub main_stats: Vec<MainStatItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MainStatItem {
    pub main_stat: String,
    pub count: usize,
    pub count_label: &'static str,
    /// `count` relative to the busiest main stat of the same slot.
    pub bar_width_ratio: f64,
    pub substats: Vec<SubstatTag>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixedSlotCard {
    pub slot: String,
    pub main_stat_label: String,
    pub count: usize,
    pub count_label: &'static str,
    pub substats: Vec<SubstatTag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubstatTag {
    pub slot: String,
    pub main_stat: String,
    pub substat: String,
    pub rank: u32,
    pub rank_tier: u32,
    /// This tag is the active focus.
    pub focused: bool,
    pub highlight: HighlightState,
}

impl SubstatTag {
    /// Descriptor dispatched when this tag is clicked.
    pub fn descriptor(&self) -> SubstatFocus {
        SubstatFocus::new(&self.slot, &self.main_stat, &self.substat, self.rank)
    }
}

/// Context shared by every tag and row of one Browse render.
struct Highlighting<'a> {
    focus: Option<&'a SubstatFocus>,
    keys: HighlightSet,
}

impl Highlighting<'_> {
    fn active(&self) -> bool {
        self.focus.is_some()
    }
}

pub fn project_browse(dataset: &Dataset, state: &SelectionState) -> BrowseView {
    let Some(set_name) = state.selected_set() else {
        return BrowseView::NoSet;
    };
    let Some(entry) = dataset.set(set_name) else {
        debug!(set = set_name, "selected set not in dataset");
        return BrowseView::Ready(BrowseProjection {
            set: set_name.to_string(),
            count: 0,
            count_label: pluralize(0, "character", "characters"),
            characters: Vec::new(),
            breakdown: Vec::new(),
            fixed_slot: None,
        });
    };

    let focus = state.focused_substat();
    let highlighting = Highlighting {
        focus,
        keys: focus
            .map(|focus| resolve_char_roles_for_substat(entry, focus))
            .unwrap_or_default(),
    };

    let characters: Vec<CharacterRow> = filter_characters(&entry.characters, state.preferred_only())
        .into_iter()
        .map(|want| {
            CharacterRow::new(
                want,
                classify_row(&want.key(), &highlighting.keys, highlighting.active()),
            )
        })
        .collect();

    let breakdown = ordered_slots(entry)
        .into_iter()
        .map(|(slot, by_main)| SlotCard {
            slot: slot.to_string(),
            main_stats: main_stat_items(slot, by_main, state, &highlighting),
        })
        .collect();

    let fixed_slot = entry.fixed_slots.as_ref().map(|fixed| {
        let count = filter_characters(&fixed.combo.characters, state.preferred_only()).len();
        FixedSlotCard {
            slot: fixed.slot.clone(),
            main_stat_label: fixed.main_stat_label.clone(),
            count,
            count_label: pluralize(count, "char", "chars"),
            substats: substat_tags(
                &fixed.slot,
                &fixed.main_stat_label,
                &fixed.combo,
                state,
                &highlighting,
            ),
        }
    });

    BrowseView::Ready(BrowseProjection {
        set: set_name.to_string(),
        count: characters.len(),
        count_label: pluralize(characters.len(), "character", "characters"),
        characters,
        breakdown,
        fixed_slot,
    })
}

/// Slots of `entry` in breakdown order: the fixed order first, then any
/// remaining slots by name.
fn ordered_slots(entry: &SetEntry) -> Vec<(&str, &MainStatBreakdown)> {
    let mut ordered: Vec<(&str, &MainStatBreakdown)> = BREAKDOWN_SLOT_ORDER
        .iter()
        .filter_map(|slot| {
            entry
                .slots
                .get_key_value(*slot)
                .map(|(name, by_main)| (name.as_str(), by_main))
        })
        .collect();
    ordered.extend(
        entry
            .slots
            .iter()
            .filter(|(name, _)| !BREAKDOWN_SLOT_ORDER.contains(&name.as_str()))
            .map(|(name, by_main)| (name.as_str(), by_main)),
    );
    ordered
}

fn main_stat_items(
    slot: &str,
    by_main: &MainStatBreakdown,
    state: &SelectionState,
    highlighting: &Highlighting<'_>,
) -> Vec<MainStatItem> {
    let mut counted: Vec<(&str, &ArtifactCombo, usize)> = by_main
        .iter()
        .map(|(main_stat, combo)| {
            let count = filter_characters(&combo.characters, state.preferred_only()).len();
            (main_stat.as_str(), combo, count)
        })
        .filter(|(_, _, count)| *count > 0)
        .collect();
    counted.sort_by_key(|(_, _, count)| Reverse(*count));

    let max_count = counted.first().map_or(0, |(_, _, count)| *count);

    counted
        .into_iter()
        .map(|(main_stat, combo, count)| MainStatItem {
            main_stat: main_stat.to_string(),
            count,
            count_label: pluralize(count, "char", "chars"),
            bar_width_ratio: count as f64 / max_count as f64,
            substats: substat_tags(slot, main_stat, combo, state, highlighting),
        })
        .collect()
}

fn substat_tags(
    slot: &str,
    main_stat: &str,
    combo: &ArtifactCombo,
    state: &SelectionState,
    highlighting: &Highlighting<'_>,
) -> Vec<SubstatTag> {
    filter_substats(&combo.substats, state.substat_threshold())
        .into_iter()
        .map(|want| substat_tag(slot, main_stat, want, highlighting))
        .collect()
}

fn substat_tag(
    slot: &str,
    main_stat: &str,
    want: &SubstatWant,
    highlighting: &Highlighting<'_>,
) -> SubstatTag {
    SubstatTag {
        slot: slot.to_string(),
        main_stat: main_stat.to_string(),
        substat: want.substat.clone(),
        rank: want.rank,
        rank_tier: rank_tier(want.rank),
        focused: highlighting
            .focus
            .is_some_and(|focus| focus.is_tag(slot, main_stat, want)),
        highlight: classify_group(
            &want.character_roles,
            &highlighting.keys,
            highlighting.active(),
        ),
    }
}
