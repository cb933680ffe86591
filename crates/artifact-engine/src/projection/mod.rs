//! Render-ready projections of the dataset under the current selection.
//!
//! A projection is recomputed from scratch after every transition. It is
//! fully resolved: filtering and highlighting are already applied, so a
//! front end only turns it into output and never re-derives either.

mod browse;
mod evaluate;

use artifact_model::{CharacterWant, Dataset};
use serde::Serialize;

use crate::focus::HighlightState;
use crate::state::{SelectionState, View};

pub use browse::{
    BREAKDOWN_SLOT_ORDER, BrowseProjection, BrowseView, FixedSlotCard, MainStatItem, SlotCard,
    SubstatTag, project_browse,
};
pub use evaluate::{
    CharacterChip, ComboTables, EvaluateProjection, EvaluateView, MAX_VISIBLE_CHIPS, SubstatRow,
    project_combo, project_evaluate,
};

/// Highest rank with its own badge style; worse ranks share it.
pub const MAX_RANK_TIER: u32 = 5;

/// Projection for whichever view is active.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "view")]
pub enum Projection {
    Browse(BrowseView),
    Evaluate(EvaluateView),
}

/// Projects the active view.
pub fn project(dataset: &Dataset, state: &SelectionState) -> Projection {
    match state.view() {
        View::Browse => Projection::Browse(project_browse(dataset, state)),
        View::Evaluate => Projection::Evaluate(project_evaluate(dataset, state)),
    }
}

/// One row of a character table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterRow {
    pub character: String,
    pub role: String,
    pub set_rank: u32,
    pub rank_tier: u32,
    pub preferred: bool,
    pub highlight: HighlightState,
}

impl CharacterRow {
    fn new(want: &CharacterWant, highlight: HighlightState) -> Self {
        Self {
            character: want.character.clone(),
            role: want.role.clone(),
            set_rank: want.set_rank,
            rank_tier: rank_tier(want.set_rank),
            preferred: want.preferred,
            highlight,
        }
    }
}

/// Message shown in place of an empty table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placeholder {
    NoCharactersWantCombination,
    NoCharactersMatchFilters,
    NoSubstatsMatchThreshold,
}

impl Placeholder {
    pub fn message(self) -> &'static str {
        match self {
            Placeholder::NoCharactersWantCombination => "No characters want this combination",
            Placeholder::NoCharactersMatchFilters => "No characters match filters",
            Placeholder::NoSubstatsMatchThreshold => "No substats match threshold",
        }
    }
}

/// Badge tier for a rank, capped at [`MAX_RANK_TIER`].
pub fn rank_tier(rank: u32) -> u32 {
    rank.min(MAX_RANK_TIER)
}

/// `singular` for exactly one, `plural` otherwise.
pub fn pluralize(count: usize, singular: &'static str, plural: &'static str) -> &'static str {
    if count == 1 { singular } else { plural }
}
