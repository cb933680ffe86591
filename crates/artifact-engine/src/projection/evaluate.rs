use artifact_model::{
    ArtifactCombo, ArtifactKey, CharacterRole, CharacterWant, Dataset, SubstatWant,
};
use serde::Serialize;
use tracing::debug;

use crate::filter::{filter_char_roles, filter_characters, filter_substats};
use crate::focus::{
    HighlightState, classify_membership, classify_row, highlight_for_char_role,
    substat_wants_char_role,
};
use crate::state::SelectionState;

use super::{CharacterRow, Placeholder, pluralize, rank_tier};

/// Chips drawn per substat row before the rest collapse into an overflow count.
pub const MAX_VISIBLE_CHIPS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum EvaluateView {
    /// Set, slot or main stat still missing.
    Incomplete,
    Ready(EvaluateProjection),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluateProjection {
    pub key: ArtifactKey,
    /// Number of characters wanting the combination after filtering.
    pub verdict: usize,
    pub verdict_label: &'static str,
    pub characters: Vec<CharacterRow>,
    pub characters_placeholder: Option<Placeholder>,
    pub substats: Vec<SubstatRow>,
    pub substats_placeholder: Option<Placeholder>,
}

impl EvaluateProjection {
    fn from_tables(key: ArtifactKey, tables: ComboTables) -> Self {
        let ComboTables {
            characters,
            characters_placeholder,
            substats,
            substats_placeholder,
        } = tables;
        Self {
            key,
            verdict: characters.len(),
            verdict_label: pluralize(characters.len(), "character", "characters"),
            characters,
            characters_placeholder,
            substats,
            substats_placeholder,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubstatRow {
    pub substat: String,
    pub rank: u32,
    pub rank_tier: u32,
    pub chips: Vec<CharacterChip>,
    /// Chips beyond [`MAX_VISIBLE_CHIPS`].
    pub overflow: usize,
    pub highlight: HighlightState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterChip {
    pub character: String,
    pub role: String,
    pub focused: bool,
}

impl CharacterChip {
    /// Identity dispatched when this chip is clicked.
    pub fn character_role(&self) -> CharacterRole {
        CharacterRole::new(&self.character, &self.role)
    }
}

pub fn project_evaluate(dataset: &Dataset, state: &SelectionState) -> EvaluateView {
    let (Some(set), Some(slot), Some(main_stat)) = (
        state.selected_set(),
        state.selected_slot(),
        state.selected_main_stat(),
    ) else {
        return EvaluateView::Incomplete;
    };
    let key = ArtifactKey::new(set, slot, main_stat);

    let tables = match dataset.combo(&key) {
        Some(combo) => project_combo(combo, state),
        None => {
            debug!(key = %key, "no combo for selection");
            ComboTables::missing()
        }
    };
    EvaluateView::Ready(EvaluateProjection::from_tables(key, tables))
}

/// Character and substat tables for one combination under the current
/// filters and character+role focus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComboTables {
    pub characters: Vec<CharacterRow>,
    pub characters_placeholder: Option<Placeholder>,
    pub substats: Vec<SubstatRow>,
    pub substats_placeholder: Option<Placeholder>,
}

impl ComboTables {
    /// Empty-state tables for a combination absent from the dataset.
    pub fn missing() -> Self {
        Self {
            characters: Vec::new(),
            characters_placeholder: Some(Placeholder::NoCharactersWantCombination),
            substats: Vec::new(),
            substats_placeholder: None,
        }
    }
}

pub fn project_combo(combo: &ArtifactCombo, state: &SelectionState) -> ComboTables {
    let focused = state.focused_char_role();
    let highlight = highlight_for_char_role(focused);
    let has_focus = focused.is_some();

    let visible = filter_characters(&combo.characters, state.preferred_only());
    let characters: Vec<CharacterRow> = visible
        .iter()
        .map(|want| CharacterRow::new(want, classify_row(&want.key(), &highlight, has_focus)))
        .collect();

    let passing = filter_substats(&combo.substats, state.substat_threshold());
    let substats_placeholder = passing
        .is_empty()
        .then_some(Placeholder::NoSubstatsMatchThreshold);
    let substats = passing
        .into_iter()
        .filter_map(|want| substat_row(want, &visible, state.preferred_only(), focused))
        .collect();

    ComboTables {
        characters_placeholder: characters
            .is_empty()
            .then_some(Placeholder::NoCharactersMatchFilters),
        characters,
        substats,
        substats_placeholder,
    }
}

/// Builds one substat row, or `None` when every chip filters away.
fn substat_row(
    want: &SubstatWant,
    visible: &[&CharacterWant],
    preferred_only: bool,
    focused: Option<&CharacterRole>,
) -> Option<SubstatRow> {
    let char_roles = filter_char_roles(&want.character_roles, visible, preferred_only);
    if char_roles.is_empty() {
        return None;
    }

    let overflow = char_roles.len().saturating_sub(MAX_VISIBLE_CHIPS);
    let chips = char_roles
        .into_iter()
        .take(MAX_VISIBLE_CHIPS)
        .map(|key| CharacterChip {
            character: key.character.clone(),
            role: key.role.clone(),
            focused: focused == Some(key),
        })
        .collect();

    Some(SubstatRow {
        substat: want.substat.clone(),
        rank: want.rank,
        rank_tier: rank_tier(want.rank),
        chips,
        overflow,
        highlight: classify_membership(
            focused.is_some_and(|key| substat_wants_char_role(want, key)),
            focused.is_some(),
        ),
    })
}
