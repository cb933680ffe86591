pub mod filter;
pub mod focus;
pub mod projection;
pub mod state;

pub use filter::{
    ALL_RANKS, DEFAULT_SUBSTAT_THRESHOLD, THRESHOLD_CHOICES, filter_char_roles, filter_characters,
    filter_substats,
};
pub use focus::{
    HighlightSet, HighlightState, SubstatFocus, classify_group, classify_membership, classify_row,
    highlight_for_char_role, resolve_char_roles_for_substat, substat_wants_char_role,
};
pub use projection::{
    BREAKDOWN_SLOT_ORDER, BrowseProjection, BrowseView, CharacterChip, CharacterRow, ComboTables,
    EvaluateProjection, EvaluateView, FixedSlotCard, MAX_RANK_TIER, MAX_VISIBLE_CHIPS,
    MainStatItem, Placeholder, Projection, SlotCard, SubstatRow, SubstatTag, pluralize, project,
    project_browse, project_combo, project_evaluate, rank_tier,
};
pub use state::{Action, Focus, SelectionState, View, reduce};
