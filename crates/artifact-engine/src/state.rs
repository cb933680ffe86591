//! Selection state and its single transition function.
//!
//! Every user interaction is a named [`Action`] dispatched through
//! [`SelectionState::apply`]. Transitions are synchronous and total: an
//! action that does not apply in the current state leaves it unchanged.
//!
//! Reset rules:
//! - switching view or set clears any focus,
//! - changing slot clears the main stat and the character+role focus,
//! - changing main stat clears the character+role focus,
//! - opening a main stat in Evaluate clears the substat focus.

use artifact_model::CharacterRole;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::filter::DEFAULT_SUBSTAT_THRESHOLD;
use crate::focus::SubstatFocus;

/// The two linked views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Pick a set, see which characters, slots and stats it serves.
    #[default]
    Browse,
    /// Pick one set + slot + main stat, see who wants it.
    Evaluate,
}

impl View {
    pub fn as_str(self) -> &'static str {
        match self {
            View::Browse => "browse",
            View::Evaluate => "evaluate",
        }
    }
}

/// The at-most-one active focus.
///
/// Browse uses [`Focus::Substat`]; Evaluate uses [`Focus::CharRole`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Focus {
    Substat(SubstatFocus),
    CharRole(CharacterRole),
}

/// Named transitions, one per user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum Action {
    SwitchView { view: View },
    SelectSet { set: String },
    SelectSlot { slot: String },
    SelectMainStat { main_stat: String },
    TogglePreferredOnly,
    SetSubstatThreshold { threshold: u32 },
    /// Toggles the substat focus on the clicked tag.
    ClickSubstatTag { tag: SubstatFocus },
    /// Toggles the character+role focus on the clicked chip.
    ClickCharacterChip { character_role: CharacterRole },
    /// Click inside the Browse breakdown but not on a substat tag.
    ClickBreakdownBackground,
    /// Click inside the Evaluate content but not on a character chip.
    ClickEvaluateBackground,
    /// Cross-navigation from a Browse main-stat link.
    OpenInEvaluate { slot: String, main_stat: String },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SwitchView { .. } => "switch_view",
            Action::SelectSet { .. } => "select_set",
            Action::SelectSlot { .. } => "select_slot",
            Action::SelectMainStat { .. } => "select_main_stat",
            Action::TogglePreferredOnly => "toggle_preferred_only",
            Action::SetSubstatThreshold { .. } => "set_substat_threshold",
            Action::ClickSubstatTag { .. } => "click_substat_tag",
            Action::ClickCharacterChip { .. } => "click_character_chip",
            Action::ClickBreakdownBackground => "click_breakdown_background",
            Action::ClickEvaluateBackground => "click_evaluate_background",
            Action::OpenInEvaluate { .. } => "open_in_evaluate",
        }
    }
}

/// Everything the user has selected, owned by the event loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    view: View,
    selected_set: Option<String>,
    selected_slot: Option<String>,
    selected_main_stat: Option<String>,
    preferred_only: bool,
    substat_threshold: u32,
    focus: Option<Focus>,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            view: View::default(),
            selected_set: None,
            selected_slot: None,
            selected_main_stat: None,
            preferred_only: false,
            substat_threshold: DEFAULT_SUBSTAT_THRESHOLD,
            focus: None,
        }
    }
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn selected_set(&self) -> Option<&str> {
        self.selected_set.as_deref()
    }

    pub fn selected_slot(&self) -> Option<&str> {
        self.selected_slot.as_deref()
    }

    pub fn selected_main_stat(&self) -> Option<&str> {
        self.selected_main_stat.as_deref()
    }

    pub fn preferred_only(&self) -> bool {
        self.preferred_only
    }

    pub fn substat_threshold(&self) -> u32 {
        self.substat_threshold
    }

    pub fn focus(&self) -> Option<&Focus> {
        self.focus.as_ref()
    }

    pub fn focused_substat(&self) -> Option<&SubstatFocus> {
        match &self.focus {
            Some(Focus::Substat(focus)) => Some(focus),
            _ => None,
        }
    }

    pub fn focused_char_role(&self) -> Option<&CharacterRole> {
        match &self.focus {
            Some(Focus::CharRole(focus)) => Some(focus),
            _ => None,
        }
    }

    /// Applies one transition and returns the resulting state.
    pub fn apply(&mut self, action: Action) -> &Self {
        debug!(action = action.name(), view = self.view.as_str(), "apply");

        match action {
            Action::SwitchView { view } => {
                self.view = view;
                self.focus = None;
            }
            Action::SelectSet { set } => {
                self.selected_set = non_empty(set);
                self.focus = None;
            }
            Action::SelectSlot { slot } => {
                self.selected_slot = non_empty(slot);
                self.selected_main_stat = None;
                self.clear_char_role_focus();
            }
            Action::SelectMainStat { main_stat } => {
                self.selected_main_stat = non_empty(main_stat);
                self.clear_char_role_focus();
            }
            Action::TogglePreferredOnly => {
                self.preferred_only = !self.preferred_only;
            }
            Action::SetSubstatThreshold { threshold } => {
                self.substat_threshold = threshold;
            }
            Action::ClickSubstatTag { tag } => {
                if self.view != View::Browse {
                    return self;
                }
                self.focus = if self.focused_substat() == Some(&tag) {
                    None
                } else {
                    Some(Focus::Substat(tag))
                };
            }
            Action::ClickCharacterChip { character_role } => {
                if self.view != View::Evaluate {
                    return self;
                }
                self.focus = if self.focused_char_role() == Some(&character_role) {
                    None
                } else {
                    Some(Focus::CharRole(character_role))
                };
            }
            Action::ClickBreakdownBackground => {
                self.clear_substat_focus();
            }
            Action::ClickEvaluateBackground => {
                self.clear_char_role_focus();
            }
            Action::OpenInEvaluate { slot, main_stat } => {
                self.view = View::Evaluate;
                self.selected_slot = non_empty(slot);
                self.selected_main_stat = non_empty(main_stat);
                self.clear_substat_focus();
            }
        }
        self
    }

    fn clear_substat_focus(&mut self) {
        if matches!(self.focus, Some(Focus::Substat(_))) {
            self.focus = None;
        }
    }

    fn clear_char_role_focus(&mut self) {
        if matches!(self.focus, Some(Focus::CharRole(_))) {
            self.focus = None;
        }
    }
}

/// Pure form of [`SelectionState::apply`].
pub fn reduce(mut state: SelectionState, action: Action) -> SelectionState {
    state.apply(action);
    state
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
