//! Property tests for the filters and the reducer.

use artifact_engine::{
    Action, SelectionState, SubstatFocus, View, filter_characters, filter_substats, reduce,
};
use artifact_model::{CharacterRole, CharacterWant, SubstatWant};
use proptest::prelude::*;

fn arb_character_want() -> impl Strategy<Value = CharacterWant> {
    ("[A-E]", "(DPS|Support)", 1u32..=5, any::<bool>()).prop_map(
        |(character, role, set_rank, preferred)| CharacterWant {
            character,
            role,
            set_rank,
            preferred,
        },
    )
}

fn arb_substat_want() -> impl Strategy<Value = SubstatWant> {
    ("(CRIT Rate|CRIT DMG|ATK%|HP%)", 1u32..=5).prop_map(|(substat, rank)| SubstatWant {
        substat,
        rank,
        character_roles: Vec::new(),
    })
}

fn arb_substat_focus() -> impl Strategy<Value = SubstatFocus> {
    ("(Sands|Goblet|Circlet)", "[a-z]{1,6}", "[a-z]{1,6}", 1u32..=5).prop_map(
        |(slot, main_stat, substat, rank)| SubstatFocus::new(slot, main_stat, substat, rank),
    )
}

fn arb_character_role() -> impl Strategy<Value = CharacterRole> {
    ("[A-E]", "(DPS|Support)").prop_map(|(character, role)| CharacterRole::new(character, role))
}

/// Actions that never change the view.
fn arb_selection_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        "[a-z]{0,4}".prop_map(|set| Action::SelectSet { set }),
        "[a-z]{0,4}".prop_map(|slot| Action::SelectSlot { slot }),
        "[a-z]{0,4}".prop_map(|main_stat| Action::SelectMainStat { main_stat }),
        Just(Action::TogglePreferredOnly),
        (0u32..=6).prop_map(|threshold| Action::SetSubstatThreshold { threshold }),
        arb_substat_focus().prop_map(|tag| Action::ClickSubstatTag { tag }),
        arb_character_role().prop_map(|character_role| Action::ClickCharacterChip { character_role }),
        Just(Action::ClickBreakdownBackground),
        Just(Action::ClickEvaluateBackground),
    ]
}

fn arb_state() -> impl Strategy<Value = SelectionState> {
    (
        prop::bool::ANY,
        prop::collection::vec(arb_selection_action(), 0..8),
    )
        .prop_map(|(evaluate, actions)| {
            let view = if evaluate { View::Evaluate } else { View::Browse };
            actions.into_iter().fold(
                reduce(SelectionState::new(), Action::SwitchView { view }),
                reduce,
            )
        })
}

proptest! {
    #[test]
    fn filter_characters_is_idempotent(
        list in prop::collection::vec(arb_character_want(), 0..12),
        preferred_only in any::<bool>(),
    ) {
        let once: Vec<CharacterWant> = filter_characters(&list, preferred_only)
            .into_iter()
            .cloned()
            .collect();
        let twice: Vec<CharacterWant> = filter_characters(&once, preferred_only)
            .into_iter()
            .cloned()
            .collect();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn filter_characters_keeps_order(list in prop::collection::vec(arb_character_want(), 0..12)) {
        let filtered = filter_characters(&list, true);
        let expected: Vec<&CharacterWant> = list.iter().filter(|want| want.preferred).collect();
        prop_assert_eq!(filtered, expected);
        prop_assert_eq!(filter_characters(&list, false).len(), list.len());
    }

    #[test]
    fn filter_substats_is_idempotent(
        list in prop::collection::vec(arb_substat_want(), 0..12),
        threshold in 0u32..=7,
    ) {
        let once: Vec<SubstatWant> = filter_substats(&list, threshold)
            .into_iter()
            .cloned()
            .collect();
        let twice: Vec<SubstatWant> = filter_substats(&once, threshold)
            .into_iter()
            .cloned()
            .collect();
        prop_assert!(once.iter().all(|want| want.rank <= threshold));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn substat_focus_round_trips(state in arb_state(), tag in arb_substat_focus()) {
        prop_assume!(state.view() == View::Browse);
        prop_assume!(state.focused_substat() != Some(&tag));

        let after = reduce(
            reduce(state, Action::ClickSubstatTag { tag: tag.clone() }),
            Action::ClickSubstatTag { tag },
        );
        prop_assert!(after.focus().is_none());
    }

    #[test]
    fn char_role_focus_round_trips(state in arb_state(), chip in arb_character_role()) {
        prop_assume!(state.view() == View::Evaluate);
        prop_assume!(state.focused_char_role() != Some(&chip));

        let after = reduce(
            reduce(state, Action::ClickCharacterChip { character_role: chip.clone() }),
            Action::ClickCharacterChip { character_role: chip },
        );
        prop_assert!(after.focus().is_none());
    }

    #[test]
    fn switching_view_always_clears_focus(state in arb_state(), evaluate in any::<bool>()) {
        let view = if evaluate { View::Evaluate } else { View::Browse };
        let after = reduce(state, Action::SwitchView { view });
        prop_assert!(after.focus().is_none());
        prop_assert_eq!(after.view(), view);
    }

    #[test]
    fn selecting_slot_never_touches_set(state in arb_state(), slot in "[a-z]{1,6}") {
        let set = state.selected_set().map(str::to_string);
        let after = reduce(state, Action::SelectSlot { slot });
        prop_assert_eq!(after.selected_set().map(str::to_string), set);
        prop_assert_eq!(after.selected_main_stat(), None);
        prop_assert!(after.focused_char_role().is_none());
    }

    #[test]
    fn focus_only_matches_active_view(state in arb_state()) {
        match state.view() {
            View::Browse => prop_assert!(state.focused_char_role().is_none()),
            View::Evaluate => prop_assert!(state.focused_substat().is_none()),
        }
    }
}
