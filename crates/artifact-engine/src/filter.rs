//! Pure narrowing of character and substat lists.
//!
//! Both filters keep the original order, never fail, and are idempotent.

use artifact_model::{CharacterRole, CharacterWant, SubstatWant};

/// Threshold applied before the user picks one.
pub const DEFAULT_SUBSTAT_THRESHOLD: u32 = 3;

/// Threshold values offered by front ends.
pub const THRESHOLD_CHOICES: [u32; 5] = [1, 2, 3, 4, 5];

/// Threshold that lets every rank through.
pub const ALL_RANKS: u32 = u32::MAX;

/// Keeps only preferred wants when `preferred_only` is set.
pub fn filter_characters(list: &[CharacterWant], preferred_only: bool) -> Vec<&CharacterWant> {
    list.iter()
        .filter(|want| !preferred_only || want.preferred)
        .collect()
}

/// Keeps substats whose rank is at or below `threshold`.
///
/// Thresholds outside the rank range degrade naturally: `0` keeps nothing,
/// anything at or above the worst rank keeps everything.
pub fn filter_substats(list: &[SubstatWant], threshold: u32) -> Vec<&SubstatWant> {
    list.iter().filter(|want| want.rank <= threshold).collect()
}

/// Narrows a substat's attributions to the characters still visible.
///
/// With `preferred_only` unset every attribution is kept; otherwise only
/// pairs present in `visible` survive.
pub fn filter_char_roles<'a>(
    char_roles: &'a [CharacterRole],
    visible: &[&CharacterWant],
    preferred_only: bool,
) -> Vec<&'a CharacterRole> {
    char_roles
        .iter()
        .filter(|key| !preferred_only || visible.iter().any(|want| want.is(key)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn want(character: &str, preferred: bool) -> CharacterWant {
        CharacterWant {
            character: character.to_string(),
            role: "DPS".to_string(),
            set_rank: 1,
            preferred,
        }
    }

    fn substat(name: &str, rank: u32) -> SubstatWant {
        SubstatWant {
            substat: name.to_string(),
            rank,
            character_roles: Vec::new(),
        }
    }

    #[test]
    fn preferred_only_keeps_preferred_in_order() {
        let list = vec![want("A", true), want("B", false), want("C", true)];

        let filtered = filter_characters(&list, true);

        let names: Vec<&str> = filtered.iter().map(|w| w.character.as_str()).collect();
        assert_eq!(names, ["A", "C"]);
    }

    #[test]
    fn preferred_off_returns_everything() {
        let list = vec![want("A", true), want("B", false)];
        assert_eq!(filter_characters(&list, false).len(), 2);
        assert!(filter_characters(&[], true).is_empty());
    }

    #[test]
    fn threshold_excludes_worse_ranks() {
        let list = vec![substat("CRIT Rate", 1), substat("ATK%", 4), substat("EM", 3)];

        let names: Vec<&str> = filter_substats(&list, 3)
            .iter()
            .map(|s| s.substat.as_str())
            .collect();
        assert_eq!(names, ["CRIT Rate", "EM"]);
    }

    #[test]
    fn out_of_range_thresholds_degrade() {
        let list = vec![substat("CRIT Rate", 1), substat("ATK%", 5)];
        assert!(filter_substats(&list, 0).is_empty());
        assert_eq!(filter_substats(&list, 99).len(), 2);
        assert_eq!(filter_substats(&list, ALL_RANKS).len(), 2);
    }

    #[test]
    fn char_roles_follow_visible_characters() {
        let list = vec![want("A", true), want("B", false)];
        let visible = filter_characters(&list, true);
        let roles = vec![CharacterRole::new("A", "DPS"), CharacterRole::new("B", "DPS")];

        let kept = filter_char_roles(&roles, &visible, true);
        assert_eq!(kept, [&CharacterRole::new("A", "DPS")]);
        assert_eq!(filter_char_roles(&roles, &visible, false).len(), 2);
    }
}
