//! Tests for artifact-model types.

use artifact_model::{
    ArtifactKey, CharacterRole, Dataset, IntegrityIssueKind, ModelError, SlotKey, WireDataset,
};

const FIXTURE: &str = r#"{
  "meta": {
    "sets": ["Noblesse Oblige", "Viridescent Venerer"],
    "slots": ["Circlet", "Goblet", "Sands"],
    "mainStatsBySlot": {
      "Sands": ["ATK%", "Energy Recharge"],
      "Goblet": ["Anemo DMG Bonus"],
      "Circlet": ["CRIT Rate"]
    },
    "characters": ["Bennett", "Sucrose", "Xiao"],
    "substats": ["CRIT Rate", "Energy Recharge", "HP%"]
  },
  "bySet": {
    "Noblesse Oblige": {
      "characters": [
        {"character": "Bennett", "role": "Support", "setRank": 1, "preferred": true}
      ],
      "slots": {
        "Sands": {
          "Energy Recharge": {
            "characters": [
              {"character": "Bennett", "role": "Support", "setRank": 1, "preferred": true}
            ],
            "substats": [
              {"substat": "HP%", "rank": 1, "characterRoles": [{"character": "Bennett", "role": "Support"}]}
            ]
          }
        }
      },
      "fixedSlots": {
        "slot": "Flower/Feather",
        "mainStatLabel": "Fixed Main Stats (HP / ATK)",
        "characters": [
          {"character": "Bennett", "role": "Support", "setRank": 1, "preferred": true}
        ],
        "substats": [
          {"substat": "Energy Recharge", "rank": 1, "characterRoles": [{"character": "Bennett", "role": "Support"}]}
        ]
      }
    },
    "Viridescent Venerer": {
      "characters": [
        {"character": "Sucrose", "role": "Support", "setRank": 1, "preferred": true}
      ],
      "slots": {}
    }
  },
  "byArtifact": {
    "Noblesse Oblige|Sands|Energy Recharge": {
      "characters": [
        {"character": "Bennett", "role": "Support", "setRank": 1, "preferred": true},
        {"character": "Xiao", "role": "DPS", "setRank": 4, "preferred": false}
      ],
      "substats": [
        {"substat": "HP%", "rank": 1, "characterRoles": [{"character": "Bennett", "role": "Support"}]},
        {"substat": "CRIT Rate", "rank": 2, "characterRoles": [{"character": "Sucrose", "role": "Support"}]}
      ]
    }
  },
  "byMainStat": {
    "Sands|Energy Recharge": {
      "characters": [
        {"character": "Bennett", "role": "Support", "setRank": 1, "preferred": true}
      ],
      "substats": []
    }
  }
}"#;

fn load(json: &str) -> Result<Dataset, ModelError> {
    let wire: WireDataset = serde_json::from_str(json).expect("parse fixture");
    Dataset::from_wire(wire)
}

#[test]
fn loads_all_three_indexes() {
    let dataset = load(FIXTURE).expect("valid dataset");

    assert_eq!(dataset.set_names().len(), 2);
    assert_eq!(dataset.main_stats_for("Sands"), ["ATK%", "Energy Recharge"]);
    assert!(dataset.main_stats_for("Flower").is_empty());

    let key = ArtifactKey::new("Noblesse Oblige", "Sands", "Energy Recharge");
    let combo = dataset.combo(&key).expect("combo present");
    assert_eq!(combo.characters.len(), 2);
    assert_eq!(
        dataset.combo_by_wire_key("Noblesse Oblige|Sands|Energy Recharge"),
        Some(combo)
    );

    let by_main = dataset
        .combo_by_main_stat(&SlotKey::new("Sands", "Energy Recharge"))
        .expect("cross-set combo");
    assert_eq!(by_main.characters[0].character, "Bennett");
}

#[test]
fn missing_keys_resolve_to_none() {
    let dataset = load(FIXTURE).expect("valid dataset");

    assert!(dataset.combo_by_wire_key("NoSuchSet|Sands|HP%").is_none());
    assert!(dataset.combo_by_wire_key("not a key").is_none());
    assert!(dataset.set("NoSuchSet").is_none());
}

#[test]
fn set_entry_resolves_fixed_slot() {
    let dataset = load(FIXTURE).expect("valid dataset");
    let entry = dataset.set("Noblesse Oblige").expect("set present");

    let fixed = entry
        .combo("Flower/Feather", "Fixed Main Stats (HP / ATK)")
        .expect("fixed slot combo");
    assert_eq!(fixed.substats[0].substat, "Energy Recharge");
    assert!(entry.combo("Flower/Feather", "HP").is_none());
    assert!(entry.combo("Sands", "Energy Recharge").is_some());
}

#[test]
fn malformed_artifact_key_is_rejected() {
    let json = FIXTURE.replace(
        "\"Noblesse Oblige|Sands|Energy Recharge\": {",
        "\"Noblesse Oblige|Sands\": {",
    );
    let error = load(&json).expect_err("invalid key");
    assert_eq!(
        error,
        ModelError::InvalidArtifactKey("Noblesse Oblige|Sands".to_string())
    );
}

#[test]
fn zero_rank_is_rejected() {
    let json = FIXTURE.replace("\"setRank\": 4", "\"setRank\": 0");
    let error = load(&json).expect_err("invalid rank");
    assert!(matches!(error, ModelError::InvalidRank { rank: 0, .. }));
}

#[test]
fn unknown_slot_in_main_stat_lists_is_rejected() {
    let json = FIXTURE.replace("\"Circlet\": [\"CRIT Rate\"]", "\"Flower\": [\"HP\"]");
    let error = load(&json).expect_err("unknown slot");
    assert_eq!(error, ModelError::UnknownSlot("Flower".to_string()));
}

#[test]
fn missing_required_section_fails_to_parse() {
    let result: Result<WireDataset, _> =
        serde_json::from_str(r#"{"meta": {"sets": [], "slots": [], "mainStatsBySlot": {}}}"#);
    assert!(result.is_err());
}

#[test]
fn wire_round_trip_preserves_pipe_keys() {
    let dataset = load(FIXTURE).expect("valid dataset");
    let wire = dataset.to_wire();
    assert!(
        wire.by_artifact
            .contains_key("Noblesse Oblige|Sands|Energy Recharge")
    );
    assert!(
        wire.by_main_stat
            .as_ref()
            .is_some_and(|index| index.contains_key("Sands|Energy Recharge"))
    );
}

#[test]
fn check_reports_invariant_violations() {
    let dataset = load(FIXTURE).expect("valid dataset");
    let report = dataset.check();

    assert!(!report.is_clean());
    assert_eq!(
        report.issue_count(IntegrityIssueKind::CharacterWithoutSubstats),
        1
    );
    assert_eq!(
        report.issue_count(IntegrityIssueKind::DanglingSubstatReference),
        1
    );
    let orphan = report
        .issues
        .iter()
        .find(|issue| issue.kind == IntegrityIssueKind::CharacterWithoutSubstats)
        .expect("orphan issue");
    assert_eq!(orphan.character_role, CharacterRole::new("Xiao", "DPS"));
    assert_eq!(
        orphan.location,
        "byArtifact[Noblesse Oblige|Sands|Energy Recharge]"
    );

    assert_eq!(report.counts.sets, 2);
    assert_eq!(report.counts.combos, 1);
    assert_eq!(report.counts.character_roles, 2);
    assert_eq!(report.counts.substats, 2);
    assert_eq!(report.rare_substats.get("HP%"), Some(&1));
    assert_eq!(report.rare_main_stats.get("Energy Recharge"), Some(&1));
}
