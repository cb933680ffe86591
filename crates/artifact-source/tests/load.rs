//! Integration tests for dataset loading from disk.

use std::fs;
use std::path::PathBuf;

use artifact_source::{DataLocation, SourceError, load_dataset, parse_dataset};

const MINIMAL: &str = r#"{
  "meta": {"sets": ["Gladiator's Finale"], "slots": ["Sands"], "mainStatsBySlot": {"Sands": ["ATK%"]}},
  "bySet": {
    "Gladiator's Finale": {
      "characters": [{"character": "Xiao", "role": "DPS", "setRank": 2, "preferred": true}],
      "slots": {
        "Sands": {
          "ATK%": {
            "characters": [{"character": "Xiao", "role": "DPS", "setRank": 2, "preferred": true}],
            "substats": [{"substat": "CRIT Rate", "rank": 1, "characterRoles": [{"character": "Xiao", "role": "DPS"}]}]
          }
        }
      }
    }
  },
  "byArtifact": {
    "Gladiator's Finale|Sands|ATK%": {
      "characters": [{"character": "Xiao", "role": "DPS", "setRank": 2, "preferred": true}],
      "substats": [{"substat": "CRIT Rate", "rank": 1, "characterRoles": [{"character": "Xiao", "role": "DPS"}]}]
    }
  }
}"#;

fn unique_temp_dir(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "artifact-source-{}-{}-{}",
        name,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn loads_dataset_from_file() {
    let dir = unique_temp_dir("load");
    let path = dir.join("artifact_data.json");
    fs::write(&path, MINIMAL).unwrap();

    let dataset = load_dataset(&DataLocation::File(path)).expect("load dataset");

    assert_eq!(dataset.set_names(), ["Gladiator's Finale"]);
    assert!(
        dataset
            .combo_by_wire_key("Gladiator's Finale|Sands|ATK%")
            .is_some()
    );
}

#[test]
fn missing_file_is_a_load_failure() {
    let dir = unique_temp_dir("missing");
    let error = load_dataset(&DataLocation::File(dir.join("nope.json"))).expect_err("no file");
    assert!(matches!(error, SourceError::FileRead { .. }));
}

#[test]
fn wrong_shape_is_a_parse_failure() {
    let error = parse_dataset(br#"{"meta": []}"#, "inline").expect_err("bad shape");
    assert!(matches!(error, SourceError::Parse { .. }));

    let error = parse_dataset(b"not json", "inline").expect_err("not json");
    assert!(matches!(error, SourceError::Parse { .. }));
}

#[test]
fn schema_violation_is_an_invalid_failure() {
    let json = MINIMAL.replace("\"rank\": 1", "\"rank\": 0");
    let error = parse_dataset(json.as_bytes(), "inline").expect_err("zero rank");
    assert!(matches!(error, SourceError::Invalid { .. }));
}
