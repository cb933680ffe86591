//! Line-oriented input events and the session loop.
//!
//! Each non-blank line that does not start with `#` is one event:
//!
//! | Line | Action |
//! |---|---|
//! | `view browse\|evaluate` | `SwitchView` |
//! | `set [NAME]` | `SelectSet` (no name clears it) |
//! | `slot [NAME]` | `SelectSlot` |
//! | `main [NAME]` | `SelectMainStat` |
//! | `preferred` | `TogglePreferredOnly` |
//! | `threshold N` | `SetSubstatThreshold` |
//! | `tag SLOT\|MAIN\|SUBSTAT\|RANK` | `ClickSubstatTag` |
//! | `chip CHARACTER\|ROLE` | `ClickCharacterChip` |
//! | `click-breakdown` | `ClickBreakdownBackground` |
//! | `click-evaluate` | `ClickEvaluateBackground` |
//! | `open SLOT\|MAIN` | `OpenInEvaluate` |
//! | `show` | render the active view |
//! | `quit` | end the session |

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use artifact_engine::{ALL_RANKS, Action, SelectionState, SubstatFocus, View, project};
use artifact_model::{CharacterRole, Dataset, KEY_SEPARATOR};
use thiserror::Error;
use tracing::{debug, warn};

use crate::render::{OutputFormat, render_projection};

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Dispatch(Action),
    Show,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`")]
    Unknown(String),

    #[error("`{command}` expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("`{command}` expects {expected}, got `{value}`")]
    Malformed {
        command: &'static str,
        expected: &'static str,
        value: String,
    },
}

const TAG_SHAPE: &str = "SLOT|MAIN|SUBSTAT|RANK";
const CHIP_SHAPE: &str = "CHARACTER|ROLE";
const OPEN_SHAPE: &str = "SLOT|MAIN";

/// Parses one input line; blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> Result<Option<SessionCommand>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "view" => SessionCommand::Dispatch(Action::SwitchView {
            view: parse_view(rest)?,
        }),
        "set" => SessionCommand::Dispatch(Action::SelectSet {
            set: rest.to_string(),
        }),
        "slot" => SessionCommand::Dispatch(Action::SelectSlot {
            slot: rest.to_string(),
        }),
        "main" => SessionCommand::Dispatch(Action::SelectMainStat {
            main_stat: rest.to_string(),
        }),
        "preferred" => SessionCommand::Dispatch(Action::TogglePreferredOnly),
        "threshold" => {
            let value = required("threshold", "a number", rest)?;
            SessionCommand::Dispatch(Action::SetSubstatThreshold {
                threshold: parse_threshold(value),
            })
        }
        "tag" => SessionCommand::Dispatch(Action::ClickSubstatTag {
            tag: parse_substat_focus(required("tag", TAG_SHAPE, rest)?)?,
        }),
        "chip" => SessionCommand::Dispatch(Action::ClickCharacterChip {
            character_role: parse_character_role(required("chip", CHIP_SHAPE, rest)?)?,
        }),
        "click-breakdown" => SessionCommand::Dispatch(Action::ClickBreakdownBackground),
        "click-evaluate" => SessionCommand::Dispatch(Action::ClickEvaluateBackground),
        "open" => {
            let value = required("open", OPEN_SHAPE, rest)?;
            let (slot, main_stat) = split_pair(value).ok_or_else(|| CommandError::Malformed {
                command: "open",
                expected: OPEN_SHAPE,
                value: value.to_string(),
            })?;
            SessionCommand::Dispatch(Action::OpenInEvaluate {
                slot: slot.to_string(),
                main_stat: main_stat.to_string(),
            })
        }
        "show" => SessionCommand::Show,
        "quit" | "exit" => SessionCommand::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

/// Parses a threshold; anything that is not a number means "no filtering".
pub fn parse_threshold(value: &str) -> u32 {
    value.trim().parse().unwrap_or_else(|_| {
        debug!(value, "threshold not a number, showing all ranks");
        ALL_RANKS
    })
}

/// Parses `SLOT|MAIN|SUBSTAT|RANK`.
pub fn parse_substat_focus(value: &str) -> Result<SubstatFocus, CommandError> {
    let malformed = || CommandError::Malformed {
        command: "tag",
        expected: TAG_SHAPE,
        value: value.to_string(),
    };
    let parts: Vec<&str> = value.split(KEY_SEPARATOR).map(str::trim).collect();
    match parts.as_slice() {
        [slot, main_stat, substat, rank]
            if !slot.is_empty() && !main_stat.is_empty() && !substat.is_empty() =>
        {
            let rank = rank.parse().map_err(|_| malformed())?;
            Ok(SubstatFocus::new(*slot, *main_stat, *substat, rank))
        }
        _ => Err(malformed()),
    }
}

/// Parses `CHARACTER|ROLE`.
pub fn parse_character_role(value: &str) -> Result<CharacterRole, CommandError> {
    split_pair(value)
        .map(|(character, role)| CharacterRole::new(character, role))
        .ok_or_else(|| CommandError::Malformed {
            command: "chip",
            expected: CHIP_SHAPE,
            value: value.to_string(),
        })
}

fn parse_view(value: &str) -> Result<View, CommandError> {
    match value {
        "browse" => Ok(View::Browse),
        "evaluate" => Ok(View::Evaluate),
        "" => Err(CommandError::MissingArgument {
            command: "view",
            expected: "browse or evaluate",
        }),
        other => Err(CommandError::Malformed {
            command: "view",
            expected: "browse or evaluate",
            value: other.to_string(),
        }),
    }
}

fn required<'a>(
    command: &'static str,
    expected: &'static str,
    value: &'a str,
) -> Result<&'a str, CommandError> {
    if value.is_empty() {
        Err(CommandError::MissingArgument { command, expected })
    } else {
        Ok(value)
    }
}

fn split_pair(value: &str) -> Option<(&str, &str)> {
    let (left, right) = value.split_once(KEY_SEPARATOR)?;
    let (left, right) = (left.trim(), right.trim());
    if left.is_empty() || right.is_empty() || right.contains(KEY_SEPARATOR) {
        None
    } else {
        Some((left, right))
    }
}

/// What a session did before it ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    pub state: SelectionState,
    pub applied: usize,
    pub skipped: usize,
}

/// Runs events from `input` against `dataset`, writing every `show` to `out`.
///
/// Bad lines are logged and skipped; they never change the state. The loop
/// ends at end of input or on `quit`.
///
/// # Errors
///
/// Returns an error when reading input or writing output fails.
pub fn run_session<R, W>(
    dataset: &Dataset,
    input: R,
    out: &mut W,
    format: OutputFormat,
) -> Result<SessionOutcome>
where
    R: BufRead,
    W: Write,
{
    let mut state = SelectionState::new();
    let mut applied = 0;
    let mut skipped = 0;

    for (index, line) in input.lines().enumerate() {
        let line = line.context("read session input")?;
        let line_number = index + 1;
        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(SessionCommand::Dispatch(action))) => {
                state.apply(action);
                applied += 1;
            }
            Ok(Some(SessionCommand::Show)) => {
                let rendered = render_projection(&project(dataset, &state), format)?;
                writeln!(out, "{rendered}").context("write session output")?;
            }
            Ok(Some(SessionCommand::Quit)) => break,
            Err(error) => {
                warn!(line = line_number, %error, "skipping input");
                skipped += 1;
            }
        }
    }

    debug!(applied, skipped, "session ended");
    Ok(SessionOutcome {
        state,
        applied,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(line: &str) -> Action {
        match parse_command(line) {
            Ok(Some(SessionCommand::Dispatch(action))) => action,
            other => panic!("expected an action for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        assert_eq!(parse_command("   "), Ok(None));
        assert_eq!(parse_command("# set S"), Ok(None));
    }

    #[test]
    fn names_keep_inner_spaces() {
        assert_eq!(
            action("set   Noblesse Oblige "),
            Action::SelectSet {
                set: "Noblesse Oblige".to_string()
            }
        );
        assert_eq!(
            action("main CRIT DMG"),
            Action::SelectMainStat {
                main_stat: "CRIT DMG".to_string()
            }
        );
        assert_eq!(
            action("slot"),
            Action::SelectSlot {
                slot: String::new()
            }
        );
    }

    #[test]
    fn parses_composite_arguments() {
        assert_eq!(
            action("tag Sands|CRIT DMG|CRIT Rate|1"),
            Action::ClickSubstatTag {
                tag: SubstatFocus::new("Sands", "CRIT DMG", "CRIT Rate", 1)
            }
        );
        assert_eq!(
            action("chip Hu Tao|DPS"),
            Action::ClickCharacterChip {
                character_role: CharacterRole::new("Hu Tao", "DPS")
            }
        );
        assert_eq!(
            action("open Goblet|Pyro DMG Bonus"),
            Action::OpenInEvaluate {
                slot: "Goblet".to_string(),
                main_stat: "Pyro DMG Bonus".to_string()
            }
        );
    }

    #[test]
    fn unparseable_threshold_means_all_ranks() {
        assert_eq!(
            action("threshold 2"),
            Action::SetSubstatThreshold { threshold: 2 }
        );
        assert_eq!(
            action("threshold lots"),
            Action::SetSubstatThreshold {
                threshold: ALL_RANKS
            }
        );
    }

    #[test]
    fn rejects_malformed_lines() {
        assert_eq!(
            parse_command("dance"),
            Err(CommandError::Unknown("dance".to_string()))
        );
        assert!(matches!(
            parse_command("tag Sands|CRIT DMG|CRIT Rate|best"),
            Err(CommandError::Malformed { command: "tag", .. })
        ));
        assert!(matches!(
            parse_command("chip Hu Tao"),
            Err(CommandError::Malformed { command: "chip", .. })
        ));
        assert!(matches!(
            parse_command("open Sands|ATK%|extra"),
            Err(CommandError::Malformed { command: "open", .. })
        ));
        assert!(matches!(
            parse_command("view sideways"),
            Err(CommandError::Malformed { command: "view", .. })
        ));
        assert_eq!(
            parse_command("threshold"),
            Err(CommandError::MissingArgument {
                command: "threshold",
                expected: "a number"
            })
        );
    }

    #[test]
    fn show_and_quit() {
        assert_eq!(parse_command("show"), Ok(Some(SessionCommand::Show)));
        assert_eq!(parse_command("quit"), Ok(Some(SessionCommand::Quit)));
    }
}
