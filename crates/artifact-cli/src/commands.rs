use std::fs::File;
use std::io::{self, BufReader};

use anyhow::{Context, Result};
use artifact_cli::render::{
    OutputFormat, combo_text, render_json, render_projection, report_text, sets_table,
};
use artifact_cli::session::{
    SessionOutcome, parse_character_role, parse_substat_focus, parse_threshold, run_session,
};
use artifact_engine::{
    Action, ComboTables, SelectionState, View, filter_characters, pluralize, project,
    project_combo,
};
use artifact_model::{Dataset, SlotKey};
use serde::Serialize;
use tracing::{info, info_span, warn};

use crate::cli::{BrowseArgs, EvaluateArgs, FilterArgs, MainStatArgs, SessionArgs};

#[derive(Serialize)]
struct SetSummary<'a> {
    set: &'a str,
    characters: usize,
    preferred: usize,
}

pub fn run_sets(dataset: &Dataset, format: OutputFormat) -> Result<()> {
    let summaries: Vec<SetSummary<'_>> = dataset
        .set_names()
        .iter()
        .map(|name| {
            let characters = dataset
                .set(name)
                .map(|entry| entry.characters.as_slice())
                .unwrap_or_default();
            SetSummary {
                set: name,
                characters: characters.len(),
                preferred: filter_characters(characters, true).len(),
            }
        })
        .collect();

    match format {
        OutputFormat::Json => println!("{}", render_json(&summaries)?),
        OutputFormat::Table => {
            let rows: Vec<(&str, usize, usize)> = summaries
                .iter()
                .map(|summary| (summary.set, summary.characters, summary.preferred))
                .collect();
            println!("{}", sets_table(&rows));
        }
    }
    Ok(())
}

pub fn run_browse(dataset: &Dataset, args: &BrowseArgs, format: OutputFormat) -> Result<()> {
    let mut actions = vec![Action::SelectSet {
        set: args.set.clone(),
    }];
    actions.extend(filter_actions(&args.filters));
    if let Some(focus) = &args.focus {
        actions.push(Action::ClickSubstatTag {
            tag: parse_substat_focus(focus)?,
        });
    }

    let state = dispatch_all(actions);
    println!("{}", render_projection(&project(dataset, &state), format)?);
    Ok(())
}

pub fn run_evaluate(dataset: &Dataset, args: &EvaluateArgs, format: OutputFormat) -> Result<()> {
    let mut actions = vec![
        Action::SwitchView {
            view: View::Evaluate,
        },
        Action::SelectSet {
            set: args.set.clone(),
        },
        Action::SelectSlot {
            slot: args.slot.clone(),
        },
        Action::SelectMainStat {
            main_stat: args.main_stat.clone(),
        },
    ];
    actions.extend(filter_actions(&args.filters));
    if let Some(focus) = &args.focus {
        actions.push(Action::ClickCharacterChip {
            character_role: parse_character_role(focus)?,
        });
    }

    let state = dispatch_all(actions);
    println!("{}", render_projection(&project(dataset, &state), format)?);
    Ok(())
}

pub fn run_session_command(
    dataset: &Dataset,
    args: &SessionArgs,
    format: OutputFormat,
) -> Result<SessionOutcome> {
    let span = info_span!("session");
    let _guard = span.enter();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let outcome = match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("open session script {}", path.display()))?;
            run_session(dataset, BufReader::new(file), &mut out, format)?
        }
        None => run_session(dataset, io::stdin().lock(), &mut out, format)?,
    };

    info!(
        applied = outcome.applied,
        skipped = outcome.skipped,
        "session finished"
    );
    Ok(outcome)
}

/// Prints the integrity report; returns whether the dataset is clean.
pub fn run_check(dataset: &Dataset, format: OutputFormat) -> Result<bool> {
    let report = dataset.check();
    for issue in &report.issues {
        warn!(
            kind = issue.kind.as_str(),
            location = %issue.location,
            character_role = %issue.character_role,
            "integrity issue"
        );
    }

    match format {
        OutputFormat::Json => println!("{}", render_json(&report)?),
        OutputFormat::Table => println!("{}", report_text(&report)),
    }
    Ok(report.is_clean())
}

pub fn run_main_stat(dataset: &Dataset, args: &MainStatArgs, format: OutputFormat) -> Result<()> {
    if !dataset.has_main_stat_index() {
        warn!("dataset has no byMainStat index");
    }
    let key = SlotKey::new(&args.slot, &args.main_stat);
    let state = dispatch_all(filter_actions(&args.filters));
    let tables = match dataset.combo_by_main_stat(&key) {
        Some(combo) => project_combo(combo, &state),
        None => ComboTables::missing(),
    };

    match format {
        OutputFormat::Json => println!("{}", render_json(&tables)?),
        OutputFormat::Table => {
            let count = tables.characters.len();
            let title = format!(
                "{} / {}: {count} {} across all sets",
                key.slot,
                key.main_stat,
                pluralize(count, "character", "characters")
            );
            println!("{}", combo_text(&title, &tables));
        }
    }
    Ok(())
}

fn filter_actions(filters: &FilterArgs) -> Vec<Action> {
    let mut actions = vec![Action::SetSubstatThreshold {
        threshold: parse_threshold(&filters.threshold),
    }];
    if filters.preferred_only {
        actions.push(Action::TogglePreferredOnly);
    }
    actions
}

fn dispatch_all(actions: Vec<Action>) -> SelectionState {
    let mut state = SelectionState::new();
    for action in actions {
        state.apply(action);
    }
    state
}
