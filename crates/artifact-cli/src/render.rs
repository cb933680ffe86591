//! Terminal and JSON rendering of projections and reports.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use artifact_engine::{
    BrowseProjection, BrowseView, CharacterRow, ComboTables, EvaluateProjection, EvaluateView,
    HighlightState, MainStatItem, Placeholder, Projection, SubstatRow, SubstatTag,
};
use artifact_model::IntegrityReport;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

/// Width of a full bar in the breakdown table.
const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Renders `value` as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("serialize output")
}

/// Renders a projection in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_projection(projection: &Projection, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(projection),
        OutputFormat::Table => Ok(match projection {
            Projection::Browse(BrowseView::NoSet) => "Select a set to browse.".to_string(),
            Projection::Browse(BrowseView::Ready(browse)) => browse_text(browse),
            Projection::Evaluate(EvaluateView::Incomplete) => {
                "Select a set, slot and main stat to evaluate.".to_string()
            }
            Projection::Evaluate(EvaluateView::Ready(evaluate)) => evaluate_text(evaluate),
        }),
    }
}

fn browse_text(browse: &BrowseProjection) -> String {
    let mut out = format!("{}: {} {}\n", browse.set, browse.count, browse.count_label);
    if !browse.characters.is_empty() {
        let _ = writeln!(out, "{}", character_table(&browse.characters));
    }
    for card in &browse.breakdown {
        let _ = writeln!(out, "\n{}", card.slot);
        let _ = writeln!(out, "{}", main_stat_table(&card.main_stats));
    }
    if let Some(fixed) = &browse.fixed_slot {
        let _ = writeln!(
            out,
            "\n{} ({}): {} {}",
            fixed.slot, fixed.main_stat_label, fixed.count, fixed.count_label
        );
        let _ = writeln!(out, "{}", tag_list(&fixed.substats));
    }
    out.trim_end().to_string()
}

fn evaluate_text(evaluate: &EvaluateProjection) -> String {
    let key = &evaluate.key;
    let mut out = format!(
        "{} / {} / {}: {} {}\n",
        key.set, key.slot, key.main_stat, evaluate.verdict, evaluate.verdict_label
    );
    match evaluate.characters_placeholder {
        Some(placeholder) => {
            let _ = writeln!(out, "{}", placeholder_text(placeholder));
        }
        None => {
            let _ = writeln!(out, "{}", character_table(&evaluate.characters));
        }
    }
    if let Some(placeholder) = evaluate.substats_placeholder {
        let _ = writeln!(out, "{}", placeholder_text(placeholder));
    } else if !evaluate.substats.is_empty() {
        let _ = writeln!(out, "{}", substat_table(&evaluate.substats));
    }
    out.trim_end().to_string()
}

fn character_table(rows: &[CharacterRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Character"),
        header_cell("Role"),
        header_cell("Rank"),
        header_cell("Preferred"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for row in rows {
        table.add_row(vec![
            styled_cell(&row.character, row.highlight),
            styled_cell(&row.role, row.highlight),
            styled_cell(format!("#{}", row.set_rank), row.highlight),
            if row.preferred {
                Cell::new("✓").fg(Color::Green)
            } else {
                dim_cell("-")
            },
        ]);
    }
    table
}

fn main_stat_table(items: &[MainStatItem]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Main stat"),
        header_cell("Wanted by"),
        header_cell(""),
        header_cell("Substats"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for item in items {
        table.add_row(vec![
            Cell::new(&item.main_stat).add_attribute(Attribute::Bold),
            Cell::new(format!("{} {}", item.count, item.count_label)),
            Cell::new(bar(item.bar_width_ratio)).fg(Color::Blue),
            Cell::new(tag_list(&item.substats)),
        ]);
    }
    table
}

fn substat_table(rows: &[SubstatRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Substat"),
        header_cell("Rank"),
        header_cell("Characters"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for row in rows {
        let mut chips: Vec<String> = row
            .chips
            .iter()
            .map(|chip| {
                let label = format!("{} ({})", chip.character, chip.role);
                if chip.focused { format!("[{label}]") } else { label }
            })
            .collect();
        if row.overflow > 0 {
            chips.push(format!("+{} more", row.overflow));
        }
        table.add_row(vec![
            styled_cell(&row.substat, row.highlight),
            styled_cell(format!("#{}", row.rank), row.highlight),
            styled_cell(chips.join(", "), row.highlight),
        ]);
    }
    table
}

/// Renders the integrity report as a counts table plus an issue table.
pub fn report_text(report: &IntegrityReport) -> String {
    let counts = &report.counts;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Item"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (label, value) in [
        ("Sets", counts.sets),
        ("Slots", counts.slots),
        ("Combinations", counts.combos),
        ("Character roles", counts.character_roles),
        ("Substats", counts.substats),
    ] {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    let mut out = format!("{table}\n");

    if report.is_clean() {
        out.push_str("No integrity issues found.\n");
    } else {
        let mut issues = Table::new();
        issues.set_header(vec![
            header_cell("Issue"),
            header_cell("Location"),
            header_cell("Character role"),
        ]);
        apply_table_style(&mut issues);
        for issue in &report.issues {
            issues.add_row(vec![
                Cell::new(issue.kind.as_str()).fg(Color::Yellow),
                Cell::new(&issue.location),
                Cell::new(issue.character_role.to_string()),
            ]);
        }
        let _ = writeln!(out, "{issues}");
    }

    for (label, rare) in [
        ("Rare substats", &report.rare_substats),
        ("Rare main stats", &report.rare_main_stats),
    ] {
        if rare.is_empty() {
            continue;
        }
        let names: Vec<String> = rare
            .iter()
            .map(|(name, count)| format!("{name} ({count})"))
            .collect();
        let _ = writeln!(out, "{label}: {}", names.join(", "));
    }
    out.trim_end().to_string()
}

/// One row per set with its character counts.
pub fn sets_table(rows: &[(&str, usize, usize)]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Set"),
        header_cell("Characters"),
        header_cell("Preferred"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for (set, characters, preferred) in rows {
        table.add_row(vec![
            Cell::new(*set).fg(Color::Blue).add_attribute(Attribute::Bold),
            Cell::new(characters),
            count_cell(*preferred),
        ]);
    }
    table
}

/// Character and substat tables for a combination outside any projection.
pub fn combo_text(title: &str, tables: &ComboTables) -> String {
    let mut out = format!("{title}\n");
    match tables.characters_placeholder {
        Some(placeholder) => {
            let _ = writeln!(out, "{}", placeholder_text(placeholder));
        }
        None => {
            let _ = writeln!(out, "{}", character_table(&tables.characters));
        }
    }
    match tables.substats_placeholder {
        Some(placeholder) => {
            let _ = writeln!(out, "{}", placeholder_text(placeholder));
        }
        None if !tables.substats.is_empty() => {
            let _ = writeln!(out, "{}", substat_table(&tables.substats));
        }
        None => {}
    }
    out.trim_end().to_string()
}

fn tag_list(tags: &[SubstatTag]) -> String {
    let labels: Vec<String> = tags.iter().map(tag_label).collect();
    labels.join(", ")
}

/// `[..]` marks the focused tag, `*` a related one, `(..)` an unrelated one.
fn tag_label(tag: &SubstatTag) -> String {
    let label = format!("{} #{}", tag.substat, tag.rank);
    if tag.focused {
        return format!("[{label}]");
    }
    match tag.highlight {
        HighlightState::Neutral => label,
        HighlightState::Highlighted => format!("{label}*"),
        HighlightState::Dimmed => format!("({label})"),
    }
}

fn bar(ratio: f64) -> String {
    let filled = (ratio.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled.max(1))
}

fn placeholder_text(placeholder: Placeholder) -> String {
    format!("({})", placeholder.message())
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn styled_cell<T: ToString>(value: T, highlight: HighlightState) -> Cell {
    match highlight {
        HighlightState::Neutral => Cell::new(value),
        HighlightState::Highlighted => Cell::new(value)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        HighlightState::Dimmed => dim_cell(value),
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
