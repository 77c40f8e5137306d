use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use mmf_cli::types::{IntegrationResult, ModalityOutcome, ModalitySource};
use mmf_model::display_name;

pub fn print_summary(result: &IntegrationResult) {
    if result.dry_run {
        println!("Output: {} (dry run, nothing written)", result.output_dir.display());
    } else {
        println!("Output: {}", result.output_dir.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Modality"),
        header_cell("Role"),
        header_cell("Source"),
        header_cell("Rows In"),
        header_cell("Rows Out"),
        header_cell("Features"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);

    for outcome in &result.modalities {
        table.add_row(vec![
            Cell::new(display_name(&outcome.name))
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            role_cell(outcome),
            source_cell(&outcome.source),
            Cell::new(outcome.rows_in),
            Cell::new(outcome.rows_out),
            Cell::new(outcome.features),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(result.summary.total_samples).add_attribute(Attribute::Bold),
        Cell::new(result.summary.total_features).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    let malformed: Vec<_> = result
        .modalities
        .iter()
        .filter_map(|outcome| match &outcome.source {
            ModalitySource::Malformed { path, reason } => Some((outcome, path, reason)),
            _ => None,
        })
        .collect();
    if !malformed.is_empty() {
        eprintln!("Warnings:");
        for (outcome, path, reason) in malformed {
            eprintln!("- {} ({}): {reason}", outcome.name, path.display());
        }
    }

    if !result.artifacts.is_empty() {
        println!("Artifacts:");
        for path in &result.artifacts {
            println!("- {}", path.display());
        }
    }
    if !result.artifact_failures.is_empty() {
        eprintln!("Errors:");
        for failure in &result.artifact_failures {
            eprintln!("- {}", failure.error);
        }
    }
}

pub fn print_preview(result: &IntegrationResult, rows: usize) {
    println!();
    println!(
        "Shape: ({}, {})",
        result.fused.height(),
        result.fused.width()
    );
    println!("{}", result.fused.head(rows));
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn role_cell(outcome: &ModalityOutcome) -> Cell {
    if outcome.is_primary {
        Cell::new("primary").add_attribute(Attribute::Bold)
    } else {
        Cell::new("secondary")
    }
}

fn source_cell(source: &ModalitySource) -> Cell {
    match source {
        ModalitySource::Loaded { .. } => Cell::new(source.label()).fg(Color::Green),
        ModalitySource::Malformed { .. } => Cell::new(source.label()).fg(Color::Red),
        ModalitySource::Absent | ModalitySource::Empty { .. } => {
            Cell::new(source.label()).fg(Color::Yellow)
        }
    }
}
