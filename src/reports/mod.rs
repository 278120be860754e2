use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;
use std::path::Path;
use tileswap::geometry::TileLayout;
use tileswap::optimizer::{SearchOutcome, StepReport};
use tileswap::scorer::SeamDetails;

/// Everything the CLI keeps about one solved bundle.
pub struct FileReport {
    pub name: String,
    pub outcome: SearchOutcome,
    pub trace: Vec<StepReport>,
}

#[derive(Serialize)]
struct TraceRow<'a> {
    file: &'a str,
    step: usize,
    a: i64,
    b: i64,
    applied: bool,
    score: u64,
    improved: bool,
}

fn format_swaps(swaps: &[i64]) -> String {
    swaps
        .chunks(2)
        .map(|p| match p {
            [a, b] => format!("{}-{}", a, b),
            [a] => a.to_string(),
            _ => String::new(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn print_solve_report(results: &[FileReport]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("File").add_attribute(Attribute::Bold),
        Cell::new("Steps").fg(Color::Cyan),
        Cell::new("Evaluated"),
        Cell::new("Best Score").fg(Color::Green),
        Cell::new("Selected Swaps"),
    ]);

    for i in 1..=3 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for r in results {
        let score = r
            .outcome
            .best_score
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(&r.name).add_attribute(Attribute::Bold),
            Cell::new(r.outcome.best_step).fg(Color::Cyan),
            Cell::new(r.outcome.steps_evaluated),
            Cell::new(score).fg(Color::Green),
            Cell::new(format_swaps(&r.outcome.best_swaps)),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_seam_report(name: &str, layout: &TileLayout, details: &SeamDetails) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Image").add_attribute(Attribute::Bold),
        Cell::new("Size"),
        Cell::new("Grid"),
        Cell::new("Vertical"),
        Cell::new("Horizontal"),
        Cell::new("Total").fg(Color::Cyan),
        Cell::new("Mean Diff"),
    ]);

    table.add_row(vec![
        Cell::new(name).add_attribute(Attribute::Bold),
        Cell::new(format!("{}x{}", layout.width, layout.height)),
        Cell::new(format!("{0}x{0}", layout.tile_count)),
        Cell::new(details.vertical),
        Cell::new(details.horizontal),
        Cell::new(details.total).fg(Color::Cyan),
        Cell::new(format!("{:.2}", details.mean_channel_diff())),
    ]);
    println!("\n{}", table);
}

pub fn write_trace_csv(path: &Path, results: &[FileReport]) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in results {
        for s in &r.trace {
            wtr.serialize(TraceRow {
                file: &r.name,
                step: s.step,
                a: s.pair.0,
                b: s.pair.1,
                applied: s.applied,
                score: s.score,
                improved: s.improved,
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}
