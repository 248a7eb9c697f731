use cipherforge::cipher::KeyAccuracy;
use cipherforge::error::CfResult;
use cipherforge::key::{index_letter, Key, ALPHABET_LEN};
use cipherforge::model::FrequencyModel;
use cipherforge::optimizer::RunOutcome;
use cipherforge::scorer::ScoreDetails;
use cipherforge::stats::ScoreSummary;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

fn right_align(table: &mut Table, columns: std::ops::RangeInclusive<usize>) {
    for i in columns {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn ensure_parent(path: &Path) -> CfResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Plain alphabet over its image under `key`.
pub fn print_key_grid(name: &str, key: &Key) {
    println!("\nKey: {}", name);
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    let plain: Vec<Cell> = (0..ALPHABET_LEN)
        .map(|i| Cell::new(index_letter(i)).set_alignment(CellAlignment::Center))
        .collect();
    let mapped: Vec<Cell> = (0..ALPHABET_LEN)
        .map(|i| {
            let c = index_letter(key.map_index(i));
            let cell = Cell::new(c).set_alignment(CellAlignment::Center);
            if key.map_index(i) == i {
                cell.fg(Color::DarkGrey)
            } else {
                cell.add_attribute(Attribute::Bold)
            }
        })
        .collect();

    table.add_row(plain);
    table.add_row(mapped);
    println!("{}", table);
}

pub fn print_chain_report(outcome: &RunOutcome) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Rank").add_attribute(Attribute::Bold),
        Cell::new("Chain"),
        Cell::new("Final").fg(Color::Cyan),
        Cell::new("Initial"),
        Cell::new("Best").fg(Color::Green),
        Cell::new("Accept%"),
        Cell::new("Key").add_attribute(Attribute::Bold),
    ]);
    right_align(&mut table, 1..=5);

    for (rank, r) in outcome.results.iter().enumerate() {
        let rank_cell = if rank == 0 {
            Cell::new(rank + 1)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(rank + 1)
        };
        table.add_row(vec![
            rank_cell,
            Cell::new(r.chain),
            Cell::new(format!("{:.2}", r.score)).fg(Color::Cyan),
            Cell::new(format!("{:.2}", r.initial_score)),
            Cell::new(format!("{:.2}", r.best_score)).fg(Color::Green),
            Cell::new(format!("{:.1}", r.acceptance_rate() * 100.0)),
            Cell::new(r.key.to_string()),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_summary(summary: &ScoreSummary) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    table.add_row(vec![
        Cell::new("Final Scores").add_attribute(Attribute::Bold),
        Cell::new("Value"),
    ]);
    right_align(&mut table, 1..=1);

    let rows = [
        ("Chains", summary.count as f64),
        ("Mean", summary.mean),
        ("Median", summary.median),
        ("Std Dev", summary.stdev),
        ("Min", summary.min),
        ("Max", summary.max),
    ];
    for (label, value) in rows {
        let text = if label == "Chains" {
            format!("{}", value as usize)
        } else {
            format!("{:.3}", value)
        };
        table.add_row(vec![Cell::new(label), Cell::new(text)]);
    }
    println!("\n{}", table);
}

pub fn print_key_accuracy(accuracy: &KeyAccuracy) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    let plain: String = (0..ALPHABET_LEN).map(index_letter).collect();
    let recovered: Vec<Cell> = plain
        .chars()
        .zip(accuracy.guess.chars())
        .map(|(want, got)| {
            let cell = Cell::new(got).set_alignment(CellAlignment::Center);
            if want == got {
                cell.fg(Color::Green)
            } else {
                cell.fg(Color::Red)
            }
        })
        .collect();

    table.add_row(
        plain
            .chars()
            .map(|c| Cell::new(c).set_alignment(CellAlignment::Center))
            .collect::<Vec<_>>(),
    );
    table.add_row(recovered);
    println!("\n{}", table);
    println!(
        "Key Accuracy: {}/{} ({:.1}%)",
        accuracy.correct,
        ALPHABET_LEN,
        accuracy.fraction * 100.0
    );
}

pub fn print_score_details(name: &str, d: &ScoreDetails) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Key").add_attribute(Attribute::Bold),
        Cell::new("LogLik").fg(Color::Cyan),
        Cell::new("Bigrams"),
        Cell::new("Known").fg(Color::Green),
        Cell::new("Unknown").fg(Color::Red),
        Cell::new("Distinct"),
        Cell::new("Cover%"),
    ]);
    right_align(&mut table, 1..=6);

    table.add_row(vec![
        Cell::new(name).add_attribute(Attribute::Bold),
        Cell::new(format!("{:.3}", d.log_likelihood)).fg(Color::Cyan),
        Cell::new(d.total_bigrams),
        Cell::new(d.known_bigrams).fg(Color::Green),
        Cell::new(d.unknown_bigrams).fg(Color::Red),
        Cell::new(d.distinct_bigrams),
        Cell::new(format!("{:.1}", d.coverage() * 100.0)),
    ]);
    println!("\n{}", table);
}

pub fn print_model_report(model: &FrequencyModel, top: usize) {
    let total = model.total().max(1) as f64;

    let mut kinds = Table::new();
    kinds.load_preset(ASCII_FULL);
    kinds.add_row(vec![
        Cell::new("Bigram Kind").add_attribute(Attribute::Bold),
        Cell::new("Count"),
        Cell::new("Share%"),
    ]);
    right_align(&mut kinds, 1..=2);
    for (kind, count) in model.kind_totals() {
        kinds.add_row(vec![
            Cell::new(kind.to_string()),
            Cell::new(count),
            Cell::new(format!("{:.2}", count as f64 / total * 100.0)),
        ]);
    }
    println!("\n{}", kinds);

    if top == 0 {
        return;
    }

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.add_row(vec![
        Cell::new("Bigram").add_attribute(Attribute::Bold),
        Cell::new("Count"),
        Cell::new("Share%"),
    ]);
    right_align(&mut table, 1..=2);
    for (bigram, count) in model.top(top) {
        table.add_row(vec![
            Cell::new(format!("'{}'", bigram)),
            Cell::new(count),
            Cell::new(format!("{:.2}", count as f64 / total * 100.0)),
        ]);
    }
    println!("\n{}", table);
}

#[derive(Debug, Serialize)]
struct HistoryRow {
    chain: usize,
    iteration: usize,
    score: f64,
}

/// One row per recorded snapshot, grouped by chain.
pub fn write_history_csv<P: AsRef<Path>>(path: P, outcome: &RunOutcome) -> CfResult<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    let mut wtr = csv::Writer::from_path(path)?;
    for (chain, history) in outcome.histories() {
        for point in history {
            wtr.serialize(HistoryRow {
                chain,
                iteration: point.iteration,
                score: point.score,
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> CfResult<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)?;
    Ok(())
}
