use super::{symbol_char, FrequencyModel, BLANK_SYMBOL};
use crate::error::{CfResult, CipherForgeError};
use crate::key::letter_index;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info};

/// On-disk token for the blank symbol.
pub const BLANK_TOKEN: &str = "_";

#[derive(Debug, Serialize, Deserialize)]
struct BigramRow {
    first: String,
    second: String,
    count: u64,
}

fn token_for(symbol: usize) -> String {
    if symbol == BLANK_SYMBOL {
        BLANK_TOKEN.to_string()
    } else {
        symbol_char(symbol).to_string()
    }
}

fn parse_token(token: &str, row: usize) -> CfResult<usize> {
    let token = token.trim();
    if token == BLANK_TOKEN {
        return Ok(BLANK_SYMBOL);
    }
    let mut chars = token.chars();
    match (chars.next().and_then(letter_index), chars.next()) {
        (Some(idx), None) => Ok(idx),
        _ => Err(CipherForgeError::Validation(format!(
            "Row {}: unknown bigram symbol '{}'",
            row, token
        ))),
    }
}

pub fn save_model<W: Write>(model: &FrequencyModel, writer: W) -> CfResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (first, second, count) in model.iter_nonzero() {
        wtr.serialize(BigramRow {
            first: token_for(first),
            second: token_for(second),
            count,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn save_model_to_path<P: AsRef<Path>>(model: &FrequencyModel, path: P) -> CfResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    save_model(model, File::create(path)?)?;
    info!("💾 Saved bigram model to {:?}", path);
    Ok(())
}

/// Reads a model written by [`save_model`]. Repeated rows accumulate.
pub fn load_model<R: Read>(reader: R) -> CfResult<FrequencyModel> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut model = FrequencyModel::default();
    let mut rows = 0;

    for (i, result) in rdr.deserialize::<BigramRow>().enumerate() {
        let row = result?;
        let first = parse_token(&row.first, i + 1)?;
        let second = parse_token(&row.second, i + 1)?;
        model.add(first, second, row.count);
        rows += 1;
    }

    debug!("Loaded {} bigram rows", rows);
    Ok(model)
}

pub fn load_model_from_path<P: AsRef<Path>>(path: P) -> CfResult<FrequencyModel> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let model = load_model(file)?;
    info!(
        "📂 Loaded bigram model from {:?} ({} distinct, {} total)",
        path,
        model.distinct(),
        model.total()
    );
    Ok(model)
}
