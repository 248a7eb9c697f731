use super::{symbol_of, tally_symbols, FrequencyModel};
use crate::error::CfResult;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Accumulates bigram counts from any number of reference sources.
///
/// Each line is counted on its own; a line break never contributes a bigram.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    model: FrequencyModel,
    lines: usize,
    sources: usize,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tallies one line. Embedded line breaks split it, so no bigram spans two lines.
    pub fn add_line(&mut self, line: &str) -> &mut Self {
        let mut segments = 0;
        for seg in line.split(['\n', '\r']).filter(|s| !s.is_empty()) {
            tally_symbols(seg.chars().map(symbol_of), self.model.counts_mut());
            segments += 1;
        }
        self.lines += segments.max(1);
        self
    }

    pub fn add_text(&mut self, text: &str) -> &mut Self {
        for line in text.lines() {
            self.add_line(line);
        }
        self.sources += 1;
        self
    }

    pub fn add_reader<R: BufRead>(&mut self, reader: R) -> CfResult<&mut Self> {
        for line in reader.lines() {
            self.add_line(&line?);
        }
        self.sources += 1;
        Ok(self)
    }

    pub fn add_file<P: AsRef<Path>>(&mut self, path: P) -> CfResult<&mut Self> {
        let path = path.as_ref();
        debug!("Reading reference text from {:?}", path);
        let file = File::open(path)?;
        self.add_reader(BufReader::new(file))
    }

    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn sources(&self) -> usize {
        self.sources
    }

    pub fn build(self) -> FrequencyModel {
        info!(
            "📚 Built bigram model: {} sources, {} lines, {} distinct bigrams, {} total",
            self.sources,
            self.lines,
            self.model.distinct(),
            self.model.total()
        );
        self.model
    }
}
