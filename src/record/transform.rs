use anyhow::{bail, Context, Result};
use std::{
    fs::File,
    io::{BufRead, BufReader},
};
use tracing::{debug, info, instrument, trace, warn};

use super::{
    output::OutputRecord,
    partition::{Destination, Partitioner},
    row::{Column, Header},
};
use crate::{address::AddressEncoder, config::TransformConfig};

/// Counters for one transform run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TransformStats {
    /// Physical lines read, blanks and header included.
    pub lines: u64,
    /// Data rows dropped for having no id.
    pub skipped: u64,
    pub live: u64,
    pub history: u64,
}

impl TransformStats {
    pub fn written(&self) -> u64 {
        self.live + self.history
    }
}

/// Transform the CSV at `config.input` into per-record JSON files under
/// `config.output_dir`.
#[instrument(level = "info", skip(config, encoder), fields(input = %config.input.display()))]
pub fn transform_file(
    config: &TransformConfig,
    encoder: &dyn AddressEncoder,
) -> Result<TransformStats> {
    if !config.input.exists() {
        bail!("CSV not found: {}", config.input.display());
    }

    let partitioner = Partitioner::new(&config.output_dir)?;
    let file = File::open(&config.input)
        .with_context(|| format!("Failed to open CSV file: {:?}", config.input))?;

    let stats = transform_reader(
        BufReader::new(file),
        &partitioner,
        encoder,
        &config.address_prefix,
    )?;
    info!(
        lines = stats.lines,
        skipped = stats.skipped,
        live = stats.live,
        history = stats.history,
        "transform complete"
    );
    Ok(stats)
}

/// Stream `reader` line by line: the first non-blank line is the header,
/// every later non-blank line becomes at most one output file.
pub fn transform_reader<R: BufRead>(
    reader: R,
    partitioner: &Partitioner,
    encoder: &dyn AddressEncoder,
    prefix: &str,
) -> Result<TransformStats> {
    let mut stats = TransformStats::default();
    let mut lines = reader.lines();

    let header = loop {
        let Some(line) = lines.next() else {
            warn!("input has no header row");
            return Ok(stats);
        };
        stats.lines += 1;
        let line = line.with_context(|| format!("reading line {}", stats.lines))?;
        let line = line.trim_end();
        if !line.is_empty() {
            break Header::parse(line);
        }
    };
    let missing = header.missing_columns();
    if !missing.is_empty() {
        warn!(?missing, "header lacks expected columns; they read as empty");
    }
    debug!(columns = header.names().len(), "header parsed");

    for line in lines {
        stats.lines += 1;
        let line_no = stats.lines;
        let line = line.with_context(|| format!("reading line {}", line_no))?;
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        let row = header.bind(line);
        let key = row.get(Column::Id);
        let record = OutputRecord::from_row(&row, encoder, prefix)
            .with_context(|| format!("deriving owner address for id {} (line {})", key, line_no))?;
        let Some(record) = record else {
            trace!(line = line_no, "row without id");
            stats.skipped += 1;
            continue;
        };

        match partitioner.write(key, &record)? {
            Destination::Live => stats.live += 1,
            Destination::History => stats.history += 1,
        }
    }

    Ok(stats)
}
