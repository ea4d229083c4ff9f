//! udt_validate.rs
//!
//! Validates every `*.json` UDT template in a directory (first argument, or the
//! configured UDT directory) and exits non-zero if any template has issues.

use anyhow::{bail, Context, Result};
use glob::glob;
use scriptcat::{
    config, logging,
    udt::{read_template, validate},
};
use std::path::PathBuf;
use tracing::{error, info};

fn main() -> Result<()> {
    logging::init("info");

    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(config::udt_dir);
    if !dir.is_dir() {
        bail!("{} is not a directory", dir.display());
    }

    let pattern = format!("{}/*.json", dir.display());
    let paths: Vec<PathBuf> = glob(&pattern)
        .with_context(|| format!("Failed to read glob pattern '{}'", pattern))?
        .filter_map(|entry| entry.ok())
        .collect();

    let mut bad = 0usize;
    for path in &paths {
        let template = match read_template(path) {
            Ok(t) => t,
            Err(e) => {
                error!(path = %path.display(), "{:#}", e);
                bad += 1;
                continue;
            }
        };
        let issues = validate(&template);
        for issue in &issues {
            error!(path = %path.display(), %issue, "invalid template");
        }
        if !issues.is_empty() {
            bad += 1;
        }
    }

    info!(checked = paths.len(), invalid = bad, "validation finished");
    if bad > 0 {
        bail!("{} of {} templates failed validation", bad, paths.len());
    }
    Ok(())
}
