use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use super::output::OutputRecord;

/// Which output directory a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    /// Unspent outputs.
    Live,
    /// Spent outputs.
    History,
}

impl Destination {
    pub fn for_record(record: &OutputRecord) -> Self {
        if record.is_spent {
            Destination::History
        } else {
            Destination::Live
        }
    }

    pub fn dir_name(&self) -> &'static str {
        match self {
            Destination::Live => "live",
            Destination::History => "history",
        }
    }
}

/// Writes records as `<id>.json` under `<base>/live` or `<base>/history`.
#[derive(Debug, Clone)]
pub struct Partitioner {
    live_dir: PathBuf,
    history_dir: PathBuf,
}

impl Partitioner {
    /// Create both destination directories (and parents) up front.
    pub fn new<P: AsRef<Path>>(base: P) -> Result<Self> {
        let base = base.as_ref();
        let live_dir = base.join(Destination::Live.dir_name());
        let history_dir = base.join(Destination::History.dir_name());
        for dir in [&live_dir, &history_dir] {
            fs::create_dir_all(dir).with_context(|| format!("creating {:?}", dir))?;
        }
        Ok(Self {
            live_dir,
            history_dir,
        })
    }

    pub fn dir(&self, dest: Destination) -> &Path {
        match dest {
            Destination::Live => &self.live_dir,
            Destination::History => &self.history_dir,
        }
    }

    pub fn path_for(&self, dest: Destination, key: &str) -> PathBuf {
        self.dir(dest).join(format!("{}.json", key))
    }

    /// Serialize `record` with 2-space indentation and replace any existing
    /// file for `key` in its destination.
    pub fn write(&self, key: &str, record: &OutputRecord) -> Result<Destination> {
        let dest = Destination::for_record(record);
        let path = self.path_for(dest, key);
        let json = serde_json::to_string_pretty(record)
            .with_context(|| format!("serializing record {}", key))?;

        // write to a sibling tmp file, then rename over the target
        let tmp_path = self.dir(dest).join(format!(".{}.json.tmp", key));
        fs::write(&tmp_path, json.as_bytes())
            .with_context(|| format!("writing {:?}", tmp_path))?;
        fs::rename(&tmp_path, &path)
            .with_context(|| format!("renaming {:?} -> {:?}", tmp_path, path))?;

        Ok(dest)
    }
}
