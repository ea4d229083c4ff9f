use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use crate::record::normalize::normalize_hex_prefix;

/// The type script a UDT is identified by.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptInfo {
    pub code_hash: String,
    pub hash_type: String,
    pub args: String,
}

/// Metadata descriptor for one user-defined token.
///
/// Missing keys deserialize to their defaults so that half-filled templates
/// can still be loaded and reported on by the validator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UdtTemplate {
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub type_hash: String,
    pub type_script: ScriptInfo,
    pub tags: Vec<String>,
}

impl UdtTemplate {
    /// A fill-in template for `type_hash`; everything else is left blank.
    pub fn blank(type_hash: &str) -> Self {
        Self {
            type_hash: normalize_hex_prefix(type_hash.trim()).to_lowercase(),
            type_script: ScriptInfo {
                hash_type: "type".to_string(),
                ..ScriptInfo::default()
            },
            ..Self::default()
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.type_hash)
    }
}

/// Write `template` as `<dir>/<type_hash>.json`, pretty-printed with a
/// trailing newline. Returns the written path.
pub fn write_template<P: AsRef<Path>>(dir: P, template: &UdtTemplate) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).with_context(|| format!("creating {:?}", dir))?;
    let path = dir.join(template.file_name());

    let tmp_path = dir.join(format!(".{}.tmp", template.file_name()));
    let mut tmp =
        fs::File::create(&tmp_path).with_context(|| format!("creating {:?}", tmp_path))?;
    serde_json::to_writer_pretty(&mut tmp, template).context("serializing template")?;
    tmp.write_all(b"\n")?;

    fs::rename(&tmp_path, &path)
        .with_context(|| format!("renaming {:?} -> {:?}", tmp_path, path))?;
    Ok(path)
}

pub fn read_template<P: AsRef<Path>>(path: P) -> Result<UdtTemplate> {
    let path = path.as_ref();
    let f = fs::File::open(path).with_context(|| format!("opening {:?}", path))?;
    serde_json::from_reader(f).with_context(|| format!("parsing {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn blank_normalizes_type_hash() {
        let t = UdtTemplate::blank("\\xABCD");
        assert_eq!(t.type_hash, "0xabcd");
        assert_eq!(t.type_script.hash_type, "type");
        assert!(t.name.is_empty());
        assert_eq!(t.file_name(), "0xabcd.json");
    }

    #[test]
    fn write_then_read_back() -> Result<()> {
        let tmp = TempDir::new()?;
        let mut t = UdtTemplate::blank("0x01");
        t.name = "Test Token".into();
        t.website = Some("https://example.org".into());

        let path = write_template(tmp.path().join("udts"), &t)?;
        assert_eq!(path, tmp.path().join("udts/0x01.json"));

        let body = fs::read_to_string(&path)?;
        assert!(body.ends_with("}\n"));
        assert!(!body.contains("\"icon\""));
        assert_eq!(read_template(&path)?, t);
        Ok(())
    }

    #[test]
    fn partial_json_fills_defaults() -> Result<()> {
        let t: UdtTemplate = serde_json::from_str(r#"{"symbol":"ABC"}"#)?;
        assert_eq!(t.symbol, "ABC");
        assert_eq!(t.decimals, 0);
        assert!(t.tags.is_empty());
        Ok(())
    }
}
