use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use url::Url;

use super::template::UdtTemplate;
use crate::address::HashType;

static HASH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^0x[0-9a-f]{64}$").unwrap());
static ARGS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^0x(?:[0-9a-f]{2})*$").unwrap());

const MAX_SYMBOL_LEN: usize = 16;
const MAX_DECIMALS: u32 = 32;

/// A single problem found in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub message: String,
}

impl ValidationIssue {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a template; an empty result means it is complete and well-formed.
pub fn validate(template: &UdtTemplate) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if template.name.trim().is_empty() {
        issues.push(ValidationIssue::new("name", "must not be empty"));
    }
    let symbol_len = template.symbol.trim().chars().count();
    if symbol_len == 0 {
        issues.push(ValidationIssue::new("symbol", "must not be empty"));
    } else if symbol_len > MAX_SYMBOL_LEN {
        issues.push(ValidationIssue::new(
            "symbol",
            format!("longer than {} characters", MAX_SYMBOL_LEN),
        ));
    }
    if template.decimals > MAX_DECIMALS {
        issues.push(ValidationIssue::new(
            "decimals",
            format!("{} exceeds {}", template.decimals, MAX_DECIMALS),
        ));
    }

    if !HASH_RE.is_match(&template.type_hash) {
        issues.push(ValidationIssue::new("type_hash", "expected 0x + 64 lowercase hex"));
    }
    let script = &template.type_script;
    if !HASH_RE.is_match(&script.code_hash) {
        issues.push(ValidationIssue::new(
            "type_script.code_hash",
            "expected 0x + 64 lowercase hex",
        ));
    }
    if HashType::from_name(&script.hash_type).is_none() {
        issues.push(ValidationIssue::new(
            "type_script.hash_type",
            format!("unknown hash type `{}`", script.hash_type),
        ));
    }
    if !ARGS_RE.is_match(&script.args) {
        issues.push(ValidationIssue::new(
            "type_script.args",
            "expected 0x + even-length lowercase hex",
        ));
    }

    for (field, value) in [("website", &template.website), ("icon", &template.icon)] {
        if let Some(value) = value {
            if !is_http_url(value) {
                issues.push(ValidationIssue::new(field, format!("not an http(s) URL: {}", value)));
            }
        }
    }

    issues
}

fn is_http_url(value: &str) -> bool {
    Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::udt::template::ScriptInfo;

    fn complete() -> UdtTemplate {
        UdtTemplate {
            name: "Test Token".into(),
            symbol: "TT".into(),
            decimals: 8,
            description: String::new(),
            website: Some("https://example.org".into()),
            icon: None,
            type_hash: format!("0x{}", "ab".repeat(32)),
            type_script: ScriptInfo {
                code_hash: format!("0x{}", "cd".repeat(32)),
                hash_type: "data1".into(),
                args: "0x0102".into(),
            },
            tags: vec!["rgb++".into()],
        }
    }

    #[test]
    fn complete_template_passes() {
        assert!(validate(&complete()).is_empty());
    }

    #[test]
    fn blank_template_reports_every_gap() {
        let issues = validate(&UdtTemplate::blank(&format!("0x{}", "ab".repeat(32))));
        let fields: Vec<_> = issues.iter().map(|i| i.field).collect();
        assert_eq!(fields, vec!["name", "symbol", "type_script.code_hash", "type_script.args"]);
    }

    #[test]
    fn catches_malformed_values() {
        let mut t = complete();
        t.symbol = "WAY_TOO_LONG_SYMBOL".into();
        t.decimals = 40;
        t.type_hash = "0xABCD".into();
        t.type_script.hash_type = "data3".into();
        t.type_script.args = "0x123".into();
        t.icon = Some("ftp://example.org/icon.png".into());

        let rendered: Vec<String> = validate(&t).iter().map(|i| i.to_string()).collect();
        assert_eq!(rendered.len(), 6);
        assert!(rendered.contains(&"decimals: 40 exceeds 32".to_string()));
        assert!(rendered.contains(&"type_script.hash_type: unknown hash type `data3`".to_string()));
        assert!(rendered
            .iter()
            .any(|m| m.starts_with("icon: not an http(s) URL")));
    }
}
