use anyhow::{Context, Result};
use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    Client,
};
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use super::template::{ScriptInfo, UdtTemplate};
use crate::record::normalize::normalize_hex_prefix;

const JSON_API: &str = "application/vnd.api+json";

/// Client for the explorer's xUDT endpoint.
#[derive(Debug, Clone)]
pub struct ExplorerClient {
    client: Client,
    base: String,
}

impl ExplorerClient {
    pub fn new(client: Client, base: impl Into<String>) -> Self {
        Self {
            client,
            base: base.into(),
        }
    }

    pub fn endpoint(&self, type_hash: &str) -> Result<Url> {
        let raw = format!(
            "{}/v1/xudts/{}",
            self.base.trim_end_matches('/'),
            normalize_hex_prefix(type_hash)
        );
        Url::parse(&raw).with_context(|| format!("invalid explorer URL {}", raw))
    }

    /// Single GET for the token's metadata; non-2xx is an error.
    #[instrument(level = "info", skip(self))]
    pub async fn fetch_script_info(&self, type_hash: &str) -> Result<ExplorerUdt> {
        let url = self.endpoint(type_hash)?;
        debug!("Fetching xudt info from {}", url);
        let body = self
            .client
            .get(url.clone())
            .header(ACCEPT, JSON_API)
            .header(CONTENT_TYPE, JSON_API)
            .send()
            .await
            .with_context(|| format!("GET {} failed", url))?
            .error_for_status()
            .with_context(|| format!("Non-success status {}", url))?
            .text()
            .await
            .with_context(|| format!("Reading text from {}", url))?;
        ExplorerUdt::from_response(&body)
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    data: Resource,
}

#[derive(Debug, Deserialize)]
struct Resource {
    attributes: Attributes,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Attributes {
    symbol: Option<String>,
    full_name: Option<String>,
    description: Option<String>,
    icon_file: Option<String>,
    operator_website: Option<String>,
    /// The explorer sends this as a string, but tolerate a number too.
    decimal: Option<serde_json::Value>,
    type_script: Option<ScriptInfo>,
    xudt_tags: Option<Vec<String>>,
}

/// The subset of explorer metadata that feeds a template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplorerUdt {
    pub symbol: Option<String>,
    pub full_name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub website: Option<String>,
    pub decimals: Option<u32>,
    pub type_script: Option<ScriptInfo>,
    pub tags: Vec<String>,
}

impl ExplorerUdt {
    /// Parse a JSON:API `{"data": {"attributes": {...}}}` body.
    pub fn from_response(body: &str) -> Result<Self> {
        let envelope: Envelope =
            serde_json::from_str(body).context("parsing explorer xudt response")?;
        let attrs = envelope.data.attributes;
        let decimals = match attrs.decimal {
            Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
            Some(serde_json::Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            _ => None,
        };
        Ok(Self {
            symbol: attrs.symbol,
            full_name: attrs.full_name,
            description: attrs.description,
            icon: attrs.icon_file.filter(|s| !s.is_empty()),
            website: attrs.operator_website.filter(|s| !s.is_empty()),
            decimals,
            type_script: attrs.type_script,
            tags: attrs.xudt_tags.unwrap_or_default(),
        })
    }

    /// Fill a blank template for `type_hash` from the fetched metadata.
    pub fn into_template(self, type_hash: &str) -> UdtTemplate {
        let mut template = UdtTemplate::blank(type_hash);
        if let Some(name) = self.full_name.or_else(|| self.symbol.clone()) {
            template.name = name;
        }
        template.symbol = self.symbol.unwrap_or_default();
        template.description = self.description.unwrap_or_default();
        template.decimals = self.decimals.unwrap_or_default();
        template.website = self.website;
        template.icon = self.icon;
        if let Some(script) = self.type_script {
            template.type_script = script;
        }
        template.tags = self.tags;
        template
    }
}
