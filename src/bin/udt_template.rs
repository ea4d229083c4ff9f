//! udt_template.rs
//!
//! Writes a UDT descriptor template `<type_hash>.json` into the UDT directory.
//!
//!   udt_template <TYPE_HASH> [--fetch] [--out DIR]
//!
//! With `--fetch` the explorer API is queried once and the template is
//! pre-filled with the symbol, name, decimals and type script it returns.

use anyhow::{bail, Result};
use reqwest::Client;
use scriptcat::{
    config, logging,
    udt::{validate, write_template, ExplorerClient, UdtTemplate},
};
use std::path::PathBuf;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init("info");

    let mut type_hash: Option<String> = None;
    let mut fetch = false;
    let mut out_dir: PathBuf = config::udt_dir();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--fetch" => fetch = true,
            "--out" => match args.next() {
                Some(dir) => out_dir = PathBuf::from(dir),
                None => bail!("--out requires a directory"),
            },
            other if type_hash.is_none() => type_hash = Some(other.to_string()),
            other => bail!("unexpected argument `{}`", other),
        }
    }
    let Some(type_hash) = type_hash else {
        bail!("Usage: udt_template <TYPE_HASH> [--fetch] [--out DIR]");
    };

    let template = if fetch {
        let api = config::explorer_api();
        info!(%api, "fetching script info");
        let explorer = ExplorerClient::new(Client::new(), api);
        explorer
            .fetch_script_info(&type_hash)
            .await?
            .into_template(&type_hash)
    } else {
        UdtTemplate::blank(&type_hash)
    };

    let path = write_template(&out_dir, &template)?;
    info!(path = %path.display(), "template written");

    for issue in validate(&template) {
        warn!(%issue, "still to fill in");
    }
    Ok(())
}
