use anyhow::Result;
use scriptcat::{
    address::FullAddressEncoder, config::TransformConfig, logging, record::transform_file,
};
use tracing::info;

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    logging::init("info");

    // ─── 2) resolve paths ────────────────────────────────────────────
    let config = TransformConfig::from_env_and_args(std::env::args().skip(1));
    info!(
        input = %config.input.display(),
        output = %config.output_dir.display(),
        prefix = %config.address_prefix,
        "startup"
    );

    // ─── 3) transform CSV → live/ + history/ ─────────────────────────
    let stats = transform_file(&config, &FullAddressEncoder)?;

    info!(written = stats.written(), "all done");
    Ok(())
}
