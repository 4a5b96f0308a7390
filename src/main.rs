use anyhow::{Context, Result};
use clap::Parser;

use phong_offset::{Cli, run};

fn main() -> Result<()> {
    env_logger::init();

    let config = Cli::parse().into_config()?;
    log::info!(
        "opening {}x{} views, seed: {:?}",
        config.width,
        config.height,
        config.seed
    );

    run(config).context("event loop failed")?;
    Ok(())
}
