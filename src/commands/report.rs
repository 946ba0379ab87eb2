use anyhow::Result;
use colored::*;
use std::path::Path;

use crate::cli::PathArgs;
use crate::config::Config;
use crate::report;
use crate::store;

/// Run the report command - regenerate the summary from the store as-is
pub fn run(paths: &PathArgs) -> Result<()> {
    let config = Config::load(Path::new(&paths.config))?;
    let store = store::load(Path::new(&paths.store))?;

    report::write_summary(Path::new(&paths.output), &config.projects, &store)?;
    println!("Wrote {}", paths.output.cyan());

    Ok(())
}
