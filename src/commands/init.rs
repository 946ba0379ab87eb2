use anyhow::{bail, Context, Result};
use colored::*;
use std::path::Path;

use crate::config::CONFIG_TEMPLATE;

/// Run the init command - write a starter config file
pub fn run(force: bool, config_path: &str) -> Result<()> {
    let path = Path::new(config_path);

    if path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite, or edit it directly.",
            path.display()
        );
    }

    std::fs::write(path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("{} Wrote starter config to {}", "✓".green(), config_path.cyan());
    println!("Edit the project list, then run {} to start tracking.", "relwatch check".cyan());

    Ok(())
}
