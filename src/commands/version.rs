use anyhow::Result;

/// Run the version command - display version and build information
pub fn run() -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    let name = env!("CARGO_PKG_NAME");

    println!("{} v{}", name, version);
    println!();
    println!("Repository: https://github.com/shanewwarren/relwatch");
    println!("License: MIT");

    Ok(())
}
