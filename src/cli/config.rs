//! Config command handlers

use crate::cli::ConfigInitArgs;
use anyhow::bail;
use std::fs;

const EXAMPLE_CONFIG: &str = include_str!("../../gitsage.example.toml");

/// Handle `gitsage-dashboard config init` command
pub fn handle_config_init(args: &ConfigInitArgs) -> anyhow::Result<()> {
    if args.output.exists() && !args.force {
        bail!(
            "File already exists: {}. Use --force to overwrite.",
            args.output.display()
        );
    }

    fs::write(&args.output, EXAMPLE_CONFIG)?;

    println!("✓ Configuration file created: {}", args.output.display());
    println!("  Set client.base_url to the address of your GitSage web interface.");

    Ok(())
}
