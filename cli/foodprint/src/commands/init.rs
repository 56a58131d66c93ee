//! `foodprint init` — project scaffolding.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::config::FoodprintConfig;

/// Create a new foodprint project directory relative to cwd.
pub fn run(name: &str) -> Result<()> {
    let project_dir = Path::new(name);
    create_project(project_dir, name)
}

pub(crate) fn create_project(project_dir: &Path, name: &str) -> Result<()> {
    if project_dir.exists() {
        bail!("directory '{}' already exists", project_dir.display());
    }

    fs::create_dir_all(project_dir.join("data")).context("creating data/ directory")?;

    let config_content = FoodprintConfig::template(name);
    fs::write(project_dir.join("foodprint.toml"), &config_content)
        .context("writing foodprint.toml")?;

    println!("Created project '{name}'");
    println!("  {name}/foodprint.toml");
    println!("  {name}/data/");
    println!();
    println!("Place product_origin.csv, productions.csv and EDGARfood.csv in {name}/data/");

    Ok(())
}
