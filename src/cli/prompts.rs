//! Interactive prompts using dialoguer

use std::path::Path;

use anyhow::Result;
use dialoguer::Confirm;

/// Prompt user to confirm proceeding with an action
pub fn confirm_step(message: &str) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()?;
    Ok(confirmed)
}

/// Output paths that already exist on disk
pub fn existing_outputs<'a>(paths: &[&'a Path]) -> Vec<&'a Path> {
    paths.iter().copied().filter(|p| p.exists()).collect()
}

/// Prompt user to confirm overwriting existing output files
pub fn confirm_overwrite(existing: &[&Path]) -> Result<bool> {
    let listing = existing
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    confirm_step(&format!("Overwrite existing output(s): {}?", listing))
}
