use anyhow::Context;
use std::path::Path;

pub fn handle(file: &Path) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let normalized = cirrus_structure::normalize_structured_document(&content)?;
    println!("{}", normalized);
    Ok(())
}
