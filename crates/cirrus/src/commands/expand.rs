//! `cirrus expand`: configured blocks in, API request shapes out as JSON

use anyhow::Context;
use cirrus_structure::api::SecurityGroup;
use cirrus_structure::{IpPermissionBlock, ListenerBlock};
use serde::Serialize;
use std::path::Path;

/// Read a YAML or JSON list of blocks
fn read_blocks(file: &Path) -> anyhow::Result<Vec<serde_json::Value>> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let blocks: Vec<serde_json::Value> = serde_yaml::from_str(&content)
        .with_context(|| format!("{} is not a list of blocks", file.display()))?;
    tracing::debug!("Read {} blocks from {}", blocks.len(), file.display());
    Ok(blocks)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn listeners(file: &Path) -> anyhow::Result<()> {
    let raw = read_blocks(file)?;
    let blocks: Vec<ListenerBlock> = cirrus_structure::decode_blocks("listener", &raw)?;
    let listeners = cirrus_structure::expand_listeners(&blocks)?;
    print_json(&listeners)
}

pub fn ingress(file: &Path, group: &SecurityGroup) -> anyhow::Result<()> {
    let raw = read_blocks(file)?;
    let blocks: Vec<IpPermissionBlock> = cirrus_structure::decode_blocks("ingress", &raw)?;
    let permissions = cirrus_structure::expand_ip_permissions(group, &blocks)?;
    print_json(&permissions)
}
