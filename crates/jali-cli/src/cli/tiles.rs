//! `jali tiles`: list the tile families and their variants.

use serde::Serialize;

use jali::{TileChoice, TileRegistry};

use super::error::CliError;

#[derive(Debug, Serialize)]
pub struct FamilyInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub uses_count: bool,
    pub variants: Vec<&'static str>,
}

/// Families as built for `count`, in registry order.
pub fn family_infos(count: usize) -> Vec<FamilyInfo> {
    let registry = TileRegistry::standard();
    registry
        .kinds()
        .filter_map(|kind| {
            let family = registry.family(kind, count)?;
            Some(FamilyInfo {
                name: kind.name(),
                description: kind.description(),
                uses_count: kind.uses_count(),
                variants: family.variants().iter().map(|v| v.name()).collect(),
            })
        })
        .collect()
}

pub fn cmd_tiles(count: usize, json: bool) -> Result<(), CliError> {
    let infos = family_infos(count);

    if json {
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }

    println!("Tile families (count = {count}):");
    for info in &infos {
        println!("  {:<16} {} variants  {}", info.name, info.variants.len(), info.description);
    }
    println!("  {:<16} clones of shapes chosen with select-tiles", TileChoice::CUSTOM_NAME);
    Ok(())
}
