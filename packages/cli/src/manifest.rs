use anyhow::{anyhow, Result};
use propforge_syntax::CompilationUnit;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const MANIFEST_SUFFIX: &str = ".decl.json";

/// A manifest holds one compilation unit or a list of them
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Manifest {
    Single(CompilationUnit),
    Many(Vec<CompilationUnit>),
}

pub fn is_manifest(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.ends_with(MANIFEST_SUFFIX))
        .unwrap_or(false)
}

/// Manifest files under `dir`, sorted so batches see a stable order
pub fn find_manifest_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if entry.file_type().is_file() && is_manifest(path) {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

/// Read a manifest; units without a path get the manifest's path
pub fn load_manifest(path: &Path) -> Result<Vec<CompilationUnit>> {
    let content = fs::read_to_string(path)?;
    let manifest: Manifest = serde_json::from_str(&content)
        .map_err(|e| anyhow!("Invalid manifest {}: {}", path.display(), e))?;

    let mut units = match manifest {
        Manifest::Single(unit) => vec![unit],
        Manifest::Many(units) => units,
    };
    for unit in &mut units {
        if unit.path.is_none() {
            unit.path = Some(path.display().to_string());
        }
    }

    Ok(units)
}
