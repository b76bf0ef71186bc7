use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TreeError;

/// A directory generated as one unit, mapping to one output type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRoot {
    pub path: PathBuf,
    /// Owning module; prefixes the generated type name and names the output directory.
    pub module: String,
    /// Source set the root belongs to, if it came from one.
    pub source_set: Option<String>,
}

impl ResourceRoot {
    /// A root whose module is the name of its parent directory
    /// (`src/main/resources` → `main`).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let module = path
            .parent()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            module,
            source_set: None,
        }
    }

    pub fn with_module(path: impl Into<PathBuf>, module: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            module: module.into(),
            source_set: None,
        }
    }
}

/// Find every `src/<source-set>/resources` directory below `project_dir`,
/// ordered by source-set name.
pub fn discover(project_dir: &Path) -> Result<Vec<ResourceRoot>, TreeError> {
    let src = project_dir.join("src");
    if !src.is_dir() {
        log::debug!("no source directory at {}", src.display());
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(&src).map_err(|source| TreeError::Io {
        path: src.clone(),
        source,
    })?;

    let mut source_sets = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| TreeError::Io {
            path: src.clone(),
            source,
        })?;
        if entry.path().join("resources").is_dir() {
            source_sets.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    source_sets.sort();

    Ok(source_sets
        .into_iter()
        .map(|name| {
            let mut root = ResourceRoot::with_module(src.join(&name).join("resources"), &name);
            root.source_set = Some(name);
            root
        })
        .collect())
}
