//! Building the case repository the CLI plays from.

use std::path::Path;

use casesim_core::Case;
use casesim_engine::{CaseRepository, EngineError};

use crate::config::CliConfig;

/// Bundled cases plus any found in the configured case directory.
pub fn load_repository(config: &CliConfig) -> eyre::Result<CaseRepository> {
    let mut repository = CaseRepository::builtin()?;
    if let Some(dir) = &config.case_dir {
        let added = load_case_dir(&mut repository, dir)?;
        tracing::info!(dir = %dir.display(), added, "loaded authored cases");
    }
    Ok(repository)
}

/// Add every `.json` file in `dir`, in file name order. A file holds either a
/// single case object or an array of cases.
pub fn load_case_dir(repository: &mut CaseRepository, dir: &Path) -> eyre::Result<usize> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| eyre::eyre!("failed to read case directory {}: {e}", dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut added = 0;
    for path in paths {
        let contents = std::fs::read_to_string(&path)?;
        let result = if contents.trim_start().starts_with('[') {
            repository.extend_from_json(&contents)
        } else {
            Case::from_json(&contents)
                .map_err(EngineError::from)
                .and_then(|case| repository.insert(case).map(|()| 1))
        };
        added += result.map_err(|e| eyre::eyre!("{}: {e}", path.display()))?;
    }
    Ok(added)
}
