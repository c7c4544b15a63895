//! Manual import and export.
//!
//! Export writes a single manual as a pretty-printed JSON document named
//! after the manual. Import parses untrusted JSON and checks the minimum
//! shape the viewer needs: a name and at least one variation.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::catalog::Manual;

/// Errors that can occur while importing or exporting a manual.
#[derive(Debug, thiserror::Error)]
pub enum ManualError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid manual JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("manual has no name")]
    MissingName,

    #[error("manual '{0}' has no variations")]
    NoVariations(String),
}

/// Serializes a manual to a JSON document.
pub fn export_manual(manual: &Manual) -> Result<String, ManualError> {
    Ok(serde_json::to_string_pretty(manual)?)
}

/// Returns the file name an exported manual is saved under.
pub fn export_file_name(manual: &Manual) -> String {
    // Path separators in the name would escape the target directory.
    let name: String = manual
        .name
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("{}.json", name)
}

/// Writes a manual into `dir` and returns the path of the new file.
pub fn export_to_dir(manual: &Manual, dir: &Path) -> Result<PathBuf, ManualError> {
    let json = export_manual(manual)?;
    let path = dir.join(export_file_name(manual));
    fs::write(&path, json)?;
    debug!("exported manual '{}' to {}", manual.name, path.display());
    Ok(path)
}

/// Parses and validates a manual document.
pub fn import_manual(json: &str) -> Result<Manual, ManualError> {
    let manual: Manual = serde_json::from_str(json)?;

    if manual.name.trim().is_empty() {
        return Err(ManualError::MissingName);
    }
    if manual.variations.is_empty() {
        return Err(ManualError::NoVariations(manual.name));
    }

    for variation in &manual.variations {
        for (i, mv) in variation.moves.iter().enumerate() {
            if !mv.is_in_bounds() {
                warn!(
                    "manual '{}' variation '{}' move {} ({}) is off the board: {} -> {}",
                    manual.name,
                    variation.name,
                    i + 1,
                    mv.label,
                    mv.from,
                    mv.to
                );
            }
        }
    }

    Ok(manual)
}

/// Reads and validates a manual document from disk.
pub fn import_file(path: &Path) -> Result<Manual, ManualError> {
    let data = fs::read_to_string(path)?;
    import_manual(&data)
}
