// SPDX-FileCopyrightText: © Siemens AG
// SPDX-License-Identifier: Apache-2.0

//! Writes an export to disk: the YAML document plus a JSON manifest
//! describing what the walk produced. Both files are written atomically
//! through a temp file and rename in the target directory.

use crate::walk::Export;
use serde_json::json;
use std::fs::{self, File};
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

pub const YAML_FILE_NAME: &str = "capella_model.yaml";
pub const META_FILE_NAME: &str = "capella_model.meta.json";

const YAML_HEADER: &str = "# YAML file for Capella objects\n";

/// How hard to push bytes to stable storage before rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteDurability {
    /// Write and rename; leave flushing to the OS.
    #[default]
    BestEffort,
    /// fsync the temp file before renaming it into place.
    Durable,
}

#[derive(Debug)]
pub enum StoreError {
    CreateDir { path: PathBuf, source: io::Error },
    Write { path: PathBuf, source: io::Error },
    Rename { from: PathBuf, to: PathBuf, source: io::Error },
    SymlinkRefused { path: PathBuf },
    Serialize { source: serde_json::Error },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::CreateDir { path, .. } => {
                write!(f, "failed to create output directory {}", path.display())
            }
            StoreError::Write { path, .. } => {
                write!(f, "failed to write {}", path.display())
            }
            StoreError::Rename { from, to, .. } => write!(
                f,
                "failed to move {} into place at {}",
                from.display(),
                to.display()
            ),
            StoreError::SymlinkRefused { path } => {
                write!(f, "refusing to overwrite symlink {}", path.display())
            }
            StoreError::Serialize { .. } => f.write_str("failed to serialize manifest"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::CreateDir { source, .. }
            | StoreError::Write { source, .. }
            | StoreError::Rename { source, .. } => Some(source),
            StoreError::SymlinkRefused { .. } => None,
            StoreError::Serialize { source } => Some(source),
        }
    }
}

/// Writes `capella_model.yaml` and its manifest sidecar into `dir`.
/// Returns the path of the YAML file.
pub fn write_export(
    dir: &Path,
    export: &Export,
    durability: WriteDurability,
) -> Result<PathBuf, StoreError> {
    fs::create_dir_all(dir).map_err(|source| StoreError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let yaml_path = dir.join(YAML_FILE_NAME);
    let mut document = String::with_capacity(YAML_HEADER.len() + 4096);
    document.push_str(YAML_HEADER);
    document.push_str(&export.yaml());
    write_atomic(&yaml_path, document.as_bytes(), durability)?;

    let meta_path = dir.join(META_FILE_NAME);
    let manifest = manifest_json(export)?;
    write_atomic(&meta_path, &manifest, durability)?;

    Ok(yaml_path)
}

fn manifest_json(export: &Export) -> Result<Vec<u8>, StoreError> {
    let value = json!({
        "objects": export
            .fragments
            .iter()
            .map(|f| json!({
                "uuid": f.uuid.as_ref(),
                "type": f.tag.as_str(),
                "name": f.name,
            }))
            .collect::<Vec<_>>(),
        "referenced": export
            .referenced
            .iter()
            .map(|s| json!({
                "uuid": s.uuid.as_ref(),
                "name": s.name,
            }))
            .collect::<Vec<_>>(),
        "skipped": export
            .skipped
            .iter()
            .map(|s| json!({
                "uuid": s.uuid.as_ref(),
                "reason": s.reason.to_string(),
            }))
            .collect::<Vec<_>>(),
        "images_written": export.images_written,
    });
    serde_json::to_vec_pretty(&value).map_err(|source| StoreError::Serialize { source })
}

/// Temp-file-and-rename write in the target directory. Refuses to replace a
/// symlink so an export can never be redirected outside its directory.
fn write_atomic(path: &Path, bytes: &[u8], durability: WriteDurability) -> Result<(), StoreError> {
    if let Ok(meta) = fs::symlink_metadata(path) {
        if meta.file_type().is_symlink() {
            return Err(StoreError::SymlinkRefused {
                path: path.to_path_buf(),
            });
        }
    }

    let tmp = path.with_extension("tmp");
    let result: io::Result<()> = (|| {
        let mut file = File::create(&tmp)?;
        file.write_all(bytes)?;
        if durability == WriteDurability::Durable {
            file.sync_all()?;
        }
        Ok(())
    })();
    if let Err(source) = result {
        let _ = fs::remove_file(&tmp);
        return Err(StoreError::Write {
            path: tmp,
            source,
        });
    }

    fs::rename(&tmp, path).map_err(|source| StoreError::Rename {
        from: tmp,
        to: path.to_path_buf(),
        source,
    })
}
