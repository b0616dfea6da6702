use log::{debug, warn};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, ScaffoldError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Code,
    Input,
    Output,
    Error,
}

#[derive(Debug, Clone)]
pub struct PlannedFile {
    pub path: PathBuf,
    pub kind: FileKind,
    pub contents: Vec<u8>,
    /// When false an existing file is left as it is
    pub overwrite: bool,
}

/// Directories to walk into, in order, and the files to write in the last one.
#[derive(Debug, Clone)]
pub struct ScaffoldPlan {
    pub directories: Vec<PathBuf>,
    pub files: Vec<PlannedFile>,
}

/// Undoes the creations of a failed run. Overwritten files are not restored.
#[derive(Default)]
struct Rollback {
    dirs: Vec<PathBuf>,
    files: Vec<PathBuf>,
    committed: bool,
}

impl Rollback {
    fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for Rollback {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        for file in self.files.iter().rev() {
            if let Err(e) = fs::remove_file(file) {
                warn!("Rollback could not remove {}: {}", file.display(), e);
            }
        }
        for dir in self.dirs.iter().rev() {
            if let Err(e) = fs::remove_dir(dir) {
                warn!("Rollback could not remove {}: {}", dir.display(), e);
            }
        }
    }
}

/// Runs a plan and returns the paths actually written.
pub fn execute(plan: &ScaffoldPlan) -> Result<Vec<PathBuf>> {
    let mut rollback = Rollback::default();

    for dir in &plan.directories {
        if ensure_dir(dir)? {
            debug!("Created directory {}", dir.display());
            rollback.dirs.push(dir.clone());
        }
    }

    let mut written = Vec::with_capacity(plan.files.len());
    for file in &plan.files {
        // create_new tells a fresh file from one another request already wrote
        match OpenOptions::new().write(true).create_new(true).open(&file.path) {
            Ok(mut handle) => {
                rollback.files.push(file.path.clone());
                handle
                    .write_all(&file.contents)
                    .map_err(|e| ScaffoldError::io(&file.path, e))?;
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                if !file.overwrite {
                    debug!("Keeping existing {}", file.path.display());
                    continue;
                }
                fs::write(&file.path, &file.contents)
                    .map_err(|e| ScaffoldError::io(&file.path, e))?;
            }
            Err(e) => return Err(ScaffoldError::io(&file.path, e)),
        }
        written.push(file.path.clone());
    }

    rollback.commit();
    Ok(written)
}

/// Returns true when the directory had to be created.
fn ensure_dir(path: &Path) -> Result<bool> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(false),
        Ok(_) => Err(ScaffoldError::NotADirectory(path.to_path_buf())),
        Err(e) if e.kind() == ErrorKind::NotFound => match fs::create_dir(path) {
            Ok(()) => Ok(true),
            // Another request got there first
            Err(e) if e.kind() == ErrorKind::AlreadyExists && path.is_dir() => Ok(false),
            Err(e) => Err(ScaffoldError::io(path, e)),
        },
        Err(e) => Err(ScaffoldError::io(path, e)),
    }
}
