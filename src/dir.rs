// Directory listing. Names only, in the order the OS returns them, without
// `.` and `..`. Symlinks are classified by the link itself, not its target.

use std::fs;
use std::path::Path;

use crate::error::Result;

fn list_filtered(dir: &Path, keep: impl Fn(&fs::FileType) -> bool) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if keep(&entry.file_type()?) {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    log::trace!("{}: {} entries kept", dir.display(), names.len());
    Ok(names)
}

/// Names of all entries in `dir`.
pub fn list(dir: &Path) -> Result<Vec<String>> {
    list_filtered(dir, |_| true)
}

/// Names of the entries in `dir` that are not directories.
pub fn list_files(dir: &Path) -> Result<Vec<String>> {
    list_filtered(dir, |t| !t.is_dir())
}

/// Names of the subdirectories of `dir`.
pub fn list_directories(dir: &Path) -> Result<Vec<String>> {
    list_filtered(dir, |t| t.is_dir())
}
