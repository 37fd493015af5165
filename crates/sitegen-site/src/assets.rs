//! Static asset mirroring

use crate::{Result, SiteError, io_error};
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Counts of what a static copy produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub files: usize,
    pub directories: usize,
}

/// Mirror `src` into `dest`
///
/// `dest` is removed first if it exists, so the result contains exactly the
/// files under `src`.
pub fn copy_static(src: &Path, dest: &Path) -> Result<CopyStats> {
    if !src.is_dir() {
        return Err(SiteError::DirectoryNotFound(src.to_path_buf()));
    }

    info!("Copying static files from {} to {}", src.display(), dest.display());
    reset_dir(dest)?;

    let mut stats = CopyStats::default();
    copy_dir_contents(src, dest, &mut stats)?;
    Ok(stats)
}

/// Remove `dir` if present and create it empty
pub(crate) fn reset_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        debug!("Removing existing directory: {}", dir.display());
        fs::remove_dir_all(dir).map_err(|e| io_error(dir, e))?;
    }
    fs::create_dir_all(dir).map_err(|e| io_error(dir, e))
}

fn copy_dir_contents(src: &Path, dest: &Path, stats: &mut CopyStats) -> Result<()> {
    for entry in fs::read_dir(src).map_err(|e| io_error(src, e))? {
        let entry = entry.map_err(|e| io_error(src, e))?;
        let src_path = entry.path();
        let dest_path = dest.join(entry.file_name());

        if src_path.is_dir() {
            debug!("Creating directory: {}", dest_path.display());
            fs::create_dir(&dest_path).map_err(|e| io_error(&dest_path, e))?;
            stats.directories += 1;
            copy_dir_contents(&src_path, &dest_path, stats)?;
        } else {
            debug!("Copying file: {} -> {}", src_path.display(), dest_path.display());
            fs::copy(&src_path, &dest_path).map_err(|e| io_error(&src_path, e))?;
            stats.files += 1;
        }
    }
    Ok(())
}
