//! Line counting and file collection helpers

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::errors::{PipelineError, Result};

const READ_CHUNK: usize = 64 * 1024;

/// Count lines the way a line iterator would.
///
/// Every `\n` ends a line and a trailing segment without a newline counts as
/// one more line, so `"a\nb"` and `"a\nb\n"` both have two lines.
pub fn count_lines(path: &Path) -> Result<usize> {
    let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;
    count_lines_from(BufReader::new(file)).map_err(|e| PipelineError::io(path, e))
}

pub fn count_lines_from<R: Read>(mut reader: R) -> std::io::Result<usize> {
    let mut buf = vec![0u8; READ_CHUNK];
    let mut lines = 0;
    let mut last = None;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        lines += buf[..n].iter().filter(|&&b| b == b'\n').count();
        last = Some(buf[n - 1]);
    }

    if matches!(last, Some(b) if b != b'\n') {
        lines += 1;
    }
    Ok(lines)
}

/// Expand files and directories into a sorted, de-duplicated file list.
///
/// Files given explicitly are kept regardless of extension; directories are
/// walked recursively and filtered by `extension` when one is set.
pub fn collect_files(
    paths: &[PathBuf],
    extension: Option<&str>,
    follow_symlinks: bool,
) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();

    for path in paths {
        if path.is_file() {
            files.insert(path.clone());
        } else if path.is_dir() {
            for entry in WalkDir::new(path).follow_links(follow_symlinks) {
                let entry = entry.map_err(|e| walk_error(path, e))?;
                if is_file_entry(&entry) && has_extension(entry.path(), extension) {
                    files.insert(entry.into_path());
                }
            }
        } else {
            return Err(PipelineError::PathNotFound(path.clone()));
        }
    }

    Ok(files.into_iter().collect())
}

/// Regular files, plus symlinks whose target is a file.
///
/// `follow_symlinks` only decides whether linked directories are descended
/// into; a linked file counts either way.
pub(crate) fn is_file_entry(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

pub(crate) fn has_extension(path: &Path, extension: Option<&str>) -> bool {
    let Some(wanted) = extension else {
        return true;
    };
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(wanted.trim_start_matches('.')))
        .unwrap_or(false)
}

pub(crate) fn walk_error(root: &Path, err: walkdir::Error) -> PipelineError {
    let path = err.path().unwrap_or(root).to_path_buf();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "filesystem loop"));
    PipelineError::io(path, source)
}
