//! Print every parameter under the root.
use crate::{error::SysctlError, param::Sysctl};
use std::{
    fs,
    io::{self, prelude::*},
    path::{Path, PathBuf},
};
use tracing::debug;
use walkdir::WalkDir;

// Public
impl<O: Write, E: Write> Sysctl<O, E> {
    /// Print every parameter under [`crate::Config::root`], depth first.
    ///
    /// Entries are visited in file name order. Symlinks are followed.
    ///
    /// Nothing stops the walk early: parameters that can't be read, and
    /// directories or entries that can't be inspected, are reported and
    /// skipped.
    ///
    /// Returns the bitwise OR of every exit code, so `0` only if everything
    /// was printed.
    pub fn display_all(&mut self) -> i32 {
        let root = self.config().root().to_path_buf();
        // WalkDir happily yields a lone file as the root
        match fs::metadata(&root) {
            Ok(m) if m.is_dir() => (),
            _ => return self.report(&SysctlError::OpenDir(dir_name(&root))),
        }
        let mut rc = 0;
        // Last directory yielded, so a failure to list it can be told apart
        // from a failure to stat an entry.
        let mut last_dir: Option<PathBuf> = None;

        for entry in WalkDir::new(&root)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    let path = e.path().unwrap_or(&root).to_path_buf();
                    debug!(path = %path.display(), error = %e, "walk failed");
                    let err = if e.depth() == 0 || last_dir.as_ref() == Some(&path) {
                        SysctlError::OpenDir(dir_name(&path))
                    } else {
                        let source = e.into_io_error().unwrap_or_else(|| {
                            io::Error::new(io::ErrorKind::Other, "filesystem loop")
                        });
                        SysctlError::Metadata {
                            path: path.display().to_string(),
                            source,
                        }
                    };
                    rc |= self.report(&err);
                    continue;
                }
            };
            if entry.file_type().is_dir() {
                last_dir = Some(entry.into_path());
                continue;
            }
            let key = match entry.path().strip_prefix(&root) {
                Ok(rel) => rel.to_string_lossy().into_owned(),
                Err(_) => entry.path().to_string_lossy().into_owned(),
            };
            let res = self.read(&key);
            rc |= self.status(res);
        }
        rc
    }
}

/// Directories are shown with a trailing `/`
fn dir_name(path: &Path) -> String {
    let mut s = path.display().to_string();
    if !s.ends_with('/') {
        s.push('/');
    }
    s
}
