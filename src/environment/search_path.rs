//! Upward directory search.
//!
//! The environment file and the project configuration file are both looked up
//! in the starting directory first and then in every parent up to the
//! filesystem root, the same way git looks for `.git`.

use std::path::{Path, PathBuf};

/// Compute the directory search path for `start`.
///
/// Returns `start` followed by each of its parents, ending at the filesystem
/// root. The function is pure: it never touches the filesystem and never
/// consults the current working directory, so a relative `start` stops at its
/// top component. Callers that need the search to reach the filesystem root
/// pass an absolute path ([`ProjectConfig::discover`] does this), and callers
/// that want a canonical path (no `..` segments, symlinks resolved)
/// canonicalize before calling.
///
/// [`ProjectConfig::discover`]: crate::config::ProjectConfig::discover
///
/// The sequence is finite, strictly decreasing in depth, and free of
/// duplicates. An empty `start` yields an empty sequence.
///
/// # Examples
///
/// ```rust
/// use distvars::environment::search_path;
/// use std::path::{Path, PathBuf};
///
/// let dirs = search_path(Path::new("/srv/app/web"));
/// assert_eq!(
///     dirs,
///     vec![
///         PathBuf::from("/srv/app/web"),
///         PathBuf::from("/srv/app"),
///         PathBuf::from("/srv"),
///         PathBuf::from("/"),
///     ]
/// );
/// ```
#[must_use]
pub fn search_path(start: &Path) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();

    for dir in start.ancestors() {
        if dir.as_os_str().is_empty() {
            // Relative paths end with an empty ancestor
            break;
        }
        if dirs.last().is_some_and(|last| last == dir) {
            continue;
        }
        dirs.push(dir.to_path_buf());
    }

    dirs
}

/// Find the first directory in `dirs` containing a regular file named `name`.
///
/// Returns the full path to the file.
#[must_use]
pub fn find_in(dirs: &[PathBuf], name: &str) -> Option<PathBuf> {
    dirs.iter().map(|dir| dir.join(name)).find(|candidate| candidate.is_file())
}
