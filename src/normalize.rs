// normalize.rs
//! Path normalization into the extended-length absolute form.
//!
//! The normalizer accepts every input dialect the host understands:
//! empty (meaning the current directory), relative, absolute drive-letter,
//! UNC share, or an already-marked extended-length path. It produces a
//! [`NormalizedPath`]: absolute, marked, collapsed, and under the length
//! ceiling. The working directory is an injected value wherever
//! determinism matters; [`normalize_from`] takes it explicitly.

use crate::error::{self, PathError};
use crate::prefix;
use std::fmt;
use std::path::Path;

/// Hard ceiling on the length of a normalized path, in characters.
///
/// Comfortably below the 32 767-character limit native calls accept, so
/// appending a search pattern to a normalized directory never pushes a
/// call over the real boundary.
pub const MAX_NORMALIZED_LEN: usize = 32_000;

/// An absolute path in the extended-length form the native layer accepts
///
/// Guaranteed absolute, marked for its dialect (local drive vs UNC share)
/// on Windows, collapsed, and within [`MAX_NORMALIZED_LEN`]. Immutable
/// value type; normalizing an already-normalized path returns it
/// unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NormalizedPath(String);

impl NormalizedPath {
    /// The raw normalized string, marker included.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Borrows the normalized path for host filesystem calls.
    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    /// The user-facing form with the extended-length marker stripped.
    pub fn display_form(&self) -> String {
        prefix::strip_extended_prefix(&self.0)
    }

    /// Appends one name segment using the path's own separator dialect.
    pub fn join(&self, name: &str) -> NormalizedPath {
        let sep = if self.0.contains('\\') { '\\' } else { '/' };
        let mut inner = self.0.clone();
        if !inner.ends_with(['\\', '/']) {
            inner.push(sep);
        }
        inner.push_str(name);
        NormalizedPath(inner)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display without the marker for readability
        write!(f, "{}", self.display_form())
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

/// Normalizes a path against the process working directory
///
/// Empty input substitutes the current working directory. Input already
/// carrying the extended-length marker passes through after a length
/// check, with no native call. Everything else is resolved to an
/// absolute, collapsed form via the host's full-path primitive and then
/// marked.
///
/// # Arguments
///
/// * `path` - The path to normalize, in any accepted dialect
///
/// # Returns
///
/// `Ok(NormalizedPath)` on success, or `Err(PathError)` on failure
///
/// # Errors
///
/// Returns `PathError::PathTooLong` when the resolved form exceeds
/// [`MAX_NORMALIZED_LEN`] (checked before any native call is attempted),
/// `PathError::InvalidArgument` for unusable input, or the translated
/// native status when the resolution primitive itself fails.
pub fn normalize(path: &str) -> Result<NormalizedPath, PathError> {
    let current_dir = current_dir_string()?;
    match prepare(path, &current_dir)? {
        Prepared::Done(done) => Ok(done),
        Prepared::Resolve(candidate) => finish(host_full_path(&candidate)?),
    }
}

/// Normalizes a path against an injected working directory
///
/// Same pipeline as [`normalize`], with the working directory supplied by
/// the caller and a pure textual collapse in place of the host primitive.
/// Deterministic: the result depends only on the two arguments.
///
/// # Examples
///
/// ```
/// use longwalk::normalize::normalize_from;
///
/// let p = normalize_from(r"reports\2024", r"C:\data").unwrap();
/// assert_eq!(p.as_str(), r"\\?\C:\data\reports\2024");
/// assert_eq!(p.display_form(), r"C:\data\reports\2024");
/// ```
pub fn normalize_from(path: &str, current_dir: &str) -> Result<NormalizedPath, PathError> {
    match prepare(path, current_dir)? {
        Prepared::Done(done) => Ok(done),
        Prepared::Resolve(candidate) => finish(collapse(&candidate)),
    }
}

/// Removes the extended-length marker for display; pass-through when no
/// marker is present.
pub fn strip(path: &str) -> String {
    prefix::strip_extended_prefix(path)
}

/// Returns the parent directory of a path, or `None` at a root
///
/// Roots with no parent: a bare drive (`C:\`), a UNC share root
/// (`\\server\share`), a host root (`/`), and a bare name with no
/// separator. When the remainder is a bare drive letter the trailing
/// separator is re-appended, so the parent of `C:\data` is `C:\`.
/// Accepts marked or unmarked input; the result is a display path.
pub fn directory_name_of(path: &str) -> Option<String> {
    let display = prefix::strip_extended_prefix(path);
    let trimmed = display.trim_end_matches(['\\', '/']);
    if trimmed.is_empty() {
        return None;
    }
    if prefix::is_drive_path(trimmed) && trimmed.len() == 2 {
        return None;
    }
    if let Some(share) = trimmed.strip_prefix(r"\\") {
        if share.matches(['\\', '/']).count() <= 1 {
            return None;
        }
    }
    let cut = trimmed.rfind(['\\', '/'])?;
    let parent = &trimmed[..cut];
    if parent.is_empty() {
        return Some(String::from("/"));
    }
    if prefix::is_drive_path(parent) && parent.len() == 2 {
        return Some(format!("{}\\", parent));
    }
    Some(parent.to_string())
}

/// Returns the final name segment of a path, or `None` at a root.
pub fn file_name_of(path: &str) -> Option<String> {
    let display = prefix::strip_extended_prefix(path);
    let trimmed = display.trim_end_matches(['\\', '/']);
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.rfind(['\\', '/']) {
        Some(cut) => {
            let name = &trimmed[cut + 1..];
            if name.is_empty() {
                None
            } else {
                Some(name.to_string())
            }
        }
        None => {
            if prefix::is_drive_path(trimmed) && trimmed.len() == 2 {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
    }
}

enum Prepared {
    Done(NormalizedPath),
    Resolve(String),
}

fn prepare(path: &str, current_dir: &str) -> Result<Prepared, PathError> {
    let raw = if path.is_empty() { current_dir } else { path };
    if raw.is_empty() {
        return Err(PathError::InvalidArgument(
            "empty path and no working directory to substitute".to_string(),
        ));
    }
    if prefix::is_extended(raw) {
        check_ceiling(raw)?;
        return Ok(Prepared::Done(NormalizedPath(raw.to_string())));
    }
    let candidate = if is_absolute_dialect(raw) {
        raw.to_string()
    } else {
        join_dialect(current_dir, raw)
    };
    check_ceiling(&candidate)?;
    Ok(Prepared::Resolve(candidate))
}

fn finish(resolved: String) -> Result<NormalizedPath, PathError> {
    let marked = prefix::ensure_extended_prefix(&resolved);
    check_ceiling(&marked)?;
    Ok(NormalizedPath(marked))
}

fn check_ceiling(path: &str) -> Result<(), PathError> {
    if path.chars().count() > MAX_NORMALIZED_LEN {
        return Err(PathError::PathTooLong(prefix::strip_extended_prefix(path)));
    }
    Ok(())
}

fn is_absolute_dialect(path: &str) -> bool {
    path.starts_with(r"\\") || path.starts_with('/') || prefix::is_drive_path(path)
}

fn join_dialect(base: &str, relative: &str) -> String {
    let sep = if base.contains('\\') || prefix::is_drive_path(base) {
        '\\'
    } else {
        '/'
    };
    let mut out = base.trim_end_matches(['\\', '/']).to_string();
    out.push(sep);
    out.push_str(relative);
    out
}

/// Pure textual full-path resolution: collapses `.` and `..` segments and
/// redundant separators without touching the filesystem. `..` at a root
/// stays at the root, matching the host primitive.
fn collapse(path: &str) -> String {
    let (head, tail) = split_head(path);
    let sep = if path.contains('\\') { '\\' } else { '/' };
    let mut parts: Vec<&str> = Vec::new();
    for component in tail.split(['\\', '/']) {
        match component {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            name => parts.push(name),
        }
    }
    if parts.is_empty() {
        if head.is_empty() {
            sep.to_string()
        } else if head.ends_with(':') {
            format!("{}{}", head, sep)
        } else {
            head.to_string()
        }
    } else {
        let mut out = head.to_string();
        for part in parts {
            out.push(sep);
            out.push_str(part);
        }
        out
    }
}

/// Splits off the non-navigable head of an absolute path: the drive
/// designator, the `server\share` pair of a UNC path (marked or not), or
/// nothing for a host-root path.
fn split_head(path: &str) -> (&str, &str) {
    if let Some(share) = path.strip_prefix(prefix::EXTENDED_UNC_PREFIX) {
        return path.split_at(prefix::EXTENDED_UNC_PREFIX.len() + share_len(share));
    }
    if let Some(rest) = path.strip_prefix(prefix::EXTENDED_PREFIX) {
        let first = rest.find(['\\', '/']).unwrap_or(rest.len());
        return path.split_at(prefix::EXTENDED_PREFIX.len() + first);
    }
    if let Some(share) = path.strip_prefix(r"\\") {
        return path.split_at(2 + share_len(share));
    }
    if prefix::is_drive_path(path) {
        return path.split_at(2);
    }
    ("", path)
}

/// Length of the leading `server<sep>share` pair in a share-relative
/// remainder.
fn share_len(rest: &str) -> usize {
    let mut separators = 0;
    for (index, c) in rest.char_indices() {
        if c == '\\' || c == '/' {
            separators += 1;
            if separators == 2 {
                return index;
            }
        }
    }
    rest.len()
}

fn current_dir_string() -> Result<String, PathError> {
    let current = std::env::current_dir().map_err(|err| error::from_io(err, ""))?;
    Ok(current.to_string_lossy().into_owned())
}

#[cfg(windows)]
fn host_full_path(path: &str) -> Result<String, PathError> {
    use crate::native::win32::{last_error, to_wide};
    use windows_sys::Win32::Storage::FileSystem::GetFullPathNameW;

    let wide = to_wide(path);
    let needed =
        unsafe { GetFullPathNameW(wide.as_ptr(), 0, std::ptr::null_mut(), std::ptr::null_mut()) };
    if needed == 0 {
        return Err(error::translate(last_error(), path));
    }
    let mut buffer = vec![0u16; needed as usize];
    let written = unsafe {
        GetFullPathNameW(
            wide.as_ptr(),
            needed,
            buffer.as_mut_ptr(),
            std::ptr::null_mut(),
        )
    };
    if written == 0 {
        return Err(error::translate(last_error(), path));
    }
    buffer.truncate(written as usize);
    Ok(String::from_utf16_lossy(&buffer))
}

#[cfg(not(windows))]
fn host_full_path(path: &str) -> Result<String, PathError> {
    Ok(collapse(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CWD: &str = r"C:\work";

    #[test]
    fn relative_paths_resolve_against_the_working_directory() {
        let p = normalize_from(r"logs\today", CWD).unwrap();
        assert_eq!(p.as_str(), r"\\?\C:\work\logs\today");
    }

    #[test]
    fn empty_input_means_the_working_directory() {
        let p = normalize_from("", CWD).unwrap();
        assert_eq!(p.as_str(), r"\\?\C:\work");
    }

    #[test]
    fn empty_input_with_no_working_directory_is_rejected() {
        assert!(matches!(
            normalize_from("", ""),
            Err(PathError::InvalidArgument(_))
        ));
    }

    #[test]
    fn dot_segments_collapse() {
        let p = normalize_from(r"C:\a\.\b\..\c", CWD).unwrap();
        assert_eq!(p.as_str(), r"\\?\C:\a\c");
    }

    #[test]
    fn parent_segments_stop_at_the_root() {
        let p = normalize_from(r"C:\..\..\x", CWD).unwrap();
        assert_eq!(p.as_str(), r"\\?\C:\x");
        let root = normalize_from(r"C:\a\..", CWD).unwrap();
        assert_eq!(root.as_str(), r"\\?\C:\");
    }

    #[test]
    fn normalization_is_idempotent() {
        for input in [r"C:\a\.\b\..\c", r"\\server\share\x\.\y", r"relative\z"] {
            let once = normalize_from(input, CWD).unwrap();
            let twice = normalize_from(once.as_str(), CWD).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn unc_paths_round_trip_through_the_marker() {
        let p = normalize_from(r"\\server\share\dir", CWD).unwrap();
        assert_eq!(p.as_str(), r"\\?\UNC\server\share\dir");
        assert_eq!(p.display_form(), r"\\server\share\dir");
    }

    #[test]
    fn unc_parent_segments_stop_at_the_share_root() {
        let p = normalize_from(r"\\server\share\a\..\..\b", CWD).unwrap();
        assert_eq!(p.as_str(), r"\\?\UNC\server\share\b");
    }

    #[test]
    fn marked_input_passes_through_unchanged() {
        let marked = r"\\?\C:\already\done";
        let p = normalize_from(marked, CWD).unwrap();
        assert_eq!(p.as_str(), marked);
    }

    #[test]
    fn length_at_the_ceiling_passes_one_over_fails() {
        let head = r"\\?\C:\";
        let at_limit = format!("{}{}", head, "a".repeat(MAX_NORMALIZED_LEN - head.len()));
        assert_eq!(at_limit.len(), MAX_NORMALIZED_LEN);
        assert!(normalize_from(&at_limit, CWD).is_ok());

        let over = format!("{}{}", head, "a".repeat(MAX_NORMALIZED_LEN - head.len() + 1));
        assert!(matches!(
            normalize_from(&over, CWD),
            Err(PathError::PathTooLong(_))
        ));
    }

    #[test]
    fn overlong_unmarked_input_fails_before_resolution() {
        let over = format!(r"C:\{}", "b".repeat(MAX_NORMALIZED_LEN));
        assert!(matches!(
            normalize_from(&over, CWD),
            Err(PathError::PathTooLong(_))
        ));
    }

    #[test]
    fn host_root_paths_collapse_without_a_marker() {
        let p = normalize_from("/var/./log/../tmp", "/").unwrap();
        assert_eq!(p.as_str(), "/var/tmp");
    }

    #[test]
    fn join_uses_the_dialect_separator() {
        let win = normalize_from(r"C:\a", CWD).unwrap();
        assert_eq!(win.join("b").as_str(), r"\\?\C:\a\b");
        let posix = normalize_from("/a", "/").unwrap();
        assert_eq!(posix.join("b").as_str(), "/a/b");
    }

    #[test]
    fn directory_name_walks_up_one_level() {
        assert_eq!(directory_name_of(r"C:\a\b").as_deref(), Some(r"C:\a"));
        assert_eq!(directory_name_of(r"C:\a").as_deref(), Some(r"C:\"));
        assert_eq!(directory_name_of(r"\\srv\share\d").as_deref(), Some(r"\\srv\share"));
        assert_eq!(directory_name_of("/a/b").as_deref(), Some("/a"));
        assert_eq!(directory_name_of("/a").as_deref(), Some("/"));
        assert_eq!(directory_name_of(r"\\?\C:\a\b").as_deref(), Some(r"C:\a"));
    }

    #[test]
    fn directory_name_is_none_at_roots() {
        assert_eq!(directory_name_of(r"C:\"), None);
        assert_eq!(directory_name_of(r"\\srv\share"), None);
        assert_eq!(directory_name_of(r"\\srv\share\"), None);
        assert_eq!(directory_name_of("/"), None);
        assert_eq!(directory_name_of("lone"), None);
    }

    #[test]
    fn file_name_extracts_the_leaf() {
        assert_eq!(file_name_of(r"C:\a\b.txt").as_deref(), Some("b.txt"));
        assert_eq!(file_name_of(r"\\?\C:\a\b.txt").as_deref(), Some("b.txt"));
        assert_eq!(file_name_of("/a/b").as_deref(), Some("b"));
        assert_eq!(file_name_of(r"C:\"), None);
        assert_eq!(file_name_of("/"), None);
    }

    #[test]
    fn display_form_strips_the_marker() {
        let p = normalize_from(r"C:\data\x", CWD).unwrap();
        assert_eq!(p.display_form(), r"C:\data\x");
        assert_eq!(p.to_string(), r"C:\data\x");
    }
}
