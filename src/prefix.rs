// prefix.rs
//! Extended-length marker utilities.
//!
//! Windows accepts paths past the conventional `MAX_PATH` limit only when
//! they carry the `\\?\` marker (or `\\?\UNC\` for network shares). These
//! helpers are pure string transforms on that dialect and compile on every
//! host, so the marker logic stays testable off-Windows.

/// Marker for extended-length local-drive paths.
pub const EXTENDED_PREFIX: &str = r"\\?\";

/// Marker for extended-length UNC paths; the share path follows without
/// its leading double separator.
pub const EXTENDED_UNC_PREFIX: &str = r"\\?\UNC\";

/// Returns `true` if the path already carries the extended-length marker.
pub fn is_extended(path: &str) -> bool {
    path.starts_with(EXTENDED_PREFIX)
}

/// Returns `true` if the path starts with a drive-letter designator
/// (`X:`), with or without a following separator.
pub fn is_drive_path(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic()
}

/// Ensures an absolute path carries the extended-length marker
///
/// Drive-letter paths get the local marker, `\\server\share` paths are
/// rewritten to the UNC marker form, already-marked paths pass through
/// unchanged. Paths in neither dialect (host-native absolute paths on
/// non-Windows systems) are returned as-is.
///
/// # Arguments
///
/// * `path` - The absolute path to mark
///
/// # Returns
///
/// The path in extended-length form
pub fn ensure_extended_prefix(path: &str) -> String {
    if is_extended(path) {
        path.to_string()
    } else if let Some(share) = path.strip_prefix(r"\\") {
        format!("{}{}", EXTENDED_UNC_PREFIX, share)
    } else if is_drive_path(path) {
        format!("{}{}", EXTENDED_PREFIX, path)
    } else {
        path.to_string()
    }
}

/// Removes the extended-length marker for display
///
/// The UNC marker variant reconstitutes the leading double separator;
/// unmarked paths pass through unchanged.
///
/// # Arguments
///
/// * `path` - The path to strip
///
/// # Returns
///
/// The user-facing form of the path
pub fn strip_extended_prefix(path: &str) -> String {
    if let Some(share) = path.strip_prefix(EXTENDED_UNC_PREFIX) {
        format!(r"\\{}", share)
    } else if let Some(rest) = path.strip_prefix(EXTENDED_PREFIX) {
        rest.to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_drive_paths() {
        assert_eq!(ensure_extended_prefix(r"C:\data\file.txt"), r"\\?\C:\data\file.txt");
    }

    #[test]
    fn marks_unc_paths_without_double_separator() {
        assert_eq!(
            ensure_extended_prefix(r"\\server\share\dir"),
            r"\\?\UNC\server\share\dir"
        );
    }

    #[test]
    fn marking_is_idempotent() {
        let once = ensure_extended_prefix(r"C:\data");
        assert_eq!(ensure_extended_prefix(&once), once);
        let unc = ensure_extended_prefix(r"\\srv\s");
        assert_eq!(ensure_extended_prefix(&unc), unc);
    }

    #[test]
    fn strip_reverses_both_marker_forms() {
        assert_eq!(strip_extended_prefix(r"\\?\C:\data"), r"C:\data");
        assert_eq!(strip_extended_prefix(r"\\?\UNC\server\share"), r"\\server\share");
    }

    #[test]
    fn strip_passes_unmarked_paths_through() {
        assert_eq!(strip_extended_prefix(r"C:\data"), r"C:\data");
        assert_eq!(strip_extended_prefix("/tmp/data"), "/tmp/data");
        assert_eq!(strip_extended_prefix(""), "");
    }

    #[test]
    fn round_trip_preserves_the_original() {
        for original in [r"C:\a\b.txt", r"\\server\share\a", r"D:\x"] {
            assert_eq!(strip_extended_prefix(&ensure_extended_prefix(original)), original);
        }
    }

    #[test]
    fn host_native_paths_are_left_alone() {
        assert_eq!(ensure_extended_prefix("/var/log"), "/var/log");
    }
}
