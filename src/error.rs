// error.rs
use crate::prefix;
use std::io;
use thiserror::Error;

/// Native status codes the translator recognizes.
///
/// Defined locally so the translation table compiles and tests on every
/// host; the values are the documented Win32 system error codes.
pub mod codes {
    pub const ERROR_FILE_NOT_FOUND: u32 = 2;
    pub const ERROR_PATH_NOT_FOUND: u32 = 3;
    pub const ERROR_ACCESS_DENIED: u32 = 5;
    pub const ERROR_INVALID_DRIVE: u32 = 15;
    pub const ERROR_NO_MORE_FILES: u32 = 18;
    pub const ERROR_FILE_EXISTS: u32 = 80;
    pub const ERROR_INVALID_NAME: u32 = 123;
    pub const ERROR_DIR_NOT_EMPTY: u32 = 145;
    pub const ERROR_ALREADY_EXISTS: u32 = 183;
    pub const ERROR_FILENAME_EXCED_RANGE: u32 = 206;
    pub const ERROR_OPERATION_ABORTED: u32 = 995;
}

/// Error types for path normalization and directory traversal
///
/// This enum represents all failure categories surfaced by the crate.
/// Paths embedded in variants are display paths: the extended-length
/// marker is stripped before the path is stored, since the marker is an
/// implementation artifact the caller never typed.
#[derive(Error, Debug)]
pub enum PathError {
    /// I/O error from filesystem operations, including the fallback for
    /// native status codes with no dedicated category
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The target file does not exist
    #[error("file not found: {0}")]
    FileNotFound(String),

    /// A directory on the path does not exist
    #[error("directory not found: {0}")]
    DirectoryNotFound(String),

    /// The caller lacks permission for the operation
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// The drive portion of the path refers to no mounted drive
    #[error("drive not found: {0}")]
    DriveNotFound(String),

    /// The operation was aborted before completion
    #[error("operation canceled")]
    OperationCanceled,

    /// Malformed input (invalid name, empty where content is required)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The normalized path exceeds the supported length ceiling
    #[error("path too long: {0}")]
    PathTooLong(String),
}

impl PathError {
    pub(crate) fn io_message(message: String) -> PathError {
        PathError::Io(io::Error::new(io::ErrorKind::Other, message))
    }

    pub(crate) fn already_exists(path: &str) -> PathError {
        PathError::Io(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("already exists: {}", prefix::strip_extended_prefix(path)),
        ))
    }
}

/// Translates a native status code into a categorized error
///
/// Pure function: every call with the same code and path yields the same
/// category. Unrecognized codes fall back to the host's generic
/// status-to-error mapping via `io::Error::from_raw_os_error`.
///
/// # Arguments
///
/// * `code` - The raw native status code
/// * `path` - The path the failing operation was addressing
pub fn translate(code: u32, path: &str) -> PathError {
    let shown = prefix::strip_extended_prefix(path);
    match code {
        codes::ERROR_FILE_NOT_FOUND => PathError::FileNotFound(shown),
        codes::ERROR_PATH_NOT_FOUND => PathError::DirectoryNotFound(shown),
        codes::ERROR_ACCESS_DENIED => PathError::AccessDenied(shown),
        codes::ERROR_INVALID_DRIVE => PathError::DriveNotFound(shown),
        codes::ERROR_OPERATION_ABORTED => PathError::OperationCanceled,
        codes::ERROR_INVALID_NAME => PathError::InvalidArgument(shown),
        codes::ERROR_DIR_NOT_EMPTY => {
            PathError::io_message(format!("directory not empty: {}", shown))
        }
        codes::ERROR_FILE_EXISTS | codes::ERROR_ALREADY_EXISTS => PathError::already_exists(path),
        codes::ERROR_FILENAME_EXCED_RANGE => PathError::PathTooLong(shown),
        other => PathError::Io(io::Error::from_raw_os_error(other as i32)),
    }
}

/// Translates a host `io::Error` into a categorized error
///
/// The portable backend reports failures as `io::Error`; on Windows the
/// raw OS code routes through the native translation table, elsewhere
/// the `ErrorKind` decides the category.
pub fn from_io(err: io::Error, path: &str) -> PathError {
    #[cfg(windows)]
    if let Some(code) = err.raw_os_error() {
        return translate(code as u32, path);
    }
    let shown = prefix::strip_extended_prefix(path);
    match err.kind() {
        io::ErrorKind::NotFound => PathError::FileNotFound(shown),
        io::ErrorKind::PermissionDenied => PathError::AccessDenied(shown),
        io::ErrorKind::AlreadyExists => PathError::already_exists(path),
        _ => PathError::Io(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_not_found_codes_to_distinct_categories() {
        assert!(matches!(
            translate(codes::ERROR_FILE_NOT_FOUND, r"C:\missing.txt"),
            PathError::FileNotFound(_)
        ));
        assert!(matches!(
            translate(codes::ERROR_PATH_NOT_FOUND, r"C:\missing"),
            PathError::DirectoryNotFound(_)
        ));
    }

    #[test]
    fn maps_access_and_drive_failures() {
        assert!(matches!(
            translate(codes::ERROR_ACCESS_DENIED, r"C:\locked"),
            PathError::AccessDenied(_)
        ));
        assert!(matches!(
            translate(codes::ERROR_INVALID_DRIVE, r"Q:\nowhere"),
            PathError::DriveNotFound(_)
        ));
        assert!(matches!(
            translate(codes::ERROR_OPERATION_ABORTED, r"C:\x"),
            PathError::OperationCanceled
        ));
        assert!(matches!(
            translate(codes::ERROR_INVALID_NAME, "a<b"),
            PathError::InvalidArgument(_)
        ));
        assert!(matches!(
            translate(codes::ERROR_FILENAME_EXCED_RANGE, r"C:\deep"),
            PathError::PathTooLong(_)
        ));
    }

    #[test]
    fn exists_and_not_empty_surface_as_io() {
        match translate(codes::ERROR_ALREADY_EXISTS, r"C:\taken") {
            PathError::Io(err) => {
                assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
                assert!(err.to_string().contains("already exists"));
            }
            other => panic!("unexpected: {:?}", other),
        }
        match translate(codes::ERROR_DIR_NOT_EMPTY, r"C:\full") {
            PathError::Io(err) => assert!(err.to_string().contains("not empty")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn unknown_codes_fall_back_to_io() {
        assert!(matches!(translate(999, r"C:\x"), PathError::Io(_)));
    }

    #[test]
    fn strips_extended_marker_from_embedded_path() {
        match translate(codes::ERROR_FILE_NOT_FOUND, r"\\?\C:\missing.txt") {
            PathError::FileNotFound(path) => assert_eq!(path, r"C:\missing.txt"),
            other => panic!("unexpected: {:?}", other),
        }
        match translate(codes::ERROR_PATH_NOT_FOUND, r"\\?\UNC\srv\share\gone") {
            PathError::DirectoryNotFound(path) => assert_eq!(path, r"\\srv\share\gone"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn io_kinds_map_to_categories() {
        let err = io::Error::new(io::ErrorKind::NotFound, "gone");
        assert!(matches!(from_io(err, "/tmp/gone"), PathError::FileNotFound(_)));
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "locked");
        assert!(matches!(from_io(err, "/tmp/locked"), PathError::AccessDenied(_)));
    }
}
