// lib.rs
//! Extended-length path handling and native directory traversal.
//!
//! Windows accepts paths past the conventional `MAX_PATH` limit only in
//! the `\\?\`-marked extended-length form, and the standard managed
//! layers refuse them entirely. This crate normalizes any path dialect
//! into that form, reverses the transform for display, and walks
//! directory trees breadth-first over the native search primitives so
//! arbitrarily deep trees enumerate without truncation or silent
//! failure. A portable backend provides the same observable behavior on
//! non-Windows hosts.

pub mod error;
pub mod identity;
pub mod native;
pub mod normalize;
pub mod ops;
pub mod options;
pub mod prefix;
pub mod walk;

pub use crate::error::PathError;
pub use crate::identity::EntryIdentity;
pub use crate::native::{DirSearch, FindRecord};
pub use crate::normalize::{normalize, normalize_from, NormalizedPath, MAX_NORMALIZED_LEN};
pub use crate::options::{EntryFilter, WalkOptions, WalkOptionsBuilder};
pub use crate::walk::{TreeWalk, WalkEntry};

/// Main facade for the longwalk library
///
/// This struct provides high-level entry points for path normalization
/// and directory tree enumeration. The walk methods return the lazy
/// [`TreeWalk`] iterator; nothing touches the filesystem until the
/// caller pulls the first entry beyond the root check.
pub struct LongWalk;

impl LongWalk {
    /// Starts a directory tree walk
    ///
    /// # Arguments
    ///
    /// * `root` - The directory to walk, in any accepted path dialect
    /// * `options` - Pattern, recursion mode, and entry filter
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use longwalk::{EntryFilter, LongWalk, WalkOptionsBuilder};
    ///
    /// let options = WalkOptionsBuilder::new()
    ///     .pattern("*.log")
    ///     .recursive(true)
    ///     .filter(EntryFilter::Files)
    ///     .build();
    /// for entry in LongWalk::walk(r"D:\archive", &options).unwrap() {
    ///     println!("{}", entry.unwrap().display_path());
    /// }
    /// ```
    pub fn walk(root: &str, options: &WalkOptions) -> Result<TreeWalk, PathError> {
        TreeWalk::new(root, options)
    }

    /// Walks files matching a pattern
    ///
    /// Convenience over [`LongWalk::walk`] with a files-only filter.
    pub fn files(root: &str, pattern: &str, recursive: bool) -> Result<TreeWalk, PathError> {
        let options = WalkOptionsBuilder::new()
            .pattern(pattern)
            .recursive(recursive)
            .filter(EntryFilter::Files)
            .build();
        TreeWalk::new(root, &options)
    }

    /// Walks directories matching a pattern
    ///
    /// Convenience over [`LongWalk::walk`] with a directories-only
    /// filter.
    pub fn directories(root: &str, pattern: &str, recursive: bool) -> Result<TreeWalk, PathError> {
        let options = WalkOptionsBuilder::new()
            .pattern(pattern)
            .recursive(recursive)
            .filter(EntryFilter::Directories)
            .build();
        TreeWalk::new(root, &options)
    }

    /// Normalizes a path into the extended-length absolute form
    ///
    /// # Examples
    ///
    /// ```
    /// use longwalk::normalize::normalize_from;
    ///
    /// let p = normalize_from(r"\\server\share\dir", r"C:\").unwrap();
    /// assert_eq!(p.as_str(), r"\\?\UNC\server\share\dir");
    /// assert_eq!(p.display_form(), r"\\server\share\dir");
    /// ```
    pub fn normalize(path: &str) -> Result<NormalizedPath, PathError> {
        normalize::normalize(path)
    }

    /// Strips the extended-length marker for display.
    pub fn display(path: &str) -> String {
        normalize::strip(path)
    }
}
