// walk.rs
//! Breadth-first lazy enumeration of a directory tree.
//!
//! [`TreeWalk`] is an explicit cursor: a FIFO frontier of directories
//! still to visit plus the one currently-open native search. No entry is
//! buffered beyond the single record in flight, no search opens before
//! the caller pulls, and dropping the walker mid-iteration releases the
//! open handle. All siblings of one directory are yielded before the
//! walk descends into any subdirectory discovered there.

use crate::error::PathError;
use crate::native::{self, DirSearch, FindRecord, FILE_ATTRIBUTE_DIRECTORY};
use crate::normalize::{self, NormalizedPath};
use crate::options::{EntryFilter, WalkOptions};
use log::{debug, trace};
use std::collections::VecDeque;

/// One entry yielded by a traversal
///
/// Pairs the entry's full normalized path with the native record the
/// enumeration step produced.
#[derive(Clone, Debug)]
pub struct WalkEntry {
    path: NormalizedPath,
    record: FindRecord,
}

impl WalkEntry {
    /// Full normalized path of the entry.
    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    pub fn into_path(self) -> NormalizedPath {
        self.path
    }

    /// User-facing path with the extended-length marker stripped.
    pub fn display_path(&self) -> String {
        self.path.display_form()
    }

    /// The entry's name within its directory.
    pub fn file_name(&self) -> &str {
        &self.record.name
    }

    /// `true` when the entry denotes a directory.
    pub fn is_dir(&self) -> bool {
        self.record.is_directory()
    }

    /// The native metadata snapshot for the entry.
    pub fn record(&self) -> &FindRecord {
        &self.record
    }
}

/// Lazy breadth-first iterator over a directory tree
///
/// Produced by [`TreeWalk::new`] (or the [`crate::LongWalk`] facade) and
/// consumed as an `Iterator` of `Result<WalkEntry, PathError>`. The
/// sequence is forward-only and not restartable. Sibling order within a
/// directory follows native enumeration order and must not be assumed
/// sorted; across levels the order is breadth-first.
///
/// A failing directory search ends the walk: the error carries that
/// directory's display path (not the traversal root), and subsequent
/// `next` calls return `None`.
pub struct TreeWalk {
    pattern: String,
    filter: EntryFilter,
    recursive: bool,
    frontier: VecDeque<NormalizedPath>,
    current: Option<(NormalizedPath, DirSearch)>,
    failed: bool,
}

impl TreeWalk {
    /// Starts a traversal rooted at `root`
    ///
    /// The root is normalized and verified before any search opens: a
    /// missing root is `DirectoryNotFound`, a root that is a file is an
    /// I/O error.
    ///
    /// # Arguments
    ///
    /// * `root` - The directory to walk, in any accepted path dialect
    /// * `options` - Pattern, recursion mode, and entry filter
    pub fn new(root: &str, options: &WalkOptions) -> Result<TreeWalk, PathError> {
        let root = normalize::normalize(root)?;
        TreeWalk::with_root(root, options)
    }

    pub(crate) fn with_root(
        root: NormalizedPath,
        options: &WalkOptions,
    ) -> Result<TreeWalk, PathError> {
        let attrs = native::attributes(&root).map_err(|err| match err {
            PathError::FileNotFound(path) | PathError::DirectoryNotFound(path) => {
                PathError::DirectoryNotFound(path)
            }
            other => other,
        })?;
        if attrs & FILE_ATTRIBUTE_DIRECTORY == 0 {
            return Err(PathError::io_message(format!(
                "the path '{}' is a file, not a directory",
                root.display_form()
            )));
        }
        let pattern = normalize_pattern(&options.pattern);
        debug!(
            "walking {} (pattern '{}', recursive: {})",
            root.display_form(),
            pattern,
            options.recursive
        );
        let mut frontier = VecDeque::new();
        frontier.push_back(root);
        Ok(TreeWalk {
            pattern,
            filter: options.filter,
            recursive: options.recursive,
            frontier,
            current: None,
            failed: false,
        })
    }
}

/// Empty and `"."` mean "everything".
fn normalize_pattern(pattern: &str) -> String {
    if pattern.is_empty() || pattern == "." {
        "*".to_string()
    } else {
        pattern.to_string()
    }
}

impl Iterator for TreeWalk {
    type Item = Result<WalkEntry, PathError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            match self.current.as_mut() {
                None => {
                    let directory = self.frontier.pop_front()?;
                    trace!("searching {}", directory.display_form());
                    match DirSearch::open(&directory, &self.pattern) {
                        Ok(search) => self.current = Some((directory, search)),
                        Err(err) => {
                            self.failed = true;
                            return Some(Err(err));
                        }
                    }
                }
                Some((directory, search)) => match search.next_record() {
                    Ok(None) => {
                        trace!("exhausted {}", directory.display_form());
                        self.current = None;
                    }
                    Ok(Some(record)) => {
                        if record.is_dot_entry() {
                            continue;
                        }
                        let full = directory.join(&record.name);
                        if record.is_directory() {
                            if self.recursive {
                                self.frontier.push_back(full.clone());
                            }
                            if self.filter.wants_directories() {
                                return Some(Ok(WalkEntry { path: full, record }));
                            }
                        } else if self.filter.wants_files() {
                            return Some(Ok(WalkEntry { path: full, record }));
                        }
                    }
                    Err(err) => {
                        self.failed = true;
                        self.current = None;
                        return Some(Err(err));
                    }
                },
            }
        }
    }
}
