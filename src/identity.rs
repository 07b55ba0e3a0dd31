// identity.rs
//! Lazily-initialized per-entry metadata snapshot.

use crate::error::PathError;
use crate::native::{DirSearch, FindRecord};
use crate::normalize::{self, NormalizedPath};

/// Cache state: populated only by an explicit refresh.
#[derive(Clone, Debug)]
enum CachedRecord {
    Uninitialized,
    Present(FindRecord),
    Absent,
}

/// A cached identity snapshot for one filesystem entry
///
/// Holds an optional [`FindRecord`] tied to a normalized path and an
/// is-directory flag. The snapshot starts uninitialized and transitions
/// only through [`refresh`](EntryIdentity::refresh): to `Present` when
/// the entry exists at refresh time, to `Absent` when it does not.
///
/// The cached state is unsynchronized mutable data; an instance is meant
/// for a single owner on a single thread. Share across threads only with
/// external locking.
#[derive(Clone, Debug)]
pub struct EntryIdentity {
    path: NormalizedPath,
    is_directory: bool,
    cached: CachedRecord,
}

impl EntryIdentity {
    /// Creates an uninitialized identity for a path.
    pub fn new(path: NormalizedPath, is_directory: bool) -> EntryIdentity {
        EntryIdentity {
            path,
            is_directory,
            cached: CachedRecord::Uninitialized,
        }
    }

    /// The path this identity snapshots.
    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    /// `true` when the identity was created for a directory entry.
    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    /// `true` once a refresh has run, whether or not it found the entry.
    pub fn is_initialized(&self) -> bool {
        !matches!(self.cached, CachedRecord::Uninitialized)
    }

    /// The cached snapshot, if the last refresh found the entry.
    pub fn record(&self) -> Option<&FindRecord> {
        match &self.cached {
            CachedRecord::Present(record) => Some(record),
            _ => None,
        }
    }

    /// Re-reads the snapshot from the filesystem
    ///
    /// Runs a single-entry, non-recursive search scoped to the entry's
    /// parent directory and its own name, and stores the first matching
    /// record, or marks the entry absent when nothing matches (also the
    /// case when the parent directory itself is gone).
    ///
    /// # Errors
    ///
    /// Returns `PathError::InvalidArgument` for a path with no parent
    /// directory, or the translated native status when the search fails.
    pub fn refresh(&mut self) -> Result<(), PathError> {
        let display = self.path.display_form();
        let parent = normalize::directory_name_of(&display).ok_or_else(|| {
            PathError::InvalidArgument(format!("no parent directory for '{}'", display))
        })?;
        let name = normalize::file_name_of(&display).ok_or_else(|| {
            PathError::InvalidArgument(format!("no entry name in '{}'", display))
        })?;
        let parent = normalize::normalize(&parent)?;
        let mut search = DirSearch::open(&parent, &name)?;
        self.cached = loop {
            match search.next_record()? {
                Some(record) if record.is_dot_entry() => continue,
                Some(record) => break CachedRecord::Present(record),
                None => break CachedRecord::Absent,
            }
        };
        Ok(())
    }

    /// Refreshes only when never initialized
    ///
    /// # Arguments
    ///
    /// * `fail_if_absent` - When `true`, an entry still absent after the
    ///   refresh is reported as `DirectoryNotFound`
    ///
    /// # Returns
    ///
    /// The cached record when present, `Ok(None)` when absent and
    /// `fail_if_absent` is `false`.
    pub fn refresh_if_needed(
        &mut self,
        fail_if_absent: bool,
    ) -> Result<Option<&FindRecord>, PathError> {
        if !self.is_initialized() {
            self.refresh()?;
        }
        match &self.cached {
            CachedRecord::Present(record) => Ok(Some(record)),
            _ if fail_if_absent => Err(PathError::DirectoryNotFound(self.path.display_form())),
            _ => Ok(None),
        }
    }
}
