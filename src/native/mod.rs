// native/mod.rs
//! Native enumeration adapter.
//!
//! A thin capability boundary around the host's directory-search
//! primitives: begin a search over `directory\pattern`, advance it one
//! entry at a time, and release the search handle. On Windows this is
//! the `FindFirstFileW` family; elsewhere a portable backend reproduces
//! the same observable semantics over `read_dir`, so the traversal
//! engine and its tests run on every host.

use crate::error::PathError;
use crate::normalize::NormalizedPath;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[cfg(windows)]
pub(crate) mod win32;
#[cfg(windows)]
use win32 as backend;

#[cfg(not(windows))]
mod portable;
#[cfg(not(windows))]
use portable as backend;

/// Directory bit in the attribute mask of a [`FindRecord`].
pub const FILE_ATTRIBUTE_DIRECTORY: u32 = 0x10;

#[cfg(not(windows))]
pub(crate) const FILE_ATTRIBUTE_NORMAL: u32 = 0x80;

/// Ticks (100 ns units) between 1601-01-01 and the Unix epoch.
const UNIX_EPOCH_TICKS: u64 = 116_444_736_000_000_000;

/// One native directory-entry snapshot
///
/// Carries exactly what one enumeration step reports: the attribute
/// bitmask, the three timestamps as native ticks, the file size as a
/// high/low pair, the primary name, and the 8.3-style alternate name
/// where the filesystem provides one. Never retained by the adapter
/// beyond the step that produced it.
#[derive(Clone, Debug)]
pub struct FindRecord {
    pub attributes: u32,
    pub creation_time: u64,
    pub last_access_time: u64,
    pub last_write_time: u64,
    pub size_high: u32,
    pub size_low: u32,
    pub name: String,
    pub alternate_name: String,
}

impl FindRecord {
    /// `true` when the entry denotes a directory.
    pub fn is_directory(&self) -> bool {
        self.attributes & FILE_ATTRIBUTE_DIRECTORY != 0
    }

    /// File size reassembled from the high/low pair.
    pub fn len(&self) -> u64 {
        ((self.size_high as u64) << 32) | self.size_low as u64
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` for the `.` and `..` pseudo-entries the native search
    /// reports at the top of every directory.
    pub fn is_dot_entry(&self) -> bool {
        self.name == "." || self.name == ".."
    }

    pub fn created(&self) -> SystemTime {
        ticks_to_system_time(self.creation_time)
    }

    pub fn accessed(&self) -> SystemTime {
        ticks_to_system_time(self.last_access_time)
    }

    pub fn modified(&self) -> SystemTime {
        ticks_to_system_time(self.last_write_time)
    }
}

fn ticks_to_system_time(ticks: u64) -> SystemTime {
    if ticks >= UNIX_EPOCH_TICKS {
        UNIX_EPOCH + Duration::from_nanos((ticks - UNIX_EPOCH_TICKS).saturating_mul(100))
    } else {
        UNIX_EPOCH - Duration::from_nanos((UNIX_EPOCH_TICKS - ticks).saturating_mul(100))
    }
}

#[cfg(not(windows))]
pub(crate) fn system_time_to_ticks(time: SystemTime) -> u64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => UNIX_EPOCH_TICKS.saturating_add((after.as_nanos() / 100) as u64),
        Err(before) => UNIX_EPOCH_TICKS.saturating_sub((before.duration().as_nanos() / 100) as u64),
    }
}

/// An in-progress directory search
///
/// Opening a search against a directory that does not exist yields an
/// empty search rather than an error; callers that need an existence
/// check perform it before enumerating. Advancing past the last entry
/// is the distinguished `Ok(None)`; any other terminal status surfaces
/// as a translated error naming the directory being searched. The
/// underlying handle is released on every exit path, including the
/// caller abandoning its pull loop early.
pub struct DirSearch {
    inner: backend::Search,
}

impl DirSearch {
    /// Opens a search over `directory` + separator + `pattern`
    ///
    /// # Arguments
    ///
    /// * `directory` - The directory to search
    /// * `pattern` - Native wildcard pattern (`*`, `?`) or a literal name
    ///
    /// # Errors
    ///
    /// Returns the translated native status for failures other than the
    /// not-found family (which reads as an empty search).
    pub fn open(directory: &NormalizedPath, pattern: &str) -> Result<DirSearch, PathError> {
        Ok(DirSearch {
            inner: backend::Search::open(directory, pattern)?,
        })
    }

    /// Advances the search one entry
    ///
    /// # Returns
    ///
    /// `Ok(Some(record))` for the next entry, `Ok(None)` once the search
    /// is exhausted, `Err(PathError)` when the native layer reports a
    /// terminal status other than "no more entries".
    pub fn next_record(&mut self) -> Result<Option<FindRecord>, PathError> {
        self.inner.next_record()
    }
}

/// Attribute mask of a path, translated on failure.
pub(crate) fn attributes(path: &NormalizedPath) -> Result<u32, PathError> {
    backend::attributes(path)
}

/// Creates a single directory; the parent must already exist.
pub(crate) fn create_directory(path: &NormalizedPath) -> Result<(), PathError> {
    backend::create_directory(path)
}

/// Deletes a single file.
pub(crate) fn delete_file(path: &NormalizedPath) -> Result<(), PathError> {
    backend::delete_file(path)
}

/// Removes a single empty directory.
pub(crate) fn remove_directory(path: &NormalizedPath) -> Result<(), PathError> {
    backend::remove_directory(path)
}

/// Moves or renames an entry, replacing an existing destination file.
pub(crate) fn rename(from: &NormalizedPath, to: &NormalizedPath) -> Result<(), PathError> {
    backend::rename(from, to)
}
