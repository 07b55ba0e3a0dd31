// ops.rs
//! Filesystem operations over normalized paths.
//!
//! Each operation normalizes its input and issues a single native call
//! (or, for directory creation and recursive deletion, a short sequence
//! of them). There is no retry anywhere: failures translate and
//! propagate, except for the two tolerated races documented on
//! [`create_directory`] and [`delete_directory`].

use crate::error::PathError;
use crate::native::{self, FILE_ATTRIBUTE_DIRECTORY};
use crate::normalize::{self, NormalizedPath};
use crate::options::WalkOptionsBuilder;
use crate::walk::TreeWalk;
use log::debug;
use std::io;

/// `true` when the path refers to an existing entry of any kind.
///
/// Existence probes never fail: any error while probing, access denied
/// included, reads as "absent".
pub fn exists(path: &str) -> bool {
    probe(path).is_some()
}

/// `true` when the path refers to an existing directory.
pub fn is_directory(path: &str) -> bool {
    probe(path).map_or(false, |attrs| attrs & FILE_ATTRIBUTE_DIRECTORY != 0)
}

/// `true` when the path refers to an existing file.
pub fn is_file(path: &str) -> bool {
    probe(path).map_or(false, |attrs| attrs & FILE_ATTRIBUTE_DIRECTORY == 0)
}

fn probe(path: &str) -> Option<u32> {
    let normalized = normalize::normalize(path).ok()?;
    native::attributes(&normalized).ok()
}

/// Creates a directory, including any missing ancestors
///
/// Walks the ancestor chain upward to find the part that already exists,
/// then creates only the missing segments, deepest last. A segment that
/// springs into existence concurrently ("already exists") is accepted,
/// not treated as failure. Nothing else is created implicitly anywhere
/// in this crate; normalization never touches the filesystem.
///
/// # Arguments
///
/// * `path` - The directory to create, in any accepted path dialect
///
/// # Returns
///
/// The normalized path of the (now existing) directory
///
/// # Errors
///
/// Returns an "already exists" I/O error when the target exists and is
/// not a directory, or the translated native status of the first failing
/// creation.
pub fn create_directory(path: &str) -> Result<NormalizedPath, PathError> {
    let target = normalize::normalize(path)?;
    match native::attributes(&target) {
        Ok(attrs) if attrs & FILE_ATTRIBUTE_DIRECTORY != 0 => return Ok(target),
        Ok(_) => return Err(PathError::already_exists(target.as_str())),
        Err(_) => {}
    }

    let mut missing: Vec<String> = Vec::new();
    let mut cursor = target.display_form();
    loop {
        let candidate = normalize::normalize(&cursor)?;
        if native::attributes(&candidate).is_ok() {
            break;
        }
        missing.push(cursor.clone());
        match normalize::directory_name_of(&cursor) {
            // Resolving the parent of some share roots hands back the
            // same path; stop instead of walking the chain forever.
            Some(parent) if parent == cursor => break,
            Some(parent) => cursor = parent,
            None => break,
        }
    }

    for pending in missing.iter().rev() {
        let segment = normalize::normalize(pending)?;
        debug!("creating directory {}", segment.display_form());
        match native::create_directory(&segment) {
            Ok(()) => {}
            // a concurrent creator winning the race is fine
            Err(PathError::Io(err)) if err.kind() == io::ErrorKind::AlreadyExists => {}
            Err(err) => return Err(err),
        }
    }
    Ok(target)
}

/// Deletes a single file
///
/// # Errors
///
/// Returns `PathError::FileNotFound` when the file does not exist; other
/// native failures translate per the error table.
pub fn delete_file(path: &str) -> Result<(), PathError> {
    let target = normalize::normalize(path)?;
    debug!("deleting file {}", target.display_form());
    native::delete_file(&target)
}

/// Deletes a directory, optionally with its entire subtree
///
/// The recursive form drives a breadth-first walk over the tree, deletes
/// files as they are yielded and directories deepest-first afterwards.
/// An entry that vanishes between being listed and being deleted is
/// ignored; the tree may be deleted concurrently with its own
/// traversal. Removing the root itself still propagates failures.
///
/// # Arguments
///
/// * `path` - The directory to delete
/// * `recursive` - Delete contents first, or require the directory empty
pub fn delete_directory(path: &str, recursive: bool) -> Result<(), PathError> {
    let root = normalize::normalize(path)?;
    if recursive {
        let options = WalkOptionsBuilder::new().recursive(true).build();
        let walk = TreeWalk::with_root(root.clone(), &options)?;
        let mut directories: Vec<NormalizedPath> = Vec::new();
        for entry in walk {
            let entry = entry?;
            if entry.is_dir() {
                directories.push(entry.into_path());
            } else {
                match native::delete_file(entry.path()) {
                    Ok(()) => {}
                    Err(PathError::FileNotFound(_)) | Err(PathError::DirectoryNotFound(_)) => {}
                    Err(err) => return Err(err),
                }
            }
        }
        // breadth-first order lists parents before children, so the
        // reverse removes leaves first
        for directory in directories.iter().rev() {
            match native::remove_directory(directory) {
                Ok(()) => {}
                Err(PathError::FileNotFound(_)) | Err(PathError::DirectoryNotFound(_)) => {}
                Err(err) => return Err(err),
            }
        }
    }
    debug!("removing directory {}", root.display_form());
    native::remove_directory(&root)
}

/// Moves or renames a file, replacing an existing destination.
pub fn rename(from: &str, to: &str) -> Result<(), PathError> {
    let source = normalize::normalize(from)?;
    let destination = normalize::normalize(to)?;
    debug!(
        "renaming {} -> {}",
        source.display_form(),
        destination.display_form()
    );
    native::rename(&source, &destination)
}

/// Copies a file, returning the number of bytes copied.
pub fn copy_file(from: &str, to: &str) -> Result<u64, PathError> {
    let source = normalize::normalize(from)?;
    let destination = normalize::normalize(to)?;
    std::fs::copy(source.as_path(), destination.as_path())
        .map_err(|err| crate::error::from_io(err, source.as_str()))
}
