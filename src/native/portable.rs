// native/portable.rs
use super::{system_time_to_ticks, FindRecord, FILE_ATTRIBUTE_DIRECTORY, FILE_ATTRIBUTE_NORMAL};
use crate::error::{self, PathError};
use crate::normalize::NormalizedPath;
use std::fs;
use std::io;

/// Wildcard matcher for one search: a literal name compares exactly,
/// anything containing `*` or `?` compiles to a glob. Matching is
/// case-sensitive, following the host filesystem's semantics.
enum NameMatcher {
    Literal(String),
    Glob(globset::GlobMatcher),
}

impl NameMatcher {
    fn compile(pattern: &str) -> Result<NameMatcher, PathError> {
        if !pattern.contains(['*', '?']) {
            return Ok(NameMatcher::Literal(pattern.to_string()));
        }
        let glob = globset::GlobBuilder::new(pattern)
            .literal_separator(false)
            .build()
            .map_err(|err| PathError::InvalidArgument(err.to_string()))?;
        Ok(NameMatcher::Glob(glob.compile_matcher()))
    }

    fn is_match(&self, name: &str) -> bool {
        match self {
            NameMatcher::Literal(literal) => literal == name,
            NameMatcher::Glob(matcher) => matcher.is_match(name),
        }
    }
}

/// A `read_dir`-backed search with the adapter's observable semantics:
/// missing directories read as empty, exhaustion is `Ok(None)`, and the
/// iterator handle is released as soon as the search ends.
pub(crate) struct Search {
    directory: String,
    entries: Option<fs::ReadDir>,
    matcher: NameMatcher,
}

impl Search {
    pub(crate) fn open(directory: &NormalizedPath, pattern: &str) -> Result<Search, PathError> {
        let matcher = NameMatcher::compile(pattern)?;
        let entries = match fs::read_dir(directory.as_path()) {
            Ok(iter) => Some(iter),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => return Err(error::from_io(err, directory.as_str())),
        };
        Ok(Search {
            directory: directory.as_str().to_string(),
            entries,
            matcher,
        })
    }

    pub(crate) fn next_record(&mut self) -> Result<Option<FindRecord>, PathError> {
        let iter = match self.entries.as_mut() {
            Some(iter) => iter,
            None => return Ok(None),
        };
        loop {
            let entry = match iter.next() {
                None => {
                    self.entries = None;
                    return Ok(None);
                }
                Some(Err(err)) => {
                    self.entries = None;
                    return Err(error::from_io(err, &self.directory));
                }
                Some(Ok(entry)) => entry,
            };
            let name = entry.file_name().to_string_lossy().into_owned();
            if !self.matcher.is_match(&name) {
                continue;
            }
            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                // listed a moment ago, gone now; skip the vanished entry
                Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
                Err(err) => {
                    self.entries = None;
                    return Err(error::from_io(err, &self.directory));
                }
            };
            return Ok(Some(record_from_metadata(name, &metadata)));
        }
    }
}

fn record_from_metadata(name: String, metadata: &fs::Metadata) -> FindRecord {
    let size = if metadata.is_dir() { 0 } else { metadata.len() };
    FindRecord {
        attributes: if metadata.is_dir() {
            FILE_ATTRIBUTE_DIRECTORY
        } else {
            FILE_ATTRIBUTE_NORMAL
        },
        creation_time: metadata.created().map(system_time_to_ticks).unwrap_or(0),
        last_access_time: metadata.accessed().map(system_time_to_ticks).unwrap_or(0),
        last_write_time: metadata.modified().map(system_time_to_ticks).unwrap_or(0),
        size_high: (size >> 32) as u32,
        size_low: size as u32,
        name,
        alternate_name: String::new(),
    }
}

pub(crate) fn attributes(path: &NormalizedPath) -> Result<u32, PathError> {
    let metadata = fs::symlink_metadata(path.as_path())
        .map_err(|err| error::from_io(err, path.as_str()))?;
    Ok(if metadata.is_dir() {
        FILE_ATTRIBUTE_DIRECTORY
    } else {
        FILE_ATTRIBUTE_NORMAL
    })
}

pub(crate) fn create_directory(path: &NormalizedPath) -> Result<(), PathError> {
    fs::create_dir(path.as_path()).map_err(|err| error::from_io(err, path.as_str()))
}

pub(crate) fn delete_file(path: &NormalizedPath) -> Result<(), PathError> {
    fs::remove_file(path.as_path()).map_err(|err| error::from_io(err, path.as_str()))
}

pub(crate) fn remove_directory(path: &NormalizedPath) -> Result<(), PathError> {
    fs::remove_dir(path.as_path()).map_err(|err| error::from_io(err, path.as_str()))
}

pub(crate) fn rename(from: &NormalizedPath, to: &NormalizedPath) -> Result<(), PathError> {
    fs::rename(from.as_path(), to.as_path()).map_err(|err| error::from_io(err, from.as_str()))
}
