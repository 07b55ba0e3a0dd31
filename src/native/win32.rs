// native/win32.rs
use super::FindRecord;
use crate::error::{self, codes, PathError};
use crate::normalize::NormalizedPath;
use std::iter::once;

use windows_sys::Win32::Foundation::{
    GetLastError, FILETIME, HANDLE, INVALID_HANDLE_VALUE,
};
use windows_sys::Win32::Storage::FileSystem::{
    CreateDirectoryW, DeleteFileW, FindClose, FindFirstFileW, FindNextFileW, GetFileAttributesW,
    MoveFileExW, RemoveDirectoryW, INVALID_FILE_ATTRIBUTES, MOVEFILE_REPLACE_EXISTING,
    WIN32_FIND_DATAW,
};

pub(crate) fn to_wide(value: &str) -> Vec<u16> {
    value.encode_utf16().chain(once(0)).collect()
}

pub(crate) fn last_error() -> u32 {
    unsafe { GetLastError() }
}

fn wide_until_nul(name: &[u16]) -> &[u16] {
    let nul = name.iter().position(|c| *c == 0).unwrap_or(name.len());
    &name[..nul]
}

fn filetime_ticks(time: &FILETIME) -> u64 {
    ((time.dwHighDateTime as u64) << 32) | time.dwLowDateTime as u64
}

fn record_from_find_data(data: &WIN32_FIND_DATAW) -> FindRecord {
    FindRecord {
        attributes: data.dwFileAttributes,
        creation_time: filetime_ticks(&data.ftCreationTime),
        last_access_time: filetime_ticks(&data.ftLastAccessTime),
        last_write_time: filetime_ticks(&data.ftLastWriteTime),
        size_high: data.nFileSizeHigh,
        size_low: data.nFileSizeLow,
        name: String::from_utf16_lossy(wide_until_nul(&data.cFileName)),
        alternate_name: String::from_utf16_lossy(wide_until_nul(&data.cAlternateFileName)),
    }
}

/// An open `FindFirstFileW` search.
///
/// The first record arrives together with the handle, so it is parked in
/// `pending` until the first advance. An invalid handle doubles as the
/// exhausted state; `Drop` guarantees `FindClose` on every exit path.
pub(crate) struct Search {
    directory: String,
    handle: HANDLE,
    pending: Option<FindRecord>,
}

impl Search {
    pub(crate) fn open(directory: &NormalizedPath, pattern: &str) -> Result<Search, PathError> {
        let search_path = directory.join(pattern);
        let wide = to_wide(search_path.as_str());
        let mut data: WIN32_FIND_DATAW = unsafe { std::mem::zeroed() };
        let handle = unsafe { FindFirstFileW(wide.as_ptr(), &mut data) };
        if handle == INVALID_HANDLE_VALUE {
            let code = last_error();
            return match code {
                codes::ERROR_FILE_NOT_FOUND
                | codes::ERROR_PATH_NOT_FOUND
                | codes::ERROR_NO_MORE_FILES => Ok(Search {
                    directory: directory.as_str().to_string(),
                    handle: INVALID_HANDLE_VALUE,
                    pending: None,
                }),
                other => Err(error::translate(other, directory.as_str())),
            };
        }
        Ok(Search {
            directory: directory.as_str().to_string(),
            handle,
            pending: Some(record_from_find_data(&data)),
        })
    }

    pub(crate) fn next_record(&mut self) -> Result<Option<FindRecord>, PathError> {
        if let Some(record) = self.pending.take() {
            return Ok(Some(record));
        }
        if self.handle == INVALID_HANDLE_VALUE {
            return Ok(None);
        }
        let mut data: WIN32_FIND_DATAW = unsafe { std::mem::zeroed() };
        if unsafe { FindNextFileW(self.handle, &mut data) } != 0 {
            return Ok(Some(record_from_find_data(&data)));
        }
        let code = last_error();
        self.close();
        if code == codes::ERROR_NO_MORE_FILES {
            Ok(None)
        } else {
            Err(error::translate(code, &self.directory))
        }
    }

    fn close(&mut self) {
        if self.handle != INVALID_HANDLE_VALUE {
            unsafe {
                FindClose(self.handle);
            }
            self.handle = INVALID_HANDLE_VALUE;
        }
    }
}

impl Drop for Search {
    fn drop(&mut self) {
        self.close();
    }
}

pub(crate) fn attributes(path: &NormalizedPath) -> Result<u32, PathError> {
    let wide = to_wide(path.as_str());
    let attrs = unsafe { GetFileAttributesW(wide.as_ptr()) };
    if attrs == INVALID_FILE_ATTRIBUTES {
        return Err(error::translate(last_error(), path.as_str()));
    }
    Ok(attrs)
}

pub(crate) fn create_directory(path: &NormalizedPath) -> Result<(), PathError> {
    let wide = to_wide(path.as_str());
    if unsafe { CreateDirectoryW(wide.as_ptr(), std::ptr::null()) } == 0 {
        return Err(error::translate(last_error(), path.as_str()));
    }
    Ok(())
}

pub(crate) fn delete_file(path: &NormalizedPath) -> Result<(), PathError> {
    let wide = to_wide(path.as_str());
    if unsafe { DeleteFileW(wide.as_ptr()) } == 0 {
        return Err(error::translate(last_error(), path.as_str()));
    }
    Ok(())
}

pub(crate) fn remove_directory(path: &NormalizedPath) -> Result<(), PathError> {
    let wide = to_wide(path.as_str());
    if unsafe { RemoveDirectoryW(wide.as_ptr()) } == 0 {
        return Err(error::translate(last_error(), path.as_str()));
    }
    Ok(())
}

pub(crate) fn rename(from: &NormalizedPath, to: &NormalizedPath) -> Result<(), PathError> {
    let from_wide = to_wide(from.as_str());
    let to_wide_path = to_wide(to.as_str());
    let ok = unsafe {
        MoveFileExW(
            from_wide.as_ptr(),
            to_wide_path.as_ptr(),
            MOVEFILE_REPLACE_EXISTING,
        )
    };
    if ok == 0 {
        return Err(error::translate(last_error(), from.as_str()));
    }
    Ok(())
}
