//! Error handling stuff
use displaydoc::Display;
use nix::errno::Errno;
use std::io;
use thiserror::Error;

pub type Result<T, E = SysctlError> = std::result::Result<T, E>;

/// Direction of a failed parameter access, for [`SysctlError::UnknownIo`]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// reading
    Read,

    /// setting
    Write,
}

/// Classification of an OS error code.
///
/// Only the two errors the kernel uses to say "no such parameter" and "not
/// allowed" get their own class, everything else keeps the raw code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsError {
    /// `ENOENT`
    NotFound,

    /// `EACCES`
    PermissionDenied,

    /// Anything else, with the raw `errno`
    Other(i32),
}

impl OsError {
    /// Classify a raw `errno` value
    pub fn from_raw(code: i32) -> Self {
        match Errno::from_i32(code) {
            Errno::ENOENT => OsError::NotFound,
            Errno::EACCES => OsError::PermissionDenied,
            _ => OsError::Other(code),
        }
    }

    /// Classify an [`io::Error`].
    ///
    /// Errors not carrying an OS code fall back to their [`io::ErrorKind`],
    /// and are reported with a code of `0` if that doesn't help either.
    pub fn from_io(e: &io::Error) -> Self {
        match e.raw_os_error() {
            Some(code) => Self::from_raw(code),
            None => match e.kind() {
                io::ErrorKind::NotFound => OsError::NotFound,
                io::ErrorKind::PermissionDenied => OsError::PermissionDenied,
                _ => OsError::Other(0),
            },
        }
    }
}

/// Error type for [`crate::Sysctl`]
///
/// The [`std::fmt::Display`] form of each variant is the exact message
/// printed on the error stream.
#[derive(Debug, Display, Error)]
pub enum SysctlError {
    /// error: Unknown parameter '{0}'
    UnknownParameter(String),

    /// error: Malformed setting '{0}'
    MalformedSetting(String),

    /// error: '{0}' must be of the form name=value
    NoEquals(String),

    /// error: '{0}' is an unknown key
    InvalidKey(String),

    /// error: permission denied on key '{0}'
    PermissionDenied(String),

    /// error: unknown error {code} {op} key '{key}'
    UnknownIo {
        code: i32,
        op: Operation,
        key: String,
    },

    /// error: unable to open directory '{0}'
    OpenDir(String),

    /// error: unable to open preload file '{0}'
    PreloadFile(String),

    /// error: unable to read preload file '{file}': {source}
    PreloadRead { file: String, source: io::Error },

    /// warning: {file}({line}): invalid syntax, continuing...
    BadPreloadLine { file: String, line: usize },

    /// {path}: {source}
    Metadata { path: String, source: io::Error },

    /// error: {0}
    Output(#[from] io::Error),
}

impl SysctlError {
    /// Build the error for a failed access to `key`, from the OS error.
    pub(crate) fn access(key: &str, op: Operation, e: &io::Error) -> Self {
        match OsError::from_io(e) {
            OsError::NotFound => SysctlError::InvalidKey(key.into()),
            OsError::PermissionDenied => SysctlError::PermissionDenied(key.into()),
            OsError::Other(code) => SysctlError::UnknownIo {
                code,
                op,
                key: key.into(),
            },
        }
    }

    /// Process exit code contributed by this error.
    ///
    /// Aggregate statuses are the bitwise OR of these.
    pub fn code(&self) -> i32 {
        match self {
            SysctlError::MalformedSetting(_) => -2,
            _ => -1,
        }
    }
}
