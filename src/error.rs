//-----------------------------------------------------------------------------
// Module error
// Error type of all XilEnv client operations

use std::ffi::NulError;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum XilEnvError {
    #[error("platform {0} is not supported by XilEnvRpc")]
    UnsupportedPlatform(String),

    #[error("XilEnvRpc library not found: {}", .0.display())]
    LibraryNotFound(PathBuf),

    #[error("XilEnv executable not found: {}", .0.display())]
    ExecutableNotFound(PathBuf),

    #[error("failed to load XilEnvRpc library: {0}")]
    Load(#[from] libloading::Error),

    #[error("XilEnvRpc library does not export {0}")]
    MissingSymbol(&'static str),

    #[error("not connected to XilEnv")]
    NotConnected,

    #[error("already connected to XilEnv")]
    AlreadyConnected,

    #[error("XilEnv process {0} started by this session is still running")]
    AlreadyStarted(u32),

    #[error("{function} failed with {code}")]
    NativeCall { function: &'static str, code: i64 },

    #[error("variable {0} does not exist in the blackboard")]
    VariableNotFound(String),

    #[error("variable {0} is not attached")]
    NotAttached(String),

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch { expected: Vec<usize>, found: Vec<usize> },

    #[error("length mismatch: {left} != {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("unknown data type {0}")]
    UnknownDataType(i32),

    #[error("A2L link error for {label}: {message}")]
    Link { label: String, message: String },

    #[error("could not connect to XilEnv within {timeout_s}s")]
    ConnectTimeout { timeout_s: u64 },

    #[error("string contains a NUL byte: {0}")]
    InvalidString(#[from] NulError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type XilEnvResult<T> = Result<T, XilEnvError>;

impl XilEnvError {
    pub fn native(function: &'static str, code: impl Into<i64>) -> XilEnvError {
        XilEnvError::NativeCall { function, code: code.into() }
    }
}

impl From<serde_json::Error> for XilEnvError {
    fn from(e: serde_json::Error) -> Self {
        XilEnvError::Config(e.to_string())
    }
}

//-----------------------------------------------------------------------------
// Status code conversion

/// Native status codes are negative on failure
pub(crate) fn check_status(function: &'static str, status: i32) -> XilEnvResult<i32> {
    if status < 0 { Err(XilEnvError::native(function, status)) } else { Ok(status) }
}

/// Native handles (variable ids, link numbers) are positive on success
pub(crate) fn check_handle(function: &'static str, handle: i32) -> XilEnvResult<i32> {
    if handle <= 0 { Err(XilEnvError::native(function, handle)) } else { Ok(handle) }
}
