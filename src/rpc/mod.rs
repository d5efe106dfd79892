//-----------------------------------------------------------------------------
// Module rpc
// Loader and typed bindings of the XilEnvRpc shared library

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

use std::ffi::{c_char, CStr, CString};
use std::path::{Path, PathBuf};

use libloading::Library;

use crate::error::{XilEnvError, XilEnvResult};

pub mod functions;
pub use functions::RpcFunctions;

pub mod types;

#[cfg(test)]
pub(crate) mod fake;

//-----------------------------------------------------------------------------
// Call a XilEnvRpc export through a RpcFunctions table
// Evaluates to XilEnvResult<return type>, MissingSymbol if the export was not resolved

macro_rules! rpc_call {
    ($functions:expr, $name:ident ( $( $arg:expr ),* $(,)? )) => {
        match $functions.$name {
            Some(f) => {
                // @@@@ Unsafe - C library call
                Ok(unsafe { f( $( $arg ),* ) })
            }
            None => Err($crate::error::XilEnvError::MissingSymbol(concat!("XilEnv_", stringify!($name)))),
        }
    };
}
pub(crate) use rpc_call;

// Call a XilEnvRpc export returning a status code, negative codes are errors
macro_rules! rpc_status {
    ($functions:expr, $name:ident ( $( $arg:expr ),* $(,)? )) => {
        $crate::rpc::rpc_call!($functions, $name( $( $arg ),* ))
            .and_then(|status| $crate::error::check_status(concat!("XilEnv_", stringify!($name)), status))
    };
}
pub(crate) use rpc_status;

// Name of a XilEnvRpc export for error reporting
macro_rules! rpc_name {
    ($name:ident) => {
        concat!("XilEnv_", stringify!($name))
    };
}
pub(crate) use rpc_name;

//-----------------------------------------------------------------------------
// Platform specific file names

/// File names of the XilEnv installation for one platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformFiles {
    pub library: &'static str,
    pub executable: &'static str,
    pub gui_executable: &'static str,
}

impl PlatformFiles {
    /// File names for an operating system name as in std::env::consts::OS
    pub fn for_os(os: &str) -> XilEnvResult<PlatformFiles> {
        match os {
            "windows" => Ok(PlatformFiles {
                library: "XilEnvRpc.dll",
                executable: "XilEnv.exe",
                gui_executable: "XilEnvGui.exe",
            }),
            "linux" => Ok(PlatformFiles {
                library: "libXilEnvRpc.so",
                executable: "XilEnv",
                gui_executable: "XilEnvGui",
            }),
            _ => Err(XilEnvError::UnsupportedPlatform(os.to_string())),
        }
    }

    /// File names for the host platform
    pub fn host() -> XilEnvResult<PlatformFiles> {
        PlatformFiles::for_os(std::env::consts::OS)
    }
}

//-----------------------------------------------------------------------------
// RpcLibrary

// Exports without which no session can be established
const REQUIRED_EXPORTS: [&str; 4] = [rpc_name!(GetAPIVersion), rpc_name!(ConnectTo), rpc_name!(IsConnectedTo), rpc_name!(DisconnectFrom)];

/// A loaded XilEnvRpc library and its resolved exports
/// The function pointers in functions are valid as long as the library is loaded
pub struct RpcLibrary {
    path: PathBuf,
    functions: RpcFunctions,
    _library: Option<Library>,
}

impl std::fmt::Debug for RpcLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcLibrary").field("path", &self.path).field("functions", &self.functions).finish()
    }
}

impl RpcLibrary {
    /// Load the XilEnvRpc library of a XilEnv installation directory
    pub fn load(install_path: &Path) -> XilEnvResult<RpcLibrary> {
        let files = PlatformFiles::host()?;
        RpcLibrary::load_file(&install_path.join(files.library))
    }

    /// Load a XilEnvRpc library file
    pub fn load_file(path: &Path) -> XilEnvResult<RpcLibrary> {
        if !path.is_file() {
            error!("XilEnvRpc library {} not found", path.display());
            return Err(XilEnvError::LibraryNotFound(path.to_path_buf()));
        }

        // @@@@ Unsafe - loading a shared library runs its initialization code
        let library = unsafe { Library::new(path)? };
        let functions = RpcFunctions::resolve(&library);
        for name in REQUIRED_EXPORTS {
            if functions.missing().contains(&name) {
                error!("XilEnvRpc library {} does not export {}", path.display(), name);
                return Err(XilEnvError::MissingSymbol(name));
            }
        }
        let missing = functions.missing();
        if !missing.is_empty() {
            warn!("XilEnvRpc library {} misses {} exports: {:?}", path.display(), missing.len(), missing);
        }
        info!("Loaded {} with {} exports", path.display(), functions.count());

        Ok(RpcLibrary {
            path: path.to_path_buf(),
            functions,
            _library: Some(library),
        })
    }

    /// Create a binding from a function table, without loading a library
    /// Used to run sessions against functions implemented in Rust
    pub fn from_functions(name: &str, functions: RpcFunctions) -> RpcLibrary {
        RpcLibrary {
            path: PathBuf::from(name),
            functions,
            _library: None,
        }
    }

    pub fn get_path(&self) -> &Path {
        &self.path
    }

    pub fn functions(&self) -> &RpcFunctions {
        &self.functions
    }
}

//-----------------------------------------------------------------------------
// String marshalling helpers

pub(crate) fn to_cstring(s: &str) -> XilEnvResult<CString> {
    Ok(CString::new(s)?)
}

/// Copy a string returned by XilEnvRpc, None for a null pointer
/// The returned memory is owned by XilEnvRpc and only valid until the next call
pub(crate) fn from_cstr(p: *const c_char) -> Option<String> {
    if p.is_null() {
        None
    } else {
        // @@@@ Unsafe - p points to a null terminated string owned by XilEnvRpc
        Some(unsafe { CStr::from_ptr(p) }.to_string_lossy().into_owned())
    }
}
