//-----------------------------------------------------------------------------
// Module xilenv
// XilEnv session: connection state, attached variables and the engine process

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::process::Child;

use lazy_static::lazy_static;
use parking_lot::Mutex;

use crate::config::XilEnvConfig;
use crate::error::{check_status, XilEnvError, XilEnvResult};
use crate::rpc::{from_cstr, rpc_call, rpc_name, to_cstring, RpcFunctions, RpcLibrary};

pub mod automation;
pub mod blackboard;
pub mod calibration;
pub mod can;
pub mod ccp_xcp;
pub mod gui;
pub mod scheduler;

pub use can::CanMessage;

//-----------------------------------------------------------------------------
// Connected XilEnvRpc modules

// A XilEnvRpc module holds one connection per process
// Sessions sharing a module would share this connection, so only one of them may be connected
lazy_static! {
    static ref CONNECTED_MODULES: Mutex<HashSet<PathBuf>> = Mutex::new(HashSet::new());
}

fn claim_module(path: &Path) -> bool {
    CONNECTED_MODULES.lock().insert(path.to_path_buf())
}

fn release_module(path: &Path) {
    CONNECTED_MODULES.lock().remove(path);
}

//-----------------------------------------------------------------------------
// XilEnv

/// Session to a XilEnv simulation engine through the XilEnvRpc library
/// All remote operations require a connection, they fail with NotConnected otherwise and the library is not called
#[derive(Debug)]
pub struct XilEnv {
    rpc: RpcLibrary,
    config: XilEnvConfig,
    connected: bool,
    process: Option<Child>,
    attached: HashMap<String, i32>,
}

impl XilEnv {
    /// Load the XilEnvRpc library of the configured installation
    pub fn new(config: XilEnvConfig) -> XilEnvResult<XilEnv> {
        let install_path = config.get_install_path()?;
        let rpc = RpcLibrary::load(&install_path)?;
        Ok(XilEnv::with_library(rpc, config))
    }

    /// Load the XilEnvRpc library from an installation directory with default configuration
    pub fn with_install_path<P: Into<PathBuf>>(install_path: P) -> XilEnvResult<XilEnv> {
        XilEnv::new(XilEnvConfig::new(install_path))
    }

    /// Create a session on an already loaded library
    pub fn with_library(rpc: RpcLibrary, config: XilEnvConfig) -> XilEnv {
        XilEnv {
            rpc,
            config,
            connected: false,
            process: None,
            attached: HashMap::new(),
        }
    }

    pub fn get_config(&self) -> &XilEnvConfig {
        &self.config
    }

    pub fn get_library(&self) -> &RpcLibrary {
        &self.rpc
    }

    /// Function table of a connected session
    pub(crate) fn rpc(&self) -> XilEnvResult<&RpcFunctions> {
        if self.connected {
            Ok(self.rpc.functions())
        } else {
            Err(XilEnvError::NotConnected)
        }
    }

    //-------------------------------------------------------------------------
    // Connect

    fn connect_with<F>(&mut self, function: &'static str, connect: F) -> XilEnvResult<()>
    where
        F: FnOnce(&RpcFunctions) -> XilEnvResult<i32>,
    {
        if self.connected {
            return Err(XilEnvError::AlreadyConnected);
        }
        if !claim_module(self.rpc.get_path()) {
            warn!("{} is already connected by another session", self.rpc.get_path().display());
            return Err(XilEnvError::AlreadyConnected);
        }
        match connect(self.rpc.functions()) {
            Ok(0) => {
                self.connected = true;
                info!("Connected to XilEnv");
                Ok(())
            }
            Ok(code) => {
                release_module(self.rpc.get_path());
                debug!("{} returned {}", function, code);
                Err(XilEnvError::native(function, code))
            }
            Err(e) => {
                release_module(self.rpc.get_path());
                Err(e)
            }
        }
    }

    /// Connect to a XilEnv instance, an empty address is the local host
    pub fn connect_to(&mut self, address: &str) -> XilEnvResult<()> {
        let address = to_cstring(address)?;
        self.connect_with(rpc_name!(ConnectTo), |rpc| rpc_call!(rpc, ConnectTo(address.as_ptr())))
    }

    /// Connect to a named XilEnv instance
    pub fn connect_to_instance(&mut self, address: &str, instance: &str) -> XilEnvResult<()> {
        let address = to_cstring(address)?;
        let instance = to_cstring(instance)?;
        self.connect_with(rpc_name!(ConnectToInstance), |rpc| {
            rpc_call!(rpc, ConnectToInstance(address.as_ptr(), instance.as_ptr()))
        })
    }

    fn set_disconnected(&mut self) {
        self.connected = false;
        self.attached.clear();
        release_module(self.rpc.get_path());
    }

    /// Disconnect, XilEnv keeps running
    pub fn disconnect_from(&mut self) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let status = rpc_call!(rpc, DisconnectFrom())?;
        if status != 0 {
            return Err(XilEnvError::native(rpc_name!(DisconnectFrom), status));
        }
        self.set_disconnected();
        info!("Disconnected from XilEnv");
        Ok(())
    }

    /// Disconnect and terminate XilEnv, optionally with an error level as exit code
    pub fn disconnect_and_close(&mut self, error_level: Option<i32>) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let (flag, level) = match error_level {
            Some(level) => (1, level),
            None => (0, 0),
        };
        let status = rpc_call!(rpc, DisconnectAndClose(flag, level))?;
        if status != 0 {
            return Err(XilEnvError::native(rpc_name!(DisconnectAndClose), status));
        }
        self.set_disconnected();
        info!("Disconnected from XilEnv and closed it");
        Ok(())
    }

    /// Connection state of this session
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Ask XilEnvRpc if the connection is alive
    pub fn is_connected_to(&self) -> XilEnvResult<bool> {
        Ok(rpc_call!(self.rpc.functions(), IsConnectedTo())? != 0)
    }

    //-------------------------------------------------------------------------
    // Versions

    /// Version of the connected XilEnv
    pub fn get_version(&self) -> XilEnvResult<i32> {
        let rpc = self.rpc()?;
        check_status(rpc_name!(GetVersion), rpc_call!(rpc, GetVersion())?)
    }

    /// Version of the loaded XilEnvRpc library, available without connection
    pub fn get_api_version(&self) -> XilEnvResult<i32> {
        rpc_call!(self.rpc.functions(), GetAPIVersion())
    }

    pub fn get_api_alternative_version(&self) -> XilEnvResult<i32> {
        rpc_call!(self.rpc.functions(), GetAPIAlternativeVersion())
    }

    pub fn get_api_module_path(&self) -> XilEnvResult<String> {
        let p = rpc_call!(self.rpc.functions(), GetAPIModulePath())?;
        from_cstr(p).ok_or(XilEnvError::native(rpc_name!(GetAPIModulePath), -1))
    }

    //-------------------------------------------------------------------------
    // Files, environment and settings

    /// Create a file with content on the XilEnv host
    pub fn create_file_with_content(&self, filename: &str, content: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let filename = to_cstring(filename)?;
        let content = to_cstring(content)?;
        check_status(rpc_name!(CreateFileWithContent), rpc_call!(rpc, CreateFileWithContent(filename.as_ptr(), content.as_ptr()))?)?;
        Ok(())
    }

    /// Copy a file of the XilEnv host to the local host
    pub fn copy_file_to_local(&self, source: &str, destination: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let source = to_cstring(source)?;
        let destination = to_cstring(destination)?;
        check_status(rpc_name!(CopyFileToLocal), rpc_call!(rpc, CopyFileToLocal(source.as_ptr(), destination.as_ptr()))?)?;
        Ok(())
    }

    /// Copy a local file to the XilEnv host
    pub fn copy_file_from_local(&self, source: &str, destination: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let source = to_cstring(source)?;
        let destination = to_cstring(destination)?;
        check_status(rpc_name!(CopyFileFromLocal), rpc_call!(rpc, CopyFileFromLocal(source.as_ptr(), destination.as_ptr()))?)?;
        Ok(())
    }

    /// Value of a XilEnv environment variable, None if it is not defined
    pub fn get_environ_var(&self, name: &str) -> XilEnvResult<Option<String>> {
        let rpc = self.rpc()?;
        let name = to_cstring(name)?;
        Ok(from_cstr(rpc_call!(rpc, GetEnvironVar(name.as_ptr()))?))
    }

    pub fn set_environ_var(&self, name: &str, value: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let name = to_cstring(name)?;
        let value = to_cstring(value)?;
        check_status(rpc_name!(SetEnvironVar), rpc_call!(rpc, SetEnvironVar(name.as_ptr(), value.as_ptr()))?)?;
        Ok(())
    }

    /// Change a XilEnv setting, for example NOT_FASTER_THAN_REALTIME
    pub fn change_settings(&self, setting: &str, value: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let setting = to_cstring(setting)?;
        let value = to_cstring(value)?;
        check_status(rpc_name!(ChangeSettings), rpc_call!(rpc, ChangeSettings(setting.as_ptr(), value.as_ptr()))?)?;
        Ok(())
    }

    /// Print a line in the XilEnv output window
    pub fn text_out(&self, text: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let text = to_cstring(text)?;
        check_status(rpc_name!(TextOut), rpc_call!(rpc, TextOut(text.as_ptr()))?)?;
        Ok(())
    }

    /// Print a message with an error level in XilEnv
    pub fn error_text_out(&self, error_level: i32, text: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let text = to_cstring(text)?;
        check_status(rpc_name!(ErrorTextOut), rpc_call!(rpc, ErrorTextOut(error_level, text.as_ptr()))?)?;
        Ok(())
    }
}

impl Drop for XilEnv {
    fn drop(&mut self) {
        if self.connected {
            debug!("Drop connected session, disconnect");
            if let Err(e) = self.disconnect_from() {
                warn!("Disconnect failed: {}", e);
                self.set_disconnected();
            }
        }
    }
}

//-----------------------------------------------------------------------------
