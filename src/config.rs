//-----------------------------------------------------------------------------
// Module config
// Session configuration, loadable from a json file

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{XilEnvError, XilEnvResult};

/// Environment variable with the XilEnv installation directory
pub const XILENV_INSTALL_PATH: &str = "XILENV_INSTALL_PATH";

/// Blackboard variables attached after a successful connect
pub const DEFAULT_VARIABLES: [&str; 15] = [
    "XilEnv.CycleCounter",
    "XilEnv.EquationCalculator",
    "XilEnv.exit",
    "XilEnv.ExitCode",
    "XilEnv.Generator",
    "XilEnv.Realtime",
    "XilEnv.RealtimeFactor",
    "XilEnv.SampleFrequency",
    "XilEnv.SampleTime",
    "XilEnv.Script",
    "XilEnv.StimulusPlayer",
    "XilEnv.StimulusPlayer.suspend",
    "XilEnv.TraceRecorder",
    "XilEnv.Version",
    "XilEnv.Version.Patch",
];

/// Blackboard variable with the scheduler sample frequency in Hz
pub const SAMPLE_FREQUENCY_VARIABLE: &str = "XilEnv.SampleFrequency";

//-----------------------------------------------------------------------------
// XilEnvConfig

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XilEnvConfig {
    /// XilEnv installation directory with the XilEnvRpc library and the executables
    pub install_path: Option<PathBuf>,
    /// Address of the XilEnv instance, empty for the local host
    pub address: String,
    /// Instance name, None for the default instance
    pub instance: Option<String>,
    /// Timeout of start and connect in seconds
    pub connect_timeout_s: u64,
    /// Delay after connect before the default variables are attached
    pub startup_delay_ms: u64,
    pub default_variables: Vec<String>,
}

impl Default for XilEnvConfig {
    fn default() -> Self {
        XilEnvConfig {
            install_path: None,
            address: String::new(),
            instance: None,
            connect_timeout_s: 5,
            startup_delay_ms: 1000,
            default_variables: DEFAULT_VARIABLES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl XilEnvConfig {
    /// Configuration with an explicit installation directory
    pub fn new<P: Into<PathBuf>>(install_path: P) -> XilEnvConfig {
        XilEnvConfig {
            install_path: Some(install_path.into()),
            ..Default::default()
        }
    }

    /// Load a configuration from a json file, missing fields get their default values
    pub fn load_json<P: AsRef<Path>>(path: P) -> XilEnvResult<XilEnvConfig> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: XilEnvConfig = serde_json::from_reader(reader)?;
        debug!("Loaded configuration {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Save the configuration to a json file
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> XilEnvResult<()> {
        let path = path.as_ref();
        let s = serde_json::to_string_pretty(self)?;
        std::fs::write(path, s)?;
        debug!("Saved configuration {}", path.display());
        Ok(())
    }

    /// Installation directory, from the configuration or from XILENV_INSTALL_PATH
    pub fn get_install_path(&self) -> XilEnvResult<PathBuf> {
        if let Some(path) = &self.install_path {
            return Ok(path.clone());
        }
        match std::env::var_os(XILENV_INSTALL_PATH) {
            Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
            _ => Err(XilEnvError::Config(format!("no install path given and {} is not set", XILENV_INSTALL_PATH))),
        }
    }

    pub fn get_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_s)
    }

    pub fn get_startup_delay(&self) -> Duration {
        Duration::from_millis(self.startup_delay_ms)
    }
}
