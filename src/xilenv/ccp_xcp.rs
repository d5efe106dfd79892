//-----------------------------------------------------------------------------
// Module ccp_xcp
// CCP and XCP measurement and calibration through the XilEnv protocol stacks
// The connection index selects one of the configured ECU connections

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

use super::XilEnv;
use crate::error::XilEnvResult;
use crate::rpc::{rpc_status, to_cstring};

/// Calibration protocol of a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    Ccp,
    Xcp,
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Protocol::Ccp => write!(f, "CCP"),
            Protocol::Xcp => write!(f, "XCP"),
        }
    }
}

impl XilEnv {
    /// Load the protocol configuration of a connection
    pub fn load_protocol_config(&self, protocol: Protocol, connection: i32, config_file: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let c_config_file = to_cstring(config_file)?;
        match protocol {
            Protocol::Ccp => rpc_status!(rpc, LoadCCPConfig(connection, c_config_file.as_ptr()))?,
            Protocol::Xcp => rpc_status!(rpc, LoadXCPConfig(connection, c_config_file.as_ptr()))?,
        };
        info!("Loaded {} config {} for connection {}", protocol, config_file, connection);
        Ok(())
    }

    /// Start a measurement with a list of ECU variables
    /// Wraps the begin, add variable and end sequence
    pub fn start_measurement(&self, protocol: Protocol, connection: i32, variables: &[&str]) -> XilEnvResult<()> {
        self.measurement_begin(protocol, connection)?;
        for variable in variables {
            self.measurement_add_var(protocol, connection, variable)?;
        }
        self.measurement_end(protocol, connection)?;
        info!("Started {} measurement of {} variables on connection {}", protocol, variables.len(), connection);
        Ok(())
    }

    pub fn measurement_begin(&self, protocol: Protocol, connection: i32) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        match protocol {
            Protocol::Ccp => rpc_status!(rpc, StartCCPBegin(connection))?,
            Protocol::Xcp => rpc_status!(rpc, StartXCPBegin(connection))?,
        };
        Ok(())
    }

    pub fn measurement_add_var(&self, protocol: Protocol, connection: i32, label: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let label = to_cstring(label)?;
        match protocol {
            Protocol::Ccp => rpc_status!(rpc, StartCCPAddVar(connection, label.as_ptr()))?,
            Protocol::Xcp => rpc_status!(rpc, StartXCPAddVar(connection, label.as_ptr()))?,
        };
        Ok(())
    }

    pub fn measurement_end(&self, protocol: Protocol, connection: i32) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        match protocol {
            Protocol::Ccp => rpc_status!(rpc, StartCCPEnd(connection))?,
            Protocol::Xcp => rpc_status!(rpc, StartXCPEnd(connection))?,
        };
        Ok(())
    }

    pub fn stop_measurement(&self, protocol: Protocol, connection: i32) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        match protocol {
            Protocol::Ccp => rpc_status!(rpc, StopCCP(connection))?,
            Protocol::Xcp => rpc_status!(rpc, StopXCP(connection))?,
        };
        Ok(())
    }

    /// Start calibration of a list of ECU parameters
    pub fn start_calibration(&self, protocol: Protocol, connection: i32, parameters: &[&str]) -> XilEnvResult<()> {
        self.calibration_begin(protocol, connection)?;
        for parameter in parameters {
            self.calibration_add_var(protocol, connection, parameter)?;
        }
        self.calibration_end(protocol, connection)?;
        info!("Started {} calibration of {} parameters on connection {}", protocol, parameters.len(), connection);
        Ok(())
    }

    pub fn calibration_begin(&self, protocol: Protocol, connection: i32) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        match protocol {
            Protocol::Ccp => rpc_status!(rpc, StartCCPCalBegin(connection))?,
            Protocol::Xcp => rpc_status!(rpc, StartXCPCalBegin(connection))?,
        };
        Ok(())
    }

    pub fn calibration_add_var(&self, protocol: Protocol, connection: i32, label: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let label = to_cstring(label)?;
        match protocol {
            Protocol::Ccp => rpc_status!(rpc, StartCCPCalAddVar(connection, label.as_ptr()))?,
            Protocol::Xcp => rpc_status!(rpc, StartXCPCalAddVar(connection, label.as_ptr()))?,
        };
        Ok(())
    }

    pub fn calibration_end(&self, protocol: Protocol, connection: i32) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        match protocol {
            Protocol::Ccp => rpc_status!(rpc, StartCCPCalEnd(connection))?,
            Protocol::Xcp => rpc_status!(rpc, StartXCPCalEnd(connection))?,
        };
        Ok(())
    }

    pub fn stop_calibration(&self, protocol: Protocol, connection: i32) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        match protocol {
            Protocol::Ccp => rpc_status!(rpc, StopCCPCal(connection))?,
            Protocol::Xcp => rpc_status!(rpc, StopXCPCal(connection))?,
        };
        Ok(())
    }
}
