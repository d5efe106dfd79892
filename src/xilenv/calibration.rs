//-----------------------------------------------------------------------------
// Module calibration
// SVL/SAL files and raw symbol access of external processes

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

use super::XilEnv;
use crate::error::{XilEnvError, XilEnvResult};
use crate::rpc::types::{BbVari, SYMBOL_RAW_NO_ERROR_MESSAGE};
use crate::rpc::{rpc_call, rpc_name, rpc_status, to_cstring};
use crate::value::{BbDataType, RawValue};

impl XilEnv {
    /// Load a SVL file into an external process
    pub fn load_svl(&self, svl_file: &str, process: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let c_svl_file = to_cstring(svl_file)?;
        let c_process = to_cstring(process)?;
        rpc_status!(rpc, LoadSvl(c_svl_file.as_ptr(), c_process.as_ptr()))?;
        info!("Loaded {} into {}", svl_file, process);
        Ok(())
    }

    /// Save the symbols of an external process matching filter into a SVL file
    pub fn save_svl(&self, svl_file: &str, process: &str, filter: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let svl_file = to_cstring(svl_file)?;
        let process = to_cstring(process)?;
        let filter = to_cstring(filter)?;
        rpc_status!(rpc, SaveSvl(svl_file.as_ptr(), process.as_ptr(), filter.as_ptr()))?;
        Ok(())
    }

    pub fn save_sal(&self, sal_file: &str, process: &str, filter: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let sal_file = to_cstring(sal_file)?;
        let process = to_cstring(process)?;
        let filter = to_cstring(filter)?;
        rpc_status!(rpc, SaveSal(sal_file.as_ptr(), process.as_ptr(), filter.as_ptr()))?;
        Ok(())
    }

    /// Read a symbol of an external process, the data type is given by its debug info
    pub fn get_symbol_raw(&self, process: &str, symbol: &str, flags: i32) -> XilEnvResult<RawValue> {
        let rpc = self.rpc()?;
        let c_process = to_cstring(process)?;
        let c_symbol = to_cstring(symbol)?;
        let mut vari = BbVari::default();
        let data_type = rpc_call!(rpc, GetSymbolRaw(c_process.as_ptr(), c_symbol.as_ptr(), flags | SYMBOL_RAW_NO_ERROR_MESSAGE, &mut vari))?;
        if data_type < 0 {
            debug!("GetSymbolRaw {}::{} returned {}", process, symbol, data_type);
            return Err(XilEnvError::native(rpc_name!(GetSymbolRaw), data_type));
        }
        RawValue::from_vari(BbDataType::try_from(data_type)?, vari)
    }

    /// Write a symbol of an external process, the value is converted to the data type of the symbol
    pub fn set_symbol_raw(&self, process: &str, symbol: &str, value: RawValue, flags: i32) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let process = to_cstring(process)?;
        let symbol = to_cstring(symbol)?;
        rpc_status!(
            rpc,
            SetSymbolRaw(process.as_ptr(), symbol.as_ptr(), flags | SYMBOL_RAW_NO_ERROR_MESSAGE, value.data_type().to_raw(), value.to_vari())
        )?;
        Ok(())
    }
}
