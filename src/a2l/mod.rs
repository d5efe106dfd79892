//-----------------------------------------------------------------------------
// Module a2l
// Access to measurements and characteristics of external processes through A2L links

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

use std::ffi::c_char;

use crate::error::{check_handle, XilEnvError, XilEnvResult};
use crate::rpc::types::{A2lGetFlags, A2lLabelType, A2lLinkFlags, LinkReferenceDirection};
use crate::rpc::{from_cstr, rpc_call, rpc_name, rpc_status, to_cstring};
use crate::xilenv::XilEnv;

pub mod a2l_data;
pub mod a2l_value;

pub use a2l_data::A2lData;
pub use a2l_value::{A2lArray, A2lDataType, A2lElem, A2lElemType, A2lTargetType, A2lValue};

// Size of the label buffer of XilEnv_GetNextSymbolFromLink
const MAX_LABEL_LEN: usize = 512;

impl XilEnv {
    /// Connect the A2L file to a running external process
    pub fn setup_link_to_extern_process(&self, a2l_file: &str, process: &str, flags: A2lLinkFlags) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let c_a2l_file = to_cstring(a2l_file)?;
        let c_process = to_cstring(process)?;
        rpc_status!(rpc, SetupLinkToExternProcess(c_a2l_file.as_ptr(), c_process.as_ptr(), flags.bits()))?;
        info!("Linked {} to {}", a2l_file, process);
        Ok(())
    }

    /// Link number of the A2L link of a process
    pub fn get_link_to_extern_process(&self, process: &str) -> XilEnvResult<i32> {
        let rpc = self.rpc()?;
        let c_process = to_cstring(process)?;
        check_handle(rpc_name!(GetLinkToExternProcess), rpc_call!(rpc, GetLinkToExternProcess(c_process.as_ptr()))?)
    }

    /// Index of a label inside a link
    pub fn get_index_from_link(&self, link: i32, label: &str, label_type: A2lLabelType) -> XilEnvResult<i32> {
        let rpc = self.rpc()?;
        let c_label = to_cstring(label)?;
        let index = rpc_call!(rpc, GetIndexFromLink(link, c_label.as_ptr(), label_type.bits()))?;
        if index < 0 {
            return Err(XilEnvError::Link {
                label: label.to_string(),
                message: format!("not found in link {}", link),
            });
        }
        Ok(index)
    }

    /// Next label matching type mask and filter, starting with index -1
    /// Returns the index to continue with and the label, None at the end
    pub fn get_next_symbol_from_link(&self, link: i32, index: i32, label_type: A2lLabelType, filter: &str) -> XilEnvResult<Option<(i32, String)>> {
        let rpc = self.rpc()?;
        let c_filter = to_cstring(filter)?;
        let mut buf = [0 as c_char; MAX_LABEL_LEN];
        let next = rpc_call!(
            rpc,
            GetNextSymbolFromLink(link, index, label_type.bits(), c_filter.as_ptr(), buf.as_mut_ptr(), MAX_LABEL_LEN as i32)
        )?;
        if next < 0 {
            return Ok(None);
        }
        Ok(Some((next, from_cstr(buf.as_ptr()).unwrap_or_default())))
    }

    /// All labels of a link matching type mask and filter
    pub fn get_symbols_from_link(&self, link: i32, label_type: A2lLabelType, filter: &str) -> XilEnvResult<Vec<String>> {
        let mut labels = Vec::new();
        let mut index = -1;
        while let Some((next, label)) = self.get_next_symbol_from_link(link, index, label_type, filter)? {
            labels.push(label);
            index = next;
        }
        debug!("{} labels matching {} in link {}", labels.len(), filter, link);
        Ok(labels)
    }

    /// Read a measurement or characteristic from the external process
    /// The returned copy is freed when it is dropped
    pub fn fetch_a2l_data(&self, link: i32, label: &str, flags: A2lGetFlags, label_type: A2lLabelType) -> XilEnvResult<A2lData<'_>> {
        let rpc = self.rpc()?;
        let index = self.get_index_from_link(link, label, label_type)?;
        let mut error_text: *const c_char = std::ptr::null();
        let data = rpc_call!(rpc, GetDataFromLink(link, index, std::ptr::null_mut(), flags.bits(), &mut error_text))?;
        if data.is_null() {
            let message = from_cstr(error_text).unwrap_or_else(|| format!("{} returned no data", rpc_name!(GetDataFromLink)));
            error!("Fetch of {} failed: {}", label, message);
            return Err(XilEnvError::Link { label: label.to_string(), message });
        }
        trace!("Fetched {} from link {} index {}", label, link, index);
        Ok(A2lData::new(rpc, link, index, label, data))
    }

    /// Create a blackboard variable for a measurement of the link
    pub fn reference_measurement_to_blackboard(&self, link: i32, index: i32, direction: LinkReferenceDirection) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        rpc_status!(rpc, ReferenceMeasurementToBlackboard(link, index, direction.to_raw()))?;
        Ok(())
    }

    pub fn dereference_measurement_from_blackboard(&self, link: i32, index: i32) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        rpc_status!(rpc, DereferenceMeasurementFromBlackboard(link, index))?;
        Ok(())
    }
}
