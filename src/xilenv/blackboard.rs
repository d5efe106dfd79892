//-----------------------------------------------------------------------------
// Module blackboard
// Blackboard variable access: create, attach, read, write, properties and frames

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

use super::XilEnv;
use crate::error::{check_handle, XilEnvError, XilEnvResult};
use crate::rpc::types::{AccessFlags, BbVari, ConversionType, ReferenceSymbolFlags, COLOR_UNDEFINED, PREC_UNDEFINED, WIDTH_UNDEFINED};
use crate::rpc::{from_cstr, rpc_call, rpc_name, rpc_status, to_cstring};
use crate::value::{BbDataType, RawValue};

//-----------------------------------------------------------------------------
// SymbolReference

/// Parameters of XilEnv_ReferenceSymbol
/// Properties with undefined values keep the blackboard defaults
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolReference {
    /// Symbol name inside the external process
    pub symbol: String,
    /// Blackboard name, empty for the symbol name
    pub display_name: String,
    pub process: String,
    pub unit: String,
    pub conversion_type: ConversionType,
    pub conversion: String,
    /// NaN keeps the min value
    pub min: f64,
    /// NaN keeps the max value
    pub max: f64,
    pub color: u32,
    pub width: i32,
    pub precision: i32,
    pub flags: ReferenceSymbolFlags,
}

impl SymbolReference {
    pub fn new(symbol: &str, process: &str) -> SymbolReference {
        SymbolReference {
            symbol: symbol.to_string(),
            display_name: String::new(),
            process: process.to_string(),
            unit: String::new(),
            conversion_type: ConversionType::Undefined,
            conversion: String::new(),
            min: f64::NAN,
            max: f64::NAN,
            color: COLOR_UNDEFINED,
            width: WIDTH_UNDEFINED,
            precision: PREC_UNDEFINED,
            flags: ReferenceSymbolFlags::READWRITE,
        }
    }
}

impl XilEnv {
    //-------------------------------------------------------------------------
    // Variables

    /// Create a blackboard variable, returns its variable id
    pub fn add_vari(&self, label: &str, data_type: BbDataType, unit: &str) -> XilEnvResult<i32> {
        let rpc = self.rpc()?;
        let c_label = to_cstring(label)?;
        let c_unit = to_cstring(unit)?;
        let vid = check_handle(rpc_name!(AddVari), rpc_call!(rpc, AddVari(c_label.as_ptr(), data_type.to_raw(), c_unit.as_ptr()))?)?;
        debug!("AddVari {} {} -> {}", label, data_type, vid);
        Ok(vid)
    }

    /// Remove a variable id, the variable is deleted when its last user removes it
    pub fn remove_vari(&self, vid: i32) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        rpc_status!(rpc, RemoveVari(vid))?;
        Ok(())
    }

    /// Get the variable id of an existing blackboard variable
    pub fn attach_vari(&self, label: &str) -> XilEnvResult<i32> {
        let rpc = self.rpc()?;
        let c_label = to_cstring(label)?;
        let vid = rpc_call!(rpc, AttachVari(c_label.as_ptr()))?;
        if vid <= 0 {
            return Err(XilEnvError::VariableNotFound(label.to_string()));
        }
        Ok(vid)
    }

    pub fn get(&self, vid: i32) -> XilEnvResult<f64> {
        let rpc = self.rpc()?;
        rpc_call!(rpc, Get(vid))
    }

    /// Value converted with the conversion of the variable
    pub fn get_phys(&self, vid: i32) -> XilEnvResult<f64> {
        let rpc = self.rpc()?;
        rpc_call!(rpc, GetPhys(vid))
    }

    pub fn set(&self, vid: i32, value: f64) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        rpc_call!(rpc, Set(vid, value))
    }

    /// Set a physical value, the raw value is calculated with the inverse conversion
    pub fn set_phys(&self, vid: i32, value: f64) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        rpc_status!(rpc, SetPhys(vid, value))?;
        Ok(())
    }

    /// Evaluate an equation with the current blackboard values
    pub fn equ(&self, equation: &str) -> XilEnvResult<f64> {
        let rpc = self.rpc()?;
        let equation = to_cstring(equation)?;
        rpc_call!(rpc, Equ(equation.as_ptr()))
    }

    /// Raw value of a variable in its blackboard data type
    pub fn get_raw(&self, vid: i32) -> XilEnvResult<RawValue> {
        let rpc = self.rpc()?;
        let mut vari = BbVari::default();
        let data_type = rpc_call!(rpc, GetRaw(vid, &mut vari))?;
        if data_type < 0 {
            return Err(XilEnvError::native(rpc_name!(GetRaw), data_type));
        }
        RawValue::from_vari(BbDataType::try_from(data_type)?, vari)
    }

    /// Write a raw value, XilEnv converts it to the data type of the variable
    pub fn set_raw(&self, vid: i32, value: RawValue, flags: i32) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        rpc_status!(rpc, SetRaw(vid, value.data_type().to_raw(), value.to_vari(), flags))?;
        Ok(())
    }

    //-------------------------------------------------------------------------
    // Write access per process

    pub fn wr_vari_enable(&self, label: &str, process: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let label = to_cstring(label)?;
        let process = to_cstring(process)?;
        rpc_status!(rpc, WrVariEnable(label.as_ptr(), process.as_ptr()))?;
        Ok(())
    }

    pub fn wr_vari_disable(&self, label: &str, process: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let label = to_cstring(label)?;
        let process = to_cstring(process)?;
        rpc_status!(rpc, WrVariDisable(label.as_ptr(), process.as_ptr()))?;
        Ok(())
    }

    pub fn is_wr_vari_enabled(&self, label: &str, process: &str) -> XilEnvResult<bool> {
        let rpc = self.rpc()?;
        let label = to_cstring(label)?;
        let process = to_cstring(process)?;
        Ok(rpc_status!(rpc, IsWrVariEnabled(label.as_ptr(), process.as_ptr()))? != 0)
    }

    //-------------------------------------------------------------------------
    // Reference lists of external processes

    pub fn load_ref_list(&self, ref_list: &str, process: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let ref_list = to_cstring(ref_list)?;
        let process = to_cstring(process)?;
        rpc_status!(rpc, LoadRefList(ref_list.as_ptr(), process.as_ptr()))?;
        Ok(())
    }

    pub fn add_ref_list(&self, ref_list: &str, process: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let ref_list = to_cstring(ref_list)?;
        let process = to_cstring(process)?;
        rpc_status!(rpc, AddRefList(ref_list.as_ptr(), process.as_ptr()))?;
        Ok(())
    }

    pub fn save_ref_list(&self, ref_list: &str, process: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let ref_list = to_cstring(ref_list)?;
        let process = to_cstring(process)?;
        rpc_status!(rpc, SaveRefList(ref_list.as_ptr(), process.as_ptr()))?;
        Ok(())
    }

    /// Reference a symbol of an external process in the blackboard, returns the variable id
    pub fn reference_symbol(&self, reference: &SymbolReference) -> XilEnvResult<i32> {
        let rpc = self.rpc()?;
        let symbol = to_cstring(&reference.symbol)?;
        let display_name = to_cstring(&reference.display_name)?;
        let process = to_cstring(&reference.process)?;
        let unit = to_cstring(&reference.unit)?;
        let conversion = to_cstring(&reference.conversion)?;
        let vid = rpc_call!(
            rpc,
            ReferenceSymbol(
                symbol.as_ptr(),
                display_name.as_ptr(),
                process.as_ptr(),
                unit.as_ptr(),
                reference.conversion_type.to_raw(),
                conversion.as_ptr(),
                reference.min,
                reference.max,
                reference.color as i32,
                reference.width,
                reference.precision,
                reference.flags.bits(),
            )
        )?;
        check_handle(rpc_name!(ReferenceSymbol), vid)
    }

    pub fn dereference_symbol(&self, symbol: &str, process: &str, flags: ReferenceSymbolFlags) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let symbol = to_cstring(symbol)?;
        let process = to_cstring(process)?;
        rpc_status!(rpc, DereferenceSymbol(symbol.as_ptr(), process.as_ptr(), flags.bits()))?;
        Ok(())
    }

    //-------------------------------------------------------------------------
    // Properties

    pub fn get_vari_type(&self, vid: i32) -> XilEnvResult<BbDataType> {
        let rpc = self.rpc()?;
        BbDataType::try_from(rpc_status!(rpc, GetVariType(vid))?)
    }

    pub fn get_vari_unit(&self, vid: i32) -> XilEnvResult<String> {
        let rpc = self.rpc()?;
        from_cstr(rpc_call!(rpc, GetVariUnit(vid))?).ok_or(XilEnvError::native(rpc_name!(GetVariUnit), -1))
    }

    pub fn set_vari_unit(&self, vid: i32, unit: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let unit = to_cstring(unit)?;
        rpc_status!(rpc, SetVariUnit(vid, unit.as_ptr()))?;
        Ok(())
    }

    pub fn get_vari_min(&self, vid: i32) -> XilEnvResult<f64> {
        let rpc = self.rpc()?;
        rpc_call!(rpc, GetVariMin(vid))
    }

    pub fn get_vari_max(&self, vid: i32) -> XilEnvResult<f64> {
        let rpc = self.rpc()?;
        rpc_call!(rpc, GetVariMax(vid))
    }

    pub fn set_vari_min(&self, vid: i32, min: f64) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        rpc_status!(rpc, SetVariMin(vid, min))?;
        Ok(())
    }

    pub fn set_vari_max(&self, vid: i32, max: f64) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        rpc_status!(rpc, SetVariMax(vid, max))?;
        Ok(())
    }

    pub fn get_vari_conversion_type(&self, vid: i32) -> XilEnvResult<ConversionType> {
        let rpc = self.rpc()?;
        let t = rpc_status!(rpc, GetVariConversionType(vid))?;
        ConversionType::from_raw(t).ok_or(XilEnvError::native(rpc_name!(GetVariConversionType), t))
    }

    pub fn get_vari_conversion_string(&self, vid: i32) -> XilEnvResult<String> {
        let rpc = self.rpc()?;
        from_cstr(rpc_call!(rpc, GetVariConversionString(vid))?).ok_or(XilEnvError::native(rpc_name!(GetVariConversionString), -1))
    }

    /// Set the conversion, an equation like "10.0*#+1000.0" or an enum like "0 0 \"off\"; 1 1 \"on\";"
    pub fn set_vari_conversion(&self, vid: i32, conversion_type: ConversionType, conversion: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let conversion = to_cstring(conversion)?;
        rpc_status!(rpc, SetVariConversion(vid, conversion_type.to_raw(), conversion.as_ptr()))?;
        Ok(())
    }

    /// Text of an enum conversion for a value, None if the value has no text
    pub fn get_vari_enum(&self, vid: i32, value: f64) -> XilEnvResult<Option<String>> {
        let rpc = self.rpc()?;
        Ok(from_cstr(rpc_call!(rpc, GetVariEnum(vid, value))?))
    }

    pub fn get_vari_display_format_width(&self, vid: i32) -> XilEnvResult<i32> {
        let rpc = self.rpc()?;
        rpc_status!(rpc, GetVariDisplayFormatWidth(vid))
    }

    pub fn get_vari_display_format_prec(&self, vid: i32) -> XilEnvResult<i32> {
        let rpc = self.rpc()?;
        rpc_status!(rpc, GetVariDisplayFormatPrec(vid))
    }

    pub fn set_vari_display_format(&self, vid: i32, width: i32, precision: i32) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        rpc_status!(rpc, SetVariDisplayFormat(vid, width, precision))?;
        Ok(())
    }

    pub fn import_vari_properties(&self, file: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let file = to_cstring(file)?;
        rpc_status!(rpc, ImportVariProperties(file.as_ptr()))?;
        Ok(())
    }

    pub fn enable_range_control(&self, process_filter: &str, variable_filter: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let process_filter = to_cstring(process_filter)?;
        let variable_filter = to_cstring(variable_filter)?;
        rpc_status!(rpc, EnableRangeControl(process_filter.as_ptr(), variable_filter.as_ptr()))?;
        Ok(())
    }

    pub fn disable_range_control(&self, process_filter: &str, variable_filter: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let process_filter = to_cstring(process_filter)?;
        let variable_filter = to_cstring(variable_filter)?;
        rpc_status!(rpc, DisableRangeControl(process_filter.as_ptr(), variable_filter.as_ptr()))?;
        Ok(())
    }

    //-------------------------------------------------------------------------
    // Variable enumeration

    /// Iterate the blackboard variables matching filter (wildcards * and ?), first restarts the iteration
    pub fn get_next_vari(&self, first: bool, filter: &str) -> XilEnvResult<Option<String>> {
        let rpc = self.rpc()?;
        let filter = to_cstring(filter)?;
        Ok(from_cstr(rpc_call!(rpc, GetNextVari(first as i32, filter.as_ptr()))?))
    }

    /// Like get_next_vari, restricted to variables with the given write access for a process
    pub fn get_next_vari_ex(&self, first: bool, filter: &str, process: &str, access: AccessFlags) -> XilEnvResult<Option<String>> {
        let rpc = self.rpc()?;
        let filter = to_cstring(filter)?;
        let process = to_cstring(process)?;
        Ok(from_cstr(rpc_call!(rpc, GetNextVariEx(first as i32, filter.as_ptr(), process.as_ptr(), access.bits()))?))
    }

    /// Names of all blackboard variables matching filter
    pub fn get_variables(&self, filter: &str) -> XilEnvResult<Vec<String>> {
        let mut variables = Vec::new();
        let mut next = self.get_next_vari(true, filter)?;
        while let Some(name) = next {
            variables.push(name);
            next = self.get_next_vari(false, filter)?;
        }
        Ok(variables)
    }

    //-------------------------------------------------------------------------
    // Frames

    /// Write the values of several variables at once
    pub fn write_frame(&self, vids: &[i32], values: &[f64]) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        if vids.len() != values.len() {
            return Err(XilEnvError::LengthMismatch {
                left: vids.len(),
                right: values.len(),
            });
        }
        rpc_status!(rpc, WriteFrame(vids.as_ptr(), values.as_ptr(), vids.len() as i32))?;
        Ok(())
    }

    /// Read the values of several variables at once
    pub fn get_frame(&self, vids: &[i32]) -> XilEnvResult<Vec<f64>> {
        let rpc = self.rpc()?;
        let mut values = vec![0.0; vids.len()];
        rpc_status!(rpc, GetFrame(vids.as_ptr(), values.as_mut_ptr(), vids.len() as i32))?;
        Ok(values)
    }

    /// Write a frame, wait one cycle and read a frame
    pub fn write_frame_wait_read_frame(&self, write_vids: &[i32], write_values: &[f64], read_vids: &[i32]) -> XilEnvResult<Vec<f64>> {
        let rpc = self.rpc()?;
        if write_vids.len() != write_values.len() {
            return Err(XilEnvError::LengthMismatch {
                left: write_vids.len(),
                right: write_values.len(),
            });
        }
        let mut read_values = vec![0.0; read_vids.len()];
        rpc_status!(
            rpc,
            WriteFrameWaitReadFrame(
                write_vids.as_ptr(),
                write_values.as_ptr(),
                write_vids.len() as i32,
                read_vids.as_ptr(),
                read_values.as_mut_ptr(),
                read_vids.len() as i32,
            )
        )?;
        Ok(read_values)
    }
}
