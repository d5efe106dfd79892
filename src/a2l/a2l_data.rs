//-----------------------------------------------------------------------------
// Module a2l_data
// Scoped handle of link data fetched from XilEnv, freed when dropped

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

use std::ffi::c_char;

use super::a2l_value::{A2lArray, A2lDataType, A2lElem, A2lElemType, A2lTargetType, A2lValue};
use crate::error::{XilEnvError, XilEnvResult};
use crate::rpc::types::{A2lGetFlags, A2lValueFlags, XilEnvLinkData};
use crate::rpc::{from_cstr, rpc_call, rpc_name, rpc_status, to_cstring, RpcFunctions};

// Element of link data: the single value, or element number of array number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Single,
    Element(i32, i32),
}

//-----------------------------------------------------------------------------
// A2lData

/// Copy of a measurement or characteristic of an external process, read through an A2L link
/// Changes made with set_value are written to the process with write_back
#[derive(Debug)]
pub struct A2lData<'a> {
    functions: &'a RpcFunctions,
    link: i32,
    index: i32,
    label: String,
    data: *mut XilEnvLinkData,
}

impl<'a> A2lData<'a> {
    pub(crate) fn new(functions: &'a RpcFunctions, link: i32, index: i32, label: &str, data: *mut XilEnvLinkData) -> A2lData<'a> {
        A2lData {
            functions,
            link,
            index,
            label: label.to_string(),
            data,
        }
    }

    fn link_error(&self, message: String) -> XilEnvError {
        XilEnvError::Link {
            label: self.label.clone(),
            message,
        }
    }

    pub fn get_label(&self) -> &str {
        &self.label
    }

    pub fn get_link(&self) -> i32 {
        self.link
    }

    pub fn get_index(&self) -> i32 {
        self.index
    }

    pub fn get_data_type(&self) -> XilEnvResult<A2lDataType> {
        let t = rpc_call!(self.functions, GetLinkDataType(self.data))?;
        A2lDataType::from_raw(t).ok_or_else(|| self.link_error(format!("invalid data type {}", t)))
    }

    /// Number of arrays, for example 2 for a curve with its axis
    pub fn get_array_count(&self) -> XilEnvResult<usize> {
        Ok(rpc_status!(self.functions, GetLinkDataArrayCount(self.data))? as usize)
    }

    /// Number of elements of an array
    pub fn get_array_size(&self, array_no: usize) -> XilEnvResult<usize> {
        Ok(rpc_status!(self.functions, GetLinkDataArraySize(self.data, array_no as i32))? as usize)
    }

    /// Dimensions [xd], [xd, yd] or [xd, yd, zd] of an array
    pub fn get_array_dimensions(&self, array_no: usize) -> XilEnvResult<Vec<usize>> {
        let an = array_no as i32;
        let count = rpc_call!(self.functions, GetLinkArrayValueDimensionCount(self.data, an))?;
        if !(1..=3).contains(&count) {
            return Err(self.link_error(format!("array {} has {} dimensions", array_no, count)));
        }
        let mut dims = Vec::with_capacity(count as usize);
        for dim_no in 0..count {
            dims.push(rpc_status!(self.functions, GetLinkArrayValueDimension(self.data, an, dim_no))? as usize);
        }
        Ok(dims)
    }

    fn get_shape(&self) -> XilEnvResult<A2lDataType> {
        let data_type = self.get_data_type()?;
        if !data_type.is_single() && !data_type.is_array() {
            return Err(self.link_error(format!("{:?} is not supported", data_type)));
        }
        Ok(data_type)
    }

    //-------------------------------------------------------------------------
    // Element access

    fn get_elem_type(&self, slot: Slot) -> XilEnvResult<A2lElemType> {
        let t = match slot {
            Slot::Single => rpc_call!(self.functions, GetLinkSingleValueDataType(self.data))?,
            Slot::Element(an, i) => rpc_call!(self.functions, GetLinkArrayValueDataType(self.data, an, i))?,
        };
        A2lElemType::from_raw(t).ok_or_else(|| self.link_error(format!("invalid element type {}", t)))
    }

    fn get_elem_flags(&self, slot: Slot) -> XilEnvResult<A2lValueFlags> {
        let flags = match slot {
            Slot::Single => rpc_call!(self.functions, GetLinkSingleValueFlags(self.data))?,
            Slot::Element(an, i) => rpc_call!(self.functions, GetLinkArrayValueFlags(self.data, an, i))?,
        };
        Ok(A2lValueFlags::from_bits_retain(flags))
    }

    fn get_elem_string(&self, slot: Slot) -> XilEnvResult<String> {
        let p: *const c_char = match slot {
            Slot::Single => rpc_call!(self.functions, GetLinkSingleValueDataStringPtr(self.data))?,
            Slot::Element(an, i) => rpc_call!(self.functions, GetLinkArrayValueDataStringPtr(self.data, an, i))?,
        };
        Ok(from_cstr(p).unwrap_or_default())
    }

    fn get_elem(&self, slot: Slot) -> XilEnvResult<A2lElem> {
        let f = self.functions;
        Ok(match (self.get_elem_type(slot)?, slot) {
            (A2lElemType::Int, Slot::Single) => A2lElem::Int(rpc_call!(f, GetLinkSingleValueDataInt(self.data))?),
            (A2lElemType::Int, Slot::Element(an, i)) => A2lElem::Int(rpc_call!(f, GetLinkArrayValueDataInt(self.data, an, i))?),
            (A2lElemType::Uint, Slot::Single) => A2lElem::Uint(rpc_call!(f, GetLinkSingleValueDataUint(self.data))?),
            (A2lElemType::Uint, Slot::Element(an, i)) => A2lElem::Uint(rpc_call!(f, GetLinkArrayValueDataUint(self.data, an, i))?),
            (A2lElemType::Double | A2lElemType::PhysDouble, Slot::Single) => A2lElem::Double(rpc_call!(f, GetLinkSingleValueDataDouble(self.data))?),
            (A2lElemType::Double | A2lElemType::PhysDouble, Slot::Element(an, i)) => {
                A2lElem::Double(rpc_call!(f, GetLinkArrayValueDataDouble(self.data, an, i))?)
            }
            (A2lElemType::TextReplace, _) => A2lElem::Text(self.get_elem_string(slot)?),
        })
    }

    // Empty for text elements and elements without unit
    fn get_elem_unit(&self, slot: Slot) -> XilEnvResult<String> {
        if self.get_elem_type(slot)? == A2lElemType::TextReplace || !self.get_elem_flags(slot)?.contains(A2lValueFlags::HAS_UNIT) {
            return Ok(String::new());
        }
        let p = match slot {
            Slot::Single => rpc_call!(self.functions, GetLinkSingleValueUnitPtr(self.data))?,
            Slot::Element(an, i) => rpc_call!(self.functions, GetLinkArrayValueUnitPtr(self.data, an, i))?,
        };
        Ok(from_cstr(p).unwrap_or_default())
    }

    fn set_elem(&self, slot: Slot, elem: &A2lElem) -> XilEnvResult<()> {
        let f = self.functions;
        let elem_type = self.get_elem_type(slot)?;
        let mismatch = || XilEnvError::TypeMismatch {
            expected: elem_type.get_name().to_string(),
            found: elem.get_type_name().to_string(),
        };
        match elem_type {
            A2lElemType::Int => {
                let v = match *elem {
                    A2lElem::Int(v) => v,
                    A2lElem::Uint(v) => i64::try_from(v).map_err(|_| mismatch())?,
                    _ => return Err(mismatch()),
                };
                match slot {
                    Slot::Single => rpc_status!(f, SetLinkSingleValueDataInt(self.data, v))?,
                    Slot::Element(an, i) => rpc_status!(f, SetLinkArrayValueDataInt(self.data, an, i, v))?,
                };
            }
            A2lElemType::Uint => {
                let v = match *elem {
                    A2lElem::Uint(v) => v,
                    A2lElem::Int(v) => u64::try_from(v).map_err(|_| mismatch())?,
                    _ => return Err(mismatch()),
                };
                match slot {
                    Slot::Single => rpc_status!(f, SetLinkSingleValueDataUint(self.data, v))?,
                    Slot::Element(an, i) => rpc_status!(f, SetLinkArrayValueDataUint(self.data, an, i, v))?,
                };
            }
            A2lElemType::Double | A2lElemType::PhysDouble => {
                let v = elem.as_f64().ok_or_else(mismatch)?;
                match slot {
                    Slot::Single => rpc_status!(f, SetLinkSingleValueDataDouble(self.data, v))?,
                    Slot::Element(an, i) => rpc_status!(f, SetLinkArrayValueDataDouble(self.data, an, i, v))?,
                };
            }
            A2lElemType::TextReplace => {
                let A2lElem::Text(s) = elem else {
                    return Err(mismatch());
                };
                let s = to_cstring(s)?;
                match slot {
                    Slot::Single => rpc_status!(f, SetLinkSingleValueDataString(self.data, s.as_ptr()))?,
                    Slot::Element(an, i) => rpc_status!(f, SetLinkArrayValueDataString(self.data, an, i, s.as_ptr()))?,
                };
            }
        }
        Ok(())
    }

    // Read all arrays with a function of (array number, flat index)
    fn read_arrays<T, F>(&self, mut f: F) -> XilEnvResult<A2lValue<T>>
    where
        F: FnMut(Slot) -> XilEnvResult<T>,
    {
        let count = self.get_array_count()?;
        let mut arrays = Vec::with_capacity(count);
        for an in 0..count {
            let dims = self.get_array_dimensions(an)?;
            arrays.push(A2lArray::try_from_fn(&dims, |i| f(Slot::Element(an as i32, i as i32)))?);
        }
        if arrays.len() == 1 {
            if let Some(array) = arrays.pop() {
                return Ok(A2lValue::Array(array));
            }
        }
        Ok(A2lValue::Arrays(arrays))
    }

    fn write_array(&self, an: usize, array: &A2lArray<A2lElem>) -> XilEnvResult<()> {
        let dims = self.get_array_dimensions(an)?;
        for (i, elem) in array.flatten(&dims)?.into_iter().enumerate() {
            self.set_elem(Slot::Element(an as i32, i as i32), elem)?;
        }
        Ok(())
    }

    //-------------------------------------------------------------------------
    // Values

    /// Value of the data, a single element or the arrays
    pub fn get_value(&self) -> XilEnvResult<A2lValue<A2lElem>> {
        if self.get_shape()?.is_single() {
            Ok(A2lValue::Single(self.get_elem(Slot::Single)?))
        } else {
            self.read_arrays(|slot| self.get_elem(slot))
        }
    }

    /// Units with the same shape as get_value, empty strings for elements without unit
    pub fn get_unit(&self) -> XilEnvResult<A2lValue<String>> {
        if self.get_shape()?.is_single() {
            Ok(A2lValue::Single(self.get_elem_unit(Slot::Single)?))
        } else {
            self.read_arrays(|slot| self.get_elem_unit(slot))
        }
    }

    /// Change the value of the local copy
    /// The shape of value must match the data and each element must be convertible without loss
    pub fn set_value(&mut self, value: &A2lValue<A2lElem>) -> XilEnvResult<()> {
        let data_type = self.get_shape()?;
        match (data_type.is_single(), value) {
            (true, A2lValue::Single(elem)) => self.set_elem(Slot::Single, elem),
            (false, A2lValue::Array(array)) => {
                let count = self.get_array_count()?;
                if count != 1 {
                    return Err(XilEnvError::ShapeMismatch { expected: vec![count], found: vec![1] });
                }
                self.write_array(0, array)
            }
            (false, A2lValue::Arrays(arrays)) => {
                let count = self.get_array_count()?;
                if count != arrays.len() {
                    return Err(XilEnvError::ShapeMismatch {
                        expected: vec![count],
                        found: vec![arrays.len()],
                    });
                }
                for (an, array) in arrays.iter().enumerate() {
                    self.write_array(an, array)?;
                }
                Ok(())
            }
            (true, _) => Err(XilEnvError::TypeMismatch {
                expected: "single value".to_string(),
                found: "array".to_string(),
            }),
            (false, A2lValue::Single(_)) => Err(XilEnvError::TypeMismatch {
                expected: "array".to_string(),
                found: "single value".to_string(),
            }),
        }
    }

    /// Write the local copy to the external process
    pub fn write_back(&self) -> XilEnvResult<()> {
        let mut error_text: *const c_char = std::ptr::null();
        let status = rpc_call!(self.functions, SetDataToLink(self.link, self.index, self.data, &mut error_text))?;
        if status != 0 {
            let message = from_cstr(error_text).unwrap_or_else(|| format!("{} returned {}", rpc_name!(SetDataToLink), status));
            error!("Write back of {} failed: {}", self.label, message);
            return Err(self.link_error(message));
        }
        debug!("Wrote back {}", self.label);
        Ok(())
    }

    /// Read the current value from the external process into this copy
    pub fn update(&mut self, flags: A2lGetFlags) -> XilEnvResult<()> {
        let mut error_text: *const c_char = std::ptr::null();
        let data = rpc_call!(self.functions, GetDataFromLink(self.link, self.index, self.data, flags.bits(), &mut error_text))?;
        if data.is_null() {
            let message = from_cstr(error_text).unwrap_or_default();
            error!("Update of {} failed: {}", self.label, message);
            return Err(self.link_error(message));
        }
        self.data = data;
        Ok(())
    }

    /// Independent copy of the data
    pub fn copy(&self) -> XilEnvResult<A2lData<'a>> {
        let data = rpc_call!(self.functions, CopyLinkData(self.data))?;
        if data.is_null() {
            return Err(self.link_error("copy failed".to_string()));
        }
        Ok(A2lData::new(self.functions, self.link, self.index, &self.label, data))
    }

    /// Print the data to the XilEnv output
    pub fn print(&self) -> XilEnvResult<()> {
        rpc_call!(self.functions, PrintLinkData(self.data))
    }

    //-------------------------------------------------------------------------
    // Element properties

    /// Flags of the single value, or of element i of array an
    pub fn get_flags(&self, element: Option<(usize, usize)>) -> XilEnvResult<A2lValueFlags> {
        self.get_elem_flags(slot_of(element))
    }

    pub fn get_address(&self, element: Option<(usize, usize)>) -> XilEnvResult<u64> {
        match slot_of(element) {
            Slot::Single => rpc_call!(self.functions, GetLinkSingleValueAddress(self.data)),
            Slot::Element(an, i) => rpc_call!(self.functions, GetLinkArrayValueAddress(self.data, an, i)),
        }
    }

    pub fn get_target_type(&self, element: Option<(usize, usize)>) -> XilEnvResult<A2lTargetType> {
        let t = match slot_of(element) {
            Slot::Single => rpc_call!(self.functions, GetLinkSingleValueTargetDataType(self.data))?,
            Slot::Element(an, i) => rpc_call!(self.functions, GetLinkArrayValueTargetDataType(self.data, an, i))?,
        };
        A2lTargetType::from_raw(t).ok_or_else(|| self.link_error(format!("invalid target type {}", t)))
    }
}

fn slot_of(element: Option<(usize, usize)>) -> Slot {
    match element {
        None => Slot::Single,
        Some((an, i)) => Slot::Element(an as i32, i as i32),
    }
}

impl Drop for A2lData<'_> {
    fn drop(&mut self) {
        if !self.data.is_null() {
            if let Some(free) = self.functions.FreeLinkData {
                // @@@@ Unsafe - C library call, data was allocated by XilEnvRpc and is not used afterwards
                unsafe { free(self.data) };
            } else {
                warn!("Link data of {} not freed, XilEnv_FreeLinkData missing", self.label);
            }
            self.data = std::ptr::null_mut();
        }
    }
}
