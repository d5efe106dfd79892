//-----------------------------------------------------------------------------
// Module types
// Fixed layout records and constants of the XilEnvRpc C interface

use bitflags::bitflags;

//-----------------------------------------------------------------------------
// Blackboard raw value

/// Untyped 8 byte value exchanged with XilEnv_GetRaw/SetRaw and XilEnv_GetSymbolRaw/SetSymbolRaw
/// The active field is given by a separate BB data type tag, see crate::value::RawValue
#[repr(C)]
#[derive(Clone, Copy)]
pub union BbVari {
    pub b: i8,
    pub ub: u8,
    pub w: i16,
    pub uw: u16,
    pub dw: i32,
    pub udw: u32,
    pub qw: i64,
    pub uqw: u64,
    pub f: f32,
    pub d: f64,
}

impl Default for BbVari {
    fn default() -> Self {
        BbVari { uqw: 0 }
    }
}

impl std::fmt::Debug for BbVari {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // All bit patterns are valid u64
        write!(f, "BbVari(0x{:016X})", unsafe { self.uqw })
    }
}

//-----------------------------------------------------------------------------
// CAN message queue records, packed as in the C header

/// CAN_ACCEPT_MASK
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CanAcceptMask {
    pub channel: i32,
    pub start_id: i32,
    pub end_id: i32,
    pub fill1: i32,
}

impl CanAcceptMask {
    /// Acceptance window for the identifiers start_id..=end_id on channel
    pub fn new(channel: i32, start_id: i32, end_id: i32) -> CanAcceptMask {
        CanAcceptMask {
            channel,
            start_id,
            end_id,
            fill1: 0,
        }
    }
}

/// CAN_FIFO_ELEM, 32 bytes
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CanFifoElem {
    pub id: u32,
    pub size: u8,
    pub ext: u8,
    pub flag: u8,
    pub channel: u8,
    pub node: u8,
    pub fill: [u8; 7],
    pub timestamp: u64,
    pub data: [u8; 8],
}

/// CAN_FD_FIFO_ELEM, 88 bytes
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanFdFifoElem {
    pub id: u32,
    pub size: u8,
    pub ext: u8,
    pub flag: u8,
    pub channel: u8,
    pub node: u8,
    pub fill: [u8; 7],
    pub timestamp: u64,
    pub data: [u8; 64],
}

impl Default for CanFdFifoElem {
    fn default() -> Self {
        CanFdFifoElem {
            id: 0,
            size: 0,
            ext: 0,
            flag: 0,
            channel: 0,
            node: 0,
            fill: [0; 7],
            timestamp: 0,
            data: [0; 64],
        }
    }
}

bitflags! {
    /// Parameter of XilEnv_FlushCANQueue
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FlushCanQueue: i32 {
        const RX = 0x0001;
        const TX = 0x0002;
    }
}

//-----------------------------------------------------------------------------
// Blackboard constants

bitflags! {
    /// Access filter of XilEnv_GetNextVariEx
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AccessFlags: i32 {
        const ONLY_ENABLED = 0x0001;
        const ONLY_DISABLED = 0x0002;
        const ENABLED_OR_DISABLED = 0x0003;
    }
}

bitflags! {
    /// Flags of XilEnv_ReferenceSymbol and XilEnv_DereferenceSymbol
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ReferenceSymbolFlags: i32 {
        /// Blackboard -> external process
        const BB2EP = 0x0001;
        /// External process -> blackboard
        const EP2BB = 0x0002;
        const READWRITE = 0x0003;
        /// Add to (or remove from) the reference list of the process
        const ADD_TO_LIST = 0x0004;
    }
}

/// Conversion types of blackboard variables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionType {
    Nothing,
    Equation,
    TextReplace,
    Undefined,
}

impl ConversionType {
    pub fn to_raw(self) -> i32 {
        match self {
            ConversionType::Nothing => 0,
            ConversionType::Equation => 1,
            ConversionType::TextReplace => 2,
            ConversionType::Undefined => 255,
        }
    }

    pub fn from_raw(value: i32) -> Option<ConversionType> {
        match value {
            0 => Some(ConversionType::Nothing),
            1 => Some(ConversionType::Equation),
            2 => Some(ConversionType::TextReplace),
            255 => Some(ConversionType::Undefined),
            _ => None,
        }
    }
}

pub const COLOR_UNDEFINED: u32 = 0xFFFF_FFFF;
pub const WIDTH_UNDEFINED: i32 = 255;
pub const PREC_UNDEFINED: i32 = 255;

/// Flag of XilEnv_GetSymbolRaw/SetSymbolRaw, suppress the error message box of XilEnv
pub const SYMBOL_RAW_NO_ERROR_MESSAGE: i32 = 0x1000;

//-----------------------------------------------------------------------------
// A2L link constants

/// XILENV_LINK_DATA, only used behind a pointer owned by XilEnvRpc
#[repr(C)]
pub struct XilEnvLinkData {
    _private: [u8; 0],
}

bitflags! {
    /// Type mask of XilEnv_GetIndexFromLink and XilEnv_GetNextSymbolFromLink
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct A2lLabelType: i32 {
        const ALL = 0xFFFF;
        const MEASUREMENT = 0xFF;
        const SINGLE_VALUE_MEASUREMENT = 0x1;
        const ARRAY_1_DIM_MEASUREMENT = 0x2;
        const ARRAY_2_DIM_MEASUREMENT = 0x4;
        const ARRAY_3_DIM_MEASUREMENT = 0x8;
        const NOT_REFERENCED_MEASUREMENT = 0x10;
        const REFERENCED_MEASUREMENT = 0x20;
        const CALIBRATION = 0xFF00;
        const SINGLE_VALUE_CALIBRATION = 0x100;
        const ASCII_CALIBRATION = 0x200;
        const VAL_BLK_CALIBRATION = 0x400;
        const CURVE_CALIBRATION = 0x800;
        const MAP_CALIBRATION = 0x1000;
        const CUBOID_CALIBRATION = 0x2000;
        const CUBE_4_CALIBRATION = 0x4000;
        const CUBE_5_CALIBRATION = 0x8000;
    }
}

bitflags! {
    /// Flags of a single A2L value
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct A2lValueFlags: u32 {
        const CALIBRATION = 0x1;
        const MEASUREMENT = 0x2;
        const PHYS = 0x4;
        const READ_ONLY = 0x8;
        const ONLY_VIRTUAL = 0x10;
        const HAS_UNIT = 0x40;
        const UPDATE = 0x1000;
    }
}

bitflags! {
    /// PhysFlag parameter of XilEnv_GetDataFromLink
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct A2lGetFlags: i32 {
        const PHYS = 0x1;
        const TEXT_REPLACE = 0x2;
        const UNIT = 0x4;
    }
}

bitflags! {
    /// UpdateFlag parameter of XilEnv_SetupLinkToExternProcess and A2LFlags of XilEnv_StartProcessEx2
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct A2lLinkFlags: i32 {
        const UPDATE = 0x1;
        const UPDATE_IGNORE = 0x2;
        const UPDATE_ZERO = 0x4;
        const ADDRESS_TRANSLATION_DLL = 0x8;
        const ADDRESS_TRANSLATION_MULTI_DLL = 0x10;
        const REMEMBER_REFERENCED_LABELS = 0x20;
    }
}

/// Direction of XilEnv_ReferenceMeasurementToBlackboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LinkReferenceDirection {
    /// As defined inside the A2L file
    #[default]
    Default,
    Bb2Ep,
    Ep2Bb,
    ReadWrite,
}

impl LinkReferenceDirection {
    pub fn to_raw(self) -> i32 {
        match self {
            LinkReferenceDirection::Default => 0,
            LinkReferenceDirection::Bb2Ep => 1,
            LinkReferenceDirection::Ep2Bb => 2,
            LinkReferenceDirection::ReadWrite => 3,
        }
    }
}
