//-----------------------------------------------------------------------------
// Module value
// Blackboard data types and typed raw values

use crate::error::{XilEnvError, XilEnvResult};
use crate::rpc::types::BbVari;

//-----------------------------------------------------------------------------
// BbDataType

/// Data type of a blackboard variable (enum BB_DATA_TYPES)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BbDataType {
    Byte,
    UByte,
    Word,
    UWord,
    DWord,
    UDWord,
    Float,
    Double,
    Unknown,
    UnknownDouble,
    UnknownWait,
    QWord,
    UQWord,
}

impl BbDataType {
    pub fn to_raw(self) -> i32 {
        match self {
            BbDataType::Byte => 0,
            BbDataType::UByte => 1,
            BbDataType::Word => 2,
            BbDataType::UWord => 3,
            BbDataType::DWord => 4,
            BbDataType::UDWord => 5,
            BbDataType::Float => 6,
            BbDataType::Double => 7,
            BbDataType::Unknown => 8,
            BbDataType::UnknownDouble => 9,
            BbDataType::UnknownWait => 10,
            BbDataType::QWord => 34,
            BbDataType::UQWord => 35,
        }
    }

    pub fn get_name(self) -> &'static str {
        match self {
            BbDataType::Byte => "BYTE",
            BbDataType::UByte => "UBYTE",
            BbDataType::Word => "WORD",
            BbDataType::UWord => "UWORD",
            BbDataType::DWord => "DWORD",
            BbDataType::UDWord => "UDWORD",
            BbDataType::Float => "FLOAT",
            BbDataType::Double => "DOUBLE",
            BbDataType::Unknown => "UNKNOWN",
            BbDataType::UnknownDouble => "UNKNOWN_DOUBLE",
            BbDataType::UnknownWait => "UNKNOWN_WAIT",
            BbDataType::QWord => "QWORD",
            BbDataType::UQWord => "UQWORD",
        }
    }
}

impl TryFrom<i32> for BbDataType {
    type Error = XilEnvError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(BbDataType::Byte),
            1 => Ok(BbDataType::UByte),
            2 => Ok(BbDataType::Word),
            3 => Ok(BbDataType::UWord),
            4 => Ok(BbDataType::DWord),
            5 => Ok(BbDataType::UDWord),
            6 => Ok(BbDataType::Float),
            7 => Ok(BbDataType::Double),
            8 => Ok(BbDataType::Unknown),
            9 => Ok(BbDataType::UnknownDouble),
            10 => Ok(BbDataType::UnknownWait),
            34 => Ok(BbDataType::QWord),
            35 => Ok(BbDataType::UQWord),
            _ => Err(XilEnvError::UnknownDataType(value)),
        }
    }
}

impl std::fmt::Display for BbDataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BB_{}", self.get_name())
    }
}

//-----------------------------------------------------------------------------
// RawValue

/// A blackboard value in its native representation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
}

impl RawValue {
    pub fn data_type(&self) -> BbDataType {
        match self {
            RawValue::I8(_) => BbDataType::Byte,
            RawValue::U8(_) => BbDataType::UByte,
            RawValue::I16(_) => BbDataType::Word,
            RawValue::U16(_) => BbDataType::UWord,
            RawValue::I32(_) => BbDataType::DWord,
            RawValue::U32(_) => BbDataType::UDWord,
            RawValue::I64(_) => BbDataType::QWord,
            RawValue::U64(_) => BbDataType::UQWord,
            RawValue::F32(_) => BbDataType::Float,
            RawValue::F64(_) => BbDataType::Double,
        }
    }

    /// Interpret a native union by its data type tag
    pub fn from_vari(data_type: BbDataType, vari: BbVari) -> XilEnvResult<RawValue> {
        // @@@@ Unsafe - the active union field is given by data_type
        unsafe {
            Ok(match data_type {
                BbDataType::Byte => RawValue::I8(vari.b),
                BbDataType::UByte => RawValue::U8(vari.ub),
                BbDataType::Word => RawValue::I16(vari.w),
                BbDataType::UWord => RawValue::U16(vari.uw),
                BbDataType::DWord => RawValue::I32(vari.dw),
                BbDataType::UDWord => RawValue::U32(vari.udw),
                BbDataType::QWord => RawValue::I64(vari.qw),
                BbDataType::UQWord => RawValue::U64(vari.uqw),
                BbDataType::Float => RawValue::F32(vari.f),
                BbDataType::Double => RawValue::F64(vari.d),
                t => return Err(XilEnvError::UnknownDataType(t.to_raw())),
            })
        }
    }

    pub fn to_vari(&self) -> BbVari {
        let mut vari = BbVari::default();
        match *self {
            RawValue::I8(v) => vari.b = v,
            RawValue::U8(v) => vari.ub = v,
            RawValue::I16(v) => vari.w = v,
            RawValue::U16(v) => vari.uw = v,
            RawValue::I32(v) => vari.dw = v,
            RawValue::U32(v) => vari.udw = v,
            RawValue::I64(v) => vari.qw = v,
            RawValue::U64(v) => vari.uqw = v,
            RawValue::F32(v) => vari.f = v,
            RawValue::F64(v) => vari.d = v,
        }
        vari
    }

    /// Convert a double to the representation of data_type, saturating at the type limits
    pub fn from_f64(data_type: BbDataType, value: f64) -> XilEnvResult<RawValue> {
        Ok(match data_type {
            BbDataType::Byte => RawValue::I8(value as i8),
            BbDataType::UByte => RawValue::U8(value as u8),
            BbDataType::Word => RawValue::I16(value as i16),
            BbDataType::UWord => RawValue::U16(value as u16),
            BbDataType::DWord => RawValue::I32(value as i32),
            BbDataType::UDWord => RawValue::U32(value as u32),
            BbDataType::QWord => RawValue::I64(value as i64),
            BbDataType::UQWord => RawValue::U64(value as u64),
            BbDataType::Float => RawValue::F32(value as f32),
            BbDataType::Double => RawValue::F64(value),
            t => return Err(XilEnvError::UnknownDataType(t.to_raw())),
        })
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            RawValue::I8(v) => v as f64,
            RawValue::U8(v) => v as f64,
            RawValue::I16(v) => v as f64,
            RawValue::U16(v) => v as f64,
            RawValue::I32(v) => v as f64,
            RawValue::U32(v) => v as f64,
            RawValue::I64(v) => v as f64,
            RawValue::U64(v) => v as f64,
            RawValue::F32(v) => v as f64,
            RawValue::F64(v) => v,
        }
    }
}

impl std::fmt::Display for RawValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawValue::I8(v) => write!(f, "{}", v),
            RawValue::U8(v) => write!(f, "{}", v),
            RawValue::I16(v) => write!(f, "{}", v),
            RawValue::U16(v) => write!(f, "{}", v),
            RawValue::I32(v) => write!(f, "{}", v),
            RawValue::U32(v) => write!(f, "{}", v),
            RawValue::I64(v) => write!(f, "{}", v),
            RawValue::U64(v) => write!(f, "{}", v),
            RawValue::F32(v) => write!(f, "{}", v),
            RawValue::F64(v) => write!(f, "{}", v),
        }
    }
}

macro_rules! impl_from_raw_value {
    ($t:ty, $variant:ident) => {
        impl From<$t> for RawValue {
            fn from(v: $t) -> Self {
                RawValue::$variant(v)
            }
        }
    };
}

impl_from_raw_value!(i8, I8);
impl_from_raw_value!(u8, U8);
impl_from_raw_value!(i16, I16);
impl_from_raw_value!(u16, U16);
impl_from_raw_value!(i32, I32);
impl_from_raw_value!(u32, U32);
impl_from_raw_value!(i64, I64);
impl_from_raw_value!(u64, U64);
impl_from_raw_value!(f32, F32);
impl_from_raw_value!(f64, F64);
