//-----------------------------------------------------------------------------
// Module a2l_value
// Types of A2L link data: data types, element values and arrays up to 3 dimensions

use crate::error::{XilEnvError, XilEnvResult};

//-----------------------------------------------------------------------------
// A2lDataType

/// Kind of a measurement or characteristic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum A2lDataType {
    Measurement,
    Value,
    Ascii,
    ValBlk,
    Curve,
    Map,
    Cuboid,
    Cube4,
    Cube5,
}

impl A2lDataType {
    pub fn from_raw(value: i32) -> Option<A2lDataType> {
        match value {
            0 => Some(A2lDataType::Measurement),
            1 => Some(A2lDataType::Value),
            2 => Some(A2lDataType::Ascii),
            3 => Some(A2lDataType::ValBlk),
            4 => Some(A2lDataType::Curve),
            5 => Some(A2lDataType::Map),
            6 => Some(A2lDataType::Cuboid),
            7 => Some(A2lDataType::Cube4),
            8 => Some(A2lDataType::Cube5),
            _ => None,
        }
    }

    pub fn to_raw(self) -> i32 {
        match self {
            A2lDataType::Measurement => 0,
            A2lDataType::Value => 1,
            A2lDataType::Ascii => 2,
            A2lDataType::ValBlk => 3,
            A2lDataType::Curve => 4,
            A2lDataType::Map => 5,
            A2lDataType::Cuboid => 6,
            A2lDataType::Cube4 => 7,
            A2lDataType::Cube5 => 8,
        }
    }

    /// Data with one element, accessed with the single value functions
    pub fn is_single(self) -> bool {
        matches!(self, A2lDataType::Measurement | A2lDataType::Value | A2lDataType::Ascii)
    }

    /// Data with 1 to 3 dimensional arrays, accessed with the array value functions
    pub fn is_array(self) -> bool {
        matches!(self, A2lDataType::ValBlk | A2lDataType::Curve | A2lDataType::Map | A2lDataType::Cuboid)
    }
}

//-----------------------------------------------------------------------------
// A2lElemType

/// Representation of a single element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum A2lElemType {
    Int,
    Uint,
    Double,
    PhysDouble,
    TextReplace,
}

impl A2lElemType {
    pub fn from_raw(value: i32) -> Option<A2lElemType> {
        match value {
            0 => Some(A2lElemType::Int),
            1 => Some(A2lElemType::Uint),
            2 => Some(A2lElemType::Double),
            3 => Some(A2lElemType::PhysDouble),
            4 => Some(A2lElemType::TextReplace),
            _ => None,
        }
    }

    pub fn to_raw(self) -> i32 {
        match self {
            A2lElemType::Int => 0,
            A2lElemType::Uint => 1,
            A2lElemType::Double => 2,
            A2lElemType::PhysDouble => 3,
            A2lElemType::TextReplace => 4,
        }
    }

    pub fn get_name(self) -> &'static str {
        match self {
            A2lElemType::Int => "int",
            A2lElemType::Uint => "uint",
            A2lElemType::Double => "double",
            A2lElemType::PhysDouble => "phys double",
            A2lElemType::TextReplace => "text",
        }
    }
}

//-----------------------------------------------------------------------------
// A2lTargetType

/// Data type of an element in the memory of the external process
/// The numbers are the blackboard data type numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum A2lTargetType {
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float32,
    Float64,
    Int64,
    Uint64,
    Float16,
    NoType,
}

impl A2lTargetType {
    pub fn from_raw(value: i32) -> Option<A2lTargetType> {
        match value {
            0 => Some(A2lTargetType::Int8),
            1 => Some(A2lTargetType::Uint8),
            2 => Some(A2lTargetType::Int16),
            3 => Some(A2lTargetType::Uint16),
            4 => Some(A2lTargetType::Int32),
            5 => Some(A2lTargetType::Uint32),
            6 => Some(A2lTargetType::Float32),
            7 => Some(A2lTargetType::Float64),
            34 => Some(A2lTargetType::Int64),
            35 => Some(A2lTargetType::Uint64),
            36 => Some(A2lTargetType::Float16),
            100 => Some(A2lTargetType::NoType),
            _ => None,
        }
    }
}

//-----------------------------------------------------------------------------
// A2lElem

/// Value of one element
#[derive(Debug, Clone, PartialEq)]
pub enum A2lElem {
    Int(i64),
    Uint(u64),
    Double(f64),
    Text(String),
}

impl A2lElem {
    pub fn get_type_name(&self) -> &'static str {
        match self {
            A2lElem::Int(_) => "int",
            A2lElem::Uint(_) => "uint",
            A2lElem::Double(_) => "double",
            A2lElem::Text(_) => "text",
        }
    }

    /// Numeric value, None for text
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            A2lElem::Int(v) => Some(v as f64),
            A2lElem::Uint(v) => Some(v as f64),
            A2lElem::Double(v) => Some(v),
            A2lElem::Text(_) => None,
        }
    }
}

impl std::fmt::Display for A2lElem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            A2lElem::Int(v) => write!(f, "{}", v),
            A2lElem::Uint(v) => write!(f, "{}", v),
            A2lElem::Double(v) => write!(f, "{}", v),
            A2lElem::Text(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl From<i64> for A2lElem {
    fn from(v: i64) -> Self {
        A2lElem::Int(v)
    }
}

impl From<u64> for A2lElem {
    fn from(v: u64) -> Self {
        A2lElem::Uint(v)
    }
}

impl From<f64> for A2lElem {
    fn from(v: f64) -> Self {
        A2lElem::Double(v)
    }
}

impl From<&str> for A2lElem {
    fn from(v: &str) -> Self {
        A2lElem::Text(v.to_string())
    }
}

//-----------------------------------------------------------------------------
// A2lArray

/// Array of 1 to 3 dimensions, indexed [y][x] and [z][y][x]
/// Elements are stored in XilEnv with the flat index x, y*xd+x or (z*yd+y)*xd+x
#[derive(Debug, Clone, PartialEq)]
pub enum A2lArray<T> {
    Dim1(Vec<T>),
    Dim2(Vec<Vec<T>>),
    Dim3(Vec<Vec<Vec<T>>>),
}

impl<T> A2lArray<T> {
    /// Build an array with dimensions [xd], [xd, yd] or [xd, yd, zd] from a function of the flat index
    pub fn try_from_fn<F>(dims: &[usize], mut f: F) -> XilEnvResult<A2lArray<T>>
    where
        F: FnMut(usize) -> XilEnvResult<T>,
    {
        match *dims {
            [xd] => {
                let mut v = Vec::with_capacity(xd);
                for x in 0..xd {
                    v.push(f(x)?);
                }
                Ok(A2lArray::Dim1(v))
            }
            [xd, yd] => {
                let mut m = Vec::with_capacity(yd);
                for y in 0..yd {
                    let mut row = Vec::with_capacity(xd);
                    for x in 0..xd {
                        row.push(f(y * xd + x)?);
                    }
                    m.push(row);
                }
                Ok(A2lArray::Dim2(m))
            }
            [xd, yd, zd] => {
                let mut c = Vec::with_capacity(zd);
                for z in 0..zd {
                    let mut m = Vec::with_capacity(yd);
                    for y in 0..yd {
                        let mut row = Vec::with_capacity(xd);
                        for x in 0..xd {
                            row.push(f((z * yd + y) * xd + x)?);
                        }
                        m.push(row);
                    }
                    c.push(m);
                }
                Ok(A2lArray::Dim3(c))
            }
            _ => Err(XilEnvError::ShapeMismatch {
                expected: vec![],
                found: dims.to_vec(),
            }),
        }
    }

    /// Dimensions [xd], [xd, yd] or [xd, yd, zd], taken from the first row
    pub fn dimensions(&self) -> Vec<usize> {
        match self {
            A2lArray::Dim1(v) => vec![v.len()],
            A2lArray::Dim2(m) => vec![m.first().map_or(0, |r| r.len()), m.len()],
            A2lArray::Dim3(c) => {
                let m = c.first();
                let yd = m.map_or(0, |m| m.len());
                let xd = m.and_then(|m| m.first()).map_or(0, |r| r.len());
                vec![xd, yd, c.len()]
            }
        }
    }

    /// Elements in flat index order, the shape must be exactly dims
    pub fn flatten(&self, dims: &[usize]) -> XilEnvResult<Vec<&T>> {
        let ok = match (self, dims) {
            (A2lArray::Dim1(v), [xd]) => v.len() == *xd,
            (A2lArray::Dim2(m), [xd, yd]) => m.len() == *yd && m.iter().all(|r| r.len() == *xd),
            (A2lArray::Dim3(c), [xd, yd, zd]) => c.len() == *zd && c.iter().all(|m| m.len() == *yd && m.iter().all(|r| r.len() == *xd)),
            _ => false,
        };
        if !ok {
            return Err(XilEnvError::ShapeMismatch {
                expected: dims.to_vec(),
                found: self.dimensions(),
            });
        }
        Ok(match self {
            A2lArray::Dim1(v) => v.iter().collect(),
            A2lArray::Dim2(m) => m.iter().flatten().collect(),
            A2lArray::Dim3(c) => c.iter().flatten().flatten().collect(),
        })
    }
}

fn fmt_list<T: std::fmt::Display>(f: &mut std::fmt::Formatter<'_>, v: &[T]) -> std::fmt::Result {
    write!(f, "[")?;
    for (i, e) in v.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", e)?;
    }
    write!(f, "]")
}

struct Row<'a, T>(&'a [T]);

impl<T: std::fmt::Display> std::fmt::Display for Row<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt_list(f, self.0)
    }
}

impl<T: std::fmt::Display> std::fmt::Display for A2lArray<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            A2lArray::Dim1(v) => fmt_list(f, v),
            A2lArray::Dim2(m) => fmt_list(f, &m.iter().map(|r| Row(r)).collect::<Vec<_>>()),
            A2lArray::Dim3(c) => {
                write!(f, "[")?;
                for (i, m) in c.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    fmt_list(f, &m.iter().map(|r| Row(r)).collect::<Vec<_>>())?;
                }
                write!(f, "]")
            }
        }
    }
}

//-----------------------------------------------------------------------------
// A2lValue

/// Value (or unit) of A2L link data
/// Data with more than one array, for example the axis of a curve together with its values, is Arrays
#[derive(Debug, Clone, PartialEq)]
pub enum A2lValue<T> {
    Single(T),
    Array(A2lArray<T>),
    Arrays(Vec<A2lArray<T>>),
}

impl<T: std::fmt::Display> std::fmt::Display for A2lValue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            A2lValue::Single(v) => write!(f, "{}", v),
            A2lValue::Array(a) => write!(f, "{}", a),
            A2lValue::Arrays(v) => fmt_list(f, v),
        }
    }
}
