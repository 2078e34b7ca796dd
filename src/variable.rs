//! Tag data model: data types, array descriptors, variable info.
//!
//! This module defines the [`DataType`] enum with its fixed wire mapping,
//! the [`ArrayInfo`] and [`VariableInfo`] descriptors produced by tag
//! resolution, and the [`array_size`] rule that turns an array descriptor
//! into its in-memory byte size.
//!
//! # Wire Mapping
//!
//! A tag's data type travels as a single byte. The mapping is the CIP
//! elementary-type code space plus the Omron extensions and is stable:
//!
//! | Code | Type | Code | Type |
//! |------|------|------|------|
//! | 0xC1 | BOOL | 0xCC | TIME |
//! | 0xC2 | SINT | 0xCD | DATE |
//! | 0xC3 | INT | 0xCE | TIME_OF_DAY |
//! | 0xC4 | DINT | 0xCF | DATE_AND_TIME |
//! | 0xC5 | LINT | 0xD0 | STRING |
//! | 0xC6 | USINT | 0xD1 | BYTE |
//! | 0xC7 | UINT | 0xD2 | WORD |
//! | 0xC8 | UDINT | 0xD3 | DWORD |
//! | 0xC9 | ULINT | 0xD4 | LWORD |
//! | 0xCA | REAL | 0xDB | TIME2 |
//! | 0xCB | LREAL | 0xA0 | ABBREVIATED_STRUCTURE |
//! | 0x00 | UNDEFINED | 0xA2 | STRUCTURE |
//! | | | 0xA3 | ARRAY |
//!
//! Any other byte decodes as [`DataType::Unknown`] and is carried through
//! unchanged; [`DataType::is_valid`] distinguishes recognized codes.
//!
//! # Example
//!
//! ```
//! use omron_cip::DataType;
//!
//! assert_eq!(DataType::from_byte(0xC4), DataType::Dint);
//! assert_eq!(DataType::Dint.to_string(), "DINT");
//! assert!(!DataType::from_byte(0x99).is_valid());
//! ```

use std::fmt;

/// Data type of a tag, as reported by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// No type assigned.
    Undefined,
    /// DATE.
    Date,
    /// TIME (CIP synchronized time).
    Time,
    /// DATE_AND_TIME.
    DateAndTime,
    /// TIME_OF_DAY.
    TimeOfDay,
    /// BOOL (1 bit; word-packed in arrays).
    Bool,
    /// SINT (1 byte signed).
    Sint,
    /// INT (2 bytes signed).
    Int,
    /// DINT (4 bytes signed).
    Dint,
    /// LINT (8 bytes signed).
    Lint,
    /// USINT (1 byte unsigned).
    Usint,
    /// UINT (2 bytes unsigned).
    Uint,
    /// UDINT (4 bytes unsigned).
    Udint,
    /// ULINT (8 bytes unsigned).
    Ulint,
    /// REAL (4 bytes float).
    Real,
    /// LREAL (8 bytes float).
    Lreal,
    /// STRING.
    String,
    /// BYTE (8-bit bit string).
    Byte,
    /// WORD (16-bit bit string).
    Word,
    /// DWORD (32-bit bit string).
    Dword,
    /// LWORD (64-bit bit string).
    Lword,
    /// Omron duration type (nanosecond TIME).
    Time2,
    /// Abbreviated structure; members are not decoded.
    AbbreviatedStructure,
    /// Structure; members are not decoded.
    Structure,
    /// Array of a scalar element type.
    Array,
    /// A byte outside the known mapping, kept verbatim.
    Unknown(u8),
}

impl DataType {
    /// Decodes a wire byte. Total: unrecognized bytes become `Unknown`.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0x00 => DataType::Undefined,
            0xA0 => DataType::AbbreviatedStructure,
            0xA2 => DataType::Structure,
            0xA3 => DataType::Array,
            0xC1 => DataType::Bool,
            0xC2 => DataType::Sint,
            0xC3 => DataType::Int,
            0xC4 => DataType::Dint,
            0xC5 => DataType::Lint,
            0xC6 => DataType::Usint,
            0xC7 => DataType::Uint,
            0xC8 => DataType::Udint,
            0xC9 => DataType::Ulint,
            0xCA => DataType::Real,
            0xCB => DataType::Lreal,
            0xCC => DataType::Time,
            0xCD => DataType::Date,
            0xCE => DataType::TimeOfDay,
            0xCF => DataType::DateAndTime,
            0xD0 => DataType::String,
            0xD1 => DataType::Byte,
            0xD2 => DataType::Word,
            0xD3 => DataType::Dword,
            0xD4 => DataType::Lword,
            0xDB => DataType::Time2,
            other => DataType::Unknown(other),
        }
    }

    /// Returns the wire byte for this type.
    pub fn code(self) -> u8 {
        match self {
            DataType::Undefined => 0x00,
            DataType::AbbreviatedStructure => 0xA0,
            DataType::Structure => 0xA2,
            DataType::Array => 0xA3,
            DataType::Bool => 0xC1,
            DataType::Sint => 0xC2,
            DataType::Int => 0xC3,
            DataType::Dint => 0xC4,
            DataType::Lint => 0xC5,
            DataType::Usint => 0xC6,
            DataType::Uint => 0xC7,
            DataType::Udint => 0xC8,
            DataType::Ulint => 0xC9,
            DataType::Real => 0xCA,
            DataType::Lreal => 0xCB,
            DataType::Time => 0xCC,
            DataType::Date => 0xCD,
            DataType::TimeOfDay => 0xCE,
            DataType::DateAndTime => 0xCF,
            DataType::String => 0xD0,
            DataType::Byte => 0xD1,
            DataType::Word => 0xD2,
            DataType::Dword => 0xD3,
            DataType::Lword => 0xD4,
            DataType::Time2 => 0xDB,
            DataType::Unknown(byte) => byte,
        }
    }

    /// Returns whether this is a recognized wire value.
    ///
    /// `Undefined` and `Unknown` are not; everything else is, including the
    /// structure and array types that are later filtered from the catalog.
    pub fn is_valid(self) -> bool {
        !matches!(self, DataType::Undefined | DataType::Unknown(_))
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Undefined => write!(f, "UNDEFINED"),
            DataType::Date => write!(f, "DATE"),
            DataType::Time => write!(f, "TIME"),
            DataType::DateAndTime => write!(f, "DATE_AND_TIME"),
            DataType::TimeOfDay => write!(f, "TIME_OF_DAY"),
            DataType::Bool => write!(f, "BOOL"),
            DataType::Sint => write!(f, "SINT"),
            DataType::Int => write!(f, "INT"),
            DataType::Dint => write!(f, "DINT"),
            DataType::Lint => write!(f, "LINT"),
            DataType::Usint => write!(f, "USINT"),
            DataType::Uint => write!(f, "UINT"),
            DataType::Udint => write!(f, "UDINT"),
            DataType::Ulint => write!(f, "ULINT"),
            DataType::Real => write!(f, "REAL"),
            DataType::Lreal => write!(f, "LREAL"),
            DataType::String => write!(f, "STRING"),
            DataType::Byte => write!(f, "BYTE"),
            DataType::Word => write!(f, "WORD"),
            DataType::Dword => write!(f, "DWORD"),
            DataType::Lword => write!(f, "LWORD"),
            DataType::Time2 => write!(f, "TIME2"),
            DataType::AbbreviatedStructure => write!(f, "ABBREVIATED_STRUCTURE"),
            DataType::Structure => write!(f, "STRUCTURE"),
            DataType::Array => write!(f, "ARRAY"),
            DataType::Unknown(byte) => write!(f, "Unknown({byte:x})"),
        }
    }
}

/// Array descriptor of an `ARRAY` tag.
///
/// Invariant: `dimensions` and `start_indices` have the same length, and
/// there are between 1 and 255 dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayInfo {
    /// Scalar type of the elements.
    pub element_type: DataType,
    /// Bytes per element, as reported by the controller.
    pub element_size: u32,
    /// Length of each axis.
    pub dimensions: Vec<u32>,
    /// Lower bound of each axis.
    pub start_indices: Vec<u32>,
}

impl fmt::Display for ArrayInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ArrayInfo(element_type={}, element_size={}, dimensions={:?}, start_indices={:?})",
            self.element_type, self.element_size, self.dimensions, self.start_indices
        )
    }
}

/// One resolved tag.
///
/// Invariant: `array_info` is present exactly when `data_type` is
/// [`DataType::Array`], and `size` is then the computed whole-array byte
/// size from [`array_size`], not the element size echoed on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableInfo {
    /// Symbolic tag name (1..=255 bytes).
    pub name: String,
    /// Data type of the tag.
    pub data_type: DataType,
    /// In-memory byte size of one value, or of the whole array.
    pub size: u32,
    /// Array descriptor, for `ARRAY` tags only.
    pub array_info: Option<ArrayInfo>,
}

impl fmt::Display for VariableInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VariableInfo(name='{}', data_type={}, size={}, array_info=",
            self.name, self.data_type, self.size
        )?;
        match &self.array_info {
            Some(info) => write!(f, "{info})"),
            None => write!(f, "null)"),
        }
    }
}

/// Computes the in-memory byte size of an array.
///
/// For most element types this is the product of the dimensions times the
/// element size. `BOOL` arrays are packed into the bits of full 16-bit
/// words: with `P` elements and `r = P mod 16`, the size is `P / 8` bytes
/// when `r == 0`, one more when `8 <= r < 16`, and two more when
/// `0 < r < 8` — always a whole number of words.
///
/// # Example
///
/// ```
/// use omron_cip::{array_size, DataType};
///
/// assert_eq!(array_size(&[10, 2], DataType::Dint, 4), 80);
/// assert_eq!(array_size(&[17], DataType::Bool, 1), 4);
/// ```
pub fn array_size(dimensions: &[u32], element_type: DataType, element_size: u32) -> u32 {
    let dim_product: u64 = dimensions.iter().map(|&d| d as u64).product();

    if element_type == DataType::Bool {
        let remainder = dim_product % 16;
        let full_bytes = dim_product / 8;
        let size = if remainder == 0 {
            full_bytes
        } else if remainder >= 8 {
            full_bytes + 1
        } else {
            full_bytes + 2
        };
        return size as u32;
    }

    (dim_product * element_size as u64) as u32
}
