//! Data type definitions
//!
//! `DType` is the closed set of element types an array can carry. Each dtype
//! belongs to one `DTypeKind`, has a canonical name, and knows which casts
//! are allowed under each `Casting` rule.

use crate::error::{DTypeError, Result};
use std::fmt;
use std::str::FromStr;

/// Coarse category of a dtype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DTypeKind {
    /// Boolean
    Bool,
    /// Unsigned integer
    UInt,
    /// Signed integer
    Int,
    /// Floating point
    Float,
    /// Complex floating point
    Complex,
}

/// Element type of an array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    /// Two float32 components
    Complex64,
    /// Two float64 components
    Complex128,
}

impl DType {
    /// Every supported dtype, in promotion order within each kind
    pub const ALL: [DType; 13] = [
        DType::Bool,
        DType::Int8,
        DType::Int16,
        DType::Int32,
        DType::Int64,
        DType::UInt8,
        DType::UInt16,
        DType::UInt32,
        DType::UInt64,
        DType::Float32,
        DType::Float64,
        DType::Complex64,
        DType::Complex128,
    ];

    pub fn kind(self) -> DTypeKind {
        match self {
            DType::Bool => DTypeKind::Bool,
            DType::Int8 | DType::Int16 | DType::Int32 | DType::Int64 => DTypeKind::Int,
            DType::UInt8 | DType::UInt16 | DType::UInt32 | DType::UInt64 => DTypeKind::UInt,
            DType::Float32 | DType::Float64 => DTypeKind::Float,
            DType::Complex64 | DType::Complex128 => DTypeKind::Complex,
        }
    }

    /// Canonical name, e.g. `"float64"`
    pub fn name(self) -> &'static str {
        match self {
            DType::Bool => "bool",
            DType::Int8 => "int8",
            DType::Int16 => "int16",
            DType::Int32 => "int32",
            DType::Int64 => "int64",
            DType::UInt8 => "uint8",
            DType::UInt16 => "uint16",
            DType::UInt32 => "uint32",
            DType::UInt64 => "uint64",
            DType::Float32 => "float32",
            DType::Float64 => "float64",
            DType::Complex64 => "complex64",
            DType::Complex128 => "complex128",
        }
    }

    pub fn size_in_bytes(self) -> usize {
        match self {
            DType::Bool | DType::Int8 | DType::UInt8 => 1,
            DType::Int16 | DType::UInt16 => 2,
            DType::Int32 | DType::UInt32 | DType::Float32 => 4,
            DType::Int64 | DType::UInt64 | DType::Float64 | DType::Complex64 => 8,
            DType::Complex128 => 16,
        }
    }

    /// Check if this is a floating point type
    pub fn is_float(self) -> bool {
        self.kind() == DTypeKind::Float
    }

    /// Check if this is a complex type
    pub fn is_complex(self) -> bool {
        self.kind() == DTypeKind::Complex
    }

    /// Check if this is a boolean type
    pub fn is_bool(self) -> bool {
        self.kind() == DTypeKind::Bool
    }

    /// Check if this is a signed or unsigned integer type
    pub fn is_integer(self) -> bool {
        matches!(self.kind(), DTypeKind::Int | DTypeKind::UInt)
    }

    /// Complex dtype with the same component precision.
    ///
    /// Complex dtypes map to themselves; non-float dtypes have none.
    pub fn complex_counterpart(self) -> Option<DType> {
        match self {
            DType::Float32 | DType::Complex64 => Some(DType::Complex64),
            DType::Float64 | DType::Complex128 => Some(DType::Complex128),
            _ => None,
        }
    }

    /// Real dtype with the same component precision.
    ///
    /// Float dtypes map to themselves; non-float dtypes have none.
    pub fn real_counterpart(self) -> Option<DType> {
        match self {
            DType::Float32 | DType::Complex64 => Some(DType::Float32),
            DType::Float64 | DType::Complex128 => Some(DType::Float64),
            _ => None,
        }
    }

    /// Whether a value of this dtype may be cast to `to` under `rule`.
    pub fn can_cast(self, to: DType, rule: Casting) -> bool {
        match rule {
            Casting::No => self == to,
            Casting::Safe => self.can_cast_safely(to),
            Casting::SameKind => self.can_cast_safely(to) || to.kind() >= self.kind(),
            Casting::Unsafe => true,
        }
    }

    fn can_cast_safely(self, to: DType) -> bool {
        if self == to || self == DType::Bool {
            return true;
        }
        let bits = self.size_in_bytes() * 8;
        match (self.kind(), to.kind()) {
            (DTypeKind::UInt, DTypeKind::UInt) | (DTypeKind::Int, DTypeKind::Int) => {
                to.size_in_bytes() >= self.size_in_bytes()
            }
            (DTypeKind::UInt, DTypeKind::Int) => to.size_in_bytes() > self.size_in_bytes(),
            (DTypeKind::UInt | DTypeKind::Int, DTypeKind::Float | DTypeKind::Complex) => {
                // float32 components hold every 16-bit integer exactly
                bits <= 16 || matches!(to, DType::Float64 | DType::Complex128)
            }
            (DTypeKind::Float, DTypeKind::Float | DTypeKind::Complex)
            | (DTypeKind::Complex, DTypeKind::Complex) => {
                let component = if to.is_complex() {
                    to.size_in_bytes() / 2
                } else {
                    to.size_in_bytes()
                };
                let own = if self.is_complex() {
                    self.size_in_bytes() / 2
                } else {
                    self.size_in_bytes()
                };
                component >= own
            }
            _ => false,
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DType {
    type Err = DTypeError;

    /// Parses canonical names only. Backends layer their own aliases on top.
    fn from_str(s: &str) -> Result<Self> {
        DType::ALL
            .into_iter()
            .find(|dtype| dtype.name() == s)
            .ok_or_else(|| DTypeError::UnknownDType(s.to_string()))
    }
}

/// Casting rule, from strictest to most permissive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Casting {
    /// Identity only
    No,
    /// Value-preserving casts
    Safe,
    /// Safe casts plus casts within a kind or towards a higher kind
    SameKind,
    /// Anything goes
    #[default]
    Unsafe,
}

impl fmt::Display for Casting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Casting::No => write!(f, "no"),
            Casting::Safe => write!(f, "safe"),
            Casting::SameKind => write!(f, "same_kind"),
            Casting::Unsafe => write!(f, "unsafe"),
        }
    }
}
