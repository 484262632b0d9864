//! Element kinds and the cross-kind coercion table.
//!
//! Every storage keeps one native kind but can be read or written as any of the five
//! kinds. The rules below are observable through adapters and must not drift:
//!
//! | from \ to | bool      | int / long        | double     | complex      |
//! |-----------|-----------|-------------------|------------|--------------|
//! | bool      | -         | `1` / `0`         | `1.0/0.0`  | `(1 or 0, 0)` |
//! | int/long  | `== 1`    | widen / truncate  | exact-ish  | `(v, 0)`     |
//! | double    | `== 1.0`  | truncate (sat.)   | -          | `(v, 0)`     |
//! | complex   | `re == 1` | `re` truncated    | `re`       | -            |

use std::fmt;

use num_complex::Complex64;
use num_traits::AsPrimitive;

/// The five element kinds a matrix or storage can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Bool,
    Int,
    Long,
    Double,
    Complex,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Bool => "bool",
            ElementKind::Int => "int",
            ElementKind::Long => "long",
            ElementKind::Double => "double",
            ElementKind::Complex => "complex",
        };
        f.write_str(name)
    }
}

/// A single element of any kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i32),
    Long(i64),
    Double(f64),
    Complex(Complex64),
}

impl Value {
    pub fn kind(&self) -> ElementKind {
        match self {
            Value::Bool(_) => ElementKind::Bool,
            Value::Int(_) => ElementKind::Int,
            Value::Long(_) => ElementKind::Long,
            Value::Double(_) => ElementKind::Double,
            Value::Complex(_) => ElementKind::Complex,
        }
    }

    /// The zero (or `false`) of `kind`; what sparse storage reports for absent cells.
    pub fn zero(kind: ElementKind) -> Value {
        match kind {
            ElementKind::Bool => Value::Bool(false),
            ElementKind::Int => Value::Int(0),
            ElementKind::Long => Value::Long(0),
            ElementKind::Double => Value::Double(0.0),
            ElementKind::Complex => Value::Complex(Complex64::new(0.0, 0.0)),
        }
    }

    pub fn to_bool(self) -> bool {
        match self {
            Value::Bool(v) => v,
            Value::Int(v) => v == 1,
            Value::Long(v) => v == 1,
            Value::Double(v) => v == 1.0,
            Value::Complex(v) => v.re == 1.0,
        }
    }

    pub fn to_int(self) -> i32 {
        match self {
            Value::Bool(v) => v as i32,
            Value::Int(v) => v,
            Value::Long(v) => v.as_(),
            Value::Double(v) => v.as_(),
            Value::Complex(v) => v.re.as_(),
        }
    }

    pub fn to_long(self) -> i64 {
        match self {
            Value::Bool(v) => v as i64,
            Value::Int(v) => v.as_(),
            Value::Long(v) => v,
            Value::Double(v) => v.as_(),
            Value::Complex(v) => v.re.as_(),
        }
    }

    pub fn to_double(self) -> f64 {
        match self {
            Value::Bool(v) => {
                if v {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Int(v) => v.as_(),
            Value::Long(v) => v.as_(),
            Value::Double(v) => v,
            Value::Complex(v) => v.re,
        }
    }

    pub fn to_complex(self) -> Complex64 {
        match self {
            Value::Complex(v) => v,
            other => Complex64::new(other.to_double(), 0.0),
        }
    }

    /// Convert into `kind` following the coercion table.
    pub fn coerce(self, kind: ElementKind) -> Value {
        match kind {
            ElementKind::Bool => Value::Bool(self.to_bool()),
            ElementKind::Int => Value::Int(self.to_int()),
            ElementKind::Long => Value::Long(self.to_long()),
            ElementKind::Double => Value::Double(self.to_double()),
            ElementKind::Complex => Value::Complex(self.to_complex()),
        }
    }
}
