//! Flat native arrays, one per element kind.

use num_complex::Complex64;

use crate::core::value::{ElementKind, Value};

/// A contiguous column-major buffer of one native kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayStorage {
    Bool(Vec<bool>),
    Int(Vec<i32>),
    Long(Vec<i64>),
    Double(Vec<f64>),
    Complex(Vec<Complex64>),
}

impl ArrayStorage {
    /// `len` zeros of `kind`.
    pub fn zeros(kind: ElementKind, len: usize) -> Self {
        match kind {
            ElementKind::Bool => ArrayStorage::Bool(vec![false; len]),
            ElementKind::Int => ArrayStorage::Int(vec![0; len]),
            ElementKind::Long => ArrayStorage::Long(vec![0; len]),
            ElementKind::Double => ArrayStorage::Double(vec![0.0; len]),
            ElementKind::Complex => ArrayStorage::Complex(vec![Complex64::new(0.0, 0.0); len]),
        }
    }

    /// Collect values, coercing each into `kind`.
    pub fn from_values<I: IntoIterator<Item = Value>>(kind: ElementKind, values: I) -> Self {
        let values = values.into_iter();
        match kind {
            ElementKind::Bool => ArrayStorage::Bool(values.map(Value::to_bool).collect()),
            ElementKind::Int => ArrayStorage::Int(values.map(Value::to_int).collect()),
            ElementKind::Long => ArrayStorage::Long(values.map(Value::to_long).collect()),
            ElementKind::Double => ArrayStorage::Double(values.map(Value::to_double).collect()),
            ElementKind::Complex => ArrayStorage::Complex(values.map(Value::to_complex).collect()),
        }
    }

    pub fn native_kind(&self) -> ElementKind {
        match self {
            ArrayStorage::Bool(_) => ElementKind::Bool,
            ArrayStorage::Int(_) => ElementKind::Int,
            ArrayStorage::Long(_) => ElementKind::Long,
            ArrayStorage::Double(_) => ElementKind::Double,
            ArrayStorage::Complex(_) => ElementKind::Complex,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ArrayStorage::Bool(v) => v.len(),
            ArrayStorage::Int(v) => v.len(),
            ArrayStorage::Long(v) => v.len(),
            ArrayStorage::Double(v) => v.len(),
            ArrayStorage::Complex(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Native value at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<Value> {
        match self {
            ArrayStorage::Bool(v) => v.get(index).copied().map(Value::Bool),
            ArrayStorage::Int(v) => v.get(index).copied().map(Value::Int),
            ArrayStorage::Long(v) => v.get(index).copied().map(Value::Long),
            ArrayStorage::Double(v) => v.get(index).copied().map(Value::Double),
            ArrayStorage::Complex(v) => v.get(index).copied().map(Value::Complex),
        }
    }

    /// Store `value` at `index` after coercing it; `false` past the end.
    pub fn set(&mut self, index: usize, value: Value) -> bool {
        match self {
            ArrayStorage::Bool(v) => v.get_mut(index).map(|slot| *slot = value.to_bool()),
            ArrayStorage::Int(v) => v.get_mut(index).map(|slot| *slot = value.to_int()),
            ArrayStorage::Long(v) => v.get_mut(index).map(|slot| *slot = value.to_long()),
            ArrayStorage::Double(v) => v.get_mut(index).map(|slot| *slot = value.to_double()),
            ArrayStorage::Complex(v) => v.get_mut(index).map(|slot| *slot = value.to_complex()),
        }
        .is_some()
    }

    /// The buffer itself when it holds doubles.
    pub fn as_doubles(&self) -> Option<&[f64]> {
        match self {
            ArrayStorage::Double(v) => Some(v),
            _ => None,
        }
    }
}
