//! Element containers shared between matrices.
//!
//! A [`Storage`] has one native kind but reads and writes every kind through the
//! coercion table in [`crate::core::value`]. Matrices never own a storage directly;
//! they hold a [`SharedStorage`] handle so views and adapters alias the same cells.

mod array;
mod bits;
mod hash;

pub use self::array::ArrayStorage;
pub use self::bits::BitStorage;
pub use self::hash::HashStorage;

use std::cell::RefCell;
use std::rc::Rc;

use num_complex::Complex64;

use crate::core::value::{ElementKind, Value};
use crate::error::{MatError, Result, ViewViolation};

/// The closed set of storage strategies.
#[derive(Debug, Clone, PartialEq)]
pub enum Storage {
    /// A flat native array.
    Array(ArrayStorage),
    /// Column -> row -> value hash map, numeric kinds.
    Hash(HashStorage),
    /// One bit per position, boolean kind.
    Bits(BitStorage),
}

macro_rules! typed_accessors {
    ($($get:ident, $set:ident, $to:ident, $t:ty, $variant:ident;)*) => {
        $(
            pub fn $get(&self, index: usize) -> Result<$t> {
                self.get_value(index).map(Value::$to)
            }

            pub fn $set(&mut self, index: usize, value: $t) -> Result<()> {
                self.set_value(index, Value::$variant(value))
            }
        )*
    };
}

impl Storage {
    pub fn native_kind(&self) -> ElementKind {
        match self {
            Storage::Array(a) => a.native_kind(),
            Storage::Hash(h) => h.native_kind(),
            Storage::Bits(_) => ElementKind::Bool,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Storage::Array(a) => a.len(),
            Storage::Hash(h) => h.len(),
            Storage::Bits(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the elements live in one contiguous native buffer.
    pub fn is_array_based(&self) -> bool {
        matches!(self, Storage::Array(_))
    }

    pub fn get_value(&self, index: usize) -> Result<Value> {
        let value = match self {
            Storage::Array(a) => a.get(index),
            Storage::Hash(h) => h.get(index),
            Storage::Bits(b) => b.get(index),
        };
        value.ok_or(MatError::IndexOutOfRange { index, extent: self.len() })
    }

    /// Write `value`, converting it to the native kind.
    pub fn set_value(&mut self, index: usize, value: Value) -> Result<()> {
        let extent = self.len();
        let written = match self {
            Storage::Array(a) => a.set(index, value),
            Storage::Hash(h) => h.set(index, value),
            Storage::Bits(b) => b.set(index, value),
        };
        if written {
            Ok(())
        } else {
            Err(MatError::IndexOutOfRange { index, extent })
        }
    }

    typed_accessors! {
        get_bool, set_bool, to_bool, bool, Bool;
        get_int, set_int, to_int, i32, Int;
        get_long, set_long, to_long, i64, Long;
        get_double, set_double, to_double, f64, Double;
        get_complex, set_complex, to_complex, Complex64, Complex;
    }

    /// Cells physically held: the full length for arrays, written cells otherwise.
    pub fn stored_entries(&self) -> usize {
        match self {
            Storage::Array(a) => a.len(),
            Storage::Hash(h) => h.stored(),
            Storage::Bits(b) => b.count(),
        }
    }
}

/// A reference-counted handle onto a [`Storage`].
///
/// Cloning the handle aliases the data; [`SharedStorage::copy`] is the only way to get
/// independent cells. A frozen handle reads the same data but refuses writes.
#[derive(Debug, Clone)]
pub struct SharedStorage {
    inner: Rc<RefCell<Storage>>,
    frozen: bool,
}

impl SharedStorage {
    pub fn new(storage: Storage) -> Self {
        SharedStorage { inner: Rc::new(RefCell::new(storage)), frozen: false }
    }

    pub fn array(storage: ArrayStorage) -> Self {
        SharedStorage::new(Storage::Array(storage))
    }

    /// A read-only handle onto the same cells.
    pub fn frozen(&self) -> Self {
        SharedStorage { inner: Rc::clone(&self.inner), frozen: true }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Deep copy into a fresh, writable storage.
    pub fn copy(&self) -> Self {
        SharedStorage::new(self.inner.borrow().clone())
    }

    /// Whether both handles refer to the same cells.
    pub fn ptr_eq(&self, other: &SharedStorage) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Run `f` against the underlying storage.
    pub fn with<R>(&self, f: impl FnOnce(&Storage) -> R) -> R {
        f(&self.inner.borrow())
    }

    pub fn native_kind(&self) -> ElementKind {
        self.with(Storage::native_kind)
    }

    pub fn len(&self) -> usize {
        self.with(Storage::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_array_based(&self) -> bool {
        self.with(Storage::is_array_based)
    }

    pub fn stored_entries(&self) -> usize {
        self.with(Storage::stored_entries)
    }

    pub fn get_value(&self, index: usize) -> Result<Value> {
        self.inner.borrow().get_value(index)
    }

    pub fn set_value(&self, index: usize, value: Value) -> Result<()> {
        if self.frozen {
            return Err(ViewViolation::Frozen.into());
        }
        self.inner.borrow_mut().set_value(index, value)
    }

    pub fn get_double(&self, index: usize) -> Result<f64> {
        self.get_value(index).map(Value::to_double)
    }

    pub fn set_double(&self, index: usize, value: f64) -> Result<()> {
        self.set_value(index, Value::Double(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_coerces_on_write() {
        let mut s = Storage::Array(ArrayStorage::zeros(ElementKind::Int, 4));
        s.set_double(1, 2.9).unwrap();
        assert_eq!(s.get_int(1).unwrap(), 2);
        assert_eq!(s.get_complex(1).unwrap(), Complex64::new(2.0, 0.0));
        s.set_bool(2, true).unwrap();
        assert_eq!(s.get_long(2).unwrap(), 1);
        assert_eq!(
            s.get_value(4),
            Err(MatError::IndexOutOfRange { index: 4, extent: 4 })
        );
    }

    #[test]
    fn bits_read_false_until_set() {
        let mut s = Storage::Bits(BitStorage::new(10));
        assert!(!s.get_bool(9).unwrap());
        s.set_int(9, 1).unwrap();
        s.set_double(3, 2.0).unwrap();
        assert!(s.get_bool(9).unwrap());
        assert!(!s.get_bool(3).unwrap());
        assert_eq!(s.stored_entries(), 1);
        assert!(!s.is_array_based());
    }

    #[test]
    fn frozen_handle_rejects_writes_but_sees_updates() {
        let live = SharedStorage::array(ArrayStorage::zeros(ElementKind::Double, 3));
        let frozen = live.frozen();
        assert_eq!(
            frozen.set_double(0, 1.0),
            Err(MatError::UnsupportedView(ViewViolation::Frozen))
        );
        live.set_double(0, 4.5).unwrap();
        assert_eq!(frozen.get_double(0).unwrap(), 4.5);
        assert!(frozen.ptr_eq(&live));
    }

    #[test]
    fn copy_is_independent() {
        let a = SharedStorage::new(Storage::Hash(HashStorage::new(ElementKind::Long, 2, 4)));
        a.set_value(3, Value::Long(9)).unwrap();
        let b = a.copy();
        b.set_value(3, Value::Long(1)).unwrap();
        assert_eq!(a.get_value(3).unwrap(), Value::Long(9));
        assert!(!a.ptr_eq(&b));
        assert!(!a.frozen().copy().is_frozen());
    }
}
