//! Sparse boolean storage over a bitset.

use bit_set::BitSet;

use crate::core::value::Value;

/// One bit per linear position; set bits are `true`.
#[derive(Debug, Clone, PartialEq)]
pub struct BitStorage {
    len: usize,
    bits: BitSet,
}

impl BitStorage {
    pub fn new(len: usize) -> Self {
        BitStorage { len, bits: BitSet::with_capacity(len) }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        (index < self.len).then(|| Value::Bool(self.bits.contains(index)))
    }

    pub fn set(&mut self, index: usize, value: Value) -> bool {
        if index >= self.len {
            return false;
        }
        if value.to_bool() {
            self.bits.insert(index);
        } else {
            self.bits.remove(index);
        }
        true
    }

    /// Number of `true` positions.
    pub fn count(&self) -> usize {
        self.bits.len()
    }
}
