//! Sparse numeric storage: a two-level hash map keyed column -> row.

use rustc_hash::FxHashMap;

use crate::core::value::{ElementKind, Value};
use crate::utils::indexer::decompose;

/// Cells addressed by column-major linear index, stored only once written.
///
/// The row count fixed at construction decomposes linear indexes, so a matrix that
/// reshapes over this storage keeps its linear order.
#[derive(Debug, Clone, PartialEq)]
pub struct HashStorage {
    kind: ElementKind,
    rows: usize,
    len: usize,
    columns: FxHashMap<usize, FxHashMap<usize, Value>>,
}

impl HashStorage {
    pub fn new(kind: ElementKind, rows: usize, len: usize) -> Self {
        HashStorage { kind, rows, len, columns: FxHashMap::default() }
    }

    pub fn native_kind(&self) -> ElementKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        if index >= self.len {
            return None;
        }
        let (row, col) = decompose(index, self.rows);
        let stored = self.columns.get(&col).and_then(|column| column.get(&row));
        Some(stored.copied().unwrap_or_else(|| Value::zero(self.kind)))
    }

    /// Upsert `value` (coerced to the native kind); `false` past the end.
    pub fn set(&mut self, index: usize, value: Value) -> bool {
        if index >= self.len {
            return false;
        }
        let (row, col) = decompose(index, self.rows);
        self.columns
            .entry(col)
            .or_default()
            .insert(row, value.coerce(self.kind));
        true
    }

    /// Number of cells that have been written.
    pub fn stored(&self) -> usize {
        self.columns.values().map(|column| column.len()).sum()
    }
}
