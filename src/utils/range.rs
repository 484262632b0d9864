//! Strided integer ranges.

use crate::error::{MatError, Result};

/// The half-open sequence `start, start + step, ...` stopping before `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    start: isize,
    end: isize,
    step: isize,
    len: usize,
}

impl Range {
    /// A range with an explicit step. The step must point from `start` towards `end`.
    pub fn new(start: isize, end: isize, step: isize) -> Result<Self> {
        if step == 0 || (start < end && step < 0) || (start > end && step > 0) {
            return Err(MatError::InvalidArgument("range step does not reach its end"));
        }
        let distance = end
            .checked_sub(start)
            .ok_or(MatError::InvalidArgument("range is longer than isize::MAX"))?
            .unsigned_abs();
        let stride = step.unsigned_abs();
        let len = distance.div_ceil(stride);
        Ok(Range { start, end, step, len })
    }

    /// `0, 1, ..., end - 1`, with `end` clamped to `isize::MAX`.
    pub fn to(end: usize) -> Self {
        let end = isize::try_from(end).unwrap_or(isize::MAX);
        Range { start: 0, end, step: 1, len: end.unsigned_abs() }
    }

    /// `start, start + 1, ..., end - 1`.
    pub fn span(start: usize, end: usize) -> Result<Self> {
        let bound = |v: usize| {
            isize::try_from(v).map_err(|_| MatError::InvalidArgument("range bound exceeds isize::MAX"))
        };
        Range::new(bound(start)?, bound(end)?, 1)
    }

    pub fn start(&self) -> isize {
        self.start
    }

    pub fn end(&self) -> isize {
        self.end
    }

    pub fn step(&self) -> isize {
        self.step
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The `index`-th element.
    pub fn get(&self, index: usize) -> Result<isize> {
        if index < self.len {
            Ok(self.start + index as isize * self.step)
        } else {
            Err(MatError::IndexOutOfRange { index, extent: self.len })
        }
    }

    pub fn contains(&self, value: isize) -> bool {
        let inside = if self.step > 0 {
            value >= self.start && value < self.end
        } else {
            value <= self.start && value > self.end
        };
        inside && (value - self.start) % self.step == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = isize> + '_ {
        (0..self.len).map(move |i| self.start + i as isize * self.step)
    }

    /// Smallest and largest element, if any.
    pub(crate) fn bounds(&self) -> Option<(isize, isize)> {
        if self.len == 0 {
            return None;
        }
        let last = self.start + (self.len as isize - 1) * self.step;
        Some((self.start.min(last), self.start.max(last)))
    }

    /// Fail unless every element addresses a position in `[0, extent)`.
    pub(crate) fn check_within(&self, extent: usize) -> Result<()> {
        match self.bounds() {
            Some((lo, _)) if lo < 0 => Err(MatError::IndexOutOfRange { index: 0, extent }),
            Some((_, hi)) if hi as usize >= extent => Err(MatError::IndexOutOfRange {
                index: hi as usize,
                extent,
            }),
            _ => Ok(()),
        }
    }
}
