//! Boolean logic on boolean matrices.

use crate::error::Result;
use crate::matrix::Matrix;

#[allow(clippy::should_implement_trait)]
impl Matrix<bool> {
    pub fn andi(&mut self, other: &Matrix<bool>) -> Result<()> {
        self.combine_assign(other, |a, b| a && b)
    }

    pub fn ori(&mut self, other: &Matrix<bool>) -> Result<()> {
        self.combine_assign(other, |a, b| a || b)
    }

    pub fn xori(&mut self, other: &Matrix<bool>) -> Result<()> {
        self.combine_assign(other, |a, b| a ^ b)
    }

    pub fn noti(&mut self) -> Result<()> {
        self.update(|_, v| Ok(!v))
    }

    pub fn and(&self, other: &Matrix<bool>) -> Result<Matrix<bool>> {
        let mut out = self.to_dense()?;
        out.andi(other)?;
        Ok(out)
    }

    pub fn or(&self, other: &Matrix<bool>) -> Result<Matrix<bool>> {
        let mut out = self.to_dense()?;
        out.ori(other)?;
        Ok(out)
    }

    pub fn xor(&self, other: &Matrix<bool>) -> Result<Matrix<bool>> {
        let mut out = self.to_dense()?;
        out.xori(other)?;
        Ok(out)
    }

    pub fn not(&self) -> Result<Matrix<bool>> {
        let mut out = self.to_dense()?;
        out.noti()?;
        Ok(out)
    }

    /// Number of `true` elements.
    pub fn count_true(&self) -> Result<usize> {
        let mut count = 0;
        self.for_each(|v| count += usize::from(v))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truth_tables() {
        let a = Matrix::row_vector(vec![true, true, false, false]).unwrap();
        let b = Matrix::row_vector(vec![true, false, true, false]).unwrap();
        assert_eq!(a.and(&b).unwrap().to_vec().unwrap(), vec![true, false, false, false]);
        assert_eq!(a.or(&b).unwrap().to_vec().unwrap(), vec![true, true, true, false]);
        assert_eq!(a.xor(&b).unwrap().to_vec().unwrap(), vec![false, true, true, false]);
        assert_eq!(a.not().unwrap().count_true().unwrap(), 2);
    }

    #[test]
    fn bitset_backed_logic() {
        let mut bits = Matrix::bits(2, 2).unwrap();
        bits.set(0, 0, true).unwrap();
        let mask = Matrix::filled(2, 2, true).unwrap();
        bits.xori(&mask).unwrap();
        assert_eq!(bits.count_true().unwrap(), 3);
        assert_eq!(bits.stored_entries(), 3);
    }
}
