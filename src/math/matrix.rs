use rand::Rng;
use std::fmt;

use crate::error::{Error, Result};

/// Dense row-major matrix of `f64`.
///
/// Shape is fixed at construction. Element access is bounds-checked and
/// binary operations validate shapes before touching any element, so a failed
/// call never leaves either operand modified.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

/// Number of elements in a `rows x cols` matrix, `None` when it overflows `usize`.
fn element_count(rows: usize, cols: usize) -> Option<usize> {
    rows.checked_mul(cols)
}

impl Matrix {
    /// Allocates a `rows x cols` matrix with every element set to `fill`.
    ///
    /// # Panics
    /// If `rows * cols` overflows `usize`. Use [`Matrix::try_new`] for
    /// untrusted dimensions.
    pub fn new(rows: usize, cols: usize, fill: f64) -> Matrix {
        match Matrix::try_new(rows, cols, fill) {
            Ok(m) => m,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible [`Matrix::new`]: `Error::Shape` when `rows * cols` overflows.
    pub fn try_new(rows: usize, cols: usize, fill: f64) -> Result<Matrix> {
        let len = element_count(rows, cols)
            .ok_or_else(|| Error::shape("new", (rows, cols), (usize::MAX, 1)))?;
        Ok(Matrix {
            rows,
            cols,
            data: vec![fill; len],
        })
    }

    /// # Panics
    /// If `rows * cols` overflows `usize`.
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix::new(rows, cols, 0.0)
    }

    /// Builds a matrix from row-major `data`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Matrix> {
        if element_count(rows, cols) != Some(data.len()) {
            return Err(Error::shape("from_vec", (rows, cols), (data.len(), 1)));
        }
        Ok(Matrix { rows, cols, data })
    }

    /// Column vector (n x 1) holding `values`.
    pub fn column(values: Vec<f64>) -> Matrix {
        Matrix {
            rows: values.len(),
            cols: 1,
            data: values,
        }
    }

    pub fn identity(n: usize) -> Matrix {
        let mut res = Matrix::zeros(n, n);
        for i in 0..n {
            res.data[i * n + i] = 1.0;
        }
        res
    }

    /// Samples every element uniformly from `[low, high]`.
    pub fn random_uniform<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        low: f64,
        high: f64,
        rng: &mut R,
    ) -> Result<Matrix> {
        let len = element_count(rows, cols)
            .ok_or_else(|| Error::shape("random_uniform", (rows, cols), (usize::MAX, 1)))?;
        let data = (0..len).map(|_| rng.gen_range(low..=high)).collect();
        Ok(Matrix { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_column(&self) -> bool {
        self.cols == 1
    }

    /// Row-major view of the backing store.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    fn offset(&self, i: usize, j: usize) -> Result<usize> {
        if i >= self.rows || j >= self.cols {
            return Err(Error::Index {
                row: i,
                col: j,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(i * self.cols + j)
    }

    pub fn get(&self, i: usize, j: usize) -> Result<f64> {
        let idx = self.offset(i, j)?;
        Ok(self.data[idx])
    }

    pub fn set(&mut self, i: usize, j: usize, value: f64) -> Result<()> {
        let idx = self.offset(i, j)?;
        self.data[idx] = value;
        Ok(())
    }

    /// Copy of row `i` as a `1 x cols` matrix.
    pub fn row(&self, i: usize) -> Result<Matrix> {
        if i >= self.rows {
            return Err(Error::Index {
                row: i,
                col: 0,
                rows: self.rows,
                cols: self.cols,
            });
        }
        let start = i * self.cols;
        Ok(Matrix {
            rows: 1,
            cols: self.cols,
            data: self.data[start..start + self.cols].to_vec(),
        })
    }

    /// Copy of column `j` as a `rows x 1` matrix.
    pub fn col(&self, j: usize) -> Result<Matrix> {
        if j >= self.cols {
            return Err(Error::Index {
                row: 0,
                col: j,
                rows: self.rows,
                cols: self.cols,
            });
        }
        let data = (0..self.rows).map(|i| self.data[i * self.cols + j]).collect();
        Ok(Matrix {
            rows: self.rows,
            cols: 1,
            data,
        })
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }

        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&x| functor(x)).collect(),
        }
    }

    /// Elementwise sum, returning a new matrix.
    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        let mut res = self.clone();
        res.add_assign(other)?;
        Ok(res)
    }

    /// Elementwise sum into `self`. Returns `self` for chaining.
    pub fn add_assign(&mut self, other: &Matrix) -> Result<&mut Matrix> {
        if self.shape() != other.shape() {
            return Err(Error::shape("add", self.shape(), other.shape()));
        }

        for (l, r) in self.data.iter_mut().zip(other.data.iter()) {
            *l += *r;
        }

        Ok(self)
    }

    /// Standard matrix product `self * other`.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols != other.rows {
            return Err(Error::shape(
                "multiply",
                (self.cols, other.cols),
                other.shape(),
            ));
        }

        let mut res = Matrix::zeros(self.rows, other.cols);

        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;

                for k in 0..self.cols {
                    sum += self.data[i * self.cols + k] * other.data[k * other.cols + j];
                }

                res.data[i * res.cols + j] = sum;
            }
        }

        Ok(res)
    }
}

impl fmt::Display for Matrix {
    /// One row per line; precision defaults to 4 and honours `{:.N}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(4);
        for i in 0..self.rows {
            let row = &self.data[i * self.cols..(i + 1) * self.cols];
            let cells: Vec<String> = row.iter().map(|x| format!("{x:.precision$}")).collect();
            writeln!(f, "[{}]", cells.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_3x3() -> Matrix {
        Matrix::from_vec(3, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]).unwrap()
    }

    #[test]
    fn test_new_fills_every_element() {
        let m = Matrix::new(2, 3, 1.5);
        assert_eq!(m.shape(), (2, 3));
        assert!(m.as_slice().iter().all(|&x| x == 1.5));
    }

    #[test]
    fn test_from_vec_rejects_wrong_length() {
        let err = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, Error::Shape { .. }));
    }

    #[test]
    fn test_overflowing_dimensions_are_rejected() {
        let rows = usize::MAX / 2 + 1;
        assert!(matches!(Matrix::from_vec(rows, 2, vec![]), Err(Error::Shape { .. })));
        assert!(matches!(Matrix::try_new(rows, 2, 0.0), Err(Error::Shape { .. })));

        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            Matrix::random_uniform(rows, 2, -1.0, 1.0, &mut rng),
            Err(Error::Shape { .. })
        ));
    }

    #[test]
    #[should_panic]
    fn test_new_panics_on_overflowing_dimensions() {
        Matrix::zeros(usize::MAX / 2 + 1, 2);
    }

    #[test]
    fn test_is_column() {
        assert!(Matrix::column(vec![1.0, 2.0]).is_column());
        assert!(!Matrix::zeros(2, 2).is_column());
    }

    #[test]
    fn test_get_set() {
        let mut m = Matrix::zeros(2, 2);
        m.set(1, 0, 3.0).unwrap();
        assert_eq!(m.get(1, 0).unwrap(), 3.0);
        assert_eq!(m.get(0, 1).unwrap(), 0.0);
    }

    #[test]
    fn test_out_of_bounds_access() {
        let m = sample_3x3();
        assert!(matches!(m.get(3, 0), Err(Error::Index { .. })));
        assert!(matches!(m.get(0, 3), Err(Error::Index { .. })));

        let empty = Matrix::zeros(0, 0);
        assert!(matches!(empty.get(0, 0), Err(Error::Index { .. })));

        let mut single = Matrix::new(1, 1, 2.0);
        assert_eq!(single.get(0, 0).unwrap(), 2.0);
        assert!(matches!(single.get(1, 0), Err(Error::Index { .. })));
        assert!(matches!(single.set(0, 1, 1.0), Err(Error::Index { .. })));
        assert_eq!(single.get(0, 0).unwrap(), 2.0);
    }

    #[test]
    fn test_row_and_col() {
        let m = sample_3x3();
        assert_eq!(m.row(1).unwrap(), Matrix::from_vec(1, 3, vec![4.0, 5.0, 6.0]).unwrap());
        assert_eq!(m.col(2).unwrap(), Matrix::column(vec![3.0, 6.0, 9.0]));
        assert!(matches!(m.row(3), Err(Error::Index { .. })));
        assert!(matches!(m.col(5), Err(Error::Index { .. })));
    }

    #[test]
    fn test_transpose() {
        let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let t = m.transpose();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.get(2, 1).unwrap(), 6.0);
        assert_eq!(t.get(0, 1).unwrap(), 4.0);
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn test_additive_and_multiplicative_identity() {
        let a = sample_3x3();
        let zero = Matrix::identity(3).map(|x| x * 0.0);
        assert_eq!(a.add(&zero).unwrap(), a);
        assert_eq!(a.multiply(&Matrix::identity(3)).unwrap(), a);
    }

    #[test]
    fn test_add_assign_chains() {
        let mut a = Matrix::new(2, 2, 1.0);
        let b = Matrix::new(2, 2, 2.0);
        a.add_assign(&b).unwrap().add_assign(&b).unwrap();
        assert_eq!(a, Matrix::new(2, 2, 5.0));
    }

    #[test]
    fn test_add_shape_mismatch_leaves_receiver_untouched() {
        let mut a = Matrix::new(2, 2, 1.0);
        let b = Matrix::new(2, 3, 1.0);
        assert!(matches!(a.add_assign(&b), Err(Error::Shape { .. })));
        assert_eq!(a, Matrix::new(2, 2, 1.0));
        assert!(a.add(&b).is_err());
    }

    #[test]
    fn test_multiply() {
        let a = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let b = Matrix::from_vec(3, 2, vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0]).unwrap();
        let c = a.multiply(&b).unwrap();
        assert_eq!(c, Matrix::from_vec(2, 2, vec![58.0, 64.0, 139.0, 154.0]).unwrap());
    }

    #[test]
    fn test_multiply_shape_mismatch() {
        let a = Matrix::new(2, 3, 1.0);
        let b = Matrix::new(2, 3, 1.0);
        let (a_before, b_before) = (a.clone(), b.clone());
        assert!(matches!(a.multiply(&b), Err(Error::Shape { .. })));
        assert_eq!(a, a_before);
        assert_eq!(b, b_before);
    }

    #[test]
    fn test_random_uniform_range_and_seed() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = Matrix::random_uniform(4, 5, -1.0, 1.0, &mut rng).unwrap();
        assert!(m.as_slice().iter().all(|&x| (-1.0..=1.0).contains(&x)));

        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(Matrix::random_uniform(4, 5, -1.0, 1.0, &mut rng).unwrap(), m);
    }

    #[test]
    fn test_display() {
        let m = Matrix::from_vec(2, 2, vec![1.0, 0.5, -2.0, 0.25]).unwrap();
        assert_eq!(format!("{m:.2}"), "[1.00, 0.50]\n[-2.00, 0.25]\n");
    }
}
