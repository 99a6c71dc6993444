use std::fmt::{Debug, Display, Formatter};
use std::ops::Index;

/// Scalar type a [`Matrix`] can hold.
///
/// Integer implementations wrap on overflow, so powers stay exact modulo
/// `2^bits` even when intermediate squares exceed the type's range.
pub trait MatrixElement: Copy + PartialEq + Debug + Display {
    const ZERO: Self;
    const ONE: Self;

    fn element_add(self, other: Self) -> Self;
    fn element_mul(self, other: Self) -> Self;
}

macro_rules! wrapping_matrix_element {
    ($($ty:ty),*) => {
        $(
            impl MatrixElement for $ty {
                const ZERO: Self = 0;
                const ONE: Self = 1;

                fn element_add(self, other: Self) -> Self {
                    self.wrapping_add(other)
                }

                fn element_mul(self, other: Self) -> Self {
                    self.wrapping_mul(other)
                }
            }
        )*
    };
}

wrapping_matrix_element!(u32, u64, u128, i64);

impl MatrixElement for f64 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    fn element_add(self, other: Self) -> Self {
        self + other
    }

    fn element_mul(self, other: Self) -> Self {
        self * other
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    #[error("matrix requires at least one row")]
    Empty,
    #[error("matrix must be square, row {row} has {cols} column(s) for {rows} row(s)")]
    NotSquare { row: usize, rows: usize, cols: usize },
    #[error("matrix dimension mismatch: {left}x{left} times {right}x{right}")]
    DimensionMismatch { left: usize, right: usize },
}

/// Dense square matrix stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    size: usize,
    values: Vec<T>,
}

impl<T: MatrixElement> Matrix<T> {
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, MatrixError> {
        let size = rows.len();
        if size == 0 {
            return Err(MatrixError::Empty);
        }

        let mut values = Vec::with_capacity(size * size);
        for (row_index, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(MatrixError::NotSquare {
                    row: row_index,
                    rows: size,
                    cols: row.len(),
                });
            }
            values.extend(row);
        }

        Ok(Self { size, values })
    }

    pub fn from_array<const N: usize>(rows: [[T; N]; N]) -> Self {
        Self {
            size: N,
            values: rows.into_iter().flatten().collect(),
        }
    }

    pub fn identity(size: usize) -> Self {
        let mut values = vec![T::ZERO; size * size];
        for index in 0..size {
            values[index * size + index] = T::ONE;
        }
        Self { size, values }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        (row < self.size && col < self.size).then(|| self.values[row * self.size + col])
    }

    pub fn multiply(&self, other: &Self) -> Result<Self, MatrixError> {
        if self.size != other.size {
            return Err(MatrixError::DimensionMismatch {
                left: self.size,
                right: other.size,
            });
        }
        Ok(self.product(other))
    }

    /// Raises the matrix to `exponent` by repeated squaring.
    pub fn pow(&self, exponent: u64) -> Self {
        let mut result = Self::identity(self.size);
        let mut current = self.clone();
        let mut exponent = exponent;
        while exponent > 0 {
            if exponent % 2 == 1 {
                result = result.product(&current);
            }
            current = current.product(&current);
            exponent /= 2;
        }
        result
    }

    // Callers guarantee both operands have the same size.
    fn product(&self, other: &Self) -> Self {
        let size = self.size;
        let mut values = vec![T::ZERO; size * size];
        for row in 0..size {
            for col in 0..size {
                let mut accumulator = T::ZERO;
                for k in 0..size {
                    let term = self.values[row * size + k].element_mul(other.values[k * size + col]);
                    accumulator = accumulator.element_add(term);
                }
                values[row * size + col] = accumulator;
            }
        }
        Self { size, values }
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(
            row < self.size && col < self.size,
            "matrix index ({row}, {col}) out of bounds for size {}",
            self.size
        );
        &self.values[row * self.size + col]
    }
}

impl<T: Display> Display for Matrix<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.values.chunks(self.size.max(1)) {
            for value in row {
                write!(f, "{} ", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
