/* ************************************************************************ **
** This file is part of tmtx, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Conversions between layouts, shapes, and flat buffers.

use crate::layout::{Layout, RowMajor, ColumnMajor};
use crate::types::Matrix;

use std::convert::TryFrom;
use thiserror::Error;

/// A flat buffer did not have exactly `rows * cols` elements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("a {rows}x{cols} matrix needs exactly {expected} elements, got {actual}")]
pub struct ShapeError {
    pub rows: usize,
    pub cols: usize,
    pub expected: usize,
    pub actual: usize,
}

fn check_flat_len<const R: usize, const C: usize>(actual: usize) -> Result<(), ShapeError> {
    if actual == R * C {
        return Ok(());
    }
    let e = ShapeError { rows: R, cols: C, expected: R * C, actual };
    debug!("rejected flat buffer: {}", e);
    Err(e)
}

impl<T, const R: usize, const C: usize, L: Layout> Matrix<T, R, C, L> {
    /// Reinterpret a flat buffer, in this layout's storage order, as a matrix.
    ///
    /// ```
    /// use tmtx_matrix::{Matrix, ColumnMajor};
    ///
    /// let flat = [1, 2, 3, 4, 5, 6];
    /// let m = Matrix::<i32, 2, 3, ColumnMajor>::from_flat_ref(&flat).unwrap();
    /// assert_eq!(m.row_view(0), [1, 3, 5]);
    ///
    /// assert!(Matrix::<i32, 2, 2>::from_flat_ref(&flat).is_err());
    /// ```
    pub fn from_flat_ref(flat: &[T]) -> Result<&Self, ShapeError> {
        check_flat_len::<R, C>(flat.len())?;
        let () = Self::FLAT_LAYOUT;
        // UNSAFETY: FLAT_LAYOUT guarantees that Self is exactly R * C values of T
        //           with the alignment of T, and we just checked the length.
        Ok(unsafe { &*(flat.as_ptr() as *const Self) })
    }

    /// Reinterpret a mutable flat buffer, in this layout's storage order, as a matrix.
    pub fn from_flat_mut(flat: &mut [T]) -> Result<&mut Self, ShapeError> {
        check_flat_len::<R, C>(flat.len())?;
        let () = Self::FLAT_LAYOUT;
        // UNSAFETY: see from_flat_ref
        Ok(unsafe { &mut *(flat.as_mut_ptr() as *mut Self) })
    }

    /// Copy a flat buffer, in this layout's storage order, into a new matrix.
    pub fn try_from_flat(flat: &[T]) -> Result<Self, ShapeError>
    where T: Clone,
    { Self::from_flat_ref(flat).map(Clone::clone) }

    /// Copy into a matrix of another layout, preserving every cell.
    ///
    /// ```
    /// use tmtx_matrix::{Matrix, ColumnMajor};
    ///
    /// let m = Matrix::<u8, 2, 2>::from_rows([[1, 2], [3, 4]]);
    /// let c = m.to_layout::<ColumnMajor>();
    /// assert_eq!(c, m);
    /// assert_eq!(c.as_flat(), &[1, 3, 2, 4]);
    /// ```
    pub fn to_layout<L2: Layout>(&self) -> Matrix<T, R, C, L2>
    where T: Clone,
    { Matrix::from_fn(|r, c| self[(r, c)].clone()) }
}

/// Same as `Matrix::try_from_flat`.
impl<'a, T: Clone, const R: usize, const C: usize, L: Layout> TryFrom<&'a [T]> for Matrix<T, R, C, L> {
    type Error = ShapeError;

    #[inline]
    fn try_from(flat: &'a [T]) -> Result<Self, ShapeError> { Self::try_from_flat(flat) }
}

// A row-major matrix has the same storage as the column-major matrix of its
// transpose, so transposing a matrix is free when the layout flips too.
gen_each!{
    @{layout_transposed}
    impl_transpose!({$L:ident $Transposed:ident}) => {
        impl<T, const R: usize, const C: usize> Matrix<T, R, C, $L> {
            /// Transpose without moving any data, by flipping the layout.
            ///
            /// Use `to_layout` afterwards if the original layout is required.
            #[inline(always)]
            pub fn transpose(self) -> Matrix<T, C, R, $Transposed> {
                Matrix::from_storage(self.into_storage())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RowMatrix, ColumnMatrix, M44};

    #[test]
    fn flat_round_trip_in_storage_order() {
        let flat: Vec<f32> = (0..12).map(|x| x as f32).collect();

        let rows = RowMatrix::<f32, 3, 4>::try_from_flat(&flat).unwrap();
        assert_eq!(rows[(1, 0)], 4.0);
        assert_eq!(rows.as_flat(), &flat[..]);

        let cols = ColumnMatrix::<f32, 3, 4>::try_from(&flat[..]).unwrap();
        assert_eq!(cols[(1, 0)], 1.0);
        assert_eq!(cols[(0, 1)], 3.0);
        assert_eq!(cols.as_flat(), &flat[..]);
    }

    #[test]
    fn wrong_length_is_an_error() {
        let flat = [0u8; 15];
        let e = M44::<u8>::try_from_flat(&flat).unwrap_err();
        assert_eq!(e, ShapeError { rows: 4, cols: 4, expected: 16, actual: 15 });
        assert_eq!(e.to_string(), "a 4x4 matrix needs exactly 16 elements, got 15");

        assert!(Matrix::<u8, 2, 8, ColumnMajor>::from_flat_ref(&flat[..]).is_err());
        assert!(Matrix::<u8, 3, 5, ColumnMajor>::from_flat_ref(&flat[..]).is_ok());
    }

    #[test]
    fn flat_mut_writes_through() {
        let mut flat = [0i64; 6];
        {
            let m = Matrix::<i64, 2, 3, ColumnMajor>::from_flat_mut(&mut flat).unwrap();
            m[(1, 2)] = 7;
            m.row_view_mut(0).fill(1);
        }
        assert_eq!(flat, [1, 0, 1, 0, 1, 7]);
    }

    #[test]
    fn transpose_is_free() {
        let m = RowMatrix::<i32, 2, 3>::from_fn(|r, c| (10 * r + c) as i32);
        let flat = m.as_flat().to_vec();

        let t = m.transpose();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.as_flat(), &flat[..]);
        for r in 0..2 {
            for c in 0..3 {
                assert_eq!(t[(c, r)], m[(r, c)]);
            }
        }
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn layout_conversion_keeps_cells() {
        let m = ColumnMatrix::<String, 2, 3>::from_fn(|r, c| format!("{}{}", r, c));
        let rows = m.to_layout::<RowMajor>();
        assert_eq!(rows, m);
        assert_eq!(rows.row(1), &["10", "11", "12"]);
        assert_eq!(rows.to_layout::<ColumnMajor>().as_flat(), m.as_flat());
    }
}
