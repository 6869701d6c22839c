/* ************************************************************************ **
** This file is part of tmtx, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Cells, flat storage, and row/column views.

use crate::layout::{Layout, RowMajor, ColumnMajor};
use crate::types::Matrix;

use tmtx_array_view::{FixedStridedView, FixedStridedViewMut};

use std::mem;
use std::ops::{Index, IndexMut};
use std::ptr::NonNull;
use std::slice;

/// Rejects `I >= N` during monomorphization.
struct AssertInBounds<const I: usize, const N: usize>;

impl<const I: usize, const N: usize> AssertInBounds<I, N> {
    const OK: () = assert!(I < N, "compile-time index out of bounds");
}

#[cold]
#[inline(never)]
#[track_caller]
fn cell_out_of_bounds(row: usize, col: usize, rows: usize, cols: usize) -> ! {
    panic!("cell ({}, {}) out of bounds for a {}x{} matrix", row, col, rows, cols)
}

#[cold]
#[inline(never)]
#[track_caller]
fn lane_out_of_bounds(what: &str, index: usize, count: usize) -> ! {
    panic!("{} {} out of bounds for a matrix with {} {}s", what, index, count, what)
}

impl<T, const R: usize, const C: usize, L: Layout> Matrix<T, R, C, L> {
    /// The cell at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= R` or `col >= C`.
    #[inline]
    #[track_caller]
    pub fn cell(&self, row: usize, col: usize) -> &T {
        match self.get(row, col) {
            Some(x) => x,
            None => cell_out_of_bounds(row, col, R, C),
        }
    }

    /// The cell at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= R` or `col >= C`.
    #[inline]
    #[track_caller]
    pub fn cell_mut(&mut self, row: usize, col: usize) -> &mut T {
        match self.get_mut(row, col) {
            Some(x) => x,
            None => cell_out_of_bounds(row, col, R, C),
        }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        match row < R && col < C {
            true => Some(L::cell::<T, R, C>(self.storage(), row, col)),
            false => None,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        match row < R && col < C {
            true => Some(L::cell_mut::<T, R, C>(self.storage_mut(), row, col)),
            false => None,
        }
    }

    /// The cell at `(I, J)`, with the bounds checked at compile time.
    ///
    /// ```
    /// use tmtx_matrix::M33;
    ///
    /// let m = M33::<i32>::from_fn(|r, c| (3 * r + c) as i32);
    /// assert_eq!(*m.cell_at::<2, 0>(), 6);
    /// ```
    #[inline(always)]
    pub fn cell_at<const I: usize, const J: usize>(&self) -> &T {
        let () = AssertInBounds::<I, R>::OK;
        let () = AssertInBounds::<J, C>::OK;
        L::cell::<T, R, C>(self.storage(), I, J)
    }

    #[inline(always)]
    pub fn cell_at_mut<const I: usize, const J: usize>(&mut self) -> &mut T {
        let () = AssertInBounds::<I, R>::OK;
        let () = AssertInBounds::<J, C>::OK;
        L::cell_mut::<T, R, C>(self.storage_mut(), I, J)
    }

    /// All `R * C` cells in storage order.
    #[inline(always)]
    pub fn as_flat(&self) -> &[T] {
        let () = Self::FLAT_LAYOUT;
        // UNSAFETY: FLAT_LAYOUT guarantees that Self is exactly R * C values of T
        //           with the alignment of T.
        unsafe { slice::from_raw_parts(self as *const Self as *const T, R * C) }
    }

    /// All `R * C` cells in storage order.
    #[inline(always)]
    pub fn as_flat_mut(&mut self) -> &mut [T] {
        let () = Self::FLAT_LAYOUT;
        // UNSAFETY: see as_flat
        unsafe { slice::from_raw_parts_mut(self as *mut Self as *mut T, R * C) }
    }

    /// Iterate over cells in storage order.
    #[inline(always)]
    pub fn iter(&self) -> slice::Iter<'_, T> { self.as_flat().iter() }

    /// Iterate over cells in storage order.
    #[inline(always)]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> { self.as_flat_mut().iter_mut() }

    /// View a row, whatever the layout.
    ///
    /// # Panics
    ///
    /// Panics if `row >= R`.
    #[inline]
    #[track_caller]
    pub fn row_view(&self, row: usize) -> FixedStridedView<'_, T, C> {
        if row >= R {
            lane_out_of_bounds("row", row, R);
        }
        self.lane(L::flat_index::<R, C>(row, 0), L::row_step::<R, C>())
    }

    /// Mutably view a row, whatever the layout.
    ///
    /// # Panics
    ///
    /// Panics if `row >= R`.
    #[inline]
    #[track_caller]
    pub fn row_view_mut(&mut self, row: usize) -> FixedStridedViewMut<'_, T, C> {
        if row >= R {
            lane_out_of_bounds("row", row, R);
        }
        self.lane_mut(L::flat_index::<R, C>(row, 0), L::row_step::<R, C>())
    }

    /// View a column, whatever the layout.
    ///
    /// # Panics
    ///
    /// Panics if `col >= C`.
    ///
    /// ```
    /// use tmtx_matrix::Matrix;
    ///
    /// let m = Matrix::<i32, 3, 2>::from_rows([[1, 2], [3, 4], [5, 6]]);
    /// assert_eq!(m.column_view(1), [2, 4, 6]);
    /// assert_eq!(m.column_view(1).stride(), 2 * std::mem::size_of::<i32>());
    /// ```
    #[inline]
    #[track_caller]
    pub fn column_view(&self, col: usize) -> FixedStridedView<'_, T, R> {
        if col >= C {
            lane_out_of_bounds("column", col, C);
        }
        self.lane(L::flat_index::<R, C>(0, col), L::column_step::<R, C>())
    }

    /// Mutably view a column, whatever the layout.
    ///
    /// # Panics
    ///
    /// Panics if `col >= C`.
    #[inline]
    #[track_caller]
    pub fn column_view_mut(&mut self, col: usize) -> FixedStridedViewMut<'_, T, R> {
        if col >= C {
            lane_out_of_bounds("column", col, C);
        }
        self.lane_mut(L::flat_index::<R, C>(0, col), L::column_step::<R, C>())
    }

    /// Views of every row, in order.
    pub fn row_views(&self) -> impl ExactSizeIterator<Item=FixedStridedView<'_, T, C>> + '_ {
        (0..R).map(move |r| self.row_view(r))
    }

    /// Views of every column, in order.
    pub fn column_views(&self) -> impl ExactSizeIterator<Item=FixedStridedView<'_, T, R>> + '_ {
        (0..C).map(move |c| self.column_view(c))
    }

    // `N` cells starting at flat index `start`, `step` elements apart.
    //
    // Callers ensure that `start + (N - 1) * step < R * C` whenever `N > 0`.
    #[inline(always)]
    fn lane<const N: usize>(&self, start: usize, step: usize) -> FixedStridedView<'_, T, N> {
        let ptr = match self.as_flat().get(start..) {
            Some(rest) => NonNull::from(rest).cast::<T>(),
            None => NonNull::dangling(),
        };
        // UNSAFETY: every element the view can reach lies within `rest`, and the
        //           stride is a multiple of size_of::<T>.  (if N == 0, nothing is reachable)
        unsafe { FixedStridedView::from_raw_parts(ptr, step * mem::size_of::<T>()) }
    }

    #[inline(always)]
    fn lane_mut<const N: usize>(&mut self, start: usize, step: usize) -> FixedStridedViewMut<'_, T, N> {
        let ptr = match self.as_flat_mut().get_mut(start..) {
            Some(rest) => NonNull::from(rest).cast::<T>(),
            None => NonNull::dangling(),
        };
        // UNSAFETY: as in `lane`.  The elements are distinct because the step of
        //           a lane with more than one element is never zero.
        unsafe { FixedStridedViewMut::from_raw_parts(ptr, step * mem::size_of::<T>()) }
    }
}

// ---------------------------------------------------------------------------
// Accessors that only make sense for one layout: contiguous rows of a
// row-major matrix, contiguous columns of a column-major matrix.

impl<T, const R: usize, const C: usize> Matrix<T, R, C, RowMajor> {
    /// Construct from nested rows.  No data is moved around.
    #[inline(always)]
    pub fn from_rows(rows: [[T; C]; R]) -> Self { Self::from_storage(rows) }

    #[inline(always)]
    pub fn into_rows(self) -> [[T; C]; R] { self.into_storage() }

    #[inline(always)]
    pub fn rows(&self) -> &[[T; C]; R] { self.storage() }

    #[inline(always)]
    pub fn rows_mut(&mut self) -> &mut [[T; C]; R] { self.storage_mut() }

    /// # Panics
    ///
    /// Panics if `row >= R`.
    #[inline(always)]
    #[track_caller]
    pub fn row(&self, row: usize) -> &[T; C] { &self.rows()[row] }

    /// # Panics
    ///
    /// Panics if `row >= R`.
    #[inline(always)]
    #[track_caller]
    pub fn row_mut(&mut self, row: usize) -> &mut [T; C] { &mut self.rows_mut()[row] }

    /// Row `I`, with the bound checked at compile time.
    #[inline(always)]
    pub fn row_at<const I: usize>(&self) -> &[T; C] {
        let () = AssertInBounds::<I, R>::OK;
        &self.rows()[I]
    }

    #[inline(always)]
    pub fn row_at_mut<const I: usize>(&mut self) -> &mut [T; C] {
        let () = AssertInBounds::<I, R>::OK;
        &mut self.rows_mut()[I]
    }
}

impl<T, const R: usize, const C: usize> Matrix<T, R, C, ColumnMajor> {
    /// Construct from nested columns.  No data is moved around.
    #[inline(always)]
    pub fn from_columns(columns: [[T; R]; C]) -> Self { Self::from_storage(columns) }

    #[inline(always)]
    pub fn into_columns(self) -> [[T; R]; C] { self.into_storage() }

    #[inline(always)]
    pub fn columns(&self) -> &[[T; R]; C] { self.storage() }

    #[inline(always)]
    pub fn columns_mut(&mut self) -> &mut [[T; R]; C] { self.storage_mut() }

    /// # Panics
    ///
    /// Panics if `col >= C`.
    #[inline(always)]
    #[track_caller]
    pub fn column(&self, col: usize) -> &[T; R] { &self.columns()[col] }

    /// # Panics
    ///
    /// Panics if `col >= C`.
    #[inline(always)]
    #[track_caller]
    pub fn column_mut(&mut self, col: usize) -> &mut [T; R] { &mut self.columns_mut()[col] }

    /// Column `J`, with the bound checked at compile time.
    #[inline(always)]
    pub fn column_at<const J: usize>(&self) -> &[T; R] {
        let () = AssertInBounds::<J, C>::OK;
        &self.columns()[J]
    }

    #[inline(always)]
    pub fn column_at_mut<const J: usize>(&mut self) -> &mut [T; R] {
        let () = AssertInBounds::<J, C>::OK;
        &mut self.columns_mut()[J]
    }
}

// ---------------------------------------------------------------------------

/// `m[(row, col)]`
impl<T, const R: usize, const C: usize, L: Layout> Index<(usize, usize)> for Matrix<T, R, C, L> {
    type Output = T;

    #[inline(always)]
    #[track_caller]
    fn index(&self, (row, col): (usize, usize)) -> &T { self.cell(row, col) }
}

impl<T, const R: usize, const C: usize, L: Layout> IndexMut<(usize, usize)> for Matrix<T, R, C, L> {
    #[inline(always)]
    #[track_caller]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T { self.cell_mut(row, col) }
}

impl<'a, T, const R: usize, const C: usize, L: Layout> IntoIterator for &'a Matrix<T, R, C, L> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl<'a, T, const R: usize, const C: usize, L: Layout> IntoIterator for &'a mut Matrix<T, R, C, L> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter { self.iter_mut() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RowMatrix, ColumnMatrix};

    fn numbered_rows() -> RowMatrix<i32, 3, 4> { Matrix::from_fn(|r, c| (10 * r + c) as i32) }
    fn numbered_cols() -> ColumnMatrix<i32, 3, 4> { Matrix::from_fn(|r, c| (10 * r + c) as i32) }

    #[test]
    fn cells_agree_across_layouts() {
        let (rows, cols) = (numbered_rows(), numbered_cols());
        for r in 0..3 {
            for c in 0..4 {
                assert_eq!(rows[(r, c)], (10 * r + c) as i32);
                assert_eq!(cols.cell(r, c), rows.cell(r, c));
            }
        }
        assert_eq!(rows.get(3, 0), None);
        assert_eq!(cols.get(0, 4), None);
        assert_eq!(cols.get(2, 3), Some(&23));
        assert_eq!(*rows.cell_at::<1, 3>(), 13);
        assert_eq!(*cols.cell_at::<2, 1>(), 21);
    }

    #[test]
    #[should_panic(expected = "cell (1, 4) out of bounds for a 3x4 matrix")]
    fn cell_out_of_range() {
        let _ = numbered_cols()[(1, 4)];
    }

    #[test]
    #[should_panic(expected = "row 3 out of bounds")]
    fn row_view_out_of_range() {
        let _ = numbered_cols().row_view(3);
    }

    #[test]
    fn flat_order() {
        assert_eq!(numbered_rows().as_flat()[..5], [0, 1, 2, 3, 10]);
        assert_eq!(numbered_cols().as_flat()[..5], [0, 10, 20, 1, 11]);
        assert_eq!(numbered_cols().iter().count(), 12);
    }

    #[test]
    fn views_on_both_layouts() {
        let (rows, cols) = (numbered_rows(), numbered_cols());
        let int = mem::size_of::<i32>();

        assert_eq!(rows.row_view(1), [10, 11, 12, 13]);
        assert_eq!(rows.row_view(1).stride(), int);
        assert_eq!(rows.column_view(2), [2, 12, 22]);
        assert_eq!(rows.column_view(2).stride(), 4 * int);

        assert_eq!(cols.row_view(1), [10, 11, 12, 13]);
        assert_eq!(cols.row_view(1).stride(), 3 * int);
        assert_eq!(cols.column_view(2), [2, 12, 22]);
        assert_eq!(cols.column_view(2).stride(), int);

        let lanes: Vec<_> = cols.column_views().map(|v| v.to_array()).collect();
        assert_eq!(lanes, vec![[0, 10, 20], [1, 11, 21], [2, 12, 22], [3, 13, 23]]);
        assert_eq!(rows.row_views().len(), 3);
    }

    #[test]
    fn writes_through_views() {
        let mut cols = numbered_cols();
        cols.row_view_mut(2).fill(-1);
        for x in cols.column_view_mut(0).iter_mut() {
            *x *= 100;
        }
        assert_eq!(cols.row_view(2), [-100, -1, -1, -1]);
        assert_eq!(cols.column_view(0), [0, 1000, -100]);

        let mut rows = numbered_rows();
        rows.column_view_mut(3)[1] = 99;
        assert_eq!(rows.row(1), &[10, 11, 12, 99]);
    }

    #[test]
    fn layout_specific_accessors() {
        let mut rows = RowMatrix::<u8, 2, 2>::from_rows([[1, 2], [3, 4]]);
        rows.row_mut(0)[1] = 20;
        *rows.row_at_mut::<1>() = [30, 40];
        assert_eq!(rows.row_at::<0>(), &[1, 20]);
        assert_eq!(rows.into_rows(), [[1, 20], [30, 40]]);

        let mut cols = ColumnMatrix::<u8, 2, 2>::from_columns([[1, 3], [2, 4]]);
        cols.column_mut(1)[0] = 20;
        assert_eq!(cols[(0, 1)], 20);
        assert_eq!(cols.column_at::<0>(), &[1, 3]);
        cols.column_at_mut::<0>()[1] = 30;
        assert_eq!(cols.columns(), &[[1, 30], [20, 4]]);
    }

    #[test]
    fn degenerate_shapes() {
        let wide = Matrix::<f32, 0, 3>::default();
        assert_eq!(wide.column_view(2).len(), 0);
        assert_eq!(wide.row_views().len(), 0);

        let tall = Matrix::<f32, 3, 0, ColumnMajor>::default();
        assert!(tall.row_view(1).is_empty());
        assert_eq!(tall.as_flat().len(), 0);

        let units = Matrix::<(), 2, 5>::default();
        assert_eq!(units.as_flat().len(), 10);
        assert_eq!(units.column_view(4).len(), 2);
    }

    #[test]
    fn index_mut_and_iter_mut() {
        let mut m = numbered_rows();
        m[(0, 0)] = 5;
        for x in &mut m {
            *x += 1;
        }
        assert_eq!((&m).into_iter().take(2).collect::<Vec<_>>(), vec![&6, &2]);
    }
}
