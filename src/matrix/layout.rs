/* ************************************************************************ **
** This file is part of tmtx, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Storage layout policies.
//!
//! A layout decides which nested-array type backs an `R x C` matrix,
//! and therefore which of the two indices varies fastest in memory.
//! Both backing types are plain arrays of arrays, so a matrix of either
//! layout can always be reinterpreted as a flat `[T]` of `R * C` elements.

use std::fmt;

/// Which index varies fastest in memory.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Order {
    /// Cells of a row are adjacent.
    RowMajor,
    /// Cells of a column are adjacent.
    ColumnMajor,
}

/// Row-major storage: backed by `[[T; C]; R]`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct RowMajor;

/// Column-major storage: backed by `[[T; R]; C]`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct ColumnMajor;

/// A storage layout policy.
///
/// This trait is sealed; `RowMajor` and `ColumnMajor` are the only layouts.
pub trait Layout: private::Sealed + Copy + Default + fmt::Debug + Send + Sync + 'static {
    /// The backing storage of an `R x C` matrix.
    type Storage<T, const R: usize, const C: usize>;

    const ORDER: Order;

    #[doc(hidden)]
    fn storage_from_fn<T, F, const R: usize, const C: usize>(f: F) -> Self::Storage<T, R, C>
    where F: FnMut(usize, usize) -> T;

    #[doc(hidden)]
    fn storage_map<T, B, F, const R: usize, const C: usize>(storage: Self::Storage<T, R, C>, f: F) -> Self::Storage<B, R, C>
    where F: FnMut(T) -> B;

    #[doc(hidden)]
    fn cell<T, const R: usize, const C: usize>(storage: &Self::Storage<T, R, C>, row: usize, col: usize) -> &T;

    #[doc(hidden)]
    fn cell_mut<T, const R: usize, const C: usize>(storage: &mut Self::Storage<T, R, C>, row: usize, col: usize) -> &mut T;

    /// Position of cell `(row, col)` within the flat storage of an `R x C` matrix.
    #[inline(always)]
    fn flat_index<const R: usize, const C: usize>(row: usize, col: usize) -> usize {
        match Self::ORDER {
            Order::RowMajor => row * C + col,
            Order::ColumnMajor => col * R + row,
        }
    }

    /// Distance in elements between consecutive cells of a row.
    #[inline(always)]
    fn row_step<const R: usize, const C: usize>() -> usize {
        match Self::ORDER {
            Order::RowMajor => 1,
            Order::ColumnMajor => R,
        }
    }

    /// Distance in elements between consecutive cells of a column.
    #[inline(always)]
    fn column_step<const R: usize, const C: usize>() -> usize {
        match Self::ORDER {
            Order::RowMajor => C,
            Order::ColumnMajor => 1,
        }
    }
}

mod private {
    pub trait Sealed {}
    impl Sealed for super::RowMajor {}
    impl Sealed for super::ColumnMajor {}
}

impl Layout for RowMajor {
    type Storage<T, const R: usize, const C: usize> = [[T; C]; R];

    const ORDER: Order = Order::RowMajor;

    #[inline]
    fn storage_from_fn<T, F, const R: usize, const C: usize>(mut f: F) -> [[T; C]; R]
    where F: FnMut(usize, usize) -> T,
    { std::array::from_fn(|row| std::array::from_fn(|col| f(row, col))) }

    #[inline]
    fn storage_map<T, B, F, const R: usize, const C: usize>(storage: [[T; C]; R], mut f: F) -> [[B; C]; R]
    where F: FnMut(T) -> B,
    { storage.map(|row| row.map(&mut f)) }

    #[inline(always)]
    fn cell<T, const R: usize, const C: usize>(storage: &[[T; C]; R], row: usize, col: usize) -> &T
    { &storage[row][col] }

    #[inline(always)]
    fn cell_mut<T, const R: usize, const C: usize>(storage: &mut [[T; C]; R], row: usize, col: usize) -> &mut T
    { &mut storage[row][col] }
}

impl Layout for ColumnMajor {
    type Storage<T, const R: usize, const C: usize> = [[T; R]; C];

    const ORDER: Order = Order::ColumnMajor;

    // NOTE: cells are still produced row by row, so that `from_fn` calls `f`
    //       in the same order regardless of layout.
    fn storage_from_fn<T, F, const R: usize, const C: usize>(mut f: F) -> [[T; R]; C]
    where F: FnMut(usize, usize) -> T,
    {
        let mut rows: [[Option<T>; C]; R] = std::array::from_fn(|row| std::array::from_fn(|col| Some(f(row, col))));
        std::array::from_fn(|col| std::array::from_fn(|row| match rows[row][col].take() {
            Some(value) => value,
            None => unreachable!("each cell is taken exactly once"),
        }))
    }

    #[inline]
    fn storage_map<T, B, F, const R: usize, const C: usize>(storage: [[T; R]; C], mut f: F) -> [[B; R]; C]
    where F: FnMut(T) -> B,
    { storage.map(|col| col.map(&mut f)) }

    #[inline(always)]
    fn cell<T, const R: usize, const C: usize>(storage: &[[T; R]; C], row: usize, col: usize) -> &T
    { &storage[col][row] }

    #[inline(always)]
    fn cell_mut<T, const R: usize, const C: usize>(storage: &mut [[T; R]; C], row: usize, col: usize) -> &mut T
    { &mut storage[col][row] }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_index_follows_order() {
        // 2x3
        assert_eq!(RowMajor::flat_index::<2, 3>(1, 2), 5);
        assert_eq!(RowMajor::flat_index::<2, 3>(1, 0), 3);
        assert_eq!(ColumnMajor::flat_index::<2, 3>(1, 2), 5);
        assert_eq!(ColumnMajor::flat_index::<2, 3>(1, 0), 1);
        assert_eq!(ColumnMajor::flat_index::<2, 3>(0, 1), 2);

        assert_eq!(RowMajor::row_step::<2, 3>(), 1);
        assert_eq!(RowMajor::column_step::<2, 3>(), 3);
        assert_eq!(ColumnMajor::row_step::<2, 3>(), 2);
        assert_eq!(ColumnMajor::column_step::<2, 3>(), 1);
    }

    #[test]
    fn storage_agrees_with_flat_index() {
        let rows = RowMajor::storage_from_fn::<_, _, 2, 3>(|r, c| (r, c));
        let cols = ColumnMajor::storage_from_fn::<_, _, 2, 3>(|r, c| (r, c));
        assert_eq!(rows, [[(0, 0), (0, 1), (0, 2)], [(1, 0), (1, 1), (1, 2)]]);
        assert_eq!(cols, [[(0, 0), (1, 0)], [(0, 1), (1, 1)], [(0, 2), (1, 2)]]);

        for r in 0..2 {
            for c in 0..3 {
                assert_eq!(*RowMajor::cell::<_, 2, 3>(&rows, r, c), (r, c));
                assert_eq!(*ColumnMajor::cell::<_, 2, 3>(&cols, r, c), (r, c));
            }
        }
    }

    #[test]
    fn construction_order_is_layout_independent() {
        let mut calls = vec![];
        let _ = ColumnMajor::storage_from_fn::<_, _, 2, 2>(|r, c| calls.push((r, c)));
        assert_eq!(calls, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }
}
