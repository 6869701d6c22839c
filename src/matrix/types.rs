/* ************************************************************************ **
** This file is part of tmtx, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::layout::{Layout, Order, RowMajor, ColumnMajor};

use std::fmt;
use std::marker::PhantomData;
use std::mem;

/// A fixed-size `R x C` matrix of `T`, stored inline.
///
/// The layout parameter picks the in-memory order of the cells (row-major
/// by default).  Either way the matrix is exactly `R * C` values of `T`
/// with no header and no padding, so it can be viewed as a flat slice,
/// handed to code that expects a plain array, or built over one.
///
/// Cells are always addressed as `(row, col)`, independent of layout.
#[repr(transparent)]
pub struct Matrix<T, const R: usize, const C: usize, L: Layout = RowMajor> {
    storage: L::Storage<T, R, C>,
    _layout: PhantomData<L>,
}

/// A matrix with row-major storage.
pub type RowMatrix<T, const R: usize, const C: usize> = Matrix<T, R, C, RowMajor>;
/// A matrix with column-major storage.
pub type ColumnMatrix<T, const R: usize, const C: usize> = Matrix<T, R, C, ColumnMajor>;

pub type M22<X = f64> = Matrix<X, 2, 2>;
pub type M33<X = f64> = Matrix<X, 3, 3>;
pub type M44<X = f64> = Matrix<X, 4, 4>;

// Representative shapes.  Every other instantiation is checked when one
// of its constructors is monomorphized.
const _: () = {
    assert!(mem::size_of::<Matrix<f32, 4, 4>>() == 16 * mem::size_of::<f32>());
    assert!(mem::size_of::<Matrix<f32, 4, 4, ColumnMajor>>() == 16 * mem::size_of::<f32>());
    assert!(mem::align_of::<Matrix<f64, 2, 3>>() == mem::align_of::<f64>());
    assert!(mem::size_of::<Matrix<u8, 3, 5, ColumnMajor>>() == 15);
    assert!(mem::size_of::<Matrix<i16, 0, 7>>() == 0);
};

impl<T, const R: usize, const C: usize, L: Layout> Matrix<T, R, C, L> {
    /// The plain-array guarantee for this instantiation.
    ///
    /// Unsafe code in this crate relies on it; it is evaluated by every
    /// path that creates a matrix.
    pub(crate) const FLAT_LAYOUT: () = {
        assert!(mem::size_of::<Self>() == R * C * mem::size_of::<T>(), "matrix storage is not a plain array");
        assert!(mem::align_of::<Self>() == mem::align_of::<T>(), "matrix alignment differs from its element");
    };

    /// Number of rows.
    pub const ROWS: usize = R;
    /// Number of columns.
    pub const COLS: usize = C;

    #[inline(always)]
    pub(crate) fn from_storage(storage: L::Storage<T, R, C>) -> Self {
        let () = Self::FLAT_LAYOUT;
        Matrix { storage, _layout: PhantomData }
    }

    #[inline(always)]
    pub(crate) fn into_storage(self) -> L::Storage<T, R, C> { self.storage }

    #[inline(always)]
    pub(crate) fn storage(&self) -> &L::Storage<T, R, C> { &self.storage }

    #[inline(always)]
    pub(crate) fn storage_mut(&mut self) -> &mut L::Storage<T, R, C> { &mut self.storage }

    /// Construct a matrix from a function of `(row, col)`.
    ///
    /// `f` is called in row-major order regardless of the layout.
    ///
    /// ```
    /// use tmtx_matrix::{Matrix, ColumnMajor};
    ///
    /// let m = Matrix::<i32, 2, 3, ColumnMajor>::from_fn(|r, c| (10 * r + c) as i32);
    /// assert_eq!(m[(1, 2)], 12);
    /// assert_eq!(m.as_flat(), &[0, 10, 1, 11, 2, 12]);
    /// ```
    #[inline]
    pub fn from_fn<F>(f: F) -> Self
    where F: FnMut(usize, usize) -> T,
    { Self::from_storage(L::storage_from_fn::<T, F, R, C>(f)) }

    /// Apply a function to each cell, producing a matrix of the same shape and layout.
    #[inline]
    pub fn map<B, F>(self, f: F) -> Matrix<B, R, C, L>
    where F: FnMut(T) -> B,
    { Matrix::from_storage(L::storage_map::<T, B, F, R, C>(self.storage, f)) }

    /// `(R, C)`
    #[inline(always)]
    pub fn shape(&self) -> (usize, usize) { (R, C) }

    /// The in-memory order of the cells.
    #[inline(always)]
    pub fn order(&self) -> Order { L::ORDER }
}

// ---------------------------------------------------------------------------
// std traits
//
// Copy can't be derived (or written generically) because the storage is an
// associated type; each layout gets its own impl.

gen_each!{
    @{layout_transposed}
    impl_copy!({$L:ident $_Transposed:ident}) => {
        impl<T: Copy, const R: usize, const C: usize> Copy for Matrix<T, R, C, $L> { }
    };
}

impl<T: Clone, const R: usize, const C: usize, L: Layout> Clone for Matrix<T, R, C, L> {
    #[inline]
    fn clone(&self) -> Self { Self::from_fn(|r, c| self[(r, c)].clone()) }
}

/// A matrix of `T::default()`.  (all zeros, for numeric types)
impl<T: Default, const R: usize, const C: usize, L: Layout> Default for Matrix<T, R, C, L> {
    #[inline]
    fn default() -> Self { Self::from_fn(|_, _| T::default()) }
}

/// Cellwise comparison.  The layouts need not agree.
impl<T, U, const R: usize, const C: usize, L, L2> PartialEq<Matrix<U, R, C, L2>> for Matrix<T, R, C, L>
where
    T: PartialEq<U>,
    L: Layout,
    L2: Layout,
{
    fn eq(&self, other: &Matrix<U, R, C, L2>) -> bool {
        if L::ORDER == L2::ORDER {
            self.as_flat() == other.as_flat()
        } else {
            iproduct!(0..R, 0..C).all(|(r, c)| self[(r, c)] == other[(r, c)])
        }
    }
}

impl<T: Eq, const R: usize, const C: usize, L: Layout> Eq for Matrix<T, R, C, L> { }

/// Formats as a list of rows, whatever the layout.
impl<T: fmt::Debug, const R: usize, const C: usize, L: Layout> fmt::Debug for Matrix<T, R, C, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries((0..R).map(|r| self.row_view(r))).finish()
    }
}

/// Formats as `[[a, b], [c, d]]`, applying the format spec to each cell.
impl<T: fmt::Display, const R: usize, const C: usize, L: Layout> fmt::Display for Matrix<T, R, C, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for r in 0..R {
            if r > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;
            for (c, x) in self.row_view(r).iter().enumerate() {
                if c > 0 {
                    write!(f, ", ")?;
                }
                fmt::Display::fmt(x, f)?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}
