/* ************************************************************************ **
** This file is part of tmtx, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::layout::{RowMajor, ColumnMajor};
use crate::types::Matrix;

use std::ops::{Index, IndexMut};

/// A pair of values with named coordinates.
///
/// Converts to and from `[T; 2]` and `1x2` matrices of either layout.
/// Indexing by `0` and `1` reaches `x` and `y`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Xy<T> {
    pub x: T,
    pub y: T,
}

impl<T> Xy<T> {
    #[inline(always)]
    pub fn new(x: T, y: T) -> Self { Xy { x, y } }

    #[inline(always)]
    pub fn into_array(self) -> [T; 2] { [self.x, self.y] }

    #[inline(always)]
    pub fn each_ref(&self) -> Xy<&T> { Xy { x: &self.x, y: &self.y } }

    #[inline]
    pub fn map<B, F: FnMut(T) -> B>(self, mut f: F) -> Xy<B> {
        Xy { x: f(self.x), y: f(self.y) }
    }
}

impl<T> Index<usize> for Xy<T> {
    type Output = T;

    #[inline]
    #[track_caller]
    fn index(&self, index: usize) -> &T {
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("index {} out of bounds for Xy", index),
        }
    }
}

impl<T> IndexMut<usize> for Xy<T> {
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => panic!("index {} out of bounds for Xy", index),
        }
    }
}

impl<T> From<[T; 2]> for Xy<T> {
    #[inline(always)]
    fn from([x, y]: [T; 2]) -> Self { Xy { x, y } }
}

impl<T> From<Xy<T>> for [T; 2] {
    #[inline(always)]
    fn from(xy: Xy<T>) -> Self { xy.into_array() }
}

impl<T> From<Matrix<T, 1, 2, RowMajor>> for Xy<T> {
    #[inline(always)]
    fn from(m: Matrix<T, 1, 2, RowMajor>) -> Self {
        let [[x, y]] = m.into_rows();
        Xy { x, y }
    }
}

impl<T> From<Matrix<T, 1, 2, ColumnMajor>> for Xy<T> {
    #[inline(always)]
    fn from(m: Matrix<T, 1, 2, ColumnMajor>) -> Self {
        let [[x], [y]] = m.into_columns();
        Xy { x, y }
    }
}

impl<T> From<Xy<T>> for Matrix<T, 1, 2, RowMajor> {
    #[inline(always)]
    fn from(Xy { x, y }: Xy<T>) -> Self { Matrix::from_rows([[x, y]]) }
}

impl<T> From<Xy<T>> for Matrix<T, 1, 2, ColumnMajor> {
    #[inline(always)]
    fn from(Xy { x, y }: Xy<T>) -> Self { Matrix::from_columns([[x], [y]]) }
}
