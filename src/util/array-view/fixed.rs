/* ************************************************************************ **
** This file is part of tmtx, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Views whose element count is part of the type.

use crate::error::ViewError;
use crate::view::{StridedView, StridedViewMut, Iter, IterMut};

use std::convert::TryFrom;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

/// A `StridedView` of exactly `N` elements.
pub struct FixedStridedView<'a, T, const N: usize> {
    // invariant: inner.len() == N
    inner: StridedView<'a, T>,
}

/// A `StridedViewMut` of exactly `N` elements.
pub struct FixedStridedViewMut<'a, T, const N: usize> {
    // invariant: inner.len() == N
    inner: StridedViewMut<'a, T>,
}

impl<'a, T, const N: usize> Clone for FixedStridedView<'a, T, N> {
    #[inline(always)]
    fn clone(&self) -> Self { *self }
}
impl<'a, T, const N: usize> Copy for FixedStridedView<'a, T, N> { }

impl<'a, T, const N: usize> FixedStridedView<'a, T, N> {
    /// View `N` elements of `data` spaced `stride` bytes apart.
    ///
    /// See `StridedView::new`.
    #[inline]
    pub fn new(data: &'a [T], stride: usize) -> Result<Self, ViewError> {
        StridedView::new(data, N, stride).map(|inner| FixedStridedView { inner })
    }

    /// # Safety
    ///
    /// See `StridedView::from_raw_parts`, with `len = N`.
    #[inline]
    pub unsafe fn from_raw_parts(ptr: NonNull<T>, stride: usize) -> Self {
        FixedStridedView { inner: StridedView::from_raw_parts(ptr, N, stride) }
    }

    #[inline(always)]
    pub fn into_dynamic(self) -> StridedView<'a, T> { self.inner }

    /// Copy the elements out into an array.
    pub fn to_array(&self) -> [T; N]
    where T: Clone,
    {
        let inner = self.inner;
        std::array::from_fn(|i| inner[i].clone())
    }
}

impl<'a, T, const N: usize> FixedStridedViewMut<'a, T, N> {
    /// Mutably view `N` elements of `data` spaced `stride` bytes apart.
    ///
    /// See `StridedViewMut::new`.
    #[inline]
    pub fn new(data: &'a mut [T], stride: usize) -> Result<Self, ViewError> {
        StridedViewMut::new(data, N, stride).map(|inner| FixedStridedViewMut { inner })
    }

    /// # Safety
    ///
    /// See `StridedViewMut::from_raw_parts`, with `len = N`.
    #[inline]
    pub unsafe fn from_raw_parts(ptr: NonNull<T>, stride: usize) -> Self {
        FixedStridedViewMut { inner: StridedViewMut::from_raw_parts(ptr, N, stride) }
    }

    #[inline(always)]
    pub fn into_dynamic(self) -> StridedViewMut<'a, T> { self.inner }

    /// Give up mutability for the rest of `'a`.
    #[inline(always)]
    pub fn into_view(self) -> FixedStridedView<'a, T, N> {
        FixedStridedView { inner: self.inner.into_view() }
    }

    /// Temporarily view as a shared view.
    #[inline(always)]
    pub fn as_view(&self) -> FixedStridedView<'_, T, N> {
        FixedStridedView { inner: self.inner.as_view() }
    }

    #[inline(always)]
    pub fn reborrow(&mut self) -> FixedStridedViewMut<'_, T, N> {
        FixedStridedViewMut { inner: self.inner.reborrow() }
    }

    /// Copy the elements out into an array.
    pub fn to_array(&self) -> [T; N]
    where T: Clone,
    { self.as_view().to_array() }
}

// ---------------------------------------------------------------------------
// Fixed views are dynamic views that happen to know their length.

impl<'a, T, const N: usize> Deref for FixedStridedView<'a, T, N> {
    type Target = StridedView<'a, T>;

    #[inline(always)]
    fn deref(&self) -> &Self::Target { &self.inner }
}

impl<'a, T, const N: usize> Deref for FixedStridedViewMut<'a, T, N> {
    type Target = StridedViewMut<'a, T>;

    #[inline(always)]
    fn deref(&self) -> &Self::Target { &self.inner }
}

impl<'a, T, const N: usize> DerefMut for FixedStridedViewMut<'a, T, N> {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut Self::Target { &mut self.inner }
}

// ---------------------------------------------------------------------------
// conversions

impl<'a, T, const N: usize> From<FixedStridedView<'a, T, N>> for StridedView<'a, T> {
    #[inline(always)]
    fn from(view: FixedStridedView<'a, T, N>) -> Self { view.inner }
}

impl<'a, T, const N: usize> From<FixedStridedViewMut<'a, T, N>> for StridedViewMut<'a, T> {
    #[inline(always)]
    fn from(view: FixedStridedViewMut<'a, T, N>) -> Self { view.inner }
}

impl<'a, T, const N: usize> From<FixedStridedViewMut<'a, T, N>> for FixedStridedView<'a, T, N> {
    #[inline(always)]
    fn from(view: FixedStridedViewMut<'a, T, N>) -> Self { view.into_view() }
}

impl<'a, T, const N: usize> From<FixedStridedViewMut<'a, T, N>> for StridedView<'a, T> {
    #[inline(always)]
    fn from(view: FixedStridedViewMut<'a, T, N>) -> Self { view.inner.into_view() }
}

impl<'a, T, const N: usize> TryFrom<StridedView<'a, T>> for FixedStridedView<'a, T, N> {
    type Error = ViewError;

    fn try_from(inner: StridedView<'a, T>) -> Result<Self, ViewError> {
        match inner.len() {
            len if len == N => Ok(FixedStridedView { inner }),
            actual => Err(ViewError::LengthMismatch { expected: N, actual }),
        }
    }
}

impl<'a, T, const N: usize> TryFrom<StridedViewMut<'a, T>> for FixedStridedViewMut<'a, T, N> {
    type Error = ViewError;

    fn try_from(inner: StridedViewMut<'a, T>) -> Result<Self, ViewError> {
        match inner.len() {
            len if len == N => Ok(FixedStridedViewMut { inner }),
            actual => Err(ViewError::LengthMismatch { expected: N, actual }),
        }
    }
}

// ---------------------------------------------------------------------------

impl<'a, T, const N: usize> IntoIterator for FixedStridedView<'a, T, N> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter { self.inner.iter() }
}

impl<'a, T, const N: usize> IntoIterator for FixedStridedViewMut<'a, T, N> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter { self.inner.into_iter() }
}

impl<'a, T: fmt::Debug, const N: usize> fmt::Debug for FixedStridedView<'a, T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { fmt::Debug::fmt(&self.inner, f) }
}

impl<'a, T: fmt::Debug, const N: usize> fmt::Debug for FixedStridedViewMut<'a, T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { fmt::Debug::fmt(&self.inner, f) }
}

impl<'a, 'b, T: PartialEq<U>, U, const N: usize> PartialEq<FixedStridedView<'b, U, N>> for FixedStridedView<'a, T, N> {
    fn eq(&self, other: &FixedStridedView<'b, U, N>) -> bool { self.inner == other.inner }
}

impl<'a, T: PartialEq<U>, U, const N: usize> PartialEq<[U; N]> for FixedStridedView<'a, T, N> {
    fn eq(&self, other: &[U; N]) -> bool { self.inner == *other }
}

impl<'a, T: PartialEq<U>, U, const N: usize> PartialEq<[U; N]> for FixedStridedViewMut<'a, T, N> {
    fn eq(&self, other: &[U; N]) -> bool { self.inner == *other }
}

// ---------------------------------------------------------------------------
