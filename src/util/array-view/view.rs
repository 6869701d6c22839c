/* ************************************************************************ **
** This file is part of tmtx, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::error::ViewError;

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::mem;
use std::ops::{Index, IndexMut};
use std::ptr::NonNull;

// ---------------------------------------------------------------------------

/// A shared view of `len` elements spaced `stride` bytes apart.
///
/// Semantically this is a `&'a [T]` with holes in it; it borrows the storage
/// it was built from, and is `Copy` for the same reason `&[T]` is.
pub struct StridedView<'a, T> {
    ptr: NonNull<T>,
    len: usize,
    stride: usize,
    _marker: PhantomData<&'a [T]>,
}

/// A mutable view of `len` elements spaced `stride` bytes apart.
///
/// Unlike the shared view, distinct indices are guaranteed to refer to
/// distinct elements, so that `iter_mut` is sound.
pub struct StridedViewMut<'a, T> {
    ptr: NonNull<T>,
    len: usize,
    stride: usize,
    _marker: PhantomData<&'a mut [T]>,
}

impl<'a, T> Clone for StridedView<'a, T> {
    #[inline(always)]
    fn clone(&self) -> Self { *self }
}
impl<'a, T> Copy for StridedView<'a, T> { }

// UNSAFETY: these mirror the impls for `&'a [T]` and `&'a mut [T]`.
unsafe impl<'a, T: Sync> Send for StridedView<'a, T> { }
unsafe impl<'a, T: Sync> Sync for StridedView<'a, T> { }
unsafe impl<'a, T: Send> Send for StridedViewMut<'a, T> { }
unsafe impl<'a, T: Sync> Sync for StridedViewMut<'a, T> { }

// ---------------------------------------------------------------------------

/// Check that `len` elements spaced `stride` bytes apart, starting at the
/// beginning of a slice of `available` elements, all lie inside that slice
/// and on element boundaries.
pub(crate) fn check_extent<T>(available: usize, len: usize, stride: usize) -> Result<(), ViewError> {
    let elem_size = mem::size_of::<T>();
    if elem_size == 0 {
        // every element of a zero-sized type lives at the base pointer
        return match stride {
            0 => Ok(()),
            _ => Err(ViewError::UnalignedStride { stride, elem_size }),
        };
    }
    if stride % elem_size != 0 {
        return Err(ViewError::UnalignedStride { stride, elem_size });
    }
    if len == 0 {
        return Ok(());
    }

    let step = stride / elem_size;
    let needed = {
        (len - 1).checked_mul(step)
            .and_then(|last| last.checked_add(1))
            .unwrap_or(usize::MAX)
    };
    if needed > available {
        return Err(ViewError::OutOfBounds { len, stride, needed, available });
    }
    Ok(())
}

/// Check that no two indices of a view refer to the same element.
pub(crate) fn check_disjoint<T>(len: usize, stride: usize) -> Result<(), ViewError> {
    let elem_size = mem::size_of::<T>();
    if len > 1 && elem_size != 0 && stride < elem_size {
        return Err(ViewError::Overlapping { len, stride });
    }
    Ok(())
}

fn log_rejection(e: ViewError) -> ViewError {
    debug!("rejected strided view: {}", e);
    e
}

/// # Safety
///
/// The result must stay inside the allocation that `base` points into.
#[inline(always)]
unsafe fn element_ptr<T>(base: NonNull<T>, index: usize, stride: usize) -> *mut T {
    (base.as_ptr() as *mut u8).add(index * stride) as *mut T
}

#[cold]
#[inline(never)]
#[track_caller]
fn out_of_range(index: usize, len: usize) -> ! {
    panic!("index {} out of range for strided view of length {}", index, len)
}

// ---------------------------------------------------------------------------

impl<'a, T> StridedView<'a, T> {
    /// View `len` elements of `data` spaced `stride` bytes apart, beginning
    /// with `data[0]`.
    ///
    /// `stride` must be a multiple of `size_of::<T>()` (zero is allowed, and
    /// produces a view that repeats one element `len` times), and the last
    /// element must lie inside `data`.
    pub fn new(data: &'a [T], len: usize, stride: usize) -> Result<Self, ViewError> {
        check_extent::<T>(data.len(), len, stride).map_err(log_rejection)?;

        // UNSAFETY: check_extent verified that every index lands inside `data`.
        Ok(unsafe { Self::from_raw_parts(NonNull::from(data).cast(), len, stride) })
    }

    /// View all of `data`, with the natural stride of `T`.
    #[inline]
    pub fn contiguous(data: &'a [T]) -> Self {
        // UNSAFETY: this is just the slice itself.
        unsafe { Self::from_raw_parts(NonNull::from(data).cast(), data.len(), mem::size_of::<T>()) }
    }

    /// Construct a view directly from a base pointer.
    ///
    /// # Safety
    ///
    /// For every `i < len`, the address `ptr + i * stride` (in bytes) must hold
    /// an initialized, properly aligned `T` that remains valid and is not
    /// mutated for the lifetime `'a`.
    #[inline]
    pub unsafe fn from_raw_parts(ptr: NonNull<T>, len: usize, stride: usize) -> Self {
        StridedView { ptr, len, stride, _marker: PhantomData }
    }

    #[inline(always)]
    pub fn len(&self) -> usize { self.len }

    #[inline(always)]
    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Distance between consecutive elements, in bytes.
    #[inline(always)]
    pub fn stride(&self) -> usize { self.stride }

    #[inline(always)]
    pub fn as_ptr(&self) -> *const T { self.ptr.as_ptr() }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&'a T> {
        match index < self.len {
            // UNSAFETY: bounds checked
            true => Some(unsafe { self.get_unchecked(index) }),
            false => None,
        }
    }

    /// Access an element without bounds checking. (checked in debug builds)
    ///
    /// # Safety
    ///
    /// `index` must be less than `self.len()`.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &'a T {
        debug_assert!(index < self.len, "index {} out of range for strided view of length {}", index, self.len);
        &*element_ptr(self.ptr, index, self.stride)
    }

    #[inline]
    pub fn iter(&self) -> Iter<'a, T> {
        Iter { view: *self, front: 0, back: self.len }
    }

    pub fn to_vec(&self) -> Vec<T>
    where T: Clone,
    { self.iter().cloned().collect() }
}

impl<'a, T> StridedViewMut<'a, T> {
    /// Mutably view `len` elements of `data` spaced `stride` bytes apart,
    /// beginning with `data[0]`.
    ///
    /// Same requirements as `StridedView::new`, except that a zero stride is
    /// only allowed for views of at most one element.
    pub fn new(data: &'a mut [T], len: usize, stride: usize) -> Result<Self, ViewError> {
        check_extent::<T>(data.len(), len, stride).map_err(log_rejection)?;
        check_disjoint::<T>(len, stride).map_err(log_rejection)?;

        // UNSAFETY: every index lands inside `data` on a distinct element,
        //           and we hold the unique borrow of `data` for 'a.
        Ok(unsafe { Self::from_raw_parts(NonNull::from(data).cast(), len, stride) })
    }

    /// Mutably view all of `data`, with the natural stride of `T`.
    #[inline]
    pub fn contiguous(data: &'a mut [T]) -> Self {
        let len = data.len();
        // UNSAFETY: this is just the slice itself.
        unsafe { Self::from_raw_parts(NonNull::from(data).cast(), len, mem::size_of::<T>()) }
    }

    /// Construct a mutable view directly from a base pointer.
    ///
    /// # Safety
    ///
    /// All of the requirements of `StridedView::from_raw_parts`, and:
    ///
    /// * No other reference may access these elements for the lifetime `'a`.
    /// * Unless `T` is zero-sized, distinct indices below `len` must not
    ///   produce overlapping elements.
    #[inline]
    pub unsafe fn from_raw_parts(ptr: NonNull<T>, len: usize, stride: usize) -> Self {
        StridedViewMut { ptr, len, stride, _marker: PhantomData }
    }

    #[inline(always)]
    pub fn len(&self) -> usize { self.len }

    #[inline(always)]
    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Distance between consecutive elements, in bytes.
    #[inline(always)]
    pub fn stride(&self) -> usize { self.stride }

    #[inline(always)]
    pub fn as_ptr(&self) -> *const T { self.ptr.as_ptr() }

    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T { self.ptr.as_ptr() }

    /// Temporarily view as a shared view.
    #[inline]
    pub fn as_view(&self) -> StridedView<'_, T> {
        // UNSAFETY: the shared borrow of self freezes the elements.
        unsafe { StridedView::from_raw_parts(self.ptr, self.len, self.stride) }
    }

    /// Give up mutability for the rest of `'a`.
    #[inline]
    pub fn into_view(self) -> StridedView<'a, T> {
        // UNSAFETY: self is consumed, so nothing else can mutate the elements.
        unsafe { StridedView::from_raw_parts(self.ptr, self.len, self.stride) }
    }

    /// Make a shorter-lived mutable view, leaving `self` usable afterwards.
    #[inline]
    pub fn reborrow(&mut self) -> StridedViewMut<'_, T> {
        // UNSAFETY: the unique borrow of self is held for the new lifetime.
        unsafe { StridedViewMut::from_raw_parts(self.ptr, self.len, self.stride) }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        match index < self.len {
            true => Some(unsafe { self.get_unchecked(index) }),
            false => None,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        match index < self.len {
            true => Some(unsafe { self.get_unchecked_mut(index) }),
            false => None,
        }
    }

    /// # Safety
    ///
    /// `index` must be less than `self.len()`.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len, "index {} out of range for strided view of length {}", index, self.len);
        &*element_ptr(self.ptr, index, self.stride)
    }

    /// # Safety
    ///
    /// `index` must be less than `self.len()`.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len, "index {} out of range for strided view of length {}", index, self.len);
        &mut *element_ptr(self.ptr, index, self.stride)
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, T> { self.as_view().iter() }

    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> { self.reborrow().into_iter() }

    /// Overwrite every element with a clone of `value`.
    pub fn fill(&mut self, value: T)
    where T: Clone,
    {
        for x in self.iter_mut() {
            *x = value.clone();
        }
    }

    pub fn to_vec(&self) -> Vec<T>
    where T: Clone,
    { self.as_view().to_vec() }
}

impl<'a, T> From<StridedViewMut<'a, T>> for StridedView<'a, T> {
    #[inline(always)]
    fn from(view: StridedViewMut<'a, T>) -> Self { view.into_view() }
}

// ---------------------------------------------------------------------------

impl<'a, T> Index<usize> for StridedView<'a, T> {
    type Output = T;

    #[inline]
    #[track_caller]
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(x) => x,
            None => out_of_range(index, self.len),
        }
    }
}

impl<'a, T> Index<usize> for StridedViewMut<'a, T> {
    type Output = T;

    #[inline]
    #[track_caller]
    fn index(&self, index: usize) -> &T {
        let len = self.len;
        match self.get(index) {
            Some(x) => x,
            None => out_of_range(index, len),
        }
    }
}

impl<'a, T> IndexMut<usize> for StridedViewMut<'a, T> {
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len;
        match self.get_mut(index) {
            Some(x) => x,
            None => out_of_range(index, len),
        }
    }
}

// ---------------------------------------------------------------------------

/// Iterator over a `StridedView`.
pub struct Iter<'a, T> {
    view: StridedView<'a, T>,
    front: usize,
    back: usize,
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Iter { view: self.view, front: self.front, back: self.back }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        // UNSAFETY: front < back <= len
        let x = unsafe { self.view.get_unchecked(self.front) };
        self.front += 1;
        Some(x)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(unsafe { self.view.get_unchecked(self.back) })
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> { }
impl<'a, T> FusedIterator for Iter<'a, T> { }

/// Mutable iterator over a `StridedViewMut`.
pub struct IterMut<'a, T> {
    ptr: NonNull<T>,
    stride: usize,
    front: usize,
    back: usize,
    _marker: PhantomData<&'a mut T>,
}

unsafe impl<'a, T: Send> Send for IterMut<'a, T> { }
unsafe impl<'a, T: Sync> Sync for IterMut<'a, T> { }

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        if self.front == self.back {
            return None;
        }
        // UNSAFETY: front < back <= len, and each index is yielded only once.
        //           The view that produced us guaranteed distinct elements.
        let x = unsafe { &mut *element_ptr(self.ptr, self.front, self.stride) };
        self.front += 1;
        Some(x)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(unsafe { &mut *element_ptr(self.ptr, self.back, self.stride) })
    }
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> { }
impl<'a, T> FusedIterator for IterMut<'a, T> { }

impl<'a, T> IntoIterator for StridedView<'a, T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl<'a, 'b, T> IntoIterator for &'b StridedView<'a, T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl<'a, T> IntoIterator for StridedViewMut<'a, T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IterMut {
            ptr: self.ptr,
            stride: self.stride,
            front: 0,
            back: self.len,
            _marker: PhantomData,
        }
    }
}

impl<'a, 'b, T> IntoIterator for &'b mut StridedViewMut<'a, T> {
    type Item = &'b mut T;
    type IntoIter = IterMut<'b, T>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter { self.iter_mut() }
}

// ---------------------------------------------------------------------------

// Debug output looks like a slice, so that views print the same way as the
// rows of a matrix.
impl<'a, T: fmt::Debug> fmt::Debug for StridedView<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T: fmt::Debug> fmt::Debug for StridedViewMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.as_view(), f)
    }
}

impl<'a, 'b, T: PartialEq<U>, U> PartialEq<StridedView<'b, U>> for StridedView<'a, T> {
    fn eq(&self, other: &StridedView<'b, U>) -> bool {
        self.len == other.len && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<'a, T: PartialEq<U>, U> PartialEq<[U]> for StridedView<'a, T> {
    fn eq(&self, other: &[U]) -> bool {
        *self == StridedView::contiguous(other)
    }
}

impl<'a, T: PartialEq<U>, U, const N: usize> PartialEq<[U; N]> for StridedView<'a, T> {
    fn eq(&self, other: &[U; N]) -> bool {
        *self == other[..]
    }
}

impl<'a, 'b, T: PartialEq<U>, U> PartialEq<StridedViewMut<'b, U>> for StridedViewMut<'a, T> {
    fn eq(&self, other: &StridedViewMut<'b, U>) -> bool {
        self.as_view() == other.as_view()
    }
}

impl<'a, T: PartialEq<U>, U, const N: usize> PartialEq<[U; N]> for StridedViewMut<'a, T> {
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_view() == other[..]
    }
}

// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    static GRID: [i32; 12] = [
        0, 1, 2, 3,
        4, 5, 6, 7,
        8, 9, 10, 11,
    ];

    #[test]
    fn column_of_row_major_block() {
        for col in 0..4 {
            let view = StridedView::new(&GRID[col..], 3, 4 * size_of::<i32>()).unwrap();
            assert_eq!(view.len(), 3);
            for row in 0..3 {
                assert_eq!(view[row], (row * 4 + col) as i32);
            }
        }
    }

    #[test]
    fn contiguous_matches_slice() {
        let view = StridedView::contiguous(&GRID[..]);
        assert_eq!(view.stride(), size_of::<i32>());
        assert_eq!(view, GRID);
        assert_eq!(view.iter().rev().next(), Some(&11));
    }

    #[test]
    fn zero_stride_repeats() {
        let data = [7u8];
        let view = StridedView::new(&data, 5, 0).unwrap();
        assert_eq!(view.to_vec(), vec![7; 5]);
    }

    #[test]
    fn rejected_extents() {
        assert_eq!(
            StridedView::new(&GRID[1..], 3, 4 * size_of::<i32>()).unwrap().len(),
            3,
        );
        // the third element would be GRID[12]
        assert_eq!(
            StridedView::new(&GRID[4..], 3, 4 * size_of::<i32>()).unwrap_err(),
            ViewError::OutOfBounds { len: 3, stride: 16, needed: 9, available: 8 },
        );
        assert_eq!(
            StridedView::new(&GRID[..], 2, 6).unwrap_err(),
            ViewError::UnalignedStride { stride: 6, elem_size: 4 },
        );
        // an empty view never touches memory, but the stride must still be sane
        assert!(StridedView::new(&GRID[..0], 0, 400).is_ok());
        assert!(StridedView::new(&GRID[..0], 0, 3).is_err());
    }

    #[test]
    fn mutable_views_must_not_alias() {
        let mut data = [1, 2, 3];
        assert_eq!(
            StridedViewMut::new(&mut data, 2, 0).unwrap_err(),
            ViewError::Overlapping { len: 2, stride: 0 },
        );
        // a single element can't alias with anything
        assert!(StridedViewMut::new(&mut data, 1, 0).is_ok());
    }

    #[test]
    fn zero_sized_elements() {
        let data = [(); 4];
        let view = StridedView::new(&data, 10, 0).unwrap();
        assert_eq!(view.iter().count(), 10);
        assert!(StridedView::new(&data, 10, 1).is_err());
    }

    #[test]
    fn write_through_column() {
        let mut data = GRID;
        {
            let mut view = StridedViewMut::new(&mut data[2..], 3, 4 * size_of::<i32>()).unwrap();
            view.fill(-1);
            view[1] = 100;
        }
        assert_eq!(data, [
            0, 1, -1, 3,
            4, 5, 100, 7,
            8, 9, -1, 11,
        ]);
    }

    #[test]
    fn iter_mut_visits_each_once() {
        let mut data = GRID;
        let mut view = StridedViewMut::new(&mut data[..], 6, 2 * size_of::<i32>()).unwrap();
        for x in view.iter_mut() {
            *x *= 10;
        }
        assert_eq!(view.iter().len(), 6);
        assert_eq!(view, [0, 20, 40, 60, 80, 100]);
        assert_eq!(data[1], 1);
    }

    #[test]
    fn mutable_to_shared() {
        let mut data = GRID;
        let mut view = StridedViewMut::new(&mut data[3..], 3, 4 * size_of::<i32>()).unwrap();
        view[0] = 33;

        let shared: StridedView<'_, i32> = view.into();
        let copy = shared;
        assert_eq!(shared, copy);
        assert_eq!(copy.to_vec(), vec![33, 7, 11]);
    }

    #[test]
    fn get_past_end() {
        let view = StridedView::contiguous(&GRID[..3]);
        assert_eq!(view.get(2), Some(&2));
        assert_eq!(view.get(3), None);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn index_past_end() {
        let view = StridedView::new(&GRID[..], 3, 4 * size_of::<i32>()).unwrap();
        let _ = view[3];
    }

    #[test]
    fn debug_looks_like_a_slice() {
        let view = StridedView::new(&GRID[..], 3, 4 * size_of::<i32>()).unwrap();
        assert_eq!(format!("{:?}", view), "[0, 4, 8]");
    }
}
