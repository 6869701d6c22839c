/* ************************************************************************ **
** This file is part of tmtx, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Non-owning views of evenly spaced elements.
//!
//! A view is a base pointer, an element count, and a stride measured in
//! **bytes**.  The stride is allowed to exceed `size_of::<T>()`, which is
//! what lets a matrix hand out one of its columns (or, for column-major
//! storage, one of its rows) without copying anything.
//!
//! There are four flavors:
//!
//!  * **`StridedView`** / **`StridedViewMut`**: element count known at runtime.
//!  * **`FixedStridedView`** / **`FixedStridedViewMut`**: element count is
//!    part of the type.  These deref to the dynamic flavor.
//!
//! Conversions only ever go in the direction that gives up capabilities:
//! mutable to shared, fixed to dynamic.  (dynamic to fixed is a `TryFrom`,
//! since the count must be checked)
//!
//! ```compile_fail
//! use tmtx_array_view::{StridedView, StridedViewMut};
//!
//! let data = [1, 2, 3];
//! let view = StridedView::contiguous(&data);
//! // a shared view can never become a mutable one
//! let _: StridedViewMut<'_, i32> = view.into();
//! ```
//!
//! # Examples
//!
//! ```
//! use tmtx_array_view::StridedView;
//! use std::mem::size_of;
//!
//! // a 3x4 row-major block; view its second column.
//! let data = [
//!     0, 1, 2, 3,
//!     4, 5, 6, 7,
//!     8, 9, 10, 11,
//! ];
//! let column = StridedView::new(&data[1..], 3, 4 * size_of::<i32>()).unwrap();
//! assert_eq!(column.to_vec(), vec![1, 5, 9]);
//! ```

#[macro_use]
extern crate log;

mod error;
mod view;
mod fixed;

pub use crate::error::ViewError;
pub use crate::view::{StridedView, StridedViewMut, Iter, IterMut};
pub use crate::fixed::{FixedStridedView, FixedStridedViewMut};
