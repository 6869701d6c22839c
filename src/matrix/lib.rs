/* ************************************************************************ **
** This file is part of tmtx, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Fixed-size matrices stored inline as plain nested arrays.
//!
//! `Matrix<T, R, C, L>` is an `R x C` matrix whose cells are laid out
//! according to `L`, either `RowMajor` (the default) or `ColumnMajor`.
//! The shape and layout are part of the type, so mixing up two matrices
//! of different shapes is a type error, not a runtime one.
//!
//! ```
//! use tmtx_matrix::{Matrix, ColumnMajor};
//!
//! let m = Matrix::<f32, 4, 4, ColumnMajor>::from_fn(|_, _| 1.0);
//! let scaled = m * 10.0;
//! let shifted = m + 10.0;
//! assert_eq!((scaled + shifted)[(2, 3)], 21.0);
//! assert_eq!(m - (m - 10.0), Matrix::<f32, 4, 4>::from_fn(|_, _| 10.0));
//!
//! // rows and columns are views into the same storage
//! assert_eq!(m.column_view(0).stride(), std::mem::size_of::<f32>());
//! assert_eq!(m.row_view(0).stride(), 4 * std::mem::size_of::<f32>());
//! ```
//!
//! Subtraction and negation require a signed element type:
//!
//! ```compile_fail
//! use tmtx_matrix::Matrix;
//!
//! let m = Matrix::<u32, 2, 2>::from_fn(|r, c| (r + c) as u32);
//! let _ = m - 1;
//! ```
//!
//! ...while scaling and shifting work for any primitive number:
//!
//! ```
//! use tmtx_matrix::Matrix;
//!
//! let m = Matrix::<u32, 2, 2>::from_fn(|r, c| (r + c) as u32);
//! assert_eq!((m * 2 + 1).into_rows(), [[1, 3], [3, 5]]);
//! ```
//!
//! Elementwise operations need matching shapes:
//!
//! ```compile_fail
//! use tmtx_matrix::Matrix;
//!
//! let a = Matrix::<i32, 2, 3>::default();
//! let b = Matrix::<i32, 3, 2>::default();
//! let _ = a + b;
//! ```

#[macro_use]
extern crate log;
#[macro_use]
extern crate itertools;

#[cfg(test)]
#[macro_use]
extern crate tmtx_assert_close;

#[macro_use]
mod macros;
mod traits;
mod layout;
mod types;
mod access;
mod conv;
mod ops;
mod named;
#[cfg(feature = "serde")]
mod serde_impls;

pub use crate::traits::{Semiring, Ring, Field};
pub use crate::layout::{Layout, Order, RowMajor, ColumnMajor};
pub use crate::types::{Matrix, RowMatrix, ColumnMatrix, M22, M33, M44};
pub use crate::conv::ShapeError;
pub use crate::named::Xy;

pub use tmtx_array_view::{FixedStridedView, FixedStridedViewMut, StridedView, StridedViewMut};
