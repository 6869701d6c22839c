/* ************************************************************************ **
** This file is part of tmtx, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Umbrella crate for the tmtx workspace.
//!
//! The matrix types live in `tmtx-matrix` and are re-exported here as
//! `tmtx::matrix`.  This crate adds the small scenario run by the
//! `tmtx-demo` binary.

#[macro_use]
extern crate log;

pub use tmtx_matrix as matrix;

pub mod demo;
