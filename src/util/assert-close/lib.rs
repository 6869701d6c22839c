/* ************************************************************************ **
** This file is part of tmtx, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! `assert_close!`, for tests of floating point code.
//!
//! ```
//! #[macro_use] extern crate tmtx_assert_close;
//!
//! # fn main() {
//! assert_close!(0.1 + 0.2, 0.3);
//! assert_close!(abs=1e-6, [1.0f32, 2.0], [1.0, 2.0000001]);
//! assert_close!(rel=1e-3, &[100.0, 200.0][..], &[100.01, 199.99][..], "scaled by {}", 100);
//! # }
//! ```

use std::fmt;

pub const DEFAULT_NONZERO_TOL: f64 = 1e-9;

#[macro_export]
macro_rules! assert_close {
    ($($t:tt)*) => {assert_close_impl!{@parsing [$($t)*] [[@rel $crate::DEFAULT_NONZERO_TOL] [@abs 0.0]]}};
}

#[macro_export]
macro_rules! debug_assert_close {
    ($($t:tt)*) => {{
        #[cfg(debug_assertions)] {
            assert_close!{$($t)*}
        }
    }};
}

#[macro_export]
#[doc(hidden)]
macro_rules! assert_close_impl {
    (@parsing [rel=$tol:expr, $($rest:tt)*] [$($assignment:tt)*]) => {
        assert_close_impl!(@parsing [$($rest)*] [$($assignment)* [@rel $tol]]);
    };
    (@parsing [abs=$tol:expr, $($rest:tt)*] [$($assignment:tt)*]) => {
        assert_close_impl!(@parsing [$($rest)*] [$($assignment)* [@abs $tol]]);
    };
    (@parsing [$a:expr, $b:expr $(,)*] $assignments:tt) => {
        assert_close_impl!(@expand $assignments [@comp $a, $b] [@fmt "not nearly equal!"])
    };
    (@parsing [$a:expr, $b:expr, $($fmt:tt)+] $assignments:tt) => {
        assert_close_impl!(@expand $assignments [@comp $a, $b] [@fmt $($fmt)+])
    };
    (@expand [$($assignment:tt)*] [@comp $a:expr, $b:expr] [@fmt $($fmt:tt)+] ) => {
        #[allow(unused_mut)]
        #[allow(unused_assignments)]
        {
            let a = $a;
            let b = $b;

            let mut abs;
            let mut rel;
            $(
                assert_close_impl!{@stmt::assign [abs, rel] $assignment}
            )*

            if let Err(e) = $crate::CheckClose::check_close(&a, &b, $crate::Tolerances { abs, rel }) {
                panic!(
                "{} (tolerances: rel={}, abs={})\n left: {:?}\nright: {:?}\n{}",
                 format!($($fmt)*), rel, abs, a, b, e);
            }
        }
    };
    (@stmt::assign [$abs:ident, $rel:ident] [@abs $tol:expr]) => { $abs = $tol; };
    (@stmt::assign [$abs:ident, $rel:ident] [@rel $tol:expr]) => { $rel = $tol; };
}

#[doc(hidden)]
#[inline]
pub fn __is_close(a: f64, b: f64, Tolerances { abs, rel }: Tolerances) -> bool {
    // Implementation from Python 3.5.
    // https://hg.python.org/cpython/file/tip/Modules/mathmodule.c#l1993
    assert!(rel >= 0.0);
    assert!(abs >= 0.0);

    // catch infinities of same sign
    if a == b { return true; }

    // catch infinities of opposite sign, avoiding infinite relative tolerance
    if a.is_infinite() || b.is_infinite() { return false; }

    // case for general values and NaN.
    (a - b).abs() < abs.max(rel * a.abs()).max(rel * b.abs())
}

#[derive(Debug, Copy, Clone)]
pub struct Tolerances<T = f64> {
    pub abs: T,
    pub rel: T
}

#[derive(Debug)]
pub enum CheckCloseError<T = f64> {
    /// Two scalars were not close.  `index` is the position within the
    /// innermost sequence containing them, if any.
    NotClose {
        index: Option<usize>,
        values: (T, T),
        tol: Tolerances,
    },
    LengthMismatch {
        left: usize,
        right: usize,
    },
}

impl<T: fmt::Debug> fmt::Display for CheckCloseError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckCloseError::NotClose { index, values: (left, right), tol } => {
                if let Some(index) = index {
                    write!(f, "failed at index {}:\n", index)?;
                } else {
                    write!(f, "failed at:\n")?;
                }
                write!(f, "  left: {:?}
 right: {:?}
   tol: {:?}", left, right, tol)
            },
            CheckCloseError::LengthMismatch { left, right } => {
                write!(f, "lengths differ: {} vs {}", left, right)
            },
        }
    }
}

impl<T: fmt::Debug + Send + Sync + 'static> failure::Fail for CheckCloseError<T> { }

pub trait CheckClose<Rhs: ?Sized = Self>: {
    type Scalar;

    /// Test that all values of self and other are close.
    fn check_close(&self, other: &Rhs, tol: Tolerances) -> Result<(), CheckCloseError<Self::Scalar>>;
}

macro_rules! impl_float {
    ($($F:ident)*) => {$(
        impl CheckClose for $F {
            type Scalar = $F;

            #[inline]
            fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError<Self::Scalar>>
            {
                if __is_close(f64::from(*self), f64::from(*other), tol) {
                    Ok(())
                } else {
                    Err(CheckCloseError::NotClose {
                        index: None,
                        values: (*self, *other),
                        tol,
                    })
                }
            }
        }
    )*};
}

impl_float!{ f32 f64 }

impl<'a, T: ?Sized + CheckClose> CheckClose for &'a T {
    type Scalar = T::Scalar;

    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError<Self::Scalar>>
    { CheckClose::check_close(*self, *other, tol) }
}

impl<T: CheckClose> CheckClose for [T] {
    type Scalar = T::Scalar;

    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError<Self::Scalar>>
    {
        if self.len() != other.len() {
            return Err(CheckCloseError::LengthMismatch { left: self.len(), right: other.len() });
        }
        for (i, (a, b)) in self.iter().zip(other).enumerate() {
            a.check_close(b, tol).map_err(|e| match e {
                CheckCloseError::NotClose { index: None, values, tol } => {
                    CheckCloseError::NotClose { index: Some(i), values, tol }
                },
                e => e,
            })?;
        }
        Ok(())
    }
}

impl<T: CheckClose> CheckClose for Vec<T> {
    type Scalar = T::Scalar;

    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError<Self::Scalar>>
    { self[..].check_close(&other[..], tol) }
}

impl<T: CheckClose> CheckClose<[T]> for Vec<T> {
    type Scalar = T::Scalar;

    fn check_close(&self, other: &[T], tol: Tolerances) -> Result<(), CheckCloseError<Self::Scalar>>
    { self[..].check_close(other, tol) }
}

impl<T: CheckClose> CheckClose<Vec<T>> for [T] {
    type Scalar = T::Scalar;

    fn check_close(&self, other: &Vec<T>, tol: Tolerances) -> Result<(), CheckCloseError<Self::Scalar>>
    { self.check_close(&other[..], tol) }
}

impl<T: CheckClose, const N: usize> CheckClose for [T; N] {
    type Scalar = T::Scalar;

    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError<Self::Scalar>>
    { self[..].check_close(&other[..], tol) }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;

    #[test]
    fn macro_output_can_compile() {
        assert_close!(1.0, 1.0);
        assert_close!(abs=1e-8, 1.0, 1.0);
        assert_close!(rel=1e-8, abs=1e-8, 1.0, 1.0);
        assert_close!(1.0, 1.0,);
        assert_close!(abs=1e-8, 1.0, 1.0,);
        assert_close!(rel=1e-8, abs=1e-8, 1.0, 1.0,);
    }

    #[test]
    fn bad_parse_regression() {
        #[derive(Debug)] struct S;
        impl S { fn x(self) -> S { self } }
        impl CheckClose for S {
            type Scalar = f64;
            fn check_close(&self, _: &S, _: Tolerances) -> Result<(), CheckCloseError<Self::Scalar>> { Ok(()) }
        }
        assert_close!(
            abs=1e-10,
            S.x().x().x(),
            S.x().x().x(),
        );
        debug_assert_close!(
            abs=1e-10,
            S.x().x().x(),
            S.x().x().x(),
        );
        assert_close!(
            abs=1e-10,
            S.x().x().x(),
            S.x().x().x(),
            "{}", "hello",
        );
    }

    #[test]
    #[should_panic]
    fn not_close() {
        assert_close!(abs=0.0, rel=0.0, 1.0, 1.1);
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic)]
    fn debug_not_close() {
        debug_assert_close!(abs=0.0, rel=0.0, 1.0, 1.1);
    }

    #[test]
    fn single_precision() {
        assert_close!(rel=1e-6, 0.1f32 + 0.2, 0.3f32);
        assert!(0.1f32.check_close(&0.1001, Tolerances { abs: 1e-6, rel: 0.0 }).is_err());
    }

    #[test]
    fn errors_locate_the_offending_element() {
        let tol = Tolerances { abs: 1e-3, rel: 0.0 };
        match [[0.0f64, 1.0], [2.0, 3.0]].check_close(&[[0.0, 1.0], [2.0, 3.5]], tol) {
            Err(CheckCloseError::NotClose { index: Some(1), values: (a, b), .. }) => {
                assert_eq!((a, b), (3.0, 3.5));
            },
            other => panic!("unexpected: {:?}", other),
        }

        let long = vec![1.0f32; 3];
        match long.check_close(&[1.0f32; 2][..], tol) {
            Err(CheckCloseError::LengthMismatch { left: 3, right: 2 }) => {},
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn errors_are_failures() {
        let tol = Tolerances { abs: 0.0, rel: 1e-9 };
        let e = match [1.0f32, 2.0].check_close(&[1.0, 2.5], tol) {
            Err(e) => failure::Error::from(e),
            Ok(()) => panic!("expected an error"),
        };
        assert!(e.to_string().starts_with("failed at index 1:"));
        assert!(e.downcast_ref::<CheckCloseError<f32>>().is_some());
    }

    #[test]
    #[should_panic(expected = "lengths differ")]
    fn length_mismatch_panics() {
        assert_close!(vec![1.0, 2.0], vec![1.0]);
    }
}
