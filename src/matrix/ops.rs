/* ************************************************************************ **
** This file is part of tmtx, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Elementwise arithmetic.
//!
//! Every operator has an assigning form that works in place, a by-value
//! form that reuses the left operand's storage, and a by-reference form
//! that leaves its operands alone.

use crate::layout::Layout;
use crate::traits::{Semiring, Ring, Field};
use crate::traits::internal::{PrimitiveSemiring, PrimitiveRing, PrimitiveFloat};
use crate::types::Matrix;

use num_traits::Zero;
use std::ops::{Add, Sub, Mul, Div, Neg};
use std::ops::{AddAssign, SubAssign, MulAssign, DivAssign};

impl<T, const R: usize, const C: usize, L: Layout> Matrix<T, R, C, L> {
    // Calls `f` on each pair of corresponding cells.
    #[inline]
    fn zip_cells_mut<U, L2: Layout, F>(&mut self, other: &Matrix<U, R, C, L2>, mut f: F)
    where F: FnMut(&mut T, &U),
    {
        if L::ORDER == L2::ORDER {
            for (a, b) in self.as_flat_mut().iter_mut().zip(other.as_flat()) {
                f(a, b);
            }
        } else {
            for (r, c) in iproduct!(0..R, 0..C) {
                f(&mut self[(r, c)], &other[(r, c)]);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// matrix (op) scalar, applied to every cell

gen_each!{
    [
        {Mul mul MulAssign mul_assign Semiring PrimitiveSemiring}
        {Add add AddAssign add_assign Semiring PrimitiveSemiring}
        {Sub sub SubAssign sub_assign Ring PrimitiveRing}
        {Div div DivAssign div_assign Field PrimitiveFloat}
    ]
    impl_scalar_ops!(
        {$Op:ident $op:ident $OpAssign:ident $op_assign:ident $Scalar:ident $Prim:ident}
    ) => {
        // mat op= scalar
        impl<X: $Scalar, const R: usize, const C: usize, L: Layout> $OpAssign<X> for Matrix<X, R, C, L>
        where X: $Prim,
        {
            #[inline]
            fn $op_assign(&mut self, scalar: X) {
                for x in self.iter_mut() {
                    *x = $Op::$op(*x, scalar);
                }
            }
        }

        // mat op scalar
        impl<X: $Scalar, const R: usize, const C: usize, L: Layout> $Op<X> for Matrix<X, R, C, L>
        where X: $Prim,
        {
            type Output = Matrix<X, R, C, L>;

            #[inline]
            fn $op(mut self, scalar: X) -> Self::Output {
                $OpAssign::$op_assign(&mut self, scalar);
                self
            }
        }

        // &mat op scalar
        impl<'a, X: $Scalar, const R: usize, const C: usize, L: Layout> $Op<X> for &'a Matrix<X, R, C, L>
        where X: $Prim,
        {
            type Output = Matrix<X, R, C, L>;

            #[inline]
            fn $op(self, scalar: X) -> Self::Output { $Op::$op(self.clone(), scalar) }
        }
    };
}

// ---------------------------------------------------------------------------
// matrix (op) matrix, cell by cell.
//
// The right-hand side may use either layout; the result takes the layout of
// the left-hand side.

gen_each!{
    [
        {Add add AddAssign add_assign Semiring PrimitiveSemiring}
        {Sub sub SubAssign sub_assign Ring PrimitiveRing}
    ]
    impl_matrix_ops!(
        {$Op:ident $op:ident $OpAssign:ident $op_assign:ident $Scalar:ident $Prim:ident}
    ) => {
        // mat op= &mat
        impl<'b, X: $Scalar, const R: usize, const C: usize, L: Layout, L2: Layout>
            $OpAssign<&'b Matrix<X, R, C, L2>> for Matrix<X, R, C, L>
        where X: $Prim,
        {
            #[inline]
            fn $op_assign(&mut self, other: &'b Matrix<X, R, C, L2>) {
                self.zip_cells_mut(other, |a, &b| *a = $Op::$op(*a, b));
            }
        }

        // mat op= mat
        impl<X: $Scalar, const R: usize, const C: usize, L: Layout, L2: Layout>
            $OpAssign<Matrix<X, R, C, L2>> for Matrix<X, R, C, L>
        where X: $Prim,
        {
            #[inline]
            fn $op_assign(&mut self, other: Matrix<X, R, C, L2>) {
                $OpAssign::$op_assign(self, &other);
            }
        }

        // mat op mat
        impl<X: $Scalar, const R: usize, const C: usize, L: Layout, L2: Layout>
            $Op<Matrix<X, R, C, L2>> for Matrix<X, R, C, L>
        where X: $Prim,
        {
            type Output = Matrix<X, R, C, L>;

            #[inline]
            fn $op(mut self, other: Matrix<X, R, C, L2>) -> Self::Output {
                $OpAssign::$op_assign(&mut self, &other);
                self
            }
        }

        // mat op &mat
        impl<'b, X: $Scalar, const R: usize, const C: usize, L: Layout, L2: Layout>
            $Op<&'b Matrix<X, R, C, L2>> for Matrix<X, R, C, L>
        where X: $Prim,
        {
            type Output = Matrix<X, R, C, L>;

            #[inline]
            fn $op(mut self, other: &'b Matrix<X, R, C, L2>) -> Self::Output {
                $OpAssign::$op_assign(&mut self, other);
                self
            }
        }

        // &mat op mat
        impl<'a, X: $Scalar, const R: usize, const C: usize, L: Layout, L2: Layout>
            $Op<Matrix<X, R, C, L2>> for &'a Matrix<X, R, C, L>
        where X: $Prim,
        {
            type Output = Matrix<X, R, C, L>;

            #[inline]
            fn $op(self, other: Matrix<X, R, C, L2>) -> Self::Output { $Op::$op(self.clone(), &other) }
        }

        // &mat op &mat
        impl<'a, 'b, X: $Scalar, const R: usize, const C: usize, L: Layout, L2: Layout>
            $Op<&'b Matrix<X, R, C, L2>> for &'a Matrix<X, R, C, L>
        where X: $Prim,
        {
            type Output = Matrix<X, R, C, L>;

            #[inline]
            fn $op(self, other: &'b Matrix<X, R, C, L2>) -> Self::Output { $Op::$op(self.clone(), other) }
        }
    };
}

// ---------------------------------------------------------------------------
// scalar (op) matrix, for the commutative operators

gen_each!{
    @{semiring}
    [{Mul mul} {Add add}]
    impl_scalar_lhs_ops!({$X:ty} {$Op:ident $op:ident}) => {
        impl<const R: usize, const C: usize, L: Layout> $Op<Matrix<$X, R, C, L>> for $X {
            type Output = Matrix<$X, R, C, L>;

            #[inline(always)]
            fn $op(self, matrix: Matrix<$X, R, C, L>) -> Self::Output { $Op::$op(matrix, self) }
        }

        impl<'a, const R: usize, const C: usize, L: Layout> $Op<&'a Matrix<$X, R, C, L>> for $X {
            type Output = Matrix<$X, R, C, L>;

            #[inline(always)]
            fn $op(self, matrix: &'a Matrix<$X, R, C, L>) -> Self::Output { $Op::$op(matrix, self) }
        }
    };
}

// ---------------------------------------------------------------------------

impl<X: Ring, const R: usize, const C: usize, L: Layout> Neg for Matrix<X, R, C, L>
where X: PrimitiveRing,
{
    type Output = Matrix<X, R, C, L>;

    #[inline]
    fn neg(self) -> Self::Output { self.map(|x| -x) }
}

impl<'a, X: Ring, const R: usize, const C: usize, L: Layout> Neg for &'a Matrix<X, R, C, L>
where X: PrimitiveRing,
{
    type Output = Matrix<X, R, C, L>;

    #[inline]
    fn neg(self) -> Self::Output { -self.clone() }
}

/// The all-zero matrix, so that `Sum`-like folds can start somewhere.
impl<X: Semiring, const R: usize, const C: usize, L: Layout> Zero for Matrix<X, R, C, L>
where X: PrimitiveSemiring,
{
    #[inline]
    fn zero() -> Self { Self::from_fn(|_, _| X::zero()) }

    #[inline]
    fn is_zero(&self) -> bool { self.iter().all(|x| x.is_zero()) }
}
