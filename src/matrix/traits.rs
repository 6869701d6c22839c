/* ************************************************************************ **
** This file is part of tmtx, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

// Traits exposed in public interfaces,
// implemented on finite sets of types rather than more general
//  generic bounds in order to reduce coupling with client crates.

pub use self::semiring::Semiring;
mod semiring {
    /// Trait for scalars with addition and multiplication.
    ///
    /// A matrix of any `Semiring` type supports scaling and adding a
    /// scalar to every cell, and elementwise addition with another matrix
    /// of the same shape.
    ///
    /// You get primitive floats and integers.  This trait is sealed to
    /// avoid accidental commitments.
    pub trait Semiring : Sealed { }

    pub(super) use self::private::Sealed;
    pub(super) mod private {
        pub trait Sealed { }
    }
}

pub use self::ring::Ring;
mod ring {
    use super::Semiring;

    /// Trait for scalars with addition, multiplication, and subtraction.
    ///
    /// This trait is sealed to avoid accidental commitments.
    /// It doesn't include unsigned integers because a ring must be
    /// closed under negation, so subtracting from (or negating) a matrix
    /// of `u32` is a type error rather than a wraparound waiting to happen.
    pub trait Ring : Semiring + Sealed { }

    pub(super) use self::private::Sealed;
    pub(super) mod private {
        pub trait Sealed { }
    }
}

pub use self::field::Field;
mod field {
    use super::Ring;

    /// Trait for scalars with addition, multiplication, subtraction, and division.
    ///
    /// This trait is sealed to avoid accidental commitments.
    /// It's currently just primitive, real floating point types.
    /// Integer division truncates, so integers don't get to divide a matrix.
    pub trait Field : Ring + Sealed { }

    pub(super) use self::private::Sealed;
    pub(super) mod private {
        pub trait Sealed { }
    }
}

// Generate the (trivial) impls of Field, Ring, and Semiring.
gen_each!{
    @{field}
    impl_field!({$T:ty}) => {
        impl Field for $T { }
        impl field::Sealed for $T { }
    };
}

gen_each!{
    @{ring}
    impl_ring!({$T:ty}) => {
        impl Ring for $T { }
        impl ring::Sealed for $T { }
    };
}

gen_each!{
    @{semiring}
    impl_semiring!({$T:ty}) => {
        impl Semiring for $T { }
        impl semiring::Sealed for $T { }
    };
}

/// Internal-use marker traits for generic implementations.
///
/// By using these traits instead of generating separate impls for
/// every element type, we can improve compilation time through
/// lazier codegen.
///
/// Some of these traits are 'unsafe' even though they cannot be
/// named by the consumer.  This is for the benefit of the mantainer
/// of this crate.
pub(crate) mod internal {
    use std::ops::{Add, Sub, Mul, Div, Neg};
    use std::fmt::Debug;

    macro_rules! markers {
        ($( $name:ident[$($bound:tt)+]; )+)
        => {$(
            pub trait $name: $($bound)+ { }
            impl<T> $name for T where T: $($bound)+ { }
        )+};
    }

    markers!{
        SelfAdd[Sized + Add<Self, Output=Self>];
        SelfSub[Sized + Sub<Self, Output=Self>];
        SelfMul[Sized + Mul<Self, Output=Self>];
        SelfDiv[Sized + Div<Self, Output=Self>];
        SelfNeg[Sized + Neg<Output=Self>];
    }

    /// # Safety
    ///
    /// Unsafe code in this crate may make a variety of assumptions
    /// about the semantics of functionality made available through
    /// this trait (for instance, that these types have no padding and
    /// no drop glue).  Adding a new impl will require review of such code.
    pub unsafe trait PrimitiveSemiring
        : Sized + Copy + Clone + Default + Debug
        + PartialEq + PartialOrd
        + SelfAdd + SelfMul
        + num_traits::Zero
    { }

    gen_each!{
        @{semiring}
        impl_primitive_semiring!({$T:ty})
        => {
            unsafe impl PrimitiveSemiring for $T { }
        };
    }

    /// # Safety
    ///
    /// See `PrimitiveSemiring`.
    pub unsafe trait PrimitiveRing
        : PrimitiveSemiring
        + SelfSub + SelfNeg
    { }

    gen_each!{
        @{ring}
        impl_primitive_ring!({$T:ty})
        => {
            unsafe impl PrimitiveRing for $T { }
        };
    }

    /// # Safety
    ///
    /// See `PrimitiveSemiring`.
    pub unsafe trait PrimitiveFloat
        : PrimitiveRing
        + SelfDiv
    { }

    unsafe impl PrimitiveFloat for f32 {}
    unsafe impl PrimitiveFloat for f64 {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::internal::{PrimitiveSemiring, PrimitiveRing, PrimitiveFloat};

    fn is_semiring<T: Semiring + PrimitiveSemiring>() {}
    fn is_ring<T: Ring + PrimitiveRing>() {}
    fn is_field<T: Field + PrimitiveFloat>() {}

    #[test]
    fn membership() {
        is_semiring::<u8>();
        is_semiring::<usize>();
        is_semiring::<f32>();
        is_ring::<i64>();
        is_ring::<f64>();
        is_ring::<isize>();
        is_field::<f32>();
        is_field::<f64>();
    }
}
