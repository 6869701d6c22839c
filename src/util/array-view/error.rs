use thiserror::Error;

/// Reasons a view could not be constructed over a slice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("a stride of {stride} bytes does not land on element boundaries (element size: {elem_size} bytes)")]
    UnalignedStride { stride: usize, elem_size: usize },

    #[error("a mutable view of {len} elements with a stride of {stride} bytes would alias its own elements")]
    Overlapping { len: usize, stride: usize },

    #[error("a view of {len} elements with a stride of {stride} bytes needs {needed} elements of storage, but only {available} are available")]
    OutOfBounds { len: usize, stride: usize, needed: usize, available: usize },

    #[error("expected a view of {expected} elements, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}
