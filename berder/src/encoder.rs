//! Encoder trait, the reverse direction of [`crate::decoder`].

/// Encoder trait for converting `self` (of type `T`) into type `E`.
///
/// The destination type must implement `EncodableTo<T>`.
pub trait Encoder<T, E: EncodableTo<T>> {
    /// The error type returned when encoding fails.
    type Error;

    /// Encodes `self` into type `E`.
    fn encode(&self) -> Result<E, Self::Error>;
}

/// Marker trait indicating that type `E` can be produced by encoding `T`.
pub trait EncodableTo<T> {}
