//! Decoder trait for type-safe conversions.
//!
//! The `Decoder` trait converts a source type `T` into a destination type
//! `D`. Within berder it turns raw BER bytes into a value tree, into
//! canonical DER bytes, or into higher-level structures such as a
//! time-stamp response.
//!
//! # Design Pattern
//!
//! The decoder uses a two-trait pattern:
//!
//! 1. `Decoder<T, D>` - Performs the actual conversion
//! 2. `DecodableFrom<T>` - Marker trait constraining valid conversions
//!
//! # Implementation Guide
//!
//! ```no_run
//! use berder::decoder::{Decoder, DecodableFrom};
//!
//! struct Raw(Vec<u8>);
//! struct FirstOctet(u8);
//!
//! #[derive(Debug)]
//! struct Empty;
//!
//! impl DecodableFrom<Raw> for FirstOctet {}
//!
//! impl Decoder<Raw, FirstOctet> for Raw {
//!     type Error = Empty;
//!
//!     fn decode(&self) -> Result<FirstOctet, Self::Error> {
//!         self.0.first().copied().map(FirstOctet).ok_or(Empty)
//!     }
//! }
//! ```

/// Decoder trait for converting from type `T` to type `D`.
///
/// This trait is implemented by the source type `T`. The destination type
/// must implement `DecodableFrom<T>`.
///
/// ```ignore
/// use berder::decoder::Decoder;
/// use der::Value;
///
/// let ber: &[u8] = &[0x30, 0x00];
/// let value: Value<'_> = ber.decode().unwrap();
/// assert!(value.is_constructed());
/// ```
pub trait Decoder<T, D: DecodableFrom<T>> {
    /// The error type returned when decoding fails.
    type Error;

    /// Decodes `self` into type `D`.
    ///
    /// # Errors
    ///
    /// Returns an error if the conversion fails. The specific error
    /// conditions depend on the implementing type.
    fn decode(&self) -> Result<D, Self::Error>;
}

/// Marker trait indicating that type `D` can be decoded from type `T`.
///
/// It has no methods. Implement it for each destination type next to the
/// matching `Decoder` implementation:
///
/// ```no_run
/// use berder::decoder::DecodableFrom;
///
/// struct Source;
/// struct Dest;
///
/// impl DecodableFrom<Source> for Dest {}
/// ```
pub trait DecodableFrom<T> {}
