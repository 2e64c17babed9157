//! BER to DER canonicalization.
//!
//! Signatures over ASN.1 structures are computed on their DER encoding, but
//! producers frequently emit BER: long-form lengths where the short form
//! would do, or lengths padded with leading zero octets. This crate parses a
//! single BER element and re-emits it with canonical length octets,
//! leaving every identifier and content octet untouched.
//!
//! ```
//! // SEQUENCE { OCTET STRING } with a non-minimal inner length.
//! let ber = [0x30, 0x05, 0x04, 0x81, 0x02, 0xca, 0xfe];
//! let der = der::convert_to_der(&ber).unwrap();
//! assert_eq!(der, vec![0x30, 0x04, 0x04, 0x02, 0xca, 0xfe]);
//! ```
//!
//! Indefinite lengths are not supported, and decoding never recurses on the
//! native stack: nesting is tracked on an explicit, depth-limited stack.

use berder::decoder::{DecodableFrom, Decoder};
use berder::encoder::{EncodableTo, Encoder};
use log::debug;

pub mod encode;
pub mod error;
pub mod header;
pub mod value;
pub mod window;

pub use error::{Error, Result};
pub use header::Header;
pub use value::{Constructed, MAX_DEPTH_LIMIT, Primitive, Value};
pub use window::Window;

/// Default limit on nested constructed values, the top-level value included.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Converts a single BER-encoded element into its DER encoding.
pub fn convert_to_der(ber: &[u8]) -> Result<Vec<u8>> {
    Converter::default().convert(ber).map(Der::into_vec)
}

/// BER to DER converter with hardening options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Converter {
    max_depth: usize,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limits how deeply constructed values may nest.
    ///
    /// Inputs nesting deeper fail with [`Error::NestingTooDeep`]. A limit of
    /// zero accepts primitive top-level values only, and limits above
    /// [`MAX_DEPTH_LIMIT`] are lowered to it.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.min(MAX_DEPTH_LIMIT);
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Decodes `ber` into a value tree borrowing from it.
    pub fn decode<'a>(&self, ber: &'a [u8]) -> Result<Value<'a>> {
        Value::decode(ber, self.max_depth)
    }

    pub fn convert(&self, ber: &[u8]) -> Result<Der> {
        let value = self.decode(ber)?;
        let der = value.to_der();
        debug!(
            "canonicalized {} BER octets into {} DER octets",
            ber.len(),
            der.len()
        );
        Ok(Der(der))
    }
}

/// Canonical DER octets of a single element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Der(Vec<u8>);

impl Der {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for Der {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Der> for Vec<u8> {
    fn from(der: Der) -> Self {
        der.0
    }
}

impl DecodableFrom<Vec<u8>> for Der {}

impl Decoder<Vec<u8>, Der> for Vec<u8> {
    type Error = Error;

    fn decode(&self) -> Result<Der> {
        Converter::default().convert(self)
    }
}

impl DecodableFrom<&[u8]> for Der {}

impl EncodableTo<Der> for Vec<u8> {}

impl Encoder<Der, Vec<u8>> for Der {
    type Error = Error;

    fn encode(&self) -> Result<Vec<u8>> {
        Ok(self.0.clone())
    }
}

impl Decoder<&[u8], Der> for &[u8] {
    type Error = Error;

    fn decode(&self) -> Result<Der> {
        Converter::default().convert(self)
    }
}

impl<'a> DecodableFrom<&'a [u8]> for Value<'a> {}

impl<'a> Decoder<&'a [u8], Value<'a>> for &'a [u8] {
    type Error = Error;

    fn decode(&self) -> Result<Value<'a>> {
        Converter::default().decode(*self)
    }
}

impl<'a> EncodableTo<Value<'a>> for Vec<u8> {}

impl<'a> Encoder<Value<'a>, Vec<u8>> for Value<'a> {
    type Error = Error;

    fn encode(&self) -> Result<Vec<u8>> {
        Ok(self.to_der())
    }
}
