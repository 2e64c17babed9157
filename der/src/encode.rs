//! DER serialization of a value tree.
//!
//! Lengths are always written in the shortest form DER allows: one octet
//! below 128, otherwise a long form without leading zero octets.

use crate::value::{Constructed, Primitive, Value};

const LONG_FORM: u8 = 0x80;

/// Number of octets needed to encode `length` in DER.
pub fn length_octets(length: usize) -> usize {
    if length < usize::from(LONG_FORM) {
        1
    } else {
        1 + significant_octets(length)
    }
}

/// Number of big-endian octets of `n`, without leading zero octets.
fn significant_octets(n: usize) -> usize {
    let bits = usize::BITS - n.leading_zeros();
    bits.div_ceil(8) as usize
}

/// Appends the DER length octets for `length` to `out`.
pub fn write_length(out: &mut Vec<u8>, length: usize) {
    if length < usize::from(LONG_FORM) {
        out.push(length as u8);
        return;
    }
    let count = significant_octets(length);
    out.push(LONG_FORM | count as u8);
    let octets = length.to_be_bytes();
    out.extend_from_slice(&octets[octets.len() - count..]);
}

impl Primitive<'_> {
    pub fn encoded_len(&self) -> usize {
        let content = self.content().len();
        self.identifier().len() + length_octets(content) + content
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.identifier());
        write_length(out, self.content().len());
        out.extend_from_slice(self.content());
    }
}

impl Constructed<'_> {
    pub fn encoded_len(&self) -> usize {
        let content = self.encoded_length();
        self.identifier().len() + length_octets(content) + content
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.identifier());
        write_length(out, self.encoded_length());
        for child in self.children() {
            child.write(out);
        }
    }
}

impl Value<'_> {
    /// Size of this value once encoded in DER.
    pub fn encoded_len(&self) -> usize {
        match self {
            Value::Primitive(p) => p.encoded_len(),
            Value::Constructed(c) => c.encoded_len(),
        }
    }

    /// Appends the DER encoding of this value to `out`.
    ///
    /// Recursion depth equals the nesting depth of the tree, which the
    /// decoder bounds.
    pub fn write(&self, out: &mut Vec<u8>) {
        match self {
            Value::Primitive(p) => p.write(out),
            Value::Constructed(c) => c.write(out),
        }
    }

    /// Encodes this value into a buffer of exactly `encoded_len()` octets.
    pub fn to_der(&self) -> Vec<u8> {
        let len = self.encoded_len();
        let mut out = Vec::with_capacity(len);
        self.write(&mut out);
        debug_assert_eq!(out.len(), len);
        out
    }
}
