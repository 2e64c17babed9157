//! Object identifiers and the mapping from digest/signature algorithm
//! identifiers to a signature algorithm.

use std::fmt::Display;
use std::str::FromStr;

use berder::decoder::{DecodableFrom, Decoder};
use der::Value;
use serde::{Serialize, Serializer};

pub mod algorithm;
pub mod error;

pub use algorithm::{SignatureAlgorithm, to_signature_algorithm};
pub use error::{Error, Result};

/// Identifier octet of a universal OBJECT IDENTIFIER.
const TAG: u8 = 0x06;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectIdentifier {
    inner: Vec<u64>,
}

impl ObjectIdentifier {
    pub fn arcs(&self) -> &[u64] {
        &self.inner
    }

    /// Encodes the arcs as DER content octets.
    pub fn to_der_content(&self) -> Result<Vec<u8>> {
        let (first, second, rest) = match self.inner.as_slice() {
            [first, second, rest @ ..] => (*first, *second, rest),
            _ => return Err(Error::TooFewComponents),
        };
        if first > 2 || (first < 2 && second >= 40) {
            return Err(Error::InvalidFirstArcs(first, second));
        }
        let head = (first * 40).checked_add(second).ok_or(Error::ArcOverflow)?;

        let mut result = Vec::new();
        for arc in std::iter::once(head).chain(rest.iter().copied()) {
            push_base128(&mut result, arc);
        }
        Ok(result)
    }
}

fn push_base128(out: &mut Vec<u8>, mut value: u64) {
    let mut encoded = vec![value as u8 & 0x7f];
    value >>= 7;
    while value > 0 {
        encoded.push(value as u8 & 0x7f | 0x80);
        value >>= 7;
    }
    out.extend(encoded.iter().rev());
}

impl Serialize for ObjectIdentifier {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl TryFrom<&[u8]> for ObjectIdentifier {
    type Error = Error;

    /// Decodes DER content octets.
    fn try_from(value: &[u8]) -> Result<Self> {
        if value.is_empty() {
            return Err(Error::NoData);
        }

        let mut subidentifiers = Vec::new();
        let mut val = 0u64;
        let mut pending = false;
        for &b in value {
            if val > u64::MAX >> 7 {
                return Err(Error::ArcOverflow);
            }
            val = (val << 7) | u64::from(b & 0x7f);
            pending = b & 0x80 == 0x80;
            if !pending {
                // continuation bit cleared: this subidentifier is complete
                subidentifiers.push(val);
                val = 0;
            }
        }
        if pending {
            return Err(Error::IncompleteEncoding);
        }

        // The first subidentifier packs the first two arcs.
        let head = subidentifiers[0];
        let (first, second) = match head {
            0..40 => (0, head),
            40..80 => (1, head - 40),
            _ => (2, head - 80),
        };
        let mut inner = vec![first, second];
        inner.extend_from_slice(&subidentifiers[1..]);
        Ok(ObjectIdentifier { inner })
    }
}

impl Display for ObjectIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut arcs = self.inner.iter();
        if let Some(first) = arcs.next() {
            write!(f, "{first}")?;
        }
        for arc in arcs {
            write!(f, ".{arc}")?;
        }
        Ok(())
    }
}

impl FromStr for ObjectIdentifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let inner = s
            .split('.')
            .map(|arc| arc.parse::<u64>().map_err(Error::InvalidComponent))
            .collect::<Result<Vec<u64>>>()?;
        if inner.len() < 2 {
            return Err(Error::TooFewComponents);
        }
        Ok(ObjectIdentifier { inner })
    }
}

impl PartialEq<&str> for ObjectIdentifier {
    fn eq(&self, other: &&str) -> bool {
        let mut parts = other.split('.');
        self.inner
            .iter()
            .all(|arc| parts.next().and_then(|p| p.parse::<u64>().ok()) == Some(*arc))
            && parts.next().is_none()
    }
}

impl PartialEq<ObjectIdentifier> for &str {
    fn eq(&self, other: &ObjectIdentifier) -> bool {
        other == self
    }
}

impl<'a> DecodableFrom<Value<'a>> for ObjectIdentifier {}

impl<'a> Decoder<Value<'a>, ObjectIdentifier> for Value<'a> {
    type Error = Error;

    fn decode(&self) -> Result<ObjectIdentifier> {
        match self {
            Value::Primitive(p) if p.identifier() == [TAG] => {
                ObjectIdentifier::try_from(p.content())
            }
            _ => Err(Error::UnexpectedIdentifier(self.identifier().to_vec())),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest(input, expected,
        case(vec![0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x0b], "1.2.840.113549.1.1.11"),
        case(vec![0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x01], "2.16.840.1.101.3.4.2.1"),
        case(vec![0x2b, 0x0e, 0x03, 0x02, 0x1a], "1.3.14.3.2.26"),
        case(vec![0x55, 0x04, 0x03], "2.5.4.3"),
        case(vec![0x00], "0.0"),
        case(vec![0x88, 0x37, 0x03], "2.999.3"),
    )]
    fn test_decode_content(input: Vec<u8>, expected: &str) {
        let oid = ObjectIdentifier::try_from(input.as_slice()).unwrap();
        assert_eq!(expected, oid.to_string());
        assert_eq!(oid, expected);
        assert_eq!(input, oid.to_der_content().unwrap());
    }

    #[rstest(input,
        case(vec![]),
        case(vec![0x2a, 0x86]),
        case(vec![0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f]),
    )]
    fn test_decode_content_rejected(input: Vec<u8>) {
        assert!(ObjectIdentifier::try_from(input.as_slice()).is_err());
    }

    #[rstest(input, valid,
        case("1.2.840.10045.4.3.2", true),
        case("2.16.840.1.101.3.4.2.3", true),
        case("1", false),
        case("1..2", false),
        case("1.x.3", false),
    )]
    fn test_from_str(input: &str, valid: bool) {
        let actual = ObjectIdentifier::from_str(input);
        assert_eq!(valid, actual.is_ok());
        if let Ok(oid) = actual {
            assert_eq!(input, oid.to_string());
        }
    }

    #[rstest(input,
        case("3.1"),
        case("0.40"),
        case("1.40.1"),
    )]
    fn test_to_der_content_rejected(input: &str) {
        let oid = ObjectIdentifier::from_str(input).unwrap();
        assert!(oid.to_der_content().is_err());
    }

    #[test]
    fn test_str_comparison() {
        let oid = ObjectIdentifier::from_str("1.2.840.113549.1.1.1").unwrap();
        assert!(oid == "1.2.840.113549.1.1.1");
        assert!("1.2.840.113549.1.1.1" == oid);
        assert!(oid != "1.2.840.113549.1.1");
        assert!(oid != "1.2.840.113549.1.1.1.5");
        assert!(oid != "1.2.840.113549.1.1.11");
    }

    #[test]
    fn test_decode_from_value() {
        let ber = [0x06, 0x81, 0x03, 0x55, 0x04, 0x03];
        let value = der::Converter::new().decode(&ber).unwrap();
        let oid: ObjectIdentifier = value.decode().unwrap();
        assert_eq!(oid, "2.5.4.3");

        let not_oid = Value::primitive(&[0x04], &[0x55]);
        let actual: Result<ObjectIdentifier> = not_oid.decode();
        assert!(matches!(actual, Err(Error::UnexpectedIdentifier(id)) if id == vec![0x04]));
    }

    #[test]
    fn test_serialize() {
        let oid = ObjectIdentifier::from_str("2.5.4.3").unwrap();
        assert_eq!(
            serde_json::to_string(&oid).unwrap(),
            "\"2.5.4.3\""
        );
    }
}
