//! Identifier and length octets of a single BER element.

use nom::bytes::complete::{take, take_while};
use nom::number::complete::be_u8;
use nom::{IResult, Parser};

use crate::error::{Error, Result};
use crate::window::Window;

/// Bit of the first identifier octet set for constructed encodings.
const CONSTRUCTED: u8 = 0x20;
/// Low bits of the first identifier octet selecting the high-tag-number form.
const HIGH_TAG_NUMBER: u8 = 0x1f;
/// Continuation bit of subsequent identifier octets.
const MORE_TAG_OCTETS: u8 = 0x80;

const INDEFINITE_LENGTH: u8 = 0x80;
/// Long-form lengths may use at most this many octets.
///
/// Decoded lengths are additionally bounded by `i64::MAX` and by the host
/// `usize`. Lengths outside that range are rejected, never truncated.
pub const MAX_LENGTH_OCTETS: usize = 4;

type NomErr<'a> = nom::Err<nom::error::Error<&'a [u8]>>;

/// The decoded header of one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header<'a> {
    /// Identifier octets, verbatim.
    pub identifier: &'a [u8],
    /// Number of content octets following the header.
    pub content_length: usize,
    pub constructed: bool,
    /// Number of identifier plus length octets.
    pub header_length: usize,
}

impl Header<'_> {
    /// Total BER size of the element: header and content.
    pub fn element_length(&self) -> usize {
        self.header_length + self.content_length
    }
}

/// Decodes the header of the element starting at the window's cursor.
///
/// On success the window is positioned at the first content octet, and the
/// declared content is guaranteed to fit in what remains of the window.
pub fn decode<'a>(window: &mut Window<'a>) -> Result<Header<'a>> {
    let start = window.offset();
    let input = window.remaining();

    let (rest, identifier) = parse_identifier(input).map_err(|_: NomErr<'_>| Error::EarlyEof)?;
    let (rest, content_length) = parse_length(rest)?;
    let header_length = input.len() - rest.len();

    if content_length > rest.len() {
        return Err(Error::EarlyEof);
    }
    window.seek(start + header_length)?;

    Ok(Header {
        identifier,
        content_length,
        constructed: is_constructed(identifier),
        header_length,
    })
}

fn is_constructed(identifier: &[u8]) -> bool {
    identifier
        .first()
        .is_some_and(|b| b & CONSTRUCTED == CONSTRUCTED)
}

fn parse_identifier(input: &[u8]) -> IResult<&[u8], &[u8]> {
    let (rest, first) = be_u8(input)?;
    let rest = if first & HIGH_TAG_NUMBER == HIGH_TAG_NUMBER {
        // high-tag-number form: continuation octets, then one final octet
        let (rest, _) = take_while(|b: u8| b & MORE_TAG_OCTETS == MORE_TAG_OCTETS).parse(rest)?;
        let (rest, _) = be_u8(rest)?;
        rest
    } else {
        rest
    };
    Ok((rest, &input[..input.len() - rest.len()]))
}

fn parse_length(input: &[u8]) -> Result<(&[u8], usize)> {
    let (input, n) = be_u8(input).map_err(|_: NomErr<'_>| Error::EarlyEof)?;
    if n < INDEFINITE_LENGTH {
        // short form: 0-127
        return Ok((input, usize::from(n)));
    }
    if n == INDEFINITE_LENGTH {
        return Err(Error::UnsupportedIndefiniteLength);
    }

    // long form
    // The low 7 bits give the number of big-endian length octets.
    let count = usize::from(n & 0x7f);
    if count > MAX_LENGTH_OCTETS {
        return Err(Error::UnsupportedLength);
    }
    let (input, octets) = take(count)
        .parse(input)
        .map_err(|_: NomErr<'_>| Error::EarlyEof)?;
    let length = octets
        .iter()
        .fold(0u64, |length, &b| (length << 8) | u64::from(b));
    if length > i64::MAX as u64 {
        return Err(Error::UnsupportedLength);
    }
    let length = usize::try_from(length).map_err(|_| Error::UnsupportedLength)?;
    Ok((input, length))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest(input, expected,
        case(vec![0x02], vec![0x02]),
        case(vec![0x02, 0x01], vec![0x02]),
        case(vec![0x30, 0x01], vec![0x30]),
        case(vec![0xa0, 0x03], vec![0xa0]),
        case(vec![0x1f, 0x1f, 0x00], vec![0x1f, 0x1f]),
        case(vec![0x3f, 0x81, 0x80, 0x01, 0x00], vec![0x3f, 0x81, 0x80, 0x01]),
        case(vec![0xbf, 0x87, 0x67], vec![0xbf, 0x87, 0x67]),
    )]
    fn test_parse_identifier(input: Vec<u8>, expected: Vec<u8>) {
        let (_, actual) = parse_identifier(&input).unwrap();
        assert_eq!(expected, actual);
    }

    #[rstest(input,
        case(vec![]),
        case(vec![0x1f]),
        case(vec![0x1f, 0x81]),
        case(vec![0x3f, 0x81, 0x82]),
    )]
    fn test_parse_identifier_truncated(input: Vec<u8>) {
        assert!(parse_identifier(&input).is_err());
    }

    #[rstest(input, expected,
        case(vec![0x00], 0),
        case(vec![0x02, 0x01], 0x02),
        case(vec![0x7f], 0x7f),
        case(vec![0x81, 0x00], 0),
        case(vec![0x81, 0x20], 0x20),
        case(vec![0x81, 0x80], 0x80),
        case(vec![0x82, 0x02, 0x10], 256 * 0x02 + 0x10),
        case(vec![0x82, 0x00, 0x05], 5),
        case(vec![0x83, 0x01, 0x00, 0x00], 256 * 256),
        case(vec![0x82, 0xff, 0xff], 256 * 0xff + 0xff),
        case(vec![0x84, 0x7f, 0xff, 0xff, 0xff], 0x7fff_ffff),
    )]
    fn test_parse_length(input: Vec<u8>, expected: usize) {
        let (_, actual) = parse_length(&input).unwrap();
        assert_eq!(expected, actual);
    }

    #[rstest(input, expected,
        case(vec![], Error::EarlyEof),
        case(vec![0x80], Error::UnsupportedIndefiniteLength),
        case(vec![0x85, 0x00, 0x00, 0x00, 0x00, 0x01], Error::UnsupportedLength),
        case(vec![0x88, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01], Error::UnsupportedLength),
        case(vec![0xff], Error::UnsupportedLength),
        case(vec![0x82, 0x01], Error::EarlyEof),
        case(vec![0x84], Error::EarlyEof),
    )]
    fn test_parse_length_rejected(input: Vec<u8>, expected: Error) {
        assert_eq!(Err(expected), parse_length(&input).map(|(_, l)| l));
    }

    #[rstest(input, expected,
        case(vec![0x04, 0x00], Header { identifier: &[0x04], content_length: 0, constructed: false, header_length: 2 }),
        case(vec![0x04, 0x81, 0x01, 0xaa], Header { identifier: &[0x04], content_length: 1, constructed: false, header_length: 3 }),
        case(vec![0x30, 0x03, 0x02, 0x01, 0x07], Header { identifier: &[0x30], content_length: 3, constructed: true, header_length: 2 }),
        case(vec![0xa0, 0x00], Header { identifier: &[0xa0], content_length: 0, constructed: true, header_length: 2 }),
        case(vec![0x1f, 0x81, 0x01, 0x01, 0x05], Header { identifier: &[0x1f, 0x81, 0x01], content_length: 1, constructed: false, header_length: 4 }),
    )]
    fn test_decode(input: Vec<u8>, expected: Header<'static>) {
        let mut window = Window::new(&input);
        let actual = decode(&mut window).unwrap();
        assert_eq!(expected, actual);
        assert_eq!(window.offset(), expected.header_length);
        assert_eq!(window.remaining().len(), input.len() - expected.header_length);
    }

    #[rstest(input, expected,
        case(vec![], Error::EarlyEof),
        case(vec![0x04], Error::EarlyEof),
        case(vec![0x04, 0x02, 0x01], Error::EarlyEof),
        case(vec![0x30, 0x82, 0x01, 0x00, 0x02, 0x01, 0x07], Error::EarlyEof),
        case(vec![0x30, 0x80, 0x00, 0x00], Error::UnsupportedIndefiniteLength),
        case(vec![0x04, 0x85, 0x00, 0x00, 0x00, 0x00, 0x00], Error::UnsupportedLength),
    )]
    fn test_decode_rejected(input: Vec<u8>, expected: Error) {
        let mut window = Window::new(&input);
        assert_eq!(Err(expected), decode(&mut window));
        // failed decodes never move the cursor
        assert_eq!(window.offset(), 0);
    }

    #[test]
    fn test_decode_mid_window() {
        let input = [0xff, 0x02, 0x01, 0x05, 0xee];
        let mut window = Window::new(&input);
        window.seek(1).unwrap();
        let header = decode(&mut window).unwrap();
        assert_eq!(header.identifier, &[0x02]);
        assert_eq!(header.element_length(), 3);
        assert_eq!(window.offset(), 3);
    }
}
