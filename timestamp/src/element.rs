//! Reading individual elements out of a window.

use der::header::{self, Header};
use der::Window;

use crate::error::{Error, Result};

pub(crate) const INTEGER: u8 = 0x02;
pub(crate) const BIT_STRING: u8 = 0x03;
pub(crate) const UTF8_STRING: u8 = 0x0c;
pub(crate) const SEQUENCE: u8 = 0x30;

/// A single element, still borrowing from its input.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Element<'a> {
    pub(crate) header: Header<'a>,
    pub(crate) content: &'a [u8],
    /// Identifier, length and content octets as received.
    pub(crate) raw: &'a [u8],
}

impl<'a> Element<'a> {
    /// Window over the content of a constructed element.
    pub(crate) fn children(&self) -> Window<'a> {
        Window::new(self.content)
    }
}

/// Reads the outermost element of an input buffer.
pub(crate) fn read_outer<'a>(window: &mut Window<'a>) -> Result<Element<'a>> {
    let rest = window.remaining();
    let header = header::decode(window)?;
    let content = window.read_bytes(header.content_length)?;
    Ok(Element {
        header,
        content,
        raw: &rest[..header.element_length()],
    })
}

/// Reads the next element of a parent's content window.
///
/// The parent is already known to lie inside the input, so a child running
/// past the end of the window is a length mismatch, not a truncated input.
pub(crate) fn read<'a>(window: &mut Window<'a>) -> Result<Element<'a>> {
    read_outer(window).map_err(|err| match err {
        Error::Der(der::Error::EarlyEof) => Error::Der(der::Error::InvalidStructuralData),
        err => err,
    })
}

/// Reads the next element of a parent's content window, requiring the
/// single-octet `identifier`.
pub(crate) fn expect<'a>(
    window: &mut Window<'a>,
    identifier: u8,
    field: &'static str,
) -> Result<Element<'a>> {
    if window.is_exhausted() {
        return Err(Error::Missing(field));
    }
    let element = read(window)?;
    check(&element, identifier, field)?;
    Ok(element)
}

pub(crate) fn check(element: &Element<'_>, identifier: u8, field: &'static str) -> Result<()> {
    if element.header.identifier != [identifier] {
        return Err(Error::UnexpectedIdentifier {
            field,
            identifier: element.header.identifier.to_vec(),
        });
    }
    Ok(())
}

/// Whether the next element starts with `identifier`.
pub(crate) fn peek_is(window: &Window<'_>, identifier: u8) -> bool {
    window.remaining().first() == Some(&identifier)
}

pub(crate) fn decode_integer(content: &[u8]) -> Result<i64> {
    let Some(&first) = content.first() else {
        return Err(Error::InvalidInteger);
    };
    if content.len() > 8 {
        return Err(Error::InvalidInteger);
    }
    let sign = if first & 0x80 == 0x80 { -1 } else { 0 };
    Ok(content
        .iter()
        .fold(sign, |n: i64, &b| (n << 8) | i64::from(b)))
}

/// Minimal two's complement content octets of `n`.
pub(crate) fn encode_integer(n: i64) -> Vec<u8> {
    let bytes = n.to_be_bytes();
    let mut start = 0;
    while start < bytes.len() - 1 {
        let redundant = (bytes[start] == 0x00 && bytes[start + 1] & 0x80 == 0)
            || (bytes[start] == 0xff && bytes[start + 1] & 0x80 == 0x80);
        if !redundant {
            break;
        }
        start += 1;
    }
    bytes[start..].to_vec()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest(content, expected,
        case(vec![0x00], 0),
        case(vec![0x05], 5),
        case(vec![0x00, 0x80], 128),
        case(vec![0xff], -1),
        case(vec![0x80], -128),
        case(vec![0x01, 0x00], 256),
    )]
    fn test_integer(content: Vec<u8>, expected: i64) {
        assert_eq!(expected, decode_integer(&content).unwrap());
        assert_eq!(content, encode_integer(expected));
    }

    #[rstest(content,
        case(vec![]),
        case(vec![0x01; 9]),
    )]
    fn test_integer_rejected(content: Vec<u8>) {
        assert!(matches!(decode_integer(&content), Err(Error::InvalidInteger)));
    }

    #[test]
    fn test_read_keeps_raw_octets() {
        let input = [0x04, 0x81, 0x01, 0xaa, 0x05, 0x00];
        let mut window = Window::new(&input);
        let element = read(&mut window).unwrap();
        assert_eq!(element.raw, &[0x04, 0x81, 0x01, 0xaa]);
        assert_eq!(element.content, &[0xaa]);
        assert!(peek_is(&window, 0x05));
    }

    #[rstest(input,
        case(vec![0x02, 0x05, 0x00]),
        case(vec![0x30, 0x81]),
        case(vec![0x04]),
    )]
    fn test_read_overrun_is_structural(input: Vec<u8>) {
        assert!(matches!(
            read(&mut Window::new(&input)),
            Err(Error::Der(der::Error::InvalidStructuralData))
        ));
        assert!(matches!(
            read_outer(&mut Window::new(&input)),
            Err(Error::Der(der::Error::EarlyEof))
        ));
    }

    #[test]
    fn test_expect() {
        let input = [0x05, 0x00];
        let mut window = Window::new(&input);
        assert!(matches!(
            expect(&mut window, SEQUENCE, "test"),
            Err(Error::UnexpectedIdentifier { field: "test", .. })
        ));
        assert!(matches!(
            expect(&mut window, SEQUENCE, "test"),
            Err(Error::Missing("test"))
        ));
    }
}
