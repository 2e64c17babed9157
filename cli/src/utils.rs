use std::fmt::Write;
use std::fs;
use std::io::{self, Read};

use crate::error::Result;

/// Reads the whole input from `file`, or from stdin when `file` is `None`.
pub(crate) fn read_input(file: Option<&str>) -> Result<Vec<u8>> {
    let input = match file {
        Some(path) => fs::read(path)?,
        None => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            buffer
        }
    };
    log::debug!("read {} input octets", input.len());
    Ok(input)
}

/// Formats `data` the way `xxd -g1` does, with an extra gap after the
/// eighth octet of each 16 octet row.
pub(crate) fn format_hex_dump(data: &[u8]) -> Result<String> {
    const ROW: usize = 16;
    let mut out = String::new();

    for (row, chunk) in data.chunks(ROW).enumerate() {
        write!(out, "{:08x}  ", row * ROW)?;
        for col in 0..ROW {
            match chunk.get(col) {
                Some(b) => write!(out, "{b:02x} ")?,
                None => out.push_str("   "),
            }
            if col == 7 {
                out.push(' ');
            }
        }
        let ascii: String = chunk
            .iter()
            .map(|&b| {
                if b.is_ascii_graphic() || b == b' ' {
                    char::from(b)
                } else {
                    '.'
                }
            })
            .collect();
        writeln!(out, " |{ascii}|")?;
    }

    Ok(out)
}

/// Space separated hex of at most `limit` octets, elided past that.
pub(crate) fn format_hex_preview(data: &[u8], limit: usize) -> String {
    let mut out = data
        .iter()
        .take(limit)
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ");
    if data.len() > limit {
        out.push_str(" ...");
    }
    out
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_format_hex_dump() {
        let data: Vec<u8> = (0x41..0x53).collect();
        let dump = format_hex_dump(&data).unwrap();
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "00000000  41 42 43 44 45 46 47 48  49 4a 4b 4c 4d 4e 4f 50  |ABCDEFGHIJKLMNOP|"
        );
        assert_eq!(
            lines[1],
            "00000010  51 52                                             |QR|"
        );
    }

    #[rstest(data, limit, expected,
        case(vec![], 4, ""),
        case(vec![0x30, 0x00], 4, "30 00"),
        case(vec![0x01, 0x02, 0x03, 0x04, 0x05], 4, "01 02 03 04 ..."),
    )]
    fn test_format_hex_preview(data: Vec<u8>, limit: usize, expected: &str) {
        assert_eq!(expected, format_hex_preview(&data, limit));
    }
}
