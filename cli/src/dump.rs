use std::fmt::Write;

use clap::Args;
use clap::builder::RangedU64ValueParser;
use der::encode::length_octets;
use der::{Converter, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT, Value};
use serde::Serialize;

use crate::error::Result;
use crate::output::OutputFormat;
use crate::utils::{format_hex_preview, read_input};

/// Content octets shown per primitive value in text output.
const PREVIEW_OCTETS: usize = 16;

#[derive(Args)]
pub(crate) struct Config {
    /// Path to the BER file. If not specified, reads from stdin
    file: Option<String>,

    /// Maximum nesting depth of constructed values
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_DEPTH,
        value_parser = RangedU64ValueParser::<usize>::new().range(0..=MAX_DEPTH_LIMIT as u64),
    )]
    max_depth: usize,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
}

/// JSON view of a value.
#[derive(Serialize)]
struct Node {
    identifier: String,
    constructed: bool,
    /// DER content length
    length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    children: Option<Vec<Node>>,
}

impl From<&Value<'_>> for Node {
    fn from(value: &Value<'_>) -> Self {
        match value {
            Value::Primitive(p) => Node {
                identifier: hex(p.identifier()),
                constructed: false,
                length: p.content().len(),
                content: Some(hex(p.content())),
                children: None,
            },
            Value::Constructed(c) => Node {
                identifier: hex(c.identifier()),
                constructed: true,
                length: c.encoded_length(),
                content: None,
                children: Some(c.children().iter().map(Node::from).collect()),
            },
        }
    }
}

fn hex(data: &[u8]) -> String {
    data.iter().map(|b| format!("{b:02x}")).collect()
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let ber = read_input(config.file.as_deref())?;
    let value = Converter::new()
        .with_max_depth(config.max_depth)
        .decode(&ber)?;

    match config.output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Node::from(&value))?);
        }
        OutputFormat::Text => {
            print!("{}", format_value(&value)?);
        }
    }

    Ok(())
}

/// Formats a value tree with one line per element, children indented.
fn format_value(value: &Value<'_>) -> Result<String> {
    let mut out = String::new();
    // (depth, value) pairs, visited in document order
    let mut pending = vec![(0, value)];
    while let Some((depth, value)) = pending.pop() {
        let prefix = "  ".repeat(depth);
        let id = hex(value.identifier());
        match value {
            Value::Primitive(p) => {
                let len = p.content().len();
                let header = p.identifier().len() + length_octets(len);
                write!(out, "{prefix}{id} ({len} octets, {header} header)")?;
                if len > 0 {
                    write!(out, " {}", format_hex_preview(p.content(), PREVIEW_OCTETS))?;
                }
                writeln!(out)?;
            }
            Value::Constructed(c) => {
                let len = c.encoded_length();
                let count = c.children().len();
                let noun = if count == 1 { "child" } else { "children" };
                writeln!(out, "{prefix}{id} constructed ({len} octets, {count} {noun})")?;
                pending.extend(c.children().iter().rev().map(|child| (depth + 1, child)));
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        let ber = [
            0x30, 0x81, 0x0b, 0x06, 0x03, 0x55, 0x04, 0x03, 0x31, 0x04, 0x04, 0x02, 0xca, 0xfe,
        ];
        let value = Converter::new().decode(&ber).unwrap();
        let text = format_value(&value).unwrap();
        assert_eq!(
            text,
            "30 constructed (11 octets, 2 children)\n\
             \x20\x2006 (3 octets, 2 header) 55 04 03\n\
             \x20\x2031 constructed (4 octets, 1 child)\n\
             \x20\x20\x20\x2004 (2 octets, 2 header) ca fe\n"
        );
    }

    #[test]
    fn test_format_empty_constructed() {
        let value = Converter::new().decode(&[0x30, 0x00]).unwrap();
        assert_eq!(
            "30 constructed (0 octets, 0 children)\n",
            format_value(&value).unwrap()
        );
    }

    #[test]
    fn test_node_json() {
        let ber = [0x30, 0x02, 0x05, 0x00];
        let value = Converter::new().decode(&ber).unwrap();
        let json = serde_json::to_value(Node::from(&value)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "identifier": "30",
                "constructed": true,
                "length": 2,
                "children": [
                    {"identifier": "05", "constructed": false, "length": 0, "content": ""}
                ]
            })
        );
    }
}
