use std::io::{self, Write};

use clap::Args;
use clap::builder::RangedU64ValueParser;
use der::{Converter, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};

use crate::error::Result;
use crate::utils::{format_hex_dump, read_input};

#[derive(Args)]
pub(crate) struct Config {
    /// Path to the BER file. If not specified, reads from stdin
    file: Option<String>,

    /// Output as hexadecimal dump instead of binary
    #[arg(long)]
    hex: bool,

    /// Maximum nesting depth of constructed values
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_DEPTH,
        value_parser = RangedU64ValueParser::<usize>::new().range(0..=MAX_DEPTH_LIMIT as u64),
    )]
    max_depth: usize,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let ber = read_input(config.file.as_deref())?;

    let der = Converter::new()
        .with_max_depth(config.max_depth)
        .convert(&ber)?;

    if config.hex {
        print!("{}", format_hex_dump(der.as_bytes())?);
    } else {
        io::stdout().write_all(der.as_bytes())?;
    }

    Ok(())
}
