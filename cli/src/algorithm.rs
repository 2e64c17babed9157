use std::str::FromStr;

use clap::Args;
use oid::{ObjectIdentifier, to_signature_algorithm};

use crate::error::Result;

#[derive(Args)]
pub(crate) struct Config {
    /// Digest algorithm OID in dotted form, e.g. 2.16.840.1.101.3.4.2.1
    digest: String,

    /// Signature algorithm OID in dotted form, e.g. 1.2.840.113549.1.1.1
    signature: String,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let digest = ObjectIdentifier::from_str(&config.digest)?;
    let signature = ObjectIdentifier::from_str(&config.signature)?;

    println!("{}", to_signature_algorithm(&digest, &signature));

    Ok(())
}
