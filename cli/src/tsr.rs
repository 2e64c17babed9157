use std::fmt::Write;

use berder::decoder::Decoder;
use clap::Args;
use serde::Serialize;
use timestamp::{FailureReason, PkiStatus, Response};

use crate::error::Result;
use crate::output::OutputFormat;
use crate::utils::read_input;

#[derive(Args)]
pub(crate) struct Config {
    /// Path to the TimeStampResp file. If not specified, reads from stdin
    file: Option<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
}

#[derive(Serialize)]
struct Summary<'a> {
    status: PkiStatus,
    status_string: &'a [String],
    fail_info: Vec<FailureReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<TokenSummary>,
}

#[derive(Serialize)]
struct TokenSummary {
    received_length: usize,
    der_length: usize,
    canonical: bool,
}

impl<'a> Summary<'a> {
    fn new(resp: &'a Response) -> Result<Self> {
        let token = match (resp.token_bytes(), resp.canonical_token()?) {
            (Some(received), Some(der)) => Some(TokenSummary {
                received_length: received.len(),
                der_length: der.len(),
                canonical: received == der.as_slice(),
            }),
            _ => None,
        };
        Ok(Self {
            status: resp.status.status,
            status_string: &resp.status.status_string,
            fail_info: resp
                .status
                .fail_info
                .as_ref()
                .map(|f| f.reasons())
                .unwrap_or_default(),
            token,
        })
    }

    fn to_text(&self) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "Status: {}", self.status)?;
        for s in self.status_string {
            writeln!(out, "Status String: {s}")?;
        }
        if !self.fail_info.is_empty() {
            let reasons: Vec<String> = self.fail_info.iter().map(|r| format!("{r:?}")).collect();
            writeln!(out, "Failure Info: {}", reasons.join(", "))?;
        }
        match &self.token {
            Some(token) => {
                writeln!(
                    out,
                    "Time-Stamp Token: {} octets received, {} octets DER{}",
                    token.received_length,
                    token.der_length,
                    if token.canonical { "" } else { " (re-encoded)" }
                )?;
            }
            None => writeln!(out, "Time-Stamp Token: absent")?,
        }
        Ok(out)
    }
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let input = read_input(config.file.as_deref())?;
    let resp: Response = input.as_slice().decode()?;
    let summary = Summary::new(&resp)?;

    match config.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Text => print!("{}", summary.to_text()?),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_summary() {
        let input = [
            0x30, 0x14, 0x30, 0x12, 0x02, 0x01, 0x02, 0x30, 0x09, 0x0c, 0x07, 0x62, 0x61, 0x64,
            0x20, 0x61, 0x6c, 0x67, 0x03, 0x02, 0x07, 0x80,
        ];
        let resp = Response::from_ber(&input).unwrap();
        let text = Summary::new(&resp).unwrap().to_text().unwrap();
        assert_eq!(
            text,
            "Status: rejection\n\
             Status String: bad alg\n\
             Failure Info: BadAlg\n\
             Time-Stamp Token: absent\n"
        );
    }

    #[test]
    fn test_token_summary() {
        // granted, token SEQUENCE { NULL } with a padded length
        let input = [
            0x30, 0x0a, 0x30, 0x03, 0x02, 0x01, 0x00, 0x30, 0x81, 0x02, 0x05, 0x00,
        ];
        let resp = Response::from_ber(&input).unwrap();
        let summary = Summary::new(&resp).unwrap();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status": "Granted",
                "status_string": [],
                "fail_info": [],
                "token": {"received_length": 5, "der_length": 4, "canonical": false}
            })
        );
    }
}
