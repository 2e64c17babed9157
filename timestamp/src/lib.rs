//! Time-stamp responses
//!
//! RFC 3161 Section 2.4.2:
//! ```asn1
//! TimeStampResp ::= SEQUENCE {
//!     status          PKIStatusInfo,
//!     timeStampToken  TimeStampToken  OPTIONAL }
//! ```
//!
//! Time-stamp authorities do not always emit DER. The token is kept exactly
//! as received, and [`Response::canonical_token`] yields the DER form over
//! which its signature is verified.

use berder::decoder::{DecodableFrom, Decoder};
use berder::encoder::{EncodableTo, Encoder};
use der::{Converter, Value, Window};
use log::debug;

mod element;
pub mod error;
pub mod status;

pub use error::{Error, Result};
pub use status::{FailureInfo, FailureReason, PkiStatus, StatusInfo};

use element::SEQUENCE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusInfo,
    /// The TimeStampToken element (a CMS ContentInfo), as received.
    pub time_stamp_token: Option<Vec<u8>>,
}

impl Response {
    /// Parses a BER or DER encoded TimeStampResp.
    pub fn from_ber(input: &[u8]) -> Result<Self> {
        let mut window = Window::new(input);
        let resp = element::read_outer(&mut window)?;
        element::check(&resp, SEQUENCE, "TimeStampResp")?;
        if !window.is_exhausted() {
            return Err(der::Error::TrailingData.into());
        }

        let mut members = resp.children();
        let status = element::expect(&mut members, SEQUENCE, "PKIStatusInfo")?;
        let status = StatusInfo::parse(status.children())?;

        let time_stamp_token = if members.is_exhausted() {
            None
        } else {
            let token = element::expect(&mut members, SEQUENCE, "TimeStampToken")?;
            Some(token.raw.to_vec())
        };
        if !members.is_exhausted() {
            return Err(Error::UnexpectedElement("TimeStampResp"));
        }

        debug!(
            "parsed time-stamp response: status {}, token {}",
            status.status,
            if time_stamp_token.is_some() {
                "present"
            } else {
                "absent"
            }
        );
        Ok(Self {
            status,
            time_stamp_token,
        })
    }

    /// Encodes the response in DER, canonicalizing the token.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        let status = element::encode_integer(self.status.status as i64);
        let mut members = vec![self.status.to_value(&status)];
        if let Some(token) = &self.time_stamp_token {
            members.push(Converter::new().decode(token)?);
        }
        Ok(Value::constructed(&[SEQUENCE], members).to_der())
    }

    /// The token octets as received, possibly BER.
    pub fn token_bytes(&self) -> Option<&[u8]> {
        self.time_stamp_token.as_deref()
    }

    /// The token converted to DER, ready for signature verification.
    pub fn canonical_token(&self) -> Result<Option<Vec<u8>>> {
        self.token_bytes()
            .map(der::convert_to_der)
            .transpose()
            .map_err(Error::from)
    }
}

impl DecodableFrom<&[u8]> for Response {}

impl Decoder<&[u8], Response> for &[u8] {
    type Error = Error;

    fn decode(&self) -> Result<Response> {
        Response::from_ber(self)
    }
}

impl EncodableTo<Response> for Vec<u8> {}

impl Encoder<Response, Vec<u8>> for Response {
    type Error = Error;

    fn encode(&self) -> Result<Vec<u8>> {
        self.to_der()
    }
}
