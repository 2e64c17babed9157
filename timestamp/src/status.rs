//! PKIStatusInfo
//!
//! RFC 3161 Section 2.4.2:
//! ```asn1
//! PKIStatusInfo ::= SEQUENCE {
//!     status        PKIStatus,
//!     statusString  PKIFreeText     OPTIONAL,
//!     failInfo      PKIFailureInfo  OPTIONAL }
//!
//! PKIFreeText ::= SEQUENCE SIZE (1..MAX) OF UTF8String
//! ```

use std::fmt::Display;

use der::{Value, Window};
use serde::{Serialize, Serializer};

use crate::element::{self, BIT_STRING, INTEGER, SEQUENCE, UTF8_STRING};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PkiStatus {
    Granted = 0,
    GrantedWithMods = 1,
    Rejection = 2,
    Waiting = 3,
    RevocationWarning = 4,
    RevocationNotification = 5,
}

impl PkiStatus {
    /// Whether a time-stamp token accompanies this status.
    pub fn is_granted(&self) -> bool {
        matches!(self, PkiStatus::Granted | PkiStatus::GrantedWithMods)
    }
}

impl TryFrom<i64> for PkiStatus {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            0 => Ok(PkiStatus::Granted),
            1 => Ok(PkiStatus::GrantedWithMods),
            2 => Ok(PkiStatus::Rejection),
            3 => Ok(PkiStatus::Waiting),
            4 => Ok(PkiStatus::RevocationWarning),
            5 => Ok(PkiStatus::RevocationNotification),
            n => Err(Error::UnknownStatus(n)),
        }
    }
}

impl Display for PkiStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PkiStatus::Granted => "granted",
            PkiStatus::GrantedWithMods => "grantedWithMods",
            PkiStatus::Rejection => "rejection",
            PkiStatus::Waiting => "waiting",
            PkiStatus::RevocationWarning => "revocationWarning",
            PkiStatus::RevocationNotification => "revocationNotification",
        };
        write!(f, "{name}")
    }
}

/// Named bits of PKIFailureInfo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureReason {
    BadAlg = 0,
    BadRequest = 2,
    BadDataFormat = 5,
    TimeNotAvailable = 14,
    UnacceptedPolicy = 15,
    UnacceptedExtension = 16,
    AddInfoNotAvailable = 17,
    SystemFailure = 25,
}

impl FailureReason {
    const ALL: [FailureReason; 8] = [
        FailureReason::BadAlg,
        FailureReason::BadRequest,
        FailureReason::BadDataFormat,
        FailureReason::TimeNotAvailable,
        FailureReason::UnacceptedPolicy,
        FailureReason::UnacceptedExtension,
        FailureReason::AddInfoNotAvailable,
        FailureReason::SystemFailure,
    ];
}

/// PKIFailureInfo BIT STRING, kept as its content octets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureInfo {
    // unused-bits octet followed by the bits
    content: Vec<u8>,
}

impl FailureInfo {
    pub fn new(reasons: &[FailureReason]) -> Self {
        let highest = reasons.iter().map(|r| *r as usize).max();
        let Some(highest) = highest else {
            return Self { content: vec![0] };
        };
        let octets = highest / 8 + 1;
        let mut content = vec![0; octets + 1];
        content[0] = (7 - highest % 8) as u8;
        for reason in reasons {
            let bit = *reason as usize;
            content[1 + bit / 8] |= 0x80 >> (bit % 8);
        }
        Self { content }
    }

    fn from_content(content: &[u8]) -> Result<Self> {
        match content {
            [unused] if *unused == 0 => {}
            [unused, .., last] if *unused < 8 && last & ((1u8 << unused) - 1) == 0 => {}
            _ => return Err(Error::InvalidBitString),
        }
        Ok(Self {
            content: content.to_vec(),
        })
    }

    pub fn contains(&self, reason: FailureReason) -> bool {
        let bit = reason as usize;
        let unused = usize::from(self.content[0]);
        let bits = &self.content[1..];
        if bit >= bits.len() * 8 - unused.min(bits.len() * 8) {
            return false;
        }
        bits[bit / 8] & (0x80 >> (bit % 8)) != 0
    }

    pub fn reasons(&self) -> Vec<FailureReason> {
        FailureReason::ALL
            .into_iter()
            .filter(|r| self.contains(*r))
            .collect()
    }
}

impl Serialize for FailureInfo {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.reasons())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusInfo {
    pub status: PkiStatus,
    pub status_string: Vec<String>,
    pub fail_info: Option<FailureInfo>,
}

impl StatusInfo {
    pub fn new(status: PkiStatus) -> Self {
        Self {
            status,
            status_string: Vec::new(),
            fail_info: None,
        }
    }

    /// Parses the content octets of a PKIStatusInfo SEQUENCE.
    pub(crate) fn parse(mut window: Window<'_>) -> Result<Self> {
        let status = element::expect(&mut window, INTEGER, "PKIStatus")?;
        let status = PkiStatus::try_from(element::decode_integer(status.content)?)?;

        let mut status_string = Vec::new();
        if element::peek_is(&window, SEQUENCE) {
            let text = element::read(&mut window)?;
            let mut strings = text.children();
            while !strings.is_exhausted() {
                let s = element::expect(&mut strings, UTF8_STRING, "PKIFreeText")?;
                let s = String::from_utf8(s.content.to_vec()).map_err(|_| Error::InvalidUtf8)?;
                status_string.push(s);
            }
        }

        let fail_info = if element::peek_is(&window, BIT_STRING) {
            let bits = element::read(&mut window)?;
            Some(FailureInfo::from_content(bits.content)?)
        } else {
            None
        };

        if !window.is_exhausted() {
            return Err(Error::UnexpectedElement("PKIStatusInfo"));
        }
        Ok(Self {
            status,
            status_string,
            fail_info,
        })
    }

    /// Builds the value tree of this PKIStatusInfo.
    ///
    /// `status` holds the INTEGER content octets, which the tree borrows.
    pub(crate) fn to_value<'a>(&'a self, status: &'a [u8]) -> Value<'a> {
        let mut members = vec![Value::primitive(&[INTEGER], status)];
        if !self.status_string.is_empty() {
            let strings = self
                .status_string
                .iter()
                .map(|s| Value::primitive(&[UTF8_STRING], s.as_bytes()))
                .collect();
            members.push(Value::constructed(&[SEQUENCE], strings));
        }
        if let Some(fail_info) = &self.fail_info {
            members.push(Value::primitive(&[BIT_STRING], &fail_info.content));
        }
        Value::constructed(&[SEQUENCE], members)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest(input, expected,
        case(vec![0x02, 0x01, 0x00], StatusInfo::new(PkiStatus::Granted)),
        case(vec![0x02, 0x81, 0x01, 0x02], StatusInfo::new(PkiStatus::Rejection)),
        case(vec![0x02, 0x01, 0x02, 0x30, 0x04, 0x0c, 0x02, 0x6e, 0x6f, 0x03, 0x02, 0x07, 0x80], StatusInfo {
            status: PkiStatus::Rejection,
            status_string: vec!["no".to_string()],
            fail_info: Some(FailureInfo::new(&[FailureReason::BadAlg])),
        }),
    )]
    fn test_parse(input: Vec<u8>, expected: StatusInfo) {
        assert_eq!(expected, StatusInfo::parse(Window::new(&input)).unwrap());
    }

    #[rstest(input,
        case(vec![]),
        case(vec![0x02, 0x01, 0x06]),
        case(vec![0x04, 0x01, 0x00]),
        case(vec![0x02, 0x01, 0x00, 0x05, 0x00]),
        case(vec![0x02, 0x01, 0x02, 0x30, 0x03, 0x0c, 0x01, 0xff]),
        case(vec![0x02, 0x01, 0x02, 0x03, 0x01, 0x07]),
    )]
    fn test_parse_rejected(input: Vec<u8>) {
        assert!(StatusInfo::parse(Window::new(&input)).is_err());
    }

    #[test]
    fn test_failure_info() {
        let info = FailureInfo::new(&[FailureReason::BadAlg, FailureReason::SystemFailure]);
        // bit 25 lives in the fourth octet, leaving 6 unused bits
        assert_eq!(info.content, vec![0x06, 0x80, 0x00, 0x00, 0x40]);
        assert!(info.contains(FailureReason::BadAlg));
        assert!(!info.contains(FailureReason::BadRequest));
        assert_eq!(
            info.reasons(),
            vec![FailureReason::BadAlg, FailureReason::SystemFailure]
        );
        assert!(FailureInfo::new(&[]).reasons().is_empty());
    }

    #[test]
    fn test_status_display() {
        assert_eq!("grantedWithMods", PkiStatus::GrantedWithMods.to_string());
        assert!(PkiStatus::GrantedWithMods.is_granted());
        assert!(!PkiStatus::Waiting.is_granted());
    }
}
