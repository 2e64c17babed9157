//! Signature algorithm resolution.
//!
//! CMS `SignerInfo` carries a digest algorithm and a signature algorithm
//! separately. The signature algorithm is either a generic one
//! (`rsaEncryption`), in which case the digest decides the variant, or a
//! combined signature-with-digest identifier.

use std::fmt::Display;

use serde::Serialize;

use crate::ObjectIdentifier;

// Digest algorithms (RFC 3370, RFC 5754)
pub const OID_SHA1: &str = "1.3.14.3.2.26";
pub const OID_SHA256: &str = "2.16.840.1.101.3.4.2.1";
pub const OID_SHA384: &str = "2.16.840.1.101.3.4.2.2";
pub const OID_SHA512: &str = "2.16.840.1.101.3.4.2.3";

// Signature algorithms (RFC 3279, RFC 4055, RFC 5758)
pub const OID_RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.1";
pub const OID_SHA1_WITH_RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.5";
pub const OID_SHA256_WITH_RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.11";
pub const OID_SHA384_WITH_RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.12";
pub const OID_SHA512_WITH_RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.13";
pub const OID_ECDSA_WITH_SHA1: &str = "1.2.840.10045.4.1";
pub const OID_ECDSA_WITH_SHA256: &str = "1.2.840.10045.4.3.2";
pub const OID_ECDSA_WITH_SHA384: &str = "1.2.840.10045.4.3.3";
pub const OID_ECDSA_WITH_SHA512: &str = "1.2.840.10045.4.3.4";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SignatureAlgorithm {
    Sha1WithRsa,
    Sha256WithRsa,
    Sha384WithRsa,
    Sha512WithRsa,
    EcdsaWithSha1,
    EcdsaWithSha256,
    EcdsaWithSha384,
    EcdsaWithSha512,
    Unknown,
}

impl Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SignatureAlgorithm::Sha1WithRsa => "SHA1-RSA",
            SignatureAlgorithm::Sha256WithRsa => "SHA256-RSA",
            SignatureAlgorithm::Sha384WithRsa => "SHA384-RSA",
            SignatureAlgorithm::Sha512WithRsa => "SHA512-RSA",
            SignatureAlgorithm::EcdsaWithSha1 => "ECDSA-SHA1",
            SignatureAlgorithm::EcdsaWithSha256 => "ECDSA-SHA256",
            SignatureAlgorithm::EcdsaWithSha384 => "ECDSA-SHA384",
            SignatureAlgorithm::EcdsaWithSha512 => "ECDSA-SHA512",
            SignatureAlgorithm::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}

/// Resolves a digest and signature algorithm pair.
///
/// Returns [`SignatureAlgorithm::Unknown`] when neither the generic RSA
/// form nor a combined signature-with-digest form matches.
pub fn to_signature_algorithm(
    digest: &ObjectIdentifier,
    signature: &ObjectIdentifier,
) -> SignatureAlgorithm {
    if *signature == OID_RSA_ENCRYPTION {
        return rsa_with_digest(digest);
    }

    const COMBINED: [(&str, SignatureAlgorithm); 8] = [
        (OID_SHA1_WITH_RSA_ENCRYPTION, SignatureAlgorithm::Sha1WithRsa),
        (OID_SHA256_WITH_RSA_ENCRYPTION, SignatureAlgorithm::Sha256WithRsa),
        (OID_SHA384_WITH_RSA_ENCRYPTION, SignatureAlgorithm::Sha384WithRsa),
        (OID_SHA512_WITH_RSA_ENCRYPTION, SignatureAlgorithm::Sha512WithRsa),
        (OID_ECDSA_WITH_SHA1, SignatureAlgorithm::EcdsaWithSha1),
        (OID_ECDSA_WITH_SHA256, SignatureAlgorithm::EcdsaWithSha256),
        (OID_ECDSA_WITH_SHA384, SignatureAlgorithm::EcdsaWithSha384),
        (OID_ECDSA_WITH_SHA512, SignatureAlgorithm::EcdsaWithSha512),
    ];
    COMBINED
        .iter()
        .find(|(oid, _)| *signature == *oid)
        .map_or(SignatureAlgorithm::Unknown, |(_, alg)| *alg)
}

fn rsa_with_digest(digest: &ObjectIdentifier) -> SignatureAlgorithm {
    const DIGESTS: [(&str, SignatureAlgorithm); 4] = [
        (OID_SHA1, SignatureAlgorithm::Sha1WithRsa),
        (OID_SHA256, SignatureAlgorithm::Sha256WithRsa),
        (OID_SHA384, SignatureAlgorithm::Sha384WithRsa),
        (OID_SHA512, SignatureAlgorithm::Sha512WithRsa),
    ];
    DIGESTS
        .iter()
        .find(|(oid, _)| *digest == *oid)
        .map_or(SignatureAlgorithm::Unknown, |(_, alg)| *alg)
}
