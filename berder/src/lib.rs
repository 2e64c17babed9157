//! # berder
//!
//! Core traits for the conversions performed by the berder crates.
//!
//! ## Overview
//!
//! The conversion pattern flows like this:
//! ```text
//! BER bytes → Value tree → DER bytes
//!                 ↑
//!        TimeStampResp, ObjectIdentifier, ...
//! ```
//!
//! Each step uses the `Decoder` trait to convert from one type to the next,
//! and the `Encoder` trait to convert in the reverse direction.
//!
//! ## Type Safety
//!
//! The traits use marker traits (`DecodableFrom` and `EncodableTo`) to ensure
//! type safety at compile time. Only conversions that a crate explicitly
//! registers are available, so an accidental `decode()` into an unrelated
//! type is a compile error rather than a runtime failure.
//!
//! ## Example
//!
//! The concrete implementations live in the `der` crate:
//!
//! ```ignore
//! use berder::decoder::Decoder;
//! use berder::encoder::Encoder;
//! use der::Der;
//!
//! // BER with a non-minimal long-form length.
//! let ber = vec![0x04, 0x81, 0x01, 0xff];
//! let der: Der = ber.decode().unwrap();
//!
//! let bytes: Vec<u8> = der.encode().unwrap();
//! assert_eq!(bytes, vec![0x04, 0x01, 0xff]);
//! ```

#![forbid(unsafe_code)]

pub mod decoder;
pub mod encoder;
