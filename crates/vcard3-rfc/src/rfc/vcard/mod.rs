//! vCard 3.0 implementation (RFC 2425 / RFC 2426).
//!
//! ## Usage
//!
//! ### Parsing
//!
//! ```rust
//! use vcard3_rfc::rfc::vcard::parse;
//!
//! let input = "\
//! BEGIN:VCARD\r\n\
//! VERSION:3.0\r\n\
//! FN:John Doe\r\n\
//! TEL;TYPE=WORK;TYPE=CELL:+1-555-555-5555\r\n\
//! END:VCARD\r\n";
//!
//! let cards = parse(input).unwrap();
//! assert_eq!(cards[0].telephones()[0].types, vec!["WORK", "CELL"]);
//! ```
//!
//! ### Serializing
//!
//! ```rust
//! use vcard3_rfc::rfc::vcard::{PropertyValue, Tel, Text, VCard, serialize};
//!
//! let mut card = VCard::new();
//! card.add(PropertyValue::FormattedName(Text::new("Jane Doe")));
//! card.add(PropertyValue::Tel(Tel::new("+1-555-555-0100")));
//!
//! let output = serialize(&[card]);
//! assert!(output.contains("TEL;TYPE=VOICE:+1-555-555-0100\r\n"));
//! ```
//!
//! ## Round-Trip Fidelity
//!
//! Simple text values keep their escapes exactly as read, and properties are
//! written in the order they were parsed or added. Output of the serializer
//! parses back to an equal card.
//!
//! ## Submodules
//!
//! - [`core`] - Data model (`VCard`, `VCardProperty`, `PropertyValue`, etc.)
//! - [`parse`] - Streaming reader, grammar and parse entry points
//! - [`build`] - Serialization functions

pub mod build;
pub mod core;
pub mod parse;

#[cfg(test)]
mod tests;

pub use build::{serialize, serialize_single};
pub use core::{
    Address, Binary, DateOrDateTime, Email, Extension, PropertyValue, StructuredName, Tel,
    Temporal, Text, TextList, VCard, VCardProperty,
};
pub use parse::{ParseError, ParseErrorKind, Parser, parse, parse_path, parse_reader, parse_single};
