//! vCard parsing (RFC 2425 / RFC 2426).
//!
//! ## Usage
//!
//! ```rust
//! use vcard3_rfc::rfc::vcard::parse;
//!
//! let input = "\
//! BEGIN:VCARD\r\n\
//! VERSION:3.0\r\n\
//! FN:John Doe\r\n\
//! EMAIL;TYPE=internet:john@example.com\r\n\
//! END:VCARD\r\n";
//!
//! let cards = parse::parse(input).unwrap();
//! assert_eq!(cards[0].formatted_name().unwrap().value, "John Doe");
//! ```
//!
//! ## Features
//!
//! - Streams from any `std::io::Read` through a rewindable ring buffer
//! - Unfolds lines transparently, even inside multi-byte characters
//! - Parses property groups (item1.TEL)
//! - Parses structured values (N, ADR, ORG, GEO)
//! - Reports errors with source name, line and column

mod error;
mod grammar;
mod params;
mod parser;
mod properties;
mod reader;
mod values;


pub use error::{ParseError, ParseErrorKind};
pub use parser::{Parser, parse, parse_path, parse_reader, parse_single};
pub use reader::VCardReader;
pub use values::{parse_date, parse_date_time, parse_geo, parse_temporal, unescape_text};
