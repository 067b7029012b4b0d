//! vCard serialization (RFC 2426).
//!
//! ## Usage
//!
//! ```rust
//! use vcard3_rfc::rfc::vcard::build::serialize;
//! use vcard3_rfc::rfc::vcard::core::{PropertyValue, Text, VCard};
//!
//! let mut card = VCard::new();
//! card.add(PropertyValue::FormattedName(Text::new("John Doe")));
//!
//! let output = serialize(&[card]);
//! assert_eq!(output, "BEGIN:vCard\r\nVERSION:3.0\r\nFN:John Doe\r\nEND:vCard\r\n");
//! ```
//!
//! ## Features
//!
//! - Line folding at 75 characters
//! - Text escaping for list and structured values
//! - Simple text values written exactly as stored
//! - Parameter values quoted when they contain `:` or `;`

mod escape;
mod fold;
mod serializer;

pub use escape::{escape_param_value, escape_text};
pub use fold::fold_line;
pub use serializer::{serialize, serialize_single};
