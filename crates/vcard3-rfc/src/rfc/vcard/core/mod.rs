//! vCard core types (RFC 2426).
//!
//! - [`VCard`] - A card: ordered properties with stable content ids
//! - [`VCardProperty`] - One content line: group plus typed value
//! - [`PropertyValue`] - Closed set of property variants
//! - [`VCardParameter`] - Parameters as read, before the property consumes them
//!
//! ## Payload Types
//!
//! - [`Text`], [`TextList`], [`RawValue`] - text families
//! - [`StructuredName`], [`Address`], [`Geo`] - semicolon-structured values
//! - [`Tel`], [`Email`], [`Label`] - values with TYPE lists
//! - [`Binary`] - PHOTO, LOGO, SOUND and KEY
//! - [`Temporal`] - BDAY and REV
//!
//! ## Example
//!
//! ```rust
//! use vcard3_rfc::rfc::vcard::core::{PropertyValue, Tel, Text, VCard};
//!
//! let mut card = VCard::new();
//! card.add(PropertyValue::FormattedName(Text::new("John Doe")));
//! card.add(PropertyValue::Tel(Tel::new("+1-555-0100")));
//!
//! assert!(card.telephones()[0].has_type("voice"));
//! assert_eq!(card.version_str(), "3.0");
//! ```

mod datetime;
mod parameter;
mod property;
mod structured;
mod value;
mod vcard;

pub use datetime::{DateOrDateTime, Temporal, TemporalType};
pub use parameter::{ExtensionParam, VCardParameter, types, values};
pub use property::{PropertyValue, VCardProperty, names};
pub use structured::{Address, Geo, StructuredName};
pub use value::{
    Agent, Binary, Email, Extension, Label, RawValue, Source, Tel, Text, TextList, TimeZone,
    is_extension_name,
};
pub use vcard::VCard;

/// Parameter names (`TYPE`, `VALUE`, ...).
pub mod param_names {
    pub use super::parameter::names::*;
}
