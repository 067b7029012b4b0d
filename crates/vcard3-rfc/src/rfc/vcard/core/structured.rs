//! Structured vCard types (RFC 2426).
//!
//! These types represent the N, ADR, and GEO values, whose components are
//! separated by semicolons on the wire.

use super::parameter::{ExtensionParam, types};

/// Structured name (N property, RFC 2426 §3.1.2).
///
/// Components appear on the wire in this fixed order; each is a
/// comma-separated list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredName {
    /// Family names (surnames).
    pub family: Vec<String>,
    /// Given names (first names).
    pub given: Vec<String>,
    /// Additional names (middle names).
    pub additional: Vec<String>,
    /// Honorific prefixes (e.g., "Mr.", "Dr.").
    pub prefixes: Vec<String>,
    /// Honorific suffixes (e.g., "Jr.", "M.D.").
    pub suffixes: Vec<String>,
    pub language: Option<String>,
    pub is_plain_text: bool,
    pub x_params: Vec<ExtensionParam>,
}

impl StructuredName {
    /// Creates an empty structured name.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a structured name with family and given names.
    #[must_use]
    pub fn simple(family: impl Into<String>, given: impl Into<String>) -> Self {
        Self {
            family: vec![family.into()],
            given: vec![given.into()],
            ..Self::default()
        }
    }

    /// Returns whether the name is empty (all components are empty).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components().iter().all(|c| c.is_empty())
    }

    /// Returns the five components in wire order.
    #[must_use]
    pub fn components(&self) -> [&Vec<String>; 5] {
        [
            &self.family,
            &self.given,
            &self.additional,
            &self.prefixes,
            &self.suffixes,
        ]
    }

    /// Formats as a display name (prefixes, given, additional, family, suffixes).
    #[must_use]
    pub fn display_name(&self) -> String {
        [
            &self.prefixes,
            &self.given,
            &self.additional,
            &self.family,
            &self.suffixes,
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .map(|part| part.join(" "))
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// Delivery address (ADR property, RFC 2426 §3.2.1).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    /// Post office box.
    pub po_box: String,
    /// Extended address (e.g., apartment or suite number).
    pub extended: String,
    /// Street address.
    pub street: String,
    /// Locality (city).
    pub locality: String,
    /// Region (state or province).
    pub region: String,
    /// Postal code.
    pub postal_code: String,
    /// Country name.
    pub country: String,
    /// TYPE values, exactly as written when parsed.
    pub types: Vec<String>,
    pub language: Option<String>,
    pub is_plain_text: bool,
    pub x_params: Vec<ExtensionParam>,
}

impl Address {
    /// Creates an empty address with the default
    /// `intl,postal,parcel,work` types.
    #[must_use]
    pub fn new() -> Self {
        Self {
            types: types::defaults(types::ADR_DEFAULT_TYPES),
            ..Self::default()
        }
    }

    /// Returns the seven components in wire order.
    #[must_use]
    pub fn components(&self) -> [&str; 7] {
        [
            self.po_box.as_str(),
            self.extended.as_str(),
            self.street.as_str(),
            self.locality.as_str(),
            self.region.as_str(),
            self.postal_code.as_str(),
            self.country.as_str(),
        ]
    }

    /// Returns whether the address has the TYPE value (case-insensitive).
    #[must_use]
    pub fn has_type(&self, type_value: &str) -> bool {
        self.types.iter().any(|t| t.eq_ignore_ascii_case(type_value))
    }

    /// Formats as a single-line address.
    #[must_use]
    pub fn one_line(&self) -> String {
        [
            &self.street,
            &self.locality,
            &self.region,
            &self.postal_code,
            &self.country,
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .map(|part| part.as_str())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// Geographic position (GEO property, RFC 2426 §3.4.2).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geo {
    pub latitude: f64,
    pub longitude: f64,
    pub x_params: Vec<ExtensionParam>,
}

impl Geo {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            x_params: Vec::new(),
        }
    }
}
