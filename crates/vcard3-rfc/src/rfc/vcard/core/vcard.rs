//! vCard wrapper type.

use super::datetime::Temporal;
use super::property::{PropertyValue, VCardProperty, names};
use super::structured::{Address, Geo, StructuredName};
use super::value::{Email, Extension, Tel, Text, TextList};

/// A complete vCard: an ordered list of properties.
///
/// Every property carries a `content_id` unique within the card. Ids come
/// from a private counter and are never reused, even after removal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VCard {
    properties: Vec<VCardProperty>,
    next_content_id: u32,
}

impl VCard {
    /// Creates an empty vCard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the next unused content id.
    pub fn take_content_id(&mut self) -> u32 {
        let id = self.next_content_id;
        self.next_content_id += 1;
        id
    }

    /// Appends a property with a fresh content id and returns that id.
    pub fn add(&mut self, value: PropertyValue) -> u32 {
        let id = self.take_content_id();
        self.properties.push(VCardProperty::new(id, value));
        id
    }

    /// Appends a grouped property with a fresh content id.
    pub fn add_grouped(&mut self, group: impl Into<String>, value: PropertyValue) -> u32 {
        let id = self.take_content_id();
        self.properties.push(VCardProperty::grouped(id, group, value));
        id
    }

    /// Replaces the first property of the same type in place, keeping its
    /// content id and group; appends when there is none. Returns the id.
    pub fn set(&mut self, value: PropertyValue) -> u32 {
        if let Some(existing) = self
            .properties
            .iter_mut()
            .find(|p| p.value.same_type(&value))
        {
            existing.value = value;
            return existing.content_id;
        }
        self.add(value)
    }

    /// Appends an already-built property, taking a fresh id for it.
    pub(crate) fn push(&mut self, group: Option<String>, value: PropertyValue) -> u32 {
        let id = self.take_content_id();
        self.properties.push(VCardProperty {
            content_id: id,
            group,
            value,
        });
        id
    }

    /// Removes the property with `content_id`.
    pub fn remove(&mut self, content_id: u32) -> Option<VCardProperty> {
        let index = self
            .properties
            .iter()
            .position(|p| p.content_id == content_id)?;
        Some(self.properties.remove(index))
    }

    /// Returns the property with `content_id`.
    #[must_use]
    pub fn get(&self, content_id: u32) -> Option<&VCardProperty> {
        self.properties.iter().find(|p| p.content_id == content_id)
    }

    /// All properties in order.
    #[must_use]
    pub fn properties(&self) -> &[VCardProperty] {
        &self.properties
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Returns all properties with the given name.
    #[must_use]
    pub fn get_properties(&self, name: &str) -> Vec<&VCardProperty> {
        self.properties
            .iter()
            .filter(|p| p.name().eq_ignore_ascii_case(name))
            .collect()
    }

    /// Returns the first property with the given name.
    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<&VCardProperty> {
        self.properties
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }

    /// Returns the VERSION property, or a synthesized 3.0 one whose id is
    /// one past the property count when the card has none.
    #[must_use]
    pub fn version(&self) -> VCardProperty {
        self.get_property(names::VERSION).cloned().unwrap_or_else(|| {
            let id = u32::try_from(self.properties.len())
                .ok()
                .and_then(|len| len.checked_add(1))
                .unwrap_or(u32::MAX);
            VCardProperty::new(id, PropertyValue::Version)
        })
    }

    /// Returns the version string; always "3.0".
    #[must_use]
    pub fn version_str(&self) -> &'static str {
        vcard3_core::constants::VCARD_VERSION
    }

    /// Returns the FN (formatted name) value.
    #[must_use]
    pub fn formatted_name(&self) -> Option<&Text> {
        self.properties.iter().find_map(|p| match &p.value {
            PropertyValue::FormattedName(t) => Some(t),
            _ => None,
        })
    }

    /// Returns the N (structured name) value.
    #[must_use]
    pub fn name(&self) -> Option<&StructuredName> {
        self.properties.iter().find_map(|p| match &p.value {
            PropertyValue::N(n) => Some(n),
            _ => None,
        })
    }

    /// Returns every NICKNAME list.
    #[must_use]
    pub fn nicknames(&self) -> Vec<&TextList> {
        self.properties
            .iter()
            .filter_map(|p| match &p.value {
                PropertyValue::Nickname(list) => Some(list),
                _ => None,
            })
            .collect()
    }

    /// Returns every ORG value (organization name followed by units).
    #[must_use]
    pub fn organizations(&self) -> Vec<&TextList> {
        self.properties
            .iter()
            .filter_map(|p| match &p.value {
                PropertyValue::Org(list) => Some(list),
                _ => None,
            })
            .collect()
    }

    /// Returns every CATEGORIES list.
    #[must_use]
    pub fn categories(&self) -> Vec<&TextList> {
        self.properties
            .iter()
            .filter_map(|p| match &p.value {
                PropertyValue::Categories(list) => Some(list),
                _ => None,
            })
            .collect()
    }

    /// Returns all EMAIL values.
    #[must_use]
    pub fn emails(&self) -> Vec<&Email> {
        self.properties
            .iter()
            .filter_map(|p| match &p.value {
                PropertyValue::Email(e) => Some(e),
                _ => None,
            })
            .collect()
    }

    /// Returns all TEL values.
    #[must_use]
    pub fn telephones(&self) -> Vec<&Tel> {
        self.properties
            .iter()
            .filter_map(|p| match &p.value {
                PropertyValue::Tel(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    /// Returns all ADR (address) values.
    #[must_use]
    pub fn addresses(&self) -> Vec<&Address> {
        self.properties
            .iter()
            .filter_map(|p| match &p.value {
                PropertyValue::Address(a) => Some(a),
                _ => None,
            })
            .collect()
    }

    /// Returns the BDAY value.
    #[must_use]
    pub fn birthday(&self) -> Option<&Temporal> {
        self.properties.iter().find_map(|p| match &p.value {
            PropertyValue::Birthday(t) => Some(t),
            _ => None,
        })
    }

    /// Returns the REV value.
    #[must_use]
    pub fn revision(&self) -> Option<&Temporal> {
        self.properties.iter().find_map(|p| match &p.value {
            PropertyValue::Revision(t) => Some(t),
            _ => None,
        })
    }

    /// Returns the GEO value.
    #[must_use]
    pub fn geo(&self) -> Option<&Geo> {
        self.properties.iter().find_map(|p| match &p.value {
            PropertyValue::Geo(g) => Some(g),
            _ => None,
        })
    }

    /// Returns the UID value.
    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.properties.iter().find_map(|p| match &p.value {
            PropertyValue::Uid(v) => Some(v.value.as_str()),
            _ => None,
        })
    }

    /// Returns the NOTE values.
    #[must_use]
    pub fn notes(&self) -> Vec<&Text> {
        self.properties
            .iter()
            .filter_map(|p| match &p.value {
                PropertyValue::Note(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    /// Returns the extension properties named `name`.
    #[must_use]
    pub fn extensions(&self, name: &str) -> Vec<&Extension> {
        self.properties
            .iter()
            .filter_map(|p| match &p.value {
                PropertyValue::Extension(ext) if ext.name.eq_ignore_ascii_case(name) => Some(ext),
                _ => None,
            })
            .collect()
    }
}
