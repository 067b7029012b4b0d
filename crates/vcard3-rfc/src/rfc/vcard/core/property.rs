//! vCard property types (RFC 2426 §3).

use std::mem::discriminant;

use super::datetime::Temporal;
use super::structured::{Address, Geo, StructuredName};
use super::value::{
    Agent, Binary, Email, Extension, Label, RawValue, Source, Tel, Text, TextList, TimeZone,
};

/// One content line of a card.
#[derive(Debug, Clone, PartialEq)]
pub struct VCardProperty {
    /// Identity within the owning card. Never serialized.
    pub content_id: u32,
    /// Optional property group (e.g., "item1" in "item1.TEL").
    pub group: Option<String>,
    /// Typed payload; also determines the property name.
    pub value: PropertyValue,
}

impl VCardProperty {
    /// Creates an ungrouped property.
    #[must_use]
    pub fn new(content_id: u32, value: PropertyValue) -> Self {
        Self {
            content_id,
            group: None,
            value,
        }
    }

    /// Creates a grouped property.
    #[must_use]
    pub fn grouped(content_id: u32, group: impl Into<String>, value: PropertyValue) -> Self {
        Self {
            content_id,
            group: Some(group.into()),
            value,
        }
    }

    /// Returns the canonical uppercase property name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.value.name()
    }
}

/// The payload of a property, one variant per content type.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Name(Text),
    Profile,
    Source(Source),
    FormattedName(Text),
    N(StructuredName),
    Nickname(TextList),
    Photo(Binary),
    Birthday(Temporal),
    Address(Address),
    Label(Label),
    Tel(Tel),
    Email(Email),
    Mailer(Text),
    TimeZone(TimeZone),
    Geo(Geo),
    Title(Text),
    Role(Text),
    Logo(Binary),
    Agent(Agent),
    Org(TextList),
    Categories(TextList),
    Note(Text),
    ProdId(Text),
    Revision(Temporal),
    SortString(Text),
    Sound(Binary),
    Uid(RawValue),
    Url(RawValue),
    /// Always "3.0".
    Version,
    Class(RawValue),
    Key(Binary),
    Extension(Extension),
}

impl PropertyValue {
    /// Returns the canonical uppercase property name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Name(_) => names::NAME,
            Self::Profile => names::PROFILE,
            Self::Source(_) => names::SOURCE,
            Self::FormattedName(_) => names::FN,
            Self::N(_) => names::N,
            Self::Nickname(_) => names::NICKNAME,
            Self::Photo(_) => names::PHOTO,
            Self::Birthday(_) => names::BDAY,
            Self::Address(_) => names::ADR,
            Self::Label(_) => names::LABEL,
            Self::Tel(_) => names::TEL,
            Self::Email(_) => names::EMAIL,
            Self::Mailer(_) => names::MAILER,
            Self::TimeZone(_) => names::TZ,
            Self::Geo(_) => names::GEO,
            Self::Title(_) => names::TITLE,
            Self::Role(_) => names::ROLE,
            Self::Logo(_) => names::LOGO,
            Self::Agent(_) => names::AGENT,
            Self::Org(_) => names::ORG,
            Self::Categories(_) => names::CATEGORIES,
            Self::Note(_) => names::NOTE,
            Self::ProdId(_) => names::PRODID,
            Self::Revision(_) => names::REV,
            Self::SortString(_) => names::SORT_STRING,
            Self::Sound(_) => names::SOUND,
            Self::Uid(_) => names::UID,
            Self::Url(_) => names::URL,
            Self::Version => names::VERSION,
            Self::Class(_) => names::CLASS,
            Self::Key(_) => names::KEY,
            Self::Extension(ext) => &ext.name,
        }
    }

    /// Returns whether `other` is the same content type, which is what
    /// "set" replacement keys on. Extensions also compare by name.
    #[must_use]
    pub fn same_type(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Extension(a), Self::Extension(b)) => a.name == b.name,
            _ => discriminant(self) == discriminant(other),
        }
    }
}

/// Property names as constants.
pub mod names {
    pub const NAME: &str = "NAME";
    pub const PROFILE: &str = "PROFILE";
    pub const SOURCE: &str = "SOURCE";
    pub const FN: &str = "FN";
    pub const N: &str = "N";
    pub const NICKNAME: &str = "NICKNAME";
    pub const PHOTO: &str = "PHOTO";
    pub const BDAY: &str = "BDAY";
    pub const ADR: &str = "ADR";
    pub const LABEL: &str = "LABEL";
    pub const TEL: &str = "TEL";
    pub const EMAIL: &str = "EMAIL";
    pub const MAILER: &str = "MAILER";
    pub const TZ: &str = "TZ";
    pub const GEO: &str = "GEO";
    pub const TITLE: &str = "TITLE";
    pub const ROLE: &str = "ROLE";
    pub const LOGO: &str = "LOGO";
    pub const AGENT: &str = "AGENT";
    pub const ORG: &str = "ORG";
    pub const CATEGORIES: &str = "CATEGORIES";
    pub const NOTE: &str = "NOTE";
    pub const PRODID: &str = "PRODID";
    pub const REV: &str = "REV";
    pub const SORT_STRING: &str = "SORT-STRING";
    pub const SOUND: &str = "SOUND";
    pub const UID: &str = "UID";
    pub const URL: &str = "URL";
    pub const VERSION: &str = "VERSION";
    pub const CLASS: &str = "CLASS";
    pub const KEY: &str = "KEY";

    /// Closes a card; never stored as a property.
    pub const END: &str = "END";
}
