//! vCard parameter types (RFC 2425 §5.8.2, RFC 2426 §3).

/// A parameter as read from a content line.
///
/// Parameters only live while a content line is being parsed; whatever the
/// property grammar does not consume is kept as an [`ExtensionParam`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VCardParameter {
    /// Parameter name (normalized to uppercase).
    pub name: String,
    /// Parameter values, never empty when produced by the parser.
    pub values: Vec<String>,
}

impl VCardParameter {
    /// Creates a new parameter with a single value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values: vec![value.into()],
        }
    }

    /// Creates a parameter with multiple values.
    #[must_use]
    pub fn multi(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values,
        }
    }

    /// Returns the first value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// Returns all values joined by commas.
    #[must_use]
    pub fn joined(&self) -> String {
        self.values.join(",")
    }
}

/// A parameter retained on a property because no typed field consumed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionParam {
    /// Parameter name (uppercase).
    pub name: String,
    /// Parameter values joined by commas.
    pub value: String,
}

impl ExtensionParam {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            value: value.into(),
        }
    }
}

impl From<VCardParameter> for ExtensionParam {
    fn from(param: VCardParameter) -> Self {
        Self {
            value: param.joined(),
            name: param.name,
        }
    }
}

/// Parameter names with a fixed meaning in vCard 3.0.
pub mod names {
    pub const TYPE: &str = "TYPE";
    pub const VALUE: &str = "VALUE";
    pub const ENCODING: &str = "ENCODING";
    pub const LANGUAGE: &str = "LANGUAGE";
    pub const CONTEXT: &str = "CONTEXT";
}

/// Parameter values used both as defaults and when matching parameters.
pub mod values {
    pub const PTEXT: &str = "ptext";
    pub const URI: &str = "uri";
    pub const WORD: &str = "word";
    pub const TEXT: &str = "text";
    pub const DATE: &str = "date";
    pub const DATE_TIME: &str = "date-time";
    pub const BINARY_ENCODING: &str = "b";
}

/// TYPE values with defaults defined by RFC 2426.
pub mod types {
    pub const INTL: &str = "INTL";
    pub const DOM: &str = "DOM";
    pub const POSTAL: &str = "POSTAL";
    pub const PARCEL: &str = "PARCEL";
    pub const HOME: &str = "HOME";
    pub const WORK: &str = "WORK";
    pub const PREF: &str = "PREF";

    pub const VOICE: &str = "VOICE";
    pub const FAX: &str = "FAX";
    pub const MSG: &str = "MSG";
    pub const CELL: &str = "CELL";
    pub const PAGER: &str = "PAGER";
    pub const BBS: &str = "BBS";
    pub const MODEM: &str = "MODEM";
    pub const CAR: &str = "CAR";
    pub const ISDN: &str = "ISDN";
    pub const VIDEO: &str = "VIDEO";
    pub const PCS: &str = "PCS";

    pub const INTERNET: &str = "INTERNET";
    pub const X400: &str = "X400";

    /// ADR default: `TYPE=intl,postal,parcel,work`.
    pub const ADR_DEFAULT_TYPES: &[&str] = &[INTL, POSTAL, PARCEL, WORK];
    /// LABEL shares the ADR default.
    pub const LABEL_DEFAULT_TYPES: &[&str] = ADR_DEFAULT_TYPES;
    pub const TEL_DEFAULT_TYPES: &[&str] = &[VOICE];
    pub const EMAIL_DEFAULT_TYPES: &[&str] = &[INTERNET];

    /// Owned copy of a default TYPE table.
    #[must_use]
    pub fn defaults(table: &[&str]) -> Vec<String> {
        table.iter().map(ToString::to_string).collect()
    }
}
