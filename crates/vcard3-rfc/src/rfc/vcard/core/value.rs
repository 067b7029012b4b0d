//! Property payloads for the text, typed, and binary property families.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use super::parameter::{ExtensionParam, types};
use crate::error::{VCardError, VCardResult};
use crate::rfc::vcard::build::escape_text;
use crate::rfc::vcard::parse::unescape_text;

/// A single text value (FN, NAME, MAILER, TITLE, ROLE, NOTE, PRODID,
/// SORT-STRING).
///
/// `value` holds the wire form: backslash escapes are kept exactly as they
/// were read and are written back unchanged. Use [`Text::unescaped`] for the
/// decoded text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Text {
    pub value: String,
    pub language: Option<String>,
    /// `VALUE=ptext` was declared.
    pub is_plain_text: bool,
    pub x_params: Vec<ExtensionParam>,
}

impl Text {
    /// Creates a text value from its (already escaped) wire form.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// Creates a text value from plain text, escaping it for the wire.
    #[must_use]
    pub fn from_unescaped(text: &str) -> Self {
        Self::new(escape_text(text))
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Returns the value with backslash escapes resolved.
    #[must_use]
    pub fn unescaped(&self) -> String {
        unescape_text(&self.value)
    }
}

/// A list of text values (NICKNAME, CATEGORIES, ORG).
///
/// Items are stored unescaped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextList {
    pub values: Vec<String>,
    pub language: Option<String>,
    pub is_plain_text: bool,
    pub x_params: Vec<ExtensionParam>,
}

impl TextList {
    #[must_use]
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// A value with no typed parameters of its own (UID, URL, CLASS).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawValue {
    pub value: String,
    pub x_params: Vec<ExtensionParam>,
}

impl RawValue {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            x_params: Vec::new(),
        }
    }
}

/// Formatted delivery label (LABEL).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Label {
    /// Wire form, escapes kept as read.
    pub value: String,
    pub types: Vec<String>,
    pub language: Option<String>,
    pub is_plain_text: bool,
    pub x_params: Vec<ExtensionParam>,
}

impl Label {
    /// Creates a label with the default `intl,postal,parcel,work` types.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            types: types::defaults(types::LABEL_DEFAULT_TYPES),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn has_type(&self, type_value: &str) -> bool {
        has_type(&self.types, type_value)
    }
}

/// Telephone number (TEL).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tel {
    pub value: String,
    pub types: Vec<String>,
    pub x_params: Vec<ExtensionParam>,
}

impl Tel {
    /// Creates a telephone number with the default `voice` type.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            types: types::defaults(types::TEL_DEFAULT_TYPES),
            x_params: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Returns whether this number has the TYPE value (case-insensitive).
    #[must_use]
    pub fn has_type(&self, type_value: &str) -> bool {
        has_type(&self.types, type_value)
    }
}

/// Email address (EMAIL).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Email {
    pub value: String,
    pub types: Vec<String>,
    pub x_params: Vec<ExtensionParam>,
}

impl Email {
    /// Creates an email address with the default `internet` type.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            types: types::defaults(types::EMAIL_DEFAULT_TYPES),
            x_params: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn has_type(&self, type_value: &str) -> bool {
        has_type(&self.types, type_value)
    }
}

/// Binary-or-reference value (PHOTO, LOGO, SOUND, KEY).
///
/// Inline values are kept base64-encoded exactly as read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Binary {
    pub value: String,
    /// `ENCODING=b` was declared; `value` is base64.
    pub is_inline: bool,
    /// Declared `VALUE` ("uri" or "binary"), verbatim.
    pub value_type: Option<String>,
    /// Declared `TYPE`: the media type, or the key type for KEY.
    pub media_type: Option<String>,
    pub x_params: Vec<ExtensionParam>,
}

impl Binary {
    /// Creates a reference to external data.
    #[must_use]
    pub fn uri(uri: impl Into<String>) -> Self {
        Self {
            value: uri.into(),
            value_type: Some("uri".to_string()),
            ..Self::default()
        }
    }

    /// Creates an inline value by base64-encoding `bytes`.
    #[must_use]
    pub fn from_bytes(bytes: &[u8], media_type: Option<&str>) -> Self {
        Self {
            value: STANDARD.encode(bytes),
            is_inline: true,
            media_type: media_type.map(ToString::to_string),
            ..Self::default()
        }
    }

    /// Decodes an inline value.
    ///
    /// ## Errors
    /// Returns `VCardError::InvalidValue` for a reference value and
    /// `VCardError::Decode` if the base64 text is malformed.
    pub fn decode(&self) -> VCardResult<Vec<u8>> {
        if !self.is_inline {
            return Err(VCardError::InvalidValue(
                "value is a reference, not inline data".to_string(),
            ));
        }

        let compact: String = self
            .value
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        Ok(STANDARD.decode(compact)?)
    }
}

/// Agent (AGENT): an embedded card as escaped text, or a URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    pub value: String,
    /// `false` when `VALUE=uri` was declared.
    pub is_inline: bool,
    pub x_params: Vec<ExtensionParam>,
}

impl Agent {
    #[must_use]
    pub fn inline(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_inline: true,
            x_params: Vec::new(),
        }
    }

    #[must_use]
    pub fn uri(uri: impl Into<String>) -> Self {
        Self {
            value: uri.into(),
            is_inline: false,
            x_params: Vec::new(),
        }
    }
}

/// Directory source (SOURCE).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Source {
    pub value: String,
    /// `CONTEXT=word`, when declared.
    pub context: Option<String>,
    /// `VALUE=uri`, when declared.
    pub value_type: Option<String>,
    pub x_params: Vec<ExtensionParam>,
}

impl Source {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }
}

/// Time zone (TZ): a UTC offset by default, or text with `VALUE=text`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimeZone {
    pub value: String,
    pub value_type: Option<String>,
    pub x_params: Vec<ExtensionParam>,
}

impl TimeZone {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }
}

/// Private `X-` property.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extension {
    /// Uppercase property name, always starting with `X-`.
    pub name: String,
    /// Wire form, as read.
    pub value: String,
    pub language: Option<String>,
    pub is_plain_text: bool,
    /// A declared `VALUE` other than `ptext`.
    pub value_type: Option<String>,
    pub x_params: Vec<ExtensionParam>,
}

impl Extension {
    /// Creates an extension property.
    ///
    /// ## Errors
    /// Returns `VCardError::InvalidValue` if `name` does not start with `X-`.
    pub fn new(name: &str, value: impl Into<String>) -> VCardResult<Self> {
        if !is_extension_name(name) {
            return Err(VCardError::InvalidValue(format!(
                "extension property names must start with X-: {name}"
            )));
        }

        Ok(Self {
            name: name.to_ascii_uppercase(),
            value: value.into(),
            ..Self::default()
        })
    }
}

/// Returns whether `name` names a private extension.
#[must_use]
pub fn is_extension_name(name: &str) -> bool {
    name.len() > 2
        && name.is_char_boundary(2)
        && name[..2].eq_ignore_ascii_case("x-")
        && name[2..].chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn has_type(types: &[String], type_value: &str) -> bool {
    types.iter().any(|t| t.eq_ignore_ascii_case(type_value))
}
