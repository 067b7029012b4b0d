use thiserror::Error;

use crate::rfc::vcard::parse::ParseError;

/// Errors raised while reading, parsing, or building vCards.
#[derive(Error, Debug)]
pub enum VCardError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Base64 decode error: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error(transparent)]
    CoreError(#[from] vcard3_core::error::CoreError),
}

pub type VCardResult<T> = std::result::Result<T, VCardError>;
