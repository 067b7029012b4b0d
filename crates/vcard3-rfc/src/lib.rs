//! vCard 3.0 (RFC 2425 / RFC 2426) parsing and serialization.

pub mod error;
pub mod rfc;

pub use error::{VCardError, VCardResult};
