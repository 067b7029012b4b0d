/// Application name, used to derive the config file name and env prefix.
pub const APP_NAME: &str = "vcard3";

/// Optional TOML file read by [`crate::config::Settings::load`].
pub const CONFIG_FILE: &str = const_str::concat!(APP_NAME, ".toml");

/// Prefix for environment overrides (`VCARD3__PARSER__BUFFER_CAPACITY`).
pub const ENV_PREFIX: &str = "VCARD3";

/// The only vCard version this engine reads and writes.
pub const VCARD_VERSION: &str = "3.0";

/// Object token used on the BEGIN/END lines.
pub const VCARD_TOKEN: &str = "vCard";

pub const BEGIN_LINE: &str = const_str::concat!("BEGIN:", VCARD_TOKEN, "\r\n");
pub const VERSION_LINE: &str = const_str::concat!("VERSION:", VCARD_VERSION, "\r\n");
pub const END_LINE: &str = const_str::concat!("END:", VCARD_TOKEN, "\r\n");

/// Soft limit for emitted content lines, counted in characters.
pub const MAX_LINE_CHARS: usize = 75;

/// Initial ring buffer size for the stream reader.
pub const DEFAULT_BUFFER_CAPACITY: usize = 4096;

/// Name reported in parse errors when the caller gives none.
pub const DEFAULT_SOURCE_NAME: &str = "input";
