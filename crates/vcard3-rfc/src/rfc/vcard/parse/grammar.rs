//! Grammar primitives shared by every content line (RFC 2425 §5.8.2).
//!
//! All primitives operate at the reader's current position. Lookahead that
//! may fail uses the reader's bookmark, so a primitive either consumes
//! exactly what it matched or nothing at all.

use std::io::Read;

use super::error::ParseErrorKind;
use super::reader::VCardReader;
use crate::error::VCardResult;
use crate::rfc::vcard::core::VCardParameter;

/// `name = 1*(ALPHA / DIGIT / "-")`
fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

/// `SAFE-CHAR = WSP / %x21 / %x23-2B / %x2D-39 / %x3C-7E / NON-ASCII`
fn is_safe_char(c: char) -> bool {
    match c {
        ' ' | '\t' => true,
        '"' | ',' | ':' | ';' => false,
        _ => !c.is_ascii_control(),
    }
}

/// `QSAFE-CHAR = WSP / %x21 / %x23-7E / NON-ASCII`
fn is_qsafe_char(c: char) -> bool {
    c != '"' && (c == ' ' || c == '\t' || !c.is_ascii_control())
}

/// `VALUE-CHAR = WSP / VCHAR / NON-ASCII`
fn is_value_char(c: char) -> bool {
    c == ' ' || c == '\t' || !c.is_ascii_control()
}

/// Characters allowed unescaped inside a text value.
fn is_text_char(c: char) -> bool {
    is_safe_char(c) || c == '"' || c == ':'
}

fn runes_match(actual: char, expected: char, case_sensitive: bool) -> bool {
    if case_sensitive {
        actual == expected
    } else {
        actual.to_lowercase().eq(expected.to_lowercase())
    }
}

impl<R: Read> VCardReader<R> {
    /// Reads an optional `group "."` prefix.
    ///
    /// Consumes nothing and returns `None` unless a non-empty name run is
    /// directly followed by a dot.
    ///
    /// ## Errors
    /// Returns `VCardError::Io` if the underlying source fails.
    pub fn read_group(&mut self) -> VCardResult<Option<String>> {
        self.set_bookmark();
        while self.peek()?.is_some_and(is_name_char) {
            self.read()?;
        }

        let group = self.read_since_bookmark();
        if !group.is_empty() && self.peek()? == Some('.') {
            self.read()?;
            self.unset_bookmark();
            Ok(Some(group))
        } else {
            self.return_to_bookmark();
            Ok(None)
        }
    }

    /// Reads a property or parameter name, upper-cased.
    ///
    /// ## Errors
    /// Returns a parse error if no name character is available.
    pub fn read_name(&mut self) -> VCardResult<String> {
        let mut name = String::new();
        while let Some(c) = self.peek()?.filter(|&c| is_name_char(c)) {
            self.read()?;
            name.push(c);
        }

        if name.is_empty() {
            return Err(self
                .error(ParseErrorKind::InvalidPropertyName, "expected a name")
                .into());
        }

        Ok(name.to_ascii_uppercase())
    }

    /// Reads a single quoted or unquoted parameter value.
    ///
    /// ## Errors
    /// Returns a parse error if a quoted value is not closed or the value is
    /// empty.
    pub fn read_param_value(&mut self) -> VCardResult<String> {
        let mut value = String::new();

        if self.peek()? == Some('"') {
            self.read()?;
            while self.peek_rune()?.is_some_and(is_qsafe_char) {
                value.push(self.read_rune()?);
            }
            if self.peek()? != Some('"') {
                return Err(self
                    .error(
                        ParseErrorKind::InvalidParameter,
                        "expected '\"' to close the quoted parameter value",
                    )
                    .into());
            }
            self.read()?;
        } else {
            while self.peek_rune()?.is_some_and(is_safe_char) {
                value.push(self.read_rune()?);
            }
        }

        if value.is_empty() {
            return Err(self
                .error(ParseErrorKind::InvalidParameter, "expected a parameter value")
                .into());
        }

        Ok(value)
    }

    /// Reads every `;name=value[,value...]` group up to the value colon.
    ///
    /// Repeated names are kept as separate entries.
    ///
    /// ## Errors
    /// Returns a parse error if a parameter is malformed.
    pub fn read_params(&mut self) -> VCardResult<Vec<VCardParameter>> {
        let mut params = Vec::new();

        while self.peek()? == Some(';') {
            self.read()?;
            let name = self.read_name()?;
            self.expect("=", true)?;

            let mut values = vec![self.read_param_value()?];
            while self.peek()? == Some(',') {
                self.read()?;
                values.push(self.read_param_value()?);
            }

            params.push(VCardParameter::multi(name, values));
        }

        Ok(params)
    }

    /// Reads the rest of the content line, up to (not including) CRLF.
    ///
    /// ## Errors
    /// Returns `VCardError::Io` if the underlying source fails.
    pub fn read_value(&mut self) -> VCardResult<String> {
        let mut value = String::new();
        while self.peek_rune()?.is_some_and(is_value_char) {
            value.push(self.read_rune()?);
        }
        Ok(value)
    }

    /// Reads one text value, resolving backslash escapes.
    ///
    /// A single leading character from `ignore_prefix` is discarded first;
    /// it is the separator that introduced this value.
    ///
    /// ## Errors
    /// Returns a parse error on an unknown escape sequence.
    pub fn read_text_value(&mut self, ignore_prefix: &[char]) -> VCardResult<String> {
        if self.peek()?.is_some_and(|c| ignore_prefix.contains(&c)) {
            self.read()?;
        }

        let mut value = String::new();
        while let Some(c) = self.peek_rune()? {
            if c == '\\' {
                self.read()?;
                match self.read_rune()? {
                    escaped @ ('\\' | ';' | ',') => value.push(escaped),
                    'n' | 'N' => value.push('\n'),
                    other => {
                        return Err(self
                            .error(
                                ParseErrorKind::InvalidValue,
                                format!("invalid character escape: \\{other}"),
                            )
                            .into());
                    }
                }
            } else if is_text_char(c) {
                value.push(self.read_rune()?);
            } else {
                break;
            }
        }

        Ok(value)
    }

    /// Reads a list of text values separated by any of `separators`.
    ///
    /// With `only_if_prefix`, returns an empty list (consuming nothing)
    /// unless the next character is that prefix, which is then consumed.
    ///
    /// ## Errors
    /// Returns a parse error on an unknown escape sequence.
    pub fn read_text_value_list(
        &mut self,
        separators: &[char],
        only_if_prefix: Option<char>,
    ) -> VCardResult<Vec<String>> {
        if let Some(prefix) = only_if_prefix {
            if self.peek()? != Some(prefix) {
                return Ok(Vec::new());
            }
            self.read()?;
        }

        let mut values = vec![self.read_text_value(&[])?];
        while self.peek()?.is_some_and(|c| separators.contains(&c)) {
            values.push(self.read_text_value(separators)?);
        }

        Ok(values)
    }

    /// Consumes `literal` if it comes next; otherwise consumes nothing.
    ///
    /// ## Errors
    /// Returns `VCardError::Io` if the underlying source fails.
    pub fn skip(&mut self, literal: &str, case_sensitive: bool) -> VCardResult<bool> {
        self.set_bookmark();
        for expected in literal.chars() {
            let matched = match self.peek_rune()? {
                Some(_) => runes_match(self.read_rune()?, expected, case_sensitive),
                None => false,
            };
            if !matched {
                self.return_to_bookmark();
                return Ok(false);
            }
        }

        self.unset_bookmark();
        Ok(true)
    }

    /// Consumes `literal`, failing if anything else comes next.
    ///
    /// ## Errors
    /// Returns a parse error, positioned where the literal should start, that
    /// names both the expected literal and what was found.
    pub fn expect(&mut self, literal: &str, case_sensitive: bool) -> VCardResult<()> {
        self.set_bookmark();
        for expected in literal.chars() {
            let actual = match self.peek_rune()? {
                Some(_) => Some(self.read_rune()?),
                None => None,
            };

            if !actual.is_some_and(|a| runes_match(a, expected, case_sensitive)) {
                let found = if actual.is_some() {
                    format!("{:?}", self.read_since_bookmark())
                } else {
                    "end of input".to_string()
                };
                self.return_to_bookmark();
                return Err(self
                    .error(
                        ParseErrorKind::UnexpectedToken,
                        format!("expected {literal:?} but found {found}"),
                    )
                    .into());
            }
        }

        self.unset_bookmark();
        Ok(())
    }
}
