//! vCard document parser.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use vcard3_core::config::{ParserConfig, Settings, load_config};
use vcard3_core::constants::DEFAULT_SOURCE_NAME;
use vcard3_core::error::CoreError;

use super::error::{ParseError, ParseErrorKind};
use super::properties::read_property;
use super::reader::VCardReader;
use crate::error::VCardResult;
use crate::rfc::vcard::core::{VCard, names};

const CRLF: &str = "\r\n";

/// Parses a vCard document into one or more vCards.
///
/// ## Summary
/// Parses the input string as a vCard 3.0 document and returns all vCards
/// found, in order.
///
/// ## Errors
/// Returns a parse error if the document is malformed or contains an
/// invalid property value. No partial result is returned.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse(input: &str) -> VCardResult<Vec<VCard>> {
    Parser::default().parse_str(input)
}

/// Parses a single vCard from input.
///
/// ## Summary
/// Convenience function for parsing a document with exactly one vCard.
/// Cards after the first are parsed (and validated) but dropped.
///
/// ## Errors
/// Returns an error if the document contains no vCards or is malformed.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse_single(input: &str) -> VCardResult<VCard> {
    let cards = parse(input)?;
    cards.into_iter().next().ok_or_else(|| {
        tracing::warn!("No vCard found in document");
        ParseError::new(
            ParseErrorKind::UnexpectedEof,
            DEFAULT_SOURCE_NAME,
            1,
            1,
            "no vCard found in document",
        )
        .into()
    })
}

/// Parses every vCard read from `source`, reporting errors against `name`.
///
/// ## Errors
/// Returns `VCardError::Io` if reading fails, or a parse error if the
/// document is malformed.
pub fn parse_reader<R: Read>(source: R, name: &str) -> VCardResult<Vec<VCard>> {
    Parser::new(ParserConfig::default().with_source_name(name)).parse_reader(source)
}

/// Parses the vCard file at `path`.
///
/// ## Errors
/// Returns `VCardError::Io` if the file cannot be opened or read, or a parse
/// error (naming the file) if its content is malformed.
#[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn parse_path(path: impl AsRef<Path>) -> VCardResult<Vec<VCard>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    parse_reader(file, &path.display().to_string())
}

/// A configured parser.
///
/// ## Summary
/// Holds the reader settings for repeated parse calls; see [`ParserConfig`].
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    #[must_use]
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Uses the `parser` section of loaded settings.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.parser.clone())
    }

    /// Builds a parser from `.env`, `vcard3.toml` and `VCARD3__*`
    /// environment variables.
    ///
    /// ## Errors
    /// Returns `VCardError::CoreError` if the settings cannot be loaded or
    /// are invalid.
    pub fn from_env() -> VCardResult<Self> {
        let settings = load_config().map_err(|e| CoreError::ConfigError(format!("{e:#}")))?;
        Ok(Self::from_settings(&settings))
    }

    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses every vCard in `input`.
    ///
    /// ## Errors
    /// Returns a parse error if the document is malformed.
    pub fn parse_str(&self, input: &str) -> VCardResult<Vec<VCard>> {
        self.parse_reader(input.as_bytes())
    }

    /// Parses every vCard read from `source`.
    ///
    /// ## Errors
    /// Returns `VCardError::CoreError` for an unusable configuration,
    /// `VCardError::Io` if reading fails, or a parse error if the document
    /// is malformed.
    #[tracing::instrument(
        skip(self, source),
        fields(source_name = %self.config.source_name, capacity = self.config.buffer_capacity)
    )]
    pub fn parse_reader<R: Read>(&self, source: R) -> VCardResult<Vec<VCard>> {
        self.config.validate()?;

        let mut reader = VCardReader::open(
            source,
            self.config.source_name.clone(),
            self.config.buffer_capacity,
        )?;

        let cards = parse_stream(&mut reader).inspect_err(|e| {
            tracing::warn!(error = %e, "Failed to parse vCard stream");
        })?;

        tracing::debug!(count = cards.len(), "Parsed vCards");
        Ok(cards)
    }
}

fn parse_stream<R: Read>(reader: &mut VCardReader<R>) -> VCardResult<Vec<VCard>> {
    let mut cards = Vec::new();

    skip_blank_lines(reader)?;
    while !reader.at_end()? {
        let card = parse_card(reader)?;
        tracing::debug!(
            index = cards.len(),
            properties = card.len(),
            "Parsed vCard"
        );
        cards.push(card);
        skip_blank_lines(reader)?;
    }

    Ok(cards)
}

fn skip_blank_lines<R: Read>(reader: &mut VCardReader<R>) -> VCardResult<()> {
    while reader.skip(CRLF, true)? {}
    Ok(())
}

fn parse_card<R: Read>(reader: &mut VCardReader<R>) -> VCardResult<VCard> {
    // BEGIN and END are never grouped in practice; a group here is dropped.
    let _group = reader.read_group()?;
    reader.expect("begin:vcard", false)?;
    reader.expect(CRLF, true)?;
    skip_blank_lines(reader)?;

    let mut card = VCard::new();

    loop {
        if reader.at_end()? {
            return Err(reader
                .error(
                    ParseErrorKind::UnexpectedEof,
                    "vCard not closed with END:VCARD",
                )
                .into());
        }

        let (line, _) = reader.location();
        let group = reader.read_group()?;
        let name = reader.read_name()?;

        if name == names::END {
            reader.expect(":vcard", false)?;
            // The final END line may omit its CRLF.
            if !reader.at_end()? {
                reader.expect(CRLF, true)?;
            }
            return Ok(card);
        }

        let params = reader.read_params()?;
        reader.expect(":", true)?;
        let value = read_property(reader, &name, params)?;
        reader.expect(CRLF, true)?;

        let content_id = card.push(group, value);
        tracing::trace!(line, name = %name, content_id, "Parsed content line");
    }
}
