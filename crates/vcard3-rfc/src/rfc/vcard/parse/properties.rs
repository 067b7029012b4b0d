//! Per-property value grammars (RFC 2426 §3).
//!
//! The caller has already read the group, name and parameters of the content
//! line and consumed the `:`; each grammar here reads the value up to (not
//! including) the terminating CRLF.

use std::io::Read;

use super::error::ParseErrorKind;
use super::params::ParamSet;
use super::reader::VCardReader;
use super::values::{parse_geo, parse_temporal};
use crate::error::VCardResult;
use crate::rfc::vcard::core::{
    Address, Agent, Binary, Email, Extension, Geo, Label, PropertyValue, RawValue, Source,
    StructuredName, Tel, Temporal, TemporalType, Text, TextList, TimeZone, VCardParameter,
    is_extension_name, names, param_names, values,
};

/// Reads the value of the property `name` and builds its typed payload.
///
/// ## Errors
/// Returns a parse error if a parameter is not allowed, the value does not
/// match the property's grammar, or the name is neither a known property
/// nor an `X-` extension.
#[tracing::instrument(level = "trace", skip(reader, params))]
pub(crate) fn read_property<R: Read>(
    reader: &mut VCardReader<R>,
    name: &str,
    params: Vec<VCardParameter>,
) -> VCardResult<PropertyValue> {
    let mut params = ParamSet::new(params);

    let value = match name {
        names::NAME => {
            deny_params(reader, name, &params)?;
            PropertyValue::Name(Text::new(reader.read_value()?))
        }
        names::PROFILE => {
            deny_params(reader, name, &params)?;
            if !reader.skip("VCARD", false)? {
                return Err(reader
                    .error(ParseErrorKind::InvalidValue, "PROFILE must be VCARD")
                    .into());
            }
            PropertyValue::Profile
        }
        names::VERSION => {
            deny_params(reader, name, &params)?;
            if !reader.skip(vcard3_core::constants::VCARD_VERSION, true)? {
                let found = reader.read_value()?;
                return Err(reader
                    .error(
                        ParseErrorKind::UnsupportedVersion,
                        format!("unsupported vCard version: {found}"),
                    )
                    .into());
            }
            PropertyValue::Version
        }
        names::SOURCE => PropertyValue::Source(read_source(reader, params)?),
        names::FN => PropertyValue::FormattedName(read_text(reader, params)?),
        names::MAILER => PropertyValue::Mailer(read_text(reader, params)?),
        names::TITLE => PropertyValue::Title(read_text(reader, params)?),
        names::ROLE => PropertyValue::Role(read_text(reader, params)?),
        names::NOTE => PropertyValue::Note(read_text(reader, params)?),
        names::PRODID => PropertyValue::ProdId(read_text(reader, params)?),
        names::SORT_STRING => PropertyValue::SortString(read_text(reader, params)?),
        names::N => PropertyValue::N(read_structured_name(reader, params)?),
        names::NICKNAME => PropertyValue::Nickname(read_text_list(reader, params, ',')?),
        names::CATEGORIES => PropertyValue::Categories(read_text_list(reader, params, ',')?),
        names::ORG => PropertyValue::Org(read_text_list(reader, params, ';')?),
        names::PHOTO => PropertyValue::Photo(read_binary(reader, params)?),
        names::LOGO => PropertyValue::Logo(read_binary(reader, params)?),
        names::SOUND => PropertyValue::Sound(read_binary(reader, params)?),
        names::KEY => PropertyValue::Key(read_binary(reader, params)?),
        names::BDAY => PropertyValue::Birthday(read_temporal(reader, params)?),
        names::REV => PropertyValue::Revision(read_temporal(reader, params)?),
        names::ADR => PropertyValue::Address(read_address(reader, params)?),
        names::LABEL => PropertyValue::Label(Label {
            types: params.take_multiple_values(param_names::TYPE),
            language: params.take_single_value(param_names::LANGUAGE),
            is_plain_text: params.take_flag(param_names::VALUE, values::PTEXT),
            value: reader.read_value()?,
            x_params: params.into_x_params(),
        }),
        names::TEL => PropertyValue::Tel(Tel {
            types: params.take_multiple_values(param_names::TYPE),
            value: reader.read_value()?,
            x_params: params.into_x_params(),
        }),
        names::EMAIL => PropertyValue::Email(Email {
            types: params.take_multiple_values(param_names::TYPE),
            value: reader.read_value()?,
            x_params: params.into_x_params(),
        }),
        names::TZ => PropertyValue::TimeZone(TimeZone {
            value_type: params.take_single_value(param_names::VALUE),
            value: reader.read_value()?,
            x_params: params.into_x_params(),
        }),
        names::GEO => PropertyValue::Geo(read_geo(reader, params)?),
        names::AGENT => PropertyValue::Agent(read_agent(reader, params)?),
        names::UID => PropertyValue::Uid(read_raw(reader, params)?),
        names::URL => PropertyValue::Url(read_raw(reader, params)?),
        names::CLASS => PropertyValue::Class(read_raw(reader, params)?),
        _ if is_extension_name(name) => PropertyValue::Extension(Extension {
            name: name.to_string(),
            language: params.take_single_value(param_names::LANGUAGE),
            is_plain_text: params.take_flag(param_names::VALUE, values::PTEXT),
            value_type: params.take_single_value(param_names::VALUE),
            value: reader.read_value()?,
            x_params: params.into_x_params(),
        }),
        _ => {
            return Err(reader
                .error(
                    ParseErrorKind::InvalidPropertyName,
                    format!("unrecognized content type: {name}"),
                )
                .into());
        }
    };

    Ok(value)
}

fn deny_params<R: Read>(reader: &VCardReader<R>, name: &str, params: &ParamSet) -> VCardResult<()> {
    if params.is_empty() {
        Ok(())
    } else {
        Err(reader
            .error(
                ParseErrorKind::InvalidParameter,
                format!("no parameters allowed on the {name} content type"),
            )
            .into())
    }
}

/// Takes `name` and fails unless it is absent or exactly `required`.
fn take_required<R: Read>(
    reader: &VCardReader<R>,
    params: &mut ParamSet,
    name: &str,
    required: &str,
) -> VCardResult<Option<String>> {
    match params.take_single_value(name) {
        Some(value) if value != required => Err(reader
            .error(
                ParseErrorKind::InvalidParameter,
                format!("parameter must have value: {name}={required}"),
            )
            .into()),
        taken => Ok(taken),
    }
}

fn read_text<R: Read>(reader: &mut VCardReader<R>, mut params: ParamSet) -> VCardResult<Text> {
    Ok(Text {
        language: params.take_single_value(param_names::LANGUAGE),
        is_plain_text: params.take_flag(param_names::VALUE, values::PTEXT),
        value: reader.read_value()?,
        x_params: params.into_x_params(),
    })
}

fn read_raw<R: Read>(reader: &mut VCardReader<R>, params: ParamSet) -> VCardResult<RawValue> {
    Ok(RawValue {
        value: reader.read_value()?,
        x_params: params.into_x_params(),
    })
}

fn read_text_list<R: Read>(
    reader: &mut VCardReader<R>,
    mut params: ParamSet,
    separator: char,
) -> VCardResult<TextList> {
    Ok(TextList {
        language: params.take_single_value(param_names::LANGUAGE),
        is_plain_text: params.take_flag(param_names::VALUE, values::PTEXT),
        values: non_empty(reader.read_text_value_list(&[separator], None)?),
        x_params: params.into_x_params(),
    })
}

/// A list holding only an empty string was an empty field on the wire.
fn non_empty(list: Vec<String>) -> Vec<String> {
    if list.len() == 1 && list[0].is_empty() {
        Vec::new()
    } else {
        list
    }
}

fn read_structured_name<R: Read>(
    reader: &mut VCardReader<R>,
    mut params: ParamSet,
) -> VCardResult<StructuredName> {
    let language = params.take_single_value(param_names::LANGUAGE);
    let is_plain_text = params.take_flag(param_names::VALUE, values::PTEXT);

    let family = non_empty(reader.read_text_value_list(&[','], None)?);
    let given = non_empty(reader.read_text_value_list(&[','], Some(';'))?);
    let additional = non_empty(reader.read_text_value_list(&[','], Some(';'))?);
    let prefixes = non_empty(reader.read_text_value_list(&[','], Some(';'))?);
    let suffixes = non_empty(reader.read_text_value_list(&[','], Some(';'))?);

    Ok(StructuredName {
        family,
        given,
        additional,
        prefixes,
        suffixes,
        language,
        is_plain_text,
        x_params: params.into_x_params(),
    })
}

fn read_address<R: Read>(reader: &mut VCardReader<R>, mut params: ParamSet) -> VCardResult<Address> {
    let types = params.take_multiple_values(param_names::TYPE);
    let language = params.take_single_value(param_names::LANGUAGE);
    let is_plain_text = params.take_flag(param_names::VALUE, values::PTEXT);

    let po_box = reader.read_text_value(&[])?;
    let mut rest: [String; 6] = Default::default();
    for field in &mut rest {
        reader.expect(";", true)?;
        *field = reader.read_text_value(&[])?;
    }
    let [extended, street, locality, region, postal_code, country] = rest;

    Ok(Address {
        po_box,
        extended,
        street,
        locality,
        region,
        postal_code,
        country,
        types,
        language,
        is_plain_text,
        x_params: params.into_x_params(),
    })
}

fn read_source<R: Read>(reader: &mut VCardReader<R>, mut params: ParamSet) -> VCardResult<Source> {
    let context = take_required(reader, &mut params, param_names::CONTEXT, values::WORD)?;
    let value_type = take_required(reader, &mut params, param_names::VALUE, values::URI)?;

    Ok(Source {
        value: reader.read_value()?,
        context,
        value_type,
        x_params: params.into_x_params(),
    })
}

fn read_agent<R: Read>(reader: &mut VCardReader<R>, mut params: ParamSet) -> VCardResult<Agent> {
    let is_uri = take_required(reader, &mut params, param_names::VALUE, values::URI)?.is_some();

    Ok(Agent {
        value: reader.read_value()?,
        is_inline: !is_uri,
        x_params: params.into_x_params(),
    })
}

fn read_binary<R: Read>(reader: &mut VCardReader<R>, mut params: ParamSet) -> VCardResult<Binary> {
    Ok(Binary {
        is_inline: params.take_flag(param_names::ENCODING, values::BINARY_ENCODING),
        value_type: params.take_single_value(param_names::VALUE),
        media_type: params.take_single_value(param_names::TYPE),
        value: reader.read_value()?,
        x_params: params.into_x_params(),
    })
}

fn read_temporal<R: Read>(
    reader: &mut VCardReader<R>,
    mut params: ParamSet,
) -> VCardResult<Temporal> {
    let value_type = match params.take_single_value(param_names::VALUE) {
        Some(declared) => Some(TemporalType::parse(&declared).ok_or_else(|| {
            reader.error(
                ParseErrorKind::InvalidParameter,
                format!("VALUE must be date or date-time, found {declared:?}"),
            )
        })?),
        None => None,
    };

    let raw = reader.read_value()?;
    let value = parse_temporal(&raw, value_type).ok_or_else(|| {
        reader.error(
            ParseErrorKind::InvalidDateTime,
            format!("invalid date or date-time value: {raw:?}"),
        )
    })?;

    Ok(Temporal {
        value,
        value_type,
        x_params: params.into_x_params(),
    })
}

fn read_geo<R: Read>(reader: &mut VCardReader<R>, params: ParamSet) -> VCardResult<Geo> {
    let raw = reader.read_value()?;
    let (latitude, longitude) = parse_geo(&raw).ok_or_else(|| {
        reader.error(
            ParseErrorKind::InvalidValue,
            "expected two float values separated by ';'",
        )
    })?;

    Ok(Geo {
        latitude,
        longitude,
        x_params: params.into_x_params(),
    })
}
