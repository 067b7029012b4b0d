//! vCard serialization.

use vcard3_core::constants::{BEGIN_LINE, END_LINE, VERSION_LINE};

use super::escape::{escape_param_value, escape_text};
use super::fold::fold_line;
use crate::rfc::vcard::core::{
    Address, DateOrDateTime, ExtensionParam, PropertyValue, StructuredName, Temporal, Text,
    VCard, VCardProperty, param_names, values,
};

/// Serializes one or more vCards to a string.
///
/// ## Summary
/// Produces RFC 2426 output: CRLF line endings, lines folded at 75
/// characters, and a `VERSION:3.0` line right after `BEGIN` in every card.
#[must_use]
#[tracing::instrument(skip(cards), fields(count = cards.len()))]
pub fn serialize(cards: &[VCard]) -> String {
    let mut output = String::new();

    for card in cards {
        serialize_vcard(card, &mut output);
    }

    output
}

/// Serializes a single vCard to a string.
#[must_use]
pub fn serialize_single(card: &VCard) -> String {
    let mut output = String::new();
    serialize_vcard(card, &mut output);
    output
}

fn serialize_vcard(card: &VCard, output: &mut String) {
    output.push_str(BEGIN_LINE);
    // Always written here; a VERSION property is skipped below.
    output.push_str(VERSION_LINE);

    for prop in card.properties() {
        if !matches!(prop.value, PropertyValue::Version) {
            serialize_property(prop, output);
        }
    }

    output.push_str(END_LINE);
}

fn serialize_property(prop: &VCardProperty, output: &mut String) {
    let mut line = ContentLine::new(prop.group.as_deref(), prop.name());

    match &prop.value {
        PropertyValue::Name(text) => line.value(&text.value),
        PropertyValue::Profile => line.value("VCARD"),
        PropertyValue::Source(source) => {
            line.param(param_names::VALUE, source.value_type.as_deref());
            line.param(param_names::CONTEXT, source.context.as_deref());
            line.x_params(&source.x_params);
            line.value(&source.value);
        }
        PropertyValue::FormattedName(text)
        | PropertyValue::Mailer(text)
        | PropertyValue::Title(text)
        | PropertyValue::Role(text)
        | PropertyValue::Note(text)
        | PropertyValue::ProdId(text)
        | PropertyValue::SortString(text) => write_text(&mut line, text),
        PropertyValue::N(name) => write_structured_name(&mut line, name),
        PropertyValue::Nickname(list) | PropertyValue::Categories(list) => {
            line.text_params(list.is_plain_text, list.language.as_deref());
            line.x_params(&list.x_params);
            line.value(&join_escaped(&list.values, ','));
        }
        PropertyValue::Org(list) => {
            line.text_params(list.is_plain_text, list.language.as_deref());
            line.x_params(&list.x_params);
            line.value(&join_escaped(&list.values, ';'));
        }
        PropertyValue::Photo(binary)
        | PropertyValue::Logo(binary)
        | PropertyValue::Sound(binary)
        | PropertyValue::Key(binary) => {
            line.param(param_names::VALUE, binary.value_type.as_deref());
            if binary.is_inline {
                line.param(param_names::ENCODING, Some(values::BINARY_ENCODING));
            }
            line.param(param_names::TYPE, binary.media_type.as_deref());
            line.x_params(&binary.x_params);
            line.value(&binary.value);
        }
        PropertyValue::Birthday(temporal) | PropertyValue::Revision(temporal) => {
            write_temporal(&mut line, temporal);
        }
        PropertyValue::Address(address) => write_address(&mut line, address),
        PropertyValue::Label(label) => {
            line.text_params(label.is_plain_text, label.language.as_deref());
            line.param_list(param_names::TYPE, &label.types);
            line.x_params(&label.x_params);
            line.value(&label.value);
        }
        PropertyValue::Tel(tel) => {
            line.param_list(param_names::TYPE, &tel.types);
            line.x_params(&tel.x_params);
            line.value(&tel.value);
        }
        PropertyValue::Email(email) => {
            line.param_list(param_names::TYPE, &email.types);
            line.x_params(&email.x_params);
            line.value(&email.value);
        }
        PropertyValue::TimeZone(tz) => {
            line.param(param_names::VALUE, tz.value_type.as_deref());
            line.x_params(&tz.x_params);
            line.value(&tz.value);
        }
        PropertyValue::Geo(geo) => {
            line.x_params(&geo.x_params);
            line.value(&format!("{};{}", geo.latitude, geo.longitude));
        }
        PropertyValue::Agent(agent) => {
            if !agent.is_inline {
                line.param(param_names::VALUE, Some(values::URI));
            }
            line.x_params(&agent.x_params);
            line.value(&agent.value);
        }
        PropertyValue::Uid(raw) | PropertyValue::Url(raw) | PropertyValue::Class(raw) => {
            line.x_params(&raw.x_params);
            line.value(&raw.value);
        }
        PropertyValue::Version => line.value(vcard3_core::constants::VCARD_VERSION),
        PropertyValue::Extension(ext) => {
            if ext.is_plain_text {
                line.param(param_names::VALUE, Some(values::PTEXT));
            }
            line.param(param_names::VALUE, ext.value_type.as_deref());
            line.param(param_names::LANGUAGE, ext.language.as_deref());
            line.x_params(&ext.x_params);
            line.value(&ext.value);
        }
    }

    output.push_str(&fold_line(&line.finish()));
    output.push_str("\r\n");
}

fn write_text(line: &mut ContentLine, text: &Text) {
    line.text_params(text.is_plain_text, text.language.as_deref());
    line.x_params(&text.x_params);
    line.value(&text.value);
}

fn write_structured_name(line: &mut ContentLine, name: &StructuredName) {
    line.text_params(name.is_plain_text, name.language.as_deref());
    line.x_params(&name.x_params);

    // family;given;additional;prefixes;suffixes
    let value = name
        .components()
        .iter()
        .map(|list| join_escaped(list, ','))
        .collect::<Vec<_>>()
        .join(";");
    line.value(&value);
}

fn write_address(line: &mut ContentLine, address: &Address) {
    line.text_params(address.is_plain_text, address.language.as_deref());
    line.param_list(param_names::TYPE, &address.types);
    line.x_params(&address.x_params);

    // POBox;Extended;Street;Locality;Region;PostalCode;Country
    let value = address
        .components()
        .iter()
        .map(|field| escape_text(field))
        .collect::<Vec<_>>()
        .join(";");
    line.value(&value);
}

fn write_temporal(line: &mut ContentLine, temporal: &Temporal) {
    line.param(
        param_names::VALUE,
        temporal.value_type.map(|value_type| value_type.as_str()),
    );
    line.x_params(&temporal.x_params);
    line.value(&format_temporal(&temporal.value));
}

/// Formats a date as `YYYY-MM-DD` and a date-time as
/// `YYYY-MM-DDTHH:MM:SS[.fff]`, with `Z` for UTC and `+HH:MM` otherwise.
fn format_temporal(value: &DateOrDateTime) -> String {
    match value {
        DateOrDateTime::Date(date) => date.format("%Y-%m-%d").to_string(),
        DateOrDateTime::DateTime(dt) if dt.offset().local_minus_utc() == 0 => {
            dt.format("%Y-%m-%dT%H:%M:%S%.fZ").to_string()
        }
        DateOrDateTime::DateTime(dt) => dt.format("%Y-%m-%dT%H:%M:%S%.f%:z").to_string(),
        DateOrDateTime::Floating(dt) => dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
    }
}

fn join_escaped(items: &[String], separator: char) -> String {
    let mut joined = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            joined.push(separator);
        }
        joined.push_str(&escape_text(item));
    }
    joined
}

/// An unfolded content line under construction.
struct ContentLine {
    line: String,
}

impl ContentLine {
    fn new(group: Option<&str>, name: &str) -> Self {
        let mut line = String::new();
        if let Some(group) = group {
            line.push_str(group);
            line.push('.');
        }
        line.push_str(name);
        Self { line }
    }

    /// Writes `;NAME=value` when a value is present.
    fn param(&mut self, name: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.param_list(name, &[value]);
        }
    }

    /// Writes `;NAME=a,b,...` unless `values` is empty.
    fn param_list<S: AsRef<str>>(&mut self, name: &str, values: &[S]) {
        if values.is_empty() {
            return;
        }

        self.line.push(';');
        self.line.push_str(name);
        self.line.push('=');

        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                self.line.push(',');
            }
            self.push_param_value(value.as_ref());
        }
    }

    /// Writes `VALUE=ptext` and `LANGUAGE`, in that order.
    fn text_params(&mut self, is_plain_text: bool, language: Option<&str>) {
        if is_plain_text {
            self.param(param_names::VALUE, Some(values::PTEXT));
        }
        self.param(param_names::LANGUAGE, language);
    }

    fn x_params(&mut self, params: &[ExtensionParam]) {
        for param in params {
            self.line.push(';');
            self.line.push_str(&param.name);
            self.line.push('=');
            self.push_param_value(&param.value);
        }
    }

    fn push_param_value(&mut self, value: &str) {
        let (escaped, needs_quotes) = escape_param_value(value);
        if needs_quotes {
            self.line.push('"');
            self.line.push_str(&escaped);
            self.line.push('"');
        } else {
            self.line.push_str(&escaped);
        }
    }

    fn value(&mut self, value: &str) {
        self.line.push(':');
        self.line.push_str(value);
    }

    fn finish(self) -> String {
        self.line
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, NaiveDate, TimeZone as _};

    use super::*;
    use crate::rfc::vcard::core::{
        Agent, Binary, Email, Extension, Geo, Label, Tel, TemporalType, TextList,
    };

    fn card_with(value: PropertyValue) -> String {
        let mut card = VCard::new();
        card.add(value);
        serialize_single(&card)
    }

    fn body(output: &str) -> &str {
        output
            .strip_prefix("BEGIN:vCard\r\nVERSION:3.0\r\n")
            .and_then(|rest| rest.strip_suffix("END:vCard\r\n"))
            .unwrap()
    }

    #[test]
    fn empty_card_has_envelope() {
        assert_eq!(
            serialize_single(&VCard::new()),
            "BEGIN:vCard\r\nVERSION:3.0\r\nEND:vCard\r\n"
        );
    }

    #[test]
    fn version_property_written_once() {
        let mut card = VCard::new();
        card.add(PropertyValue::Version);
        card.add(PropertyValue::FormattedName(Text::new("John Doe")));
        let output = serialize_single(&card);
        assert_eq!(output.matches("VERSION").count(), 1);
        assert_eq!(body(&output), "FN:John Doe\r\n");
    }

    #[test]
    fn serialize_many_cards() {
        let output = serialize(&[VCard::new(), VCard::new()]);
        assert_eq!(output.matches("BEGIN:vCard").count(), 2);
    }

    #[test]
    fn text_is_written_raw() {
        let output = card_with(PropertyValue::FormattedName(Text::new(
            "Mr. John Q. Public\\, Esq.",
        )));
        assert_eq!(body(&output), "FN:Mr. John Q. Public\\, Esq.\r\n");
    }

    #[test]
    fn text_params_order() {
        let mut text = Text::new("hi").with_language("en");
        text.is_plain_text = true;
        text.x_params.push(ExtensionParam::new("X-SRC", "a:b"));
        let output = card_with(PropertyValue::Note(text));
        assert_eq!(
            body(&output),
            "NOTE;VALUE=ptext;LANGUAGE=en;X-SRC=\"a:b\":hi\r\n"
        );
    }

    #[test]
    fn grouped_tel_with_types() {
        let mut card = VCard::new();
        card.add_grouped(
            "item1",
            PropertyValue::Tel(Tel::new("+1-213-555-1234").with_types(["work", "pref"])),
        );
        assert_eq!(
            body(&serialize_single(&card)),
            "item1.TEL;TYPE=work,pref:+1-213-555-1234\r\n"
        );
    }

    #[test]
    fn constructor_defaults_are_written() {
        let output = card_with(PropertyValue::Email(Email::new("a@example.com")));
        assert_eq!(body(&output), "EMAIL;TYPE=INTERNET:a@example.com\r\n");

        let output = card_with(PropertyValue::Label(Label::new("Suite 101")));
        assert_eq!(
            body(&output),
            "LABEL;TYPE=INTL,POSTAL,PARCEL,WORK:Suite 101\r\n"
        );
    }

    #[test]
    fn structured_values_are_escaped() {
        let name = StructuredName {
            family: vec!["Stevenson".into()],
            given: vec!["John".into()],
            additional: vec!["Philip".into(), "Paul".into()],
            prefixes: vec!["Dr.".into()],
            suffixes: vec!["Jr.".into(), "M.D.".into()],
            ..StructuredName::default()
        };
        let output = card_with(PropertyValue::N(name));
        assert_eq!(body(&output), "N:Stevenson;John;Philip,Paul;Dr.;Jr.,M.D.\r\n");

        let org = TextList::new(["ABC, Inc.", "North American Division"]);
        let output = card_with(PropertyValue::Org(org));
        assert_eq!(body(&output), "ORG:ABC\\, Inc.;North American Division\r\n");

        let mut adr = Address {
            street: "123 Main Street".into(),
            locality: "Any Town".into(),
            ..Address::default()
        };
        adr.types = vec!["home".into()];
        let output = card_with(PropertyValue::Address(adr));
        assert_eq!(body(&output), "ADR;TYPE=home:;;123 Main Street;Any Town;;;\r\n");
    }

    #[test]
    fn temporal_formats() {
        let date = NaiveDate::from_ymd_opt(1996, 4, 15).unwrap();
        let output = card_with(PropertyValue::Birthday(Temporal::new(date)));
        assert_eq!(body(&output), "BDAY:1996-04-15\r\n");

        let utc = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(1995, 10, 31, 22, 27, 10)
            .unwrap();
        let rev = Temporal::new(utc).with_value_type(TemporalType::DateTime);
        let output = card_with(PropertyValue::Revision(rev));
        assert_eq!(body(&output), "REV;VALUE=date-time:1995-10-31T22:27:10Z\r\n");

        let eastern = FixedOffset::west_opt(5 * 3600)
            .unwrap()
            .with_ymd_and_hms(1953, 10, 15, 23, 10, 0)
            .unwrap();
        let output = card_with(PropertyValue::Birthday(Temporal::new(eastern)));
        assert_eq!(body(&output), "BDAY:1953-10-15T23:10:00-05:00\r\n");
    }

    #[test]
    fn binary_and_agent_params() {
        let photo = Binary::from_bytes(b"hi", Some("GIF"));
        let output = card_with(PropertyValue::Photo(photo));
        assert_eq!(body(&output), "PHOTO;ENCODING=b;TYPE=GIF:aGk=\r\n");

        let output = card_with(PropertyValue::Logo(Binary::uri("http://example.com/logo.gif")));
        assert_eq!(
            body(&output),
            "LOGO;VALUE=uri:http://example.com/logo.gif\r\n"
        );

        let output = card_with(PropertyValue::Agent(Agent::uri("CID:JQPUBLIC")));
        assert_eq!(body(&output), "AGENT;VALUE=uri:CID:JQPUBLIC\r\n");
    }

    #[test]
    fn geo_and_extension() {
        let output = card_with(PropertyValue::Geo(Geo::new(37.386_013, -122.082_932)));
        assert_eq!(body(&output), "GEO:37.386013;-122.082932\r\n");

        let ext = Extension::new("X-ABUID", "5AD380FD").unwrap();
        let output = card_with(PropertyValue::Extension(ext));
        assert_eq!(body(&output), "X-ABUID:5AD380FD\r\n");
    }

    #[test]
    fn long_lines_are_folded() {
        let note = "x".repeat(100);
        let output = card_with(PropertyValue::Note(Text::new(note)));
        let lines: Vec<&str> = body(&output).split("\r\n").collect();
        assert_eq!(lines[0].len(), 75);
        assert!(lines[1].starts_with(' '));
        assert_eq!(lines[1].len(), 31);
    }
}
