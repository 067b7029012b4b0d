//! Round-trip parsing and serialization tests for vCard.
//!
//! These tests verify that parsed cards serialize back to text that parses
//! to an equal card, and that canonical text is reproduced byte for byte.

use super::fixtures::*;
use crate::rfc::vcard::build::{serialize, serialize_single};
use crate::rfc::vcard::core::{DateOrDateTime, PropertyValue, Tel, Text, VCard};
use crate::rfc::vcard::parse::{parse, parse_single};

/// Parse a vCard, serialize it, then parse again and compare.
fn round_trip(input: &str) -> Result<String, String> {
    let vcard1 = parse_single(input).map_err(|e| format!("First parse failed: {e}"))?;
    let serialized = serialize_single(&vcard1);
    let vcard2 =
        parse_single(&serialized).map_err(|e| format!("Second parse failed: {e}\n{serialized}"))?;

    if vcard1 != vcard2 {
        return Err(format!(
            "Card mismatch after round trip:\n{vcard1:#?}\nvs\n{vcard2:#?}\n{serialized}"
        ));
    }

    Ok(serialized)
}

#[test_log::test]
fn canonical_fixtures_are_reproduced_exactly() {
    for fixture in [CANONICAL_FRANK_DAWSON, CANONICAL_EVERY_PROPERTY, CANONICAL_FOLDED] {
        let serialized = round_trip(fixture).expect("round trip should succeed");
        assert_eq!(serialized, fixture);
    }
}

#[test]
fn round_trip_rfc_example() {
    let serialized = round_trip(RFC_TIM_HOWES).expect("round trip should succeed");
    assert!(serialized.contains("ADR;TYPE=WORK:;;501 E. Middlefield Rd.;Mountain View;CA; 94043;U.S.A.\r\n"));
}

#[test]
fn round_trip_loose_parameters() {
    let serialized = round_trip(LOOSE_PARAMETERS).expect("round trip should succeed");
    assert!(serialized.contains("TEL;TYPE=WORK,CELL;X-SRC=crm:+1-555-0100\r\n"));
    assert!(serialized.contains("EMAIL;TYPE=internet,pref;X-SOURCE=\"a:b\":jane@example.com\r\n"));
    assert!(serialized.contains("BDAY;VALUE=date:1980-01-02\r\n"));
    assert!(serialized.contains("REV:1995-10-31T22:27:10Z\r\n"));
}

#[test]
fn round_trip_unicode() {
    let serialized = round_trip(UNICODE).expect("round trip should succeed");
    assert!(serialized.contains("NOTE:日本語のメモ\r\n"));
}

#[test]
fn reserialization_is_idempotent() {
    for fixture in [
        CANONICAL_FRANK_DAWSON,
        RFC_TIM_HOWES,
        CANONICAL_EVERY_PROPERTY,
        CANONICAL_FOLDED,
        LOOSE_PARAMETERS,
        UNICODE,
    ] {
        let once = serialize(&parse(fixture).unwrap());
        let twice = serialize(&parse(&once).unwrap());
        assert_eq!(once, twice);
    }
}

#[test]
fn escaped_comma_survives() {
    let input = "BEGIN:vCard\r\nVERSION:3.0\r\nFN:Mr. John Q. Public\\, Esq.\r\nEND:vCard\r\n";
    let card = parse_single(input).unwrap();

    let name = card.formatted_name().unwrap();
    assert_eq!(name.value, "Mr. John Q. Public\\, Esq.");
    assert_eq!(name.unescaped(), "Mr. John Q. Public, Esq.");
    assert_eq!(serialize_single(&card), input);
}

#[test]
fn special_characters_in_lists() {
    let input = "\
BEGIN:vCard\r\n\
VERSION:3.0\r\n\
N:Characters;Test\\, Escape\\;;;;\r\n\
CATEGORIES:a\\,b,c\\\\d,line\\nbreak\r\n\
END:vCard\r\n";

    let card = parse_single(input).unwrap();
    assert_eq!(card.name().unwrap().given, vec!["Test, Escape;"]);
    assert_eq!(card.categories()[0].values, vec!["a,b", "c\\d", "line\nbreak"]);
    assert_eq!(round_trip(input).unwrap(), input);
}

#[test]
fn empty_list_items_survive() {
    let input = "BEGIN:vCard\r\nVERSION:3.0\r\nORG:ABC;;Marketing\r\nCATEGORIES:a,,b\r\nEND:vCard\r\n";

    let card = parse_single(input).unwrap();
    assert_eq!(card.organizations()[0].values, vec!["ABC", "", "Marketing"]);
    assert_eq!(card.categories()[0].values, vec!["a", "", "b"]);
    assert_eq!(round_trip(input).unwrap(), input);
}

#[test]
fn quoted_parameter_values_keep_commas() {
    let input = "\
BEGIN:vCard\r\n\
VERSION:3.0\r\n\
TEL;TYPE=\"a,b\",cell;X-TAGS=\"x,y\":+1-555-0100\r\n\
END:vCard\r\n";

    let card = parse_single(input).unwrap();
    let tel = card.telephones()[0];
    assert_eq!(tel.types, vec!["a,b", "cell"]);
    assert_eq!(tel.x_params[0].value, "x,y");

    assert_eq!(round_trip(input).unwrap(), input);
}

#[test]
fn multi_card_document() {
    let cards = parse(TWO_CARDS).unwrap();
    assert_eq!(cards.len(), 2);

    for card in &cards {
        let ids: Vec<u32> = card.properties().iter().map(|p| p.content_id).collect();
        let expected: Vec<u32> = (0..).take(ids.len()).collect();
        assert_eq!(ids, expected);
    }

    assert_eq!(cards[0].emails()[0].value, "john@example.com");
    assert_eq!(cards[1].telephones()[0].types, vec!["CELL"]);

    let reparsed = parse(&serialize(&cards)).unwrap();
    assert_eq!(reparsed, cards);
}

#[test]
fn rfc_example_accessors() {
    let card = parse_single(CANONICAL_FRANK_DAWSON).unwrap();

    assert_eq!(card.formatted_name().unwrap().value, "Frank Dawson");
    assert_eq!(card.organizations()[0].values, vec!["Lotus Development Corporation"]);

    let adr = card.addresses()[0];
    assert_eq!(adr.locality, "Raleigh");
    assert_eq!(adr.country, "U.S.A.");
    assert!(adr.has_type("postal"));

    let emails = card.emails();
    assert_eq!(emails.len(), 2);
    assert!(emails[0].has_type("pref"));
    assert!(!emails[1].has_type("pref"));
    assert_eq!(card.telephones().len(), 2);
}

#[test]
fn every_property_is_typed() {
    let card = parse_single(CANONICAL_EVERY_PROPERTY).unwrap();

    assert_eq!(card.len(), 33);
    assert_eq!(card.uid(), Some("19950401-080045-40000F192713-0052"));
    assert!(matches!(
        card.birthday().unwrap().value,
        DateOrDateTime::Date(_)
    ));
    assert!(card.revision().unwrap().value.has_time());
    assert!((card.geo().unwrap().longitude + 122.082_932).abs() < 1e-9);
    assert_eq!(card.nicknames()[0].values, vec!["Jim", "Jimmie"]);
    assert_eq!(
        card.organizations()[0].values,
        vec!["ABC, Inc.", "North American Division", "Marketing"]
    );

    let Some(PropertyValue::Key(key)) = card.get_property("KEY").map(|p| &p.value) else {
        panic!("expected KEY");
    };
    assert_eq!(key.decode().unwrap(), b"this could be a key");

    let Some(PropertyValue::Agent(agent)) = card.get_property("AGENT").map(|p| &p.value) else {
        panic!("expected AGENT");
    };
    assert!(!agent.is_inline);

    let abadr = card.get_property("X-ABADR").unwrap();
    assert_eq!(abadr.group.as_deref(), Some("item1"));
    assert_eq!(card.extensions("X-ABLABEL")[0].language.as_deref(), Some("en"));
}

#[test]
fn long_values_fold_and_unfold() {
    let mut card = VCard::new();
    card.add(PropertyValue::Note(Text::new("A".repeat(200))));
    card.add(PropertyValue::Note(Text::new("日".repeat(200))));

    let serialized = serialize_single(&card);
    for line in serialized.split("\r\n") {
        assert!(line.chars().count() <= 75, "line too long: {line}");
    }

    let reparsed = parse_single(&serialized).unwrap();
    let notes = reparsed.notes();
    assert_eq!(notes[0].value, "A".repeat(200));
    assert_eq!(notes[1].value, "日".repeat(200));
}

#[test]
fn built_card_reports_default_version() {
    let mut card = VCard::new();
    card.add(PropertyValue::FormattedName(Text::new("Jane Doe")));
    card.add(PropertyValue::Tel(Tel::new("+1-555-0100")));

    let version = card.version();
    assert_eq!(version.value, PropertyValue::Version);
    assert_eq!(version.content_id, 3);
    assert_eq!(card.version_str(), "3.0");

    let serialized = serialize_single(&card);
    assert!(serialized.starts_with("BEGIN:vCard\r\nVERSION:3.0\r\n"));

    let reparsed = parse_single(&serialized).unwrap();
    assert_eq!(reparsed.properties()[0].value, PropertyValue::Version);
    assert_eq!(reparsed.telephones()[0].types, vec!["VOICE"]);
}
