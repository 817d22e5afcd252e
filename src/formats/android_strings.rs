//! Support for the Android `strings.xml` resource dialect.
//!
//! Parsing streams `quick_xml` events into a [`ParserState`]; values keep their
//! raw XML text (entity references, CDATA wrappers and inline markup included).
//! Serialization is deterministic: fixed declaration, four-space indentation and
//! `translatable="false"` only where needed.

use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event, attributes::Attribute},
    name::QName,
};
use std::{borrow::Cow, io::Write};

use crate::{
    error::Error,
    formats::{
        ITEM_ELEMENT, NAME_ATTRIBUTE, PLURALS_ELEMENT, QUANTITY_ATTRIBUTE, RESOURCES_ELEMENT,
        STRING_ARRAY_ELEMENT, STRING_ELEMENT, TRANSLATABLE_ATTRIBUTE, entities::EntityReplacements,
        handler::ParserState,
    },
    traits::Parser,
    types::{Resource, ResourceDocument},
};

const INDENT: &str = "    ";

impl Parser for ResourceDocument {
    fn from_str(xml: &str) -> Result<Self, Error> {
        parse_document(xml)
    }

    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        write_document(self, writer)
    }
}

/// Parses a complete `strings.xml` text.
pub fn parse_document(xml: &str) -> Result<ResourceDocument, Error> {
    let replacements = EntityReplacements::calculate(xml);
    let escaped = replacements.escape(xml);

    let mut reader = Reader::from_str(&escaped);
    let mut state = ParserState::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                depth += 1;
                let name = e.name();
                state.start_element(utf8(name.as_ref())?, &attributes(&e)?)?;
            }
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                let name = e.name();
                state.end_element(utf8(name.as_ref())?)?;
            }
            Event::Empty(e) => {
                let name = e.name();
                state.empty_element(utf8(name.as_ref())?, &attributes(&e)?)?;
            }
            Event::Text(e) => state.text(&e.unescape()?),
            Event::CData(e) => state.cdata(utf8(&e)?),
            Event::Comment(e) => state.comment(utf8(&e)?),
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(Error::MalformedXml(format!(
            "unexpected end of document with {} unclosed element(s)",
            depth
        )));
    }

    let document = restore_entities(state.finish(), &replacements);
    log::debug!(
        "parsed {} resources ({} strings, {} plurals, {} string arrays, {} entity references)",
        document.len(),
        document.strings().len(),
        document.plurals().len(),
        document.string_arrays().len(),
        replacements.len()
    );
    Ok(document)
}

/// Renders `document` as `strings.xml`.
pub fn write_document<W: Write>(document: &ResourceDocument, writer: W) -> Result<(), Error> {
    let mut xml_writer = Writer::new(writer);

    xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    write_indent(&mut xml_writer, 0)?;
    xml_writer.write_event(Event::Start(BytesStart::new(RESOURCES_ELEMENT)))?;

    for resource in &document.resources {
        for comment in resource.comments() {
            write_indent(&mut xml_writer, 1)?;
            xml_writer.write_event(Event::Comment(BytesText::from_escaped(format!(
                " {} ",
                comment
            ))))?;
        }

        write_indent(&mut xml_writer, 1)?;
        match resource {
            Resource::String(s) => {
                let mut attrs = vec![(NAME_ATTRIBUTE, s.name.as_str())];
                if !s.translatable {
                    attrs.push((TRANSLATABLE_ATTRIBUTE, "false"));
                }
                write_value_element(&mut xml_writer, STRING_ELEMENT, &attrs, &s.value)?;
            }
            Resource::Plurals(p) => {
                xml_writer.write_event(Event::Start(element(
                    PLURALS_ELEMENT,
                    &[(NAME_ATTRIBUTE, p.name.as_str())],
                )))?;
                for item in &p.items {
                    write_indent(&mut xml_writer, 2)?;
                    let mut attrs = vec![(QUANTITY_ATTRIBUTE, item.quantity.as_str())];
                    if !item.translatable {
                        attrs.push((TRANSLATABLE_ATTRIBUTE, "false"));
                    }
                    write_value_element(&mut xml_writer, ITEM_ELEMENT, &attrs, &item.value)?;
                }
                write_indent(&mut xml_writer, 1)?;
                xml_writer.write_event(Event::End(BytesEnd::new(PLURALS_ELEMENT)))?;
            }
            Resource::StringArray(a) => {
                xml_writer.write_event(Event::Start(element(
                    STRING_ARRAY_ELEMENT,
                    &[(NAME_ATTRIBUTE, a.name.as_str())],
                )))?;
                for item in &a.items {
                    write_indent(&mut xml_writer, 2)?;
                    let mut attrs = Vec::new();
                    if !item.translatable {
                        attrs.push((TRANSLATABLE_ATTRIBUTE, "false"));
                    }
                    write_value_element(&mut xml_writer, ITEM_ELEMENT, &attrs, &item.value)?;
                }
                write_indent(&mut xml_writer, 1)?;
                xml_writer.write_event(Event::End(BytesEnd::new(STRING_ARRAY_ELEMENT)))?;
            }
        }
    }

    write_indent(&mut xml_writer, 0)?;
    xml_writer.write_event(Event::End(BytesEnd::new(RESOURCES_ELEMENT)))?;
    xml_writer.write_event(Event::Text(BytesText::from_escaped("\n")))?;
    Ok(())
}

fn restore_entities(document: ResourceDocument, replacements: &EntityReplacements) -> ResourceDocument {
    if replacements.is_empty() {
        return document;
    }
    document.map(|resource| {
        resource
            .update_name(replacements.restore(resource.name()))
            .update_comments(
                resource
                    .comments()
                    .iter()
                    .map(|c| replacements.restore(c))
                    .collect(),
            )
            .update_values(|v| replacements.restore(v))
    })
}

fn utf8(bytes: &[u8]) -> Result<&str, Error> {
    Ok(std::str::from_utf8(bytes)?)
}

/// Attribute pairs with their values left in raw (escaped) form.
fn attributes(e: &BytesStart) -> Result<Vec<(String, String)>, Error> {
    e.attributes()
        .with_checks(false)
        .map(|attr| {
            let attr = attr.map_err(quick_xml::Error::from)?;
            Ok((
                utf8(attr.key.as_ref())?.to_string(),
                utf8(&attr.value)?.to_string(),
            ))
        })
        .collect()
}

/// Start tag whose attribute values are written as-is, without escaping.
fn element<'a>(tag: &'a str, attributes: &[(&str, &str)]) -> BytesStart<'a> {
    let mut elem = BytesStart::new(tag);
    for (key, value) in attributes {
        elem.push_attribute(Attribute {
            key: QName(key.as_bytes()),
            value: Cow::Borrowed(value.as_bytes()),
        });
    }
    elem
}

fn write_value_element<W: Write>(
    xml_writer: &mut Writer<W>,
    tag: &str,
    attributes: &[(&str, &str)],
    value: &str,
) -> Result<(), Error> {
    if value.is_empty() {
        xml_writer.write_event(Event::Empty(element(tag, attributes)))?;
    } else {
        xml_writer.write_event(Event::Start(element(tag, attributes)))?;
        xml_writer.write_event(Event::Text(BytesText::from_escaped(value)))?;
        xml_writer.write_event(Event::End(BytesEnd::new(tag)))?;
    }
    Ok(())
}

fn write_indent<W: Write>(xml_writer: &mut Writer<W>, level: usize) -> Result<(), Error> {
    let text = format!("\n{}", INDENT.repeat(level));
    xml_writer.write_event(Event::Text(BytesText::from_escaped(text)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        ArrayItem, PluralItem, PluralsElement, Quantity, StringArrayElement, StringElement,
    };
    use indoc::indoc;

    #[test]
    fn test_parse_quoted_strings() {
        let xml = indoc! {r#"
            <resources>
              <string name="general_link_showAll">"Ver todo {{name}}"</string>
              <string name="general_button_goTop_tablet">"Ir arriba {1{name}} usuario {2{user_name}}"</string>
              <string name="general_button_goBottom">"Ir
            abajo"</string>
            </resources>
        "#};
        let doc = ResourceDocument::from_str(xml).unwrap();
        assert_eq!(
            doc.resources,
            vec![
                StringElement::new("general_link_showAll", "\"Ver todo {{name}}\"").into(),
                StringElement::new(
                    "general_button_goTop_tablet",
                    "\"Ir arriba {1{name}} usuario {2{user_name}}\""
                )
                .into(),
                StringElement::new("general_button_goBottom", "\"Ir\nabajo\"").into(),
            ]
        );
    }

    #[test]
    fn test_parse_plurals_and_arrays() {
        let xml = indoc! {r#"
            <resources>
              <plurals name="general_quantity">
                <item quantity="one">"Un elemento seleccionado"</item>
                <item quantity="other" translatable="false">"{{element_quantity}} elementos"</item>
              </plurals>
              <string-array name="planets">
                <item>Mercury</item>
                <item translatable="false">Venus</item>
              </string-array>
            </resources>
        "#};
        let doc = ResourceDocument::from_str(xml).unwrap();
        assert_eq!(doc.len(), 2);

        let plurals = doc.plurals();
        assert_eq!(plurals[0].name, "general_quantity");
        assert_eq!(
            plurals[0].items[0],
            PluralItem::new(Quantity::One, "\"Un elemento seleccionado\"")
        );
        assert_eq!(plurals[0].items[1].quantity, Quantity::Other);
        assert!(!plurals[0].items[1].translatable);

        let arrays = doc.string_arrays();
        assert_eq!(arrays[0].items[0], ArrayItem::new("Mercury"));
        assert_eq!(arrays[0].items[1].value, "Venus");
        assert!(!arrays[0].items[1].translatable);
    }

    #[test]
    fn test_parse_keeps_entities_verbatim() {
        let xml = indoc! {r#"
            <resources>
              <string name="hello_friend_bold">"Hello &lt;b&gt;{{name}}&lt;/b&gt;"</string>
              <string name="double">"&amp;lt;b&amp;gt;Hello&amp;lt;/b&amp;gt;"</string>
              <string name="nbsp">A&nbsp;B &#169;</string>
            </resources>
        "#};
        let doc = ResourceDocument::from_str(xml).unwrap();
        let strings = doc.strings();
        assert_eq!(strings[0].value, "\"Hello &lt;b&gt;{{name}}&lt;/b&gt;\"");
        assert_eq!(strings[1].value, "\"&amp;lt;b&amp;gt;Hello&amp;lt;/b&amp;gt;\"");
        assert_eq!(strings[2].value, "A&nbsp;B &#169;");
    }

    #[test]
    fn test_parse_cdata() {
        let xml = indoc! {r#"
            <resources>
              <string name="cdata"><![CDATA[Some text<a href="{{link}}">Link</a> text]]></string>
              <string name="multiline"><![CDATA[
              <br />
              <p><a href="mailto:{{email}}">Email</a></p>
            ]]></string>
            </resources>
        "#};
        let doc = ResourceDocument::from_str(xml).unwrap();
        let strings = doc.strings();
        assert_eq!(
            strings[0].value,
            r#"<![CDATA[Some text<a href="{{link}}">Link</a> text]]>"#
        );
        assert_eq!(
            strings[1].value,
            "<![CDATA[\n  <br />\n  <p><a href=\"mailto:{{email}}\">Email</a></p>\n]]>"
        );
    }

    #[test]
    fn test_parse_inline_markup() {
        let xml = r#"<resources><string name="terms">Read the <a href="https://example.com/?a=1&amp;b=2">terms</a><br/>now</string></resources>"#;
        let doc = ResourceDocument::from_str(xml).unwrap();
        assert_eq!(
            doc.strings()[0].value,
            r#"Read the <a href="https://example.com/?a=1&amp;b=2">terms</a><br/>now"#
        );
    }

    #[test]
    fn test_parse_comments() {
        let xml = indoc! {r#"
            <?xml version="1.0" encoding="utf-8"?>
            <resources>
              <!-- Header &amp; intro -->
              <!-- Screen: home -->
              <string name="title">Home</string>
              <string name="subtitle">Welcome</string>
              <!-- trailing -->
            </resources>
        "#};
        let doc = ResourceDocument::from_str(xml).unwrap();
        assert_eq!(doc.resources[0].comments(), ["Header &amp; intro", "Screen: home"]);
        assert!(doc.resources[1].comments().is_empty());
    }

    #[test]
    fn test_missing_name_attribute() {
        let xml = r#"<resources><string>No name attr</string></resources>"#;
        let result = ResourceDocument::from_str(xml);
        assert!(result.is_err());
        let err = format!("{:?}", result.unwrap_err());
        assert!(err.contains("missing 'name'"));
    }

    #[test]
    fn test_invalid_quantity() {
        let xml = r#"<resources><plurals name="p"><item quantity="several">x</item></plurals></resources>"#;
        assert!(matches!(
            ResourceDocument::from_str(xml),
            Err(Error::InvalidQuantity(q)) if q == "several"
        ));
    }

    #[test]
    fn test_unclosed_element_is_malformed_xml() {
        let result = ResourceDocument::from_str(r#"<resources><string name="a">x</string>"#);
        assert!(matches!(result, Err(Error::MalformedXml(ref m)) if m.contains("1 unclosed")));

        let result = ResourceDocument::from_str(r#"<resources><plurals name="p"><item quantity="one">x"#);
        assert!(matches!(result, Err(Error::MalformedXml(ref m)) if m.contains("3 unclosed")));
    }

    #[test]
    fn test_malformed_xml() {
        assert!(ResourceDocument::from_str(r#"<resources><string name="a">x</resources>"#).is_err());
        assert!(ResourceDocument::from_str(r#"<resources><string name="a">x</string>"#).is_err());
        assert!(ResourceDocument::from_str(r#"<resources><string name="a">Tom & Jerry</string></resources>"#).is_err());
    }

    #[test]
    fn test_serialize_layout() {
        let mut title = StringElement::new("title", "Home");
        title.comments = vec!["Screen: home".to_string()];
        let mut hidden = StringElement::new("hidden", "");
        hidden.translatable = false;
        let mut other = PluralItem::new(Quantity::Other, "%d apples");
        other.translatable = false;
        let doc = ResourceDocument::new(vec![
            title.into(),
            hidden.into(),
            PluralsElement::new("apples", vec![PluralItem::new(Quantity::One, "One apple"), other]).into(),
            StringArrayElement::new("planets", vec![ArrayItem::new("Mercury"), ArrayItem::new("")]).into(),
        ]);

        let expected = indoc! {r#"
            <?xml version="1.0" encoding="utf-8"?>
            <resources>
                <!-- Screen: home -->
                <string name="title">Home</string>
                <string name="hidden" translatable="false"/>
                <plurals name="apples">
                    <item quantity="one">One apple</item>
                    <item quantity="other" translatable="false">%d apples</item>
                </plurals>
                <string-array name="planets">
                    <item>Mercury</item>
                    <item/>
                </string-array>
            </resources>
        "#};
        assert_eq!(doc.to_xml_string().unwrap(), expected);
    }

    #[test]
    fn test_serialize_empty_document() {
        let out = ResourceDocument::default().to_xml_string().unwrap();
        assert_eq!(out, "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<resources>\n</resources>\n");
    }

    #[test]
    fn test_round_trip_serialization() {
        let xml = indoc! {r#"
            <resources>
              <string name="greet">Hi &lt;b&gt;there&lt;/b&gt;</string>
              <string name="bye" translatable="false">Bye</string>
              <string name="link">Go <a href="x">here</a></string>
              <plurals name="p">
                <item quantity="one">one</item>
                <item quantity="other">other</item>
              </plurals>
            </resources>
        "#};
        let document = ResourceDocument::from_str(xml).unwrap();
        let out = document.to_xml_string().unwrap();
        let reparsed = ResourceDocument::from_str(&out).unwrap();
        assert_eq!(document, reparsed);
        assert_eq!(reparsed.to_xml_string().unwrap(), out);
    }
}
