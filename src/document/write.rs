//! Serializing a [`Document`] back to XML text

use std::borrow::Cow;
use std::io::{self, Write};

use quick_xml::escape::escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use quick_xml::Writer;

use super::{Document, Element, Node};

impl Document {
    /// Serialize to a UTF-8 string with an XML declaration
    pub fn to_xml(&self) -> io::Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Serialize into any writer.
    ///
    /// The output starts with `<?xml version="1.0" encoding="UTF-8"?>`,
    /// puts prolog and epilog nodes on their own lines and ends with a
    /// newline. Elements without children are written self-closed.
    pub fn write_to<W: Write>(&self, out: W) -> io::Result<()> {
        let mut writer = Writer::new(out);
        self.write_events(&mut writer).map_err(into_io)
    }

    fn write_events<W: Write>(&self, writer: &mut Writer<W>) -> quick_xml::Result<()> {
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        newline(writer)?;

        for node in &self.prolog {
            write_node(writer, node)?;
            newline(writer)?;
        }

        write_element(writer, &self.root)?;

        for node in &self.epilog {
            newline(writer)?;
            write_node(writer, node)?;
        }
        newline(writer)
    }
}

fn newline<W: Write>(writer: &mut Writer<W>) -> quick_xml::Result<()> {
    writer.write_event(Event::Text(BytesText::from_escaped("\n")))
}

fn write_node<W: Write>(writer: &mut Writer<W>, node: &Node) -> quick_xml::Result<()> {
    match node {
        Node::Element(element) => write_element(writer, element),
        Node::Text(text) => writer.write_event(Event::Text(BytesText::from_escaped(text.as_str()))),
        Node::CData(text) => writer.write_event(Event::CData(BytesCData::new(text.as_str()))),
        Node::Comment(text) => {
            writer.write_event(Event::Comment(BytesText::from_escaped(text.as_str())))
        }
        Node::ProcessingInstruction(text) => {
            writer.write_event(Event::PI(BytesText::from_escaped(text.as_str())))
        }
        Node::DocType(text) => {
            writer.write_event(Event::DocType(BytesText::from_escaped(text.as_str())))
        }
    }
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> quick_xml::Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for attr in &element.attributes {
        start.push_attribute(Attribute {
            key: QName(attr.name.as_bytes()),
            value: Cow::Owned(escape_attribute(&attr.value).into_bytes()),
        });
    }

    if element.children.is_empty() {
        return writer.write_event(Event::Empty(start));
    }

    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        write_node(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))
}

/// Markup characters become entities; tab, newline and carriage return
/// become character references so a reader does not fold them into spaces
fn escape_attribute(value: &str) -> String {
    let escaped = escape(value);
    let mut out = String::with_capacity(escaped.len());
    for c in escaped.chars() {
        match c {
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            c => out.push(c),
        }
    }
    out
}

fn into_io(err: quick_xml::Error) -> io::Error {
    match err {
        quick_xml::Error::Io(e) => io::Error::new(e.kind(), e.to_string()),
        other => io::Error::new(io::ErrorKind::Other, other),
    }
}
