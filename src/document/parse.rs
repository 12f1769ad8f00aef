//! Building a [`Document`] from XML text

use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{QName, ResolveResult};
use quick_xml::NsReader;

use crate::error::{ParseError, Span};

use super::{Attribute, Document, Element, Node};

/// An element whose end tag has not been seen yet, with the byte offset of
/// its start tag
struct OpenElement {
    element: Element,
    start: usize,
}

impl Document {
    /// Parse an XML document.
    ///
    /// Rejects anything that is not a single well-formed root element:
    /// malformed markup, mismatched or missing end tags, undefined
    /// entities, unbound namespace prefixes, malformed comments, a late XML
    /// declaration, stray text outside the root, and multiple roots.
    pub fn parse(source: &str) -> Result<Document, ParseError> {
        let mut reader = NsReader::from_str(source);
        let mut first_event = true;
        let mut stack: Vec<OpenElement> = Vec::new();
        let mut prolog = Vec::new();
        let mut epilog = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let start = reader.buffer_position();
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(e) => {
                    let end = reader.buffer_position().max(start);
                    return Err(ParseError::syntax(start..end, e.to_string()));
                }
            };
            let span = start..reader.buffer_position();
            let at_start = std::mem::replace(&mut first_event, false);

            match event {
                Event::Start(e) => {
                    if stack.is_empty() && root.is_some() {
                        return Err(ParseError::syntax(span, "multiple root elements"));
                    }
                    let element = element_from(&reader, &e, &span)?;
                    stack.push(OpenElement {
                        element,
                        start: span.start,
                    });
                }
                Event::Empty(e) => {
                    let element = element_from(&reader, &e, &span)?;
                    attach(&mut stack, &mut root, element, span)?;
                }
                Event::End(_) => {
                    let Some(open) = stack.pop() else {
                        return Err(ParseError::syntax(span, "unexpected end tag"));
                    };
                    attach(&mut stack, &mut root, open.element, span)?;
                }
                Event::Text(t) => {
                    if let Err(e) = t.unescape() {
                        return Err(ParseError::syntax(span, e.to_string()));
                    }
                    let text = String::from_utf8_lossy(&t).into_owned();
                    match stack.last_mut() {
                        Some(open) => open.element.children.push(Node::Text(text)),
                        None if text.trim().is_empty() => {}
                        None => {
                            return Err(ParseError::syntax(
                                span,
                                "text outside of the root element",
                            ))
                        }
                    }
                }
                Event::CData(t) => {
                    let text = String::from_utf8_lossy(&t).into_owned();
                    match stack.last_mut() {
                        Some(open) => open.element.children.push(Node::CData(text)),
                        None => {
                            return Err(ParseError::syntax(
                                span,
                                "CDATA outside of the root element",
                            ))
                        }
                    }
                }
                Event::Comment(t) => {
                    let text = String::from_utf8_lossy(&t).into_owned();
                    if text.contains("--") || text.ends_with('-') {
                        return Err(ParseError::syntax(
                            span,
                            "'--' is not allowed inside a comment",
                        ));
                    }
                    let node = Node::Comment(text);
                    push_misc(&mut stack, &root, &mut prolog, &mut epilog, node);
                }
                Event::PI(t) => {
                    let node = Node::ProcessingInstruction(String::from_utf8_lossy(&t).into_owned());
                    push_misc(&mut stack, &root, &mut prolog, &mut epilog, node);
                }
                Event::DocType(t) => {
                    if root.is_some() || !stack.is_empty() {
                        return Err(ParseError::syntax(span, "misplaced DOCTYPE declaration"));
                    }
                    prolog.push(Node::DocType(String::from_utf8_lossy(&t).into_owned()));
                }
                // A fresh declaration is written on output
                Event::Decl(_) if at_start => {}
                Event::Decl(_) => {
                    return Err(ParseError::syntax(
                        span,
                        "XML declaration is only allowed at the start of the document",
                    ))
                }
                Event::Eof => break,
            }
        }

        if let Some(open) = stack.pop() {
            return Err(ParseError::syntax(
                open.start..source.len(),
                format!("unclosed element <{}>", open.element.name),
            ));
        }

        match root {
            Some(root) => Ok(Document {
                prolog,
                root,
                epilog,
            }),
            None => Err(ParseError::syntax(
                source.len()..source.len(),
                "no root element found",
            )),
        }
    }
}

fn element_from(
    reader: &NsReader<&[u8]>,
    start: &BytesStart<'_>,
    span: &Span,
) -> Result<Element, ParseError> {
    let mut element = Element::new(utf8(start.name().as_ref()));
    element.namespace = match reader.resolve_element(start.name()).0 {
        ResolveResult::Bound(ns) => Some(utf8(ns.as_ref())),
        ResolveResult::Unbound => None,
        ResolveResult::Unknown(prefix) => return Err(unbound_prefix(&prefix, span)),
    };

    for attr in start.attributes() {
        let attr = attr.map_err(|e| ParseError::syntax(span.clone(), e.to_string()))?;
        if !is_reserved_name(attr.key) {
            if let ResolveResult::Unknown(prefix) = reader.resolve_attribute(attr.key).0 {
                return Err(unbound_prefix(&prefix, span));
            }
        }

        // Literal whitespace in attribute values reads as a space; only
        // character references keep newlines and tabs
        let raw = utf8(&attr.value)
            .replace("\r\n", " ")
            .replace(['\t', '\n', '\r'], " ");
        let value =
            unescape(&raw).map_err(|e| ParseError::syntax(span.clone(), e.to_string()))?;
        element
            .attributes
            .push(Attribute::new(utf8(attr.key.as_ref()), value.into_owned()));
    }

    Ok(element)
}

/// `xmlns` declarations and the `xml:` prefix are bound implicitly
fn is_reserved_name(name: QName<'_>) -> bool {
    let name = name.as_ref();
    name == b"xmlns" || name.starts_with(b"xmlns:") || name.starts_with(b"xml:")
}

fn unbound_prefix(prefix: &[u8], span: &Span) -> ParseError {
    ParseError::syntax(
        span.clone(),
        format!("unbound namespace prefix '{}'", String::from_utf8_lossy(prefix)),
    )
}

/// Hand a completed element to its parent, or make it the root
fn attach(
    stack: &mut [OpenElement],
    root: &mut Option<Element>,
    element: Element,
    span: Span,
) -> Result<(), ParseError> {
    match stack.last_mut() {
        Some(parent) => parent.element.children.push(Node::Element(element)),
        None if root.is_some() => {
            return Err(ParseError::syntax(span, "multiple root elements"));
        }
        None => *root = Some(element),
    }
    Ok(())
}

/// Comments and processing instructions are allowed anywhere
fn push_misc(
    stack: &mut [OpenElement],
    root: &Option<Element>,
    prolog: &mut Vec<Node>,
    epilog: &mut Vec<Node>,
    node: Node,
) {
    match stack.last_mut() {
        Some(open) => open.element.children.push(node),
        None if root.is_some() => epilog.push(node),
        None => prolog.push(node),
    }
}

fn utf8(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
