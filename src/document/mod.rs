//! In-memory XML element tree
//!
//! A deliberately small tree model: enough to read an SVG file, drop or
//! restyle some of the root's children, and write it back out without
//! disturbing the markup we did not touch. Text, comments and CDATA are
//! kept verbatim (still escaped) so they round-trip unchanged; attribute
//! values are stored unescaped and re-escaped on output.

mod namespace;
mod parse;
mod write;

pub use namespace::SVG_NAMESPACE;

/// A single `name="value"` pair on an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Qualified name, including any prefix (`xlink:href`)
    pub name: String,
    /// Unescaped value
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A node in the document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Character data, still in its escaped form
    Text(String),
    CData(String),
    Comment(String),
    ProcessingInstruction(String),
    DocType(String),
}

impl Node {
    /// True for text nodes holding only whitespace (indentation between tags)
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Node::Text(text) if text.trim().is_empty())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }
}

/// An XML element with ordered attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Qualified tag name as written in the source (`path`, `svg:path`)
    pub name: String,
    /// Namespace URI the tag name resolved to, if any
    pub namespace: Option<String>,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with no attributes or children
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style namespace setter
    pub fn with_namespace(mut self, uri: impl Into<String>) -> Self {
        self.namespace = Some(uri.into());
        self
    }

    /// Builder-style attribute setter
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder-style child appender
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Namespace prefix of the tag name, if any
    pub fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }

    /// Tag name without its namespace prefix
    pub fn local_name(&self) -> &str {
        self.name
            .split_once(':')
            .map_or(self.name.as_str(), |(_, local)| local)
    }

    /// Look up an attribute value by qualified name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Set an attribute, overwriting in place or appending when absent
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|attr| attr.name == name) {
            Some(attr) => attr.value = value.to_string(),
            None => self.attributes.push(Attribute::new(name, value)),
        }
    }

    /// Remove an attribute, returning its previous value
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        let index = self.attributes.iter().position(|attr| attr.name == name)?;
        Some(self.attributes.remove(index).value)
    }

    /// Direct element children, skipping text and other node kinds
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Mutable access to direct element children
    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    /// Tag name in `{uri}local` form, or just the local name when the
    /// element has no namespace
    pub fn expanded_name(&self) -> String {
        match &self.namespace {
            Some(uri) => format!("{{{}}}{}", uri, self.local_name()),
            None => self.local_name().to_string(),
        }
    }

    /// Whether this element is treated as a drawable path.
    ///
    /// Matches on the expanded tag name containing `path`, so `path` and
    /// `svg:path` qualify while `clipPath` and `textPath` do not. The
    /// namespace URI takes part in the match, prefixes do not.
    pub fn is_path_like(&self) -> bool {
        self.expanded_name().contains("path")
    }

    /// Visit this element and all of its descendant elements, depth first
    pub fn walk_mut(&mut self, visit: &mut impl FnMut(&mut Element)) {
        visit(self);
        for child in self.child_elements_mut() {
            child.walk_mut(visit);
        }
    }
}

/// A parsed XML document
///
/// The XML declaration of the source is not kept; serialization always
/// writes its own UTF-8 declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Comments, processing instructions and doctype before the root
    pub prolog: Vec<Node>,
    pub root: Element,
    /// Comments and processing instructions after the root
    pub epilog: Vec<Node>,
}

impl Document {
    /// Wrap a root element in a document with no prolog or epilog
    pub fn new(root: Element) -> Self {
        Self {
            prolog: Vec::new(),
            root,
            epilog: Vec::new(),
        }
    }
}
