//! Default namespace normalization
//!
//! Some exporters bind the SVG namespace to a prefix (`<svg:svg
//! xmlns:svg="...">`). Renaming those elements back to unprefixed tags under
//! a default `xmlns` keeps the output looking like a plain SVG file.

use super::{Attribute, Document, Element};

/// The SVG namespace URI
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

impl Document {
    /// Make `uri` the default namespace if the root binds it to a prefix.
    ///
    /// Returns true when the document was rewritten. Nothing changes when
    /// the root already declares a different default namespace, when some
    /// element has no prefix (it would silently move into `uri`), or when an
    /// attribute uses the prefix (a default namespace cannot bind it).
    pub fn normalize_default_namespace(&mut self, uri: &str) -> bool {
        if self
            .root
            .attribute("xmlns")
            .is_some_and(|default| default != uri)
        {
            return false;
        }

        let Some(prefix) = self.root.attributes.iter().find_map(|attr| {
            attr.name
                .strip_prefix("xmlns:")
                .filter(|_| attr.value == uri)
                .map(str::to_string)
        }) else {
            return false;
        };

        if self.root.attribute("xmlns").is_none() && has_unprefixed(&self.root) {
            return false;
        }

        let qualified = format!("{}:", prefix);
        if has_prefixed_attribute(&self.root, &qualified) {
            return false;
        }

        self.root.walk_mut(&mut |element| {
            if let Some(local) = element.name.strip_prefix(qualified.as_str()) {
                element.name = local.to_string();
            }
        });

        let declaration = format!("xmlns:{}", prefix);
        if self.root.attribute("xmlns").is_some() {
            self.root.remove_attribute(&declaration);
        } else if let Some(attr) = self
            .root
            .attributes
            .iter_mut()
            .find(|attr| attr.name == declaration)
        {
            *attr = Attribute::new("xmlns", uri);
        }

        log::debug!("Rewrote '{}:' element prefixes to the default namespace", prefix);
        true
    }
}

fn has_unprefixed(element: &Element) -> bool {
    element.prefix().is_none() || element.child_elements().any(has_unprefixed)
}

fn has_prefixed_attribute(element: &Element, qualified: &str) -> bool {
    element
        .attributes
        .iter()
        .any(|attr| attr.name.starts_with(qualified))
        || element
            .child_elements()
            .any(|child| has_prefixed_attribute(child, qualified))
}
