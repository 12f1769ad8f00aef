//! Background removal and stroke thickening
//!
//! Both passes only look at the direct children of the root element. Nested
//! groups are left alone.

use std::fmt;

use crate::config::ThickenConfig;
use crate::document::{Element, Node};

/// What a transform run changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Report {
    /// Background paths removed from the root
    pub removed: usize,
    /// Paths that received a stroke matching their fill
    pub thickened: usize,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "removed {} background path(s), thickened {} path(s)",
            self.removed, self.thickened
        )
    }
}

fn is_background_path(element: &Element, config: &ThickenConfig) -> bool {
    element.is_path_like()
        && element
            .attribute("fill")
            .is_some_and(|fill| config.is_background_fill(fill))
}

/// Remove path children of `root` whose fill is a background fill.
///
/// Removed elements are returned in document order. The indentation
/// directly before each removed element goes with it, so the output keeps
/// one element per line.
pub fn remove_background_paths(root: &mut Element, config: &ThickenConfig) -> Vec<Element> {
    let mut removed = Vec::new();
    let children = std::mem::take(&mut root.children);

    for node in children {
        match node {
            Node::Element(element) if is_background_path(&element, config) => {
                if root.children.last().is_some_and(Node::is_whitespace) {
                    root.children.pop();
                }
                log::info!(
                    "Removed background path (fill=\"{}\")",
                    element.attribute("fill").unwrap_or_default()
                );
                removed.push(element);
            }
            other => root.children.push(other),
        }
    }

    removed
}

/// Give every path child of `root` with a non-empty fill a stroke of the
/// same color. Existing `stroke` and `stroke-width` values are overwritten.
///
/// Returns the number of paths updated.
pub fn thicken_paths(root: &mut Element, config: &ThickenConfig) -> usize {
    let mut thickened = 0;

    for element in root.child_elements_mut().filter(|el| el.is_path_like()) {
        let Some(fill) = element
            .attribute("fill")
            .filter(|fill| !fill.is_empty())
            .map(str::to_string)
        else {
            continue;
        };

        element.set_attribute("stroke", &fill);
        element.set_attribute("stroke-width", &config.stroke_width);
        log::debug!("Thickened <{}> with stroke {}", element.name, fill);
        thickened += 1;
    }

    thickened
}
