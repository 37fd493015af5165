//! Element tree to HTML writer
//!
//! Emits `<tag attr="value">children</tag>` with attributes in insertion
//! order and no whitespace added between tags, text or attributes.

use crate::element::{Attributes, Container, Element, Leaf};
use thiserror::Error;

/// Errors for trees that cannot be serialized
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("leaf element <{}> has no value", .tag.as_deref().unwrap_or("text"))]
    MissingValue { tag: Option<String> },

    #[error("container element has no tag")]
    MissingTag,

    #[error("container element <{tag}> has no children")]
    NoChildren { tag: String },
}

/// Serialize an element tree to an HTML string
pub fn element_to_html(element: &Element) -> Result<String, RenderError> {
    let mut writer = Writer::new();
    writer.write_element(element)?;
    Ok(writer.output)
}

/// HTML writer state
struct Writer {
    output: String,
}

impl Writer {
    fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    fn write_element(&mut self, element: &Element) -> Result<(), RenderError> {
        match element {
            Element::Leaf(leaf) => self.write_leaf(leaf),
            Element::Container(container) => self.write_container(container),
        }
    }

    fn write_leaf(&mut self, leaf: &Leaf) -> Result<(), RenderError> {
        let Some(value) = &leaf.value else {
            return Err(RenderError::MissingValue {
                tag: leaf.tag.clone(),
            });
        };

        match &leaf.tag {
            None => self.output.push_str(value),
            Some(tag) => {
                self.write_open_tag(tag, &leaf.attributes);
                self.output.push_str(value);
                self.write_close_tag(tag);
            }
        }
        Ok(())
    }

    fn write_container(&mut self, container: &Container) -> Result<(), RenderError> {
        let Some(tag) = &container.tag else {
            return Err(RenderError::MissingTag);
        };
        if container.children.is_empty() && !container.allow_empty {
            return Err(RenderError::NoChildren { tag: tag.clone() });
        }

        self.write_open_tag(tag, &container.attributes);
        for child in &container.children {
            self.write_element(child)?;
        }
        self.write_close_tag(tag);
        Ok(())
    }

    fn write_open_tag(&mut self, tag: &str, attributes: &Attributes) {
        self.output.push('<');
        self.output.push_str(tag);
        for (name, value) in attributes.iter() {
            self.output.push(' ');
            self.output.push_str(name);
            self.output.push_str("=\"");
            self.output.push_str(value);
            self.output.push('"');
        }
        self.output.push('>');
    }

    fn write_close_tag(&mut self, tag: &str) {
        self.output.push_str("</");
        self.output.push_str(tag);
        self.output.push('>');
    }
}
