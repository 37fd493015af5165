//! HTML element tree types
//!
//! A tree is made of leaves (a tag wrapping a text value, or bare text) and
//! containers (a tag wrapping an ordered list of child elements).

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// An HTML element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Element {
    Leaf(Leaf),
    Container(Container),
}

/// Element with a text value and no children
///
/// A leaf without a tag is plain text and serializes as its bare value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leaf {
    pub tag: Option<String>,
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}

/// Element wrapping an ordered sequence of children
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Container {
    pub tag: Option<String>,
    pub children: Vec<Element>,
    #[serde(skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
    /// Serialize as `<tag></tag>` when there are no children instead of failing.
    /// Only the document root is built this way.
    #[serde(skip)]
    pub allow_empty: bool,
}

/// HTML attributes, kept in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute. Replacing an existing name keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (name, value) in iter {
            attrs.insert(name, value);
        }
        attrs
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// Convenience constructors
impl Element {
    /// Untagged leaf: raw text with no wrapping tag
    pub fn text(value: impl Into<String>) -> Self {
        Element::Leaf(Leaf {
            tag: None,
            value: Some(value.into()),
            attributes: Attributes::new(),
        })
    }

    pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Element::Leaf(Leaf {
            tag: Some(tag.into()),
            value: Some(value.into()),
            attributes: Attributes::new(),
        })
    }

    pub fn container(tag: impl Into<String>, children: Vec<Element>) -> Self {
        Element::Container(Container {
            tag: Some(tag.into()),
            children,
            attributes: Attributes::new(),
            allow_empty: false,
        })
    }

    /// Container that serializes even with no children (document root)
    pub fn empty_container(tag: impl Into<String>) -> Self {
        Element::Container(Container {
            tag: Some(tag.into()),
            children: Vec::new(),
            attributes: Attributes::new(),
            allow_empty: true,
        })
    }

    /// Add an attribute, keeping insertion order
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes_mut().insert(name, value);
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Element::Leaf(leaf) => leaf.tag.as_deref(),
            Element::Container(container) => container.tag.as_deref(),
        }
    }

    pub fn attributes(&self) -> &Attributes {
        match self {
            Element::Leaf(leaf) => &leaf.attributes,
            Element::Container(container) => &container.attributes,
        }
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        match self {
            Element::Leaf(leaf) => &mut leaf.attributes,
            Element::Container(container) => &mut container.attributes,
        }
    }

    /// Children of a container; leaves have none
    pub fn children(&self) -> &[Element] {
        match self {
            Element::Leaf(_) => &[],
            Element::Container(container) => &container.children,
        }
    }

    /// Serialize this element to HTML
    pub fn to_html(&self) -> Result<String, crate::RenderError> {
        crate::element_to_html(self)
    }
}
