//! sitegen-html: HTML element tree and serializer for sitegen
//!
//! This crate provides:
//! - The element tree (leaves, containers and untagged text)
//! - Serialization of a tree to an HTML string
//!
//! ## Example
//!
//! ```rust
//! use sitegen_html::{Element, element_to_html};
//!
//! let root = Element::container(
//!     "p",
//!     vec![Element::text("Hello "), Element::leaf("b", "world")],
//! );
//!
//! assert_eq!(element_to_html(&root).unwrap(), "<p>Hello <b>world</b></p>");
//! ```

pub mod element;
pub mod writer;

pub use element::{Attributes, Container, Element, Leaf};
pub use writer::{RenderError, element_to_html};
