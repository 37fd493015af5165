//! sitegen-core: Core library for converting markdown to HTML
//!
//! This crate provides:
//! - Block to element conversion (paragraphs, headings, code, quotes, lists)
//! - Inline run to element conversion
//! - Page title extraction
//!
//! The conversion is pure: no I/O and no shared state.

pub mod convert;
pub mod title;

pub use convert::{
    ConvertError, block_to_element, markdown_to_html, markdown_to_html_node, run_to_element,
    text_to_children,
};
pub use md_parser::{BlockType, InlineRun, ParseError, RunKind, classify, split_blocks};
pub use sitegen_html::{Element, RenderError, element_to_html};
pub use title::{TitleError, extract_title};
