//! md-parser: Parser for the small markdown subset used by sitegen
//!
//! This crate provides:
//! - Block splitting on blank lines
//! - Block classification (heading, code, quote, lists, paragraph)
//! - Inline run parsing (bold, italic, code, links, images)
//!
//! # Example
//!
//! ```
//! use md_parser::{BlockType, InlineRun, classify, split_blocks, text_to_runs};
//!
//! let blocks = split_blocks("# Title\n\nSome **bold** text");
//! assert_eq!(classify(&blocks[0]), BlockType::Heading);
//! assert_eq!(classify(&blocks[1]), BlockType::Paragraph);
//!
//! let runs = text_to_runs(&blocks[1]).unwrap();
//! assert_eq!(runs[1], InlineRun::bold("bold"));
//! ```

pub mod block;
pub mod inline;

// Re-export main types for convenient access
pub use block::{BlockType, FENCE, classify, heading_level, ordered_prefix, split_blocks};
pub use inline::{
    InlineRun, ParseError, ParseResult, RunKind, extract_images, extract_links, split_delimiter,
    split_images, split_links, text_to_runs,
};
