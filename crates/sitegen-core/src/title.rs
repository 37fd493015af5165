//! Page title extraction

use md_parser::{heading_level, split_blocks};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TitleError {
    #[error("No h1 header found")]
    NotFound,
}

/// Text of the first level-1 heading block, trimmed
pub fn extract_title(markdown: &str) -> Result<String, TitleError> {
    split_blocks(markdown)
        .iter()
        .find(|block| heading_level(block) == Some(1))
        .map(|block| block[2..].trim().to_string())
        .ok_or(TitleError::NotFound)
}
