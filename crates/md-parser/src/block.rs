//! Block splitting and classification
//!
//! A document is cut into blocks on blank lines, and each block is
//! classified by looking at the shape of its lines.

use serde::Serialize;

/// The kind of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Paragraph,
    Heading,
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}

impl BlockType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Paragraph => "paragraph",
            BlockType::Heading => "heading",
            BlockType::Code => "code",
            BlockType::Quote => "quote",
            BlockType::UnorderedList => "unordered_list",
            BlockType::OrderedList => "ordered_list",
        }
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Code fence marker
pub const FENCE: &str = "```";

/// Split a document into blocks
///
/// Blocks are separated by a blank line (`"\n\n"`). Each block is trimmed,
/// empty blocks are dropped and every line inside a block loses its
/// trailing whitespace.
///
/// A whitespace-only line inside a block becomes empty, so the block itself
/// contains `"\n\n"` and splitting the output again cuts it in two.
pub fn split_blocks(document: &str) -> Vec<String> {
    document
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(|block| {
            block
                .split('\n')
                .map(str::trim_end)
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect()
}

/// Heading depth of a block: 1-6 leading `#` followed by a space
pub fn heading_level(block: &str) -> Option<u8> {
    let hashes = block.bytes().take_while(|&b| b == b'#').count();
    if (1..=6).contains(&hashes) && block.as_bytes().get(hashes) == Some(&b' ') {
        Some(hashes as u8)
    } else {
        None
    }
}

/// Classify a block
///
/// Rules are tried in order and the first match wins: heading, code, quote,
/// unordered list, ordered list, then paragraph.
///
/// Quote and unordered list rules only look at non-blank lines. The ordered
/// list rule requires every line to carry its number, so a blank line inside
/// a numbered block makes it a paragraph.
pub fn classify(block: &str) -> BlockType {
    if heading_level(block).is_some() {
        return BlockType::Heading;
    }

    if block.len() >= 2 * FENCE.len() && block.starts_with(FENCE) && block.ends_with(FENCE) {
        return BlockType::Code;
    }

    let lines: Vec<&str> = block.split('\n').collect();

    if lines
        .iter()
        .filter(|line| !is_blank(line))
        .all(|line| line.starts_with('>'))
    {
        return BlockType::Quote;
    }

    if lines
        .iter()
        .filter(|line| !is_blank(line))
        .all(|line| line.starts_with("- "))
    {
        return BlockType::UnorderedList;
    }

    if lines
        .iter()
        .enumerate()
        .all(|(i, line)| !is_blank(line) && line.starts_with(&ordered_prefix(i)))
    {
        return BlockType::OrderedList;
    }

    BlockType::Paragraph
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Marker expected at the start of the zero-based `index`th ordered list line
pub fn ordered_prefix(index: usize) -> String {
    format!("{}. ", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_blocks() {
        let md = "This is **bolded** paragraph\n\nThis is another paragraph with _italic_ text and `code` here\nThis is the same paragraph on a new line\n\n- This is a list\n- with items";
        assert_eq!(
            split_blocks(md),
            vec![
                "This is **bolded** paragraph",
                "This is another paragraph with _italic_ text and `code` here\nThis is the same paragraph on a new line",
                "- This is a list\n- with items",
            ]
        );
    }

    #[test]
    fn test_split_blocks_drops_extra_blank_lines() {
        let md = "\n\n\nFirst\n\n\n\n\nSecond\n\n\n";
        assert_eq!(split_blocks(md), vec!["First", "Second"]);
    }

    #[test]
    fn test_split_blocks_trims_lines() {
        let md = "  line one   \n\tline two\t\n  line three  ";
        assert_eq!(
            split_blocks(md),
            vec!["line one\n\tline two\n  line three"]
        );
    }

    #[test]
    fn test_split_blocks_empty_and_whitespace() {
        assert!(split_blocks("").is_empty());
        assert!(split_blocks("   \n\n \t \n\n").is_empty());
    }

    #[test]
    fn test_split_blocks_whitespace_line_is_kept_inside_block() {
        let blocks = split_blocks("a\n \nb");
        assert_eq!(blocks, vec!["a\n\nb"]);

        let resplit = split_blocks(&blocks.join("\n\n"));
        assert_eq!(resplit, vec!["a", "b"]);
        assert_ne!(resplit, blocks);
    }

    #[test]
    fn test_split_blocks_single_block() {
        assert_eq!(split_blocks("a\nb\nc"), vec!["a\nb\nc"]);
    }

    #[test]
    fn test_heading_levels() {
        for level in 1..=6u8 {
            let block = format!("{} Heading", "#".repeat(level as usize));
            assert_eq!(heading_level(&block), Some(level));
            assert_eq!(classify(&block), BlockType::Heading);
        }
    }

    #[test]
    fn test_heading_requires_space() {
        assert_eq!(classify("#Heading"), BlockType::Paragraph);
        assert_eq!(classify("#"), BlockType::Paragraph);
    }

    #[test]
    fn test_seven_hashes_is_paragraph() {
        assert_eq!(heading_level("####### Too deep"), None);
        assert_eq!(classify("####### Too deep"), BlockType::Paragraph);
    }

    #[test]
    fn test_code_block() {
        assert_eq!(classify("```\ncode\n```"), BlockType::Code);
        assert_eq!(classify("``````"), BlockType::Code);
        assert_eq!(classify("```"), BlockType::Paragraph);
        assert_eq!(classify("```\nnot closed"), BlockType::Paragraph);
    }

    #[test]
    fn test_heading_beats_code() {
        assert_eq!(classify("# ```x```"), BlockType::Heading);
    }

    #[test]
    fn test_quote_block() {
        assert_eq!(classify("> line one\n> line two"), BlockType::Quote);
        assert_eq!(classify(">no space"), BlockType::Quote);
        assert_eq!(classify("> one\nnot quoted"), BlockType::Paragraph);
    }

    #[test]
    fn test_quote_ignores_blank_lines() {
        assert_eq!(classify("> one\n   \n> two"), BlockType::Quote);
    }

    #[test]
    fn test_unordered_list() {
        assert_eq!(classify("- a\n- b\n- c"), BlockType::UnorderedList);
        assert_eq!(classify("- a\n-b"), BlockType::Paragraph);
        assert_eq!(classify("- a\n \n- b"), BlockType::UnorderedList);
    }

    #[test]
    fn test_ordered_list() {
        assert_eq!(classify("1. a\n2. b\n3. c"), BlockType::OrderedList);
        assert_eq!(classify("1. only"), BlockType::OrderedList);
    }

    #[test]
    fn test_ordered_list_must_increment_from_one() {
        assert_eq!(classify("1. a\n3. b"), BlockType::Paragraph);
        assert_eq!(classify("2. a\n3. b"), BlockType::Paragraph);
        assert_eq!(classify("1.a"), BlockType::Paragraph);
    }

    #[test]
    fn test_ordered_list_rejects_blank_lines() {
        assert_eq!(classify("1. a\n \n2. b"), BlockType::Paragraph);
    }

    #[test]
    fn test_ordered_list_double_digits() {
        let block = (0..12)
            .map(|i| format!("{}item", ordered_prefix(i)))
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(classify(&block), BlockType::OrderedList);
    }

    #[test]
    fn test_paragraph() {
        assert_eq!(classify("Just some text"), BlockType::Paragraph);
        assert_eq!(classify("text\n> not a quote"), BlockType::Paragraph);
    }

    #[test]
    fn test_block_type_names() {
        assert_eq!(BlockType::UnorderedList.to_string(), "unordered_list");
        assert_eq!(
            serde_json::to_string(&BlockType::OrderedList).unwrap(),
            "\"ordered_list\""
        );
    }
}
