//! Markdown to element tree conversion
//!
//! Each block is classified, stripped of its block syntax and turned into a
//! container whose children come from the inline parser. Code blocks are the
//! exception: their content is kept verbatim.

use md_parser::{
    BlockType, FENCE, InlineRun, ParseError, RunKind, classify, ordered_prefix, split_blocks,
    text_to_runs,
};
use sitegen_html::{Element, RenderError};
use thiserror::Error;

/// Conversion errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// Convert a markdown document to a `div` element holding one child per block
///
/// A document without blocks still produces a root, serialized as
/// `<div></div>`. Any inline parse error aborts the whole document.
pub fn markdown_to_html_node(markdown: &str) -> Result<Element, ConvertError> {
    let blocks = split_blocks(markdown);
    if blocks.is_empty() {
        return Ok(Element::empty_container("div"));
    }

    let children = blocks
        .iter()
        .map(|block| block_to_element(block))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Element::container("div", children))
}

/// Convert a markdown document straight to an HTML string
pub fn markdown_to_html(markdown: &str) -> Result<String, ConvertError> {
    Ok(markdown_to_html_node(markdown)?.to_html()?)
}

/// Convert a single block to its container element
pub fn block_to_element(block: &str) -> Result<Element, ConvertError> {
    match classify(block) {
        BlockType::Paragraph => paragraph_to_element(block),
        BlockType::Heading => heading_to_element(block),
        BlockType::Code => Ok(code_to_element(block)),
        BlockType::Quote => quote_to_element(block),
        BlockType::UnorderedList => unordered_list_to_element(block),
        BlockType::OrderedList => ordered_list_to_element(block),
    }
}

/// Parse inline markdown into leaf elements
pub fn text_to_children(text: &str) -> Result<Vec<Element>, ConvertError> {
    Ok(text_to_runs(text)?.iter().map(run_to_element).collect())
}

/// Convert an inline run to its leaf element
pub fn run_to_element(run: &InlineRun) -> Element {
    let content = run.content();
    match run.kind() {
        RunKind::Plain => Element::text(content),
        RunKind::Bold => Element::leaf("b", content),
        RunKind::Italic => Element::leaf("i", content),
        RunKind::Code => Element::leaf("code", content),
        RunKind::Link => {
            Element::leaf("a", content).with_attribute("href", run.target().unwrap_or_default())
        }
        RunKind::Image => Element::leaf("img", "")
            .with_attribute("src", run.target().unwrap_or_default())
            .with_attribute("alt", content),
    }
}

fn paragraph_to_element(block: &str) -> Result<Element, ConvertError> {
    let text = block.replace('\n', " ");
    Ok(Element::container("p", text_to_children(&text)?))
}

fn heading_to_element(block: &str) -> Result<Element, ConvertError> {
    let level = block.bytes().take_while(|&b| b == b'#').count();
    // Skip the hashes and exactly one space
    let text = block.get(level + 1..).unwrap_or_default();
    Ok(Element::container(
        format!("h{level}"),
        text_to_children(text)?,
    ))
}

fn code_to_element(block: &str) -> Element {
    let inner = block
        .strip_prefix(FENCE)
        .and_then(|rest| rest.strip_suffix(FENCE))
        .unwrap_or_default();
    let inner = inner.strip_prefix('\n').unwrap_or(inner);
    let inner = inner.strip_suffix('\n').unwrap_or(inner);

    Element::container(
        "pre",
        vec![Element::container("code", vec![Element::text(inner)])],
    )
}

fn quote_to_element(block: &str) -> Result<Element, ConvertError> {
    let text = block
        .split('\n')
        .map(|line| {
            line.strip_prefix("> ")
                .or_else(|| line.strip_prefix('>'))
                .unwrap_or(line)
        })
        .collect::<Vec<_>>()
        .join("\n");

    Ok(Element::container("blockquote", text_to_children(&text)?))
}

fn unordered_list_to_element(block: &str) -> Result<Element, ConvertError> {
    let items = block
        .split('\n')
        .filter_map(|line| line.strip_prefix("- "))
        .map(list_item)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Element::container("ul", items))
}

fn ordered_list_to_element(block: &str) -> Result<Element, ConvertError> {
    let items = block
        .split('\n')
        .enumerate()
        .filter_map(|(i, line)| line.strip_prefix(ordered_prefix(i).as_str()))
        .map(list_item)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Element::container("ol", items))
}

fn list_item(text: &str) -> Result<Element, ConvertError> {
    Ok(Element::container("li", text_to_children(text)?))
}
