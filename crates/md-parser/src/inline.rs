//! Inline run parser
//!
//! Splits the text of a block into typed runs. Parsing is a fixed sequence of
//! passes (bold, italic, code, images, links). Each pass only splits runs
//! that are still plain text, so whatever an earlier pass claimed is never
//! re-split by a later one.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use thiserror::Error;

/// Inline parse errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid markdown, unmatched delimiter: {delimiter}")]
    UnmatchedDelimiter { delimiter: String },
}

/// Parse result type
pub type ParseResult<T> = Result<T, ParseError>;

/// The formatting of an inline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunKind {
    Plain,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

/// A span of inline text sharing one formatting kind
///
/// Links and images carry a target URL; no other kind does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineRun {
    content: String,
    kind: RunKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<String>,
}

impl InlineRun {
    fn styled(kind: RunKind, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind,
            target: None,
        }
    }

    pub fn plain(content: impl Into<String>) -> Self {
        Self::styled(RunKind::Plain, content)
    }

    pub fn bold(content: impl Into<String>) -> Self {
        Self::styled(RunKind::Bold, content)
    }

    pub fn italic(content: impl Into<String>) -> Self {
        Self::styled(RunKind::Italic, content)
    }

    pub fn code(content: impl Into<String>) -> Self {
        Self::styled(RunKind::Code, content)
    }

    /// Link run: `content` is the anchor text
    pub fn link(content: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: RunKind::Link,
            target: Some(url.into()),
        }
    }

    /// Image run: `content` is the alt text
    pub fn image(content: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: RunKind::Image,
            target: Some(url.into()),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn kind(&self) -> RunKind {
        self.kind
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn is_plain(&self) -> bool {
        self.kind == RunKind::Plain
    }
}

/// Parse inline markdown into runs
pub fn text_to_runs(text: &str) -> ParseResult<Vec<InlineRun>> {
    let runs = vec![InlineRun::plain(text)];
    let runs = split_delimiter(runs, "**", InlineRun::bold)?;
    let runs = split_delimiter(runs, "_", InlineRun::italic)?;
    let runs = split_delimiter(runs, "`", InlineRun::code)?;
    let runs = split_images(runs);
    let runs = split_links(runs);

    Ok(runs
        .into_iter()
        .filter(|run| !(run.is_plain() && run.content.is_empty()))
        .collect())
}

/// Split plain runs on a paired delimiter
///
/// Text between a pair of delimiters becomes a run built by `make` (kept even
/// when empty); text outside becomes plain runs (dropped when empty). An
/// unpaired delimiter is an error. Non-plain runs pass through unchanged.
pub fn split_delimiter(
    runs: Vec<InlineRun>,
    delimiter: &str,
    make: fn(String) -> InlineRun,
) -> ParseResult<Vec<InlineRun>> {
    let mut result = Vec::with_capacity(runs.len());

    for run in runs {
        if !run.is_plain() {
            result.push(run);
            continue;
        }

        let parts: Vec<&str> = run.content.split(delimiter).collect();
        if parts.len() % 2 == 0 {
            return Err(ParseError::UnmatchedDelimiter {
                delimiter: delimiter.to_string(),
            });
        }

        for (i, part) in parts.into_iter().enumerate() {
            if i % 2 == 1 {
                result.push(make(part.to_string()));
            } else if !part.is_empty() {
                result.push(InlineRun::plain(part));
            }
        }
    }

    Ok(result)
}

/// Split `![alt](url)` images out of plain runs
pub fn split_images(runs: Vec<InlineRun>) -> Vec<InlineRun> {
    split_matches(runs, find_images, InlineRun::image)
}

/// Split `[anchor](url)` links out of plain runs
pub fn split_links(runs: Vec<InlineRun>) -> Vec<InlineRun> {
    split_matches(runs, find_links, InlineRun::link)
}

/// Extract `(alt, url)` pairs for every image in `text`
pub fn extract_images(text: &str) -> Vec<(String, String)> {
    find_images(text)
        .into_iter()
        .map(|m| (m.label.to_string(), m.url.to_string()))
        .collect()
}

/// Extract `(anchor, url)` pairs for every link in `text`, skipping images
pub fn extract_links(text: &str) -> Vec<(String, String)> {
    find_links(text)
        .into_iter()
        .map(|m| (m.label.to_string(), m.url.to_string()))
        .collect()
}

/// A bracket/parenthesis construct located in a string
struct BracketMatch<'a> {
    start: usize,
    end: usize,
    label: &'a str,
    url: &'a str,
}

fn image_regex() -> &'static Regex {
    static IMAGE: OnceLock<Regex> = OnceLock::new();
    IMAGE.get_or_init(|| {
        Regex::new(r"!\[([^\[\]]*)\]\(([^\(\)]*)\)").expect("Invalid image regex")
    })
}

fn link_regex() -> &'static Regex {
    static LINK: OnceLock<Regex> = OnceLock::new();
    LINK.get_or_init(|| Regex::new(r"\[([^\[\]]*)\]\(([^\(\)]*)\)").expect("Invalid link regex"))
}

fn find_images(text: &str) -> Vec<BracketMatch<'_>> {
    find_bracketed(text, image_regex(), false)
}

fn find_links(text: &str) -> Vec<BracketMatch<'_>> {
    find_bracketed(text, link_regex(), true)
}

/// Scan `text` left to right for non-overlapping matches of `pattern`
///
/// With `reject_after_bang`, a match directly preceded by `!` is skipped and
/// the scan resumes one byte after its opening bracket.
fn find_bracketed<'a>(
    text: &'a str,
    pattern: &Regex,
    reject_after_bang: bool,
) -> Vec<BracketMatch<'a>> {
    let mut matches = Vec::new();
    let mut pos = 0;

    while pos <= text.len() {
        let Some(caps) = pattern.captures_at(text, pos) else {
            break;
        };
        let (Some(whole), Some(label), Some(url)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            break;
        };

        if reject_after_bang && text[..whole.start()].ends_with('!') {
            // `[` is ASCII, so this stays on a char boundary
            pos = whole.start() + 1;
            continue;
        }

        matches.push(BracketMatch {
            start: whole.start(),
            end: whole.end(),
            label: label.as_str(),
            url: url.as_str(),
        });
        pos = whole.end();
    }

    matches
}

fn split_matches(
    runs: Vec<InlineRun>,
    find: for<'a> fn(&'a str) -> Vec<BracketMatch<'a>>,
    make: fn(String, String) -> InlineRun,
) -> Vec<InlineRun> {
    let mut result = Vec::with_capacity(runs.len());

    for run in runs {
        if !run.is_plain() {
            result.push(run);
            continue;
        }

        let found = find(&run.content);
        if found.is_empty() {
            result.push(run);
            continue;
        }

        let mut last = 0;
        for m in &found {
            if m.start > last {
                result.push(InlineRun::plain(&run.content[last..m.start]));
            }
            result.push(make(m.label.to_string(), m.url.to_string()));
            last = m.end;
        }
        if last < run.content.len() {
            result.push(InlineRun::plain(&run.content[last..]));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_paragraph() {
        let runs = text_to_runs("This is **bolded** paragraph").unwrap();
        assert_eq!(
            runs,
            vec![
                InlineRun::plain("This is "),
                InlineRun::bold("bolded"),
                InlineRun::plain(" paragraph"),
            ]
        );
    }

    #[test]
    fn test_split_delimiter_code() {
        let runs = split_delimiter(
            vec![InlineRun::plain("This is text with a `code block` word")],
            "`",
            InlineRun::code,
        )
        .unwrap();
        assert_eq!(
            runs,
            vec![
                InlineRun::plain("This is text with a "),
                InlineRun::code("code block"),
                InlineRun::plain(" word"),
            ]
        );
    }

    #[test]
    fn test_split_delimiter_multiple_pairs() {
        let runs = split_delimiter(
            vec![InlineRun::plain("**a** and **b**")],
            "**",
            InlineRun::bold,
        )
        .unwrap();
        assert_eq!(
            runs,
            vec![
                InlineRun::bold("a"),
                InlineRun::plain(" and "),
                InlineRun::bold("b"),
            ]
        );
    }

    #[test]
    fn test_split_delimiter_keeps_empty_styled_run() {
        let runs =
            split_delimiter(vec![InlineRun::plain("a____b")], "__", InlineRun::italic).unwrap();
        assert_eq!(
            runs,
            vec![
                InlineRun::plain("a"),
                InlineRun::italic(""),
                InlineRun::plain("b"),
            ]
        );
    }

    #[test]
    fn test_split_delimiter_passes_non_plain_through() {
        let runs = split_delimiter(
            vec![InlineRun::bold("snake_case"), InlineRun::plain("x")],
            "_",
            InlineRun::italic,
        )
        .unwrap();
        assert_eq!(runs, vec![InlineRun::bold("snake_case"), InlineRun::plain("x")]);
    }

    #[test]
    fn test_unmatched_delimiter() {
        let err = text_to_runs("text `code").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnmatchedDelimiter {
                delimiter: "`".to_string()
            }
        );
        assert_eq!(err.to_string(), "Invalid markdown, unmatched delimiter: `");
    }

    #[test]
    fn test_unmatched_bold() {
        assert!(matches!(
            text_to_runs("**open"),
            Err(ParseError::UnmatchedDelimiter { delimiter }) if delimiter == "**"
        ));
    }

    #[test]
    fn test_bold_shields_underscores_and_backticks() {
        let runs = text_to_runs("**my_var `x`** then _it_").unwrap();
        assert_eq!(
            runs,
            vec![
                InlineRun::bold("my_var `x`"),
                InlineRun::plain(" then "),
                InlineRun::italic("it"),
            ]
        );
    }

    #[test]
    fn test_extract_images() {
        let found = extract_images(
            "This is text with an ![image](https://i.imgur.com/zjjcJKZ.png) and ![other](/b.png)",
        );
        assert_eq!(
            found,
            vec![
                (
                    "image".to_string(),
                    "https://i.imgur.com/zjjcJKZ.png".to_string()
                ),
                ("other".to_string(), "/b.png".to_string()),
            ]
        );
    }

    #[test]
    fn test_extract_links_skips_images() {
        let found = extract_links("a [link](https://boot.dev) and ![img](/i.png)");
        assert_eq!(
            found,
            vec![("link".to_string(), "https://boot.dev".to_string())]
        );
    }

    #[test]
    fn test_extract_rejects_nested_brackets() {
        assert!(extract_links("[a [b] c](url)").is_empty());
        assert!(extract_images("![alt](url (x))").is_empty());
    }

    #[test]
    fn test_split_images() {
        let runs = split_images(vec![InlineRun::plain(
            "This is text with an ![image](https://i.imgur.com/zjjcJKZ.png) and another ![second image](https://i.imgur.com/3elNhQu.png)",
        )]);
        assert_eq!(
            runs,
            vec![
                InlineRun::plain("This is text with an "),
                InlineRun::image("image", "https://i.imgur.com/zjjcJKZ.png"),
                InlineRun::plain(" and another "),
                InlineRun::image("second image", "https://i.imgur.com/3elNhQu.png"),
            ]
        );
    }

    #[test]
    fn test_split_links_with_trailing_text() {
        let runs = split_links(vec![InlineRun::plain(
            "[to boot dev](https://www.boot.dev) and [youtube](https://youtube.com) ok",
        )]);
        assert_eq!(
            runs,
            vec![
                InlineRun::link("to boot dev", "https://www.boot.dev"),
                InlineRun::plain(" and "),
                InlineRun::link("youtube", "https://youtube.com"),
                InlineRun::plain(" ok"),
            ]
        );
    }

    #[test]
    fn test_split_links_respects_bang() {
        let runs = split_links(vec![InlineRun::plain("!![a](b) [c](d)")]);
        assert_eq!(
            runs,
            vec![InlineRun::plain("!![a](b) "), InlineRun::link("c", "d")]
        );
    }

    #[test]
    fn test_split_without_matches_keeps_run() {
        let run = InlineRun::plain("nothing here");
        assert_eq!(split_links(vec![run.clone()]), vec![run.clone()]);
        assert_eq!(split_images(vec![run.clone()]), vec![run]);
    }

    #[test]
    fn test_full_pipeline() {
        let runs = text_to_runs(
            "This is **text** with an _italic_ word and a `code block` and an ![obi wan image](https://i.imgur.com/fJRm4Vk.jpeg) and a [link](https://boot.dev)",
        )
        .unwrap();
        assert_eq!(
            runs,
            vec![
                InlineRun::plain("This is "),
                InlineRun::bold("text"),
                InlineRun::plain(" with an "),
                InlineRun::italic("italic"),
                InlineRun::plain(" word and a "),
                InlineRun::code("code block"),
                InlineRun::plain(" and an "),
                InlineRun::image("obi wan image", "https://i.imgur.com/fJRm4Vk.jpeg"),
                InlineRun::plain(" and a "),
                InlineRun::link("link", "https://boot.dev"),
            ]
        );
    }

    #[test]
    fn test_image_then_link_adjacent() {
        let runs = text_to_runs("![i](a.png)[l](b.html)").unwrap();
        assert_eq!(
            runs,
            vec![InlineRun::image("i", "a.png"), InlineRun::link("l", "b.html")]
        );
    }

    #[test]
    fn test_empty_text() {
        assert!(text_to_runs("").unwrap().is_empty());
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(
            text_to_runs("plain text").unwrap(),
            vec![InlineRun::plain("plain text")]
        );
    }

    #[test]
    fn test_url_with_underscore_is_split_as_italic_first() {
        // Italic runs before links, so underscores in a URL must be paired
        assert!(text_to_runs("[a](http://x.com/a_b)").is_err());
        let runs = text_to_runs("[a](http://x.com/a_b_c)").unwrap();
        assert_eq!(runs[1], InlineRun::italic("b"));
    }

    #[test]
    fn test_target_invariant() {
        assert_eq!(InlineRun::bold("x").target(), None);
        assert_eq!(InlineRun::link("x", "u").target(), Some("u"));
        assert_eq!(InlineRun::image("x", "u").kind(), RunKind::Image);
    }

    #[test]
    fn test_run_json() {
        let json = serde_json::to_string(&InlineRun::link("docs", "/docs")).unwrap();
        assert_eq!(json, r#"{"content":"docs","kind":"link","target":"/docs"}"#);
        let json = serde_json::to_string(&InlineRun::plain("x")).unwrap();
        assert_eq!(json, r#"{"content":"x","kind":"plain"}"#);
    }
}
