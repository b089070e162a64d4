//! Markdown to prose.
//!
//! Uses pulldown-cmark for CommonMark parsing. Readability counters expect
//! running prose, so markup is dropped and every block is closed with a
//! sentence terminator.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Strip markdown formatting, returning plain prose text.
///
/// Removes:
/// - YAML front matter
/// - Code blocks (fenced and indented) and inline code
/// - HTML
/// - Tables
/// - Image alt text
///
/// Headings, list items, paragraphs and blockquotes are kept. Each one ends
/// with a sentence break, so a heading never runs into the paragraph after it.
///
/// ```
/// use readstat_core::markdown::strip_to_prose;
///
/// let prose = strip_to_prose("# Title\n\nSome *good* text");
/// assert_eq!(prose, "Title. Some good text.");
/// ```
#[tracing::instrument(skip_all, fields(input_len = text.len()))]
pub fn strip_to_prose(text: &str) -> String {
    let text = strip_frontmatter(text);

    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(text, options);

    let mut result = String::with_capacity(text.len() / 2);
    let mut skip_depth: usize = 0;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(_) | Tag::Table(_) | Tag::Image { .. }) => {
                skip_depth += 1;
            }
            Event::End(TagEnd::CodeBlock | TagEnd::Table | TagEnd::Image) => {
                skip_depth = skip_depth.saturating_sub(1);
            }

            Event::Text(t) if skip_depth == 0 => {
                result.push_str(&t);
            }
            Event::SoftBreak | Event::HardBreak if skip_depth == 0 => {
                result.push(' ');
            }

            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item)
                if skip_depth == 0 =>
            {
                end_sentence(&mut result);
            }

            _ => {}
        }
    }

    result.trim_end().to_string()
}

/// Close the current block with a full stop unless it already ends a sentence.
fn end_sentence(out: &mut String) {
    let trimmed = out.trim_end().len();
    out.truncate(trimmed);
    match out.chars().last() {
        None => return,
        Some('.' | '!' | '?') => {}
        Some(_) => out.push('.'),
    }
    out.push(' ');
}

/// Strip YAML front matter delimited by `---` lines.
fn strip_frontmatter(text: &str) -> &str {
    let trimmed = text.trim_start();
    let Some(after_opening) = trimmed.strip_prefix("---") else {
        return text;
    };
    let Some(close_pos) = after_opening.find("\n---") else {
        return text;
    };

    let remainder = &after_opening[close_pos + 4..];
    remainder.strip_prefix('\n').unwrap_or(remainder)
}
