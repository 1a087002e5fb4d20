//! Narrow frontmatter reader for catalog documents.
//!
//! Only flat `key: value` lines are understood. A line indented by at least
//! two spaces continues the value of the previous key, which is how folded
//! multi-line descriptions are written in `SKILL.md` files. Everything else
//! inside the block (lists, nested maps, comments) is ignored rather than
//! guessed at.

use std::collections::HashMap;

use crate::error::{Error, Result};

const DELIMITER: &str = "---";
const CONTINUATION_INDENT: &str = "  ";
const DEFAULT_VERSION: &str = "1.0.0";

/// Metadata projected out of a catalog document's frontmatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemMetadata {
    pub name: String,
    pub description: String,
    pub version: String,
    pub author: Option<String>,
    pub license: Option<String>,
}

impl Default for ItemMetadata {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            version: DEFAULT_VERSION.to_string(),
            author: None,
            license: None,
        }
    }
}

impl ItemMetadata {
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        let description = fields
            .get("description")
            .map(|d| strip_scalar_indicator(d).to_string())
            .unwrap_or_default();

        Self {
            name: fields.get("name").cloned().unwrap_or_default(),
            description,
            version: fields
                .get("version")
                .map(|v| v.replace('"', ""))
                .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            author: fields.get("author").cloned(),
            license: fields.get("license").cloned(),
        }
    }
}

/// Parse the leading frontmatter block of `content` into metadata.
pub fn parse_metadata(content: &str) -> Result<ItemMetadata> {
    let fields = parse_frontmatter(content)?;
    Ok(ItemMetadata::from_fields(&fields))
}

/// Parse the leading frontmatter block of `content` into raw key/value pairs.
///
/// Fails with [`Error::NoFrontmatter`] when the document does not open with
/// a `---` line, the block is never closed, or the block is empty.
pub fn parse_frontmatter(content: &str) -> Result<HashMap<String, String>> {
    let body = extract_block(content)?;

    let mut acc = Accumulator::default();
    for line in body {
        acc.feed(line);
    }
    Ok(acc.finish())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Outside,
    Inside,
}

fn extract_block(content: &str) -> Result<Vec<&str>> {
    let mut state = Block::Outside;
    let mut body = Vec::new();

    for line in content.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        match state {
            Block::Outside => {
                // The block must be anchored at the very first line.
                if line != DELIMITER {
                    return Err(Error::NoFrontmatter);
                }
                state = Block::Inside;
            }
            Block::Inside if line == DELIMITER => {
                // Only a block with no content at all is missing; blank
                // lines still count as a (default-valued) block.
                if body.len() <= 1 && body.iter().all(|l: &&str| l.is_empty()) {
                    return Err(Error::NoFrontmatter);
                }
                return Ok(body);
            }
            Block::Inside => body.push(line),
        }
    }

    Err(Error::NoFrontmatter)
}

/// Single-slot accumulator: the key being read and its value so far.
#[derive(Debug, Default)]
struct Accumulator {
    current: Option<(String, String)>,
    fields: HashMap<String, String>,
}

impl Accumulator {
    fn feed(&mut self, line: &str) {
        if let Some((key, rest)) = split_key_line(line) {
            self.flush();
            self.current = Some((key.to_string(), rest.trim().to_string()));
        } else if line.starts_with(CONTINUATION_INDENT)
            && let Some((_, value)) = self.current.as_mut()
        {
            value.push(' ');
            value.push_str(line.trim());
        }
    }

    fn flush(&mut self) {
        if let Some((key, value)) = self.current.take() {
            self.fields.insert(key, value.trim().to_string());
        }
    }

    fn finish(mut self) -> HashMap<String, String> {
        self.flush();
        self.fields
    }
}

/// Split `identifier: rest`, where identifier is one or more word characters
/// at column zero followed immediately by a colon.
fn split_key_line(line: &str) -> Option<(&str, &str)> {
    let end = line
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(line.len());
    if end == 0 {
        return None;
    }
    let rest = line[end..].strip_prefix(':')?;
    Some((&line[..end], rest))
}

fn strip_scalar_indicator(value: &str) -> &str {
    value.strip_prefix('>').unwrap_or(value).trim_start()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flat_fields() {
        let doc = "---\nname: react-19\ndescription: React 19 patterns\nversion: \"1.2.0\"\nauthor: gpolanco\nlicense: MIT\n---\n# React 19\n";
        let meta = parse_metadata(doc).unwrap();

        assert_eq!(meta.name, "react-19");
        assert_eq!(meta.description, "React 19 patterns");
        assert_eq!(meta.version, "1.2.0");
        assert_eq!(meta.author.as_deref(), Some("gpolanco"));
        assert_eq!(meta.license.as_deref(), Some("MIT"));
    }

    #[test]
    fn joins_continuation_lines() {
        let doc = "---\nname: forms\ndescription: >\n  Build forms with\n  react-hook-form and\n  zod validation.\n---\nbody";
        let meta = parse_metadata(doc).unwrap();

        assert_eq!(
            meta.description,
            "Build forms with react-hook-form and zod validation."
        );
    }

    #[test]
    fn continuation_on_same_line_as_key() {
        let doc = "---\ndescription: First part\n    second part\n  third part\nname: x\n---\n";
        let fields = parse_frontmatter(doc).unwrap();

        assert_eq!(fields["description"], "First part second part third part");
        assert_eq!(fields["name"], "x");
    }

    #[test]
    fn missing_fields_use_defaults() {
        let meta = parse_metadata("---\nauthor: someone\n---\n").unwrap();

        assert_eq!(meta.name, "");
        assert_eq!(meta.description, "");
        assert_eq!(meta.version, "1.0.0");
        assert_eq!(meta.license, None);
    }

    #[test]
    fn last_duplicate_wins() {
        let fields = parse_frontmatter("---\nname: first\nname: second\n---\n").unwrap();
        assert_eq!(fields["name"], "second");
    }

    #[test]
    fn keeps_colons_inside_values() {
        let fields = parse_frontmatter("---\nhomepage: https://example.com/a:b\n---\n").unwrap();
        assert_eq!(fields["homepage"], "https://example.com/a:b");
    }

    #[test]
    fn ignores_unrecognised_lines() {
        let doc = "---\n# comment\nname: tools\n- list item\n tags: one-space\nkey-with-dash: nope\n---\n";
        let fields = parse_frontmatter(doc).unwrap();

        assert_eq!(fields.len(), 1);
        assert_eq!(fields["name"], "tools");
    }

    #[test]
    fn indented_lines_before_any_key_are_dropped() {
        let fields = parse_frontmatter("---\n  orphan\nname: x\n---\n").unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["name"], "x");
    }

    #[test]
    fn accepts_crlf_documents() {
        let meta = parse_metadata("---\r\nname: win\r\ndescription: a\r\n  b\r\n---\r\nbody").unwrap();
        assert_eq!(meta.name, "win");
        assert_eq!(meta.description, "a b");
    }

    #[test]
    fn requires_block_at_start() {
        let err = parse_frontmatter("# Title\n---\nname: x\n---\n").unwrap_err();
        assert!(matches!(err, Error::NoFrontmatter));
    }

    #[test]
    fn requires_closing_delimiter() {
        let err = parse_frontmatter("---\nname: x\n# never closed\n").unwrap_err();
        assert!(matches!(err, Error::NoFrontmatter));
    }

    #[test]
    fn empty_block_is_not_frontmatter() {
        assert!(matches!(
            parse_frontmatter("---\n---\n# body"),
            Err(Error::NoFrontmatter)
        ));
        assert!(matches!(
            parse_frontmatter("---\n\n---\n"),
            Err(Error::NoFrontmatter)
        ));
    }

    #[test]
    fn blank_block_reads_as_defaults() {
        let whitespace = parse_metadata("---\n  \n---\n# body").unwrap();
        let unrecognised = parse_metadata("---\nfoo bar\n---\n# body").unwrap();

        assert_eq!(whitespace, ItemMetadata::default());
        assert_eq!(whitespace, unrecognised);
        assert_eq!(
            parse_metadata("---\n\n\n---\n").unwrap(),
            ItemMetadata::default()
        );
    }

    #[test]
    fn version_quotes_are_stripped() {
        let meta = parse_metadata("---\nversion: \"2.0.0\"\n---\n").unwrap();
        assert_eq!(meta.version, "2.0.0");
    }

    #[test]
    fn description_indicator_without_continuation() {
        let meta = parse_metadata("---\ndescription: >   Short text\n---\n").unwrap();
        assert_eq!(meta.description, "Short text");
    }

    #[test]
    fn continuation_round_trip() {
        let expected = [
            ("name", "round-trip"),
            ("description", "alpha beta gamma delta"),
            ("license", "Apache-2.0"),
        ];
        let doc = "---\nname: round-trip\ndescription: alpha\n  beta\n  gamma   \n    delta\nlicense:   Apache-2.0  \n---\n";
        let fields = parse_frontmatter(doc).unwrap();

        for (key, value) in expected {
            assert_eq!(fields[key], value, "field {key}");
        }
    }
}
