//! Flat, single-pass scan of template markup.
//!
//! This is not an XML parser: there is no nesting, namespace handling or
//! entity decoding. Every `<name ...>` whose name is one of the supported
//! shapes is picked up in source order; everything else is skipped.

use crate::shapes::{adapt, Attributes, GeometryElement, ShapeKind};
use tracing::debug;

/// One supported tag found in the markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    pub kind: ShapeKind,
    /// Byte offset of the opening `<`.
    pub offset: usize,
    /// Full tag text, from `<` to `>` inclusive.
    pub source: &'a str,
    /// Text between the tag name and the closing `>`.
    body: &'a str,
}

impl<'a> Tag<'a> {
    /// Attribute map of the tag, built in one pass.
    pub fn attributes(&self) -> Attributes {
        parse_attributes(self.body)
    }
}

/// Iterator over the supported tags of a document.
#[derive(Debug, Clone)]
pub struct Tags<'a> {
    document: &'a str,
    pos: usize,
}

impl<'a> Iterator for Tags<'a> {
    type Item = Tag<'a>;

    fn next(&mut self) -> Option<Tag<'a>> {
        while self.pos < self.document.len() {
            let open = self.pos + self.document[self.pos..].find('<')?;
            let after_open = open + 1;

            let matched = match_tag_name(&self.document[after_open..]).and_then(|kind| {
                let name_end = after_open + kind.tag_name().len();
                let close = name_end + self.document[name_end..].find('>')?;
                Some((kind, name_end, close))
            });

            match matched {
                Some((kind, name_end, close)) => {
                    self.pos = close + 1;
                    return Some(Tag {
                        kind,
                        offset: open,
                        source: &self.document[open..=close],
                        body: &self.document[name_end..close],
                    });
                }
                None => self.pos = after_open,
            }
        }
        None
    }
}

/// Find every supported tag in source order.
pub fn tags(document: &str) -> Tags<'_> {
    Tags { document, pos: 0 }
}

/// Compile every supported tag into geometry, in document order.
///
/// Tags whose required attributes are missing or malformed are skipped;
/// a document without supported tags gives an empty list.
pub fn scan(document: &str) -> Vec<GeometryElement> {
    let mut seen = 0usize;
    let elements: Vec<GeometryElement> = tags(document)
        .inspect(|_| seen += 1)
        .filter_map(|tag| adapt(tag.kind, &tag.attributes()))
        .collect();

    debug!(tags = seen, elements = elements.len(), "scanned template markup");
    elements
}

/// Tag name at the start of `rest`, if it is supported and ends at a word boundary.
fn match_tag_name(rest: &str) -> Option<ShapeKind> {
    ShapeKind::ALL.into_iter().find(|kind| {
        let name = kind.tag_name();
        rest.starts_with(name)
            && !rest[name.len()..]
                .chars()
                .next()
                .is_some_and(|c| c.is_alphanumeric() || c == '_')
    })
}

/// Extract `name="value"` pairs from a tag body.
///
/// Bare names and unquoted values are skipped without disturbing the
/// attributes around them. An unterminated quote ends the scan.
fn parse_attributes(body: &str) -> Attributes {
    let mut attrs = Attributes::new();
    let mut rest = body;

    loop {
        rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == '/');
        if rest.is_empty() {
            break;
        }

        let name_end = rest
            .find(|c: char| c == '=' || c.is_whitespace() || c == '/')
            .unwrap_or(rest.len());
        let name = &rest[..name_end];
        let after_name = rest[name_end..].trim_start();

        let Some(value) = after_name.strip_prefix('=') else {
            rest = after_name;
            continue;
        };
        let value = value.trim_start();

        match value.chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let Some(len) = value[1..].find(quote) else {
                    debug!(attribute = name, "unterminated attribute value");
                    break;
                };
                if !name.is_empty() {
                    attrs.insert(name, &value[1..1 + len]);
                }
                rest = &value[1 + len + 1..];
            }
            _ => {
                let end = value.find(char::is_whitespace).unwrap_or(value.len());
                rest = &value[end..];
            }
        }
    }

    attrs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_in_source_order() {
        let doc = r#"<rect x="0" y="0" width="1" height="1"/><circle cx="1" cy="1" r="1"/>"#;
        let kinds: Vec<ShapeKind> = tags(doc).map(|t| t.kind).collect();
        assert_eq!(kinds, vec![ShapeKind::Rect, ShapeKind::Circle]);
    }

    #[test]
    fn test_unsupported_and_prefixed_names_ignored() {
        let doc = r#"<svg><g><polyline points="0,0 1,1"/><lines x1="0"/><text>hi</text></g></svg>"#;
        assert_eq!(tags(doc).count(), 0);
    }

    #[test]
    fn test_tag_without_close_is_skipped() {
        assert_eq!(tags(r#"<circle cx="1" cy="1" r="1""#).count(), 0);
    }

    #[test]
    fn test_tag_source_and_offset() {
        let doc = r#"  <line x1="0" y1="0" x2="5" y2="5">"#;
        let tag = tags(doc).next().unwrap();
        assert_eq!(tag.offset, 2);
        assert_eq!(tag.source, &doc[2..]);
    }

    #[test]
    fn test_parse_attributes() {
        let attrs = parse_attributes(r#" cx="10" cy='20' r = "5" hidden fill=red stroke-width="2" /"#);
        assert_eq!(attrs.number("cx"), Some(10.0));
        assert_eq!(attrs.number("cy"), Some(20.0));
        assert_eq!(attrs.number("r"), Some(5.0));
        assert_eq!(attrs.number("stroke-width"), Some(2.0));
        assert!(attrs.get("hidden").is_none());
        assert!(attrs.get("fill").is_none());
    }

    #[test]
    fn test_attribute_names_are_exact() {
        // "cx" must not satisfy a lookup for "x"
        let attrs = parse_attributes(r#" cx="10""#);
        assert!(attrs.get("x").is_none());
    }

    #[test]
    fn test_unterminated_quote_keeps_earlier_attributes() {
        let attrs = parse_attributes(r#" r="4" cx="1"#);
        assert_eq!(attrs.number("r"), Some(4.0));
        assert!(attrs.get("cx").is_none());
    }

    #[test]
    fn test_scan_empty_document() {
        assert!(scan("").is_empty());
        assert!(scan("no markup here").is_empty());
    }
}
