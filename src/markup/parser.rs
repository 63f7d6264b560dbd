//! Stack-based markup parser.
//!
//! Parses an HTML subset into nodes of an existing [`Dom`]. Uses the
//! logos-based tokenizer from [`crate::markup::tokenizer`]. Whitespace-only
//! text between tags is dropped so indented templates produce the same tree
//! as compact ones.

use logos::Logos;

use crate::dom::{Dom, NodeData, NodeId};
use crate::markup::tokenizer::{tokenize, AttrToken, Token};

/// Elements that never have children or a closing tag.
pub const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta", "col"];

/// Errors from markup parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkupError {
    #[error("unexpected input at byte {offset}: {message}")]
    UnexpectedToken { offset: usize, message: String },
    #[error("mismatched closing tag at byte {offset}: expected </{expected}>, found </{found}>")]
    MismatchedTag {
        offset: usize,
        expected: String,
        found: String,
    },
    #[error("unexpected end of input: unclosed <{0}>")]
    UnexpectedEof(String),
}

/// Whether `tag` is a void element.
pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

/// Parse `source` and append the resulting nodes as children of `parent`.
///
/// Returns the ids of the top-level nodes created. On error, nodes created
/// before the failure are removed again so `dom` is left unchanged.
pub fn parse_into(dom: &mut Dom, parent: NodeId, source: &str) -> Result<Vec<NodeId>, MarkupError> {
    let mut created = Vec::new();
    let result = build(dom, parent, source, &mut created);
    if result.is_err() {
        for node in created.drain(..) {
            dom.remove(node);
        }
    }
    result.map(|()| created)
}

/// Parse a standalone fragment into a fresh [`Dom`] under a `#document` root.
pub fn parse_document(source: &str) -> Result<(Dom, NodeId), MarkupError> {
    let mut dom = Dom::new();
    let root = dom.insert(NodeData::new("#document"));
    parse_into(&mut dom, root, source)?;
    Ok((dom, root))
}

fn build(
    dom: &mut Dom,
    parent: NodeId,
    source: &str,
    created: &mut Vec<NodeId>,
) -> Result<(), MarkupError> {
    // (node, tag) for every element still open.
    let mut open: Vec<(NodeId, String)> = Vec::new();

    for item in tokenize(source) {
        let (token, offset, text) = item.map_err(|offset| MarkupError::UnexpectedToken {
            offset,
            message: "stray '<' or unterminated comment".to_owned(),
        })?;
        let current = open.last().map_or(parent, |(node, _)| *node);

        match token {
            Token::Comment => {}
            Token::Text => {
                if text.trim().is_empty() {
                    continue;
                }
                let node = dom.insert_child(current, NodeData::text(decode_entities(text)));
                if open.is_empty() {
                    created.push(node);
                }
            }
            Token::OpenTag => {
                let (data, self_closing) = parse_open_tag(text, offset)?;
                let tag = data.tag.clone();
                let node = dom.insert_child(current, data);
                if open.is_empty() {
                    created.push(node);
                }
                if !self_closing && !is_void(&tag) {
                    open.push((node, tag));
                }
            }
            Token::CloseTag => {
                let found = text[2..text.len() - 1].trim().to_ascii_lowercase();
                match open.pop() {
                    Some((_, expected)) if expected == found => {}
                    Some((_, expected)) => {
                        return Err(MarkupError::MismatchedTag {
                            offset,
                            expected,
                            found,
                        })
                    }
                    None => {
                        return Err(MarkupError::UnexpectedToken {
                            offset,
                            message: format!("closing tag </{found}> without an open element"),
                        })
                    }
                }
            }
        }
    }

    match open.pop() {
        Some((_, tag)) => Err(MarkupError::UnexpectedEof(tag)),
        None => Ok(()),
    }
}

/// Parse `<tag attr=value ...>` into node data. Returns whether the tag was
/// written self-closing (`<br/>`).
fn parse_open_tag(text: &str, offset: usize) -> Result<(NodeData, bool), MarkupError> {
    let inner = &text[1..text.len() - 1];
    let name_end = inner
        .find(|c: char| c.is_whitespace() || c == '/')
        .unwrap_or(inner.len());
    let mut data = NodeData::new(inner[..name_end].to_ascii_lowercase());
    let rest = &inner[name_end..];

    let mut self_closing = false;
    let mut pending: Option<String> = None;
    let mut expect_value = false;
    let mut lexer = AttrToken::lexer(rest);

    while let Some(result) = lexer.next() {
        let slice = lexer.slice();
        let token = result.map_err(|()| MarkupError::UnexpectedToken {
            offset: offset + 1 + name_end + lexer.span().start,
            message: format!("invalid attribute syntax '{slice}'"),
        })?;
        self_closing = false;
        match token {
            AttrToken::Name if expect_value => {
                if let Some(name) = pending.take() {
                    data.set_attr(&name, decode_entities(slice));
                }
                expect_value = false;
            }
            AttrToken::Name => {
                if let Some(name) = pending.replace(slice.to_ascii_lowercase()) {
                    data.set_attr(&name, "");
                }
            }
            AttrToken::Eq if pending.is_some() && !expect_value => expect_value = true,
            AttrToken::DoubleQuoted | AttrToken::SingleQuoted if expect_value => {
                if let Some(name) = pending.take() {
                    data.set_attr(&name, decode_entities(&slice[1..slice.len() - 1]));
                }
                expect_value = false;
            }
            AttrToken::Slash if !expect_value => self_closing = true,
            _ => {
                return Err(MarkupError::UnexpectedToken {
                    offset: offset + 1 + name_end + lexer.span().start,
                    message: format!("unexpected '{slice}' in <{}>", data.tag),
                })
            }
        }
    }

    if expect_value {
        return Err(MarkupError::UnexpectedToken {
            offset: offset + text.len() - 1,
            message: format!("attribute without value in <{}>", data.tag),
        });
    }
    if let Some(name) = pending {
        data.set_attr(&name, "");
    }

    Ok((data, self_closing))
}

/// Decode the basic character entities.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_owned();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_nested_elements() {
        let (dom, root) = parse_document(
            r#"
            <table class="grid">
              <thead><tr><th scope="col" data-sortable>Name</th></tr></thead>
            </table>
            "#,
        )
        .unwrap();
        let table = dom.children(root)[0];
        assert_eq!(dom.get(table).unwrap().tag, "table");
        assert!(dom.get(table).unwrap().has_class("grid"));

        let th = dom.query_by_tag("th")[0];
        let data = dom.get(th).unwrap();
        assert_eq!(data.attr("scope"), Some("col"));
        assert_eq!(data.attr("data-sortable"), Some(""));
        assert_eq!(dom.text_content(th), "Name");
    }

    #[test]
    fn whitespace_only_text_is_dropped() {
        let (dom, root) = parse_document("<tr>\n  <td>1</td>\n  <td>2</td>\n</tr>").unwrap();
        let tr = dom.children(root)[0];
        assert_eq!(dom.children(tr).len(), 2);
    }

    #[test]
    fn returns_top_level_nodes() {
        let mut dom = Dom::new();
        let host = dom.insert(NodeData::new("div"));
        let nodes = parse_into(&mut dom, host, "<table></table><div aria-live=polite></div>").unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(dom.children(host), nodes.as_slice());
        assert_eq!(dom.attr(nodes[1], "aria-live"), Some("polite"));
    }

    #[test]
    fn void_and_self_closing() {
        let (dom, root) = parse_document("<p>a<br>b<img src='x.png'/>c</p>").unwrap();
        let p = dom.children(root)[0];
        assert_eq!(dom.children(p).len(), 5);
        assert_eq!(dom.text_content(p), "abc");
    }

    #[test]
    fn decodes_entities() {
        let (dom, root) = parse_document(r#"<td title="a &amp; b">&lt;1&gt; &amp;lt;</td>"#).unwrap();
        let td = dom.children(root)[0];
        assert_eq!(dom.attr(td, "title"), Some("a & b"));
        assert_eq!(dom.text_content(td), "<1> &lt;");
    }

    #[test]
    fn comments_are_skipped() {
        let (dom, root) = parse_document("<tr><!-- header --><td>x</td></tr>").unwrap();
        let tr = dom.children(root)[0];
        assert_eq!(dom.children(tr).len(), 1);
    }

    #[test]
    fn mismatched_closing_tag() {
        let err = parse_document("<tr><td>x</th></tr>").unwrap_err();
        assert_eq!(
            err,
            MarkupError::MismatchedTag {
                offset: 9,
                expected: "td".into(),
                found: "th".into(),
            }
        );
    }

    #[test]
    fn unclosed_element() {
        let err = parse_document("<table><tbody>").unwrap_err();
        assert_eq!(err, MarkupError::UnexpectedEof("tbody".into()));
    }

    #[test]
    fn stray_close_is_error() {
        assert!(matches!(
            parse_document("</td>"),
            Err(MarkupError::UnexpectedToken { offset: 0, .. })
        ));
    }

    #[test]
    fn failed_parse_leaves_dom_unchanged() {
        let mut dom = Dom::new();
        let host = dom.insert(NodeData::new("div"));
        assert!(parse_into(&mut dom, host, "<p>ok</p><table>").is_err());
        assert!(dom.children(host).is_empty());
        assert_eq!(dom.len(), 1);
    }

    #[test]
    fn bad_attribute_syntax() {
        assert!(parse_document(r#"<td ="x">"#).is_err());
        assert!(parse_document("<td a=>").is_err());
    }
}
