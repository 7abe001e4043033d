//! Minimal CSS selector support: compound selectors (`tag#id.class`) and
//! comma-separated groups. Combinators are not supported.

use thiserror::Error;

use crate::document::{Document, NodeId};

/// Errors produced while parsing a selector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    #[error("missing name after '{prefix}' at offset {offset}")]
    MissingName { prefix: char, offset: usize },

    #[error("combinators are not supported (offset {0})")]
    Combinator(usize),
}

/// A single compound selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        Self::parse_at(input, 0)
    }

    fn parse_at(input: &str, base: usize) -> Result<Self, SelectorError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SelectorError::Empty);
        }
        let lead = input.len() - input.trim_start().len();
        let base = base + lead;

        let mut selector = Selector::default();
        let mut chars = trimmed.char_indices().peekable();

        // Optional leading tag or universal selector
        let tag = take_name(trimmed, &mut chars);
        if !tag.is_empty() {
            selector.tag = Some(tag.to_ascii_lowercase());
        } else if let Some(&(_, '*')) = chars.peek() {
            chars.next();
        }

        while let Some((offset, ch)) = chars.next() {
            match ch {
                '#' | '.' => {
                    let name = take_name(trimmed, &mut chars);
                    if name.is_empty() {
                        return Err(SelectorError::MissingName {
                            prefix: ch,
                            offset: base + offset,
                        });
                    }
                    if ch == '#' {
                        selector.id = Some(name.to_string());
                    } else {
                        selector.classes.push(name.to_string());
                    }
                }
                c if c.is_whitespace() || c == '>' || c == '+' || c == '~' => {
                    return Err(SelectorError::Combinator(base + offset));
                }
                c => {
                    return Err(SelectorError::UnexpectedChar {
                        ch: c,
                        offset: base + offset,
                    });
                }
            }
        }

        Ok(selector)
    }

    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        if !doc.contains(node) {
            return false;
        }
        if let Some(tag) = &self.tag {
            if doc.tag(node) != Some(tag.as_str()) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if doc.element_id(node) != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|c| doc.has_class(node, c))
    }
}

fn take_name<'a>(
    input: &'a str,
    chars: &mut std::iter::Peekable<std::str::CharIndices<'a>>,
) -> &'a str {
    let Some(&(start, _)) = chars.peek() else {
        return "";
    };
    let mut end = start;
    while let Some(&(offset, ch)) = chars.peek() {
        if ch.is_alphanumeric() || ch == '-' || ch == '_' {
            end = offset + ch.len_utf8();
            chars.next();
        } else {
            break;
        }
    }
    &input[start..end]
}

/// Comma-separated group of selectors; matches when any member matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList(pub Vec<Selector>);

impl SelectorList {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut selectors = Vec::new();
        let mut offset = 0;
        for part in input.split(',') {
            selectors.push(Selector::parse_at(part, offset)?);
            offset += part.len() + 1;
        }
        Ok(Self(selectors))
    }

    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.0.iter().any(|s| s.matches(doc, node))
    }
}
