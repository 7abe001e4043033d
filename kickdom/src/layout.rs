//! Box metrics for a headless document.
//!
//! Elements stack vertically; every text-bearing element occupies one line
//! unless it carries an explicit height. Hidden elements are measured as if
//! they were shown, so a control can still be sized after it was hidden.

use unicode_width::UnicodeWidthStr;

use crate::document::{Document, NodeId};

/// Height of a single line of text, in cells.
pub const LINE_HEIGHT: u16 = 1;

/// Extra width a `<select>` reserves for its drop arrow.
pub const SELECT_CHROME_WIDTH: u16 = 2;

/// Rendered height of `id` including its content.
pub fn outer_height(doc: &Document, id: NodeId) -> u16 {
    if !doc.contains(id) {
        return 0;
    }
    if let Some(height) = doc.height(id) {
        return height;
    }
    let children = doc.children(id);
    if children.is_empty() {
        return match doc.own_text(id) {
            Some(_) => LINE_HEIGHT,
            None => 0,
        };
    }
    children
        .iter()
        .fold(0u16, |acc, &child| acc.saturating_add(outer_height(doc, child)))
}

/// Rendered width of `id`: explicit width, else the widest line of content.
pub fn outer_width(doc: &Document, id: NodeId) -> u16 {
    if !doc.contains(id) {
        return 0;
    }
    if let Some(width) = doc.width(id) {
        return width;
    }
    let own = doc
        .own_text(id)
        .map(|t| u16::try_from(UnicodeWidthStr::width(t)).unwrap_or(u16::MAX))
        .unwrap_or(0);
    let content = doc
        .children(id)
        .iter()
        .map(|&child| outer_width(doc, child))
        .fold(own, u16::max);
    if doc.is_select(id) {
        content.saturating_add(SELECT_CHROME_WIDTH)
    } else {
        content
    }
}

/// Sum of the heights of the siblings preceding `id`.
pub fn offset_in_parent(doc: &Document, id: NodeId) -> u16 {
    doc.prev_siblings(id)
        .into_iter()
        .fold(0u16, |acc, sibling| acc.saturating_add(outer_height(doc, sibling)))
}
