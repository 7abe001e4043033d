use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::element::{Content, Element};
use crate::selector::{SelectorError, SelectorList};

/// Handle to a node attached to a [`Document`].
///
/// Handles stay valid until the node (or one of its ancestors) is removed.
/// Accessors on a stale handle return `None` or an empty value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    text: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    width: Option<u16>,
    height: Option<u16>,
    top: Option<i16>,
    hidden: bool,
    opacity: f32,
    scroll_top: u16,
    selected: bool,
}

/// Notification fired on a form control whose value changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub target: NodeId,
    pub value: Option<String>,
}

type ChangeListener = Box<dyn FnMut(&ChangeEvent)>;

/// Arena-backed element tree standing in for a page.
///
/// The document always has an `html` root with a single `body` child.
pub struct Document {
    nodes: Vec<Option<Node>>,
    root: NodeId,
    body: NodeId,
    listeners: HashMap<NodeId, Vec<ChangeListener>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.len())
            .field("root", &self.root)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            body: NodeId(0),
            listeners: HashMap::new(),
        };
        doc.root = doc.build(Element::new("html"), None);
        let body = doc.build(Element::new("body"), Some(doc.root));
        if let Some(root) = doc.node_mut(doc.root) {
            root.children.push(body);
        }
        doc.body = body;
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    fn build(&mut self, element: Element, parent: Option<NodeId>) -> NodeId {
        let Element {
            tag,
            id,
            classes,
            attrs,
            content,
            width,
            height,
            top,
            hidden,
            opacity,
            scroll_top,
            selected,
        } = element;

        let (text, children) = match content {
            Content::None => (None, Vec::new()),
            Content::Text(text) => (Some(text), Vec::new()),
            Content::Children(children) => (None, children),
        };

        let node_id = NodeId(self.nodes.len());
        self.nodes.push(Some(Node {
            tag,
            id,
            classes,
            attrs,
            text,
            parent,
            children: Vec::new(),
            width,
            height,
            top,
            hidden,
            opacity,
            scroll_top,
            selected,
        }));

        let child_ids: Vec<NodeId> = children
            .into_iter()
            .map(|child| self.build(child, Some(node_id)))
            .collect();
        if let Some(node) = self.node_mut(node_id) {
            node.children = child_ids;
        }
        node_id
    }

    // -------------------------------------------------------------------------
    // Tree mutation
    // -------------------------------------------------------------------------

    /// Attach `element` as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, element: Element) -> Option<NodeId> {
        if !self.contains(parent) {
            return None;
        }
        let id = self.build(element, Some(parent));
        self.node_mut(parent)?.children.push(id);
        Some(id)
    }

    /// Attach `element` immediately before `reference` in its parent.
    /// Returns `None` when `reference` is detached or is the root.
    pub fn insert_before(&mut self, reference: NodeId, element: Element) -> Option<NodeId> {
        let parent = self.parent(reference)?;
        let position = self
            .children(parent)
            .iter()
            .position(|&c| c == reference)?;
        let id = self.build(element, Some(parent));
        self.node_mut(parent)?.children.insert(position, id);
        Some(id)
    }

    /// Detach and drop `id` together with its subtree.
    /// The root cannot be removed.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if id == self.root || !self.contains(id) {
            return false;
        }

        if let Some(parent) = self.parent(id) {
            if let Some(node) = self.node_mut(parent) {
                node.children.retain(|&c| c != id);
            }
        }

        let mut doomed = self.descendants(id);
        doomed.push(id);
        for node in doomed {
            self.listeners.remove(&node);
            if let Some(slot) = self.nodes.get_mut(node.0) {
                *slot = None;
            }
        }
        true
    }

    // -------------------------------------------------------------------------
    // Traversal
    // -------------------------------------------------------------------------

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// All descendants of `id` in document order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_descendants(id, &mut out);
        out
    }

    fn collect_descendants(&self, id: NodeId, out: &mut Vec<NodeId>) {
        for &child in self.children(id) {
            out.push(child);
            self.collect_descendants(child, out);
        }
    }

    /// Siblings that come before `id` in its parent, nearest last.
    pub fn prev_siblings(&self, id: NodeId) -> Vec<NodeId> {
        let Some(parent) = self.parent(id) else {
            return Vec::new();
        };
        self.children(parent)
            .iter()
            .take_while(|&&c| c != id)
            .copied()
            .collect()
    }

    /// Walk from `id` up to the root and return the first node matching `pred`.
    pub fn closest(&self, id: NodeId, pred: impl Fn(&Document, NodeId) -> bool) -> Option<NodeId> {
        let mut cursor = Some(id).filter(|&n| self.contains(n));
        while let Some(node) = cursor {
            if pred(self, node) {
                return Some(node);
            }
            cursor = self.parent(node);
        }
        None
    }

    pub fn closest_class(&self, id: NodeId, class: &str) -> Option<NodeId> {
        self.closest(id, |doc, n| doc.has_class(n, class))
    }

    /// Whether `id` is attached under the document root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.closest(id, |doc, n| n == doc.root).is_some()
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    pub fn find_by_id(&self, element_id: &str) -> Option<NodeId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .find(|&n| self.element_id(n) == Some(element_id))
    }

    pub fn first_with_class(&self, within: NodeId, class: &str) -> Option<NodeId> {
        self.descendants(within)
            .into_iter()
            .find(|&n| self.has_class(n, class))
    }

    pub fn all_with_class(&self, within: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(within)
            .into_iter()
            .filter(|&n| self.has_class(n, class))
            .collect()
    }

    /// Descendants of `within` with the given tag, in document order.
    pub fn all_with_tag(&self, within: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(within)
            .into_iter()
            .filter(|&n| self.tag(n) == Some(tag))
            .collect()
    }

    /// All attached nodes matching a parsed selector list, in document order.
    pub fn select_all(&self, selectors: &SelectorList) -> Vec<NodeId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .filter(|&n| selectors.matches(self, n))
            .collect()
    }

    /// Parse `selector` and return all matching nodes.
    pub fn query(&self, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        let selectors = SelectorList::parse(selector)?;
        Ok(self.select_all(&selectors))
    }

    // -------------------------------------------------------------------------
    // Identity, classes, attributes
    // -------------------------------------------------------------------------

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|n| n.tag.as_str())
    }

    pub fn element_id(&self, id: NodeId) -> Option<&str> {
        self.node(id)?.id.as_deref()
    }

    pub fn classes(&self, id: NodeId) -> &[String] {
        self.node(id).map(|n| n.classes.as_slice()).unwrap_or(&[])
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.classes(id).iter().any(|c| c == class)
    }

    /// Add one or more whitespace-separated classes.
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(node) = self.node_mut(id) {
            for name in class.split_whitespace() {
                if !node.classes.iter().any(|c| c == name) {
                    node.classes.push(name.to_string());
                }
            }
        }
    }

    /// Remove one or more whitespace-separated classes.
    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(node) = self.node_mut(id) {
            let names: Vec<&str> = class.split_whitespace().collect();
            node.classes.retain(|c| !names.contains(&c.as_str()));
        }
    }

    /// Flip a single class. Returns whether the class is now present.
    pub fn toggle_class(&mut self, id: NodeId, class: &str) -> bool {
        if self.has_class(id, class) {
            self.remove_class(id, class);
            false
        } else {
            self.add_class(id, class);
            self.has_class(id, class)
        }
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id)?.attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        if let Some(node) = self.node_mut(id) {
            node.attrs.insert(name.to_string(), value.into());
        }
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        if let Some(node) = self.node_mut(id) {
            node.attrs.remove(name);
        }
    }

    // -------------------------------------------------------------------------
    // Text
    // -------------------------------------------------------------------------

    /// Concatenated text of `id` and its descendants.
    pub fn text(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.node(id) else { return };
        if let Some(text) = &node.text {
            out.push_str(text);
        }
        for &child in &node.children {
            self.collect_text(child, out);
        }
    }

    /// Own text of `id`, ignoring descendants.
    pub(crate) fn own_text(&self, id: NodeId) -> Option<&str> {
        self.node(id)?.text.as_deref()
    }

    /// Replace everything inside `id` with a text value.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        let children: Vec<NodeId> = self.children(id).to_vec();
        for child in children {
            self.remove(child);
        }
        if let Some(node) = self.node_mut(id) {
            node.text = Some(text.into());
        }
    }

    // -------------------------------------------------------------------------
    // Box metrics and visual state
    // -------------------------------------------------------------------------

    pub fn width(&self, id: NodeId) -> Option<u16> {
        self.node(id)?.width
    }

    pub fn set_width(&mut self, id: NodeId, width: Option<u16>) {
        if let Some(node) = self.node_mut(id) {
            node.width = width;
        }
    }

    pub fn height(&self, id: NodeId) -> Option<u16> {
        self.node(id)?.height
    }

    pub fn set_height(&mut self, id: NodeId, height: Option<u16>) {
        if let Some(node) = self.node_mut(id) {
            node.height = height;
        }
    }

    pub fn top(&self, id: NodeId) -> Option<i16> {
        self.node(id)?.top
    }

    pub fn set_top(&mut self, id: NodeId, top: Option<i16>) {
        if let Some(node) = self.node_mut(id) {
            node.top = top;
        }
    }

    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.hidden)
    }

    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) {
        if let Some(node) = self.node_mut(id) {
            node.hidden = hidden;
        }
    }

    pub fn opacity(&self, id: NodeId) -> f32 {
        self.node(id).map(|n| n.opacity).unwrap_or(0.0)
    }

    pub fn set_opacity(&mut self, id: NodeId, opacity: f32) {
        if let Some(node) = self.node_mut(id) {
            node.opacity = opacity.clamp(0.0, 1.0);
        }
    }

    pub fn scroll_top(&self, id: NodeId) -> u16 {
        self.node(id).map(|n| n.scroll_top).unwrap_or(0)
    }

    pub fn set_scroll_top(&mut self, id: NodeId, scroll_top: u16) {
        if let Some(node) = self.node_mut(id) {
            node.scroll_top = scroll_top;
        }
    }

    pub(crate) fn is_selected(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.selected)
    }

    pub(crate) fn set_selected(&mut self, id: NodeId, selected: bool) {
        if let Some(node) = self.node_mut(id) {
            node.selected = selected;
        }
    }

    // -------------------------------------------------------------------------
    // Change notifications
    // -------------------------------------------------------------------------

    /// Register a listener for "change" notifications fired on `target`.
    pub fn on_change(&mut self, target: NodeId, listener: impl FnMut(&ChangeEvent) + 'static) {
        self.listeners
            .entry(target)
            .or_default()
            .push(Box::new(listener));
    }

    /// Fire a "change" notification on `target`, as a form control does
    /// after its value was set.
    pub fn dispatch_change(&mut self, target: NodeId) {
        let event = ChangeEvent {
            target,
            value: self.control_value(target),
        };
        log::trace!("change on {target}: {:?}", event.value);
        if let Some(listeners) = self.listeners.get_mut(&target) {
            for listener in listeners.iter_mut() {
                listener(&event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_document_has_html_and_body() {
        let doc = Document::new();
        assert_eq!(doc.tag(doc.root()), Some("html"));
        assert_eq!(doc.tag(doc.body()), Some("body"));
        assert_eq!(doc.parent(doc.body()), Some(doc.root()));
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn root_cannot_be_removed() {
        let mut doc = Document::new();
        let root = doc.root();
        assert!(!doc.remove(root));
        assert!(doc.contains(root));
    }
}
