use std::collections::BTreeMap;

use super::Content;

/// Detached element description.
///
/// Elements are built with a chained builder and then attached to a
/// [`Document`](crate::Document), which takes ownership of the subtree and
/// hands back a [`NodeId`](crate::NodeId) for the root.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    // Identity
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,

    // Content
    pub content: Content,

    // Box metrics (cells). `None` means intrinsic.
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub top: Option<i16>,

    // Visual
    pub hidden: bool,
    pub opacity: f32,
    pub scroll_top: u16,

    // Form state
    /// Selectedness of an `<option>`, separate from the `selected` attribute.
    pub selected: bool,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            tag: "div".to_string(),
            id: None,
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            content: Content::None,
            width: None,
            height: None,
            top: None,
            hidden: false,
            opacity: 1.0,
            scroll_top: 0,
            selected: false,
        }
    }
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn span() -> Self {
        Self::new("span")
    }

    pub fn anchor() -> Self {
        Self::new("a")
    }

    pub fn ul() -> Self {
        Self::new("ul")
    }

    pub fn li() -> Self {
        Self::new("li")
    }

    pub fn select() -> Self {
        Self::new("select")
    }

    /// Create an `<option>` with a value attribute and display text.
    pub fn option(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new("option").attr("value", value).text(text)
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        for name in class.split_whitespace() {
            if !self.classes.iter().any(|c| c == name) {
                self.classes.push(name.to_string());
            }
        }
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Set a `data-*` attribute.
    pub fn data(self, key: &str, value: impl Into<String>) -> Self {
        self.attr(format!("data-{key}"), value)
    }

    pub fn get_attr(&self, name: &str) -> Option<&String> {
        self.attrs.get(name)
    }

    // Content
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content = Content::Text(text.into());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        match &mut self.content {
            Content::Children(children) => children.extend(new_children),
            _ => self.content = Content::Children(new_children.into_iter().collect()),
        }
        self
    }

    // Box metrics
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: u16) -> Self {
        self.height = Some(height);
        self
    }

    pub fn top(mut self, top: i16) -> Self {
        self.top = Some(top);
        self
    }

    // Visual
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn scroll_top(mut self, scroll_top: u16) -> Self {
        self.scroll_top = scroll_top;
        self
    }

    // Form state
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}
