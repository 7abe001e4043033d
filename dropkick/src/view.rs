//! Renderer: view model in, detached element tree out.

use kickdom::Element;

use crate::classes;
use crate::instance::OptionEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub value: String,
    pub text: String,
    pub current: bool,
}

/// Everything the renderer needs to build a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub id: String,
    pub label: String,
    pub tabindex: String,
    pub width: Option<u16>,
    pub options: Vec<OptionView>,
}

impl ViewModel {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            tabindex: String::new(),
            width: None,
            options: Vec::new(),
        }
    }

    pub fn tabindex(mut self, tabindex: impl Into<String>) -> Self {
        self.tabindex = tabindex.into();
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Mirror `options`, marking the one at `current` as the current row.
    pub fn options(mut self, options: &[OptionEntry], current: Option<usize>) -> Self {
        self.options = options
            .iter()
            .enumerate()
            .map(|(i, o)| OptionView {
                value: o.value.clone(),
                text: o.text.clone(),
                current: Some(i) == current,
            })
            .collect();
        self
    }
}

/// Build the widget markup:
///
/// ```text
/// div.dk_container#dk_container_<id>[tabindex]
///   a.dk_toggle
///     span.dk_label
///   div.dk_options
///     ul.dk_options_inner
///       li(.dk_option_current)
///         a[data-dk-dropdown-value]
/// ```
pub fn render(view: &ViewModel) -> Element {
    let mut toggle = Element::anchor()
        .class(classes::TOGGLE)
        .child(Element::span().class(classes::LABEL).text(&view.label));
    if let Some(width) = view.width {
        toggle = toggle.width(width);
    }

    let rows = view.options.iter().map(|option| {
        let row = if option.current {
            Element::li().class(classes::OPTION_CURRENT)
        } else {
            Element::li()
        };
        row.child(
            Element::anchor()
                .data(classes::VALUE_DATA_KEY, &option.value)
                .text(&option.text),
        )
    });

    Element::div()
        .id(classes::container_id(&view.id))
        .class(classes::CONTAINER)
        .attr("tabindex", &view.tabindex)
        .child(toggle)
        .child(
            Element::div()
                .class(classes::OPTIONS)
                .child(Element::ul().class(classes::OPTIONS_INNER).children(rows)),
        )
}

#[cfg(test)]
mod tests {
    use kickdom::Content;

    use super::*;

    fn rows(el: &Element) -> Vec<&Element> {
        let Content::Children(parts) = &el.content else {
            return Vec::new();
        };
        let Content::Children(panel) = &parts[1].content else {
            return Vec::new();
        };
        let Content::Children(list) = &panel[0].content else {
            return Vec::new();
        };
        list.iter().collect()
    }

    #[test]
    fn placeholder_text_is_not_substituted() {
        let view = ViewModel::new("x", "{{ label }}")
            .options(&[OptionEntry::new("{{ text }}", "{{ value }}")], Some(0));
        let el = render(&view);
        let rows = rows(&el);
        assert_eq!(rows.len(), 1);
        let Content::Children(anchor) = &rows[0].content else {
            panic!("row has no anchor");
        };
        assert_eq!(
            anchor[0].get_attr(classes::VALUE_ATTR).map(String::as_str),
            Some("{{ text }}")
        );
        assert_eq!(anchor[0].content, Content::Text("{{ value }}".into()));
    }

    #[test]
    fn marks_only_current_row() {
        let options = [OptionEntry::new("a", "A"), OptionEntry::new("b", "B")];
        let el = render(&ViewModel::new("x", "B").options(&options, Some(1)));
        let rows = rows(&el);
        assert!(!rows[0].has_class(classes::OPTION_CURRENT));
        assert!(rows[1].has_class(classes::OPTION_CURRENT));
        assert_eq!(el.id.as_deref(), Some("dk_container_x"));
    }
}
