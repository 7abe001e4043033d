//! Per-control widget state.

use kickdom::{Document, NodeId};

use crate::classes;
use crate::error::DropkickError;
use crate::settings::Settings;

/// One `{value, text}` pair mirrored from a native `<option>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    pub value: String,
    pub text: String,
}

impl OptionEntry {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
        }
    }
}

/// Handles to the parts of a rendered panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PanelParts {
    pub container: NodeId,
    pub toggle: NodeId,
    pub label: NodeId,
    pub options_panel: NodeId,
    pub option_list: NodeId,
    /// One `<li>` per option, in option order.
    pub rows: Vec<NodeId>,
}

impl PanelParts {
    /// Locate the parts inside a freshly inserted container.
    pub fn locate(doc: &Document, container: NodeId) -> Result<Self, DropkickError> {
        let find = |class: &'static str| {
            doc.first_with_class(container, class)
                .ok_or(DropkickError::MalformedPanel {
                    container,
                    part: class,
                })
        };
        let option_list = find(classes::OPTIONS_INNER)?;
        Ok(Self {
            container,
            toggle: find(classes::TOGGLE)?,
            label: find(classes::LABEL)?,
            options_panel: find(classes::OPTIONS)?,
            option_list,
            rows: doc.children(option_list).to_vec(),
        })
    }
}

/// State bundle for one native-control-to-panel binding.
///
/// Owned by [`Dropkick`](crate::Dropkick) and keyed by the native control.
#[derive(Debug, Clone)]
pub struct WidgetInstance {
    pub(crate) id: String,
    pub(crate) control: NodeId,
    pub(crate) parts: PanelParts,
    pub(crate) options: Vec<OptionEntry>,
    /// Index of the option selected when the widget was bound.
    pub(crate) original: Option<usize>,
    pub(crate) original_label: String,
    /// Row highlighted by keyboard navigation.
    pub(crate) current_row: Option<usize>,
    pub(crate) value: Option<String>,
    pub(crate) label: String,
    pub(crate) theme: String,
    pub(crate) tabindex: String,
    pub(crate) settings: Settings,
}

impl WidgetInstance {
    /// Identifier derived from the control's `id` or `name`.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn control(&self) -> NodeId {
        self.control
    }

    /// The `dk_container` element holding toggle and options panel.
    pub fn container(&self) -> NodeId {
        self.parts.container
    }

    pub fn toggle(&self) -> NodeId {
        self.parts.toggle
    }

    pub fn label_node(&self) -> NodeId {
        self.parts.label
    }

    pub fn options_panel(&self) -> NodeId {
        self.parts.options_panel
    }

    pub fn option_list(&self) -> NodeId {
        self.parts.option_list
    }

    pub fn rows(&self) -> &[NodeId] {
        &self.parts.rows
    }

    pub fn options(&self) -> &[OptionEntry] {
        &self.options
    }

    pub fn original_selection(&self) -> Option<&OptionEntry> {
        self.original.and_then(|i| self.options.get(i))
    }

    pub fn original_index(&self) -> Option<usize> {
        self.original
    }

    pub fn current_row(&self) -> Option<usize> {
        self.current_row
    }

    pub fn current_value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn current_label(&self) -> &str {
        &self.label
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn tabindex(&self) -> &str {
        &self.tabindex
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_open(&self, doc: &Document) -> bool {
        doc.has_class(self.parts.container, classes::OPEN)
    }

    pub fn is_focused(&self, doc: &Document) -> bool {
        doc.has_class(self.parts.container, classes::FOCUS)
    }

    pub fn row_of(&self, node: NodeId) -> Option<usize> {
        self.parts.rows.iter().position(|&r| r == node)
    }
}
