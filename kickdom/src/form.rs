//! `<select>` / `<option>` semantics on top of the document tree.

use crate::document::{Document, NodeId};

impl Document {
    pub fn is_select(&self, id: NodeId) -> bool {
        self.tag(id) == Some("select")
    }

    /// The `<option>` elements of a select, in display order.
    pub fn options(&self, select: NodeId) -> Vec<NodeId> {
        self.all_with_tag(select, "option")
    }

    /// Value of an option: its `value` attribute, falling back to its text.
    pub fn option_value(&self, option: NodeId) -> String {
        match self.attr(option, "value") {
            Some(value) => value.to_string(),
            None => self.text(option),
        }
    }

    /// Index of the selected option.
    ///
    /// The first option flagged as selected wins; with none flagged a
    /// non-empty select reports its first option, like a single-select
    /// form control does.
    pub fn selected_index(&self, select: NodeId) -> Option<usize> {
        let options = self.options(select);
        if options.is_empty() {
            return None;
        }
        Some(
            options
                .iter()
                .position(|&o| self.is_selected(o))
                .unwrap_or(0),
        )
    }

    pub fn selected_option(&self, select: NodeId) -> Option<NodeId> {
        let index = self.selected_index(select)?;
        self.options(select).get(index).copied()
    }

    /// Make the option at `index` the only selected one.
    /// Returns false when `index` is out of range.
    pub fn set_selected_index(&mut self, select: NodeId, index: usize) -> bool {
        let options = self.options(select);
        if index >= options.len() {
            return false;
        }
        for (i, option) in options.into_iter().enumerate() {
            self.set_selected(option, i == index);
        }
        true
    }

    /// Select the first option whose value equals `value`.
    pub fn set_select_value(&mut self, select: NodeId, value: &str) -> bool {
        let index = self
            .options(select)
            .iter()
            .position(|&o| self.option_value(o) == value);
        match index {
            Some(index) => self.set_selected_index(select, index),
            None => false,
        }
    }

    /// Current value of a form control: the selected option's value for a
    /// select, the `value` attribute otherwise.
    pub fn control_value(&self, id: NodeId) -> Option<String> {
        if self.is_select(id) {
            self.selected_option(id).map(|o| self.option_value(o))
        } else {
            self.attr(id, "value").map(str::to_string)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Document, Element};

    #[test]
    fn option_value_falls_back_to_text() {
        let mut doc = Document::new();
        let body = doc.body();
        let select = doc
            .append(body, Element::select().child(Element::option("x", "X")).child(Element::new("option").text("Plain")))
            .unwrap();
        let options = doc.options(select);
        assert_eq!(doc.option_value(options[0]), "x");
        assert_eq!(doc.option_value(options[1]), "Plain");
    }

    #[test]
    fn empty_select_has_no_value() {
        let mut doc = Document::new();
        let body = doc.body();
        let select = doc.append(body, Element::select()).unwrap();
        assert_eq!(doc.selected_index(select), None);
        assert_eq!(doc.control_value(select), None);
        assert!(!doc.set_selected_index(select, 0));
    }
}
