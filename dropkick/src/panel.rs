//! Open/close state, row highlighting and scroll sync for one panel.

use std::time::Instant;

use kickdom::{layout, AnimationState, Document, TransitionConfig, TweenProperty};

use crate::classes;
use crate::instance::WidgetInstance;

/// Place the options panel directly below the toggle.
fn position(doc: &mut Document, instance: &WidgetInstance) {
    let offset = layout::outer_height(doc, instance.parts.toggle);
    doc.set_top(
        instance.parts.options_panel,
        Some(i16::try_from(offset).unwrap_or(i16::MAX)),
    );
}

/// Ensure the panel is open. Positioning is re-applied even when it
/// already is.
pub(crate) fn open(doc: &mut Document, instance: &WidgetInstance) {
    position(doc, instance);
    doc.add_class(instance.parts.container, classes::OPEN);
    log::debug!("dropdown '{}' opened", instance.id);
}

/// Flip the panel between open and closed. Returns whether it is now open.
pub(crate) fn toggle(doc: &mut Document, instance: &WidgetInstance) -> bool {
    position(doc, instance);
    let open = doc.toggle_class(instance.parts.container, classes::OPEN);
    log::debug!(
        "dropdown '{}' {}",
        instance.id,
        if open { "opened" } else { "closed" }
    );
    open
}

pub(crate) fn close(doc: &mut Document, instance: &WidgetInstance) {
    if doc.has_class(instance.parts.container, classes::OPEN) {
        log::debug!("dropdown '{}' closed", instance.id);
    }
    doc.remove_class(instance.parts.container, classes::OPEN);
}

/// Move the current-row marker to `row` and scroll it into view.
pub(crate) fn set_current(
    doc: &mut Document,
    animations: &mut AnimationState,
    instance: &mut WidgetInstance,
    row: usize,
    now: Instant,
) {
    let Some(&row_node) = instance.parts.rows.get(row) else {
        return;
    };
    for &node in &instance.parts.rows {
        doc.remove_class(node, classes::OPTION_CURRENT);
    }
    doc.add_class(row_node, classes::OPTION_CURRENT);
    instance.current_row = Some(row);

    let offset = layout::offset_in_parent(doc, row_node);
    scroll_to(doc, animations, instance, offset, now);
}

/// Tween the option list's scroll position to `offset`.
pub(crate) fn scroll_to(
    doc: &mut Document,
    animations: &mut AnimationState,
    instance: &WidgetInstance,
    offset: u16,
    now: Instant,
) {
    animations.animate(
        doc,
        instance.parts.option_list,
        TweenProperty::ScrollTop,
        f32::from(offset),
        TransitionConfig::swing(instance.settings.scroll_animation_ms),
        now,
    );
}
