use kickdom::{Document, NodeId};

use crate::instance::WidgetInstance;

/// Commit `row` as the selection of `instance`.
///
/// The native control is set by the row's value, so options added to or
/// removed from the control since binding never split label and value.
/// When the control no longer has that value nothing changes.
///
/// The native control and the visible label are both updated before the
/// control's change notification fires, so observers never see one without
/// the other. The change callback runs last unless `suppress_callback` is set.
pub(crate) fn apply_selection(
    doc: &mut Document,
    instance: &mut WidgetInstance,
    row: usize,
    suppress_callback: bool,
) {
    let Some(option) = instance.options.get(row).cloned() else {
        log::warn!(
            "dropdown '{}' has no row {row} ({} options)",
            instance.id,
            instance.options.len()
        );
        return;
    };

    if !select_native(doc, instance.control, row, &option.value) {
        log::warn!(
            "dropdown '{}': control has no option {:?} any more; reload to resync",
            instance.id,
            option.value
        );
        return;
    }
    doc.set_text(instance.parts.label, option.text.as_str());
    instance.value = Some(option.value.clone());
    instance.label = option.text.clone();
    log::debug!(
        "dropdown '{}' selected {:?} ({:?})",
        instance.id,
        option.value,
        option.text
    );

    doc.dispatch_change(instance.control);

    if suppress_callback {
        return;
    }
    if let Some(callback) = &instance.settings.change_callback {
        callback(instance.control, &option.value, &option.text);
    }
}

/// Select the native option carrying `value`, preferring the one at `row`
/// when several options share it.
fn select_native(doc: &mut Document, control: NodeId, row: usize, value: &str) -> bool {
    let same_row = doc
        .options(control)
        .get(row)
        .is_some_and(|&o| doc.option_value(o) == value);
    if same_row {
        doc.set_selected_index(control, row)
    } else {
        doc.set_select_value(control, value)
    }
}
