//! Text rendering of the dropdown state.

use dropkick::prelude::*;

const HELP: &str = "Tab: focus  Enter/Up/Down: navigate  1-2: click toggle  o: click outside  \
                    t: theme  a: add option + reload  r: reset  q: quit";

pub fn screen(doc: &Document, dk: &Dropkick, log: &[String]) -> Vec<String> {
    let mut lines = vec!["dropkick demo".to_string(), HELP.to_string(), String::new()];

    for (n, instance) in dk.instances().enumerate() {
        let focus = if instance.is_focused(doc) { '*' } else { ' ' };
        let arrow = if instance.is_open(doc) { '^' } else { 'v' };
        let width = doc.width(instance.toggle()).map_or(0, usize::from);
        lines.push(format!(
            "{focus} {}. [{:<width$} {arrow}]  theme={}  native={}",
            n + 1,
            doc.text(instance.label_node()),
            instance.theme(),
            doc.control_value(instance.control()).unwrap_or_default(),
        ));

        if instance.is_open(doc) {
            for (row, option) in instance.options().iter().enumerate() {
                let marker = if instance.current_row() == Some(row) { '>' } else { ' ' };
                lines.push(format!("     {marker} {}", option.text));
            }
        }
        lines.push(String::new());
    }

    lines.push("changes:".to_string());
    lines.extend(log.iter().rev().take(5).map(|entry| format!("  {entry}")));
    lines
}
