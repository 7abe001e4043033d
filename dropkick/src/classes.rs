//! Class names and attributes the rendered markup carries.
//!
//! Stylesheets target these names, so they must not change.

pub const CONTAINER: &str = "dk_container";
pub const CONTAINER_ID_PREFIX: &str = "dk_container_";
pub const TOGGLE: &str = "dk_toggle";
pub const LABEL: &str = "dk_label";
pub const OPTIONS: &str = "dk_options";
pub const OPTIONS_INNER: &str = "dk_options_inner";
pub const OPTION_CURRENT: &str = "dk_option_current";
pub const OPEN: &str = "dk_open";
pub const FOCUS: &str = "dk_focus";
pub const THEME_PREFIX: &str = "dk_theme_";
pub const TOUCH: &str = "dk_touch";
/// Added to the option list on touch devices.
pub const TOUCH_SCROLL: &str = "scrollable vertical";
/// Added to the document root so stylesheets can hide selects before binding.
pub const FOUC: &str = "dk_fouc";

/// `data-*` key holding an option row's value.
pub const VALUE_DATA_KEY: &str = "dk-dropdown-value";
pub const VALUE_ATTR: &str = "data-dk-dropdown-value";

pub const DEFAULT_THEME: &str = "default";

pub fn theme_class(theme: &str) -> String {
    format!("{THEME_PREFIX}{theme}")
}

pub fn container_id(widget_id: &str) -> String {
    format!("{CONTAINER_ID_PREFIX}{widget_id}")
}
