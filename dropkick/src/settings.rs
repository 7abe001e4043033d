//! Widget configuration captured at bind time.

use std::fmt;
use std::rc::Rc;

use kickdom::NodeId;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Default fade-in length of a freshly bound widget.
pub const DEFAULT_OPEN_ANIMATION_DELAY_MS: u64 = 1000;

/// Called after a user-driven selection with `(control, value, label)`.
/// `control` is the native select the widget is bound to.
pub type ChangeCallback = Rc<dyn Fn(NodeId, &str, &str)>;

/// Errors that can occur when reading settings from JSON.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings must be an object, got {0}")]
    NotAnObject(&'static str),

    #[error("invalid settings: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Per-widget configuration.
///
/// Fields left out of a JSON options object keep their defaults, so a partial
/// object merges over [`Settings::default`].
#[derive(Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Fixed toggle width in cells. Defaults to the control's rendered width.
    pub width: Option<u16>,

    /// Fade-in length of the widget after binding.
    #[serde(alias = "startSpeed")]
    pub open_animation_delay_ms: u64,

    /// Length of the tween that scrolls the current row into view.
    pub scroll_animation_ms: u64,

    /// Theme name; `false`, `null` or an empty string mean the default theme.
    #[serde(deserialize_with = "theme_or_false")]
    pub theme: Option<String>,

    #[serde(skip)]
    pub change_callback: Option<ChangeCallback>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: None,
            open_animation_delay_ms: DEFAULT_OPEN_ANIMATION_DELAY_MS,
            scroll_animation_ms: 0,
            theme: None,
            change_callback: None,
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("width", &self.width)
            .field("open_animation_delay_ms", &self.open_animation_delay_ms)
            .field("scroll_animation_ms", &self.scroll_animation_ms)
            .field("theme", &self.theme)
            .field(
                "change_callback",
                &self.change_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read settings from a JSON options object.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, SettingsError> {
        if !value.is_object() {
            return Err(SettingsError::NotAnObject(json_kind(value)));
        }
        Ok(Settings::deserialize(value)?)
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn open_animation_delay_ms(mut self, ms: u64) -> Self {
        self.open_animation_delay_ms = ms;
        self
    }

    pub fn scroll_animation_ms(mut self, ms: u64) -> Self {
        self.scroll_animation_ms = ms;
        self
    }

    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        let theme = theme.into();
        self.theme = (!theme.is_empty()).then_some(theme);
        self
    }

    pub fn on_change(mut self, callback: impl Fn(NodeId, &str, &str) + 'static) -> Self {
        self.change_callback = Some(Rc::new(callback));
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ThemeSetting {
    Name(String),
    Flag(bool),
}

fn theme_or_false<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<ThemeSetting>::deserialize(deserializer)? {
        Some(ThemeSetting::Name(name)) if !name.is_empty() => Some(name),
        Some(ThemeSetting::Flag(true)) => {
            log::debug!("theme: true names no theme, using the default");
            None
        }
        Some(ThemeSetting::Name(_)) | Some(ThemeSetting::Flag(false)) | None => None,
    })
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
