//! Dynamic binding surface: `bind(selector, args...)`.
//!
//! Mirrors the calling convention host pages use: no arguments or an options
//! object initializes, a method name runs that method with the remaining
//! arguments, and anything else does nothing.

use kickdom::{Document, NodeId};
use serde_json::Value;

use crate::error::DropkickError;
use crate::manager::Dropkick;
use crate::settings::{json_kind, Settings, SettingsError};

/// A parsed binding call.
#[derive(Debug, Clone)]
pub enum Method {
    Init(Settings),
    Theme(String),
    Reset,
    Reload,
}

impl Method {
    /// Interpret a binding argument list.
    ///
    /// Returns `Ok(None)` for calls that do nothing: unknown method names,
    /// truthy non-object first arguments, or `theme` without a name.
    pub fn from_args(args: &[Value]) -> Result<Option<Self>, SettingsError> {
        let Some(first) = args.first() else {
            return Ok(Some(Method::Init(Settings::default())));
        };

        match first {
            Value::String(name) if !name.is_empty() => match name.as_str() {
                "init" => Ok(Some(Method::Init(settings_arg(args.get(1))?))),
                "theme" => Ok(args
                    .get(1)
                    .and_then(Value::as_str)
                    .map(|theme| Method::Theme(theme.to_string()))),
                "reset" => Ok(Some(Method::Reset)),
                "reload" => Ok(Some(Method::Reload)),
                _ => Ok(None),
            },
            value if is_falsy(value) => Ok(Some(Method::Init(Settings::default()))),
            Value::Object(_) | Value::Array(_) => Ok(Some(Method::Init(settings_arg(Some(first))?))),
            _ => Ok(None),
        }
    }
}

/// Options object for `init`; anything but an object means defaults.
fn settings_arg(value: Option<&Value>) -> Result<Settings, SettingsError> {
    match value {
        Some(value @ Value::Object(_)) => Settings::from_json(value),
        _ => Ok(Settings::default()),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_none_or(|f| f == 0.0 || f.is_nan()),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

impl Dropkick {
    /// Run a binding call against every control matching `selector`.
    ///
    /// Never fails: malformed selectors, invalid options and per-control
    /// errors are logged and skipped. `reset` runs once per call regardless
    /// of what the selector matched. Returns the matched nodes.
    pub fn bind(&mut self, doc: &mut Document, selector: &str, args: &[Value]) -> Vec<NodeId> {
        if self.env.legacy {
            return Vec::new();
        }
        let controls = match doc.query(selector) {
            Ok(controls) => controls,
            Err(err) => {
                log::warn!("bind('{selector}'): {err}");
                return Vec::new();
            }
        };
        let method = match Method::from_args(args) {
            Ok(Some(method)) => method,
            Ok(None) => {
                log::debug!(
                    "bind('{selector}'): nothing to do for {}",
                    args.first().map(json_kind).unwrap_or("no arguments")
                );
                return controls;
            }
            Err(err) => {
                log::warn!("bind('{selector}'): {err}");
                return controls;
            }
        };

        if let Method::Reset = method {
            self.reset(doc);
            return controls;
        }
        for &control in &controls {
            if let Err(err) = self.invoke(doc, control, &method) {
                log::warn!("bind('{selector}') on {control}: {err}");
            }
        }
        controls
    }

    /// Run a parsed binding call against one control.
    pub fn invoke(
        &mut self,
        doc: &mut Document,
        control: NodeId,
        method: &Method,
    ) -> Result<(), DropkickError> {
        match method {
            Method::Init(settings) => self.init(doc, control, settings.clone()).map(|_| ()),
            Method::Theme(theme) => self.theme(doc, control, theme),
            Method::Reset => {
                self.reset(doc);
                Ok(())
            }
            Method::Reload => self.reload(doc, control),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_and_falsy_args_initialize() {
        for args in [
            vec![],
            vec![json!(null)],
            vec![json!(false)],
            vec![json!("")],
            vec![json!(0)],
        ] {
            assert!(
                matches!(Method::from_args(&args), Ok(Some(Method::Init(_)))),
                "{args:?}"
            );
        }
    }

    #[test]
    fn options_object_initializes_with_settings() {
        let method = Method::from_args(&[json!({ "theme": "dark" })]).unwrap();
        let Some(Method::Init(settings)) = &method else {
            panic!("expected init, got {method:?}");
        };
        assert_eq!(settings.theme.as_deref(), Some("dark"));
    }

    #[test]
    fn named_methods() {
        assert!(matches!(
            Method::from_args(&[json!("theme"), json!("dark")]),
            Ok(Some(Method::Theme(t))) if t == "dark"
        ));
        assert!(matches!(Method::from_args(&[json!("reset")]), Ok(Some(Method::Reset))));
        assert!(matches!(Method::from_args(&[json!("reload")]), Ok(Some(Method::Reload))));
        assert!(matches!(
            Method::from_args(&[json!("init"), json!({ "width": 12 })]),
            Ok(Some(Method::Init(s))) if s.width == Some(12)
        ));
    }

    #[test]
    fn unknown_calls_do_nothing() {
        assert!(matches!(Method::from_args(&[json!("explode")]), Ok(None)));
        assert!(matches!(Method::from_args(&[json!(true)]), Ok(None)));
        assert!(matches!(Method::from_args(&[json!(3)]), Ok(None)));
        assert!(matches!(Method::from_args(&[json!("theme")]), Ok(None)));
    }
}
