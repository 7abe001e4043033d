//! Custom-styled dropdowns bound 1:1 to native `<select>` controls.
//!
//! A [`Dropkick`] manager owns every bound widget. Hosts feed it input
//! through [`Dropkick::handle_event`], drive deferred work with
//! [`Dropkick::tick`] and tweens with [`Dropkick::animate`], and reach the
//! lifecycle either through the typed methods or the JSON-argument
//! [`Dropkick::bind`] surface.

pub mod binding;
pub mod classes;
pub mod environment;
pub mod error;
pub mod instance;
pub mod keyboard;
pub mod manager;
pub mod settings;
pub mod view;

mod panel;
mod router;
mod selection;

pub use binding::Method;
pub use environment::{Environment, OptionTrigger};
pub use error::DropkickError;
pub use instance::{OptionEntry, WidgetInstance};
pub use manager::Dropkick;
pub use settings::{ChangeCallback, Settings, SettingsError};

pub mod prelude {
    pub use crate::classes;
    pub use crate::environment::{Environment, OptionTrigger};
    pub use crate::error::DropkickError;
    pub use crate::instance::{OptionEntry, WidgetInstance};
    pub use crate::manager::Dropkick;
    pub use crate::settings::Settings;

    pub use kickdom::{Document, Element, Event, EventOutcome, Key, NodeId};
}
