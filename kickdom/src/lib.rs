pub mod animation;
pub mod document;
pub mod element;
pub mod event;
pub mod form;
pub mod layout;
pub mod selector;
pub mod transitions;

pub use animation::{AnimationState, TweenProperty};
pub use document::{ChangeEvent, Document, NodeId};
pub use element::{Content, Element};
pub use event::{Event, EventOutcome, Key, Modifiers};
pub use layout::{outer_height, outer_width, LINE_HEIGHT};
pub use selector::{Selector, SelectorError, SelectorList};
pub use transitions::{Easing, TransitionConfig};
