//! Error types for the typed widget API.
//!
//! The JSON [`bind`](crate::Dropkick::bind) surface never returns these; it
//! logs them, along with selector and settings parse errors, and carries on.

use kickdom::NodeId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DropkickError {
    /// The control has no dropdown bound to it.
    #[error("{0} has no dropdown bound to it")]
    NotBound(NodeId),

    /// Only `<select>` elements can be bound.
    #[error("{0} is not a select control")]
    NotASelect(NodeId),

    /// The control is not attached to the document, so the panel has
    /// nowhere to go.
    #[error("{0} is not attached to the document")]
    Detached(NodeId),

    /// The rendered panel is missing one of its parts.
    #[error("rendered panel {container} is missing '{part}'")]
    MalformedPanel {
        container: NodeId,
        part: &'static str,
    },
}
