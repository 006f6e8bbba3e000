//! Error types for the flow engine.

use thiserror::Error;

use crate::layout::BoxId;

/// Errors surfaced while wiring a text flow into the box tree.
#[derive(Debug, Error)]
pub enum FlowError {
    /// The box layout engine rejected a tree operation.
    #[error("box tree operation failed: {0}")]
    Tree(#[from] taffy::TaffyError),

    /// A box id was never created by this tree.
    #[error("unknown box node {0}")]
    UnknownNode(BoxId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_node_message() {
        let err = FlowError::UnknownNode(7);
        assert_eq!(err.to_string(), "unknown box node 7");
    }
}
