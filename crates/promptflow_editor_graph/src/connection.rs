// SPDX-License-Identifier: MIT OR Apache-2.0
//! Edge definitions and the connection rules between node kinds.

use crate::node::{NodeId, NodeKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub Uuid);

impl EdgeId {
    /// Create a new random edge ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EdgeId {
    fn default() -> Self {
        Self::new()
    }
}

/// A directed connection between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique edge ID
    pub id: EdgeId,
    /// Source node ID
    pub source: NodeId,
    /// Target node ID
    pub target: NodeId,
    /// Handle on the source node the edge was drawn from
    pub source_handle: Option<String>,
    /// Handle on the target node the edge was drawn to
    pub target_handle: Option<String>,
}

impl Edge {
    /// Create a new edge from a connect gesture
    pub fn new(request: ConnectRequest) -> Self {
        Self {
            id: EdgeId::new(),
            source: request.source,
            target: request.target,
            source_handle: request.source_handle,
            target_handle: request.target_handle,
        }
    }

    /// Check if this edge involves a specific node
    pub fn involves_node(&self, node_id: &NodeId) -> bool {
        self.source == *node_id || self.target == *node_id
    }
}

/// A connect gesture between two rendered node handles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectRequest {
    /// Node the edge starts at
    pub source: NodeId,
    /// Node the edge ends at
    pub target: NodeId,
    /// Source handle, if the node exposes several
    pub source_handle: Option<String>,
    /// Target handle, if the node exposes several
    pub target_handle: Option<String>,
}

impl ConnectRequest {
    /// Connect two nodes through their default handles
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
        }
    }

    /// Set the handles the gesture was drawn between
    pub fn with_handles(
        mut self,
        source_handle: Option<String>,
        target_handle: Option<String>,
    ) -> Self {
        self.source_handle = source_handle;
        self.target_handle = target_handle;
        self
    }
}

/// Reason a proposed edge breaks the pipeline rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RuleViolation {
    /// Input stage feeding anything but an LLM
    #[error("Input nodes can only connect to LLM nodes")]
    InputRequiresLlm,

    /// LLM stage feeding anything but an output
    #[error("LLM nodes can only connect to Output nodes")]
    LlmRequiresOutput,
}

/// Decide whether an edge from `source` to `target` is legal.
///
/// Only `Input` and `LlmEngine` sources are constrained; edges leaving an
/// `Output` node are accepted whatever their target.
pub fn validate(source: NodeKind, target: NodeKind) -> Result<(), RuleViolation> {
    match (source, target) {
        (NodeKind::Input, NodeKind::LlmEngine)
        | (NodeKind::LlmEngine, NodeKind::Output)
        | (NodeKind::Output, _) => Ok(()),
        (NodeKind::Input, _) => Err(RuleViolation::InputRequiresLlm),
        (NodeKind::LlmEngine, _) => Err(RuleViolation::LlmRequiresOutput),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use NodeKind::{Input, LlmEngine, Output};

    #[test]
    fn test_all_kind_pairs() {
        let cases = [
            (Input, Input, Err(RuleViolation::InputRequiresLlm)),
            (Input, LlmEngine, Ok(())),
            (Input, Output, Err(RuleViolation::InputRequiresLlm)),
            (LlmEngine, Input, Err(RuleViolation::LlmRequiresOutput)),
            (LlmEngine, LlmEngine, Err(RuleViolation::LlmRequiresOutput)),
            (LlmEngine, Output, Ok(())),
            (Output, Input, Ok(())),
            (Output, LlmEngine, Ok(())),
            (Output, Output, Ok(())),
        ];

        for (source, target, expected) in cases {
            assert_eq!(validate(source, target), expected, "{source} -> {target}");
        }
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            RuleViolation::InputRequiresLlm.to_string(),
            "Input nodes can only connect to LLM nodes"
        );
        assert_eq!(
            RuleViolation::LlmRequiresOutput.to_string(),
            "LLM nodes can only connect to Output nodes"
        );
    }

    #[test]
    fn test_edge_keeps_handles() {
        let request = ConnectRequest::new("input-1", "llm-2")
            .with_handles(Some("out".to_string()), None);
        let edge = Edge::new(request);

        assert_eq!(edge.source.as_str(), "input-1");
        assert_eq!(edge.source_handle.as_deref(), Some("out"));
        assert!(edge.target_handle.is_none());
        assert!(edge.involves_node(&NodeId::from("llm-2")));
        assert!(!edge.involves_node(&NodeId::from("output-3")));
    }
}
