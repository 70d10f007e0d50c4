// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the workflow graph.

use crate::field::{FieldDefinition, FieldValue, NodeData};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of pipeline stages a node can represent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Question entered by the user
    Input,
    /// Language model invocation settings
    #[serde(rename = "llm")]
    LlmEngine,
    /// Model response display
    Output,
}

impl NodeKind {
    /// All kinds, in palette order
    pub const ALL: [NodeKind; 3] = [Self::Input, Self::LlmEngine, Self::Output];

    /// Identifier used in drag payloads and node ids
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::LlmEngine => "llm",
            Self::Output => "output",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Input => 0,
            Self::LlmEngine => 1,
            Self::Output => 2,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = UnknownKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKindError(s.to_string()))
    }
}

/// Error when a string does not name a node kind
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown node kind: {0:?}")]
pub struct UnknownKindError(pub String);

/// Unique identifier for a node, formatted `<kind>-<ordinal>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub String);

impl NodeId {
    /// Build the id for the `ordinal`-th placed node
    pub fn new(kind: NodeKind, ordinal: u64) -> Self {
        Self(format!("{kind}-{ordinal}"))
    }

    /// Borrow the id as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Node type definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeType {
    /// Kind this definition describes
    pub kind: NodeKind,
    /// Header shown on the rendered node
    pub title: String,
    /// Label shown in the component palette
    pub label: String,
    /// Help text shown above the fields
    pub description: Option<String>,
    /// Field schema, in display order
    pub fields: Vec<FieldDefinition>,
}

/// A node instance in the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// Pipeline stage
    pub kind: NodeKind,
    /// Position on the canvas
    pub position: [f32; 2],
    /// Current field values
    pub data: NodeData,
}

impl Node {
    /// Create a new node seeded from a type definition
    pub fn new(id: NodeId, node_type: &NodeType) -> Self {
        Self {
            id,
            kind: node_type.kind,
            position: [0.0, 0.0],
            data: NodeData::from_schema(&node_type.fields),
        }
    }

    /// Set the position
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = [x, y];
        self
    }

    /// Get a field value
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.data.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_identifier() {
        for kind in NodeKind::ALL {
            assert_eq!(kind.as_str().parse::<NodeKind>(), Ok(kind));
        }
        assert_eq!(
            "LLM".parse::<NodeKind>(),
            Err(UnknownKindError("LLM".to_string()))
        );
        assert!("".parse::<NodeKind>().is_err());
    }

    #[test]
    fn test_node_id_format() {
        assert_eq!(NodeId::new(NodeKind::LlmEngine, 1).as_str(), "llm-1");
        assert_eq!(NodeId::new(NodeKind::Input, 3).to_string(), "input-3");
    }
}
