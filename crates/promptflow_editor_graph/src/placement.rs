// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node placement from drag-and-drop gestures.

use crate::graph::Graph;
use crate::node::{Node, NodeId, NodeKind};
use crate::registry::NodeRegistry;
use serde::{Deserialize, Serialize};

/// Data-transfer format the palette tags drag gestures with
pub const DRAG_PAYLOAD_FORMAT: &str = "application/promptflow-node";

/// Offset subtracted from the pointer position on drop, roughly centering the
/// node's header under the cursor.
pub const DEFAULT_DROP_OFFSET: [f32; 2] = [100.0, 50.0];

/// Payload attached to a drag gesture started from the palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragPayload {
    /// Data-transfer format
    pub format: String,
    /// Kind identifier
    pub data: String,
}

impl DragPayload {
    /// Wrap raw data under [`DRAG_PAYLOAD_FORMAT`]
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            format: DRAG_PAYLOAD_FORMAT.to_string(),
            data: data.into(),
        }
    }

    /// Tag a drag gesture with a node kind
    pub fn for_kind(kind: NodeKind) -> Self {
        Self::new(kind.as_str())
    }

    /// Decode the dragged kind, if the payload names one
    pub fn decode(&self) -> Option<NodeKind> {
        if self.format != DRAG_PAYLOAD_FORMAT {
            return None;
        }
        self.data.parse().ok()
    }
}

/// A drop on the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropEvent {
    /// Payload read back from the drag gesture, if it carried one
    pub payload: Option<DragPayload>,
    /// Pointer position in window coordinates
    pub pointer: [f32; 2],
}

impl DropEvent {
    /// Create a drop carrying `data` under [`DRAG_PAYLOAD_FORMAT`]
    pub fn new(data: impl Into<String>, x: f32, y: f32) -> Self {
        Self::with_payload(Some(DragPayload::new(data)), x, y)
    }

    /// Create a drop carrying an arbitrary payload
    pub fn with_payload(payload: Option<DragPayload>, x: f32, y: f32) -> Self {
        Self {
            payload,
            pointer: [x, y],
        }
    }

    /// Kind named by the payload, if any
    pub fn kind(&self) -> Option<NodeKind> {
        self.payload.as_ref()?.decode()
    }

    /// Canvas position of the new node.
    ///
    /// This is a fixed shift of the pointer, not an inversion of the canvas
    /// pan and zoom.
    pub fn canvas_position(&self, offset: [f32; 2]) -> [f32; 2] {
        [self.pointer[0] - offset[0], self.pointer[1] - offset[1]]
    }
}

/// Create a node of `kind` at `position` and append it to the graph.
///
/// Positions are not validated; nodes may overlap or sit at negative
/// coordinates.
pub fn place(
    graph: &mut Graph,
    registry: &NodeRegistry,
    kind: NodeKind,
    position: [f32; 2],
) -> NodeId {
    let id = graph.next_node_id(kind);
    let node = Node::new(id, registry.get(kind)).with_position(position[0], position[1]);
    tracing::info!("Placed {} at ({}, {})", node.id, position[0], position[1]);
    graph.insert_node(node)
}

/// Place the node described by a drop, ignoring drops without a known kind
pub fn place_drop(
    graph: &mut Graph,
    registry: &NodeRegistry,
    event: &DropEvent,
    offset: [f32; 2],
) -> Option<NodeId> {
    let Some(kind) = event.kind() else {
        tracing::debug!("Ignoring drop with payload {:?}", event.payload);
        return None;
    };
    Some(place(graph, registry, kind, event.canvas_position(offset)))
}
