// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph store holding the workflow's nodes and edges.

use crate::connection::{self, ConnectRequest, Edge, EdgeId, RuleViolation};
use crate::field::FieldValue;
use crate::node::{Node, NodeId, NodeKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A workflow graph.
///
/// Nodes are shared behind [`Arc`] so that a renderer can keep the handles it
/// drew last frame and compare them with [`Arc::ptr_eq`]: a field edit only
/// swaps the handle of the node it touched.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// Nodes in placement order
    nodes: IndexMap<NodeId, Arc<Node>>,
    /// Edges in creation order
    edges: IndexMap<EdgeId, Edge>,
    /// Number of nodes ever placed; never decremented
    placed: u64,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the id for the next placed node.
    ///
    /// The ordinal counts nodes of every kind, so ids of one kind are not
    /// densely numbered when kinds are interleaved.
    pub(crate) fn next_node_id(&mut self, kind: NodeKind) -> NodeId {
        self.placed += 1;
        NodeId::new(kind, self.placed)
    }

    /// Append a node
    pub(crate) fn insert_node(&mut self, node: Node) -> NodeId {
        let id = node.id.clone();
        self.nodes.insert(id.clone(), Arc::new(node));
        id
    }

    /// Get a node by ID
    pub fn node(&self, node_id: &NodeId) -> Option<&Arc<Node>> {
        self.nodes.get(node_id)
    }

    /// Get all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &Arc<Node>> {
        self.nodes.values()
    }

    /// Get all node IDs
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.keys()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of nodes placed over the graph's lifetime
    pub fn placed_count(&self) -> u64 {
        self.placed
    }

    /// Add an edge if the pipeline rules allow it
    pub fn connect(&mut self, request: ConnectRequest) -> Result<EdgeId, ConnectError> {
        let source = self.kind_of(&request.source)?;
        let target = self.kind_of(&request.target)?;

        connection::validate(source, target)?;

        let edge = Edge::new(request);
        let id = edge.id;
        tracing::info!("Connected {} -> {}", edge.source, edge.target);
        self.edges.insert(id, edge);
        Ok(id)
    }

    fn kind_of(&self, node_id: &NodeId) -> Result<NodeKind, ConnectError> {
        self.nodes
            .get(node_id)
            .map(|node| node.kind)
            .ok_or_else(|| ConnectError::NodeNotFound(node_id.clone()))
    }

    /// Get an edge by ID
    pub fn edge(&self, edge_id: EdgeId) -> Option<&Edge> {
        self.edges.get(&edge_id)
    }

    /// Get all edges
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Get edges involving a node
    pub fn edges_for_node<'a>(
        &'a self,
        node_id: &'a NodeId,
    ) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.values().filter(move |e| e.involves_node(node_id))
    }

    /// Get the number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Overwrite one field of one node.
    ///
    /// Edits addressed to a missing node or to a field the node does not
    /// declare are ignored. The value is stored as given, without checking it
    /// against the field type. Returns whether the node's data changed.
    pub fn set_field(&mut self, edit: &FieldEdit) -> bool {
        let Some(slot) = self.nodes.get_mut(&edit.node_id) else {
            tracing::debug!(
                "Ignoring edit of {:?} on missing node {}",
                edit.field,
                edit.node_id
            );
            return false;
        };

        match slot.data.get(&edit.field) {
            None => {
                tracing::warn!("Node {} has no field {:?}", edit.node_id, edit.field);
                return false;
            }
            Some(current) if *current == edit.value => return false,
            Some(_) => {}
        }

        let mut node = Node::clone(slot);
        node.data.set(&edit.field, edit.value.clone());
        *slot = Arc::new(node);
        tracing::debug!("Set {}.{} = {}", edit.node_id, edit.field, edit.value);
        true
    }
}

/// A field change emitted by a node's widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldEdit {
    /// Node whose widget changed
    pub node_id: NodeId,
    /// Field name as declared in the schema
    pub field: String,
    /// New raw value
    pub value: FieldValue,
}

impl FieldEdit {
    /// Create a new field edit
    pub fn new(
        node_id: impl Into<NodeId>,
        field: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Self {
        Self {
            node_id: node_id.into(),
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Error when creating an edge
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectError {
    /// Node not found
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// Kinds of the endpoints may not be connected
    #[error(transparent)]
    Rejected(#[from] RuleViolation),
}
