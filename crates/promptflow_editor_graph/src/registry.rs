// SPDX-License-Identifier: MIT OR Apache-2.0
//! Registry of the workflow node types and their field schemas.
//!
//! The registry is the only place default field values are defined; every
//! placed node is seeded from it.

use crate::field::{FieldDefinition, FieldType, FieldValue, NodeData};
use crate::node::{NodeKind, NodeType, UnknownKindError};

/// Default model selected on new LLM nodes
pub const DEFAULT_MODEL: &str = "gpt-3.5";
/// Models offered by the LLM node
pub const MODELS: [&str; 2] = ["gpt-3.5", "gpt-4"];
/// Default token limit for LLM nodes
pub const DEFAULT_MAX_TOKENS: i64 = 2000;
/// Default sampling temperature for LLM nodes
pub const DEFAULT_TEMPERATURE: f64 = 0.5;
/// Text shown by output nodes before any response exists
pub const OUTPUT_PLACEHOLDER: &str = "Output will appear here...";

/// Registry of available node types
#[derive(Debug, Clone)]
pub struct NodeRegistry {
    /// Node types indexed by [`NodeKind::index`]
    types: [NodeType; 3],
}

impl NodeRegistry {
    /// Create the registry for the three pipeline stages
    pub fn new() -> Self {
        Self {
            types: NodeKind::ALL.map(define),
        }
    }

    /// Get the type definition of a kind
    pub fn get(&self, kind: NodeKind) -> &NodeType {
        &self.types[kind.index()]
    }

    /// Field schema of a kind
    pub fn schema(&self, kind: NodeKind) -> &[FieldDefinition] {
        &self.get(kind).fields
    }

    /// Field schema looked up by kind identifier
    pub fn schema_for(&self, kind: &str) -> Result<&[FieldDefinition], UnknownKindError> {
        Ok(self.schema(kind.parse()?))
    }

    /// Fresh node data holding the kind's defaults
    pub fn default_data(&self, kind: NodeKind) -> NodeData {
        NodeData::from_schema(self.schema(kind))
    }

    /// All registered types, in palette order
    pub fn types(&self) -> impl Iterator<Item = &NodeType> {
        self.types.iter()
    }

    /// Entries for the drag-and-drop component palette
    pub fn palette(&self) -> impl Iterator<Item = (NodeKind, &str)> {
        self.types.iter().map(|t| (t.kind, t.label.as_str()))
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn define(kind: NodeKind) -> NodeType {
    match kind {
        NodeKind::Input => NodeType {
            kind,
            title: "INPUT".to_string(),
            label: "Input".to_string(),
            description: Some("Write the input question you want to ask".to_string()),
            fields: vec![FieldDefinition::new(
                "query",
                "Input",
                FieldType::Text { multiline: true },
                "",
            )
            .with_placeholder("What is the definition of science?")],
        },
        NodeKind::LlmEngine => NodeType {
            kind,
            title: "LLM ENGINE".to_string(),
            label: "LLM Engine".to_string(),
            description: None,
            fields: vec![
                FieldDefinition::new(
                    "model",
                    "Model Name",
                    FieldType::Choice(MODELS.iter().map(|m| (*m).to_string()).collect()),
                    DEFAULT_MODEL,
                ),
                FieldDefinition::new(
                    "apiBase",
                    "OpenAI API Base",
                    FieldType::Text { multiline: false },
                    "",
                )
                .with_placeholder("https://api.openai.com/v1"),
                FieldDefinition::new("apiKey", "OpenAI Key", FieldType::Secret, "")
                    .with_placeholder("Enter your OpenAI API key"),
                FieldDefinition::new(
                    "maxTokens",
                    "Max Tokens",
                    FieldType::Integer,
                    DEFAULT_MAX_TOKENS,
                )
                .with_placeholder("2000"),
                FieldDefinition::new(
                    "temperature",
                    "Temperature",
                    FieldType::Float {
                        min: Some(0.0),
                        max: Some(1.0),
                        step: Some(0.1),
                    },
                    FieldValue::Float(DEFAULT_TEMPERATURE),
                )
                .with_placeholder("0.5"),
            ],
        },
        NodeKind::Output => NodeType {
            kind,
            title: "OUTPUT".to_string(),
            label: "Output".to_string(),
            description: None,
            fields: vec![FieldDefinition::new(
                "output",
                "Output Response",
                FieldType::ReadOnlyText,
                OUTPUT_PLACEHOLDER,
            )],
        },
    }
}
