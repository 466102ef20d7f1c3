//! Data source schemas

use std::collections::BTreeMap;

/// Who sets an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeMode {
    /// Must be set by configuration.
    Required,
    /// May be set by configuration.
    Optional,
    /// Set by the provider, never by configuration.
    Computed,
}

/// Value type of an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeKind {
    /// A string.
    String,
    /// A boolean.
    Bool,
    /// A 64-bit integer.
    Int64,
    /// A nested block of attributes, encoded as a list of one object.
    Block(BTreeMap<String, SchemaAttribute>),
}

/// One attribute of a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaAttribute {
    /// Value type.
    pub kind: AttributeKind,
    /// Required, optional or computed.
    pub mode: AttributeMode,
    /// Documentation shown to users.
    pub description: Option<String>,
}

impl SchemaAttribute {
    /// An attribute only the provider sets.
    pub fn computed(kind: AttributeKind) -> Self {
        Self { kind, mode: AttributeMode::Computed, description: None }
    }

    /// An attribute configuration may set.
    pub fn optional(kind: AttributeKind) -> Self {
        Self { kind, mode: AttributeMode::Optional, description: None }
    }

    /// Set the documentation text.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Nested attributes when this is a block.
    pub fn attributes(&self) -> Option<&BTreeMap<String, SchemaAttribute>> {
        match &self.kind {
            AttributeKind::Block(attributes) => Some(attributes),
            _ => None,
        }
    }
}

/// Top-level schema of a data source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    /// Documentation for the data source.
    pub description: Option<String>,
    /// Attributes keyed by name.
    pub attributes: BTreeMap<String, SchemaAttribute>,
}

impl Schema {
    /// An empty schema with a description.
    pub fn new(description: impl Into<String>) -> Self {
        Self { description: Some(description.into()), attributes: BTreeMap::new() }
    }

    /// Add or replace the attribute `name`.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, attribute: SchemaAttribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    /// Top-level attributes a configuration may set.
    pub fn configurable(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .iter()
            .filter(|(_, a)| a.mode != AttributeMode::Computed)
            .map(|(name, _)| name.as_str())
    }
}
