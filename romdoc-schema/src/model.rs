//! Structured form of a parsed schema document.
//!
//! Field names serialize in camelCase to match the JSON shape consumed by
//! the documentation renderer.

use serde::{Deserialize, Serialize};

/// A parsed schema document: the flat list of model declarations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaDoc {
    pub models: Vec<Model>,
}

/// One `model <Name> { ... }` block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    pub name: String,
    pub fields: Vec<Field>,
    /// `@@unique([...])` declarations.
    pub uniques: Vec<FieldGroup>,
    /// `@@index([...])` declarations.
    pub indexes: Vec<FieldGroup>,
}

/// A field-name list from a block-level `@@unique`/`@@index` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldGroup {
    pub fields: Vec<String>,
}

/// One field declaration line within a model block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    /// Base type with `?`/`[]` suffixes stripped.
    #[serde(rename = "type")]
    pub field_type: String,
    pub is_optional: bool,
    pub is_list: bool,
    /// True when the base type names another model in the same document.
    pub is_relation_type: bool,
    pub attributes: FieldAttributes,
    /// Trailing attribute text exactly as written, or `None` when absent.
    pub raw_attributes: Option<String>,
}

/// Parsed field-level attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldAttributes {
    pub is_id: bool,
    pub is_unique: bool,
    pub is_updated_at: bool,
    /// Full argument text of `@default(...)`, nested parens included.
    pub default_value: Option<String>,
    pub relation: Option<Relation>,
}

/// Parsed `@relation(...)` arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub name: Option<String>,
    pub fields: Vec<String>,
    pub references: Vec<String>,
}
