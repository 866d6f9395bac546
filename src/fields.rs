// Copyright 2025 Cowboy AI, LLC.

//! Typed field values for semantics and field definitions for patterns
//!
//! A pattern declares an ordered list of [`FieldDefinition`]s; a semantic
//! carries an ordered list of [`FieldValue`]s read positionally against that
//! pattern. This layer keeps both orders exactly as given and does not check
//! one against the other.

use crate::identifiers::PublicId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Data type a pattern field accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldDataType {
    /// Free text
    String,
    /// Signed integer
    Integer,
    /// Floating point number
    Float,
    /// True/false
    Boolean,
    /// Point in time
    Instant,
    /// Raw UUID
    Uuid,
    /// Reference to one component
    Component,
    /// Unordered set of component references
    ComponentSet,
    /// Ordered list of component references
    ComponentList,
    /// Opaque bytes
    Bytes,
}

/// One positional value of a semantic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// Free text
    String(String),
    /// Signed integer
    Integer(i64),
    /// Floating point number
    Float(f64),
    /// True/false
    Boolean(bool),
    /// Point in time
    Instant(DateTime<Utc>),
    /// Raw UUID
    Uuid(Uuid),
    /// Reference to one component
    Component(PublicId),
    /// Set of component references (duplicates removed, first occurrence kept)
    ComponentSet(Vec<PublicId>),
    /// Ordered list of component references
    ComponentList(Vec<PublicId>),
    /// Opaque bytes
    Bytes(Vec<u8>),
}

impl FieldValue {
    /// Build a component set, dropping repeated ids
    pub fn component_set(ids: impl IntoIterator<Item = PublicId>) -> Self {
        let mut set: Vec<PublicId> = Vec::new();
        for id in ids {
            if !set.contains(&id) {
                set.push(id);
            }
        }
        FieldValue::ComponentSet(set)
    }

    /// The data type this value satisfies
    pub fn data_type(&self) -> FieldDataType {
        match self {
            FieldValue::String(_) => FieldDataType::String,
            FieldValue::Integer(_) => FieldDataType::Integer,
            FieldValue::Float(_) => FieldDataType::Float,
            FieldValue::Boolean(_) => FieldDataType::Boolean,
            FieldValue::Instant(_) => FieldDataType::Instant,
            FieldValue::Uuid(_) => FieldDataType::Uuid,
            FieldValue::Component(_) => FieldDataType::Component,
            FieldValue::ComponentSet(_) => FieldDataType::ComponentSet,
            FieldValue::ComponentList(_) => FieldDataType::ComponentList,
            FieldValue::Bytes(_) => FieldDataType::Bytes,
        }
    }

    /// Text content, if this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Component reference, if this is a component value
    pub fn as_component(&self) -> Option<&PublicId> {
        match self {
            FieldValue::Component(id) => Some(id),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Instant(value)
    }
}

impl From<PublicId> for FieldValue {
    fn from(value: PublicId) -> Self {
        FieldValue::Component(value)
    }
}

/// Ordered field values of one semantic version
pub type FieldValues = Vec<FieldValue>;

/// One positional field declared by a pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Concept naming what the field means
    pub meaning: PublicId,
    /// Concept naming why the field exists
    pub purpose: PublicId,
    /// Type of value expected at this position
    pub data_type: FieldDataType,
}

impl FieldDefinition {
    /// Create a field definition
    pub fn new(meaning: PublicId, purpose: PublicId, data_type: FieldDataType) -> Self {
        Self {
            meaning,
            purpose,
            data_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_set_drops_repeats() {
        let a = PublicId::new();
        let b = PublicId::new();
        let value = FieldValue::component_set([a.clone(), b.clone(), a.clone()]);
        assert_eq!(value, FieldValue::ComponentSet(vec![a, b]));
    }

    #[test]
    fn test_data_type_follows_variant() {
        assert_eq!(FieldValue::from("x").data_type(), FieldDataType::String);
        assert_eq!(FieldValue::from(3_i64).data_type(), FieldDataType::Integer);
        assert_eq!(FieldValue::from(true).data_type(), FieldDataType::Boolean);
        assert_eq!(
            FieldValue::from(PublicId::new()).data_type(),
            FieldDataType::Component
        );
        assert_eq!(
            FieldValue::ComponentList(vec![]).data_type(),
            FieldDataType::ComponentList
        );
    }

    #[test]
    fn test_accessors() {
        let id = PublicId::new();
        assert_eq!(FieldValue::from("Color").as_str(), Some("Color"));
        assert_eq!(FieldValue::from(id.clone()).as_component(), Some(&id));
        assert_eq!(FieldValue::Integer(1).as_str(), None);
    }
}
