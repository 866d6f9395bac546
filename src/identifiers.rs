// Copyright 2025 Cowboy AI, LLC.

//! Identifier types for composed records, stamps and transactions

use crate::errors::{ComposerError, ComposerResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Namespace for every name-derived UUID minted by this crate
///
/// Changing this value changes every well-known id and every stamp key.
pub const COMPOSER_NAMESPACE: Uuid = Uuid::from_u128(0x5c1d_9e4a_37b2_4f08_a6d3_c0f1_2b7e_8d94);

/// Public identity of a record: one or more alias UUIDs naming one logical record
///
/// The first UUID is the primary id. The list is never empty and never holds
/// the same UUID twice. Whether two ids with overlapping UUIDs denote the
/// same record is decided by the entity store, not by this type.
///
/// # Examples
///
/// ```rust
/// use cim_composer::PublicId;
/// use uuid::Uuid;
///
/// let u1 = Uuid::new_v4();
/// let u2 = Uuid::new_v4();
/// let first = PublicId::from_uuid(u1);
/// let both = PublicId::from_uuids([u1, u2]).unwrap();
///
/// assert!(first.overlaps(&both));
/// assert_eq!(both.primary(), u1);
/// assert!(PublicId::from_uuids(Vec::new()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Uuid>", into = "Vec<Uuid>")]
pub struct PublicId(Vec<Uuid>);

impl PublicId {
    /// Create a new random public id
    pub fn new() -> Self {
        Self(vec![Uuid::new_v4()])
    }

    /// Create a public id from a single UUID
    pub fn from_uuid(id: Uuid) -> Self {
        Self(vec![id])
    }

    /// Create a public id from alias UUIDs, dropping repeats and keeping order
    pub fn from_uuids(ids: impl IntoIterator<Item = Uuid>) -> ComposerResult<Self> {
        let mut uuids: Vec<Uuid> = Vec::new();
        for id in ids {
            if !uuids.contains(&id) {
                uuids.push(id);
            }
        }
        if uuids.is_empty() {
            return Err(ComposerError::validation(
                "a public id needs at least one uuid",
            ));
        }
        Ok(Self(uuids))
    }

    /// Derive a stable public id from a name
    pub fn from_name(name: &str) -> Self {
        Self(vec![Uuid::new_v5(&COMPOSER_NAMESPACE, name.as_bytes())])
    }

    /// The primary (first) UUID
    pub fn primary(&self) -> Uuid {
        self.0[0]
    }

    /// All alias UUIDs in order
    pub fn uuids(&self) -> &[Uuid] {
        &self.0
    }

    /// Number of alias UUIDs
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the id holds no UUIDs, which a constructed id never does
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when both ids share at least one UUID
    pub fn overlaps(&self, other: &PublicId) -> bool {
        self.0.iter().any(|id| other.0.contains(id))
    }

    /// Union of both alias lists, this id's UUIDs first
    pub fn merged_with(&self, other: &PublicId) -> PublicId {
        let mut uuids = self.0.clone();
        for id in &other.0 {
            if !uuids.contains(id) {
                uuids.push(*id);
            }
        }
        PublicId(uuids)
    }
}

impl Default for PublicId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PublicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0[0])?;
        if self.0.len() > 1 {
            write!(f, " (+{} aliases)", self.0.len() - 1)?;
        }
        Ok(())
    }
}

impl From<Uuid> for PublicId {
    fn from(id: Uuid) -> Self {
        Self::from_uuid(id)
    }
}

impl TryFrom<Vec<Uuid>> for PublicId {
    type Error = ComposerError;

    fn try_from(ids: Vec<Uuid>) -> Result<Self, Self::Error> {
        Self::from_uuids(ids)
    }
}

impl From<PublicId> for Vec<Uuid> {
    fn from(id: PublicId) -> Self {
        id.0
    }
}

/// Stamp key - deterministic key derived from a stamp's five fields
///
/// Sessions are cached under this key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StampKey(Uuid);

impl StampKey {
    /// Create from a UUID
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for StampKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<StampKey> for Uuid {
    fn from(key: StampKey) -> Self {
        key.0
    }
}

/// Transaction ID - identifies one session's transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Create a new random transaction ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
