// Copyright 2025 Cowboy AI, LLC.

//! In-memory entity store implementing [`WriteAdapter`]
//!
//! Reference collaborator for hosts and tests. Versions are staged per
//! transaction and become durable only when that transaction is committed.
//! Transactions sharing a stamp are finalized independently; once any of
//! them commits, the stamp accepts no new writes. Durable history of
//! each record is kept ordered by stamp time, whatever order stamps are
//! committed in.

use crate::errors::{ComposerError, ComposerResult};
use crate::fields::{FieldDefinition, FieldValue};
use crate::identifiers::{PublicId, StampKey, TransactionId};
use crate::stamp::StampCoordinate;
use crate::write_adapter::WriteAdapter;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};
use uuid::Uuid;

const STORE_NAME: &str = "in-memory";

/// Internal record number assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Nid(u64);

impl Nid {
    /// Raw record number
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Nid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nid:{}", self.0)
    }
}

/// Kind of record a nid holds; fixed by its first write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    /// Bare addressable node
    Concept,
    /// Field schema
    Pattern,
    /// Schema-conformant data about another component
    Semantic,
}

/// Payload of one version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VersionData {
    /// Concept versions carry no payload
    Concept,
    /// Pattern version
    Pattern {
        /// Meaning concept
        meaning: PublicId,
        /// Purpose concept
        purpose: PublicId,
        /// Ordered field definitions
        field_definitions: Vec<FieldDefinition>,
    },
    /// Semantic version
    Semantic {
        /// Component the semantic is about
        referenced_component: PublicId,
        /// Pattern the values are read against
        pattern: PublicId,
        /// Positional field values
        field_values: Vec<FieldValue>,
    },
}

impl VersionData {
    fn kind(&self) -> RecordKind {
        match self {
            VersionData::Concept => RecordKind::Concept,
            VersionData::Pattern { .. } => RecordKind::Pattern,
            VersionData::Semantic { .. } => RecordKind::Semantic,
        }
    }
}

/// One version of a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordVersion {
    /// Provenance of the version
    pub stamp: StampCoordinate,
    /// Version payload
    pub data: VersionData,
}

#[derive(Debug)]
struct Record {
    public_id: PublicId,
    kind: RecordKind,
    versions: Vec<RecordVersion>,
}

#[derive(Debug, Default)]
struct StoreState {
    next_nid: u64,
    nids_by_uuid: HashMap<Uuid, Nid>,
    records: BTreeMap<Nid, Record>,
    staged: HashMap<TransactionId, IndexMap<Nid, RecordVersion>>,
    committed: HashSet<TransactionId>,
    cancelled: HashSet<TransactionId>,
    committed_stamps: HashSet<StampKey>,
}

impl StoreState {
    fn lookup(&self, id: &PublicId) -> ComposerResult<Option<Nid>> {
        let nids: BTreeSet<Nid> = id
            .uuids()
            .iter()
            .filter_map(|uuid| self.nids_by_uuid.get(uuid).copied())
            .collect();
        let mut iter = nids.iter();
        match (iter.next(), iter.next()) {
            (None, _) => Ok(None),
            (Some(nid), None) => Ok(Some(*nid)),
            (Some(first), Some(second)) => Err(ComposerError::IdentityError(format!(
                "{id} resolves to more than one record ({first}, {second})"
            ))),
        }
    }

    /// Resolve or allocate the nid for `id`, registering any new alias uuids
    fn resolve_or_create(&mut self, id: &PublicId, kind: RecordKind) -> ComposerResult<Nid> {
        let nid = match self.lookup(id)? {
            Some(nid) => {
                let record = self.records.get_mut(&nid).ok_or_else(|| {
                    ComposerError::store(STORE_NAME, format!("{nid} has no record"))
                })?;
                if record.kind != kind {
                    return Err(ComposerError::IdentityError(format!(
                        "{id} is a {:?} record, cannot write a {kind:?} version",
                        record.kind
                    )));
                }
                if !id.uuids().iter().all(|u| record.public_id.uuids().contains(u)) {
                    record.public_id = record.public_id.merged_with(id);
                    debug!(nid = %nid, public_id = %record.public_id, "Merged alias uuids");
                }
                nid
            }
            None => {
                self.next_nid += 1;
                let nid = Nid(self.next_nid);
                self.records.insert(
                    nid,
                    Record {
                        public_id: id.clone(),
                        kind,
                        versions: Vec::new(),
                    },
                );
                nid
            }
        };
        for uuid in id.uuids() {
            self.nids_by_uuid.insert(*uuid, nid);
        }
        Ok(nid)
    }

    fn stage(
        &mut self,
        id: &PublicId,
        stamp: &StampCoordinate,
        transaction: TransactionId,
        data: VersionData,
    ) -> ComposerResult<()> {
        if self.committed.contains(&transaction) || self.cancelled.contains(&transaction) {
            return Err(ComposerError::store(
                STORE_NAME,
                format!("transaction {transaction} is already finalized"),
            ));
        }
        let key = stamp.key();
        if self.committed_stamps.contains(&key) {
            return Err(ComposerError::store(
                STORE_NAME,
                format!("stamp {key} is already committed"),
            ));
        }
        let nid = self.resolve_or_create(id, data.kind())?;
        let replaced = self
            .staged
            .entry(transaction)
            .or_default()
            .insert(
                nid,
                RecordVersion {
                    stamp: stamp.clone(),
                    data,
                },
            )
            .is_some();
        debug!(
            nid = %nid,
            stamp_key = %key,
            transaction_id = %transaction,
            replaced,
            "Staged version"
        );
        Ok(())
    }
}

/// Entity store keeping every record and version in memory
///
/// # Examples
///
/// ```rust
/// use cim_composer::{
///     InMemoryEntityStore, PublicId, Status, StampCoordinate, TransactionId, WriteAdapter,
/// };
///
/// let store = InMemoryEntityStore::new();
/// let stamp = StampCoordinate::now(
///     Status::Active,
///     PublicId::from_name("author"),
///     PublicId::from_name("module"),
///     PublicId::from_name("path"),
/// );
/// let transaction = TransactionId::new();
/// let concept = PublicId::new();
///
/// store.write_concept(&concept, &stamp, transaction).unwrap();
/// assert!(store.durable_versions(&concept).unwrap().is_empty());
///
/// store
///     .commit_transaction(&stamp, transaction, &[concept.clone()])
///     .unwrap();
/// assert_eq!(store.durable_versions(&concept).unwrap().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryEntityStore {
    state: RwLock<StoreState>,
}

impl InMemoryEntityStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(&self) -> ComposerResult<RwLockReadGuard<'_, StoreState>> {
        self.state
            .read()
            .map_err(|e| ComposerError::store(STORE_NAME, e.to_string()))
    }

    fn write_state(&self) -> ComposerResult<RwLockWriteGuard<'_, StoreState>> {
        self.state
            .write()
            .map_err(|e| ComposerError::store(STORE_NAME, e.to_string()))
    }

    /// Number of records with at least one durable version
    pub fn record_count(&self) -> ComposerResult<usize> {
        Ok(self
            .read_state()?
            .records
            .values()
            .filter(|r| !r.versions.is_empty())
            .count())
    }

    /// Number of versions staged by transactions not yet finalized
    pub fn staged_version_count(&self) -> ComposerResult<usize> {
        Ok(self.read_state()?.staged.values().map(IndexMap::len).sum())
    }

    /// Resolve a public id to its record number without allocating one
    pub fn resolve(&self, id: &PublicId) -> ComposerResult<Option<Nid>> {
        self.read_state()?.lookup(id)
    }

    /// Full (merged) public id of a record
    pub fn public_id(&self, nid: Nid) -> ComposerResult<Option<PublicId>> {
        Ok(self
            .read_state()?
            .records
            .get(&nid)
            .map(|r| r.public_id.clone()))
    }

    /// Kind of a record
    pub fn kind(&self, id: &PublicId) -> ComposerResult<Option<RecordKind>> {
        let state = self.read_state()?;
        Ok(state
            .lookup(id)?
            .and_then(|nid| state.records.get(&nid))
            .map(|r| r.kind))
    }

    /// Durable versions of a record ordered by stamp time
    pub fn durable_versions(&self, id: &PublicId) -> ComposerResult<Vec<RecordVersion>> {
        let state = self.read_state()?;
        Ok(state
            .lookup(id)?
            .and_then(|nid| state.records.get(&nid))
            .map(|r| r.versions.clone())
            .unwrap_or_default())
    }

    /// True when the record has at least one durable version
    pub fn contains(&self, id: &PublicId) -> ComposerResult<bool> {
        Ok(!self.durable_versions(id)?.is_empty())
    }
}

impl WriteAdapter for InMemoryEntityStore {
    fn write_concept(
        &self,
        id: &PublicId,
        stamp: &StampCoordinate,
        transaction: TransactionId,
    ) -> ComposerResult<()> {
        self.write_state()?.stage(id, stamp, transaction, VersionData::Concept)
    }

    fn write_pattern(
        &self,
        id: &PublicId,
        stamp: &StampCoordinate,
        transaction: TransactionId,
        meaning: &PublicId,
        purpose: &PublicId,
        field_definitions: &[FieldDefinition],
    ) -> ComposerResult<()> {
        self.write_state()?.stage(
            id,
            stamp,
            transaction,
            VersionData::Pattern {
                meaning: meaning.clone(),
                purpose: purpose.clone(),
                field_definitions: field_definitions.to_vec(),
            },
        )
    }

    fn write_semantic(
        &self,
        id: &PublicId,
        stamp: &StampCoordinate,
        transaction: TransactionId,
        referenced_component: &PublicId,
        pattern: &PublicId,
        field_values: &[FieldValue],
    ) -> ComposerResult<()> {
        self.write_state()?.stage(
            id,
            stamp,
            transaction,
            VersionData::Semantic {
                referenced_component: referenced_component.clone(),
                pattern: pattern.clone(),
                field_values: field_values.to_vec(),
            },
        )
    }

    fn commit_transaction(
        &self,
        stamp: &StampCoordinate,
        transaction: TransactionId,
        components: &[PublicId],
    ) -> ComposerResult<()> {
        let mut state = self.write_state()?;
        if state.committed.contains(&transaction) {
            debug!(transaction_id = %transaction, "Transaction already committed");
            return Ok(());
        }
        if state.cancelled.contains(&transaction) {
            return Err(ComposerError::store(
                STORE_NAME,
                format!("transaction {transaction} was cancelled"),
            ));
        }

        let staged = state.staged.remove(&transaction).unwrap_or_default();
        let count = staged.len();
        for (nid, version) in staged {
            let record = state.records.get_mut(&nid).ok_or_else(|| {
                ComposerError::store(STORE_NAME, format!("{nid} has no record"))
            })?;
            let order = (version.stamp.time(), version.stamp.key());
            let at = record
                .versions
                .partition_point(|v| (v.stamp.time(), v.stamp.key()) <= order);
            record.versions.insert(at, version);
        }
        state.committed.insert(transaction);
        state.committed_stamps.insert(stamp.key());
        info!(
            stamp_key = %stamp.key(),
            transaction_id = %transaction,
            versions = count,
            components = components.len(),
            "Committed transaction"
        );
        Ok(())
    }

    fn cancel_transaction(
        &self,
        stamp: &StampCoordinate,
        transaction: TransactionId,
        components: &[PublicId],
    ) -> ComposerResult<()> {
        let mut state = self.write_state()?;
        if state.committed.contains(&transaction) {
            return Err(ComposerError::store(
                STORE_NAME,
                format!("transaction {transaction} was already committed"),
            ));
        }
        let dropped = state
            .staged
            .remove(&transaction)
            .map(|s| s.len())
            .unwrap_or(0);
        state.cancelled.insert(transaction);
        info!(
            stamp_key = %stamp.key(),
            transaction_id = %transaction,
            versions = dropped,
            components = components.len(),
            "Cancelled transaction"
        );
        Ok(())
    }
}
