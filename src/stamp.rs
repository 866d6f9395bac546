// Copyright 2025 Cowboy AI, LLC.

//! Stamps: the provenance tuple every composed version is written under
//!
//! A stamp records *who* (author) wrote *what status* of a record, *when*
//! (time), in which *module* and on which *path*. All versions composed in one
//! session share one stamp, and the session cache is keyed by the stamp's
//! derived key.
//!
//! The key is a pure function of the five fields. Callers that let the time
//! default to "now" get a fresh key on nearly every call, so sessions are
//! only reused when the caller passes the same explicit time.

use crate::identifiers::{PublicId, StampKey, COMPOSER_NAMESPACE};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Status of a version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// The version is in effect
    Active,
    /// The version is retired
    Inactive,
    /// The version was withdrawn by its author
    Withdrawn,
    /// The version was cancelled and never took effect
    Canceled,
    /// Bootstrap versions that precede any authored history
    Primordial,
}

impl Status {
    /// Stable name used in key derivation and logs
    pub fn name(&self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Inactive => "Inactive",
            Status::Withdrawn => "Withdrawn",
            Status::Canceled => "Canceled",
            Status::Primordial => "Primordial",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable provenance tuple {status, time, author, module, path}
///
/// # Examples
///
/// ```rust
/// use cim_composer::{PublicId, Status, StampCoordinate};
/// use chrono::{TimeZone, Utc};
///
/// let author = PublicId::from_name("author");
/// let module = PublicId::from_name("module");
/// let path = PublicId::from_name("path");
/// let time = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
///
/// let a = StampCoordinate::new(Status::Active, time, author.clone(), module.clone(), path.clone());
/// let b = StampCoordinate::new(Status::Active, time, author, module, path);
/// assert_eq!(a.key(), b.key());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StampCoordinate {
    status: Status,
    time: DateTime<Utc>,
    author: PublicId,
    module: PublicId,
    path: PublicId,
}

impl StampCoordinate {
    /// Create a stamp from its five fields
    ///
    /// `time` is truncated to whole milliseconds, the precision the key is
    /// derived at, so two stamps share a key only if they carry the same time.
    pub fn new(
        status: Status,
        time: DateTime<Utc>,
        author: PublicId,
        module: PublicId,
        path: PublicId,
    ) -> Self {
        Self {
            status,
            time: time.trunc_subsecs(3),
            author,
            module,
            path,
        }
    }

    /// Create a stamp timed at the current instant
    ///
    /// Every call yields a distinct key, so sessions opened this way are not
    /// reused.
    pub fn now(status: Status, author: PublicId, module: PublicId, path: PublicId) -> Self {
        Self::new(status, Utc::now(), author, module, path)
    }

    /// Version status
    pub fn status(&self) -> Status {
        self.status
    }

    /// Version time
    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    /// Author concept
    pub fn author(&self) -> &PublicId {
        &self.author
    }

    /// Module concept
    pub fn module(&self) -> &PublicId {
        &self.module
    }

    /// Path concept
    pub fn path(&self) -> &PublicId {
        &self.path
    }

    /// Deterministic key over all five fields
    pub fn key(&self) -> StampKey {
        StampKey::from_uuid(Uuid::new_v5(
            &COMPOSER_NAMESPACE,
            self.canonical_form().as_bytes(),
        ))
    }

    /// Public id of the stamp record itself
    pub fn stamp_id(&self) -> PublicId {
        PublicId::from_uuid(*self.key().as_uuid())
    }

    fn canonical_form(&self) -> String {
        fn uuids(id: &PublicId) -> String {
            id.uuids()
                .iter()
                .map(Uuid::to_string)
                .collect::<Vec<_>>()
                .join(",")
        }

        format!(
            "stamp|{}|{}|{}|{}|{}",
            self.status.name(),
            self.time.timestamp_millis(),
            uuids(&self.author),
            uuids(&self.module),
            uuids(&self.path),
        )
    }
}

impl fmt::Display for StampCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} {} a:{} m:{} p:{}]",
            self.status,
            self.time.to_rfc3339(),
            self.author,
            self.module,
            self.path
        )
    }
}
