// Copyright 2025 Cowboy AI, LLC.

//! Composer: opens, reuses, closes and cancels sessions keyed by stamp
//!
//! The session cache is an explicit map owned by one composer. `open` with a
//! stamp whose key is already cached returns the cached session while it is
//! still open. Sweeps (`close_all_sessions`, `cancel_all_sessions`) finish
//! each session independently; there is no atomicity across sessions.

use crate::config::ComposerConfig;
use crate::errors::{ComposerError, ComposerResult};
use crate::identifiers::{PublicId, StampKey};
use crate::stamp::{StampCoordinate, Status};
use crate::write_adapter::WriteAdapter;
use crate::Session;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of finishing every cached session
#[derive(Debug, Default)]
pub struct SessionSweep {
    /// Sessions that were committed (or cancelled) and evicted
    pub finished: Vec<StampKey>,
    /// Sessions whose commit (or cancel) failed
    pub failures: Vec<(StampKey, ComposerError)>,
}

impl SessionSweep {
    /// True when every session finished
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
enum Finish {
    Commit,
    Cancel,
}

/// Session lifecycle manager
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use cim_composer::{Composer, InMemoryEntityStore, PublicId, Status};
/// use chrono::Utc;
///
/// let mut composer = Composer::new(Arc::new(InMemoryEntityStore::new()));
/// let time = Utc::now();
/// let author = PublicId::from_name("author");
/// let module = PublicId::from_name("module");
/// let path = PublicId::from_name("path");
///
/// let first = composer.open(Status::Active, time, author.clone(), module.clone(), path.clone());
/// let again = composer.open(Status::Active, time, author, module, path);
/// assert!(first.same_session(&again));
/// assert_eq!(composer.open_session_count(), 1);
///
/// composer.close_session(&first).unwrap();
/// assert_eq!(composer.open_session_count(), 0);
/// ```
pub struct Composer {
    adapter: Arc<dyn WriteAdapter>,
    config: ComposerConfig,
    sessions: IndexMap<StampKey, Session>,
}

impl Composer {
    /// Composer writing through `adapter` with the default configuration
    pub fn new(adapter: Arc<dyn WriteAdapter>) -> Self {
        Self::with_config(adapter, ComposerConfig::default())
    }

    /// Composer with an explicit configuration
    pub fn with_config(adapter: Arc<dyn WriteAdapter>, config: ComposerConfig) -> Self {
        Self {
            adapter,
            config,
            sessions: IndexMap::new(),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    /// Open (or reuse) the session for the stamp built from these fields
    pub fn open(
        &mut self,
        status: Status,
        time: DateTime<Utc>,
        author: PublicId,
        module: PublicId,
        path: PublicId,
    ) -> Session {
        self.open_stamp(StampCoordinate::new(status, time, author, module, path))
    }

    /// Open a session timed now
    ///
    /// Each call produces a new stamp key, so the session is never reused.
    /// Pass an explicit shared time to [`Composer::open`] to group writes.
    pub fn open_now(
        &mut self,
        status: Status,
        author: PublicId,
        module: PublicId,
        path: PublicId,
    ) -> Session {
        self.open_stamp(StampCoordinate::now(status, author, module, path))
    }

    /// Open (or reuse) the session for `stamp`
    ///
    /// A cached session that was already committed or cancelled is replaced
    /// by a fresh one, as is every cached session when
    /// [`ComposerConfig::reuse_sessions`] is off.
    pub fn open_stamp(&mut self, stamp: StampCoordinate) -> Session {
        let key = stamp.key();
        if self.config.reuse_sessions {
            if let Some(session) = self.sessions.get(&key).filter(|s| s.is_open()) {
                return session.clone();
            }
        }

        let session = Session::new(stamp, self.adapter.clone());
        info!(
            composer = %self.config.name,
            stamp_key = %key,
            stamp = %session.stamp(),
            "Session opened"
        );
        self.sessions.insert(key, session.clone());
        session
    }

    /// Cached session for `key`
    pub fn session(&self, key: &StampKey) -> Option<Session> {
        self.sessions.get(key).cloned()
    }

    /// Number of cached sessions
    pub fn open_session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Commit `session` and evict it from the cache
    pub fn close_session(&mut self, session: &Session) -> ComposerResult<()> {
        self.finish_session(session, Finish::Commit)
    }

    /// Cancel `session` and evict it from the cache
    pub fn cancel_session(&mut self, session: &Session) -> ComposerResult<()> {
        self.finish_session(session, Finish::Cancel)
    }

    /// Commit every cached session independently
    pub fn close_all_sessions(&mut self) -> SessionSweep {
        self.sweep(Finish::Commit)
    }

    /// Cancel every cached session independently
    pub fn cancel_all_sessions(&mut self) -> SessionSweep {
        self.sweep(Finish::Cancel)
    }

    fn finish_session(&mut self, session: &Session, finish: Finish) -> ComposerResult<()> {
        let key = session.key();
        let cached = self
            .sessions
            .get(&key)
            .is_some_and(|s| s.same_session(session));
        if !cached {
            warn!(
                composer = %self.config.name,
                stamp_key = %key,
                "Finishing a session this composer does not cache"
            );
        }

        Self::apply(session, finish)?;
        if cached {
            self.sessions.shift_remove(&key);
        }
        Ok(())
    }

    fn sweep(&mut self, finish: Finish) -> SessionSweep {
        let mut report = SessionSweep::default();
        let sessions: Vec<(StampKey, Session)> = self
            .sessions
            .iter()
            .map(|(k, s)| (*k, s.clone()))
            .collect();

        for (key, session) in sessions {
            match Self::apply(&session, finish) {
                Ok(()) => {
                    self.sessions.shift_remove(&key);
                    report.finished.push(key);
                }
                Err(err) => {
                    warn!(
                        composer = %self.config.name,
                        stamp_key = %key,
                        error = %err,
                        "Session could not be finished"
                    );
                    if self.config.evict_on_sweep_failure {
                        self.sessions.shift_remove(&key);
                    }
                    report.failures.push((key, err));
                }
            }
        }

        info!(
            composer = %self.config.name,
            action = ?finish,
            finished = report.finished.len(),
            failed = report.failures.len(),
            "Session sweep complete"
        );
        report
    }

    fn apply(session: &Session, finish: Finish) -> ComposerResult<()> {
        match finish {
            Finish::Commit => session.commit(),
            Finish::Cancel => session.cancel(),
        }
    }
}

impl Drop for Composer {
    fn drop(&mut self) {
        if !self.config.warn_on_unfinished_sessions {
            return;
        }
        for (key, session) in &self.sessions {
            if session.is_open() {
                warn!(
                    composer = %self.config.name,
                    stamp_key = %key,
                    components = session.components_in_session_count(),
                    "Composer dropped with an unfinished session"
                );
            }
        }
    }
}
