// Copyright 2025 Cowboy AI, LLC.

//! Composition sessions
//!
//! A session owns one stamp and one transaction. Every node composed or
//! attached in it is validated, written through the write adapter under the
//! session's stamp, and registered with the transaction straight away. The
//! session is then committed or cancelled as a whole.
//!
//! Sessions and handles are reference counted without locking; they belong to
//! one thread of control and the compiler keeps them there.

use crate::composition::{Attachment, ComponentKind, CompositionNode, SemanticAssembler};
use crate::errors::{ComposerError, ComposerResult};
use crate::identifiers::{PublicId, StampKey, TransactionId};
use crate::stamp::StampCoordinate;
use crate::state_machine::{State, StateTransition};
use crate::transaction::Transaction;
use crate::transaction_state::{TransactionInput, TransactionState, TxEffect};
use crate::write_adapter::WriteAdapter;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use tracing::{debug, info, warn};

struct SessionInner {
    stamp: StampCoordinate,
    key: StampKey,
    adapter: Arc<dyn WriteAdapter>,
    transaction: RefCell<Transaction>,
}

/// Unit of atomic commit/cancel for everything composed under one stamp
///
/// Cloning a session yields another handle to the same session.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use cim_composer::{
///     CaseSignificance, Composer, ConceptAssembler, FullyQualifiedName, InMemoryEntityStore,
///     Language, PublicId, Status, UsDialect,
/// };
/// use chrono::Utc;
///
/// let store = Arc::new(InMemoryEntityStore::new());
/// let mut composer = Composer::new(store.clone());
/// let session = composer.open(
///     Status::Active,
///     Utc::now(),
///     PublicId::from_name("author"),
///     PublicId::from_name("module"),
///     PublicId::from_name("path"),
/// );
///
/// let concept = session.compose(ConceptAssembler::new()).unwrap();
/// concept
///     .attach(FullyQualifiedName::new(Language::English, "Color", CaseSignificance::NotCaseSensitive))
///     .unwrap()
///     .attach(UsDialect::preferred())
///     .unwrap();
///
/// session.commit().unwrap();
/// assert_eq!(session.components_in_session_count(), 3);
/// assert!(store.contains(concept.public_id()).unwrap());
/// ```
#[derive(Clone)]
pub struct Session {
    inner: Rc<SessionInner>,
}

impl Session {
    pub(crate) fn new(stamp: StampCoordinate, adapter: Arc<dyn WriteAdapter>) -> Self {
        let key = stamp.key();
        Self {
            inner: Rc::new(SessionInner {
                stamp,
                key,
                adapter,
                transaction: RefCell::new(Transaction::new()),
            }),
        }
    }

    /// Stamp every version in this session is written under
    pub fn stamp(&self) -> &StampCoordinate {
        &self.inner.stamp
    }

    /// Key the session is cached under
    pub fn key(&self) -> StampKey {
        self.inner.key
    }

    /// Identifier of the session's transaction
    pub fn transaction_id(&self) -> TransactionId {
        self.inner.transaction.borrow().id()
    }

    /// Lifecycle transitions of the session's transaction, oldest first
    pub fn history(&self) -> Vec<StateTransition<TransactionState, TransactionInput, TxEffect>> {
        self.inner.transaction.borrow().history().to_vec()
    }

    /// Lifecycle state
    pub fn state(&self) -> TransactionState {
        self.inner.transaction.borrow().state()
    }

    /// True until the session is committed or cancelled
    pub fn is_open(&self) -> bool {
        self.inner.transaction.borrow().is_open()
    }

    /// Number of distinct components registered so far
    pub fn components_in_session_count(&self) -> usize {
        self.inner.transaction.borrow().len()
    }

    /// Registered components in registration order
    pub fn components(&self) -> Vec<PublicId> {
        self.inner
            .transaction
            .borrow()
            .components()
            .cloned()
            .collect()
    }

    /// True when both values are handles to the same session
    pub fn same_session(&self, other: &Session) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Validate and write a root node, returning a handle to attach to
    pub fn compose<N: CompositionNode>(&self, node: N) -> ComposerResult<ComponentHandle> {
        let id = self.write_and_register(&node)?;
        Ok(ComponentHandle {
            session: self.clone(),
            id,
            kind: node.kind(),
        })
    }

    /// Commit: every registered version becomes durable. Repeat calls are no-ops.
    pub fn commit(&self) -> ComposerResult<()> {
        let mut transaction = self.inner.transaction.borrow_mut();
        if !transaction.is_open() {
            warn!(
                stamp_key = %self.inner.key,
                state = transaction.state().name(),
                "Commit on finished session ignored"
            );
            return Ok(());
        }
        let components: Vec<PublicId> = transaction.components().cloned().collect();
        self.inner
            .adapter
            .commit_transaction(&self.inner.stamp, transaction.id(), &components)?;
        transaction.commit()?;
        info!(
            stamp_key = %self.inner.key,
            transaction_id = %transaction.id(),
            components = components.len(),
            "Session committed"
        );
        Ok(())
    }

    /// Same as [`Session::commit`]
    pub fn close(&self) -> ComposerResult<()> {
        self.commit()
    }

    /// Cancel: no registered version becomes durable. Repeat calls are no-ops.
    pub fn cancel(&self) -> ComposerResult<()> {
        let mut transaction = self.inner.transaction.borrow_mut();
        if !transaction.is_open() {
            warn!(
                stamp_key = %self.inner.key,
                state = transaction.state().name(),
                "Cancel on finished session ignored"
            );
            return Ok(());
        }
        let components: Vec<PublicId> = transaction.components().cloned().collect();
        self.inner
            .adapter
            .cancel_transaction(&self.inner.stamp, transaction.id(), &components)?;
        transaction.cancel()?;
        info!(
            stamp_key = %self.inner.key,
            transaction_id = %transaction.id(),
            components = components.len(),
            "Session cancelled"
        );
        Ok(())
    }

    fn ensure_open(&self) -> ComposerResult<()> {
        let state = self.state();
        if state.is_terminal() {
            return Err(ComposerError::SessionTerminal {
                stamp_key: self.inner.key.to_string(),
                state: state.name().to_string(),
            });
        }
        Ok(())
    }

    fn write_and_register(&self, node: &dyn CompositionNode) -> ComposerResult<PublicId> {
        self.ensure_open()?;
        let id = node.validate_and_write(
            self.inner.adapter.as_ref(),
            &self.inner.stamp,
            self.transaction_id(),
        )?;
        self.inner.transaction.borrow_mut().register(id.clone())?;
        debug!(stamp_key = %self.inner.key, component = %node.describe(), "Composed");
        Ok(id)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("stamp", &self.inner.stamp)
            .field("key", &self.inner.key)
            .field("transaction", &self.inner.transaction.borrow())
            .finish()
    }
}

/// Chainable handle to a component written in a session
///
/// Attaching returns the child's handle; keep the parent handle to attach
/// siblings.
#[derive(Debug, Clone)]
pub struct ComponentHandle {
    session: Session,
    id: PublicId,
    kind: ComponentKind,
}

impl ComponentHandle {
    /// Identity of the written component
    pub fn public_id(&self) -> &PublicId {
        &self.id
    }

    /// Kind of the written component
    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Session the component belongs to
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Attach a semantic template to this component
    ///
    /// The template is validated, written as a semantic referencing this
    /// component, and registered. Fails with a state error once the session
    /// is committed or cancelled.
    pub fn attach(&self, attachment: impl Into<Attachment>) -> ComposerResult<ComponentHandle> {
        let Attachment { template, identity } = attachment.into();
        self.session.ensure_open()?;
        template.validate()?;

        let node = SemanticAssembler::with_identity(identity)
            .pattern(template.pattern())
            .field_values(template.field_values());
        node.set_reference(self.id.clone())?;
        debug!(
            parent = %self.id,
            template = template.name(),
            "Attaching template"
        );
        self.attach_node(node)
    }

    /// Attach a hand-built semantic; its reference is bound to this component
    pub fn attach_semantic(&self, semantic: SemanticAssembler) -> ComposerResult<ComponentHandle> {
        self.session.ensure_open()?;
        semantic.set_reference(self.id.clone())?;
        self.attach_node(semantic)
    }

    fn attach_node(&self, node: SemanticAssembler) -> ComposerResult<ComponentHandle> {
        let id = self.session.write_and_register(&node)?;
        Ok(ComponentHandle {
            session: self.session.clone(),
            id,
            kind: ComponentKind::Semantic,
        })
    }
}
