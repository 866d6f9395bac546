// Copyright 2025 Cowboy AI, LLC.

//! # Persistence Layer
//!
//! Durable storage belongs to the host's entity store, reached through
//! [`crate::WriteAdapter`]. This module ships the in-memory reference store
//! used for prototyping and tests.

pub mod in_memory_store;

pub use in_memory_store::{InMemoryEntityStore, Nid, RecordKind, RecordVersion, VersionData};
