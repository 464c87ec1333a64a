//! Database Module
//!
//! The transaction stack manager that coordinates all components.
//!
//! ## Responsibilities
//! - Route reads through the overlay chain down to the committed store
//! - Enforce the transaction-required policy for writes
//! - Implement commit/rollback merge semantics
//!
//! ## Stack Model
//!
//! Active overlays live in a `Vec`, oldest at index 0 (depth 0), newest
//! last. The newest overlay is the only one that accepts writes and the
//! only one that may terminate; the parent chain is a reverse walk over
//! the vector. A nested overlay eagerly snapshots its
//! parent at creation, so for nested transactions the walk resolves at the
//! top overlay; the fallback below it only fires for a depth-0 overlay
//! falling through to the committed store.

use crate::config::Config;
use crate::error::{NestError, Result};
use crate::overlay::{Overlay, OverlayEntry};
use crate::store::CommittedStore;

/// An in-process key-value database with nested transactions
///
/// ## Execution Model
///
/// Single-threaded and synchronous: every operation is a non-blocking,
/// execute-to-completion call against in-memory data, so each call is
/// atomic with respect to the caller. Both the committed store and the
/// transaction stack are exclusively owned by the instance.
pub struct Database<T> {
    /// Committed key space, visible when no transaction is active
    store: CommittedStore<T>,

    /// Active transaction overlays, newest last
    transactions: Vec<Overlay<T>>,
}

impl<T> Database<T> {
    /// Create a new empty database
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a database with the given config
    pub fn with_config(config: Config) -> Self {
        Self {
            store: CommittedStore::with_capacity(config.initial_capacity),
            transactions: Vec::new(),
        }
    }

    /// Get a value by key
    ///
    /// Search order:
    /// 1. Overlay chain, newest to oldest (a tombstone resolves to not found)
    /// 2. Committed store
    pub fn get(&self, key: &str) -> Result<&T> {
        for overlay in self.transactions.iter().rev() {
            if let Some(entry) = overlay.get(key) {
                return match entry {
                    OverlayEntry::Value(value) => Ok(value),
                    OverlayEntry::Tombstone => Err(NestError::KeyNotFound),
                };
            }
        }

        self.store.get(key).ok_or(NestError::KeyNotFound)
    }

    /// Stage a write on the innermost transaction
    ///
    /// Fails with [`NestError::NoActiveTransaction`] when no transaction is
    /// active; the committed store is never written directly.
    pub fn set(&mut self, key: &str, value: T) -> Result<()> {
        let top = self
            .transactions
            .last_mut()
            .ok_or(NestError::NoActiveTransaction)?;

        top.set(key, value);
        tracing::trace!("set: staged write for key {:?}", key);
        Ok(())
    }

    /// Stage a delete on the innermost transaction
    ///
    /// Deleting a key that does not exist is legal and stages a tombstone.
    pub fn delete(&mut self, key: &str) -> Result<()> {
        let top = self
            .transactions
            .last_mut()
            .ok_or(NestError::NoActiveTransaction)?;

        top.delete(key);
        tracing::trace!("delete: staged tombstone for key {:?}", key);
        Ok(())
    }

    /// Start a new transaction
    ///
    /// Always succeeds. The new overlay snapshots the current innermost
    /// overlay, or starts empty at depth 0.
    pub fn start_transaction(&mut self)
    where
        T: Clone,
    {
        let overlay = Overlay::new(self.transactions.last());
        self.transactions.push(overlay);
        tracing::debug!("start_transaction: depth now {}", self.transactions.len());
    }

    /// Commit the innermost transaction
    ///
    /// A nested overlay merges its staged entries (tombstones included) into
    /// its parent, overwriting on collision. A depth-0 overlay replaces the
    /// entire committed store with its non-tombstone entries; committed keys
    /// the transaction never touched do not survive.
    pub fn commit(&mut self) -> Result<()> {
        let top = self
            .transactions
            .last_mut()
            .ok_or(NestError::NoActiveTransaction)?;
        top.mark_committed()?;

        let overlay = self
            .transactions
            .pop()
            .ok_or(NestError::NoActiveTransaction)?;
        let staged = overlay.staged_len();

        match self.transactions.last_mut() {
            Some(parent) => {
                overlay.merge_into(parent);
                tracing::debug!(
                    "commit: merged {} staged entries into parent (depth now {})",
                    staged,
                    self.transactions.len()
                );
            }
            None => {
                let committed = overlay.into_committed();
                tracing::debug!(
                    "commit: replaced committed store ({} staged entries, {} live keys)",
                    staged,
                    committed.len()
                );
                self.store.replace(committed);
            }
        }

        Ok(())
    }

    /// Roll back the innermost transaction
    ///
    /// Discards the overlay entirely; ancestors and the committed store are
    /// untouched.
    pub fn rollback(&mut self) -> Result<()> {
        let top = self
            .transactions
            .last_mut()
            .ok_or(NestError::NoActiveTransaction)?;
        top.mark_rolled_back()?;

        let overlay = self
            .transactions
            .pop()
            .ok_or(NestError::NoActiveTransaction)?;
        tracing::debug!(
            "rollback: discarded {} staged entries (depth now {})",
            overlay.staged_len(),
            self.transactions.len()
        );

        Ok(())
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Get the current transaction nesting depth
    pub fn transaction_depth(&self) -> usize {
        self.transactions.len()
    }

    /// Check if a transaction is active
    pub fn in_transaction(&self) -> bool {
        !self.transactions.is_empty()
    }

    /// Get the number of committed entries
    ///
    /// Staged writes are not counted until a depth-0 commit lands them.
    pub fn committed_len(&self) -> usize {
        self.store.len()
    }

    /// Check if the committed store holds no entries
    pub fn committed_is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl<T> Default for Database<T> {
    fn default() -> Self {
        Self::new()
    }
}
