//! Transaction Overlay
//!
//! Per-transaction staged view of the key space.
//!
//! ## Responsibilities
//! - Stage pending writes and tombstones without touching committed state
//! - Snapshot the parent overlay at creation time
//! - Merge staged entries into a parent on commit
//! - Track the one-shot Active -> Committed / RolledBack lifecycle
//!
//! ## Data Structure Choice
//! A `HashMap<String, OverlayEntry<T>>` keyed by owned strings. The staged
//! mapping of a nested overlay is an eager full copy of its parent's, so a
//! lookup that misses here can only be answered by the committed store.

use std::collections::HashMap;

use crate::error::{NestError, Result};

/// Entry staged in an overlay
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEntry<T> {
    /// A pending write
    Value(T),

    /// A pending delete
    Tombstone,
}

/// Lifecycle state of a transaction overlay
///
/// Terminal states are one-way; an overlay is popped from the stack the
/// moment it terminates, so the terminal checks only guard re-entrant use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxState {
    Active,
    Committed,
    RolledBack,
}

/// Staged, uncommitted mutations relative to a snapshot taken at creation
#[derive(Debug, Clone)]
pub struct Overlay<T> {
    /// Staged writes and tombstones
    staged: HashMap<String, OverlayEntry<T>>,

    /// Whether this overlay was created on top of another (nested)
    has_parent: bool,

    /// Lifecycle state
    state: TxState,
}

impl<T: Clone> Overlay<T> {
    /// Create a new overlay
    ///
    /// With a parent, the staged mapping is a full copy of the parent's
    /// staged mapping (tombstones included) at the moment of the call. The
    /// copy is a snapshot, not a live view: writes to the parent after this
    /// point are not visible here. Without a parent the overlay starts empty.
    pub fn new(parent: Option<&Overlay<T>>) -> Self {
        let staged = match parent {
            Some(parent) => parent.staged.clone(),
            None => HashMap::new(),
        };

        Self {
            staged,
            has_parent: parent.is_some(),
            state: TxState::Active,
        }
    }
}

impl<T> Overlay<T> {
    /// Look up a staged entry for a key
    ///
    /// `None` means the key is absent from this overlay entirely; a
    /// tombstone entry means it is staged as deleted.
    pub fn get(&self, key: &str) -> Option<&OverlayEntry<T>> {
        self.staged.get(key)
    }

    /// Stage a pending write, overwriting any prior staged entry for the key
    pub fn set(&mut self, key: &str, value: T) {
        self.staged.insert(key.to_owned(), OverlayEntry::Value(value));
    }

    /// Stage a tombstone for the key
    ///
    /// Deleting a key with no prior existence is legal and simply stages a
    /// tombstone.
    pub fn delete(&mut self, key: &str) {
        self.staged.insert(key.to_owned(), OverlayEntry::Tombstone);
    }

    /// Merge every staged entry (values and tombstones) into the parent,
    /// overwriting on key collision
    pub fn merge_into(self, parent: &mut Overlay<T>) {
        for (key, entry) in self.staged {
            parent.staged.insert(key, entry);
        }
    }

    /// Consume the overlay into a committed mapping, dropping tombstones
    pub fn into_committed(self) -> HashMap<String, T> {
        self.staged
            .into_iter()
            .filter_map(|(key, entry)| match entry {
                OverlayEntry::Value(value) => Some((key, value)),
                OverlayEntry::Tombstone => None,
            })
            .collect()
    }

    /// Transition to the committed state
    ///
    /// Fails if the overlay already reached a terminal state.
    pub fn mark_committed(&mut self) -> Result<()> {
        self.check_active()?;
        self.state = TxState::Committed;
        Ok(())
    }

    /// Transition to the rolled-back state
    ///
    /// Fails under the same conditions as [`Overlay::mark_committed`].
    pub fn mark_rolled_back(&mut self) -> Result<()> {
        self.check_active()?;
        self.state = TxState::RolledBack;
        Ok(())
    }

    fn check_active(&self) -> Result<()> {
        match self.state {
            TxState::Active => Ok(()),
            TxState::Committed => Err(NestError::AlreadyCommitted),
            TxState::RolledBack => Err(NestError::AlreadyRolledBack),
        }
    }

    /// Whether this overlay was created with a parent (nested transaction)
    pub fn has_parent(&self) -> bool {
        self.has_parent
    }

    /// Current lifecycle state
    pub fn state(&self) -> TxState {
        self.state
    }

    /// Number of staged entries, tombstones included
    pub fn staged_len(&self) -> usize {
        self.staged.len()
    }

    /// Check if nothing is staged
    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }
}
