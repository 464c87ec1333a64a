//! # nestkv
//!
//! An in-process key-value store with:
//! - Nested transactions with commit and rollback
//! - Snapshot isolation between nesting levels
//! - Tombstone-based staged deletes
//! - A single generic value type per instance
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Database                               │
//! │               (Transaction Stack Manager)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Overlays   │          │  Committed  │
//!   │ (Tx Stack)  │─────────▶│    Store    │
//!   └─────────────┘ fallback └─────────────┘
//! ```
//!
//! Reads walk the overlay stack newest-to-oldest and fall back to the
//! committed store; writes and deletes stage entries on the innermost
//! overlay only. Committing a nested transaction merges its staged entries
//! into its parent; committing the outermost transaction publishes them to
//! the committed store.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod store;
pub mod overlay;
pub mod database;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{NestError, Result};
pub use config::Config;
pub use database::Database;
pub use overlay::{Overlay, OverlayEntry, TxState};
pub use store::CommittedStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of nestkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
