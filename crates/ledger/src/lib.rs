//! The provchain ledger engine.
//!
//! A single-node, in-memory, append-only ledger:
//! - **Chain**: committed blocks plus the pending pool, mutated only through
//!   [`Chain::submit`] and [`Chain::mine`]
//! - **Integrity verification**: recomputes digests and checks block linkage
//! - **Provenance tracing**: per-batch history across blocks and the pool
//!
//! The engine trusts its callers on roles: whether an actor may register a
//! batch or trigger mining is decided by the participant directory in
//! `provchain-registry` before a call reaches this crate.
//!
//! # Example
//!
//! ```rust
//! use provchain_core::Transaction;
//! use provchain_ledger::Chain;
//!
//! let mut chain = Chain::new();
//! chain.submit(Transaction::registration("B1", "MFG001", "Apples", 500, "Nashik"))
//!     .unwrap();
//! chain.mine().unwrap();
//!
//! assert_eq!(chain.height(), 1);
//! assert!(chain.verify().is_ok());
//! assert_eq!(chain.trace("B1").count(), 1);
//! ```

pub mod chain;
pub mod pool;
pub mod trace;
pub mod verify;

// Re-export commonly used types
pub use chain::{Chain, LedgerError};
pub use pool::PendingPool;
pub use trace::{current_holder, trace, ProvenanceEntry};
pub use verify::{verify, IntegrityError};
