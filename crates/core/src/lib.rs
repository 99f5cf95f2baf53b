//! Core ledger primitives for provchain.
//!
//! This crate provides the fundamental types used throughout the ledger:
//! - Content addressing (Blake3 digests over canonical bytes)
//! - Supply-chain transactions (registration, custody transfer, compliance)
//! - Hash-linked blocks

pub mod block;
pub mod digest;
pub mod time;
pub mod transaction;

// Re-export commonly used types at the crate root
pub use block::Block;
pub use digest::{digest_of, Digest};
pub use transaction::{Payload, Transaction, TransactionError, TransportMode, TxKind};
