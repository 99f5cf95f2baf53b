//! Participant directory and role enforcement for provchain.
//!
//! The ledger engine trusts its callers on who may do what; this crate is
//! that caller. [`Directory`] keeps the set of known participants and their
//! roles, and [`Gateway`] checks roles, custody and batch uniqueness before
//! any transaction reaches the engine.
//!
//! # Example
//!
//! ```rust
//! use provchain_registry::{Directory, Gateway, Role};
//!
//! let mut directory = Directory::new();
//! directory.enroll("MFG001", "Acme Foods", Role::Manufacturer);
//! directory.enroll("REG001", "Food Safety Authority", Role::Validator);
//!
//! let mut gateway = Gateway::new(directory);
//! gateway.register_batch("MFG001", "BATCH-1", "Apples", 500, "Nashik").unwrap();
//! gateway.mine("REG001").unwrap();
//! assert_eq!(gateway.chain().height(), 1);
//! ```

pub mod directory;
pub mod gateway;

// Re-export commonly used types
pub use directory::{Directory, Participant, Role};
pub use gateway::{Gateway, RegistryError};
