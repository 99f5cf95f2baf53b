//! The participant directory: who exists, and what they may do.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Role of a supply-chain participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Manufacturer,
    Shipper,
    Distributor,
    Retailer,
    /// Authorized to commit pending transactions into blocks.
    Validator,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Manufacturer => "Manufacturer",
            Role::Shipper => "Shipper",
            Role::Distributor => "Distributor",
            Role::Retailer => "Retailer",
            Role::Validator => "Validator",
        };
        f.write_str(name)
    }
}

/// One enrolled participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub role: Role,
}

/// The set of known participants, keyed by id.
///
/// Capability checks are exposed as methods rather than role comparisons at
/// call sites, so the gateway never matches on role names directly.
#[derive(Debug, Default, Clone)]
pub struct Directory {
    participants: BTreeMap<String, Participant>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a participant.
    pub fn enroll(&mut self, id: impl Into<String>, name: impl Into<String>, role: Role) {
        let id = id.into();
        self.participants.insert(
            id.clone(),
            Participant {
                id,
                name: name.into(),
                role,
            },
        );
    }

    pub fn get(&self, id: &str) -> Option<&Participant> {
        self.participants.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.participants.contains_key(id)
    }

    /// All participants in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.values()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// May this participant put new batches on the ledger?
    pub fn can_register_batches(&self, id: &str) -> bool {
        matches!(self.get(id), Some(p) if p.role == Role::Manufacturer)
    }

    /// May this participant take physical custody of a batch?
    pub fn can_hold(&self, id: &str) -> bool {
        matches!(self.get(id), Some(p) if p.role != Role::Validator)
    }

    /// May this participant log compliance events? Any enrolled participant
    /// (validators included) may.
    pub fn can_log_events(&self, id: &str) -> bool {
        self.contains(id)
    }

    /// May this participant trigger mining?
    pub fn can_mine(&self, id: &str) -> bool {
        matches!(self.get(id), Some(p) if p.role == Role::Validator)
    }
}
