//! Supply-chain transaction types.

use crate::time::unix_now;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when building or validating a transaction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactionError {
    #[error("batch id must not be empty")]
    EmptyBatchId,
    #[error("actor id must not be empty")]
    EmptyActor,
    #[error("unknown transport mode: {0}")]
    UnknownTransportMode(String),
}

/// How a batch physically moves between holders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransportMode {
    #[default]
    Truck,
    Ship,
    Air,
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransportMode::Truck => "TRUCK",
            TransportMode::Ship => "SHIP",
            TransportMode::Air => "AIR",
        };
        f.write_str(name)
    }
}

impl FromStr for TransportMode {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "" | "TRUCK" => Ok(TransportMode::Truck),
            "SHIP" => Ok(TransportMode::Ship),
            "AIR" => Ok(TransportMode::Air),
            other => Err(TransactionError::UnknownTransportMode(other.to_string())),
        }
    }
}

/// Kind-specific data carried by a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    /// A manufacturer puts a new batch on the ledger.
    Registration {
        product: String,
        quantity: u32,
        origin: String,
    },
    /// Custody moves from one holder to another.
    Transfer {
        from_holder: String,
        to_holder: String,
        location: String,
        mode: TransportMode,
    },
    /// A quality/compliance observation, e.g. `event: "TEMP_LOG"`,
    /// `data: "temp=4C"`. The transaction's `created_at` is the event time.
    Compliance { event: String, data: String },
}

/// Discriminant of [`Payload`], for filtering and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxKind {
    Registration,
    Transfer,
    Compliance,
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TxKind::Registration => "REGISTRATION",
            TxKind::Transfer => "TRANSFER",
            TxKind::Compliance => "COMPLIANCE",
        };
        f.write_str(name)
    }
}

/// An immutable record of one supply-chain event attached to a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Identifier of the tracked product batch.
    pub batch_id: String,
    /// Participant performing the action.
    pub actor: String,
    /// Unix timestamp set at submission time.
    pub created_at: u64,
    /// Kind-specific event data.
    pub payload: Payload,
}

impl Transaction {
    fn new(batch_id: impl Into<String>, actor: impl Into<String>, payload: Payload) -> Self {
        Self {
            batch_id: batch_id.into(),
            actor: actor.into(),
            created_at: unix_now(),
            payload,
        }
    }

    /// A batch registration performed by `actor` (the initial holder).
    pub fn registration(
        batch_id: impl Into<String>,
        actor: impl Into<String>,
        product: impl Into<String>,
        quantity: u32,
        origin: impl Into<String>,
    ) -> Self {
        Self::new(
            batch_id,
            actor,
            Payload::Registration {
                product: product.into(),
                quantity,
                origin: origin.into(),
            },
        )
    }

    /// A custody transfer. `actor` is the releasing holder.
    pub fn transfer(
        batch_id: impl Into<String>,
        from_holder: impl Into<String>,
        to_holder: impl Into<String>,
        location: impl Into<String>,
        mode: TransportMode,
    ) -> Self {
        let from_holder = from_holder.into();
        Self::new(
            batch_id,
            from_holder.clone(),
            Payload::Transfer {
                from_holder,
                to_holder: to_holder.into(),
                location: location.into(),
                mode,
            },
        )
    }

    /// A compliance/quality event logged by any known participant.
    pub fn compliance(
        batch_id: impl Into<String>,
        actor: impl Into<String>,
        event: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self::new(
            batch_id,
            actor,
            Payload::Compliance {
                event: event.into(),
                data: data.into(),
            },
        )
    }

    pub fn kind(&self) -> TxKind {
        match self.payload {
            Payload::Registration { .. } => TxKind::Registration,
            Payload::Transfer { .. } => TxKind::Transfer,
            Payload::Compliance { .. } => TxKind::Compliance,
        }
    }

    pub fn is_registration(&self) -> bool {
        self.kind() == TxKind::Registration
    }

    pub fn is_transfer(&self) -> bool {
        self.kind() == TxKind::Transfer
    }

    /// Check the well-formedness rules enforced at submission.
    pub fn validate(&self) -> Result<(), TransactionError> {
        if self.batch_id.trim().is_empty() {
            return Err(TransactionError::EmptyBatchId);
        }
        if self.actor.trim().is_empty() {
            return Err(TransactionError::EmptyActor);
        }
        Ok(())
    }
}
