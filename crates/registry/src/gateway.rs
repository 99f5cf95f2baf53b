//! Role-checked entry point in front of the ledger engine.

use crate::directory::Directory;
use provchain_core::{Block, Transaction, TransportMode};
use provchain_ledger::{Chain, IntegrityError, LedgerError, ProvenanceEntry};
use thiserror::Error;
use tracing::warn;

/// Errors raised by the directory checks, plus pass-through engine errors.
///
/// All are recoverable and none leaves a partial mutation behind: a rejected
/// operation queues nothing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown participant: {0}")]
    UnknownParticipant(String),

    #[error("{actor} is not authorized to {action}")]
    UnauthorizedRole { actor: String, action: &'static str },

    #[error("batch {0} is already registered")]
    DuplicateBatch(String),

    #[error("unknown batch: {0}")]
    UnknownBatch(String),

    #[error("batch {batch_id} is held by {holder}, not {claimed}")]
    HolderMismatch {
        batch_id: String,
        holder: String,
        claimed: String,
    },

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

pub type Result<T> = std::result::Result<T, RegistryError>;

/// Owns the directory and the chain, and enforces everything the engine
/// trusts its callers to have checked: roles, custody, batch uniqueness.
#[derive(Debug, Default)]
pub struct Gateway {
    directory: Directory,
    chain: Chain,
}

impl Gateway {
    /// Start a fresh chain behind the given directory.
    pub fn new(directory: Directory) -> Self {
        Self {
            directory,
            chain: Chain::new(),
        }
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn directory_mut(&mut self) -> &mut Directory {
        &mut self.directory
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// Queue the registration of a new batch. Manufacturer role required;
    /// the batch id must be unused across committed and pending records.
    pub fn register_batch(
        &mut self,
        manufacturer_id: &str,
        batch_id: &str,
        product: &str,
        quantity: u32,
        origin: &str,
    ) -> Result<()> {
        self.require_known(manufacturer_id)?;
        if !self.directory.can_register_batches(manufacturer_id) {
            warn!(actor = manufacturer_id, "registration rejected, not a manufacturer");
            return Err(RegistryError::UnauthorizedRole {
                actor: manufacturer_id.to_string(),
                action: "register a batch",
            });
        }
        if self.chain.current_holder(batch_id).is_some() {
            return Err(RegistryError::DuplicateBatch(batch_id.to_string()));
        }

        let tx = Transaction::registration(batch_id, manufacturer_id, product, quantity, origin);
        self.chain.submit(tx)?;
        Ok(())
    }

    /// Queue a custody transfer. Both parties must be enrolled holders, and
    /// `from_id` must currently hold the batch.
    pub fn transfer_batch(
        &mut self,
        from_id: &str,
        to_id: &str,
        batch_id: &str,
        location: &str,
        mode: TransportMode,
    ) -> Result<()> {
        self.require_known(from_id)?;
        self.require_known(to_id)?;
        if !self.directory.can_hold(to_id) {
            return Err(RegistryError::UnauthorizedRole {
                actor: to_id.to_string(),
                action: "take custody of a batch",
            });
        }

        let holder = self
            .chain
            .current_holder(batch_id)
            .ok_or_else(|| RegistryError::UnknownBatch(batch_id.to_string()))?;
        if holder != from_id {
            let holder = holder.to_string();
            warn!(batch = batch_id, %holder, claimed = from_id, "transfer rejected, holder mismatch");
            return Err(RegistryError::HolderMismatch {
                batch_id: batch_id.to_string(),
                holder,
                claimed: from_id.to_string(),
            });
        }

        let tx = Transaction::transfer(batch_id, from_id, to_id, location, mode);
        self.chain.submit(tx)?;
        Ok(())
    }

    /// Queue a quality/compliance event. Any enrolled participant may log
    /// one against a known batch.
    pub fn log_compliance(
        &mut self,
        actor_id: &str,
        batch_id: &str,
        event: &str,
        data: &str,
    ) -> Result<()> {
        if !self.directory.can_log_events(actor_id) {
            return Err(RegistryError::UnknownParticipant(actor_id.to_string()));
        }
        if self.chain.current_holder(batch_id).is_none() {
            return Err(RegistryError::UnknownBatch(batch_id.to_string()));
        }

        let tx = Transaction::compliance(batch_id, actor_id, event, data);
        self.chain.submit(tx)?;
        Ok(())
    }

    /// Commit the pending pool into a new block. Validator role required.
    pub fn mine(&mut self, validator_id: &str) -> Result<&Block> {
        self.require_known(validator_id)?;
        if !self.directory.can_mine(validator_id) {
            warn!(actor = validator_id, "mining rejected, not a validator");
            return Err(RegistryError::UnauthorizedRole {
                actor: validator_id.to_string(),
                action: "mine a block",
            });
        }
        Ok(self.chain.mine()?)
    }

    /// Read-only provenance trace for one batch.
    pub fn trace<'a>(
        &'a self,
        batch_id: &'a str,
    ) -> impl Iterator<Item = ProvenanceEntry<'a>> + Clone + 'a {
        self.chain.trace(batch_id)
    }

    pub fn current_holder(&self, batch_id: &str) -> Option<&str> {
        self.chain.current_holder(batch_id)
    }

    pub fn verify(&self) -> std::result::Result<(), IntegrityError> {
        self.chain.verify()
    }

    fn require_known(&self, id: &str) -> Result<()> {
        if self.directory.contains(id) {
            Ok(())
        } else {
            Err(RegistryError::UnknownParticipant(id.to_string()))
        }
    }
}
