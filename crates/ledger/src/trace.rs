//! Provenance tracing: the ordered history of one batch.

use crate::chain::Chain;
use provchain_core::{Payload, Transaction};

/// One step in a batch's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProvenanceEntry<'a> {
    pub tx: &'a Transaction,
    /// Index of the containing block, or `None` while still pending.
    pub block: Option<u64>,
}

impl ProvenanceEntry<'_> {
    pub fn is_confirmed(&self) -> bool {
        self.block.is_some()
    }
}

/// Every transaction referencing `batch_id`, lazily: committed blocks in
/// index order (in-block submission order), then unconfirmed pool entries.
///
/// The iterator is `Clone`, so a trace can be restarted cheaply. An unknown
/// batch yields an empty sequence; that is a normal outcome, not an error.
pub fn trace<'a>(
    chain: &'a Chain,
    batch_id: &'a str,
) -> impl Iterator<Item = ProvenanceEntry<'a>> + Clone + 'a {
    let committed = chain.blocks().iter().flat_map(move |block| {
        block
            .transactions
            .iter()
            .filter(move |tx| tx.batch_id == batch_id)
            .map(move |tx| ProvenanceEntry {
                tx,
                block: Some(block.index),
            })
    });

    let unconfirmed = chain
        .pending()
        .iter()
        .filter(move |tx| tx.batch_id == batch_id)
        .map(|tx| ProvenanceEntry { tx, block: None });

    committed.chain(unconfirmed)
}

/// The participant currently responsible for a batch.
///
/// A Registration hands custody to the registering actor, a Transfer to its
/// `to_holder`; compliance entries leave custody alone. Pending entries are
/// included for a near-real-time view. `None` means the batch is unknown.
pub fn current_holder<'a>(chain: &'a Chain, batch_id: &str) -> Option<&'a str> {
    let mut holder = None;

    let committed = chain.blocks().iter().flat_map(|b| b.transactions.iter());
    for tx in committed.chain(chain.pending().iter()) {
        if tx.batch_id != batch_id {
            continue;
        }
        match &tx.payload {
            Payload::Registration { .. } => holder = Some(tx.actor.as_str()),
            Payload::Transfer { to_holder, .. } => holder = Some(to_holder.as_str()),
            Payload::Compliance { .. } => {}
        }
    }

    holder
}
