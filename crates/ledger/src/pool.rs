//! Pending pool: transactions accepted but not yet committed to a block.
//!
//! Submission order is inclusion order, so this is a plain FIFO buffer with
//! no fee ordering or per-sender bookkeeping.

use provchain_core::Transaction;

/// Ordered buffer of uncommitted transactions.
#[derive(Debug, Default)]
pub struct PendingPool {
    transactions: Vec<Transaction>,
}

impl PendingPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transaction, preserving call order.
    pub fn push(&mut self, tx: Transaction) {
        self.transactions.push(tx);
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn as_slice(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Drain every transaction in order, leaving the pool empty.
    pub fn take_all(&mut self) -> Vec<Transaction> {
        std::mem::take(&mut self.transactions)
    }
}
