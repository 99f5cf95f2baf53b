//! Hash-linked blocks of committed transactions.

use crate::digest::{digest_of, Digest};
use crate::time::unix_now;
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};

/// One committed batch of transactions, immutable once mined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Sequence number (0 for genesis, strictly +1 thereafter).
    pub index: u64,
    /// Unix timestamp of mining.
    pub timestamp: u64,
    /// Transactions in submission order.
    pub transactions: Vec<Transaction>,
    /// Digest of the preceding block, [`Digest::ZERO`] for genesis.
    pub previous_hash: Digest,
    /// Kept for block structure; always 0, there is no difficulty search.
    pub nonce: u64,
    /// Digest over all other fields, fixed at creation.
    pub hash: Digest,
}

/// The hashed view of a block: every field except the stored digest itself.
#[derive(Serialize)]
struct BlockContents<'a> {
    index: u64,
    timestamp: u64,
    transactions: &'a [Transaction],
    previous_hash: &'a Digest,
    nonce: u64,
}

impl Block {
    /// Create a block at `index` linking to `previous_hash`, stamped with the
    /// current time. The digest is computed once, here.
    pub fn new(index: u64, previous_hash: Digest, transactions: Vec<Transaction>) -> Self {
        let mut block = Self {
            index,
            timestamp: unix_now(),
            transactions,
            previous_hash,
            nonce: 0,
            hash: Digest::ZERO,
        };
        block.hash = block.compute_hash();
        block
    }

    /// The fixed first block of every chain.
    pub fn genesis() -> Self {
        Self::new(0, Digest::ZERO, Vec::new())
    }

    /// Recompute the digest from the stored fields.
    ///
    /// Equals `self.hash` unless a field was altered after creation; the
    /// integrity verifier relies on exactly that comparison.
    pub fn compute_hash(&self) -> Digest {
        digest_of(&BlockContents {
            index: self.index,
            timestamp: self.timestamp,
            transactions: &self.transactions,
            previous_hash: &self.previous_hash,
            nonce: self.nonce,
        })
    }

    pub fn is_genesis(&self) -> bool {
        self.index == 0 && self.previous_hash == Digest::ZERO
    }

    pub fn tx_count(&self) -> usize {
        self.transactions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genesis_block() {
        let genesis = Block::genesis();

        assert!(genesis.is_genesis());
        assert_eq!(genesis.index, 0);
        assert_eq!(genesis.previous_hash, Digest::ZERO);
        assert!(genesis.transactions.is_empty());
        assert_eq!(genesis.nonce, 0);
    }

    #[test]
    fn test_stored_hash_matches_recomputation() {
        let tx = Transaction::registration("B1", "MFG001", "Apples", 10, "Nashik");
        let block = Block::new(1, Digest::ZERO, vec![tx]);

        assert_eq!(block.hash, block.compute_hash());
        assert_ne!(block.hash, Digest::ZERO);
    }

    #[test]
    fn test_compute_hash_deterministic() {
        let block = Block::genesis();
        assert_eq!(block.compute_hash(), block.compute_hash());
    }

    #[test]
    fn test_tampering_changes_recomputed_hash() {
        let tx = Transaction::registration("B1", "MFG001", "Apples", 10, "Nashik");
        let mut block = Block::new(1, Digest::ZERO, vec![tx]);

        let original = block.hash;
        block.transactions[0].batch_id = "B2".to_string();

        assert_ne!(block.compute_hash(), original);
        // The stored digest is untouched by the edit, which is how the
        // verifier notices.
        assert_eq!(block.hash, original);
    }

    #[test]
    fn test_hash_covers_linkage() {
        let a = Block::new(1, Digest::ZERO, Vec::new());
        let mut b = a.clone();
        b.previous_hash = digest_of(&"elsewhere");
        assert_ne!(a.compute_hash(), b.compute_hash());
    }

    #[test]
    fn test_tx_count() {
        let txs = vec![
            Transaction::registration("B1", "MFG001", "Apples", 10, "Nashik"),
            Transaction::compliance("B1", "MFG001", "INSPECTION_PASSED", "inspector=QA7"),
        ];
        let block = Block::new(3, Digest::ZERO, txs);
        assert_eq!(block.tx_count(), 2);
    }
}
