//! Chain-integrity verification.
//!
//! Walks the committed blocks recomputing every digest and checking the
//! predecessor links. Read-only; a tampered chain is reported, never
//! repaired.

use provchain_core::{Block, Digest};
use thiserror::Error;

/// The first integrity failure found, with the offending block index.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityError {
    /// A stored field of the block was altered without updating its digest.
    #[error("block {0} digest does not match its contents")]
    TamperedBlock(u64),

    /// `previous_hash` does not match the predecessor (or the genesis
    /// sentinel): a block was reordered, removed, or relinked.
    #[error("block {0} is not linked to its predecessor")]
    BrokenLink(u64),
}

/// Verify digests and linkage over a committed block sequence.
///
/// Short-circuits at the first failure. A genesis-only sequence with no
/// tampering is trivially valid.
pub fn verify(blocks: &[Block]) -> Result<(), IntegrityError> {
    let mut previous: Option<&Block> = None;

    for block in blocks {
        if block.compute_hash() != block.hash {
            return Err(IntegrityError::TamperedBlock(block.index));
        }

        let expected_link = match previous {
            Some(prev) => prev.hash,
            None => Digest::ZERO,
        };
        if block.previous_hash != expected_link {
            return Err(IntegrityError::BrokenLink(block.index));
        }

        previous = Some(block);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use provchain_core::Transaction;

    fn build_chain(len: usize) -> Vec<Block> {
        let mut blocks = vec![Block::genesis()];
        for i in 1..len {
            let tx = Transaction::registration(format!("B{i}"), "MFG001", "Apples", 10, "Nashik");
            let prev = blocks.last().unwrap().hash;
            blocks.push(Block::new(i as u64, prev, vec![tx]));
        }
        blocks
    }

    #[test]
    fn test_valid_chain_passes() {
        assert!(verify(&build_chain(4)).is_ok());
    }

    #[test]
    fn test_genesis_only_is_valid() {
        assert!(verify(&build_chain(1)).is_ok());
    }

    #[test]
    fn test_tampered_genesis_detected() {
        let mut blocks = build_chain(3);
        blocks[0].timestamp += 1;
        assert_eq!(verify(&blocks), Err(IntegrityError::TamperedBlock(0)));
    }

    #[test]
    fn test_tampering_any_block_detected_at_its_index() {
        for victim in 0..4 {
            let mut blocks = build_chain(4);
            blocks[victim].nonce = 7;
            assert_eq!(
                verify(&blocks),
                Err(IntegrityError::TamperedBlock(victim as u64))
            );
        }
    }

    #[test]
    fn test_genesis_sentinel_checked() {
        let mut blocks = build_chain(2);
        blocks[0].previous_hash = blocks[1].hash;
        blocks[0].hash = blocks[0].compute_hash();
        assert_eq!(verify(&blocks), Err(IntegrityError::BrokenLink(0)));
    }

    #[test]
    fn test_removed_block_breaks_link() {
        let mut blocks = build_chain(4);
        blocks.remove(2);
        // The old block 3 now follows block 1 and fails the link check.
        assert_eq!(verify(&blocks), Err(IntegrityError::BrokenLink(3)));
    }

    #[test]
    fn test_reordered_blocks_detected() {
        let mut blocks = build_chain(4);
        blocks.swap(1, 2);
        assert_eq!(verify(&blocks), Err(IntegrityError::BrokenLink(2)));
    }

    #[test]
    fn test_tamper_reported_before_downstream_break() {
        // Altering block 1 also invalidates block 2's link, but the walk
        // reports the first failure it meets.
        let mut blocks = build_chain(3);
        blocks[1].transactions.clear();
        assert_eq!(verify(&blocks), Err(IntegrityError::TamperedBlock(1)));
    }
}
