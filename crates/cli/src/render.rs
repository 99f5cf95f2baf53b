//! Terminal formatting for ledger state.

use anyhow::Result;
use chrono::DateTime;
use colored::Colorize;
use provchain_core::{Block, Payload};
use provchain_ledger::{Chain, ProvenanceEntry};
use provchain_registry::Directory;

/// Render a unix timestamp as UTC wall-clock time.
pub fn timestamp(ts: u64) -> String {
    DateTime::from_timestamp(ts as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| ts.to_string())
}

fn describe(payload: &Payload) -> String {
    match payload {
        Payload::Registration {
            product,
            quantity,
            origin,
        } => format!("registered {quantity} x {product} from {origin}"),
        Payload::Transfer {
            from_holder,
            to_holder,
            location,
            mode,
        } => format!("{from_holder} -> {to_holder} at {location} via {mode}"),
        Payload::Compliance { event, data } => format!("{event}: {data}"),
    }
}

pub fn block_summary(block: &Block) {
    println!(
        "  {} {} {}",
        format!("#{}", block.index).bright_black(),
        block.hash.to_hex()[..16].bright_yellow(),
        format!("({} txs, {})", block.tx_count(), timestamp(block.timestamp)).bright_black()
    );
}

/// Dump the committed chain as pretty-printed JSON, the way the original
/// console showed it.
pub fn chain_json(chain: &Chain) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(chain.blocks())?);
    Ok(())
}

pub fn trace_listing<'a>(
    batch_id: &str,
    entries: impl Iterator<Item = ProvenanceEntry<'a>>,
    holder: Option<&str>,
) {
    println!();
    println!("{}", format!("Provenance for batch {batch_id}:").bold().cyan());

    let mut any = false;
    for entry in entries {
        any = true;
        let place = match entry.block {
            Some(index) => format!("block #{index}").bright_black(),
            None => "pending".yellow(),
        };
        println!(
            "  [{}] {} {} by {} — {}",
            place,
            timestamp(entry.tx.created_at).bright_black(),
            entry.tx.kind().to_string().bright_cyan(),
            entry.tx.actor.bright_yellow(),
            describe(&entry.tx.payload)
        );
    }

    if !any {
        println!("  {}", "no records found".yellow());
        return;
    }

    match holder {
        Some(id) => println!("\n  Current holder: {}", id.bright_yellow()),
        None => println!("\n  Current holder: {}", "unknown".yellow()),
    }
}

pub fn participant_listing(directory: &Directory) {
    println!();
    println!("{}", "Participants:".bold().cyan());
    for p in directory.iter() {
        println!(
            "  {} {} ({})",
            p.id.bright_yellow(),
            p.name,
            p.role.to_string().bright_cyan()
        );
    }
}
