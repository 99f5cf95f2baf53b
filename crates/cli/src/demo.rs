//! Scripted end-to-end scenario, useful as a smoke test of the whole stack.

use crate::render;
use crate::session::default_directory;
use anyhow::Result;
use colored::Colorize;
use provchain_core::TransportMode;
use provchain_registry::Gateway;

pub fn run() -> Result<()> {
    let mut gateway = Gateway::new(default_directory());

    println!("{}", "Running supply-chain demo...".bold().cyan());
    println!();

    gateway.register_batch("MFG001", "BATCH-APPLE-0001", "Apples", 500, "Nashik")?;
    println!("{} Registered BATCH-APPLE-0001", "✓".green().bold());

    gateway.transfer_batch(
        "MFG001",
        "SHP001",
        "BATCH-APPLE-0001",
        "Nashik",
        TransportMode::Truck,
    )?;
    println!("{} Custody handed to Oceanic Shippers", "✓".green().bold());

    let block = gateway.mine("REG001")?;
    println!("{} Block #{} mined ({} txs)", "✓".green().bold(), block.index, block.tx_count());

    gateway.log_compliance("SHP001", "BATCH-APPLE-0001", "TEMP_LOG", "temp=4C")?;
    gateway.transfer_batch(
        "SHP001",
        "DST001",
        "BATCH-APPLE-0001",
        "Mumbai",
        TransportMode::Ship,
    )?;
    gateway.transfer_batch(
        "DST001",
        "RTL001",
        "BATCH-APPLE-0001",
        "Pune",
        TransportMode::Truck,
    )?;
    let block = gateway.mine("REG002")?;
    println!("{} Block #{} mined ({} txs)", "✓".green().bold(), block.index, block.tx_count());

    // A rejected operation: the manufacturer no longer holds the batch.
    let err = gateway
        .transfer_batch(
            "MFG001",
            "RTL001",
            "BATCH-APPLE-0001",
            "Nashik",
            TransportMode::Truck,
        )
        .unwrap_err();
    println!("{} Stale transfer rejected: {err}", "✓".green().bold());

    render::trace_listing(
        "BATCH-APPLE-0001",
        gateway.trace("BATCH-APPLE-0001"),
        gateway.current_holder("BATCH-APPLE-0001"),
    );

    println!();
    println!("{}", "Committed blocks:".bold().cyan());
    for block in gateway.chain().blocks() {
        render::block_summary(block);
    }

    match gateway.verify() {
        Ok(()) => println!("\n{} Chain integrity verified", "✓".green().bold()),
        Err(e) => println!("\n{} {e}", "✗".red().bold()),
    }

    Ok(())
}
