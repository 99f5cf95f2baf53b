//! Interactive ledger session: the menu loop over one in-memory chain.

use crate::render;
use anyhow::Result;
use colored::Colorize;
use provchain_core::TransportMode;
use provchain_registry::{Directory, Gateway, Role};
use std::io::{self, BufRead, Write};

/// Directory equivalent to the reference deployment's participant table.
pub fn default_directory() -> Directory {
    let mut directory = Directory::new();
    directory.enroll("MFG001", "Acme Foods", Role::Manufacturer);
    directory.enroll("SHP001", "Oceanic Shippers", Role::Shipper);
    directory.enroll("DST001", "FreshDistrib", Role::Distributor);
    directory.enroll("RTL001", "CityMart", Role::Retailer);
    directory.enroll("REG001", "Food Safety Authority", Role::Validator);
    directory.enroll("REG002", "Logistics Audit Node", Role::Validator);
    directory
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn menu() {
    println!();
    println!("{}", "=== Supply Chain Provenance Ledger ===".bold().cyan());
    println!("1. Register product batch (manufacturer only)");
    println!("2. Transfer batch (custody change)");
    println!("3. Log quality/compliance event");
    println!("4. Mine pending transactions (validator only)");
    println!("5. Trace batch (provenance & current holder)");
    println!("6. Show chain");
    println!("7. Verify chain integrity");
    println!("8. List participants");
    println!("9. Exit");
}

pub fn run() -> Result<()> {
    let mut gateway = Gateway::new(default_directory());

    loop {
        menu();
        let choice = prompt("Choose option")?;

        // Every failure is recoverable; report and show the menu again.
        let outcome: Result<bool> = match choice.as_str() {
            "1" => register(&mut gateway).map(|_| true),
            "2" => transfer(&mut gateway).map(|_| true),
            "3" => compliance(&mut gateway).map(|_| true),
            "4" => mine(&mut gateway).map(|_| true),
            "5" => trace(&gateway).map(|_| true),
            "6" => render::chain_json(gateway.chain()).map(|_| true),
            "7" => {
                verify(&gateway);
                Ok(true)
            }
            "8" => {
                render::participant_listing(gateway.directory());
                Ok(true)
            }
            "9" => Ok(false),
            _ => {
                println!("{}", "Invalid choice, try again.".yellow());
                Ok(true)
            }
        };

        match outcome {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => println!("{} {e:#}", "✗".red().bold()),
        }
    }

    Ok(())
}

fn register(gateway: &mut Gateway) -> Result<()> {
    let mfg = prompt("Manufacturer ID")?;
    let batch = prompt("Batch ID")?;
    let product = prompt("Product name")?;
    let quantity: u32 = prompt("Quantity")?.parse().unwrap_or(0);
    let origin = prompt("Origin (farm/plant)")?;

    gateway.register_batch(&mfg, &batch, &product, quantity, &origin)?;
    println!("{} Batch {} queued for registration", "✓".green().bold(), batch.bright_yellow());
    Ok(())
}

fn transfer(gateway: &mut Gateway) -> Result<()> {
    let from = prompt("From (current holder ID)")?;
    let to = prompt("To (receiver ID)")?;
    let batch = prompt("Batch ID")?;
    let location = prompt("Location (city/port)")?;
    let mode: TransportMode = prompt("Transport mode (TRUCK/SHIP/AIR) [default TRUCK]")?.parse()?;

    gateway.transfer_batch(&from, &to, &batch, &location, mode)?;
    println!(
        "{} Transfer queued: {} {} -> {} via {}",
        "✓".green().bold(),
        batch.bright_yellow(),
        from,
        to,
        mode
    );
    Ok(())
}

fn compliance(gateway: &mut Gateway) -> Result<()> {
    let actor = prompt("Actor ID (participant/validator)")?;
    let batch = prompt("Batch ID")?;
    let event = prompt("Event type (TEMP_LOG/INSPECTION_PASSED/...)")?;
    let data = prompt("Event data (e.g. temp=4C)")?;

    gateway.log_compliance(&actor, &batch, &event, &data)?;
    println!("{} Event {} queued for batch {}", "✓".green().bold(), event, batch.bright_yellow());
    Ok(())
}

fn mine(gateway: &mut Gateway) -> Result<()> {
    let validator = prompt("Validator ID")?;
    let block = gateway.mine(&validator)?;
    println!(
        "{} Block #{} mined with {} tx(s)",
        "✓".green().bold(),
        block.index,
        block.tx_count()
    );
    println!("    Hash: {}", block.hash.to_hex().bright_yellow());
    Ok(())
}

fn trace(gateway: &Gateway) -> Result<()> {
    let batch = prompt("Batch ID to trace")?;
    render::trace_listing(&batch, gateway.trace(&batch), gateway.current_holder(&batch));
    Ok(())
}

fn verify(gateway: &Gateway) {
    match gateway.verify() {
        Ok(()) => println!("{} Chain integrity verified", "✓".green().bold()),
        Err(e) => println!("{} {e}", "✗".red().bold()),
    }
}
