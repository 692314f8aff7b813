//! QRIS payload inspection tool.
//!
//! Parses a payload, prints its top-level entries and CRC status, and
//! optionally generates the dynamic payload for a given amount. Useful for
//! checking a merchant template before it is configured as a payment
//! method.
//!
//! ```text
//! cargo run --features debug-tools --bin qris_inspect -- <PAYLOAD> [--amount 15000]
//! ```

use anyhow::Context;
use clap::Parser;
use qris_codec::{
    find_tag, generate_dynamic_payload, initiation_method, normalize, parse_entries,
    verify_embedded_crc, InitiationMethod, Tag,
};

#[derive(Parser)]
#[command(
    name = "qris_inspect",
    about = "Inspect a QRIS payload and optionally generate a dynamic one"
)]
struct Args {
    /// Raw QRIS payload text (static or dynamic)
    payload: String,

    /// Generate a dynamic payload carrying this amount
    #[arg(long)]
    amount: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "observability")]
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let normalized = normalize(&args.payload);
    let entries =
        parse_entries(&normalized).context("payload does not parse as top-level TLV")?;

    println!("entries: {}", entries.len());
    for entry in &entries {
        println!("  {}  len={:02}  {}", entry.tag, entry.value.len(), entry.value);
    }

    match initiation_method(&entries) {
        Some(InitiationMethod::Static) => println!("initiation method: static (11)"),
        Some(InitiationMethod::Dynamic) => println!("initiation method: dynamic (12)"),
        None => println!("initiation method: not declared"),
    }

    match find_tag(&entries, Tag::CRC) {
        Some(embedded) => {
            let status = if verify_embedded_crc(&normalized) {
                "valid"
            } else {
                "MISMATCH"
            };
            println!("embedded CRC: {embedded} ({status})");
        }
        None => println!("embedded CRC: none"),
    }

    if let Some(amount) = args.amount {
        let dynamic = generate_dynamic_payload(&args.payload, amount)
            .context("dynamic payload generation failed")?;
        println!("dynamic payload ({}):", amount);
        println!("{dynamic}");
    }

    Ok(())
}
