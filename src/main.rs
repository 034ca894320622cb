// Entry point for the ledger demonstration CLI
// The library does all the sealing and verification; this file only wires
// configuration together and prints what the ledger reports.
use clap::Parser;
use log::{error, LevelFilter};
use sealed_ledger::utils::to_pretty_json;
use sealed_ledger::{Command, Ledger, Opt, OutputFormat, GLOBAL_CONFIG};
use std::process;

const DEMO_PAYLOADS: [&str; 2] = ["Alice pays Bob 10 BTC", "Bob pays Charlie 5 BTC"];
const DEMO_TAMPER_INDEX: usize = 1;
const DEMO_TAMPER_PAYLOAD: &str = "Alice pays Bob 100 BTC";

fn main() {
    // Info by default, RUST_LOG still wins
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let opt = Opt::parse();

    if let Err(e) = run(opt) {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn run(opt: Opt) -> Result<(), Box<dyn std::error::Error>> {
    // Flags sit on top of the file and environment layers
    if let Some(path) = &opt.config {
        GLOBAL_CONFIG.load_file(path)?;
    }
    if let Some(difficulty) = opt.difficulty {
        GLOBAL_CONFIG.set_difficulty(difficulty);
    }
    if let Some(max) = opt.max_iterations {
        GLOBAL_CONFIG.set_max_seal_iterations(max);
    }

    let mut ledger = Ledger::from_config(&GLOBAL_CONFIG)?;

    match opt.command {
        Command::Demo => {
            for payload in DEMO_PAYLOADS {
                ledger.append(payload)?;
            }

            println!("\nInitial Ledger:");
            print_chain(&ledger, opt.format)?;
            println!("\nLedger Valid: {}", ledger.verify());

            ledger.tamper_block(DEMO_TAMPER_INDEX, DEMO_TAMPER_PAYLOAD)?;

            println!("\nTampered Ledger:");
            print_chain(&ledger, opt.format)?;
            println!("\nLedger Valid After Tampering: {}", ledger.verify());
        }
        Command::Mine { payloads } => {
            for payload in payloads {
                ledger.append(payload)?;
            }
            print_chain(&ledger, opt.format)?;
            println!("\nLedger Valid: {}", ledger.verify());
        }
        Command::Tamper {
            index,
            payload,
            payloads,
        } => {
            for p in payloads {
                ledger.append(p)?;
            }
            println!("Ledger Valid Before Tampering: {}", ledger.verify());

            // A refused tamper leaves the chain untouched, so report and carry on
            if let Err(e) = ledger.tamper_block(index, payload) {
                println!("{e}");
            }

            print_chain(&ledger, opt.format)?;
            match ledger.verify_detailed() {
                Ok(()) => println!("\nLedger Valid After Tampering: true"),
                Err(violation) => {
                    println!("\nLedger Valid After Tampering: false ({violation})")
                }
            }
        }
    }
    Ok(())
}

fn print_chain(ledger: &Ledger, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => println!("{}", to_pretty_json(ledger.blocks())?),
        OutputFormat::Text => {
            for block in ledger {
                println!("\n---------------------------");
                println!("Block #{}", block.get_index());
                println!("Timestamp: {}", block.get_timestamp());
                println!("Payload: {}", block.get_payload());
                println!("Previous Digest: {}", block.get_previous_digest());
                println!("Current Digest: {}", block.get_digest());
                println!("Nonce: {}", block.get_nonce());
            }
        }
    }
    Ok(())
}
