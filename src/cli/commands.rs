use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

/// How the chain is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid format: {s}. Valid options: text, json")),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "sealed-ledger")]
pub struct Opt {
    #[arg(
        long,
        global = true,
        help = "Leading zero hex digits required of each sealed block"
    )]
    pub difficulty: Option<u32>,
    #[arg(
        long = "max-iterations",
        global = true,
        help = "Give up sealing a block after this many nonces"
    )]
    pub max_iterations: Option<u64>,
    #[arg(long, global = true, help = "TOML settings file")]
    pub config: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        default_value_t = OutputFormat::Text,
        help = "Chain output format (text, json)"
    )]
    pub format: OutputFormat,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(
        name = "demo",
        about = "Mine two blocks, tamper with the first and verify before and after"
    )]
    Demo,
    #[command(name = "mine", about = "Seal one block per payload and print the chain")]
    Mine {
        #[arg(required = true, help = "Block payloads, in chain order")]
        payloads: Vec<String>,
    },
    #[command(
        name = "tamper",
        about = "Build a chain, overwrite one block's payload and verify again"
    )]
    Tamper {
        #[arg(help = "Index of the block to tamper with")]
        index: usize,
        #[arg(help = "Replacement payload")]
        payload: String,
        #[arg(required = true, help = "Block payloads, in chain order")]
        payloads: Vec<String>,
    },
}
