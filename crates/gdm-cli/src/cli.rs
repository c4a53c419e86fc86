use clap::{Args, Parser, Subcommand};

pub const DEFAULT_URL: &str = "http://127.0.0.1:8008";

#[derive(Parser)]
#[command(
    name = "gdm",
    about = "Generic Discrete Message ledger client",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable more verbose output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Send a new message; fails if the key already exists
    Send(SendArgs),
    /// Display the message stored under a key
    Show(ShowArgs),
    /// List every message in the family namespace
    List(ListArgs),
    /// Generate a private key file for signing
    Keygen(KeygenArgs),
}

#[derive(Args, Clone, Default)]
pub struct ConnectArgs {
    /// URL of the ledger REST API
    #[arg(long)]
    pub url: Option<String>,

    /// Username for HTTP Basic authentication
    #[arg(long)]
    pub auth_user: Option<String>,

    /// Password for HTTP Basic authentication
    #[arg(long)]
    pub auth_password: Option<String>,
}

#[derive(Args)]
pub struct SendArgs {
    /// Unique identifier for the new message
    pub key: String,
    /// Subject of the message statement
    pub subject: String,
    /// Predicate of the message statement
    pub predicate: String,
    /// Object of the message statement
    pub object: String,
    /// Sender of the message
    pub sender: String,
    /// Receiver of the message
    pub receiver: String,

    /// Path to the signer's private key file
    #[arg(long)]
    pub key_file: Option<String>,

    /// Seconds to wait for the transaction to commit
    #[arg(long, value_name = "SECONDS")]
    pub wait: Option<u64>,

    #[command(flatten)]
    pub connect: ConnectArgs,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Identifier of the message to display
    pub key: String,

    #[command(flatten)]
    pub connect: ConnectArgs,
}

#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
}

#[derive(Args)]
pub struct KeygenArgs {
    /// Where to write the private key
    pub path: String,
}
