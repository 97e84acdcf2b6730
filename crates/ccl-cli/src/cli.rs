use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "ccl",
    about = "Container Custody Ledger: custody records with chained history and holder payments",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Bootstrap a ledger and walk one container through a few hand-offs
    Demo(DemoArgs),
    /// Run operations from a file, one JSON array per line
    Script(ScriptArgs),
    /// Run a single operation against a freshly bootstrapped ledger
    Invoke(InvokeArgs),
    /// Print the effective configuration
    Config,
}

#[derive(Args)]
pub struct HostArgs {
    /// Value credited to the operating wallet after bootstrap
    #[arg(long, default_value = "1000")]
    pub funds: u64,
}

#[derive(Args)]
pub struct DemoArgs {
    #[command(flatten)]
    pub host: HostArgs,
    /// Container key used by the demo
    #[arg(long, default_value = "42")]
    pub container: String,
}

#[derive(Args)]
pub struct ScriptArgs {
    pub path: PathBuf,
    #[command(flatten)]
    pub host: HostArgs,
    /// Stop at the first failing operation
    #[arg(long)]
    pub fail_fast: bool,
}

#[derive(Args)]
pub struct InvokeArgs {
    pub operation: String,
    pub args: Vec<String>,
    #[command(flatten)]
    pub host: HostArgs,
    /// Skip the implicit initLedger
    #[arg(long)]
    pub no_init: bool,
}
