use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pra",
    about = "PR artifact storage: test cases and summaries keyed by PR",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Root directory of the filesystem store [default: ./data]
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Bucket directory under the data dir [default: pr-artifacts]
    #[arg(long, global = true)]
    pub bucket: Option<String>,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve(ServeArgs),
    /// Store a file as a test-case artifact
    Store(StoreArgs),
    /// List the test-case artifacts of a PR
    List(PrArgs),
    /// Print one stored test-case envelope
    Get(GetArgs),
    /// Store or read a PR summary
    Summary(SummaryArgs),
    /// Check whether anything is stored for a PR
    Exists(PrArgs),
    /// Compare a stored test case against a local file
    Verify(VerifyArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}

#[derive(Args)]
pub struct StoreArgs {
    #[arg(long = "pr")]
    pub pr_id: String,
    /// File whose contents become the test cases
    #[arg(long)]
    pub file: PathBuf,
    /// File name to record, defaults to the file's own name
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Args)]
pub struct PrArgs {
    #[arg(long = "pr")]
    pub pr_id: String,
}

#[derive(Args)]
pub struct GetArgs {
    #[arg(long)]
    pub key: String,
}

#[derive(Args)]
pub struct SummaryArgs {
    #[command(subcommand)]
    pub action: SummaryAction,
}

#[derive(Subcommand)]
pub enum SummaryAction {
    /// Store the summary, replacing any previous one
    Put {
        #[arg(long = "pr")]
        pr_id: String,
        #[arg(long)]
        github_url: String,
        /// JSON object
        #[arg(long)]
        data: String,
    },
    /// Print the stored summary
    Get {
        #[arg(long = "pr")]
        pr_id: String,
    },
}

#[derive(Args)]
pub struct VerifyArgs {
    #[arg(long)]
    pub key: String,
    /// Expected file name
    #[arg(long)]
    pub name: String,
    /// File holding the expected test cases
    #[arg(long)]
    pub file: PathBuf,
}
