// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use cmd::commands;
use cmd::common;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "bucketfs")]
/// Browse object storage buckets as a file tree
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Storage configuration file (defaults to $BUCKETFS_CONFIG)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List a bucket or directory ("/" lists buckets)
    Ls {
        #[arg(default_value = "/")]
        path: String,
    },
    /// Write an object's content to stdout
    Cat {
        path: String,
        /// Start reading at this byte offset
        #[arg(long, default_value_t = 0)]
        offset: u64,
    },
    /// Describe a path
    Stat { path: String },
}

async fn run(cli: Cli) -> Result<()> {
    let fs = common::open_fs(cli.config.as_deref())?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Ls { path } => commands::list_command(&fs, &path, &mut out).await,
        Commands::Cat { path, offset } => commands::cat_command(&fs, &path, offset, &mut out).await,
        Commands::Stat { path } => commands::stat_command(&fs, &path, &mut out).await,
    }
}

#[tokio::main]
#[allow(clippy::print_stderr)]
async fn main() -> ExitCode {
    diagnostics::init_diagnostics();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = format!("{e:#}");
            diagnostics::log_error!("Command failed: {error}", error: message.as_str());
            eprintln!("bucketfs: {message}");
            ExitCode::FAILURE
        }
    }
}
