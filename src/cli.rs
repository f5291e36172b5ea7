use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "convbox")]
#[command(about = "Convert files with a remote conversion service", long_about = None)]
pub struct Cli {
    /// Configuration file (default: $CONVBOX_CONFIG or config/convbox.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List available tools
    Tools(ToolsArgs),
    /// Upload files to a tool and save the converted result
    Convert(ConvertArgs),
    /// Have the service download a URL and save the result
    Fetch(FetchArgs),
}

#[derive(clap::Args, Debug)]
pub struct ToolsArgs {
    /// Only list tools in this category
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ConvertArgs {
    /// Tool id, e.g. image-convert
    pub tool: String,

    /// Files to upload
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Option value (target format, compression level, password, ...)
    #[arg(long)]
    pub option: Option<String>,

    /// Directory for the converted file (default: downloads.dir)
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct FetchArgs {
    /// Remote URL
    pub url: String,

    /// Output format, e.g. mp4 or mp3
    #[arg(long)]
    pub format: Option<String>,

    /// URL tool id
    #[arg(long)]
    pub tool: Option<String>,

    /// Directory for the downloaded file (default: downloads.dir)
    #[arg(long)]
    pub out: Option<PathBuf>,
}
