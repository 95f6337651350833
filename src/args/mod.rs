use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "open-in-git-host",
    version,
    about = "Open the remote web page for a local file"
)]
pub struct Cli {
    #[command(flatten, next_help_heading = "Global Options")]
    pub global: GlobalArgs,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    #[arg(
        short = 'P',
        long,
        global = true,
        help = "Output machine-readable JSON"
    )]
    pub porcelain: bool,
    #[arg(
        short = 'y',
        long,
        global = true,
        help = "Skip interactive confirmations"
    )]
    pub yes: bool,
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Mapping database (defaults to <git-dir>/open-in-git-host.db)"
    )]
    pub db: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print (or open) the remote URL of a file
    Url(UrlArgs),
    /// Manage local directory to remote repository mappings
    #[command(subcommand)]
    Mapping(MappingCommands),
    /// List supported host types and their URL templates
    Hosts,
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct UrlArgs {
    #[arg(help = "File to open on the remote host")]
    pub file: PathBuf,
    #[arg(
        short = 'l',
        long,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Line to highlight (1-based, as shown in editors)"
    )]
    pub line: Option<u32>,
    #[arg(short = 'b', long, help = "Branch to link (defaults to the current branch)")]
    pub branch: Option<String>,
    #[arg(short = 'o', long, help = "Open the URL in the default browser")]
    pub open: bool,
}

#[derive(Debug, Subcommand)]
pub enum MappingCommands {
    /// Map a local directory to a remote repository
    Add(MappingAddArgs),
    /// Derive a mapping for the repository root from a git remote
    Infer(MappingInferArgs),
    /// List configured mappings
    List,
    /// Remove a mapping
    Remove(MappingRemoveArgs),
}

#[derive(Debug, Args)]
pub struct MappingAddArgs {
    #[arg(short = 't', long, help = "Host type (bitbucket, bitbucket-server, github, gitlab, gitea)")]
    pub host_type: Option<String>,
    #[arg(short = 'u', long, help = "Host base URL, e.g. https://bitbucket.org")]
    pub host_url: String,
    #[arg(short = 'p', long, help = "Project, namespace or owner on the host")]
    pub project: String,
    #[arg(short = 'r', long, help = "Repository name on the host")]
    pub repository: String,
    #[arg(short = 'd', long, help = "Local base directory (defaults to the repository root)")]
    pub base_dir: Option<PathBuf>,
    #[arg(long, help = "Store an http:// host URL as https://")]
    pub force_ssl: bool,
}

#[derive(Debug, Args)]
pub struct MappingInferArgs {
    #[arg(long, default_value = "origin", help = "Remote to derive the mapping from")]
    pub remote: String,
    #[arg(short = 't', long, help = "Host type, when it cannot be guessed from the domain")]
    pub host_type: Option<String>,
    #[arg(long, help = "Link over https even when the remote uses http://")]
    pub force_ssl: bool,
}

#[derive(Debug, Args)]
pub struct MappingRemoveArgs {
    #[arg(help = "Base directory of the mapping to remove (defaults to interactive selection)")]
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
#[command(
    after_help = "Installation examples:\n  zsh:        open-in-git-host completions zsh > ~/.zsh/completions/_open-in-git-host\n  bash:       open-in-git-host completions bash > ~/.local/share/bash-completion/completions/open-in-git-host\n  fish:       open-in-git-host completions fish > ~/.config/fish/completions/open-in-git-host.fish"
)]
pub struct CompletionsArgs {
    #[arg(help = "Shell to generate completions for")]
    pub shell: Option<clap_complete::Shell>,
}
