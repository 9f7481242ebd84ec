//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

use crate::domain::Filters;

/// Build vocabulary hierarchies from knowledge-graph bindings
#[derive(Parser, Debug)]
#[command(name = "lexitree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the hierarchy as a tree
    Tree {
        /// SPARQL JSON results file (default: `input` setting)
        #[arg(value_hint = ValueHint::FilePath)]
        input: Option<PathBuf>,

        #[command(flatten)]
        filters: FilterArgs,

        /// Sort children by label
        #[arg(short, long)]
        sorted: bool,
    },

    /// Print the hierarchy response as JSON
    Json {
        /// SPARQL JSON results file (default: `input` setting)
        #[arg(value_hint = ValueHint::FilePath)]
        input: Option<PathBuf>,

        #[command(flatten)]
        filters: FilterArgs,

        /// Sort children by label
        #[arg(short, long)]
        sorted: bool,

        /// Pretty-print JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// Print examples and translations of one entry as JSON
    Entry {
        /// Entry identifier or its local name
        id: String,

        /// SPARQL JSON results file (default: `input` setting)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        input: Option<PathBuf>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Known filter values; the most specific one becomes the tree's top level.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Level filter, e.g. A1
    #[arg(long)]
    pub level: Option<String>,

    /// Topic filter
    #[arg(long)]
    pub topic: Option<String>,

    /// Subtopic filter
    #[arg(long)]
    pub subtopic: Option<String>,
}

impl From<&FilterArgs> for Filters {
    fn from(args: &FilterArgs) -> Self {
        Filters::new(args.level.clone(), args.topic.clone(), args.subtopic.clone())
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Show global config file path
    Path,
}
