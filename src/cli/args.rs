//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::config::DirectionSet;

/// Directional text entry: explore and test direction-tree keyboards
#[derive(Parser, Debug)]
#[command(name = "hntree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file (default: $XDG_CONFIG_HOME/hntree/hntree.toml)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Direction set, overrides config
    #[arg(long, value_enum, global = true)]
    pub directions: Option<DirectionSet>,

    /// Layout file mapping content to direction paths, overrides config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub layout: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the tree
    Tree,

    /// List every key with its direction path, shortest first
    Codes,

    /// Show what lies under each direction from the root
    Hints,

    /// Feed direction symbols and show the typed text
    Type {
        /// Direction symbols, e.g. "ULUD" (whitespace ignored)
        input: String,
    },

    /// Show effective settings
    Config,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
