use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Raise the log level to debug
    #[arg(short, long, global = true)]
    pub debug: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a filled crossword and print it with its clue lists
    Generate(GenerateArgs),

    /// Normalise a raw clue file into a dictionary store
    PrepareDictionary(PrepareArgs),
}

#[derive(Debug, clap::Args)]
pub struct GenerateArgs {
    #[arg(short = 'W', long, default_value_t = 10)]
    pub width: usize,

    #[arg(short = 'H', long, default_value_t = 10)]
    pub height: usize,

    /// Stop once the puzzle holds this many entries
    #[arg(short = 'k', long, default_value_t = 10)]
    pub min_words: usize,

    /// Dictionary store (JSON)
    #[arg(long, env = "CROSSWEAVE_DICT")]
    pub dict: PathBuf,

    /// Seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Give up after this many turns
    #[arg(long, default_value_t = 200)]
    pub turn_cap: usize,

    /// Print the exolve rendering instead of the plain grid
    #[arg(long)]
    pub exolve: bool,
}

#[derive(Debug, clap::Args)]
pub struct PrepareArgs {
    /// Raw clue file: a JSON answer-to-clue object or record list
    pub input: PathBuf,

    /// Where to write the normalised store
    #[arg(short, long, default_value = "dictionary.json")]
    pub output: PathBuf,
}
