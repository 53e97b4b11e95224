mod args;
mod log;

use std::process::ExitCode;

use clap::Parser;
use crossweave_dict::{DictError, DictionarySource, MemoryDictionary, read_entries, write_entries};
use crossweave_gen::{Annealing, min_words};
use thiserror::Error;

use args::{Args, Command, GenerateArgs, PrepareArgs};

#[derive(Debug, Error)]
enum Error {
    #[error("{0}")]
    Gen(#[from] crossweave_gen::Error),

    #[error("{0}")]
    Dict(#[from] DictError),
}

type Result<T> = core::result::Result<T, Error>;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    log::init(&args);

    match run(args).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(1)
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    match args.command {
        Command::Generate(args) => generate(args).await,
        Command::PrepareDictionary(args) => prepare(args),
    }
}

async fn generate(args: GenerateArgs) -> Result<ExitCode> {
    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!("Generating a {}x{} puzzle with seed {seed}", args.width, args.height);

    let dict = MemoryDictionary::from_path(&args.dict, seed)?;

    let mut director = Annealing::new(dict.clone(), seed).with_turn_cap(args.turn_cap);
    let generation = director
        .run(args.width, args.height, min_words(args.min_words))
        .await?;

    if args.exolve {
        println!("{}", generation.grid.as_exolve());
    } else {
        println!("{}", generation.grid.as_text());
    }

    let answers: Vec<String> = generation.grid.word_names().cloned().collect();
    let clues = dict.clues(&answers).await?;

    println!("\nACROSS");
    for word in generation.grid.words_across().keys() {
        println!("  {word}: {}", clues.get(word).map_or("", String::as_str));
    }

    println!("\nDOWN");
    for word in generation.grid.words_down().keys() {
        println!("  {word}: {}", clues.get(word).map_or("", String::as_str));
    }

    if generation.satisfied {
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::warn!("Turn cap hit before the target word count");
        Ok(ExitCode::from(2))
    }
}

fn prepare(args: PrepareArgs) -> Result<ExitCode> {
    let entries = read_entries(&args.input)?;
    let count = write_entries(&args.output, &entries)?;

    println!("Wrote {count} answers to {}", args.output.display());
    Ok(ExitCode::SUCCESS)
}
