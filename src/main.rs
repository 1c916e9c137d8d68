//! Decodes a bencoded file (e.g. a `.torrent`) and prints its structure.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::process::ExitCode;

use bcoding::bencode::{decode, BencodeError};
use thiserror::Error;

const USAGE: &str = "\
usage: bcoding [INFILE] [OUTFILE]

Decodes a bencoded file and prints its structure.

  INFILE   bencoded input, `-` for stdin [default: stdin]
  OUTFILE  where to write the dump, `-` for stdout [default: stdout]";

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error("{path}: {source}")]
    Open { path: String, source: io::Error },

    #[error(transparent)]
    Bencode(#[from] BencodeError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), CliError> {
    if let Some(extra) = args.get(2) {
        return Err(CliError::Usage(format!(
            "unexpected argument `{extra}`\n\n{USAGE}"
        )));
    }

    let input: Box<dyn BufRead> = match args.first().map(String::as_str) {
        None | Some("-") => Box::new(io::stdin().lock()),
        Some(path) => Box::new(BufReader::new(open(path, |p| File::open(p))?)),
    };
    let value = decode(input)?;

    let mut output: Box<dyn Write> = match args.get(1).map(String::as_str) {
        None | Some("-") => Box::new(io::stdout().lock()),
        Some(path) => Box::new(BufWriter::new(open(path, |p| File::create(p))?)),
    };
    writeln!(output, "{value:#}")?;
    output.flush()?;
    Ok(())
}

fn open(path: &str, f: impl FnOnce(&str) -> io::Result<File>) -> Result<File, CliError> {
    f(path).map_err(|source| CliError::Open {
        path: path.to_string(),
        source,
    })
}
