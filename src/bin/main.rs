extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate stringmatch;

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use stringmatch::prelude::*;

/// sm - rank labels against a query
///
/// Reads one label per line and prints the labels matching QUERY, best first.
#[derive(Parser, Debug)]
#[command(name = "sm", version, about, verbatim_doc_comment)]
struct Args {
    /// The query to match
    query: String,

    /// File to read labels from, stdin when missing
    file: Option<PathBuf>,

    /// Rank labels starting with the query above everything else
    #[arg(long, help_heading = "Matching")]
    prefer_prefix: bool,

    /// Match the whole label instead of searching the last path segment first
    #[arg(long, help_heading = "Matching")]
    no_segments: bool,

    /// Ignore diacritics in labels and query
    #[arg(long, help_heading = "Matching")]
    normalize: bool,

    /// Comma-separated list of sort criteria
    ///
    /// * **score**: Score of the match
    /// * **length**: Length of the label in characters
    /// * **label**: The label itself, compared lexicographically
    ///
    ///     - Each criterion could be negated, e.g. (-length)
    ///     - score is put first when neither score nor -score is listed
    #[arg(
        long,
        default_value = "score,length,label",
        value_delimiter = ',',
        allow_hyphen_values = true,
        help_heading = "Output",
        verbatim_doc_comment
    )]
    tiebreak: Vec<RankCriteria>,

    /// Print at most this many labels
    #[arg(long, help_heading = "Output")]
    limit: Option<usize>,

    /// Wrap matched characters in brackets
    #[arg(long, help_heading = "Output")]
    highlight: bool,

    /// Print the score before each label
    #[arg(long, help_heading = "Output")]
    print_score: bool,

    /// Print the score breakdown after each label
    #[arg(long, help_heading = "Output")]
    debug_scores: bool,
}

//------------------------------------------------------------------------------
fn main() {
    env_logger::builder().format_timestamp_nanos().init();

    match real_main() {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(err) => {
            // if downstream pipe is closed, exit silently
            if err
                .downcast_ref::<std::io::Error>()
                .is_some_and(|err| err.kind() == std::io::ErrorKind::BrokenPipe)
            {
                std::process::exit(0)
            }
            eprintln!("sm: {err:?}");
            std::process::exit(2)
        }
    }
}

fn real_main() -> Result<i32> {
    color_eyre::install()?;
    let args = Args::parse();

    let options = MatchOptionsBuilder::default()
        .prefer_prefix_matches(args.prefer_prefix)
        .segmented_search(!args.no_segments)
        .normalize(args.normalize)
        .debug_scores(args.debug_scores)
        .build()?;
    debug!("options: {options:?}");

    let labels = read_labels(args.file.as_ref())?;
    debug!("read {} labels", labels.len());

    let mut matcher = StringMatcher::new(options).rank_builder(RankBuilder::new(args.tiebreak));
    let results = matcher.match_all(labels.iter().map(String::as_str), &args.query);
    let limit = args.limit.unwrap_or(results.len());

    let mut stdout = BufWriter::new(std::io::stdout().lock());
    for result in results.iter().take(limit) {
        if args.print_score {
            write!(stdout, "{}\t", result.score)?;
        }
        if args.highlight {
            write!(stdout, "{}", result.highlighted("[", "]"))?;
        } else {
            write!(stdout, "{}", result.label)?;
        }
        if let Some(debug) = &result.score_debug {
            write!(stdout, "\t{debug:?}")?;
        }
        writeln!(stdout)?;
    }
    stdout.flush()?;

    Ok(if results.is_empty() { 1 } else { 0 })
}

fn read_labels(file: Option<&PathBuf>) -> Result<Vec<String>> {
    let reader: Box<dyn BufRead> = match file {
        Some(path) => Box::new(BufReader::new(
            File::open(path).wrap_err_with(|| format!("cannot open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(std::io::stdin())),
    };

    let mut labels = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.is_empty() {
            labels.push(line);
        }
    }
    Ok(labels)
}
