use anyhow::{Context, Result};
use cjkseg::output::{self, WordReport};
use cjkseg::segment::{ReadSource, Segmenter};
use cjkseg::utils::regularize;
use cjkseg::{AnalyzerConfig, Dictionary, Lexeme, Occur, QueryBuilder};
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cjkseg")]
#[command(about = "Streaming dictionary segmenter for CJK and Latin text")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    dictionaries: DictionaryArgs,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Args)]
struct DictionaryArgs {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Extra word list appended to the main dictionary
    #[arg(long = "dict", global = true)]
    dicts: Vec<PathBuf>,

    /// Extra stop-word list
    #[arg(long, global = true)]
    stopwords: Vec<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment files or standard input
    Segment {
        /// Files to segment (standard input when empty)
        files: Vec<PathBuf>,

        /// Emit every dictionary word instead of only the longest ones
        #[arg(short, long)]
        all: bool,

        /// Print JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Build the boolean query for a phrase
    Query {
        /// Phrase to analyze
        phrase: String,

        /// Field to search (repeatable)
        #[arg(short, long = "field", required = true)]
        fields: Vec<String>,

        /// Occurrence of each field: must, should or must-not
        #[arg(short, long = "occur")]
        occurs: Vec<Occur>,

        /// Keep only the longest words of the phrase
        #[arg(long)]
        longest: bool,

        /// Print the query as JSON
        #[arg(long)]
        json: bool,
    },
    /// Look words up in the dictionaries
    Words {
        /// Words to look up
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Show dictionary statistics
    Stats,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.dictionaries)?;
    let dictionary = Dictionary::load(&config).context("Failed to load dictionaries")?;
    let dictionary = Dictionary::install(dictionary).context("Failed to install dictionary")?;
    let color = !cli.no_color;

    match cli.command {
        Commands::Segment { files, all, json } => {
            let mut config = config;
            config.longest_match = !all;
            segment(&files, &dictionary, &config, json, color)?;
        }
        Commands::Query {
            phrase,
            fields,
            occurs,
            longest,
            json,
        } => {
            let mut config = config;
            config.query_longest_match = longest;
            let builder = QueryBuilder::from_config(dictionary, &config);
            let query = builder.build_clauses(&fields, &[phrase.as_str()], &occurs);
            if json {
                let mut stdout = io::stdout().lock();
                serde_json::to_writer_pretty(&mut stdout, &query)?;
                writeln!(stdout)?;
            } else {
                println!("{query}");
                let mut stdout = output::stdout(color);
                output::write_query_tree(&mut stdout, &query)?;
            }
        }
        Commands::Words { words } => {
            show_words(&words, &dictionary, color)?;
        }
        Commands::Stats => {
            let counts = dictionary.word_counts();
            println!("Dictionary Statistics");
            println!("=====================");
            println!("Main words:   {}", counts.main);
            println!("Quantifiers:  {}", counts.quantifiers);
            println!("Stop words:   {}", counts.stop_words);
        }
    }

    Ok(())
}

fn load_config(args: &DictionaryArgs) -> Result<AnalyzerConfig> {
    let mut config = match &args.config {
        Some(path) => AnalyzerConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => AnalyzerConfig::load_default().context("Failed to load default config")?,
    };
    config.user_dictionaries.extend(args.dicts.iter().cloned());
    config.user_stopwords.extend(args.stopwords.iter().cloned());
    Ok(config)
}

fn segment(
    files: &[PathBuf],
    dictionary: &Arc<Dictionary>,
    config: &AnalyzerConfig,
    json: bool,
    color: bool,
) -> Result<()> {
    let mut stdout = output::stdout(color);

    if files.is_empty() {
        let stdin = io::stdin().lock();
        let segmenter =
            Segmenter::from_config(ReadSource::new(stdin), Arc::clone(dictionary), config);
        // Stream lexemes as they are produced
        for lexeme in segmenter {
            let lexeme = lexeme.context("Failed to segment standard input")?;
            if json {
                output::write_lexeme_json(&mut stdout, None, &lexeme)?;
            } else {
                output::write_lexeme(&mut stdout, &lexeme)?;
            }
        }
        return Ok(());
    }

    // Each file gets its own session; results are printed in argument order
    let results: Vec<(&PathBuf, Result<Vec<Lexeme>>)> = files
        .par_iter()
        .map(|path| (path, segment_file(path, dictionary, config)))
        .collect();

    let mut failed = 0;
    for (path, result) in results {
        match result {
            Ok(lexemes) => print_lexemes(&mut stdout, Some(path), &lexemes, json)?,
            Err(e) => {
                eprintln!("cjkseg: {}: {e:#}", path.display());
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} files could not be segmented", files.len());
    }
    Ok(())
}

fn segment_file(
    path: &Path,
    dictionary: &Arc<Dictionary>,
    config: &AnalyzerConfig,
) -> Result<Vec<Lexeme>> {
    let file = File::open(path).context("Failed to open file")?;
    let source = ReadSource::new(BufReader::new(file));
    Segmenter::from_config(source, Arc::clone(dictionary), config)
        .collect::<cjkseg::Result<Vec<_>>>()
        .context("Failed to segment file")
}

fn print_lexemes(
    stdout: &mut termcolor::StandardStream,
    path: Option<&Path>,
    lexemes: &[Lexeme],
    json: bool,
) -> Result<()> {
    if json {
        output::write_lexemes_json(stdout, path, lexemes)?;
    } else {
        output::write_lexemes(stdout, path, lexemes)?;
    }
    Ok(())
}

fn show_words(words: &[String], dictionary: &Dictionary, color: bool) -> Result<()> {
    let lexicon = dictionary.read();
    let reports: Vec<WordReport<'_>> = words
        .iter()
        .map(|word| {
            let chars: Vec<char> = word.trim().chars().map(regularize).collect();
            let hit = lexicon.main().match_span(&chars, 0, chars.len());
            WordReport {
                word: word.as_str(),
                is_word: hit.is_match(),
                is_prefix: hit.is_prefix(),
                is_quantifier: lexicon.quantifiers().contains_chars(&chars),
                is_stop_word: lexicon.is_stop_word(&chars),
            }
        })
        .collect();

    let mut stdout = output::stdout(color);
    output::write_word_reports(&mut stdout, &reports)?;
    Ok(())
}
