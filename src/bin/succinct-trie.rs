//! Command-line driver for building and querying succinct tries.
//!
//! # Example
//!
//! ```bash
//! succinct-trie build words.txt -o trie.json
//! succinct-trie lookup -a trie.json apple alp
//! succinct-trie suggest -a trie.json ap -n 5
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use succinct_trie::{
    Artifact, DirectoryConfig, FrozenTrie, Trie, TrieConfig, DEFAULT_ALPHABET, DEFAULT_L1,
    DEFAULT_L2,
};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "succinct-trie")]
#[command(about = "Build and query succinct tries over word lists")]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Command,
}

/// Settings shared by every subcommand; readers must match the builder.
#[derive(Args, Debug)]
struct ConfigArgs {
    /// Characters words may contain, in label order
    #[arg(long, global = true, default_value = DEFAULT_ALPHABET, env = "SUCCINCT_TRIE_ALPHABET")]
    alphabet: String,

    /// Slots summarized by each coarse directory entry
    #[arg(long, global = true, default_value_t = DEFAULT_L1, env = "SUCCINCT_TRIE_L1")]
    l1: u64,

    /// Slots summarized by each fine directory entry
    #[arg(long, global = true, default_value_t = DEFAULT_L2, env = "SUCCINCT_TRIE_L2")]
    l2: u64,
}

impl ConfigArgs {
    fn to_config(&self) -> Result<TrieConfig> {
        let config = TrieConfig {
            alphabet: self.alphabet.clone(),
            directory: DirectoryConfig {
                l1: self.l1,
                l2: self.l2,
            },
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build an artifact from word lists, one word per line
    Build {
        /// Input files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Where to write the artifact
        #[arg(short, long, default_value = "trie.json")]
        output: PathBuf,
    },

    /// Check words for membership, interactively when none are given
    Lookup {
        /// Artifact to query
        #[arg(short, long, env = "SUCCINCT_TRIE_ARTIFACT")]
        artifact: PathBuf,

        /// Words to check
        words: Vec<String>,
    },

    /// List words starting with a prefix
    Suggest {
        /// Artifact to query
        #[arg(short, long, env = "SUCCINCT_TRIE_ARTIFACT")]
        artifact: PathBuf,

        prefix: String,

        /// Maximum number of words to print
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("succinct_trie=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config.to_config()?;

    match cli.command {
        Command::Build { files, output } => build(&files, &output, &config),
        Command::Lookup { artifact, words } => {
            let trie = load(&artifact, &config)?;
            if words.is_empty() {
                repl(&trie)
            } else {
                let mut out = io::stdout().lock();
                for word in &words {
                    writeln!(out, "{}", trie.lookup(word))?;
                }
                Ok(())
            }
        }
        Command::Suggest {
            artifact,
            prefix,
            limit,
        } => {
            let trie = load(&artifact, &config)?;
            let mut out = io::stdout().lock();
            for word in trie.suggest(&prefix, limit)? {
                writeln!(out, "{word}")?;
            }
            Ok(())
        }
    }
}

fn build(files: &[PathBuf], output: &Path, config: &TrieConfig) -> Result<()> {
    let mut words = Vec::new();
    for path in files {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        for line in BufReader::new(file).lines() {
            let line = line.with_context(|| format!("reading {}", path.display()))?;
            let word = line.trim();
            if !word.is_empty() {
                words.push(word.to_string());
            }
        }
    }
    words.sort();
    words.dedup();
    debug!(words = words.len(), "read word list");

    let mut trie = Trie::with_alphabet(config.alphabet()?);
    for word in &words {
        trie.insert(word)
            .with_context(|| format!("inserting {word:?}"))?;
    }

    let artifact = Artifact::build(&trie, &config.directory)?;
    let file = File::create(output).with_context(|| format!("creating {}", output.display()))?;
    artifact.write_to(BufWriter::new(file))?;

    info!(
        words = words.len(),
        nodes = artifact.node_count,
        output = %output.display(),
        "wrote trie"
    );
    Ok(())
}

fn load(path: &Path, config: &TrieConfig) -> Result<FrozenTrie> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let artifact = Artifact::read_from(BufReader::new(file))
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(artifact.freeze(config)?)
}

/// Prompts for words until end of input.
fn repl(trie: &FrozenTrie) -> Result<()> {
    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();
    let mut line = String::new();
    loop {
        write!(out, "word> ")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(());
        }
        let word = line.trim_end_matches(['\n', '\r']);
        writeln!(out, "{}", trie.lookup(word))?;
    }
}
