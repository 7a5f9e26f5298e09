use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use qconsensus::phred::MAX_PHRED;
use qconsensus::{Alphabet, CallerConfig, Consensus, ConsensusCaller, ReadAlignment};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEMO_READS: [(&str, [f64; 8]); 2] = [
    ("AACATGAG", [20.0, 20.0, 20.0, 15.0, 13.0, 20.0, 22.0, 19.0]),
    ("CCCTTAAG", [10.0, 20.0, 20.0, 15.0, 13.0, 20.0, 22.0, 19.0]),
];

#[derive(Parser, Debug)]
#[command(
    name = "qconsensus",
    about = "Maximum-likelihood consensus with Phred-scaled confidence"
)]
struct Cli {
    /// Log debug output to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Call the consensus of a built-in two-read, eight-position alignment.
    Demo {
        /// Also print the posterior distribution at every position.
        #[arg(long)]
        posteriors: bool,
    },
    /// Call the consensus of reads given on the command line.
    Call {
        /// Aligned read as `SEQUENCE:Q1,Q2,...`; repeat once per read.
        #[arg(long = "read", required = true, value_parser = parse_read)]
        reads: Vec<ReadArg>,
        /// Candidate bases, in tie-breaking order.
        #[arg(long, default_value = "ACGT")]
        alphabet: String,
        /// Symbol marking positions a read does not cover.
        #[arg(long, default_value_t = '-')]
        gap: char,
        /// Treat every non-alphabet symbol as an error.
        #[arg(long, conflicts_with = "gap")]
        no_gap: bool,
        /// Ceiling for reported quality scores.
        #[arg(long, default_value_t = MAX_PHRED)]
        max_quality: u8,
        /// Also print the posterior distribution at every position.
        #[arg(long)]
        posteriors: bool,
    },
}

/// One read parsed from `SEQUENCE:Q1,Q2,...`.
#[derive(Debug, Clone)]
struct ReadArg {
    sequence: Vec<u8>,
    qualities: Vec<f64>,
}

fn parse_read(arg: &str) -> Result<ReadArg> {
    let (sequence, qualities) = arg
        .split_once(':')
        .ok_or_else(|| anyhow!("expected SEQUENCE:Q1,Q2,... but got '{}'", arg))?;
    let qualities = qualities
        .split(',')
        .map(|q| {
            q.trim()
                .parse::<f64>()
                .with_context(|| format!("invalid quality '{}'", q))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(ReadArg {
        sequence: sequence.as_bytes().to_vec(),
        qualities,
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Demo { posteriors } => run_demo(posteriors)?,
        Commands::Call {
            reads,
            alphabet,
            gap,
            no_gap,
            max_quality,
            posteriors,
        } => run_call(reads, alphabet, gap, no_gap, max_quality, posteriors)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_demo(show_posteriors: bool) -> Result<()> {
    let alignment = ReadAlignment::from_reads(
        DEMO_READS
            .iter()
            .map(|(sequence, qualities)| (sequence.as_bytes(), qualities)),
    )
    .context("failed to build demo alignment")?;

    let caller = ConsensusCaller::dna();
    let consensus = caller
        .call(&alignment)
        .context("consensus calling failed")?;

    print_consensus(&consensus, caller.alphabet(), show_posteriors);
    Ok(())
}

fn run_call(
    reads: Vec<ReadArg>,
    alphabet: String,
    gap: char,
    no_gap: bool,
    max_quality: u8,
    show_posteriors: bool,
) -> Result<()> {
    let alphabet = Alphabet::new(alphabet.as_bytes())
        .with_context(|| format!("invalid alphabet '{}'", alphabet))?;
    let gap = if no_gap {
        None
    } else {
        if !gap.is_ascii() {
            bail!("gap symbol '{}' must be a single ASCII character", gap);
        }
        Some(gap as u8)
    };

    let config = CallerConfig::for_alphabet(alphabet)
        .with_gap(gap)
        .with_max_quality(max_quality);
    let caller = ConsensusCaller::new(config).context("invalid caller configuration")?;

    info!(reads = reads.len(), "building alignment from command line");
    let alignment = ReadAlignment::from_reads(
        reads
            .iter()
            .map(|read| (read.sequence.as_slice(), read.qualities.as_slice())),
    )
    .context("reads do not form a rectangular alignment")?;

    let consensus = caller
        .call(&alignment)
        .context("consensus calling failed")?;

    print_consensus(&consensus, caller.alphabet(), show_posteriors);
    Ok(())
}

fn print_consensus(consensus: &Consensus, alphabet: &Alphabet, show_posteriors: bool) {
    let qualities = consensus
        .qualities
        .iter()
        .map(|q| q.to_string())
        .collect::<Vec<_>>()
        .join(",");

    println!("consensus\t{}", consensus.sequence_string());
    println!("qualities\t{}", qualities);

    if show_posteriors {
        let header = alphabet
            .symbols()
            .iter()
            .map(|&symbol| char::from(symbol).to_string())
            .collect::<Vec<_>>()
            .join("\t");
        println!("position\tdepth\t{}", header);

        for (position, row) in consensus.posteriors.rows().into_iter().enumerate() {
            let probabilities = row
                .iter()
                .map(|p| format!("{:.6}", p))
                .collect::<Vec<_>>()
                .join("\t");
            println!(
                "{}\t{}\t{}",
                position + 1,
                consensus.depths[position],
                probabilities
            );
        }
    }
}
