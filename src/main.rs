use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chordgen::canonical::CanonicalIndex;
use chordgen::catalog::{self, Progression};
use chordgen::config::AppConfig;
use chordgen::filter::ProgressionFilter;
use chordgen::graph::TransitionGraph;
use chordgen::modulation::{ModulationBudget, ModulationPlanner};
use chordgen::scales::ScaleKind;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "chordgen", version, about = "Chord progression generator and modulation finder")]
struct Cli {
    /// Chord dictionary (JSON or YAML)
    #[arg(long, global = true)]
    chords: Option<PathBuf>,

    /// Progression corpus (JSON or YAML)
    #[arg(long, global = true)]
    progressions: Option<PathBuf>,

    /// Seed for reproducible output
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Corpus metadata filters shared by the statistics commands.
#[derive(Args, Default)]
struct FilterArgs {
    /// Keep progressions with this genre (repeatable, any match)
    #[arg(long = "genre")]
    genres: Vec<String>,

    /// Keep progressions from this period
    #[arg(long)]
    period: Option<String>,

    /// Keep progressions by this composer
    #[arg(long)]
    composer: Option<String>,

    /// Keep progressions by this artist
    #[arg(long)]
    artist: Option<String>,

    /// Keep progressions with this type tag (e.g. Loop)
    #[arg(long = "type")]
    tag: Option<String>,

    /// Keep progressions from this year or later
    #[arg(long)]
    year_after: Option<i32>,

    /// Keep progressions from this year or earlier
    #[arg(long)]
    year_before: Option<i32>,
}

impl From<FilterArgs> for ProgressionFilter {
    fn from(args: FilterArgs) -> Self {
        ProgressionFilter {
            genres: args.genres,
            period: args.period,
            composer: args.composer,
            artist: args.artist,
            tag: args.tag,
            year_after: args.year_after,
            year_before: args.year_before,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate new progressions from corpus transition statistics
    Generate {
        /// Chords per progression (defaults to config default_length)
        #[arg(short, long)]
        length: Option<usize>,

        /// Number of progressions to generate
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Find chord paths that lead from one chord to another
    Modulate {
        /// Chord to start on (any alias)
        start: String,

        /// Chord to arrive at (any alias)
        target: String,

        /// Path length in chords (defaults to config default_length)
        #[arg(short, long)]
        length: Option<usize>,

        /// Search rounds per strategy
        #[arg(long)]
        rounds: Option<usize>,

        /// Paths generated per round
        #[arg(long)]
        attempts: Option<usize>,
    },

    /// List chord transitions by frequency
    Transitions {
        /// Number of results
        #[arg(short = 'n', long, default_value = "30")]
        limit: usize,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show which chords open progressions
    FirstChords {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Find catalog chords harmonically close to a chord
    Similar {
        /// Chord to compare against (any alias)
        chord: String,

        /// Minimum similarity score (0-1)
        #[arg(short, long, default_value = "0.8")]
        threshold: f64,

        /// Number of results
        #[arg(short = 'n', long, default_value = "15")]
        limit: usize,
    },

    /// List chord labels in the corpus that the dictionary doesn't know
    Unknown,

    /// Spell a scale
    Scale {
        /// Root note (e.g. C, F#, Bb)
        root: String,

        /// Scale type
        #[arg(value_enum, default_value = "major")]
        kind: ScaleKind,

        /// Spell with flats instead of sharps
        #[arg(long)]
        flats: bool,
    },
}

struct Library {
    index: CanonicalIndex,
    progressions: Vec<Progression>,
}

fn load_library(cli_chords: Option<&Path>, cli_progressions: Option<&Path>, config: &AppConfig) -> Result<Library> {
    // CLI > config > XDG default
    let chords_path = cli_chords
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.resolve_chords_path());
    let progressions_path = cli_progressions
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.resolve_progressions_path());

    let chords = catalog::load_chords(&chords_path).context("Failed to load chord dictionary")?;
    let progressions = catalog::load_progressions(&progressions_path)
        .context("Failed to load progression corpus")?;
    Ok(Library {
        index: CanonicalIndex::build(&chords),
        progressions,
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load config file (optional, defaults if missing)
    let config = AppConfig::load();
    let mut rng = chordgen::rng::create_rng(cli.seed.or(config.seed));

    let load = || load_library(cli.chords.as_deref(), cli.progressions.as_deref(), &config);

    match cli.command {
        Commands::Generate { length, count, filter } => {
            let Library { index, progressions } = load()?;
            let filter = ProgressionFilter::from(filter);
            let corpus = filter.apply(&progressions);
            let graph = TransitionGraph::build(&corpus, &index);
            let length = length.unwrap_or(config.default_length);

            if graph.start_candidates().is_empty() {
                println!("No suitable progressions found to build from.");
                return Ok(());
            }

            for _ in 0..count {
                let progression = chordgen::walk::build_progression(
                    graph.start_candidates(),
                    &graph,
                    length,
                    &mut rng,
                );
                println!("{}", progression.join(" - "));
            }
        }

        Commands::Modulate { start, target, length, rounds, attempts } => {
            let Library { index, progressions } = load()?;
            let graph = TransitionGraph::build(&progressions, &index);
            let budget = ModulationBudget {
                rounds: rounds.unwrap_or(config.modulation.rounds),
                attempts: attempts.unwrap_or(config.modulation.attempts),
                ..config.modulation
            };
            let length = length.unwrap_or(config.default_length);
            let start = index.canonical(&start);
            let target = index.canonical(&target);

            let planner = ModulationPlanner::new(&graph, &index, budget);
            let result = planner.build_modulation(start, target, length, &mut rng);

            match result.strategy {
                None => {
                    println!(
                        "No modulation from {} to {} in {} chords ({} rounds tried).",
                        start, target, length, result.rounds_used
                    );
                }
                Some(strategy) => {
                    println!(
                        "{} paths from {} to {} ({} strategy):",
                        result.paths.len(),
                        start,
                        target,
                        strategy.label()
                    );
                    println!();
                    for path in &result.paths {
                        println!("  {}", path.join(" - "));
                    }
                }
            }
        }

        Commands::Transitions { limit, filter } => {
            let Library { index, progressions } = load()?;
            let corpus = ProgressionFilter::from(filter).apply(&progressions);
            let graph = TransitionGraph::build(&corpus, &index);
            let freqs = graph.pair_frequencies();

            if freqs.is_empty() {
                println!("No chord transitions found.");
                return Ok(());
            }

            let counts = graph.pair_counts();
            println!("{:<12} {:<12} {:>6} {:>7}", "From", "To", "Count", "Share");
            println!("{}", "-".repeat(40));
            for ((pair, n), (_, share)) in counts.iter().zip(&freqs).take(limit) {
                println!(
                    "{:<12} {:<12} {:>6} {:>6.1}%",
                    pair.from,
                    pair.to,
                    n,
                    share * 100.0
                );
            }
            println!();
            println!("{} distinct transitions, {} total", counts.len(), graph.edge_total());
        }

        Commands::FirstChords { filter } => {
            let Library { index, progressions } = load()?;
            let corpus = ProgressionFilter::from(filter).apply(&progressions);
            let graph = TransitionGraph::build(&corpus, &index);
            let counts = graph.first_chord_counts();

            if counts.is_empty() {
                println!("No progressions found.");
                return Ok(());
            }

            println!("{:<12} {:>6} {:>7}", "Chord", "Count", "Share");
            println!("{}", "-".repeat(27));
            for ((label, n), (_, share)) in counts.iter().zip(graph.first_chord_frequencies()) {
                println!("{:<12} {:>6} {:>6.1}%", label, n, share * 100.0);
            }
        }

        Commands::Similar { chord, threshold, limit } => {
            let index = load()?.index;
            let Some(reference) = index.chord(&chord) else {
                println!("\"{}\" is not in the chord dictionary.", chord);
                return Ok(());
            };

            let ranked: Vec<(String, f64)> = chordgen::similarity::rank_similar(
                reference,
                index.chords(),
                index.chords().len(),
            )
            .into_iter()
            .filter(|(label, score)| *score >= threshold && *label != reference.roman_numeral)
            .take(limit)
            .collect();

            if ranked.is_empty() {
                println!("No chords scoring {:.2} or higher against {}.", threshold, reference.roman_numeral);
                return Ok(());
            }

            println!("Chords similar to {} ({}):", reference.roman_numeral, reference.notes.join(" "));
            println!();
            for (label, score) in &ranked {
                let symbol = index.chord(label).map(|c| c.symbol.as_str()).unwrap_or("");
                println!("  {:<12} {:<10} {:.3}", label, symbol, score);
            }
        }

        Commands::Unknown => {
            let Library { index, progressions } = load()?;
            let unknown = index.unknown_labels(&progressions);
            if unknown.is_empty() {
                println!("Every chord in the corpus is in the dictionary.");
            } else {
                println!("{} labels missing from the chord dictionary:", unknown.len());
                for label in &unknown {
                    println!("  {}", label);
                }
            }
        }

        Commands::Scale { root, kind, flats } => {
            let notes = chordgen::scales::scale(&root, kind, flats)?;
            println!("{}", notes.join(" "));
        }
    }

    Ok(())
}
