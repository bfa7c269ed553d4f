use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use fxtree::output;
use fxtree::query::{BoundaryMap, Searcher};
use fxtree::source::{FileSource, StringSource, SymbolSource, symbols_from_bytes, symbols_from_str};
use fxtree::tree::check::{verify, verify_finished};
use fxtree::tree::{ROOT, SuffixTree, TreeConfig, TreeStats, Ukkonen};
use fxtree::tree::types::{Offset, Symbol};
use fxtree::utils::AppConfig;
use fxtree::utils::progress::construction_bar;
use fxtree::visit::{DepthVisitor, Dfs, SuffixLinkCollector};
use std::path::Path;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

type DynSource = Box<dyn SymbolSource + Send + Sync>;

/// Symbols integrated between progress bar updates
const PROGRESS_STEP: u64 = 1 << 16;

#[derive(Parser)]
#[command(name = "fxtree")]
#[command(about = "Build and query suffix trees")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Treat INPUT as literal text instead of a file path
    #[arg(long, global = true)]
    text: bool,

    /// Sentinel appended when finishing the tree, must not occur in INPUT
    #[arg(long, global = true)]
    terminator: Option<char>,

    /// Leave the tree implicit (no sentinel appended)
    #[arg(long, global = true)]
    no_finish: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show tree statistics
    Stats {
        input: String,

        #[arg(long)]
        json: bool,
    },
    /// Print the offsets of every occurrence of each query
    Search {
        input: String,

        #[arg(required = true)]
        queries: Vec<String>,

        #[arg(long)]
        json: bool,
    },
    /// Dump the tree
    Print { input: String },
    /// Verify tree invariants
    Check { input: String },
    /// List suffix links with node depths
    Links {
        input: String,

        #[arg(long)]
        json: bool,
    },
    /// Group repeated substrings of at least MIN_LEN symbols
    Repeats {
        input: String,

        #[arg(long, default_value_t = 2)]
        min_len: Offset,

        #[arg(long)]
        json: bool,
    },
    /// List segments named by `<d><kind><d><name><d>` trailers
    Boundaries {
        input: String,

        /// Trailer kind to look for
        #[arg(long)]
        kind: String,

        /// Trailer delimiter
        #[arg(long, default_value_t = '$')]
        delimiter: char,

        #[arg(long)]
        json: bool,
    },
}

/// How INPUT is read and the tree is built
struct BuildOptions {
    text: bool,
    finish: bool,
    tree_config: TreeConfig,
}

impl BuildOptions {
    /// Encode a query the way the input's source encodes symbols
    fn encode(&self, query: &str) -> Vec<Symbol> {
        if self.text {
            symbols_from_str(query)
        } else {
            symbols_from_bytes(query.as_bytes())
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "fxtree=warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "ignoring unreadable config");
        AppConfig::default()
    });
    let color = config.color && !cli.no_color;

    let mut tree_config = config.tree_config();
    if let Some(terminator) = cli.terminator {
        tree_config.terminator = terminator as Symbol;
    }
    let opts = BuildOptions {
        text: cli.text,
        finish: !cli.no_finish,
        tree_config,
    };

    match cli.command {
        Commands::Stats { input, json } => {
            let tree = build_tree(&input, &opts)?;
            let stats = TreeStats::compute(&tree)?;
            if json {
                output::print_json(&stats)?;
            } else {
                output::write_stats(&mut std::io::stdout().lock(), &stats)?;
            }
        }
        Commands::Search {
            input,
            queries,
            json,
        } => {
            let tree = build_tree(&input, &opts)?;
            let encoded: Vec<Vec<Symbol>> = queries.iter().map(|q| opts.encode(q)).collect();
            let found = Searcher::new(&tree)
                .with_parallel_threshold(config.parallel_search_threshold)
                .search_many(&encoded);
            let results: Vec<(String, Vec<Offset>)> = queries.into_iter().zip(found).collect();
            if json {
                output::print_json(&results)?;
            } else {
                output::write_search_results(&mut output::stdout(color), &results)?;
            }
        }
        Commands::Print { input } => {
            let tree = build_tree(&input, &opts)?;
            output::write_tree(&mut output::stdout(color), &tree)?;
        }
        Commands::Check { input } => {
            let tree = build_tree(&input, &opts)?;
            let verdict = if opts.finish {
                verify_finished(&tree)
            } else {
                verify(&tree)
            };
            match verdict {
                Ok(()) => println!("OK: {} nodes, {} symbols", tree.node_count(), tree.len()),
                Err(violation) => bail!("Tree check failed: {}", violation),
            }
        }
        Commands::Links { input, json } => {
            let tree = build_tree(&input, &opts)?;
            let mut dfs = Dfs::new(SuffixLinkCollector::new());
            dfs.traverse(&tree, ROOT)?;
            let links = dfs.into_visitor().into_links();
            if json {
                output::print_json(&links)?;
            } else {
                output::write_links(&mut output::stdout(color), &links)?;
            }
        }
        Commands::Repeats {
            input,
            min_len,
            json,
        } => {
            if min_len < 1 {
                bail!("--min-len must be at least 1");
            }
            let tree = build_tree(&input, &opts)?;
            let mut dfs = Dfs::new(DepthVisitor::new(min_len));
            dfs.traverse(&tree, ROOT)?;
            let groups = dfs.into_visitor().into_groups();
            if json {
                output::print_json(&groups)?;
            } else {
                output::write_repeats(&mut output::stdout(color), &tree, min_len, &groups)?;
            }
        }
        Commands::Boundaries {
            input,
            kind,
            delimiter,
            json,
        } => {
            let tree = build_tree(&input, &opts)?;
            let map = BoundaryMap::build(&tree, &kind, delimiter as Symbol);
            if json {
                output::print_json(&map)?;
            } else {
                output::write_boundaries(&mut output::stdout(color), &map)?;
            }
        }
    }

    Ok(())
}

fn open_source(input: &str, text: bool) -> Result<DynSource> {
    if text {
        return Ok(Box::new(StringSource::new(input)));
    }
    let source = FileSource::open(Path::new(input))?;
    Ok(Box::new(source))
}

fn build_tree(input: &str, opts: &BuildOptions) -> Result<SuffixTree<DynSource>> {
    let source = open_source(input, opts.text)?;
    let total = source.size_hint();
    let mut engine = Ukkonen::with_config(source, opts.tree_config.clone());

    let pb = construction_bar(total);
    let mut pending = 0u64;
    while engine.extend().context("Failed to build suffix tree")? {
        pending += 1;
        if pending == PROGRESS_STEP {
            pb.inc(pending);
            pending = 0;
        }
    }
    pb.inc(pending);

    if opts.finish {
        engine.finish().context("Failed to finish suffix tree")?;
    }
    pb.finish_and_clear();

    let tree = engine.into_tree();
    tracing::debug!(symbols = tree.len(), nodes = tree.node_count(), "built tree");
    Ok(tree)
}
