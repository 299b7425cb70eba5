use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use krarkulator::card::CardDatabase;
use krarkulator::game::{Board, ManaPool, Resources};
use krarkulator::rng::GameRng;
use krarkulator::simulation::{
    aggregate_results, parse_board_file, simulate_batch, simulate_once, BatchSummary, Report,
    SimulationConfig,
};

#[derive(Parser)]
#[command(name = "krarkulator")]
#[command(about = "Expected output calculator for Krark coin-flip spell loops", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Card catalog (JSON). Uses the built-in catalog when omitted
    #[arg(long, global = true)]
    cards: Option<String>,

    /// Board file listing the permanents in play
    #[arg(short, long, global = true, default_value = "board.txt")]
    board: String,

    /// Spell to cast repeatedly
    #[arg(long, global = true, default_value = "Rite of Flame")]
    spell: String,

    /// Starting mana pool as symbols, e.g. "RR"
    #[arg(short, long, global = true, default_value = "R")]
    pool: String,

    /// Seed for random number generator (for reproducibility)
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Stop a run after this many casts
    #[arg(long, global = true, default_value = "10000")]
    cast_limit: u32,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a batch of simulations and report expected values
    Run {
        /// Number of runs to simulate
        #[arg(short, long, default_value = "1000")]
        num_runs: usize,

        /// Write a JSON report to this path
        #[arg(short, long)]
        report: Option<String>,
    },

    /// Compare two board configurations
    Compare {
        /// First board file
        board1: String,

        /// Second board file
        board2: String,

        /// Number of runs per board
        #[arg(short, long, default_value = "1000")]
        num_runs: usize,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let db = match &cli.cards {
        Some(path) => CardDatabase::from_file(path),
        None => CardDatabase::builtin(),
    };
    let db = match db {
        Ok(db) => {
            eprintln!("✓ Loaded {} cards", db.card_count());
            db
        }
        Err(e) => {
            eprintln!("✗ Failed to load cards: {}", e);
            std::process::exit(1);
        }
    };

    let config = build_config(&db, &cli);

    match cli.command {
        Some(Commands::Run { num_runs, ref report }) => {
            let board = load_board(&db, &cli.board);
            run_batch(&board, &config, num_runs, cli.seed, report.as_deref());
        }
        Some(Commands::Compare { ref board1, ref board2, num_runs }) => {
            compare_boards(&db, &config, board1, board2, num_runs, cli.seed);
        }
        None => {
            let board = load_board(&db, &cli.board);
            run_single(&board, &config, cli.seed);
        }
    }
}

fn build_config(db: &CardDatabase, cli: &Cli) -> SimulationConfig {
    let spell = match db.get_card(&cli.spell) {
        Ok(card) => card,
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    };
    let mana: ManaPool = match cli.pool.parse() {
        Ok(mana) => mana,
        Err(e) => {
            eprintln!("✗ Invalid pool '{}': {}", cli.pool, e);
            std::process::exit(1);
        }
    };
    SimulationConfig {
        spell,
        starting_pool: Resources::from_mana(mana),
        cast_limit: Some(cli.cast_limit),
    }
}

fn load_board(db: &CardDatabase, board_file: &str) -> Board {
    match parse_board_file(board_file, db) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("✗ Failed to parse board file '{}': {}", board_file, e);
            std::process::exit(1);
        }
    }
}

fn base_seed(seed: Option<u64>) -> u64 {
    GameRng::new(seed).seed()
}

fn run_single(board: &Board, config: &SimulationConfig, seed: Option<u64>) {
    let seed = base_seed(seed);
    println!("\n=== Krarkulator ===\n");
    println!("Board: {}", board.names().join(", "));
    println!("Spell: {}", config.spell.name());
    println!("Starting pool: {}", config.starting_pool);
    println!("Seed: {}", seed);
    println!();

    match simulate_once(board, config, seed) {
        Ok(result) => {
            println!("Cast {} {} times", config.spell.name(), result.casts);
            println!("Copied {} {} times", config.spell.name(), result.heads);
            println!("Final pool: {}", result.pool);
            println!("Stopped: {:?}", result.termination);
        }
        Err(e) => {
            eprintln!("✗ Simulation failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn batch_with_progress(
    board: &Board,
    config: &SimulationConfig,
    num_runs: usize,
    seed: u64,
) -> BatchSummary {
    let pb = ProgressBar::new(num_runs as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} runs ({eta})") {
        pb.set_style(style);
    }
    let results = simulate_batch(board, config, num_runs, seed, Some(&pb));
    pb.finish_and_clear();

    match results {
        Ok(results) => aggregate_results(&results),
        Err(e) => {
            eprintln!("✗ Simulation failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_batch(
    board: &Board,
    config: &SimulationConfig,
    num_runs: usize,
    seed: Option<u64>,
    report_path: Option<&str>,
) {
    let seed = base_seed(seed);
    println!("\n=== Krarkulator ===\n");
    println!("Board: {}", board.names().join(", "));
    println!("Spell: {}", config.spell.name());
    println!("Starting pool: {}", config.starting_pool);
    println!("Runs: {}", num_runs);
    println!("Seed: {}", seed);
    println!();

    let start = std::time::Instant::now();
    let summary = batch_with_progress(board, config, num_runs, seed);
    let elapsed = start.elapsed();

    print_summary(&summary);

    println!();
    println!(
        "Simulation completed in {:.2?} ({:.0} runs/sec)",
        elapsed,
        num_runs as f64 / elapsed.as_secs_f64()
    );

    if let Some(path) = report_path {
        let report = Report {
            generated_at: chrono::Local::now().to_rfc3339(),
            spell: config.spell.name(),
            board: board.names(),
            starting_pool: config.starting_pool.to_string(),
            base_seed: seed,
            cast_limit: config.cast_limit,
            summary: &summary,
        };
        match report.save(path) {
            Ok(()) => println!("Report saved to: {}", path),
            Err(e) => eprintln!("Failed to save report: {}", e),
        }
    }
}

fn print_summary(summary: &BatchSummary) {
    let pool = &summary.mean_pool;
    println!("=== Expected values ===\n");
    println!("Casts:     {:.3} (max {})", summary.mean_casts, summary.max_casts);
    println!("Copies:    {:.3}", summary.mean_copies);
    println!("Heads:     {:.1}%", summary.heads_fraction * 100.0);
    println!("Red:       {:.3}", pool.red);
    println!("Treasures: {:.3}", pool.treasures);
    println!("Prowess:   {:.3}", pool.prowess);
    for (label, value) in [
        ("White", pool.white),
        ("Blue", pool.blue),
        ("Black", pool.black),
        ("Green", pool.green),
        ("Colorless", pool.colorless),
        ("Untaps", pool.untaps),
    ] {
        if value != 0.0 {
            println!("{:10} {:.3}", format!("{}:", label), value);
        }
    }
    println!();

    println!("Casts per run:");
    for (casts, count) in &summary.cast_distribution {
        let pct = *count as f64 / summary.num_runs as f64 * 100.0;
        let bar = "█".repeat((pct / 2.0) as usize);
        println!("  {:4}: {:5.1}% {} ({})", casts, pct, bar, count);
    }

    let stops = &summary.terminations;
    println!();
    println!(
        "Stopped: {} resolved, {} out of mana, {} hit cast limit",
        stops.spell_resolved, stops.unaffordable, stops.cast_limit
    );
}

fn compare_boards(
    db: &CardDatabase,
    config: &SimulationConfig,
    board1_file: &str,
    board2_file: &str,
    num_runs: usize,
    seed: Option<u64>,
) {
    let board1 = load_board(db, board1_file);
    let board2 = load_board(db, board2_file);
    let seed = base_seed(seed);

    println!("\n=== Board Comparison ===\n");
    println!("Board 1: {}", board1_file);
    println!("Board 2: {}", board2_file);
    println!("Spell: {}", config.spell.name());
    println!("Runs per board: {}", num_runs);
    println!();

    let start = std::time::Instant::now();
    println!("Running board 1...");
    let summary1 = batch_with_progress(&board1, config, num_runs, seed);
    println!("Running board 2...");
    let summary2 = batch_with_progress(&board2, config, num_runs, seed);
    let elapsed = start.elapsed();

    println!("\n=== Results ===\n");
    println!("{:20} {:>12} {:>12}", "Metric", board1_file, board2_file);
    println!("{:-<46}", "");
    let rows = [
        ("Casts", summary1.mean_casts, summary2.mean_casts),
        ("Copies", summary1.mean_copies, summary2.mean_copies),
        ("Red", summary1.mean_pool.red, summary2.mean_pool.red),
        ("Treasures", summary1.mean_pool.treasures, summary2.mean_pool.treasures),
        ("Prowess", summary1.mean_pool.prowess, summary2.mean_pool.prowess),
    ];
    for (label, a, b) in rows {
        println!("{:20} {:>12.3} {:>12.3}", label, a, b);
    }

    println!();
    if summary1.mean_casts > summary2.mean_casts {
        println!(
            "✓ {} casts {:.2} more times on average",
            board1_file,
            summary1.mean_casts - summary2.mean_casts
        );
    } else if summary2.mean_casts > summary1.mean_casts {
        println!(
            "✓ {} casts {:.2} more times on average",
            board2_file,
            summary2.mean_casts - summary1.mean_casts
        );
    } else {
        println!("Both boards cast the same number of times on average");
    }

    println!("\nCompleted in {:.2?}", elapsed);
}
