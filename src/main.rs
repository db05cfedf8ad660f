//! Tengen: a small-board Go MCTS engine.
//!
//! ## Usage
//!
//! - `tengen` - Search one opening move on an empty board
//! - `tengen demo` - Same, with `--size`, `--sims`, and `--seed` knobs
//! - `tengen selfplay` - Play a full game, search against a random opponent

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;

use tengen::board::{Board, Color};
use tengen::constants::{DEFAULT_BOARD_SIZE, N_SIMS};
use tengen::policy::{MctsPolicy, MovePolicy, RandomPolicy};
use tengen::state::GameState;

/// Tengen: a small-board Go MCTS engine
#[derive(Parser)]
#[command(name = "tengen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search one move for Black on an empty board and print it
    Demo {
        /// Board side length
        #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
        size: usize,
        /// Search episodes per move decision
        #[arg(long, default_value_t = N_SIMS)]
        sims: usize,
        /// Fixed RNG seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play one full game: the search engine as Black against a random White
    Selfplay {
        /// Board side length
        #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
        size: usize,
        /// Search episodes per move decision
        #[arg(long, default_value_t = N_SIMS)]
        sims: usize,
        /// Fixed RNG seed for a reproducible game
        #[arg(long)]
        seed: Option<u64>,
        /// Give White the search engine too
        #[arg(long)]
        mirror: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Demo { size, sims, seed }) => run_demo(size, sims, seed),
        Some(Commands::Selfplay {
            size,
            sims,
            seed,
            mirror,
        }) => run_selfplay(size, sims, seed, mirror),
        None => run_demo(DEFAULT_BOARD_SIZE, N_SIMS, None),
    }
}

fn search_policy(sims: usize, seed: Option<u64>) -> MctsPolicy {
    match seed {
        Some(seed) => MctsPolicy::seeded(sims, seed),
        None => MctsPolicy::with_simulations(sims),
    }
}

fn run_demo(size: usize, sims: usize, seed: Option<u64>) -> Result<()> {
    let state = GameState::new(Color::Black, Board::new(size));
    let mut policy = search_policy(sims, seed);

    info!("searching {sims} episodes on an empty {size}x{size} board");
    let mv = policy.choose(&state);
    println!("Opening move for Black: {mv}");
    Ok(())
}

fn run_selfplay(size: usize, sims: usize, seed: Option<u64>, mirror: bool) -> Result<()> {
    let mut state = GameState::new(Color::Black, Board::new(size));
    let mut black = search_policy(sims, seed);
    let mut white: Box<dyn MovePolicy> = if mirror {
        Box::new(search_policy(sims, seed.map(|s| s.wrapping_add(1))))
    } else {
        match seed {
            Some(seed) => Box::new(RandomPolicy::seeded(seed.wrapping_add(1))),
            None => Box::new(RandomPolicy::new()),
        }
    };

    // Random play can stall in capture cycles; stop at a generous bound
    // and score whatever is standing.
    let max_plies = 4 * size * size;
    let mut plies = 0;
    while !state.is_terminal() && plies < max_plies {
        let side = state.to_move();
        let mv = match side {
            Color::Black => black.choose(&state),
            Color::White => white.choose(&state),
        };
        state.make_move(mv)?;
        plies += 1;
        info!("ply {plies}: {side} plays {mv}");
    }

    println!("{}", state.board());
    match state.score() {
        Some(score) => println!("Game over after {plies} plies, score {score:+.3}"),
        None => println!(
            "Stopped after {plies} plies, standing score {:+.3}",
            state.area_score()
        ),
    }
    Ok(())
}
