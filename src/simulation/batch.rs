use crate::card::Card;
use crate::game::mana::Resources;
use crate::game::zones::{Board, GameError, Permanent};
use crate::rng::GameRng;
use crate::simulation::engine::{Engine, Termination};
use indicatif::ProgressBar;
use rayon::prelude::*;

/// What to loop and what to start with
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub spell: Card,
    pub starting_pool: Resources,
    pub cast_limit: Option<u32>,
}

/// Result of a single simulation run
#[derive(Debug, Clone)]
pub struct RunResult {
    pub seed: u64,
    pub pool: Resources,
    pub casts: u32,
    pub copies: u32,
    pub heads: usize,
    pub flips: usize,
    pub termination: Termination,
}

/// Run the cast loop once with a fresh copy of the spell in hand
pub fn simulate_once(
    board: &Board,
    config: &SimulationConfig,
    seed: u64,
) -> Result<RunResult, GameError> {
    let mut engine = Engine::new(board, GameRng::new(Some(seed)));
    if let Some(limit) = config.cast_limit {
        engine = engine.with_cast_limit(limit);
    }
    let mut spell = Permanent::new(config.spell.clone());
    let outcome = engine.run_loop(&mut spell, config.starting_pool)?;

    Ok(RunResult {
        seed,
        pool: outcome.pool,
        casts: outcome.casts,
        copies: outcome.copies,
        heads: outcome.heads,
        flips: outcome.flips,
        termination: outcome.termination,
    })
}

/// Run `num_runs` independent simulations in parallel, seeded
/// `base_seed`, `base_seed + 1`, ... so a batch is reproducible
pub fn simulate_batch(
    board: &Board,
    config: &SimulationConfig,
    num_runs: usize,
    base_seed: u64,
    progress: Option<&ProgressBar>,
) -> Result<Vec<RunResult>, GameError> {
    (0..num_runs)
        .into_par_iter()
        .map(|i| {
            let result = simulate_once(board, config, base_seed.wrapping_add(i as u64));
            if let Some(pb) = progress {
                pb.inc(1);
            }
            result
        })
        .collect()
}
