//! Expected-value statistics over a batch of runs.

use crate::simulation::batch::RunResult;
use crate::simulation::engine::Termination;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Mean final value of every pool channel
#[derive(Debug, Clone, Default, Serialize)]
pub struct PoolMeans {
    pub white: f64,
    pub blue: f64,
    pub black: f64,
    pub red: f64,
    pub green: f64,
    pub colorless: f64,
    pub treasures: f64,
    pub untaps: f64,
    pub prowess: f64,
}

/// How many runs stopped for each reason
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TerminationCounts {
    pub spell_resolved: usize,
    pub unaffordable: usize,
    pub cast_limit: usize,
}

/// Aggregate results from many runs
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    pub num_runs: usize,
    pub mean_pool: PoolMeans,
    pub mean_casts: f64,
    pub mean_copies: f64,
    pub max_casts: u32,
    /// Fraction of all coin flips that came up heads (0 when nothing flipped)
    pub heads_fraction: f64,
    /// casts per run -> number of runs
    pub cast_distribution: BTreeMap<u32, usize>,
    pub terminations: TerminationCounts,
}

/// Aggregate results from multiple runs
pub fn aggregate_results(results: &[RunResult]) -> BatchSummary {
    let mut summary = BatchSummary {
        num_runs: results.len(),
        ..BatchSummary::default()
    };

    if results.is_empty() {
        return summary;
    }

    let mut totals = [0i64; 9];
    let mut total_casts = 0u64;
    let mut total_copies = 0u64;
    let mut total_heads = 0usize;
    let mut total_flips = 0usize;

    for result in results {
        let pool = &result.pool;
        let channels = [
            pool.mana.white,
            pool.mana.blue,
            pool.mana.black,
            pool.mana.red,
            pool.mana.green,
            pool.mana.colorless,
            pool.treasures,
            pool.untaps,
            pool.prowess,
        ];
        for (total, value) in totals.iter_mut().zip(channels) {
            *total += value as i64;
        }

        total_casts += result.casts as u64;
        total_copies += result.copies as u64;
        total_heads += result.heads;
        total_flips += result.flips;
        summary.max_casts = summary.max_casts.max(result.casts);
        *summary.cast_distribution.entry(result.casts).or_insert(0) += 1;

        match result.termination {
            Termination::SpellResolved => summary.terminations.spell_resolved += 1,
            Termination::Unaffordable => summary.terminations.unaffordable += 1,
            Termination::CastLimit => summary.terminations.cast_limit += 1,
        }
    }

    let n = results.len() as f64;
    let mean = |total: i64| total as f64 / n;
    summary.mean_pool = PoolMeans {
        white: mean(totals[0]),
        blue: mean(totals[1]),
        black: mean(totals[2]),
        red: mean(totals[3]),
        green: mean(totals[4]),
        colorless: mean(totals[5]),
        treasures: mean(totals[6]),
        untaps: mean(totals[7]),
        prowess: mean(totals[8]),
    };
    summary.mean_casts = total_casts as f64 / n;
    summary.mean_copies = total_copies as f64 / n;
    summary.heads_fraction = if total_flips > 0 {
        total_heads as f64 / total_flips as f64
    } else {
        0.0
    };

    summary
}

/// A batch summary with enough context to reproduce it
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub generated_at: String,
    pub spell: &'a str,
    pub board: Vec<&'a str>,
    pub starting_pool: String,
    pub base_seed: u64,
    pub cast_limit: Option<u32>,
    pub summary: &'a BatchSummary,
}

impl Report<'_> {
    pub fn save(&self, path: &str) -> Result<(), ReportError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
